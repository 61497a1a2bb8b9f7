use std::time::{Duration, Instant};

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction as LayoutDirection, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use super::animation;
use crate::game::{Direction, EndReason, GameStatus, Position, Snapshot};

const HEAD: Color = Color::Rgb(0x38, 0x8E, 0x3C);
const FOOD: Color = Color::Rgb(0xF4, 0x43, 0x36);
const FOOD_BRIGHT: Color = Color::Rgb(0xFF, 0x52, 0x52);
const POPUP: Color = Color::Rgb(76, 175, 80);
const EMPTY: Color = Color::Rgb(60, 60, 60);

/// Draws snapshots and keeps the bookkeeping its animations need
///
/// The renderer notices score changes, new food and the end of a game by
/// comparing snapshots, and remembers when each happened. Effects are then
/// computed from those instants by the pure functions in
/// [`animation`](super::animation).
pub struct Renderer {
    epoch: Instant,
    last_score: u32,
    popup: Option<(Instant, Position)>,
    food: Option<(Position, Instant)>,
    game_over_since: Option<Instant>,
}

impl Renderer {
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
            last_score: 0,
            popup: None,
            food: None,
            game_over_since: None,
        }
    }

    pub fn render(&mut self, frame: &mut Frame, snapshot: &Snapshot, now: Instant) {
        self.observe(snapshot, now);

        let chunks = Layout::default()
            .direction(LayoutDirection::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(snapshot), chunks[0]);

        let grid = snapshot.grid;
        let board = centered(
            chunks[1],
            (grid.width * 2 + 2) as u16,
            (grid.height + 2) as u16,
        );
        frame.render_widget(self.render_grid(snapshot, now), board);

        match snapshot.status {
            GameStatus::Idle => {
                let text = vec![
                    Line::from(Span::styled(
                        "SNAKE",
                        Style::default().fg(HEAD).add_modifier(Modifier::BOLD),
                    )),
                    Line::from(""),
                    Line::from(vec![
                        Span::styled("Press ", Style::default().fg(Color::Gray)),
                        Span::styled(
                            "Enter",
                            Style::default()
                                .fg(Color::Green)
                                .add_modifier(Modifier::BOLD),
                        ),
                        Span::styled(" to start", Style::default().fg(Color::Gray)),
                    ]),
                ];
                render_overlay(frame, board, text, Color::Green);
            }
            GameStatus::Paused => {
                let text = vec![
                    Line::from(Span::styled(
                        "PAUSED",
                        Style::default()
                            .fg(Color::Yellow)
                            .add_modifier(Modifier::BOLD),
                    )),
                    Line::from(""),
                    Line::from(Span::styled(
                        "Space to resume",
                        Style::default().fg(Color::Gray),
                    )),
                ];
                render_overlay(frame, board, text, Color::Yellow);
            }
            GameStatus::GameOver => {
                let fade = self
                    .game_over_since
                    .map(|since| animation::game_over_fade(now.saturating_duration_since(since)))
                    .unwrap_or(1.0);
                let text = self.render_game_over(snapshot, fade);
                render_overlay(frame, board, text, shade(Color::Rgb(0xD3, 0x2F, 0x2F), fade));
            }
            GameStatus::Running => {}
        }

        frame.render_widget(self.render_controls(snapshot.status), chunks[2]);
    }

    fn observe(&mut self, snapshot: &Snapshot, now: Instant) {
        if snapshot.score > self.last_score {
            self.popup = snapshot.head().map(|head| (now, head));
        }
        self.last_score = snapshot.score;

        self.food = match (self.food, snapshot.food) {
            (Some((seen, since)), Some(food)) if seen == food => Some((seen, since)),
            (_, Some(food)) => Some((food, now)),
            (_, None) => None,
        };

        if snapshot.status == GameStatus::GameOver {
            self.game_over_since.get_or_insert(now);
        } else {
            self.game_over_since = None;
        }
    }

    fn render_grid(&self, snapshot: &Snapshot, now: Instant) -> Paragraph<'static> {
        let grid = snapshot.grid;
        let elapsed = now.saturating_duration_since(self.epoch);
        let dim = self
            .game_over_since
            .map(|since| 0.7 * animation::game_over_fade(now.saturating_duration_since(since)))
            .unwrap_or(0.0);

        let mut segment_at = vec![None; grid.area()];
        for (index, cell) in snapshot.snake.iter().enumerate() {
            if grid.contains(*cell) {
                segment_at[cell.y as usize * grid.width + cell.x as usize] = Some(index);
            }
        }

        let popup = self.popup.and_then(|(since, origin)| {
            let (opacity, rise) = animation::score_popup(now.saturating_duration_since(since))?;
            Some((origin.moved_by(0, -(rise.round() as i32)), opacity))
        });

        let mut lines = Vec::with_capacity(grid.height);
        for y in 0..grid.height {
            let mut spans = Vec::with_capacity(grid.width);

            for x in 0..grid.width {
                let pos = Position::new(x as i32, y as i32);

                let cell = match (popup, segment_at[y * grid.width + x]) {
                    (Some((at, opacity)), _) if at == pos => Span::styled(
                        "+1",
                        Style::default()
                            .fg(shade(POPUP, opacity))
                            .add_modifier(Modifier::BOLD),
                    ),
                    (_, Some(0)) => {
                        let glyph = if animation::blinking(elapsed) {
                            "■ "
                        } else {
                            head_glyph(snapshot.direction)
                        };
                        Span::styled(
                            glyph,
                            Style::default()
                                .fg(shade(HEAD, animation::breath(elapsed, 0) * (1.0 - dim)))
                                .add_modifier(Modifier::BOLD),
                        )
                    }
                    (_, Some(index)) => {
                        let breath = animation::breath(elapsed, index);
                        let lightness = 0.35 + (breath - 0.9);
                        let color = hsl(animation::body_hue(elapsed, index), 0.7, lightness);
                        Span::styled("■ ", Style::default().fg(shade(color, 1.0 - dim)))
                    }
                    (_, None) if snapshot.food == Some(pos) => self.food_span(now, elapsed, dim),
                    _ => Span::styled(". ", Style::default().fg(shade(EMPTY, 1.0 - dim))),
                };

                spans.push(cell);
            }

            lines.push(Line::from(spans));
        }

        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(Color::White))
                .title(" Snake "),
        )
    }

    fn food_span(&self, now: Instant, elapsed: Duration, dim: f64) -> Span<'static> {
        let appear = self
            .food
            .map(|(_, since)| animation::food_appear(now.saturating_duration_since(since)))
            .unwrap_or(1.0);
        if appear < 1.0 {
            return Span::styled("· ", Style::default().fg(shade(FOOD_BRIGHT, 1.0 - dim)));
        }

        let pulse = animation::food_pulse(elapsed);
        let (glyph, color) = if pulse > 1.1 {
            ("● ", FOOD_BRIGHT)
        } else {
            ("• ", FOOD)
        };
        Span::styled(
            glyph,
            Style::default()
                .fg(shade(color, 1.0 - dim))
                .add_modifier(Modifier::BOLD),
        )
    }

    fn render_stats(&self, snapshot: &Snapshot) -> Paragraph<'static> {
        let text = vec![Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                snapshot.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("High Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                snapshot.high_score.to_string(),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("Ticks: ", Style::default().fg(Color::Yellow)),
            Span::styled(snapshot.ticks.to_string(), Style::default().fg(Color::White)),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_game_over(&self, snapshot: &Snapshot, fade: f64) -> Vec<Line<'static>> {
        let (title, detail) = match snapshot.end_reason {
            Some(EndReason::BoardFilled) => ("YOU WIN", "The board is full"),
            Some(EndReason::SelfCollision) => ("GAME OVER", "You ran into yourself"),
            Some(EndReason::Wall) | None => ("GAME OVER", "You hit the wall"),
        };

        let mut text = vec![
            Line::from(Span::styled(
                title,
                Style::default()
                    .fg(shade(Color::Rgb(255, 255, 255), 0.5 + fade * 0.5))
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(detail, Style::default().fg(Color::Gray))),
            Line::from(""),
        ];

        if fade > animation::GAME_OVER_SCORE_DELAY {
            let opacity = (fade - animation::GAME_OVER_SCORE_DELAY)
                / (1.0 - animation::GAME_OVER_SCORE_DELAY);
            text.push(Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    snapshot.score.to_string(),
                    Style::default()
                        .fg(shade(Color::Rgb(255, 255, 255), opacity))
                        .add_modifier(Modifier::BOLD),
                ),
            ]));
        } else {
            text.push(Line::from(""));
        }

        text.push(Line::from(""));
        text.push(Line::from(vec![
            Span::styled("Press ", Style::default().fg(Color::Gray)),
            Span::styled(
                "R",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" to restart or ", Style::default().fg(Color::Gray)),
            Span::styled(
                "Q",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::styled(" to quit", Style::default().fg(Color::Gray)),
        ]));
        text
    }

    fn render_controls(&self, status: GameStatus) -> Paragraph<'static> {
        let pause_label = if status == GameStatus::Paused {
            " to resume | "
        } else {
            " to pause | "
        };
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" or drag to move | "),
            Span::styled("Space", Style::default().fg(Color::Cyan)),
            Span::raw(pause_label),
            Span::styled("R", Style::default().fg(Color::Green)),
            Span::raw(" to restart | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

fn head_glyph(direction: Direction) -> &'static str {
    match direction {
        Direction::Up => "▲ ",
        Direction::Down => "▼ ",
        Direction::Left => "◀ ",
        Direction::Right => "▶ ",
    }
}

fn render_overlay(frame: &mut Frame, board: Rect, text: Vec<Line<'static>>, border: Color) {
    let height = text.len() as u16 + 2;
    let width = text.iter().map(|line| line.width()).max().unwrap_or(0) as u16 + 6;
    let area = centered(board, width, height);

    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border)),
        ),
        area,
    );
}

/// A `width` x `height` rectangle centered in `area`, clipped to fit
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Scale an RGB colour's brightness; named colours pass through
fn shade(color: Color, factor: f64) -> Color {
    match color {
        Color::Rgb(r, g, b) => {
            let scale = |c: u8| (f64::from(c) * factor.clamp(0.0, 1.0)).round() as u8;
            Color::Rgb(scale(r), scale(g), scale(b))
        }
        other => other,
    }
}

fn hsl(hue: f64, saturation: f64, lightness: f64) -> Color {
    let chroma = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let h = hue.rem_euclid(360.0) / 60.0;
    let x = chroma * (1.0 - (h % 2.0 - 1.0).abs());
    let (r, g, b) = match h as u8 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };
    let m = lightness - chroma / 2.0;
    let channel = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    Color::Rgb(channel(r), channel(g), channel(b))
}
