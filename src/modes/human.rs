use anyhow::{Context, Result};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Instant;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, info};

use crate::game::{GameConfig, GameSession, TickOutcome};
use crate::input::{DragTracker, InputHandler, KeyAction};
use crate::render::Renderer;
use crate::storage::HighScoreStore;

/// What handling one terminal event asks of the loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct Reaction {
    /// A game (re)started or resumed, so the next tick is a full period away
    restart_clock: bool,
}

pub struct HumanMode {
    session: GameSession,
    renderer: Renderer,
    input_handler: InputHandler,
    drag: DragTracker,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(config: GameConfig, store: Box<dyn HighScoreStore>) -> Self {
        Self {
            session: GameSession::new(config, store),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            drag: DragTracker::new(),
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen, EnableMouseCapture)
            .context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        let config = self.session.config().clone();
        info!(
            grid_width = config.grid().width,
            grid_height = config.grid().height,
            tick_ms = config.tick_interval_ms,
            "Entering game loop"
        );

        // Simulation ticks are delayed, never skipped or bunched, when the
        // loop falls behind
        let mut tick_timer = interval(config.tick_interval());
        tick_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut render_timer = interval(config.frame_interval());
        render_timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => {
                            if self.handle_event(event).restart_clock {
                                tick_timer.reset();
                            }
                        }
                        Some(Err(err)) => {
                            return Err(err).context("Failed to read terminal event");
                        }
                        None => self.should_quit = true,
                    }
                }

                // Game logic tick, only polled while a game is running
                _ = tick_timer.tick(), if self.session.is_running() => {
                    self.update_game();
                }

                // Render frame
                _ = render_timer.tick() => {
                    let snapshot = self.session.snapshot();
                    let renderer = &mut self.renderer;
                    terminal.draw(|frame| {
                        renderer.render(frame, &snapshot, Instant::now());
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                info!(high_score = self.session.high_score(), "Quitting");
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) -> Reaction {
        match event {
            Event::Key(key) => {
                // Only process key press events, not release
                if key.kind != KeyEventKind::Press {
                    return Reaction::default();
                }
                let action = self.input_handler.handle_key_event(key);
                self.apply(action)
            }
            Event::Mouse(mouse) => {
                if let Some(direction) = self.drag.handle_mouse_event(mouse) {
                    self.session.request_direction(direction);
                }
                Reaction::default()
            }
            _ => Reaction::default(),
        }
    }

    fn apply(&mut self, action: KeyAction) -> Reaction {
        let was_running = self.session.is_running();

        match action {
            KeyAction::Move(direction) => {
                self.session.request_direction(direction);
            }
            KeyAction::TogglePause => self.session.toggle_pause(),
            KeyAction::Start => self.session.start(),
            KeyAction::Restart => self.session.restart(),
            KeyAction::Quit => self.should_quit = true,
            KeyAction::None => {}
        }

        let now_running = self.session.is_running();
        Reaction {
            restart_clock: now_running && (!was_running || action == KeyAction::Restart),
        }
    }

    fn update_game(&mut self) {
        if let TickOutcome::GameOver { final_score, .. } = self.session.tick() {
            debug!(final_score, "Tick timer idle until the next start");
        }
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )
        .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
