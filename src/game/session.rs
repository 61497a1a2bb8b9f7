use tracing::{debug, info, warn};

use super::{
    config::GameConfig,
    direction::Direction,
    engine::GameEngine,
    state::{EndReason, GameState, GameStatus, Snapshot},
};
use crate::storage::HighScoreStore;

/// What a single tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The game was not running
    Ignored,
    Moved { grew: bool },
    GameOver { reason: EndReason, final_score: u32 },
}

/// Owns one game's state and drives its lifecycle
///
/// This is the only mutator of game state. Input handlers call the command
/// methods, the tick timer calls [`GameSession::tick`], and the renderer only
/// ever sees a [`Snapshot`].
pub struct GameSession {
    engine: GameEngine,
    state: GameState,
    status: GameStatus,
    pending_direction: Direction,
    end_reason: Option<EndReason>,
    high_score: u32,
    store: Box<dyn HighScoreStore>,
}

impl GameSession {
    pub fn new(config: GameConfig, store: Box<dyn HighScoreStore>) -> Self {
        let high_score = store.load().unwrap_or_else(|err| {
            warn!("Could not load high score, starting from 0: {err:#}");
            0
        });
        let mut engine = GameEngine::new(config);
        let state = engine.reset();
        let pending_direction = state.snake.direction;

        Self {
            engine,
            state,
            status: GameStatus::Idle,
            pending_direction,
            end_reason: None,
            high_score,
            store,
        }
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.status == GameStatus::Running
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn pending_direction(&self) -> Direction {
        self.pending_direction
    }

    pub fn config(&self) -> &GameConfig {
        self.engine.config()
    }

    /// Queue a direction for the next tick
    ///
    /// Ignored unless the game is running, and when it would reverse the
    /// committed direction. Returns whether the request was taken.
    pub fn request_direction(&mut self, direction: Direction) -> bool {
        if self.status != GameStatus::Running || self.state.snake.direction.is_opposite(direction) {
            return false;
        }
        self.pending_direction = direction;
        true
    }

    /// Begin a fresh game from Idle or GameOver, or resume from Paused
    pub fn start(&mut self) {
        match self.status {
            GameStatus::Idle | GameStatus::GameOver => {
                self.reset_game();
                self.status = GameStatus::Running;
                info!(high_score = self.high_score, "Game started");
            }
            GameStatus::Paused => self.resume(),
            GameStatus::Running => {}
        }
    }

    pub fn pause(&mut self) {
        if self.status == GameStatus::Running {
            self.status = GameStatus::Paused;
            debug!(score = self.state.score, "Game paused");
        }
    }

    pub fn resume(&mut self) {
        if self.status == GameStatus::Paused {
            self.status = GameStatus::Running;
            debug!("Game resumed");
        }
    }

    /// Flip between Running and Paused; no effect in any other state
    pub fn toggle_pause(&mut self) {
        match self.status {
            GameStatus::Running => self.pause(),
            GameStatus::Paused => self.resume(),
            GameStatus::Idle | GameStatus::GameOver => {}
        }
    }

    /// Abandon whatever is happening and start over
    pub fn restart(&mut self) {
        self.status = GameStatus::GameOver;
        self.start();
    }

    /// Advance the simulation by one tick
    pub fn tick(&mut self) -> TickOutcome {
        if self.status != GameStatus::Running {
            return TickOutcome::Ignored;
        }

        let result = self.engine.step(&mut self.state, self.pending_direction);

        if result.ate_food {
            self.record_score();
        }

        match result.end_reason {
            Some(reason) => {
                self.status = GameStatus::GameOver;
                self.end_reason = Some(reason);
                info!(
                    ?reason,
                    score = self.state.score,
                    ticks = self.state.ticks,
                    "Game over"
                );
                TickOutcome::GameOver {
                    reason,
                    final_score: self.state.score,
                }
            }
            None => TickOutcome::Moved {
                grew: result.ate_food,
            },
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            snake: self.state.snake.cells().copied().collect(),
            food: self.state.food,
            direction: self.state.snake.direction,
            grid: self.state.grid,
            score: self.state.score,
            high_score: self.high_score,
            status: self.status,
            end_reason: self.end_reason,
            ticks: self.state.ticks,
        }
    }

    fn reset_game(&mut self) {
        self.state = self.engine.reset();
        self.pending_direction = self.state.snake.direction;
        self.end_reason = None;
    }

    fn record_score(&mut self) {
        if self.state.score <= self.high_score {
            return;
        }
        self.high_score = self.state.score;
        debug!(high_score = self.high_score, "New high score");
        if let Err(err) = self.store.save(self.high_score) {
            warn!("Could not save high score: {err:#}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Grid, Position, Snake};
    use crate::storage::MemoryStore;

    fn session_with(config: GameConfig, store: &MemoryStore) -> GameSession {
        GameSession::new(config, Box::new(store.clone()))
    }

    fn running_session() -> GameSession {
        let mut session = session_with(GameConfig::default(), &MemoryStore::default());
        session.start();
        session
    }

    /// Place the snake and food by hand on a running session
    fn arrange(session: &mut GameSession, snake: Snake, food: Position) {
        session.pending_direction = snake.direction;
        session.state.snake = snake;
        session.state.food = Some(food);
    }

    fn assert_body_valid(session: &GameSession) {
        let snapshot = session.snapshot();
        for (i, cell) in snapshot.snake.iter().enumerate() {
            assert!(snapshot.grid.contains(*cell), "{cell:?} out of bounds");
            assert!(!snapshot.snake[i + 1..].contains(cell), "{cell:?} repeated");
        }
        if let Some(food) = snapshot.food {
            assert!(!snapshot.snake.contains(&food));
        }
    }

    #[test]
    fn test_new_session_is_idle() {
        let session = session_with(GameConfig::default(), &MemoryStore::new(12));

        assert_eq!(session.status(), GameStatus::Idle);
        assert_eq!(session.score(), 0);
        assert_eq!(session.high_score(), 12);
        assert_eq!(session.snapshot().snake.len(), 3);
    }

    #[test]
    fn test_tick_ignored_unless_running() {
        let mut session = session_with(GameConfig::default(), &MemoryStore::default());
        let before = session.snapshot();

        assert_eq!(session.tick(), TickOutcome::Ignored);
        assert_eq!(session.snapshot(), before);

        session.start();
        session.pause();
        assert_eq!(session.tick(), TickOutcome::Ignored);
        assert_eq!(session.state().ticks, 0);
    }

    #[test]
    fn test_eats_food_after_five_ticks() {
        let mut session = running_session();
        assert_eq!(session.state().grid, Grid::new(30, 20));
        assert_eq!(
            session.snapshot().snake,
            vec![
                Position::new(15, 10),
                Position::new(14, 10),
                Position::new(13, 10)
            ]
        );
        session.state.food = Some(Position::new(20, 10));

        for _ in 0..4 {
            assert_eq!(session.tick(), TickOutcome::Moved { grew: false });
        }
        assert_eq!(session.tick(), TickOutcome::Moved { grew: true });

        let snapshot = session.snapshot();
        assert_eq!(snapshot.head(), Some(Position::new(20, 10)));
        assert_eq!(snapshot.snake.len(), 4);
        assert_eq!(snapshot.score, 1);
        assert_eq!(snapshot.high_score, 1);
        assert_ne!(snapshot.food, Some(Position::new(20, 10)));
        assert_body_valid(&session);
    }

    #[test]
    fn test_wall_ends_game() {
        let mut session = running_session();
        let edge = session.state().grid.width as i32 - 1;
        arrange(
            &mut session,
            Snake::new(Position::new(edge, 3), Direction::Right, 3),
            Position::new(0, 0),
        );

        let outcome = session.tick();

        assert_eq!(
            outcome,
            TickOutcome::GameOver {
                reason: EndReason::Wall,
                final_score: 0
            }
        );
        assert_eq!(session.status(), GameStatus::GameOver);
        assert_eq!(session.snapshot().end_reason, Some(EndReason::Wall));
        assert_eq!(session.tick(), TickOutcome::Ignored);
        assert_body_valid(&session);
    }

    #[test]
    fn test_u_turn_hits_body_past_neck() {
        let mut session = running_session();
        arrange(
            &mut session,
            Snake::new(Position::new(10, 10), Direction::Right, 6),
            Position::new(0, 0),
        );

        // The first two turns pass beside body segments 1..=3 without a hit
        for direction in [Direction::Down, Direction::Left, Direction::Up] {
            assert!(session.request_direction(direction));
            let outcome = session.tick();
            if direction == Direction::Up {
                // (9,10) is now body index 4
                assert_eq!(
                    outcome,
                    TickOutcome::GameOver {
                        reason: EndReason::SelfCollision,
                        final_score: 0
                    }
                );
            } else {
                assert_eq!(outcome, TickOutcome::Moved { grew: false });
            }
        }
    }

    #[test]
    fn test_reversal_is_rejected() {
        let mut session = running_session();
        assert_eq!(session.state().snake.direction, Direction::Right);

        assert!(!session.request_direction(Direction::Left));
        assert_eq!(session.pending_direction(), Direction::Right);

        // Queuing Up does not unlock Left before the tick commits
        assert!(session.request_direction(Direction::Up));
        assert!(!session.request_direction(Direction::Left));
        assert_eq!(session.pending_direction(), Direction::Up);

        session.tick();
        assert_eq!(session.state().snake.direction, Direction::Up);
        assert!(session.request_direction(Direction::Left));
    }

    #[test]
    fn test_input_ignored_when_not_running() {
        let mut session = session_with(GameConfig::default(), &MemoryStore::default());
        assert!(!session.request_direction(Direction::Up));

        session.start();
        session.pause();
        assert!(!session.request_direction(Direction::Up));
        assert_eq!(session.pending_direction(), Direction::Right);
    }

    #[test]
    fn test_toggle_pause() {
        let mut session = session_with(GameConfig::default(), &MemoryStore::default());

        session.toggle_pause();
        assert_eq!(session.status(), GameStatus::Idle);

        session.start();
        session.toggle_pause();
        assert_eq!(session.status(), GameStatus::Paused);
        session.toggle_pause();
        assert_eq!(session.status(), GameStatus::Running);
    }

    #[test]
    fn test_start_resumes_from_pause_without_reset() {
        let mut session = running_session();
        session.tick();
        let head = session.state().snake.head();

        session.pause();
        session.start();

        assert_eq!(session.status(), GameStatus::Running);
        assert_eq!(session.state().snake.head(), head);
    }

    #[test]
    fn test_restart_from_any_state() {
        let mut session = running_session();
        session.state.food = Some(session.state().snake.head().moved_by(1, 0));
        session.tick();
        assert_eq!(session.score(), 1);

        session.pause();
        session.restart();

        assert_eq!(session.status(), GameStatus::Running);
        assert_eq!(session.score(), 0);
        assert_eq!(session.state().ticks, 0);
        assert_eq!(session.state().snake.len(), 3);
        assert_eq!(session.high_score(), 1);
    }

    #[test]
    fn test_start_after_game_over_resets() {
        let mut session = running_session();
        arrange(
            &mut session,
            Snake::new(Position::new(0, 0), Direction::Up, 3),
            Position::new(5, 5),
        );
        session.tick();
        assert_eq!(session.status(), GameStatus::GameOver);

        session.start();

        assert_eq!(session.status(), GameStatus::Running);
        assert_eq!(session.snapshot().end_reason, None);
        assert_eq!(session.state().snake.head(), Position::new(15, 10));
        assert_eq!(session.pending_direction(), Direction::Right);
    }

    #[test]
    fn test_high_score_saved_only_on_increase() {
        let store = MemoryStore::new(1);
        let mut session = session_with(GameConfig::default(), &store);
        session.start();

        // First food ties the stored high score
        session.state.food = Some(session.state().snake.head().moved_by(1, 0));
        session.tick();
        assert_eq!(session.high_score(), 1);
        assert_eq!(store.saves(), 0);

        session.state.food = Some(session.state().snake.head().moved_by(1, 0));
        session.tick();
        assert_eq!(session.high_score(), 2);
        assert_eq!(store.value(), 2);
        assert_eq!(store.saves(), 1);

        // A new game does not lower it
        session.restart();
        assert_eq!(session.high_score(), 2);
        assert_eq!(session.snapshot().high_score, 2);
    }

    #[test]
    fn test_board_filled_ends_game() {
        let mut session = session_with(GameConfig::with_grid(4, 1), &MemoryStore::default());
        session.start();

        let outcome = session.tick();

        assert_eq!(
            outcome,
            TickOutcome::GameOver {
                reason: EndReason::BoardFilled,
                final_score: 1
            }
        );
        assert_eq!(session.snapshot().food, None);
        assert_eq!(session.high_score(), 1);
    }

    #[test]
    fn test_random_play_keeps_invariants() {
        let config = GameConfig {
            seed: Some(3),
            ..GameConfig::small()
        };
        let mut session = session_with(config, &MemoryStore::default());
        session.start();

        let turns = [Direction::Up, Direction::Left, Direction::Down, Direction::Right];
        for i in 0..400 {
            let before = session.state().snake.len();
            let food = session.state().food;
            session.request_direction(turns[(i / 3) % turns.len()]);

            match session.tick() {
                TickOutcome::Moved { grew } => {
                    let head = session.state().snake.head();
                    assert_eq!(grew, food == Some(head));
                    assert_eq!(session.state().snake.len(), before + grew as usize);
                    assert!(session.high_score() >= session.score());
                }
                TickOutcome::GameOver { .. } => session.start(),
                TickOutcome::Ignored => unreachable!("session is always running here"),
            }
            assert_body_valid(&session);
        }
    }
}
