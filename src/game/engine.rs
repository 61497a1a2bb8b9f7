use super::{
    config::GameConfig,
    direction::Direction,
    food::FoodSpawner,
    grid::Grid,
    state::{EndReason, GameState, Snake},
};

/// Result of a game step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepResult {
    /// Whether the snake ate food this step
    pub ate_food: bool,
    /// Why the game ended, if this step ended it
    pub end_reason: Option<EndReason>,
}

impl StepResult {
    pub fn terminated(&self) -> bool {
        self.end_reason.is_some()
    }
}

/// The game engine that applies the movement, collision and food rules
pub struct GameEngine {
    config: GameConfig,
    grid: Grid,
    spawner: FoodSpawner,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        let grid = config.grid();
        let spawner = FoodSpawner::new(config.seed);
        Self {
            config,
            grid,
            spawner,
        }
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Reset the game to initial state
    pub fn reset(&mut self) -> GameState {
        let snake = Snake::reset(self.grid, self.config.initial_snake_length);
        let food = self.spawner.generate(&snake, self.grid);

        GameState::new(snake, food, self.grid)
    }

    /// Execute one step of the game in `direction`
    ///
    /// A step that ends in a collision leaves the body as it was before the
    /// step; only the committed direction changes.
    pub fn step(&mut self, state: &mut GameState, direction: Direction) -> StepResult {
        let mut next = state.snake.clone();
        let moved = next.step(direction, state.food);
        state.ticks += 1;

        if next.collides(moved.head, state.grid) {
            state.snake.direction = direction;
            let reason = if state.grid.contains(moved.head) {
                EndReason::SelfCollision
            } else {
                EndReason::Wall
            };
            return StepResult {
                ate_food: false,
                end_reason: Some(reason),
            };
        }

        state.snake = next;

        if !moved.grew {
            return StepResult {
                ate_food: false,
                end_reason: None,
            };
        }

        state.score += 1;
        state.food = self.spawner.generate(&state.snake, state.grid);

        StepResult {
            ate_food: true,
            end_reason: state.food.is_none().then_some(EndReason::BoardFilled),
        }
    }
}
