use std::collections::VecDeque;

use super::direction::Direction;
use super::grid::Grid;

/// Body cells nearest the head that the self-collision check skips
///
/// With one cell of movement per tick and no reversals, the new head can
/// never land on body indices 1..=3.
pub const NECK_LENGTH: usize = 4;

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }
}

/// Result of advancing the snake by one cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub head: Position,
    pub grew: bool,
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at the front
    body: VecDeque<Position>,
    /// Committed direction of movement
    pub direction: Direction,
}

impl Snake {
    /// Create a new snake with given starting position and direction
    pub fn new(head: Position, direction: Direction, length: usize) -> Self {
        let (dx, dy) = direction.delta();
        let body = (0..length.max(1) as i32)
            .map(|i| head.moved_by(-dx * i, -dy * i))
            .collect();

        Self { body, direction }
    }

    /// Build a snake from explicit cells, head first; `None` when empty
    pub fn from_cells(
        cells: impl IntoIterator<Item = Position>,
        direction: Direction,
    ) -> Option<Self> {
        let body: VecDeque<Position> = cells.into_iter().collect();
        if body.is_empty() {
            return None;
        }
        Some(Self { body, direction })
    }

    /// Snake of `length` cells centered on the grid, heading right
    pub fn reset(grid: Grid, length: usize) -> Self {
        Self::new(grid.center(), Direction::Right, length)
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    pub fn cells(&self) -> impl ExactSizeIterator<Item = &Position> + '_ {
        self.body.iter()
    }

    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Advance one cell in `direction`, keeping the tail when the new head
    /// lands on `food`
    pub fn step(&mut self, direction: Direction, food: Option<Position>) -> Step {
        self.direction = direction;
        let head = self.head().moved_in_direction(direction);
        self.body.push_front(head);

        let grew = food == Some(head);
        if !grew {
            self.body.pop_back();
        }

        Step { head, grew }
    }

    /// Check whether `head` leaves the grid or hits the body past the neck
    pub fn collides(&self, head: Position, grid: Grid) -> bool {
        !grid.contains(head) || self.body.iter().skip(NECK_LENGTH).any(|&cell| cell == head)
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Lifecycle of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameStatus {
    #[default]
    Idle,
    Running,
    Paused,
    GameOver,
}

/// Why a game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    /// Snake hit a wall
    Wall,
    /// Snake hit itself
    SelfCollision,
    /// No free cell was left for food
    BoardFilled,
}

/// Complete state of one game
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub food: Option<Position>,
    pub grid: Grid,
    pub score: u32,
    pub ticks: u64,
}

impl GameState {
    /// Create a new game state
    pub fn new(snake: Snake, food: Option<Position>, grid: Grid) -> Self {
        Self {
            snake,
            food,
            grid,
            score: 0,
            ticks: 0,
        }
    }
}

/// Read-only view of the game handed to the renderer each frame
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub snake: Vec<Position>,
    pub food: Option<Position>,
    pub direction: Direction,
    pub grid: Grid,
    pub score: u32,
    pub high_score: u32,
    pub status: GameStatus,
    pub end_reason: Option<EndReason>,
    pub ticks: u64,
}

impl Snapshot {
    pub fn head(&self) -> Option<Position> {
        self.snake.first().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_movement() {
        let pos = Position::new(5, 5);
        assert_eq!(pos.moved_by(1, 0), Position::new(6, 5));
        assert_eq!(pos.moved_by(-1, 0), Position::new(4, 5));
        assert_eq!(pos.moved_by(0, 1), Position::new(5, 6));
        assert_eq!(pos.moved_by(0, -1), Position::new(5, 4));
    }

    #[test]
    fn test_snake_creation() {
        let snake = Snake::new(Position::new(5, 5), Direction::Right, 3);
        let cells: Vec<Position> = snake.cells().copied().collect();
        assert_eq!(
            cells,
            vec![Position::new(5, 5), Position::new(4, 5), Position::new(3, 5)]
        );
        assert_eq!(snake.tail(), Position::new(3, 5));
    }

    #[test]
    fn test_from_cells_rejects_empty_body() {
        assert_eq!(Snake::from_cells(Vec::new(), Direction::Up), None);

        let snake = Snake::from_cells([Position::new(2, 2)], Direction::Up).unwrap();
        assert_eq!(snake.len(), 1);
        assert_eq!(snake.head(), snake.tail());
    }

    #[test]
    fn test_reset_is_centered() {
        let snake = Snake::reset(Grid::new(30, 20), 3);
        let cells: Vec<Position> = snake.cells().copied().collect();
        assert_eq!(
            cells,
            vec![
                Position::new(15, 10),
                Position::new(14, 10),
                Position::new(13, 10)
            ]
        );
        assert_eq!(snake.direction, Direction::Right);
    }

    #[test]
    fn test_snake_step() {
        let mut snake = Snake::new(Position::new(5, 5), Direction::Right, 3);

        // Move without growing
        let step = snake.step(Direction::Right, Some(Position::new(0, 0)));
        assert_eq!(step, Step { head: Position::new(6, 5), grew: false });
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.tail(), Position::new(4, 5));

        // Move onto food
        let step = snake.step(Direction::Down, Some(Position::new(6, 6)));
        assert_eq!(step, Step { head: Position::new(6, 6), grew: true });
        assert_eq!(snake.len(), 4);
        assert_eq!(snake.direction, Direction::Down);
    }

    #[test]
    fn test_wall_collision() {
        let grid = Grid::new(10, 10);
        let mut snake = Snake::new(Position::new(9, 5), Direction::Right, 3);
        let step = snake.step(Direction::Right, None);
        assert_eq!(step.head, Position::new(10, 5));
        assert!(snake.collides(step.head, grid));
    }

    #[test]
    fn test_neck_never_collides() {
        let grid = Grid::new(10, 10);
        let snake = Snake::from_cells(
            [
                Position::new(5, 5),
                Position::new(4, 5),
                Position::new(3, 5),
                Position::new(2, 5),
                Position::new(1, 5),
                Position::new(0, 5),
            ],
            Direction::Right,
        )
        .unwrap();

        for neck in [Position::new(4, 5), Position::new(3, 5), Position::new(2, 5)] {
            assert!(!snake.collides(neck, grid));
        }
        assert!(snake.collides(Position::new(1, 5), grid));
        assert!(snake.collides(Position::new(0, 5), grid));
        assert!(!snake.collides(Position::new(7, 7), grid));
    }

    #[test]
    fn test_self_collision_after_loop() {
        let grid = Grid::new(10, 10);
        let mut snake = Snake::new(Position::new(5, 5), Direction::Right, 5);

        snake.step(Direction::Down, None);
        snake.step(Direction::Left, None);
        let step = snake.step(Direction::Up, None);

        // Head re-enters (4,5), which is still the last body cell
        assert_eq!(step.head, Position::new(4, 5));
        assert_eq!(snake.tail(), Position::new(4, 5));
        assert!(snake.collides(step.head, grid));
    }

    #[test]
    fn test_chasing_own_tail_is_safe() {
        let grid = Grid::new(10, 10);
        let mut snake = Snake::new(Position::new(5, 5), Direction::Right, 4);

        snake.step(Direction::Down, None);
        snake.step(Direction::Left, None);
        let step = snake.step(Direction::Up, None);

        assert_eq!(step.head, Position::new(4, 5));
        assert_eq!(snake.len(), 4);
        assert!(!snake.collides(step.head, grid));
    }
}
