use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use super::grid::Grid;
use super::state::{Position, Snake};

/// Places food on a uniformly random free cell
pub struct FoodSpawner {
    rng: StdRng,
}

impl FoodSpawner {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }

    /// Pick a cell not covered by the snake, or `None` when the board is full
    pub fn generate(&mut self, snake: &Snake, grid: Grid) -> Option<Position> {
        let free: Vec<Position> = grid.cells().filter(|&cell| !snake.occupies(cell)).collect();
        free.choose(&mut self.rng).copied()
    }
}
