//! Durable storage for the high score

pub mod json_file;
pub mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

use anyhow::Result;

/// Fixed key the high score is stored under
pub const HIGH_SCORE_KEY: &str = "snakeHighScore";

/// Somewhere the high score survives between runs
pub trait HighScoreStore {
    /// Read the stored high score, 0 when nothing has been stored yet
    fn load(&self) -> Result<u32>;

    fn save(&mut self, high_score: u32) -> Result<()>;
}
