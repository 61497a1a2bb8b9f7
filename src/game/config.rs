use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};

use super::grid::Grid;

/// Largest number of cells allowed along either grid axis
pub const MAX_GRID_SIDE: usize = 1000;
/// Fastest supported redraw rate; anything higher rounds to a zero frame period
pub const MAX_FRAMES_PER_SECOND: u32 = 1000;

/// Configuration for the game
///
/// Can be read from a JSON file; missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the drawing surface in pixels
    pub canvas_width_px: u32,
    /// Height of the drawing surface in pixels
    pub canvas_height_px: u32,
    /// Edge length of one grid cell in pixels
    pub cell_size_px: u32,
    /// Initial length of the snake
    pub initial_snake_length: usize,
    /// Milliseconds between simulation ticks
    pub tick_interval_ms: u64,
    /// Redraws per second
    pub frames_per_second: u32,
    /// Fixed seed for food placement; random when absent
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            canvas_width_px: 600,
            canvas_height_px: 400,
            cell_size_px: 20,
            initial_snake_length: 3,
            tick_interval_ms: 150,
            frames_per_second: 30,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create a configuration whose canvas holds exactly `width` x `height` cells
    pub fn with_grid(width: usize, height: usize) -> Self {
        let defaults = Self::default();
        Self {
            canvas_width_px: width as u32 * defaults.cell_size_px,
            canvas_height_px: height as u32 * defaults.cell_size_px,
            ..defaults
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::with_grid(10, 10)
    }

    /// Read a configuration from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        serde_json::from_str(&text).with_context(|| format!("Failed to parse config {:?}", path))
    }

    pub fn grid(&self) -> Grid {
        Grid::from_canvas(self.canvas_width_px, self.canvas_height_px, self.cell_size_px)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn frame_interval(&self) -> Duration {
        let fps = self.frames_per_second.clamp(1, MAX_FRAMES_PER_SECOND);
        Duration::from_millis(1000 / u64::from(fps))
    }

    /// Reject configurations the game cannot start from
    pub fn validate(&self) -> Result<()> {
        ensure!(self.cell_size_px > 0, "cell size must be positive");
        ensure!(self.tick_interval_ms > 0, "tick interval must be positive");
        ensure!(self.frames_per_second > 0, "frame rate must be positive");
        ensure!(
            self.frames_per_second <= MAX_FRAMES_PER_SECOND,
            "frame rate must be at most {} fps",
            MAX_FRAMES_PER_SECOND
        );
        ensure!(
            self.initial_snake_length >= 1,
            "initial snake length must be at least 1"
        );

        let grid = self.grid();
        ensure!(
            grid.width <= MAX_GRID_SIDE && grid.height <= MAX_GRID_SIDE,
            "a {}x{} grid exceeds the {}x{} limit",
            grid.width,
            grid.height,
            MAX_GRID_SIDE,
            MAX_GRID_SIDE
        );
        let center_x = grid.width / 2;
        ensure!(
            grid.height >= 1 && center_x + 1 >= self.initial_snake_length,
            "a {}x{} grid cannot hold a centered snake of length {}",
            grid.width,
            grid.height,
            self.initial_snake_length
        );
        ensure!(
            grid.area() > self.initial_snake_length,
            "a {}x{} grid leaves no room for food",
            grid.width,
            grid.height
        );
        Ok(())
    }
}
