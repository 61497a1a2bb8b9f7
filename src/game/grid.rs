use super::state::Position;

/// Discrete playing field derived from a pixel canvas and a cell size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    pub width: usize,
    pub height: usize,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Derive the grid from canvas dimensions in pixels.
    ///
    /// Partial cells at the right and bottom edges are dropped. A zero cell
    /// size yields an empty grid; config validation rejects it before use.
    pub fn from_canvas(canvas_width_px: u32, canvas_height_px: u32, cell_size_px: u32) -> Self {
        if cell_size_px == 0 {
            return Self::new(0, 0);
        }
        Self::new(
            (canvas_width_px / cell_size_px) as usize,
            (canvas_height_px / cell_size_px) as usize,
        )
    }

    /// Check if a position is within the grid bounds
    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.width as i32 && pos.y >= 0 && pos.y < self.height as i32
    }

    pub fn center(&self) -> Position {
        Position::new((self.width / 2) as i32, (self.height / 2) as i32)
    }

    pub fn area(&self) -> usize {
        self.width * self.height
    }

    /// Every cell of the grid, column by column
    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.width as i32)
            .flat_map(move |x| (0..self.height as i32).map(move |y| Position::new(x, y)))
    }
}
