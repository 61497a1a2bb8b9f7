/// Direction the snake can move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    Up,
    Down,
    Left,
    #[default]
    Right,
}

impl Direction {
    /// Returns true if turning from self to other would be a 180-degree turn
    pub fn is_opposite(&self, other: Direction) -> bool {
        self.opposite() == other
    }

    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Returns the delta (dx, dy) for moving in this direction
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// Picks the cardinal direction of the dominant axis of a drag delta.
    ///
    /// Horizontal wins only when strictly larger; ties fall through to the
    /// vertical axis. A zero delta maps to nothing.
    pub fn from_drag(dx: i32, dy: i32) -> Option<Direction> {
        if dx.abs() > dy.abs() {
            if dx > 0 {
                Some(Direction::Right)
            } else {
                Some(Direction::Left)
            }
        } else if dy > 0 {
            Some(Direction::Down)
        } else if dy < 0 {
            Some(Direction::Up)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite_directions() {
        assert!(Direction::Up.is_opposite(Direction::Down));
        assert!(Direction::Down.is_opposite(Direction::Up));
        assert!(Direction::Left.is_opposite(Direction::Right));
        assert!(Direction::Right.is_opposite(Direction::Left));

        assert!(!Direction::Up.is_opposite(Direction::Left));
        assert!(!Direction::Up.is_opposite(Direction::Right));
        assert!(!Direction::Up.is_opposite(Direction::Up));
    }

    #[test]
    fn test_direction_delta() {
        assert_eq!(Direction::Up.delta(), (0, -1));
        assert_eq!(Direction::Down.delta(), (0, 1));
        assert_eq!(Direction::Left.delta(), (-1, 0));
        assert_eq!(Direction::Right.delta(), (1, 0));
    }

    #[test]
    fn test_drag_dominant_axis() {
        assert_eq!(Direction::from_drag(5, 2), Some(Direction::Right));
        assert_eq!(Direction::from_drag(-5, 2), Some(Direction::Left));
        assert_eq!(Direction::from_drag(1, 4), Some(Direction::Down));
        assert_eq!(Direction::from_drag(1, -4), Some(Direction::Up));
    }

    #[test]
    fn test_drag_ties_and_zero() {
        assert_eq!(Direction::from_drag(3, 3), Some(Direction::Down));
        assert_eq!(Direction::from_drag(-3, -3), Some(Direction::Up));
        assert_eq!(Direction::from_drag(0, 0), None);
    }
}
