use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use crate::game::Direction;

/// Turns pointer drags into swipe directions
///
/// Each drag sample is compared with the previous one, so a single long drag
/// can steer several times.
#[derive(Debug, Default)]
pub struct DragTracker {
    last: Option<(u16, u16)>,
}

impl DragTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle_mouse_event(&mut self, event: MouseEvent) -> Option<Direction> {
        let sample = (event.column, event.row);
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.last = Some(sample);
                None
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                let previous = self.last.replace(sample)?;
                // Terminal rows are roughly twice as tall as columns are wide
                let dx = i32::from(sample.0) - i32::from(previous.0);
                let dy = (i32::from(sample.1) - i32::from(previous.1)) * 2;
                Direction::from_drag(dx, dy)
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.last = None;
                None
            }
            _ => None,
        }
    }
}
