pub mod drag;
pub mod handler;

pub use drag::DragTracker;
pub use handler::{InputHandler, KeyAction};
