//! Grid Snake - a single-player snake game for the terminal
//!
//! This library provides:
//! - Core game logic and the game lifecycle (game module)
//! - Keyboard and drag input mapping (input module)
//! - TUI rendering with time-based animation (render module)
//! - High score persistence (storage module)
//! - The interactive terminal mode (modes module)

pub mod game;
pub mod input;
pub mod logging;
pub mod modes;
pub mod render;
pub mod storage;
