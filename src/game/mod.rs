//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! `GameEngine` applies the per-tick rules; `GameSession` owns the state and the
//! Idle/Running/Paused/GameOver lifecycle around it.

pub mod config;
pub mod direction;
pub mod engine;
pub mod food;
pub mod grid;
pub mod session;
pub mod state;

// Re-export commonly used types
pub use config::GameConfig;
pub use direction::Direction;
pub use engine::{GameEngine, StepResult};
pub use food::FoodSpawner;
pub use grid::Grid;
pub use session::{GameSession, TickOutcome};
pub use state::{EndReason, GameState, GameStatus, Position, Snake, Snapshot, Step};
