//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! A [`GameSession`] is advanced one tick at a time by whoever owns the clock.

pub mod config;
pub mod direction;
pub mod fruit;
pub mod session;
pub mod state;

// Re-export commonly used types
pub use config::GameConfig;
pub use direction::Direction;
pub use fruit::{FruitSpawner, PlacementStrategy};
pub use session::{CollisionType, GameSession, SessionStatus, TickOutcome};
pub use state::{Position, Snake};
