//! Grid Snake - a terminal snake game
//!
//! This library provides:
//! - Core simulation: snake movement, fruit placement, collisions (game module)
//! - Key mapping (input module)
//! - TUI rendering (render module)
//! - In-memory play statistics (metrics module)
//! - The interactive terminal loop (modes module)

pub mod game;
pub mod input;
pub mod logging;
pub mod metrics;
pub mod modes;
pub mod render;
