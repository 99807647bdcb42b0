use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::fruit::PlacementStrategy;

/// Configuration for a game session
///
/// Fixed when a session is constructed. A running session never observes a
/// changed configuration; changes apply to the next session only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Side length of the square grid
    pub grid_size: usize,
    /// Terminal columns used to draw one cell
    pub cell_width: u16,
    /// Time between simulation ticks, in milliseconds
    pub tick_interval_ms: u64,
    /// Initial length of the snake, also the score baseline
    pub initial_snake_length: usize,
    /// How a new fruit cell is chosen
    pub fruit_placement: PlacementStrategy,
    /// Seed for fruit placement; entropy when absent
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: 20,
            cell_width: 2,
            tick_interval_ms: 150,
            initial_snake_length: 3,
            fruit_placement: PlacementStrategy::Rejection,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(grid_size: usize) -> Self {
        Self {
            grid_size,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10)
    }

    /// Create a large grid
    pub fn large() -> Self {
        Self::new(30)
    }

    /// Same configuration with a fixed RNG seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Load a configuration from a JSON file
    ///
    /// Missing fields fall back to their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: GameConfig = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Total number of cells on the grid
    pub fn cell_count(&self) -> usize {
        self.grid_size * self.grid_size
    }

    /// Validate configuration parameters
    ///
    /// # Returns
    ///
    /// `Ok(())` if all parameters are valid, `Err(String)` with an error message otherwise.
    pub fn validate(&self) -> Result<(), String> {
        if self.grid_size < 5 {
            return Err(format!("grid_size must be at least 5, got {}", self.grid_size));
        }

        if self.grid_size > i32::MAX as usize {
            return Err(format!("grid_size is too large, got {}", self.grid_size));
        }

        if self.initial_snake_length < 2 {
            return Err(format!(
                "initial_snake_length must be at least 2, got {}",
                self.initial_snake_length
            ));
        }

        // The starting head sits at x = initial_snake_length + 2
        if self.initial_snake_length + 2 >= self.grid_size {
            return Err(format!(
                "initial_snake_length ({}) does not fit on a grid of size {}",
                self.initial_snake_length, self.grid_size
            ));
        }

        if self.tick_interval_ms < 10 {
            return Err(format!(
                "tick_interval_ms must be at least 10, got {}",
                self.tick_interval_ms
            ));
        }

        if self.cell_width == 0 {
            return Err("cell_width must be at least 1".to_string());
        }

        Ok(())
    }
}
