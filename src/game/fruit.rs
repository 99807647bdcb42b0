use rand::Rng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::warn;

use super::state::Position;

/// How a new fruit cell is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlacementStrategy {
    /// Sample the whole grid and retry while the sample is occupied.
    /// Cheap while the snake covers a small share of the grid.
    #[default]
    Rejection,
    /// Collect every free cell and pick one of them.
    /// Bounded work no matter how full the grid is.
    Complement,
}

/// Owns the current fruit cell and the randomness used to move it
#[derive(Debug, Clone)]
pub struct FruitSpawner {
    position: Position,
    grid_size: usize,
    strategy: PlacementStrategy,
    rng: StdRng,
}

impl FruitSpawner {
    /// Create a spawner with its first fruit placed away from `occupied`
    pub fn new(
        grid_size: usize,
        strategy: PlacementStrategy,
        occupied: &[Position],
        rng: StdRng,
    ) -> Self {
        let mut spawner = Self {
            position: Position::new(0, 0),
            grid_size,
            strategy,
            rng,
        };
        spawner.randomize(occupied);
        spawner
    }

    /// Current fruit cell
    pub fn position(&self) -> Position {
        self.position
    }

    pub fn strategy(&self) -> PlacementStrategy {
        self.strategy
    }

    /// Move the fruit to a uniformly random cell not in `occupied`
    ///
    /// Returns false and leaves the fruit where it is when `occupied` covers
    /// the whole grid.
    pub fn randomize(&mut self, occupied: &[Position]) -> bool {
        let next = match self.strategy {
            PlacementStrategy::Rejection => self.sample_rejection(occupied),
            PlacementStrategy::Complement => self.sample_complement(occupied),
        };

        match next {
            Some(position) => {
                self.position = position;
                true
            }
            None => {
                warn!(
                    grid_size = self.grid_size,
                    occupied = occupied.len(),
                    "no free cell left for fruit"
                );
                false
            }
        }
    }

    fn sample_rejection(&mut self, occupied: &[Position]) -> Option<Position> {
        let blocked: HashSet<Position> = occupied
            .iter()
            .copied()
            .filter(|pos| pos.is_within(self.grid_size))
            .collect();

        if blocked.len() >= self.grid_size * self.grid_size {
            return None;
        }

        loop {
            let pos = self.random_cell();
            if !blocked.contains(&pos) {
                return Some(pos);
            }
        }
    }

    fn sample_complement(&mut self, occupied: &[Position]) -> Option<Position> {
        let blocked: HashSet<Position> = occupied.iter().copied().collect();
        let size = self.grid_size as i32;

        let free: Vec<Position> = (0..size)
            .flat_map(|y| (0..size).map(move |x| Position::new(x, y)))
            .filter(|pos| !blocked.contains(pos))
            .collect();

        if free.is_empty() {
            return None;
        }

        Some(free[self.rng.gen_range(0..free.len())])
    }

    fn random_cell(&mut self) -> Position {
        let x = self.rng.gen_range(0..self.grid_size) as i32;
        let y = self.rng.gen_range(0..self.grid_size) as i32;
        Position::new(x, y)
    }
}
