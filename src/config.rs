use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::snake::Position;

/// Default grid width used by the CLI.
pub const DEFAULT_GRID_WIDTH: u16 = 20;

/// Default grid height used by the CLI.
pub const DEFAULT_GRID_HEIGHT: u16 = 20;

/// Logical grid dimensions passed through the game as a named type.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }

    /// Returns an error when either dimension is zero.
    pub fn validate(self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::EmptyGrid {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

impl Default for GridSize {
    fn default() -> Self {
        Self {
            width: DEFAULT_GRID_WIDTH,
            height: DEFAULT_GRID_HEIGHT,
        }
    }
}

/// Everything needed to construct a game.
///
/// A missing `seed` means one is drawn from the thread RNG at construction.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub start: Position,
    pub bounds: GridSize,
    #[serde(default)]
    pub seed: Option<u64>,
}

impl GameConfig {
    /// Creates a config with an explicit seed.
    #[must_use]
    pub fn seeded(start: Position, bounds: GridSize, seed: u64) -> Self {
        Self {
            start,
            bounds,
            seed: Some(seed),
        }
    }

    /// Checks that the grid is non-empty and the start cell lies on it.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.bounds.validate()?;
        if !self.start.is_within_bounds(self.bounds) {
            return Err(ConfigError::StartOutOfBounds {
                start: self.start,
                bounds: self.bounds,
            });
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        let bounds = GridSize::default();
        Self {
            start: Position::new(i32::from(bounds.width / 2), i32::from(bounds.height / 2)),
            bounds,
            seed: None,
        }
    }
}
