use std::io;

use thiserror::Error;

use crate::config::GridSize;
use crate::snake::Position;

/// Rejected game configuration.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
pub enum ConfigError {
    #[error("grid must have a positive size, got {width}x{height}")]
    EmptyGrid { width: u16, height: u16 },

    #[error(
        "start position ({}, {}) lies outside the {}x{} grid",
        .start.x,
        .start.y,
        .bounds.width,
        .bounds.height
    )]
    StartOutOfBounds { start: Position, bounds: GridSize },
}

/// A move token that does not name a direction.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
#[error("unknown direction {token:?}")]
pub struct ParseDirectionError {
    pub token: String,
}

/// Failure while loading or running a replay.
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("invalid move {token:?} at index {index}")]
    InvalidMove { index: usize, token: char },

    #[error("malformed replay: {0}")]
    Json(#[from] serde_json::Error),

    #[error("replay file: {0}")]
    Io(#[from] io::Error),
}
