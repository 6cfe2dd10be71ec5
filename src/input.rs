use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseDirectionError;

/// Facing directions of the snake head.
///
/// The grid uses screen coordinates, so `Up` decreases `y`.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns the opposite direction.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Returns the `(dx, dy)` offset of one step in this direction.
    #[must_use]
    pub fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }

    /// Returns the single-letter move code used by compact move strings.
    #[must_use]
    pub fn code(self) -> char {
        match self {
            Self::Up => 'U',
            Self::Down => 'D',
            Self::Left => 'L',
            Self::Right => 'R',
        }
    }

    /// Parses a single-letter move code (`U`, `D`, `L`, `R`, any case).
    #[must_use]
    pub fn from_code(code: char) -> Option<Self> {
        match code.to_ascii_uppercase() {
            'U' => Some(Self::Up),
            'D' => Some(Self::Down),
            'L' => Some(Self::Left),
            'R' => Some(Self::Right),
            _ => None,
        }
    }
}

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        let mut chars = trimmed.chars();
        if let (Some(code), None) = (chars.next(), chars.next()) {
            if let Some(direction) = Self::from_code(code) {
                return Ok(direction);
            }
        }

        match trimmed.to_ascii_lowercase().as_str() {
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            _ => Err(ParseDirectionError {
                token: trimmed.to_owned(),
            }),
        }
    }
}

/// Returns whether a direction change is legal (no immediate 180° turns).
#[must_use]
pub fn direction_change_is_valid(current: Direction, next: Direction) -> bool {
    next != current.opposite()
}
