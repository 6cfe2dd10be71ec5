use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::{GameConfig, GridSize};
use crate::error::{ConfigError, ReplayError};
use crate::game::{GameSnapshot, GameState};
use crate::input::Direction;
use crate::snake::Position;

/// Everything needed to reproduce a play-through.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Replay {
    pub seed: u64,
    pub start: Position,
    pub bounds: GridSize,
    /// One direction per tick, applied before stepping.
    #[serde(default)]
    pub moves: Vec<Direction>,
}

/// Why a replay stopped.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Collided,
    OutOfBounds,
    Won,
    /// Every move was played without reaching a terminal state.
    Exhausted,
}

impl Outcome {
    fn of(snapshot: &GameSnapshot) -> Option<Self> {
        if snapshot.out_of_bounds {
            Some(Self::OutOfBounds)
        } else if snapshot.collided {
            Some(Self::Collided)
        } else if snapshot.won {
            Some(Self::Won)
        } else {
            None
        }
    }
}

/// Result of running a replay.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ReplayOutcome {
    pub outcome: Outcome,
    pub initial: GameSnapshot,
    /// Snapshot after each played move.
    pub steps: Vec<GameSnapshot>,
}

impl ReplayOutcome {
    /// The last observed state.
    #[must_use]
    pub fn last(&self) -> &GameSnapshot {
        self.steps.last().unwrap_or(&self.initial)
    }
}

impl Replay {
    /// Creates a replay from a config, drawing a seed when it carries none.
    #[must_use]
    pub fn from_config(config: &GameConfig, moves: Vec<Direction>) -> Self {
        Self {
            seed: config.seed.unwrap_or_else(rand::random),
            start: config.start,
            bounds: config.bounds,
            moves,
        }
    }

    /// Parses a compact move string such as `"RRDDL"`.
    ///
    /// Whitespace and commas are skipped.
    pub fn parse_moves(raw: &str) -> Result<Vec<Direction>, ReplayError> {
        raw.chars()
            .enumerate()
            .filter(|(_, token)| !token.is_whitespace() && *token != ',')
            .map(|(index, token)| {
                Direction::from_code(token).ok_or(ReplayError::InvalidMove { index, token })
            })
            .collect()
    }

    /// Formats moves back into the compact string form.
    #[must_use]
    pub fn moves_string(&self) -> String {
        self.moves.iter().map(|direction| direction.code()).collect()
    }

    pub fn from_json(raw: &str) -> Result<Self, ReplayError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn to_json(&self) -> Result<String, ReplayError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Loads a replay from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ReplayError> {
        let raw = fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    /// Builds the game this replay starts from.
    pub fn game(&self) -> Result<GameState, ConfigError> {
        GameState::new_with_seed(self.start, self.bounds, self.seed)
    }

    /// Plays the moves until one ends the game or they run out.
    pub fn run(&self) -> Result<ReplayOutcome, ReplayError> {
        let state = self.game()?;
        let initial = state.snapshot();
        let mut steps = Vec::with_capacity(self.moves.len());

        let mut outcome = Outcome::of(&initial);
        for &direction in &self.moves {
            if outcome.is_some() {
                break;
            }

            state.set_direction(direction);
            state.step();
            let snapshot = state.snapshot();
            debug!(
                tick = snapshot.tick_count,
                score = snapshot.score,
                "replayed move {}",
                direction.code()
            );
            outcome = Outcome::of(&snapshot);
            steps.push(snapshot);
        }

        let outcome = outcome.unwrap_or(Outcome::Exhausted);
        info!(
            seed = self.seed,
            ticks = steps.len(),
            score = state.score(),
            ?outcome,
            "replay finished"
        );

        Ok(ReplayOutcome {
            outcome,
            initial,
            steps,
        })
    }
}
