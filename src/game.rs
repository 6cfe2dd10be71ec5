use std::collections::BTreeSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use crate::apple::{available_positions, spawn_position};
use crate::config::{GameConfig, GridSize};
use crate::error::ConfigError;
use crate::input::Direction;
use crate::snake::{Position, Snake};

/// Immutable copy of a game taken under the instance lock.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub head: Position,
    pub body: Vec<Position>,
    pub apple: Option<Position>,
    pub direction: Direction,
    pub score: usize,
    pub tick_count: u64,
    pub ate_last_step: bool,
    pub won: bool,
    pub collided: bool,
    pub out_of_bounds: bool,
    pub seed: u64,
    pub bounds: GridSize,
}

/// Mutable state guarded by the instance lock.
#[derive(Debug, Clone)]
struct Board {
    snake: Snake,
    apple: Option<Position>,
    rng: StdRng,
    tick_count: u64,
    ate_last_step: bool,
    won: bool,
}

impl Board {
    /// Places a new apple, flagging a win when no cell is left.
    fn place_apple(&mut self, bounds: GridSize) {
        self.apple = spawn_position(&mut self.rng, bounds, &self.snake);
        match self.apple {
            Some(apple) => debug!(x = apple.x, y = apple.y, "apple placed"),
            None => {
                self.won = true;
                info!(score = self.snake.len(), "grid filled, no room for an apple");
            }
        }
    }

    fn log_positions(&self) {
        trace!(
            head = ?self.snake.head(),
            body = ?self.snake.body(),
            apple = ?self.apple,
            "positions"
        );
    }
}

/// Complete game state for one snake on a bounded grid.
///
/// All methods take `&self` and serialize on one internal lock, so a state
/// can be shared through an `Arc` between an input context calling
/// [`GameState::set_direction`] and a loop calling [`GameState::step`].
///
/// Given the same seed, start and bounds, two states fed the same direction
/// sequence produce identical head, body and apple positions after every
/// step.
#[derive(Debug)]
pub struct GameState {
    seed: u64,
    bounds: GridSize,
    board: Mutex<Board>,
}

impl GameState {
    /// Creates a game seeded from the thread RNG.
    pub fn new(start: Position, bounds: GridSize) -> Result<Self, ConfigError> {
        Self::new_with_seed(start, bounds, rand::random())
    }

    /// Creates a deterministic game for tests and reproducible replays.
    pub fn new_with_seed(start: Position, bounds: GridSize, seed: u64) -> Result<Self, ConfigError> {
        GameConfig::seeded(start, bounds, seed).validate()?;
        debug!(x = start.x, y = start.y, seed, "snake with start position");

        let mut board = Board {
            snake: Snake::new(start),
            apple: None,
            rng: StdRng::seed_from_u64(seed),
            tick_count: 0,
            ate_last_step: false,
            won: false,
        };
        board.place_apple(bounds);
        board.log_positions();

        Ok(Self {
            seed,
            bounds,
            board: Mutex::new(board),
        })
    }

    /// Creates a game from a config, drawing a seed when it carries none.
    pub fn from_config(config: &GameConfig) -> Result<Self, ConfigError> {
        match config.seed {
            Some(seed) => Self::new_with_seed(config.start, config.bounds, seed),
            None => Self::new(config.start, config.bounds),
        }
    }

    fn board(&self) -> MutexGuard<'_, Board> {
        // Board mutations never panic midway; poisoned state is consistent.
        self.board.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Turns the snake unless `direction` reverses the current facing.
    pub fn set_direction(&self, direction: Direction) {
        let mut board = self.board();
        if !board.snake.set_direction(direction) {
            trace!(?direction, "ignored reversal");
        }
    }

    /// Advances the simulation by one tick.
    ///
    /// Moves the head, drags the body, and when the head lands on the apple
    /// grows into the vacated tail cell and places a new apple. Boundary and
    /// self collisions are not acted on here; see
    /// [`GameState::is_out_of_bounds`] and [`GameState::has_collided`].
    pub fn step(&self) {
        let mut board = self.board();

        board.snake.advance();
        board.log_positions();

        let ate = board.apple == Some(board.snake.head());
        board.ate_last_step = ate;
        if ate {
            board.snake.grow();
            debug!(score = board.snake.len(), "apple eaten");
            board.place_apple(self.bounds);
        }

        board.tick_count += 1;
    }

    /// Returns true when the head shares a cell with its own body.
    #[must_use]
    pub fn has_collided(&self) -> bool {
        self.board().snake.head_overlaps_body()
    }

    /// Returns true when the head has left the grid.
    #[must_use]
    pub fn is_out_of_bounds(&self) -> bool {
        !self.board().snake.head().is_within_bounds(self.bounds)
    }

    /// Returns true once the snake fills the grid.
    #[must_use]
    pub fn is_winner(&self) -> bool {
        self.board().won
    }

    #[must_use]
    pub fn head(&self) -> Position {
        self.board().snake.head()
    }

    /// Occupied cells, head first then body from neck to tail.
    #[must_use]
    pub fn positions(&self) -> Vec<Position> {
        self.board().snake.positions()
    }

    /// Copy of the body, neck first.
    #[must_use]
    pub fn body(&self) -> Vec<Position> {
        self.board().snake.body().to_vec()
    }

    #[must_use]
    pub fn direction(&self) -> Direction {
        self.board().snake.direction()
    }

    /// Current apple, `None` once the game is won.
    #[must_use]
    pub fn apple_position(&self) -> Option<Position> {
        self.board().apple
    }

    /// Number of body segments.
    #[must_use]
    pub fn score(&self) -> usize {
        self.board().snake.len()
    }

    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.board().tick_count
    }

    #[must_use]
    pub fn ate_last_step(&self) -> bool {
        self.board().ate_last_step
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    #[must_use]
    pub fn bounds(&self) -> GridSize {
        self.bounds
    }

    /// Free cells in the order apple placement indexes them.
    #[must_use]
    pub fn available_positions(&self) -> BTreeSet<Position> {
        available_positions(self.bounds, &self.board().snake)
    }

    /// Captures every observable value at once.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        let board = self.board();
        let head = board.snake.head();

        GameSnapshot {
            head,
            body: board.snake.body().to_vec(),
            apple: board.apple,
            direction: board.snake.direction(),
            score: board.snake.len(),
            tick_count: board.tick_count,
            ate_last_step: board.ate_last_step,
            won: board.won,
            collided: board.snake.head_overlaps_body(),
            out_of_bounds: !head.is_within_bounds(self.bounds),
            seed: self.seed,
            bounds: self.bounds,
        }
    }

    #[cfg(test)]
    fn with_board<T>(&self, f: impl FnOnce(&mut Board) -> T) -> T {
        let mut board = self.board();
        f(&mut *board)
    }
}

/// Copies the game but restarts the random stream from the seed.
///
/// Apples placed after the copy follow the seed's sequence from its start
/// rather than continuing the source's stream.
impl Clone for GameState {
    fn clone(&self) -> Self {
        let mut board = (*self.board()).clone();
        board.rng = StdRng::seed_from_u64(self.seed);

        Self {
            seed: self.seed,
            bounds: self.bounds,
            board: Mutex::new(board),
        }
    }
}
