//! Grid snake game-state engine.
//!
//! [`game::GameState`] owns the snake, the apple and a seeded random source,
//! and advances one tick per [`game::GameState::step`]. Seed, start cell,
//! grid size and the direction sequence fully determine a play-through,
//! which [`replay::Replay`] records and replays.

pub mod apple;
pub mod config;
pub mod error;
pub mod game;
pub mod input;
pub mod replay;
pub mod snake;
