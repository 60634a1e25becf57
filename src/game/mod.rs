//! Core game logic for the snake arena
//!
//! Everything in here is synchronous, single-threaded and free of I/O: the
//! engine consumes already-decoded directional intents and hands out
//! read-only snapshots. Rendering, raw input and tick scheduling live with
//! the caller.

pub mod action;
pub mod config;
pub mod engine;
pub mod food;
pub mod policy;
pub mod session;
pub mod snapshot;
pub mod state;

use thiserror::Error;

// Re-export commonly used types
pub use action::Direction;
pub use config::{GameConfig, DEFAULT_HEALTH};
pub use engine::{RoundReport, TurnEngine, GAME_OVER};
pub use food::FoodPool;
pub use policy::{IntentHandle, PlayerPolicy, Policy, RandomWalker};
pub use session::GameSession;
pub use snapshot::{SnakeView, Snapshot};
pub use state::{Board, GameStatus, Position, Snake, SnakeId};

/// Errors the game core can produce.
///
/// Collisions, starvation and a saturated board are not errors; those are
/// ordinary elimination outcomes resolved by the engine.
#[derive(Debug, Error)]
pub enum GameError {
    /// Rejected session parameters, reported at engine construction
    #[error("invalid configuration: {0}")]
    Config(String),
    /// A length-1 snake body was asked to shrink. This cannot happen during
    /// correct round resolution and indicates a logic bug.
    #[error("cannot shrink a single-segment snake body")]
    EmptyBody,
}
