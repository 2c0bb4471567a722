//! Tick-driven simulation core for a grid snake game.
//!
//! The core never mutates a live game: every operation takes the current
//! [`GameState`] snapshot and hands back the next one. A [`Session`] owns the
//! live snapshot and serializes ticks and player commands onto it.

pub mod board;
pub mod controls;
pub mod error;
pub mod input;
pub mod session;
pub mod snake;
pub mod spawn;
pub mod state;
pub mod step;

/// Board coordinate. Signed so a head can step past the edge before the
/// wall rule resolves it.
pub type Coord = i32;

pub use board::Cell;
pub use controls::InputProfile;
pub use error::ConfigError;
pub use input::Command;
pub use session::{Event, Session};
pub use snake::{Direction, Position, Snake, Velocity};
pub use state::{GameOptions, GameState};
