//! Driver-facing parsing and formatting of positions and moves.

pub mod notation;

pub use notation::{position_notation, NotationError};
