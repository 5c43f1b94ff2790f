//! Legal move enumeration and reachable-state walks.

pub mod generator;

pub use generator::{generate_moves, reachable_states, HandMoveList, StateGraphSummary};
