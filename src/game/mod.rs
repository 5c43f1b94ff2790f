//! Driver-side game management above the search engine.

pub mod engine;

pub use engine::{Engine, EngineConfig, EngineError};
