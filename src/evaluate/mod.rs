//! Scoring constants and the leaf heuristic.

pub mod scoring;

pub use scoring::{
    leaf_score, terminal_score, ABS_SCORE, EPSILON, SCORE_RANGE, SPLIT_PENALTY,
};
