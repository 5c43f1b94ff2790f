//! Compile-time game rule configuration.
//!
//! These are constants rather than runtime flags: the position hash encoding
//! and the leaf heuristic both depend on them, so changing a rule changes the
//! identity of every cached position.

use crate::position::color::Color;

/// Exclusive upper bound for every hand. Hand sums are reduced modulo this
/// value after each move, so a hand holding `HAND_MAX` never exists.
pub const HAND_MAX: u8 = 5;

/// Per-side split budgets. Negative means unlimited.
pub const WHITE_SPLIT_MAX: i16 = -1;
pub const BLACK_SPLIT_MAX: i16 = -1;

/// Does a split consume the mover's turn?
pub const SPLITS_AS_MOVES: bool = true;

/// May a split leave one of the mover's hands at zero?
pub const ALLOW_SACRIFICIAL_SPLITS: bool = true;

/// May a split revive a hand that is currently at zero?
pub const ALLOW_REGENERATIVE_SPLITS: bool = true;

pub fn split_max(color: Color) -> i16 {
    match color {
        Color::White => WHITE_SPLIT_MAX,
        Color::Black => BLACK_SPLIT_MAX,
    }
}
