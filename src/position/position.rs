use crate::hand_move::Side;
use crate::rules::{BLACK_SPLIT_MAX, HAND_MAX, SPLITS_AS_MOVES, WHITE_SPLIT_MAX};

use super::color::Color;
use super::error::PositionError;

/// A game position: four hand counters, per-side split budgets, and the
/// side to move. Positions are small value types; moves produce successors
/// rather than mutating in place.
///
/// Every publicly constructible `Position` satisfies the validity
/// invariants: all hands below [`HAND_MAX`], bounded split budgets within
/// range, and at least one hand nonzero.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Position {
    pub(crate) white_left: u8,
    pub(crate) white_right: u8,
    pub(crate) black_left: u8,
    pub(crate) black_right: u8,
    pub(crate) white_splits: i16,
    pub(crate) black_splits: i16,
    pub(crate) white_to_move: bool,
}

impl Position {
    /// Both players start with one finger on each hand, full split budgets,
    /// white to move.
    pub fn starting_position() -> Self {
        Self {
            white_left: 1,
            white_right: 1,
            black_left: 1,
            black_right: 1,
            white_splits: WHITE_SPLIT_MAX,
            black_splits: BLACK_SPLIT_MAX,
            white_to_move: true,
        }
    }

    /// Builds a position with full split budgets.
    pub fn new(
        white_left: u8,
        white_right: u8,
        black_left: u8,
        black_right: u8,
        turn: Color,
    ) -> Result<Self, PositionError> {
        Self::with_split_budgets(
            white_left,
            white_right,
            black_left,
            black_right,
            WHITE_SPLIT_MAX,
            BLACK_SPLIT_MAX,
            turn,
        )
    }

    /// Builds a position with explicit split budgets. When a side's budget
    /// is unlimited by configuration, the given value is ignored and the
    /// unlimited sentinel is stored, so positions differing only in how an
    /// unlimited budget was spelled compare equal.
    pub fn with_split_budgets(
        white_left: u8,
        white_right: u8,
        black_left: u8,
        black_right: u8,
        white_splits: i16,
        black_splits: i16,
        turn: Color,
    ) -> Result<Self, PositionError> {
        let candidate = Self {
            white_left,
            white_right,
            black_left,
            black_right,
            white_splits: if WHITE_SPLIT_MAX < 0 {
                WHITE_SPLIT_MAX
            } else {
                white_splits
            },
            black_splits: if BLACK_SPLIT_MAX < 0 {
                BLACK_SPLIT_MAX
            } else {
                black_splits
            },
            white_to_move: turn == Color::White,
        };
        candidate.validate()?;
        Ok(candidate)
    }

    fn validate(&self) -> Result<(), PositionError> {
        if self.white_left >= HAND_MAX
            || self.white_right >= HAND_MAX
            || self.black_left >= HAND_MAX
            || self.black_right >= HAND_MAX
        {
            return Err(PositionError::InvalidPosition {
                reason: "a hand meets or exceeds its maximum",
            });
        }
        if (WHITE_SPLIT_MAX >= 0 && !(0..=WHITE_SPLIT_MAX).contains(&self.white_splits))
            || (BLACK_SPLIT_MAX >= 0 && !(0..=BLACK_SPLIT_MAX).contains(&self.black_splits))
        {
            return Err(PositionError::InvalidPosition {
                reason: "split budget out of range",
            });
        }
        if self.white_left == 0
            && self.white_right == 0
            && self.black_left == 0
            && self.black_right == 0
        {
            return Err(PositionError::InvalidPosition {
                reason: "all hands are eliminated",
            });
        }
        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// A game is over once exactly one side has both hands at zero.
    pub fn is_over(&self) -> bool {
        let white_out = self.white_left == 0 && self.white_right == 0;
        let black_out = self.black_left == 0 && self.black_right == 0;
        self.is_valid() && white_out != black_out
    }

    /// The winning side of a finished game, `None` while the game is going.
    pub fn winner(&self) -> Option<Color> {
        if !self.is_over() {
            return None;
        }
        if self.white_left > 0 || self.white_right > 0 {
            Some(Color::White)
        } else {
            Some(Color::Black)
        }
    }

    pub fn turn(&self) -> Color {
        if self.white_to_move {
            Color::White
        } else {
            Color::Black
        }
    }

    pub fn white_to_move(&self) -> bool {
        self.white_to_move
    }

    /// `(left, right)` hand counts for the given side.
    pub fn hands(&self, color: Color) -> (u8, u8) {
        match color {
            Color::White => (self.white_left, self.white_right),
            Color::Black => (self.black_left, self.black_right),
        }
    }

    pub fn hand(&self, color: Color, side: Side) -> u8 {
        let (left, right) = self.hands(color);
        match side {
            Side::Left => left,
            Side::Right => right,
        }
    }

    /// Remaining split budget for the given side; negative means unlimited.
    pub fn splits_remaining(&self, color: Color) -> i16 {
        match color {
            Color::White => self.white_splits,
            Color::Black => self.black_splits,
        }
    }

    /// Post-move normalization: hand sums wrap modulo [`HAND_MAX`], and the
    /// turn flips unless the move was a split and splits do not consume the
    /// turn.
    pub(crate) fn after_move(&mut self, from_split: bool) {
        self.white_left %= HAND_MAX;
        self.white_right %= HAND_MAX;
        self.black_left %= HAND_MAX;
        self.black_right %= HAND_MAX;

        if !from_split || SPLITS_AS_MOVES {
            self.white_to_move = !self.white_to_move;
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::starting_position()
    }
}
