use crate::position::{Color, Position};
use crate::rules::{ALLOW_REGENERATIVE_SPLITS, ALLOW_SACRIFICIAL_SPLITS, HAND_MAX};

use super::error::MoveError;

impl Position {
    /// Applies a split: `left_delta` is added to the mover's left hand and
    /// `right_delta` to the right hand. The deltas must be opposite in sign
    /// and equal in magnitude, the mover must have split budget remaining,
    /// and the result must pass the configured sacrificial / regenerative /
    /// hand-alternating gates.
    pub fn make_split(&self, left_delta: i8, right_delta: i8) -> Result<Position, MoveError> {
        self.check_can_move()?;

        let mover = self.turn();
        check_split(
            self.hands(mover),
            left_delta,
            right_delta,
            self.splits_remaining(mover),
            mover,
            ALLOW_SACRIFICIAL_SPLITS,
            ALLOW_REGENERATIVE_SPLITS,
        )?;

        let (left, right) = self.hands(mover);
        let new_left = (left as i16 + left_delta as i16) as u8;
        let new_right = (right as i16 + right_delta as i16) as u8;

        // The swap test runs on the raw sums, before the modulo wrap.
        if new_left == right && new_right == left {
            return Err(MoveError::HandAlternating);
        }

        let mut next = *self;
        match mover {
            Color::White => {
                next.white_left = new_left;
                next.white_right = new_right;
                if next.white_splits >= 0 {
                    next.white_splits -= 1;
                }
            }
            Color::Black => {
                next.black_left = new_left;
                next.black_right = new_right;
                if next.black_splits >= 0 {
                    next.black_splits -= 1;
                }
            }
        }
        next.after_move(true);
        Ok(next)
    }
}

/// Split legality, parameterized over the rule gates so each stays
/// unit-testable regardless of the build configuration.
fn check_split(
    hands: (u8, u8),
    left_delta: i8,
    right_delta: i8,
    splits_remaining: i16,
    mover: Color,
    allow_sacrificial: bool,
    allow_regenerative: bool,
) -> Result<(), MoveError> {
    // A bounded budget of zero is exhausted; unlimited budgets are negative.
    if splits_remaining == 0 {
        return Err(MoveError::NoSplitsRemaining { color: mover });
    }

    if left_delta == 0 || right_delta != -left_delta {
        return Err(MoveError::UnbalancedSplit);
    }

    let (left, right) = hands;
    if !allow_regenerative && (left == 0 || right == 0) {
        return Err(MoveError::RegenerativeSplit);
    }

    let magnitude = left_delta.unsigned_abs();
    let (decreased, increased) = if left_delta < 0 {
        (left, right)
    } else {
        (right, left)
    };

    if decreased < magnitude {
        return Err(MoveError::InsufficientHand);
    }
    if !allow_sacrificial {
        if decreased == magnitude {
            return Err(MoveError::SacrificialSplit);
        }
        if (increased + magnitude) % HAND_MAX == 0 {
            return Err(MoveError::SacrificialSplit);
        }
    }

    Ok(())
}
