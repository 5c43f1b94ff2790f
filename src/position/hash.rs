//! Mixed-radix bijective encoding of positions.
//!
//! The encoding packs `(turn, wL, wR, bL, bR, [wS], [bS])` into a single
//! nonnegative integer, appending the split budgets only when the
//! configuration bounds them. This hash is the sole position identity used
//! across the engine, so decode must invert encode exactly: fields peel off
//! in reverse of the order they were pushed.

use crate::rules::{BLACK_SPLIT_MAX, HAND_MAX, WHITE_SPLIT_MAX};

use super::error::PositionError;
use super::position::Position;

pub type PositionHash = u32;

impl Position {
    pub fn hash(&self) -> PositionHash {
        let hand_radix = PositionHash::from(HAND_MAX);

        let mut hash = PositionHash::from(self.white_to_move);
        hash = hash * hand_radix + PositionHash::from(self.white_left);
        hash = hash * hand_radix + PositionHash::from(self.white_right);
        hash = hash * hand_radix + PositionHash::from(self.black_left);
        hash = hash * hand_radix + PositionHash::from(self.black_right);

        if WHITE_SPLIT_MAX > 0 {
            hash = hash * (WHITE_SPLIT_MAX as PositionHash + 1) + self.white_splits as PositionHash;
        }
        if BLACK_SPLIT_MAX > 0 {
            hash = hash * (BLACK_SPLIT_MAX as PositionHash + 1) + self.black_splits as PositionHash;
        }

        hash
    }

    /// Decodes a hash back into the position it encodes. Fails with
    /// [`PositionError::InvalidHash`] when the integer does not correspond
    /// to any valid position.
    pub fn from_hash(hash: PositionHash) -> Result<Self, PositionError> {
        let hand_radix = PositionHash::from(HAND_MAX);
        let mut rest = hash;

        let mut black_splits = BLACK_SPLIT_MAX;
        let mut white_splits = WHITE_SPLIT_MAX;

        if BLACK_SPLIT_MAX > 0 {
            let radix = BLACK_SPLIT_MAX as PositionHash + 1;
            black_splits = (rest % radix) as i16;
            rest /= radix;
        }
        if WHITE_SPLIT_MAX > 0 {
            let radix = WHITE_SPLIT_MAX as PositionHash + 1;
            white_splits = (rest % radix) as i16;
            rest /= radix;
        }

        let black_right = (rest % hand_radix) as u8;
        rest /= hand_radix;
        let black_left = (rest % hand_radix) as u8;
        rest /= hand_radix;
        let white_right = (rest % hand_radix) as u8;
        rest /= hand_radix;
        let white_left = (rest % hand_radix) as u8;
        rest /= hand_radix;

        if rest > 1 {
            return Err(PositionError::InvalidHash { hash });
        }

        let position = Self {
            white_left,
            white_right,
            black_left,
            black_right,
            white_splits,
            black_splits,
            white_to_move: rest == 1,
        };

        if !position.is_valid() {
            return Err(PositionError::InvalidHash { hash });
        }

        Ok(position)
    }
}
