use thiserror::Error;

use super::hand_move::Side;
use crate::position::Color;

/// Why a move cannot be applied to a position. Move generation applies
/// candidate moves speculatively and silently discards the ones that fail,
/// so these errors double as the legality filter.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum MoveError {
    #[error("the position is invalid")]
    InvalidPosition,
    #[error("the game is already over")]
    GameOver,
    #[error("cannot tap with the eliminated {side:?} hand")]
    EmptyMoverHand { side: Side },
    #[error("the opponent's {side:?} hand has already been eliminated")]
    EmptyTargetHand { side: Side },
    #[error("no split moves remaining for {color:?}")]
    NoSplitsRemaining { color: Color },
    #[error("split deltas must decrease one hand and increase the other by the same amount")]
    UnbalancedSplit,
    #[error("the decreased hand holds fewer than the split magnitude")]
    InsufficientHand,
    #[error("sacrificial splits are not allowed")]
    SacrificialSplit,
    #[error("regenerative splits are not allowed")]
    RegenerativeSplit,
    #[error("hand-alternating splits are not allowed")]
    HandAlternating,
}
