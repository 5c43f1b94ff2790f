use crate::position::{Color, Position};

use super::error::MoveError;
use super::hand_move::Side;

impl Position {
    /// Applies a tap: the mover's `my` hand strikes the opponent's `op`
    /// hand, adding its count to it (the sum wraps modulo the hand maximum).
    /// Both hands involved must be nonzero.
    pub fn make_tap(&self, my: Side, op: Side) -> Result<Position, MoveError> {
        self.check_can_move()?;

        let mover = self.turn();
        let opponent = mover.opposite();

        let strike = self.hand(mover, my);
        if strike == 0 {
            return Err(MoveError::EmptyMoverHand { side: my });
        }
        if self.hand(opponent, op) == 0 {
            return Err(MoveError::EmptyTargetHand { side: op });
        }

        let mut next = *self;
        *hand_mut(&mut next, opponent, op) += strike;
        next.after_move(false);
        Ok(next)
    }
}

fn hand_mut(position: &mut Position, color: Color, side: Side) -> &mut u8 {
    match (color, side) {
        (Color::White, Side::Left) => &mut position.white_left,
        (Color::White, Side::Right) => &mut position.white_right,
        (Color::Black, Side::Left) => &mut position.black_left,
        (Color::Black, Side::Right) => &mut position.black_right,
    }
}
