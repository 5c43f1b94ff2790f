//! Child ordering: promising moves first so alpha-beta cuts early.

use crate::hand_move::HandMove;
use crate::position::{Color, Position, PositionHash};

use super::transposition_table::MoveStatus;

/// A candidate child produced while expanding one node.
#[derive(Clone, Copy)]
pub(crate) struct ChildNode {
    pub hand_move: HandMove,
    pub position: Position,
    pub hash: PositionHash,
    pub status: MoveStatus,
}

/// Sorts children best-first for the side to move:
/// immediate wins, then non-losing moves, then moves improving the mover's
/// hand advantage, then moves another worker is already evaluating (their
/// result is likely to be reusable by the time we reach them). Later keys
/// only break ties among earlier ones.
pub(crate) fn order_moves(children: &mut [ChildNode], parent: &Position) {
    let mover = parent.turn();
    let parent_advantage = hand_advantage(parent, mover);

    children.sort_by(|a, b| {
        priority(b, mover, parent_advantage).cmp(&priority(a, mover, parent_advantage))
    });
}

fn priority(child: &ChildNode, mover: Color, parent_advantage: i16) -> (bool, bool, bool, bool) {
    let winner = child.position.winner();
    let wins = winner == Some(mover);
    let survives = winner != Some(mover.opposite());
    let improves = hand_advantage(&child.position, mover) > parent_advantage;
    let reusable_soon = child.status == MoveStatus::Evaluating;
    (wins, survives, improves, reusable_soon)
}

fn hand_advantage(position: &Position, color: Color) -> i16 {
    let (my_left, my_right) = position.hands(color);
    let (op_left, op_right) = position.hands(color.opposite());
    i16::from(my_left) + i16::from(my_right) - i16::from(op_left) - i16::from(op_right)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hand_move::Side;

    fn child(position: Position, status: MoveStatus) -> ChildNode {
        ChildNode {
            hand_move: HandMove::tap(Side::Left, Side::Left),
            position,
            hash: position.hash(),
            status,
        }
    }

    #[test]
    fn winning_children_sort_first_and_losing_last() {
        let parent = Position::new(2, 1, 3, 0, Color::White).unwrap();
        let winning = child(
            Position::new(2, 1, 0, 0, Color::Black).unwrap(),
            MoveStatus::ToBeEvaluated,
        );
        let losing = child(
            Position::new(0, 0, 3, 1, Color::Black).unwrap(),
            MoveStatus::ToBeEvaluated,
        );
        let quiet = child(
            Position::new(2, 1, 3, 1, Color::Black).unwrap(),
            MoveStatus::ToBeEvaluated,
        );

        let mut children = vec![losing, quiet, winning];
        order_moves(&mut children, &parent);

        assert!(children[0].position.winner() == Some(Color::White));
        assert!(children[2].position.winner() == Some(Color::Black));
    }

    #[test]
    fn in_flight_children_outrank_idle_ties() {
        let parent = Position::new(2, 1, 3, 1, Color::White).unwrap();
        let idle = child(
            Position::new(2, 1, 3, 1, Color::Black).unwrap(),
            MoveStatus::ToBeEvaluated,
        );
        let in_flight = child(
            Position::new(2, 1, 1, 3, Color::Black).unwrap(),
            MoveStatus::Evaluating,
        );

        let mut children = vec![idle, in_flight];
        order_moves(&mut children, &parent);

        assert_eq!(children[0].status, MoveStatus::Evaluating);
    }
}
