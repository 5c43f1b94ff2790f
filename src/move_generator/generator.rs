use std::collections::VecDeque;

use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use crate::hand_move::{HandMove, Side};
use crate::position::Position;

/// Move lists are small (four taps plus at most `2 * (HAND_MAX - 1)`
/// splits), so they live on the stack.
pub type HandMoveList = SmallVec<[HandMove; 16]>;

const SIDES: [Side; 2] = [Side::Left, Side::Right];

/// Enumerates every legal move for the side to move. Candidate moves are
/// applied speculatively; the ones that fail the legality checks are
/// silently discarded.
pub fn generate_moves(position: &Position) -> HandMoveList {
    let mut moves = HandMoveList::new();

    for &my in &SIDES {
        for &op in &SIDES {
            if position.make_tap(my, op).is_ok() {
                moves.push(HandMove::tap(my, op));
            }
        }
    }

    let (mover_left, mover_right) = position.hands(position.turn());
    for delta in -(mover_left as i8)..=(mover_right as i8) {
        if position.make_split(delta, -delta).is_ok() {
            moves.push(HandMove::split(delta));
        }
    }

    moves
}

/// Counts produced by [`reachable_states`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StateGraphSummary {
    pub total: usize,
    pub terminal: usize,
}

/// Walks the state graph breadth-first from `start`, following every legal
/// move, and reports how many distinct valid positions and terminal
/// positions are reachable.
pub fn reachable_states(start: &Position) -> StateGraphSummary {
    let mut seen = FxHashSet::default();
    let mut queue = VecDeque::new();
    let mut summary = StateGraphSummary::default();

    seen.insert(start.hash());
    queue.push_back(*start);

    while let Some(position) = queue.pop_front() {
        summary.total += 1;
        if position.is_over() {
            summary.terminal += 1;
            continue;
        }
        for hand_move in generate_moves(&position) {
            let successor = match hand_move.apply(&position) {
                Ok(successor) => successor,
                Err(_) => continue,
            };
            if seen.insert(successor.hash()) {
                queue.push_back(successor);
            }
        }
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::Color;

    #[test]
    fn starting_position_has_taps_and_splits() {
        let moves = generate_moves(&Position::starting_position());
        let taps = moves.iter().filter(|m| !m.is_split()).count();
        let splits = moves.iter().filter(|m| m.is_split()).count();

        // All four taps are legal with every hand at one.
        assert_eq!(taps, 4);
        // From (1, 1) deltas -1 and +1 sacrifice a hand into (0, 2) / (2, 0).
        assert_eq!(splits, 2);
    }

    #[test]
    fn one_hand_each_generates_single_tap() {
        let position = Position::new(1, 0, 0, 1, Color::White).unwrap();
        let moves = generate_moves(&position);
        let taps: Vec<_> = moves.iter().filter(|m| !m.is_split()).collect();
        assert_eq!(
            taps,
            vec![&HandMove::tap(Side::Left, Side::Right)],
            "only the nonzero hands can participate"
        );
    }

    #[test]
    fn splits_redistribute_within_bounds() {
        let position = Position::new(3, 1, 1, 1, Color::White).unwrap();
        let moves = generate_moves(&position);
        let splits: Vec<_> = moves.iter().filter(|m| m.is_split()).collect();

        assert!(splits.contains(&&HandMove::split(-1)), "(3,1) -> (2,2)");
        assert!(
            !splits.contains(&&HandMove::split(-2)),
            "(3,1) -> (1,3) alternates hands"
        );
        assert!(splits.contains(&&HandMove::split(-3)), "(3,1) -> (0,4)");
        assert!(splits.contains(&&HandMove::split(1)), "(3,1) -> (4,0)");
        assert!(!splits.contains(&&HandMove::split(0)));
    }

    #[test]
    fn terminal_positions_generate_nothing() {
        let position = Position::new(1, 1, 0, 0, Color::White).unwrap();
        assert!(generate_moves(&position).is_empty());
    }

    #[test]
    fn reachable_states_from_start_is_bounded_by_hash_space() {
        let summary = reachable_states(&Position::starting_position());
        assert!(summary.total > 100, "the walk should fan out broadly");
        // Two turn values times four hands below HAND_MAX.
        assert!(summary.total <= 2 * 5usize.pow(4));
        assert!(summary.terminal > 0);
    }
}
