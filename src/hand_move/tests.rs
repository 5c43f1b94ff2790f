use super::*;
use crate::position::{Color, Position};

#[test]
fn tap_adds_and_wraps_modulo_hand_max() {
    let position = Position::new(1, 0, 0, 1, Color::White).unwrap();
    let next = position.make_tap(Side::Left, Side::Right).unwrap();
    assert_eq!(next.hands(Color::Black), (0, 2));
    assert_eq!(next.hands(Color::White), (1, 0));
    assert_eq!(next.turn(), Color::Black);

    // 3 + 2 wraps to zero, eliminating the struck hand.
    let position = Position::new(2, 1, 3, 1, Color::White).unwrap();
    let next = position.make_tap(Side::Left, Side::Left).unwrap();
    assert_eq!(next.hands(Color::Black), (0, 1));
}

#[test]
fn tap_requires_nonzero_hands_on_both_ends() {
    let position = Position::new(1, 0, 0, 1, Color::White).unwrap();
    assert_eq!(
        position.make_tap(Side::Right, Side::Right).unwrap_err(),
        MoveError::EmptyMoverHand { side: Side::Right }
    );
    assert_eq!(
        position.make_tap(Side::Left, Side::Left).unwrap_err(),
        MoveError::EmptyTargetHand { side: Side::Left }
    );
}

#[test]
fn moves_are_rejected_once_the_game_is_over() {
    let finished = Position::new(1, 1, 0, 0, Color::White).unwrap();
    assert_eq!(
        finished.make_tap(Side::Left, Side::Left).unwrap_err(),
        MoveError::GameOver
    );
    assert_eq!(finished.make_split(-1, 1).unwrap_err(), MoveError::GameOver);
}

#[test]
fn split_redistributes_and_flips_the_turn() {
    let position = Position::new(2, 1, 1, 1, Color::White).unwrap();
    let next = position.make_split(-1, 1).unwrap();
    assert_eq!(next.hands(Color::White), (1, 2));
    assert_eq!(next.turn(), Color::Black);
}

#[test]
fn split_rejects_unbalanced_deltas() {
    let position = Position::new(2, 1, 1, 1, Color::White).unwrap();
    assert_eq!(
        position.make_split(1, 1).unwrap_err(),
        MoveError::UnbalancedSplit
    );
    assert_eq!(
        position.make_split(0, 0).unwrap_err(),
        MoveError::UnbalancedSplit
    );
}

#[test]
fn split_rejects_hand_alternation() {
    let position = Position::new(2, 3, 1, 1, Color::White).unwrap();
    assert_eq!(
        position.make_split(1, -1).unwrap_err(),
        MoveError::HandAlternating
    );
}

#[test]
fn black_splits_apply_to_black_hands() {
    let position = Position::new(1, 1, 3, 1, Color::Black).unwrap();
    let next = position.make_split(-1, 1).unwrap();
    assert_eq!(next.hands(Color::Black), (2, 2));
    assert_eq!(next.hands(Color::White), (1, 1));
    assert_eq!(next.turn(), Color::White);
}

#[test]
fn unlimited_budgets_keep_their_sentinel_across_splits() {
    // The sentinel never decrements, so positions reached by different
    // numbers of splits still hash identically.
    let position = Position::new(3, 1, 1, 1, Color::White).unwrap();
    let next = position.make_split(-1, 1).unwrap();
    assert_eq!(next.splits_remaining(Color::White), -1);
    assert_eq!(next.hash(), Position::from_hash(next.hash()).unwrap().hash());
}

#[test]
fn apply_dispatches_taps_and_splits() {
    let position = Position::new(2, 1, 1, 1, Color::White).unwrap();

    let tapped = HandMove::tap(Side::Left, Side::Right).apply(&position).unwrap();
    assert_eq!(tapped.hands(Color::Black), (1, 3));

    let split = HandMove::split(-1).apply(&position).unwrap();
    assert_eq!(split.hands(Color::White), (1, 2));
}

#[test]
fn move_display_forms() {
    assert_eq!(HandMove::tap(Side::Right, Side::Left).to_string(), "RL");
    assert_eq!(HandMove::split(-2).to_string(), "SR2");
    assert_eq!(HandMove::split(3).to_string(), "SL3");
}
