use crate::position::{Color, Position};
use crate::rules;

/// All scores live in `[-SCORE_RANGE, SCORE_RANGE]`, from white's
/// perspective. The range endpoints themselves only appear as the
/// initialization sentinel a node's first child must improve on.
pub const SCORE_RANGE: f64 = 10.0;

/// Magnitude of a decided game's score.
pub const ABS_SCORE: f64 = 5.0;

/// Weight of the split-budget heuristic at the search horizon.
pub const SPLIT_PENALTY: f64 = 0.2;

/// Tolerance for every floating-point score and window comparison.
pub const EPSILON: f64 = 1e-6;

/// Score of a finished game.
pub fn terminal_score(winner: Color) -> f64 {
    match winner {
        Color::White => ABS_SCORE,
        Color::Black => -ABS_SCORE,
    }
}

/// Heuristic for depth-exhausted positions: a marginal preference for
/// having preserved one's own split budget.
pub fn leaf_score(position: &Position) -> f64 {
    SPLIT_PENALTY
        * (normalized_split_budget(position, Color::White)
            - normalized_split_budget(position, Color::Black))
}

fn normalized_split_budget(position: &Position, color: Color) -> f64 {
    let max = rules::split_max(color);
    if max <= 0 {
        1.0
    } else {
        f64::from(position.splits_remaining(color)) / f64::from(max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_scores_are_signed_abs_score() {
        assert_eq!(terminal_score(Color::White), ABS_SCORE);
        assert_eq!(terminal_score(Color::Black), -ABS_SCORE);
    }

    #[test]
    fn leaf_score_is_neutral_with_symmetric_budgets() {
        let position = Position::starting_position();
        assert!(leaf_score(&position).abs() < EPSILON);
    }
}
