//! Position and move notation.
//!
//! Positions read as `"wL,wR/bL,bR w|b"`, optionally followed by
//! `s:<white>,<black>` split budgets where `-` means the full (or
//! unlimited) budget. Taps read as the mover's side then the opponent's
//! side (`LR`); splits read as `S`, the hand that gains, then the
//! magnitude (`SR2` moves two fingers from left to right).

use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::hand_move::{HandMove, Side};
use crate::position::{Color, Position, PositionError};
use crate::rules::{BLACK_SPLIT_MAX, WHITE_SPLIT_MAX};

static POSITION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]),([0-9])/([0-9]),([0-9])\s+([wb])(?:\s+s:([0-9]+|-),([0-9]+|-))?$")
        .expect("POSITION_RE regex should be valid")
});
static TAP_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([LRlr])([LRlr])$").expect("TAP_RE regex should be valid"));
static SPLIT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[Ss]([LRlr])([1-9][0-9]*)$").expect("SPLIT_RE regex should be valid"));

#[derive(Error, Debug)]
pub enum NotationError {
    #[error("invalid position notation: {input:?}")]
    InvalidPositionNotation { input: String },
    #[error("position {input:?} is not legal: {source}")]
    IllegalPosition {
        input: String,
        source: PositionError,
    },
    #[error("invalid move notation: {input:?}")]
    InvalidMoveNotation { input: String },
    #[error("split magnitude {magnitude:?} is out of range")]
    SplitMagnitude { magnitude: String },
}

impl FromStr for Position {
    type Err = NotationError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let caps = POSITION_RE.captures(input.trim()).ok_or_else(|| {
            NotationError::InvalidPositionNotation {
                input: input.to_string(),
            }
        })?;

        // Single-digit captures cannot fail to parse.
        let hand = |index: usize| caps[index].parse::<u8>().expect("capture is one digit");
        let turn = if &caps[5] == "w" {
            Color::White
        } else {
            Color::Black
        };

        let budget = |capture: Option<&str>, max: i16| match capture {
            None | Some("-") => max,
            Some(digits) => digits.parse::<i16>().unwrap_or(i16::MAX),
        };
        let white_splits = budget(caps.get(6).map(|m| m.as_str()), WHITE_SPLIT_MAX);
        let black_splits = budget(caps.get(7).map(|m| m.as_str()), BLACK_SPLIT_MAX);

        Position::with_split_budgets(
            hand(1),
            hand(2),
            hand(3),
            hand(4),
            white_splits,
            black_splits,
            turn,
        )
        .map_err(|source| NotationError::IllegalPosition {
            input: input.to_string(),
            source,
        })
    }
}

/// The machine-readable counterpart of `Position::from_str`. Split budgets
/// are appended only when the configuration bounds them.
pub fn position_notation(position: &Position) -> String {
    let (white_left, white_right) = position.hands(Color::White);
    let (black_left, black_right) = position.hands(Color::Black);
    let turn = match position.turn() {
        Color::White => "w",
        Color::Black => "b",
    };

    let mut notation = format!(
        "{},{}/{},{} {}",
        white_left, white_right, black_left, black_right, turn
    );

    if WHITE_SPLIT_MAX >= 0 || BLACK_SPLIT_MAX >= 0 {
        let budget = |splits: i16| {
            if splits < 0 {
                "-".to_string()
            } else {
                splits.to_string()
            }
        };
        notation.push_str(&format!(
            " s:{},{}",
            budget(position.splits_remaining(Color::White)),
            budget(position.splits_remaining(Color::Black)),
        ));
    }

    notation
}

impl FromStr for HandMove {
    type Err = NotationError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();

        if let Some(caps) = TAP_RE.captures(trimmed) {
            return Ok(HandMove::tap(side(&caps[1]), side(&caps[2])));
        }

        if let Some(caps) = SPLIT_RE.captures(trimmed) {
            let magnitude: i8 =
                caps[2]
                    .parse()
                    .map_err(|_| NotationError::SplitMagnitude {
                        magnitude: caps[2].to_string(),
                    })?;
            // The letter names the hand that gains.
            let left_delta = match side(&caps[1]) {
                Side::Left => magnitude,
                Side::Right => -magnitude,
            };
            return Ok(HandMove::split(left_delta));
        }

        Err(NotationError::InvalidMoveNotation {
            input: input.to_string(),
        })
    }
}

fn side(capture: &str) -> Side {
    match capture {
        "L" | "l" => Side::Left,
        _ => Side::Right,
    }
}
