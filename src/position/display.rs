use std::fmt;

use super::color::Color;
use super::position::Position;

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let over = self.is_over();
        let marker = |color: Color| {
            if !over && self.turn() == color {
                ">>"
            } else {
                "  "
            }
        };

        let (white_left, white_right) = self.hands(Color::White);
        let (black_left, black_right) = self.hands(Color::Black);

        writeln!(
            f,
            "{} White | {} | {} |  splits: {}",
            marker(Color::White),
            white_left,
            white_right,
            budget(self.splits_remaining(Color::White)),
        )?;
        write!(
            f,
            "{} Black | {} | {} |  splits: {}",
            marker(Color::Black),
            black_left,
            black_right,
            budget(self.splits_remaining(Color::Black)),
        )?;

        match self.winner() {
            Some(Color::White) => write!(f, "\n   White wins"),
            Some(Color::Black) => write!(f, "\n   Black wins"),
            None => Ok(()),
        }
    }
}

fn budget(splits: i16) -> String {
    if splits < 0 {
        "unlimited".to_string()
    } else {
        splits.to_string()
    }
}
