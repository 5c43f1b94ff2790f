use thiserror::Error;

use super::hash::PositionHash;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PositionError {
    #[error("invalid position: {reason}")]
    InvalidPosition { reason: &'static str },
    #[error("invalid position hash: {hash}")]
    InvalidHash { hash: PositionHash },
}
