use thiserror::Error;

use crate::hand_move::{HandMove, MoveError};
use crate::move_generator::{generate_moves, HandMoveList};
use crate::position::{Color, Position};
use crate::searcher::{NodeData, SearchError, Searcher};

/// Core engine state and configuration.
#[derive(Clone, Copy)]
pub struct EngineConfig {
    pub threads: usize,
    pub starting_position: Position,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            threads: num_cpus::get(),
            starting_position: Position::starting_position(),
        }
    }
}

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("illegal move: {error}")]
    IllegalMove { error: MoveError },
    #[error("search error: {error}")]
    SearchError { error: SearchError },
    #[error("the position has no best move")]
    NoBestMove,
}

/// The driver-side engine: owns the current position, the move history,
/// and a searcher. The external UI sits on this seam, feeding it moves and
/// asking for continuations.
pub struct Engine {
    position: Position,
    move_history: Vec<HandMove>,
    searcher: Searcher,
}

impl Engine {
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            position: config.starting_position,
            move_history: Vec::new(),
            searcher: Searcher::with_threads(config.threads),
        }
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn move_history(&self) -> &[HandMove] {
        &self.move_history
    }

    pub fn legal_moves(&self) -> HandMoveList {
        generate_moves(&self.position)
    }

    /// Applies a move to the current position.
    pub fn make_move(&mut self, hand_move: HandMove) -> Result<(), EngineError> {
        let next = hand_move
            .apply(&self.position)
            .map_err(|error| EngineError::IllegalMove { error })?;
        self.position = next;
        self.move_history.push(hand_move);
        Ok(())
    }

    /// Searches the current position and returns the best continuation
    /// together with its node data.
    pub fn best_move(&self) -> Result<(HandMove, NodeData), EngineError> {
        let data = self
            .searcher
            .evaluate_next_move(self.position)
            .map_err(|error| EngineError::SearchError { error })?;
        let best = data.best_move.ok_or(EngineError::NoBestMove)?;
        Ok((best, data))
    }

    /// Cached evaluation of an arbitrary position, if the searcher has
    /// seen it.
    pub fn query(&self, position: &Position) -> Result<NodeData, SearchError> {
        self.searcher.node_data_for(position)
    }

    /// States visited by the most recent search.
    pub fn states_visited(&self) -> usize {
        self.searcher.last_evaluated_state_count()
    }

    /// The winner, once the game is over.
    pub fn game_over(&self) -> Option<Color> {
        self.position.winner()
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}
