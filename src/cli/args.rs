//! CLI argument parsing using StructOpt.

use structopt::StructOpt;

use crate::cli::commands::{best_move::BestMoveArgs, count_states::CountStatesArgs};

#[derive(StructOpt)]
#[structopt(
    name = "chopsticks",
    about = "A parallel engine for the chopsticks hand-counting game"
)]
pub enum Chopsticks {
    #[structopt(
        name = "best-move",
        about = "Search the given `--position` (default: the starting position) with the fixed-depth parallel alpha-beta search and print the best move, its score, and search statistics. The number of worker threads can be set with `--threads` (default: hardware parallelism)."
    )]
    BestMove(BestMoveArgs),
    #[structopt(
        name = "count-states",
        about = "Walk every position reachable from the given `--position` (default: the starting position) and report how many distinct states and terminal states exist, and the time it took to do so."
    )]
    CountStates(CountStatesArgs),
}

impl crate::cli::commands::Command for Chopsticks {
    fn execute(self) {
        match self {
            Self::BestMove(cmd) => cmd.execute(),
            Self::CountStates(cmd) => cmd.execute(),
        }
    }
}
