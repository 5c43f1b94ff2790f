//! Count-states command - measure the reachable state graph.

use std::time::Instant;

use chopsticks::move_generator::reachable_states;
use chopsticks::position::Position;
use structopt::StructOpt;

use super::Command;

#[derive(StructOpt)]
pub struct CountStatesArgs {
    /// Position notation, e.g. "1,1/1,1 w".
    #[structopt(long = "position", default_value = "1,1/1,1 w")]
    pub position: Position,
}

impl Command for CountStatesArgs {
    fn execute(self) {
        let start = Instant::now();
        let summary = reachable_states(&self.position);
        let duration = start.elapsed();

        println!(
            "{} reachable states, {} of them terminal",
            summary.total, summary.terminal
        );
        println!("Done in {:.2?}", duration);
    }
}
