//! Best-move command - search a position and report the continuation.

use std::time::Instant;

use chopsticks::game::engine::{Engine, EngineConfig};
use chopsticks::position::Position;
use structopt::StructOpt;

use super::Command;

#[derive(StructOpt)]
pub struct BestMoveArgs {
    /// Position notation, e.g. "1,1/1,1 w".
    #[structopt(long = "position", default_value = "1,1/1,1 w")]
    pub position: Position,
    /// Worker threads for the top-ply fan-out.
    #[structopt(short, long)]
    pub threads: Option<usize>,
}

impl Command for BestMoveArgs {
    fn execute(self) {
        let config = EngineConfig {
            threads: self.threads.unwrap_or_else(num_cpus::get),
            starting_position: self.position,
        };
        let engine = Engine::with_config(config);

        println!("{}", engine.position());

        let start = Instant::now();
        match engine.best_move() {
            Ok((best, data)) => {
                println!("best move: {}", best);
                println!("score: {:.3} at depth {}", data.score, data.depth_evaluated);
                println!(
                    "{} states visited in {:.2?}",
                    engine.states_visited(),
                    start.elapsed()
                );
            }
            Err(error) => eprintln!("Failed to calculate best move: {}", error),
        }
    }
}
