//! Chopsticks engine binary entry point.

mod cli;

use cli::{commands::Command, Chopsticks};
use structopt::StructOpt;

fn main() {
    env_logger::init();
    Chopsticks::from_args().execute();
}
