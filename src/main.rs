#![warn(clippy::all, rust_2018_idioms)]

mod cli;

use clap::Parser as _;

fn main() {
    if let Err(e) = quickstats::logging::init() {
        eprintln!("warning: logging disabled: {e:#}");
    }

    let cli = cli::Cli::parse();
    if let Err(e) = cli::run(cli) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
