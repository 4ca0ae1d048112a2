//! qactl - answer questions from a fixed Q&A corpus

use clap::Parser;
use qa_matcher::MatchError;
use qactl::cli::Cli;
use qactl::{commands, logging};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(err) = commands::run(cli) {
        eprintln!("Error: {:#}", err);
        let code = err.downcast_ref::<MatchError>().map(MatchError::code).unwrap_or(1);
        std::process::exit(code);
    }
}
