//! Command-line surface

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Corpus path used when neither `--corpus` nor `QACTL_CORPUS` is given
pub const DEFAULT_CORPUS: &str = "data/corpus.json";

#[derive(Parser, Debug)]
#[command(name = "qactl")]
#[command(about = "Answer questions from a fixed Q&A corpus", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Corpus JSON file
    #[arg(long, global = true, env = "QACTL_CORPUS", default_value = DEFAULT_CORPUS)]
    pub corpus: PathBuf,

    /// Matcher config file (TOML); otherwise the usual search path is used
    #[arg(long, global = true, env = "QACTL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Answer a single question
    Ask {
        /// Question text
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,

        /// Show the score breakdown of the chosen entry
        #[arg(long)]
        debug: bool,
    },

    /// Show the best-scoring entries and their component scores
    Diagnose {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,

        /// Number of candidates to list
        #[arg(long, default_value_t = 5)]
        top: usize,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Interactive question loop
    Chat {
        /// Show the score breakdown after every answer
        #[arg(long)]
        debug: bool,

        /// Print session statistics on exit
        #[arg(long)]
        stats: bool,
    },

    /// Load corpus and config and report what was found
    Check,
}

/// Join positional words back into one query
pub fn join_text(words: &[String]) -> String {
    words.join(" ")
}
