//! REPL - interactive question loop
//!
//! Reads one question per line until EOF or an exit word. Every turn is
//! recorded in a `ConversationLog`; `--stats` prints its summary on exit.

use crate::output;
use anyhow::Result;
use qa_matcher::{is_exit_command, ConversationLog, ConversationStats, Matcher};
use std::io::{BufRead, Write};
use tracing::debug;

const PROMPT: &str = "You: ";
const FAREWELL: &str = "Goodbye!";

#[derive(Debug, Clone, Copy, Default)]
pub struct ChatOptions {
    pub debug: bool,
    pub stats: bool,
    pub color: bool,
}

/// Run the loop over any line source; returns the session stats
pub fn run_chat<R: BufRead, W: Write>(
    matcher: &Matcher,
    mut input: R,
    out: &mut W,
    opts: ChatOptions,
) -> Result<ConversationStats> {
    let mut log = ConversationLog::new();
    writeln!(out, "Ask a question, or type 'exit' to leave.")?;

    let mut line = String::new();
    loop {
        write!(out, "{}", PROMPT)?;
        out.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(out)?;
            break;
        }

        let text = line.trim();
        if text.is_empty() {
            continue;
        }
        if is_exit_command(text) {
            writeln!(out, "Bot: {}", FAREWELL)?;
            break;
        }

        let answer = matcher.get_answer(text);
        writeln!(out, "Bot: {}", answer.answer)?;
        if opts.debug {
            if let Some(d) = matcher.diagnostics(text) {
                writeln!(out, "{}", output::format_diagnostics(&d, opts.color))?;
            }
        }
        log.record(text, &answer);
    }

    let stats = log.stats();
    debug!("Chat ended after {} questions", stats.total);
    if opts.stats {
        writeln!(out, "{}", output::format_stats(&stats, opts.color))?;
    }
    Ok(stats)
}
