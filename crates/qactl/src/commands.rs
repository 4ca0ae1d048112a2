//! Command implementations

use crate::cli::{join_text, Cli, Commands};
use crate::output;
use crate::repl;
use anyhow::{Context, Result};
use qa_matcher::{load_corpus, Matcher, MatcherConfig};
use std::io::{self, Write};
use std::path::Path;
use tracing::debug;

/// Matcher plus what went into building it, for `check`
pub struct Loaded {
    pub matcher: Matcher,
    pub skipped: Vec<usize>,
    pub config_source: String,
}

fn load_config(path: Option<&Path>) -> Result<(MatcherConfig, String)> {
    match path {
        Some(p) => {
            let config = MatcherConfig::load(p)
                .with_context(|| format!("Failed to load config from {}", p.display()))?;
            Ok((config, p.display().to_string()))
        }
        None => {
            let config = MatcherConfig::discover().context("Failed to load matcher config")?;
            Ok((config, "search path or defaults".to_string()))
        }
    }
}

/// Load config and corpus and build the matcher
pub fn load(corpus: &Path, config: Option<&Path>) -> Result<Loaded> {
    let (config, config_source) = load_config(config)?;
    let corpus = load_corpus(corpus)
        .with_context(|| format!("Failed to load corpus from {}", corpus.display()))?;
    debug!("Building matcher over {} entries", corpus.entries.len());

    Ok(Loaded {
        matcher: Matcher::new(corpus.entries, config),
        skipped: corpus.skipped,
        config_source,
    })
}

/// Print the answer, and the breakdown with `debug`
pub fn ask(
    matcher: &Matcher,
    text: &str,
    debug: bool,
    color: bool,
    out: &mut dyn Write,
) -> Result<()> {
    let answer = matcher.get_answer(text);
    writeln!(out, "{}", answer.answer)?;

    if debug {
        writeln!(out)?;
        match matcher.diagnostics(text) {
            Some(d) => writeln!(out, "{}", output::format_diagnostics(&d, color))?,
            None => writeln!(out, "(no candidate scored above zero)")?,
        }
    }
    Ok(())
}

/// Print the top candidates, as text or JSON
pub fn diagnose(
    matcher: &Matcher,
    text: &str,
    top: usize,
    json: bool,
    color: bool,
    out: &mut dyn Write,
) -> Result<()> {
    let best = matcher.diagnostics(text);
    let candidates = matcher.top_candidates(text, top);

    if json {
        let doc = output::diagnose_json(text, best.as_ref(), &candidates);
        let rendered = serde_json::to_string_pretty(&doc).context("Failed to render diagnostics")?;
        writeln!(out, "{}", rendered)?;
        return Ok(());
    }

    match &best {
        Some(d) => writeln!(out, "{}", output::format_diagnostics(d, color))?,
        None => writeln!(out, "(no candidate scored above zero)")?,
    }
    writeln!(out)?;
    writeln!(out, "{}", output::format_candidates(&candidates, matcher.threshold(), color))?;
    Ok(())
}

/// Report what was loaded
pub fn check(loaded: &Loaded, corpus: &Path, out: &mut dyn Write) -> Result<()> {
    let config = loaded.matcher.config();
    writeln!(out, "Corpus:     {}", corpus.display())?;
    writeln!(out, "Entries:    {}", loaded.matcher.len())?;
    if loaded.skipped.is_empty() {
        writeln!(out, "Skipped:    0")?;
    } else {
        let positions: Vec<String> = loaded.skipped.iter().map(|i| i.to_string()).collect();
        writeln!(out, "Skipped:    {} (positions {})", loaded.skipped.len(), positions.join(", "))?;
    }
    writeln!(out, "Config:     {}", loaded.config_source)?;
    writeln!(out, "Threshold:  {:.2}", config.threshold)?;
    writeln!(
        out,
        "Weights:    text {:.2}, keyword {:.2}, greeting +{:.2}",
        config.weights.text, config.weights.keyword, config.weights.greeting_boost
    )?;
    Ok(())
}

/// Dispatch a parsed command line
pub fn run(cli: Cli) -> Result<()> {
    let loaded = load(&cli.corpus, cli.config.as_deref())?;
    let color = output::use_color();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Ask { text, debug } => {
            ask(&loaded.matcher, &join_text(&text), debug, color, &mut out)
        }
        Commands::Diagnose { text, top, json } => {
            diagnose(&loaded.matcher, &join_text(&text), top, json, color, &mut out)
        }
        Commands::Chat { debug, stats } => {
            let stdin = io::stdin();
            let opts = repl::ChatOptions { debug, stats, color };
            repl::run_chat(&loaded.matcher, stdin.lock(), &mut out, opts).map(|_| ())
        }
        Commands::Check => check(&loaded, &cli.corpus, &mut out),
    }
}
