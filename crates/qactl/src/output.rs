//! Output formatting - plain ASCII text, colored only on a terminal
//!
//! Formatters return strings; callers decide where they go.

use owo_colors::OwoColorize;
use qa_matcher::{ConversationStats, Diagnostics, MatchCandidate};
use serde_json::{json, Value};
use std::io::IsTerminal;

/// Whether stdout should get ANSI colors
pub fn use_color() -> bool {
    std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal()
}

fn colored_score(score: f64, threshold: f64, color: bool) -> String {
    let text = format!("{:.3}", score);
    if !color {
        return text;
    }
    if score >= threshold {
        text.bright_green().to_string()
    } else {
        text.bright_red().to_string()
    }
}

fn header(title: &str, color: bool) -> String {
    let text = format!("[{}]", title);
    if color {
        text.cyan().to_string()
    } else {
        text
    }
}

fn list_or_dash(items: &[String]) -> String {
    if items.is_empty() {
        "-".to_string()
    } else {
        items.join(", ")
    }
}

/// Breakdown of the winning candidate
pub fn format_diagnostics(d: &Diagnostics, color: bool) -> String {
    let c = &d.components;
    let verdict = if d.accepted { "accepted" } else { "rejected" };
    let verdict = match (color, d.accepted) {
        (false, _) => verdict.to_string(),
        (true, true) => verdict.bright_green().to_string(),
        (true, false) => verdict.bright_red().to_string(),
    };

    let mut lines = vec![
        header("MATCH", color),
        format!("  Query:       {}", d.normalized_query),
        format!("  Intent:      {}", d.query_intent),
        format!("  Technology:  {}", list_or_dash(&d.technologies)),
        format!("  Entry:       #{} {}", d.entry_index, d.winning_question),
        format!(
            "  Score:       {} (threshold {:.2})",
            colored_score(d.score, d.threshold, color),
            d.threshold
        ),
        format!("  Gate:        {}", d.gate.as_str()),
        format!("  Result:      {}", verdict),
        header("COMPONENTS", color),
        format!("  text         {:.3}", c.text_similarity),
        format!("  keyword      {:.3}", c.keyword_score),
        format!("  overlap      {:.3}", c.word_overlap),
        format!("  greeting     +{:.2}", c.greeting_boost),
        format!("  intent       +{:.2} (entry {})", c.intent_bonus, c.entry_intent),
        format!("  technology   -{:.2}", c.technology_penalty),
        format!("  matched      {}", list_or_dash(&d.matched_keywords)),
        format!("  domains      {}", list_or_dash(&d.query_domains)),
    ];
    if c.weak_match_penalized {
        lines.push("  weak match penalty applied".to_string());
    }
    if !d.entities.is_empty() {
        lines.push(header("ENTITIES", color));
        lines.push(format!("  technologies {}", list_or_dash(&d.entities.technologies)));
        lines.push(format!("  actions      {}", list_or_dash(&d.entities.actions)));
        lines.push(format!("  problems     {}", list_or_dash(&d.entities.problems)));
        lines.push(format!("  objects      {}", list_or_dash(&d.entities.objects)));
    }
    lines.join("\n")
}

/// Ranked candidate table
pub fn format_candidates(candidates: &[MatchCandidate<'_>], threshold: f64, color: bool) -> String {
    let mut lines = vec![header("CANDIDATES", color)];
    if candidates.is_empty() {
        lines.push("  (none)".to_string());
    }
    for (rank, cand) in candidates.iter().enumerate() {
        let c = &cand.components;
        lines.push(format!(
            "  {:>2}. {} #{} {}",
            rank + 1,
            colored_score(cand.combined_score, threshold, color),
            cand.index,
            cand.entry.question
        ));
        lines.push(format!(
            "      text {:.3}  keyword {:.3}  greeting +{:.2}  technology -{:.2}{}",
            c.text_similarity,
            c.keyword_score,
            c.greeting_boost,
            c.technology_penalty,
            if c.weak_match_penalized { "  weak" } else { "" }
        ));
    }
    lines.join("\n")
}

/// JSON document for `diagnose --json`
pub fn diagnose_json(
    query: &str,
    best: Option<&Diagnostics>,
    candidates: &[MatchCandidate<'_>],
) -> Value {
    json!({
        "query": query,
        "best": best,
        "candidates": candidates,
    })
}

/// Session summary for `chat --stats`
pub fn format_stats(stats: &ConversationStats, color: bool) -> String {
    [
        header("SESSION", color),
        format!("  Questions:   {}", stats.total),
        format!("  Answered:    {} ({:.1}%)", stats.matched, stats.matched_percent()),
        format!("  Fallback:    {} ({:.1}%)", stats.fallback, stats.fallback_percent()),
    ]
    .join("\n")
}
