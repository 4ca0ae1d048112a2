//! Greeting fuzz.
//!
//! Greetings are short and spelled loosely ("hii", "heyy"), so generic
//! similarity scores them poorly. This lexicon drives three places that
//! treat them specially: keyword matching, the orchestrator's greeting boost,
//! and the relevance gate's unconditional allow.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Greeting vocabulary, all lowercase
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GreetingLexicon {
    /// Canonical keyword stem -> substrings that count as that stem
    pub variants: BTreeMap<String, Vec<String>>,
    /// Substrings of the raw query that trigger the greeting boost
    pub boost_patterns: Vec<String>,
    /// Entry keywords that mark an entry as a greeting entry
    pub entry_markers: Vec<String>,
    /// Substrings of the raw query the relevance gate accepts as a greeting
    pub gate_tokens: Vec<String>,
}

impl Default for GreetingLexicon {
    fn default() -> Self {
        let variants = [
            ("hi", &["hi", "hii", "hiii"][..]),
            ("hello", &["hello", "helo", "hllo"][..]),
            ("hey", &["hey", "heey", "heyy"][..]),
        ]
        .into_iter()
        .map(|(stem, vs)| (stem.to_string(), strings(vs)))
        .collect();

        Self {
            variants,
            boost_patterns: strings(&[
                "hi", "hii", "hiii", "hiiii", "hello", "helo", "hllo", "hey", "heey", "heyy",
            ]),
            entry_markers: strings(&["hello", "hi", "hey", "greetings"]),
            gate_tokens: strings(&["hi", "hello", "hey", "hii", "hiii"]),
        }
    }
}

impl GreetingLexicon {
    /// Variants for a canonical stem, `None` if the keyword is not a stem
    pub fn variants_of(&self, keyword: &str) -> Option<&[String]> {
        self.variants.get(keyword).map(Vec::as_slice)
    }

    /// Whether an entry's keyword list marks it as a greeting entry.
    /// Compared as written, like the corpus author typed them.
    pub fn is_greeting_entry(&self, keywords: &[String]) -> bool {
        keywords.iter().any(|k| self.entry_markers.iter().any(|m| m == k))
    }

    /// Whether the raw query (lowercased, trimmed) equals or contains a boost pattern
    pub fn is_boost_query(&self, raw_query: &str) -> bool {
        let lower = raw_query.to_lowercase();
        let lower = lower.trim();
        self.boost_patterns.iter().any(|p| lower == p.as_str() || lower.contains(p.as_str()))
    }

    /// Whether the raw query contains a token the gate treats as a greeting
    pub fn is_gate_greeting(&self, raw_query: &str) -> bool {
        let lower = raw_query.to_lowercase();
        let lower = lower.trim();
        self.gate_tokens.iter().any(|t| lower.contains(t.as_str()))
    }
}

pub(crate) fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
