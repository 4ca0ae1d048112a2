//! Relevance gate for the top-scoring candidate.
//!
//! A single threshold cannot accept short greetings, accept confident domain
//! matches at a modest score, and reject coincidental overlaps on off-topic
//! input all at once. The gate layers those policies:
//!
//! 1. score above `high_confidence` -> relevant
//! 2. greeting entry + greeting-looking query -> relevant
//! 3. query and entry both in a known domain, score above `known_domain_floor` -> relevant
//! 4. query in no known domain, score below `unknown_domain_floor` -> rejected
//! 5. otherwise relevant

use crate::greetings::{strings, GreetingLexicon};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Which gate rule decided
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateDecision {
    HighConfidence,
    Greeting,
    KnownDomain,
    OffTopic,
    DefaultAllow,
}

impl GateDecision {
    pub fn is_relevant(&self) -> bool {
        !matches!(self, GateDecision::OffTopic)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GateDecision::HighConfidence => "high_confidence",
            GateDecision::Greeting => "greeting",
            GateDecision::KnownDomain => "known_domain",
            GateDecision::OffTopic => "off_topic",
            GateDecision::DefaultAllow => "default_allow",
        }
    }
}

/// Gate floors and the domain vocabulary
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GateConfig {
    pub high_confidence: f64,
    pub known_domain_floor: f64,
    pub unknown_domain_floor: f64,
    /// Domain tag -> member terms (lowercase)
    pub domains: BTreeMap<String, Vec<String>>,
}

impl Default for GateConfig {
    fn default() -> Self {
        let mut domains = BTreeMap::new();
        domains.insert(
            "power_bi".to_string(),
            strings(&[
                "power", "bi", "powerbi", "dashboard", "report", "refresh", "dataflow", "gateway",
                "databricks", "azure", "jira",
            ]),
        );
        domains.insert(
            "programming".to_string(),
            strings(&[
                "python",
                "programming",
                "code",
                "language",
                "ai",
                "artificial",
                "intelligence",
            ]),
        );
        domains.insert(
            "general".to_string(),
            strings(&[
                "hello", "hi", "hey", "greetings", "thank", "thanks", "goodbye", "bye", "morning",
            ]),
        );

        Self {
            high_confidence: 0.6,
            known_domain_floor: 0.28,
            unknown_domain_floor: 0.5,
            domains,
        }
    }
}

impl GateConfig {
    /// Domain tags whose terms intersect `words`
    pub fn domains_of<'a, I>(&self, words: I) -> BTreeSet<&str>
    where
        I: IntoIterator<Item = &'a str> + Clone,
    {
        self.domains
            .iter()
            .filter(|(_, terms)| words.clone().into_iter().any(|w| terms.iter().any(|t| t == w)))
            .map(|(tag, _)| tag.as_str())
            .collect()
    }

    fn in_known_domain<'a, I>(&self, words: I) -> bool
    where
        I: IntoIterator<Item = &'a str> + Clone,
    {
        !self.domains_of(words).is_empty()
    }

    /// Run the gate policy for one candidate
    pub fn decide(
        &self,
        raw_query: &str,
        query_words: &BTreeSet<String>,
        entry_keywords: &[String],
        score: f64,
        greetings: &GreetingLexicon,
    ) -> GateDecision {
        if score > self.high_confidence {
            return GateDecision::HighConfidence;
        }

        if greetings.is_greeting_entry(entry_keywords) && greetings.is_gate_greeting(raw_query) {
            return GateDecision::Greeting;
        }

        let query_known = self.in_known_domain(query_words.iter().map(String::as_str));
        let lowered: Vec<String> = entry_keywords.iter().map(|k| k.to_lowercase()).collect();
        let entry_known = self.in_known_domain(lowered.iter().map(String::as_str));

        if query_known && entry_known && score > self.known_domain_floor {
            return GateDecision::KnownDomain;
        }
        if !query_known && score < self.unknown_domain_floor {
            return GateDecision::OffTopic;
        }
        GateDecision::DefaultAllow
    }

    /// Boolean form of [`GateConfig::decide`]
    pub fn is_relevant(
        &self,
        raw_query: &str,
        query_words: &BTreeSet<String>,
        entry_keywords: &[String],
        score: f64,
        greetings: &GreetingLexicon,
    ) -> bool {
        self.decide(raw_query, query_words, entry_keywords, score, greetings)
            .is_relevant()
    }
}
