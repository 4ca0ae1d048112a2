//! Keyword scoring: fraction of an entry's declared keywords found in the query.
//!
//! Matching is token-first. A keyword of 3+ chars may also match inside the
//! normalized query when bounded by word boundaries, which lets phrases like
//! "semantic model" hit while stopping "ai" from matching inside "bi".
//! Greeting stems use the substring fuzz from [`GreetingLexicon`].

use crate::greetings::GreetingLexicon;
use crate::normalize::NormalizedText;
use regex::Regex;
use tracing::warn;

/// Shortest keyword allowed to match via the word-boundary fallback
const MIN_BOUNDARY_LEN: usize = 3;

/// One keyword, case-folded, with its boundary pattern compiled up front
#[derive(Debug, Clone)]
pub struct CompiledKeyword {
    pub text: String,
    boundary: Option<Regex>,
}

impl CompiledKeyword {
    pub fn new(raw: &str) -> Self {
        let text = raw.trim().to_lowercase();
        let boundary = if text.chars().count() >= MIN_BOUNDARY_LEN {
            match Regex::new(&format!(r"\b{}\b", regex::escape(&text))) {
                Ok(re) => Some(re),
                Err(e) => {
                    warn!("keyword {:?} has no boundary matcher: {}", text, e);
                    None
                }
            }
        } else {
            None
        };
        Self { text, boundary }
    }

    /// Whether this keyword is present in the query
    pub fn matches(&self, query: &NormalizedText, greetings: &GreetingLexicon) -> bool {
        if let Some(variants) = greetings.variants_of(&self.text) {
            return variants.iter().any(|v| query.text.contains(v.as_str()))
                || query.contains_word(&self.text);
        }

        if query.contains_word(&self.text) {
            return true;
        }

        match &self.boundary {
            Some(re) => query.text.contains(self.text.as_str()) && re.is_match(&query.text),
            None => false,
        }
    }
}

/// An entry's keyword list, compiled once
#[derive(Debug, Clone, Default)]
pub struct KeywordSet {
    keywords: Vec<CompiledKeyword>,
}

impl KeywordSet {
    pub fn new(keywords: &[String]) -> Self {
        Self {
            keywords: keywords.iter().map(|k| CompiledKeyword::new(k)).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    /// Matched keyword count divided by keyword count; 0.0 for no keywords
    pub fn score(&self, query: &NormalizedText, greetings: &GreetingLexicon) -> f64 {
        if self.keywords.is_empty() {
            return 0.0;
        }
        let matched = self.keywords.iter().filter(|k| k.matches(query, greetings)).count();
        matched as f64 / self.keywords.len() as f64
    }

    /// Keywords present in the query, in declaration order
    pub fn matched<'a>(
        &'a self,
        query: &NormalizedText,
        greetings: &GreetingLexicon,
    ) -> Vec<&'a str> {
        self.keywords
            .iter()
            .filter(|k| k.matches(query, greetings))
            .map(|k| k.text.as_str())
            .collect()
    }
}

/// One-shot keyword score of raw user text against a keyword list
pub fn keyword_score(user_text: &str, keywords: &[String], greetings: &GreetingLexicon) -> f64 {
    KeywordSet::new(keywords).score(&NormalizedText::new(user_text), greetings)
}
