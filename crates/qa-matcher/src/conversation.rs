//! Flat conversation log kept by chat front ends.
//!
//! One record per turn; no dialogue state is derived from it.

use crate::matcher::Answer;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Words that end a chat session when typed alone
const EXIT_WORDS: &[&str] = &["exit", "quit", "bye", "goodbye"];

/// Whether the input is a request to end the session
pub fn is_exit_command(input: &str) -> bool {
    let lower = input.trim().to_lowercase();
    EXIT_WORDS.contains(&lower.as_str())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationRecord {
    pub user_text: String,
    pub bot_text: String,
    /// Answer came from the corpus rather than the fallback
    pub matched: bool,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConversationStats {
    pub total: usize,
    pub matched: usize,
    pub fallback: usize,
}

impl ConversationStats {
    /// Share of corpus answers, 0-100
    pub fn matched_percent(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.matched as f64 * 100.0 / self.total as f64
    }

    pub fn fallback_percent(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.fallback as f64 * 100.0 / self.total as f64
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversationLog {
    records: Vec<ConversationRecord>,
}

impl ConversationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, user_text: &str, answer: &Answer) {
        self.records.push(ConversationRecord {
            user_text: user_text.to_string(),
            bot_text: answer.answer.clone(),
            matched: answer.matched_from_corpus,
            timestamp: Utc::now(),
        });
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn stats(&self) -> ConversationStats {
        let matched = self.records.iter().filter(|r| r.matched).count();
        ConversationStats {
            total: self.records.len(),
            matched,
            fallback: self.records.len() - matched,
        }
    }
}
