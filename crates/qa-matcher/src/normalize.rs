//! Text normalization shared by every scorer.
//!
//! Lowercase, replace every run of non-word characters with one space, trim.
//! Word characters are Unicode letters, digits and underscore.

use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

static NON_WORD_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\W+").unwrap());

/// Normalize free text for matching. Total: empty in, empty out.
pub fn normalize(text: &str) -> String {
    let lower = text.to_lowercase();
    NON_WORD_RUN.replace_all(&lower, " ").trim().to_string()
}

/// Ordered word list of the normalized text
pub fn tokenize(text: &str) -> Vec<String> {
    normalize(text).split(' ').filter(|w| !w.is_empty()).map(String::from).collect()
}

/// Normalized string together with its tokens
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedText {
    pub text: String,
    /// Tokens in query order (duplicates kept)
    pub words: Vec<String>,
    /// Distinct tokens
    pub word_set: BTreeSet<String>,
}

impl NormalizedText {
    pub fn new(raw: &str) -> Self {
        let text = normalize(raw);
        let words: Vec<String> =
            text.split(' ').filter(|w| !w.is_empty()).map(String::from).collect();
        let word_set = words.iter().cloned().collect();
        Self { text, words, word_set }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn contains_word(&self, word: &str) -> bool {
        self.word_set.contains(word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_punctuation() {
        assert_eq!(normalize("Hello, World!"), "hello world");
        assert_eq!(normalize("  What's   Power-BI?? "), "what s power bi");
    }

    #[test]
    fn test_normalize_empty_and_blank() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   \t\n "), "");
        assert_eq!(normalize("?!..."), "");
    }

    #[test]
    fn test_normalize_keeps_underscore_and_digits() {
        assert_eq!(normalize("azure_databricks TLS 1.2"), "azure_databricks tls 1 2");
    }

    #[test]
    fn test_normalize_unicode_letters() {
        assert_eq!(normalize("Café Société"), "café société");
    }

    #[test]
    fn test_tokenize_order() {
        assert_eq!(tokenize("How can I connect?"), vec!["how", "can", "i", "connect"]);
        assert!(tokenize("   ").is_empty());
    }

    #[test]
    fn test_normalized_text_word_set() {
        let n = NormalizedText::new("hi hi there");
        assert_eq!(n.words.len(), 3);
        assert_eq!(n.word_set.len(), 2);
        assert!(n.contains_word("there"));
        assert!(!n.is_empty());
        assert!(NormalizedText::new("!!").is_empty());
    }
}
