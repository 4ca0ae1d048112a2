//! Corpus entries and the JSON corpus loader.
//!
//! Format: a JSON array of `{"question": .., "answer": .., "keywords": [..]}`.
//! `keywords` may be omitted. Entries with a blank question or answer are
//! skipped with a warning rather than failing the whole load.

use crate::error::{MatchError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// One question/answer pair with its keyword list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusEntry {
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl CorpusEntry {
    pub fn new(question: impl Into<String>, answer: impl Into<String>, keywords: &[&str]) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }

    fn is_usable(&self) -> bool {
        !self.question.trim().is_empty() && !self.answer.trim().is_empty()
    }
}

/// Loaded entries plus what was dropped
#[derive(Debug, Clone, Default)]
pub struct LoadedCorpus {
    pub entries: Vec<CorpusEntry>,
    /// Zero-based positions of skipped entries in the source array
    pub skipped: Vec<usize>,
}

/// Parse corpus JSON text
pub fn parse_corpus(json: &str) -> Result<LoadedCorpus> {
    let raw: Vec<CorpusEntry> = serde_json::from_str(json)?;
    let mut loaded = LoadedCorpus::default();

    for (idx, entry) in raw.into_iter().enumerate() {
        if entry.is_usable() {
            loaded.entries.push(entry);
        } else {
            warn!("Skipping corpus entry {}: blank question or answer", idx);
            loaded.skipped.push(idx);
        }
    }

    Ok(loaded)
}

/// Load a corpus file
pub fn load_corpus(path: &Path) -> Result<LoadedCorpus> {
    if !path.exists() {
        return Err(MatchError::CorpusNotFound(path.to_path_buf()));
    }
    let json = fs::read_to_string(path)?;
    let loaded = parse_corpus(&json)?;
    info!(
        "Loaded {} corpus entries from {} ({} skipped)",
        loaded.entries.len(),
        path.display(),
        loaded.skipped.len()
    );
    Ok(loaded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_with_missing_keywords() {
        let loaded = parse_corpus(r#"[{"question": "hello", "answer": "Hi!"}]"#).unwrap();
        assert_eq!(loaded.entries.len(), 1);
        assert!(loaded.entries[0].keywords.is_empty());
    }

    #[test]
    fn test_blank_entries_skipped() {
        let loaded = parse_corpus(
            r#"[
                {"question": "  ", "answer": "x"},
                {"question": "what is python", "answer": "A language.", "keywords": ["python"]},
                {"question": "q", "answer": ""}
            ]"#,
        )
        .unwrap();
        assert_eq!(loaded.entries.len(), 1);
        assert_eq!(loaded.skipped, vec![0, 2]);
    }

    #[test]
    fn test_empty_corpus_is_fine() {
        assert!(parse_corpus("[]").unwrap().entries.is_empty());
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(parse_corpus("{not json"), Err(MatchError::Json(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_corpus(Path::new("/nonexistent/corpus.json")).unwrap_err();
        assert!(matches!(err, MatchError::CorpusNotFound(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"question": "bye", "answer": "Goodbye!", "keywords": ["bye"]}}]"#
        )
        .unwrap();
        let loaded = load_corpus(file.path()).unwrap();
        assert_eq!(loaded.entries[0].answer, "Goodbye!");
    }
}
