//! Error types for the matcher.
//!
//! Matching itself never fails; these cover loading a corpus or a
//! configuration file and validating what was loaded.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MatchError {
    #[error("Corpus file not found: {}", .0.display())]
    CorpusNotFound(PathBuf),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl MatchError {
    /// Stable numeric code, useful for front ends that map errors to exit codes
    pub fn code(&self) -> i32 {
        match self {
            MatchError::CorpusNotFound(_) => 2,
            MatchError::InvalidConfig(_) => 3,
            MatchError::Io(_) => 4,
            MatchError::Json(_) => 5,
            MatchError::Toml(_) => 6,
        }
    }
}

pub type Result<T> = std::result::Result<T, MatchError>;
