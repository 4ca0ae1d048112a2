//! Matcher configuration.
//!
//! Every knob of the scoring pipeline plus the term lists it consults.
//! Config file: ~/.config/qactl/config.toml or /etc/qactl/config.toml.
//! Every field has a default, so a partial file only overrides what it names.

use crate::error::{MatchError, Result};
use crate::gate::GateConfig;
use crate::greetings::GreetingLexicon;
use crate::intent::IntentLexicon;
use crate::technology::TechnologyRules;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Minimum combined score for an answer to be returned
pub const DEFAULT_THRESHOLD: f64 = 0.25;

/// Answer when nothing in the corpus is accepted
pub const DEFAULT_FALLBACK: &str = "I don't have information on that topic. \
     Please rephrase your question or contact support for more help.";

/// Env var naming an explicit config file
pub const CONFIG_ENV: &str = "QACTL_CONFIG";

/// Weights of the combined score
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Weights {
    /// Weight of question text similarity
    pub text: f64,
    /// Weight of keyword score
    pub keyword: f64,
    /// Weight of question word overlap
    pub word_overlap: f64,
    /// Added to greeting entries on greeting-looking queries
    pub greeting_boost: f64,
    /// Multiplier for weak matches
    pub weak_match_factor: f64,
    /// Both text and keyword below this makes a match weak
    pub weak_match_floor: f64,
    /// Added when query intent equals the entry question's intent
    pub intent_bonus: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            text: 0.7,
            keyword: 0.3,
            word_overlap: 0.0,
            greeting_boost: 0.3,
            weak_match_factor: 0.7,
            weak_match_floor: 0.3,
            intent_bonus: 0.0,
        }
    }
}

/// Main matcher configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MatcherConfig {
    pub threshold: f64,
    pub fallback_answer: String,
    pub weights: Weights,
    pub gate: GateConfig,
    pub greetings: GreetingLexicon,
    pub intent: IntentLexicon,
    pub technology: TechnologyRules,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            fallback_answer: DEFAULT_FALLBACK.to_string(),
            weights: Weights::default(),
            gate: GateConfig::default(),
            greetings: GreetingLexicon::default(),
            intent: IntentLexicon::default(),
            technology: TechnologyRules::default(),
        }
    }
}

fn check_non_negative(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(MatchError::InvalidConfig(format!(
            "{} must be a non-negative number, got {}",
            name, value
        )));
    }
    Ok(())
}

impl MatcherConfig {
    /// Get default user config path: ~/.config/qactl/config.toml
    pub fn user_config_path() -> Option<PathBuf> {
        if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
            return Some(Path::new(&xdg).join("qactl").join("config.toml"));
        }
        std::env::var("HOME")
            .ok()
            .map(|home| Path::new(&home).join(".config").join("qactl").join("config.toml"))
    }

    /// Get system config path: /etc/qactl/config.toml
    pub fn system_config_path() -> PathBuf {
        PathBuf::from("/etc/qactl/config.toml")
    }

    /// Parse and validate TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: MatcherConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from one file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&contents)?;
        debug!("Loaded matcher config from {}", path.display());
        Ok(config)
    }

    /// Find and load configuration
    ///
    /// Priority:
    /// 1. $QACTL_CONFIG
    /// 2. User config (~/.config/qactl/config.toml)
    /// 3. System config (/etc/qactl/config.toml)
    /// 4. Defaults
    pub fn discover() -> Result<Self> {
        if let Ok(explicit) = std::env::var(CONFIG_ENV) {
            return Self::load(Path::new(&explicit));
        }

        if let Some(user_path) = Self::user_config_path() {
            if user_path.exists() {
                return Self::load(&user_path);
            }
        }

        let system_path = Self::system_config_path();
        if system_path.exists() {
            return Self::load(&system_path);
        }

        Ok(Self::default())
    }

    /// Serialize back to TOML
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| MatchError::InvalidConfig(format!("cannot serialize config: {}", e)))
    }

    /// Reject values the pipeline cannot work with
    pub fn validate(&self) -> Result<()> {
        check_non_negative("threshold", self.threshold)?;
        check_non_negative("weights.text", self.weights.text)?;
        check_non_negative("weights.keyword", self.weights.keyword)?;
        check_non_negative("weights.word_overlap", self.weights.word_overlap)?;
        check_non_negative("weights.greeting_boost", self.weights.greeting_boost)?;
        check_non_negative("weights.weak_match_floor", self.weights.weak_match_floor)?;
        check_non_negative("weights.intent_bonus", self.weights.intent_bonus)?;
        check_non_negative("gate.high_confidence", self.gate.high_confidence)?;
        check_non_negative("gate.known_domain_floor", self.gate.known_domain_floor)?;
        check_non_negative("gate.unknown_domain_floor", self.gate.unknown_domain_floor)?;

        let factor = self.weights.weak_match_factor;
        if !(0.0..=1.0).contains(&factor) {
            return Err(MatchError::InvalidConfig(format!(
                "weights.weak_match_factor must be within [0, 1], got {}",
                factor
            )));
        }
        if self.fallback_answer.trim().is_empty() {
            return Err(MatchError::InvalidConfig(
                "fallback_answer must not be empty".to_string(),
            ));
        }
        self.technology.validate()?;

        Ok(())
    }
}
