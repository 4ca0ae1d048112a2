//! Technology-mismatch penalty.
//!
//! Several corpus entries describe the same task for different backends
//! (connect Power BI to Hive vs. to Azure Databricks). They share most of
//! their keywords, so a query naming one backend can score well against the
//! other. Detection rules name the technologies a query mentions; penalty
//! rules lower the score of entries whose keywords belong to a conflicting one.

use crate::error::{MatchError, Result};
use crate::greetings::strings;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A named technology, detected when all of `all_of` and none of `none_of`
/// appear among the query words
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TechnologyRule {
    pub name: String,
    pub all_of: Vec<String>,
    #[serde(default)]
    pub none_of: Vec<String>,
}

impl TechnologyRule {
    fn new(name: &str, all_of: &[&str], none_of: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            all_of: strings(all_of),
            none_of: strings(none_of),
        }
    }

    fn holds(&self, words: &BTreeSet<String>) -> bool {
        !self.all_of.is_empty()
            && self.all_of.iter().all(|w| words.contains(w))
            && !self.none_of.iter().any(|w| words.contains(w))
    }
}

/// Penalty for an entry whose keyword words satisfy `entry_all_of` /
/// `entry_none_of` when the query names `query_technology`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PenaltyRule {
    pub query_technology: String,
    pub entry_all_of: Vec<String>,
    #[serde(default)]
    pub entry_none_of: Vec<String>,
    pub penalty: f64,
}

impl PenaltyRule {
    fn new(
        query_technology: &str,
        entry_all_of: &[&str],
        entry_none_of: &[&str],
        penalty: f64,
    ) -> Self {
        Self {
            query_technology: query_technology.to_string(),
            entry_all_of: strings(entry_all_of),
            entry_none_of: strings(entry_none_of),
            penalty,
        }
    }
}

/// Detection and penalty rules together
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TechnologyRules {
    pub detect: Vec<TechnologyRule>,
    /// Checked in order; the first applicable rule decides the penalty
    pub penalties: Vec<PenaltyRule>,
}

impl Default for TechnologyRules {
    fn default() -> Self {
        Self {
            detect: vec![
                TechnologyRule::new("hive", &["hive"], &[]),
                TechnologyRule::new("azure_databricks", &["azure", "databricks"], &[]),
                TechnologyRule::new("databricks", &["databricks"], &["azure"]),
                TechnologyRule::new("databricks_sql", &["sql", "databricks"], &[]),
            ],
            penalties: vec![
                PenaltyRule::new("hive", &["azure", "databricks"], &[], 0.5),
                PenaltyRule::new("hive", &["databricks"], &["azure"], 0.3),
                PenaltyRule::new("azure_databricks", &["hive", "cloudera"], &[], 0.5),
            ],
        }
    }
}

impl TechnologyRules {
    /// Names of technologies the query words mention
    pub fn detect(&self, query_words: &BTreeSet<String>) -> BTreeSet<String> {
        self.detect
            .iter()
            .filter(|rule| rule.holds(query_words))
            .map(|rule| rule.name.clone())
            .collect()
    }

    /// Penalty for an entry given the query's detected technologies
    pub fn penalty(
        &self,
        query_technologies: &BTreeSet<String>,
        entry_words: &BTreeSet<String>,
    ) -> f64 {
        if query_technologies.is_empty() {
            return 0.0;
        }
        self.penalties
            .iter()
            .find(|rule| {
                query_technologies.contains(&rule.query_technology)
                    && rule.entry_all_of.iter().all(|w| entry_words.contains(w))
                    && !rule.entry_none_of.iter().any(|w| entry_words.contains(w))
            })
            .map(|rule| rule.penalty)
            .unwrap_or(0.0)
    }

    /// Reject negative or non-finite penalties
    pub fn validate(&self) -> Result<()> {
        for rule in &self.penalties {
            if !rule.penalty.is_finite() || rule.penalty < 0.0 {
                return Err(MatchError::InvalidConfig(format!(
                    "technology penalty for '{}' must be a non-negative number, got {}",
                    rule.query_technology, rule.penalty
                )));
            }
        }
        Ok(())
    }
}
