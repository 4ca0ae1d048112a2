//! Intent classification from leading words and entity cues.
//!
//! Cheap and deterministic: no model, first matching rule wins.
//! Rule order: greeting, troubleshooting, how-to, information, setup, access.

use crate::greetings::strings;
use crate::normalize::tokenize;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How many leading words the positional rules look at
const LEADING_WINDOW: usize = 3;

/// Coarse query intent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Greeting,
    Troubleshooting,
    HowTo,
    Information,
    Setup,
    Access,
    General,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Greeting => "greeting",
            Intent::Troubleshooting => "troubleshooting",
            Intent::HowTo => "how_to",
            Intent::Information => "information",
            Intent::Setup => "setup",
            Intent::Access => "access",
            Intent::General => "general",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Term lists behind every rule, all lowercase. A term that normalizes to
/// several words (such as "can't") matches as a consecutive run of words.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct IntentLexicon {
    pub greeting_leads: Vec<String>,
    pub problem_terms: Vec<String>,
    pub fix_verbs: Vec<String>,
    /// Must lead the query for a how-to
    pub how_lead: String,
    pub action_verbs: Vec<String>,
    pub information_leads: Vec<String>,
    pub setup_terms: Vec<String>,
    pub access_terms: Vec<String>,
    /// Entity cues reported in diagnostics
    pub technology_terms: Vec<String>,
    pub object_terms: Vec<String>,
}

impl Default for IntentLexicon {
    fn default() -> Self {
        Self {
            greeting_leads: strings(&["hi", "hello", "hey", "good", "morning"]),
            problem_terms: strings(&[
                "error", "issue", "problem", "fail", "not", "can't", "unable", "trouble",
            ]),
            fix_verbs: strings(&["fix", "solve", "resolve"]),
            how_lead: "how".to_string(),
            action_verbs: strings(&[
                "connect", "export", "refresh", "create", "build", "share", "view", "access",
            ]),
            information_leads: strings(&["what", "which", "explain"]),
            setup_terms: strings(&["connect", "setup", "configure"]),
            access_terms: strings(&["access", "permission", "share", "view"]),
            technology_terms: strings(&[
                "power", "bi", "powerbi", "sql", "databricks", "hive", "azure", "python",
            ]),
            object_terms: strings(&[
                "dashboard", "report", "chart", "data", "model", "workspace", "server",
            ]),
        }
    }
}

/// Entity cues found in a query
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entities {
    pub technologies: Vec<String>,
    pub actions: Vec<String>,
    pub problems: Vec<String>,
    pub objects: Vec<String>,
}

impl Entities {
    pub fn is_empty(&self) -> bool {
        self.technologies.is_empty()
            && self.actions.is_empty()
            && self.problems.is_empty()
            && self.objects.is_empty()
    }
}

fn has_term(words: &[String], term: &str) -> bool {
    let parts = tokenize(term);
    match parts.len() {
        0 => false,
        1 => words.contains(&parts[0]),
        n => words.windows(n).any(|run| run == parts.as_slice()),
    }
}

fn any_in(words: &[String], terms: &[String]) -> bool {
    terms.iter().any(|t| has_term(words, t))
}

fn picked(words: &[String], terms: &[String]) -> Vec<String> {
    terms.iter().filter(|t| has_term(words, t)).cloned().collect()
}

impl IntentLexicon {
    /// Entity cues, in lexicon order
    pub fn extract_entities(&self, words: &[String]) -> Entities {
        Entities {
            technologies: picked(words, &self.technology_terms),
            actions: picked(words, &self.action_verbs),
            problems: picked(words, &self.problem_terms),
            objects: picked(words, &self.object_terms),
        }
    }

    /// Classify normalized query words
    pub fn classify(&self, words: &[String]) -> Intent {
        let leading = &words[..words.len().min(LEADING_WINDOW)];

        if any_in(leading, &self.greeting_leads) {
            return Intent::Greeting;
        }
        if any_in(words, &self.problem_terms) || any_in(words, &self.fix_verbs) {
            return Intent::Troubleshooting;
        }
        if leading.iter().any(|w| *w == self.how_lead) && any_in(words, &self.action_verbs) {
            return Intent::HowTo;
        }
        if any_in(leading, &self.information_leads) {
            return Intent::Information;
        }
        if any_in(words, &self.setup_terms) {
            return Intent::Setup;
        }
        if any_in(words, &self.access_terms) {
            return Intent::Access;
        }
        Intent::General
    }
}

/// Classify with the default lexicon
pub fn classify_intent(words: &[String]) -> Intent {
    IntentLexicon::default().classify(words)
}
