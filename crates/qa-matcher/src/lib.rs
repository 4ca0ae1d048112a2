//! Retrieval-style question matcher.
//!
//! Ranks a fixed corpus of question/answer/keyword entries against free-text
//! input and returns the best answer, or a fallback when nothing is both
//! similar enough and on topic. No models, no embeddings, no I/O while
//! matching.
//!
//! Pipeline per entry: `0.7 * text_similarity + 0.3 * keyword_score`, a
//! greeting boost, a weak-match penalty, an optional intent bonus and a
//! technology-mismatch penalty. The top entry must clear the threshold and
//! the relevance gate.

pub mod config;
pub mod conversation;
pub mod corpus;
pub mod error;
pub mod gate;
pub mod greetings;
pub mod intent;
pub mod keywords;
pub mod matcher;
pub mod normalize;
pub mod shared;
pub mod similarity;
pub mod technology;

pub use config::{MatcherConfig, Weights, DEFAULT_FALLBACK, DEFAULT_THRESHOLD};
pub use conversation::{is_exit_command, ConversationLog, ConversationRecord, ConversationStats};
pub use corpus::{load_corpus, parse_corpus, CorpusEntry, LoadedCorpus};
pub use error::{MatchError, Result};
pub use gate::{GateConfig, GateDecision};
pub use greetings::GreetingLexicon;
pub use intent::{classify_intent, Entities, Intent, IntentLexicon};
pub use keywords::{keyword_score, KeywordSet};
pub use matcher::{Answer, ComponentScores, Diagnostics, MatchCandidate, Matcher};
pub use normalize::{normalize, tokenize, NormalizedText};
pub use shared::SharedMatcher;
pub use similarity::{text_similarity, word_overlap};
pub use technology::{PenaltyRule, TechnologyRule, TechnologyRules};
