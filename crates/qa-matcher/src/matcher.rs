//! Matcher orchestrator.
//!
//! Owns an immutable corpus snapshot, preprocessed once at construction.
//! Per query: normalize once, score every entry, keep the maximum (ties keep
//! the first seen), then accept it only if it clears the threshold AND the
//! relevance gate. Scoring is a pure function of corpus + query.

use crate::config::MatcherConfig;
use crate::corpus::CorpusEntry;
use crate::gate::GateDecision;
use crate::intent::{Entities, Intent};
use crate::keywords::KeywordSet;
use crate::normalize::{tokenize, NormalizedText};
use crate::similarity::{text_similarity, word_overlap};
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::{debug, trace};

/// Answer handed back to a front end
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Answer {
    pub answer: String,
    /// False when the fallback answer was used
    pub matched_from_corpus: bool,
}

/// Breakdown of one entry's combined score
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentScores {
    pub text_similarity: f64,
    pub keyword_score: f64,
    pub word_overlap: f64,
    pub entry_intent: Intent,
    pub intent_bonus: f64,
    pub greeting_boost: f64,
    pub weak_match_penalized: bool,
    pub technology_penalty: f64,
}

/// One scored entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchCandidate<'a> {
    /// Position in the corpus
    pub index: usize,
    pub entry: &'a CorpusEntry,
    pub combined_score: f64,
    pub components: ComponentScores,
}

/// Full account of a match decision for debugging surfaces
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostics {
    pub query: String,
    pub normalized_query: String,
    pub query_intent: Intent,
    pub entities: Entities,
    pub technologies: Vec<String>,
    pub entry_index: usize,
    pub winning_question: String,
    pub score: f64,
    pub components: ComponentScores,
    /// Keywords of the winning entry present in the query
    pub matched_keywords: Vec<String>,
    /// Gate domain tags the query words fall in
    pub query_domains: Vec<String>,
    pub threshold: f64,
    pub gate: GateDecision,
    /// Score cleared the threshold and the gate allowed it
    pub accepted: bool,
}

/// Entry with everything query-independent computed up front
#[derive(Debug, Clone)]
struct PreparedEntry {
    entry: CorpusEntry,
    question: NormalizedText,
    keywords: KeywordSet,
    /// Words of all keywords, for technology rules
    keyword_words: BTreeSet<String>,
    intent: Intent,
    is_greeting: bool,
}

/// Per-query values shared by every entry's scoring
struct QueryContext<'q> {
    raw: &'q str,
    text: NormalizedText,
    intent: Intent,
    technologies: BTreeSet<String>,
    greeting_like: bool,
}

/// Corpus matcher
#[derive(Debug, Clone)]
pub struct Matcher {
    config: MatcherConfig,
    entries: Vec<PreparedEntry>,
}

impl Matcher {
    /// Build a matcher; `config` is expected to be validated already
    pub fn new(corpus: Vec<CorpusEntry>, config: MatcherConfig) -> Self {
        let mut matcher = Self {
            config,
            entries: Vec::with_capacity(corpus.len()),
        };
        for entry in corpus {
            matcher.add_entry(entry);
        }
        matcher
    }

    /// Matcher with the default configuration
    pub fn with_defaults(corpus: Vec<CorpusEntry>) -> Self {
        Self::new(corpus, MatcherConfig::default())
    }

    /// Append one entry (preprocessed immediately)
    pub fn add_entry(&mut self, entry: CorpusEntry) {
        let question = NormalizedText::new(&entry.question);
        let intent = self.config.intent.classify(&question.words);
        let prepared = PreparedEntry {
            keywords: KeywordSet::new(&entry.keywords),
            keyword_words: entry.keywords.iter().flat_map(|k| tokenize(k)).collect(),
            is_greeting: self.config.greetings.is_greeting_entry(&entry.keywords),
            question,
            intent,
            entry,
        };
        self.entries.push(prepared);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = &CorpusEntry> {
        self.entries.iter().map(|p| &p.entry)
    }

    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    /// Minimum combined score for acceptance
    pub fn threshold(&self) -> f64 {
        self.config.threshold
    }

    pub fn fallback_answer(&self) -> &str {
        &self.config.fallback_answer
    }

    /// Best answer for the user text, or the fallback
    pub fn get_answer(&self, user_text: &str) -> Answer {
        match self.diagnostics(user_text) {
            Some(d) if d.accepted => Answer {
                answer: self.entries[d.entry_index].entry.answer.clone(),
                matched_from_corpus: true,
            },
            _ => Answer {
                answer: self.config.fallback_answer.clone(),
                matched_from_corpus: false,
            },
        }
    }

    /// Breakdown of the top candidate, accepted or not.
    /// `None` for blank input or when no entry scores above zero.
    pub fn diagnostics(&self, user_text: &str) -> Option<Diagnostics> {
        let ctx = self.query_context(user_text)?;

        let mut best: Option<MatchCandidate<'_>> = None;
        for (index, prepared) in self.entries.iter().enumerate() {
            let candidate = self.score_entry(&ctx, index, prepared);
            trace!(
                "entry {} score {:.3} (text {:.3}, keyword {:.3})",
                index,
                candidate.combined_score,
                candidate.components.text_similarity,
                candidate.components.keyword_score
            );
            let best_score = best.as_ref().map(|b| b.combined_score).unwrap_or(0.0);
            if candidate.combined_score > best_score {
                best = Some(candidate);
            }
        }

        let best = best?;
        let prepared = &self.entries[best.index];
        let gate = self.config.gate.decide(
            ctx.raw,
            &ctx.text.word_set,
            &prepared.entry.keywords,
            best.combined_score,
            &self.config.greetings,
        );
        let accepted = best.combined_score >= self.config.threshold && gate.is_relevant();

        debug!(
            "query {:?}: best entry {} score {:.3}, gate {:?}, accepted {}",
            ctx.text.text, best.index, best.combined_score, gate, accepted
        );

        let matched_keywords = prepared
            .keywords
            .matched(&ctx.text, &self.config.greetings)
            .into_iter()
            .map(str::to_string)
            .collect();
        let query_domains = self
            .config
            .gate
            .domains_of(ctx.text.words.iter().map(String::as_str))
            .into_iter()
            .map(str::to_string)
            .collect();

        Some(Diagnostics {
            query: user_text.to_string(),
            entities: self.config.intent.extract_entities(&ctx.text.words),
            normalized_query: ctx.text.text,
            query_intent: ctx.intent,
            technologies: ctx.technologies.into_iter().collect(),
            entry_index: best.index,
            winning_question: prepared.entry.question.clone(),
            score: best.combined_score,
            components: best.components,
            matched_keywords,
            query_domains,
            threshold: self.config.threshold,
            gate,
            accepted,
        })
    }

    /// The `limit` best-scoring entries, highest first (ties in corpus order)
    pub fn top_candidates(&self, user_text: &str, limit: usize) -> Vec<MatchCandidate<'_>> {
        let Some(ctx) = self.query_context(user_text) else {
            return Vec::new();
        };

        let mut candidates: Vec<MatchCandidate<'_>> = self
            .entries
            .iter()
            .enumerate()
            .map(|(index, prepared)| self.score_entry(&ctx, index, prepared))
            .collect();
        candidates.sort_by(|a, b| b.combined_score.total_cmp(&a.combined_score));
        candidates.truncate(limit);
        candidates
    }

    fn query_context<'q>(&self, raw: &'q str) -> Option<QueryContext<'q>> {
        let text = NormalizedText::new(raw);
        if text.is_empty() {
            return None;
        }
        Some(QueryContext {
            raw,
            intent: self.config.intent.classify(&text.words),
            technologies: self.config.technology.detect(&text.word_set),
            greeting_like: self.config.greetings.is_boost_query(raw),
            text,
        })
    }

    fn score_entry<'a>(
        &'a self,
        ctx: &QueryContext<'_>,
        index: usize,
        prepared: &'a PreparedEntry,
    ) -> MatchCandidate<'a> {
        let weights = &self.config.weights;

        let text_sim = text_similarity(&ctx.text.text, &prepared.question.text);
        let keyword = prepared.keywords.score(&ctx.text, &self.config.greetings);
        let overlap = word_overlap(&ctx.text.word_set, &prepared.question.word_set);

        let mut combined =
            text_sim * weights.text + keyword * weights.keyword + overlap * weights.word_overlap;

        let greeting_query = prepared.is_greeting && ctx.greeting_like;
        let greeting_boost = if greeting_query { weights.greeting_boost } else { 0.0 };
        combined += greeting_boost;

        let weak = !greeting_query
            && !prepared.is_greeting
            && keyword < weights.weak_match_floor
            && text_sim < weights.weak_match_floor;
        if weak {
            combined *= weights.weak_match_factor;
        }

        let intent_bonus = if ctx.intent == prepared.intent { weights.intent_bonus } else { 0.0 };
        combined += intent_bonus;

        let technology_penalty = self
            .config
            .technology
            .penalty(&ctx.technologies, &prepared.keyword_words);
        combined = (combined - technology_penalty).max(0.0);

        MatchCandidate {
            index,
            entry: &prepared.entry,
            combined_score: combined,
            components: ComponentScores {
                text_similarity: text_sim,
                keyword_score: keyword,
                word_overlap: overlap,
                entry_intent: prepared.intent,
                intent_bonus,
                greeting_boost,
                weak_match_penalized: weak,
                technology_penalty,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn greeting() -> CorpusEntry {
        CorpusEntry::new(
            "hello",
            "Hello! How can I help you?",
            &["hello", "hi", "hey", "greetings"],
        )
    }

    fn python() -> CorpusEntry {
        CorpusEntry::new(
            "what is python",
            "Python is a programming language.",
            &["python", "programming", "language"],
        )
    }

    #[test]
    fn test_empty_corpus_falls_back() {
        let matcher = Matcher::with_defaults(vec![]);
        let answer = matcher.get_answer("what is python");
        assert!(!answer.matched_from_corpus);
        assert_eq!(answer.answer, matcher.fallback_answer());
        assert!(matcher.diagnostics("what is python").is_none());
    }

    #[test]
    fn test_blank_input_skips_scan() {
        let matcher = Matcher::with_defaults(vec![greeting(), python()]);
        for q in ["", "   ", "?!"] {
            assert!(!matcher.get_answer(q).matched_from_corpus);
            assert!(matcher.diagnostics(q).is_none());
            assert!(matcher.top_candidates(q, 5).is_empty());
        }
    }

    #[test]
    fn test_exact_question_scores_full_text_similarity() {
        let matcher = Matcher::with_defaults(vec![greeting(), python()]);
        let d = matcher.diagnostics("What is Python?").unwrap();
        assert_eq!(d.entry_index, 1);
        assert_abs_diff_eq!(d.components.text_similarity, 1.0);
        assert_abs_diff_eq!(d.components.keyword_score, 1.0 / 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(d.score, 0.7 + 0.1, epsilon = 1e-12);
        assert_eq!(d.gate, GateDecision::HighConfidence);
        assert!(d.accepted);
    }

    #[test]
    fn test_greeting_boost_recorded() {
        let matcher = Matcher::with_defaults(vec![greeting(), python()]);
        let d = matcher.diagnostics("hii").unwrap();
        assert_eq!(d.entry_index, 0);
        assert_abs_diff_eq!(d.components.greeting_boost, 0.3);
        assert!(!d.components.weak_match_penalized);
        assert!(d.accepted);
    }

    #[test]
    fn test_weak_match_penalty_applied() {
        let matcher = Matcher::with_defaults(vec![python()]);
        let top = matcher.top_candidates("zzz qqq", 1);
        assert_eq!(top.len(), 1);
        assert!(top[0].components.weak_match_penalized);
    }

    #[test]
    fn test_ties_keep_first_entry() {
        let first = CorpusEntry::new("what is python", "First answer.", &["python", "programming"]);
        let second =
            CorpusEntry::new("what is python", "Second answer.", &["python", "programming"]);

        let forward = Matcher::with_defaults(vec![first.clone(), second.clone()]);
        assert_eq!(forward.get_answer("what is python").answer, "First answer.");

        let reversed = Matcher::with_defaults(vec![second, first]);
        assert_eq!(reversed.get_answer("what is python").answer, "Second answer.");
        assert_eq!(reversed.diagnostics("what is python").unwrap().entry_index, 0);
    }

    #[test]
    fn test_diagnostics_report_matched_keywords_and_domains() {
        let matcher = Matcher::with_defaults(vec![greeting(), python()]);
        let d = matcher.diagnostics("what is python programming").unwrap();
        assert_eq!(d.entry_index, 1);
        assert_eq!(d.matched_keywords, vec!["python", "programming"]);
        assert_eq!(d.query_domains, vec!["programming"]);
    }

    #[test]
    fn test_intent_bonus_is_configurable() {
        let mut config = MatcherConfig::default();
        config.weights.intent_bonus = 0.2;
        let plain = Matcher::with_defaults(vec![python()]);
        let bonus = Matcher::new(vec![python()], config);
        let a = plain.diagnostics("what is rust").unwrap();
        let b = bonus.diagnostics("what is rust").unwrap();
        assert_eq!(b.components.entry_intent, Intent::Information);
        assert_abs_diff_eq!(b.score - a.score, 0.2, epsilon = 1e-12);
    }

    #[test]
    fn test_top_candidates_sorted() {
        let matcher = Matcher::with_defaults(vec![greeting(), python()]);
        let top = matcher.top_candidates("what is python", 10);
        assert_eq!(top.len(), 2);
        assert!(top[0].combined_score >= top[1].combined_score);
        assert_eq!(top[0].entry.question, "what is python");
        assert_eq!(matcher.top_candidates("what is python", 1).len(), 1);
    }

    #[test]
    fn test_add_entry_extends_corpus() {
        let mut matcher = Matcher::with_defaults(vec![greeting()]);
        assert!(!matcher.get_answer("what is python").matched_from_corpus);
        matcher.add_entry(python());
        assert_eq!(matcher.len(), 2);
        assert!(matcher.get_answer("what is python").matched_from_corpus);
    }

    #[test]
    fn test_matcher_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Matcher>();
    }
}
