//! End-to-end matching against the bundled sample corpus.

use approx::assert_abs_diff_eq;
use qa_matcher::{
    parse_corpus, text_similarity, CorpusEntry, GateDecision, Matcher, MatcherConfig,
};

const SAMPLE_CORPUS: &str = include_str!("../../../data/corpus.json");

fn sample_matcher() -> Matcher {
    let loaded = parse_corpus(SAMPLE_CORPUS).expect("sample corpus parses");
    assert!(loaded.skipped.is_empty());
    Matcher::with_defaults(loaded.entries)
}

fn answer_of(matcher: &Matcher, question: &str) -> String {
    matcher
        .entries()
        .find(|e| e.question == question)
        .map(|e| e.answer.clone())
        .expect("question present in corpus")
}

#[test]
fn test_greeting_variants_answer_from_corpus() {
    let greeting = CorpusEntry::new(
        "hello",
        "Hello! How can I help you?",
        &["hi", "hello", "hey", "greetings"],
    );
    let matcher = Matcher::with_defaults(vec![
        CorpusEntry::new("what is python", "A language.", &["python", "programming"]),
        greeting.clone(),
        CorpusEntry::new("tell me a joke", "Atoms make up everything.", &["joke", "funny"]),
    ]);

    for query in ["hi", "hii", "hey", "hello", "HELLO"] {
        let answer = matcher.get_answer(query);
        assert!(answer.matched_from_corpus, "{query}");
        assert_eq!(answer.answer, greeting.answer, "{query}");
    }
}

#[test]
fn test_greetings_on_sample_corpus() {
    let matcher = sample_matcher();
    let hello = answer_of(&matcher, "hello");
    for query in ["hi", "hii", "hiii", "hey", "heyy", "hello", "HELLO", "Hi there!"] {
        let answer = matcher.get_answer(query);
        assert!(answer.matched_from_corpus, "{query}");
        assert_eq!(answer.answer, hello, "{query}");
    }
}

#[test]
fn test_ai_and_power_bi_do_not_bleed() {
    let matcher = sample_matcher();

    let ai = matcher.diagnostics("what is ai").unwrap();
    assert_eq!(ai.winning_question, "what is AI");
    assert!(ai.accepted);

    let pbi = matcher.diagnostics("what is power bi").unwrap();
    assert_eq!(pbi.winning_question, "What is Power BI?");
    assert!(pbi.accepted);

    // "ai" keyword of the AI entry must not fire on "power bi"
    let ai_entry = matcher.entries().find(|e| e.question == "what is AI").unwrap();
    let score = qa_matcher::keyword_score(
        "what is power bi",
        &ai_entry.keywords,
        &qa_matcher::GreetingLexicon::default(),
    );
    assert_abs_diff_eq!(score, 0.0);
}

#[test]
fn test_blank_input_returns_fallback() {
    let matcher = sample_matcher();
    for query in ["", "   ", "\t\n"] {
        let answer = matcher.get_answer(query);
        assert!(!answer.matched_from_corpus);
        assert_eq!(answer.answer, matcher.fallback_answer());
        assert!(matcher.diagnostics(query).is_none());
    }
}

#[test]
fn test_off_topic_queries_fall_back() {
    let matcher = sample_matcher();
    for query in ["what's the weather like", "random text", "123456", "food"] {
        let d = matcher.diagnostics(query).unwrap();
        assert!(!d.accepted, "{query}");
        assert_eq!(d.gate, GateDecision::OffTopic, "{query}");
        assert!(!matcher.get_answer(query).matched_from_corpus, "{query}");
    }
}

#[test]
fn test_technology_queries_resolve_to_their_entry() {
    let matcher = sample_matcher();
    let hive = answer_of(&matcher, "How can I connect Hive server to Power BI?");
    let databricks = answer_of(&matcher, "How can I connect Power BI Server to Azure Databricks?");

    let answer = matcher.get_answer("How can I connect Hive server to Power BI?");
    assert_eq!(answer.answer, hive);
    let answer = matcher.get_answer("How do I connect Power BI Server to Azure Databricks?");
    assert_eq!(answer.answer, databricks);
}

#[test]
fn test_technology_penalty_stops_cross_bleed() {
    let hive = CorpusEntry::new(
        "How can I connect Hive server to Power BI?",
        "Use Cloudera drivers.",
        &[
            "hive",
            "server",
            "power",
            "bi",
            "cloudera",
            "drivers",
            "tls",
            "dsn",
            "system",
            "connection",
            "connect",
        ],
    );
    let databricks = CorpusEntry::new(
        "How can I connect Power BI Server to Azure Databricks?",
        "Use the Azure Databricks connector via the gateway.",
        &["power", "bi", "server", "azure", "databricks", "connector", "gateway", "connection"],
    );

    for corpus in [vec![hive.clone(), databricks.clone()], vec![databricks.clone(), hive.clone()]] {
        let matcher = Matcher::with_defaults(corpus);

        let d = matcher.diagnostics("connect power bi to hive").unwrap();
        assert_eq!(d.winning_question, hive.question);
        assert_eq!(d.technologies, vec!["hive".to_string()]);

        let top = matcher.top_candidates("connect power bi to hive", 2);
        let loser = top.iter().find(|c| c.entry.question == databricks.question).unwrap();
        assert!(loser.components.keyword_score > 0.0);
        assert_abs_diff_eq!(loser.components.technology_penalty, 0.5);

        let answer = matcher.get_answer("connect power bi to azure databricks");
        assert_eq!(answer.answer, databricks.answer);
    }
}

#[test]
fn test_answers_are_idempotent() {
    let matcher = sample_matcher();
    for query in [
        "hi",
        "what is python",
        "Why did my Sales Cockpit report fail to refresh?",
        "weather",
    ] {
        assert_eq!(matcher.get_answer(query), matcher.get_answer(query));
        assert_eq!(matcher.diagnostics(query), matcher.diagnostics(query));
    }
}

#[test]
fn test_adding_exact_question_wins() {
    let mut matcher = sample_matcher();
    let query = "Where are the sales cockpit exports stored?";

    let before = matcher.diagnostics(query).unwrap();
    assert_ne!(before.winning_question, query);

    matcher.add_entry(CorpusEntry::new(
        query,
        "In the SharePoint archive.",
        &["sales", "cockpit", "exports"],
    ));
    let after = matcher.diagnostics(query).unwrap();
    assert_eq!(after.winning_question, query);
    assert_abs_diff_eq!(after.components.text_similarity, 1.0);
    assert_eq!(matcher.get_answer(query).answer, "In the SharePoint archive.");
}

#[test]
fn test_exact_questions_select_themselves() {
    let matcher = sample_matcher();
    for question in [
        "how to learn programming",
        "Why is my Power BI dashboard failing to refresh from Jira?",
        "tell me a joke",
        "thank you",
    ] {
        let d = matcher.diagnostics(question).unwrap();
        assert_eq!(d.winning_question, question);
        assert_abs_diff_eq!(d.components.text_similarity, 1.0);
        assert!(d.accepted);
    }
}

#[test]
fn test_order_sensitive_similarity_keeps_python_entry() {
    let matcher = sample_matcher();
    let d = matcher.diagnostics("tell me about python").unwrap();
    assert_eq!(d.winning_question, "what is python");
    assert!(d.accepted);

    let joke = matcher
        .top_candidates("tell me about python", 50)
        .into_iter()
        .find(|c| c.entry.question == "tell me a joke")
        .unwrap();
    assert_abs_diff_eq!(joke.components.text_similarity, 20.0 / 34.0, epsilon = 1e-12);
}

#[test]
fn test_threshold_is_configurable() {
    let loaded = parse_corpus(SAMPLE_CORPUS).unwrap();
    let mut config = MatcherConfig::default();
    config.threshold = 0.95;
    let matcher = Matcher::new(loaded.entries, config);

    assert_eq!(matcher.threshold(), 0.95);
    // "tell me a joke" scores 0.775 exact-match, below the raised bar
    assert!(!matcher.get_answer("tell me a joke").matched_from_corpus);
    assert!(matcher.get_answer("hello").matched_from_corpus);
}

#[test]
fn test_similarity_properties_on_corpus_questions() {
    let matcher = sample_matcher();
    let questions: Vec<String> = matcher
        .entries()
        .map(|e| qa_matcher::normalize(&e.question))
        .collect();
    for a in &questions {
        assert_abs_diff_eq!(text_similarity(a, a), 1.0);
        for b in &questions {
            assert_eq!(text_similarity(a, b), text_similarity(b, a));
            let s = text_similarity(a, b);
            assert!((0.0..=1.0).contains(&s));
        }
    }
}

#[test]
fn test_scores_stay_bounded() {
    let matcher = sample_matcher();
    for query in ["hello hello hey hi", "power bi power bi", "hiii heyy helo"] {
        for c in matcher.top_candidates(query, 50) {
            assert!(c.combined_score >= 0.0 && c.combined_score <= 1.3 + 1e-9, "{query}");
        }
    }
}
