//! End-to-end scoring of realistic conversations through the public API.

use pretty_assertions::assert_eq;
use serde_json::json;

use smart_router::{
    ContentBlock, HeuristicResult, HeuristicScorer, Message, ScoreRequest, Signal,
    ToolDeclaration, score_request,
};

fn simple_messages() -> Vec<Message> {
    vec![Message::user("Hi there, how are you today?")]
}

fn medium_messages() -> Vec<Message> {
    vec![
        Message::system("You are a helpful coding assistant."),
        Message::user(
            "Can you help me refactor this function so it handles empty input?\n\
             ```python\ndef average(xs):\n    return sum(xs) / len(xs)\n```",
        ),
    ]
}

fn complex_messages() -> Vec<Message> {
    let system = "You are a principal engineer reviewing system designs for a payments company. \
                  Always consider consistency, availability, partition tolerance, latency budgets, \
                  regulatory constraints, and operational cost. Cite concrete failure modes. "
        .repeat(4);
    vec![
        Message::system(system),
        Message::user("We process card payments through a monolith backed by a single Postgres instance."),
        Message::assistant("Understood. What are the current pain points?"),
        Message::user("Deploys are slow, and a bad migration took us down for an hour last month."),
        Message::assistant("That is a common failure mode for shared databases."),
        Message::user(
            "Design a comprehensive migration to event sourcing, compare it with a \
             strangler-fig approach, and analyze the trade-offs step by step.",
        ),
    ]
}

fn tools_fixture() -> Vec<ToolDeclaration> {
    vec![
        ToolDeclaration::function("search_docs"),
        ToolDeclaration::function("run_query"),
    ]
}

fn user(text: &str) -> Vec<Message> {
    vec![Message::user(text)]
}

fn assert_reason(result: &HeuristicResult, needle: &str) {
    assert!(
        result
            .reasons
            .iter()
            .any(|r| r.to_lowercase().contains(needle)),
        "no reason containing {needle:?} in {:?}",
        result.reasons
    );
}

#[test]
fn simple_question_scores_low() {
    let result = score_request(&simple_messages(), None);
    assert!(result.score < 0.3);
    assert!(result.confident);
}

#[test]
fn medium_request_scores_mid() {
    let result = score_request(&medium_messages(), None);
    assert!((0.15..=0.75).contains(&result.score), "got {}", result.score);
    assert_eq!(result.score, 0.35);
    assert!(!result.confident);
}

#[test]
fn complex_request_scores_high() {
    let result = score_request(&complex_messages(), None);
    assert!(result.score >= 0.5);
    assert_eq!(result.score, 0.98);
    assert_eq!(
        result.reasons,
        vec![
            "medium length (331 est. tokens)",
            "multi-turn (6 turns)",
            "complex keywords (6): Design, comprehensive, compare",
        ]
    );
    assert!(result.confident);
}

#[test]
fn tools_increase_score() {
    let tools = tools_fixture();
    let without_tools = score_request(&simple_messages(), None);
    let with_tools = score_request(&simple_messages(), Some(tools.as_slice()));
    assert!(with_tools.score > without_tools.score);
    assert_reason(&with_tools, "tool use (2 tools)");
}

#[test]
fn tools_never_decrease_score() {
    let tools = tools_fixture();
    let many: Vec<ToolDeclaration> = (0..6)
        .map(|i| ToolDeclaration::function(format!("tool_{i}")))
        .collect();
    let conversations = [
        simple_messages(),
        medium_messages(),
        complex_messages(),
        user("What is the capital of France?"),
        user("translate"),
    ];
    for messages in &conversations {
        let base = score_request(messages, None).score;
        assert!(score_request(messages, Some(&[] as &[ToolDeclaration])).score == base);
        assert!(score_request(messages, Some(tools.as_slice())).score >= base);
        assert!(score_request(messages, Some(many.as_slice())).score >= base);
    }
}

#[test]
fn code_blocks_increase_score() {
    let messages = user(
        "Fix this:\n```python\ndef foo():\n    pass\n```\n```python\ndef bar():\n    pass\n```\n```python\ndef baz():\n    pass\n```",
    );
    let result = score_request(&messages, None);
    assert_reason(&result, "code");
    assert_reason(&result, "multiple code blocks (3)");
}

#[test]
fn image_content_increases_score() {
    let messages = vec![Message::user(vec![
        ContentBlock::text("What is this?"),
        ContentBlock::image_url("data:image/png;base64,abc"),
    ])];
    let result = score_request(&messages, None);
    assert_reason(&result, "image");
}

#[test]
fn many_turns_increase_score() {
    let messages: Vec<Message> = (0..12)
        .map(|i| Message::user(format!("Message {i}")))
        .collect();
    let result = score_request(&messages, None);
    assert_reason(&result, "deep conversation");
    assert_eq!(result.score, 0.15);
}

#[test]
fn simple_keywords_reduce_score() {
    let result = score_request(&user("Translate this to German: Hello"), None);
    assert!(result.score < 0.2);
    assert_reason(&result, "simple keywords");
}

#[test]
fn factual_question_is_confidently_simple() {
    let result = score_request(&user("What is the capital of France?"), None);
    assert!(result.score < 0.2);
    assert!(result.confident);
    assert_reason(&result, "very short");
    assert_reason(&result, "simple keywords");
}

#[test]
fn complex_keywords_increase_score() {
    let result = score_request(&user("Analyse the trade-offs and explain step by step"), None);
    assert_reason(&result, "complex keywords");
    assert!(result.score >= 0.3);
}

#[test]
fn german_complex_keywords() {
    let result = score_request(
        &user("Analysiere die Vor- und Nachteile und erkläre Schritt für Schritt"),
        None,
    );
    assert_reason(&result, "keyword");
    assert!(result.score >= 0.3);
}

#[test]
fn german_simple_keywords() {
    let result = score_request(&user("Übersetze das ins Englische: Hallo"), None);
    assert!(result.score < 0.2);
}

#[test]
fn german_simple_question() {
    let result = score_request(&user("Was ist die Hauptstadt von Frankreich?"), None);
    assert!(result.score < 0.2);
}

#[test]
fn german_complex_design_task() {
    let result = score_request(
        &user("Entwirf eine umfassende und detaillierte Architektur für eine Microservices-Plattform"),
        None,
    );
    assert!(result.score >= 0.3);
}

#[test]
fn complex_keyword_suppresses_simple_penalty() {
    let scorer = HeuristicScorer::default();
    let breakdown = scorer.explain(&user("What is the best way to refactor this list handling?"), None);
    let signals: Vec<Signal> = breakdown.contributions.iter().map(|c| c.signal).collect();
    assert!(signals.contains(&Signal::ComplexKeywords));
    assert!(!signals.contains(&Signal::SimpleKeywords));
}

#[test]
fn empty_messages() {
    let result = score_request(&[], None);
    assert_eq!(result.score, 0.0);
    assert!(result.reasons.is_empty());
    assert!(result.confident);
}

#[test]
fn score_clamped_to_range() {
    let tools = tools_fixture();
    let result = score_request(&complex_messages(), Some(tools.as_slice()));
    assert!((0.0..=1.0).contains(&result.score));
    assert_eq!(result.score, 1.0);
}

#[test]
fn scores_have_at_most_three_decimals() {
    let tools = tools_fixture();
    let conversations = [
        simple_messages(),
        medium_messages(),
        complex_messages(),
        user("Refactor this:\n```a```"),
    ];
    for messages in &conversations {
        for tools in [None, Some(tools.as_slice())] {
            let score = score_request(messages, tools).score;
            assert!((0.0..=1.0).contains(&score));
            let scaled = score * 1000.0;
            assert!((scaled - scaled.round()).abs() < 1e-9, "{score} has extra decimals");
        }
    }
}

#[test]
fn confidence_matches_band() {
    let tools = tools_fixture();
    let conversations = [
        simple_messages(),
        medium_messages(),
        complex_messages(),
        user("Analyse the trade-offs and explain step by step"),
    ];
    for messages in &conversations {
        for tools in [None, Some(tools.as_slice())] {
            let result = score_request(messages, tools);
            assert_eq!(result.confident, result.score <= 0.2 || result.score >= 0.8);
        }
    }
}

#[test]
fn no_user_message_scores_without_keywords() {
    let messages = vec![
        Message::system("Always answer in French."),
        Message::assistant("Bonjour! Comment puis-je vous aider?"),
    ];
    let result = score_request(&messages, None);
    assert_eq!(result.score, 0.0);
    assert_eq!(result.reasons, vec!["very short (15 est. tokens)"]);
}

#[test]
fn scores_parsed_openai_request() {
    let body = json!({
        "model": "gpt-4o",
        "messages": [
            {"role": "system", "content": "You are terse."},
            {"role": "user", "content": [
                {"type": "text", "text": "Compare these two diagrams"},
                {"type": "image_url", "image_url": {"url": "https://example.com/a.png"}},
                {"type": "image_url", "image_url": {"url": "https://example.com/b.png"}},
                {"type": "input_audio", "input_audio": {"data": "..."}}
            ]}
        ],
        "tools": [
            {"type": "function", "function": {"name": "zoom"}}
        ]
    });
    let request = ScoreRequest::from_value(body).unwrap();
    let result = score_request(&request.messages, request.tools());
    assert_eq!(
        result.reasons,
        vec![
            "very short (14 est. tokens)",
            "tool use (1 tools)",
            "contains images",
            "complex keywords (1): Compare",
        ]
    );
    assert_eq!(result.score, 0.5);
    assert!(!result.confident);
}

#[test]
fn malformed_content_contributes_nothing() {
    let request = ScoreRequest::from_json(
        r#"{"messages": [
            {"role": "user", "content": null},
            {"role": "user", "content": {"unexpected": true}},
            {"role": "user", "content": ["just a string", 7, {"type": "text", "text": "hello"}]}
        ]}"#,
    )
    .unwrap();
    let result = score_request(&request.messages, None);
    assert_eq!(result.score, 0.0);
    assert_eq!(result.reasons, vec!["very short (1 est. tokens)"]);
}

#[test]
fn unknown_roles_pass_through() {
    let request = ScoreRequest::from_json(
        r#"{"messages": [{"role": "developer", "content": "Explain in detail how TLS works"}]}"#,
    )
    .unwrap();
    let result = score_request(&request.messages, None);
    // Not a user message, so no keyword analysis.
    assert_eq!(result.score, 0.0);
}
