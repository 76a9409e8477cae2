//! Individual scoring signals.
//!
//! Each extractor is a pure function of one measurement and returns the
//! additive contribution it makes, if any. Thresholds and weights are fixed;
//! the router's tier boundaries are tuned against them.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use super::extract::IMAGE_MARKER;
use super::keywords::KeywordMatches;

static CODE_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```[\s\S]*?```").expect("code block pattern must compile"));

/// Maximum bonus the complex-keyword signal can add.
const COMPLEX_KEYWORD_CAP: f64 = 0.6;
/// Flat penalty for simple-intent keywords.
const SIMPLE_KEYWORD_PENALTY: f64 = -0.15;
/// How many matched terms a keyword reason lists.
const REASON_SAMPLE: usize = 3;

/// One independent measurement that feeds the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Signal {
    Length,
    Depth,
    ToolUse,
    SystemPrompt,
    CodeBlocks,
    Images,
    ComplexKeywords,
    SimpleKeywords,
}

impl Signal {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Length => "length",
            Self::Depth => "depth",
            Self::ToolUse => "tool_use",
            Self::SystemPrompt => "system_prompt",
            Self::CodeBlocks => "code_blocks",
            Self::Images => "images",
            Self::ComplexKeywords => "complex_keywords",
            Self::SimpleKeywords => "simple_keywords",
        }
    }
}

impl std::fmt::Display for Signal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What a signal added to the raw score, and why.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Contribution {
    pub signal: Signal,
    pub weight: f64,
    /// Human-readable explanation; some bands add weight silently.
    pub reason: Option<String>,
}

impl Contribution {
    fn new(signal: Signal, weight: f64, reason: Option<String>) -> Self {
        Self {
            signal,
            weight,
            reason,
        }
    }
}

/// Number of fenced (```) code spans, paired leftmost-shortest.
pub fn count_code_blocks(text: &str) -> usize {
    CODE_BLOCK.find_iter(text).count()
}

/// Length band of the whole conversation. Always fires.
pub fn length(tokens: usize) -> Contribution {
    let (weight, reason) = match tokens {
        0..50 => (0.0, Some(format!("very short ({tokens} est. tokens)"))),
        50..200 => (0.1, None),
        200..800 => (0.25, Some(format!("medium length ({tokens} est. tokens)"))),
        800..2000 => (0.4, Some(format!("long ({tokens} est. tokens)"))),
        _ => (0.5, Some(format!("very long ({tokens} est. tokens)"))),
    };
    Contribution::new(Signal::Length, weight, reason)
}

/// Conversation depth by message count.
pub fn depth(turns: usize) -> Option<Contribution> {
    if turns > 10 {
        Some(Contribution::new(
            Signal::Depth,
            0.15,
            Some(format!("deep conversation ({turns} turns)")),
        ))
    } else if turns > 4 {
        Some(Contribution::new(
            Signal::Depth,
            0.08,
            Some(format!("multi-turn ({turns} turns)")),
        ))
    } else {
        None
    }
}

/// Number of declared tools.
pub fn tool_use(tool_count: usize) -> Option<Contribution> {
    match tool_count {
        0 => None,
        1..=3 => Some(Contribution::new(
            Signal::ToolUse,
            0.1,
            Some(format!("tool use ({tool_count} tools)")),
        )),
        _ => Some(Contribution::new(
            Signal::ToolUse,
            0.2,
            Some(format!("many tools ({tool_count})")),
        )),
    }
}

/// Size of the combined system prompt.
pub fn system_prompt(tokens: usize) -> Option<Contribution> {
    if tokens > 500 {
        Some(Contribution::new(
            Signal::SystemPrompt,
            0.15,
            Some(format!("complex system prompt ({tokens} est. tokens)")),
        ))
    } else if tokens > 100 {
        Some(Contribution::new(Signal::SystemPrompt, 0.05, None))
    } else {
        None
    }
}

/// Density of fenced code in the conversation.
pub fn code_blocks(count: usize) -> Option<Contribution> {
    match count {
        0 => None,
        1 | 2 => Some(Contribution::new(Signal::CodeBlocks, 0.05, None)),
        _ => Some(Contribution::new(
            Signal::CodeBlocks,
            0.15,
            Some(format!("multiple code blocks ({count})")),
        )),
    }
}

/// Fires once if any image marker is present, however many images there are.
pub fn images(text: &str) -> Option<Contribution> {
    text.contains(IMAGE_MARKER)
        .then(|| Contribution::new(Signal::Images, 0.1, Some("contains images".to_string())))
}

/// Scaled bonus for complexity keywords: 1 hit = 0.30, 2 = 0.45, 3+ = 0.60.
pub fn complex_keywords(matches: &KeywordMatches<'_>) -> Option<Contribution> {
    if matches.is_empty() {
        return None;
    }
    let count = matches.count();
    let weight = COMPLEX_KEYWORD_CAP.min(0.15 + 0.15 * count as f64);
    Some(Contribution::new(
        Signal::ComplexKeywords,
        weight,
        Some(format!(
            "complex keywords ({count}): {}",
            matches.sample(REASON_SAMPLE).join(", ")
        )),
    ))
}

/// Flat penalty for simple-intent keywords. Suppressed entirely when any
/// complex keyword matched.
pub fn simple_keywords(
    matches: &KeywordMatches<'_>,
    complex_matched: bool,
) -> Option<Contribution> {
    if matches.is_empty() || complex_matched {
        return None;
    }
    Some(Contribution::new(
        Signal::SimpleKeywords,
        SIMPLE_KEYWORD_PENALTY,
        Some(format!(
            "simple keywords: {}",
            matches.sample(REASON_SAMPLE).join(", ")
        )),
    ))
}
