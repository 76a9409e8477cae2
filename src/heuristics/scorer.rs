//! Score aggregation and the confidence flag.
//!
//! Signals are evaluated in a fixed order and summed. The order only affects
//! the order of `reasons`; the numeric total is independent of it.

use serde::Serialize;

use super::extract::{estimate_tokens, extract_text, last_user_text, system_text};
use super::keywords;
use super::signals::{self, Contribution};
use crate::config::HeuristicConfig;
use crate::message::{Message, ToolDeclaration};

/// Outcome of scoring one request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeuristicResult {
    /// Complexity in `[0.0, 1.0]`, rounded to three decimals.
    pub score: f64,
    /// One entry per signal that explained itself, in evaluation order.
    pub reasons: Vec<String>,
    /// True when the score is extreme enough to route on without a
    /// secondary classifier.
    pub confident: bool,
}

/// A result together with the contributions that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    /// Sum of all contributions before clamping.
    pub raw: f64,
    /// Every signal that fired, in evaluation order.
    pub contributions: Vec<Contribution>,
    pub result: HeuristicResult,
}

/// Rule-based complexity scorer.
///
/// Stateless apart from its confidence band; share one instance freely
/// across threads.
#[derive(Debug, Clone, Default)]
pub struct HeuristicScorer {
    config: HeuristicConfig,
}

impl HeuristicScorer {
    pub fn new(config: HeuristicConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &HeuristicConfig {
        &self.config
    }

    /// Score a conversation. `tools` may be absent or empty.
    pub fn score(&self, messages: &[Message], tools: Option<&[ToolDeclaration]>) -> HeuristicResult {
        self.explain(messages, tools).result
    }

    /// Score a conversation and keep the per-signal contributions.
    pub fn explain(
        &self,
        messages: &[Message],
        tools: Option<&[ToolDeclaration]>,
    ) -> ScoreBreakdown {
        let tool_count = tools.map_or(0, <[_]>::len);

        if messages.is_empty() {
            tracing::debug!(tools = tool_count, "heuristics: empty conversation");
            return self.finish(Vec::new(), 0.0);
        }

        let full_text = extract_text(messages);
        let last_user = last_user_text(messages);
        let complex_hits = keywords::complex_keywords(&last_user);
        let simple_hits = keywords::simple_keywords(&last_user);

        let contributions: Vec<Contribution> = [
            Some(signals::length(estimate_tokens(&full_text))),
            signals::depth(messages.len()),
            signals::tool_use(tool_count),
            signals::system_prompt(estimate_tokens(&system_text(messages))),
            signals::code_blocks(signals::count_code_blocks(&full_text)),
            signals::images(&full_text),
            signals::complex_keywords(&complex_hits),
            signals::simple_keywords(&simple_hits, !complex_hits.is_empty()),
        ]
        .into_iter()
        .flatten()
        .collect();

        let mut raw = 0.0;
        for c in &contributions {
            tracing::trace!(signal = %c.signal, weight = c.weight, "heuristics: signal fired");
            raw += c.weight;
        }

        let breakdown = self.finish(contributions, raw);
        tracing::debug!(
            score = breakdown.result.score,
            raw,
            confident = breakdown.result.confident,
            turns = messages.len(),
            tools = tool_count,
            "heuristics: scored request"
        );
        breakdown
    }

    fn finish(&self, contributions: Vec<Contribution>, raw: f64) -> ScoreBreakdown {
        let score = round3(raw.clamp(0.0, 1.0));
        let reasons = contributions
            .iter()
            .filter_map(|c| c.reason.clone())
            .collect();
        ScoreBreakdown {
            raw,
            contributions,
            result: HeuristicResult {
                score,
                reasons,
                confident: self.config.is_confident(score),
            },
        }
    }
}

/// Score a conversation with the default confidence band.
pub fn score_request(messages: &[Message], tools: Option<&[ToolDeclaration]>) -> HeuristicResult {
    HeuristicScorer::default().score(messages, tools)
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
