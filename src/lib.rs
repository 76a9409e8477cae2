//! Deterministic complexity heuristics for chat request routing.
//!
//! Scores a conversation (messages plus optional tool declarations) in
//! `[0.0, 1.0]`, explains the score with short reasons, and flags whether the
//! score is extreme enough to route on without consulting a secondary
//! classifier. Scoring is pure and synchronous: no I/O, no shared mutable
//! state, safe to call from any number of threads.

pub mod config;
pub mod error;
pub mod heuristics;
pub mod message;

pub use config::HeuristicConfig;
pub use error::{ConfigError, Error, HeuristicError, Result};
pub use heuristics::{
    Contribution, HeuristicResult, HeuristicScorer, ScoreBreakdown, Signal, score_request,
};
pub use message::{ContentBlock, Message, MessageContent, Role, ScoreRequest, ToolDeclaration};
