//! Rule-based complexity scoring for incoming chat requests.
//!
//! # Architecture
//!
//! ```text
//! Messages + Tools
//!      │
//!      ▼
//! ┌──────────────────┐
//! │  Text Extraction │  ← strings, text blocks, [IMAGE] markers
//! └────────┬─────────┘
//!          │
//!          ▼
//! ┌──────────────────┐
//! │     Signals      │  ← length, depth, tools, system prompt,
//! │                  │    code blocks, images, keywords
//! └────────┬─────────┘
//!          │ additive contributions
//!          ▼
//! ┌──────────────────┐
//! │    Aggregator    │  ← clamp to [0, 1], round to 3 places
//! └────────┬─────────┘
//!          │ score
//!          ▼
//! ┌──────────────────┐
//! │    Confidence    │  ← score <= 0.2 or score >= 0.8
//! └──────────────────┘
//! ```
//!
//! A confident result can be routed directly; an uncertain one (the middle
//! band) should be handed to a secondary classifier by the caller.
//!
//! # Usage
//!
//! ```rust
//! use smart_router::{Message, score_request};
//!
//! let result = score_request(&[Message::user("What is the capital of France?")], None);
//! assert!(result.score < 0.2);
//! assert!(result.confident);
//! ```

mod extract;
mod keywords;
mod scorer;
mod signals;

pub use extract::{IMAGE_MARKER, estimate_tokens, extract_text, last_user_text, system_text};
pub use keywords::{KeywordMatches, complex_keywords, simple_keywords};
pub use scorer::{HeuristicResult, HeuristicScorer, ScoreBreakdown, score_request};
pub use signals::{Contribution, Signal, count_code_blocks};
