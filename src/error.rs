//! Error types for the routing heuristics.

/// Top-level error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Heuristic error: {0}")]
    Heuristic(#[from] HeuristicError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),
}

/// Errors raised while turning caller input into scorable messages.
///
/// Scoring itself never fails; only the strict request parser does.
#[derive(Debug, thiserror::Error)]
pub enum HeuristicError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<serde_json::Error> for HeuristicError {
    fn from(e: serde_json::Error) -> Self {
        Self::InvalidInput(e.to_string())
    }
}

/// Result type alias for the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_errors_become_invalid_input() {
        let err: HeuristicError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert!(matches!(err, HeuristicError::InvalidInput(_)));
    }

    #[test]
    fn top_level_error_wraps_both_kinds() {
        let err: Error = HeuristicError::InvalidInput("missing `messages`".into()).into();
        assert_eq!(err.to_string(), "Heuristic error: Invalid input: missing `messages`");

        let err: Error = ConfigError::ParseError("bad".into()).into();
        assert_eq!(err.to_string(), "Configuration error: Failed to parse configuration: bad");
    }
}
