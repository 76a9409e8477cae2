//! Configuration for the heuristic scorer.
//!
//! Signal weights are fixed; only the confidence band is tunable, so a
//! deployment can widen or narrow the range of scores it hands to a
//! secondary classifier.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Scores at or below this are trusted as "simple" by default.
pub const DEFAULT_CONFIDENT_LOW: f64 = 0.2;
/// Scores at or above this are trusted as "complex" by default.
pub const DEFAULT_CONFIDENT_HIGH: f64 = 0.8;

const ENV_CONFIDENT_LOW: &str = "SMART_ROUTER_CONFIDENT_LOW";
const ENV_CONFIDENT_HIGH: &str = "SMART_ROUTER_CONFIDENT_HIGH";

/// Confidence band for [`HeuristicScorer`](crate::HeuristicScorer).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeuristicConfig {
    /// Upper bound (inclusive) of the confident-low region.
    #[serde(default = "default_confident_low")]
    pub confident_low: f64,

    /// Lower bound (inclusive) of the confident-high region.
    #[serde(default = "default_confident_high")]
    pub confident_high: f64,
}

fn default_confident_low() -> f64 {
    DEFAULT_CONFIDENT_LOW
}

fn default_confident_high() -> f64 {
    DEFAULT_CONFIDENT_HIGH
}

impl Default for HeuristicConfig {
    fn default() -> Self {
        Self {
            confident_low: DEFAULT_CONFIDENT_LOW,
            confident_high: DEFAULT_CONFIDENT_HIGH,
        }
    }
}

impl HeuristicConfig {
    /// Build a config from `SMART_ROUTER_CONFIDENT_LOW` / `SMART_ROUTER_CONFIDENT_HIGH`,
    /// falling back to the defaults for unset or empty variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Self {
            confident_low: parse_optional_env(ENV_CONFIDENT_LOW, DEFAULT_CONFIDENT_LOW)?,
            confident_high: parse_optional_env(ENV_CONFIDENT_HIGH, DEFAULT_CONFIDENT_HIGH)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check that `0.0 <= confident_low <= confident_high <= 1.0`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_unit_interval(ENV_CONFIDENT_LOW, self.confident_low)?;
        check_unit_interval(ENV_CONFIDENT_HIGH, self.confident_high)?;
        if self.confident_low > self.confident_high {
            tracing::warn!(
                confident_low = self.confident_low,
                confident_high = self.confident_high,
                "confidence band is inverted"
            );
            return Err(ConfigError::InvalidValue {
                key: ENV_CONFIDENT_LOW.to_string(),
                message: format!(
                    "must not exceed {} ({} > {})",
                    ENV_CONFIDENT_HIGH, self.confident_low, self.confident_high
                ),
            });
        }
        Ok(())
    }

    /// Whether `score` falls outside the uncertain middle band.
    pub fn is_confident(&self, score: f64) -> bool {
        score <= self.confident_low || score >= self.confident_high
    }
}

fn check_unit_interval(key: &str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        return Ok(());
    }
    tracing::warn!(key, value, "confidence threshold outside [0, 1]");
    Err(ConfigError::InvalidValue {
        key: key.to_string(),
        message: format!("{value} is outside [0.0, 1.0]"),
    })
}

// Helper functions

pub(crate) fn optional_env(key: &str) -> Result<Option<String>, ConfigError> {
    match std::env::var(key) {
        Ok(val) if val.is_empty() => Ok(None),
        Ok(val) => Ok(Some(val)),
        Err(std::env::VarError::NotPresent) => Ok(None),
        Err(e) => Err(ConfigError::ParseError(format!(
            "failed to read {key}: {e}"
        ))),
    }
}

pub(crate) fn parse_optional_env<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    optional_env(key)?
        .map(|s| {
            s.trim().parse().map_err(|e| ConfigError::InvalidValue {
                key: key.to_string(),
                message: format!("{e}"),
            })
        })
        .transpose()
        .map(|opt| opt.unwrap_or(default))
}
