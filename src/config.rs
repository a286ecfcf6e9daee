use crate::scoreboard::contest::DEFAULT_WRONG_ATTEMPT_PENALTY;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub logging: LoggingConfig,
    pub scoring: ScoringConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// A flexi_logger spec string, e.g. "warn" or "info, sunwalker_scoreboard::scoreboard=debug".
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub wrong_attempt_penalty: u64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            wrong_attempt_penalty: DEFAULT_WRONG_ATTEMPT_PENALTY,
        }
    }
}
