use crate::error::EngineError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 2022-03-31T16:00:00Z, the instant puzzle #1 went live.
pub const DEFAULT_EPOCH_SECS: i64 = 1_648_742_400;

pub fn default_epoch() -> DateTime<Utc> {
    DateTime::from_timestamp(DEFAULT_EPOCH_SECS, 0).unwrap_or(DateTime::UNIX_EPOCH)
}

/// Engine configuration.
///
/// Every field has a default, so a config file only needs the fields it
/// overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Start of day one. Days are counted in whole 24h periods from here,
    /// never from local midnight.
    pub epoch: DateTime<Utc>,
    /// Flags shown in the bonus round, the correct one included.
    pub bonus_round_size: usize,
    /// Guesses allowed in the main round.
    pub max_guesses: usize,
    /// How long a cached metadata snapshot stays fresh.
    ///
    /// - `3600`: hourly, matching the static-site regeneration
    /// - `0`: rebuild on every request
    pub revalidate_secs: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            epoch: default_epoch(),
            bonus_round_size: 6,
            max_guesses: 6,
            revalidate_secs: 3600,
        }
    }
}

impl EngineConfig {
    pub fn from_json_str(json: &str) -> Result<Self, EngineError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| EngineError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, EngineError> {
        log::info!("Loading engine config from {}", path.display());
        let json = std::fs::read_to_string(path)
            .map_err(|e| EngineError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_json_str(&json)
    }

    /// Reject settings no game can be played with. Whether the bonus round
    /// fits the catalog is checked when metadata is built.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.bonus_round_size == 0 {
            return Err(EngineError::Config(
                "bonus_round_size must be at least 1".to_string(),
            ));
        }
        if self.max_guesses == 0 {
            return Err(EngineError::Config(
                "max_guesses must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
