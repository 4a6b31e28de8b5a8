use serde::{Deserialize, Serialize};
use serde_valid::Validate;
use thiserror::Error;

/// Host supplied configuration could not be used
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Failed to parse core config: {0}")]
    Parse(String),
    #[error("Invalid core config: {0}")]
    Invalid(String),
}

/// Timing and replay settings the reducer reads from its environment
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Validate)]
#[serde(default)]
pub struct CoreConfig {
    #[validate(minimum = 1)]
    pub reconnection_poll_interval_ms: u64,
    #[validate(minimum = 1)]
    pub reboot_timeout_ms: u64,
    #[validate(minimum = 1)]
    pub factory_reset_timeout_ms: u64,
    #[validate(minimum = 1)]
    pub update_timeout_ms: u64,
    #[validate(minimum = 1)]
    pub new_ip_poll_interval_ms: u64,
    #[validate(minimum = 1)]
    pub new_ip_timeout_ms: u64,
    #[validate(minimum = 1)]
    pub channel_history_limit: u32,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            reconnection_poll_interval_ms: 5_000,
            reboot_timeout_ms: 300_000,
            factory_reset_timeout_ms: 600_000,
            update_timeout_ms: 300_000,
            new_ip_poll_interval_ms: 5_000,
            new_ip_timeout_ms: 90_000,
            channel_history_limit: 1,
        }
    }
}

impl CoreConfig {
    /// Parse host supplied JSON; omitted fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.check()?;
        Ok(config)
    }

    /// Reject zero periods and limits; a zero interval would never let time advance
    pub fn check(&self) -> Result<(), ConfigError> {
        self.validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))
    }
}

/// Milliseconds to whole seconds for countdown display, rounding up
pub fn countdown_seconds(ms: u64) -> u32 {
    u32::try_from(ms.div_ceil(1000)).unwrap_or(u32::MAX)
}
