//! Machine configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Default wall-clock budget for one `update_until` call.
pub const DEFAULT_MAX_UPDATE_MS: u64 = 50;

/// Default number of fired transitions kept in history.
pub const DEFAULT_HISTORY_LIMIT: usize = 64;

/// Errors raised while loading configuration or table data.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Tunables for a running machine.
///
/// Every field has a default, so partial JSON documents are accepted.
///
/// # Example
///
/// ```rust
/// use flowtable::config::MachineConfig;
/// use std::time::Duration;
///
/// let config = MachineConfig::from_json(r#"{ "max_update_ms": 16 }"#).unwrap();
/// assert_eq!(config.max_update(), Duration::from_millis(16));
/// assert_eq!(config.history_limit, 64);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineConfig {
    /// Soft budget for `update_until`, checked between cycles
    pub max_update_ms: u64,
    /// Fired transitions retained in history; visit counts are unaffected
    pub history_limit: usize,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            max_update_ms: DEFAULT_MAX_UPDATE_MS,
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

impl MachineConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn max_update(&self) -> Duration {
        Duration::from_millis(self.max_update_ms)
    }

    pub fn with_max_update(mut self, budget: Duration) -> Self {
        self.max_update_ms = u64::try_from(budget.as_millis()).unwrap_or(u64::MAX);
        self
    }

    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }
}
