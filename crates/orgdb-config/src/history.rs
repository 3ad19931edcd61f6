//! Version store tuning.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Attempts made to claim a version number before giving up.
const fn default_max_attempts() -> u32 {
    4
}

const fn default_base_delay_ms() -> u64 {
    25
}

const fn default_max_delay_ms() -> u64 {
    500
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HistoryConfig {
    /// Maximum attempts when two writers race for the same version number.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// First backoff delay, doubled on every retry.
    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,

    /// Upper bound for a single backoff delay.
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            base_delay_ms: default_base_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
        }
    }
}

impl HistoryConfig {
    /// Reject settings the retry loop cannot work with.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_attempts == 0 {
            return Err(ConfigError::InvalidValue {
                field: "history.max_attempts".into(),
                reason: "must be at least 1".into(),
            });
        }
        if self.base_delay_ms > self.max_delay_ms {
            return Err(ConfigError::InvalidValue {
                field: "history.base_delay_ms".into(),
                reason: format!(
                    "{} exceeds history.max_delay_ms ({})",
                    self.base_delay_ms, self.max_delay_ms
                ),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = HistoryConfig::default();
        assert_eq!(config.max_attempts, 4);
        assert_eq!(config.base_delay_ms, 25);
        assert_eq!(config.max_delay_ms, 500);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_attempts_rejected() {
        let config = HistoryConfig {
            max_attempts: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("history.max_attempts"));
    }

    #[test]
    fn base_above_max_rejected() {
        let config = HistoryConfig {
            base_delay_ms: 1000,
            max_delay_ms: 10,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }
}
