//! Version-conflict retry policy.
//!
//! The next history version is claimed with a single
//! `INSERT … SELECT MAX(version) + 1` statement. Two writers on separate
//! connections can still compute the same number; the loser hits the
//! `(organization_id, version)` primary key and retries with exponential
//! backoff. A busy database file is retried the same way.

use std::time::Duration;

use orgdb_config::HistoryConfig;

/// Configuration for retrying a history insert.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of attempts (including the initial one).
    pub max_attempts: u32,
    /// Initial delay before the first retry.
    pub base_delay: Duration,
    /// Maximum delay between retries (backoff is capped here).
    pub max_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self::from(&HistoryConfig::default())
    }
}

impl From<&HistoryConfig> for RetryConfig {
    fn from(config: &HistoryConfig) -> Self {
        Self {
            max_attempts: config.max_attempts.max(1),
            base_delay: Duration::from_millis(config.base_delay_ms),
            max_delay: Duration::from_millis(config.max_delay_ms),
        }
    }
}

impl RetryConfig {
    /// Delay before retry number `attempt` (1-based), doubling each time.
    #[must_use]
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.base_delay.saturating_mul(factor).min(self.max_delay)
    }
}

/// Detect a lost race for a version number, or a locked database file.
///
/// Other constraint failures (CHECK, NOT NULL) are real bugs and are not
/// retried.
pub fn is_version_conflict(e: &libsql::Error) -> bool {
    let msg = e.to_string();
    msg.contains("UNIQUE constraint failed")
        || msg.contains("PRIMARY KEY")
        || msg.contains("database is locked")
}
