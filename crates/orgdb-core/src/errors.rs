//! Cross-cutting error types for orgdb.
//!
//! Domain-specific errors (`DatabaseError`, `ConfigError`) live in their own
//! crates. Every error maps onto one [`ErrorKind`] so callers can translate a
//! failure into a status (not-found, bad input, storage) without matching on
//! crate-specific variants.

use thiserror::Error;

/// Errors that can be raised by any orgdb crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Entity lookup returned no result.
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: String, id: String },

    /// Input failed validation (protected field, unknown field, bad shape).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CoreError {
    /// Convenience constructor for a missing entity.
    #[must_use]
    pub fn not_found(entity_type: &str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: entity_type.to_string(),
            id: id.into(),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Validation(_) => ErrorKind::Validation,
            Self::Other(_) => ErrorKind::Storage,
        }
    }
}

/// Coarse failure class surfaced to callers.
///
/// ```text
/// NotFound   -> record or version absent          (404-equivalent)
/// Validation -> malformed input to a lifecycle op (4xx-equivalent)
/// Storage    -> persistence unavailable or broken (5xx-equivalent)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotFound,
    Validation,
    Storage,
}

impl ErrorKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::Validation => "validation",
            Self::Storage => "storage",
        }
    }

    /// Process exit code used by the CLI for this class of failure.
    #[must_use]
    pub const fn exit_code(self) -> i32 {
        match self {
            Self::NotFound => 3,
            Self::Validation => 2,
            Self::Storage => 1,
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_entity() {
        let err = CoreError::not_found("organization", "org_abc");
        assert_eq!(err.to_string(), "Entity not found: organization org_abc");
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn kinds_map_to_distinct_exit_codes() {
        let codes = [
            ErrorKind::NotFound.exit_code(),
            ErrorKind::Validation.exit_code(),
            ErrorKind::Storage.exit_code(),
        ];
        assert_eq!(codes, [3, 2, 1]);
    }

    #[test]
    fn other_errors_are_storage() {
        let err = CoreError::from(anyhow::anyhow!("disk full"));
        assert_eq!(err.kind(), ErrorKind::Storage);
    }
}
