//! ID prefix constants and formatting helpers.
//!
//! Organization identifiers look like `org_3f1c…` (prefix, underscore, 32
//! lowercase hex chars). The random part is produced by the database
//! (`randomblob(16)`), this module only owns the shape.

/// Prefix for organization identifiers.
pub const PREFIX_ORGANIZATION: &str = "org";

/// Length of the random hex suffix.
pub const ID_HEX_LEN: usize = 32;

/// Join a prefix and a hex suffix into an identifier.
#[must_use]
pub fn format_id(prefix: &str, hex: &str) -> String {
    format!("{prefix}_{hex}")
}

/// Check whether `id` has the generated shape for `prefix`.
///
/// Imported records may carry identifiers of any shape; this only tells
/// whether an identifier was minted by this system.
#[must_use]
pub fn is_generated_id(prefix: &str, id: &str) -> bool {
    id.strip_prefix(prefix)
        .and_then(|rest| rest.strip_prefix('_'))
        .is_some_and(|hex| {
            hex.len() == ID_HEX_LEN
                && hex
                    .chars()
                    .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
        })
}
