//! Entity structs for the organization directory.
//!
//! Each entity maps to a table in the libSQL database. All structs derive
//! `Serialize`, `Deserialize`, and `JsonSchema` for JSON roundtrip and schema
//! validation.

mod history;
mod organization;

pub use history::HistoryEntry;
pub use organization::{Organization, OrganizationFields};
