//! Bulk import and export of the directory.
//!
//! Import reads the JSON array format produced by export (and by the legacy
//! spreadsheet conversion), so an export can be re-imported as-is.

pub mod export;
pub mod import;
