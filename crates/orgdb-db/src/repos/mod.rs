//! Repository modules for the organization directory.
//!
//! Each module adds methods to `DirectoryService` via `impl DirectoryService` blocks.

pub mod history;
pub mod organization;
