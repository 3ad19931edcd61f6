//! # orgdb-core
//!
//! Core types, snapshot diffing, and error types for the organization directory.
//!
//! This crate provides the foundational types shared across all orgdb crates:
//! - Entity structs (organizations and their history entries)
//! - The history action enum and import modes
//! - ID prefix constants and formatting helpers
//! - Cross-cutting error types and the error taxonomy
//! - Snapshot helpers and the field-level diff engine
//! - CLI response types
//! - Serde adapters for loosely-typed form/import input

pub mod diff;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod form_serde;
pub mod ids;
pub mod responses;
pub mod snapshot;
