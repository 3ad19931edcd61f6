//! Update builder types for record mutations.
//!
//! An update is a validated partial field mapping. Only the keys it carries
//! are changed; everything else keeps its current value.

pub mod organization;
