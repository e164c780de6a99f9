//! OpenDesk Common - Shared types for the help-desk triage core
//!
//! This crate provides:
//! - Closed severity, tier and role enums with boundary parsing
//! - Validated identifiers
//! - Ownership views of tickets and users for access checks
//! - The boundary error type
//!
//! Nothing here performs I/O or holds mutable state.

pub mod error;
pub mod records;
pub mod value_objects;

pub use error::*;
pub use records::*;
pub use value_objects::*;
