//! Error types for the triage core
//!
//! Decision functions never fail. These errors only surface where raw input
//! crosses into the typed core (enum names and identifiers).

use thiserror::Error;

/// Boundary error for the help-desk core
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeskError {
    /// Impact name not recognised
    #[error("unknown impact: {0}")]
    UnknownImpact(String),

    /// Urgency name not recognised
    #[error("unknown urgency: {0}")]
    UnknownUrgency(String),

    /// Priority name not recognised
    #[error("unknown priority: {0}")]
    UnknownPriority(String),

    /// SLA level name not recognised
    #[error("unknown SLA level: {0}")]
    UnknownSlaLevel(String),

    /// Role name not recognised
    #[error("unknown role: {0}")]
    UnknownRole(String),

    /// Identifier failed validation
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

/// Result type for the help-desk core
pub type DeskResult<T> = Result<T, DeskError>;
