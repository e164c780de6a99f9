//! OpenDesk SLA Engine
//!
//! Pure decision logic for ticket triage.
//!
//! ## Pipeline
//!
//! ```text
//! impact, urgency ──► resolve_priority ──► priority
//! priority, impact ─► classify_sla ──────► sla level
//! sla level, created_at ─► compute_due_date ─► due date
//! due date, sla level, now ─► evaluate_sla_status ─► red / yellow / green
//! priority, sla level, roster ─► auto_assign ─► assignee
//! ```
//!
//! Every function is synchronous and total. "Now" is always passed in.

pub mod assignment;
pub mod calendar;
pub mod engine;
pub mod policy;
pub mod priority;
pub mod status;
pub mod ticket;

pub use assignment::{auto_assign, plan_assignment, Assignment, StaffCandidate};
pub use calendar::BusinessHours;
pub use engine::{TriageDecision, TriageEngine};
pub use policy::{compute_due_date, SlaPolicy, TierPolicy};
pub use priority::{classify_sla, resolve_priority};
pub use status::{evaluate_sla_status, SlaColor, SlaStatus};
pub use ticket::{Ticket, TicketEvent, TicketStatus};

use desk_common::DeskError;
use thiserror::Error;

/// SLA engine errors
#[derive(Error, Debug)]
pub enum SlaError {
    #[error("invalid SLA policy: {0}")]
    InvalidPolicy(String),

    #[error("policy parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Desk(#[from] DeskError),
}

pub type Result<T> = std::result::Result<T, SlaError>;
