//! Triage engine - applies one SLA policy across the pipeline

use crate::assignment::{plan_assignment, Assignment, StaffCandidate};
use crate::policy::SlaPolicy;
use crate::priority::{classify_sla, resolve_priority};
use crate::status::SlaStatus;
use crate::ticket::Ticket;
use chrono::{DateTime, Utc};
use desk_common::{Impact, Priority, SlaLevel, TicketId, Urgency, UserId};
use serde::{Deserialize, Serialize};

/// Derived fields to persist on a ticket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriageDecision {
    pub priority: Priority,
    pub sla_level: SlaLevel,
    pub due_date: DateTime<Utc>,
}

/// Stateless triage pipeline bound to a policy
#[derive(Debug, Clone, Default)]
pub struct TriageEngine {
    policy: SlaPolicy,
}

impl TriageEngine {
    /// Create an engine from a validated policy
    pub fn new(policy: SlaPolicy) -> crate::Result<Self> {
        policy.validate()?;
        Ok(Self { policy })
    }

    pub fn policy(&self) -> &SlaPolicy {
        &self.policy
    }

    /// impact, urgency, creation time → priority, SLA level, due date
    pub fn triage(&self, impact: Impact, urgency: Urgency, created_at: DateTime<Utc>) -> TriageDecision {
        let priority = resolve_priority(impact, urgency);
        let sla_level = classify_sla(priority, impact);
        TriageDecision {
            priority,
            sla_level,
            due_date: self.policy.due_date(sla_level, created_at),
        }
    }

    /// Triage from raw impact and urgency names
    ///
    /// Unknown names are rejected rather than coerced.
    pub fn triage_named(
        &self,
        impact: &str,
        urgency: &str,
        created_at: DateTime<Utc>,
    ) -> crate::Result<TriageDecision> {
        let impact: Impact = impact.parse()?;
        let urgency: Urgency = urgency.parse()?;
        Ok(self.triage(impact, urgency, created_at))
    }

    pub fn evaluate(&self, due_date: DateTime<Utc>, level: SlaLevel, now: DateTime<Utc>) -> SlaStatus {
        self.policy.evaluate(&due_date, level, &now)
    }

    pub fn assign(&self, priority: Priority, level: SlaLevel, roster: &[StaffCandidate]) -> Option<Assignment> {
        plan_assignment(priority, level, roster)
    }

    pub fn open_ticket(
        &self,
        id: TicketId,
        subject: impl Into<String>,
        requester_id: UserId,
        impact: Impact,
        urgency: Urgency,
        created_at: DateTime<Utc>,
    ) -> Ticket {
        Ticket::open(id, subject, requester_id, impact, urgency, created_at, &self.policy)
    }

    pub fn reclassify(&self, ticket: &mut Ticket, impact: Impact, urgency: Urgency) {
        ticket.reclassify(impact, urgency, &self.policy);
    }

    pub fn ticket_status(&self, ticket: &Ticket, now: DateTime<Utc>) -> SlaStatus {
        ticket.sla_status(now, &self.policy)
    }
}
