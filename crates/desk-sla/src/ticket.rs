//! Ticket Aggregate
//!
//! Holds the SLA-relevant slice of a ticket. Priority, SLA level and due date
//! are only ever written together, from impact, urgency and creation time.

use crate::policy::SlaPolicy;
use crate::priority::{classify_sla, resolve_priority};
use crate::status::SlaStatus;
use chrono::{DateTime, Utc};
use desk_common::{Impact, Priority, SlaLevel, TicketId, TicketRecord, Urgency, UserId};
use serde::Serialize;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketStatus {
    #[default]
    New,
    Open,
    Closed,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TicketEvent {
    Opened { ticket_id: TicketId, priority: Priority, sla_level: SlaLevel },
    Reclassified { ticket_id: TicketId, from: Priority, to: Priority, sla_level: SlaLevel },
    Assigned { ticket_id: TicketId, assignee_id: UserId },
    Closed { ticket_id: TicketId },
    Reopened { ticket_id: TicketId },
}

#[derive(Clone, Debug, Serialize)]
pub struct Ticket {
    id: TicketId,
    subject: String,
    impact: Impact,
    urgency: Urgency,
    priority: Priority,
    sla_level: SlaLevel,
    status: TicketStatus,
    requester_id: UserId,
    assigned_to_id: Option<UserId>,
    created_at: DateTime<Utc>,
    due_date: DateTime<Utc>,
    closed_at: Option<DateTime<Utc>>,
    #[serde(skip)]
    events: Vec<TicketEvent>,
}

impl Ticket {
    /// Open a ticket, deriving priority, SLA level and due date
    pub fn open(
        id: TicketId,
        subject: impl Into<String>,
        requester_id: UserId,
        impact: Impact,
        urgency: Urgency,
        created_at: DateTime<Utc>,
        policy: &SlaPolicy,
    ) -> Self {
        let priority = resolve_priority(impact, urgency);
        let sla_level = classify_sla(priority, impact);
        let mut t = Self {
            id,
            subject: subject.into(),
            impact,
            urgency,
            priority,
            sla_level,
            status: TicketStatus::New,
            requester_id,
            assigned_to_id: None,
            created_at,
            due_date: policy.due_date(sla_level, created_at),
            closed_at: None,
            events: vec![],
        };
        t.raise_event(TicketEvent::Opened { ticket_id: id, priority, sla_level });
        t
    }

    pub fn id(&self) -> TicketId { self.id }
    pub fn subject(&self) -> &str { &self.subject }
    pub fn impact(&self) -> Impact { self.impact }
    pub fn urgency(&self) -> Urgency { self.urgency }
    pub fn priority(&self) -> Priority { self.priority }
    pub fn sla_level(&self) -> SlaLevel { self.sla_level }
    pub fn status(&self) -> &TicketStatus { &self.status }
    pub fn created_at(&self) -> DateTime<Utc> { self.created_at }
    pub fn due_date(&self) -> DateTime<Utc> { self.due_date }
    pub fn closed_at(&self) -> Option<DateTime<Utc>> { self.closed_at }

    /// Change impact and/or urgency, recomputing the derived triple
    ///
    /// The due date is measured from the original creation time.
    pub fn reclassify(&mut self, impact: Impact, urgency: Urgency, policy: &SlaPolicy) {
        if impact == self.impact && urgency == self.urgency {
            return;
        }
        let from = self.priority;
        self.impact = impact;
        self.urgency = urgency;
        self.priority = resolve_priority(impact, urgency);
        self.sla_level = classify_sla(self.priority, impact);
        self.due_date = policy.due_date(self.sla_level, self.created_at);
        self.raise_event(TicketEvent::Reclassified {
            ticket_id: self.id,
            from,
            to: self.priority,
            sla_level: self.sla_level,
        });
    }

    pub fn assign(&mut self, assignee_id: UserId) {
        self.assigned_to_id = Some(assignee_id.clone());
        if self.status == TicketStatus::New {
            self.status = TicketStatus::Open;
        }
        self.raise_event(TicketEvent::Assigned { ticket_id: self.id, assignee_id });
    }

    pub fn close(&mut self, at: DateTime<Utc>) {
        self.status = TicketStatus::Closed;
        self.closed_at = Some(at);
        self.raise_event(TicketEvent::Closed { ticket_id: self.id });
    }

    pub fn reopen(&mut self) {
        if self.status == TicketStatus::Closed {
            self.status = TicketStatus::Open;
            self.closed_at = None;
            self.raise_event(TicketEvent::Reopened { ticket_id: self.id });
        }
    }

    /// SLA clock at `now`, frozen at closure for closed tickets
    pub fn sla_status(&self, now: DateTime<Utc>, policy: &SlaPolicy) -> SlaStatus {
        let reference = self.closed_at.unwrap_or(now);
        policy.evaluate(&self.due_date, self.sla_level, &reference)
    }

    pub fn take_events(&mut self) -> Vec<TicketEvent> { std::mem::take(&mut self.events) }
    fn raise_event(&mut self, e: TicketEvent) { self.events.push(e); }
}

impl TicketRecord for Ticket {
    fn requester_id(&self) -> &UserId {
        &self.requester_id
    }

    fn assigned_to_id(&self) -> Option<&UserId> {
        self.assigned_to_id.as_ref()
    }
}
