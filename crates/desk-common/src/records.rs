//! Record views consumed by the access gate
//!
//! Callers fetch tickets and users from their own stores; the gate only
//! needs the ownership fields below.

use crate::value_objects::{Role, UserId};
use serde::{Deserialize, Serialize};

/// Ownership view of a ticket
pub trait TicketRecord {
    /// User who raised the ticket
    fn requester_id(&self) -> &UserId;

    /// Staff member currently holding the ticket, if any
    fn assigned_to_id(&self) -> Option<&UserId>;
}

/// Identity view of a user account
pub trait UserRecord {
    fn id(&self) -> &UserId;
    fn role(&self) -> Role;
}

/// Minimal user account as supplied by the identity layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub role: Role,
}

impl UserProfile {
    pub fn new(id: UserId, role: Role) -> Self {
        Self { id, role }
    }
}

impl UserRecord for UserProfile {
    fn id(&self) -> &UserId {
        &self.id
    }

    fn role(&self) -> Role {
        self.role
    }
}

/// Minimal ticket ownership record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketOwnership {
    pub requester_id: UserId,
    pub assigned_to_id: Option<UserId>,
}

impl TicketRecord for TicketOwnership {
    fn requester_id(&self) -> &UserId {
        &self.requester_id
    }

    fn assigned_to_id(&self) -> Option<&UserId> {
        self.assigned_to_id.as_ref()
    }
}
