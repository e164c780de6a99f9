//! Authorizer - role grants and record checks behind one entry point

use crate::gate::{can_access_ticket, can_access_user};
use crate::permission::{resources, ConditionKey, PermissionContext, SELF_VALUE};
use crate::resolver::PermissionResolver;
use desk_common::{Role, TicketRecord, UserId, UserRecord};
use serde::Serialize;
use std::fmt;
use tracing::{debug, warn};

/// Why a request was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DenialReason {
    /// No grant for the role covers the request
    NoPermission,
    /// A grant exists but the record belongs to someone else
    RecordAccess,
    /// The role name could not be parsed
    UnknownRole,
}

impl fmt::Display for DenialReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::NoPermission => "no matching permission",
            Self::RecordAccess => "record not accessible",
            Self::UnknownRole => "unknown role",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AuthzResult {
    pub authorized: bool,
    pub reason: Option<DenialReason>,
}

impl AuthzResult {
    pub fn allow() -> Self {
        Self {
            authorized: true,
            reason: None,
        }
    }

    pub fn deny(reason: DenialReason) -> Self {
        Self {
            authorized: false,
            reason: Some(reason),
        }
    }
}

/// Access decisions for tickets and user accounts
#[derive(Debug, Clone, Copy)]
pub struct Authorizer<'a> {
    resolver: PermissionResolver<'a>,
}

impl<'a> Authorizer<'a> {
    pub fn new(resolver: PermissionResolver<'a>) -> Self {
        Self { resolver }
    }

    pub fn resolver(&self) -> PermissionResolver<'a> {
        self.resolver
    }

    /// Role-level check with a caller-built context
    pub fn authorize(&self, role: Role, resource: &str, action: &str, ctx: &PermissionContext) -> AuthzResult {
        if self.resolver.has_permission(role, resource, action, ctx) {
            AuthzResult::allow()
        } else {
            AuthzResult::deny(DenialReason::NoPermission)
        }
    }

    /// Full check for an action on a ticket
    ///
    /// Ownership facts are derived from the record, then the role grant and
    /// the record gate must both agree.
    pub fn authorize_ticket<T: TicketRecord + ?Sized>(
        &self,
        role: Role,
        actor_id: &UserId,
        ticket: &T,
        action: &str,
    ) -> AuthzResult {
        let ctx = ticket_context(actor_id, ticket);
        let granted = self.authorize(role, resources::TICKETS, action, &ctx);
        if !granted.authorized {
            return granted;
        }
        if !can_access_ticket(role, actor_id, ticket, action) {
            return AuthzResult::deny(DenialReason::RecordAccess);
        }
        AuthzResult::allow()
    }

    /// Full check for an action on a user account
    pub fn authorize_user<U: UserRecord + ?Sized>(
        &self,
        role: Role,
        actor_id: &UserId,
        target: &U,
        action: &str,
    ) -> AuthzResult {
        let mut ctx = PermissionContext::new().with(ConditionKey::TargetRole, target.role().as_str());
        if target.id() == actor_id {
            ctx.insert(ConditionKey::Id, SELF_VALUE);
        }

        let granted = self.authorize(role, resources::USERS, action, &ctx);
        if !granted.authorized {
            return granted;
        }
        if !can_access_user(role, actor_id, target, action) {
            return AuthzResult::deny(DenialReason::RecordAccess);
        }
        AuthzResult::allow()
    }

    /// Role-level check for a role name taken from outside the core
    ///
    /// Unrecognised role names are refused.
    pub fn authorize_raw(&self, role_name: &str, resource: &str, action: &str, ctx: &PermissionContext) -> AuthzResult {
        match role_name.parse::<Role>() {
            Ok(role) => self.authorize(role, resource, action, ctx),
            Err(e) => {
                warn!(error = %e, resource, action, "rejecting request with unknown role");
                AuthzResult::deny(DenialReason::UnknownRole)
            }
        }
    }
}

impl Default for Authorizer<'static> {
    fn default() -> Self {
        Self::new(PermissionResolver::default())
    }
}

fn ticket_context<T: TicketRecord + ?Sized>(actor_id: &UserId, ticket: &T) -> PermissionContext {
    let mut ctx = PermissionContext::new();
    if ticket.requester_id() == actor_id {
        ctx.insert(ConditionKey::Requester, SELF_VALUE);
    }
    if ticket.assigned_to_id() == Some(actor_id) {
        ctx.insert(ConditionKey::AssignedTo, SELF_VALUE);
    }
    debug!(actor = %actor_id, facts = ctx.len(), "derived ticket context");
    ctx
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::permission::actions;
    use desk_common::{TicketOwnership, UserProfile};

    fn uid(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    fn ticket(requester: &str, assignee: Option<&str>) -> TicketOwnership {
        TicketOwnership {
            requester_id: uid(requester),
            assigned_to_id: assignee.map(uid),
        }
    }

    #[test]
    fn test_end_user_own_ticket() {
        let authz = Authorizer::default();
        let t = ticket("alice", None);

        assert!(authz.authorize_ticket(Role::EndUser, &uid("alice"), &t, actions::UPDATE).authorized);

        let denied = authz.authorize_ticket(Role::EndUser, &uid("bob"), &t, actions::READ);
        assert!(!denied.authorized);
        assert_eq!(denied.reason, Some(DenialReason::NoPermission));

        // own ticket, but no delete grant
        let denied = authz.authorize_ticket(Role::EndUser, &uid("alice"), &t, actions::DELETE);
        assert_eq!(denied.reason, Some(DenialReason::NoPermission));
    }

    #[test]
    fn test_staff_ticket_flow() {
        let authz = Authorizer::default();
        let other = ticket("alice", Some("agent-2"));
        let me = uid("agent-1");

        assert!(authz.authorize_ticket(Role::SupportStaff, &me, &other, actions::READ).authorized);
        assert!(!authz.authorize_ticket(Role::SupportStaff, &me, &other, actions::UPDATE).authorized);

        let mine = ticket("alice", Some("agent-1"));
        assert!(authz.authorize_ticket(Role::SupportStaff, &me, &mine, actions::UPDATE).authorized);
        assert!(authz.authorize_ticket(Role::SupportStaff, &me, &mine, actions::COMMENT).authorized);
        assert!(!authz.authorize_ticket(Role::SupportStaff, &me, &mine, actions::ASSIGN).authorized);
    }

    #[test]
    fn test_manager_and_admin_tickets() {
        let authz = Authorizer::default();
        let t = ticket("alice", Some("agent-2"));
        assert!(authz.authorize_ticket(Role::SupportManager, &uid("m"), &t, actions::ASSIGN).authorized);
        assert!(!authz.authorize_ticket(Role::SupportManager, &uid("m"), &t, actions::COMMENT).authorized);
        assert!(authz.authorize_ticket(Role::Admin, &uid("root"), &t, actions::COMMENT).authorized);
    }

    #[test]
    fn test_user_accounts() {
        let authz = Authorizer::default();
        let staff = UserProfile::new(uid("s-1"), Role::SupportStaff);
        let admin = UserProfile::new(uid("a-1"), Role::Admin);
        let alice = UserProfile::new(uid("alice"), Role::EndUser);

        assert!(authz.authorize_user(Role::SupportManager, &uid("m"), &staff, actions::UPDATE).authorized);
        assert!(!authz.authorize_user(Role::SupportManager, &uid("m"), &admin, actions::UPDATE).authorized);

        assert!(authz.authorize_user(Role::SupportStaff, &uid("s-2"), &alice, actions::READ).authorized);
        assert!(!authz.authorize_user(Role::SupportStaff, &uid("s-1"), &staff, actions::UPDATE).authorized);

        assert!(authz.authorize_user(Role::EndUser, &uid("alice"), &alice, actions::UPDATE).authorized);
        assert!(!authz.authorize_user(Role::EndUser, &uid("bob"), &alice, actions::READ).authorized);

        assert!(authz.authorize_user(Role::Admin, &uid("a-2"), &admin, actions::DELETE).authorized);
    }

    #[test]
    fn test_manager_cannot_touch_end_users() {
        let authz = Authorizer::default();
        let alice = UserProfile::new(uid("alice"), Role::EndUser);
        // manager user grants are scoped to staff targets
        let result = authz.authorize_user(Role::SupportManager, &uid("m"), &alice, actions::READ);
        assert_eq!(result, AuthzResult::deny(DenialReason::NoPermission));
    }

    #[test]
    fn test_authorize_raw_fails_closed() {
        let authz = Authorizer::default();
        let ctx = PermissionContext::new();

        let result = authz.authorize_raw("SUPERUSER", resources::TICKETS, actions::READ, &ctx);
        assert_eq!(result, AuthzResult::deny(DenialReason::UnknownRole));

        let result = authz.authorize_raw("", resources::TICKETS, actions::READ, &ctx);
        assert!(!result.authorized);

        assert!(authz.authorize_raw("ADMIN", "anything", "anything", &ctx).authorized);
        assert!(authz.authorize_raw("support_staff", resources::TICKETS, actions::READ, &ctx).authorized);
    }

    #[test]
    fn test_denial_reason_display() {
        assert_eq!(DenialReason::RecordAccess.to_string(), "record not accessible");
        let json = serde_json::to_value(AuthzResult::deny(DenialReason::UnknownRole)).unwrap();
        assert_eq!(json["reason"], "unknown_role");
    }
}
