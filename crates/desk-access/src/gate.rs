//! Access Gate - record-level checks layered over role permissions
//!
//! Precedence is ADMIN > SUPPORT_MANAGER > SUPPORT_STAFF > END_USER. Staff
//! may always read; end users only touch what they own.

use crate::permission::actions;
use desk_common::{Role, TicketRecord, UserId, UserRecord};
use tracing::debug;

/// Whether the actor may perform `action` on this ticket
pub fn can_access_ticket<T: TicketRecord + ?Sized>(
    role: Role,
    actor_id: &UserId,
    ticket: &T,
    action: &str,
) -> bool {
    let allowed = match role {
        Role::Admin | Role::SupportManager => true,
        Role::SupportStaff => action == actions::READ || ticket.assigned_to_id() == Some(actor_id),
        Role::EndUser => ticket.requester_id() == actor_id,
    };

    if !allowed {
        debug!(%role, actor = %actor_id, action, "ticket access denied");
    }
    allowed
}

/// Whether the actor may perform `action` on the target account
pub fn can_access_user<U: UserRecord + ?Sized>(
    role: Role,
    actor_id: &UserId,
    target: &U,
    action: &str,
) -> bool {
    let allowed = match role {
        Role::Admin => true,
        Role::SupportManager => target.role() == Role::SupportStaff,
        Role::SupportStaff => action == actions::READ,
        Role::EndUser => target.id() == actor_id,
    };

    if !allowed {
        debug!(%role, actor = %actor_id, target = %target.id(), action, "user access denied");
    }
    allowed
}

#[cfg(test)]
mod tests {
    use super::*;
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
    fn test_managers_and_admins_see_every_ticket() {
        let t = ticket("customer", Some("agent"));
        for role in [Role::Admin, Role::SupportManager] {
            for action in [actions::READ, actions::UPDATE, actions::DELETE] {
                assert!(can_access_ticket(role, &uid("someone"), &t, action));
            }
        }
    }

    #[test]
    fn test_staff_ticket_access() {
        let assigned_to_other = ticket("customer", Some("other-agent"));
        let me = uid("agent");
        assert!(!can_access_ticket(Role::SupportStaff, &me, &assigned_to_other, actions::UPDATE));
        assert!(can_access_ticket(Role::SupportStaff, &me, &assigned_to_other, actions::READ));

        let mine = ticket("customer", Some("agent"));
        assert!(can_access_ticket(Role::SupportStaff, &me, &mine, actions::UPDATE));

        let unassigned = ticket("customer", None);
        assert!(!can_access_ticket(Role::SupportStaff, &me, &unassigned, actions::COMMENT));
    }

    #[test]
    fn test_end_user_ticket_access() {
        let t = ticket("customer", Some("agent"));
        assert!(can_access_ticket(Role::EndUser, &uid("customer"), &t, actions::UPDATE));
        assert!(!can_access_ticket(Role::EndUser, &uid("stranger"), &t, actions::READ));
        // being the assignee grants nothing to an end user
        assert!(!can_access_ticket(Role::EndUser, &uid("agent"), &t, actions::READ));
    }

    #[test]
    fn test_user_access() {
        let staff = UserProfile::new(uid("s-1"), Role::SupportStaff);
        let admin = UserProfile::new(uid("a-1"), Role::Admin);
        let customer = UserProfile::new(uid("c-1"), Role::EndUser);

        assert!(can_access_user(Role::Admin, &uid("a-2"), &admin, actions::DELETE));

        assert!(can_access_user(Role::SupportManager, &uid("m-1"), &staff, actions::UPDATE));
        assert!(!can_access_user(Role::SupportManager, &uid("m-1"), &admin, actions::READ));
        assert!(!can_access_user(Role::SupportManager, &uid("m-1"), &customer, actions::READ));

        assert!(can_access_user(Role::SupportStaff, &uid("s-2"), &customer, actions::READ));
        assert!(!can_access_user(Role::SupportStaff, &uid("s-1"), &staff, actions::UPDATE));

        assert!(can_access_user(Role::EndUser, &uid("c-1"), &customer, actions::UPDATE));
        assert!(!can_access_user(Role::EndUser, &uid("c-2"), &customer, actions::READ));
    }
}
