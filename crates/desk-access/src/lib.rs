//! OpenDesk Access - role-based permissions for the help desk
//!
//! Two layers decide every request:
//! - **Resolver**: does any grant for the role cover resource, action and
//!   context? ADMIN always passes; no match means deny.
//! - **Gate**: does the actor's relationship to the concrete ticket or user
//!   account allow the action?
//!
//! [`Authorizer`] runs both and reports why a request was refused.
//!
//! ```
//! use desk_access::{actions, Authorizer};
//! use desk_common::{Role, TicketOwnership, UserId};
//!
//! let agent = UserId::new("agent-1").unwrap();
//! let ticket = TicketOwnership {
//!     requester_id: UserId::new("alice").unwrap(),
//!     assigned_to_id: Some(UserId::new("agent-2").unwrap()),
//! };
//!
//! let authz = Authorizer::default();
//! assert!(authz.authorize_ticket(Role::SupportStaff, &agent, &ticket, actions::READ).authorized);
//! assert!(!authz.authorize_ticket(Role::SupportStaff, &agent, &ticket, actions::UPDATE).authorized);
//! ```

pub mod authorizer;
pub mod catalog;
pub mod gate;
pub mod permission;
pub mod resolver;

pub use authorizer::{AuthzResult, Authorizer, DenialReason};
pub use catalog::PermissionCatalog;
pub use gate::{can_access_ticket, can_access_user};
pub use permission::{
    actions, resources, ActionSet, ConditionKey, Permission, PermissionContext, ResourceScope, SELF_VALUE, WILDCARD,
};
pub use resolver::{has_permission, PermissionResolver};
