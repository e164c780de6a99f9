//! Permission Catalog
//!
//! Static role → grant table. Built once per process and never mutated.

use crate::permission::{actions, resources, ConditionKey, Permission, SELF_VALUE, WILDCARD};
use desk_common::Role;
use serde::Serialize;
use std::sync::OnceLock;

/// Ordered grant lists for every role
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PermissionCatalog {
    admin: Vec<Permission>,
    support_manager: Vec<Permission>,
    support_staff: Vec<Permission>,
    end_user: Vec<Permission>,
}

impl PermissionCatalog {
    /// The desk's standard grants
    pub fn builtin() -> Self {
        Self {
            admin: vec![Permission::new(
                "admin-all",
                "Full access",
                "Administrators may do anything",
                WILDCARD,
                WILDCARD,
            )],

            support_manager: vec![
                Permission::new(
                    "manager-tickets",
                    "Manage tickets",
                    "Read, create, update, delete and assign any ticket",
                    resources::TICKETS,
                    "read,create,update,delete,assign",
                ),
                Permission::new(
                    "manager-staff-users",
                    "Manage support staff",
                    "Read and update support staff accounts",
                    resources::USERS,
                    "read,update",
                )
                .when(ConditionKey::TargetRole, Role::SupportStaff.as_str()),
                Permission::new(
                    "manager-reports",
                    "View reports",
                    "Read all reports",
                    resources::REPORTS,
                    actions::READ,
                ),
                Permission::new(
                    "manager-categories",
                    "Manage categories",
                    "Read, create and update ticket categories",
                    resources::CATEGORIES,
                    "read,create,update",
                ),
            ],

            support_staff: vec![
                Permission::new(
                    "staff-assigned-tickets",
                    "Work assigned tickets",
                    "Read, update and comment on tickets assigned to self",
                    resources::TICKETS,
                    "read,update,comment",
                )
                .when(ConditionKey::AssignedTo, SELF_VALUE),
                Permission::new(
                    "staff-read-tickets",
                    "Read tickets",
                    "Read any ticket",
                    resources::TICKETS,
                    actions::READ,
                ),
                Permission::new(
                    "staff-read-users",
                    "Read users",
                    "Read any user account",
                    resources::USERS,
                    actions::READ,
                ),
                Permission::new(
                    "staff-basic-reports",
                    "Basic reports",
                    "Read basic-scope reports",
                    resources::REPORTS,
                    actions::READ,
                )
                .when(ConditionKey::Scope, "basic"),
            ],

            end_user: vec![
                Permission::new(
                    "user-own-tickets",
                    "Own tickets",
                    "Read, create, update and comment on own tickets",
                    resources::TICKETS,
                    "read,create,update,comment",
                )
                .when(ConditionKey::Requester, SELF_VALUE),
                Permission::new(
                    "user-own-profile",
                    "Own profile",
                    "Read and update own account",
                    resources::USERS,
                    "read,update",
                )
                .when(ConditionKey::Id, SELF_VALUE),
            ],
        }
    }

    /// Process-wide builtin catalog
    pub fn global() -> &'static PermissionCatalog {
        static CATALOG: OnceLock<PermissionCatalog> = OnceLock::new();
        CATALOG.get_or_init(PermissionCatalog::builtin)
    }

    /// Grants for a role, in evaluation order
    pub fn permissions_for(&self, role: Role) -> &[Permission] {
        match role {
            Role::Admin => &self.admin,
            Role::SupportManager => &self.support_manager,
            Role::SupportStaff => &self.support_staff,
            Role::EndUser => &self.end_user,
        }
    }

    /// Look a grant up by id across all roles
    pub fn find(&self, id: &str) -> Option<(Role, &Permission)> {
        Role::ALL.into_iter().find_map(|role| {
            self.permissions_for(role)
                .iter()
                .find(|p| p.id == id)
                .map(|p| (role, p))
        })
    }
}

impl Default for PermissionCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_admin_is_single_wildcard() {
        let catalog = PermissionCatalog::builtin();
        let admin = catalog.permissions_for(Role::Admin);
        assert_eq!(admin.len(), 1);
        assert!(admin[0].is_wildcard());
    }

    #[test]
    fn test_only_admin_holds_wildcards() {
        let catalog = PermissionCatalog::builtin();
        for role in [Role::SupportManager, Role::SupportStaff, Role::EndUser] {
            assert!(
                catalog.permissions_for(role).iter().all(|p| !p.is_wildcard()),
                "{role} must not hold a wildcard grant"
            );
        }
    }

    #[test]
    fn test_permission_ids_unique() {
        let catalog = PermissionCatalog::builtin();
        let mut seen = HashSet::new();
        for role in Role::ALL {
            for p in catalog.permissions_for(role) {
                assert!(seen.insert(p.id.clone()), "duplicate id {}", p.id);
            }
        }
    }

    #[test]
    fn test_end_user_grants_are_self_scoped() {
        let catalog = PermissionCatalog::builtin();
        for p in catalog.permissions_for(Role::EndUser) {
            assert!(
                p.conditions.values().all(|v| v == SELF_VALUE) && !p.conditions.is_empty(),
                "{} is not self-scoped",
                p.id
            );
        }
    }

    #[test]
    fn test_find() {
        let catalog = PermissionCatalog::builtin();
        let (role, grant) = catalog.find("staff-basic-reports").unwrap();
        assert_eq!(role, Role::SupportStaff);
        assert_eq!(grant.conditions.get(&ConditionKey::Scope).map(String::as_str), Some("basic"));
        assert!(catalog.find("nope").is_none());
    }

    #[test]
    fn test_global_is_shared() {
        assert!(std::ptr::eq(PermissionCatalog::global(), PermissionCatalog::global()));
        assert_eq!(PermissionCatalog::global(), &PermissionCatalog::builtin());
    }
}
