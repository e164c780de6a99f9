//! Permission Resolver - role, resource, action, context → allow/deny

use crate::catalog::PermissionCatalog;
use crate::permission::PermissionContext;
use desk_common::Role;
use tracing::{debug, trace};

/// Evaluates requests against a catalog
///
/// Holds only a shared borrow, so one resolver may serve any number of
/// threads.
#[derive(Debug, Clone, Copy)]
pub struct PermissionResolver<'a> {
    catalog: &'a PermissionCatalog,
}

impl<'a> PermissionResolver<'a> {
    pub fn new(catalog: &'a PermissionCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &'a PermissionCatalog {
        self.catalog
    }

    /// Whether `role` may perform `action` on `resource`
    ///
    /// ADMIN is allowed unconditionally. Other roles need a grant whose
    /// resource, action and conditions all match; the first match wins and
    /// anything unmatched is denied.
    pub fn has_permission(&self, role: Role, resource: &str, action: &str, ctx: &PermissionContext) -> bool {
        if role == Role::Admin {
            return true;
        }

        match self
            .catalog
            .permissions_for(role)
            .iter()
            .find(|p| p.matches(resource, action, ctx))
        {
            Some(grant) => {
                trace!(%role, resource, action, grant = %grant.id, "permission granted");
                true
            }
            None => {
                debug!(%role, resource, action, "no matching permission");
                false
            }
        }
    }
}

impl Default for PermissionResolver<'static> {
    fn default() -> Self {
        Self::new(PermissionCatalog::global())
    }
}

/// Check a request against the builtin catalog
pub fn has_permission(role: Role, resource: &str, action: &str, ctx: &PermissionContext) -> bool {
    PermissionResolver::default().has_permission(role, resource, action, ctx)
}
