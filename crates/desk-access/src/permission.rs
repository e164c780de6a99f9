//! Permission grants and request context
//!
//! A grant names a resource (or `*`), a set of actions (or `*`) and optional
//! conditions. Conditions compare typed keys against exact string values.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Wildcard token for resources and actions
pub const WILDCARD: &str = "*";

/// Known resource names
pub mod resources {
    pub const TICKETS: &str = "tickets";
    pub const USERS: &str = "users";
    pub const REPORTS: &str = "reports";
    pub const CATEGORIES: &str = "categories";
}

/// Known action names
pub mod actions {
    pub const READ: &str = "read";
    pub const CREATE: &str = "create";
    pub const UPDATE: &str = "update";
    pub const DELETE: &str = "delete";
    pub const ASSIGN: &str = "assign";
    pub const COMMENT: &str = "comment";
}

/// Value a condition compares against the actor itself
pub const SELF_VALUE: &str = "self";

/// Context keys a grant may constrain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConditionKey {
    /// `"self"` when the ticket is assigned to the actor
    AssignedTo,
    /// `"self"` when the actor raised the ticket
    Requester,
    /// Role name of the user being acted on
    TargetRole,
    /// `"self"` when the user being acted on is the actor
    Id,
    /// Report depth requested
    Scope,
}

impl ConditionKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AssignedTo => "assignedTo",
            Self::Requester => "requester",
            Self::TargetRole => "targetRole",
            Self::Id => "id",
            Self::Scope => "scope",
        }
    }
}

impl fmt::Display for ConditionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Facts about a request, keyed like grant conditions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionContext(BTreeMap<ConditionKey, String>);

impl PermissionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: ConditionKey, value: impl Into<String>) -> Self {
        self.0.insert(key, value.into());
        self
    }

    pub fn insert(&mut self, key: ConditionKey, value: impl Into<String>) {
        self.0.insert(key, value.into());
    }

    pub fn get(&self, key: ConditionKey) -> Option<&str> {
        self.0.get(&key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(ConditionKey, String)> for PermissionContext {
    fn from_iter<I: IntoIterator<Item = (ConditionKey, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Resource a grant applies to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ResourceScope {
    Any,
    Named(String),
}

impl ResourceScope {
    pub fn covers(&self, resource: &str) -> bool {
        match self {
            Self::Any => true,
            Self::Named(name) => name == resource,
        }
    }
}

impl From<&str> for ResourceScope {
    fn from(raw: &str) -> Self {
        match raw.trim() {
            WILDCARD => Self::Any,
            name => Self::Named(name.to_string()),
        }
    }
}

impl From<String> for ResourceScope {
    fn from(raw: String) -> Self {
        Self::from(raw.as_str())
    }
}

impl From<ResourceScope> for String {
    fn from(scope: ResourceScope) -> Self {
        match scope {
            ResourceScope::Any => WILDCARD.to_string(),
            ResourceScope::Named(name) => name,
        }
    }
}

/// Actions a grant allows, parsed from a comma list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ActionSet {
    Any,
    List(Vec<String>),
}

impl ActionSet {
    pub fn covers(&self, action: &str) -> bool {
        match self {
            Self::Any => true,
            Self::List(list) => list.iter().any(|a| a == action),
        }
    }
}

impl From<&str> for ActionSet {
    fn from(raw: &str) -> Self {
        let list: Vec<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .map(str::to_string)
            .collect();
        if list.iter().any(|a| a == WILDCARD) {
            Self::Any
        } else {
            Self::List(list)
        }
    }
}

impl From<String> for ActionSet {
    fn from(raw: String) -> Self {
        Self::from(raw.as_str())
    }
}

impl From<ActionSet> for String {
    fn from(set: ActionSet) -> Self {
        match set {
            ActionSet::Any => WILDCARD.to_string(),
            ActionSet::List(list) => list.join(","),
        }
    }
}

/// A single grant attached to a role
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    pub id: String,
    pub name: String,
    pub description: String,
    pub resource: ResourceScope,
    pub action: ActionSet,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub conditions: BTreeMap<ConditionKey, String>,
}

impl Permission {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        resource: &str,
        action: &str,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            resource: ResourceScope::from(resource),
            action: ActionSet::from(action),
            conditions: BTreeMap::new(),
        }
    }

    /// Add a condition the request context must satisfy
    pub fn when(mut self, key: ConditionKey, value: impl Into<String>) -> Self {
        self.conditions.insert(key, value.into());
        self
    }

    /// Unrestricted grant over every resource and action
    pub fn is_wildcard(&self) -> bool {
        self.resource == ResourceScope::Any && self.action == ActionSet::Any && self.conditions.is_empty()
    }

    /// Whether this grant covers the request
    ///
    /// Every condition key must be present in `ctx` with an identical value.
    pub fn matches(&self, resource: &str, action: &str, ctx: &PermissionContext) -> bool {
        self.resource.covers(resource)
            && self.action.covers(action)
            && self
                .conditions
                .iter()
                .all(|(key, want)| ctx.get(*key) == Some(want.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_list_parsing() {
        assert_eq!(
            ActionSet::from("read, update,,comment"),
            ActionSet::List(vec!["read".into(), "update".into(), "comment".into()])
        );
        assert_eq!(ActionSet::from("*"), ActionSet::Any);
        assert_eq!(ActionSet::from("read,*"), ActionSet::Any);
        assert!(!ActionSet::from("").covers("read"));
    }

    #[test]
    fn test_resource_scope() {
        assert!(ResourceScope::from("*").covers("anything"));
        assert!(ResourceScope::from("tickets").covers("tickets"));
        assert!(!ResourceScope::from("tickets").covers("ticket"));
    }

    #[test]
    fn test_conditions_require_exact_values() {
        let grant = Permission::new("p", "P", "", "tickets", "read").when(ConditionKey::Requester, "self");

        let own = PermissionContext::new().with(ConditionKey::Requester, "self");
        assert!(grant.matches("tickets", "read", &own));

        let missing = PermissionContext::new();
        assert!(!grant.matches("tickets", "read", &missing));

        let case = PermissionContext::new().with(ConditionKey::Requester, "SELF");
        assert!(!grant.matches("tickets", "read", &case));

        let other_key = PermissionContext::new().with(ConditionKey::AssignedTo, "self");
        assert!(!grant.matches("tickets", "read", &other_key));
    }

    #[test]
    fn test_extra_context_is_ignored() {
        let grant = Permission::new("p", "P", "", "users", "read");
        let ctx = PermissionContext::new()
            .with(ConditionKey::Id, "self")
            .with(ConditionKey::Scope, "basic");
        assert!(grant.matches("users", "read", &ctx));
    }

    #[test]
    fn test_permission_serde_shape() {
        let grant = Permission::new("staff-reports", "Basic reports", "", "reports", "read")
            .when(ConditionKey::Scope, "basic");
        let json = serde_json::to_value(&grant).unwrap();
        assert_eq!(json["resource"], "reports");
        assert_eq!(json["action"], "read");
        assert_eq!(json["conditions"]["scope"], "basic");

        let back: Permission = serde_json::from_value(json).unwrap();
        assert_eq!(back, grant);
    }
}
