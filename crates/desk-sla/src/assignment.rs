//! Assignment Balancer
//!
//! Picks the least-loaded eligible staff member for a ticket. Workload counts
//! are a snapshot supplied by the caller; two concurrent triages may pick the
//! same person.

use desk_common::{Priority, Role, SlaLevel, UserId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::debug;

/// Staff member offered by the roster provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffCandidate {
    pub id: UserId,
    pub roles: BTreeSet<Role>,
    pub current_workload: u32,
}

impl StaffCandidate {
    pub fn new(id: UserId, roles: impl IntoIterator<Item = Role>, current_workload: u32) -> Self {
        Self {
            id,
            roles: roles.into_iter().collect(),
            current_workload,
        }
    }

    pub fn has_any_role(&self, roles: &[Role]) -> bool {
        roles.iter().any(|r| self.roles.contains(r))
    }

    pub fn is_manager_tier(&self) -> bool {
        self.roles.iter().any(Role::is_manager_tier)
    }
}

/// Outcome of a balancing run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub assignee_id: UserId,
    /// Nobody met the tier's role requirement; the whole roster was used
    pub via_fallback: bool,
    /// A manager or admin was preferred for a critical ticket
    pub manager_preferred: bool,
}

const CRITICAL_SUPPORT_ROLES: &[Role] = &[Role::SupportManager, Role::Admin];
const PREMIUM_ROLES: &[Role] = &[Role::SupportManager, Role::Admin, Role::SupportStaff];

/// Roles allowed to hold a ticket of the given tier (`None` = anyone)
pub fn eligible_roles(level: SlaLevel) -> Option<&'static [Role]> {
    match level {
        SlaLevel::CriticalSupport => Some(CRITICAL_SUPPORT_ROLES),
        SlaLevel::Premium => Some(PREMIUM_ROLES),
        SlaLevel::Standard => None,
    }
}

/// Choose an assignee, reporting how the choice was made
///
/// Equal workloads resolve to the earlier roster entry.
pub fn plan_assignment(
    priority: Priority,
    level: SlaLevel,
    candidates: &[StaffCandidate],
) -> Option<Assignment> {
    if candidates.is_empty() {
        return None;
    }

    let mut pool: Vec<&StaffCandidate> = match eligible_roles(level) {
        Some(roles) => candidates.iter().filter(|c| c.has_any_role(roles)).collect(),
        None => candidates.iter().collect(),
    };

    let via_fallback = pool.is_empty();
    if via_fallback {
        debug!(%level, roster = candidates.len(), "no eligible staff, falling back to full roster");
        pool = candidates.iter().collect();
    }

    // Stable: ties keep roster order
    pool.sort_by_key(|c| c.current_workload);

    let manager = match priority {
        Priority::Critical => pool.iter().copied().find(|c| c.is_manager_tier()),
        _ => None,
    };
    let manager_preferred = manager.is_some();
    let chosen = manager.or_else(|| pool.first().copied())?;

    debug!(
        assignee = %chosen.id,
        workload = chosen.current_workload,
        %priority,
        %level,
        via_fallback,
        manager_preferred,
        "ticket auto-assigned"
    );

    Some(Assignment {
        assignee_id: chosen.id.clone(),
        via_fallback,
        manager_preferred,
    })
}

/// Choose an assignee id, or `None` for an empty roster
pub fn auto_assign(priority: Priority, level: SlaLevel, candidates: &[StaffCandidate]) -> Option<UserId> {
    plan_assignment(priority, level, candidates).map(|a| a.assignee_id)
}
