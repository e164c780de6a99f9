//! SLA Status Evaluator

use crate::policy::{SlaPolicy, TierPolicy};
use chrono::{DateTime, Duration, TimeZone};
use desk_common::SlaLevel;
use serde::{Deserialize, Serialize};

/// Traffic-light view of an SLA clock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlaColor {
    Green,
    Yellow,
    Red,
}

impl SlaColor {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Red => "red",
        }
    }
}

impl std::fmt::Display for SlaColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Breach / warning state of a ticket at a given instant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlaStatus {
    pub is_breached: bool,
    pub is_approaching_breach: bool,
    /// Whole hours left, rounded up, never negative
    pub time_remaining_hours: i64,
    pub status: SlaColor,
}

impl SlaStatus {
    /// Classify a raw (unfloored) remaining-hours figure against a tier
    pub fn from_remaining(remaining_hours: i64, tier: &TierPolicy) -> Self {
        let is_breached = remaining_hours <= 0;
        let status = if is_breached || remaining_hours <= tier.critical_hours {
            SlaColor::Red
        } else if remaining_hours <= tier.warning_hours {
            SlaColor::Yellow
        } else {
            SlaColor::Green
        };

        Self {
            is_breached,
            is_approaching_breach: !is_breached && remaining_hours <= tier.warning_hours,
            time_remaining_hours: remaining_hours.max(0),
            status,
        }
    }
}

/// `ceil((due_date - now) / 1h)`, negative once overdue
pub fn remaining_hours<Tz: TimeZone, Tz2: TimeZone>(due_date: &DateTime<Tz>, now: &DateTime<Tz2>) -> i64 {
    let delta = due_date.clone().signed_duration_since(now.clone());
    // num_hours truncates toward zero, which is already the ceiling below zero
    let hours = delta.num_hours();
    if delta > Duration::hours(hours) {
        hours + 1
    } else {
        hours
    }
}

/// Evaluate a ticket's SLA clock with the default thresholds
pub fn evaluate_sla_status<Tz: TimeZone, Tz2: TimeZone>(
    due_date: &DateTime<Tz>,
    level: SlaLevel,
    now: &DateTime<Tz2>,
) -> SlaStatus {
    SlaPolicy::default_ref().evaluate(due_date, level, now)
}

impl SlaPolicy {
    /// Evaluate a ticket's SLA clock with this policy's thresholds
    pub fn evaluate<Tz: TimeZone, Tz2: TimeZone>(
        &self,
        due_date: &DateTime<Tz>,
        level: SlaLevel,
        now: &DateTime<Tz2>,
    ) -> SlaStatus {
        SlaStatus::from_remaining(remaining_hours(due_date, now), self.tier(level))
    }
}
