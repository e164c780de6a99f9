//! SLA policy configuration
//!
//! Defaults are the desk's published service tiers. A deployment may
//! override them with a TOML document:
//!
//! ```toml
//! [business_hours]
//! open_hour = 8
//! close_hour = 18
//! working_days = ["Mon", "Tue", "Wed", "Thu", "Fri"]
//! utc_offset_minutes = 60
//!
//! [premium]
//! budget_hours = 12
//! warning_hours = 6
//! critical_hours = 2
//! ```
//!
//! Omitted tables keep their defaults.

use crate::calendar::BusinessHours;
use crate::{Result, SlaError};
use chrono::{DateTime, TimeZone, Utc};
use desk_common::SlaLevel;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;
use tracing::info;

/// Time budget and alert thresholds for one SLA tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierPolicy {
    /// Business hours until the ticket is due
    pub budget_hours: u32,
    /// Remaining hours at or below which the ticket turns yellow
    pub warning_hours: i64,
    /// Remaining hours at or below which the ticket turns red
    pub critical_hours: i64,
}

impl TierPolicy {
    pub const fn new(budget_hours: u32, warning_hours: i64, critical_hours: i64) -> Self {
        Self {
            budget_hours,
            warning_hours,
            critical_hours,
        }
    }
}

/// Full SLA configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlaPolicy {
    pub business_hours: BusinessHours,
    pub standard: TierPolicy,
    pub premium: TierPolicy,
    pub critical_support: TierPolicy,
}

impl Default for SlaPolicy {
    fn default() -> Self {
        Self {
            business_hours: BusinessHours::default(),
            standard: TierPolicy::new(40, 24, 4),
            premium: TierPolicy::new(16, 8, 2),
            critical_support: TierPolicy::new(4, 2, 1),
        }
    }
}

impl SlaPolicy {
    /// Shared default policy, built on first use
    pub fn default_ref() -> &'static SlaPolicy {
        static DEFAULT: OnceLock<SlaPolicy> = OnceLock::new();
        DEFAULT.get_or_init(SlaPolicy::default)
    }

    /// Parse and validate a TOML policy document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let policy: SlaPolicy = toml::from_str(content)?;
        policy.validate()?;
        Ok(policy)
    }

    /// Load a policy file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let policy = Self::from_toml_str(&content)?;
        info!(path = %path.display(), "loaded SLA policy");
        Ok(policy)
    }

    /// Reject configurations the calculators cannot honour
    pub fn validate(&self) -> Result<()> {
        let hours = &self.business_hours;
        if hours.open_hour >= hours.close_hour || hours.close_hour > 24 {
            return Err(SlaError::InvalidPolicy(format!(
                "business window {}..{} is empty or exceeds a day",
                hours.open_hour, hours.close_hour
            )));
        }
        if hours.working_days.is_empty() {
            return Err(SlaError::InvalidPolicy("no working days".into()));
        }
        if hours.utc_offset_minutes.unsigned_abs() >= 24 * 60 {
            return Err(SlaError::InvalidPolicy(format!(
                "utc offset {} minutes out of range",
                hours.utc_offset_minutes
            )));
        }

        for level in SlaLevel::ALL {
            let tier = self.tier(level);
            if tier.budget_hours == 0 {
                return Err(SlaError::InvalidPolicy(format!("{level}: zero budget")));
            }
            if tier.critical_hours > tier.warning_hours {
                return Err(SlaError::InvalidPolicy(format!(
                    "{level}: critical threshold {}h above warning threshold {}h",
                    tier.critical_hours, tier.warning_hours
                )));
            }
        }

        Ok(())
    }

    /// Tier settings for a level
    pub fn tier(&self, level: SlaLevel) -> &TierPolicy {
        match level {
            SlaLevel::Standard => &self.standard,
            SlaLevel::Premium => &self.premium,
            SlaLevel::CriticalSupport => &self.critical_support,
        }
    }

    /// Due date evaluated in `created_at`'s own time zone
    pub fn due_date_in<Tz: TimeZone>(&self, level: SlaLevel, created_at: &DateTime<Tz>) -> DateTime<Tz> {
        self.business_hours
            .advance(created_at, self.tier(level).budget_hours)
    }

    /// Due date for a UTC instant, evaluated on the desk's local clock
    pub fn due_date(&self, level: SlaLevel, created_at: DateTime<Utc>) -> DateTime<Utc> {
        self.business_hours
            .advance_utc(created_at, self.tier(level).budget_hours)
    }
}

/// Due date under the default policy, evaluated in `created_at`'s own zone
///
/// `CRITICAL_SUPPORT` gets 4 business hours, `PREMIUM` 16, `STANDARD` 40.
pub fn compute_due_date<Tz: TimeZone>(level: SlaLevel, created_at: &DateTime<Tz>) -> DateTime<Tz> {
    SlaPolicy::default_ref().due_date_in(level, created_at)
}
