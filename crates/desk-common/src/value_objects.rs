//! Value Objects - Closed enums and identifiers shared by the triage core
//!
//! Every enum here is closed: adding a variant forces each `match` in the
//! workspace to be revisited. Names on the wire use `SCREAMING_SNAKE_CASE`.

use crate::error::{DeskError, DeskResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// Canonical form of an enum name: trimmed, upper case, `-`/space as `_`
fn normalize(raw: &str) -> String {
    raw.trim()
        .chars()
        .map(|c| match c {
            '-' | ' ' => '_',
            c => c.to_ascii_uppercase(),
        })
        .collect()
}

/// Breadth of effect of a reported problem
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Impact {
    Minor,
    Moderate,
    Major,
    Critical,
}

impl Impact {
    /// All impacts, least severe first
    pub const ALL: [Impact; 4] = [Self::Minor, Self::Moderate, Self::Major, Self::Critical];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Minor => "MINOR",
            Self::Moderate => "MODERATE",
            Self::Major => "MAJOR",
            Self::Critical => "CRITICAL",
        }
    }

    /// Parse, coercing anything unrecognised to the lowest severity
    pub fn parse_lenient(raw: &str) -> Self {
        raw.parse().unwrap_or_else(|_| {
            warn!(value = raw, "unrecognised impact, treating as MINOR");
            Self::Minor
        })
    }
}

impl FromStr for Impact {
    type Err = DeskError;

    fn from_str(s: &str) -> DeskResult<Self> {
        match normalize(s).as_str() {
            "MINOR" => Ok(Self::Minor),
            "MODERATE" => Ok(Self::Moderate),
            "MAJOR" => Ok(Self::Major),
            "CRITICAL" => Ok(Self::Critical),
            _ => Err(DeskError::UnknownImpact(s.to_string())),
        }
    }
}

/// How quickly the requester needs resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Urgency {
    Low,
    Normal,
    High,
    Immediate,
}

impl Urgency {
    /// All urgencies, least pressing first
    pub const ALL: [Urgency; 4] = [Self::Low, Self::Normal, Self::High, Self::Immediate];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Normal => "NORMAL",
            Self::High => "HIGH",
            Self::Immediate => "IMMEDIATE",
        }
    }

    /// Parse, coercing anything unrecognised to the lowest urgency
    pub fn parse_lenient(raw: &str) -> Self {
        raw.parse().unwrap_or_else(|_| {
            warn!(value = raw, "unrecognised urgency, treating as LOW");
            Self::Low
        })
    }
}

impl FromStr for Urgency {
    type Err = DeskError;

    fn from_str(s: &str) -> DeskResult<Self> {
        match normalize(s).as_str() {
            "LOW" => Ok(Self::Low),
            "NORMAL" => Ok(Self::Normal),
            "HIGH" => Ok(Self::High),
            "IMMEDIATE" => Ok(Self::Immediate),
            _ => Err(DeskError::UnknownUrgency(s.to_string())),
        }
    }
}

/// Derived queueing weight. Never set directly on a ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

impl Priority {
    pub const ALL: [Priority; 4] = [Self::Low, Self::Medium, Self::High, Self::Critical];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        }
    }
}

impl FromStr for Priority {
    type Err = DeskError;

    fn from_str(s: &str) -> DeskResult<Self> {
        match normalize(s).as_str() {
            "LOW" => Ok(Self::Low),
            "MEDIUM" => Ok(Self::Medium),
            "HIGH" => Ok(Self::High),
            "CRITICAL" => Ok(Self::Critical),
            _ => Err(DeskError::UnknownPriority(s.to_string())),
        }
    }
}

/// Service tier determining time budgets
///
/// Ordered from the loosest tier to the strictest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SlaLevel {
    Standard,
    Premium,
    CriticalSupport,
}

impl SlaLevel {
    pub const ALL: [SlaLevel; 3] = [Self::Standard, Self::Premium, Self::CriticalSupport];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "STANDARD",
            Self::Premium => "PREMIUM",
            Self::CriticalSupport => "CRITICAL_SUPPORT",
        }
    }
}

impl FromStr for SlaLevel {
    type Err = DeskError;

    fn from_str(s: &str) -> DeskResult<Self> {
        match normalize(s).as_str() {
            "STANDARD" => Ok(Self::Standard),
            "PREMIUM" => Ok(Self::Premium),
            "CRITICAL_SUPPORT" => Ok(Self::CriticalSupport),
            _ => Err(DeskError::UnknownSlaLevel(s.to_string())),
        }
    }
}

/// Actor's authorization class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    SupportManager,
    SupportStaff,
    EndUser,
}

impl Role {
    pub const ALL: [Role; 4] = [
        Self::Admin,
        Self::SupportManager,
        Self::SupportStaff,
        Self::EndUser,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::SupportManager => "SUPPORT_MANAGER",
            Self::SupportStaff => "SUPPORT_STAFF",
            Self::EndUser => "END_USER",
        }
    }

    /// Access precedence (higher wins)
    pub fn rank(&self) -> u8 {
        match self {
            Self::Admin => 3,
            Self::SupportManager => 2,
            Self::SupportStaff => 1,
            Self::EndUser => 0,
        }
    }

    /// Managers and admins: the roles trusted with critical work
    pub fn is_manager_tier(&self) -> bool {
        matches!(self, Self::Admin | Self::SupportManager)
    }
}

impl FromStr for Role {
    type Err = DeskError;

    fn from_str(s: &str) -> DeskResult<Self> {
        match normalize(s).as_str() {
            "ADMIN" => Ok(Self::Admin),
            "SUPPORT_MANAGER" => Ok(Self::SupportManager),
            "SUPPORT_STAFF" => Ok(Self::SupportStaff),
            "END_USER" => Ok(Self::EndUser),
            _ => Err(DeskError::UnknownRole(s.to_string())),
        }
    }
}

macro_rules! impl_display_as_str {
    ($($ty:ty),*) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }
        )*
    };
}

impl_display_as_str!(Impact, Urgency, Priority, SlaLevel, Role);

/// User identifier (Value Object)
///
/// # Invariants
/// - Non-empty after trimming
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Create new user ID
    pub fn new(id: impl Into<String>) -> DeskResult<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(DeskError::InvalidId("user id cannot be empty".into()));
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for UserId {
    type Error = DeskError;

    fn try_from(value: String) -> DeskResult<Self> {
        Self::new(value)
    }
}

impl From<UserId> for String {
    fn from(id: UserId) -> Self {
        id.0
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for UserId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for UserId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Ticket number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TicketId(u64);

impl TicketId {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub const fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
