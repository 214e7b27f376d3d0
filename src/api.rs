//! Public API surface for the planning core.
//!
//! This file consolidates the identifier newtypes and shared enums used across
//! the crate, plus re-exports of the DTO types. All types derive
//! Serialize/Deserialize for JSON serialization.

pub use crate::models::event::{
    EventDates, EventItem, EventUpdates, ItemLock, Location, PostState, WorkflowState,
};
pub use crate::models::planning::{Agenda, CoverageSummary, PlanningItem};
pub use crate::models::recurrence::{Frequency, RecurrenceRule, RepeatEnd, RuleWeekday};
pub use crate::services::expansion::RecurringExpansion;
pub use crate::services::recurring::RecurringOverview;
pub use crate::services::schedule::ScheduleDraft;
pub use crate::services::update_scope::UpdateScopeSummary;

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Prefix marking identifiers of items that exist only in an editing session
/// and have not been persisted yet.
pub const TEMP_ID_PREFIX: &str = "tmp_";

static NEXT_TEMP_ID: AtomicU64 = AtomicU64::new(1);

/// Mint a fresh temporary planning identifier (`tmp_<n>`).
///
/// Temporary identifiers are unique within the process and are replaced by
/// store-assigned identifiers when the item is persisted.
pub fn next_temp_planning_id() -> PlanningId {
    let n = NEXT_TEMP_ID.fetch_add(1, Ordering::Relaxed);
    PlanningId::new(format!("{}{}", TEMP_ID_PREFIX, n))
}

/// Event identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EventId(pub String);

/// Planning item identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlanningId(pub String);

/// Coverage identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CoverageId(pub String);

/// Agenda identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AgendaId(pub String);

/// Identifier shared by every occurrence of one recurring series.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RecurrenceId(pub String);

impl EventId {
    pub fn new<S: Into<String>>(value: S) -> Self {
        EventId(value.into())
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl PlanningId {
    pub fn new<S: Into<String>>(value: S) -> Self {
        PlanningId(value.into())
    }

    pub fn value(&self) -> &str {
        &self.0
    }

    /// Whether this identifier was minted for an unsaved editing-session item.
    pub fn is_temporary(&self) -> bool {
        self.0.starts_with(TEMP_ID_PREFIX)
    }
}

impl CoverageId {
    pub fn new<S: Into<String>>(value: S) -> Self {
        CoverageId(value.into())
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl AgendaId {
    pub fn new<S: Into<String>>(value: S) -> Self {
        AgendaId(value.into())
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl RecurrenceId {
    pub fn new<S: Into<String>>(value: S) -> Self {
        RecurrenceId(value.into())
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl std::fmt::Display for PlanningId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl std::fmt::Display for CoverageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl std::fmt::Display for AgendaId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl std::fmt::Display for RecurrenceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<EventId> for String {
    fn from(id: EventId) -> Self {
        id.0
    }
}

/// Scope of a change against a recurring series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdateMethod {
    /// Only the edited occurrence.
    #[default]
    Single,
    /// The edited occurrence and every occurrence starting on or after it.
    Future,
    /// Every occurrence in the series.
    All,
}

impl UpdateMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            UpdateMethod::Single => "single",
            UpdateMethod::Future => "future",
            UpdateMethod::All => "all",
        }
    }

    /// Parse an update method from its wire representation.
    ///
    /// # Arguments
    /// * `s` - String representation ("single", "future", "all")
    ///
    /// # Returns
    /// * `Ok(UpdateMethod)` if valid
    /// * `Err` if invalid
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "single" => Ok(Self::Single),
            "future" => Ok(Self::Future),
            "all" => Ok(Self::All),
            _ => Err(format!("Unknown update method: {}", s)),
        }
    }
}

impl std::fmt::Display for UpdateMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temp_planning_ids_are_unique_and_prefixed() {
        let a = next_temp_planning_id();
        let b = next_temp_planning_id();
        assert_ne!(a, b);
        assert!(a.is_temporary());
        assert!(b.value().starts_with(TEMP_ID_PREFIX));
    }

    #[test]
    fn test_persisted_ids_are_not_temporary() {
        assert!(!PlanningId::new("plan_9").is_temporary());
        assert!(PlanningId::new("tmp_1").is_temporary());
    }

    #[test]
    fn test_update_method_from_str() {
        assert_eq!(UpdateMethod::from_str("single").unwrap(), UpdateMethod::Single);
        assert_eq!(UpdateMethod::from_str("FUTURE").unwrap(), UpdateMethod::Future);
        assert_eq!(UpdateMethod::from_str("all").unwrap(), UpdateMethod::All);
        assert!(UpdateMethod::from_str("everything").is_err());
    }

    #[test]
    fn test_update_method_serde_round_trip() {
        let json = serde_json::to_string(&UpdateMethod::Future).unwrap();
        assert_eq!(json, "\"future\"");
        let back: UpdateMethod = serde_json::from_str(&json).unwrap();
        assert_eq!(back, UpdateMethod::Future);
    }

    #[test]
    fn test_event_id_display() {
        let id = EventId::new("event_42");
        assert_eq!(format!("{}", id), "event_42");
        assert_eq!(id.value(), "event_42");
    }
}
