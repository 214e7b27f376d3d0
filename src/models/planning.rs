//! Planning domain model.
//!
//! A planning item records the newsroom's intent to cover an event; each of
//! its coverages is one concrete piece of content (text, photo, video). New
//! planning items start life with a temporary id until the store assigns a
//! real one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::{AgendaId, CoverageId, EventId, PlanningId, RecurrenceId, UpdateMethod};

/// One coverage inside a planning item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageSummary {
    pub coverage_id: CoverageId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workflow_status: Option<String>,
}

impl CoverageSummary {
    pub fn new(coverage_id: CoverageId) -> Self {
        Self {
            coverage_id,
            content_type: None,
            workflow_status: None,
        }
    }
}

/// Intent to cover an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanningItem {
    pub id: PlanningId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_id: Option<EventId>,
    /// Shared by the planning copies spread across a recurring series.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub planning_recurrence_id: Option<RecurrenceId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slugline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub planning_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub coverages: Vec<CoverageSummary>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub agendas: Vec<AgendaId>,
    /// Which events of the series this planning's changes target. Routing
    /// data for submission, cleared once persisted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_method: Option<UpdateMethod>,
}

impl PlanningItem {
    pub fn new(id: PlanningId) -> Self {
        Self {
            id,
            event_id: None,
            planning_recurrence_id: None,
            slugline: None,
            planning_date: None,
            coverages: Vec::new(),
            agendas: Vec::new(),
            update_method: None,
        }
    }

    /// Whether this item has not been persisted yet.
    pub fn is_temporary(&self) -> bool {
        self.id.is_temporary()
    }

    /// Ids of all coverages, sorted so two sets compare independently of the
    /// order coverages were added in.
    pub fn coverage_ids(&self) -> Vec<CoverageId> {
        let mut ids: Vec<CoverageId> = self
            .coverages
            .iter()
            .map(|c| c.coverage_id.clone())
            .collect();
        ids.sort();
        ids
    }
}

/// Named bucket planning items are filed under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agenda {
    pub id: AgendaId,
    pub name: String,
    pub is_enabled: bool,
}

impl Agenda {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            id: AgendaId::new(""),
            name: name.into(),
            is_enabled: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::next_temp_planning_id;

    #[test]
    fn test_new_planning_is_empty() {
        let planning = PlanningItem::new(PlanningId::new("plan_1"));
        assert!(!planning.is_temporary());
        assert!(planning.coverages.is_empty());
        assert!(planning.update_method.is_none());
    }

    #[test]
    fn test_temp_planning_is_temporary() {
        let planning = PlanningItem::new(next_temp_planning_id());
        assert!(planning.is_temporary());
    }

    #[test]
    fn test_coverage_ids_are_sorted() {
        let mut planning = PlanningItem::new(PlanningId::new("plan_1"));
        planning.coverages = vec![
            CoverageSummary::new(CoverageId::new("cov_b")),
            CoverageSummary::new(CoverageId::new("cov_a")),
        ];
        let ids: Vec<_> = planning
            .coverage_ids()
            .into_iter()
            .map(|c| c.value().to_string())
            .collect();
        assert_eq!(ids, vec!["cov_a", "cov_b"]);
    }

    #[test]
    fn test_planning_serde_skips_empty_fields() {
        let planning = PlanningItem::new(PlanningId::new("plan_1"));
        let json = serde_json::to_value(&planning).unwrap();
        assert_eq!(json["id"], "plan_1");
        assert!(json.get("coverages").is_none());
        assert!(json.get("event_id").is_none());

        let back: PlanningItem = serde_json::from_value(json).unwrap();
        assert_eq!(back, planning);
    }
}
