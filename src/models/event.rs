//! Event domain model.
//!
//! Events are the primary calendar items: they carry a schedule
//! ([`EventDates`]), editorial metadata, and links to the planning items that
//! cover them. [`EventUpdates`] is the partial-update companion used when
//! editing; only the fields a user actually touched are present.

use std::path::Path;

use anyhow::{bail, Context};
use chrono::{DateTime, Duration, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::api::{EventId, PlanningId, RecurrenceId, UpdateMethod};
use crate::models::planning::PlanningItem;
use crate::models::recurrence::RecurrenceRule;

/// Editorial workflow state of an event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkflowState {
    #[default]
    Draft,
    Ingested,
    Scheduled,
    Killed,
    Cancelled,
    Rescheduled,
    Postponed,
}

impl WorkflowState {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkflowState::Draft => "draft",
            WorkflowState::Ingested => "ingested",
            WorkflowState::Scheduled => "scheduled",
            WorkflowState::Killed => "killed",
            WorkflowState::Cancelled => "cancelled",
            WorkflowState::Rescheduled => "rescheduled",
            WorkflowState::Postponed => "postponed",
        }
    }
}

/// Publication state. Present only once an event has been posted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostState {
    Usable,
    Cancelled,
}

impl PostState {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostState::Usable => "usable",
            PostState::Cancelled => "cancelled",
        }
    }
}

/// Where an event takes place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Editing lock held on an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemLock {
    pub user: String,
    pub session: String,
    pub action: String,
    pub time: DateTime<Utc>,
}

/// Schedule block of an event: instants in UTC plus the timezone the event is
/// planned in and, for series, the recurrence rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventDates {
    #[serde(default)]
    pub start: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end: Option<DateTime<Utc>>,
    #[serde(default = "default_tz")]
    pub tz: Tz,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurring_rule: Option<RecurrenceRule>,
}

fn default_tz() -> Tz {
    Tz::UTC
}

impl Default for EventDates {
    fn default() -> Self {
        Self {
            start: None,
            end: None,
            tz: Tz::UTC,
            recurring_rule: None,
        }
    }
}

impl EventDates {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>, tz: Tz) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
            tz,
            recurring_rule: None,
        }
    }

    /// Length of the event. Zero when either boundary is missing.
    pub fn duration(&self) -> Duration {
        match (self.start, self.end) {
            (Some(start), Some(end)) => end.signed_duration_since(start),
            _ => Duration::zero(),
        }
    }
}

/// A calendar event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventItem {
    pub id: EventId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slugline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub definition_short: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub definition_long: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internal_note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ednote: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub calendars: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occur_status: Option<String>,
    #[serde(default)]
    pub state: WorkflowState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pubstatus: Option<PostState>,
    /// Shared by every event of the same recurring series.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrence_id: Option<RecurrenceId>,
    #[serde(default)]
    pub dates: EventDates,
    #[serde(default)]
    pub time_to_be_confirmed: bool,
    /// Planning items covering this event, in creation order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub planning_ids: Vec<PlanningId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lock: Option<ItemLock>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,
}

impl EventItem {
    pub fn new<S: Into<String>>(id: EventId, name: S, dates: EventDates) -> Self {
        Self {
            id,
            name: name.into(),
            slugline: None,
            definition_short: None,
            definition_long: None,
            internal_note: None,
            ednote: None,
            links: Vec::new(),
            calendars: Vec::new(),
            location: None,
            occur_status: None,
            state: WorkflowState::Draft,
            pubstatus: None,
            recurrence_id: None,
            dates,
            time_to_be_confirmed: false,
            planning_ids: Vec::new(),
            lock: None,
            etag: None,
        }
    }

    /// An event is posted once it carries any publication state.
    pub fn is_posted(&self) -> bool {
        self.pubstatus.is_some()
    }

    pub fn is_recurring(&self) -> bool {
        self.recurrence_id.is_some()
    }
}

/// Partial update for an event. Fields left as `None` are untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventUpdates {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slugline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub definition_short: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub definition_long: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internal_note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ednote: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calendars: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occur_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dates: Option<EventDates>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_to_be_confirmed: Option<bool>,
    /// Which events of a series the update targets. Never written onto the
    /// stored event itself.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_method: Option<UpdateMethod>,
    /// Planning items as edited in the same session, existing and new ones.
    /// Carried alongside the event update, not applied by [`Self::apply_to`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub associated_plannings: Option<Vec<PlanningItem>>,
}

impl EventUpdates {
    /// Write every present field onto `event`. `update_method` and
    /// `associated_plannings` are routing data and stay off the event.
    pub fn apply_to(&self, event: &mut EventItem) {
        if let Some(name) = &self.name {
            event.name = name.clone();
        }
        if let Some(slugline) = &self.slugline {
            event.slugline = Some(slugline.clone());
        }
        if let Some(text) = &self.definition_short {
            event.definition_short = Some(text.clone());
        }
        if let Some(text) = &self.definition_long {
            event.definition_long = Some(text.clone());
        }
        if let Some(note) = &self.internal_note {
            event.internal_note = Some(note.clone());
        }
        if let Some(note) = &self.ednote {
            event.ednote = Some(note.clone());
        }
        if let Some(links) = &self.links {
            event.links = links.clone();
        }
        if let Some(calendars) = &self.calendars {
            event.calendars = calendars.clone();
        }
        if let Some(location) = &self.location {
            event.location = Some(location.clone());
        }
        if let Some(status) = &self.occur_status {
            event.occur_status = Some(status.clone());
        }
        if let Some(dates) = &self.dates {
            event.dates = dates.clone();
        }
        if let Some(tbc) = self.time_to_be_confirmed {
            event.time_to_be_confirmed = tbc;
        }
    }
}

/// Series-scoping predicate: whether `event` begins at or after `reference`.
/// An undated reference matches every event; an undated event matches only an
/// undated reference.
pub fn starts_on_or_after(event: &EventItem, reference: &EventItem) -> bool {
    match (event.dates.start, reference.dates.start) {
        (Some(event_start), Some(reference_start)) => event_start >= reference_start,
        (None, Some(_)) => false,
        (_, None) => true,
    }
}

/// Order events by start, earliest first. Events without a start sort last;
/// ties fall back to the id so the order is stable across runs.
pub fn sort_events_by_start(events: &mut [EventItem]) {
    events.sort_by(|a, b| match (a.dates.start, b.dates.start) {
        (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.id.cmp(&b.id)),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => a.id.cmp(&b.id),
    });
}

// ==================== JSON parsing ====================

/// Parse an event from a JSON string.
///
/// Deserialization errors report the path to the offending field, so a bad
/// nested value in a fixture or import is easy to locate.
///
/// # Arguments
/// * `json` - JSON document holding a single event
///
/// # Returns
/// The parsed event, or an error describing what was malformed or missing.
pub fn parse_event_json_str(json: &str) -> anyhow::Result<EventItem> {
    let mut deserializer = serde_json::Deserializer::from_str(json);
    let event: EventItem =
        serde_path_to_error::deserialize(&mut deserializer).context("Failed to parse event JSON")?;

    if event.id.value().is_empty() {
        bail!("Event is missing an id");
    }
    if event.name.is_empty() {
        bail!("Event is missing a name");
    }
    Ok(event)
}

/// Parse an event from a JSON file on disk.
pub fn parse_event_json(path: &Path) -> anyhow::Result<EventItem> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read event file: {}", path.display()))?;
    parse_event_json_str(&raw)
}
