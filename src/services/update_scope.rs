//! Update-scope resolution for edits of recurring events.
//!
//! Before an edit of a recurring event is submitted, the editor needs to
//! know which questions to ask: does the event change itself spread across
//! the series, and which planning items will be created or modified along
//! the way? The answers come from comparing the pending update against the
//! state the editing session started from.

use std::collections::HashMap;

use crate::api::{CoverageId, PlanningId, UpdateMethod};
use crate::models::event::{EventItem, EventUpdates};

/// What an edit will touch once submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateScopeSummary {
    /// Whether the event edit itself needs an update-scope choice.
    pub event_prompt_needed: bool,
    /// Persisted recurring plannings whose coverage set changed.
    pub planning_to_update: Vec<PlanningId>,
    /// New planning items, still on temporary ids.
    pub planning_to_create: Vec<PlanningId>,
}

fn changed<T: PartialEq>(update: Option<&T>, original: Option<&T>) -> bool {
    match update {
        Some(value) => original != Some(value),
        None => false,
    }
}

/// Whether the update changes any event field that spreads across a series.
///
/// The schedule, the to-be-confirmed flag and the routing fields do not
/// count: dates never spread beyond the edited event, and the routing
/// fields describe how to save rather than what changed.
pub fn event_was_updated(original: &EventItem, updates: &EventUpdates) -> bool {
    changed(updates.name.as_ref(), Some(&original.name))
        || changed(updates.slugline.as_ref(), original.slugline.as_ref())
        || changed(
            updates.definition_short.as_ref(),
            original.definition_short.as_ref(),
        )
        || changed(
            updates.definition_long.as_ref(),
            original.definition_long.as_ref(),
        )
        || changed(updates.internal_note.as_ref(), original.internal_note.as_ref())
        || changed(updates.ednote.as_ref(), original.ednote.as_ref())
        || changed(updates.links.as_ref(), Some(&original.links))
        || changed(updates.calendars.as_ref(), Some(&original.calendars))
        || changed(updates.location.as_ref(), original.location.as_ref())
        || changed(updates.occur_status.as_ref(), original.occur_status.as_ref())
}

/// Persisted recurring planning items whose coverage set no longer matches
/// what was loaded when editing began. Comparison is by coverage id and
/// ignores ordering; items the editor never saw count as changed once they
/// carry any coverage.
pub fn get_recurring_planning_to_update(
    updates: &EventUpdates,
    stored_coverages: &HashMap<PlanningId, Vec<CoverageId>>,
) -> Vec<PlanningId> {
    updates
        .associated_plannings
        .iter()
        .flatten()
        .filter(|item| !item.is_temporary() && item.planning_recurrence_id.is_some())
        .filter(|item| {
            let current = item.coverage_ids();
            match stored_coverages.get(&item.id) {
                Some(stored) => {
                    let mut stored = stored.clone();
                    stored.sort();
                    stored != current
                }
                None => !current.is_empty(),
            }
        })
        .map(|item| item.id.clone())
        .collect()
}

/// Planning items of the update that have not been persisted yet.
pub fn get_recurring_planning_to_create(updates: &EventUpdates) -> Vec<PlanningId> {
    updates
        .associated_plannings
        .iter()
        .flatten()
        .filter(|item| item.is_temporary())
        .map(|item| item.id.clone())
        .collect()
}

/// Stamp the chosen update methods onto the update before submission.
///
/// The event-level method is always written. Planning items take the
/// caller's per-item choice; recurring and new items without one default to
/// [`UpdateMethod::Single`], everything else is left alone.
pub fn apply_update_methods(
    updates: &mut EventUpdates,
    event_method: UpdateMethod,
    selections: &HashMap<PlanningId, UpdateMethod>,
) {
    updates.update_method = Some(event_method);
    if let Some(plannings) = updates.associated_plannings.as_mut() {
        for item in plannings {
            if let Some(method) = selections.get(&item.id) {
                item.update_method = Some(*method);
            } else if item.update_method.is_none()
                && (item.is_temporary() || item.planning_recurrence_id.is_some())
            {
                item.update_method = Some(UpdateMethod::Single);
            }
        }
    }
}

/// Combine the individual checks into one summary for the editor.
pub fn resolve_update_scope(
    original: &EventItem,
    updates: &EventUpdates,
    stored_coverages: &HashMap<PlanningId, Vec<CoverageId>>,
) -> UpdateScopeSummary {
    UpdateScopeSummary {
        event_prompt_needed: original.is_recurring() && event_was_updated(original, updates),
        planning_to_update: get_recurring_planning_to_update(updates, stored_coverages),
        planning_to_create: get_recurring_planning_to_create(updates),
    }
}
