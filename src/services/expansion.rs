//! Expansion of a recurring-event edit into everything it touches.

use log::debug;

use crate::api::{EventId, UpdateMethod};
use crate::db::repository::{FullRepository, RepositoryResult};
use crate::models::event::{sort_events_by_start, starts_on_or_after, EventItem};
use crate::models::planning::PlanningItem;

/// The reach of one edit: the events it spreads to and the planning items
/// covering them.
#[derive(Debug, Clone, PartialEq)]
pub struct RecurringExpansion {
    /// Events the update reaches, edited one included, by start date.
    pub events: Vec<EventItem>,
    /// Planning items covering those events. Empty when not requested or
    /// when the edited event is posted.
    pub planning_items: Vec<PlanningItem>,
}

/// Resolve which events and planning items an edit of `base` reaches.
///
/// `Single` touches only the edited event, `Future` everything from the
/// edited event onwards, `All` the entire series. Planning items are
/// fetched on request, except for posted events, whose plannings are
/// managed through the posting workflow instead.
pub async fn get_related_events_for_recurring_event<R: FullRepository>(
    repo: &R,
    base: &EventItem,
    update_method: UpdateMethod,
    include_plannings: bool,
) -> RepositoryResult<RecurringExpansion> {
    let mut events = match (&base.recurrence_id, update_method) {
        (None, _) | (_, UpdateMethod::Single) => vec![base.clone()],
        (Some(recurrence_id), UpdateMethod::Future) => repo
            .get_series(recurrence_id)
            .await?
            .into_iter()
            .filter(|event| starts_on_or_after(event, base))
            .collect(),
        (Some(recurrence_id), UpdateMethod::All) => repo.get_series(recurrence_id).await?,
    };

    // A base not yet visible in the stored series still belongs in scope.
    if !events.iter().any(|event| event.id == base.id) {
        events.push(base.clone());
        sort_events_by_start(&mut events);
    }

    let planning_items = if include_plannings && !base.is_posted() {
        let ids: Vec<EventId> = events.iter().map(|event| event.id.clone()).collect();
        repo.get_plannings_for_events(&ids).await?
    } else {
        Vec::new()
    };

    debug!(
        "Expanded event {} ({:?}) to {} events and {} planning items",
        base.id,
        update_method,
        events.len(),
        planning_items.len()
    );

    Ok(RecurringExpansion {
        events,
        planning_items,
    })
}
