//! Planning repository trait.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::api::{EventId, PlanningId};
use crate::models::planning::{Agenda, PlanningItem};

// ==================== Planning Repository ====================

/// Repository trait for planning items and agendas.
#[async_trait]
pub trait PlanningRepository: Send + Sync {
    /// Store a new planning item.
    ///
    /// A temporary or empty id is replaced with a persistent one. When the
    /// item points at an event, it is appended to that event's planning list.
    ///
    /// # Arguments
    /// * `planning` - The planning item to store
    ///
    /// # Returns
    /// The planning item as persisted.
    async fn create_planning(&self, planning: &PlanningItem) -> RepositoryResult<PlanningItem>;

    /// Fetch a single planning item by id.
    async fn get_planning(&self, id: &PlanningId) -> RepositoryResult<PlanningItem>;

    /// Planning items covering one event, in the event's planning order.
    async fn get_plannings_for_event(
        &self,
        event_id: &EventId,
    ) -> RepositoryResult<Vec<PlanningItem>>;

    /// Planning items covering any of the given events, grouped per event in
    /// the order the ids were passed.
    async fn get_plannings_for_events(
        &self,
        event_ids: &[EventId],
    ) -> RepositoryResult<Vec<PlanningItem>>;

    /// All agendas, ordered by id.
    async fn list_agendas(&self) -> RepositoryResult<Vec<Agenda>>;

    /// Store a new agenda, assigning an id when it has none.
    async fn create_agenda(&self, agenda: &Agenda) -> RepositoryResult<Agenda>;
}
