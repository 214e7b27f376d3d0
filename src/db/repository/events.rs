//! Event repository trait.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::api::{EventId, RecurrenceId};
use crate::models::event::{EventItem, EventUpdates};

// ==================== Event Repository ====================

/// Repository trait for event storage and retrieval.
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Check if the repository is reachable and healthy.
    async fn health_check(&self) -> RepositoryResult<()>;

    /// Store a new event.
    ///
    /// An event with an empty id gets one assigned; an event whose id is
    /// already taken is rejected with a validation error. The stored copy,
    /// with its id and etag filled in, is returned.
    ///
    /// # Arguments
    /// * `event` - The event to store
    ///
    /// # Returns
    /// The event as persisted.
    async fn create_event(&self, event: &EventItem) -> RepositoryResult<EventItem>;

    /// Fetch a single event by id.
    async fn get_event(&self, id: &EventId) -> RepositoryResult<EventItem>;

    /// All events, ordered by start date (undated events last).
    async fn list_events(&self) -> RepositoryResult<Vec<EventItem>>;

    /// Every event of a recurring series, ordered by start date. An unknown
    /// series id yields an empty list, not an error.
    async fn get_series(&self, recurrence_id: &RecurrenceId) -> RepositoryResult<Vec<EventItem>>;

    /// Apply an edit to a stored event.
    ///
    /// The update's `update_method` decides how far the non-schedule fields
    /// spread across the event's recurring series; schedule changes only ever
    /// land on the event itself. Planning items carried in
    /// `associated_plannings` are created or updated along the way.
    ///
    /// # Arguments
    /// * `original` - The event the edit was based on
    /// * `updates` - The fields that changed
    ///
    /// # Returns
    /// The edited event as persisted.
    async fn save_event(
        &self,
        original: &EventItem,
        updates: &EventUpdates,
    ) -> RepositoryResult<EventItem>;
}
