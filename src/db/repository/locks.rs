//! Lock repository trait.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::api::EventId;
use crate::models::event::EventItem;

// ==================== Lock Repository ====================

/// Repository trait for per-item editing locks.
#[async_trait]
pub trait LockRepository: Send + Sync {
    /// Take the editing lock on an event.
    ///
    /// Re-locking from the same session refreshes the lock. A lock held by a
    /// different session fails with [`super::RepositoryError::Locked`].
    ///
    /// # Arguments
    /// * `id` - The event to lock
    /// * `user` - User taking the lock
    /// * `session` - Editing session the lock belongs to
    /// * `action` - What the lock is for, e.g. `"edit"`
    ///
    /// # Returns
    /// The event with the lock attached.
    async fn lock_event(
        &self,
        id: &EventId,
        user: &str,
        session: &str,
        action: &str,
    ) -> RepositoryResult<EventItem>;

    /// Release the editing lock on an event.
    ///
    /// Unlocking an event that is not locked is a no-op; a lock held by a
    /// different session fails with [`super::RepositoryError::Locked`].
    async fn unlock_event(&self, id: &EventId, session: &str) -> RepositoryResult<EventItem>;
}
