//! Content hashes for stored items.
//!
//! Every write recomputes the item's etag so callers can cheaply detect
//! concurrent modification.

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::models::event::EventItem;

/// Hex-encoded SHA-256 of a value's JSON form.
pub fn compute_etag<T: Serialize>(value: &T) -> String {
    let json = serde_json::to_string(value).unwrap_or_default();
    let mut hasher = Sha256::new();
    hasher.update(json.as_bytes());
    hex::encode(hasher.finalize())
}

/// Etag of an event's content. The stored etag and the lock are blanked
/// first, so taking or releasing a lock never changes an event's etag.
pub fn event_etag(event: &EventItem) -> String {
    let mut content = event.clone();
    content.etag = None;
    content.lock = None;
    compute_etag(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::EventId;
    use crate::models::event::{EventDates, ItemLock};

    fn sample_event() -> EventItem {
        EventItem::new(EventId::new("event_1"), "Marathon", EventDates::default())
    }

    #[test]
    fn test_same_content_same_etag() {
        assert_eq!(event_etag(&sample_event()), event_etag(&sample_event()));
    }

    #[test]
    fn test_content_change_changes_etag() {
        let event = sample_event();
        let mut renamed = event.clone();
        renamed.name = "Half marathon".to_string();
        assert_ne!(event_etag(&event), event_etag(&renamed));
    }

    #[test]
    fn test_etag_ignores_lock_and_previous_etag() {
        let event = sample_event();
        let mut locked = event.clone();
        locked.etag = Some(event_etag(&event));
        locked.lock = Some(ItemLock {
            user: "ana".to_string(),
            session: "session_1".to_string(),
            action: "edit".to_string(),
            time: chrono::Utc::now(),
        });
        assert_eq!(event_etag(&event), event_etag(&locked));
    }
}
