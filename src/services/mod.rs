//! Planning services.
//!
//! The services are free async functions generic over
//! [`FullRepository`](crate::db::repository::FullRepository), plus two
//! stateful helpers: [`ScheduleDraft`] for pure schedule transforms and
//! [`EditorSession`] for a lock-to-save editing flow.
//!
//! - [`schedule`]: transforms over an event's start, end and all-day state
//! - [`recurring`]: expanding a recurrence rule into a series of events
//! - [`expansion`]: resolving which events of a series an update reaches
//! - [`update_scope`]: which prompts an edit needs and which plannings it touches
//! - [`editor`]: one user's editing session over a single event

pub mod editor;
pub mod expansion;
pub mod recurring;
pub mod schedule;
pub mod update_scope;

#[cfg(test)]
mod update_scope_tests;

pub use editor::EditorSession;
pub use expansion::{get_related_events_for_recurring_event, RecurringExpansion};
pub use recurring::{
    create_recurring_events, generate_recurring_dates, plan_series, summarize_series,
    RecurringOverview,
};
pub use schedule::ScheduleDraft;
pub use update_scope::{
    apply_update_methods, event_was_updated, get_recurring_planning_to_create,
    get_recurring_planning_to_update, resolve_update_scope, UpdateScopeSummary,
};
