//! Recurring series generation.
//!
//! Expands a recurrence rule into concrete occurrences. Occurrences step
//! through local wall-clock time and are resolved to instants afterwards, so
//! a series planned for 09:00 stays at 09:00 local across DST transitions.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Datelike, Duration, Months, NaiveDateTime, Utc};
use chrono_tz::Tz;
use log::info;

use crate::api::{EventId, RecurrenceId};
use crate::config::EditorProfile;
use crate::db::repository::{FullRepository, RepositoryError, RepositoryResult};
use crate::models::event::{EventDates, EventItem};
use crate::models::recurrence::{Frequency, RecurrenceRule, RepeatEnd};
use crate::models::time::{resolve_local, week_anchor};

static NEXT_RECURRENCE_ID: AtomicU64 = AtomicU64::new(0);

fn next_recurrence_id() -> RecurrenceId {
    let n = NEXT_RECURRENCE_ID.fetch_add(1, Ordering::Relaxed) + 1;
    RecurrenceId::new(format!("rec_{}", n))
}

/// Usage summary over the events of one series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecurringOverview {
    pub total: usize,
    /// Events that are posted or already have planning coverage.
    pub in_use: usize,
    pub free: usize,
}

fn occurrence_cap(rule: &RecurrenceRule, profile: &EditorProfile) -> usize {
    match rule.end {
        RepeatEnd::Count(count) => (count as usize).min(profile.max_recurrent_events),
        RepeatEnd::Until(_) => profile.max_recurrent_events,
    }
}

fn within_until(candidate: NaiveDateTime, rule: &RecurrenceRule) -> bool {
    match rule.end {
        RepeatEnd::Count(_) => true,
        // The end date is inclusive: occurrences on it still happen.
        RepeatEnd::Until(limit) => candidate.date() <= limit,
    }
}

fn daily_occurrences(
    base: NaiveDateTime,
    rule: &RecurrenceRule,
    cap: usize,
) -> Vec<NaiveDateTime> {
    let step = Duration::days(i64::from(rule.interval));
    let mut out = Vec::new();
    let mut candidate = base;
    while out.len() < cap && within_until(candidate, rule) {
        out.push(candidate);
        candidate = match candidate.checked_add_signed(step) {
            Some(next) => next,
            None => break,
        };
    }
    out
}

fn weekly_occurrences(
    base: NaiveDateTime,
    rule: &RecurrenceRule,
    cap: usize,
    start_of_week: u8,
) -> Vec<NaiveDateTime> {
    let weekdays: Vec<chrono::Weekday> = if rule.by_day.is_empty() {
        vec![base.weekday()]
    } else {
        rule.by_day.iter().map(|d| d.to_chrono()).collect()
    };
    let anchor = week_anchor(base.date(), start_of_week);
    let stride = Duration::days(i64::from(rule.interval) * 7);

    let mut out = Vec::new();
    let mut week_start = anchor;
    'weeks: loop {
        for offset in 0..7 {
            let date = match week_start.checked_add_signed(Duration::days(offset)) {
                Some(date) => date,
                None => break 'weeks,
            };
            if date < base.date() || !weekdays.contains(&date.weekday()) {
                continue;
            }
            let candidate = date.and_time(base.time());
            if out.len() >= cap || !within_until(candidate, rule) {
                break 'weeks;
            }
            out.push(candidate);
        }
        week_start = match week_start.checked_add_signed(stride) {
            Some(next) => next,
            None => break,
        };
    }
    out
}

/// Monthly and yearly stepping. Each occurrence is computed from the base
/// date, so a month-end base clamps per occurrence instead of drifting:
/// Jan 31 gives Feb 29, then Mar 31 again.
fn monthly_like_occurrences(
    base: NaiveDateTime,
    rule: &RecurrenceRule,
    cap: usize,
    months_per_unit: u32,
) -> Vec<NaiveDateTime> {
    let mut out = Vec::new();
    for k in 0u32.. {
        let months = k
            .checked_mul(rule.interval)
            .and_then(|m| m.checked_mul(months_per_unit));
        let candidate = match months.and_then(|m| base.checked_add_months(Months::new(m))) {
            Some(candidate) => candidate,
            None => break,
        };
        if out.len() >= cap || !within_until(candidate, rule) {
            break;
        }
        out.push(candidate);
    }
    out
}

/// Expand a rule into the start instants of the series, first occurrence
/// included. The result is capped by the profile's `max_recurrent_events`;
/// stepping past the calendar's supported range ends the series early.
pub fn generate_recurring_dates(
    start: DateTime<Tz>,
    rule: &RecurrenceRule,
    profile: &EditorProfile,
) -> Vec<DateTime<Tz>> {
    let tz = start.timezone();
    let base = start.naive_local();
    let cap = occurrence_cap(rule, profile);

    let occurrences = match rule.frequency {
        Frequency::Daily => daily_occurrences(base, rule, cap),
        Frequency::Weekly => weekly_occurrences(base, rule, cap, profile.start_of_week),
        Frequency::Monthly => monthly_like_occurrences(base, rule, cap, 1),
        Frequency::Yearly => monthly_like_occurrences(base, rule, cap, 12),
    };

    occurrences
        .into_iter()
        .map(|naive| resolve_local(tz, naive))
        .collect()
}

/// Expand an event's schedule into one [`EventDates`] per occurrence.
///
/// A schedule without a rule is its own single "occurrence". A rule without
/// a start cannot be expanded and yields nothing. Every occurrence keeps the
/// original duration and carries the rule.
pub fn plan_series(dates: &EventDates, profile: &EditorProfile) -> Vec<EventDates> {
    let rule = match &dates.recurring_rule {
        Some(rule) => rule,
        None => return vec![dates.clone()],
    };
    let start = match dates.start {
        Some(start) => start.with_timezone(&dates.tz),
        None => return Vec::new(),
    };
    let duration = dates.duration();

    generate_recurring_dates(start, rule, profile)
        .into_iter()
        .map(|occurrence_start| {
            let start_utc = occurrence_start.with_timezone(&Utc);
            EventDates {
                start: Some(start_utc),
                end: Some(start_utc + duration),
                tz: dates.tz,
                recurring_rule: Some(rule.clone()),
            }
        })
        .collect()
}

/// Create and persist a whole recurring series from a template event.
///
/// The template's id (when set) goes to the first occurrence; the store
/// assigns ids to the rest. All occurrences share a freshly minted
/// recurrence id. A template without a rule is created as a plain event.
///
/// # Arguments
/// * `repo` - Repository to persist into
/// * `base` - Template event carrying the rule in its schedule
/// * `profile` - Expansion limits and week layout
///
/// # Returns
/// The persisted events, in occurrence order.
pub async fn create_recurring_events<R: FullRepository>(
    repo: &R,
    base: EventItem,
    profile: &EditorProfile,
) -> RepositoryResult<Vec<EventItem>> {
    match &base.dates.recurring_rule {
        Some(rule) => {
            rule.validate().map_err(RepositoryError::ValidationError)?;
            if base.dates.start.is_none() {
                return Err(RepositoryError::ValidationError(
                    "A recurring event needs a start date".to_string(),
                ));
            }
        }
        None => {
            let created = repo.create_event(&base).await?;
            return Ok(vec![created]);
        }
    }

    let series_dates = plan_series(&base.dates, profile);
    if series_dates.is_empty() {
        return Err(RepositoryError::ValidationError(
            "The recurrence rule yields no occurrences".to_string(),
        ));
    }

    let recurrence_id = next_recurrence_id();
    info!(
        "Creating recurring series {} with {} events",
        recurrence_id,
        series_dates.len()
    );

    let mut created = Vec::with_capacity(series_dates.len());
    for (index, dates) in series_dates.into_iter().enumerate() {
        let mut event = base.clone();
        event.dates = dates;
        event.recurrence_id = Some(recurrence_id.clone());
        if index > 0 {
            event.id = EventId::new("");
        }
        created.push(repo.create_event(&event).await?);
    }
    Ok(created)
}

/// Count how many events of a series are still free of coverage and posts.
pub fn summarize_series(events: &[EventItem]) -> RecurringOverview {
    let in_use = events
        .iter()
        .filter(|e| !e.planning_ids.is_empty() || e.is_posted())
        .count();
    RecurringOverview {
        total: events.len(),
        in_use,
        free: events.len() - in_use,
    }
}
