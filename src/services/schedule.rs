//! Schedule editing.
//!
//! [`ScheduleDraft`] is the editable form of an event's schedule: start and
//! end in the event's own timezone, plus the all-day and to-be-confirmed
//! flags and the explicit time-of-day fields that track whether the user
//! has picked concrete times yet. Every operation here is a pure transform
//! on the draft; nothing touches storage until the editing session submits.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Timelike, Utc};
use chrono_tz::Tz;

use crate::config::EditorProfile;
use crate::models::event::{EventDates, EventItem};
use crate::models::time::{
    end_of_day, merge_time_of_day, resolve_local, rezone_keep_wall_clock, start_of_day,
};

/// Editable schedule of one event.
///
/// `start_time` and `end_time` mirror `start` and `end` while the user has
/// chosen concrete times; `None` means the boundary is date-only so far.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleDraft {
    pub start: Option<DateTime<Tz>>,
    pub end: Option<DateTime<Tz>>,
    pub start_time: Option<DateTime<Tz>>,
    pub end_time: Option<DateTime<Tz>>,
    pub all_day: bool,
    pub to_be_confirmed: bool,
    pub tz: Tz,
}

impl ScheduleDraft {
    pub fn new(tz: Tz) -> Self {
        Self {
            start: None,
            end: None,
            start_time: None,
            end_time: None,
            all_day: false,
            to_be_confirmed: false,
            tz,
        }
    }

    /// Load an event's stored schedule into editable form.
    ///
    /// A schedule spanning midnight to 23:59 local is shown as all-day.
    /// All-day and to-be-confirmed events have no concrete times, so their
    /// time fields start out empty.
    pub fn from_event(event: &EventItem) -> Self {
        let tz = event.dates.tz;
        let start = event.dates.start.map(|dt| dt.with_timezone(&tz));
        let end = event.dates.end.map(|dt| dt.with_timezone(&tz));

        let all_day = match (start, end) {
            (Some(s), Some(e)) => {
                s.time() == NaiveTime::MIN && e.time().hour() == 23 && e.time().minute() == 59
            }
            _ => false,
        };
        let to_be_confirmed = event.time_to_be_confirmed;
        let (start_time, end_time) = if all_day || to_be_confirmed {
            (None, None)
        } else {
            (start, end)
        };

        Self {
            start,
            end,
            start_time,
            end_time,
            all_day,
            to_be_confirmed,
            tz,
        }
    }

    /// Convert back to the stored form, instants in UTC. The recurrence rule
    /// is not the draft's to carry; the editing session re-attaches it.
    pub fn to_dates(&self) -> EventDates {
        EventDates {
            start: self.start.map(|dt| dt.with_timezone(&Utc)),
            end: self.end.map(|dt| dt.with_timezone(&Utc)),
            tz: self.tz,
            recurring_rule: None,
        }
    }

    pub fn is_multi_day(&self) -> bool {
        match (self.start, self.end) {
            (Some(start), Some(end)) => start.date_naive() != end.date_naive(),
            _ => false,
        }
    }

    fn duration(&self) -> Duration {
        match (self.start, self.end) {
            (Some(start), Some(end)) => end.signed_duration_since(start),
            _ => Duration::zero(),
        }
    }

    /// Move the start to another calendar day, keeping its time of day.
    ///
    /// When the end would fall before the new start (or does not exist yet)
    /// it moves along so the event keeps its previous duration.
    pub fn change_start_date(&mut self, date: NaiveDate) {
        let previous_duration = self.duration();
        let time = self.start.map(|dt| dt.time()).unwrap_or(NaiveTime::MIN);
        let new_start = resolve_local(self.tz, date.and_time(time));

        let push_end = match self.end {
            None => true,
            Some(end) => end < new_start,
        };
        self.start = Some(new_start);
        if push_end {
            self.end = Some(new_start + previous_duration);
        }
        self.apply_tbc_policy();
    }

    /// Set or clear the start's time of day.
    ///
    /// The date is kept; an event with no start yet anchors on `now` in the
    /// draft's timezone. Picking the first concrete time on a single-day
    /// all-day event pushes the end out by the configured default duration.
    pub fn change_start_time(
        &mut self,
        time: Option<NaiveTime>,
        now: DateTime<Utc>,
        profile: &EditorProfile,
    ) {
        let time = match time {
            Some(t) => t,
            None => {
                self.start_time = None;
                return;
            }
        };

        let anchor = self.start.unwrap_or_else(|| now.with_timezone(&self.tz));
        let new_start = merge_time_of_day(anchor, time);
        self.start = Some(new_start);
        self.start_time = Some(new_start);

        if self.should_apply_default_duration(profile) {
            let end = new_start + Duration::hours(profile.default_duration_on_change);
            self.end = Some(end);
            self.end_time = Some(end);
        }
        self.apply_tbc_policy();
    }

    /// Move the end to another calendar day, keeping its time of day. An
    /// event with no start yet gets one at the beginning of that day.
    pub fn change_end_date(&mut self, date: NaiveDate) {
        let time = self.end.map(|dt| dt.time()).unwrap_or(NaiveTime::MIN);
        let new_end = resolve_local(self.tz, date.and_time(time));
        self.end = Some(new_end);
        if self.start.is_none() {
            self.start = Some(resolve_local(self.tz, date.and_time(NaiveTime::MIN)));
        }
        self.apply_tbc_policy();
    }

    /// Set or clear the end's time of day. Mirror of
    /// [`Self::change_start_time`]; the default-duration nudge pulls the
    /// start backwards instead.
    pub fn change_end_time(
        &mut self,
        time: Option<NaiveTime>,
        now: DateTime<Utc>,
        profile: &EditorProfile,
    ) {
        let time = match time {
            Some(t) => t,
            None => {
                self.end_time = None;
                return;
            }
        };

        let anchor = self.end.unwrap_or_else(|| now.with_timezone(&self.tz));
        let new_end = merge_time_of_day(anchor, time);
        self.end = Some(new_end);
        self.end_time = Some(new_end);

        if self.should_apply_default_duration(profile) {
            let start = new_end - Duration::hours(profile.default_duration_on_change);
            self.start = Some(start);
            self.start_time = Some(start);
        }
        self.apply_tbc_policy();
    }

    /// Toggle the all-day flag.
    ///
    /// Turning it on stretches the schedule over whole days. Turning it off
    /// keeps the start and lands the end one minute into its day with the
    /// time fields cleared; callers validate the resulting ordering.
    pub fn set_all_day(&mut self, enabled: bool, now: DateTime<Utc>) {
        self.all_day = enabled;
        let fallback = now.with_timezone(&self.tz);

        if enabled {
            let start = start_of_day(self.start.unwrap_or(fallback));
            let end = end_of_day(self.end.unwrap_or(fallback));
            self.start = Some(start);
            self.end = Some(end);
            self.start_time = Some(start);
            self.end_time = Some(end);
        } else {
            let start = self.start.unwrap_or(fallback);
            let end_anchor = self.end.unwrap_or(fallback);
            let one_past_midnight = NaiveTime::from_hms_opt(0, 1, 0).unwrap();
            self.start = Some(start);
            self.end = Some(merge_time_of_day(end_anchor, one_past_midnight));
            self.start_time = None;
            self.end_time = None;
        }
        self.apply_tbc_policy();
    }

    /// Re-express the whole schedule in another timezone, preserving the
    /// wall-clock date and time of every boundary.
    pub fn change_timezone(&mut self, to: Tz) {
        self.start = self.start.map(|dt| rezone_keep_wall_clock(dt, to));
        self.end = self.end.map(|dt| rezone_keep_wall_clock(dt, to));
        self.start_time = self.start_time.map(|dt| rezone_keep_wall_clock(dt, to));
        self.end_time = self.end_time.map(|dt| rezone_keep_wall_clock(dt, to));
        self.tz = to;
        self.apply_tbc_policy();
    }

    /// Flag the schedule as "time to be confirmed" and drop the concrete
    /// times; the flag clears itself once both times are picked again.
    pub fn mark_time_to_be_confirmed(&mut self) {
        self.to_be_confirmed = true;
        self.start_time = None;
        self.end_time = None;
    }

    fn should_apply_default_duration(&self, profile: &EditorProfile) -> bool {
        self.all_day && !self.is_multi_day() && profile.default_duration_on_change > 0
    }

    fn apply_tbc_policy(&mut self) {
        if self.start_time.is_some() && self.end_time.is_some() {
            self.to_be_confirmed = false;
        }
    }
}
