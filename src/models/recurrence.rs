//! Recurrence rules for repeating events.
//!
//! A rule describes how an event repeats (frequency, interval, weekdays) and
//! when the repetition stops (a fixed count or an inclusive end date). The
//! concrete date series is produced by [`crate::services::recurring`].

use serde::{Deserialize, Serialize};

/// How often an event repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Frequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Daily => "DAILY",
            Frequency::Weekly => "WEEKLY",
            Frequency::Monthly => "MONTHLY",
            Frequency::Yearly => "YEARLY",
        }
    }
}

/// Weekday selector for weekly rules, in iCalendar notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RuleWeekday {
    Mo,
    Tu,
    We,
    Th,
    Fr,
    Sa,
    Su,
}

impl RuleWeekday {
    pub fn to_chrono(self) -> chrono::Weekday {
        match self {
            RuleWeekday::Mo => chrono::Weekday::Mon,
            RuleWeekday::Tu => chrono::Weekday::Tue,
            RuleWeekday::We => chrono::Weekday::Wed,
            RuleWeekday::Th => chrono::Weekday::Thu,
            RuleWeekday::Fr => chrono::Weekday::Fri,
            RuleWeekday::Sa => chrono::Weekday::Sat,
            RuleWeekday::Su => chrono::Weekday::Sun,
        }
    }

    pub fn from_chrono(weekday: chrono::Weekday) -> Self {
        match weekday {
            chrono::Weekday::Mon => RuleWeekday::Mo,
            chrono::Weekday::Tue => RuleWeekday::Tu,
            chrono::Weekday::Wed => RuleWeekday::We,
            chrono::Weekday::Thu => RuleWeekday::Th,
            chrono::Weekday::Fri => RuleWeekday::Fr,
            chrono::Weekday::Sat => RuleWeekday::Sa,
            chrono::Weekday::Sun => RuleWeekday::Su,
        }
    }
}

/// When a recurring series stops.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatEnd {
    /// Total number of occurrences, including the first one.
    Count(u32),
    /// Inclusive local end date; occurrences on this date still happen.
    Until(chrono::NaiveDate),
}

/// Recurrence rule attached to an event's schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecurrenceRule {
    pub frequency: Frequency,
    /// Step between occurrences, in units of the frequency. Must be >= 1.
    #[serde(default = "default_interval")]
    pub interval: u32,
    /// Weekdays the series falls on. Only meaningful for weekly rules; an
    /// empty list means the weekday of the first occurrence.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub by_day: Vec<RuleWeekday>,
    pub end: RepeatEnd,
}

fn default_interval() -> u32 {
    1
}

impl RecurrenceRule {
    pub fn daily(interval: u32, end: RepeatEnd) -> Self {
        Self {
            frequency: Frequency::Daily,
            interval,
            by_day: Vec::new(),
            end,
        }
    }

    pub fn weekly(interval: u32, by_day: Vec<RuleWeekday>, end: RepeatEnd) -> Self {
        Self {
            frequency: Frequency::Weekly,
            interval,
            by_day,
            end,
        }
    }

    pub fn monthly(interval: u32, end: RepeatEnd) -> Self {
        Self {
            frequency: Frequency::Monthly,
            interval,
            by_day: Vec::new(),
            end,
        }
    }

    pub fn yearly(interval: u32, end: RepeatEnd) -> Self {
        Self {
            frequency: Frequency::Yearly,
            interval,
            by_day: Vec::new(),
            end,
        }
    }

    /// Check the rule for values the expander cannot work with.
    pub fn validate(&self) -> Result<(), String> {
        if self.interval == 0 {
            return Err("Recurrence interval must be at least 1".to_string());
        }
        if matches!(self.end, RepeatEnd::Count(0)) {
            return Err("Recurrence count must be at least 1".to_string());
        }
        if !self.by_day.is_empty() && self.frequency != Frequency::Weekly {
            return Err(format!(
                "by_day is only valid for weekly rules, got {}",
                self.frequency.as_str()
            ));
        }
        Ok(())
    }
}
