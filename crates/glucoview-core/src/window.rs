//! Retention window: the trailing N calendar days ending today

use crate::types::Timeline;
use chrono::{Days, NaiveDate, NaiveDateTime};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetentionWindow {
    /// First day included
    pub start: NaiveDate,
    /// Last day included
    pub end: NaiveDate,
}

impl RetentionWindow {
    /// Window of `days` calendar days whose last day is `today`.
    /// A zero-day window is treated as one day.
    pub fn ending(today: NaiveDate, days: u32) -> Self {
        let back = u64::from(days.max(1) - 1);
        let start = today.checked_sub_days(Days::new(back)).unwrap_or(NaiveDate::MIN);
        Self { start, end: today }
    }

    pub fn contains(&self, timestamp: &NaiveDateTime) -> bool {
        let date = timestamp.date();
        self.start <= date && date <= self.end
    }

    /// Copy of `timeline` restricted to the window; order is preserved.
    pub fn apply(&self, timeline: &Timeline) -> Timeline {
        Timeline {
            measurements: timeline
                .measurements
                .iter()
                .filter(|m| self.contains(&m.timestamp))
                .cloned()
                .collect(),
            insulin: timeline
                .insulin
                .iter()
                .filter(|t| self.contains(&t.timestamp))
                .cloned()
                .collect(),
            meals: timeline
                .meals
                .iter()
                .filter(|m| self.contains(&m.timestamp))
                .cloned()
                .collect(),
            notes: timeline
                .notes
                .iter()
                .filter(|n| self.contains(&n.timestamp))
                .cloned()
                .collect(),
        }
    }
}
