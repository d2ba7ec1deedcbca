//! Grouping a timeline into calendar days

use chrono::NaiveDate;
use glucoview_core::{InsulinTreatment, Meal, Measurement, Note, Timeline};
use std::collections::BTreeMap;

/// Everything drawn on one day's chart
#[derive(Debug, Clone, PartialEq)]
pub struct DayBucket {
    pub date: NaiveDate,
    pub measurements: Vec<Measurement>,
    pub insulin: Vec<InsulinTreatment>,
    pub meals: Vec<Meal>,
    pub notes: Vec<Note>,
}

impl DayBucket {
    fn new(date: NaiveDate) -> Self {
        Self {
            date,
            measurements: Vec::new(),
            insulin: Vec::new(),
            meals: Vec::new(),
            notes: Vec::new(),
        }
    }
}

/// Split `timeline` into one bucket per day that has at least one
/// measurement, newest day first. Treatments, meals and notes on days
/// without measurements have no chart to land on and are dropped.
/// Input order is preserved inside each bucket.
pub fn partition_by_day(timeline: &Timeline) -> Vec<DayBucket> {
    let mut days: BTreeMap<NaiveDate, DayBucket> = BTreeMap::new();

    for m in &timeline.measurements {
        let date = m.timestamp.date();
        days.entry(date)
            .or_insert_with(|| DayBucket::new(date))
            .measurements
            .push(m.clone());
    }

    let mut orphaned = 0;
    for t in &timeline.insulin {
        match days.get_mut(&t.timestamp.date()) {
            Some(day) => day.insulin.push(t.clone()),
            None => orphaned += 1,
        }
    }
    for meal in &timeline.meals {
        match days.get_mut(&meal.timestamp.date()) {
            Some(day) => day.meals.push(meal.clone()),
            None => orphaned += 1,
        }
    }
    for note in &timeline.notes {
        match days.get_mut(&note.timestamp.date()) {
            Some(day) => day.notes.push(note.clone()),
            None => orphaned += 1,
        }
    }
    if orphaned > 0 {
        tracing::debug!(orphaned, "events on days without glucose readings were not charted");
    }

    days.into_values().rev().collect()
}
