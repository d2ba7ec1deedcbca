//! Timeline entities

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Where a glucose value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReadingSource {
    /// Continuous sensor reading (`BgReadings`)
    Sensor,
    /// Manual fingerstick test (`BloodTest`)
    Fingerstick,
}

/// Blood glucose value in mmol/l
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub id: i64,
    pub value: f64,
    pub timestamp: NaiveDateTime,
    pub source: ReadingSource,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InsulinKind {
    #[serde(rename = "long")]
    LongActing,
    #[serde(rename = "short")]
    ShortActing,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsulinTreatment {
    pub id: i64,
    pub timestamp: NaiveDateTime,
    pub dose_units: u32,
    pub kind: InsulinKind,
}

impl InsulinTreatment {
    pub fn is_long_acting(&self) -> bool {
        self.kind == InsulinKind::LongActing
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    pub id: i64,
    pub timestamp: NaiveDateTime,
    pub carb_units: u32,
}

impl Meal {
    /// A single carb unit marks a glucose correction rather than food intake
    pub fn is_correction_sugar(&self) -> bool {
        self.carb_units == 1
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: i64,
    pub timestamp: NaiveDateTime,
    pub text: String,
}

/// The four time-sorted collections every later stage works on
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Timeline {
    pub measurements: Vec<Measurement>,
    pub insulin: Vec<InsulinTreatment>,
    pub meals: Vec<Meal>,
    pub notes: Vec<Note>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.measurements.is_empty()
            && self.insulin.is_empty()
            && self.meals.is_empty()
            && self.notes.is_empty()
    }
}
