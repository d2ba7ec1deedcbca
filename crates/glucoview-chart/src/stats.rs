//! Per-day and whole-report glucose statistics

use glucoview_core::{round1, GlucoseRange, Measurement};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayStats {
    pub readings: usize,
    pub in_range: usize,
    /// Mean in mmol/l, rounded to one decimal
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

impl DayStats {
    pub fn from_measurements(measurements: &[Measurement], range: &GlucoseRange) -> Option<Self> {
        if measurements.is_empty() {
            return None;
        }
        let values = measurements.iter().map(|m| m.value);
        let sum: f64 = values.clone().sum();
        Some(Self {
            readings: measurements.len(),
            in_range: values.clone().filter(|v| range.contains(*v)).count(),
            mean: round1(sum / measurements.len() as f64),
            min: values.clone().fold(f64::INFINITY, f64::min),
            max: values.fold(f64::NEG_INFINITY, f64::max),
        })
    }

    /// Share of readings inside the acceptable range, in percent
    pub fn time_in_range(&self) -> f64 {
        percent(self.in_range, self.readings)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    /// Mean of the daily means, rounded to one decimal
    pub average: f64,
    pub days: usize,
    pub readings: usize,
    pub in_range: usize,
}

impl Summary {
    /// `None` when there are no days or the average is not a positive number
    pub fn from_days(days: &[DayStats]) -> Option<Self> {
        if days.is_empty() {
            return None;
        }
        let average = round1(days.iter().map(|d| d.mean).sum::<f64>() / days.len() as f64);
        if !average.is_finite() || average <= 0.0 {
            return None;
        }
        Some(Self {
            average,
            days: days.len(),
            readings: days.iter().map(|d| d.readings).sum(),
            in_range: days.iter().map(|d| d.in_range).sum(),
        })
    }

    pub fn time_in_range(&self) -> f64 {
        percent(self.in_range, self.readings)
    }
}

fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}
