//! Meal marker anchoring and placement

use chrono::Duration;
use glucoview_core::{Meal, Measurement};

/// Height of a meal marker above its anchoring reading
const MARKER_OFFSET: f64 = 1.0;

/// Marker height used when the anchor is the first reading of the day
const FIRST_READING_MARKER_Y: f64 = 3.0;

/// Markers landing this close below the acceptable-max line collide with it
const REFERENCE_LINE_BAND: f64 = 0.5;

const REFERENCE_LINE_NUDGE: f64 = 1.0;

/// Markers stay at least this far below the top of the y-axis
const TOP_MARGIN: f64 = 0.5;

/// Label for a meal entry of exactly one carb unit
pub const CORRECTION_SUGAR_LABEL: &str = "sugar";

/// Reading a meal marker hangs from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MealAnchor<'a> {
    /// Position in the day's measurement list
    pub index: usize,
    pub measurement: &'a Measurement,
    pub gap: Duration,
}

/// Nearest reading to `meal` by absolute time difference; on a tie the
/// earlier reading wins. `None` when the nearest one is further away than
/// `tolerance`.
pub fn anchor_meal<'a>(
    meal: &Meal,
    measurements: &'a [Measurement],
    tolerance: Duration,
) -> Option<MealAnchor<'a>> {
    let (index, measurement, gap) = measurements
        .iter()
        .enumerate()
        .map(|(i, m)| (i, m, (m.timestamp - meal.timestamp).abs()))
        .min_by_key(|(_, _, gap)| *gap)?;

    if gap > tolerance {
        return None;
    }
    Some(MealAnchor {
        index,
        measurement,
        gap,
    })
}

/// Marker height for an anchored meal, kept inside the fixed y-axis
pub fn meal_marker_y(anchor: &MealAnchor<'_>, acceptable_max: f64, max_display: f64) -> f64 {
    let y = if anchor.index == 0 {
        FIRST_READING_MARKER_Y
    } else {
        anchor.measurement.value + MARKER_OFFSET
    };

    let y = if (acceptable_max - REFERENCE_LINE_BAND..=acceptable_max).contains(&y) {
        y + REFERENCE_LINE_NUDGE
    } else {
        y
    };
    y.min(max_display - TOP_MARGIN)
}

/// One carb unit is logged as a correction sugar, not as food
pub fn meal_label(meal: &Meal) -> String {
    if meal.is_correction_sugar() {
        CORRECTION_SUGAR_LABEL.to_string()
    } else {
        format!("{}g", meal.carb_units)
    }
}
