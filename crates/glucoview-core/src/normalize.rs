//! Raw rows -> typed, unit-converted, time-sorted collections

use crate::config::InsulinBounds;
use crate::convert::{display_time, mgdl_to_mmol};
use crate::raw::{RawExport, RawReading, RawTreatment};
use crate::types::{InsulinKind, InsulinTreatment, Meal, Measurement, Note, ReadingSource, Timeline};
use chrono::TimeZone;

/// Whole units for a nullable quantity column. Fractions are truncated;
/// null amounts and anything below one unit yield `None`.
fn whole_units(value: Option<f64>) -> Option<u32> {
    let units = value.filter(|v| v.is_finite())?.trunc();
    if units < 1.0 {
        return None;
    }
    Some(units.min(u32::MAX as f64) as u32)
}

fn treatment_time<Tz: TimeZone>(row: &RawTreatment, tz: &Tz) -> Option<chrono::NaiveDateTime> {
    let timestamp = display_time(row.epoch_ms, tz);
    if timestamp.is_none() {
        tracing::warn!(id = row.id, epoch_ms = row.epoch_ms, "skipping treatment with invalid timestamp");
    }
    timestamp
}

pub fn measurement_from_reading<Tz: TimeZone>(
    raw: &RawReading,
    source: ReadingSource,
    tz: &Tz,
) -> Option<Measurement> {
    let Some(timestamp) = display_time(raw.epoch_ms, tz) else {
        tracing::warn!(id = raw.id, epoch_ms = raw.epoch_ms, "skipping reading with invalid timestamp");
        return None;
    };
    Some(Measurement {
        id: raw.id,
        value: mgdl_to_mmol(raw.raw_value),
        timestamp,
        source,
    })
}

pub fn insulin_projection<Tz: TimeZone>(
    row: &RawTreatment,
    bounds: &InsulinBounds,
    tz: &Tz,
) -> Option<InsulinTreatment> {
    let dose_units = whole_units(row.insulin)?;
    let kind = if bounds.is_long_acting(dose_units) {
        InsulinKind::LongActing
    } else {
        InsulinKind::ShortActing
    };
    Some(InsulinTreatment {
        id: row.id,
        timestamp: treatment_time(row, tz)?,
        dose_units,
        kind,
    })
}

pub fn meal_projection<Tz: TimeZone>(row: &RawTreatment, tz: &Tz) -> Option<Meal> {
    Some(Meal {
        id: row.id,
        timestamp: treatment_time(row, tz)?,
        carb_units: whole_units(row.carbs)?,
    })
}

pub fn note_projection<Tz: TimeZone>(row: &RawTreatment, tz: &Tz) -> Option<Note> {
    let text = row.note.as_deref().map(str::trim).filter(|t| !t.is_empty())?;
    Some(Note {
        id: row.id,
        timestamp: treatment_time(row, tz)?,
        text: text.to_string(),
    })
}

/// Build the four timeline collections from one export.
///
/// Sensor readings and fingerstick tests merge into one measurement list.
/// Every collection is sorted by timestamp; the sort is stable, so equal
/// timestamps keep extraction order.
pub fn normalize<Tz: TimeZone>(export: &RawExport, bounds: &InsulinBounds, tz: &Tz) -> Timeline {
    let mut measurements: Vec<Measurement> = export
        .sensor_readings
        .iter()
        .filter_map(|r| measurement_from_reading(r, ReadingSource::Sensor, tz))
        .chain(
            export
                .blood_tests
                .iter()
                .filter_map(|r| measurement_from_reading(r, ReadingSource::Fingerstick, tz)),
        )
        .collect();

    let mut insulin: Vec<InsulinTreatment> = export
        .treatments
        .iter()
        .filter_map(|row| insulin_projection(row, bounds, tz))
        .collect();
    let mut meals: Vec<Meal> = export
        .treatments
        .iter()
        .filter_map(|row| meal_projection(row, tz))
        .collect();
    let mut notes: Vec<Note> = export
        .treatments
        .iter()
        .filter_map(|row| note_projection(row, tz))
        .collect();

    measurements.sort_by_key(|m| m.timestamp);
    insulin.sort_by_key(|t| t.timestamp);
    meals.sort_by_key(|m| m.timestamp);
    notes.sort_by_key(|n| n.timestamp);

    tracing::debug!(
        measurements = measurements.len(),
        insulin = insulin.len(),
        meals = meals.len(),
        notes = notes.len(),
        "normalized export"
    );

    Timeline {
        measurements,
        insulin,
        meals,
        notes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    const BASE_MS: i64 = 1_709_294_400_000;
    const MINUTE_MS: i64 = 60_000;

    fn treatment(id: i64, minute: i64) -> RawTreatment {
        RawTreatment {
            id,
            epoch_ms: BASE_MS + minute * MINUTE_MS,
            ..Default::default()
        }
    }

    #[test]
    fn test_classification_boundaries() {
        let bounds = InsulinBounds::new(15, 25);
        for (dose, long) in [(14.0, false), (15.0, true), (25.0, true), (26.0, false), (10.0, false), (18.0, true)] {
            let row = RawTreatment {
                insulin: Some(dose),
                ..treatment(1, 0)
            };
            let projected = insulin_projection(&row, &bounds, &Utc).unwrap();
            assert_eq!(projected.is_long_acting(), long, "dose {}", dose);
        }
    }

    #[test]
    fn test_zero_and_null_quantities_dropped() {
        let bounds = InsulinBounds::default();
        let row = RawTreatment {
            insulin: Some(0.0),
            carbs: None,
            note: Some("   ".to_string()),
            ..treatment(1, 0)
        };
        assert!(insulin_projection(&row, &bounds, &Utc).is_none());
        assert!(meal_projection(&row, &Utc).is_none());
        assert!(note_projection(&row, &Utc).is_none());

        let row = RawTreatment {
            carbs: Some(0.0),
            ..treatment(2, 0)
        };
        assert!(meal_projection(&row, &Utc).is_none());
    }

    #[test]
    fn test_one_row_yields_three_projections() {
        let row = RawTreatment {
            insulin: Some(6.0),
            carbs: Some(40.0),
            note: Some("pasta".to_string()),
            ..treatment(9, 0)
        };
        let export = RawExport {
            treatments: vec![row],
            ..Default::default()
        };
        let timeline = normalize(&export, &InsulinBounds::default(), &Utc);
        assert_eq!(timeline.insulin.len(), 1);
        assert_eq!(timeline.meals.len(), 1);
        assert_eq!(timeline.notes.len(), 1);
        assert_eq!(timeline.insulin[0].id, 9);
        assert_eq!(timeline.meals[0].carb_units, 40);
        assert_eq!(timeline.notes[0].text, "pasta");
    }

    #[test]
    fn test_measurements_merge_sorted_and_stable() {
        let export = RawExport {
            sensor_readings: vec![
                RawReading { id: 1, raw_value: 90.0, epoch_ms: BASE_MS + 10 * MINUTE_MS },
                RawReading { id: 2, raw_value: 100.0, epoch_ms: BASE_MS },
            ],
            blood_tests: vec![
                RawReading { id: 1, raw_value: 180.0, epoch_ms: BASE_MS + 5 * MINUTE_MS },
                RawReading { id: 3, raw_value: 72.0, epoch_ms: BASE_MS },
            ],
            treatments: vec![],
        };
        let timeline = normalize(&export, &InsulinBounds::default(), &Utc);
        let order: Vec<(i64, ReadingSource)> = timeline
            .measurements
            .iter()
            .map(|m| (m.id, m.source))
            .collect();
        assert_eq!(
            order,
            vec![
                (2, ReadingSource::Sensor),
                (3, ReadingSource::Fingerstick),
                (1, ReadingSource::Fingerstick),
                (1, ReadingSource::Sensor),
            ]
        );
        assert_eq!(timeline.measurements[0].value, 5.6);
        assert_eq!(timeline.measurements[2].value, 10.0);
    }

    #[test]
    fn test_treatments_sorted() {
        let export = RawExport {
            treatments: vec![
                RawTreatment { insulin: Some(4.0), ..treatment(1, 30) },
                RawTreatment { insulin: Some(20.0), ..treatment(2, 0) },
            ],
            ..Default::default()
        };
        let timeline = normalize(&export, &InsulinBounds::default(), &Utc);
        let ids: Vec<i64> = timeline.insulin.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![2, 1]);
        assert_eq!(timeline.insulin[0].kind, InsulinKind::LongActing);
        assert_eq!(timeline.insulin[1].kind, InsulinKind::ShortActing);
    }

    #[test]
    fn test_fractional_dose_truncates() {
        let bounds = InsulinBounds::default();
        let row = RawTreatment {
            insulin: Some(2.5),
            ..treatment(1, 0)
        };
        let dose = insulin_projection(&row, &bounds, &Utc).unwrap();
        assert_eq!(dose.dose_units, 2);

        // 14.6 truncates to 14, below the long-acting range
        let row = RawTreatment {
            insulin: Some(14.6),
            ..treatment(1, 0)
        };
        let dose = insulin_projection(&row, &bounds, &Utc).unwrap();
        assert_eq!(dose.dose_units, 14);
        assert_eq!(dose.kind, InsulinKind::ShortActing);

        let row = RawTreatment {
            insulin: Some(25.4),
            ..treatment(1, 0)
        };
        let dose = insulin_projection(&row, &bounds, &Utc).unwrap();
        assert_eq!(dose.dose_units, 25);
        assert_eq!(dose.kind, InsulinKind::LongActing);

        let row = RawTreatment {
            insulin: Some(0.9),
            carbs: Some(1.7),
            ..treatment(1, 0)
        };
        assert!(insulin_projection(&row, &bounds, &Utc).is_none());
        assert_eq!(meal_projection(&row, &Utc).unwrap().carb_units, 1);
    }

    #[test]
    fn test_unrepresentable_treatment_time_dropped() {
        let row = RawTreatment {
            insulin: Some(6.0),
            carbs: Some(30.0),
            note: Some("late".to_string()),
            epoch_ms: i64::MAX,
            ..treatment(1, 0)
        };
        assert!(insulin_projection(&row, &InsulinBounds::default(), &Utc).is_none());
        assert!(meal_projection(&row, &Utc).is_none());
        assert!(note_projection(&row, &Utc).is_none());
    }
}
