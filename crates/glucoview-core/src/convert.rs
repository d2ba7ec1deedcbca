//! Unit and timestamp conversion

use chrono::{NaiveDateTime, TimeZone};

/// mg/dl per mmol/l for glucose
pub const MGDL_PER_MMOL: f64 = 18.0;

/// Round to one decimal place
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Convert a stored mg/dl value to mmol/l rounded to one decimal.
///
/// Stored values are integer-scaled; any fractional part is dropped first.
pub fn mgdl_to_mmol(raw: f64) -> f64 {
    round1(raw.trunc() / MGDL_PER_MMOL)
}

/// Convert epoch milliseconds to a wall-clock time in `tz`, truncated to
/// the second. Returns `None` for timestamps chrono cannot represent.
pub fn display_time<Tz: TimeZone>(epoch_ms: i64, tz: &Tz) -> Option<NaiveDateTime> {
    tz.timestamp_opt(epoch_ms.div_euclid(1000), 0)
        .single()
        .map(|dt| dt.naive_local())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, NaiveDate, Utc};

    #[test]
    fn test_mgdl_to_mmol() {
        assert_eq!(mgdl_to_mmol(90.0), 5.0);
        assert_eq!(mgdl_to_mmol(180.0), 10.0);
        assert_eq!(mgdl_to_mmol(100.0), 5.6);
        assert_eq!(mgdl_to_mmol(90.9), 5.0);
    }

    #[test]
    fn test_mgdl_to_mmol_within_tolerance() {
        for raw in 0..=600 {
            let display = mgdl_to_mmol(raw as f64);
            let exact = raw as f64 / MGDL_PER_MMOL;
            assert!(
                (display - exact).abs() <= 0.05 + 1e-9,
                "raw {} -> {} (exact {})",
                raw,
                display,
                exact
            );
        }
    }

    #[test]
    fn test_display_time_truncates_to_second() {
        let ts = display_time(1_709_294_400_999, &Utc).unwrap();
        let expected = NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        assert_eq!(ts, expected);
    }

    #[test]
    fn test_display_time_uses_zone() {
        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
        let ts = display_time(1_709_294_400_000, &plus_two).unwrap();
        assert_eq!(ts.format("%H:%M").to_string(), "14:00");
    }

    #[test]
    fn test_display_time_monotonic() {
        let mut previous = display_time(0, &Utc).unwrap();
        for ms in (0..10_000_000_i64).step_by(999_983) {
            let current = display_time(ms, &Utc).unwrap();
            assert!(current >= previous);
            previous = current;
        }
    }
}
