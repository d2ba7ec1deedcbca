//! Rows as they come out of the exported database, before any conversion

/// A glucose row: sensor reading or fingerstick test, value in mg/dl
#[derive(Debug, Clone, PartialEq)]
pub struct RawReading {
    pub id: i64,
    pub raw_value: f64,
    pub epoch_ms: i64,
}

/// One treatment row. Insulin, carbs and note are independent: a single row
/// may yield a dose, a meal and a note at the same time.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawTreatment {
    pub id: i64,
    pub epoch_ms: i64,
    pub insulin: Option<f64>,
    pub carbs: Option<f64>,
    pub note: Option<String>,
}

/// Everything read from one export, in extraction order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawExport {
    pub sensor_readings: Vec<RawReading>,
    pub blood_tests: Vec<RawReading>,
    pub treatments: Vec<RawTreatment>,
}
