use crate::ExtractError;
use glucoview_core::{RawExport, RawReading, RawTreatment};
use rusqlite::types::ValueRef;
use rusqlite::{Connection, OpenFlags, Row};
use std::path::Path;

const SENSOR_QUERY: &str = "SELECT _id, calculated_value, timestamp FROM BgReadings";
const BLOOD_TEST_QUERY: &str = "SELECT _id, mgdl, timestamp FROM BloodTest";
const TREATMENT_QUERY: &str = "SELECT _id, timestamp, insulin, carbs, notes FROM Treatments";

/// Read-only view of an xDrip database snapshot
pub struct ExportDb {
    conn: Connection,
}

impl ExportDb {
    pub fn open(db_path: &Path) -> Result<Self, ExtractError> {
        let conn = Connection::open_with_flags(
            db_path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(ExtractError::Open)?;
        Ok(Self { conn })
    }

    pub fn sensor_readings(&self) -> Result<Vec<RawReading>, ExtractError> {
        self.readings("BgReadings", SENSOR_QUERY)
    }

    pub fn blood_tests(&self) -> Result<Vec<RawReading>, ExtractError> {
        self.readings("BloodTest", BLOOD_TEST_QUERY)
    }

    pub fn treatments(&self) -> Result<Vec<RawTreatment>, ExtractError> {
        let table = "Treatments";
        let wrap = |source| ExtractError::Extraction { table, source };

        let mut stmt = self.conn.prepare(TREATMENT_QUERY).map_err(wrap)?;
        let rows = stmt
            .query_map([], |row| {
                Ok(RawTreatment {
                    id: row.get(0)?,
                    epoch_ms: epoch_millis(row, 1)?,
                    insulin: row.get(2)?,
                    carbs: row.get(3)?,
                    note: row.get(4)?,
                })
            })
            .map_err(wrap)?;
        let treatments = rows.collect::<Result<Vec<_>, _>>().map_err(wrap)?;
        tracing::debug!(table, rows = treatments.len(), "read table");
        Ok(treatments)
    }

    /// Run all three fixed queries
    pub fn read_export(&self) -> Result<RawExport, ExtractError> {
        Ok(RawExport {
            sensor_readings: self.sensor_readings()?,
            blood_tests: self.blood_tests()?,
            treatments: self.treatments()?,
        })
    }

    fn readings(&self, table: &'static str, query: &str) -> Result<Vec<RawReading>, ExtractError> {
        let wrap = |source| ExtractError::Extraction { table, source };

        let mut stmt = self.conn.prepare(query).map_err(wrap)?;
        let rows = stmt
            .query_map([], |row| {
                Ok(RawReading {
                    id: row.get(0)?,
                    raw_value: row.get(1)?,
                    epoch_ms: epoch_millis(row, 2)?,
                })
            })
            .map_err(wrap)?;
        let readings = rows.collect::<Result<Vec<_>, _>>().map_err(wrap)?;
        tracing::debug!(table, rows = readings.len(), "read table");
        Ok(readings)
    }
}

/// xDrip stores epoch milliseconds as INTEGER, older exports as REAL
fn epoch_millis(row: &Row, idx: usize) -> rusqlite::Result<i64> {
    match row.get_ref(idx)? {
        ValueRef::Integer(ms) => Ok(ms),
        ValueRef::Real(ms) => Ok(ms as i64),
        other => Err(rusqlite::Error::InvalidColumnType(
            idx,
            "timestamp".to_string(),
            other.data_type(),
        )),
    }
}
