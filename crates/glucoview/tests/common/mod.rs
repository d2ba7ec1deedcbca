use chrono::{Local, NaiveDate, NaiveDateTime};
use rusqlite::{params, Connection};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Rows for an xDrip-shaped export
#[derive(Default)]
pub struct ExportFixture {
    pub readings: Vec<(i64, f64, NaiveDateTime)>,
    pub treatments: Vec<(i64, NaiveDateTime, Option<f64>, Option<f64>, Option<String>)>,
}

impl ExportFixture {
    /// Sensor readings every `step_minutes` across `date`
    pub fn with_day(mut self, date: NaiveDate, mgdl: f64, step_minutes: u32) -> Self {
        let first_id = self.readings.len() as i64;
        for (i, minute) in (0..24 * 60).step_by(step_minutes as usize).enumerate() {
            let ts = date.and_hms_opt(minute / 60, minute % 60, 0).unwrap();
            self.readings.push((first_id + i as i64, mgdl, ts));
        }
        self
    }

    pub fn write_zip(&self, dir: &Path) -> PathBuf {
        let db_path = dir.join("fixture.sqlite");
        {
            let conn = Connection::open(&db_path).unwrap();
            conn.execute_batch(
                "
                CREATE TABLE BgReadings (_id INTEGER PRIMARY KEY, calculated_value REAL, timestamp INTEGER);
                CREATE TABLE BloodTest (_id INTEGER PRIMARY KEY, mgdl REAL, timestamp INTEGER);
                CREATE TABLE Treatments (_id INTEGER PRIMARY KEY, timestamp INTEGER, insulin REAL, carbs REAL, notes TEXT);
                ",
            )
            .unwrap();
            for (id, mgdl, ts) in &self.readings {
                // wall-clock times skipped by a DST change have no epoch value
                let Some(ms) = local_millis(ts) else { continue };
                conn.execute("INSERT INTO BgReadings VALUES (?, ?, ?)", params![id, mgdl, ms])
                    .unwrap();
            }
            for (id, ts, insulin, carbs, notes) in &self.treatments {
                let ms = local_millis(ts).expect("treatment time exists in local zone");
                conn.execute(
                    "INSERT INTO Treatments VALUES (?, ?, ?, ?, ?)",
                    params![id, ms, insulin, carbs, notes],
                )
                .unwrap();
            }
        }

        let zip_path = dir.join("export.zip");
        let mut writer = zip::ZipWriter::new(std::fs::File::create(&zip_path).unwrap());
        writer
            .start_file("xdrip-export.sqlite", zip::write::SimpleFileOptions::default())
            .unwrap();
        writer.write_all(&std::fs::read(&db_path).unwrap()).unwrap();
        writer.finish().unwrap();
        std::fs::remove_file(&db_path).unwrap();
        zip_path
    }
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn local_millis(ts: &NaiveDateTime) -> Option<i64> {
    ts.and_local_timezone(Local)
        .earliest()
        .map(|dt| dt.timestamp_millis())
}

pub fn run_glucoview(args: &[&std::ffi::OsStr]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_glucoview"))
        .args(args)
        .output()
        .expect("failed to launch glucoview")
}
