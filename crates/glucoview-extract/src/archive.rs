//! Export archive handling and scoped extraction of the database snapshot

use crate::{ExportDb, ExtractError};
use glucoview_core::RawExport;
use std::fs::File;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use zip::ZipArchive;

/// File extension identifying the embedded database
pub const DATABASE_EXTENSION: &str = ".sqlite";

pub struct ExportArchive {
    path: PathBuf,
    archive: ZipArchive<File>,
}

impl ExportArchive {
    pub fn open(path: &Path) -> Result<Self, ExtractError> {
        let archive_error = |source| ExtractError::Archive {
            path: path.to_path_buf(),
            source,
        };
        let file = File::open(path).map_err(|e| archive_error(zip::result::ZipError::Io(e)))?;
        let archive = ZipArchive::new(file).map_err(archive_error)?;
        Ok(Self {
            path: path.to_path_buf(),
            archive,
        })
    }

    /// Name of the database entry; the first match wins
    pub fn database_entry(&self) -> Result<String, ExtractError> {
        let mut candidates = self
            .archive
            .file_names()
            .filter(|name| name.ends_with(DATABASE_EXTENSION));
        let Some(first) = candidates.next() else {
            return Err(ExtractError::NoDatabaseFound(self.path.clone()));
        };
        let extra = candidates.count();
        if extra > 0 {
            tracing::warn!(entry = first, ignored = extra, "archive holds several databases, using the first");
        }
        Ok(first.to_string())
    }

    /// Copy the database entry into a temp file inside `dir`.
    /// The file is deleted when the returned handle is dropped.
    pub fn extract_database_in(&mut self, dir: &Path) -> Result<NamedTempFile, ExtractError> {
        let entry = self.database_entry()?;
        tracing::info!(archive = %self.path.display(), entry = %entry, "extracting database");

        let mut source = self.archive.by_name(&entry).map_err(|source| ExtractError::Archive {
            path: self.path.clone(),
            source,
        })?;
        let mut target = tempfile::Builder::new()
            .prefix("glucoview-")
            .suffix(DATABASE_EXTENSION)
            .tempfile_in(dir)?;
        std::io::copy(&mut source, target.as_file_mut())?;
        target.as_file_mut().sync_all()?;
        Ok(target)
    }
}

/// Read every raw row from the export at `path`, staging the database in the
/// system temp directory.
pub fn extract_export(path: &Path) -> Result<RawExport, ExtractError> {
    extract_export_in(path, &std::env::temp_dir())
}

/// Like [`extract_export`] with an explicit staging directory. The staged
/// copy is removed on every return path.
pub fn extract_export_in(path: &Path, staging_dir: &Path) -> Result<RawExport, ExtractError> {
    let mut archive = ExportArchive::open(path)?;
    let staged = archive.extract_database_in(staging_dir)?;
    let export = {
        let db = ExportDb::open(staged.path())?;
        db.read_export()?
    };
    tracing::info!(
        sensor_readings = export.sensor_readings.len(),
        blood_tests = export.blood_tests.len(),
        treatments = export.treatments.len(),
        "export loaded"
    );
    Ok(export)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::tests::create_schema;
    use rusqlite::{params, Connection};
    use std::io::Write;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    fn write_zip(path: &Path, entries: &[(&str, Vec<u8>)]) {
        let mut writer = ZipWriter::new(File::create(path).unwrap());
        for (name, bytes) in entries {
            writer.start_file(*name, SimpleFileOptions::default()).unwrap();
            writer.write_all(bytes).unwrap();
        }
        writer.finish().unwrap();
    }

    fn database_bytes(dir: &Path, with_schema: bool) -> Vec<u8> {
        let db_path = dir.join("source.db");
        {
            let conn = Connection::open(&db_path).unwrap();
            if with_schema {
                create_schema(&conn);
                conn.execute(
                    "INSERT INTO BgReadings VALUES (?, ?, ?)",
                    params![1, 90.0, 1_709_294_400_000_i64],
                )
                .unwrap();
            } else {
                conn.execute_batch("CREATE TABLE Unrelated (x INTEGER);").unwrap();
            }
        }
        let bytes = std::fs::read(&db_path).unwrap();
        std::fs::remove_file(&db_path).unwrap();
        bytes
    }

    fn staging_is_empty(dir: &Path) -> bool {
        std::fs::read_dir(dir).unwrap().next().is_none()
    }

    #[test]
    fn test_extract_export() {
        let dir = tempfile::tempdir().unwrap();
        let staging = tempfile::tempdir().unwrap();
        let zip_path = dir.path().join("export.zip");
        let db = database_bytes(dir.path(), true);
        write_zip(
            &zip_path,
            &[("readme.txt", b"xDrip export".to_vec()), ("export20240301.sqlite", db)],
        );

        let export = extract_export_in(&zip_path, staging.path()).unwrap();
        assert_eq!(export.sensor_readings.len(), 1);
        assert!(export.treatments.is_empty());
        assert!(staging_is_empty(staging.path()));
    }

    #[test]
    fn test_staged_copy_removed_on_query_failure() {
        let dir = tempfile::tempdir().unwrap();
        let staging = tempfile::tempdir().unwrap();
        let zip_path = dir.path().join("export.zip");
        let db = database_bytes(dir.path(), false);
        write_zip(&zip_path, &[("export.sqlite", db)]);

        let err = extract_export_in(&zip_path, staging.path()).unwrap_err();
        assert!(matches!(err, ExtractError::Extraction { table: "BgReadings", .. }));
        assert!(staging_is_empty(staging.path()));
    }

    #[test]
    fn test_no_database_found() {
        let dir = tempfile::tempdir().unwrap();
        let zip_path = dir.path().join("export.zip");
        write_zip(&zip_path, &[("notes.txt", b"nothing here".to_vec())]);

        let err = extract_export(&zip_path).unwrap_err();
        assert!(matches!(err, ExtractError::NoDatabaseFound(_)));
        assert!(err.is_archive_error());
    }

    #[test]
    fn test_invalid_archive() {
        let dir = tempfile::tempdir().unwrap();
        let bogus = dir.path().join("export.zip");
        std::fs::write(&bogus, b"definitely not a zip").unwrap();

        let err = extract_export(&bogus).unwrap_err();
        assert!(matches!(err, ExtractError::Archive { .. }));

        let missing = dir.path().join("missing.zip");
        assert!(extract_export(&missing).unwrap_err().is_archive_error());
    }

    #[test]
    fn test_first_database_entry_wins() {
        let dir = tempfile::tempdir().unwrap();
        let zip_path = dir.path().join("export.zip");
        write_zip(
            &zip_path,
            &[("a.sqlite", b"one".to_vec()), ("b.sqlite", b"two".to_vec())],
        );
        let archive = ExportArchive::open(&zip_path).unwrap();
        assert_eq!(archive.database_entry().unwrap(), "a.sqlite");
    }
}
