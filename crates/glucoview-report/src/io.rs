//! Atomic report output

use crate::ReportError;
use std::path::Path;

/// Write data atomically using temp file + rename, so a failed run never
/// leaves a half-written report behind.
pub fn atomic_write(path: &Path, data: &[u8]) -> Result<(), ReportError> {
    let write_error = |source| ReportError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(write_error)?;
    }

    let temp_path = path.with_extension("tmp");
    if let Err(e) = std::fs::write(&temp_path, data).and_then(|_| std::fs::rename(&temp_path, path)) {
        let _ = std::fs::remove_file(&temp_path);
        return Err(write_error(e));
    }
    tracing::info!(path = %path.display(), bytes = data.len(), "report written");
    Ok(())
}
