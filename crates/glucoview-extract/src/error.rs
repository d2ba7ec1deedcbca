use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("cannot read archive {path}: {source}")]
    Archive {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("no .sqlite database found in archive {0}")]
    NoDatabaseFound(PathBuf),

    #[error("failed to read table {table}: {source}")]
    Extraction {
        table: &'static str,
        #[source]
        source: rusqlite::Error,
    },

    #[error("cannot open extracted database: {0}")]
    Open(#[source] rusqlite::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ExtractError {
    /// True for failures of the archive itself rather than its contents
    pub fn is_archive_error(&self) -> bool {
        matches!(self, ExtractError::Archive { .. } | ExtractError::NoDatabaseFound(_))
    }
}
