use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("failed to fetch charting runtime from {url}: {source}")]
    AssetFetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to serialize chart: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write report to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
