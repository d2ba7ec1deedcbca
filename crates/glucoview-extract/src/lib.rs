//! Reads an xDrip export archive into raw timeline rows

mod archive;
mod error;
mod storage;

pub use archive::{extract_export, extract_export_in, ExportArchive, DATABASE_EXTENSION};
pub use error::ExtractError;
pub use storage::ExportDb;
