//! Report assembly and output for the daily glucose charts

mod asset;
mod document;
mod error;
mod io;

pub use asset::{PlotlyScript, PLOTLY_CDN_URL};
pub use document::{render_document, DEFAULT_OUTPUT_FILE, REPORT_TITLE};
pub use error::ReportError;
pub use io::atomic_write;
