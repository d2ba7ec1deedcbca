//! Timeline model, unit conversion and treatment deconfliction

mod config;
mod convert;
mod deconflict;
mod normalize;
mod raw;
mod types;
mod window;

pub use config::{Canvas, ChartConfig, Config, ConfigError, DeconflictPolicy, GlucoseRange, InsulinBounds};
pub use convert::{display_time, mgdl_to_mmol, round1, MGDL_PER_MMOL};
pub use deconflict::deconflict;
pub use normalize::{insulin_projection, meal_projection, measurement_from_reading, normalize, note_projection};
pub use raw::{RawExport, RawReading, RawTreatment};
pub use types::{InsulinKind, InsulinTreatment, Meal, Measurement, Note, ReadingSource, Timeline};
pub use window::RetentionWindow;
