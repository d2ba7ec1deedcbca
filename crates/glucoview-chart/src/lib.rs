//! Per-day chart composition for the glucose report

mod compose;
mod day;
mod error;
pub mod figure;
mod fragment;
mod meals;
mod stats;

pub use compose::{compose_day, compose_report, ComposedReport, DailyChart};
pub use day::{partition_by_day, DayBucket};
pub use error::ComposeError;
pub use fragment::{html_escape, render_fragment};
pub use meals::{anchor_meal, meal_label, meal_marker_y, MealAnchor, CORRECTION_SUGAR_LABEL};
pub use stats::{DayStats, Summary};
