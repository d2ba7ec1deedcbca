use clap::Parser;
use glucoview_core::{Canvas, Config, GlucoseRange, InsulinBounds};
use glucoview_report::DEFAULT_OUTPUT_FILE;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "glucoview")]
#[command(version)]
#[command(about = "Daily glucose, insulin and meal charts from an xDrip export")]
pub struct Cli {
    /// ZIP file containing the xDrip database (exported from the app)
    pub archive: PathBuf,

    /// Number of last days to create graphs for [default: 7]
    #[arg(long)]
    pub last_days: Option<u32>,

    /// Minimum dose counted as long-acting insulin [default: 15]
    #[arg(long)]
    pub min_long_insulin: Option<u32>,

    /// Maximum dose counted as long-acting insulin [default: 25]
    #[arg(long)]
    pub max_long_insulin: Option<u32>,

    /// Minimum acceptable blood glucose in mmol/l [default: 4]
    #[arg(long)]
    pub min_acceptable_bg: Option<f64>,

    /// Maximum acceptable blood glucose in mmol/l [default: 10]
    #[arg(long)]
    pub max_acceptable_bg: Option<f64>,

    /// Draw 1024x768 charts instead of 1600x900
    #[arg(long)]
    pub no_widescreen: bool,

    /// Insulin doses this many minutes apart or closer are pushed apart [default: 15]
    #[arg(long)]
    pub deconflict_minutes: Option<u32>,

    /// Where to write the report
    #[arg(short, long, default_value = DEFAULT_OUTPUT_FILE)]
    pub output: PathBuf,

    /// Embed the charting runtime instead of linking the CDN copy
    #[arg(long)]
    pub inline_plotly: bool,
}

impl Cli {
    /// Defaults from `Config::new`, overridden by any flag that was given
    pub fn config(&self) -> Config {
        let mut config = Config::new();
        if let Some(days) = self.last_days {
            config.last_days = days;
        }
        config.insulin = InsulinBounds::new(
            self.min_long_insulin.unwrap_or(config.insulin.min_long),
            self.max_long_insulin.unwrap_or(config.insulin.max_long),
        );
        config.chart.acceptable = GlucoseRange::new(
            self.min_acceptable_bg.unwrap_or(config.chart.acceptable.min),
            self.max_acceptable_bg.unwrap_or(config.chart.acceptable.max),
        );
        config.chart.canvas = Canvas::from_widescreen(!self.no_widescreen);
        if let Some(minutes) = self.deconflict_minutes {
            config.deconflict.threshold = chrono::Duration::minutes(i64::from(minutes));
        }
        config
    }
}
