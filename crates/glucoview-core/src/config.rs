//! Configuration for loading, deconfliction and chart layout

use chrono::Duration;
use serde::{Deserialize, Serialize};

/// Inclusive dose range that is drawn as long-acting insulin.
///
/// This is a value-range heuristic, not a lookup against a drug registry:
/// any dose whose unit count falls inside the range is treated as
/// long-acting, everything else as short-acting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsulinBounds {
    pub min_long: u32,
    pub max_long: u32,
}

impl InsulinBounds {
    pub fn new(min_long: u32, max_long: u32) -> Self {
        Self { min_long, max_long }
    }

    pub fn is_long_acting(&self, dose_units: u32) -> bool {
        (self.min_long..=self.max_long).contains(&dose_units)
    }
}

impl Default for InsulinBounds {
    fn default() -> Self {
        Self::new(15, 25)
    }
}

/// Acceptable blood glucose range in mmol/l (both ends inclusive)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GlucoseRange {
    pub min: f64,
    pub max: f64,
}

impl GlucoseRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }
}

impl Default for GlucoseRange {
    fn default() -> Self {
        Self::new(4.0, 10.0)
    }
}

/// Fixed chart canvas presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Canvas {
    /// 1600x900
    Widescreen,
    /// 1024x768
    Standard,
}

impl Canvas {
    pub fn from_widescreen(widescreen: bool) -> Self {
        if widescreen {
            Canvas::Widescreen
        } else {
            Canvas::Standard
        }
    }

    /// (width, height) in pixels
    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            Canvas::Widescreen => (1600, 900),
            Canvas::Standard => (1024, 768),
        }
    }
}

/// Rules for pushing apart insulin doses that would overlap on a chart
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeconflictPolicy {
    /// Adjacent doses at most this far apart get nudged
    pub threshold: Duration,
}

impl DeconflictPolicy {
    pub fn new(threshold: Duration) -> Self {
        Self { threshold }
    }

    /// Distance each member of a close pair moves (half the threshold)
    pub fn shift(&self) -> Duration {
        self.threshold / 2
    }
}

impl Default for DeconflictPolicy {
    fn default() -> Self {
        Self::new(Duration::minutes(15))
    }
}

/// Layout parameters for the daily charts
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartConfig {
    /// Acceptable glucose range (reference lines and point colors)
    pub acceptable: GlucoseRange,

    /// Upper bound of the fixed y-axis
    pub max_display: f64,

    /// Canvas size preset
    pub canvas: Canvas,

    /// Meals further than this from every reading of the day are not drawn
    pub meal_anchor_tolerance: Duration,
}

impl ChartConfig {
    pub fn new() -> Self {
        Self {
            acceptable: GlucoseRange::default(),
            max_display: 22.0,
            canvas: Canvas::Widescreen,
            meal_anchor_tolerance: Duration::minutes(5),
        }
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("retention window must cover at least one day")]
    EmptyWindow,

    #[error("long-acting insulin bounds are inverted: min {min} > max {max}")]
    InvertedInsulinBounds { min: u32, max: u32 },

    #[error("acceptable glucose range is invalid: min {min} > max {max}")]
    InvertedGlucoseRange { min: f64, max: f64 },

    #[error("deconfliction threshold must not be negative")]
    NegativeThreshold,
}

/// Complete run configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Number of calendar days, ending today, that are charted
    pub last_days: u32,

    /// Long-acting insulin classification
    pub insulin: InsulinBounds,

    /// Dose deconfliction
    pub deconflict: DeconflictPolicy,

    /// Chart layout
    pub chart: ChartConfig,
}

impl Config {
    pub fn new() -> Self {
        Self {
            last_days: 7,
            insulin: InsulinBounds::default(),
            deconflict: DeconflictPolicy::default(),
            chart: ChartConfig::new(),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.last_days == 0 {
            return Err(ConfigError::EmptyWindow);
        }
        if self.insulin.min_long > self.insulin.max_long {
            return Err(ConfigError::InvertedInsulinBounds {
                min: self.insulin.min_long,
                max: self.insulin.max_long,
            });
        }
        let range = self.chart.acceptable;
        if range.min.is_nan() || range.max.is_nan() || range.min > range.max {
            return Err(ConfigError::InvertedGlucoseRange {
                min: range.min,
                max: range.max,
            });
        }
        if self.deconflict.threshold < Duration::zero() {
            return Err(ConfigError::NegativeThreshold);
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
