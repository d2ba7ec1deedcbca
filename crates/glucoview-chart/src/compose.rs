//! Daily chart layout

use crate::day::{partition_by_day, DayBucket};
use crate::figure::{
    plotly_time, Annotation, Axis, AxisRange, AxisTitle, Color, Figure, Font, Layout, Line, Marker,
    Shape, Trace,
};
use crate::meals::{anchor_meal, meal_label, meal_marker_y};
use crate::stats::{DayStats, Summary};
use crate::ComposeError;
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use glucoview_core::{ChartConfig, InsulinTreatment, Note, Timeline};

const IN_RANGE_COLOR: &str = "green";
const OUT_OF_RANGE_COLOR: &str = "red";
const TRACE_LINE_COLOR: &str = "gray";
const REFERENCE_LINE_COLOR: &str = "red";
const GRID_COLOR: &str = "lightgrey";
const LONG_ACTING_COLOR: &str = "green";
const SHORT_ACTING_COLOR: &str = "purple";
const MEAL_COLOR: &str = "darkorange";
const CORRECTION_SUGAR_COLOR: &str = "deeppink";

const GRIDLINE_STEP_HOURS: usize = 3;

/// Short-acting dose labels sit near the bottom of the chart
const SHORT_LABEL_Y: f64 = 1.0;
/// Long-acting dose labels sit this far below the top of the y-axis
const LONG_LABEL_DROP: f64 = 3.0;
/// Every other dose label is raised by this much
const LABEL_ALTERNATE_STEP: f64 = 1.0;

const ANNOTATION_FONT_SIZE: u32 = 18;

/// One rendered day
#[derive(Debug, Clone)]
pub struct DailyChart {
    pub date: NaiveDate,
    pub figure: Figure,
    pub notes: Vec<Note>,
    pub stats: DayStats,
    /// Meals with no reading close enough to hang a marker on
    pub unanchored_meals: usize,
}

/// All charts for the window plus the header statistics
#[derive(Debug, Clone)]
pub struct ComposedReport {
    /// Newest day first
    pub days: Vec<DailyChart>,
    pub summary: Summary,
}

fn day_bounds(date: NaiveDate) -> (NaiveDateTime, NaiveDateTime) {
    let start = date.and_time(NaiveTime::MIN);
    (start, start + Duration::days(1))
}

fn insulin_color(treatment: &InsulinTreatment) -> &'static str {
    if treatment.is_long_acting() {
        LONG_ACTING_COLOR
    } else {
        SHORT_ACTING_COLOR
    }
}

/// Label height for the `position`-th dose of the day
fn insulin_label_y(treatment: &InsulinTreatment, position: usize, max_display: f64) -> f64 {
    let base = if treatment.is_long_acting() {
        max_display - LONG_LABEL_DROP
    } else {
        SHORT_LABEL_Y
    };
    if position % 2 == 1 {
        base + LABEL_ALTERNATE_STEP
    } else {
        base
    }
}

fn glucose_trace(day: &DayBucket, config: &ChartConfig) -> Trace {
    let colors = day
        .measurements
        .iter()
        .map(|m| {
            if config.acceptable.contains(m.value) {
                IN_RANGE_COLOR
            } else {
                OUT_OF_RANGE_COLOR
            }
        })
        .collect();

    let mut trace = Trace::scatter(
        "markers+lines",
        day.measurements.iter().map(|m| plotly_time(&m.timestamp)).collect(),
        day.measurements.iter().map(|m| m.value).collect(),
    );
    trace.marker = Some(Marker {
        color: Color::Each(colors),
        size: None,
        symbol: None,
    });
    trace.line = Some(Line::solid(TRACE_LINE_COLOR, 1));
    trace
}

fn reference_line(name: String, value: f64, start: &NaiveDateTime, end: &NaiveDateTime) -> Trace {
    let mut trace = Trace::scatter("lines", vec![plotly_time(start), plotly_time(end)], vec![value, value]);
    trace.name = Some(name);
    trace.line = Some(Line::solid(REFERENCE_LINE_COLOR, 1));
    trace
}

fn hour_gridlines(start: &NaiveDateTime, max_display: f64) -> Vec<Shape> {
    (0..24)
        .step_by(GRIDLINE_STEP_HOURS)
        .map(|hour| {
            let mut shape = Shape::vertical(
                plotly_time(&(*start + Duration::hours(hour as i64))),
                0.0,
                max_display,
                Line::solid(GRID_COLOR, 1),
            );
            shape.layer = Some("below");
            shape
        })
        .collect()
}

fn insulin_markers(day: &DayBucket, max_display: f64) -> (Vec<Shape>, Vec<Annotation>) {
    day.insulin
        .iter()
        .enumerate()
        .map(|(position, treatment)| {
            let color = insulin_color(treatment);
            let x = plotly_time(&treatment.timestamp);
            let line = if treatment.is_long_acting() {
                Line::solid(color, 2)
            } else {
                Line::dashed(color, 2)
            };
            let shape = Shape::vertical(x.clone(), 0.0, max_display, line);
            let annotation = Annotation {
                text: treatment.dose_units.to_string(),
                x,
                y: insulin_label_y(treatment, position, max_display),
                show_arrow: true,
                font: Font {
                    color,
                    size: ANNOTATION_FONT_SIZE,
                    family: "Arial",
                },
            };
            (shape, annotation)
        })
        .unzip()
}

/// Meal marker trace, `None` when no meal could be anchored
fn meal_trace(day: &DayBucket, config: &ChartConfig) -> (Option<Trace>, usize) {
    let mut x = Vec::new();
    let mut y = Vec::new();
    let mut labels = Vec::new();
    let mut colors = Vec::new();
    let mut unanchored = 0;

    for meal in &day.meals {
        let Some(anchor) = anchor_meal(meal, &day.measurements, config.meal_anchor_tolerance) else {
            tracing::debug!(meal = meal.id, date = %day.date, "no reading close enough to meal");
            unanchored += 1;
            continue;
        };
        x.push(plotly_time(&meal.timestamp));
        y.push(meal_marker_y(&anchor, config.acceptable.max, config.max_display));
        labels.push(meal_label(meal));
        colors.push(if meal.is_correction_sugar() {
            CORRECTION_SUGAR_COLOR
        } else {
            MEAL_COLOR
        });
    }

    if x.is_empty() {
        return (None, unanchored);
    }
    let mut trace = Trace::scatter("markers+text", x, y);
    trace.text = Some(labels);
    trace.text_position = Some("top center");
    trace.marker = Some(Marker {
        color: Color::Each(colors),
        size: Some(12),
        symbol: Some("triangle-down"),
    });
    (Some(trace), unanchored)
}

fn base_layout(start: &NaiveDateTime, end: &NaiveDateTime, config: &ChartConfig) -> Layout {
    let (width, height) = config.canvas.dimensions();
    Layout {
        width,
        height,
        show_legend: false,
        xaxis: Axis {
            title: AxisTitle {
                text: "Time".to_string(),
            },
            kind: Some("date"),
            range: Some(AxisRange::Time(plotly_time(start), plotly_time(end))),
            show_grid: false,
            grid_color: None,
            dtick: None,
            zero_line: false,
            tick_format: Some("%H:%M"),
        },
        yaxis: Axis {
            title: AxisTitle {
                text: "Blood Glucose (mmol/l)".to_string(),
            },
            kind: None,
            range: Some(AxisRange::Value(0.0, config.max_display)),
            show_grid: true,
            grid_color: Some(GRID_COLOR),
            dtick: Some(1.0),
            zero_line: false,
            tick_format: None,
        },
        shapes: Vec::new(),
        annotations: Vec::new(),
    }
}

/// Build the chart for a single day
pub fn compose_day(day: &DayBucket, config: &ChartConfig) -> Result<DailyChart, ComposeError> {
    let stats = DayStats::from_measurements(&day.measurements, &config.acceptable).ok_or_else(|| {
        ComposeError::InsufficientData {
            reason: format!("no glucose readings on {}", day.date),
        }
    })?;
    let (start, end) = day_bounds(day.date);
    let range = config.acceptable;

    let mut data = vec![
        glucose_trace(day, config),
        reference_line(format!("Acceptable Min: {}", range.min), range.min, &start, &end),
        reference_line(format!("Acceptable Max: {}", range.max), range.max, &start, &end),
    ];
    let (meals, unanchored_meals) = meal_trace(day, config);
    data.extend(meals);

    let (insulin_shapes, annotations) = insulin_markers(day, config.max_display);
    let mut layout = base_layout(&start, &end, config);
    layout.shapes = hour_gridlines(&start, config.max_display);
    layout.shapes.extend(insulin_shapes);
    layout.annotations = annotations;

    Ok(DailyChart {
        date: day.date,
        figure: Figure { data, layout },
        notes: day.notes.clone(),
        stats,
        unanchored_meals,
    })
}

/// Compose every day of an already windowed timeline.
///
/// Fails with `InsufficientData` when there are no readings or the average
/// over the window is not a positive number.
pub fn compose_report(timeline: &Timeline, config: &ChartConfig) -> Result<ComposedReport, ComposeError> {
    if timeline.measurements.is_empty() {
        return Err(ComposeError::InsufficientData {
            reason: "no glucose readings in the retention window".to_string(),
        });
    }

    let days = partition_by_day(timeline)
        .iter()
        .map(|day| compose_day(day, config))
        .collect::<Result<Vec<_>, _>>()?;

    let stats: Vec<DayStats> = days.iter().map(|d| d.stats).collect();
    let summary = Summary::from_days(&stats).ok_or_else(|| ComposeError::InsufficientData {
        reason: "average glucose over the window is zero or undefined".to_string(),
    })?;

    tracing::info!(days = days.len(), average = summary.average, "composed daily charts");
    Ok(ComposedReport { days, summary })
}
