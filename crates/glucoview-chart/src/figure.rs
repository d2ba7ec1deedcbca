//! Plotly figure model
//!
//! Only the subset of the Plotly JSON schema the daily charts use. Field
//! names follow Plotly's so the structs serialize straight into the
//! `Plotly.newPlot` arguments.

use chrono::NaiveDateTime;
use serde::Serialize;

const PLOTLY_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Plotly date string for a wall-clock time
pub fn plotly_time(ts: &NaiveDateTime) -> String {
    ts.format(PLOTLY_TIME_FORMAT).to_string()
}

#[derive(Debug, Clone, Serialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

/// A single color or one color per point
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Color {
    One(&'static str),
    Each(Vec<&'static str>),
}

#[derive(Debug, Clone, Serialize)]
pub struct Marker {
    pub color: Color,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Line {
    pub color: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dash: Option<&'static str>,
}

impl Line {
    pub fn solid(color: &'static str, width: u32) -> Self {
        Self {
            color,
            width: Some(width),
            dash: None,
        }
    }

    pub fn dashed(color: &'static str, width: u32) -> Self {
        Self {
            color,
            width: Some(width),
            dash: Some("dash"),
        }
    }
}

/// Scatter trace
#[derive(Debug, Clone, Serialize)]
pub struct Trace {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub mode: &'static str,
    pub x: Vec<String>,
    pub y: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<Vec<String>>,
    #[serde(rename = "textposition", skip_serializing_if = "Option::is_none")]
    pub text_position: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<Marker>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<Line>,
    #[serde(rename = "showlegend")]
    pub show_legend: bool,
}

impl Trace {
    pub fn scatter(mode: &'static str, x: Vec<String>, y: Vec<f64>) -> Self {
        Self {
            kind: "scatter",
            mode,
            x,
            y,
            name: None,
            text: None,
            text_position: None,
            marker: None,
            line: None,
            show_legend: false,
        }
    }
}

/// Line shape in data coordinates
#[derive(Debug, Clone, Serialize)]
pub struct Shape {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub x0: String,
    pub x1: String,
    pub y0: f64,
    pub y1: f64,
    pub xref: &'static str,
    pub yref: &'static str,
    pub line: Line,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layer: Option<&'static str>,
}

impl Shape {
    /// Vertical line at `x` from `y0` to `y1`
    pub fn vertical(x: String, y0: f64, y1: f64, line: Line) -> Self {
        Self {
            kind: "line",
            x0: x.clone(),
            x1: x,
            y0,
            y1,
            xref: "x",
            yref: "y",
            line,
            layer: None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Font {
    pub color: &'static str,
    pub size: u32,
    pub family: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct Annotation {
    pub text: String,
    pub x: String,
    pub y: f64,
    #[serde(rename = "showarrow")]
    pub show_arrow: bool,
    pub font: Font,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AxisRange {
    Time(String, String),
    Value(f64, f64),
}

#[derive(Debug, Clone, Serialize)]
pub struct AxisTitle {
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Axis {
    pub title: AxisTitle,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<AxisRange>,
    #[serde(rename = "showgrid")]
    pub show_grid: bool,
    #[serde(rename = "gridcolor", skip_serializing_if = "Option::is_none")]
    pub grid_color: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dtick: Option<f64>,
    #[serde(rename = "zeroline")]
    pub zero_line: bool,
    #[serde(rename = "tickformat", skip_serializing_if = "Option::is_none")]
    pub tick_format: Option<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Layout {
    pub width: u32,
    pub height: u32,
    #[serde(rename = "showlegend")]
    pub show_legend: bool,
    pub xaxis: Axis,
    pub yaxis: Axis,
    pub shapes: Vec<Shape>,
    pub annotations: Vec<Annotation>,
}
