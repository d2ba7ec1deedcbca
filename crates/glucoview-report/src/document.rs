//! Full HTML document assembly

use crate::{PlotlyScript, ReportError};
use chrono::NaiveDateTime;
use glucoview_chart::{render_fragment, ComposedReport};

pub const REPORT_TITLE: &str = "xDrip Database Overview";
pub const DEFAULT_OUTPUT_FILE: &str = "xdrip_database.html";

const STYLE: &str = "body{font-family:Arial,Helvetica,sans-serif;margin:0 auto;text-align:center}\
section.day{margin:2em auto}\
.day-stats{color:#555}\
.chart{margin:0 auto}\
ul.notes{display:inline-block;text-align:left}";

pub fn render_document(
    report: &ComposedReport,
    script: &PlotlyScript,
    generated_at: NaiveDateTime,
) -> Result<String, ReportError> {
    let summary = &report.summary;
    let days = report
        .days
        .iter()
        .map(render_fragment)
        .collect::<Result<Vec<_>, _>>()?
        .join("\n");

    Ok(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>{title}</title>
    <style>{style}</style>
    {script}
</head>
<body>
<h1>{title}</h1>
<p class="generated">Generated {generated}</p>
<h2>Average Blood Glucose: {average:.1} mmol/l</h2>
<p class="summary">{days_count} days | {readings} readings | {in_range:.0}% in range</p>
{days}
</body>
</html>
"#,
        title = REPORT_TITLE,
        style = STYLE,
        script = script.to_html(),
        generated = generated_at.format("%Y-%m-%d %H:%M:%S"),
        average = summary.average,
        days_count = summary.days,
        readings = summary.readings,
        in_range = summary.time_in_range(),
        days = days,
    ))
}
