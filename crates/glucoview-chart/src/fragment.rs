//! HTML fragment for one day: heading, chart container, plot call, notes

use crate::compose::DailyChart;

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// JSON that is safe to place inside a `<script>` element
fn script_json<T: serde::Serialize>(value: &T) -> Result<String, serde_json::Error> {
    Ok(serde_json::to_string(value)?.replace("</", "<\\/"))
}

pub fn render_fragment(chart: &DailyChart) -> Result<String, serde_json::Error> {
    let date = chart.date.format("%Y-%m-%d");
    let div_id = format!("chart-{date}");
    let (width, height) = (chart.figure.layout.width, chart.figure.layout.height);
    let stats = &chart.stats;
    let data = script_json(&chart.figure.data)?;
    let layout = script_json(&chart.figure.layout)?;

    let notes = if chart.notes.is_empty() {
        String::new()
    } else {
        let items: String = chart
            .notes
            .iter()
            .map(|note| {
                format!(
                    "<li><time>{}</time> {}</li>\n",
                    note.timestamp.format("%H:%M"),
                    html_escape(&note.text)
                )
            })
            .collect();
        format!("<ul class=\"notes\">\n{items}</ul>\n")
    };

    Ok(format!(
        r#"<section class="day">
<h2>Date: {date}</h2>
<p class="day-stats">Average {mean:.1} mmol/l | {in_range:.0}% in range | {readings} readings | min {min:.1} max {max:.1}</p>
<div id="{div_id}" class="chart" style="width:{width}px;height:{height}px;"></div>
<script>Plotly.newPlot("{div_id}", {data}, {layout}, {{"displaylogo": false}});</script>
{notes}</section>
"#,
        mean = stats.mean,
        in_range = stats.time_in_range(),
        readings = stats.readings,
        min = stats.min,
        max = stats.max,
    ))
}
