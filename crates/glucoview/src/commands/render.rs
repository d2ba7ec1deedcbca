use crate::cli::Cli;
use anyhow::Context;
use chrono::{Local, NaiveDateTime, TimeZone};
use glucoview_chart::ComposedReport;
use glucoview_core::{deconflict, normalize, Config, RetentionWindow};
use glucoview_report::{atomic_write, render_document, PlotlyScript, PLOTLY_CDN_URL};
use std::path::Path;

pub fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = cli.config();
    config.validate().context("invalid configuration")?;

    let now = Local::now().naive_local();
    let report = compose(&cli.archive, &config, &Local, now)?;

    let script = if cli.inline_plotly {
        PlotlyScript::fetch_inline(PLOTLY_CDN_URL)?
    } else {
        PlotlyScript::cdn()
    };
    let html = render_document(&report, &script, now)?;
    atomic_write(&cli.output, html.as_bytes())?;

    println!(
        "Wrote {} ({} days, average {:.1} mmol/l)",
        cli.output.display(),
        report.summary.days,
        report.summary.average
    );
    Ok(())
}

/// Load the export and compose every chart in the window ending at `now`
fn compose<Tz: TimeZone>(
    archive: &Path,
    config: &Config,
    tz: &Tz,
    now: NaiveDateTime,
) -> anyhow::Result<ComposedReport> {
    let export = glucoview_extract::extract_export(archive)
        .with_context(|| format!("failed to load {}", archive.display()))?;

    let mut timeline = normalize(&export, &config.insulin, tz);
    timeline.insulin = deconflict(&timeline.insulin, &config.deconflict);

    let window = RetentionWindow::ending(now.date(), config.last_days);
    let windowed = window.apply(&timeline);
    tracing::info!(
        start = %window.start,
        end = %window.end,
        measurements = windowed.measurements.len(),
        "applied retention window"
    );

    glucoview_chart::compose_report(&windowed, &config.chart).with_context(|| {
        format!(
            "nothing to chart for the last {} days; check --last-days and the glucose range bounds",
            config.last_days
        )
    })
}
