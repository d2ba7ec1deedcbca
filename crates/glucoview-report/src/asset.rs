//! Source of the Plotly runtime used by the report

use crate::ReportError;

pub const PLOTLY_CDN_URL: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

/// How the report loads Plotly
#[derive(Debug, Clone, PartialEq)]
pub enum PlotlyScript {
    /// `<script src>` reference, needs network access when viewing
    Cdn(String),
    /// Script source embedded in the document
    Inline(String),
}

impl PlotlyScript {
    pub fn cdn() -> Self {
        PlotlyScript::Cdn(PLOTLY_CDN_URL.to_string())
    }

    /// Download the runtime once so the report works offline
    pub fn fetch_inline(url: &str) -> Result<Self, ReportError> {
        let fetch_error = |source| ReportError::AssetFetch {
            url: url.to_string(),
            source,
        };
        tracing::info!(url, "fetching charting runtime");
        let source = reqwest::blocking::get(url)
            .and_then(|response| response.error_for_status())
            .and_then(|response| response.text())
            .map_err(fetch_error)?;
        tracing::debug!(bytes = source.len(), "charting runtime fetched");
        Ok(PlotlyScript::Inline(source))
    }

    pub fn to_html(&self) -> String {
        match self {
            PlotlyScript::Cdn(url) => format!(
                "<script src=\"{}\" charset=\"utf-8\"></script>",
                glucoview_chart::html_escape(url)
            ),
            PlotlyScript::Inline(source) => format!(
                "<script type=\"text/javascript\">{}</script>",
                source.replace("</script", "<\\/script")
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cdn_tag() {
        let html = PlotlyScript::cdn().to_html();
        assert!(html.starts_with("<script src=\"https://cdn.plot.ly/"));
        assert!(html.ends_with("</script>"));
    }

    #[test]
    fn test_inline_tag_escapes_closing_script() {
        let script = PlotlyScript::Inline("var s = '</script>';".to_string());
        let html = script.to_html();
        assert_eq!(html.matches("</script>").count(), 1);
        assert!(html.contains("<\\/script>"));
    }

    #[test]
    fn test_fetch_failure_is_asset_error() {
        // nothing listens on the discard port
        let err = PlotlyScript::fetch_inline("http://127.0.0.1:9/plotly.min.js").unwrap_err();
        assert!(matches!(err, ReportError::AssetFetch { .. }));
        assert!(err.to_string().contains("127.0.0.1:9"));
    }
}
