use finbot::analytics::{RenderError, TrendRenderer, TrendSeries};
use std::path::{Path, PathBuf};
use tracing::debug;

const WIDTH: f64 = 600.0;
const HEIGHT: f64 = 300.0;
const MARGIN_LEFT: f64 = 80.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_TOP: f64 = 40.0;
const MARGIN_BOTTOM: f64 = 45.0;

pub(crate) const PUBLIC_PLOTS_PREFIX: &str = "/static/plots";

/// Writes trend charts as SVG files and hands back their public path.
pub(crate) struct SvgTrendRenderer {
    plots_dir: PathBuf,
}

impl SvgTrendRenderer {
    pub(crate) fn new(plots_dir: &Path) -> Self {
        Self {
            plots_dir: plots_dir.to_path_buf(),
        }
    }
}

impl TrendRenderer for SvgTrendRenderer {
    fn render(&self, series: &TrendSeries, file_stem: &str) -> Result<String, RenderError> {
        if series.points.is_empty() {
            return Err(RenderError::EmptySeries);
        }

        std::fs::create_dir_all(&self.plots_dir)?;
        let file_name = format!("{file_stem}.svg");
        let path = self.plots_dir.join(&file_name);
        std::fs::write(&path, render_svg(series))?;
        debug!(path = %path.display(), points = series.points.len(), "trend chart written");

        Ok(format!("{PUBLIC_PLOTS_PREFIX}/{file_name}"))
    }
}

/// Line chart with markers, year ticks and min/max value labels.
pub(crate) fn render_svg(series: &TrendSeries) -> String {
    let plot_width = WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
    let plot_height = HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;

    let (min_year, max_year) = bounds(series.points.iter().map(|point| f64::from(point.year)));
    let (mut min_value, mut max_value) = bounds(series.points.iter().map(|point| point.value));
    if (max_value - min_value).abs() < f64::EPSILON {
        let pad = (min_value.abs() * 0.1).max(1.0);
        min_value -= pad;
        max_value += pad;
    }

    let x = |year: i32| {
        if (max_year - min_year).abs() < f64::EPSILON {
            MARGIN_LEFT + plot_width / 2.0
        } else {
            MARGIN_LEFT + (f64::from(year) - min_year) / (max_year - min_year) * plot_width
        }
    };
    let y = |value: f64| MARGIN_TOP + (max_value - value) / (max_value - min_value) * plot_height;

    let bottom = MARGIN_TOP + plot_height;
    let mut elements = vec![
        format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{WIDTH}" height="{HEIGHT}" viewBox="0 0 {WIDTH} {HEIGHT}" font-family="sans-serif" font-size="11">"#
        ),
        r#"<rect width="100%" height="100%" fill="white"/>"#.to_string(),
        format!(
            r#"<text x="{}" y="22" text-anchor="middle" font-size="14">{}</text>"#,
            WIDTH / 2.0,
            escape_xml(&series.title())
        ),
        format!(
            r##"<g stroke="#999" stroke-dasharray="4 3"><line x1="{MARGIN_LEFT}" y1="{MARGIN_TOP}" x2="{MARGIN_LEFT}" y2="{bottom}"/><line x1="{MARGIN_LEFT}" y1="{bottom}" x2="{}" y2="{bottom}"/></g>"##,
            WIDTH - MARGIN_RIGHT
        ),
    ];

    for value in [max_value, min_value] {
        elements.push(format!(
            r#"<text x="{}" y="{:.1}" text-anchor="end">{value:.0}</text>"#,
            MARGIN_LEFT - 6.0,
            y(value) + 4.0
        ));
    }

    let coordinates: Vec<String> = series
        .points
        .iter()
        .map(|point| format!("{:.1},{:.1}", x(point.year), y(point.value)))
        .collect();
    elements.push(format!(
        r##"<polyline fill="none" stroke="#1f77b4" stroke-width="2" points="{}"/>"##,
        coordinates.join(" ")
    ));

    for point in &series.points {
        let (cx, cy) = (x(point.year), y(point.value));
        elements.push(format!(
            r##"<circle cx="{cx:.1}" cy="{cy:.1}" r="3.5" fill="#1f77b4"/>"##
        ));
        elements.push(format!(
            r#"<text x="{cx:.1}" y="{:.1}" text-anchor="middle">{}</text>"#,
            bottom + 16.0,
            point.year
        ));
    }

    elements.push(format!(
        r#"<text x="{}" y="{}" text-anchor="middle">Year</text>"#,
        MARGIN_LEFT + plot_width / 2.0,
        HEIGHT - 6.0
    ));
    elements.push("</svg>\n".to_string());

    elements.join("\n")
}

fn bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.fold((f64::INFINITY, f64::NEG_INFINITY), |(low, high), value| {
        (low.min(value), high.max(value))
    })
}

fn escape_xml(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
