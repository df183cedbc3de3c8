//! SVG bar and line chart generation.
//!
//! Charts are written by hand as SVG strings:
//! - Bar charts for ranked and categorical reports
//! - Line chart with point markers for the monthly trend
//! - A boxed terminal table for quick inspection

use crate::report::{ChartKind, Report, ReportKind};
use crate::utils::config::{DEFAULT_CHART_HEIGHT, DEFAULT_CHART_WIDTH};
use crate::utils::error::ChartError;
use log::info;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

const MARGIN_LEFT: f64 = 80.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_TOP: f64 = 50.0;
const MARGIN_BOTTOM: f64 = 120.0;
const GRID_LINES: usize = 5;

/// Chart configuration
#[derive(Debug, Clone)]
pub struct ChartConfig {
    pub width: usize,
    pub height: usize,
    /// Prefixed to the report title when set ("<prefix>: Sales by Country")
    pub title: Option<String>,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_CHART_WIDTH,
            height: DEFAULT_CHART_HEIGHT,
            title: None,
        }
    }
}

impl ChartConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }
}

/// Plot area in pixels
struct Frame {
    left: f64,
    top: f64,
    width: f64,
    height: f64,
    max_value: f64,
}

impl Frame {
    fn new(config: &ChartConfig, max_value: f64) -> Self {
        Self {
            left: MARGIN_LEFT,
            top: MARGIN_TOP,
            width: (config.width as f64 - MARGIN_LEFT - MARGIN_RIGHT).max(1.0),
            height: (config.height as f64 - MARGIN_TOP - MARGIN_BOTTOM).max(1.0),
            max_value: if max_value > 0.0 { max_value } else { 1.0 },
        }
    }

    fn bottom(&self) -> f64 {
        self.top + self.height
    }

    fn y_for(&self, value: f64) -> f64 {
        self.bottom() - (value / self.max_value) * self.height
    }

    /// Horizontal center of slot `i` out of `n`
    fn slot_center(&self, i: usize, n: usize) -> f64 {
        let slot = self.width / n as f64;
        self.left + slot * (i as f64 + 0.5)
    }
}

/// Render a report as a standalone SVG document
///
/// **Public** - main entry point for chart rendering
///
/// # Errors
/// * `ChartError::EmptySeries` - the report has no rows to draw
pub fn render_chart(report: &Report, config: Option<&ChartConfig>) -> Result<String, ChartError> {
    let pairs = report.chart_pairs();
    if pairs.is_empty() {
        return Err(ChartError::EmptySeries(report.title.clone()));
    }

    let config = config.cloned().unwrap_or_default();
    let values: Vec<f64> = pairs.iter().map(|(_, v)| to_f64(*v)).collect();
    let labels: Vec<&str> = pairs.iter().map(|(l, _)| *l).collect();
    let max_value = values.iter().cloned().fold(0.0_f64, f64::max);
    let frame = Frame::new(&config, max_value);
    let color = chart_color(report.kind);
    let title = match config.title.as_deref() {
        Some(prefix) => format!("{}: {}", prefix, report.title),
        None => report.title.clone(),
    };

    info!("Rendering {:?} chart '{}' with {} points", report.chart, title, pairs.len());

    let mut svg = String::new();
    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = config.width,
        h = config.height
    ));
    svg.push_str(r#"<style>text { font-family: sans-serif; } .point:hover, .bar:hover { stroke: black; stroke-width: 1; }</style>"#);
    svg.push_str(&format!(
        r#"<rect x="0" y="0" width="{}" height="{}" fill="white"/>"#,
        config.width, config.height
    ));
    svg.push_str(&format!(
        r#"<text x="{}" y="28" font-size="16" text-anchor="middle" font-weight="bold">{}</text>"#,
        config.width / 2,
        escape_xml(&title)
    ));

    render_axes(&mut svg, &frame, report);

    match report.chart {
        ChartKind::Bar => render_bars(&mut svg, &frame, &labels, &values, color, rotate_labels(report.kind)),
        ChartKind::Line => render_line(&mut svg, &frame, &labels, &values, color),
    }

    svg.push_str("</svg>");

    info!("Chart generated successfully ({} bytes)", svg.len());
    Ok(svg)
}

/// Bar fill per report kind
fn chart_color(kind: ReportKind) -> &'static str {
    match kind {
        ReportKind::TopSellingProducts | ReportKind::SalesByCategory => "skyblue",
        ReportKind::ProductProfitability | ReportKind::SalesByCountry => "lightgreen",
        ReportKind::SalesByPriceCategory | ReportKind::MonthlySalesTrend => "orange",
    }
}

fn rotate_labels(kind: ReportKind) -> bool {
    kind != ReportKind::SalesByPriceCategory
}

fn render_axes(out: &mut String, frame: &Frame, report: &Report) {
    // Gridlines and y tick labels
    for i in 0..=GRID_LINES {
        let value = frame.max_value * i as f64 / GRID_LINES as f64;
        let y = frame.y_for(value);
        out.push_str(&format!(
            r##"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="#e0e0e0"/>"##,
            frame.left,
            y,
            frame.left + frame.width,
            y
        ));
        out.push_str(&format!(
            r#"<text x="{:.2}" y="{:.2}" font-size="11" text-anchor="end" dy="4">{}</text>"#,
            frame.left - 6.0,
            y,
            format_amount(value)
        ));
    }

    // Axis lines
    out.push_str(&format!(
        r#"<line x1="{l:.2}" y1="{t:.2}" x2="{l:.2}" y2="{b:.2}" stroke="black"/>"#,
        l = frame.left,
        t = frame.top,
        b = frame.bottom()
    ));
    out.push_str(&format!(
        r#"<line x1="{:.2}" y1="{b:.2}" x2="{:.2}" y2="{b:.2}" stroke="black"/>"#,
        frame.left,
        frame.left + frame.width,
        b = frame.bottom()
    ));

    // Axis titles
    out.push_str(&format!(
        r#"<text x="{:.2}" y="{:.2}" font-size="13" text-anchor="middle">{}</text>"#,
        frame.left + frame.width / 2.0,
        frame.bottom() + MARGIN_BOTTOM - 12.0,
        escape_xml(&report.x_label)
    ));
    out.push_str(&format!(
        r#"<text x="18" y="{y:.2}" font-size="13" text-anchor="middle" transform="rotate(-90 18 {y:.2})">{}</text>"#,
        escape_xml(&report.y_label),
        y = frame.top + frame.height / 2.0
    ));
}

fn render_bars(out: &mut String, frame: &Frame, labels: &[&str], values: &[f64], color: &str, rotate: bool) {
    let n = values.len();
    let bar_width = frame.width / n as f64 * 0.8;

    for (i, (label, value)) in labels.iter().zip(values).enumerate() {
        let cx = frame.slot_center(i, n);
        let y = frame.y_for(*value);
        out.push_str(&format!(
            r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="{}" class="bar"><title>{}: {}</title></rect>"#,
            cx - bar_width / 2.0,
            y,
            bar_width,
            frame.bottom() - y,
            color,
            escape_xml(label),
            format_amount(*value)
        ));
        render_x_label(out, frame, cx, label, rotate);
    }
}

fn render_line(out: &mut String, frame: &Frame, labels: &[&str], values: &[f64], color: &str) {
    let n = values.len();
    let points: Vec<(f64, f64)> = values
        .iter()
        .enumerate()
        .map(|(i, v)| (frame.slot_center(i, n), frame.y_for(*v)))
        .collect();

    let path = points
        .iter()
        .map(|(x, y)| format!("{:.2},{:.2}", x, y))
        .collect::<Vec<_>>()
        .join(" ");
    out.push_str(&format!(
        r#"<polyline points="{}" fill="none" stroke="{}" stroke-width="2"/>"#,
        path, color
    ));

    for ((x, y), (label, value)) in points.iter().zip(labels.iter().zip(values)) {
        out.push_str(&format!(
            r#"<circle cx="{:.2}" cy="{:.2}" r="4" fill="{}" class="point"><title>{}: {}</title></circle>"#,
            x,
            y,
            color,
            escape_xml(label),
            format_amount(*value)
        ));
        render_x_label(out, frame, *x, label, true);
    }
}

fn render_x_label(out: &mut String, frame: &Frame, x: f64, label: &str, rotate: bool) {
    let y = frame.bottom() + 16.0;
    if rotate {
        out.push_str(&format!(
            r#"<text x="{x:.2}" y="{y:.2}" font-size="11" text-anchor="end" transform="rotate(-45 {x:.2} {y:.2})">{}</text>"#,
            escape_xml(label),
        ));
    } else {
        out.push_str(&format!(
            r#"<text x="{:.2}" y="{:.2}" font-size="11" text-anchor="middle">{}</text>"#,
            x,
            y,
            escape_xml(label)
        ));
    }
}

fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}

/// Compact axis label: 1.2M, 35.0k, 950
pub fn format_amount(value: f64) -> String {
    if value >= 1_000_000.0 {
        format!("{:.1}M", value / 1_000_000.0)
    } else if value >= 1_000.0 {
        format!("{:.1}k", value / 1_000.0)
    } else {
        format!("{:.0}", value)
    }
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Create a boxed text table with shares and proportional bars
pub fn render_text_summary(report: &Report, max_lines: usize) -> String {
    let mut lines = Vec::new();
    let total = to_f64(report.total()).max(f64::MIN_POSITIVE);
    let max_value = report
        .pairs()
        .iter()
        .map(|(_, v)| to_f64(*v))
        .fold(0.0_f64, f64::max)
        .max(f64::MIN_POSITIVE);

    lines.push(format!("  📊 {}", report.title.to_uppercase()));
    lines.push("  ┏━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━┳━━━━━━━━━━━━━━━━┳━━━━━━━━━┳━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━┓".to_string());
    lines.push(format!(
        "  ┃ {:<28} ┃ {:^14} ┃ {:^7} ┃ {:<29} ┃",
        report.x_label,
        report.y_label,
        "%",
        ""
    ));
    lines.push("  ┣━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━╋━━━━━━━━━━━━━━━━╋━━━━━━━━━╋━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━┫".to_string());

    for (label, value) in report.pairs().iter().take(max_lines) {
        let value = to_f64(*value);
        let share = value / total * 100.0;
        let bar = "█".repeat(((value / max_value) * 29.0).round() as usize);

        let display_label = if label.chars().count() > 28 {
            format!("{}...", label.chars().take(25).collect::<String>())
        } else {
            label.to_string()
        };

        lines.push(format!(
            "  ┃ {:<28} ┃ {:>14.2} ┃ {:>6.1}% ┃ {:<29} ┃",
            display_label, value, share, bar
        ));
    }

    lines.push("  ┗━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━┻━━━━━━━━━━━━━━━━┻━━━━━━━━━┻━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━┛".to_string());

    if report.rows.len() > max_lines {
        lines.push(format!(
            "   (Showing top {} of {} rows)",
            max_lines,
            report.rows.len()
        ));
    }

    lines.join("\n")
}
