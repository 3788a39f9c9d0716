//! Report page output
//!
//! Writes `index.html`, one PNG per chart and, optionally, `report.json`
//! into an output directory. A chart that fails to render is replaced by a
//! placeholder; the rest of the page is still written.

use std::fs;
use std::path::{Path, PathBuf};

use html_escape::{encode_double_quoted_attribute, encode_text};
use thiserror::Error;

use crate::config::ChartSize;

use super::charts::render_chart;
use super::summary::{fixed2, UNKNOWN};
use super::table::{HtmlTableRenderer, TableRenderer};
use super::FoodLogReport;

const STYLESHEET: &str =
    "https://maxcdn.bootstrapcdn.com/bootstrap/3.3.6/css/bootstrap.min.css";

// Clicking a meal summary toggles the detail rows up to the next summary
const TOGGLE_SCRIPT: &str = r#"document.getElementById('foodlog').addEventListener('click', function(event) {
  if (!event.target.matches('.summary *')) return;
  event.preventDefault();
  var row = event.target.closest('tr').nextElementSibling;
  while (row && !row.matches('.summary')) {
    if (row.matches('.detail')) row.classList.toggle('visible');
    row = row.nextElementSibling;
  }
});"#;

const INLINE_STYLE: &str = "tr.detail { display: none; } tr.detail.visible { display: table-row; } figure { margin: 1em 0; } .chart-missing { color: #a94442; }";

/// Page output errors
#[derive(Debug, Error)]
pub enum PageError {
    #[error("cannot write report: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot serialize report: {0}")]
    Json(#[from] serde_json::Error),
}

/// What to write besides the page
#[derive(Debug, Clone)]
pub struct PageOptions {
    pub charts: bool,
    pub json: bool,
    pub chart_size: ChartSize,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            charts: true,
            json: false,
            chart_size: ChartSize::default(),
        }
    }
}

/// Outcome of one chart on the page
#[derive(Debug, Clone, PartialEq)]
pub enum ChartImage {
    Written { title: &'static str, file: String },
    Missing { title: &'static str, reason: String },
}

/// Paths written by [`write_report`]
#[derive(Debug, Clone)]
pub struct WrittenReport {
    pub index: PathBuf,
    pub charts: Vec<PathBuf>,
    pub json: Option<PathBuf>,
}

/// Write the whole report into `dir`, creating it if needed
pub fn write_report(
    report: &FoodLogReport,
    dir: &Path,
    options: &PageOptions,
) -> Result<WrittenReport, PageError> {
    fs::create_dir_all(dir)?;

    let mut images = Vec::new();
    let mut chart_paths = Vec::new();

    if options.charts {
        for chart in report.charts.iter() {
            match render_chart(chart, options.chart_size) {
                Ok(png) => {
                    let file = format!("{}-chart.png", chart.id);
                    let path = dir.join(&file);
                    fs::write(&path, png)?;
                    chart_paths.push(path);
                    images.push(ChartImage::Written {
                        title: chart.title,
                        file,
                    });
                }
                Err(e) => {
                    tracing::warn!("Chart '{}' not rendered: {}", chart.id, e);
                    images.push(ChartImage::Missing {
                        title: chart.title,
                        reason: e.to_string(),
                    });
                }
            }
        }
    }

    let index = dir.join("index.html");
    fs::write(&index, render_page(report, &images))?;

    let json = if options.json {
        let path = dir.join("report.json");
        fs::write(&path, serde_json::to_string_pretty(report)?)?;
        Some(path)
    } else {
        None
    };

    tracing::info!(
        "Wrote {} ({} charts)",
        index.display(),
        chart_paths.len()
    );

    Ok(WrittenReport {
        index,
        charts: chart_paths,
        json,
    })
}

fn render_footnotes(out: &mut String, report: &FoodLogReport) {
    let summary = &report.summary;
    out.push_str("<section class=\"footnotes\">\n");

    match &summary.lowest {
        Some(lowest) => {
            let when = match lowest.iso_date() {
                Some(iso) => format!(
                    "<time datetime=\"{}\">{}</time>",
                    encode_double_quoted_attribute(&iso),
                    encode_text(&lowest.display_date()),
                ),
                None => UNKNOWN.to_string(),
            };
            out.push_str(&format!(
                "<p id=\"footnote1\">Lowest weight: <data value=\"{}\">{}</data> kg on {}.</p>\n",
                lowest.weight, lowest.weight, when,
            ));
        }
        None => out.push_str("<p id=\"footnote1\">Lowest weight: unknown.</p>\n"),
    }

    let last_average = summary.last_average_display();
    let smoothed = fixed2(summary.last_smoothed);
    out.push_str(&format!(
        "<p id=\"footnote2\">Current {}-day average: <data value=\"{}\">{}</data> kg (smoothed trend <data value=\"{}\">{}</data> kg).</p>\n",
        report.average_width, last_average, last_average, smoothed, smoothed,
    ));

    let mean = summary.mean_variation_display();
    let band = summary.band_width_display();
    out.push_str(&format!(
        "<p id=\"footnote3\">Mean variation <data value=\"{}\">{}</data> kg; 99% of days fall within &plusmn;<data value=\"{}\">{}</data> kg of the average.</p>\n",
        mean, mean, band, band,
    ));

    if let Some(rate) = summary.weekly_rate {
        out.push_str(&format!(
            "<p id=\"footnote4\">From highest to lowest weight: <data value=\"{}\">{:.2}</data> kg per week.</p>\n",
            rate, rate,
        ));
    }

    out.push_str("</section>\n");
}

/// A bulleted alert box, or nothing for an empty list
fn alert_list<I>(class: &str, messages: I) -> String
where
    I: IntoIterator<Item = String>,
{
    let items: String = messages
        .into_iter()
        .map(|message| format!("<li>{}</li>\n", encode_text(&message)))
        .collect();
    if items.is_empty() {
        return String::new();
    }
    format!("<div class=\"alert {}\"><ul>\n{}</ul></div>\n", class, items)
}

fn render_notices(out: &mut String, report: &FoodLogReport) {
    out.push_str(&alert_list(
        "alert-info advisories",
        report.advisories.iter().map(|a| a.message.clone()),
    ));
    out.push_str(&alert_list(
        "alert-warning warnings",
        report.warnings.iter().map(|w| w.to_string()),
    ));
}

fn render_image(image: &ChartImage) -> String {
    match image {
        ChartImage::Written { title, file } => format!(
            "<figure><img src=\"{}\" alt=\"{}\" class=\"img-responsive\"></figure>\n",
            encode_double_quoted_attribute(file),
            encode_double_quoted_attribute(title),
        ),
        ChartImage::Missing { title, reason } => format!(
            "<figure class=\"chart-missing\">{} chart unavailable: {}</figure>\n",
            encode_text(title),
            encode_text(reason),
        ),
    }
}

/// Assemble the HTML page
pub fn render_page(report: &FoodLogReport, images: &[ChartImage]) -> String {
    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>Food Log</title>\n");
    out.push_str(&format!("<link rel=\"stylesheet\" href=\"{}\">\n", STYLESHEET));
    out.push_str(&format!("<style>{}</style>\n", INLINE_STYLE));
    out.push_str("</head>\n<body>\n<div class=\"container\">\n<h1>Food Log</h1>\n");

    render_notices(&mut out, report);
    for image in images {
        out.push_str(&render_image(image));
    }

    out.push_str(&HtmlTableRenderer.render(&report.rows));
    render_footnotes(&mut out, report);

    out.push_str(&format!(
        "<footer class=\"text-muted\">Dates at UTC{}. Generated by {}.</footer>\n",
        encode_text(&report.zone),
        encode_text(&report.generator.footer_line()),
    ));
    out.push_str("</div>\n<script>\n");
    out.push_str(TOGGLE_SCRIPT);
    out.push_str("\n</script>\n</body>\n</html>\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReportConfig;
    use crate::models::LogEntry;
    use crate::report::build_report;

    fn report() -> FoodLogReport {
        let entries = vec![
            LogEntry::new("2016-01-04", 80.0),
            LogEntry::new("2016-01-05", 79.5),
        ];
        build_report(entries, &ReportConfig::default()).unwrap()
    }

    #[test]
    fn test_page_contains_table_and_footnotes() {
        let page = render_page(&report(), &[]);
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("<table id=\"foodlog\""));
        assert!(page.contains("id=\"footnote1\">Lowest weight: <data value=\"79.5\">79.5</data>"));
        assert!(page.contains("<data value=\"79.75\">79.75</data>"));
        assert!(page.contains("Dates at UTC-00:00"));
    }

    #[test]
    fn test_notices_listed() {
        let entries = vec![
            LogEntry::new("2016-01-04", 80.0),
            LogEntry::new("someday", 79.5),
        ];
        let report = build_report(entries, &ReportConfig::default()).unwrap();
        let page = render_page(&report, &[]);
        assert!(page.contains("<div class=\"alert alert-warning warnings\"><ul>"));
        assert!(page.contains("invalid date &#x27;someday&#x27;") || page.contains("invalid date 'someday'"));
        assert!(page.contains("kg on unknown.</p>"));
        assert!(!page.contains("advisories"));
    }

    #[test]
    fn test_missing_chart_placeholder() {
        let images = vec![
            ChartImage::Written {
                title: "Weight",
                file: "weight-chart.png".to_string(),
            },
            ChartImage::Missing {
                title: "Steps",
                reason: "no data to chart for 'steps'".to_string(),
            },
        ];
        let page = render_page(&report(), &images);
        assert!(page.contains("<img src=\"weight-chart.png\" alt=\"Weight\""));
        assert!(page.contains("Steps chart unavailable: no data to chart for 'steps'"));
    }
}
