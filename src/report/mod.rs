//! Report generation
//!
//! Turns a loaded log into the table records, chart series, footnote
//! figures and advisories of one rendering pass.

pub mod charts;
pub mod page;
pub mod pipeline;
pub mod series;
pub mod summary;
pub mod table;
pub mod trend;

use serde::Serialize;
use thiserror::Error;

use crate::advisory::{self, Advisory};
use crate::build_info::BuildInfo;
use crate::config::{ConfigError, ReportConfig, SigmaSource};
use crate::dates::{format_offset, DateError};
use crate::models::LogEntry;

pub use charts::{render_chart, ChartError};
pub use page::{write_report, PageError, PageOptions, WrittenReport};
pub use pipeline::{process, InputWarning, Pass, ProcessedEntry};
pub use series::{project, Chart, ChartKind, ChartSet, Point, Series};
pub use summary::{Summary, Variation, WeightMark};
pub use table::{HtmlTableRenderer, TableRenderer, TableRow, TextTableRenderer};
pub use trend::Trend;

/// Errors that stop a pass before anything is rendered
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("invalid UTC offset: {0}")]
    Offset(DateError),
}

/// Everything one pass produces
#[derive(Debug, Clone, Serialize)]
pub struct FoodLogReport {
    /// Zone the dates were anchored in, e.g. "-05:00"
    pub zone: String,
    pub average_width: usize,
    pub rows: Vec<TableRow>,
    pub charts: ChartSet,
    pub summary: Summary,
    pub advisories: Vec<Advisory>,
    pub warnings: Vec<InputWarning>,
    pub generator: BuildInfo,
}

/// Sigma for the advisory rules, per configuration
fn advisory_sigma(source: SigmaSource, summary: &Summary) -> Option<f64> {
    match source {
        SigmaSource::Fixed(sigma) => Some(sigma),
        SigmaSource::Computed => summary.variation.map(|v| v.std_dev),
    }
}

/// Run one full pass over `entries`
pub fn build_report(
    entries: Vec<LogEntry>,
    config: &ReportConfig,
) -> Result<FoodLogReport, ReportError> {
    config.validate()?;

    let pass = process(entries, config)?;
    let summary = Summary::build(&pass.entries, config);
    let charts = ChartSet::build(&pass.entries);
    let rows = pass.entries.iter().map(TableRow::from_entry).collect();

    let advisories = if config.advisory.enabled {
        match advisory_sigma(config.advisory.sigma, &summary) {
            Some(sigma) => advisory::evaluate(&pass.errors(), sigma),
            None => {
                tracing::warn!("Advisory rules skipped: no sigma available");
                Vec::new()
            }
        }
    } else {
        Vec::new()
    };

    Ok(FoodLogReport {
        zone: format_offset(config.utc_offset_minutes_west),
        average_width: config.average_width,
        rows,
        charts,
        summary,
        advisories,
        warnings: pass.warnings,
        generator: BuildInfo::CURRENT,
    })
}
