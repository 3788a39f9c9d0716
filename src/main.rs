//! Food Log Renderer
//!
//! Reads a JSON food log and writes an HTML report with charts into an
//! output directory.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use foodlog::build_info;
use foodlog::config::{
    AdvisoryConfig, ChartSize, ReportConfig, SigmaSource, DEFAULT_AVERAGE_WIDTH,
    DEFAULT_SMOOTHING_ALPHA,
};
use foodlog::dates::local_minutes_west;
use foodlog::loader;
use foodlog::report::{self, PageOptions, TableRenderer, TextTableRenderer};

#[derive(Parser)]
#[command(name = "foodlog", version, about = "Render a food log as an HTML report")]
struct Args {
    /// JSON food log to render
    #[arg(env = "FOODLOG_INPUT")]
    input: PathBuf,

    /// Directory for index.html and the chart images
    #[arg(long, short = 'o', env = "FOODLOG_OUTPUT_DIR", default_value = "report")]
    output_dir: PathBuf,

    /// Minutes west of UTC for calendar dates (defaults to the host zone)
    #[arg(long, env = "FOODLOG_UTC_OFFSET", allow_hyphen_values = true)]
    utc_offset_minutes_west: Option<i32>,

    /// Entries in the moving average window
    #[arg(long, default_value_t = DEFAULT_AVERAGE_WIDTH)]
    average_width: usize,

    /// Smoothing factor for the trend line
    #[arg(long, default_value_t = DEFAULT_SMOOTHING_ALPHA)]
    alpha: f64,

    /// Evaluate the advisory rules over the variation series
    #[arg(long)]
    advisories: bool,

    /// Sigma for the advisory rules: a number, or "computed"
    #[arg(long, value_parser = parse_sigma)]
    advisory_sigma: Option<SigmaSource>,

    /// Skip chart images
    #[arg(long)]
    no_charts: bool,

    /// Also write report.json
    #[arg(long)]
    json: bool,

    #[arg(long, default_value_t = 1000)]
    chart_width: u32,

    #[arg(long, default_value_t = 400)]
    chart_height: u32,

    /// Print the table to stdout as text
    #[arg(long)]
    print: bool,
}

fn parse_sigma(value: &str) -> Result<SigmaSource, String> {
    if value.eq_ignore_ascii_case("computed") {
        return Ok(SigmaSource::Computed);
    }
    value
        .parse::<f64>()
        .map(SigmaSource::Fixed)
        .map_err(|e| format!("expected a number or \"computed\": {}", e))
}

impl Args {
    fn report_config(&self) -> ReportConfig {
        ReportConfig {
            average_width: self.average_width,
            smoothing_alpha: self.alpha,
            utc_offset_minutes_west: self
                .utc_offset_minutes_west
                .unwrap_or_else(local_minutes_west),
            advisory: AdvisoryConfig {
                enabled: self.advisories,
                sigma: self.advisory_sigma.unwrap_or_default(),
            },
            chart_size: self.chart_size(),
            ..ReportConfig::default()
        }
    }

    fn chart_size(&self) -> ChartSize {
        ChartSize {
            width: self.chart_width,
            height: self.chart_height,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr so --print output stays clean
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("foodlog=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    build_info::print_startup_banner();

    let args = Args::parse();
    let config = args.report_config();
    eprintln!("Input: {}", args.input.display());
    eprintln!("Dates at UTC{}", foodlog::dates::format_offset(config.utc_offset_minutes_west));

    let entries = loader::load_from_path(&args.input)?;
    let report = report::build_report(entries, &config)?;

    if args.print {
        let text = TextTableRenderer { show_items: true }.render(&report.rows);
        print!("{}", text);
    }

    let options = PageOptions {
        charts: !args.no_charts,
        json: args.json,
        chart_size: config.chart_size,
    };
    let written = report::write_report(&report, &args.output_dir, &options)?;

    eprintln!("Report written to {}", written.index.display());
    for advisory in &report.advisories {
        eprintln!("Advisory: {}", advisory.message);
    }

    Ok(())
}
