//! Utility to check a food log without writing a report
//!
//! Loads the log, runs one pass and prints warnings, advisories and the
//! summary figures.

use std::path::PathBuf;

use clap::Parser;

use foodlog::config::{AdvisoryConfig, ReportConfig};
use foodlog::dates::local_minutes_west;
use foodlog::report::summary::fixed2;

#[derive(Parser)]
#[command(name = "foodlog-check", about = "Check a food log for problems")]
struct Args {
    /// JSON food log to check
    #[arg(env = "FOODLOG_INPUT")]
    input: PathBuf,

    #[arg(long, env = "FOODLOG_UTC_OFFSET", allow_hyphen_values = true)]
    utc_offset_minutes_west: Option<i32>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = ReportConfig {
        utc_offset_minutes_west: args
            .utc_offset_minutes_west
            .unwrap_or_else(local_minutes_west),
        advisory: AdvisoryConfig {
            enabled: true,
            ..AdvisoryConfig::default()
        },
        ..ReportConfig::default()
    };

    let entries = foodlog::loader::load_from_path(&args.input)?;
    println!("Entries: {}", entries.len());

    let report = foodlog::report::build_report(entries, &config)?;

    if report.warnings.is_empty() {
        println!("No input warnings");
    }
    for warning in &report.warnings {
        println!("  warning: {}", warning);
    }
    for advisory in &report.advisories {
        println!("  advisory: {}", advisory.message);
    }

    let summary = &report.summary;
    if let Some(lowest) = &summary.lowest {
        println!("Lowest:  {} on {}", lowest.weight, lowest.display_date());
    }
    if let Some(highest) = &summary.highest {
        println!("Highest: {} on {}", highest.weight, highest.display_date());
    }
    println!(
        "{}-day average: {}",
        report.average_width,
        summary.last_average_display()
    );
    println!("Smoothed: {}", fixed2(summary.last_smoothed));
    println!(
        "Variation: mean {}, band +/-{}",
        summary.mean_variation_display(),
        summary.band_width_display()
    );
    println!("Weekly rate: {}", fixed2(summary.weekly_rate));

    Ok(())
}
