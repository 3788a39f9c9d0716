//! Footnote figures
//!
//! Lowest and highest weight, the latest averages, the spread of the
//! variation series, and the weekly rate between the two extremes.

use serde::Serialize;

use crate::config::ReportConfig;
use crate::dates::{format_display_date, format_iso_date, Instant};
use crate::stats::{mean, population_std_dev, StatsResult};

use super::ProcessedEntry;

const SECONDS_PER_WEEK: f64 = 7.0 * 24.0 * 60.0 * 60.0;

/// Placeholder for a figure that could not be computed
pub const UNKNOWN: &str = "unknown";

/// A weight reading and when it happened, if its date parsed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightMark {
    pub index: usize,
    pub date: Option<Instant>,
    pub weight: f64,
}

impl WeightMark {
    pub fn iso_date(&self) -> Option<String> {
        self.date.as_ref().map(format_iso_date)
    }

    pub fn display_date(&self) -> String {
        self.date
            .as_ref()
            .map(format_display_date)
            .unwrap_or_else(|| UNKNOWN.to_string())
    }
}

/// Spread of the variation series
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Variation {
    pub mean: f64,
    pub std_dev: f64,
    /// Width of the two-sided band, `band_z * std_dev`
    pub band_width: f64,
}

impl Variation {
    pub fn from_errors(errors: &[f64], band_z: f64) -> StatsResult<Self> {
        let mean = mean(errors)?;
        let std_dev = population_std_dev(errors, mean)?;
        Ok(Self {
            mean,
            std_dev,
            band_width: band_z * std_dev,
        })
    }
}

/// Indices of the lowest and highest value.
///
/// Comparisons are strict, so the first of several equal extremes wins.
/// NaN never wins.
pub fn extremes(values: &[f64]) -> (Option<usize>, Option<usize>) {
    let mut lowest: Option<usize> = None;
    let mut highest: Option<usize> = None;
    let mut low = f64::INFINITY;
    let mut high = f64::NEG_INFINITY;

    for (i, &value) in values.iter().enumerate() {
        if value < low {
            low = value;
            lowest = Some(i);
        }
        if value > high {
            high = value;
            highest = Some(i);
        }
    }

    (lowest, highest)
}

/// Weight change per week going from the highest reading to the lowest,
/// rounded to the nearest 0.05. `None` when both fall on the same instant
/// or either date is unknown.
pub fn weekly_rate(highest: &WeightMark, lowest: &WeightMark) -> Option<f64> {
    let loss = highest.weight - lowest.weight;
    let weeks = (lowest.date? - highest.date?).num_seconds() as f64 / SECONDS_PER_WEEK;
    if weeks == 0.0 {
        return None;
    }
    Some(round_to(loss / weeks, 20.0))
}

fn round_to(value: f64, per_unit: f64) -> f64 {
    (value * per_unit).round() / per_unit
}

/// Two-decimal display, or the unknown placeholder
pub fn fixed2(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{:.2}", v),
        _ => UNKNOWN.to_string(),
    }
}

/// Scalar figures shown under the table
#[derive(Debug, Clone, Default, Serialize)]
pub struct Summary {
    pub lowest: Option<WeightMark>,
    pub highest: Option<WeightMark>,
    pub last_average: Option<f64>,
    pub last_smoothed: Option<f64>,
    pub variation: Option<Variation>,
    pub weekly_rate: Option<f64>,
}

impl Summary {
    /// Compute every figure independently; one failing leaves the rest intact
    pub fn build(entries: &[ProcessedEntry], config: &ReportConfig) -> Self {
        let weights: Vec<f64> = entries.iter().map(|e| e.entry.weight).collect();
        let (lowest, highest) = extremes(&weights);
        let mark = |i: usize| WeightMark {
            index: i,
            date: entries[i].instant,
            weight: entries[i].entry.weight,
        };
        let lowest = lowest.map(mark);
        let highest = highest.map(mark);

        let errors: Vec<f64> = entries.iter().map(|e| e.error).collect();
        let variation = match Variation::from_errors(&errors, config.band_z) {
            Ok(variation) => Some(variation),
            Err(e) => {
                tracing::error!("Variation statistics unavailable: {}", e);
                None
            }
        };

        let weekly_rate = match (&highest, &lowest) {
            (Some(high), Some(low)) => weekly_rate(high, low),
            _ => None,
        };

        Self {
            last_average: entries.last().map(|e| e.moving_average),
            last_smoothed: entries.last().map(|e| e.smoothed),
            lowest,
            highest,
            variation,
            weekly_rate,
        }
    }

    pub fn last_average_display(&self) -> String {
        fixed2(self.last_average)
    }

    pub fn mean_variation_display(&self) -> String {
        fixed2(self.variation.map(|v| v.mean))
    }

    pub fn band_width_display(&self) -> String {
        fixed2(self.variation.map(|v| v.band_width))
    }
}
