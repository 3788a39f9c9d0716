//! The forward pass over the log
//!
//! Walks entries once, in the order given, attaching the parsed date, the
//! moving average, the variation, the smoothed weight, the trend and the
//! resolved calories to each one.

use std::fmt;

use serde::Serialize;

use crate::config::ReportConfig;
use crate::dates::{format_iso_date, DateNormalizer, Instant};
use crate::models::LogEntry;
use crate::nutrition::{meal_calories, unknown_items};
use crate::stats::{Accumulator, ExponentialAverage, MovingAverage};

use super::{ReportError, Trend};

/// Something odd about the input that did not stop the pass
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InputWarning {
    /// An entry dated before the one preceding it
    OutOfOrder {
        index: usize,
        date: String,
        previous: String,
    },
    /// An entry whose date could not be parsed
    InvalidDate { index: usize, date: String },
    /// A food item with neither calories nor unit calories
    UnknownCalories { date: String, food: String },
}

impl fmt::Display for InputWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputWarning::OutOfOrder {
                index,
                date,
                previous,
            } => write!(
                f,
                "entry {} ({}) is dated before the previous entry ({}); averages after it are unreliable",
                index, date, previous
            ),
            InputWarning::InvalidDate { index, date } => write!(
                f,
                "entry {} has an invalid date '{}'; it is shown as unknown",
                index, date
            ),
            InputWarning::UnknownCalories { date, food } => {
                write!(f, "{}: calories for '{}' are unknown", date, food)
            }
        }
    }
}

/// An entry with everything the pass derived for it
#[derive(Debug, Clone)]
pub struct ProcessedEntry {
    pub entry: LogEntry,
    /// `None` when the entry's date did not parse
    pub instant: Option<Instant>,
    pub moving_average: f64,
    /// weight - moving_average
    pub error: f64,
    pub smoothed: f64,
    pub trend: Trend,
    /// Per-meal totals, in meal order
    pub meal_calories: Vec<Option<f64>>,
    pub calories: Option<f64>,
}

/// Output of one pass
#[derive(Debug, Clone, Default)]
pub struct Pass {
    pub entries: Vec<ProcessedEntry>,
    pub warnings: Vec<InputWarning>,
}

impl Pass {
    pub fn errors(&self) -> Vec<f64> {
        self.entries.iter().map(|e| e.error).collect()
    }
}

/// Run the forward pass. Accumulators are created here and dropped with
/// the pass. Only a bad offset stops it; a bad entry date leaves that
/// entry undated and is reported as a warning.
pub fn process(entries: Vec<LogEntry>, config: &ReportConfig) -> Result<Pass, ReportError> {
    let normalizer =
        DateNormalizer::new(config.utc_offset_minutes_west).map_err(ReportError::Offset)?;

    let mut average = MovingAverage::new(config.average_width);
    let mut smoother = ExponentialAverage::new(config.smoothing_alpha);
    let mut previous_weight: Option<f64> = None;
    let mut last_dated: Option<Instant> = None;
    let mut pass = Pass {
        entries: Vec::with_capacity(entries.len()),
        warnings: Vec::new(),
    };

    for (index, mut entry) in entries.into_iter().enumerate() {
        let instant = match normalizer.parse(&entry.date) {
            Ok(instant) => Some(instant),
            Err(e) => {
                tracing::warn!("Entry {}: {}", index, e);
                pass.warnings.push(InputWarning::InvalidDate {
                    index,
                    date: entry.date.clone(),
                });
                None
            }
        };

        if let (Some(instant), Some(previous_instant)) = (instant, last_dated) {
            if instant < previous_instant {
                tracing::warn!(
                    "Entry {} ({}) is out of order; expected non-decreasing dates",
                    index,
                    entry.date
                );
                pass.warnings.push(InputWarning::OutOfOrder {
                    index,
                    date: entry.date.clone(),
                    previous: format_iso_date(&previous_instant),
                });
            }
        }

        for item in unknown_items(&entry) {
            tracing::warn!("{}: no calories for '{}'", entry.date, item.food);
            pass.warnings.push(InputWarning::UnknownCalories {
                date: entry.date.clone(),
                food: item.food.clone(),
            });
        }

        let moving_average = average.next(entry.weight);
        let smoothed = smoother.next(entry.weight);
        let trend = Trend::between(
            previous_weight,
            entry.weight,
            config.trend_threshold,
        );

        let meal_totals: Vec<Option<f64>> = entry.meals.iter_mut().map(meal_calories).collect();
        let calories = meal_totals.iter().copied().sum();

        previous_weight = Some(entry.weight);
        if instant.is_some() {
            last_dated = instant;
        }
        pass.entries.push(ProcessedEntry {
            error: entry.weight - moving_average,
            entry,
            instant,
            moving_average,
            smoothed,
            trend,
            meal_calories: meal_totals,
            calories,
        });
    }

    tracing::info!(
        "Processed {} entries ({} warnings)",
        pass.entries.len(),
        pass.warnings.len()
    );
    Ok(pass)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FoodItem, Meal};

    fn entries(weights: &[(&str, f64)]) -> Vec<LogEntry> {
        weights
            .iter()
            .map(|(date, weight)| LogEntry::new(date, *weight))
            .collect()
    }

    #[test]
    fn test_attaches_average_and_error() {
        let pass = process(
            entries(&[("2016-01-04", 80.0), ("2016-01-05", 81.0), ("2016-01-06", 82.0)]),
            &ReportConfig::default(),
        )
        .unwrap();

        let averages: Vec<f64> = pass.entries.iter().map(|e| e.moving_average).collect();
        assert_eq!(averages, vec![80.0, 80.5, 81.0]);
        assert_eq!(pass.errors(), vec![0.0, 0.5, 1.0]);
        assert!(pass.warnings.is_empty());
    }

    #[test]
    fn test_trend_per_entry() {
        let pass = process(
            entries(&[("2016-01-04", 80.0), ("2016-01-05", 80.5), ("2016-01-06", 80.1)]),
            &ReportConfig::default(),
        )
        .unwrap();
        let trends: Vec<Trend> = pass.entries.iter().map(|e| e.trend).collect();
        assert_eq!(trends, vec![Trend::Steady, Trend::Gaining, Trend::Losing]);
    }

    #[test]
    fn test_out_of_order_warns_but_continues() {
        let pass = process(
            entries(&[("2016-01-05", 80.0), ("2016-01-04", 80.2), ("2016-01-06", 80.1)]),
            &ReportConfig::default(),
        )
        .unwrap();
        assert_eq!(pass.entries.len(), 3);
        assert_eq!(
            pass.warnings,
            vec![InputWarning::OutOfOrder {
                index: 1,
                date: "2016-01-04".to_string(),
                previous: "2016-01-05".to_string(),
            }]
        );
    }

    #[test]
    fn test_calories_resolved_in_place() {
        let meal = Meal {
            time: "7:00".to_string(),
            location: "home".to_string(),
            mood: "fine".to_string(),
            items: vec![FoodItem::with_unit_calories("egg", 2.0, "", 78.0)],
        };
        let pass = process(
            vec![LogEntry::new("2016-01-04", 80.0).with_meal(meal)],
            &ReportConfig::default(),
        )
        .unwrap();
        let processed = &pass.entries[0];
        assert_eq!(processed.calories, Some(156.0));
        assert_eq!(processed.meal_calories, vec![Some(156.0)]);
        assert_eq!(processed.entry.meals[0].items[0].calories, Some(156.0));
    }

    #[test]
    fn test_unknown_calories_warn() {
        let meal = Meal {
            time: "19:00".to_string(),
            location: "restaurant".to_string(),
            mood: "happy".to_string(),
            items: vec![
                FoodItem::with_calories("steak", 1.0, "", 700.0),
                FoodItem {
                    food: "dessert".to_string(),
                    quantity: 1.0,
                    units: String::new(),
                    calories: None,
                    unit_calories: None,
                },
            ],
        };
        let pass = process(
            vec![LogEntry::new("2016-01-04", 80.0).with_meal(meal)],
            &ReportConfig::default(),
        )
        .unwrap();
        assert_eq!(pass.entries[0].calories, None);
        assert_eq!(pass.warnings.len(), 1);
        assert!(pass.warnings[0].to_string().contains("dessert"));
    }

    #[test]
    fn test_bad_date_keeps_the_pass_going() {
        let pass = process(
            entries(&[("2016-01-04", 80.0), ("2016-01-5x", 80.4), ("2016-01-06", 80.1)]),
            &ReportConfig::default(),
        )
        .unwrap();
        assert_eq!(pass.entries.len(), 3);
        assert_eq!(
            pass.warnings,
            vec![InputWarning::InvalidDate {
                index: 1,
                date: "2016-01-5x".to_string(),
            }]
        );

        let undated = &pass.entries[1];
        assert!(undated.instant.is_none());
        assert!((undated.moving_average - 80.2).abs() < 1e-9);
        assert_eq!(undated.trend, Trend::Gaining);
        assert_eq!(pass.entries[2].trend, Trend::Losing);
        assert!(pass.entries[2].instant.is_some());
    }

    #[test]
    fn test_out_of_order_skips_undated_entries() {
        let pass = process(
            entries(&[("2016-01-05", 80.0), ("bogus", 80.0), ("2016-01-04", 80.0)]),
            &ReportConfig::default(),
        )
        .unwrap();
        assert_eq!(pass.warnings.len(), 2);
        assert!(matches!(
            &pass.warnings[1],
            InputWarning::OutOfOrder { index: 2, previous, .. } if previous == "2016-01-05"
        ));
    }

    #[test]
    fn test_bad_offset_stops_the_pass() {
        let config = ReportConfig {
            utc_offset_minutes_west: 24 * 60,
            ..ReportConfig::default()
        };
        assert!(matches!(
            process(entries(&[("2016-01-04", 80.0)]), &config),
            Err(ReportError::Offset(_))
        ));
    }

    #[test]
    fn test_empty_log_is_an_empty_pass() {
        let pass = process(Vec::new(), &ReportConfig::default()).unwrap();
        assert!(pass.entries.is_empty());
    }
}
