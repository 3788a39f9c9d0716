//! Day-over-day weight trend

use serde::Serialize;

/// How today's weight moved against yesterday's
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Gaining,
    Losing,
    Steady,
}

impl Trend {
    /// Classify a weight delta. Both bounds are strict, so a delta of exactly
    /// `threshold` is steady, and so is a NaN delta.
    pub fn classify(delta: f64, threshold: f64) -> Self {
        if delta > threshold {
            Trend::Gaining
        } else if delta < -threshold {
            Trend::Losing
        } else {
            Trend::Steady
        }
    }

    /// Classify against the previous entry; the first entry has none and is
    /// always steady
    pub fn between(previous: Option<f64>, current: f64, threshold: f64) -> Self {
        Self::classify(current - previous.unwrap_or(f64::NAN), threshold)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::Gaining => "gaining",
            Trend::Losing => "losing",
            Trend::Steady => "steady",
        }
    }

    /// Row background class
    pub fn row_class(&self) -> &'static str {
        match self {
            Trend::Gaining => "bg-danger",
            Trend::Losing => "bg-success",
            Trend::Steady => "bg-warning",
        }
    }

    /// Glyph name and text class shown next to the weight
    pub fn glyph(&self) -> Option<(&'static str, &'static str)> {
        match self {
            Trend::Gaining => Some(("arrow-up", "text-danger")),
            Trend::Losing => Some(("arrow-down", "text-success")),
            Trend::Steady => None,
        }
    }

    /// Single-character marker for plain text output
    pub fn marker(&self) -> char {
        match self {
            Trend::Gaining => '+',
            Trend::Losing => '-',
            Trend::Steady => '=',
        }
    }
}
