//! Run rules over the variation series
//!
//! Each rule looks only at the most recent `window` values, normalized by
//! sigma, and fires independently of the others.

use serde::Serialize;

use crate::stats::{Accumulator, Difference, PairwiseProduct};

/// A run test over the trailing variation values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AdvisoryRule {
    /// Nine values in a row above the average
    BiasAbove,
    /// Nine values in a row below the average
    BiasBelow,
    /// Six values each higher than the last
    Increasing,
    /// Six values each lower than the last
    Decreasing,
    /// Fourteen values alternating around the average
    Alternating,
    /// Two of three values beyond 3 sigma
    ExtremeCluster,
    /// Four of five values beyond 2 sigma
    ModerateCluster,
    /// Fifteen values within 1 sigma
    Flatline,
}

impl AdvisoryRule {
    pub const ALL: [AdvisoryRule; 8] = [
        AdvisoryRule::BiasAbove,
        AdvisoryRule::BiasBelow,
        AdvisoryRule::Increasing,
        AdvisoryRule::Decreasing,
        AdvisoryRule::Alternating,
        AdvisoryRule::ExtremeCluster,
        AdvisoryRule::ModerateCluster,
        AdvisoryRule::Flatline,
    ];

    /// Number of trailing values the rule needs
    pub fn window(self) -> usize {
        match self {
            AdvisoryRule::BiasAbove | AdvisoryRule::BiasBelow => 9,
            AdvisoryRule::Increasing | AdvisoryRule::Decreasing => 6,
            AdvisoryRule::Alternating => 14,
            AdvisoryRule::ExtremeCluster => 3,
            AdvisoryRule::ModerateCluster => 5,
            AdvisoryRule::Flatline => 15,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            AdvisoryRule::BiasAbove => {
                "Weight has stayed above its average for 9 days: trending up."
            }
            AdvisoryRule::BiasBelow => {
                "Weight has stayed below its average for 9 days: trending down."
            }
            AdvisoryRule::Increasing => "Variation has risen 6 days in a row: steadily increasing.",
            AdvisoryRule::Decreasing => {
                "Variation has fallen 6 days in a row: steadily decreasing."
            }
            AdvisoryRule::Alternating => {
                "Weight has swung above and below its average for 14 days: oscillating, possibly over-reacting."
            }
            AdvisoryRule::ExtremeCluster => {
                "Two of the last 3 days were more than 3 sigma from the average: likely off-plan."
            }
            AdvisoryRule::ModerateCluster => {
                "Four of the last 5 days were more than 2 sigma from the average: likely off-plan."
            }
            AdvisoryRule::Flatline => {
                "The last 15 days all sit within 1 sigma of the average: possible measurement issue."
            }
        }
    }

    /// Whether the rule fires on already-normalized values (`v / sigma`).
    /// Too few values means it is not evaluated.
    pub fn fires(self, normalized: &[f64]) -> bool {
        let window = self.window();
        if normalized.len() < window {
            return false;
        }
        let tail = &normalized[normalized.len() - window..];

        match self {
            AdvisoryRule::BiasAbove => tail.iter().all(|v| *v > 0.0),
            AdvisoryRule::BiasBelow => tail.iter().all(|v| *v < 0.0),
            AdvisoryRule::Increasing => within(tail, Difference::new()).all(|d| d > 0.0),
            AdvisoryRule::Decreasing => within(tail, Difference::new()).all(|d| d < 0.0),
            AdvisoryRule::Alternating => within(tail, PairwiseProduct::new()).all(|p| p < 0.0),
            AdvisoryRule::ExtremeCluster => tail.iter().filter(|v| v.abs() >= 3.0).count() >= 2,
            AdvisoryRule::ModerateCluster => tail.iter().filter(|v| v.abs() >= 2.0).count() >= 4,
            AdvisoryRule::Flatline => tail.iter().all(|v| v.abs() <= 1.0),
        }
    }
}

/// Run a fresh accumulator over the window and drop its warm-up output, so
/// only comparisons between values inside the window remain
fn within<A: Accumulator>(tail: &[f64], mut accumulator: A) -> impl Iterator<Item = f64> {
    accumulator
        .run(tail.iter().copied())
        .into_iter()
        .skip(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bias_above() {
        let mut values = vec![-0.5; 4];
        values.extend([0.1, 0.3, 0.2, 0.8, 0.1, 0.4, 0.2, 0.6, 0.05]);
        assert!(AdvisoryRule::BiasAbove.fires(&values));

        values[8] = 0.0;
        assert!(!AdvisoryRule::BiasAbove.fires(&values));
    }

    #[test]
    fn test_not_evaluated_without_enough_values() {
        assert!(!AdvisoryRule::BiasAbove.fires(&[0.5; 8]));
        assert!(!AdvisoryRule::Flatline.fires(&[0.0; 14]));
    }

    #[test]
    fn test_bias_below() {
        assert!(AdvisoryRule::BiasBelow.fires(&[-0.2; 9]));
        assert!(!AdvisoryRule::BiasBelow.fires(&[-0.2, -0.2, -0.2, -0.2, 0.3, -0.2, -0.2, -0.2, -0.2]));
    }

    #[test]
    fn test_monotonic_runs() {
        let rising = [-1.0, -0.6, -0.2, 0.1, 0.4, 0.9];
        assert!(AdvisoryRule::Increasing.fires(&rising));
        assert!(!AdvisoryRule::Decreasing.fires(&rising));

        let falling: Vec<f64> = rising.iter().rev().copied().collect();
        assert!(AdvisoryRule::Decreasing.fires(&falling));

        let flat_step = [-1.0, -0.6, -0.6, 0.1, 0.4, 0.9];
        assert!(!AdvisoryRule::Increasing.fires(&flat_step));
    }

    #[test]
    fn test_alternating() {
        let swings: Vec<f64> = (0..14).map(|i| if i % 2 == 0 { 0.5 } else { -0.5 }).collect();
        assert!(AdvisoryRule::Alternating.fires(&swings));

        let mut broken = swings.clone();
        broken[7] = 0.5;
        assert!(!AdvisoryRule::Alternating.fires(&broken));
    }

    #[test]
    fn test_clusters() {
        assert!(AdvisoryRule::ExtremeCluster.fires(&[3.1, 0.2, -3.0]));
        assert!(!AdvisoryRule::ExtremeCluster.fires(&[3.1, 0.2, 2.9]));

        assert!(AdvisoryRule::ModerateCluster.fires(&[2.0, -2.5, 0.1, 2.2, 3.0]));
        assert!(!AdvisoryRule::ModerateCluster.fires(&[2.0, -2.5, 0.1, 1.9, 3.0]));
    }

    #[test]
    fn test_flatline() {
        assert!(AdvisoryRule::Flatline.fires(&[0.5; 15]));
        assert!(AdvisoryRule::Flatline.fires(&[1.0; 15]));
        assert!(AdvisoryRule::Flatline.fires(&[-1.0; 15]));
        let mut values = vec![0.5; 15];
        values[3] = 1.2;
        assert!(!AdvisoryRule::Flatline.fires(&values));
    }
}
