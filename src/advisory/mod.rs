//! Advisory rules
//!
//! Optional run tests over the variation series (weight minus its moving
//! average) that flag sustained patterns worth a look.

pub mod rules;

use serde::Serialize;

pub use rules::AdvisoryRule;

/// A rule that fired, with its message
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Advisory {
    pub rule: AdvisoryRule,
    pub message: String,
}

impl From<AdvisoryRule> for Advisory {
    fn from(rule: AdvisoryRule) -> Self {
        Self {
            rule,
            message: rule.message().to_string(),
        }
    }
}

/// Evaluate every rule over the variation series, normalized by `sigma`.
///
/// A non-positive or non-finite sigma cannot normalize anything, so nothing
/// is evaluated.
pub fn evaluate(errors: &[f64], sigma: f64) -> Vec<Advisory> {
    if !(sigma > 0.0 && sigma.is_finite()) {
        tracing::warn!("Advisory rules skipped: sigma {} is not usable", sigma);
        return Vec::new();
    }

    let normalized: Vec<f64> = errors.iter().map(|e| e / sigma).collect();
    let advisories: Vec<Advisory> = AdvisoryRule::ALL
        .iter()
        .copied()
        .filter(|rule| rule.fires(&normalized))
        .map(Advisory::from)
        .collect();

    for advisory in &advisories {
        tracing::info!("Advisory: {}", advisory.message);
    }
    advisories
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rules_fire_together() {
        // nine positive values that also rise steadily
        let errors = [0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9];
        let fired: Vec<AdvisoryRule> = evaluate(&errors, 0.5497).into_iter().map(|a| a.rule).collect();
        assert_eq!(fired, vec![AdvisoryRule::BiasAbove, AdvisoryRule::Increasing]);
    }

    #[test]
    fn test_sigma_scales_clusters() {
        let errors = [1.2, 0.0, -1.2];
        assert!(evaluate(&errors, 1.0).is_empty());
        let fired = evaluate(&errors, 0.3);
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].rule, AdvisoryRule::ExtremeCluster);
        assert!(fired[0].message.contains("off-plan"));
    }

    #[test]
    fn test_unusable_sigma() {
        assert!(evaluate(&[1.0; 20], 0.0).is_empty());
        assert!(evaluate(&[1.0; 20], f64::NAN).is_empty());
    }

    #[test]
    fn test_short_series() {
        assert!(evaluate(&[], 0.5497).is_empty());
        assert!(evaluate(&[0.01, 0.02], 0.5497).is_empty());
    }
}
