//! Whole-series statistics

use thiserror::Error;

/// Statistics errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatsError {
    #[error("cannot compute {what} of an empty series")]
    EmptySeries { what: &'static str },
}

/// Result type for batch statistics
pub type StatsResult<T> = Result<T, StatsError>;

/// Arithmetic mean
pub fn mean(values: &[f64]) -> StatsResult<f64> {
    if values.is_empty() {
        return Err(StatsError::EmptySeries { what: "mean" });
    }
    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

/// Population standard deviation around a known mean
pub fn population_std_dev(values: &[f64], mean: f64) -> StatsResult<f64> {
    if values.is_empty() {
        return Err(StatsError::EmptySeries {
            what: "standard deviation",
        });
    }
    let variance = values
        .iter()
        .map(|v| (v - mean).powi(2))
        .sum::<f64>()
        / values.len() as f64;
    Ok(variance.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[1.0, 2.0, 3.0, 4.0, 5.0]), Ok(3.0));
    }

    #[test]
    fn test_population_std_dev() {
        let sd = population_std_dev(&[1.0, 2.0, 3.0, 4.0, 5.0], 3.0).unwrap();
        assert!((sd - 2f64.sqrt()).abs() < 1e-9);
        assert!((sd - 1.4142).abs() < 1e-4);
    }

    #[test]
    fn test_empty_series_fails() {
        assert_eq!(mean(&[]), Err(StatsError::EmptySeries { what: "mean" }));
        assert!(population_std_dev(&[], 0.0).is_err());
    }

    #[test]
    fn test_single_value_has_zero_spread() {
        assert_eq!(population_std_dev(&[4.2], 4.2), Ok(0.0));
    }
}
