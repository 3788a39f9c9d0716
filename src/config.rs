//! Report configuration
//!
//! Every tunable of a rendering pass, with the defaults the log was
//! designed around.

use serde::Serialize;
use thiserror::Error;

/// Default moving-average window, in entries
pub const DEFAULT_AVERAGE_WIDTH: usize = 10;
/// Default exponential smoothing factor
pub const DEFAULT_SMOOTHING_ALPHA: f64 = 0.2;
/// Day-over-day change that counts as gaining or losing: one pound in kg,
/// rounded down so 0.25 still registers
pub const DEFAULT_TREND_THRESHOLD: f64 = 0.24;
/// Two-sided 99% normal quantile
pub const DEFAULT_BAND_Z: f64 = 2.575829;
/// Sigma of the variation series used by the advisory rules
pub const DEFAULT_ADVISORY_SIGMA: f64 = 0.5497;
/// Largest chart width or height, in pixels
pub const MAX_CHART_DIMENSION: u32 = 10_000;

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("moving average width must be at least 1")]
    InvalidWidth,

    #[error("smoothing alpha must be in (0, 1], got {0}")]
    InvalidAlpha(f64),

    #[error("advisory sigma must be positive, got {0}")]
    InvalidSigma(f64),

    #[error("chart size must be between 1 and {max} pixels per side, got {width}x{height}", max = MAX_CHART_DIMENSION)]
    InvalidChartSize { width: u32, height: u32 },
}

/// Where the advisory rules get their sigma from
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SigmaSource {
    /// A fixed, previously measured value
    Fixed(f64),
    /// The population standard deviation of this run's variation series
    Computed,
}

impl Default for SigmaSource {
    fn default() -> Self {
        SigmaSource::Fixed(DEFAULT_ADVISORY_SIGMA)
    }
}

/// Advisory rule settings
#[derive(Debug, Clone, Default, Serialize)]
pub struct AdvisoryConfig {
    pub enabled: bool,
    pub sigma: SigmaSource,
}

/// Chart image size in pixels
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ChartSize {
    pub width: u32,
    pub height: u32,
}

impl ChartSize {
    pub fn is_valid(&self) -> bool {
        (1..=MAX_CHART_DIMENSION).contains(&self.width)
            && (1..=MAX_CHART_DIMENSION).contains(&self.height)
    }
}

impl Default for ChartSize {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 400,
        }
    }
}

/// Settings for one rendering pass
#[derive(Debug, Clone, Serialize)]
pub struct ReportConfig {
    pub average_width: usize,
    pub smoothing_alpha: f64,
    pub trend_threshold: f64,
    pub band_z: f64,
    /// Minutes west of UTC; read once from the host at startup by the CLI
    pub utc_offset_minutes_west: i32,
    pub advisory: AdvisoryConfig,
    pub chart_size: ChartSize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            average_width: DEFAULT_AVERAGE_WIDTH,
            smoothing_alpha: DEFAULT_SMOOTHING_ALPHA,
            trend_threshold: DEFAULT_TREND_THRESHOLD,
            band_z: DEFAULT_BAND_Z,
            utc_offset_minutes_west: 0,
            advisory: AdvisoryConfig::default(),
            chart_size: ChartSize::default(),
        }
    }
}

impl ReportConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.average_width == 0 {
            return Err(ConfigError::InvalidWidth);
        }
        if !(self.smoothing_alpha > 0.0 && self.smoothing_alpha <= 1.0) {
            return Err(ConfigError::InvalidAlpha(self.smoothing_alpha));
        }
        if let SigmaSource::Fixed(sigma) = self.advisory.sigma {
            if !(sigma > 0.0 && sigma.is_finite()) {
                return Err(ConfigError::InvalidSigma(sigma));
            }
        }
        if !self.chart_size.is_valid() {
            return Err(ConfigError::InvalidChartSize {
                width: self.chart_size.width,
                height: self.chart_size.height,
            });
        }
        Ok(())
    }
}
