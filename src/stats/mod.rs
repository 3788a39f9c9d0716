//! Statistics module
//!
//! Streaming accumulators and whole-series statistics.

pub mod accumulators;
pub mod batch;

pub use accumulators::{Accumulator, Difference, ExponentialAverage, MovingAverage, PairwiseProduct};
pub use batch::{mean, population_std_dev, StatsError, StatsResult};
