//! Streaming accumulators
//!
//! Each accumulator consumes one value per entry, in entry order, and
//! returns its running output. Instances are built fresh for every pass and
//! never shared between metrics.

use std::collections::VecDeque;

/// A stateful one-value-at-a-time statistic
pub trait Accumulator {
    /// Feed the next value and return the current output
    fn next(&mut self, value: f64) -> f64;

    /// Feed a whole sequence, collecting every output
    fn run<I>(&mut self, values: I) -> Vec<f64>
    where
        I: IntoIterator<Item = f64>,
        Self: Sized,
    {
        values.into_iter().map(|v| self.next(v)).collect()
    }
}

/// Mean of the last `width` values, current value included.
///
/// While fewer than `width` values have been seen the denominator is the
/// number seen so far.
#[derive(Debug, Clone)]
pub struct MovingAverage {
    width: usize,
    queue: VecDeque<f64>,
    sum: f64,
}

impl MovingAverage {
    pub fn new(width: usize) -> Self {
        let width = width.max(1);
        Self {
            width,
            queue: VecDeque::with_capacity(width + 1),
            sum: 0.0,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }
}

impl Accumulator for MovingAverage {
    fn next(&mut self, value: f64) -> f64 {
        self.queue.push_back(value);
        self.sum += value;
        if self.queue.len() > self.width {
            if let Some(oldest) = self.queue.pop_front() {
                self.sum -= oldest;
            }
        }
        self.sum / self.queue.len() as f64
    }
}

/// Exponentially weighted average with smoothing factor `alpha` in (0, 1]
#[derive(Debug, Clone)]
pub struct ExponentialAverage {
    alpha: f64,
    value: Option<f64>,
}

impl ExponentialAverage {
    pub fn new(alpha: f64) -> Self {
        Self { alpha, value: None }
    }
}

impl Accumulator for ExponentialAverage {
    fn next(&mut self, value: f64) -> f64 {
        let next = match self.value {
            Some(prior) => prior * (1.0 - self.alpha) + self.alpha * value,
            None => value,
        };
        self.value = Some(next);
        next
    }
}

/// First difference against the previous value (which starts at 0)
#[derive(Debug, Clone, Default)]
pub struct Difference {
    previous: f64,
}

impl Difference {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Accumulator for Difference {
    fn next(&mut self, value: f64) -> f64 {
        let delta = value - self.previous;
        self.previous = value;
        delta
    }
}

/// Product with the previous value (which starts at 0)
#[derive(Debug, Clone, Default)]
pub struct PairwiseProduct {
    previous: f64,
}

impl PairwiseProduct {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Accumulator for PairwiseProduct {
    fn next(&mut self, value: f64) -> f64 {
        let product = value * self.previous;
        self.previous = value;
        product
    }
}
