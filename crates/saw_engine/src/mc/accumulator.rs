//! Streaming accumulation of per-walk importance weights.
//!
//! Weights grow geometrically with walk length, so alongside the plain sum
//! and sum of squares the accumulator keeps a log-sum-exp of the log weights
//! (running maximum plus rescaled sum). That log-space mean stays finite when
//! the plain sum overflows.

use num_traits::Float;

/// Accumulated weight statistics over a batch of walks.
///
/// # Examples
///
/// ```rust
/// use saw_engine::mc::WeightAccumulator;
///
/// let mut acc: WeightAccumulator<f64> = WeightAccumulator::new();
/// acc.add(2.0, 2f64.ln());
/// acc.add(4.0, 4f64.ln());
///
/// assert_eq!(acc.count(), 2);
/// assert!((acc.mean() - 3.0).abs() < 1e-12);
/// assert!((acc.log_mean().exp() - 3.0).abs() < 1e-12);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct WeightAccumulator<T: Float> {
    sum: T,
    sum_sq: T,
    /// Largest log weight seen so far.
    log_max: T,
    /// Sum of `exp(log_weight - log_max)`.
    log_scaled_sum: T,
    count: usize,
}

impl<T: Float> Default for WeightAccumulator<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> WeightAccumulator<T> {
    /// Creates an empty accumulator.
    #[inline]
    pub fn new() -> Self {
        Self {
            sum: T::zero(),
            sum_sq: T::zero(),
            log_max: T::neg_infinity(),
            log_scaled_sum: T::zero(),
            count: 0,
        }
    }

    /// Adds one walk's weight and its natural logarithm.
    #[inline]
    pub fn add(&mut self, weight: T, log_weight: T) {
        self.sum = self.sum + weight;
        self.sum_sq = self.sum_sq + weight * weight;
        self.add_log(log_weight, T::one());
        self.count += 1;
    }

    fn add_log(&mut self, log_value: T, scaled: T) {
        if log_value <= self.log_max {
            self.log_scaled_sum = self.log_scaled_sum + scaled * (log_value - self.log_max).exp();
        } else {
            self.log_scaled_sum = self.log_scaled_sum * (self.log_max - log_value).exp() + scaled;
            self.log_max = log_value;
        }
    }

    /// Adds every statistic of another accumulator.
    #[inline]
    pub fn merge(&mut self, other: &Self) {
        self.sum = self.sum + other.sum;
        self.sum_sq = self.sum_sq + other.sum_sq;
        if other.count > 0 {
            self.add_log(other.log_max, other.log_scaled_sum);
        }
        self.count += other.count;
    }

    /// Returns the number of weights added.
    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Returns the plain sum of weights.
    #[inline]
    pub fn sum(&self) -> T {
        self.sum
    }

    /// Arithmetic mean of the weights; NaN when empty.
    pub fn mean(&self) -> T {
        self.sum / self.count_as()
    }

    /// Unbiased sample variance; zero for fewer than two weights.
    pub fn variance(&self) -> T {
        if self.count < 2 {
            return T::zero();
        }
        let n = self.count_as();
        let mean = self.sum / n;
        let variance = (self.sum_sq - n * mean * mean) / (n - T::one());
        variance.max(T::zero())
    }

    /// Standard error of the mean.
    pub fn std_error(&self) -> T {
        if self.count < 2 {
            return T::zero();
        }
        (self.variance() / self.count_as()).sqrt()
    }

    /// Natural logarithm of the mean weight, computed in log space.
    ///
    /// Finite whenever every added log weight is finite, even if
    /// [`mean`](Self::mean) has overflowed.
    pub fn log_mean(&self) -> T {
        self.log_max + self.log_scaled_sum.ln() - self.count_as().ln()
    }

    fn count_as(&self) -> T {
        T::from(self.count).unwrap_or_else(T::nan)
    }
}
