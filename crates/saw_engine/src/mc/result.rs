//! Estimation results.

use std::fmt;

use crate::walker::RunPolicy;

/// Monte Carlo estimate of the number of self-avoiding walks.
///
/// # Examples
///
/// ```rust
/// use saw_engine::mc::EstimateResult;
/// use saw_engine::walker::RunPolicy;
///
/// let result = EstimateResult {
///     estimate: 20.4,
///     std_error: 0.3,
///     log_estimate: 20.4f64.ln(),
///     n_trials: 1000,
///     mean_steps: 6.1,
///     max_steps: 8,
///     trapped_fraction: 1.0,
///     policy: RunPolicy::Unrestricted,
/// };
///
/// println!("Estimate: {} +/- {}", result.estimate, result.confidence_95());
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EstimateResult {
    /// Arithmetic mean of the walk weights.
    pub estimate: f64,
    /// Standard error of the mean.
    pub std_error: f64,
    /// Natural logarithm of the mean, computed in log space.
    pub log_estimate: f64,
    /// Number of walks sampled.
    pub n_trials: usize,
    /// Mean number of steps per walk.
    pub mean_steps: f64,
    /// Longest walk sampled.
    pub max_steps: usize,
    /// Fraction of walks that ended trapped.
    pub trapped_fraction: f64,
    /// Policy the walks were run under.
    pub policy: RunPolicy,
}

impl EstimateResult {
    /// Returns the 95% confidence interval half-width.
    #[inline]
    pub fn confidence_95(&self) -> f64 {
        1.96 * self.std_error
    }

    /// Returns the 99% confidence interval half-width.
    #[inline]
    pub fn confidence_99(&self) -> f64 {
        2.576 * self.std_error
    }

    /// Returns `true` if the plain mean overflowed `f64`.
    ///
    /// `log_estimate` is still meaningful in that case.
    #[inline]
    pub fn overflowed(&self) -> bool {
        !self.estimate.is_finite()
    }
}

impl fmt::Display for EstimateResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.overflowed() {
            write!(
                f,
                "ln(estimate) = {:.6} over {} trials ({})",
                self.log_estimate, self.n_trials, self.policy
            )
        } else {
            write!(
                f,
                "{:.6e} +/- {:.3e} over {} trials ({})",
                self.estimate,
                self.confidence_95(),
                self.n_trials,
                self.policy
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> EstimateResult {
        EstimateResult {
            estimate: 10.0,
            std_error: 1.0,
            log_estimate: 10f64.ln(),
            n_trials: 100,
            mean_steps: 4.0,
            max_steps: 7,
            trapped_fraction: 0.5,
            policy: RunPolicy::Bounded,
        }
    }

    #[test]
    fn test_confidence_intervals() {
        let result = sample();
        assert!((result.confidence_95() - 1.96).abs() < 1e-12);
        assert!((result.confidence_99() - 2.576).abs() < 1e-12);
        assert!(!result.overflowed());
    }

    #[test]
    fn test_display() {
        let mut result = sample();
        assert!(result.to_string().contains("100 trials (bounded)"));

        result.estimate = f64::INFINITY;
        assert!(result.overflowed());
        assert!(result.to_string().starts_with("ln(estimate)"));
    }
}
