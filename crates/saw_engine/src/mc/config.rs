//! Sampler configuration.
//!
//! This module provides configuration types and builders for Monte Carlo
//! estimation runs. Everything is validated at build time, before any
//! lattice is allocated.

use crate::error::ConfigError;
use crate::walker::RunPolicy;

/// Maximum number of trials allowed in one run.
pub const MAX_TRIALS: usize = 100_000_000;

/// Default minimum number of trials per worker before going parallel.
pub const DEFAULT_MIN_TRIALS_PER_THREAD: usize = 256;

/// Parallel execution settings.
///
/// Trials are independent, so they are spread over the Rayon thread pool
/// once there are enough of them to amortise the scheduling overhead.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParallelConfig {
    /// Whether parallel execution is allowed at all.
    pub enabled: bool,

    /// Minimum trials per thread before parallelisation kicks in.
    pub min_trials_per_thread: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            min_trials_per_thread: DEFAULT_MIN_TRIALS_PER_THREAD,
        }
    }
}

impl ParallelConfig {
    /// Sequential execution only.
    #[inline]
    pub fn sequential() -> Self {
        Self {
            enabled: false,
            ..Default::default()
        }
    }

    /// Creates a configuration with the given minimum trials per thread.
    #[inline]
    pub fn with_min_trials(min_trials_per_thread: usize) -> Self {
        Self {
            min_trials_per_thread,
            ..Default::default()
        }
    }

    /// Determines if parallelisation should be used for the given trial count.
    #[inline]
    pub fn should_parallelise(&self, n_trials: usize) -> bool {
        let n_threads = rayon::current_num_threads();
        self.enabled && n_threads > 1 && n_trials >= self.min_trials_per_thread * n_threads
    }
}

/// Monte Carlo estimation configuration.
///
/// Immutable configuration specifying the trial count, run policy and seed.
/// Use [`SamplerConfigBuilder`] to construct instances.
///
/// # Examples
///
/// ```rust
/// use saw_engine::mc::SamplerConfig;
/// use saw_engine::walker::RunPolicy;
///
/// let config = SamplerConfig::builder()
///     .n_trials(10_000)
///     .policy(RunPolicy::Bounded)
///     .seed(42)
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.n_trials(), 10_000);
/// assert_eq!(config.policy(), RunPolicy::Bounded);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct SamplerConfig {
    /// Number of independent walks.
    n_trials: usize,
    /// Stopping rule of every walk.
    policy: RunPolicy,
    /// Optional base seed for reproducibility.
    seed: Option<u64>,
    /// Parallel execution settings.
    parallel: ParallelConfig,
}

impl SamplerConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> SamplerConfigBuilder {
        SamplerConfigBuilder::default()
    }

    /// Returns the number of trials.
    #[inline]
    pub fn n_trials(&self) -> usize {
        self.n_trials
    }

    /// Returns the run policy.
    #[inline]
    pub fn policy(&self) -> RunPolicy {
        self.policy
    }

    /// Returns the optional base seed.
    #[inline]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Returns the parallel execution settings.
    #[inline]
    pub fn parallel(&self) -> ParallelConfig {
        self.parallel
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - `n_trials` is 0 or greater than 100,000,000
    /// - the policy's stop probability is outside `[0, 1)`
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.n_trials == 0 || self.n_trials > MAX_TRIALS {
            return Err(ConfigError::InvalidTrialCount(self.n_trials));
        }
        self.policy.validate()
    }
}

/// Builder for [`SamplerConfig`].
///
/// # Examples
///
/// ```rust
/// use saw_engine::mc::SamplerConfig;
///
/// let config = SamplerConfig::builder()
///     .n_trials(5_000)
///     .stop_probability(0.2)
///     .seed(7)
///     .sequential()
///     .build()
///     .unwrap();
///
/// assert!(!config.parallel().enabled);
/// ```
#[derive(Clone, Debug, Default)]
pub struct SamplerConfigBuilder {
    n_trials: Option<usize>,
    policy: RunPolicy,
    seed: Option<u64>,
    parallel: ParallelConfig,
}

impl SamplerConfigBuilder {
    /// Sets the number of trials, in `[1, 100_000_000]`.
    #[inline]
    pub fn n_trials(mut self, n_trials: usize) -> Self {
        self.n_trials = Some(n_trials);
        self
    }

    /// Sets the run policy.
    #[inline]
    pub fn policy(mut self, policy: RunPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Switches to the early-stop policy with the given probability.
    #[inline]
    pub fn stop_probability(mut self, stop_probability: f64) -> Self {
        self.policy = RunPolicy::EarlyStop { stop_probability };
        self
    }

    /// Sets the base seed.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the parallel execution settings.
    #[inline]
    pub fn parallel(mut self, parallel: ParallelConfig) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disables parallel execution.
    #[inline]
    pub fn sequential(mut self) -> Self {
        self.parallel = ParallelConfig::sequential();
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `n_trials` is not set or any value is invalid.
    pub fn build(self) -> Result<SamplerConfig, ConfigError> {
        let n_trials = self.n_trials.ok_or(ConfigError::InvalidParameter {
            name: "n_trials",
            value: "must be specified".to_string(),
        })?;

        let config = SamplerConfig {
            n_trials,
            policy: self.policy,
            seed: self.seed,
            parallel: self.parallel,
        };

        config.validate()?;
        Ok(config)
    }
}
