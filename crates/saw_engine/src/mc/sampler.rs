//! Monte Carlo sampling engine.
//!
//! The [`Sampler`] coordinates:
//! 1. Per-trial random streams (via [`SawRng::for_trial`])
//! 2. One fresh [`LatticeWalker`] per trial
//! 3. The configured [`RunPolicy`]
//! 4. Aggregation of the walk weights into an [`EstimateResult`]
//!
//! # Reproducibility
//!
//! Trial `i` always draws from the stream seeded with
//! `trial_seed(seed, i)`, and per-trial records are reduced in trial order.
//! Parallel and sequential runs with the same seed therefore produce
//! bit-identical estimates.

use std::time::Instant;

use rayon::prelude::*;
use tracing::debug;

use super::accumulator::WeightAccumulator;
use super::config::SamplerConfig;
use super::result::EstimateResult;
use crate::error::ConfigError;
use crate::lattice::LatticeShape;
use crate::rng::{SawRng, UniformSource};
use crate::walker::{LatticeWalker, RunPolicy, WalkOutcome};

/// Summary of one trial, without the path.
#[derive(Clone, Copy, Debug, PartialEq)]
struct TrialRecord {
    weight: f64,
    log_weight: f64,
    steps: usize,
    trapped: bool,
}

impl TrialRecord {
    fn from_walker(walker: &LatticeWalker) -> Self {
        Self {
            weight: walker.weight(),
            log_weight: walker.log_weight(),
            steps: walker.steps(),
            trapped: walker.is_trapped(),
        }
    }
}

/// Monte Carlo estimator of self-avoiding walk counts.
///
/// # Examples
///
/// ```rust
/// use saw_engine::lattice::LatticeShape;
/// use saw_engine::mc::{Sampler, SamplerConfig};
///
/// let config = SamplerConfig::builder()
///     .n_trials(2_000)
///     .seed(42)
///     .build()
///     .unwrap();
/// let shape = LatticeShape::new(&[3, 3]).unwrap();
///
/// let sampler = Sampler::new(config, shape).unwrap();
/// let result = sampler.estimate();
///
/// // 20 maximal walks start at the corner of a 3x3 lattice
/// assert!((result.estimate - 20.0).abs() < 5.0 * result.std_error + 1.0);
/// ```
#[derive(Clone, Debug)]
pub struct Sampler {
    config: SamplerConfig,
    shape: LatticeShape,
}

impl Sampler {
    /// Creates a sampler for `shape`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the configuration is invalid.
    pub fn new(config: SamplerConfig, shape: LatticeShape) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config, shape })
    }

    /// Returns the configuration.
    #[inline]
    pub fn config(&self) -> &SamplerConfig {
        &self.config
    }

    /// Returns the lattice shape.
    #[inline]
    pub fn shape(&self) -> &LatticeShape {
        &self.shape
    }

    fn base_seed(&self) -> u64 {
        self.config.seed().unwrap_or(0)
    }

    /// Runs trial `index` and returns the full outcome, path included.
    pub fn run_trial(&self, index: usize) -> WalkOutcome {
        let mut rng = SawRng::for_trial(self.base_seed(), index);
        self.walk(&mut rng).into_outcome()
    }

    /// Runs the configured number of trials and returns every weight, in
    /// trial order.
    pub fn sample_weights(&self) -> Vec<f64> {
        self.collect_records()
            .into_iter()
            .map(|record| record.weight)
            .collect()
    }

    /// Runs `count` trials and returns their outcomes, for callers that
    /// display or post-process whole walks.
    pub fn sample_walks(&self, count: usize) -> Vec<WalkOutcome> {
        if self.config.parallel().should_parallelise(count) {
            (0..count)
                .into_par_iter()
                .map(|i| self.run_trial(i))
                .collect()
        } else {
            (0..count).map(|i| self.run_trial(i)).collect()
        }
    }

    /// Runs the configured number of trials and aggregates their weights.
    pub fn estimate(&self) -> EstimateResult {
        let n_trials = self.config.n_trials();
        let parallel = self.config.parallel().should_parallelise(n_trials);
        debug!(
            shape = %self.shape,
            n_trials,
            policy = %self.config.policy(),
            seed = self.base_seed(),
            parallel,
            "starting estimate"
        );

        let start = Instant::now();
        let records = self.collect_records();
        let result = self.aggregate(&records);

        debug!(
            estimate = result.estimate,
            std_error = result.std_error,
            log_estimate = result.log_estimate,
            mean_steps = result.mean_steps,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "estimate complete"
        );
        result
    }

    /// Runs every trial sequentially, drawing all randomness from `rng`.
    ///
    /// The seed in the configuration is ignored. Two calls with identical
    /// sources produce identical results.
    pub fn estimate_with<R: UniformSource + ?Sized>(&self, rng: &mut R) -> EstimateResult {
        let records: Vec<_> = (0..self.config.n_trials())
            .map(|_| TrialRecord::from_walker(&self.walk(rng)))
            .collect();
        self.aggregate(&records)
    }

    fn collect_records(&self) -> Vec<TrialRecord> {
        let n_trials = self.config.n_trials();
        let seed = self.base_seed();
        let record = |index: usize| {
            let mut rng = SawRng::for_trial(seed, index);
            TrialRecord::from_walker(&self.walk(&mut rng))
        };

        if self.config.parallel().should_parallelise(n_trials) {
            (0..n_trials).into_par_iter().map(record).collect()
        } else {
            (0..n_trials).map(record).collect()
        }
    }

    fn walk<R: UniformSource + ?Sized>(&self, rng: &mut R) -> LatticeWalker {
        let mut walker = LatticeWalker::new(self.shape.clone());
        // Policy was validated in `new`.
        match self.config.policy() {
            RunPolicy::Unrestricted => walker.run_unrestricted(rng),
            RunPolicy::Bounded => walker.run_bounded(rng),
            RunPolicy::EarlyStop { stop_probability } => {
                walker.run_early_stop(stop_probability, rng)
            }
        };
        walker
    }

    fn aggregate(&self, records: &[TrialRecord]) -> EstimateResult {
        let mut weights = WeightAccumulator::<f64>::new();
        let mut total_steps = 0usize;
        let mut max_steps = 0usize;
        let mut trapped = 0usize;

        for record in records {
            weights.add(record.weight, record.log_weight);
            total_steps += record.steps;
            max_steps = max_steps.max(record.steps);
            trapped += record.trapped as usize;
        }

        let n = records.len().max(1) as f64;
        EstimateResult {
            estimate: weights.mean(),
            std_error: weights.std_error(),
            log_estimate: weights.log_mean(),
            n_trials: records.len(),
            mean_steps: total_steps as f64 / n,
            max_steps,
            trapped_fraction: trapped as f64 / n,
            policy: self.config.policy(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mc::config::ParallelConfig;
    use crate::rng::ReplaySource;

    fn sampler(extents: &[usize], n_trials: usize, policy: RunPolicy) -> Sampler {
        let config = SamplerConfig::builder()
            .n_trials(n_trials)
            .policy(policy)
            .seed(42)
            .build()
            .unwrap();
        Sampler::new(config, LatticeShape::new(extents).unwrap()).unwrap()
    }

    #[test]
    fn test_two_by_two_estimate_is_exact() {
        let result = sampler(&[2, 2], 100, RunPolicy::Unrestricted).estimate();
        assert_eq!(result.estimate, 2.0);
        assert_eq!(result.std_error, 0.0);
        assert_eq!(result.max_steps, 3);
        assert_eq!(result.trapped_fraction, 1.0);
        assert_eq!(result.n_trials, 100);
    }

    #[test]
    fn test_single_cell_estimate() {
        for policy in [
            RunPolicy::Unrestricted,
            RunPolicy::Bounded,
            RunPolicy::early_stop(),
        ] {
            let result = sampler(&[1, 1], 10, policy).estimate();
            assert_eq!(result.estimate, 1.0, "{}", policy);
            assert_eq!(result.mean_steps, 0.0);
        }
    }

    #[test]
    fn test_sample_weights_in_trial_order() {
        let s = sampler(&[4, 4], 50, RunPolicy::Bounded);
        let weights = s.sample_weights();
        assert_eq!(weights.len(), 50);
        for (i, &w) in weights.iter().enumerate() {
            assert_eq!(w, s.run_trial(i).weight);
            assert!(w >= 1.0);
        }
    }

    #[test]
    fn test_mean_of_weights_is_estimate() {
        let s = sampler(&[3, 4], 200, RunPolicy::early_stop());
        let weights = s.sample_weights();
        let mean = weights.iter().sum::<f64>() / weights.len() as f64;
        assert!((s.estimate().estimate - mean).abs() <= 1e-12 * mean);
    }

    #[test]
    fn test_parallel_matches_sequential_bitwise() {
        let shape = LatticeShape::new(&[5, 5]).unwrap();
        let build = |parallel: ParallelConfig| {
            let config = SamplerConfig::builder()
                .n_trials(4_000)
                .seed(7)
                .parallel(parallel)
                .build()
                .unwrap();
            Sampler::new(config, shape.clone()).unwrap().estimate()
        };

        let sequential = build(ParallelConfig::sequential());
        let parallel = build(ParallelConfig::with_min_trials(1));
        assert_eq!(sequential.estimate.to_bits(), parallel.estimate.to_bits());
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_different_seeds_differ() {
        let shape = LatticeShape::new(&[6, 6]).unwrap();
        let run = |seed| {
            let config = SamplerConfig::builder()
                .n_trials(500)
                .seed(seed)
                .build()
                .unwrap();
            Sampler::new(config, shape.clone()).unwrap().estimate().estimate
        };
        assert_ne!(run(1), run(2));
    }

    #[test]
    fn test_estimate_with_replay_is_reproducible() {
        let s = sampler(&[3, 3], 25, RunPolicy::early_stop());
        let script = || {
            ReplaySource::new()
                .with_indices([0, 1, 1, 0, 2])
                .with_uniforms([0.5, 0.2, 0.05, 0.7])
        };
        let a = s.estimate_with(&mut script());
        let b = s.estimate_with(&mut script());
        assert_eq!(a, b);
        assert_eq!(a.n_trials, 25);
    }

    #[test]
    fn test_sample_walks() {
        let s = sampler(&[4, 4], 10, RunPolicy::Bounded);
        let walks = s.sample_walks(5);
        assert_eq!(walks.len(), 5);
        for (i, walk) in walks.iter().enumerate() {
            assert_eq!(walk, &s.run_trial(i));
            assert!(walk.steps <= walk.target_length.unwrap());
        }
    }

    #[test]
    fn test_new_revalidates_config() {
        let config = SamplerConfig::builder().n_trials(1).build().unwrap();
        let shape = LatticeShape::new(&[2, 2]).unwrap();
        assert!(Sampler::new(config, shape).is_ok());
    }
}
