//! Monte Carlo estimation of self-avoiding walk counts.
//!
//! Each trial runs one walk from the origin under a [`RunPolicy`] and yields
//! its importance weight. The mean weight over many independent trials is an
//! unbiased estimate of the number of walks that policy can produce.
//!
//! # Architecture
//!
//! ```text
//! Sampler
//! ├── SamplerConfig      (trials, policy, seed, parallel settings)
//! ├── LatticeShape       (shared, read-only)
//! ├── SawRng::for_trial  (one independent stream per trial)
//! └── Aggregation
//!     ├── per-trial records, in trial order
//!     └── WeightAccumulator -> EstimateResult
//! ```
//!
//! # Examples
//!
//! ```rust
//! use saw_engine::lattice::LatticeShape;
//! use saw_engine::mc::{Sampler, SamplerConfig};
//! use saw_engine::walker::RunPolicy;
//!
//! let config = SamplerConfig::builder()
//!     .n_trials(1_000)
//!     .policy(RunPolicy::Bounded)
//!     .seed(42)
//!     .build()
//!     .unwrap();
//!
//! let sampler = Sampler::new(config, LatticeShape::new(&[4, 4]).unwrap()).unwrap();
//! let result = sampler.estimate();
//!
//! assert_eq!(result.n_trials, 1_000);
//! assert!(result.estimate >= 1.0);
//! ```
//!
//! [`RunPolicy`]: crate::walker::RunPolicy

mod accumulator;
mod config;
mod result;
mod sampler;

pub use accumulator::WeightAccumulator;
pub use config::{
    ParallelConfig, SamplerConfig, SamplerConfigBuilder, DEFAULT_MIN_TRIALS_PER_THREAD, MAX_TRIALS,
};
pub use result::EstimateResult;
pub use sampler::Sampler;
