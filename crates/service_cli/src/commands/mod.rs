//! CLI command implementations
//!
//! Each submodule implements a specific CLI command.

pub mod check;
pub mod estimate;
pub mod walk;

use saw_engine::mc::{ParallelConfig, Sampler, SamplerConfig};
use saw_engine::LatticeShape;

use crate::{Result, SawConfig};

/// Builds a sampler from validated settings, running `n_trials` walks.
pub(crate) fn build_sampler(config: &SawConfig, n_trials: usize) -> Result<Sampler> {
    config.validate()?;

    let parallel = if config.sequential {
        ParallelConfig::sequential()
    } else {
        ParallelConfig::default()
    };
    let sampler_config = SamplerConfig::builder()
        .n_trials(n_trials)
        .policy(config.run_policy()?)
        .seed(config.seed.unwrap_or(0))
        .parallel(parallel)
        .build()?;
    let shape = LatticeShape::new(&config.extents()?)?;

    Ok(Sampler::new(sampler_config, shape)?)
}
