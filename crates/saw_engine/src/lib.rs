//! # SAW Engine
//!
//! Monte Carlo estimation of the number of self-avoiding walks on bounded
//! d-dimensional rectangular lattices, by Rosenbluth-style importance
//! sampling.
//!
//! A walk starts at the origin and repeatedly steps to a uniformly chosen
//! in-bounds, unvisited neighbour. Its weight is the product of the number
//! of legal choices at every step, which is the inverse probability of the
//! realised path. The mean weight over many independent walks estimates how
//! many distinct walks the chosen [`RunPolicy`] can produce.
//!
//! ## Modules
//!
//! - [`lattice`]: shapes, positions, directions, occupancy grid
//! - [`rng`]: injected uniform random sources
//! - [`walker`]: the walker and its three run policies
//! - [`mc`]: the parallel sampler and its statistics
//! - [`error`]: configuration and walk errors
//!
//! ## Usage Example
//!
//! ```rust
//! use saw_engine::{estimate, RunPolicy};
//!
//! // Every maximal walk from the corner of a 2x2 lattice has weight 2
//! let value = estimate(100, &[2, 2], RunPolicy::Unrestricted, 42).unwrap();
//! assert_eq!(value, 2.0);
//! ```
//!
//! ## Reproducibility
//!
//! Given a seed, estimates are bit-identical whether trials run on one
//! thread or across the Rayon pool. See [`mc::Sampler`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod error;
pub mod lattice;
pub mod mc;
pub mod rng;
pub mod walker;

pub use error::{ConfigError, WalkError};
pub use lattice::{Direction, LatticeShape, Position};
pub use mc::{EstimateResult, Sampler, SamplerConfig};
pub use rng::{SawRng, UniformSource};
pub use walker::{LatticeWalker, RunPolicy, WalkOutcome};

/// Estimates the number of self-avoiding walks on a lattice with the given
/// extents, as the mean weight of `trial_count` independent walks.
///
/// The stop probability of the early-stop policy travels inside
/// [`RunPolicy::EarlyStop`].
///
/// # Errors
///
/// Returns `ConfigError` if `trial_count` or the policy is invalid (checked
/// first), or if the extents do not describe a valid lattice. No walk is run
/// and no grid is allocated in either case.
///
/// # Examples
///
/// ```rust
/// use saw_engine::{estimate, ConfigError, RunPolicy};
///
/// let value = estimate(500, &[3, 3], RunPolicy::early_stop(), 7).unwrap();
/// assert!(value >= 1.0);
///
/// assert_eq!(
///     estimate(0, &[3, 3], RunPolicy::Bounded, 7),
///     Err(ConfigError::InvalidTrialCount(0))
/// );
/// ```
pub fn estimate(
    trial_count: usize,
    extents: &[usize],
    policy: RunPolicy,
    seed: u64,
) -> Result<f64, ConfigError> {
    let config = SamplerConfig::builder()
        .n_trials(trial_count)
        .policy(policy)
        .seed(seed)
        .build()?;
    let shape = LatticeShape::new(extents)?;
    Ok(Sampler::new(config, shape)?.estimate().estimate)
}

/// Runs one walk under `policy`, drawing from `rng`, and returns its weight
/// and path (origin first).
///
/// # Errors
///
/// Returns `ConfigError` if the extents or the policy are invalid.
///
/// # Examples
///
/// ```rust
/// use saw_engine::{run_single, RunPolicy, SawRng};
///
/// let mut rng = SawRng::from_seed(1);
/// let (weight, path) = run_single(&[2, 2], RunPolicy::Unrestricted, &mut rng).unwrap();
///
/// assert_eq!(weight, 2.0);
/// assert_eq!(path.len(), 4);
/// ```
pub fn run_single<R: UniformSource + ?Sized>(
    extents: &[usize],
    policy: RunPolicy,
    rng: &mut R,
) -> Result<(f64, Vec<Position>), ConfigError> {
    policy.validate()?;
    let mut walker = LatticeWalker::from_extents(extents)?;
    walker.run(&policy, rng)?;
    Ok(walker.into_outcome().into_parts())
}
