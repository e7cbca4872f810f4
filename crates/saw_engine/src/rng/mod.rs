//! # Random Number Generation
//!
//! Randomness enters the walker only through the [`UniformSource`] trait.
//!
//! - [`SawRng`]: seeded wrapper around `rand::StdRng` for sampling runs
//! - [`ReplaySource`]: scripted source for deterministic tests
//! - [`trial_seed`]: SplitMix64 stream splitting, one stream per trial
//!
//! ## Usage Example
//!
//! ```rust
//! use saw_engine::rng::{SawRng, UniformSource};
//!
//! let mut rng = SawRng::from_seed(12345);
//!
//! // Pick one of three legal moves
//! let choice = rng.gen_index(3);
//! assert!(choice < 3);
//!
//! // Early-stop coin
//! let u = rng.gen_uniform();
//! assert!((0.0..1.0).contains(&u));
//! ```

mod prng;
mod source;

pub use prng::{trial_seed, SawRng};
pub use source::{ReplaySource, UniformSource};
