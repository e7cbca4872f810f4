//! Lattice walker and its run policies.
//!
//! A [`LatticeWalker`] owns one walk: the occupancy grid, the head position,
//! the path and the per-step choice counts. A [`RunPolicy`] decides when the
//! walk stops:
//!
//! ```text
//! loop {
//!     stop?  ── policy-specific (trapped / target reached / early-stop coin)
//!     moves = enumerate_moves()        // in bounds and unvisited
//!     k     = uniform index in moves
//!     choice_counts.push(|moves|)
//!     apply move k
//! }
//! weight = product(choice_counts)
//! ```
//!
//! Each step is chosen with probability `1 / |moves|`, so the product of the
//! choice counts is the inverse probability of the realised path and its
//! mean over many walks is an unbiased estimate of the number of walks the
//! policy can produce.

mod outcome;
mod policy;
mod walk;

pub use outcome::WalkOutcome;
pub use policy::{RunPolicy, DEFAULT_STOP_PROBABILITY};
pub use walk::LatticeWalker;
