//! Error types for lattice construction, walk mechanics and sampling.
//!
//! Two families are distinguished:
//!
//! - [`ConfigError`]: rejected inputs (lattice shape, trial count, stop
//!   probability). Always raised before any lattice is allocated.
//! - [`WalkError`]: misuse of the walker's move primitives. The run policies
//!   never produce these; they are only reachable through direct calls to
//!   [`LatticeWalker::apply_move`](crate::walker::LatticeWalker::apply_move)
//!   or [`Direction::from_index`](crate::lattice::Direction::from_index).
//!
//! A trapped walk is not an error and has no variant here.

use thiserror::Error;

/// Configuration error for lattices and samplers.
///
/// # Examples
///
/// ```rust
/// use saw_engine::error::ConfigError;
///
/// let err = ConfigError::TooFewAxes(1);
/// assert_eq!(
///     err.to_string(),
///     "Lattice shape has 1 axis(es): at least 2 are required"
/// );
/// ```
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ConfigError {
    /// Lattice shape with fewer than two axes.
    #[error("Lattice shape has {0} axis(es): at least 2 are required")]
    TooFewAxes(usize),

    /// Lattice shape with more axes than the direction mask can hold.
    #[error("Lattice shape has {count} axes: at most {max} are supported")]
    TooManyAxes {
        /// Requested number of axes.
        count: usize,
        /// Supported maximum.
        max: usize,
    },

    /// Non-positive extent along one axis.
    #[error("Invalid extent {extent} on axis {axis}: extents must be positive")]
    InvalidExtent {
        /// Axis index.
        axis: usize,
        /// Offending extent.
        extent: usize,
    },

    /// Product of extents overflows or exceeds the supported cell count.
    #[error("Lattice has too many points: product of extents exceeds {max}")]
    LatticeTooLarge {
        /// Supported maximum number of cells.
        max: usize,
    },

    /// Trial count outside `[1, MAX_TRIALS]`.
    #[error("Invalid trial count {0}: must be in range [1, 100_000_000]")]
    InvalidTrialCount(usize),

    /// Stop probability outside `[0, 1)`.
    #[error("Invalid stop probability {0}: must be in range [0, 1)")]
    InvalidStopProbability(f64),

    /// Invalid parameter value with name and description.
    #[error("Invalid parameter '{name}': {value}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Description of the invalid value.
        value: String,
    },
}

/// Contract violation in the walker's move primitives.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum WalkError {
    /// Direction identifier outside `[0, 2 * dimensions)`.
    #[error(
        "Invalid direction {index}: a {dimensions}-dimensional lattice has {count} directions",
        count = .dimensions * 2
    )]
    InvalidDirection {
        /// Offending direction identifier.
        index: usize,
        /// Number of lattice axes.
        dimensions: usize,
    },

    /// Move would leave the lattice or revisit an occupied cell.
    #[error("Illegal move {direction}: target is out of bounds or already visited")]
    IllegalMove {
        /// Direction identifier of the rejected move.
        direction: usize,
    },
}
