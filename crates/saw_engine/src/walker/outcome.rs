//! Result of a single completed walk.

use std::fmt;

use crate::lattice::Position;

/// A finished walk: its importance weight and the path it took.
///
/// This is what a sampler aggregates and what a plotting collaborator
/// consumes; the core does no rendering of its own.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WalkOutcome {
    /// Product of the choice counts.
    pub weight: f64,
    /// Natural logarithm of `weight`.
    pub log_weight: f64,
    /// Number of steps taken.
    pub steps: usize,
    /// Whether the walk ended with no legal move.
    pub trapped: bool,
    /// Target length drawn by the bounded policy.
    pub target_length: Option<usize>,
    /// Visited positions, origin first.
    pub path: Vec<Position>,
    /// Legal-move count at each step.
    pub choice_counts: Vec<u32>,
}

impl WalkOutcome {
    /// Splits the outcome into `(weight, path)`.
    pub fn into_parts(self) -> (f64, Vec<Position>) {
        (self.weight, self.path)
    }

    /// Last position of the walk.
    pub fn end(&self) -> Option<&Position> {
        self.path.last()
    }
}

impl fmt::Display for WalkOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Self-avoiding walk of length {}", self.steps)
    }
}
