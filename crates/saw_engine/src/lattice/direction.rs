//! Unit-step directions and sets of legal moves.
//!
//! A d-dimensional lattice has `2 * d` directions: one negative and one
//! positive unit step per axis. Directions are numbered
//! `2 * axis + (positive as usize)`, which fixes the enumeration order to
//! axis order with the negative step first.

use std::fmt;

use super::shape::MAX_DIMENSIONS;
use crate::error::WalkError;

/// A unit step along one axis.
///
/// # Examples
///
/// ```rust
/// use saw_engine::lattice::Direction;
///
/// let dir = Direction::new(1, true);
/// assert_eq!(dir.index(), 3);
/// assert_eq!(dir.offset(), 1);
/// assert_eq!(dir.opposite(), Direction::new(1, false));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Direction(u8);

impl Direction {
    /// Creates the direction stepping along `axis`, forwards if `positive`.
    ///
    /// `axis` must be below [`MAX_DIMENSIONS`].
    #[inline]
    pub fn new(axis: usize, positive: bool) -> Self {
        debug_assert!(axis < MAX_DIMENSIONS);
        Self((2 * axis + positive as usize) as u8)
    }

    /// Decodes a direction identifier for a `dimensions`-axis lattice.
    ///
    /// # Errors
    ///
    /// Returns [`WalkError::InvalidDirection`] if `index >= 2 * dimensions`.
    pub fn from_index(index: usize, dimensions: usize) -> Result<Self, WalkError> {
        if index >= 2 * dimensions.min(MAX_DIMENSIONS) {
            return Err(WalkError::InvalidDirection { index, dimensions });
        }
        Ok(Self(index as u8))
    }

    /// Every direction of a `dimensions`-axis lattice in enumeration order.
    pub fn all(dimensions: usize) -> impl Iterator<Item = Direction> {
        (0..2 * dimensions.min(MAX_DIMENSIONS)).map(|i| Direction(i as u8))
    }

    /// Returns the direction identifier.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Returns the axis this direction steps along.
    #[inline]
    pub fn axis(self) -> usize {
        self.index() / 2
    }

    /// Returns `true` for the `+1` step.
    #[inline]
    pub fn is_positive(self) -> bool {
        self.0 & 1 == 1
    }

    /// Returns the signed unit offset, `-1` or `+1`.
    #[inline]
    pub fn offset(self) -> isize {
        if self.is_positive() {
            1
        } else {
            -1
        }
    }

    /// Returns the reverse step along the same axis.
    #[inline]
    pub fn opposite(self) -> Self {
        Self(self.0 ^ 1)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.is_positive() { '+' } else { '-' };
        write!(f, "{}{}", sign, self.axis())
    }
}

/// Non-empty set of legal directions at the current walk position.
///
/// Stored as a bit mask indexed by [`Direction::index`]; iteration follows
/// the fixed enumeration order so that a seeded sampler is reproducible.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MoveSet {
    mask: u64,
}

impl MoveSet {
    /// Builds a set from a bit mask, returning `None` for the empty set.
    #[inline]
    pub fn from_mask(mask: u64) -> Option<Self> {
        (mask != 0).then_some(Self { mask })
    }

    /// Returns the raw bit mask.
    #[inline]
    pub fn mask(&self) -> u64 {
        self.mask
    }

    /// Number of legal directions. Always at least 1.
    #[inline]
    pub fn len(&self) -> usize {
        self.mask.count_ones() as usize
    }

    /// Always `false`; an empty set is represented by `None`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.mask == 0
    }

    /// Returns `true` if `direction` is legal.
    #[inline]
    pub fn contains(&self, direction: Direction) -> bool {
        self.mask & (1u64 << direction.index()) != 0
    }

    /// Returns the `k`-th legal direction in enumeration order.
    pub fn nth(&self, k: usize) -> Option<Direction> {
        self.iter().nth(k)
    }

    /// Returns the `k`-th legal direction, with `k` reduced modulo
    /// [`len`](Self::len).
    pub fn select(&self, k: usize) -> Direction {
        let mut remaining = self.mask;
        for _ in 0..k % self.len() {
            remaining &= remaining - 1;
        }
        Direction(remaining.trailing_zeros() as u8)
    }

    /// Iterates legal directions in enumeration order.
    pub fn iter(&self) -> impl Iterator<Item = Direction> {
        let mut remaining = self.mask;
        std::iter::from_fn(move || {
            if remaining == 0 {
                return None;
            }
            let index = remaining.trailing_zeros();
            remaining &= remaining - 1;
            Some(Direction(index as u8))
        })
    }
}
