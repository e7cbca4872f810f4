//! Lattice shapes and positions.
//!
//! A [`LatticeShape`] fixes the extent of every axis and owns the row-major
//! strides used to map a [`Position`] to a dense cell index.

use std::fmt;

use super::direction::Direction;
use crate::error::ConfigError;

/// Maximum number of lattice axes.
///
/// Directions are stored two per axis in a 64-bit mask, see
/// [`MoveSet`](super::MoveSet).
pub const MAX_DIMENSIONS: usize = 32;

/// Maximum number of cells in a lattice.
pub const MAX_LATTICE_POINTS: usize = u32::MAX as usize;

/// Validated extents of a bounded d-dimensional lattice.
///
/// Axis `i` covers the index range `[0, extent_i)`. The shape is immutable
/// once built.
///
/// # Examples
///
/// ```rust
/// use saw_engine::lattice::LatticeShape;
///
/// let shape = LatticeShape::new(&[3, 4]).unwrap();
/// assert_eq!(shape.dimensions(), 2);
/// assert_eq!(shape.total_points(), 12);
/// assert_eq!(shape.index_of(&[1, 2]), 6);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct LatticeShape {
    extents: Vec<usize>,
    /// Row-major strides: the last axis is contiguous.
    strides: Vec<usize>,
    total_points: usize,
}

impl LatticeShape {
    /// Builds a shape from per-axis extents.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - fewer than 2 or more than [`MAX_DIMENSIONS`] axes are given
    /// - any extent is 0
    /// - the product of extents exceeds [`MAX_LATTICE_POINTS`]
    pub fn new(extents: &[usize]) -> Result<Self, ConfigError> {
        if extents.len() < 2 {
            return Err(ConfigError::TooFewAxes(extents.len()));
        }
        if extents.len() > MAX_DIMENSIONS {
            return Err(ConfigError::TooManyAxes {
                count: extents.len(),
                max: MAX_DIMENSIONS,
            });
        }
        if let Some((axis, &extent)) = extents.iter().enumerate().find(|(_, &e)| e == 0) {
            return Err(ConfigError::InvalidExtent { axis, extent });
        }

        let total_points = extents
            .iter()
            .try_fold(1usize, |acc, &e| acc.checked_mul(e))
            .filter(|&total| total <= MAX_LATTICE_POINTS)
            .ok_or(ConfigError::LatticeTooLarge {
                max: MAX_LATTICE_POINTS,
            })?;

        let mut strides = vec![1; extents.len()];
        for axis in (0..extents.len() - 1).rev() {
            strides[axis] = strides[axis + 1] * extents[axis + 1];
        }

        Ok(Self {
            extents: extents.to_vec(),
            strides,
            total_points,
        })
    }

    /// Returns the number of axes.
    #[inline]
    pub fn dimensions(&self) -> usize {
        self.extents.len()
    }

    /// Returns the per-axis extents.
    #[inline]
    pub fn extents(&self) -> &[usize] {
        &self.extents
    }

    /// Returns the extent of a single axis.
    #[inline]
    pub fn extent(&self, axis: usize) -> usize {
        self.extents[axis]
    }

    /// Returns the row-major stride of a single axis.
    #[inline]
    pub fn stride(&self, axis: usize) -> usize {
        self.strides[axis]
    }

    /// Returns the number of cells in the lattice.
    #[inline]
    pub fn total_points(&self) -> usize {
        self.total_points
    }

    /// Returns `true` if `coords` has the right arity and lies in bounds.
    pub fn contains(&self, coords: &[usize]) -> bool {
        coords.len() == self.extents.len()
            && coords.iter().zip(&self.extents).all(|(&c, &e)| c < e)
    }

    /// Maps in-bounds coordinates to their dense cell index.
    ///
    /// Callers must pass coordinates accepted by [`contains`](Self::contains).
    #[inline]
    pub fn index_of(&self, coords: &[usize]) -> usize {
        debug_assert!(self.contains(coords));
        coords.iter().zip(&self.strides).map(|(c, s)| c * s).sum()
    }

    /// Returns the cell index one unit step from `coords` (at `index`), or
    /// `None` if the step leaves the lattice.
    #[inline]
    pub fn neighbour_index(
        &self,
        coords: &[usize],
        index: usize,
        direction: Direction,
    ) -> Option<usize> {
        let axis = direction.axis();
        if axis >= self.extents.len() {
            return None;
        }
        let stride = self.strides[axis];
        if direction.is_positive() {
            (coords[axis] + 1 < self.extents[axis]).then(|| index + stride)
        } else {
            (coords[axis] > 0).then(|| index - stride)
        }
    }

    /// Maps a dense cell index back to its position.
    pub fn position_of(&self, index: usize) -> Position {
        debug_assert!(index < self.total_points);
        let coords = self
            .strides
            .iter()
            .zip(&self.extents)
            .map(|(&stride, &extent)| (index / stride) % extent)
            .collect();
        Position(coords)
    }
}

impl fmt::Display for LatticeShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for extent in &self.extents {
            if !first {
                write!(f, "x")?;
            }
            write!(f, "{}", extent)?;
            first = false;
        }
        Ok(())
    }
}

/// A point of the lattice.
///
/// Two positions are equal iff every coordinate matches.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Position(Vec<usize>);

impl Position {
    /// Creates a position from raw coordinates.
    #[inline]
    pub fn new(coords: Vec<usize>) -> Self {
        Self(coords)
    }

    /// The all-zero position of a `dimensions`-axis lattice.
    #[inline]
    pub fn origin(dimensions: usize) -> Self {
        Self(vec![0; dimensions])
    }

    /// Returns the coordinates.
    #[inline]
    pub fn coords(&self) -> &[usize] {
        &self.0
    }

    /// Returns the number of coordinates.
    #[inline]
    pub fn dimensions(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if `other` is exactly one unit step away.
    pub fn is_adjacent(&self, other: &Position) -> bool {
        if self.0.len() != other.0.len() {
            return false;
        }
        let mut differing = self.0.iter().zip(&other.0).filter(|(a, b)| a != b);
        match (differing.next(), differing.next()) {
            (Some((&a, &b)), None) => a.abs_diff(b) == 1,
            _ => false,
        }
    }
}

impl From<Vec<usize>> for Position {
    fn from(coords: Vec<usize>) -> Self {
        Self(coords)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, c) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", c)?;
        }
        write!(f, ")")
    }
}
