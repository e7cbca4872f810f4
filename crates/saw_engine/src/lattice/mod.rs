//! Lattice geometry: shapes, positions, directions and occupancy.
//!
//! # Architecture
//!
//! ```text
//! LatticeShape  (extents, row-major strides, bounds checks)
//! ├── Position      (coordinate vector)
//! ├── Direction     (±1 step per axis, fixed enumeration order)
//! ├── MoveSet       (non-empty set of legal directions)
//! └── OccupancyGrid (one visited flag per cell)
//! ```
//!
//! Directions are generated from the axis count rather than listed per
//! dimensionality, so the same code serves 2D, 3D and higher lattices.

mod direction;
mod occupancy;
mod shape;

pub use direction::{Direction, MoveSet};
pub use occupancy::OccupancyGrid;
pub use shape::{LatticeShape, Position, MAX_DIMENSIONS, MAX_LATTICE_POINTS};
