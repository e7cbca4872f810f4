//! Dense occupancy grid for a single walk.

use super::shape::LatticeShape;

/// One boolean per lattice cell, `true` once the walk has visited it.
///
/// Cells are addressed by the dense index of
/// [`LatticeShape::index_of`]. A grid belongs to exactly one walker and is
/// never cleared; a new walk allocates a new grid.
#[derive(Clone, Debug)]
pub struct OccupancyGrid {
    cells: Vec<bool>,
    occupied: usize,
}

impl OccupancyGrid {
    /// Allocates an all-unoccupied grid covering `shape`.
    pub fn new(shape: &LatticeShape) -> Self {
        Self {
            cells: vec![false; shape.total_points()],
            occupied: 0,
        }
    }

    /// Returns the number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns `true` if the grid has no cells.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Returns `true` if the cell has been visited.
    #[inline]
    pub fn is_occupied(&self, index: usize) -> bool {
        self.cells[index]
    }

    /// Marks a cell visited. Returns `false` if it already was.
    #[inline]
    pub fn occupy(&mut self, index: usize) -> bool {
        let was_free = !std::mem::replace(&mut self.cells[index], true);
        self.occupied += was_free as usize;
        was_free
    }

    /// Returns the number of visited cells.
    #[inline]
    pub fn occupied_count(&self) -> usize {
        self.occupied
    }
}
