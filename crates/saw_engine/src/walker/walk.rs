//! The occupancy-tracked lattice walker.

use std::fmt;

use tracing::trace;

use super::outcome::WalkOutcome;
use super::policy::RunPolicy;
use crate::error::{ConfigError, WalkError};
use crate::lattice::{Direction, LatticeShape, MoveSet, OccupancyGrid, Position};
use crate::rng::UniformSource;

/// One self-avoiding walk in progress on a bounded lattice.
///
/// The walk starts at the origin, which is occupied from construction. Each
/// step appends the number of legal moves that were available to
/// [`choice_counts`](Self::choice_counts), so after `n` steps the path holds
/// `n + 1` positions and the choice counts `n` entries.
///
/// A walker is built for one walk: run one policy on it, read the weight and
/// path, drop it.
///
/// # Examples
///
/// ```rust
/// use saw_engine::lattice::LatticeShape;
/// use saw_engine::rng::SawRng;
/// use saw_engine::walker::LatticeWalker;
///
/// let shape = LatticeShape::new(&[10, 10]).unwrap();
/// let mut walker = LatticeWalker::new(shape);
/// let mut rng = SawRng::from_seed(42);
///
/// let weight = walker.run_unrestricted(&mut rng);
/// assert!(weight >= 1.0);
/// assert!(walker.is_trapped());
/// assert_eq!(walker.path().len(), walker.steps() + 1);
/// ```
#[derive(Clone, Debug)]
pub struct LatticeWalker {
    shape: LatticeShape,
    grid: OccupancyGrid,
    /// Coordinates of the walk head.
    current: Vec<usize>,
    /// Dense cell index of the walk head.
    current_index: usize,
    /// Visited cell indices in visitation order, origin first.
    path: Vec<usize>,
    /// Legal-move count at each step.
    choice_counts: Vec<u32>,
    /// Target length drawn by the bounded policy.
    target_length: Option<usize>,
}

impl LatticeWalker {
    /// Creates a walker at the origin of `shape`.
    pub fn new(shape: LatticeShape) -> Self {
        let mut grid = OccupancyGrid::new(&shape);
        let origin = 0;
        grid.occupy(origin);
        Self {
            current: vec![0; shape.dimensions()],
            current_index: origin,
            path: vec![origin],
            choice_counts: Vec::new(),
            target_length: None,
            grid,
            shape,
        }
    }

    /// Validates `extents` and creates a walker at the origin.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the extents do not form a valid lattice.
    pub fn from_extents(extents: &[usize]) -> Result<Self, ConfigError> {
        Ok(Self::new(LatticeShape::new(extents)?))
    }

    /// Returns the lattice shape.
    #[inline]
    pub fn shape(&self) -> &LatticeShape {
        &self.shape
    }

    /// Returns the current head position.
    pub fn current(&self) -> Position {
        Position::new(self.current.clone())
    }

    /// Returns the number of steps taken.
    #[inline]
    pub fn steps(&self) -> usize {
        self.choice_counts.len()
    }

    /// Returns the number of visited nodes (steps + 1).
    #[inline]
    pub fn len(&self) -> usize {
        self.path.len()
    }

    /// Always `false`: the origin is visited from construction.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// Returns the visited positions in order, origin first.
    pub fn path(&self) -> Vec<Position> {
        self.path.iter().map(|&i| self.shape.position_of(i)).collect()
    }

    /// Returns the visited dense cell indices in order, origin first.
    #[inline]
    pub fn path_indices(&self) -> &[usize] {
        &self.path
    }

    /// Returns the legal-move count recorded at each step.
    #[inline]
    pub fn choice_counts(&self) -> &[u32] {
        &self.choice_counts
    }

    /// Returns the target length drawn by [`run_bounded`](Self::run_bounded).
    #[inline]
    pub fn target_length(&self) -> Option<usize> {
        self.target_length
    }

    /// Returns `true` if no legal move exists from the head.
    pub fn is_trapped(&self) -> bool {
        self.enumerate_moves().is_none()
    }

    /// Returns the occupancy flag of the cell at `coords`.
    ///
    /// Out-of-bounds coordinates report `false`.
    pub fn is_occupied(&self, coords: &[usize]) -> bool {
        self.shape.contains(coords) && self.grid.is_occupied(self.shape.index_of(coords))
    }

    /// Collects the legal moves from the head.
    ///
    /// A direction is legal iff its target is inside the lattice and not yet
    /// visited. Returns `None` when the walk is trapped.
    pub fn enumerate_moves(&self) -> Option<MoveSet> {
        let mask = Direction::all(self.shape.dimensions())
            .filter(|&dir| self.free_neighbour(dir).is_some())
            .fold(0u64, |mask, dir| mask | (1u64 << dir.index()));
        MoveSet::from_mask(mask)
    }

    /// Moves the head one unit step in `direction`.
    ///
    /// Records the number of legal moves at the head before the step, so a
    /// walk driven by hand carries the weight a random run would give it.
    ///
    /// # Errors
    ///
    /// - [`WalkError::InvalidDirection`] if `direction` is not one of the
    ///   `2 * d` directions of this lattice
    /// - [`WalkError::IllegalMove`] if the target is outside the lattice or
    ///   already visited
    pub fn apply_move(&mut self, direction: Direction) -> Result<Position, WalkError> {
        let dimensions = self.shape.dimensions();
        if direction.axis() >= dimensions {
            return Err(WalkError::InvalidDirection {
                index: direction.index(),
                dimensions,
            });
        }
        let illegal = WalkError::IllegalMove {
            direction: direction.index(),
        };
        let target = self.free_neighbour(direction).ok_or(illegal.clone())?;
        let count = self.enumerate_moves().ok_or(illegal)?.len();
        self.step_to(direction, target, count);
        Ok(self.current())
    }

    /// Product of all choice counts; 1 for a walk of length zero.
    ///
    /// Accumulated in `f64`: exact while the product stays below 2^53 and
    /// `+inf` once it exceeds `f64::MAX`. Use
    /// [`log_weight`](Self::log_weight) for very long walks.
    pub fn weight(&self) -> f64 {
        self.choice_counts.iter().map(|&c| c as f64).product()
    }

    /// Natural logarithm of [`weight`](Self::weight); always finite.
    pub fn log_weight(&self) -> f64 {
        self.choice_counts.iter().map(|&c| (c as f64).ln()).sum()
    }

    /// Runs `policy` to completion and returns the weight.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the policy parameters are invalid; no step is
    /// taken in that case.
    pub fn run<R: UniformSource + ?Sized>(
        &mut self,
        policy: &RunPolicy,
        rng: &mut R,
    ) -> Result<f64, ConfigError> {
        policy.validate()?;
        Ok(match *policy {
            RunPolicy::Unrestricted => self.run_unrestricted(rng),
            RunPolicy::Bounded => self.run_bounded(rng),
            RunPolicy::EarlyStop { stop_probability } => self.run_early_stop(stop_probability, rng),
        })
    }

    /// Walks until trapped and returns the weight.
    pub fn run_unrestricted<R: UniformSource + ?Sized>(&mut self, rng: &mut R) -> f64 {
        while self.advance(rng) {}
        self.finish("unrestricted")
    }

    /// Draws a target length from `[1, total_points)`, then walks until the
    /// target is reached or the walk is trapped. Returns the weight.
    ///
    /// The largest target, `total_points - 1` steps, visits every cell. On a
    /// single-cell lattice the range is empty; the target is then 1 and no
    /// draw is made.
    pub fn run_bounded<R: UniformSource + ?Sized>(&mut self, rng: &mut R) -> f64 {
        let total = self.shape.total_points();
        let target = if total <= 1 {
            1
        } else {
            rng.gen_range(1, total)
        };
        self.target_length = Some(target);

        while self.steps() < target && self.advance(rng) {}
        self.finish("bounded")
    }

    /// Before each step draws `u` from `[0, 1)`; stops when `u` falls below
    /// `stop_probability` or the walk is trapped. Returns the weight.
    ///
    /// The draw happens before the trap check, so every loop iteration
    /// consumes exactly one uniform.
    pub fn run_early_stop<R: UniformSource + ?Sized>(
        &mut self,
        stop_probability: f64,
        rng: &mut R,
    ) -> f64 {
        loop {
            let u = rng.gen_uniform();
            let Some(moves) = self.enumerate_moves() else {
                break;
            };
            if u < stop_probability || !self.take_random(moves, rng) {
                break;
            }
        }
        self.finish("early-stop")
    }

    /// Consumes the walker into its outcome.
    pub fn into_outcome(self) -> WalkOutcome {
        WalkOutcome {
            weight: self.weight(),
            log_weight: self.log_weight(),
            steps: self.steps(),
            trapped: self.is_trapped(),
            target_length: self.target_length,
            path: self.path(),
            choice_counts: self.choice_counts,
        }
    }

    /// Takes one uniformly chosen legal step. Returns `false` if trapped.
    fn advance<R: UniformSource + ?Sized>(&mut self, rng: &mut R) -> bool {
        match self.enumerate_moves() {
            Some(moves) => self.take_random(moves, rng),
            None => false,
        }
    }

    fn take_random<R: UniformSource + ?Sized>(&mut self, moves: MoveSet, rng: &mut R) -> bool {
        let count = moves.len();
        let direction = moves.select(rng.gen_index(count));
        match self.free_neighbour(direction) {
            Some(target) => {
                self.step_to(direction, target, count);
                true
            }
            None => false,
        }
    }

    /// Target cell index of `direction` if it is in bounds and unvisited.
    #[inline]
    fn free_neighbour(&self, direction: Direction) -> Option<usize> {
        self.shape
            .neighbour_index(&self.current, self.current_index, direction)
            .filter(|&target| !self.grid.is_occupied(target))
    }

    fn step_to(&mut self, direction: Direction, target: usize, choices: usize) {
        self.choice_counts.push(choices as u32);
        let axis = direction.axis();
        if direction.is_positive() {
            self.current[axis] += 1;
        } else {
            self.current[axis] -= 1;
        }
        self.current_index = target;
        self.grid.occupy(target);
        self.path.push(target);
    }

    fn finish(&self, policy: &'static str) -> f64 {
        let weight = self.weight();
        trace!(
            policy,
            steps = self.steps(),
            weight,
            target = self.target_length,
            "walk finished"
        );
        weight
    }
}

impl PartialEq for LatticeWalker {
    /// Walks are equal when they visit the same cells in the same order.
    fn eq(&self, other: &Self) -> bool {
        self.shape == other.shape && self.path == other.path
    }
}

impl Eq for LatticeWalker {}

impl fmt::Display for LatticeWalker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Self-avoiding walk of length {}", self.steps())
    }
}
