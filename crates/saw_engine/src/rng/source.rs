//! The uniform random capability consumed by the walker.
//!
//! Run policies never reach for a global generator: every draw goes through
//! a [`UniformSource`] handed in by the caller. Production code passes a
//! seeded [`SawRng`](super::SawRng); tests can pass a [`ReplaySource`] with
//! a scripted sequence.

use std::collections::VecDeque;

/// Source of uniform draws.
///
/// Three kinds of draw are needed:
///
/// - `gen_index(n)`: choosing one of `n >= 1` legal moves
/// - `gen_uniform()`: the early-stop coin in `[0, 1)`
/// - `gen_range(low, high)`: the bounded policy's target length
pub trait UniformSource {
    /// Draws an index uniformly from `[0, n)`. `n` must be at least 1.
    fn gen_index(&mut self, n: usize) -> usize;

    /// Draws a value uniformly from `[0, 1)`.
    fn gen_uniform(&mut self) -> f64;

    /// Draws an integer uniformly from `[low, high)`. Requires `low < high`.
    fn gen_range(&mut self, low: usize, high: usize) -> usize;
}

impl<S: UniformSource + ?Sized> UniformSource for &mut S {
    #[inline]
    fn gen_index(&mut self, n: usize) -> usize {
        (**self).gen_index(n)
    }

    #[inline]
    fn gen_uniform(&mut self) -> f64 {
        (**self).gen_uniform()
    }

    #[inline]
    fn gen_range(&mut self, low: usize, high: usize) -> usize {
        (**self).gen_range(low, high)
    }
}

/// Deterministic, scripted [`UniformSource`].
///
/// Each kind of draw has its own queue, replayed cyclically. Scripted values
/// are reduced into the requested range (`index % n`, `low + v % (high - low)`,
/// uniforms wrapped into `[0, 1)`), so any script is a valid source. An empty
/// queue yields the lowest admissible value.
///
/// # Examples
///
/// ```rust
/// use saw_engine::rng::{ReplaySource, UniformSource};
///
/// let mut source = ReplaySource::new()
///     .with_indices([1, 0])
///     .with_uniforms([0.5]);
///
/// assert_eq!(source.gen_index(2), 1);
/// assert_eq!(source.gen_index(2), 0);
/// assert_eq!(source.gen_index(2), 1); // cycles
/// assert_eq!(source.gen_uniform(), 0.5);
/// assert_eq!(source.gen_range(1, 9), 1); // empty queue
/// ```
#[derive(Clone, Debug, Default)]
pub struct ReplaySource {
    indices: VecDeque<usize>,
    uniforms: VecDeque<f64>,
    ranges: VecDeque<usize>,
}

impl ReplaySource {
    /// Creates a source with empty scripts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the scripted move-choice indices.
    pub fn with_indices(mut self, indices: impl IntoIterator<Item = usize>) -> Self {
        self.indices = indices.into_iter().collect();
        self
    }

    /// Sets the scripted `[0, 1)` draws.
    pub fn with_uniforms(mut self, uniforms: impl IntoIterator<Item = f64>) -> Self {
        self.uniforms = uniforms.into_iter().collect();
        self
    }

    /// Sets the scripted integer-range draws.
    pub fn with_ranges(mut self, ranges: impl IntoIterator<Item = usize>) -> Self {
        self.ranges = ranges.into_iter().collect();
        self
    }

    fn next_cyclic<T: Copy>(queue: &mut VecDeque<T>) -> Option<T> {
        let value = queue.pop_front()?;
        queue.push_back(value);
        Some(value)
    }
}

impl UniformSource for ReplaySource {
    fn gen_index(&mut self, n: usize) -> usize {
        debug_assert!(n >= 1);
        Self::next_cyclic(&mut self.indices).map_or(0, |i| i % n.max(1))
    }

    fn gen_uniform(&mut self) -> f64 {
        Self::next_cyclic(&mut self.uniforms).map_or(0.0, |u| u.rem_euclid(1.0))
    }

    fn gen_range(&mut self, low: usize, high: usize) -> usize {
        debug_assert!(low < high);
        let width = high.saturating_sub(low).max(1);
        Self::next_cyclic(&mut self.ranges).map_or(low, |v| low + v % width)
    }
}
