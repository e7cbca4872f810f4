//! Exact-count comparison tests for the walk estimator.
//!
//! Small lattices are enumerated exhaustively by depth-first search, which
//! gives the exact expectation of the weight under each run policy. The
//! Monte Carlo estimates must land within a few standard errors of it.
//!
//! # Test Categories
//!
//! 1. **Oracle sanity**: brute-force counts against hand-checked values
//! 2. **Convergence**: estimator vs oracle for every policy
//! 3. **Crate-root API**: `estimate` and `run_single` error ordering

use approx::assert_relative_eq;
use saw_engine::lattice::LatticeShape;
use saw_engine::mc::{ParallelConfig, Sampler, SamplerConfig};
use saw_engine::{estimate, run_single, ConfigError, RunPolicy, SawRng};

// ============================================================================
// Brute-force oracle
// ============================================================================

/// Walk counts by length: `(open, trapped)` for each number of steps.
struct WalkCensus {
    by_length: Vec<(u64, u64)>,
    total_points: usize,
}

impl WalkCensus {
    fn enumerate(extents: &[usize]) -> Self {
        let total_points: usize = extents.iter().product();
        let mut census = Self {
            by_length: vec![(0, 0); total_points],
            total_points,
        };
        let mut visited = vec![false; total_points];
        let mut coords = vec![0usize; extents.len()];
        visited[0] = true;
        census.visit(extents, &mut coords, &mut visited, 0);
        census
    }

    fn visit(&mut self, extents: &[usize], coords: &mut [usize], visited: &mut [bool], len: usize) {
        let mut extended = false;
        for axis in 0..extents.len() {
            for positive in [false, true] {
                let next = if positive {
                    coords[axis] + 1
                } else {
                    match coords[axis].checked_sub(1) {
                        Some(c) => c,
                        None => continue,
                    }
                };
                if next >= extents[axis] {
                    continue;
                }
                let saved = coords[axis];
                coords[axis] = next;
                let index = flat_index(extents, coords);
                if !visited[index] {
                    extended = true;
                    visited[index] = true;
                    self.visit(extents, coords, visited, len + 1);
                    visited[index] = false;
                }
                coords[axis] = saved;
            }
        }
        if extended {
            self.by_length[len].0 += 1;
        } else {
            self.by_length[len].1 += 1;
        }
    }

    /// Number of maximal walks; the unrestricted expectation.
    fn trapped(&self) -> f64 {
        self.by_length.iter().map(|&(_, t)| t as f64).sum()
    }

    /// All walks of any length, the empty walk included.
    fn all_walks(&self) -> u64 {
        self.by_length.iter().map(|&(o, t)| o + t).sum()
    }

    /// Expectation under a target length uniform on `[1, total_points)`.
    fn bounded(&self) -> f64 {
        if self.total_points <= 1 {
            return 1.0;
        }
        let targets = self.total_points - 1;
        let mut sum = 0.0;
        for target in 1..=targets {
            let (open, trapped) = self.by_length[target];
            let mut reachable = (open + trapped) as f64;
            reachable += self.by_length[..target]
                .iter()
                .map(|&(_, t)| t as f64)
                .sum::<f64>();
            sum += reachable;
        }
        sum / targets as f64
    }

    /// Expectation under a per-step stop probability `p`.
    fn early_stop(&self, p: f64) -> f64 {
        self.by_length
            .iter()
            .enumerate()
            .map(|(len, &(open, trapped))| {
                let survive = (1.0 - p).powi(len as i32);
                open as f64 * p * survive + trapped as f64 * survive
            })
            .sum()
    }
}

fn flat_index(extents: &[usize], coords: &[usize]) -> usize {
    let mut index = 0;
    let mut stride = 1;
    for axis in (0..extents.len()).rev() {
        index += coords[axis] * stride;
        stride *= extents[axis];
    }
    index
}

fn assert_converges(extents: &[usize], policy: RunPolicy, exact: f64, n_trials: usize) {
    let config = SamplerConfig::builder()
        .n_trials(n_trials)
        .policy(policy)
        .seed(42)
        .build()
        .unwrap();
    let sampler = Sampler::new(config, LatticeShape::new(extents).unwrap()).unwrap();
    let result = sampler.estimate();

    let tolerance = 5.0 * result.std_error + 1e-9;
    let error = (result.estimate - exact).abs();
    assert!(
        error <= tolerance,
        "{:?} {}: MC={:.4}, Exact={:.4}, Error={:.4}, Tolerance={:.4}",
        extents,
        policy,
        result.estimate,
        exact,
        error,
        tolerance
    );
}

// ============================================================================
// Oracle sanity
// ============================================================================

#[test]
fn test_oracle_two_by_two() {
    let census = WalkCensus::enumerate(&[2, 2]);
    assert_eq!(census.trapped(), 2.0);
    assert_eq!(census.all_walks(), 7);
    assert_relative_eq!(census.bounded(), 2.0);
    assert_relative_eq!(census.early_stop(0.1), 1.9, epsilon = 1e-12);
}

#[test]
fn test_oracle_three_by_three() {
    let census = WalkCensus::enumerate(&[3, 3]);
    assert_eq!(census.trapped(), 20.0);
    assert_eq!(census.all_walks(), 79);
    assert_relative_eq!(census.bounded(), 13.0, epsilon = 1e-12);
}

#[test]
fn test_oracle_other_shapes() {
    let rect = WalkCensus::enumerate(&[2, 3]);
    assert_eq!(rect.trapped(), 5.0);
    assert_eq!(rect.all_walks(), 18);
    assert_relative_eq!(rect.bounded(), 4.0, epsilon = 1e-12);

    let cube = WalkCensus::enumerate(&[2, 2, 2]);
    assert_eq!(cube.trapped(), 30.0);
    assert_eq!(cube.all_walks(), 112);
}

#[test]
fn test_oracle_zero_stop_probability_is_unrestricted() {
    let census = WalkCensus::enumerate(&[3, 3]);
    assert_relative_eq!(census.early_stop(0.0), census.trapped());
}

// ============================================================================
// Convergence
// ============================================================================

#[test]
fn test_two_by_two_all_policies() {
    let census = WalkCensus::enumerate(&[2, 2]);
    assert_converges(&[2, 2], RunPolicy::Unrestricted, census.trapped(), 1_000);
    assert_converges(&[2, 2], RunPolicy::Bounded, census.bounded(), 1_000);
    assert_converges(&[2, 2], RunPolicy::early_stop(), census.early_stop(0.1), 20_000);
}

#[test]
fn test_three_by_three_unrestricted_converges_to_twenty() {
    assert_converges(&[3, 3], RunPolicy::Unrestricted, 20.0, 1_000);
    assert_converges(&[3, 3], RunPolicy::Unrestricted, 20.0, 50_000);
}

#[test]
fn test_three_by_three_bounded_and_early_stop() {
    let census = WalkCensus::enumerate(&[3, 3]);
    assert_converges(&[3, 3], RunPolicy::Bounded, census.bounded(), 50_000);
    assert_converges(&[3, 3], RunPolicy::early_stop(), census.early_stop(0.1), 50_000);

    let p = 0.3;
    let policy = RunPolicy::early_stop_with(p).unwrap();
    assert_converges(&[3, 3], policy, census.early_stop(p), 50_000);
}

#[test]
fn test_rectangular_lattice() {
    let census = WalkCensus::enumerate(&[2, 3]);
    assert_converges(&[2, 3], RunPolicy::Unrestricted, census.trapped(), 20_000);
    assert_converges(&[3, 2], RunPolicy::Unrestricted, census.trapped(), 20_000);
    assert_converges(&[2, 3], RunPolicy::Bounded, census.bounded(), 20_000);
}

#[test]
fn test_three_dimensional_lattice() {
    let census = WalkCensus::enumerate(&[2, 2, 2]);
    assert_converges(&[2, 2, 2], RunPolicy::Unrestricted, census.trapped(), 50_000);
    assert_converges(&[2, 2, 2], RunPolicy::Bounded, census.bounded(), 50_000);
    assert_converges(&[2, 2, 2], RunPolicy::early_stop(), census.early_stop(0.1), 50_000);
}

#[test]
fn test_four_by_four_unrestricted() {
    let census = WalkCensus::enumerate(&[4, 4]);
    assert_eq!(census.trapped(), 548.0);
    assert_converges(&[4, 4], RunPolicy::Unrestricted, census.trapped(), 100_000);
}

#[test]
fn test_estimate_is_thread_count_independent() {
    let shape = LatticeShape::new(&[6, 6]).unwrap();
    let run = |parallel: ParallelConfig| {
        let config = SamplerConfig::builder()
            .n_trials(10_000)
            .policy(RunPolicy::Bounded)
            .seed(2024)
            .parallel(parallel)
            .build()
            .unwrap();
        Sampler::new(config, shape.clone()).unwrap().estimate()
    };

    let sequential = run(ParallelConfig::sequential());
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(3)
        .build()
        .unwrap();
    let parallel = pool.install(|| run(ParallelConfig::with_min_trials(1)));

    assert_eq!(sequential.estimate.to_bits(), parallel.estimate.to_bits());
    assert_eq!(sequential.std_error.to_bits(), parallel.std_error.to_bits());
}

// ============================================================================
// Crate-root API
// ============================================================================

#[test]
fn test_estimate_exact_on_two_by_two() {
    assert_eq!(estimate(100, &[2, 2], RunPolicy::Unrestricted, 1), Ok(2.0));
    assert_eq!(estimate(100, &[2, 2], RunPolicy::Bounded, 1), Ok(2.0));
}

#[test]
fn test_estimate_single_cell() {
    for policy in [RunPolicy::Unrestricted, RunPolicy::Bounded, RunPolicy::early_stop()] {
        assert_eq!(estimate(10, &[1, 1], policy, 0), Ok(1.0));
    }
}

#[test]
fn test_estimate_rejects_configuration_first() {
    // Trial count is checked before the lattice shape.
    assert_eq!(
        estimate(0, &[0, 0], RunPolicy::Unrestricted, 0),
        Err(ConfigError::InvalidTrialCount(0))
    );
    assert_eq!(
        estimate(0, &[3, 3], RunPolicy::Unrestricted, 0),
        Err(ConfigError::InvalidTrialCount(0))
    );
    assert_eq!(
        estimate(10, &[5], RunPolicy::Unrestricted, 0),
        Err(ConfigError::TooFewAxes(1))
    );
    assert!(matches!(
        estimate(10, &[3, 0], RunPolicy::Unrestricted, 0),
        Err(ConfigError::InvalidExtent { axis: 1, extent: 0 })
    ));
    assert_eq!(
        estimate(10, &[3, 3], RunPolicy::EarlyStop { stop_probability: 1.5 }, 0),
        Err(ConfigError::InvalidStopProbability(1.5))
    );
}

#[test]
fn test_estimate_is_deterministic() {
    let a = estimate(5_000, &[5, 4], RunPolicy::early_stop(), 99).unwrap();
    let b = estimate(5_000, &[5, 4], RunPolicy::early_stop(), 99).unwrap();
    assert_eq!(a.to_bits(), b.to_bits());
}

#[test]
fn test_run_single_path() {
    let mut rng = SawRng::from_seed(3);
    let (weight, path) = run_single(&[5, 5], RunPolicy::Unrestricted, &mut rng).unwrap();

    assert!(weight >= 1.0);
    assert!(path.len() >= 2);
    assert!(path[0].coords().iter().all(|&c| c == 0));
    for pair in path.windows(2) {
        assert!(pair[0].is_adjacent(&pair[1]));
    }
}

#[test]
fn test_run_single_errors() {
    let mut rng = SawRng::from_seed(3);
    assert_eq!(
        run_single(&[4, 4], RunPolicy::EarlyStop { stop_probability: -0.1 }, &mut rng),
        Err(ConfigError::InvalidStopProbability(-0.1))
    );
    assert_eq!(
        run_single(&[4], RunPolicy::Bounded, &mut rng),
        Err(ConfigError::TooFewAxes(1))
    );
}
