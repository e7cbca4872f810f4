//! Criterion benchmarks for saw_engine sampling.
//!
//! Benchmarks cover:
//! - Single walks on 2D and 3D lattices under each policy
//! - Full estimates with varying trial counts
//! - Sequential vs parallel sampling

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use saw_engine::lattice::LatticeShape;
use saw_engine::mc::{ParallelConfig, Sampler, SamplerConfig};
use saw_engine::rng::SawRng;
use saw_engine::walker::{LatticeWalker, RunPolicy};

/// Benchmark one walk from construction to weight.
fn bench_single_walk(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_walk");

    let policies = [
        RunPolicy::Unrestricted,
        RunPolicy::Bounded,
        RunPolicy::early_stop(),
    ];

    for extents in [vec![10, 10], vec![50, 50], vec![10, 10, 10]] {
        let shape = LatticeShape::new(&extents).unwrap();
        for policy in policies {
            group.bench_with_input(
                BenchmarkId::new(policy.name(), &shape),
                &shape,
                |b, shape| {
                    let mut rng = SawRng::from_seed(42);
                    b.iter(|| {
                        let mut walker = LatticeWalker::new(shape.clone());
                        black_box(walker.run(&policy, &mut rng).unwrap())
                    });
                },
            );
        }
    }

    group.finish();
}

/// Benchmark full estimates with varying trial counts.
fn bench_estimate(c: &mut Criterion) {
    let mut group = c.benchmark_group("estimate");
    group.sample_size(20); // Whole estimates are slow

    let shape = LatticeShape::new(&[10, 10]).unwrap();

    for n_trials in [1_000, 10_000, 100_000] {
        group.bench_with_input(
            BenchmarkId::new("unrestricted_10x10", n_trials),
            &n_trials,
            |b, &n| {
                let config = SamplerConfig::builder()
                    .n_trials(n)
                    .seed(42)
                    .build()
                    .unwrap();
                let sampler = Sampler::new(config, shape.clone()).unwrap();
                b.iter(|| black_box(sampler.estimate()));
            },
        );
    }

    group.finish();
}

/// Compare sequential and parallel sampling at a fixed trial count.
fn bench_parallel_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("parallel_scaling");
    group.sample_size(20);

    let shape = LatticeShape::new(&[20, 20]).unwrap();
    let modes = [
        ("sequential", ParallelConfig::sequential()),
        ("parallel", ParallelConfig::default()),
    ];

    for (label, parallel) in modes {
        group.bench_function(label, |b| {
            let config = SamplerConfig::builder()
                .n_trials(50_000)
                .policy(RunPolicy::Bounded)
                .seed(42)
                .parallel(parallel)
                .build()
                .unwrap();
            let sampler = Sampler::new(config, shape.clone()).unwrap();
            b.iter(|| black_box(sampler.estimate()));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_single_walk,
    bench_estimate,
    bench_parallel_scaling
);
criterion_main!(benches);
