//! Criterion benchmarks for the exact solver.
//!
//! Measures solve time as the job count grows for a small fixed fleet, with
//! and without the route cache.
//!
//! Run benchmarks with:
//! ```bash
//! cargo bench --package caravan-solver-exact
//! ```

// Criterion macros generate code that triggers missing_docs warnings.
#![allow(missing_docs, reason = "Criterion macros generate undocumented code")]

use std::time::Duration;

use caravan_core::Solver;
use caravan_solver_exact::{ExactSolver, ExactSolverConfig};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};


use bench_support::{BENCHMARK_SEED, generate_instance};

/// Job counts to benchmark on a three-vehicle fleet.
const JOB_COUNTS: &[usize] = &[4, 6, 8];

/// Vehicles in every benchmark instance.
const FLEET_SIZE: usize = 3;

fn bench_solve_times(c: &mut Criterion) {
    let mut group = c.benchmark_group("exact_solve_time");
    group.sample_size(20);
    group.measurement_time(Duration::from_secs(10));

    for &jobs in JOB_COUNTS {
        let request = generate_instance(FLEET_SIZE, jobs, BENCHMARK_SEED);
        group.throughput(Throughput::Elements(u64::try_from(jobs).unwrap_or(u64::MAX)));

        for (label, cache_routes) in [("cached", true), ("uncached", false)] {
            let solver = ExactSolver::with_config(ExactSolverConfig { cache_routes });
            group.bench_with_input(BenchmarkId::new(label, jobs), &jobs, |b, _| {
                b.iter(|| {
                    #[expect(
                        clippy::let_underscore_must_use,
                        reason = "Benchmarking solve performance, result is intentionally discarded"
                    )]
                    let _ = solver.solve(&request);
                });
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_solve_times);
criterion_main!(benches);
