//! Label assignment benchmarks.
//!
//! Compares sequential and parallel labelling of seeded synthetic weight
//! matrices across cell counts.
#![expect(
    missing_docs,
    reason = "Criterion macros generate items without doc comments"
)]
#![expect(
    clippy::shadow_reuse,
    reason = "Criterion bench_with_input closures rebind parameter names"
)]

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use ramify_benches::{
    error::BenchSetupError,
    params::MatrixBenchParams,
    source::{SyntheticConfig, SyntheticWeights},
};
use ramify_core::{ExecutionStrategy, RamifyBuilder};

/// Seed used for all synthetic data generation in this benchmark.
const SEED: u64 = 42;

/// Lineage count for every matrix.
const LINEAGES: usize = 4;

/// Cell counts to benchmark.
const CELL_COUNTS: &[usize] = &[1_000, 10_000, 100_000];

const STRATEGIES: &[(&str, ExecutionStrategy)] = &[
    ("sequential", ExecutionStrategy::Sequential),
    ("auto", ExecutionStrategy::Auto),
];

#[expect(
    clippy::panic_in_result_fn,
    reason = "Criterion measurement closures cannot propagate errors via Result"
)]
fn branch_labels_impl(c: &mut Criterion) -> Result<(), BenchSetupError> {
    let mut group = c.benchmark_group("branch_labels");
    group.sample_size(20);

    for &cells in CELL_COUNTS {
        let shape = MatrixBenchParams {
            cells,
            lineages: LINEAGES,
        };
        let fit = SyntheticWeights::generate(&SyntheticConfig { shape, seed: SEED })?.into_fit();

        for &(label, strategy) in STRATEGIES {
            let ramify = RamifyBuilder::new()
                .with_execution_strategy(strategy)
                .build()?;
            group.bench_with_input(BenchmarkId::new(label, shape), &fit, |b, fit| {
                b.iter(|| match ramify.branch_labels(fit) {
                    Ok(labels) => labels,
                    Err(err) => panic!("labelling failed: {err}"),
                });
            });
        }
    }

    group.finish();
    Ok(())
}

fn branch_labels(c: &mut Criterion) {
    if let Err(err) = branch_labels_impl(c) {
        panic!("branch_labels benchmark setup failed: {err}");
    }
}

criterion_group!(benches, branch_labels);
criterion_main!(benches);
