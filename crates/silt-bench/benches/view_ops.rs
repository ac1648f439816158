//! Criterion micro-benchmarks for view access paths.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use silt_bench::web_profile;
use silt_net::Access;

/// Benchmark: positional reads through a nodes view (lock + bounds check
/// + clone per call).
fn bench_nodes_view_get(c: &mut Criterion) {
    let net = web_profile(10_000);
    let view = net
        .nodes_view::<f64>("nodes", "value", Access::Read)
        .unwrap();
    c.bench_function("nodes_view_get", |b| {
        let mut pos = 1usize;
        b.iter(|| {
            black_box(view.get(pos).unwrap());
            pos = pos % 10_000 + 1;
        });
    });
}

/// Benchmark: materializing a 5K-member sparse subclass over a 10K-node
/// parent space.
fn bench_expanded_materialize(c: &mut Criterion) {
    let net = web_profile(10_000);
    let view = net
        .expanded_view::<f64>("nodes", "odd", "weight", Access::Read)
        .unwrap();
    c.bench_function("expanded_materialize_10k", |b| {
        b.iter(|| {
            let dense = view.materialize();
            black_box(dense.len());
        });
    });
}

/// Benchmark: membership translation through the restriction on the
/// expanded-view read path.
fn bench_expanded_get(c: &mut Criterion) {
    let net = web_profile(10_000);
    let view = net
        .expanded_view::<f64>("nodes", "odd", "weight", Access::Read)
        .unwrap();
    c.bench_function("expanded_get_member", |b| {
        let mut pos = 2usize;
        b.iter(|| {
            black_box(view.get(pos).unwrap());
            pos = if pos + 2 > 10_000 { 2 } else { pos + 2 };
        });
    });
}

criterion_group!(
    benches,
    bench_nodes_view_get,
    bench_expanded_materialize,
    bench_expanded_get
);
criterion_main!(benches);
