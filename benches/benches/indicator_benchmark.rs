//! Indicator engine cost per enriched record.
//!
//! Run with: `cargo bench --package quarry-bench --bench indicator_benchmark`

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use quarry_bench::trending_bars;
use quarry_lib::{macd, snapshot};
use std::hint::black_box;

fn indicator_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("indicators");

    for len in [35usize, 80, 250] {
        let bars = trending_bars(len);
        group.bench_with_input(BenchmarkId::new("snapshot", len), &bars, |b, bars| {
            b.iter(|| black_box(snapshot(black_box(bars))));
        });
        group.bench_with_input(BenchmarkId::new("macd", len), &bars, |b, bars| {
            b.iter(|| black_box(macd(black_box(bars))));
        });
    }

    group.finish();
}

criterion_group!(benches, indicator_benchmark);
criterion_main!(benches);
