//! List page decoding throughput for both `diff` layouts.
//!
//! Run with: `cargo bench --package quarry-bench --bench decode_benchmark`

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use quarry_bench::{DiffLayout, list_page};
use quarry_lib::{QuoteRecord, decode_page};
use std::hint::black_box;

fn decode_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_page");

    for rows in [100usize, 500] {
        for (name, layout) in [("array", DiffLayout::Array), ("object", DiffLayout::Object)] {
            let body = list_page(rows, layout);
            group.throughput(Throughput::Bytes(body.len() as u64));
            group.bench_with_input(BenchmarkId::new(name, rows), &body, |b, body| {
                b.iter(|| {
                    let mut out: Vec<QuoteRecord> = Vec::with_capacity(rows);
                    let summary = decode_page(black_box(body.as_slice()), &mut out)
                        .expect("fixture decodes");
                    black_box((summary, out))
                });
            });
        }
    }

    group.finish();
}

criterion_group!(benches, decode_benchmark);
criterion_main!(benches);
