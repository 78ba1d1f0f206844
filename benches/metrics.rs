//! Metric decoding and table sorting benchmarks
//!
//! Both run on every dashboard refresh for every trial, so they are measured
//! over realistic payload shapes and table sizes.
//!
//! Run with: `cargo bench`

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::collections::BTreeMap;
use std::hint::black_box;
use trialboard::metrics::{MetricRecord, MetricValue, final_result, parse_metrics};
use trialboard::table::copy_and_sort;

fn double_encode(inner: &str) -> String {
    serde_json::to_string(inner).expect("string encodes")
}

/// Benchmark the two-pass decode for each decoder path
fn bench_parse_metrics(c: &mut Criterion) {
    let test_cases = vec![
        ("scalar", double_encode("0.9314")),
        (
            "object",
            double_encode(r#"{"default": 0.93, "precision": 0.91, "recall": 0.88}"#),
        ),
        (
            "object_with_nan",
            double_encode(r#"{"default": 0.93, "loss": NaN}"#),
        ),
    ];

    let mut group = c.benchmark_group("parse_metrics");
    for (name, data) in &test_cases {
        group.bench_with_input(BenchmarkId::from_parameter(name), data, |b, data| {
            b.iter(|| parse_metrics(black_box(data)));
        });
    }
    group.finish();
}

/// Benchmark extracting the plotted value from a trial's metric history
fn bench_final_result(c: &mut Criterion) {
    let records: Vec<MetricRecord> = (0..200)
        .map(|i| MetricRecord::new(double_encode(&format!("{}", f64::from(i) / 200.0))))
        .collect();

    c.bench_function("final_result_200_records", |b| {
        b.iter(|| final_result(black_box(&records)));
    });
}

/// Benchmark sorting trial tables of increasing size, with some unorderable cells
fn bench_copy_and_sort(c: &mut Criterion) {
    let mut group = c.benchmark_group("copy_and_sort");

    for size in [100usize, 1_000, 10_000] {
        let rows: Vec<BTreeMap<String, MetricValue>> = (0..size)
            .map(|i| {
                let value = if i % 17 == 0 {
                    MetricValue::Number(f64::NAN)
                } else {
                    MetricValue::Number(((i * 7919) % 1000) as f64 / 1000.0)
                };
                BTreeMap::from([("latestAccuracy".to_string(), value)])
            })
            .collect();

        group.bench_with_input(BenchmarkId::from_parameter(size), &rows, |b, rows| {
            b.iter(|| copy_and_sort(black_box(rows), "latestAccuracy", true));
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_parse_metrics,
    bench_final_result,
    bench_copy_and_sort
);
criterion_main!(benches);
