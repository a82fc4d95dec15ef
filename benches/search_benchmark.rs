//! Benchmarks for keyword search and PM2.5 partitioning
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use smogwatch::models::Record;
use smogwatch::repository::{partition_by_pm25, DEFAULT_HIGH_THRESHOLD};
use smogwatch::search::search;

const COUNTIES: [&str; 6] = ["Taipei", "New Taipei", "Taichung", "Tainan", "Kaohsiung", "Hualien"];

/// Generate `count` records cycling through counties and PM2.5 levels
fn generate_records(count: usize) -> Vec<Record> {
    (0..count)
        .map(|i| Record {
            site_id: i.to_string(),
            site_name: format!("Site {}", i),
            county: COUNTIES[i % COUNTIES.len()].to_string(),
            status: if i % 3 == 0 { "Good" } else { "Moderate" }.to_string(),
            pm25: if i % 17 == 0 {
                "ND".to_string()
            } else {
                (i % 40).to_string()
            },
            ..Default::default()
        })
        .collect()
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");

    for size in [100, 1000, 10000].iter() {
        let records = generate_records(*size);
        group.throughput(Throughput::Elements(*size as u64));

        group.bench_with_input(BenchmarkId::new("hit", size), &records, |b, records| {
            b.iter(|| search(black_box(records), black_box("kaohsiung")))
        });
        group.bench_with_input(BenchmarkId::new("miss", size), &records, |b, records| {
            b.iter(|| search(black_box(records), black_box("penghu")))
        });
    }

    group.finish();
}

fn bench_partition(c: &mut Criterion) {
    let mut group = c.benchmark_group("partition_by_pm25");

    for size in [100, 1000, 10000].iter() {
        let records = generate_records(*size);
        group.throughput(Throughput::Elements(*size as u64));

        group.bench_with_input(BenchmarkId::from_parameter(size), &records, |b, records| {
            b.iter(|| partition_by_pm25(black_box(records.clone()), DEFAULT_HIGH_THRESHOLD))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_search, bench_partition);
criterion_main!(benches);
