//! Insert, query, and flush throughput benchmarks.

use bloomstack::hash::HashStrategy;
use bloomstack::{ScalingBloomFilter, SubFilter};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use tempfile::tempdir;

fn bench_add(c: &mut Criterion) {
    let mut group = c.benchmark_group("subfilter_add");

    for &capacity in &[10_000usize, 100_000] {
        group.throughput(Throughput::Elements(1));
        group.bench_with_input(
            BenchmarkId::from_parameter(capacity),
            &capacity,
            |b, &capacity| {
                // A sub-filter keeps absorbing adds past capacity, so the
                // measurement loop never hits a growth ceiling
                let mut filter =
                    SubFilter::new(capacity, 0.01, 0, HashStrategy::Double).unwrap();
                let mut id = 0u64;

                b.iter(|| {
                    filter.add(black_box(&id.to_le_bytes()), id);
                    id += 1;
                });
            },
        );
    }

    group.finish();
}

fn bench_check(c: &mut Criterion) {
    let mut group = c.benchmark_group("check");

    let dir = tempdir().unwrap();
    let mut filter =
        ScalingBloomFilter::create(100_000, 0.01, dir.path().join("bench.bloom")).unwrap();
    for i in 0u64..100_000 {
        filter.add(&i.to_le_bytes(), i).unwrap();
    }

    group.throughput(Throughput::Elements(1));
    group.bench_function("hit", |b| {
        let mut i = 0u64;
        b.iter(|| {
            let hit = filter.check(black_box(&(i % 100_000).to_le_bytes()));
            i += 1;
            hit
        });
    });
    group.bench_function("miss", |b| {
        let mut i = 200_000u64;
        b.iter(|| {
            let hit = filter.check(black_box(&i.to_le_bytes()));
            i += 1;
            hit
        });
    });

    group.finish();
}

fn bench_flush(c: &mut Criterion) {
    let dir = tempdir().unwrap();
    let mut filter =
        ScalingBloomFilter::create(100_000, 0.01, dir.path().join("bench.bloom")).unwrap();
    for i in 0u64..100_000 {
        filter.add(&i.to_le_bytes(), i).unwrap();
    }

    c.bench_function("flush/100k", |b| {
        b.iter(|| filter.flush().unwrap());
    });
}

criterion_group!(benches, bench_add, bench_check, bench_flush);
criterion_main!(benches);
