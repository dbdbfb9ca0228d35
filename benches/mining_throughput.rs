/// PrefixSpan mining throughput benchmarks
///
/// Measures a full mining run over synthetic clickstream-like databases,
/// sequential vs. parallel, at a few database sizes.
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use seqmine::config::MiningConfig;
use seqmine::database::{SequenceDatabase, SequenceInput};
use seqmine::mining::{find_frequent_items, mine};
use std::time::Duration;

/// Deterministic pseudo-random database from a 64-bit linear congruential generator
fn synthetic_database(sequences: usize, alphabet: usize, max_len: usize) -> SequenceDatabase {
    let mut state: u64 = 0x9E37_79B9_7F4A_7C15;
    let mut next = move || {
        state = state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        (state >> 33) as usize
    };

    let input: Vec<SequenceInput> = (0..sequences)
        .map(|i| {
            let len = 1 + next() % max_len;
            let items: Vec<String> = (0..len).map(|_| format!("item{}", next() % alphabet)).collect();
            SequenceInput::new(format!("s{}", i), items)
        })
        .collect();

    SequenceDatabase::build(input).expect("synthetic input is valid")
}

fn bench_frequent_items(c: &mut Criterion) {
    let mut group = c.benchmark_group("frequent_items");

    for size in [1_000usize, 10_000] {
        let db = synthetic_database(size, 50, 12);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &db, |b, db| {
            b.iter(|| black_box(find_frequent_items(db, 0.05)));
        });
    }

    group.finish();
}

fn bench_mining(c: &mut Criterion) {
    let mut group = c.benchmark_group("prefixspan");
    group.measurement_time(Duration::from_secs(10));

    for size in [500usize, 5_000] {
        let db = synthetic_database(size, 20, 10);
        group.throughput(Throughput::Elements(size as u64));

        for threads in [1usize, 4] {
            let config = MiningConfig::new(0.05, 4).with_threads(threads);
            group.bench_with_input(
                BenchmarkId::new(format!("threads_{}", threads), size),
                &db,
                |b, db| {
                    b.iter(|| black_box(mine(db, config.clone()).expect("valid config")));
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_frequent_items, bench_mining);
criterion_main!(benches);
