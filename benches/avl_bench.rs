// Benchmarks for the AVL tree engine
//
// - sequential and random insertion
// - deletion down to empty
// - search hits and misses
// - the cost of observing events compared with running silently

use std::collections::BTreeSet;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use arbor::narration::Narrator;
use arbor::{AvlTree, Event, RotationStats};

const SIZES: [usize; 3] = [100, 1_000, 10_000];

fn random_keys(count: usize, seed: u64) -> Vec<u32> {
    let mut rng = StdRng::seed_from_u64(seed);
    return (0..count).map(|_| rng.r#gen()).collect();
}

fn shuffled(count: usize, seed: u64) -> Vec<u32> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut keys: Vec<u32> = (0..count as u32).collect();
    keys.shuffle(&mut rng);
    return keys;
}

// =============================================================================
// Insertion
// =============================================================================

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");

    for size in SIZES {
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("sequential", size), &size, |b, &size| {
            b.iter(|| {
                let mut tree = AvlTree::new();
                for key in 0..size as u32 {
                    tree.insert(key);
                }
                black_box(tree.height())
            });
        });

        let keys = random_keys(size, 42);
        group.bench_with_input(BenchmarkId::new("random", size), &keys, |b, keys| {
            b.iter(|| {
                let mut tree = AvlTree::new();
                for &key in keys {
                    tree.insert(key);
                }
                black_box(tree.len())
            });
        });

        group.bench_with_input(BenchmarkId::new("btreeset_random", size), &keys, |b, keys| {
            b.iter(|| {
                let mut set = BTreeSet::new();
                for &key in keys {
                    set.insert(key);
                }
                black_box(set.len())
            });
        });
    }

    group.finish();
}

// =============================================================================
// Deletion
// =============================================================================

fn bench_delete(c: &mut Criterion) {
    let mut group = c.benchmark_group("delete");

    for size in SIZES {
        group.throughput(Throughput::Elements(size as u64));
        let tree: AvlTree<u32> = (0..size as u32).collect();
        let order = shuffled(size, 7);

        group.bench_with_input(BenchmarkId::new("random_order", size), &order, |b, order| {
            b.iter_batched(
                || tree.clone(),
                |mut tree| {
                    for key in order {
                        tree.delete(key);
                    }
                    black_box(tree.is_empty())
                },
                criterion::BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

// =============================================================================
// Search
// =============================================================================

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");

    for size in SIZES {
        let tree: AvlTree<u32> = (0..size as u32).map(|k| k * 2).collect();
        let mut rng = StdRng::seed_from_u64(size as u64);
        let probes: Vec<u32> = (0..1_000).map(|_| rng.gen_range(0..size as u32 * 2)).collect();
        group.throughput(Throughput::Elements(probes.len() as u64));

        group.bench_with_input(BenchmarkId::new("contains", size), &probes, |b, probes| {
            b.iter(|| probes.iter().filter(|p| tree.contains(p)).count());
        });

        group.bench_with_input(BenchmarkId::new("search_path", size), &probes, |b, probes| {
            b.iter(|| probes.iter().map(|p| tree.search(p).path().len()).sum::<usize>());
        });
    }

    group.finish();
}

// =============================================================================
// Observation overhead
// =============================================================================

fn bench_observers(c: &mut Criterion) {
    let mut group = c.benchmark_group("observers");
    let keys = random_keys(1_000, 3);
    group.throughput(Throughput::Elements(keys.len() as u64));

    group.bench_function("silent", |b| {
        b.iter(|| {
            let mut tree = AvlTree::new();
            for &key in &keys {
                tree.insert(key);
            }
            black_box(tree.len())
        });
    });

    group.bench_function("stats", |b| {
        b.iter(|| {
            let mut tree = AvlTree::new();
            let mut stats = RotationStats::new();
            for &key in &keys {
                tree.insert_observed(key, &mut stats);
            }
            black_box(stats.rotations())
        });
    });

    group.bench_function("event_vec", |b| {
        b.iter(|| {
            let mut tree = AvlTree::new();
            let mut events: Vec<Event<u32>> = Vec::new();
            for &key in &keys {
                tree.insert_observed(key, &mut events);
            }
            black_box(events.len())
        });
    });

    group.bench_function("narrator", |b| {
        b.iter(|| {
            let mut tree = AvlTree::new();
            let mut narrator = Narrator::default();
            for &key in &keys {
                tree.insert_observed(key, &mut narrator);
            }
            black_box(narrator.take_transcript().len())
        });
    });

    group.finish();
}

// =============================================================================
// Criterion Configuration
// =============================================================================

criterion_group!(benches, bench_insert, bench_delete, bench_search, bench_observers);

criterion_main!(benches);
