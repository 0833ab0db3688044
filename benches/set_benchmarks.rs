use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use rbtree_set::RBTreeSet;
use std::collections::BTreeSet;

const N: usize = 10_000;

// ─── Key patterns ────────────────────────────────────────────────────────────

fn ordered_keys(n: usize) -> Vec<i64> {
    (0..n as i64).collect()
}

fn reverse_ordered_keys(n: usize) -> Vec<i64> {
    (0..n as i64).rev().collect()
}

fn random_keys(n: usize) -> Vec<i64> {
    // Deterministic LCG so runs are comparable.
    let mut x: u64 = 0x2545_f491;
    (0..n)
        .map(|_| {
            x = x.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1_442_695_040_888_963_407);
            (x >> 33) as i64
        })
        .collect()
}

fn patterns() -> [(&'static str, Vec<i64>); 3] {
    [("ordered", ordered_keys(N)), ("reverse", reverse_ordered_keys(N)), ("random", random_keys(N))]
}

// ─── Insert ──────────────────────────────────────────────────────────────────

fn bench_insert(c: &mut Criterion) {
    for (pattern, keys) in patterns() {
        let mut group = c.benchmark_group(format!("insert_{pattern}"));

        group.bench_function(BenchmarkId::new("RBTreeSet", N), |b| {
            b.iter(|| {
                let mut set = RBTreeSet::new();
                for &k in &keys {
                    set.insert(k);
                }
                set
            });
        });

        group.bench_function(BenchmarkId::new("BTreeSet", N), |b| {
            b.iter(|| {
                let mut set = BTreeSet::new();
                for &k in &keys {
                    set.insert(k);
                }
                set
            });
        });

        group.finish();
    }
}

// ─── Find ────────────────────────────────────────────────────────────────────

fn bench_find(c: &mut Criterion) {
    let stored = random_keys(N);
    let rb_set: RBTreeSet<i64> = stored.iter().copied().collect();
    let bt_set: BTreeSet<i64> = stored.iter().copied().collect();

    for (pattern, probes) in patterns() {
        let mut group = c.benchmark_group(format!("find_{pattern}"));

        group.bench_function(BenchmarkId::new("RBTreeSet", N), |b| {
            b.iter(|| probes.iter().filter(|&k| !rb_set.find(k).is_end()).count());
        });

        group.bench_function(BenchmarkId::new("BTreeSet", N), |b| {
            b.iter(|| probes.iter().filter(|&k| bt_set.contains(k)).count());
        });

        group.finish();
    }
}

// ─── Remove ──────────────────────────────────────────────────────────────────

fn bench_remove(c: &mut Criterion) {
    let stored = ordered_keys(N);

    for (pattern, victims) in patterns() {
        let mut group = c.benchmark_group(format!("remove_{pattern}"));

        group.bench_function(BenchmarkId::new("RBTreeSet", N), |b| {
            b.iter_batched(
                || stored.iter().copied().collect::<RBTreeSet<i64>>(),
                |mut set| {
                    for k in &victims {
                        set.remove(k);
                    }
                    set
                },
                BatchSize::SmallInput,
            );
        });

        group.bench_function(BenchmarkId::new("BTreeSet", N), |b| {
            b.iter_batched(
                || stored.iter().copied().collect::<BTreeSet<i64>>(),
                |mut set| {
                    for k in &victims {
                        set.remove(k);
                    }
                    set
                },
                BatchSize::SmallInput,
            );
        });

        group.finish();
    }
}

// ─── Traversal ───────────────────────────────────────────────────────────────

fn bench_traverse(c: &mut Criterion) {
    let stored = random_keys(N);
    let rb_set: RBTreeSet<i64> = stored.iter().copied().collect();
    let bt_set: BTreeSet<i64> = stored.iter().copied().collect();

    let mut group = c.benchmark_group("traverse");

    group.bench_function(BenchmarkId::new("RBTreeSet::iter", N), |b| {
        b.iter(|| rb_set.iter().copied().sum::<i64>());
    });

    group.bench_function(BenchmarkId::new("RBTreeSet::cursor", N), |b| {
        b.iter(|| {
            let mut sum = 0i64;
            let mut cursor = rb_set.begin();
            while let Some(&k) = cursor.get() {
                sum += k;
                cursor.move_next();
            }
            sum
        });
    });

    group.bench_function(BenchmarkId::new("BTreeSet::iter", N), |b| {
        b.iter(|| bt_set.iter().copied().sum::<i64>());
    });

    group.finish();
}

criterion_group!(set_benches, bench_insert, bench_find, bench_remove, bench_traverse);

criterion_main!(set_benches);
