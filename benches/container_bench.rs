//! Benchmarks for the copy-on-write container operations.
//!
//! Every operation allocates a fresh container, so these measure the cost
//! of building results at a few representative sizes.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use tablekit::{Dictionary, List, Set, Value, dictionary, list, set};

fn numbers(size: i64) -> List {
    (0..size).collect()
}

fn numbered_dictionary(size: i64) -> Dictionary {
    (0..size).map(|index| (index, index * 2)).collect()
}

fn nested_dictionary(depth: usize, width: i64) -> Dictionary {
    if depth == 0 {
        return numbered_dictionary(width);
    }
    (0..width)
        .map(|index| (Value::from(index), Value::from(nested_dictionary(depth - 1, width))))
        .collect()
}

// =============================================================================
// merge Benchmark
// =============================================================================

fn benchmark_merge(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("merge");

    for size in [100, 1_000, 10_000] {
        let left = numbered_dictionary(size);
        let right = numbered_dictionary(size / 2);

        group.bench_with_input(BenchmarkId::new("merge", size), &size, |bencher, _| {
            bencher.iter(|| black_box(dictionary::merge([black_box(&left), black_box(&right)])));
        });
    }

    for depth in [1, 2, 3] {
        let left = nested_dictionary(depth, 8);
        let right = nested_dictionary(depth, 4);

        group.bench_with_input(BenchmarkId::new("merge_deep", depth), &depth, |bencher, _| {
            bencher
                .iter(|| black_box(dictionary::merge_deep([black_box(&left), black_box(&right)])));
        });
    }

    group.finish();
}

// =============================================================================
// copy Benchmark
// =============================================================================

fn benchmark_copy(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("copy");

    for depth in [1, 2, 3] {
        let nested = nested_dictionary(depth, 8);

        group.bench_with_input(BenchmarkId::new("copy", depth), &depth, |bencher, _| {
            bencher.iter(|| black_box(dictionary::copy(black_box(&nested))));
        });

        group.bench_with_input(BenchmarkId::new("copy_deep", depth), &depth, |bencher, _| {
            bencher.iter(|| black_box(dictionary::copy_deep(black_box(&nested))));
        });

        group.bench_with_input(BenchmarkId::new("equals_deep", depth), &depth, |bencher, _| {
            let copied = dictionary::copy_deep(&nested);
            bencher.iter(|| black_box(dictionary::equals_deep([black_box(&nested), &copied])));
        });
    }

    group.finish();
}

// =============================================================================
// list Benchmark
// =============================================================================

fn benchmark_list(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("list");

    for size in [100, 1_000, 10_000] {
        let list = numbers(size);
        let reversed = list::reverse(&list);

        group.bench_with_input(BenchmarkId::new("insert", size), &size, |bencher, _| {
            bencher.iter(|| black_box(list::insert(black_box(&list), 2, ["foo", "bar"])));
        });

        group.bench_with_input(BenchmarkId::new("sort", size), &size, |bencher, _| {
            bencher.iter(|| black_box(list::sort(black_box(&reversed))));
        });

        group.bench_with_input(BenchmarkId::new("zip_all", size), &size, |bencher, _| {
            bencher.iter(|| black_box(list::zip_all([black_box(&list), &reversed, &list![1]])));
        });

        group.bench_with_input(BenchmarkId::new("reduce", size), &size, |bencher, _| {
            bencher.iter(|| {
                black_box(list::reduce(
                    black_box(&list),
                    |total, value, _| {
                        Value::from(
                            total.as_int().unwrap_or_default() + value.as_int().unwrap_or_default(),
                        )
                    },
                    None,
                ))
            });
        });
    }

    group.finish();
}

// =============================================================================
// set Benchmark
// =============================================================================

fn benchmark_set(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("set");

    for size in [100, 1_000, 10_000] {
        let left: Set = (0..size).collect();
        let right: Set = (size / 2..size + size / 2).collect();

        group.bench_with_input(BenchmarkId::new("union", size), &size, |bencher, _| {
            bencher.iter(|| black_box(set::union([black_box(&left), black_box(&right)])));
        });

        group.bench_with_input(BenchmarkId::new("intersection", size), &size, |bencher, _| {
            bencher.iter(|| black_box(set::intersection([black_box(&left), black_box(&right)])));
        });

        group.bench_with_input(BenchmarkId::new("add", size), &size, |bencher, _| {
            bencher.iter(|| black_box(set::add(black_box(&left), set![-1, -2].iter().cloned())));
        });
    }

    group.finish();
}

// =============================================================================
// Criterion Group and Main
// =============================================================================

criterion_group!(
    benches,
    benchmark_merge,
    benchmark_copy,
    benchmark_list,
    benchmark_set
);

criterion_main!(benches);
