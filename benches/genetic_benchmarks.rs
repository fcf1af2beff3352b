//! Genetic Search Benchmarks
//!
//! Run with: cargo bench --bench genetic_benchmarks
//!
//! Graphs are square lattices, so sizes scale as `n * n` vertices.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use longpath::prelude::*;

fn lattice(n: usize) -> Graph {
    let mut edges = Vec::new();
    for r in 0..n {
        for c in 0..n {
            let v = r * n + c;
            if c + 1 < n {
                edges.push((v, v + 1));
            }
            if r + 1 < n {
                edges.push((v, v + n));
            }
        }
    }
    Graph::undirected(&edges).unwrap_or_else(|e| panic!("lattice {n}: {e}"))
}

/// Path validation on maximal random walks.
fn bench_is_valid(c: &mut Criterion) {
    let mut group = c.benchmark_group("Graph_is_valid");
    group.confidence_level(0.95);

    for n in [8, 16, 32].iter() {
        let graph = lattice(*n);
        let path = graph.random_path(&mut EvoRng::new(42));
        group.bench_with_input(BenchmarkId::new("is_valid", n), n, |b, _| {
            b.iter(|| black_box(graph.is_valid(black_box(&path))));
        });
    }

    group.finish();
}

/// Random maximal walk sampling.
fn bench_random_path(c: &mut Criterion) {
    let mut group = c.benchmark_group("Graph_random_path");

    for n in [8, 16, 32].iter() {
        let graph = lattice(*n);
        let mut rng = EvoRng::new(42);
        group.bench_with_input(BenchmarkId::new("random_path", n), n, |b, _| {
            b.iter(|| black_box(graph.random_path(&mut rng)));
        });
    }

    group.finish();
}

/// One generation of the genetic iterator.
fn bench_genetic_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("Genetic_step");
    group.sample_size(50);

    for size in [50, 100, 200].iter() {
        let graph = lattice(10);
        let mut rng = EvoRng::new(42);
        let population: Vec<GraphPath> = (0..*size).map(|_| graph.random_path(&mut rng)).collect();
        let iterator = GeneticIterator::default().with_sink(silent_sink());

        group.bench_with_input(BenchmarkId::new("population", size), size, |b, _| {
            b.iter(|| black_box(iterator.step(&graph, 0, &population, &mut rng)));
        });
    }

    group.finish();
}

/// Exhaustive codec-order enumeration on tiny line graphs.
fn bench_enumeration(c: &mut Criterion) {
    let mut group = c.benchmark_group("Codec_enumeration");
    group.sample_size(20);

    for n in [3, 4, 5].iter() {
        let edges: Vec<_> = (1..*n).map(|i| (i - 1, i)).collect();
        let graph = Graph::undirected(&edges).unwrap_or_else(|e| panic!("line {n}: {e}"));
        group.bench_with_input(BenchmarkId::new("all_paths", n), n, |b, _| {
            b.iter(|| black_box(graph.all_paths().count()));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_is_valid,
    bench_random_path,
    bench_genetic_step,
    bench_enumeration
);
criterion_main!(benches);
