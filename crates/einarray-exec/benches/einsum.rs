//! Benchmarks for the reduction engine and elementwise broadcasting.
//!
//! Run with:
//! ```bash
//! cargo bench --bench einsum
//! ```

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use einarray_core::Tensor;
use einarray_exec::{add, einsum, matmul, sum};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::hint::black_box;

fn random(shape: &[usize], rng: &mut StdRng) -> Tensor<f64> {
    Tensor::random_uniform_with_rng(shape, -1.0, 1.0, rng).unwrap()
}

fn bench_matmul(c: &mut Criterion) {
    let mut group = c.benchmark_group("matmul");
    let mut rng = StdRng::seed_from_u64(42);

    for n in [8usize, 32, 64] {
        let a = random(&[n, n], &mut rng);
        let b = random(&[n, n], &mut rng);
        group.throughput(Throughput::Elements((n * n * n) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &(a, b), |bench, (a, b)| {
            bench.iter(|| black_box(matmul(black_box(a), black_box(b)).unwrap()));
        });
    }

    group.finish();
}

fn bench_batched(c: &mut Criterion) {
    let mut group = c.benchmark_group("batched_matmul");
    let mut rng = StdRng::seed_from_u64(7);

    for batch in [4usize, 16] {
        let a = random(&[batch, 16, 16], &mut rng);
        let b = random(&[batch, 16, 16], &mut rng);
        group.bench_with_input(BenchmarkId::from_parameter(batch), &(a, b), |bench, (a, b)| {
            bench.iter(|| black_box(einsum("bij,bjk->bik", &[a, b]).unwrap()));
        });
    }

    group.finish();
}

fn bench_reductions(c: &mut Criterion) {
    let mut group = c.benchmark_group("reductions");
    let mut rng = StdRng::seed_from_u64(3);
    let t = random(&[128, 128], &mut rng);

    group.bench_function("sum_rows", |b| {
        b.iter(|| black_box(sum(black_box(&t), Some(&[1])).unwrap()));
    });
    group.bench_function("trace", |b| {
        b.iter(|| black_box(einsum("ii->", &[black_box(&t)]).unwrap()));
    });

    group.finish();
}

fn bench_broadcast_add(c: &mut Criterion) {
    let mut group = c.benchmark_group("broadcast_add");
    let mut rng = StdRng::seed_from_u64(11);

    for n in [64usize, 256] {
        let col = random(&[n, 1], &mut rng);
        let row = random(&[n], &mut rng);
        group.throughput(Throughput::Elements((n * n) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &(col, row), |b, (col, row)| {
            b.iter(|| black_box(add(col, row).unwrap()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_matmul, bench_batched, bench_reductions, bench_broadcast_add);
criterion_main!(benches);
