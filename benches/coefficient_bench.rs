use clustermatch::coef::{run_quantile_clustering, Clustermatch};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use ndarray::Array2;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use std::hint::black_box;

fn create_matrix(n_objects: usize, n_samples: usize) -> Array2<f64> {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    Array2::from_shape_fn((n_objects, n_samples), |_| rng.random::<f64>())
}

fn benchmark_quantile_clustering(c: &mut Criterion) {
    let mut group = c.benchmark_group("quantile_clustering");
    let data = create_matrix(1, 10_000);
    let row = data.row(0).to_vec();

    for k in [2, 5, 10] {
        group.bench_with_input(BenchmarkId::from_parameter(k), &k, |b, &k| {
            b.iter(|| run_quantile_clustering(black_box(&row), k).unwrap());
        });
    }

    group.finish();
}

fn benchmark_pairwise_jobs(c: &mut Criterion) {
    let mut group = c.benchmark_group("pairwise_matrix");
    group.sample_size(10);
    let data = create_matrix(60, 300);

    for jobs in [1, 2, 4] {
        let engine = Clustermatch::with_jobs(jobs).unwrap();
        group.bench_with_input(BenchmarkId::new("jobs", jobs), &jobs, |b, _| {
            b.iter(|| engine.compute(black_box(data.view())).unwrap());
        });
    }

    group.finish();
}

fn benchmark_single_pair(c: &mut Criterion) {
    // one pair hands the whole pool to the inner layer
    let data = create_matrix(2, 5_000);
    let x = data.row(0).to_vec();
    let y = data.row(1).to_vec();
    let engine = Clustermatch::with_jobs(4).unwrap();

    c.bench_function("single_pair_5000", |b| {
        b.iter(|| engine.compute_pair(black_box(&x), black_box(&y)).unwrap());
    });
}

criterion_group!(
    benches,
    benchmark_quantile_clustering,
    benchmark_pairwise_jobs,
    benchmark_single_pair
);
criterion_main!(benches);
