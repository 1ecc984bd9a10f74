//! Benchmarks for nearest-candidate search strategies

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use proxy_search::persistence::synthetic;
use proxy_search::{FlatIndex, Index, ProxyIndex, SampleMetric, Sequence};

const SIDE: usize = 28;

fn benchmark_strategies(c: &mut Criterion) {
    let mut group = c.benchmark_group("nearest");
    let query = synthetic::generate(1, SIDE, 99).unwrap().remove(0);

    for size in [1_000usize, 10_000].iter() {
        let training = synthetic::generate(*size, SIDE, 7).unwrap();

        let mut linear = FlatIndex::new(SampleMetric::SquaredEuclidean);
        linear.train(Sequence::from_vec(training.clone())).unwrap();
        let mut parallel = FlatIndex::parallel(SampleMetric::SquaredEuclidean);
        parallel.train(Sequence::from_vec(training.clone())).unwrap();
        let mut proxy = ProxyIndex::new(SampleMetric::SquaredEuclidean);
        proxy.train(Sequence::from_vec(training)).unwrap();

        group.bench_with_input(BenchmarkId::new("linear", size), size, |b, _| {
            b.iter(|| linear.nearest(black_box(&query)).unwrap());
        });
        group.bench_with_input(BenchmarkId::new("parallel", size), size, |b, _| {
            b.iter(|| parallel.nearest(black_box(&query)).unwrap());
        });
        group.bench_with_input(BenchmarkId::new("proxy", size), size, |b, _| {
            b.iter(|| proxy.nearest(black_box(&query)).unwrap());
        });
    }

    group.finish();
}

fn benchmark_sort(c: &mut Criterion) {
    let training = synthetic::generate(10_000, SIDE, 3).unwrap();

    c.bench_function("sort_by_proxy_key_10000", |b| {
        b.iter_batched(
            || Sequence::from_vec(training.clone()),
            |mut seq| {
                seq.sort_by_proxy_key();
                seq
            },
            criterion::BatchSize::LargeInput,
        );
    });
}

criterion_group!(benches, benchmark_strategies, benchmark_sort);
criterion_main!(benches);
