use core::hint::black_box;
use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use futures::TryStreamExt;
use primefan::{EngineConfig, run, sieve};
use std::time::Instant;
use tokio::runtime::Builder;

const MAX_NUM: u64 = 1_000_000;

fn bench_sieve(c: &mut Criterion) {
    let mut group = c.benchmark_group("sieve");
    group.throughput(Throughput::Elements(MAX_NUM));

    group.bench_function(format!("max/{MAX_NUM}"), |b| {
        b.iter(|| black_box(sieve(black_box(MAX_NUM))));
    });

    group.finish();
}

/// Sweeps the worker cap so the bounded-sink scheduling behavior can be
/// measured on the deployment runtime instead of assumed.
fn bench_engine(c: &mut Criterion) {
    let rt = Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("tokio runtime");

    let mut group = c.benchmark_group("engine");
    group.sample_size(10);
    group.throughput(Throughput::Elements(MAX_NUM));

    for workers in [1_usize, 4, 8] {
        group.bench_function(format!("workers/{workers}"), |b| {
            b.iter_custom(|iters| {
                let start = Instant::now();
                for _ in 0..iters {
                    let primes: Vec<u64> = rt
                        .block_on(async {
                            run(EngineConfig::new(MAX_NUM, workers))?.try_collect().await
                        })
                        .expect("clean run");
                    black_box(primes);
                }
                start.elapsed()
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_sieve, bench_engine);
criterion_main!(benches);
