use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use crossbeam_epoch::Owned;
use std::hint::black_box;
use swmr_generation::GenerationHolder;

// Benchmark 1: Deferring the destruction of a single object
fn bench_single_retire(c: &mut Criterion) {
    c.bench_function("swmr_generation_hold", |b| {
        let mut holder = GenerationHolder::new();
        let mut generation = 0u64;
        b.iter(|| {
            holder.hold(Box::new(vec![0u64; 4]));
            generation += 1;
            holder.assign_generation(generation);
            holder.reclaim(generation);
        });
        holder.clear();
    });

    c.bench_function("crossbeam_epoch_defer_destroy", |b| {
        b.iter(|| {
            let guard = crossbeam_epoch::pin();
            let shared = Owned::new(vec![0u64; 4]).into_shared(&guard);
            unsafe {
                guard.defer_destroy(shared);
            }
        });
    });
}

// Benchmark 2: Retiring a batch and reclaiming it
fn bench_batch_retire(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch_retire");

    for batch in [16, 64, 256, 1024].iter() {
        group.bench_with_input(
            BenchmarkId::new("swmr_generation", batch),
            batch,
            |b, &batch| {
                let mut holder = GenerationHolder::new();
                let mut generation = 0u64;
                b.iter(|| {
                    for i in 0..batch {
                        holder.hold(Box::new(vec![i as u64; 4]));
                    }
                    generation += 1;
                    holder.assign_generation(generation);
                    black_box(holder.reclaim(generation + 1));
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("crossbeam_epoch", batch),
            batch,
            |b, &batch| {
                b.iter(|| {
                    let guard = crossbeam_epoch::pin();
                    for i in 0..batch {
                        let shared = Owned::new(vec![i as u64; 4]).into_shared(&guard);
                        unsafe {
                            guard.defer_destroy(shared);
                        }
                    }
                    guard.flush();
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_single_retire, bench_batch_retire);
criterion_main!(benches);
