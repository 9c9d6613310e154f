//! Criterion benchmarks for full propagation through the reference
//! detector.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use helix_bench::{random_tracks, reference_propagator};
use helix_engine::{propagate_batch, BatchConfig};
use helix_pipeline::{AbortList, ActionList, VolumeTransitionCollector};

/// Benchmark: propagate 100 tracks out of the detector, one at a time.
fn bench_propagate_100_sequential(c: &mut Criterion) {
    let propagator = reference_propagator().unwrap();
    let tracks = random_tracks(100, 42);
    let actions = ActionList::builder().with(VolumeTransitionCollector).build().unwrap();
    let aborts = AbortList::empty();

    c.bench_function("propagate_100_sequential", |b| {
        b.iter(|| {
            for track in &tracks {
                black_box(propagator.propagate(track, &actions, &aborts).unwrap());
            }
        });
    });
}

/// Benchmark: the same 100 tracks through the batch worker pool.
fn bench_propagate_100_batch(c: &mut Criterion) {
    let propagator = reference_propagator().unwrap();
    let tracks = random_tracks(100, 42);
    let actions = ActionList::builder().with(VolumeTransitionCollector).build().unwrap();
    let aborts = AbortList::empty();
    let config = BatchConfig::default();

    c.bench_function("propagate_100_batch", |b| {
        b.iter(|| black_box(propagate_batch(&propagator, &tracks, &actions, &aborts, &config)));
    });
}

criterion_group!(benches, bench_propagate_100_sequential, bench_propagate_100_batch);
criterion_main!(benches);
