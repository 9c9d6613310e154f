//! Criterion micro-benchmarks for single steps.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use helix_bench::random_tracks;
use helix_core::NavigationDirection;
use helix_stepper::{ConstantField, RungeKuttaStepper, Stepper, StepperState, StraightLineStepper};

/// Benchmark: 1000 straight-line steps of 10 mm.
fn bench_straight_line_1k(c: &mut Criterion) {
    let tracks = random_tracks(1, 42);
    c.bench_function("straight_line_1k", |b| {
        b.iter(|| {
            let mut state = StepperState::new(&tracks[0], NavigationDirection::Forward, 10.0).unwrap();
            for _ in 0..1000 {
                black_box(StraightLineStepper.step(&mut state).unwrap());
            }
        });
    });
}

/// Benchmark: 1000 adaptive Runge-Kutta steps in a 2 T field.
fn bench_runge_kutta_1k(c: &mut Criterion) {
    let tracks = random_tracks(1, 42);
    let stepper = RungeKuttaStepper::with_defaults(ConstantField::along_z(2.0));
    c.bench_function("runge_kutta_1k", |b| {
        b.iter(|| {
            let mut state = StepperState::new(&tracks[0], NavigationDirection::Forward, 10.0).unwrap();
            for _ in 0..1000 {
                black_box(stepper.step(&mut state).unwrap());
            }
        });
    });
}

criterion_group!(benches, bench_straight_line_1k, bench_runge_kutta_1k);
criterion_main!(benches);
