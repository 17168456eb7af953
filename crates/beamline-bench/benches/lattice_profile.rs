//! Criterion benchmarks for whole-lattice propagation.

use std::hint::black_box;

use beamline_bench::{fodo_profile, linac_profile};
use beamline_core::Params;
use beamline_engine::Machine;
use criterion::{criterion_group, criterion_main, Criterion};

fn bench_fodo_100(c: &mut Criterion) {
    let machine = Machine::new(fodo_profile(100)).unwrap();
    let template = machine.alloc_state(&Params::new(), true).unwrap();

    // Warm up: one pass fills the transfer cache.
    let mut state = template.clone();
    machine.propagate(&mut state).unwrap();

    c.bench_function("fodo_100_cached", |b| {
        b.iter(|| {
            let mut state = template.clone();
            machine.propagate(&mut state).unwrap();
            black_box(&state);
        });
    });
}

fn bench_linac_100(c: &mut Criterion) {
    let machine = Machine::new(linac_profile(100)).unwrap();
    let template = machine.alloc_state(&Params::new(), true).unwrap();
    let mut state = template.clone();
    machine.propagate(&mut state).unwrap();

    c.bench_function("linac_100_cached", |b| {
        b.iter(|| {
            let mut state = template.clone();
            machine.propagate(&mut state).unwrap();
            black_box(&state);
        });
    });
}

fn bench_build_and_propagate(c: &mut Criterion) {
    c.bench_function("linac_100_cold", |b| {
        b.iter(|| {
            let machine = Machine::new(linac_profile(100)).unwrap();
            let mut state = machine.alloc_state(&Params::new(), true).unwrap();
            machine.propagate(&mut state).unwrap();
            black_box(&state);
        });
    });
}

criterion_group!(
    benches,
    bench_fodo_100,
    bench_linac_100,
    bench_build_and_propagate
);
criterion_main!(benches);
