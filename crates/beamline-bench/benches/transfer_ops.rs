//! Criterion micro-benchmarks for transfer-matrix construction and the
//! congruence update.

use std::hint::black_box;

use beamline_bench::{input_sigma, ION_EK, ION_ES, ION_Z};
use beamline_core::{Params, ReferenceParticle};
use beamline_element::{Quadrupole, RfCavity, SBend, Solenoid, TransferBuilder};
use beamline_engine::{BeamState, Machine};
use beamline_test_utils::fixtures::single_element_config;
use criterion::{criterion_group, criterion_main, Criterion};

fn reference() -> ReferenceParticle {
    ReferenceParticle::new(ION_ES, ION_EK)
        .unwrap()
        .with_charge(ION_Z)
}

fn bench_builders(c: &mut Criterion) {
    let r = reference();
    let quad = Quadrupole::new(0.1, 12.0);
    let bend = SBend::new(0.5, 0.2, 0.0).unwrap();
    let sol = Solenoid::new(0.1, 2.0);
    let cav = RfCavity::new(0.2, 0.5e6, -30.0);

    let mut group = c.benchmark_group("transfer");
    group.bench_function("quadrupole", |b| b.iter(|| black_box(quad.transfer(&r).unwrap())));
    group.bench_function("sbend", |b| b.iter(|| black_box(bend.transfer(&r).unwrap())));
    group.bench_function("solenoid", |b| b.iter(|| black_box(sol.transfer(&r).unwrap())));
    group.bench_function("rfcavity", |b| b.iter(|| black_box(cav.transfer(&r).unwrap())));
    group.finish();
}

fn bench_congruence(c: &mut Criterion) {
    let t = Quadrupole::new(0.1, 12.0).transfer(&reference()).unwrap();
    let mut state = BeamState::zeroed();
    *state.state_mut() = input_sigma();

    c.bench_function("apply_transfer", |b| {
        b.iter(|| {
            let mut s = state.clone();
            s.apply_transfer(black_box(&t));
            black_box(&s);
        });
    });
}

fn bench_cache_hit_vs_miss(c: &mut Criterion) {
    let element = Params::new()
        .with("name", "Q")
        .with("type", "quadrupole")
        .with("L", 0.1)
        .with("K", 12.0);
    let mut machine = Machine::new(single_element_config(element.clone())).unwrap();
    let template = machine.alloc_state(&Params::new(), true).unwrap();

    c.bench_function("single_quad_hit", |b| {
        b.iter(|| {
            let mut s = template.clone();
            machine.propagate(&mut s).unwrap();
            black_box(&s);
        });
    });

    let update = element.with("K", 12.0);
    c.bench_function("single_quad_miss", |b| {
        b.iter(|| {
            machine.reconfigure(1, &update).unwrap();
            let mut s = template.clone();
            machine.propagate(&mut s).unwrap();
            black_box(&s);
        });
    });
}

criterion_group!(
    benches,
    bench_builders,
    bench_congruence,
    bench_cache_hit_vs_miss
);
criterion_main!(benches);
