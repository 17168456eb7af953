//! Single-element transfer results against published reference values.
//!
//! Every case starts from `diag(0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0)` with no
//! ion species declared, propagates through a source and one element,
//! and compares the second moments to six decimal places.

use beamline_core::{Params, PhaseMatrix};
use beamline_engine::{BeamState, Machine, MachineConfig};
use beamline_test_utils::fixtures::{diagonal_sigma, identity_flat, single_element};
use beamline_test_utils::{assert_matrix_decimal, from_rows, Rows};

fn run(element: Params) -> BeamState {
    let machine = single_element(element.with("name", "elem1"));
    let mut state = machine.alloc_state(&Params::new(), true).unwrap();
    machine.propagate(&mut state).unwrap();
    assert!(state.is_symmetric(1e-12));
    state
}

#[test]
fn generic_identity() {
    let machine = Machine::new(
        MachineConfig::new()
            .with_element(
                Params::new()
                    .with("name", "elem0")
                    .with("type", "source")
                    .with("initial", identity_flat()),
            )
            .with_element(
                Params::new()
                    .with("name", "elem1")
                    .with("type", "generic")
                    .with("transfer", identity_flat()),
            ),
    )
    .unwrap();
    let mut state = machine.alloc_state(&Params::new(), true).unwrap();
    machine.propagate(&mut state).unwrap();
    assert_eq!(state.state(), &PhaseMatrix::identity());
}

#[test]
fn drift() {
    let s = run(Params::new().with("type", "drift").with("L", 1.234));
    let expected: Rows = [
        [3.045513e+05, 2.468000e+02, 0.0, 0.0, 0.0, 0.0, 0.0],
        [2.468000e+02, 2.000000e-01, 0.0, 0.0, 0.0, 0.0, 0.0],
        [0.0, 0.0, 6.091027e+05, 4.936000e+02, 0.0, 0.0, 0.0],
        [0.0, 0.0, 4.936000e+02, 4.000000e-01, 0.0, 0.0, 0.0],
        [0.0, 0.0, 0.0, 0.0, 5.000000e-01, 0.0, 0.0],
        [0.0, 0.0, 0.0, 0.0, 0.0, 6.000000e-01, 0.0],
        [0.0; 7],
    ];
    assert_matrix_decimal(s.state(), &expected, 6);
    assert_eq!(s.pos(), 1.234);
}

#[test]
fn sbend_focusing() {
    let s = run(Params::new()
        .with("type", "sbend")
        .with("L", 2.0e-3)
        .with("phi", 25f64.to_radians())
        .with("K", 1.0e6));
    let expected: Rows = [
        [1.71805650e-01, -3.79121906e-02, 0.0, 0.0, 0.0, 0.0, 0.0],
        [-3.79121906e-02, 1.24776654e-01, 0.0, 0.0, 0.0, 0.0, 0.0],
        [0.0, 0.0, 9.50788149e+00, 9.55147102e+00, 0.0, 0.0, 0.0],
        [0.0, 0.0, 9.55147102e+00, 9.60788149e+00, 0.0, 0.0, 0.0],
        [0.0, 0.0, 0.0, 0.0, 5.00000000e-01, 0.0, 0.0],
        [0.0, 0.0, 0.0, 0.0, 0.0, 6.00000000e-01, 0.0],
        [0.0; 7],
    ];
    assert_matrix_decimal(s.state(), &expected, 6);
}

#[test]
fn sbend_defocusing() {
    let s = run(Params::new()
        .with("type", "sbend")
        .with("L", 2.0e-3)
        .with("phi", 25f64.to_radians())
        .with("K", -1.0e6));
    let expected: Rows = [
        [3.78918063e+00, 3.74852747e+00, 0.0, 0.0, 0.0, 0.0, 0.0],
        [3.74852747e+00, 3.71358865e+00, 0.0, 0.0, 0.0, 0.0, 0.0],
        [0.0, 0.0, 3.82682181e-01, -3.78401248e-02, 0.0, 0.0, 0.0],
        [0.0, 0.0, -3.78401248e-02, 3.17317819e-01, 0.0, 0.0, 0.0],
        [0.0, 0.0, 0.0, 0.0, 5.00000000e-01, 0.0, 0.0],
        [0.0, 0.0, 0.0, 0.0, 0.0, 6.00000000e-01, 0.0],
        [0.0; 7],
    ];
    assert_matrix_decimal(s.state(), &expected, 6);
}

#[test]
fn quadrupole_focusing() {
    let s = run(Params::new()
        .with("type", "quadrupole")
        .with("L", 2.0e-3)
        .with("K", 1.1e6)
        .with("B2", 0.0));
    let expected: Rows = [
        [1.61134871e-01, -3.72950224e-02, 0.0, 0.0, 0.0, 0.0, 0.0],
        [-3.72950224e-02, 1.32751642e-01, 0.0, 0.0, 0.0, 0.0, 0.0],
        [0.0, 0.0, 1.09819606e+01, 1.15461050e+01, 0.0, 0.0, 0.0],
        [0.0, 0.0, 1.15461050e+01, 1.21501566e+01, 0.0, 0.0, 0.0],
        [0.0, 0.0, 0.0, 0.0, 5.00000000e-01, 0.0, 0.0],
        [0.0, 0.0, 0.0, 0.0, 0.0, 6.00000000e-01, 0.0],
        [0.0; 7],
    ];
    assert_matrix_decimal(s.state(), &expected, 6);
}

#[test]
fn quadrupole_defocusing() {
    let s = run(Params::new()
        .with("type", "quadrupole")
        .with("L", 2.0e-3)
        .with("K", -1.1e6)
        .with("B2", 0.0));
    let expected: Rows = [
        [4.63617503e+00, 4.90314048e+00, 0.0, 0.0, 0.0, 0.0, 0.0],
        [4.90314048e+00, 5.18979253e+00, 0.0, 0.0, 0.0, 0.0, 0.0],
        [0.0, 0.0, 3.47549344e-01, -2.90072396e-02, 0.0, 0.0, 0.0],
        [0.0, 0.0, -2.90072396e-02, 3.47695722e-01, 0.0, 0.0, 0.0],
        [0.0, 0.0, 0.0, 0.0, 5.00000000e-01, 0.0, 0.0],
        [0.0, 0.0, 0.0, 0.0, 0.0, 6.00000000e-01, 0.0],
        [0.0; 7],
    ];
    assert_matrix_decimal(s.state(), &expected, 6);
}

#[test]
fn solenoid() {
    let s = run(Params::new()
        .with("type", "solenoid")
        .with("L", 1.123)
        .with("K", -1.0e3)
        .with("B", 0.0));
    let expected: Rows = [
        [3.95745247e-01, 1.18242831e-02, -2.36485661e-02, 0.0, 0.0, 0.0, 0.0],
        [1.18242831e-02, 2.98581749e-01, 0.0, -2.36485661e-02, 0.0, 0.0, 0.0],
        [-2.36485661e-02, 0.0, 2.01418251e-01, 1.18242831e-02, 0.0, 0.0, 0.0],
        [0.0, -2.36485661e-02, 1.18242831e-02, 1.04254753e-01, 0.0, 0.0, 0.0],
        [0.0, 0.0, 0.0, 0.0, 5.00000000e-01, 0.0, 0.0],
        [0.0, 0.0, 0.0, 0.0, 0.0, 6.00000000e-01, 0.0],
        [0.0; 7],
    ];
    assert_matrix_decimal(s.state(), &expected, 6);
}

#[test]
fn marker_changes_nothing() {
    let s = run(Params::new().with("type", "marker"));
    assert_eq!(s.state(), &from_rows(&diagonal_sigma()));
    assert_eq!(s.pos(), 0.0);
}
