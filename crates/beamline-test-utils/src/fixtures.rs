//! Standard beams and machines.
//!
//! - [`diagonal_sigma`]: `diag(0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0)`, the
//!   uncoupled input used by the single-element reference results.
//! - [`coupled_sigma`] / [`offset_moment0`]: the coupled input and mean
//!   used by the identity, reconfiguration and source tests.
//! - [`single_element`]: a source followed by one element.

use beamline_core::{Params, PHASE_DIM};
use beamline_engine::{Machine, MachineConfig};

use crate::Rows;

/// `diag(0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0)`.
pub fn diagonal_sigma() -> Rows {
    let mut rows = [[0.0; PHASE_DIM]; PHASE_DIM];
    for (i, v) in [0.1, 0.2, 0.3, 0.4, 0.5, 0.6].into_iter().enumerate() {
        rows[i][i] = v;
    }
    rows
}

/// Ones coupling each position to the other positions and each momentum
/// to the other momenta.
pub fn coupled_sigma() -> Rows {
    [
        [1.0, 0.0, 1.0, 0.0, 1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0, 1.0, 0.0, 1.0, 0.0],
        [1.0, 0.0, 1.0, 0.0, 1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0, 1.0, 0.0, 1.0, 0.0],
        [1.0, 0.0, 1.0, 0.0, 1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0, 1.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
    ]
}

/// `[1, 1, 0, 0, 0, 0, 0]`.
pub fn offset_moment0() -> [f64; PHASE_DIM] {
    [1.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0]
}

/// The 7×7 identity, flattened.
pub fn identity_flat() -> Vec<f64> {
    scaled_identity_flat(1.0)
}

/// `s` times the 7×7 identity, flattened.
pub fn scaled_identity_flat(s: f64) -> Vec<f64> {
    let mut v = vec![0.0; PHASE_DIM * PHASE_DIM];
    for i in 0..PHASE_DIM {
        v[i * PHASE_DIM + i] = s;
    }
    v
}

/// Source element `elem0` with the given second moments.
pub fn source(sigma: &Rows) -> Params {
    Params::new()
        .with("name", "elem0")
        .with("type", "source")
        .with("initial", crate::flatten(sigma))
}

/// Configuration: a source with [`diagonal_sigma`] followed by `element`.
pub fn single_element_config(element: Params) -> MachineConfig {
    MachineConfig::new()
        .with_element(source(&diagonal_sigma()))
        .with_element(element)
}

/// Machine: a source with [`diagonal_sigma`] followed by `element`.
///
/// # Panics
///
/// Panics if the element does not decode.
pub fn single_element(element: Params) -> Machine {
    Machine::new(single_element_config(element)).expect("fixture machine must build")
}
