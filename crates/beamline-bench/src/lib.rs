//! Benchmark profiles for the Beamline moment-propagation engine.
//!
//! Provides pre-built [`MachineConfig`] profiles for benchmarks and
//! examples:
//!
//! - [`fodo_profile`]: a source followed by `cells` focusing/defocusing
//!   cells at fixed energy
//! - [`linac_profile`]: FODO cells interleaved with accelerating gaps and
//!   a solenoid, so the reference energy changes along the lattice

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use beamline_core::{matrix_to_row_major, Params, PhaseMatrix};
use beamline_engine::MachineConfig;

/// Uranium rest energy [eV/u].
pub const ION_ES: f64 = 931.494_320e6;
/// Injection kinetic energy [eV/u].
pub const ION_EK: f64 = 0.5e6;
/// Charge-to-mass ratio of U-238 33+.
pub const ION_Z: f64 = 33.0 / 238.0;

/// Quadrupole gradient used by both profiles [1/m²].
const QUAD_K: f64 = 12.0;

/// Uncoupled input second moments: 1 mm², 1 mrad², 1 rad², 1e-4 (MeV/u)².
pub fn input_sigma() -> PhaseMatrix {
    let mut sigma = PhaseMatrix::zeros();
    for (i, v) in [1.0, 1.0e-6, 1.0, 1.0e-6, 1.0, 1.0e-4].into_iter().enumerate() {
        sigma[(i, i)] = v;
    }
    sigma
}

fn globals(config: MachineConfig) -> MachineConfig {
    config
        .with_global("IonEs", ION_ES)
        .with_global("IonEk", ION_EK)
        .with_global("IonZ", ION_Z)
}

fn source() -> Params {
    Params::new()
        .with("name", "S")
        .with("type", "source")
        .with("moment0", [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0])
        .with("initial", matrix_to_row_major(&input_sigma()))
}

fn fodo_cell(config: MachineConfig, cell: usize) -> MachineConfig {
    config
        .with_element(
            Params::new()
                .with("name", format!("QF{cell}"))
                .with("type", "quadrupole")
                .with("L", 0.1)
                .with("K", QUAD_K),
        )
        .with_element(
            Params::new()
                .with("name", format!("D{cell}A"))
                .with("type", "drift")
                .with("L", 0.4),
        )
        .with_element(
            Params::new()
                .with("name", format!("QD{cell}"))
                .with("type", "quadrupole")
                .with("L", 0.1)
                .with("K", -QUAD_K),
        )
        .with_element(
            Params::new()
                .with("name", format!("D{cell}B"))
                .with("type", "drift")
                .with("L", 0.4),
        )
}

/// A source followed by `cells` FODO cells (four elements each).
pub fn fodo_profile(cells: usize) -> MachineConfig {
    let mut config = globals(MachineConfig::new()).with_element(source());
    for cell in 0..cells {
        config = fodo_cell(config, cell);
    }
    config
}

/// Like [`fodo_profile`], with an accelerating gap and a solenoid after
/// every cell (six elements per cell).
pub fn linac_profile(cells: usize) -> MachineConfig {
    let mut config = globals(MachineConfig::new()).with_element(source());
    for cell in 0..cells {
        config = fodo_cell(config, cell)
            .with_element(
                Params::new()
                    .with("name", format!("CAV{cell}"))
                    .with("type", "rfcavity")
                    .with("L", 0.2)
                    .with("V", 0.5e6)
                    .with("phi", -30.0),
            )
            .with_element(
                Params::new()
                    .with("name", format!("SOL{cell}"))
                    .with("type", "solenoid")
                    .with("L", 0.1)
                    .with("K", 2.0),
            );
    }
    config
}
