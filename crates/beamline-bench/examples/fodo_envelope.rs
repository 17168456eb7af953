//! Beam envelope through an accelerating FODO channel.
//!
//! Demonstrates: build config → Machine → alloc_state → step a cell at a
//! time with propagate_max → read moments → reconfigure → repeat.

use beamline_bench::linac_profile;
use beamline_core::{Params, PS_X, PS_Y};
use beamline_engine::{BeamState, Machine};

const CELLS: usize = 8;
const ELEMENTS_PER_CELL: usize = 6;

fn report(label: &str, state: &BeamState) {
    println!(
        "  {label:>8}: s={:>6.2} m, Ek={:>9.4} MeV/u, x_rms={:>7.4} mm, y_rms={:>7.4} mm",
        state.pos(),
        state.ekinetic() / 1e6,
        state.state()[(PS_X, PS_X)].sqrt(),
        state.state()[(PS_Y, PS_Y)].sqrt(),
    );
}

fn run(machine: &Machine) {
    let mut state = machine.alloc_state(&Params::new(), true).unwrap();
    machine.propagate_max(&mut state, 1).unwrap();
    report("source", &state);
    for cell in 0..CELLS {
        machine.propagate_max(&mut state, ELEMENTS_PER_CELL).unwrap();
        report(&format!("cell {cell}"), &state);
    }
}

fn main() {
    println!("=== Beamline FODO Envelope Example ===\n");

    let mut machine = Machine::new(linac_profile(CELLS)).unwrap();
    println!("Nominal optics ({} elements):", machine.len());
    run(&machine);

    // Weaken every focusing quadrupole by 20%.
    for cell in 0..CELLS {
        for index in machine.find(&format!("QF{cell}")) {
            machine
                .reconfigure(
                    index.0,
                    &Params::new().with("L", 0.1).with("K", 12.0 * 0.8),
                )
                .unwrap();
        }
    }
    println!("\nWeakened QF:");
    run(&machine);
}
