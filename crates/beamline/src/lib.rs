//! Beamline: linear transport of beam moments through accelerator lattices.
//!
//! This is the top-level facade crate that re-exports the public API from all
//! Beamline sub-crates. For most users, adding `beamline` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use beamline::prelude::*;
//!
//! // A source followed by a quadrupole doublet.
//! let config = MachineConfig::new()
//!     .with_global("IonEs", 931.494_32e6)
//!     .with_global("IonEk", 0.5e6)
//!     .with_global("IonZ", 33.0 / 238.0)
//!     .with_element(
//!         Params::new()
//!             .with("name", "S")
//!             .with("type", "source")
//!             .with("initial", matrix_to_row_major(&(PhaseMatrix::identity() * 1e-2))),
//!     )
//!     .with_element(Params::new().with("name", "QF").with("type", "quadrupole").with("L", 0.1).with("K", 12.0))
//!     .with_element(Params::new().with("name", "D").with("type", "drift").with("L", 0.3))
//!     .with_element(Params::new().with("name", "QD").with("type", "quadrupole").with("L", 0.1).with("K", -12.0));
//!
//! let machine = Machine::new(config).unwrap();
//! let mut state = machine.alloc_state(&Params::new(), true).unwrap();
//! machine.propagate(&mut state).unwrap();
//!
//! assert!((state.pos() - 0.5).abs() < 1e-12);
//! assert!(state.is_symmetric(1e-12));
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `beamline-core` | Parameters, phase-space matrices, reference kinematics, errors |
//! | [`element`] | `beamline-element` | Element kinds and their transfer-matrix builders |
//! | [`engine`] | `beamline-engine` | Machine configuration, beam state, propagation |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Parameters, phase-space types, and reference kinematics (`beamline-core`).
///
/// Contains [`types::Params`] and the [`types::ParamLookup`] accessors,
/// the 7×7 [`types::PhaseMatrix`], [`types::ReferenceParticle`], and
/// [`types::ElementError`].
pub use beamline_core as types;

/// Element kinds and transfer-matrix builders (`beamline-element`).
///
/// Every lattice element decodes into an [`element::ElementKind`]; the
/// optical ones implement [`element::TransferBuilder`].
pub use beamline_element as element;

/// Machines and beam states (`beamline-engine`).
///
/// [`engine::Machine`] decodes a [`engine::MachineConfig`] and propagates
/// [`engine::BeamState`]s through it.
pub use beamline_engine as engine;

/// Common imports for typical Beamline usage.
///
/// ```rust
/// use beamline::prelude::*;
/// ```
///
/// This imports the configuration and machine types, the beam state, the
/// phase-space types and coordinate indices, and the error types.
pub mod prelude {
    // Parameters and values
    pub use beamline_core::{ParamLookup, Params, Value};

    // Phase space
    pub use beamline_core::{
        matrix_from_row_major, matrix_to_row_major, PhaseMatrix, PhaseVector, PS_PS, PS_PX,
        PS_PY, PS_QQ, PS_S, PS_X, PS_Y,
    };

    // Kinematics
    pub use beamline_core::ReferenceParticle;

    // Elements
    pub use beamline_element::{Element, ElementKind, Misalignment, TransferBuilder};

    // Errors
    pub use beamline_core::ElementError;
    pub use beamline_engine::{MachineError, PropagateError};

    // Engine
    pub use beamline_engine::{BeamState, Envelope, Machine, MachineConfig, SimType};

    pub use beamline_core::ElementIndex;
}
