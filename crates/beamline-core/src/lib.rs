//! Core types for the Beamline moment-transport engine.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the fundamental abstractions used throughout the Beamline workspace:
//! parameter values, phase-space layout, reference-particle kinematics,
//! error types, and element indices.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod id;
pub mod params;
pub mod phase;
pub mod reference;
pub mod value;

pub use error::ElementError;
pub use id::ElementIndex;
pub use params::{ParamLookup, Params, Scope};
pub use phase::{
    matrix_from_row_major, matrix_to_row_major, vector_from_slice, PhaseMatrix, PhaseVector,
    PHASE_DIM, PS_PS, PS_PX, PS_PY, PS_QQ, PS_S, PS_X, PS_Y,
};
pub use reference::{ReferenceParticle, C0, MEV_TO_EV, M_TO_MM, SAMPLE_FREQ_DEFAULT};
pub use value::Value;
