//! Lattice elements and transfer-matrix builders for Beamline.
//!
//! Every element type implements [`TransferBuilder`], a pure function
//! from (parameters, incoming reference particle) to a 7×7 transfer
//! matrix. The exception is [`Source`], which replaces the beam state
//! rather than transforming it. [`ElementKind`] is the closed set of
//! element types; [`Element`] pairs a kind with its name and raw
//! parameters.
//!
//! # Element types
//!
//! | Type | Builder | Required | Optional |
//! |------|---------|----------|----------|
//! | `source` | [`Source`] | | `initial`, `moment0`, `vector_variable`, `matrix_variable`, `IonEs`, `IonEk`, `IonZ` |
//! | `marker` | [`Marker`] | | `L` |
//! | `generic` | [`Generic`] | `transfer` | `L` |
//! | `drift` | [`Drift`] | `L` | |
//! | `sbend` | [`SBend`] | `L`, `phi` | `K` |
//! | `quadrupole` | [`Quadrupole`] | `L` | `K`, `B2` |
//! | `solenoid` | [`Solenoid`] | `L` | `K`, `B` |
//! | `rfcavity` | [`RfCavity`] | `V` | `L`, `phi`, `f` |
//!
//! Every element also accepts `dx`, `dy`, `pitch`, `yaw` and `roll` (see
//! [`Misalignment`]) and a `skipcache` flag, read from its own parameters
//! only.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod builder;
pub mod drift;
pub mod element;
pub mod generic;
pub mod kind;
pub mod misalign;
pub(crate) mod planes;
pub mod quadrupole;
pub mod rf_cavity;
pub mod sbend;
pub mod solenoid;
pub mod source;

pub use builder::TransferBuilder;
pub use drift::Drift;
pub use element::Element;
pub use generic::{Generic, Marker};
pub use kind::{ElementKind, Step};
pub use misalign::Misalignment;
pub use quadrupole::Quadrupole;
pub use rf_cavity::RfCavity;
pub use sbend::SBend;
pub use solenoid::Solenoid;
pub use source::{charge_state, Source};
