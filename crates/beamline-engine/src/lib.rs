//! Moment-propagation engine for Beamline lattices.
//!
//! A [`Machine`] decodes a [`MachineConfig`] into a [`Lattice`] of typed
//! elements and propagates caller-owned [`BeamState`]s through it. Each
//! non-source element contributes a 7×7 transfer matrix `T`:
//!
//! ```text
//! moment0' = T · moment0
//! state'   = T · state · Tᵗ
//! ```
//!
//! Transfer matrices are cached per element and keyed by the incoming
//! reference particle; [`Machine::reconfigure`] invalidates the cache
//! entry of the element it changes. Elements with a misalignment see their
//! matrix wrapped as `M⁻¹·T·M`; elements flagged `skipcache` rebuild on
//! every pass.
//!
//! [`BeamState::moment0_rms`] gives RMS sizes, and [`Envelope`] merges the
//! states of several charge states into the moments of the whole bunch.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub(crate) mod cache;
pub mod config;
pub mod envelope;
pub mod lattice;
pub mod machine;
pub(crate) mod propagate;
pub mod state;

pub use config::{MachineConfig, MachineError, PropagateError, SimType};
pub use envelope::Envelope;
pub use lattice::Lattice;
pub use machine::Machine;
pub use state::BeamState;
