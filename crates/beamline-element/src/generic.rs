//! Elements whose transfer matrix does not depend on the reference:
//! [`Generic`] (user-supplied matrix) and [`Marker`] (identity).

use beamline_core::{
    matrix_from_row_major, ElementError, ParamLookup, PhaseMatrix, ReferenceParticle, PHASE_DIM,
};

use crate::builder::TransferBuilder;

/// A user-supplied transfer matrix.
///
/// `transfer` holds 49 entries in row-major order. `L` is optional and
/// only moves the beam's path position.
#[derive(Clone, Debug, PartialEq)]
pub struct Generic {
    transfer: PhaseMatrix,
    length: f64,
}

impl Generic {
    /// A generic element with the given matrix and length [m].
    pub fn new(transfer: PhaseMatrix, length: f64) -> Self {
        Self { transfer, length }
    }

    /// Decode from parameters.
    pub fn from_params(p: &impl ParamLookup) -> Result<Self, ElementError> {
        let flat = p
            .array_exact("transfer", PHASE_DIM * PHASE_DIM)?
            .ok_or_else(|| ElementError::MissingParameter {
                name: "transfer".to_string(),
            })?;
        Ok(Self::new(
            matrix_from_row_major("transfer", flat)?,
            p.scalar_or("L", 0.0)?,
        ))
    }

    /// The stored matrix.
    pub fn matrix(&self) -> &PhaseMatrix {
        &self.transfer
    }
}

impl TransferBuilder for Generic {
    fn type_name(&self) -> &'static str {
        "generic"
    }

    fn length(&self) -> f64 {
        self.length
    }

    fn transfer(&self, _reference: &ReferenceParticle) -> Result<PhaseMatrix, ElementError> {
        Ok(self.transfer)
    }
}

/// A zero-effect element used to name a location in the lattice.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Marker {
    length: f64,
}

impl Marker {
    /// Decode from parameters. `L` is optional.
    pub fn from_params(p: &impl ParamLookup) -> Result<Self, ElementError> {
        Ok(Self {
            length: p.scalar_or("L", 0.0)?,
        })
    }
}

impl TransferBuilder for Marker {
    fn type_name(&self) -> &'static str {
        "marker"
    }

    fn length(&self) -> f64 {
        self.length
    }

    fn transfer(&self, _reference: &ReferenceParticle) -> Result<PhaseMatrix, ElementError> {
        Ok(PhaseMatrix::identity())
    }
}
