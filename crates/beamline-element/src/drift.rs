//! Field-free drift.

use beamline_core::{ElementError, ParamLookup, PhaseMatrix, ReferenceParticle, M_TO_MM};

use crate::builder::TransferBuilder;
use crate::planes::drift_matrix;

/// A field-free drift of length `L`.
///
/// Both transverse planes shear as `x' = x + L/(bg²·gamma)·px`; the
/// longitudinal block is the identity.
#[derive(Clone, Debug, PartialEq)]
pub struct Drift {
    length: f64,
}

impl Drift {
    /// A drift of `length` metres.
    pub fn new(length: f64) -> Self {
        Self { length }
    }

    /// Decode from parameters. `L` is required.
    pub fn from_params(p: &impl ParamLookup) -> Result<Self, ElementError> {
        Ok(Self::new(p.require_scalar("L")?))
    }
}

impl TransferBuilder for Drift {
    fn type_name(&self) -> &'static str {
        "drift"
    }

    fn length(&self) -> f64 {
        self.length
    }

    fn transfer(&self, reference: &ReferenceParticle) -> Result<PhaseMatrix, ElementError> {
        Ok(drift_matrix(
            self.length * M_TO_MM,
            reference.momentum_scale(),
        ))
    }
}
