//! Solenoid: coupled rotation and focusing of both transverse planes.

use beamline_core::{
    ElementError, ParamLookup, PhaseMatrix, ReferenceParticle, M_TO_MM, PS_PX, PS_PY, PS_X, PS_Y,
};

use crate::builder::TransferBuilder;
use crate::planes::{drift_matrix, scale_momentum};

/// A solenoid of length `L` [m] and strength `K` [1/m].
///
/// An optional axial field `B` [T] adds `B/(2·Brho)` to the strength.
/// The 4×4 transverse block is the product of a rotation through `K·L`
/// and a focusing block of the same frequency.
#[derive(Clone, Debug, PartialEq)]
pub struct Solenoid {
    length: f64,
    k: f64,
    field: f64,
}

impl Solenoid {
    /// A solenoid with the given length [m] and strength [1/m].
    pub fn new(length: f64, k: f64) -> Self {
        Self {
            length,
            k,
            field: 0.0,
        }
    }

    /// Builder-style axial field [T].
    #[must_use]
    pub fn with_field(mut self, field: f64) -> Self {
        self.field = field;
        self
    }

    /// Decode from parameters. `L` is required; `K` and `B` default to 0.
    pub fn from_params(p: &impl ParamLookup) -> Result<Self, ElementError> {
        Ok(Self::new(p.require_scalar("L")?, p.scalar_or("K", 0.0)?)
            .with_field(p.scalar_or("B", 0.0)?))
    }

    /// Net strength in 1/mm.
    fn strength(&self, reference: &ReferenceParticle) -> Result<f64, ElementError> {
        let mut k = self.k;
        if self.field != 0.0 {
            k += self.field / (2.0 * reference.brho()?);
        }
        Ok(k / M_TO_MM)
    }
}

impl TransferBuilder for Solenoid {
    fn type_name(&self) -> &'static str {
        "solenoid"
    }

    fn length(&self) -> f64 {
        self.length
    }

    fn transfer(&self, reference: &ReferenceParticle) -> Result<PhaseMatrix, ElementError> {
        let l = self.length * M_TO_MM;
        let k = self.strength(reference)?;
        let s = reference.momentum_scale();
        if k == 0.0 {
            return Ok(drift_matrix(l, s));
        }

        let (sn, cs) = (k * l).sin_cos();
        let (sc, s2, c2) = (sn * cs, sn * sn, cs * cs);

        let mut m = PhaseMatrix::identity();
        m[(PS_X, PS_X)] = c2;
        m[(PS_X, PS_PX)] = sc / k;
        m[(PS_X, PS_Y)] = sc;
        m[(PS_X, PS_PY)] = s2 / k;

        m[(PS_PX, PS_X)] = -k * sc;
        m[(PS_PX, PS_PX)] = c2;
        m[(PS_PX, PS_Y)] = -k * s2;
        m[(PS_PX, PS_PY)] = sc;

        m[(PS_Y, PS_X)] = -sc;
        m[(PS_Y, PS_PX)] = -s2 / k;
        m[(PS_Y, PS_Y)] = c2;
        m[(PS_Y, PS_PY)] = sc / k;

        m[(PS_PY, PS_X)] = k * s2;
        m[(PS_PY, PS_PX)] = -sc;
        m[(PS_PY, PS_Y)] = -k * sc;
        m[(PS_PY, PS_PY)] = c2;

        scale_momentum(&mut m, s);
        Ok(m)
    }
}
