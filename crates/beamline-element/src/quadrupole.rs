//! Magnetic quadrupole.

use beamline_core::{
    ElementError, ParamLookup, PhaseMatrix, ReferenceParticle, M_TO_MM, PS_X, PS_Y,
};

use crate::builder::TransferBuilder;
use crate::planes::{plane_block, scale_momentum, set_plane};

/// A quadrupole of length `L` [m] and strength `K` [1/m²].
///
/// An optional gradient `B2` [T/m] adds `B2/Brho` to the strength, which
/// needs a moving, charged reference particle. The horizontal plane sees
/// `+K` and the vertical plane `-K`.
#[derive(Clone, Debug, PartialEq)]
pub struct Quadrupole {
    length: f64,
    k: f64,
    b2: f64,
}

impl Quadrupole {
    /// A quadrupole with the given length [m] and strength [1/m²].
    pub fn new(length: f64, k: f64) -> Self {
        Self { length, k, b2: 0.0 }
    }

    /// Builder-style field gradient [T/m].
    #[must_use]
    pub fn with_gradient(mut self, b2: f64) -> Self {
        self.b2 = b2;
        self
    }

    /// Decode from parameters. `L` is required; `K` and `B2` default to 0.
    pub fn from_params(p: &impl ParamLookup) -> Result<Self, ElementError> {
        Ok(Self::new(p.require_scalar("L")?, p.scalar_or("K", 0.0)?)
            .with_gradient(p.scalar_or("B2", 0.0)?))
    }

    /// Net focusing strength in 1/mm² for a beam with `reference`.
    fn strength(&self, reference: &ReferenceParticle) -> Result<f64, ElementError> {
        let mut k = self.k;
        if self.b2 != 0.0 {
            k += self.b2 / reference.brho()?;
        }
        Ok(k / (M_TO_MM * M_TO_MM))
    }
}

impl TransferBuilder for Quadrupole {
    fn type_name(&self) -> &'static str {
        "quadrupole"
    }

    fn length(&self) -> f64 {
        self.length
    }

    fn transfer(&self, reference: &ReferenceParticle) -> Result<PhaseMatrix, ElementError> {
        let l = self.length * M_TO_MM;
        let k = self.strength(reference)?;
        let mut m = PhaseMatrix::identity();
        set_plane(&mut m, PS_X, plane_block(l, k));
        set_plane(&mut m, PS_Y, plane_block(l, -k));
        scale_momentum(&mut m, reference.momentum_scale());
        Ok(m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drift::Drift;
    use approx::assert_relative_eq;
    use beamline_core::{Params, PS_PX, PS_PY};

    #[test]
    fn focusing_plane_is_trigonometric() {
        let t = Quadrupole::new(2.0e-3, 1.1e6)
            .transfer(&ReferenceParticle::unset())
            .unwrap();
        let w = 1.1f64.sqrt();
        assert_relative_eq!(t[(PS_X, PS_X)], (2.0 * w).cos(), epsilon = 1e-12);
        assert_relative_eq!(t[(PS_PX, PS_X)], -w * (2.0 * w).sin(), epsilon = 1e-12);
        assert_relative_eq!(t[(PS_Y, PS_Y)], (2.0 * w).cosh(), epsilon = 1e-12);
        assert_relative_eq!(t[(PS_PY, PS_Y)], w * (2.0 * w).sinh(), epsilon = 1e-12);
    }

    #[test]
    fn zero_strength_equals_drift() {
        let r = ReferenceParticle::new(931.494e6, 2.0e6).unwrap();
        let q = Quadrupole::new(0.3, 0.0).transfer(&r).unwrap();
        let d = Drift::new(0.3).transfer(&r).unwrap();
        assert_eq!(q, d);
    }

    #[test]
    fn gradient_needs_rigidity() {
        let q = Quadrupole::from_params(&Params::new().with("L", 0.1).with("B2", 2.0)).unwrap();
        assert!(matches!(
            q.transfer(&ReferenceParticle::unset()),
            Err(ElementError::InvalidKinematics { .. })
        ));
        let r = ReferenceParticle::new(931.494e6, 0.5e6)
            .unwrap()
            .with_charge(0.25);
        let with_b2 = q.transfer(&r).unwrap();
        let k = 2.0 / r.brho().unwrap();
        let with_k = Quadrupole::new(0.1, k).transfer(&r).unwrap();
        for (a, b) in with_b2.iter().zip(with_k.iter()) {
            assert_relative_eq!(a, b, epsilon = 1e-12);
        }
    }
}
