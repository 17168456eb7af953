//! Element misalignment.
//!
//! A misaligned element is modelled by moving the beam into the element's
//! own frame at the entrance, applying the aligned transfer matrix, and
//! moving back at the exit: `T' = M⁻¹·T·M`. The angles enter as momentum
//! offsets at the entrance; the lever arm along the element is neglected.

use beamline_core::{
    ElementError, ParamLookup, PhaseMatrix, ReferenceParticle, M_TO_MM, PS_PX, PS_PY, PS_QQ,
    PS_X, PS_Y,
};

/// Offsets [m] and rotations [rad] of an element relative to the design
/// axis.
///
/// `pitch` tilts the element in the vertical plane, `yaw` in the
/// horizontal plane, and `roll` turns it about the beam axis.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Misalignment {
    /// Horizontal offset [m].
    pub dx: f64,
    /// Vertical offset [m].
    pub dy: f64,
    /// Vertical tilt [rad].
    pub pitch: f64,
    /// Horizontal tilt [rad].
    pub yaw: f64,
    /// Rotation about the beam axis [rad].
    pub roll: f64,
}

impl Misalignment {
    /// Decode `dx`, `dy`, `pitch`, `yaw` and `roll`, each defaulting to 0.
    pub fn from_params(p: &impl ParamLookup) -> Result<Self, ElementError> {
        Ok(Self {
            dx: p.scalar_or("dx", 0.0)?,
            dy: p.scalar_or("dy", 0.0)?,
            pitch: p.scalar_or("pitch", 0.0)?,
            yaw: p.scalar_or("yaw", 0.0)?,
            roll: p.scalar_or("roll", 0.0)?,
        })
    }

    /// True when every offset and angle is zero.
    pub fn is_aligned(&self) -> bool {
        *self == Self::default()
    }

    /// Map from the design frame into the element frame.
    pub fn entrance(&self, reference: &ReferenceParticle) -> PhaseMatrix {
        rotation(self.roll) * self.shift(reference.momentum_scale(), -1.0)
    }

    /// Map from the element frame back into the design frame; the exact
    /// inverse of [`entrance`](Self::entrance).
    pub fn exit(&self, reference: &ReferenceParticle) -> PhaseMatrix {
        self.shift(reference.momentum_scale(), 1.0) * rotation(-self.roll)
    }

    /// The aligned transfer matrix `transfer` as seen from the design
    /// frame. Returns `transfer` unchanged when aligned.
    pub fn apply(&self, transfer: PhaseMatrix, reference: &ReferenceParticle) -> PhaseMatrix {
        if self.is_aligned() {
            return transfer;
        }
        self.exit(reference) * transfer * self.entrance(reference)
    }

    fn shift(&self, s: f64, sign: f64) -> PhaseMatrix {
        let mut m = PhaseMatrix::identity();
        m[(PS_X, PS_QQ)] = sign * self.dx * M_TO_MM;
        m[(PS_Y, PS_QQ)] = sign * self.dy * M_TO_MM;
        m[(PS_PX, PS_QQ)] = sign * self.yaw / s;
        m[(PS_PY, PS_QQ)] = sign * self.pitch / s;
        m
    }
}

/// Rotate both transverse planes by `angle` about the beam axis.
fn rotation(angle: f64) -> PhaseMatrix {
    let (sn, cs) = angle.sin_cos();
    let mut m = PhaseMatrix::identity();
    for (x, y) in [(PS_X, PS_Y), (PS_PX, PS_PY)] {
        m[(x, x)] = cs;
        m[(x, y)] = sn;
        m[(y, x)] = -sn;
        m[(y, y)] = cs;
    }
    m
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::TransferBuilder;
    use crate::drift::Drift;
    use crate::quadrupole::Quadrupole;
    use approx::assert_relative_eq;
    use beamline_core::Params;
    use std::f64::consts::FRAC_PI_2;

    fn proton() -> ReferenceParticle {
        ReferenceParticle::new(931.494e6, 2.0e6).unwrap()
    }

    #[test]
    fn defaults_to_aligned() {
        let m = Misalignment::from_params(&Params::new().with("L", 1.0)).unwrap();
        assert!(m.is_aligned());
        let t = Quadrupole::new(0.2, 3.0).transfer(&proton()).unwrap();
        assert_eq!(m.apply(t, &proton()), t);
    }

    #[test]
    fn exit_inverts_entrance() {
        let m = Misalignment {
            dx: 1e-3,
            dy: -2e-3,
            pitch: 1e-4,
            yaw: -3e-4,
            roll: 0.3,
        };
        let r = proton();
        let product = m.exit(&r) * m.entrance(&r);
        assert_relative_eq!(product, PhaseMatrix::identity(), epsilon = 1e-12);
    }

    #[test]
    fn offset_drift_is_unchanged() {
        let r = proton();
        let m = Misalignment {
            dx: 2e-3,
            dy: 1e-3,
            ..Misalignment::default()
        };
        let t = Drift::new(1.5).transfer(&r).unwrap();
        assert_relative_eq!(m.apply(t, &r), t, epsilon = 1e-12);
    }

    #[test]
    fn quarter_roll_swaps_focusing_planes() {
        let r = proton();
        let m = Misalignment {
            roll: FRAC_PI_2,
            ..Misalignment::default()
        };
        let rolled = m.apply(Quadrupole::new(0.2, 4.0).transfer(&r).unwrap(), &r);
        let flipped = Quadrupole::new(0.2, -4.0).transfer(&r).unwrap();
        assert_relative_eq!(rolled, flipped, epsilon = 1e-9);
    }

    #[test]
    fn offset_quadrupole_steers_on_axis_beam() {
        let r = ReferenceParticle::unset();
        let (l, k, dx) = (0.1, 2.0, 1e-3);
        let m = Misalignment {
            dx,
            ..Misalignment::default()
        };
        let t = m.apply(Quadrupole::new(l, k).transfer(&r).unwrap(), &r);
        // Focusing pulls the beam toward the displaced quadrupole axis.
        let w = k.sqrt() / M_TO_MM;
        let offset = dx * M_TO_MM;
        assert_relative_eq!(
            t[(PS_PX, PS_QQ)],
            w * (w * l * M_TO_MM).sin() * offset,
            max_relative = 1e-12
        );
        assert_relative_eq!(
            t[(PS_X, PS_QQ)],
            (1.0 - (w * l * M_TO_MM).cos()) * offset,
            max_relative = 1e-12
        );
        assert_eq!(t[(PS_Y, PS_QQ)], 0.0);
    }

    #[test]
    fn zero_length_tilt_is_transparent() {
        let r = proton();
        let yaw = 2e-4;
        let m = Misalignment {
            yaw,
            ..Misalignment::default()
        };
        let t = m.apply(Quadrupole::new(0.0, 0.0).transfer(&r).unwrap(), &r);
        // A zero-length element leaves the beam where it was.
        assert_relative_eq!(t, PhaseMatrix::identity(), epsilon = 1e-15);
        let p = Misalignment::from_params(&Params::new().with("yaw", yaw)).unwrap();
        assert_eq!(p, m);
        assert_relative_eq!(m.entrance(&r)[(PS_PX, PS_QQ)], -yaw / r.momentum_scale());
    }
}
