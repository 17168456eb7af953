//! Sector bending magnet with an optional gradient (combined-function bend).

use beamline_core::{
    ElementError, ParamLookup, PhaseMatrix, ReferenceParticle, M_TO_MM, PS_PS, PS_PX, PS_S, PS_X,
    PS_Y,
};

use crate::builder::TransferBuilder;
use crate::planes::{plane_block, scale_momentum, set_plane};

/// A flat-face sector bend.
///
/// `L` [m] is the arc length, `phi` [rad] the bend angle and `K` [1/m²]
/// the body gradient. With curvature `h = phi/L` the horizontal plane
/// sees `K + h²` and the vertical plane `-K`.
///
/// The horizontal plane also carries dispersion (`x`, `px` driven by the
/// energy deviation) and the matching path-length terms in the phase
/// row. Both are scaled by reference quantities that vanish for an unset
/// reference, which then leaves only the focusing blocks.
#[derive(Clone, Debug, PartialEq)]
pub struct SBend {
    length: f64,
    angle: f64,
    k: f64,
}

/// First-order bend coefficients in mm and rad, for unit relative momentum.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Dispersion {
    r16: f64,
    r26: f64,
    r56: f64,
}

impl SBend {
    /// A bend of `length` metres through `angle` radians with gradient `k` [1/m²].
    pub fn new(length: f64, angle: f64, k: f64) -> Result<Self, ElementError> {
        if length == 0.0 && angle != 0.0 {
            return Err(ElementError::invalid(
                "L",
                format!("a bend through {angle} rad needs a nonzero length"),
            ));
        }
        Ok(Self { length, angle, k })
    }

    /// Decode from parameters. `L` and `phi` are required; `K` defaults to 0.
    pub fn from_params(p: &impl ParamLookup) -> Result<Self, ElementError> {
        Self::new(
            p.require_scalar("L")?,
            p.require_scalar("phi")?,
            p.scalar_or("K", 0.0)?,
        )
    }

    /// Curvature in 1/mm.
    fn curvature(&self) -> f64 {
        if self.length == 0.0 {
            0.0
        } else {
            self.angle / (self.length * M_TO_MM)
        }
    }

    fn dispersion(l: f64, h: f64, kx: f64) -> Dispersion {
        if kx > 0.0 {
            let w = kx.sqrt();
            let (sn, cs) = (w * l).sin_cos();
            Dispersion {
                r16: h * (1.0 - cs) / kx,
                r26: h * sn / w,
                r56: -h * h * (l - sn / w) / kx,
            }
        } else if kx < 0.0 {
            let w = (-kx).sqrt();
            let (sh, ch) = ((w * l).sinh(), (w * l).cosh());
            Dispersion {
                r16: h * (1.0 - ch) / kx,
                r26: h * sh / w,
                r56: -h * h * (l - sh / w) / kx,
            }
        } else {
            Dispersion {
                r16: h * l * l / 2.0,
                r26: h * l,
                r56: -h * h * l * l * l / 6.0,
            }
        }
    }
}

impl TransferBuilder for SBend {
    fn type_name(&self) -> &'static str {
        "sbend"
    }

    fn length(&self) -> f64 {
        self.length
    }

    fn transfer(&self, reference: &ReferenceParticle) -> Result<PhaseMatrix, ElementError> {
        let l = self.length * M_TO_MM;
        let h = self.curvature();
        let k = self.k / (M_TO_MM * M_TO_MM);
        let kx = k + h * h;

        let mut m = PhaseMatrix::identity();
        set_plane(&mut m, PS_X, plane_block(l, kx));
        set_plane(&mut m, PS_Y, plane_block(l, -k));

        let delta = reference.delta_per_mev();
        let wave = reference.wave_number();
        if h != 0.0 && (delta != 0.0 || wave != 0.0) {
            let d = Self::dispersion(l, h, kx);
            // Phase lags path length: phase = -wave * z.
            m[(PS_X, PS_PS)] = d.r16 * delta;
            m[(PS_PX, PS_PS)] = d.r26 * delta;
            m[(PS_S, PS_X)] = wave * d.r26;
            m[(PS_S, PS_PX)] = wave * d.r16;
            m[(PS_S, PS_PS)] = -wave * d.r56 * delta;
        }

        scale_momentum(&mut m, reference.momentum_scale());
        Ok(m)
    }
}
