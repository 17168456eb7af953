//! Shared helpers for building transverse 2×2 blocks.
//!
//! Every transverse builder works in "unit momentum" first and then
//! applies the reference momentum scale with [`scale_momentum`], so the
//! zero-strength limit of each builder is exactly the drift.

use beamline_core::{PhaseMatrix, PHASE_DIM, PS_PX, PS_PY, PS_X, PS_Y};

/// A 2×2 position/momentum block, row-major.
pub(crate) type PlaneBlock = [[f64; 2]; 2];

/// Transfer block for one plane of a linear focusing channel.
///
/// `length` is in mm and `k` in 1/mm². Positive `k` focuses
/// (trigonometric), negative `k` defocuses (hyperbolic), and exactly zero
/// is a plain drift.
pub(crate) fn plane_block(length: f64, k: f64) -> PlaneBlock {
    if k > 0.0 {
        let w = k.sqrt();
        let (sn, cs) = (w * length).sin_cos();
        [[cs, sn / w], [-w * sn, cs]]
    } else if k < 0.0 {
        let w = (-k).sqrt();
        let psi = w * length;
        let (ch, sh) = (psi.cosh(), psi.sinh());
        [[ch, sh / w], [w * sh, ch]]
    } else {
        [[1.0, length], [0.0, 1.0]]
    }
}

/// Write `block` into the plane whose position index is `pos`.
pub(crate) fn set_plane(m: &mut PhaseMatrix, pos: usize, block: PlaneBlock) {
    for (r, row) in block.iter().enumerate() {
        for (c, v) in row.iter().enumerate() {
            m[(pos + r, pos + c)] = *v;
        }
    }
}

/// Conjugate `m` by the momentum scale `s`.
///
/// Equivalent to `S⁻¹·m·S` with `S = diag(1, s, 1, s, 1, 1, 1)`: entries
/// mapping momentum into anything else gain a factor `s`, entries mapping
/// into momentum lose one.
pub(crate) fn scale_momentum(m: &mut PhaseMatrix, s: f64) {
    if s == 1.0 {
        return;
    }
    let scale = |i: usize| if i == PS_PX || i == PS_PY { s } else { 1.0 };
    for i in 0..PHASE_DIM {
        for j in 0..PHASE_DIM {
            let f = scale(j) / scale(i);
            if f != 1.0 {
                m[(i, j)] *= f;
            }
        }
    }
}

/// Drift of `length` mm in both transverse planes, momentum scale `s`.
pub(crate) fn drift_matrix(length: f64, s: f64) -> PhaseMatrix {
    let mut m = PhaseMatrix::identity();
    m[(PS_X, PS_PX)] = length * s;
    m[(PS_Y, PS_PY)] = length * s;
    m
}
