//! Phase-space layout and the 7×7 matrix types.
//!
//! Coordinates are ordered `[x, px, y, py, phase, energy, 1]`. The trailing
//! constant `1` lets a plain matrix product carry affine (kick) terms.

use nalgebra::{SMatrix, SVector};

use crate::error::ElementError;

/// Dimension of the augmented phase space.
pub const PHASE_DIM: usize = 7;

/// Horizontal position [mm].
pub const PS_X: usize = 0;
/// Horizontal momentum [rad].
pub const PS_PX: usize = 1;
/// Vertical position [mm].
pub const PS_Y: usize = 2;
/// Vertical momentum [rad].
pub const PS_PY: usize = 3;
/// Longitudinal phase [rad].
pub const PS_S: usize = 4;
/// Energy deviation [MeV/u].
pub const PS_PS: usize = 5;
/// Affine constant.
pub const PS_QQ: usize = 6;

/// First-moment (mean) vector.
pub type PhaseVector = SVector<f64, PHASE_DIM>;

/// Transfer matrix or second-moment matrix.
pub type PhaseMatrix = SMatrix<f64, PHASE_DIM, PHASE_DIM>;

/// Build a matrix from 49 row-major entries.
pub fn matrix_from_row_major(name: &str, values: &[f64]) -> Result<PhaseMatrix, ElementError> {
    if values.len() != PHASE_DIM * PHASE_DIM {
        return Err(ElementError::ParameterArityMismatch {
            name: name.to_string(),
            expected: PHASE_DIM * PHASE_DIM,
            found: values.len(),
        });
    }
    Ok(PhaseMatrix::from_row_slice(values))
}

/// Flatten a matrix to 49 row-major entries.
pub fn matrix_to_row_major(m: &PhaseMatrix) -> Vec<f64> {
    let mut out = Vec::with_capacity(PHASE_DIM * PHASE_DIM);
    for i in 0..PHASE_DIM {
        for j in 0..PHASE_DIM {
            out.push(m[(i, j)]);
        }
    }
    out
}

/// Build a vector from exactly 7 entries.
pub fn vector_from_slice(name: &str, values: &[f64]) -> Result<PhaseVector, ElementError> {
    if values.len() != PHASE_DIM {
        return Err(ElementError::ParameterArityMismatch {
            name: name.to_string(),
            expected: PHASE_DIM,
            found: values.len(),
        });
    }
    Ok(PhaseVector::from_column_slice(values))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_major_layout() {
        let flat: Vec<f64> = (0..49u32).map(f64::from).collect();
        let m = matrix_from_row_major("transfer", &flat).unwrap();
        assert_eq!(m[(0, 1)], 1.0);
        assert_eq!(m[(1, 0)], 7.0);
        assert_eq!(m[(6, 6)], 48.0);
        assert_eq!(matrix_to_row_major(&m), flat);
    }

    #[test]
    fn wrong_lengths_rejected() {
        assert!(matches!(
            matrix_from_row_major("initial", &[0.0; 36]),
            Err(ElementError::ParameterArityMismatch {
                expected: 49,
                found: 36,
                ..
            })
        ));
        assert!(matches!(
            vector_from_slice("moment0", &[0.0; 6]),
            Err(ElementError::ParameterArityMismatch {
                expected: 7,
                found: 6,
                ..
            })
        ));
    }

    #[test]
    fn vector_order() {
        let v = vector_from_slice("moment0", &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 1.0]).unwrap();
        assert_eq!(v[PS_X], 1.0);
        assert_eq!(v[PS_PS], 6.0);
        assert_eq!(v[PS_QQ], 1.0);
    }
}
