//! Test fixtures and matrix comparison helpers for Beamline development.
//!
//! Provides the standard input beams used across the test-suite, a
//! builder for one-element machines, and a decimal-place matrix
//! comparison matching the precision the reference results are quoted
//! at.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use beamline_core::{PhaseMatrix, PhaseVector, PHASE_DIM};

/// A 7×7 matrix literal, row by row.
pub type Rows = [[f64; PHASE_DIM]; PHASE_DIM];

/// Convert row literals into a matrix.
pub fn from_rows(rows: &Rows) -> PhaseMatrix {
    PhaseMatrix::from_fn(|i, j| rows[i][j])
}

/// Flatten row literals to 49 row-major values.
pub fn flatten(rows: &Rows) -> Vec<f64> {
    rows.iter().flatten().copied().collect()
}

/// Assert every entry of `actual` is within `1.5 · 10^-decimal` of `expected`.
#[track_caller]
pub fn assert_matrix_decimal(actual: &PhaseMatrix, expected: &Rows, decimal: i32) {
    let tol = 1.5 * 10f64.powi(-decimal);
    for (i, row) in expected.iter().enumerate() {
        for (j, want) in row.iter().enumerate() {
            let got = actual[(i, j)];
            assert!(
                (got - want).abs() < tol,
                "entry ({i}, {j}): got {got:e}, expected {want:e} (decimal = {decimal})\nfull matrix: {actual}"
            );
        }
    }
}

/// Assert every entry of `actual` is within `1.5 · 10^-decimal` of `expected`.
#[track_caller]
pub fn assert_vector_decimal(actual: &PhaseVector, expected: &[f64; PHASE_DIM], decimal: i32) {
    let tol = 1.5 * 10f64.powi(-decimal);
    for (i, want) in expected.iter().enumerate() {
        let got = actual[i];
        assert!(
            (got - want).abs() < tol,
            "entry {i}: got {got:e}, expected {want:e} (decimal = {decimal})"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_are_row_major() {
        let mut rows = [[0.0; PHASE_DIM]; PHASE_DIM];
        rows[0][1] = 2.0;
        let m = from_rows(&rows);
        assert_eq!(m[(0, 1)], 2.0);
        assert_eq!(flatten(&rows)[1], 2.0);
    }

    #[test]
    fn decimal_tolerance() {
        let m = PhaseMatrix::identity() * (1.0 + 1e-7);
        let mut rows = [[0.0; PHASE_DIM]; PHASE_DIM];
        for (i, row) in rows.iter_mut().enumerate() {
            row[i] = 1.0;
        }
        assert_matrix_decimal(&m, &rows, 6);
    }

    #[test]
    #[should_panic(expected = "entry (0, 0)")]
    fn decimal_mismatch_panics() {
        let rows = [[0.0; PHASE_DIM]; PHASE_DIM];
        assert_matrix_decimal(&PhaseMatrix::identity(), &rows, 6);
    }
}
