//! Combined moments of several beams.
//!
//! A multi-charge-state beam is propagated as one [`BeamState`] per
//! charge state. [`Envelope::combine`] merges them, weighted by the
//! number of particles in each, into the moments of the whole bunch.

use beamline_core::{PhaseMatrix, PhaseVector};

use crate::state::{rms, BeamState};

/// Weighted mean and spread of a set of beams.
#[derive(Clone, Debug, PartialEq)]
pub struct Envelope {
    moment0_env: PhaseVector,
    moment1_env: PhaseMatrix,
}

impl Envelope {
    /// Combine `(weight, state)` pairs.
    ///
    /// `moment0_env` is the weighted mean of the first moments. Each
    /// state's second moments are taken about that mean, so offsets
    /// between beams widen the envelope. Returns `None` when there are no
    /// beams, a weight is negative or non-finite, or the weights sum to
    /// zero.
    pub fn combine<'a>(beams: impl IntoIterator<Item = (f64, &'a BeamState)>) -> Option<Self> {
        let beams: Vec<(f64, &BeamState)> = beams.into_iter().collect();
        if beams.iter().any(|(w, _)| !w.is_finite() || *w < 0.0) {
            return None;
        }
        let total: f64 = beams.iter().map(|(w, _)| w).sum();
        if total <= 0.0 {
            return None;
        }

        let moment0_env = beams
            .iter()
            .fold(PhaseVector::zeros(), |acc, (w, b)| acc + b.moment0() * *w)
            / total;
        let moment1_env = beams
            .iter()
            .fold(PhaseMatrix::zeros(), |acc, (w, b)| {
                let d = b.moment0() - moment0_env;
                acc + (b.state() + d * d.transpose()) * *w
            })
            / total;
        Some(Self {
            moment0_env,
            moment1_env,
        })
    }

    /// The envelope of a single beam: its own moments.
    pub fn of(state: &BeamState) -> Self {
        Self {
            moment0_env: *state.moment0(),
            moment1_env: *state.state(),
        }
    }

    /// Weighted mean of the first moments.
    pub fn moment0_env(&self) -> &PhaseVector {
        &self.moment0_env
    }

    /// Second moments about [`moment0_env`](Self::moment0_env).
    pub fn moment1_env(&self) -> &PhaseMatrix {
        &self.moment1_env
    }

    /// RMS size of the combined beam in each coordinate.
    pub fn moment0_rms(&self) -> PhaseVector {
        rms(&self.moment1_env)
    }
}
