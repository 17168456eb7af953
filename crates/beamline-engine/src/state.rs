//! The beam state carried through a lattice.

use beamline_core::{PhaseMatrix, PhaseVector, ReferenceParticle};
use beamline_element::Source;

/// First and second moments of the beam plus reference kinematics.
///
/// A `BeamState` is a plain value owned by the caller: the machine that
/// allocated it keeps no reference to it, and propagation mutates it in
/// place.
#[derive(Clone, Debug, PartialEq)]
pub struct BeamState {
    moment0: PhaseVector,
    state: PhaseMatrix,
    reference: ReferenceParticle,
    pos: f64,
    next_element: usize,
}

impl BeamState {
    /// A state at the lattice entrance with the given moments.
    pub fn new(moment0: PhaseVector, state: PhaseMatrix, reference: ReferenceParticle) -> Self {
        Self {
            moment0,
            state,
            reference,
            pos: 0.0,
            next_element: 0,
        }
    }

    /// All-zero moments and an unset reference.
    pub fn zeroed() -> Self {
        Self::new(
            PhaseVector::zeros(),
            PhaseMatrix::zeros(),
            ReferenceParticle::unset(),
        )
    }

    // ── Moments ────────────────────────────────────────────────────

    /// First moments `[x, px, y, py, phase, energy, 1]`.
    pub fn moment0(&self) -> &PhaseVector {
        &self.moment0
    }

    /// Mutable first moments.
    pub fn moment0_mut(&mut self) -> &mut PhaseVector {
        &mut self.moment0
    }

    /// Second moments.
    pub fn state(&self) -> &PhaseMatrix {
        &self.state
    }

    /// Mutable second moments.
    pub fn state_mut(&mut self) -> &mut PhaseMatrix {
        &mut self.state
    }

    /// Whether `state` is symmetric to within `tol`, relative to its
    /// largest entry (absolute below 1).
    pub fn is_symmetric(&self, tol: f64) -> bool {
        (self.state - self.state.transpose()).amax() <= tol * self.state.amax().max(1.0)
    }

    /// RMS beam size in each coordinate: the square root of the diagonal
    /// of `state`. Negative diagonal entries count as zero.
    pub fn moment0_rms(&self) -> PhaseVector {
        rms(&self.state)
    }

    // ── Kinematics ─────────────────────────────────────────────────

    /// Reference particle.
    pub fn reference(&self) -> &ReferenceParticle {
        &self.reference
    }

    /// Mutable reference particle. Call
    /// [`ReferenceParticle::recalc`] after changing an input.
    pub fn reference_mut(&mut self) -> &mut ReferenceParticle {
        &mut self.reference
    }

    /// Rest energy [eV/u].
    pub fn ion_es(&self) -> f64 {
        self.reference.ion_es
    }

    /// Kinetic energy [eV/u].
    pub fn ion_ek(&self) -> f64 {
        self.reference.ion_ek
    }

    /// Alias of [`ion_ek`](Self::ion_ek).
    pub fn ekinetic(&self) -> f64 {
        self.reference.ion_ek
    }

    /// Total energy [eV/u].
    pub fn ion_w(&self) -> f64 {
        self.reference.ion_w
    }

    /// Charge-to-mass ratio.
    pub fn ion_z(&self) -> f64 {
        self.reference.ion_z
    }

    /// Lorentz factor.
    pub fn gamma(&self) -> f64 {
        self.reference.gamma
    }

    /// Velocity over c.
    pub fn beta(&self) -> f64 {
        self.reference.beta
    }

    /// `beta * gamma`.
    pub fn bg(&self) -> f64 {
        self.reference.bg
    }

    /// Absolute synchronous phase [rad].
    pub fn phis(&self) -> f64 {
        self.reference.phis
    }

    // ── Position ───────────────────────────────────────────────────

    /// Accumulated path length [m].
    pub fn pos(&self) -> f64 {
        self.pos
    }

    /// Index of the next element to apply.
    pub fn next_element(&self) -> usize {
        self.next_element
    }

    // ── Updates ────────────────────────────────────────────────────

    /// Apply a linear map: `moment0 ← T·moment0`, `state ← T·state·Tᵗ`.
    pub fn apply_transfer(&mut self, t: &PhaseMatrix) {
        self.moment0 = t * self.moment0;
        self.state = t * self.state * t.transpose();
    }

    /// Reset from a source element: declared moments replace the current
    /// ones and the reference is replaced wholesale.
    pub(crate) fn reset_from(&mut self, source: &Source) {
        if let Some(m) = source.moment0() {
            self.moment0 = *m;
        }
        if let Some(s) = source.state() {
            self.state = *s;
        }
        self.reference = *source.reference();
    }

    pub(crate) fn advance_position(&mut self, length: f64) {
        self.pos += length;
    }

    pub(crate) fn set_next_element(&mut self, index: usize) {
        self.next_element = index;
    }
}

impl Default for BeamState {
    fn default() -> Self {
        Self::zeroed()
    }
}

pub(crate) fn rms(state: &PhaseMatrix) -> PhaseVector {
    state.diagonal().map(|v| v.max(0.0).sqrt())
}
