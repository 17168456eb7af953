//! Reference-particle kinematics.
//!
//! [`ReferenceParticle`] holds the design particle's energy state. The
//! independent inputs are rest energy, kinetic energy, charge-to-mass
//! ratio, sampling frequency, and phase; total energy and the relativistic
//! factors are derived by [`recalc`](ReferenceParticle::recalc) and must be
//! refreshed whenever an input changes.
//!
//! A reference with zero rest energy is *unset*: `gamma` and `bg` fall back
//! to 1, so the momentum scale used by the transfer builders is exactly 1
//! and every energy-dependent coupling term vanishes.

use std::f64::consts::PI;

use crate::error::ElementError;

/// Metres to millimetres.
pub const M_TO_MM: f64 = 1e3;
/// MeV to eV.
pub const MEV_TO_EV: f64 = 1e6;
/// Speed of light [m/s].
pub const C0: f64 = 2.997_924_58e8;
/// Sampling frequency used when the machine declares no `Frf` [Hz].
pub const SAMPLE_FREQ_DEFAULT: f64 = 80.5e6;

/// Energy state of the design particle.
///
/// Energies are per nucleon, in eV/u.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReferenceParticle {
    /// Charge-to-mass ratio (Q/A). Zero when no charge state is selected.
    pub ion_z: f64,
    /// Rest energy [eV/u].
    pub ion_es: f64,
    /// Kinetic energy [eV/u].
    pub ion_ek: f64,
    /// Total energy [eV/u] (derived).
    pub ion_w: f64,
    /// Lorentz factor (derived).
    pub gamma: f64,
    /// Velocity over c (derived).
    pub beta: f64,
    /// `beta * gamma` (derived).
    pub bg: f64,
    /// Absolute synchronous phase [rad].
    pub phis: f64,
    /// Sampling frequency for phase bookkeeping [Hz].
    pub sample_freq: f64,
}

impl Default for ReferenceParticle {
    fn default() -> Self {
        Self::unset()
    }
}

impl ReferenceParticle {
    /// A reference with no rest energy and no kinetic energy.
    pub fn unset() -> Self {
        let mut r = Self {
            ion_z: 0.0,
            ion_es: 0.0,
            ion_ek: 0.0,
            ion_w: 0.0,
            gamma: 1.0,
            beta: 0.0,
            bg: 1.0,
            phis: 0.0,
            sample_freq: SAMPLE_FREQ_DEFAULT,
        };
        r.recalc();
        r
    }

    /// A reference particle with the given rest and kinetic energy [eV/u].
    pub fn new(ion_es: f64, ion_ek: f64) -> Result<Self, ElementError> {
        let mut r = Self {
            ion_es,
            ion_ek,
            ..Self::unset()
        };
        r.validate()?;
        r.recalc();
        Ok(r)
    }

    /// Builder-style charge-to-mass ratio.
    #[must_use]
    pub fn with_charge(mut self, ion_z: f64) -> Self {
        self.ion_z = ion_z;
        self
    }

    /// Builder-style sampling frequency.
    #[must_use]
    pub fn with_sample_freq(mut self, sample_freq: f64) -> Self {
        self.sample_freq = sample_freq;
        self
    }

    /// Check the independent inputs.
    pub fn validate(&self) -> Result<(), ElementError> {
        let inputs = [
            ("IonEs", self.ion_es),
            ("IonEk", self.ion_ek),
            ("IonZ", self.ion_z),
            ("phis", self.phis),
            ("SampleFreq", self.sample_freq),
        ];
        for (name, v) in inputs {
            if !v.is_finite() {
                return Err(ElementError::kinematics(format!("{name} is not finite ({v})")));
            }
        }
        if self.ion_es < 0.0 {
            return Err(ElementError::kinematics(format!(
                "IonEs must not be negative, got {}",
                self.ion_es
            )));
        }
        if self.ion_ek < 0.0 {
            return Err(ElementError::kinematics(format!(
                "IonEk must not be negative, got {}",
                self.ion_ek
            )));
        }
        if self.ion_es == 0.0 && self.ion_ek != 0.0 {
            return Err(ElementError::kinematics(format!(
                "IonEk = {} requires a positive IonEs",
                self.ion_ek
            )));
        }
        if self.sample_freq < 0.0 {
            return Err(ElementError::kinematics(format!(
                "sampling frequency must not be negative, got {}",
                self.sample_freq
            )));
        }
        Ok(())
    }

    /// Recompute total energy and the relativistic factors.
    pub fn recalc(&mut self) {
        self.ion_w = self.ion_es + self.ion_ek;
        self.gamma = if self.ion_es != 0.0 {
            self.ion_w / self.ion_es
        } else {
            1.0
        };
        self.beta = (1.0 - 1.0 / (self.gamma * self.gamma)).sqrt();
        self.bg = if self.beta != 0.0 {
            self.beta * self.gamma
        } else {
            1.0
        };
    }

    /// Whether a rest energy has been supplied.
    pub fn is_set(&self) -> bool {
        self.ion_es > 0.0
    }

    /// Replace the kinetic energy and refresh derived values.
    pub fn set_kinetic_energy(&mut self, ion_ek: f64) -> Result<(), ElementError> {
        let previous = self.ion_ek;
        self.ion_ek = ion_ek;
        if let Err(e) = self.validate() {
            self.ion_ek = previous;
            return Err(e);
        }
        self.recalc();
        Ok(())
    }

    /// Scale applied to position/momentum coupling: `1 / (bg² · gamma)`.
    pub fn momentum_scale(&self) -> f64 {
        1.0 / (self.bg * self.bg * self.gamma)
    }

    /// Magnetic rigidity [T·m].
    pub fn brho(&self) -> Result<f64, ElementError> {
        if !self.is_set() || self.beta == 0.0 {
            return Err(ElementError::kinematics(
                "magnetic rigidity needs a moving reference particle (IonEs, IonEk)",
            ));
        }
        if self.ion_z == 0.0 {
            return Err(ElementError::kinematics(
                "magnetic rigidity needs a charge state (IonZ)",
            ));
        }
        Ok(self.beta * self.ion_w / (C0 * self.ion_z))
    }

    /// RF phase advance per millimetre of path [rad/mm].
    ///
    /// Zero for a reference at rest or without a sampling frequency.
    pub fn wave_number(&self) -> f64 {
        if self.beta == 0.0 || self.sample_freq == 0.0 {
            return 0.0;
        }
        2.0 * PI * self.sample_freq / (self.beta * C0 * M_TO_MM)
    }

    /// Relative momentum deviation per MeV/u of energy deviation.
    ///
    /// Zero for an unset reference.
    pub fn delta_per_mev(&self) -> f64 {
        if !self.is_set() || self.beta == 0.0 {
            return 0.0;
        }
        MEV_TO_EV / (self.beta * self.beta * self.gamma * self.ion_es)
    }

    /// Advance the synchronous phase over `length` metres of drift.
    pub fn advance_phase(&mut self, length: f64) {
        self.phis += self.wave_number() * length * M_TO_MM;
    }

    /// Whether two references share every input a transfer matrix can
    /// depend on. The synchronous phase is not compared.
    pub fn same_optics(&self, other: &Self) -> bool {
        self.ion_es == other.ion_es
            && self.ion_ek == other.ion_ek
            && self.ion_z == other.ion_z
            && self.sample_freq == other.sample_freq
    }
}
