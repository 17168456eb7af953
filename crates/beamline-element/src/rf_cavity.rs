//! Thin-gap RF cavity.

use beamline_core::{
    ElementError, ParamLookup, PhaseMatrix, ReferenceParticle, MEV_TO_EV, M_TO_MM, PS_PS, PS_PX,
    PS_PY, PS_S,
};

use crate::builder::TransferBuilder;
use crate::planes::drift_matrix;

/// An accelerating gap at the centre of a drift of length `L` [m].
///
/// The reference gains `IonZ·V·cos(phi)` eV/u at the gap. Off-phase
/// particles see the slope of the RF wave (longitudinal focusing for
/// `phi < 0`), and transverse momenta shrink by `bg_in/bg_out`.
#[derive(Clone, Debug, PartialEq)]
pub struct RfCavity {
    length: f64,
    voltage: f64,
    phase_deg: f64,
    frequency: Option<f64>,
}

impl RfCavity {
    /// A cavity with the given length [m], effective voltage [V] and
    /// synchronous phase [deg] relative to crest.
    pub fn new(length: f64, voltage: f64, phase_deg: f64) -> Self {
        Self {
            length,
            voltage,
            phase_deg,
            frequency: None,
        }
    }

    /// Builder-style RF frequency [Hz]. Defaults to the sampling frequency.
    #[must_use]
    pub fn with_frequency(mut self, frequency: f64) -> Self {
        self.frequency = Some(frequency);
        self
    }

    /// Decode from parameters. `V` is required; `L` and `phi` default to
    /// 0 and `f` to the sampling frequency.
    pub fn from_params(p: &impl ParamLookup) -> Result<Self, ElementError> {
        let mut cav = Self::new(
            p.scalar_or("L", 0.0)?,
            p.require_scalar("V")?,
            p.scalar_or("phi", 0.0)?,
        );
        if let Some(f) = p.scalar("f")? {
            if f <= 0.0 {
                return Err(ElementError::invalid("f", format!("must be positive, got {f}")));
            }
            cav = cav.with_frequency(f);
        }
        Ok(cav)
    }

    /// Energy gain of the reference [eV/u].
    pub fn energy_gain(&self, reference: &ReferenceParticle) -> f64 {
        reference.ion_z * self.voltage * self.phase_deg.to_radians().cos()
    }

    fn check_reference(&self, reference: &ReferenceParticle) -> Result<(), ElementError> {
        if !reference.is_set() {
            return Err(ElementError::kinematics(
                "an RF cavity needs a reference particle (IonEs)",
            ));
        }
        if reference.ion_z == 0.0 {
            return Err(ElementError::kinematics(
                "an RF cavity needs a charge state (IonZ)",
            ));
        }
        Ok(())
    }

    /// The reference at the cavity exit, ignoring phase.
    fn exit_reference(&self, reference: &ReferenceParticle) -> Result<ReferenceParticle, ElementError> {
        let mut out = *reference;
        out.set_kinetic_energy(reference.ion_ek + self.energy_gain(reference))
            .map_err(|_| {
                ElementError::kinematics(format!(
                    "RF cavity decelerates the reference below rest (IonEk {} eV/u)",
                    reference.ion_ek
                ))
            })?;
        Ok(out)
    }

    /// Cavity phase per unit of sampled phase.
    fn harmonic(&self, reference: &ReferenceParticle) -> f64 {
        match self.frequency {
            Some(f) if reference.sample_freq > 0.0 => f / reference.sample_freq,
            _ => 1.0,
        }
    }
}

impl TransferBuilder for RfCavity {
    fn type_name(&self) -> &'static str {
        "rfcavity"
    }

    fn length(&self) -> f64 {
        self.length
    }

    fn transfer(&self, reference: &ReferenceParticle) -> Result<PhaseMatrix, ElementError> {
        let half = self.length * M_TO_MM / 2.0;
        if self.voltage == 0.0 {
            return Ok(drift_matrix(2.0 * half, reference.momentum_scale()));
        }
        self.check_reference(reference)?;
        let exit = self.exit_reference(reference)?;

        let mut kick = PhaseMatrix::identity();
        let damping = reference.bg / exit.bg;
        kick[(PS_PX, PS_PX)] = damping;
        kick[(PS_PY, PS_PY)] = damping;
        kick[(PS_PS, PS_S)] = -reference.ion_z
            * self.voltage
            * self.phase_deg.to_radians().sin()
            * self.harmonic(reference)
            / MEV_TO_EV;

        let entry = drift_matrix(half, reference.momentum_scale());
        let exit = drift_matrix(half, exit.momentum_scale());
        Ok(exit * kick * entry)
    }

    fn advance_reference(&self, reference: &mut ReferenceParticle) -> Result<(), ElementError> {
        if self.voltage == 0.0 {
            reference.advance_phase(self.length);
            return Ok(());
        }
        self.check_reference(reference)?;
        let exit = self.exit_reference(reference)?;
        reference.advance_phase(self.length / 2.0);
        reference.ion_ek = exit.ion_ek;
        reference.recalc();
        reference.advance_phase(self.length / 2.0);
        Ok(())
    }
}
