//! Source element: replaces the beam state instead of transforming it.
//!
//! Per-charge-state initial conditions are resolved here, once, when the
//! element is decoded: `vector_variable = "IV"` with `cstate = 1` binds
//! the array named `IV1`, and `IonChargeStates[cstate]` becomes `IonZ`.

use beamline_core::{
    matrix_from_row_major, vector_from_slice, ElementError, ParamLookup, PhaseMatrix, PhaseVector,
    ReferenceParticle, PHASE_DIM, SAMPLE_FREQ_DEFAULT,
};

/// Initial beam conditions.
///
/// `moment0` and `state` are optional: a source that declares only one of
/// them leaves the other part of the beam untouched. The reference
/// particle is always reset.
#[derive(Clone, Debug, PartialEq)]
pub struct Source {
    moment0: Option<PhaseVector>,
    state: Option<PhaseMatrix>,
    reference: ReferenceParticle,
}

impl Source {
    /// Decode from parameters (normally an element scope that falls back
    /// to the machine globals).
    pub fn from_params(p: &impl ParamLookup) -> Result<Self, ElementError> {
        let cstate = charge_state(p)?;

        let moment0 = match p.text("vector_variable")? {
            Some(var) => Some(indexed_array(p, var, cstate, PHASE_DIM)?),
            None => p.array_exact("moment0", PHASE_DIM)?,
        }
        .map(|v| vector_from_slice("moment0", v))
        .transpose()?;

        let state = match p.text("matrix_variable")? {
            Some(var) => Some(indexed_array(p, var, cstate, PHASE_DIM * PHASE_DIM)?),
            None => p.array_exact("initial", PHASE_DIM * PHASE_DIM)?,
        }
        .map(|v| matrix_from_row_major("initial", v))
        .transpose()?;

        let ion_z = match p.array("IonChargeStates")? {
            Some(states) => states.get(cstate).copied().ok_or_else(|| {
                ElementError::invalid(
                    "cstate",
                    format!(
                        "selects charge state {cstate} but IonChargeStates has {} entries",
                        states.len()
                    ),
                )
            })?,
            None => p.scalar_or("IonZ", 0.0)?,
        };

        let mut reference = ReferenceParticle::new(
            p.scalar_or("IonEs", 0.0)?,
            p.scalar_or("IonEk", 0.0)?,
        )?
        .with_charge(ion_z)
        .with_sample_freq(p.scalar_or("Frf", SAMPLE_FREQ_DEFAULT)?);
        reference.phis = p.scalar_or("phis", 0.0)?;
        reference.validate()?;

        Ok(Self {
            moment0,
            state,
            reference,
        })
    }

    /// Initial first moments, if declared.
    pub fn moment0(&self) -> Option<&PhaseVector> {
        self.moment0.as_ref()
    }

    /// Initial second moments, if declared.
    pub fn state(&self) -> Option<&PhaseMatrix> {
        self.state.as_ref()
    }

    /// Reference particle the beam is reset to.
    pub fn reference(&self) -> &ReferenceParticle {
        &self.reference
    }
}

/// The charge-state selector `cstate` (default 0).
pub fn charge_state(p: &impl ParamLookup) -> Result<usize, ElementError> {
    let raw = p.scalar_or("cstate", 0.0)?;
    if !raw.is_finite() || raw < 0.0 || raw.fract() != 0.0 {
        return Err(ElementError::invalid(
            "cstate",
            format!("must be a non-negative integer, got {raw}"),
        ));
    }
    Ok(raw as usize)
}

/// The array `<var><cstate>`, which must exist with exactly `len` entries.
fn indexed_array<'a, P: ParamLookup>(
    p: &'a P,
    var: &str,
    cstate: usize,
    len: usize,
) -> Result<&'a [f64], ElementError> {
    let name = format!("{var}{cstate}");
    p.array_exact(&name, len)?
        .ok_or(ElementError::MissingParameter { name })
}
