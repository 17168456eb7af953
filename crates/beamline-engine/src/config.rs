//! Machine configuration and error types.
//!
//! [`MachineConfig`] is the structured input for constructing a
//! [`Machine`](crate::Machine): a global parameter scope (ion species,
//! RF frequency, charge-state tables) plus the ordered element list.
//! [`validate()`](MachineConfig::validate) checks the parts that do not
//! depend on element decoding.

use std::error::Error;
use std::fmt;

use beamline_core::{ElementError, ParamLookup, Params, Value};

// ── SimType ────────────────────────────────────────────────────────

/// Simulation type named by the `sim_type` global.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimType {
    /// First and second moments of a single charge state.
    ///
    /// Accepts both `MomentMatrix` and `MomentMatrix2`.
    MomentMatrix,
}

impl SimType {
    /// Parse a `sim_type` string.
    pub fn parse(s: &str) -> Result<Self, MachineError> {
        match s {
            "MomentMatrix" | "MomentMatrix2" => Ok(Self::MomentMatrix),
            other => Err(MachineError::UnsupportedSimType {
                sim_type: other.to_string(),
            }),
        }
    }

    /// Canonical name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MomentMatrix => "MomentMatrix",
        }
    }
}

impl fmt::Display for SimType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── MachineError ───────────────────────────────────────────────────

/// Errors from machine construction, state allocation and reconfiguration.
#[derive(Clone, Debug, PartialEq)]
pub enum MachineError {
    /// `sim_type` names an unsupported simulation.
    UnsupportedSimType {
        /// The rejected value.
        sim_type: String,
    },
    /// An element failed to decode.
    InvalidElement {
        /// Position of the element in the lattice.
        index: usize,
        /// Element name, or empty if the name itself was missing.
        name: String,
        /// The underlying problem.
        reason: ElementError,
    },
    /// Global or state-allocation parameters are malformed.
    InvalidParameters(ElementError),
    /// An element index is beyond the lattice.
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// Number of elements in the lattice.
        len: usize,
    },
    /// Reconfiguration tried to change an element's type.
    TypeChangeRejected {
        /// Position of the element.
        index: usize,
        /// Current type.
        from: String,
        /// Requested type.
        to: String,
    },
}

impl fmt::Display for MachineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedSimType { sim_type } => {
                write!(f, "unsupported sim_type '{sim_type}'")
            }
            Self::InvalidElement {
                index,
                name,
                reason,
            } => write!(f, "element {index} ('{name}'): {reason}"),
            Self::InvalidParameters(e) => write!(f, "invalid parameters: {e}"),
            Self::IndexOutOfRange { index, len } => {
                write!(f, "element index {index} out of range for lattice of {len}")
            }
            Self::TypeChangeRejected { index, from, to } => write!(
                f,
                "element {index} is a '{from}' and cannot be reconfigured as '{to}'"
            ),
        }
    }
}

impl Error for MachineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidElement { reason, .. } => Some(reason),
            Self::InvalidParameters(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ElementError> for MachineError {
    fn from(e: ElementError) -> Self {
        Self::InvalidParameters(e)
    }
}

// ── PropagateError ─────────────────────────────────────────────────

/// Errors from [`Machine::propagate`](crate::Machine::propagate) and friends.
///
/// On failure the beam state reflects every element applied before the
/// failing one, and its `next_element` points at the failing element.
#[derive(Clone, Debug, PartialEq)]
pub enum PropagateError {
    /// A range bound is beyond the lattice.
    IndexOutOfRange {
        /// The offending bound.
        index: usize,
        /// Number of elements in the lattice.
        len: usize,
    },
    /// `start` is past `end`.
    InvalidRange {
        /// First element requested.
        start: usize,
        /// One past the last element requested.
        end: usize,
    },
    /// An element could not be applied.
    ElementFailed {
        /// Position of the element.
        index: usize,
        /// Element name.
        name: String,
        /// The underlying problem.
        reason: ElementError,
    },
}

impl fmt::Display for PropagateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IndexOutOfRange { index, len } => {
                write!(f, "element index {index} out of range for lattice of {len}")
            }
            Self::InvalidRange { start, end } => {
                write!(f, "propagation range starts at {start} but ends at {end}")
            }
            Self::ElementFailed {
                index,
                name,
                reason,
            } => write!(f, "element {index} ('{name}') failed: {reason}"),
        }
    }
}

impl Error for PropagateError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::ElementFailed { reason, .. } => Some(reason),
            _ => None,
        }
    }
}

// ── MachineConfig ──────────────────────────────────────────────────

/// Structured machine description.
///
/// Global parameters act as an outer scope for every element: a key an
/// element does not define is looked up here. `sim_type` lives in the
/// globals as well.
///
/// ```
/// use beamline_core::Params;
/// use beamline_engine::MachineConfig;
///
/// let config = MachineConfig::new()
///     .with_global("IonEs", 931.494e6)
///     .with_element(Params::new().with("name", "d1").with("type", "drift").with("L", 1.0));
/// assert_eq!(config.elements.len(), 1);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MachineConfig {
    /// Global scope.
    pub globals: Params,
    /// Elements in propagation order.
    pub elements: Vec<Params>,
}

impl MachineConfig {
    /// An empty `MomentMatrix` configuration.
    pub fn new() -> Self {
        Self {
            globals: Params::new().with("sim_type", SimType::MomentMatrix.as_str()),
            elements: Vec::new(),
        }
    }

    /// Builder-style global parameter.
    #[must_use]
    pub fn with_global(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.globals.insert(name, value);
        self
    }

    /// Builder-style element, appended at the end of the lattice.
    #[must_use]
    pub fn with_element(mut self, element: Params) -> Self {
        self.elements.push(element);
        self
    }

    /// Overlay `extra` onto the globals (e.g. a `cstate` selection).
    #[must_use]
    pub fn with_overrides(mut self, extra: &Params) -> Self {
        self.globals = self.globals.merged(extra);
        self
    }

    /// The declared simulation type. Absent means `MomentMatrix`.
    pub fn sim_type(&self) -> Result<SimType, MachineError> {
        match self.globals.text("sim_type")? {
            Some(s) => SimType::parse(s),
            None => Ok(SimType::MomentMatrix),
        }
    }

    /// Check the simulation type and the charge-state selector.
    pub fn validate(&self) -> Result<(), MachineError> {
        self.sim_type()?;
        beamline_element::charge_state(&self.globals)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sim_type_aliases() {
        assert_eq!(SimType::parse("MomentMatrix").unwrap(), SimType::MomentMatrix);
        assert_eq!(SimType::parse("MomentMatrix2").unwrap(), SimType::MomentMatrix);
        assert_eq!(
            SimType::parse("Vector").unwrap_err(),
            MachineError::UnsupportedSimType {
                sim_type: "Vector".into()
            }
        );
    }

    #[test]
    fn absent_sim_type_defaults() {
        let config = MachineConfig::default();
        assert_eq!(config.sim_type().unwrap(), SimType::MomentMatrix);
    }

    #[test]
    fn overrides_win() {
        let config = MachineConfig::new()
            .with_global("cstate", 0)
            .with_overrides(&Params::new().with("cstate", 1));
        assert_eq!(config.globals.scalar("cstate").unwrap(), Some(1.0));
    }

    #[test]
    fn validate_rejects_bad_selector() {
        let config = MachineConfig::new().with_global("cstate", -1);
        assert!(matches!(
            config.validate(),
            Err(MachineError::InvalidParameters(ElementError::InvalidParameter { .. }))
        ));
        let config = MachineConfig::new().with_global("sim_type", 3.0);
        assert!(matches!(
            config.validate(),
            Err(MachineError::InvalidParameters(ElementError::WrongParameterType { .. }))
        ));
    }

    #[test]
    fn error_sources_chain() {
        let e = PropagateError::ElementFailed {
            index: 2,
            name: "cav1".into(),
            reason: ElementError::kinematics("no charge"),
        };
        assert!(e.source().is_some());
        assert_eq!(
            e.to_string(),
            "element 2 ('cav1') failed: invalid kinematics: no charge"
        );
        let e = MachineError::IndexOutOfRange { index: 9, len: 3 };
        assert!(e.source().is_none());
    }
}
