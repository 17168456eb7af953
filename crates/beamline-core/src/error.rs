//! Error types shared by element construction and transfer building.
//!
//! [`ElementError`] covers everything that can go wrong while turning an
//! element's parameter map into a typed element, or while building its
//! transfer matrix against a reference particle. The engine wraps it with
//! the element index and name before surfacing it to callers.

use std::error::Error;
use std::fmt;

/// Errors from element parameter decoding and transfer building.
#[derive(Clone, Debug, PartialEq)]
pub enum ElementError {
    /// The `type` string does not name a supported element kind.
    UnknownElementType {
        /// The unrecognised type string.
        type_name: String,
    },
    /// A parameter required by the element's type is absent.
    MissingParameter {
        /// Name of the missing parameter.
        name: String,
    },
    /// A vector or matrix parameter has the wrong number of entries.
    ParameterArityMismatch {
        /// Name of the parameter.
        name: String,
        /// Required number of entries (7 for vectors, 49 for matrices).
        expected: usize,
        /// Number of entries supplied.
        found: usize,
    },
    /// A parameter is present but holds the wrong kind of value.
    WrongParameterType {
        /// Name of the parameter.
        name: String,
        /// Human-readable description of the expected value kind.
        expected: &'static str,
    },
    /// A parameter has the right shape but an unusable value.
    InvalidParameter {
        /// Name of the parameter.
        name: String,
        /// Description of the problem.
        reason: String,
    },
    /// Reference-particle kinematics are undefined or unusable
    /// (e.g. negative rest energy, or rigidity needed but unavailable).
    InvalidKinematics {
        /// Description of the problem.
        reason: String,
    },
}

impl ElementError {
    pub(crate) fn missing(name: &str) -> Self {
        Self::MissingParameter {
            name: name.to_string(),
        }
    }

    /// Shorthand for [`ElementError::InvalidKinematics`].
    pub fn kinematics(reason: impl Into<String>) -> Self {
        Self::InvalidKinematics {
            reason: reason.into(),
        }
    }

    /// Shorthand for [`ElementError::InvalidParameter`].
    pub fn invalid(name: &str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ElementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownElementType { type_name } => {
                write!(f, "unknown element type '{type_name}'")
            }
            Self::MissingParameter { name } => write!(f, "missing parameter '{name}'"),
            Self::ParameterArityMismatch {
                name,
                expected,
                found,
            } => {
                write!(
                    f,
                    "parameter '{name}' must have {expected} entries, got {found}"
                )
            }
            Self::WrongParameterType { name, expected } => {
                write!(f, "parameter '{name}' must be {expected}")
            }
            Self::InvalidParameter { name, reason } => {
                write!(f, "invalid parameter '{name}': {reason}")
            }
            Self::InvalidKinematics { reason } => write!(f, "invalid kinematics: {reason}"),
        }
    }
}

impl Error for ElementError {}
