//! Parameter values: scalars, flat numeric arrays, and strings.

use smallvec::SmallVec;
use std::fmt;

/// Inline capacity for array values. Phase-space vectors (7 entries)
/// stay on the stack; 7×7 matrices spill to the heap.
pub type ArrayStorage = SmallVec<[f64; 8]>;

/// A single configuration value.
///
/// Lattice descriptions carry three kinds of values: plain numbers
/// (`L`, `K`, `IonEs`), flat numeric arrays (`transfer`, `initial`,
/// `moment0`, `IonChargeStates`), and strings (`type`, `name`,
/// `vector_variable`).
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// A single number.
    Scalar(f64),
    /// A flat numeric array (matrices are stored row-major).
    Array(ArrayStorage),
    /// A string.
    Text(String),
}

impl Value {
    /// The value as a scalar, if it is one.
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Self::Scalar(v) => Some(*v),
            _ => None,
        }
    }

    /// The value as a flat array, if it is one.
    pub fn as_array(&self) -> Option<&[f64]> {
        match self {
            Self::Array(v) => Some(v.as_slice()),
            _ => None,
        }
    }

    /// The value as a string, if it is one.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Short name of the value kind, for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Scalar(_) => "scalar",
            Self::Array(_) => "array",
            Self::Text(_) => "string",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(v) => write!(f, "{v}"),
            Self::Array(values) => {
                write!(f, "[")?;
                for (i, v) in values.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{v}")?;
                }
                write!(f, "]")
            }
            Self::Text(s) => write!(f, "\"{s}\""),
        }
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Scalar(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Scalar(f64::from(v))
    }
}

impl From<Vec<f64>> for Value {
    fn from(v: Vec<f64>) -> Self {
        Self::Array(ArrayStorage::from_vec(v))
    }
}

impl From<&[f64]> for Value {
    fn from(v: &[f64]) -> Self {
        Self::Array(ArrayStorage::from_slice(v))
    }
}

impl<const N: usize> From<[f64; N]> for Value {
    fn from(v: [f64; N]) -> Self {
        Self::Array(v.iter().copied().collect())
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}
