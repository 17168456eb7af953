//! Ordered parameter maps and scoped, typed lookup.
//!
//! [`Params`] is the parameter set of one element (or the global scope of
//! a machine). Insertion order is preserved so that configurations render
//! back in the order they were written.
//!
//! Typed access goes through the [`ParamLookup`] trait, implemented both
//! by a plain [`Params`] and by a [`Scope`], which searches an element's
//! own parameters before falling back to the machine-wide globals.

use indexmap::IndexMap;

use crate::error::ElementError;
use crate::value::Value;

// ── ParamLookup ────────────────────────────────────────────────────

/// Typed parameter access over any key/value source.
///
/// Implementors provide [`lookup`](Self::lookup); the typed accessors are
/// derived from it and report shape problems as [`ElementError`]s.
pub trait ParamLookup {
    /// Raw value for `name`, if present.
    fn lookup(&self, name: &str) -> Option<&Value>;

    /// Whether `name` is present.
    fn has(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    /// Optional scalar parameter. NaN and infinities are rejected.
    fn scalar(&self, name: &str) -> Result<Option<f64>, ElementError> {
        match self.lookup(name) {
            None => Ok(None),
            Some(Value::Scalar(v)) => finite(name, &[*v]).map(|_| Some(*v)),
            Some(_) => Err(ElementError::WrongParameterType {
                name: name.to_string(),
                expected: "a scalar",
            }),
        }
    }

    /// Scalar parameter with a default for when it is absent.
    fn scalar_or(&self, name: &str, default: f64) -> Result<f64, ElementError> {
        Ok(self.scalar(name)?.unwrap_or(default))
    }

    /// Scalar parameter that must be present.
    fn require_scalar(&self, name: &str) -> Result<f64, ElementError> {
        self.scalar(name)?
            .ok_or_else(|| ElementError::missing(name))
    }

    /// Optional array parameter with exactly `len` finite entries.
    fn array_exact(&self, name: &str, len: usize) -> Result<Option<&[f64]>, ElementError> {
        match self.lookup(name) {
            None => Ok(None),
            Some(Value::Array(v)) if v.len() == len => finite(name, v).map(Some),
            Some(Value::Array(v)) => Err(ElementError::ParameterArityMismatch {
                name: name.to_string(),
                expected: len,
                found: v.len(),
            }),
            Some(_) => Err(ElementError::WrongParameterType {
                name: name.to_string(),
                expected: "a numeric array",
            }),
        }
    }

    /// Optional array parameter of any length, all entries finite.
    fn array(&self, name: &str) -> Result<Option<&[f64]>, ElementError> {
        match self.lookup(name) {
            None => Ok(None),
            Some(Value::Array(v)) => finite(name, v).map(Some),
            Some(_) => Err(ElementError::WrongParameterType {
                name: name.to_string(),
                expected: "a numeric array",
            }),
        }
    }

    /// Optional string parameter.
    fn text(&self, name: &str) -> Result<Option<&str>, ElementError> {
        match self.lookup(name) {
            None => Ok(None),
            Some(Value::Text(s)) => Ok(Some(s.as_str())),
            Some(_) => Err(ElementError::WrongParameterType {
                name: name.to_string(),
                expected: "a string",
            }),
        }
    }
}

fn finite<'a>(name: &str, values: &'a [f64]) -> Result<&'a [f64], ElementError> {
    match values.iter().position(|v| !v.is_finite()) {
        None => Ok(values),
        Some(i) if values.len() == 1 => Err(ElementError::invalid(
            name,
            format!("must be finite, got {}", values[i]),
        )),
        Some(i) => Err(ElementError::invalid(
            name,
            format!("entry {i} must be finite, got {}", values[i]),
        )),
    }
}

// ── Params ─────────────────────────────────────────────────────────

/// An insertion-ordered map of parameter names to [`Value`]s.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Params {
    entries: IndexMap<String, Value>,
}

impl Params {
    /// Create an empty parameter map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    ///
    /// ```
    /// use beamline_core::Params;
    ///
    /// let p = Params::new().with("type", "drift").with("L", 1.234);
    /// assert_eq!(p.len(), 2);
    /// ```
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Insert or replace a parameter, returning the previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.entries.insert(name.into(), value.into())
    }

    /// Raw value for `name`.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.get(name)
    }

    /// Remove a parameter, preserving the order of the others.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.entries.shift_remove(name)
    }

    /// Whether `name` is present.
    pub fn contains_key(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no parameters.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Parameter names in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// A copy of `self` with every entry of `overlay` inserted on top.
    #[must_use]
    pub fn merged(&self, overlay: &Params) -> Params {
        let mut out = self.clone();
        for (k, v) in overlay.iter() {
            out.insert(k, v.clone());
        }
        out
    }

    /// Look `name` up here first, then in `globals`.
    pub fn scoped<'a>(&'a self, globals: &'a Params) -> Scope<'a> {
        Scope {
            local: self,
            global: Some(globals),
        }
    }
}

impl ParamLookup for Params {
    fn lookup(&self, name: &str) -> Option<&Value> {
        self.get(name)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut p = Params::new();
        for (k, v) in iter {
            p.insert(k, v);
        }
        p
    }
}

// ── Scope ──────────────────────────────────────────────────────────

/// Two-level lookup: an element's own parameters shadowing the globals.
#[derive(Clone, Copy, Debug)]
pub struct Scope<'a> {
    local: &'a Params,
    global: Option<&'a Params>,
}

impl<'a> Scope<'a> {
    /// A scope with no global fallback.
    pub fn local_only(local: &'a Params) -> Self {
        Self {
            local,
            global: None,
        }
    }
}

impl ParamLookup for Scope<'_> {
    fn lookup(&self, name: &str) -> Option<&Value> {
        self.local
            .get(name)
            .or_else(|| self.global.and_then(|g| g.get(name)))
    }
}
