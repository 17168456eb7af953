//! Strongly-typed element index.

use std::fmt;

/// Position of an element within a lattice.
///
/// Elements are numbered in propagation order starting at zero.
/// `ElementIndex(n)` is the n-th entry of the machine's `elements` list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementIndex(pub usize);

impl fmt::Display for ElementIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<usize> for ElementIndex {
    fn from(v: usize) -> Self {
        Self(v)
    }
}

impl From<ElementIndex> for usize {
    fn from(v: ElementIndex) -> Self {
        v.0
    }
}
