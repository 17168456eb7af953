//! The closed set of element kinds.

use beamline_core::{ElementError, ParamLookup};

use crate::builder::TransferBuilder;
use crate::drift::Drift;
use crate::generic::{Generic, Marker};
use crate::quadrupole::Quadrupole;
use crate::rf_cavity::RfCavity;
use crate::sbend::SBend;
use crate::solenoid::Solenoid;
use crate::source::Source;

/// What applying an element does to a beam.
#[derive(Clone, Copy)]
pub enum Step<'a> {
    /// Replace the beam state from a source.
    Reset(&'a Source),
    /// Transform the beam state with a transfer matrix.
    Transfer(&'a dyn TransferBuilder),
}

/// A decoded element, carrying only what its builder needs.
///
/// Dispatch is an exhaustive `match`: adding a variant is a compile-time
/// checked change everywhere elements are handled.
#[derive(Clone, Debug, PartialEq)]
pub enum ElementKind {
    /// Replaces the beam state.
    Source(Source),
    /// Identity.
    Marker(Marker),
    /// User-supplied matrix.
    Generic(Generic),
    /// Field-free drift.
    Drift(Drift),
    /// Sector bend.
    SBend(SBend),
    /// Quadrupole.
    Quadrupole(Quadrupole),
    /// Solenoid.
    Solenoid(Solenoid),
    /// Thin-gap RF cavity.
    RfCavity(RfCavity),
}

impl ElementKind {
    /// Every accepted `type` string.
    pub const TYPE_NAMES: [&'static str; 8] = [
        "source",
        "marker",
        "generic",
        "drift",
        "sbend",
        "quadrupole",
        "solenoid",
        "rfcavity",
    ];

    /// Decode the element of type `type_name` from `p`.
    pub fn from_params(type_name: &str, p: &impl ParamLookup) -> Result<Self, ElementError> {
        Ok(match type_name {
            "source" => Self::Source(Source::from_params(p)?),
            "marker" => Self::Marker(Marker::from_params(p)?),
            "generic" => Self::Generic(Generic::from_params(p)?),
            "drift" => Self::Drift(Drift::from_params(p)?),
            "sbend" => Self::SBend(SBend::from_params(p)?),
            "quadrupole" => Self::Quadrupole(Quadrupole::from_params(p)?),
            "solenoid" => Self::Solenoid(Solenoid::from_params(p)?),
            "rfcavity" => Self::RfCavity(RfCavity::from_params(p)?),
            other => {
                return Err(ElementError::UnknownElementType {
                    type_name: other.to_string(),
                })
            }
        })
    }

    /// How this element acts on a beam.
    pub fn step(&self) -> Step<'_> {
        match self {
            Self::Source(s) => Step::Reset(s),
            Self::Marker(b) => Step::Transfer(b),
            Self::Generic(b) => Step::Transfer(b),
            Self::Drift(b) => Step::Transfer(b),
            Self::SBend(b) => Step::Transfer(b),
            Self::Quadrupole(b) => Step::Transfer(b),
            Self::Solenoid(b) => Step::Transfer(b),
            Self::RfCavity(b) => Step::Transfer(b),
        }
    }

    /// The transfer builder, or `None` for a [`Source`].
    pub fn builder(&self) -> Option<&dyn TransferBuilder> {
        match self.step() {
            Step::Reset(_) => None,
            Step::Transfer(b) => Some(b),
        }
    }

    /// Element type as written in lattice files.
    pub fn type_name(&self) -> &'static str {
        match self.builder() {
            Some(b) => b.type_name(),
            None => "source",
        }
    }

    /// Physical length [m]. Zero for a source.
    pub fn length(&self) -> f64 {
        self.builder().map_or(0.0, |b| b.length())
    }
}
