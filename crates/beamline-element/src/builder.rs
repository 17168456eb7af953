//! The [`TransferBuilder`] trait.
//!
//! A transfer builder turns an element's decoded parameters and the
//! incoming reference particle into a 7×7 transfer matrix. Builders hold
//! no mutable state: the same parameters and the same reference always
//! produce the same matrix, which is what makes the engine's per-element
//! cache sound.

use beamline_core::{ElementError, PhaseMatrix, ReferenceParticle};

/// A deterministic, stateless transfer-matrix builder.
///
/// # Contract
///
/// - [`transfer`](Self::transfer) MUST be a pure function of `&self` and
///   the reference fields compared by
///   [`ReferenceParticle::same_optics`].
/// - [`advance_reference`](Self::advance_reference) moves the reference
///   from the element's entrance to its exit. The default advances the
///   synchronous phase over [`length`](Self::length); energy-changing
///   elements override it.
///
/// # Examples
///
/// ```
/// use beamline_core::{ReferenceParticle, PS_X, PS_PX};
/// use beamline_element::{Drift, TransferBuilder};
///
/// let drift = Drift::new(1.234);
/// let t = drift.transfer(&ReferenceParticle::unset()).unwrap();
/// assert_eq!(t[(PS_X, PS_PX)], 1234.0);
/// assert_eq!(drift.type_name(), "drift");
/// ```
pub trait TransferBuilder {
    /// Element type as written in lattice files.
    fn type_name(&self) -> &'static str;

    /// Physical length [m]. Added to the beam's path position.
    fn length(&self) -> f64;

    /// Build the transfer matrix for a beam entering with `reference`.
    fn transfer(&self, reference: &ReferenceParticle) -> Result<PhaseMatrix, ElementError>;

    /// Advance `reference` through the element.
    fn advance_reference(&self, reference: &mut ReferenceParticle) -> Result<(), ElementError> {
        reference.advance_phase(self.length());
        Ok(())
    }
}
