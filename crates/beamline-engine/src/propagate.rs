//! The element loop.

use tracing::{trace, warn};

use beamline_core::ElementError;
use beamline_element::{Element, Step};

use crate::cache::TransferCache;
use crate::config::PropagateError;
use crate::lattice::Lattice;
use crate::state::BeamState;

/// Apply elements `start..end` of `lattice` to `state`.
///
/// Bounds are checked before any element runs. On an element failure the
/// state keeps the effect of every earlier element and `next_element`
/// names the failing one.
pub(crate) fn propagate_range(
    lattice: &Lattice,
    cache: &TransferCache,
    state: &mut BeamState,
    start: usize,
    end: usize,
) -> Result<(), PropagateError> {
    let len = lattice.len();
    if start > len {
        return Err(PropagateError::IndexOutOfRange { index: start, len });
    }
    if end > len {
        return Err(PropagateError::IndexOutOfRange { index: end, len });
    }
    if start > end {
        return Err(PropagateError::InvalidRange { start, end });
    }

    for (index, element) in lattice.iter().enumerate().take(end).skip(start) {
        state.set_next_element(index);
        if let Err(reason) = apply(index, element, cache, state) {
            warn!(
                index,
                name = element.name(),
                element_type = element.type_name(),
                error = %reason,
                "element failed"
            );
            return Err(PropagateError::ElementFailed {
                index,
                name: element.name().to_string(),
                reason,
            });
        }
    }
    state.set_next_element(end);
    Ok(())
}

fn apply(
    index: usize,
    element: &Element,
    cache: &TransferCache,
    state: &mut BeamState,
) -> Result<(), ElementError> {
    let builder = match element.kind().step() {
        Step::Reset(source) => {
            trace!(index, name = element.name(), "source reset");
            state.reset_from(source);
            return Ok(());
        }
        Step::Transfer(b) => b,
    };

    let entry = *state.reference();
    let misalignment = element.misalignment();
    let (transfer, lookup) = cache.get_or_build(index, &entry, element.skip_cache(), || {
        Ok(misalignment.apply(builder.transfer(&entry)?, &entry))
    })?;
    // Advance the reference before touching the moments so a kinematic
    // failure leaves the beam at the element entrance.
    builder.advance_reference(state.reference_mut())?;
    state.apply_transfer(&transfer);
    state.advance_position(builder.length());
    trace!(
        index,
        name = element.name(),
        element_type = builder.type_name(),
        cache = ?lookup,
        pos = state.pos(),
        "applied"
    );
    Ok(())
}
