//! Per-element transfer-matrix cache.
//!
//! [`TransferCache`] holds one slot per lattice element. A slot stores the
//! last matrix built for that element together with the reference
//! particle it was built for; a lookup hits only when the incoming
//! reference has the same optics (see
//! [`ReferenceParticle::same_optics`]). Reconfiguring an element clears
//! its slot and no other. Elements flagged `skipcache` bypass their slot
//! and rebuild on every lookup.
//!
//! Slots sit behind individual `Mutex`es so concurrent propagations
//! through a shared machine only contend on the element they are both
//! applying.

use std::sync::{Mutex, PoisonError};

use beamline_core::{ElementError, PhaseMatrix, ReferenceParticle};

#[derive(Clone, Debug)]
struct CachedTransfer {
    reference: ReferenceParticle,
    transfer: PhaseMatrix,
}

type Slot = Option<CachedTransfer>;

/// Whether a lookup was served from the cache.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Lookup {
    Hit,
    Miss,
    Bypass,
}

#[derive(Debug)]
pub(crate) struct TransferCache {
    slots: Vec<Mutex<Slot>>,
}

// Compile-time assertion: TransferCache must be Send + Sync.
const _: fn() = || {
    fn assert<T: Send + Sync>() {}
    assert::<TransferCache>();
};

impl TransferCache {
    pub(crate) fn new(len: usize) -> Self {
        Self {
            slots: (0..len).map(|_| Mutex::new(None)).collect(),
        }
    }

    /// The cached matrix for `index` if it was built for the same optics
    /// as `reference`; otherwise `build` it and store the result.
    ///
    /// Errors from `build` are returned and leave the slot untouched. With
    /// `bypass` set the slot is neither read nor written.
    pub(crate) fn get_or_build(
        &self,
        index: usize,
        reference: &ReferenceParticle,
        bypass: bool,
        build: impl FnOnce() -> Result<PhaseMatrix, ElementError>,
    ) -> Result<(PhaseMatrix, Lookup), ElementError> {
        if bypass {
            return Ok((build()?, Lookup::Bypass));
        }
        let mut slot = self.slots[index]
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(cached) = slot.as_ref() {
            if cached.reference.same_optics(reference) {
                return Ok((cached.transfer, Lookup::Hit));
            }
        }
        let transfer = build()?;
        *slot = Some(CachedTransfer {
            reference: *reference,
            transfer,
        });
        Ok((transfer, Lookup::Miss))
    }

    pub(crate) fn invalidate(&self, index: usize) {
        if let Some(slot) = self.slots.get(index) {
            *slot.lock().unwrap_or_else(PoisonError::into_inner) = None;
        }
    }

    pub(crate) fn is_cached(&self, index: usize) -> bool {
        self.slots.get(index).is_some_and(|slot| {
            slot.lock()
                .unwrap_or_else(PoisonError::into_inner)
                .is_some()
        })
    }
}
