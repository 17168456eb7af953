//! [`Machine`]: a lattice ready to propagate beam states.

use tracing::{debug, info};

use beamline_core::{ElementIndex, ParamLookup, Params, PhaseMatrix, PhaseVector, Scope};
use beamline_element::{charge_state, Element, Source};

use crate::cache::TransferCache;
use crate::config::{MachineConfig, MachineError, PropagateError, SimType};
use crate::lattice::Lattice;
use crate::propagate::propagate_range;
use crate::state::BeamState;

/// A decoded lattice plus a transfer-matrix cache.
///
/// # Concurrency
///
/// `Machine` is `Send + Sync`. Propagation takes `&self`, so any number
/// of threads may propagate their own [`BeamState`]s through a shared
/// machine; [`reconfigure`](Self::reconfigure) takes `&mut self` and is
/// therefore exclusive with every propagation.
///
/// # Examples
///
/// ```
/// use beamline_core::Params;
/// use beamline_engine::{Machine, MachineConfig};
///
/// let config = MachineConfig::new()
///     .with_element(
///         Params::new()
///             .with("name", "src")
///             .with("type", "source")
///             .with("moment0", [1.0, 0.001, 0.0, 0.0, 0.0, 0.0, 1.0]),
///     )
///     .with_element(Params::new().with("name", "d1").with("type", "drift").with("L", 2.0));
///
/// let machine = Machine::new(config).unwrap();
/// let mut state = machine.alloc_state(&Params::new(), false).unwrap();
/// machine.propagate(&mut state).unwrap();
/// assert_eq!(state.pos(), 2.0);
/// assert!((state.moment0()[0] - 3.0).abs() < 1e-12);
/// ```
#[derive(Debug)]
pub struct Machine {
    sim_type: SimType,
    lattice: Lattice,
    cache: TransferCache,
}

// Compile-time assertion: Machine must be Send + Sync.
const _: fn() = || {
    fn assert<T: Send + Sync>() {}
    assert::<Machine>();
};

impl Machine {
    /// Build a machine, decoding every element.
    pub fn new(config: MachineConfig) -> Result<Self, MachineError> {
        config.validate()?;
        let sim_type = config.sim_type()?;
        let lattice = Lattice::from_config(&config)?;
        info!(
            sim_type = %sim_type,
            elements = lattice.len(),
            cstate = charge_state(lattice.globals())?,
            "machine constructed"
        );
        Ok(Self {
            sim_type,
            cache: TransferCache::new(lattice.len()),
            lattice,
        })
    }

    /// Build a machine with `extra` overlaid on the configuration's
    /// globals (for example `cstate`).
    pub fn with_overrides(config: MachineConfig, extra: &Params) -> Result<Self, MachineError> {
        Self::new(config.with_overrides(extra))
    }

    /// The simulation type.
    pub fn sim_type(&self) -> SimType {
        self.sim_type
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.lattice.len()
    }

    /// Whether the lattice is empty.
    pub fn is_empty(&self) -> bool {
        self.lattice.is_empty()
    }

    /// Element at `index`.
    pub fn element(&self, index: usize) -> Option<&Element> {
        self.lattice.get(index)
    }

    /// Indices of every element called `name`.
    pub fn find(&self, name: &str) -> Vec<ElementIndex> {
        self.lattice.find(name).into_iter().map(ElementIndex).collect()
    }

    /// The effective configuration: globals (including overrides) and the
    /// current parameters of every element.
    pub fn conf(&self) -> MachineConfig {
        self.lattice.to_config()
    }

    /// Whether a transfer matrix is cached for element `index`.
    pub fn is_cached(&self, index: usize) -> bool {
        self.cache.is_cached(index)
    }

    // ── State allocation ───────────────────────────────────────────

    /// Allocate a beam state at the lattice entrance.
    ///
    /// `partial` may carry `moment0`, `initial`, `IonEs`, `IonEk`, `IonZ`
    /// and `Frf`. With `inherit`, keys absent from `partial` come from the
    /// machine globals; without it they default to zero (an unset
    /// reference and all-zero moments).
    pub fn alloc_state(&self, partial: &Params, inherit: bool) -> Result<BeamState, MachineError> {
        let scope = if inherit {
            partial.scoped(self.lattice.globals())
        } else {
            Scope::local_only(partial)
        };
        let initial = Source::from_params(&scope)?;
        let state = BeamState::new(
            initial.moment0().copied().unwrap_or_else(PhaseVector::zeros),
            initial.state().copied().unwrap_or_else(PhaseMatrix::zeros),
            *initial.reference(),
        );
        debug!(
            inherit,
            ion_es = state.ion_es(),
            ion_ek = state.ion_ek(),
            has_moment0 = scope.has("moment0"),
            "state allocated"
        );
        Ok(state)
    }

    // ── Propagation ────────────────────────────────────────────────

    /// Propagate `state` through the whole lattice.
    pub fn propagate(&self, state: &mut BeamState) -> Result<(), PropagateError> {
        self.propagate_range(state, 0, self.len())
    }

    /// Propagate `state` through elements `start..end`.
    pub fn propagate_range(
        &self,
        state: &mut BeamState,
        start: usize,
        end: usize,
    ) -> Result<(), PropagateError> {
        debug!(start, end, "propagate");
        propagate_range(&self.lattice, &self.cache, state, start, end)
    }

    /// Apply at most `max` elements, starting at `state.next_element()`.
    pub fn propagate_max(&self, state: &mut BeamState, max: usize) -> Result<(), PropagateError> {
        let start = state.next_element();
        let end = start.saturating_add(max).min(self.len());
        self.propagate_range(state, start, end.max(start))
    }

    // ── Reconfiguration ────────────────────────────────────────────

    /// Replace the parameters of element `index` and drop its cached
    /// transfer matrix. Other elements keep their cache entries.
    ///
    /// Beam states allocated earlier are unaffected; only later
    /// propagations see the new parameters.
    pub fn reconfigure(&mut self, index: usize, params: &Params) -> Result<(), MachineError> {
        self.lattice.reconfigure(index, params)?;
        self.cache.invalidate(index);
        debug!(
            index,
            name = self.lattice.get(index).map_or("", Element::name),
            keys = params.len(),
            "element reconfigured"
        );
        Ok(())
    }
}
