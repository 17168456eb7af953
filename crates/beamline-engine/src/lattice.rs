//! The ordered element sequence of a machine.

use beamline_core::{ParamLookup, Params};
use beamline_element::Element;

use crate::config::{MachineConfig, MachineError};

/// Elements in propagation order plus the global scope they were
/// decoded against.
///
/// The sequence is fixed at construction: elements can be reconfigured
/// in place but never inserted or removed.
#[derive(Clone, Debug)]
pub struct Lattice {
    elements: Vec<Element>,
    globals: Params,
}

impl Lattice {
    /// Decode every element of `config`.
    pub fn from_config(config: &MachineConfig) -> Result<Self, MachineError> {
        let elements = config
            .elements
            .iter()
            .enumerate()
            .map(|(index, params)| {
                Element::from_params(params.clone(), &config.globals).map_err(|reason| {
                    MachineError::InvalidElement {
                        index,
                        name: params.text("name").ok().flatten().unwrap_or("").to_string(),
                        reason,
                    }
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            elements,
            globals: config.globals.clone(),
        })
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether the lattice has no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Element at `index`.
    pub fn get(&self, index: usize) -> Option<&Element> {
        self.elements.get(index)
    }

    /// Elements in order.
    pub fn iter(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter()
    }

    /// The global scope.
    pub fn globals(&self) -> &Params {
        &self.globals
    }

    /// Indices of every element called `name`.
    pub fn find(&self, name: &str) -> Vec<usize> {
        self.elements
            .iter()
            .enumerate()
            .filter(|(_, e)| e.name() == name)
            .map(|(i, _)| i)
            .collect()
    }

    /// Replace the parameters of element `index` with `update`.
    ///
    /// The element keeps its name and type; a `type` entry naming a
    /// different type is rejected. On error the element is unchanged.
    pub fn reconfigure(&mut self, index: usize, update: &Params) -> Result<(), MachineError> {
        let len = self.elements.len();
        let current = self
            .elements
            .get(index)
            .ok_or(MachineError::IndexOutOfRange { index, len })?;
        if let Some(to) = update.text("type")? {
            if to != current.type_name() {
                return Err(MachineError::TypeChangeRejected {
                    index,
                    from: current.type_name().to_string(),
                    to: to.to_string(),
                });
            }
        }
        let replacement = current.reconfigured(update, &self.globals).map_err(|reason| {
            MachineError::InvalidElement {
                index,
                name: current.name().to_string(),
                reason,
            }
        })?;
        self.elements[index] = replacement;
        Ok(())
    }

    /// The configuration this lattice now represents.
    pub fn to_config(&self) -> MachineConfig {
        MachineConfig {
            globals: self.globals.clone(),
            elements: self.elements.iter().map(|e| e.params().clone()).collect(),
        }
    }
}
