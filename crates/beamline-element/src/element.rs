//! Element descriptors: a name, a decoded kind, and the raw parameters.

use beamline_core::{ElementError, ParamLookup, Params};

use crate::kind::ElementKind;
use crate::misalign::Misalignment;

/// One entry of a lattice.
///
/// The raw parameter map is kept alongside the decoded [`ElementKind`] so
/// the effective configuration can be reported back. `name` and `type`
/// are always the first two entries.
///
/// Misalignment and `skipcache` are read from the element's own
/// parameters; globals never supply them.
#[derive(Clone, Debug, PartialEq)]
pub struct Element {
    name: String,
    kind: ElementKind,
    misalignment: Misalignment,
    skip_cache: bool,
    params: Params,
}

impl Element {
    /// Decode an element from its parameter map. Parameters missing from
    /// `params` are looked up in `globals`.
    pub fn from_params(params: Params, globals: &Params) -> Result<Self, ElementError> {
        let name = params
            .text("name")?
            .ok_or_else(|| ElementError::MissingParameter {
                name: "name".to_string(),
            })?
            .to_string();
        let type_name = params
            .text("type")?
            .ok_or_else(|| ElementError::MissingParameter {
                name: "type".to_string(),
            })?;
        let kind = ElementKind::from_params(type_name, &params.scoped(globals))?;
        let misalignment = Misalignment::from_params(&params)?;
        let skip_cache = params.scalar_or("skipcache", 0.0)? != 0.0;
        Ok(Self {
            name,
            kind,
            misalignment,
            skip_cache,
            params,
        })
    }

    /// A new element of the same name and type with `update` replacing
    /// every other parameter.
    ///
    /// `name` and `type` entries in `update` are ignored.
    pub fn reconfigured(&self, update: &Params, globals: &Params) -> Result<Self, ElementError> {
        let mut params = Params::new()
            .with("name", self.name.as_str())
            .with("type", self.type_name());
        for (k, v) in update.iter() {
            if k != "name" && k != "type" {
                params.insert(k, v.clone());
            }
        }
        Self::from_params(params, globals)
    }

    /// Element name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Element type as written in lattice files.
    pub fn type_name(&self) -> &'static str {
        self.kind.type_name()
    }

    /// The decoded kind.
    pub fn kind(&self) -> &ElementKind {
        &self.kind
    }

    /// The raw parameters, including `name` and `type`.
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Physical length [m].
    pub fn length(&self) -> f64 {
        self.kind.length()
    }

    /// Offsets and rotations applied around the transfer matrix.
    pub fn misalignment(&self) -> &Misalignment {
        &self.misalignment
    }

    /// Whether transfer matrices for this element bypass the cache.
    pub fn skip_cache(&self) -> bool {
        self.skip_cache
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad() -> Params {
        Params::new()
            .with("name", "q1")
            .with("type", "quadrupole")
            .with("L", 0.1)
            .with("K", 2.0)
    }

    #[test]
    fn decodes_name_and_kind() {
        let e = Element::from_params(quad(), &Params::new()).unwrap();
        assert_eq!(e.name(), "q1");
        assert_eq!(e.type_name(), "quadrupole");
        assert!(matches!(e.kind(), ElementKind::Quadrupole(_)));
        assert_eq!(e.length(), 0.1);
    }

    #[test]
    fn name_and_type_required() {
        let no_type = Params::new().with("name", "x");
        assert_eq!(
            Element::from_params(no_type, &Params::new()).unwrap_err(),
            ElementError::MissingParameter {
                name: "type".into()
            }
        );
        let no_name = Params::new().with("type", "marker");
        assert!(Element::from_params(no_name, &Params::new()).is_err());
    }

    #[test]
    fn globals_fill_gaps() {
        let p = Params::new().with("name", "d").with("type", "drift");
        let globals = Params::new().with("L", 3.0);
        let e = Element::from_params(p, &globals).unwrap();
        assert_eq!(e.length(), 3.0);
    }

    #[test]
    fn reconfigure_replaces_wholesale() {
        let e = Element::from_params(quad(), &Params::new()).unwrap();
        let update = Params::new().with("L", 0.2);
        let r = e.reconfigured(&update, &Params::new()).unwrap();
        assert_eq!(r.name(), "q1");
        assert_eq!(r.length(), 0.2);
        // K was not carried over.
        assert!(!r.params().contains_key("K"));
        let keys: Vec<&str> = r.params().keys().collect();
        assert_eq!(keys, vec!["name", "type", "L"]);
    }

    #[test]
    fn misalignment_and_skipcache_are_local() {
        let e = Element::from_params(quad(), &Params::new()).unwrap();
        assert!(e.misalignment().is_aligned());
        assert!(!e.skip_cache());

        let globals = Params::new().with("dx", 1e-3).with("skipcache", 1.0);
        let e = Element::from_params(quad(), &globals).unwrap();
        assert!(e.misalignment().is_aligned());
        assert!(!e.skip_cache());

        let local = quad().with("roll", 0.1).with("skipcache", 1.0);
        let e = Element::from_params(local, &Params::new()).unwrap();
        assert_eq!(e.misalignment().roll, 0.1);
        assert!(e.skip_cache());
    }

    #[test]
    fn misalignment_must_be_numeric() {
        let p = quad().with("dy", "far");
        assert!(matches!(
            Element::from_params(p, &Params::new()).unwrap_err(),
            ElementError::WrongParameterType { .. }
        ));
    }

    #[test]
    fn reconfigure_validates() {
        let e = Element::from_params(quad(), &Params::new()).unwrap();
        assert!(e.reconfigured(&Params::new(), &Params::new()).is_err());
    }
}
