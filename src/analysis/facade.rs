//! The facade entry point.
//!
//! `TypeFacade` carries no state beyond its immutable workaround switches.
//! Operations are split by concern across the sibling modules, each adding an
//! `impl TypeFacade` block:
//!
//! - `classify`: kind classification and the predicates behind it
//! - `canonical`: stable string rendering
//! - `erasure`: erased type names
//! - `queries`: subtyping, raw types, superclass and type-argument extraction
//! - `resolve`: eager symbol resolution on the native backend
//! - `equivalence`: name-based equality and hashing

use crate::analysis::equivalence::TypeEquivalence;
use crate::frontend::config::{FacadeConfig, Workarounds};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TypeFacade {
    pub(crate) workarounds: Workarounds,
}

impl TypeFacade {
    pub fn new(workarounds: Workarounds) -> Self {
        Self { workarounds }
    }

    pub fn from_config(config: &FacadeConfig) -> Self {
        Self::new(config.workarounds)
    }

    pub fn workarounds(&self) -> Workarounds {
        self.workarounds
    }

    /// Name-based equivalence; ignores nullability.
    pub fn equivalence(&self) -> TypeEquivalence {
        TypeEquivalence
    }
}
