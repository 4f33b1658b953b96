//! Eager symbol resolution for the native backend.
//!
//! The native compiler computes and memoizes a type's name on first request.
//! If a nested declaration is not completed yet, that name comes out with a
//! `$` where a `.` belongs and stays wrong. Completing every such declaration
//! reachable from a type before its name is requested avoids this.

use crate::analysis::dispatch::{backend_of, native_types};
use crate::analysis::facade::TypeFacade;
use crate::core::backend::{Backend, NativeKind, NativeTypes, TypeElement, TypeHandle};
use crate::errors::FacadeResult;
use std::collections::HashSet;
use tracing::{debug, trace};

/// What a resolution pass touched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolutionStats {
    /// Distinct declarations walked.
    pub visited: usize,
    /// Declarations whose completion was forced.
    pub completed: usize,
}

impl TypeFacade {
    /// Force completion of every `$`-named declaration reachable from `ty`.
    ///
    /// Walks declared types and their arguments, array components and wildcard
    /// bounds. Each declaration is visited once, which also terminates walks
    /// over recursive generics. Idempotent; a no-op on the symbol-processing
    /// backend.
    pub fn force_resolution<T: TypeHandle>(&self, ty: &T) -> FacadeResult<ResolutionStats> {
        match backend_of(ty) {
            Backend::Native => {
                if !self.workarounds.native_eager_resolution {
                    return Ok(ResolutionStats::default());
                }
                let native = native_types(ty, "force_resolution")?;
                let mut resolver = Resolver {
                    native,
                    visited: HashSet::new(),
                    stats: ResolutionStats::default(),
                };
                resolver.visit(ty);
                debug!(
                    visited = resolver.stats.visited,
                    completed = resolver.stats.completed,
                    "Resolution pass finished"
                );
                Ok(resolver.stats)
            }
            Backend::SymbolProcessing => Ok(ResolutionStats::default()),
        }
    }
}

struct Resolver<'a, T: TypeHandle> {
    native: &'a dyn NativeTypes<T>,
    visited: HashSet<T::Element>,
    stats: ResolutionStats,
}

impl<T: TypeHandle> Resolver<'_, T> {
    fn visit(&mut self, ty: &T) {
        match self.native.kind(ty) {
            NativeKind::Declared | NativeKind::Error => self.visit_declared(ty),
            NativeKind::Array => {
                if let Some(component) = ty.component_type() {
                    self.visit(&component);
                }
            }
            NativeKind::Wildcard => {
                let (extends, supers) = self.native.wildcard_bounds(ty);
                for bound in extends.iter().chain(supers.iter()) {
                    self.visit(bound);
                }
            }
            NativeKind::TypeVar
            | NativeKind::Primitive
            | NativeKind::Void
            | NativeKind::None
            | NativeKind::Null
            | NativeKind::Other => {}
        }
    }

    fn visit_declared(&mut self, ty: &T) {
        let Some(element) = ty.type_element() else {
            return;
        };
        if !self.visited.insert(element.clone()) {
            return;
        }
        self.stats.visited += 1;

        let qualified_name = element.qualified_name();
        if qualified_name.contains('$') {
            trace!(%qualified_name, "Forcing symbol completion");
            self.native.complete(&element);
            self.stats.completed += 1;
        }

        for argument in ty.type_arguments() {
            self.visit(&argument);
        }
    }
}
