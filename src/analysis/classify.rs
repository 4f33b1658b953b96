//! Kind classification.
//!
//! Categories overlap in the symbol-processing model (error types also look
//! declared, wildcards and arrays may carry a declaration handle), so the
//! order of checks in [`TypeFacade::classify`] is part of its contract.

use crate::analysis::dispatch::{backend_of, native_types};
use crate::analysis::facade::TypeFacade;
use crate::core::backend::{Backend, NativeKind, TypeHandle};
use crate::core::kind::Kind;
use crate::core::type_name::{PrimitiveType, TypeName};
use crate::errors::FacadeResult;
use tracing::trace;

impl TypeFacade {
    pub fn is_array<T: TypeHandle>(&self, ty: &T) -> bool {
        ty.component_type().is_some()
    }

    /// Component type of an array, `None` for anything else.
    pub fn as_array<T: TypeHandle>(&self, ty: &T) -> Option<T> {
        ty.component_type()
    }

    pub fn is_wildcard<T: TypeHandle>(&self, ty: &T) -> FacadeResult<bool> {
        match backend_of(ty) {
            Backend::Native => {
                if self.workarounds.native_wildcard_kind_tag {
                    // Requesting the type name of a not yet completed native type
                    // caches a wrong name for good; the kind tag is safe to read.
                    let native = native_types(ty, "is_wildcard")?;
                    Ok(native.kind(ty) == NativeKind::Wildcard)
                } else {
                    Ok(ty.type_name()?.is_wildcard())
                }
            }
            Backend::SymbolProcessing => Ok(ty.type_name()?.is_wildcard()),
        }
    }

    pub fn is_type_variable<T: TypeHandle>(&self, ty: &T) -> FacadeResult<bool> {
        Ok(ty.type_name()?.is_type_variable())
    }

    pub fn is_void<T: TypeHandle>(&self, ty: &T) -> bool {
        ty.is_void()
    }

    pub fn is_null_type<T: TypeHandle>(&self, ty: &T) -> FacadeResult<bool> {
        match backend_of(ty) {
            Backend::Native => {
                let native = native_types(ty, "is_null_type")?;
                Ok(native.kind(ty) == NativeKind::Null)
            }
            // The symbol-processing model has no representation of the null type.
            Backend::SymbolProcessing => Ok(false),
        }
    }

    /// `void` or the backend's "no type" sentinel.
    pub fn is_no_type<T: TypeHandle>(&self, ty: &T) -> bool {
        ty.is_none() || ty.is_void()
    }

    pub fn is_primitive<T: TypeHandle>(&self, ty: &T) -> FacadeResult<bool> {
        Ok(ty.type_name()?.is_primitive())
    }

    /// Whether `ty` names a class, interface or enum declaration.
    ///
    /// Always use this instead of testing `type_element()` directly: the
    /// symbol-processing backend attaches a declaration handle to some array
    /// and wildcard types.
    pub fn is_declared<T: TypeHandle>(&self, ty: &T) -> FacadeResult<bool> {
        if self.workarounds.spurious_element_guard
            && (self.is_array(ty) || self.is_wildcard(ty)?)
        {
            return Ok(false);
        }
        Ok(ty.type_element().is_some())
    }

    pub fn classify<T: TypeHandle>(&self, ty: &T) -> FacadeResult<Kind> {
        if self.is_array(ty) {
            return Ok(Kind::Array);
        }
        if self.is_wildcard(ty)? {
            return Ok(Kind::Wildcard);
        }

        // Safe to project from here on; computed once for the remaining checks.
        let name = ty.type_name()?;
        let kind = if name.is_type_variable() {
            Kind::TypeVar
        } else if ty.is_void() {
            Kind::Void
        } else if self.is_null_type(ty)? {
            Kind::Null
        } else if self.is_no_type(ty) {
            Kind::None
        } else if let Some(primitive) = primitive_of(&name) {
            Kind::Primitive(primitive)
        } else if ty.is_error() {
            // Error types satisfy the declared predicate on the symbol-processing
            // backend, so this check has to come first.
            Kind::Error
        } else if self.is_declared(ty)? {
            Kind::Declared
        } else {
            Kind::Unknown
        };

        trace!(backend = %backend_of(ty), %kind, "Classified type");
        Ok(kind)
    }

    /// Upper-case name of [`TypeFacade::classify`]'s result, e.g. `DECLARED` or `INT`.
    pub fn kind_name<T: TypeHandle>(&self, ty: &T) -> FacadeResult<String> {
        Ok(self.classify(ty)?.name())
    }
}

fn primitive_of(name: &TypeName) -> Option<PrimitiveType> {
    match name {
        TypeName::Primitive(p) if name.is_primitive() => Some(*p),
        _ => None,
    }
}
