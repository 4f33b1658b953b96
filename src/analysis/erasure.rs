//! Erasure of type names.

use crate::analysis::dispatch::{backend_of, native_types};
use crate::analysis::facade::TypeFacade;
use crate::core::backend::{Backend, TypeHandle};
use crate::core::type_name::TypeName;
use crate::errors::{FacadeError, FacadeResult};

impl TypeFacade {
    /// Erased type name of `ty`.
    pub fn erased_type_name<T: TypeHandle>(&self, ty: &T) -> FacadeResult<TypeName> {
        match backend_of(ty) {
            Backend::Native => {
                let native = native_types(ty, "erased_type_name")?;
                Ok(native.erasure(ty).type_name()?)
            }
            // No erasure primitive on this backend; erase the projection instead.
            Backend::SymbolProcessing => erase_type_name(&ty.type_name()?),
        }
    }
}

/// Structural erasure of a type name.
///
/// - `C[]` erases to `|C|[]`
/// - `C<T1, T2, ...>` erases to `C`; for a nested `Outer<A>.Inner<B>` the raw
///   name already spells out `Outer.Inner`
/// - a type variable erases to the erasure of its left-most bound
/// - everything else is its own erasure
pub fn erase_type_name(name: &TypeName) -> FacadeResult<TypeName> {
    match name {
        TypeName::Array(component) => Ok(TypeName::array_of(erase_type_name(component)?)),
        TypeName::Parameterized { raw, .. } => Ok(TypeName::Class(raw.clone())),
        TypeName::TypeVariable { name: var, bounds } => match bounds.first() {
            Some(first) => erase_type_name(first),
            None => Err(FacadeError::MalformedTypeName(format!(
                "type variable {} has no bounds",
                var
            ))),
        },
        TypeName::Class(_) | TypeName::Wildcard { .. } | TypeName::Primitive(_) => {
            Ok(name.clone())
        }
    }
}
