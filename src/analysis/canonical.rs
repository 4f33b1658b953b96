//! Stable, backend-independent string rendering of types.
//!
//! The output format is relied upon by generated code and must not change:
//! type arguments are joined with `","` and no space.

use crate::analysis::facade::TypeFacade;
use crate::core::backend::{TypeHandle, TypeNotPresent};
use crate::core::type_name::TypeName;
use crate::errors::{FacadeError, FacadeResult};
use tracing::{error, trace};

impl TypeFacade {
    /// Stable rendering of `ty`.
    ///
    /// An unresolved type renders as its own best-effort name instead of
    /// failing. This is display-only; use `check_type_present` to surface
    /// missing types as errors.
    pub fn to_stable_string<T: TypeHandle>(&self, ty: &T) -> FacadeResult<String> {
        match ty.type_name() {
            Ok(name) => stable_string(&name),
            Err(TypeNotPresent { type_name }) => {
                trace!(%type_name, "Rendering unresolved type by name");
                Ok(type_name)
            }
        }
    }
}

/// Stable rendering of a type name.
///
/// Fails only on wildcards that break the one-upper-bound, at-most-one-lower-bound
/// shape.
pub fn stable_string(name: &TypeName) -> FacadeResult<String> {
    match name {
        TypeName::Class(class_name) => Ok(class_name.canonical_name()),
        TypeName::Array(component) => Ok(format!("{}[]", stable_string(component)?)),
        TypeName::Parameterized { raw, args } => {
            let args = args
                .iter()
                .map(stable_string)
                .collect::<FacadeResult<Vec<_>>>()?;
            Ok(format!("{}<{}>", raw.canonical_name(), args.join(",")))
        }
        TypeName::Wildcard {
            upper_bounds,
            lower_bounds,
        } => {
            let upper = only_element(upper_bounds, "wildcard upper bounds", name)?;
            if !upper.is_object() {
                if !lower_bounds.is_empty() {
                    return Err(malformed(name, "bounded above and below"));
                }
                return Ok(format!("? extends {}", stable_string(upper)?));
            }
            if !lower_bounds.is_empty() {
                let lower = only_element(lower_bounds, "wildcard lower bounds", name)?;
                return Ok(format!("? super {}", stable_string(lower)?));
            }
            Ok("?".to_string())
        }
        TypeName::TypeVariable { name, .. } => Ok(name.clone()),
        TypeName::Primitive(primitive) => Ok(primitive.to_string()),
    }
}

fn only_element<'a>(
    items: &'a [TypeName],
    what: &str,
    whole: &TypeName,
) -> FacadeResult<&'a TypeName> {
    match items {
        [single] => Ok(single),
        _ => Err(malformed(
            whole,
            &format!("expected exactly one of {}, found {}", what, items.len()),
        )),
    }
}

fn malformed(name: &TypeName, reason: &str) -> FacadeError {
    error!(type_name = %name, reason, "Malformed type name");
    FacadeError::MalformedTypeName(format!("{}: {}", name, reason))
}
