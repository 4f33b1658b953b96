//! Name-based equivalence of type handles.
//!
//! Two handles are equivalent when they project to the same [`TypeName`].
//! Nullability is not part of the projection, so types differing only in
//! nullability are equivalent. Use this wherever handles are deduplicated or
//! used as map keys.

use crate::core::backend::TypeHandle;
use crate::core::type_name::TypeName;
use crate::errors::FacadeResult;
use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Stateless equality and hashing by type name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TypeEquivalence;

pub const EQUIVALENCE: TypeEquivalence = TypeEquivalence;

impl TypeEquivalence {
    pub fn equivalent<T: TypeHandle>(&self, a: &T, b: &T) -> FacadeResult<bool> {
        Ok(a.type_name()? == b.type_name()?)
    }

    pub fn hash<T: TypeHandle>(&self, ty: &T) -> FacadeResult<u64> {
        Ok(hash_name(&ty.type_name()?))
    }

    /// Pair `ty` with its type name so it can be used as a `HashMap` or
    /// `HashSet` key under this equivalence.
    pub fn wrap<T: TypeHandle>(&self, ty: T) -> FacadeResult<Equivalent<T>> {
        let key = ty.type_name()?;
        Ok(Equivalent { ty, key })
    }
}

impl fmt::Display for TypeEquivalence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TypeFacade::equivalence()")
    }
}

fn hash_name(name: &TypeName) -> u64 {
    let mut hasher = DefaultHasher::new();
    name.hash(&mut hasher);
    hasher.finish()
}

/// A handle compared and hashed by its type name.
///
/// The name is captured when wrapping, so a wrapper does not observe later
/// changes in how the backend names the handle.
#[derive(Debug, Clone)]
pub struct Equivalent<T> {
    ty: T,
    key: TypeName,
}

impl<T> Equivalent<T> {
    pub fn get(&self) -> &T {
        &self.ty
    }

    pub fn into_inner(self) -> T {
        self.ty
    }

    pub fn type_name(&self) -> &TypeName {
        &self.key
    }
}

impl<T> PartialEq for Equivalent<T> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl<T> Eq for Equivalent<T> {}

impl<T> Hash for Equivalent<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}
