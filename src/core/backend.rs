//! The input boundary: what a type-system backend must expose.
//!
//! Handles are owned by their backend; this crate only reads them. The backend
//! tag lives on the owning environment rather than on the handle, and every
//! backend-sensitive operation matches on it exhaustively.

use crate::core::type_name::{ClassName, TypeName};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::Hash;

/// Which type-introspection subsystem produced a handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Backend {
    /// Precise native compiler semantics, with erasure and subtyping primitives.
    Native,
    /// Reflection-style symbol model with known representation gaps.
    SymbolProcessing,
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Native => f.write_str("native"),
            Self::SymbolProcessing => f.write_str("symbol-processing"),
        }
    }
}

/// Nullability marker attached to a handle by backends that track it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Nullability {
    Nullable,
    NonNull,
    #[default]
    Unknown,
}

/// Raw structural kind tag as reported by the native compiler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NativeKind {
    Declared,
    Error,
    Array,
    Wildcard,
    TypeVar,
    Primitive,
    Void,
    None,
    Null,
    Other,
}

/// Raised by a backend when the projection of an unresolved type is requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeNotPresent {
    /// Best-effort name of the missing type.
    pub type_name: String,
}

impl TypeNotPresent {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
        }
    }
}

/// Opaque handle to a type as modeled by one backend.
pub trait TypeHandle: Clone + fmt::Debug + fmt::Display {
    type Element: TypeElement<Type = Self>;
    type Env: ProcessingEnv<Type = Self>;

    /// The environment that owns this handle.
    fn env(&self) -> &Self::Env;

    /// Structural projection. Not cached by callers; backends may cache.
    fn type_name(&self) -> Result<TypeName, TypeNotPresent>;

    fn type_arguments(&self) -> Vec<Self>;

    /// Declaration handle. Present for declared types, but see
    /// `TypeFacade::is_declared` before trusting it.
    fn type_element(&self) -> Option<Self::Element>;

    fn super_types(&self) -> Vec<Self>;

    /// Backend approximation of the unparameterized form.
    fn raw_type(&self) -> Option<Self>;

    /// Component type; present iff the handle is an array.
    fn component_type(&self) -> Option<Self>;

    fn is_error(&self) -> bool;

    /// Backend "no type" sentinel, e.g. a constructor's return type.
    fn is_none(&self) -> bool;

    fn is_void(&self) -> bool;

    fn is_same_type(&self, other: &Self) -> bool;

    /// Whether a value of `other` can be assigned to `self`.
    fn is_assignable_from(&self, other: &Self) -> bool;

    fn nullability(&self) -> Nullability {
        Nullability::Unknown
    }
}

/// Declaration of a class, interface or enum.
pub trait TypeElement: Clone + fmt::Debug + Eq + Hash {
    type Type: TypeHandle<Element = Self>;

    fn class_name(&self) -> ClassName;

    /// Qualified name as the backend reports it. The native backend may
    /// still report a `$` between nested names before symbol completion.
    fn qualified_name(&self) -> String;

    /// A class, as opposed to an interface.
    fn is_class(&self) -> bool;

    /// The declaration's own type; its arguments are the formal type parameters.
    fn declared_type(&self) -> Self::Type;

    fn enclosing_type_element(&self) -> Option<Self>;
}

/// Environment owning a family of handles.
pub trait ProcessingEnv {
    type Type: TypeHandle;

    fn backend(&self) -> Backend;

    /// Native compiler primitives, available only on the native backend.
    fn native(&self) -> Option<&dyn NativeTypes<Self::Type>>;
}

/// Primitives only the native compiler provides.
pub trait NativeTypes<T: TypeHandle> {
    fn kind(&self, ty: &T) -> NativeKind;

    fn erasure(&self, ty: &T) -> T;

    fn is_subtype(&self, sub: &T, sup: &T) -> bool;

    fn enclosing_type(&self, ty: &T) -> Option<T>;

    /// `(extends, super)` bounds of a wildcard.
    fn wildcard_bounds(&self, ty: &T) -> (Option<T>, Option<T>);

    /// Force symbol completion of a declaration.
    fn complete(&self, element: &T::Element);
}
