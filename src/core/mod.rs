//! Core vocabulary shared by every layer
//!
//! The backend contract, structural type names and the kind taxonomy.

pub mod backend;
pub mod kind;
pub mod type_name;

pub use backend::{
    Backend, NativeKind, NativeTypes, Nullability, ProcessingEnv, TypeElement, TypeHandle,
    TypeNotPresent,
};
pub use kind::Kind;
pub use type_name::{ClassName, PrimitiveType, TypeName};
