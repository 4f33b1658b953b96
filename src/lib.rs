//! Typefacade - backend-agnostic type introspection for code generators
//!
//! A single query surface over two type-system backends: a native compiler
//! model with precise semantics and a symbol-processing model with known
//! representation gaps. Callers hand in opaque handles and get answers that
//! do not depend on which backend produced them.

// Core modules
pub mod core;
pub mod analysis;
pub mod errors;
pub mod frontend;
pub mod infrastructure;
pub mod model;
pub mod utils;

// Re-export commonly used items
pub use crate::core::{
    Backend, ClassName, Kind, NativeKind, NativeTypes, Nullability, PrimitiveType,
    ProcessingEnv, TypeElement, TypeHandle, TypeName, TypeNotPresent,
};
pub use crate::analysis::{
    backend_of, erase_type_name, stable_string, Equivalent, ResolutionStats, TypeEquivalence,
    TypeFacade, EQUIVALENCE,
};
pub use crate::errors::{ErrorKind, FacadeError, FacadeResult};
pub use crate::frontend::{FacadeConfig, Workarounds};
pub use crate::infrastructure::{init_dev_logging, init_file_logging, init_logging, LogConfig, LogFormat, LogOutput};
