//! Type queries over backend handles
//!
//! Everything a code generator asks about a type goes through [`TypeFacade`],
//! which hides which backend produced the handle.

pub mod canonical;
pub mod classify;
pub mod dispatch;
pub mod equivalence;
pub mod erasure;
pub mod facade;
pub mod queries;
pub mod resolve;

pub use canonical::stable_string;
pub use dispatch::backend_of;
pub use equivalence::{Equivalent, TypeEquivalence, EQUIVALENCE};
pub use erasure::erase_type_name;
pub use facade::TypeFacade;
pub use resolve::ResolutionStats;
