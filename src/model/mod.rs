//! In-memory type universe implementing both backends.
//!
//! A [`Universe`] is a processing environment tagged with a [`Backend`]. Its
//! [`Quirks`] reproduce the representation gaps of the real backend the tag
//! stands for, so facade behavior on either backend can be exercised without
//! a compiler. [`Quirks::none`] gives an idealized model.
//!
//! [`Backend`]: crate::core::backend::Backend

mod handle;
mod subtyping;
mod universe;

pub use handle::{MemElement, MemType};
pub use universe::{DeclKind, Quirks, Universe};
