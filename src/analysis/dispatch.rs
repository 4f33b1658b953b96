//! Backend dispatch.
//!
//! Backend-sensitive operations match on [`Backend`] at the call site so each
//! backend's workarounds stay visible where they apply. The helpers here only
//! look up the tag and the native primitives.

use crate::core::backend::{Backend, NativeTypes, ProcessingEnv, TypeHandle};
use crate::errors::{FacadeError, FacadeResult};
use tracing::error;

/// Backend tag of the environment owning `ty`.
pub fn backend_of<T: TypeHandle>(ty: &T) -> Backend {
    ty.env().backend()
}

/// Native primitives for a handle from a native environment.
///
/// A native-tagged environment without native primitives means a backend was
/// wired up with the wrong tag; that is fatal, never a fallback to the
/// symbol-processing path.
pub(crate) fn native_types<'a, T: TypeHandle>(
    ty: &'a T,
    operation: &'static str,
) -> FacadeResult<&'a dyn NativeTypes<T>> {
    let env = ty.env();
    env.native().ok_or_else(|| {
        let backend = env.backend();
        error!(%backend, operation, "Environment does not provide native type primitives");
        FacadeError::UnhandledBackend { backend, operation }
    })
}
