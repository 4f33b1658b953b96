//! Error types for facade operations.

use crate::core::backend::{Backend, TypeNotPresent};

pub type FacadeResult<T> = Result<T, FacadeError>;

/// Coarse classification of a [`FacadeError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A type the backend could not resolve. A data condition, reported as a
    /// diagnostic to the user of the host tool.
    Unresolved,
    /// The caller asked something that does not apply to the given type.
    ContractViolation,
    /// The backend or a projection broke an invariant this crate relies on.
    Internal,
    Config,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FacadeError {
    #[error("type not present: {0}")]
    TypeNotPresent(String),

    #[error("{operation} requires a declared type, got {ty}")]
    NotDeclared { ty: String, operation: &'static str },

    #[error("{element} does not have exactly 1 type parameter. Found: [{}]", .found.join(", "))]
    NotSingleParameter { element: String, found: Vec<String> },

    #[error("{0} is a raw type")]
    RawType(String),

    #[error("{ty} has more than one non-Object superclass: [{}]", .candidates.join(", "))]
    AmbiguousSuperclass { ty: String, candidates: Vec<String> },

    #[error("malformed type name: {0}")]
    MalformedTypeName(String),

    #[error("unhandled backend {backend} in {operation}")]
    UnhandledBackend {
        backend: Backend,
        operation: &'static str,
    },

    #[error("config error: {0}")]
    Config(String),
}

impl FacadeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::TypeNotPresent(_) => ErrorKind::Unresolved,
            Self::NotDeclared { .. }
            | Self::NotSingleParameter { .. }
            | Self::RawType(_)
            | Self::AmbiguousSuperclass { .. } => ErrorKind::ContractViolation,
            Self::MalformedTypeName(_) | Self::UnhandledBackend { .. } => ErrorKind::Internal,
            Self::Config(_) => ErrorKind::Config,
        }
    }

    /// Only unresolved types are data conditions; everything else is a bug
    /// in the caller or a backend.
    pub fn is_fatal(&self) -> bool {
        !matches!(self.kind(), ErrorKind::Unresolved | ErrorKind::Config)
    }

    pub fn not_declared(ty: &impl std::fmt::Display, operation: &'static str) -> Self {
        Self::NotDeclared {
            ty: ty.to_string(),
            operation,
        }
    }
}

impl From<TypeNotPresent> for FacadeError {
    fn from(err: TypeNotPresent) -> Self {
        Self::TypeNotPresent(err.type_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            FacadeError::TypeNotPresent("Foo".into()).kind(),
            ErrorKind::Unresolved
        );
        assert_eq!(
            FacadeError::RawType("java.util.List".into()).kind(),
            ErrorKind::ContractViolation
        );
        assert_eq!(
            FacadeError::MalformedTypeName("?".into()).kind(),
            ErrorKind::Internal
        );
    }

    #[test]
    fn test_fatality() {
        assert!(!FacadeError::TypeNotPresent("Foo".into()).is_fatal());
        assert!(FacadeError::not_declared(&"int", "unwrap_type").is_fatal());
        assert!(
            FacadeError::UnhandledBackend {
                backend: Backend::Native,
                operation: "erasure",
            }
            .is_fatal()
        );
    }

    #[test]
    fn test_messages() {
        let err = FacadeError::NotSingleParameter {
            element: "java.util.Map".into(),
            found: vec!["K".into(), "V".into()],
        };
        assert_eq!(
            err.to_string(),
            "java.util.Map does not have exactly 1 type parameter. Found: [K, V]"
        );
        let err: FacadeError = TypeNotPresent::new("com.example.Missing").into();
        assert_eq!(err.to_string(), "type not present: com.example.Missing");
    }
}
