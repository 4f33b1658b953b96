//! Structural category of a type handle.

use crate::core::type_name::PrimitiveType;
use crate::utils::lower_camel_to_upper_snake;
use std::fmt;

/// Result of `TypeFacade::classify`.
///
/// Categories are not disjoint in every backend's model, so the classifier's
/// evaluation order decides which one wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Array,
    Wildcard,
    TypeVar,
    Void,
    Null,
    None,
    Primitive(PrimitiveType),
    Error,
    Declared,
    Unknown,
}

impl Kind {
    pub fn name(&self) -> String {
        match self {
            Self::Array => "ARRAY".to_string(),
            Self::Wildcard => "WILDCARD".to_string(),
            Self::TypeVar => "TYPEVAR".to_string(),
            Self::Void => "VOID".to_string(),
            Self::Null => "NULL".to_string(),
            Self::None => "NONE".to_string(),
            Self::Primitive(p) => lower_camel_to_upper_snake(p.keyword()),
            Self::Error => "ERROR".to_string(),
            Self::Declared => "DECLARED".to_string(),
            Self::Unknown => "UNKNOWN".to_string(),
        }
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self, Self::Primitive(_))
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}
