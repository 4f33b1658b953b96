//! Backend-independent structural projection of a type.
//!
//! Every type handle exposes exactly one `TypeName`. The projection is a closed
//! sum type so that every consumer (canonicalization, erasure, classification)
//! is forced by the compiler to handle each shape.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Fully qualified name of a class-like declaration.
///
/// Nested declarations keep the chain of simple names, outermost first, so
/// `java.util.Map.Entry` is `package = "java.util"`, `simple_names = ["Map", "Entry"]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ClassName {
    package: String,
    simple_names: Vec<String>,
}

impl ClassName {
    pub fn new(package: impl Into<String>, simple_names: Vec<String>) -> Self {
        debug_assert!(!simple_names.is_empty(), "class name needs a simple name");
        Self {
            package: package.into(),
            simple_names,
        }
    }

    /// Top-level class in `package`.
    pub fn top_level(package: impl Into<String>, simple_name: impl Into<String>) -> Self {
        Self::new(package, vec![simple_name.into()])
    }

    /// Nested class `simple_name` inside `self`.
    pub fn nested(&self, simple_name: impl Into<String>) -> Self {
        let mut simple_names = self.simple_names.clone();
        simple_names.push(simple_name.into());
        Self {
            package: self.package.clone(),
            simple_names,
        }
    }

    /// Split a dotted name on the first upper-case segment.
    ///
    /// `java.util.Map.Entry` becomes package `java.util` with simple names
    /// `Map`, `Entry`. Names without an upper-case segment are treated as a
    /// single top-level class in the default package.
    pub fn parse(dotted: &str) -> Self {
        let segments: Vec<&str> = dotted.split('.').collect();
        let first_class = segments
            .iter()
            .position(|s| s.chars().next().is_some_and(|c| c.is_ascii_uppercase()))
            .unwrap_or(segments.len().saturating_sub(1));
        let package = segments[..first_class].join(".");
        let simple_names = segments[first_class..].iter().map(|s| s.to_string()).collect();
        Self::new(package, simple_names)
    }

    /// `java.lang.Object`, the universal upper bound.
    pub fn object() -> Self {
        Self::top_level("java.lang", "Object")
    }

    pub fn package_name(&self) -> &str {
        &self.package
    }

    pub fn simple_names(&self) -> &[String] {
        &self.simple_names
    }

    pub fn simple_name(&self) -> &str {
        self.simple_names.last().map(String::as_str).unwrap_or_default()
    }

    pub fn enclosing(&self) -> Option<ClassName> {
        if self.simple_names.len() < 2 {
            return None;
        }
        Some(Self {
            package: self.package.clone(),
            simple_names: self.simple_names[..self.simple_names.len() - 1].to_vec(),
        })
    }

    /// Dotted name with `.` between nested simple names.
    pub fn canonical_name(&self) -> String {
        self.join_with('.')
    }

    /// Binary name with `$` between nested simple names.
    pub fn reflection_name(&self) -> String {
        self.join_with('$')
    }

    fn join_with(&self, nested_separator: char) -> String {
        let mut out = String::new();
        if !self.package.is_empty() {
            out.push_str(&self.package);
            out.push('.');
        }
        for (i, name) in self.simple_names.iter().enumerate() {
            if i > 0 {
                out.push(nested_separator);
            }
            out.push_str(name);
        }
        out
    }
}

impl fmt::Display for ClassName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical_name())
    }
}

/// Primitive keywords, plus `void`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PrimitiveType {
    Boolean,
    Byte,
    Short,
    Int,
    Long,
    Char,
    Float,
    Double,
    Void,
}

impl PrimitiveType {
    pub const ALL: [PrimitiveType; 9] = [
        Self::Boolean,
        Self::Byte,
        Self::Short,
        Self::Int,
        Self::Long,
        Self::Char,
        Self::Float,
        Self::Double,
        Self::Void,
    ];

    pub fn keyword(self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Byte => "byte",
            Self::Short => "short",
            Self::Int => "int",
            Self::Long => "long",
            Self::Char => "char",
            Self::Float => "float",
            Self::Double => "double",
            Self::Void => "void",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.keyword() == keyword)
    }

    /// The `java.lang` wrapper class used for boxing conversion.
    pub fn boxed(self) -> ClassName {
        let simple = match self {
            Self::Boolean => "Boolean",
            Self::Byte => "Byte",
            Self::Short => "Short",
            Self::Int => "Integer",
            Self::Long => "Long",
            Self::Char => "Character",
            Self::Float => "Float",
            Self::Double => "Double",
            Self::Void => "Void",
        };
        ClassName::top_level("java.lang", simple)
    }

    /// Inverse of [`PrimitiveType::boxed`].
    pub fn unboxed(class_name: &ClassName) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.boxed() == *class_name)
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Structural projection of a type handle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeName {
    Class(ClassName),
    Array(Box<TypeName>),
    Parameterized {
        raw: ClassName,
        args: Vec<TypeName>,
    },
    /// Well-formed wildcards have exactly one upper bound and at most one
    /// lower bound. The vectors are kept as-is so violations stay observable.
    Wildcard {
        upper_bounds: Vec<TypeName>,
        lower_bounds: Vec<TypeName>,
    },
    TypeVariable {
        name: String,
        bounds: Vec<TypeName>,
    },
    Primitive(PrimitiveType),
}

impl TypeName {
    pub fn object() -> Self {
        Self::Class(ClassName::object())
    }

    pub fn class(dotted: &str) -> Self {
        Self::Class(ClassName::parse(dotted))
    }

    pub fn array_of(component: TypeName) -> Self {
        Self::Array(Box::new(component))
    }

    pub fn parameterized(raw: ClassName, args: Vec<TypeName>) -> Self {
        Self::Parameterized { raw, args }
    }

    /// `?`
    pub fn unbounded_wildcard() -> Self {
        Self::Wildcard {
            upper_bounds: vec![Self::object()],
            lower_bounds: Vec::new(),
        }
    }

    /// `? extends upper`
    pub fn subtype_of(upper: TypeName) -> Self {
        Self::Wildcard {
            upper_bounds: vec![upper],
            lower_bounds: Vec::new(),
        }
    }

    /// `? super lower`
    pub fn supertype_of(lower: TypeName) -> Self {
        Self::Wildcard {
            upper_bounds: vec![Self::object()],
            lower_bounds: vec![lower],
        }
    }

    pub fn type_variable(name: impl Into<String>, bounds: Vec<TypeName>) -> Self {
        let bounds = if bounds.is_empty() {
            vec![Self::object()]
        } else {
            bounds
        };
        Self::TypeVariable {
            name: name.into(),
            bounds,
        }
    }

    /// Primitive keyword other than `void`.
    pub fn is_primitive(&self) -> bool {
        matches!(self, Self::Primitive(p) if *p != PrimitiveType::Void)
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Self::Class(c) if *c == ClassName::object())
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self, Self::Wildcard { .. })
    }

    pub fn is_type_variable(&self) -> bool {
        matches!(self, Self::TypeVariable { .. })
    }
}

/// Default textual form. Type arguments are separated by `", "`; use
/// `TypeFacade::to_stable_string` where a stable rendering is required.
impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Class(name) => write!(f, "{}", name),
            Self::Array(component) => write!(f, "{}[]", component),
            Self::Parameterized { raw, args } => {
                write!(f, "{}<", raw)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                f.write_str(">")
            }
            Self::Wildcard {
                upper_bounds,
                lower_bounds,
            } => {
                if let Some(lower) = lower_bounds.first() {
                    write!(f, "? super {}", lower)
                } else {
                    match upper_bounds.first() {
                        Some(upper) if !upper.is_object() => write!(f, "? extends {}", upper),
                        _ => f.write_str("?"),
                    }
                }
            }
            Self::TypeVariable { name, .. } => f.write_str(name),
            Self::Primitive(p) => write!(f, "{}", p),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_name_parse() {
        let entry = ClassName::parse("java.util.Map.Entry");
        assert_eq!(entry.package_name(), "java.util");
        assert_eq!(entry.simple_names(), ["Map", "Entry"]);
        assert_eq!(entry.canonical_name(), "java.util.Map.Entry");
        assert_eq!(entry.reflection_name(), "java.util.Map$Entry");
        assert_eq!(entry.enclosing(), Some(ClassName::parse("java.util.Map")));
    }

    #[test]
    fn test_class_name_default_package() {
        let foo = ClassName::parse("Foo");
        assert_eq!(foo.package_name(), "");
        assert_eq!(foo.canonical_name(), "Foo");
        assert_eq!(foo.enclosing(), None);
    }

    #[test]
    fn test_boxing_round_trip() {
        assert_eq!(PrimitiveType::Int.boxed().canonical_name(), "java.lang.Integer");
        assert_eq!(
            PrimitiveType::unboxed(&ClassName::parse("java.lang.Character")),
            Some(PrimitiveType::Char)
        );
        assert_eq!(PrimitiveType::unboxed(&ClassName::object()), None);
    }

    #[test]
    fn test_void_is_not_primitive() {
        assert!(TypeName::Primitive(PrimitiveType::Int).is_primitive());
        assert!(!TypeName::Primitive(PrimitiveType::Void).is_primitive());
    }

    #[test]
    fn test_display_uses_spaced_commas() {
        let map = TypeName::parameterized(
            ClassName::parse("java.util.Map"),
            vec![TypeName::class("java.lang.String"), TypeName::unbounded_wildcard()],
        );
        assert_eq!(map.to_string(), "java.util.Map<java.lang.String, ?>");
    }
}
