//! Backend trait implementations for universe handles.

use crate::core::backend::{
    Backend, NativeKind, NativeTypes, Nullability, ProcessingEnv, TypeElement, TypeHandle,
    TypeNotPresent,
};
use crate::core::type_name::{ClassName, TypeName};
use crate::model::subtyping;
use crate::model::universe::{DeclId, DeclKind, TypeData, TypeId, Universe, OBJECT_DECL};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// A type in a [`Universe`].
///
/// Nullability rides on the handle, not on the interned type, so handles
/// that differ only in nullability are the same type.
#[derive(Clone)]
pub struct MemType {
    pub(crate) universe: Universe,
    pub(crate) id: TypeId,
    pub(crate) nullability: Nullability,
}

impl MemType {
    fn data(&self) -> TypeData {
        self.universe.data(self.id)
    }

    fn from_same_universe(&self, other: &MemType) -> bool {
        Arc::ptr_eq(&self.universe.inner, &other.universe.inner)
    }
}

impl TypeHandle for MemType {
    type Element = MemElement;
    type Env = Universe;

    fn env(&self) -> &Universe {
        &self.universe
    }

    fn type_name(&self) -> Result<TypeName, TypeNotPresent> {
        self.universe.project(self.id, true)
    }

    fn type_arguments(&self) -> Vec<MemType> {
        let TypeData::Declared { decl, args } = self.data() else {
            return Vec::new();
        };
        if args.is_empty() && self.universe.quirks().raw_type_arguments {
            return self.universe.type_params(&self.universe.element(decl));
        }
        args.into_iter().map(|id| self.universe.handle(id)).collect()
    }

    fn type_element(&self) -> Option<MemElement> {
        match self.data() {
            TypeData::Declared { decl, .. } | TypeData::Error { decl, .. } => {
                Some(self.universe.element(decl))
            }
            TypeData::Array { .. } | TypeData::Wildcard { .. }
                if self.universe.quirks().spurious_elements =>
            {
                Some(self.universe.element(OBJECT_DECL))
            }
            _ => None,
        }
    }

    fn super_types(&self) -> Vec<MemType> {
        self.universe
            .super_type_ids(self.id)
            .into_iter()
            .map(|id| self.universe.handle(id))
            .collect()
    }

    fn raw_type(&self) -> Option<MemType> {
        match self.data() {
            TypeData::Declared { decl, .. } => Some(self.universe.raw(&self.universe.element(decl))),
            TypeData::Error { .. } => Some(self.clone()),
            _ => None,
        }
    }

    fn component_type(&self) -> Option<MemType> {
        match self.data() {
            TypeData::Array { component } => Some(self.universe.handle(component)),
            _ => None,
        }
    }

    fn is_error(&self) -> bool {
        matches!(
            self.data(),
            TypeData::Error { .. } | TypeData::Unresolved { .. }
        )
    }

    fn is_none(&self) -> bool {
        matches!(self.data(), TypeData::NoType)
    }

    fn is_void(&self) -> bool {
        matches!(self.data(), TypeData::Void)
    }

    fn is_same_type(&self, other: &MemType) -> bool {
        self.from_same_universe(other) && self.id == other.id
    }

    fn is_assignable_from(&self, other: &MemType) -> bool {
        self.from_same_universe(other) && subtyping::is_assignable(&self.universe, other.id, self.id)
    }

    fn nullability(&self) -> Nullability {
        self.nullability
    }
}

impl fmt::Display for MemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.universe.project(self.id, false) {
            Ok(name) => write!(f, "{}", name),
            Err(missing) => f.write_str(&missing.type_name),
        }
    }
}

impl fmt::Debug for MemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemType")
            .field("id", &self.id)
            .field("name", &self.to_string())
            .field("nullability", &self.nullability)
            .finish()
    }
}

/// A declaration in a [`Universe`].
#[derive(Clone)]
pub struct MemElement {
    pub(crate) universe: Universe,
    pub(crate) id: DeclId,
}

impl TypeElement for MemElement {
    type Type = MemType;

    fn class_name(&self) -> ClassName {
        self.universe
            .decl(self.id)
            .map(|decl| decl.name)
            .unwrap_or_else(ClassName::object)
    }

    fn qualified_name(&self) -> String {
        match self.universe.decl(self.id) {
            Some(decl) if self.universe.reports_binary_name(self.id, &decl) => {
                decl.name.reflection_name()
            }
            Some(decl) => decl.name.canonical_name(),
            None => String::new(),
        }
    }

    fn is_class(&self) -> bool {
        self.universe
            .decl(self.id)
            .is_some_and(|decl| decl.kind == DeclKind::Class)
    }

    fn declared_type(&self) -> MemType {
        self.universe
            .declared(self, &self.universe.type_params(self))
    }

    fn enclosing_type_element(&self) -> Option<MemElement> {
        let enclosing = self.universe.decl(self.id)?.name.enclosing()?;
        self.universe
            .find_decl(&enclosing)
            .map(|id| self.universe.element(id))
    }
}

impl PartialEq for MemElement {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.universe.inner, &other.universe.inner) && self.id == other.id
    }
}

impl Eq for MemElement {}

impl Hash for MemElement {
    fn hash<H: Hasher>(&self, state: &mut H) {
        Arc::as_ptr(&self.universe.inner).hash(state);
        self.id.hash(state);
    }
}

impl fmt::Debug for MemElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemElement")
            .field("id", &self.id)
            .field("name", &self.qualified_name())
            .finish()
    }
}

impl ProcessingEnv for Universe {
    type Type = MemType;

    fn backend(&self) -> Backend {
        self.inner.backend
    }

    fn native(&self) -> Option<&dyn NativeTypes<MemType>> {
        match self.inner.backend {
            Backend::Native => Some(self),
            Backend::SymbolProcessing => None,
        }
    }
}

impl NativeTypes<MemType> for Universe {
    fn kind(&self, ty: &MemType) -> NativeKind {
        match ty.data() {
            TypeData::Declared { .. } => NativeKind::Declared,
            TypeData::Error { .. } | TypeData::Unresolved { .. } => NativeKind::Error,
            TypeData::Array { .. } => NativeKind::Array,
            TypeData::Wildcard { .. } => NativeKind::Wildcard,
            TypeData::TypeVar { .. } => NativeKind::TypeVar,
            TypeData::Primitive(_) => NativeKind::Primitive,
            TypeData::Void => NativeKind::Void,
            TypeData::NoType => NativeKind::None,
            TypeData::Null => NativeKind::Null,
        }
    }

    fn erasure(&self, ty: &MemType) -> MemType {
        self.handle(self.erase(ty.id))
    }

    fn is_subtype(&self, sub: &MemType, sup: &MemType) -> bool {
        sub.from_same_universe(sup) && subtyping::is_subtype(self, sub.id, sup.id)
    }

    fn enclosing_type(&self, ty: &MemType) -> Option<MemType> {
        let TypeData::Declared { decl, .. } = ty.data() else {
            return None;
        };
        self.element(decl)
            .enclosing_type_element()
            .map(|enclosing| self.raw(&enclosing))
    }

    fn wildcard_bounds(&self, ty: &MemType) -> (Option<MemType>, Option<MemType>) {
        match ty.data() {
            TypeData::Wildcard { extends, super_ } => (
                extends.map(|id| self.handle(id)),
                super_.map(|id| self.handle(id)),
            ),
            _ => (None, None),
        }
    }

    fn complete(&self, element: &MemElement) {
        self.complete(element.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::type_name::PrimitiveType;
    use crate::model::Quirks;

    #[test]
    fn test_raw_type_arguments_quirk() {
        let symbols = Universe::new(Backend::SymbolProcessing);
        let raw = symbols.raw(&symbols.find("java.util.Map").unwrap());
        let args: Vec<String> = raw.type_arguments().iter().map(|a| a.to_string()).collect();
        assert_eq!(args, vec!["K", "V"]);
        assert_eq!(raw.type_name().unwrap(), TypeName::class("java.util.Map"));

        let native = Universe::new(Backend::Native);
        let raw = native.raw(&native.find("java.util.Map").unwrap());
        assert!(raw.type_arguments().is_empty());
    }

    #[test]
    fn test_spurious_elements() {
        let u = Universe::new(Backend::SymbolProcessing);
        assert!(u.wildcard(None, None).type_element().is_some());
        assert!(u.primitive(PrimitiveType::Int).type_element().is_none());

        let ideal = Universe::with_quirks(Backend::SymbolProcessing, Quirks::none());
        assert!(ideal.wildcard(None, None).type_element().is_none());
    }

    #[test]
    fn test_error_types() {
        let u = Universe::new(Backend::Native);
        let missing = u.error("com.example.Missing");
        assert!(missing.is_error());
        assert_eq!(missing.to_string(), "com.example.Missing");
        assert!(missing.type_element().is_some());
        assert!(u.find("com.example.Missing").is_none());

        let gone = u.unresolved("com.example.Gone");
        assert!(gone.is_error());
        assert_eq!(gone.type_name().unwrap_err().type_name, "com.example.Gone");
        assert_eq!(u.kind(&gone), NativeKind::Error);
    }

    #[test]
    fn test_native_only_on_native_backend() {
        assert!(Universe::new(Backend::Native).native().is_some());
        assert!(Universe::new(Backend::SymbolProcessing).native().is_none());
    }

    #[test]
    fn test_native_erasure() {
        let u = Universe::new(Backend::Native);
        let list = u.find("java.util.List").unwrap();
        let number = u.class_type("java.lang.Number");
        let bounded = u.wildcard(Some(&u.declared(&list, &[number.clone()])), None);
        assert_eq!(u.erasure(&bounded).to_string(), "java.util.List");
        assert_eq!(u.erasure(&u.type_var("T", &[])).to_string(), "java.lang.Object");
    }

    #[test]
    fn test_elements_compare_by_universe() {
        let a = Universe::new(Backend::Native);
        let b = Universe::new(Backend::Native);
        assert_eq!(a.find("java.lang.String"), a.find("java.lang.String"));
        assert_ne!(a.find("java.lang.String"), b.find("java.lang.String"));
        assert!(!a.object().is_same_type(&b.object()));
    }

    #[test]
    fn test_enclosing_element() {
        let u = Universe::new(Backend::SymbolProcessing);
        let entry = u.find("java.util.Map.Entry").unwrap();
        let map = entry.enclosing_type_element().unwrap();
        assert_eq!(map.qualified_name(), "java.util.Map");
        assert!(!map.is_class());
        assert_eq!(map.declared_type().to_string(), "java.util.Map<K, V>");
    }
}
