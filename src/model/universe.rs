//! Interned type storage for the in-memory backend.
//!
//! Types are hash-consed: structurally equal types share one [`TypeId`], so
//! identity comparison is structural sameness. Type variables carry a serial
//! number and are therefore never merged. Declarations are registered by
//! class name; error declarations are synthesized per missing name and are
//! not findable.

use crate::core::backend::{Backend, Nullability, TypeNotPresent};
use crate::core::type_name::{ClassName, PrimitiveType, TypeName};
use crate::model::handle::{MemElement, MemType};
use dashmap::{DashMap, DashSet};
use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use tracing::{debug, trace};

/// Interned type identifier, valid only within the universe that minted it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct TypeId(u32);

/// Declaration identifier, valid only within the universe that minted it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct DeclId(u32);

/// `java.lang.Object` is always the first declaration.
pub(crate) const OBJECT_DECL: DeclId = DeclId(0);

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) enum TypeData {
    Declared { decl: DeclId, args: Vec<TypeId> },
    /// A reference to a missing class. Still has a (synthetic) declaration.
    Error { name: String, decl: DeclId },
    /// A reference that cannot even be named structurally.
    Unresolved { name: String },
    Array { component: TypeId },
    Wildcard {
        extends: Option<TypeId>,
        super_: Option<TypeId>,
    },
    TypeVar { name: String, serial: u32 },
    Primitive(PrimitiveType),
    Void,
    NoType,
    Null,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclKind {
    Class,
    Interface,
}

#[derive(Debug, Clone)]
pub(crate) struct Declaration {
    pub(crate) name: ClassName,
    pub(crate) kind: DeclKind,
    pub(crate) type_params: Vec<TypeId>,
    pub(crate) superclass: Option<TypeId>,
    pub(crate) interfaces: Vec<TypeId>,
    pub(crate) error: bool,
}

/// Representation gaps a backend exhibits.
///
/// [`Quirks::for_backend`] gives the behavior of the real backend each tag
/// stands for; [`Quirks::none`] gives an idealized model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quirks {
    /// Array and wildcard types carry a declaration handle.
    pub spurious_elements: bool,
    /// Raw types report their declaration's formal parameters as arguments.
    pub raw_type_arguments: bool,
    /// Names of nested declarations use `$` until completed, and the first
    /// projection of a declared type is memoized.
    pub premature_name_caching: bool,
}

impl Quirks {
    pub fn for_backend(backend: Backend) -> Self {
        match backend {
            Backend::Native => Self {
                spurious_elements: false,
                raw_type_arguments: false,
                premature_name_caching: true,
            },
            Backend::SymbolProcessing => Self {
                spurious_elements: true,
                raw_type_arguments: true,
                premature_name_caching: false,
            },
        }
    }

    pub fn none() -> Self {
        Self {
            spurious_elements: false,
            raw_type_arguments: false,
            premature_name_caching: false,
        }
    }
}

pub(crate) struct UniverseInner {
    pub(crate) backend: Backend,
    pub(crate) quirks: Quirks,
    types: DashMap<TypeId, TypeData>,
    interned: DashMap<TypeData, TypeId>,
    next_type: AtomicU32,
    next_serial: AtomicU32,
    var_bounds: DashMap<TypeId, Vec<TypeId>>,
    decls: DashMap<DeclId, Declaration>,
    by_name: DashMap<ClassName, DeclId>,
    error_decls: DashMap<String, DeclId>,
    next_decl: AtomicU32,
    completed: DashSet<DeclId>,
    name_cache: DashMap<TypeId, TypeName>,
}

/// A self-contained type universe acting as one backend's environment.
///
/// Cloning is cheap and yields a handle to the same universe. Comes
/// pre-populated with a slice of `java.lang` and `java.util`.
#[derive(Clone)]
pub struct Universe {
    pub(crate) inner: Arc<UniverseInner>,
}

impl Universe {
    pub fn new(backend: Backend) -> Self {
        Self::with_quirks(backend, Quirks::for_backend(backend))
    }

    pub fn with_quirks(backend: Backend, quirks: Quirks) -> Self {
        let universe = Self {
            inner: Arc::new(UniverseInner {
                backend,
                quirks,
                types: DashMap::with_capacity(256),
                interned: DashMap::with_capacity(256),
                next_type: AtomicU32::new(0),
                next_serial: AtomicU32::new(0),
                var_bounds: DashMap::new(),
                decls: DashMap::with_capacity(64),
                by_name: DashMap::with_capacity(64),
                error_decls: DashMap::new(),
                next_decl: AtomicU32::new(0),
                completed: DashSet::new(),
                name_cache: DashMap::new(),
            }),
        };
        universe.bootstrap();
        debug!(
            %backend,
            declarations = universe.inner.decls.len(),
            "Type universe created"
        );
        universe
    }

    fn bootstrap(&self) {
        let object = self.declare_class("java.lang.Object", &[]);
        debug_assert_eq!(object.id, OBJECT_DECL);

        let comparable = self.declare_interface("java.lang.Comparable", &["T"]);
        let string = self.declare_class("java.lang.String", &[]);
        self.add_interface(&string, &self.declared(&comparable, &[self.raw(&string)]));

        let number = self.declare_class("java.lang.Number", &[]);
        for primitive in PrimitiveType::ALL {
            let boxed = self.declare_class(&primitive.boxed().canonical_name(), &[]);
            if matches!(
                primitive,
                PrimitiveType::Byte
                    | PrimitiveType::Short
                    | PrimitiveType::Int
                    | PrimitiveType::Long
                    | PrimitiveType::Float
                    | PrimitiveType::Double
            ) {
                self.set_superclass(&boxed, &self.raw(&number));
            }
        }

        let iterable = self.declare_interface("java.lang.Iterable", &["T"]);
        let collection = self.generic_interface("java.util.Collection", "E", &iterable);
        let list = self.generic_interface("java.util.List", "E", &collection);
        self.generic_interface("java.util.Set", "E", &collection);
        self.declare_interface("java.util.Map", &["K", "V"]);
        self.declare_interface("java.util.Map.Entry", &["K", "V"]);

        let abstract_list = self.declare_class("java.util.AbstractList", &["E"]);
        let params = self.type_params(&abstract_list);
        self.add_interface(&abstract_list, &self.declared(&list, &params));

        let array_list = self.declare_class("java.util.ArrayList", &["E"]);
        let params = self.type_params(&array_list);
        self.set_superclass(&array_list, &self.declared(&abstract_list, &params));
        self.add_interface(&array_list, &self.declared(&list, &params));
    }

    fn generic_interface(&self, name: &str, param: &str, parent: &MemElement) -> MemElement {
        let element = self.declare_interface(name, &[param]);
        let params = self.type_params(&element);
        self.add_interface(&element, &self.declared(parent, &params));
        element
    }

    pub fn backend(&self) -> Backend {
        self.inner.backend
    }

    pub fn quirks(&self) -> Quirks {
        self.inner.quirks
    }

    // Declarations

    pub fn declare_class(&self, name: &str, type_params: &[&str]) -> MemElement {
        self.declare(name, DeclKind::Class, type_params)
    }

    pub fn declare_interface(&self, name: &str, type_params: &[&str]) -> MemElement {
        self.declare(name, DeclKind::Interface, type_params)
    }

    /// Register a declaration. Declaring an existing name returns the
    /// existing declaration unchanged.
    fn declare(&self, name: &str, kind: DeclKind, type_params: &[&str]) -> MemElement {
        let class_name = ClassName::parse(name);
        if let Some(existing) = self.inner.by_name.get(&class_name) {
            return self.element(*existing);
        }

        let params = type_params.iter().map(|p| self.fresh_var(p, &[])).collect();
        let id = self.alloc_decl(Declaration {
            name: class_name.clone(),
            kind,
            type_params: params,
            superclass: None,
            interfaces: Vec::new(),
            error: false,
        });
        let id = *self.inner.by_name.entry(class_name).or_insert(id);
        trace!(name, ?kind, "Declared");
        self.element(id)
    }

    fn alloc_decl(&self, declaration: Declaration) -> DeclId {
        let id = DeclId(self.inner.next_decl.fetch_add(1, Ordering::SeqCst));
        self.inner.decls.insert(id, declaration);
        id
    }

    pub fn set_superclass(&self, element: &MemElement, superclass: &MemType) {
        if let Some(mut decl) = self.inner.decls.get_mut(&element.id) {
            decl.superclass = Some(superclass.id);
        }
    }

    pub fn add_interface(&self, element: &MemElement, interface: &MemType) {
        if let Some(mut decl) = self.inner.decls.get_mut(&element.id) {
            decl.interfaces.push(interface.id);
        }
    }

    /// Formal type parameters of a declaration, as type variables.
    pub fn type_params(&self, element: &MemElement) -> Vec<MemType> {
        self.decl(element.id)
            .map(|decl| decl.type_params.iter().map(|&id| self.handle(id)).collect())
            .unwrap_or_default()
    }

    pub fn find(&self, name: &str) -> Option<MemElement> {
        self.inner
            .by_name
            .get(&ClassName::parse(name))
            .map(|id| self.element(*id))
    }

    // Types

    pub fn object(&self) -> MemType {
        self.handle(self.intern(TypeData::Declared {
            decl: OBJECT_DECL,
            args: Vec::new(),
        }))
    }

    /// The raw type of the named declaration, or an unresolved type if
    /// nothing by that name is declared.
    pub fn class_type(&self, name: &str) -> MemType {
        match self.find(name) {
            Some(element) => self.raw(&element),
            None => self.unresolved(name),
        }
    }

    pub fn declared(&self, element: &MemElement, args: &[MemType]) -> MemType {
        self.handle(self.intern(TypeData::Declared {
            decl: element.id,
            args: args.iter().map(|a| a.id).collect(),
        }))
    }

    pub fn raw(&self, element: &MemElement) -> MemType {
        self.declared(element, &[])
    }

    pub fn array(&self, component: &MemType) -> MemType {
        self.handle(self.intern(TypeData::Array {
            component: component.id,
        }))
    }

    pub fn wildcard(&self, extends: Option<&MemType>, super_: Option<&MemType>) -> MemType {
        self.handle(self.intern(TypeData::Wildcard {
            extends: extends.map(|t| t.id),
            super_: super_.map(|t| t.id),
        }))
    }

    /// A fresh type variable. Variables are never shared, even by name.
    pub fn type_var(&self, name: &str, bounds: &[MemType]) -> MemType {
        let bounds: Vec<TypeId> = bounds.iter().map(|b| b.id).collect();
        self.handle(self.fresh_var(name, &bounds))
    }

    fn fresh_var(&self, name: &str, bounds: &[TypeId]) -> TypeId {
        let serial = self.inner.next_serial.fetch_add(1, Ordering::SeqCst);
        let id = self.intern(TypeData::TypeVar {
            name: name.to_string(),
            serial,
        });
        self.inner.var_bounds.insert(id, bounds.to_vec());
        id
    }

    pub fn primitive(&self, primitive: PrimitiveType) -> MemType {
        match primitive {
            PrimitiveType::Void => self.void(),
            other => self.handle(self.intern(TypeData::Primitive(other))),
        }
    }

    pub fn void(&self) -> MemType {
        self.handle(self.intern(TypeData::Void))
    }

    pub fn none(&self) -> MemType {
        self.handle(self.intern(TypeData::NoType))
    }

    pub fn null(&self) -> MemType {
        self.handle(self.intern(TypeData::Null))
    }

    /// A reference to a missing class that still projects to a class name.
    pub fn error(&self, name: &str) -> MemType {
        let decl = *self
            .inner
            .error_decls
            .entry(name.to_string())
            .or_insert_with(|| {
                self.alloc_decl(Declaration {
                    name: ClassName::parse(name),
                    kind: DeclKind::Class,
                    type_params: Vec::new(),
                    superclass: None,
                    interfaces: Vec::new(),
                    error: true,
                })
            });
        self.handle(self.intern(TypeData::Error {
            name: name.to_string(),
            decl,
        }))
    }

    /// A reference whose projection fails with [`TypeNotPresent`].
    pub fn unresolved(&self, name: &str) -> MemType {
        self.handle(self.intern(TypeData::Unresolved {
            name: name.to_string(),
        }))
    }

    pub fn with_nullability(&self, ty: &MemType, nullability: Nullability) -> MemType {
        MemType {
            nullability,
            ..ty.clone()
        }
    }

    pub fn is_completed(&self, element: &MemElement) -> bool {
        self.inner.completed.contains(&element.id)
    }

    // Internals shared with the handle and subtyping modules

    pub(crate) fn handle(&self, id: TypeId) -> MemType {
        MemType {
            universe: self.clone(),
            id,
            nullability: Nullability::Unknown,
        }
    }

    pub(crate) fn element(&self, id: DeclId) -> MemElement {
        MemElement {
            universe: self.clone(),
            id,
        }
    }

    pub(crate) fn intern(&self, data: TypeData) -> TypeId {
        if let Some(id) = self.inner.interned.get(&data) {
            return *id;
        }
        *self.inner.interned.entry(data.clone()).or_insert_with(|| {
            let id = TypeId(self.inner.next_type.fetch_add(1, Ordering::SeqCst));
            self.inner.types.insert(id, data);
            id
        })
    }

    /// Ids are only minted by `intern`, so every id has data.
    pub(crate) fn data(&self, id: TypeId) -> TypeData {
        self.inner
            .types
            .get(&id)
            .map(|data| data.value().clone())
            .unwrap_or(TypeData::NoType)
    }

    pub(crate) fn decl(&self, id: DeclId) -> Option<Declaration> {
        self.inner.decls.get(&id).map(|decl| decl.value().clone())
    }

    pub(crate) fn find_decl(&self, name: &ClassName) -> Option<DeclId> {
        self.inner.by_name.get(name).map(|id| *id)
    }

    /// Declared bounds of a type variable; `Object` when it has none.
    pub(crate) fn bounds_of(&self, var: TypeId) -> Vec<TypeId> {
        let bounds = self
            .inner
            .var_bounds
            .get(&var)
            .map(|b| b.value().clone())
            .unwrap_or_default();
        if bounds.is_empty() {
            vec![self.object().id]
        } else {
            bounds
        }
    }

    pub(crate) fn complete(&self, id: DeclId) {
        if self.inner.completed.insert(id) {
            trace!(?id, "Completed declaration");
        }
    }

    /// Whether a declaration still reports its binary (`$`) name.
    pub(crate) fn reports_binary_name(&self, id: DeclId, decl: &Declaration) -> bool {
        self.inner.quirks.premature_name_caching
            && !decl.error
            && decl.name.simple_names().len() > 1
            && !self.inner.completed.contains(&id)
    }

    /// Class name as the backend currently reports it.
    pub(crate) fn reported_class_name(&self, id: DeclId, decl: &Declaration) -> ClassName {
        if self.reports_binary_name(id, decl) {
            ClassName::top_level(decl.name.package_name(), decl.name.simple_names().join("$"))
        } else {
            decl.name.clone()
        }
    }

    /// Replace type variables according to `mapping`.
    pub(crate) fn substitute(&self, id: TypeId, mapping: &[(TypeId, TypeId)]) -> TypeId {
        if let Some(&(_, to)) = mapping.iter().find(|(from, _)| *from == id) {
            return to;
        }
        match self.data(id) {
            TypeData::Declared { decl, args } => {
                let args = args.iter().map(|&a| self.substitute(a, mapping)).collect();
                self.intern(TypeData::Declared { decl, args })
            }
            TypeData::Array { component } => {
                let component = self.substitute(component, mapping);
                self.intern(TypeData::Array { component })
            }
            TypeData::Wildcard { extends, super_ } => self.intern(TypeData::Wildcard {
                extends: extends.map(|e| self.substitute(e, mapping)),
                super_: super_.map(|s| self.substitute(s, mapping)),
            }),
            _ => id,
        }
    }

    /// Type erasure following the language rules.
    pub(crate) fn erase(&self, id: TypeId) -> TypeId {
        match self.data(id) {
            TypeData::Declared { decl, .. } => self.intern(TypeData::Declared {
                decl,
                args: Vec::new(),
            }),
            TypeData::Array { component } => {
                let component = self.erase(component);
                self.intern(TypeData::Array { component })
            }
            TypeData::TypeVar { .. } => match self.bounds_of(id).first() {
                Some(&bound) => self.erase(bound),
                None => self.object().id,
            },
            TypeData::Wildcard { extends, .. } => match extends {
                Some(bound) => self.erase(bound),
                None => self.object().id,
            },
            _ => id,
        }
    }

    /// Direct supertypes with the type's arguments applied.
    ///
    /// Supertypes of a raw type are erased. Classes without an explicit
    /// superclass extend `Object`, as do interfaces without superinterfaces.
    pub(crate) fn super_type_ids(&self, id: TypeId) -> Vec<TypeId> {
        match self.data(id) {
            TypeData::Declared { decl: decl_id, args } => {
                let Some(decl) = self.decl(decl_id) else {
                    return Vec::new();
                };
                if decl_id == OBJECT_DECL {
                    return Vec::new();
                }

                let mut supers = Vec::new();
                match (decl.kind, decl.superclass) {
                    (_, Some(superclass)) => supers.push(superclass),
                    (DeclKind::Class, None) => supers.push(self.object().id),
                    (DeclKind::Interface, None) => {}
                }
                supers.extend(decl.interfaces.iter().copied());
                if supers.is_empty() {
                    supers.push(self.object().id);
                }

                if args.is_empty() && !decl.type_params.is_empty() {
                    supers.into_iter().map(|s| self.erase(s)).collect()
                } else if args.len() == decl.type_params.len() {
                    let mapping: Vec<(TypeId, TypeId)> = decl
                        .type_params
                        .iter()
                        .copied()
                        .zip(args.iter().copied())
                        .collect();
                    supers
                        .into_iter()
                        .map(|s| self.substitute(s, &mapping))
                        .collect()
                } else {
                    supers
                }
            }
            TypeData::TypeVar { .. } => self.bounds_of(id),
            TypeData::Array { .. } => vec![self.object().id],
            _ => Vec::new(),
        }
    }

    /// Structural projection.
    ///
    /// With `memoize` set and the caching quirk active, the first projection
    /// of every declared type is stored and returned from then on.
    pub(crate) fn project(&self, id: TypeId, memoize: bool) -> Result<TypeName, TypeNotPresent> {
        self.project_in(id, memoize, &mut Vec::new())
    }

    fn project_in(
        &self,
        id: TypeId,
        memoize: bool,
        open_vars: &mut Vec<TypeId>,
    ) -> Result<TypeName, TypeNotPresent> {
        match self.data(id) {
            TypeData::Declared { decl: decl_id, args } => {
                if let Some(cached) = self.inner.name_cache.get(&id) {
                    return Ok(cached.value().clone());
                }
                let Some(decl) = self.decl(decl_id) else {
                    return Err(TypeNotPresent::new(format!("{:?}", decl_id)));
                };
                let raw = self.reported_class_name(decl_id, &decl);
                let args = args
                    .iter()
                    .map(|&a| self.project_in(a, memoize, open_vars))
                    .collect::<Result<Vec<_>, _>>()?;
                let name = if args.is_empty() {
                    TypeName::Class(raw)
                } else {
                    TypeName::Parameterized { raw, args }
                };
                if memoize && self.inner.quirks.premature_name_caching {
                    self.inner.name_cache.insert(id, name.clone());
                }
                Ok(name)
            }
            TypeData::Error { name, .. } => Ok(TypeName::Class(ClassName::parse(&name))),
            TypeData::Unresolved { name } => Err(TypeNotPresent::new(name)),
            TypeData::Array { component } => Ok(TypeName::array_of(
                self.project_in(component, memoize, open_vars)?,
            )),
            TypeData::Wildcard { extends, super_ } => {
                let upper = extends
                    .map(|e| self.project_in(e, memoize, open_vars))
                    .transpose()?;
                let lower = super_
                    .map(|s| self.project_in(s, memoize, open_vars))
                    .transpose()?;
                Ok(match (upper, lower) {
                    (None, None) => TypeName::unbounded_wildcard(),
                    (Some(upper), None) => TypeName::subtype_of(upper),
                    (None, Some(lower)) => TypeName::supertype_of(lower),
                    (Some(upper), Some(lower)) => TypeName::Wildcard {
                        upper_bounds: vec![upper],
                        lower_bounds: vec![lower],
                    },
                })
            }
            TypeData::TypeVar { name, .. } => {
                // Recursive bounds such as `T extends Comparable<T>`.
                if open_vars.contains(&id) {
                    return Ok(TypeName::type_variable(name, Vec::new()));
                }
                open_vars.push(id);
                let bounds = self
                    .bounds_of(id)
                    .into_iter()
                    .map(|b| self.project_in(b, memoize, open_vars))
                    .collect::<Result<Vec<_>, _>>();
                open_vars.pop();
                Ok(TypeName::type_variable(name, bounds?))
            }
            TypeData::Primitive(primitive) => Ok(TypeName::Primitive(primitive)),
            TypeData::Void | TypeData::NoType => Ok(TypeName::Primitive(PrimitiveType::Void)),
            TypeData::Null => Ok(TypeName::object()),
        }
    }
}

impl fmt::Debug for Universe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Universe")
            .field("backend", &self.inner.backend)
            .field("quirks", &self.inner.quirks)
            .field("types", &self.inner.types.len())
            .field("declarations", &self.inner.decls.len())
            .finish()
    }
}
