//! Structural queries derived from the classification predicates.

use crate::analysis::dispatch::{backend_of, native_types};
use crate::analysis::facade::TypeFacade;
use crate::core::backend::{Backend, TypeElement, TypeHandle};
use crate::core::type_name::ClassName;
use crate::errors::{FacadeError, FacadeResult};
use tracing::{error, trace};

impl TypeFacade {
    /// Whether `ty` is assignable to `target`, i.e. `target` accepts `ty`.
    pub fn is_assignable_to<T: TypeHandle>(&self, ty: &T, target: &T) -> bool {
        target.is_assignable_from(ty)
    }

    /// Whether `sub` is a subtype of `sup`.
    pub fn is_subtype<T: TypeHandle>(&self, sub: &T, sup: &T) -> FacadeResult<bool> {
        match backend_of(sub) {
            Backend::Native => {
                let native = native_types(sub, "is_subtype")?;
                Ok(native.is_subtype(sub, sup))
            }
            Backend::SymbolProcessing => {
                if self.is_primitive(sub)? || self.is_primitive(sup)? {
                    // Boxing makes primitives and their wrappers mutually
                    // assignable, but neither is a subtype of the other.
                    return Ok(sub.is_same_type(sup));
                }
                Ok(self.is_assignable_to(sub, sup))
            }
        }
    }

    /// Whether `ty` references a generic declaration without type arguments.
    pub fn is_raw_parameterized_type<T: TypeHandle>(&self, ty: &T) -> FacadeResult<bool> {
        if !self.is_declared(ty)? {
            return Ok(false);
        }
        let Some(element) = ty.type_element() else {
            return Ok(false);
        };
        let generic = !element.declared_type().type_arguments().is_empty();

        match backend_of(ty) {
            Backend::Native => Ok(generic && ty.type_arguments().is_empty()),
            Backend::SymbolProcessing => {
                if !self.workarounds.symbol_raw_type_name_compare {
                    return Ok(generic && ty.type_arguments().is_empty());
                }
                // Raw types report their formal parameters as type arguments on
                // this backend, but their type name matches the raw type's.
                let Some(raw) = ty.raw_type() else {
                    return Ok(false);
                };
                Ok(generic && ty.type_name()? == raw.type_name()?)
            }
        }
    }

    pub fn has_type_parameters<T: TypeHandle>(&self, ty: &T) -> bool {
        !ty.type_arguments().is_empty()
    }

    /// Whether `ty` is declared by the class named `class_name`.
    pub fn is_type_of<T: TypeHandle>(&self, ty: &T, class_name: &ClassName) -> FacadeResult<bool> {
        if !self.is_declared(ty)? {
            return Ok(false);
        }
        Ok(ty
            .type_element()
            .is_some_and(|element| element.class_name() == *class_name))
    }

    /// Whether two handles project to the same type name.
    pub fn are_equivalent_types<T: TypeHandle>(&self, a: &T, b: &T) -> FacadeResult<bool> {
        Ok(a.type_name()? == b.type_name()?)
    }

    /// The superclass of `ty` other than `Object`, with type arguments applied.
    ///
    /// `None` when `ty` is not declared or only extends `Object`. More than one
    /// candidate means the backend reported an impossible hierarchy.
    pub fn non_object_superclass<T: TypeHandle>(&self, ty: &T) -> FacadeResult<Option<T>> {
        if !self.is_declared(ty)? {
            return Ok(None);
        }

        let mut candidates = Vec::new();
        for supertype in ty.super_types() {
            if supertype.type_name()?.is_object() || !self.is_declared(&supertype)? {
                continue;
            }
            if supertype.type_element().is_some_and(|e| e.is_class()) {
                candidates.push(supertype);
            }
        }

        if candidates.len() > 1 {
            let candidates: Vec<String> = candidates.iter().map(|c| c.to_string()).collect();
            error!(ty = %ty, ?candidates, "Backend reported several class supertypes");
            return Err(FacadeError::AmbiguousSuperclass {
                ty: ty.to_string(),
                candidates,
            });
        }
        Ok(candidates.pop())
    }

    /// The single type argument of `ty`, e.g. `Number` for `List<Number>`.
    ///
    /// For a raw `List` this falls back to the declaration's formal parameter.
    /// Fails unless `ty` is declared with exactly one type parameter.
    pub fn unwrap_type<T: TypeHandle>(&self, ty: &T) -> FacadeResult<T> {
        let formal = self.sole_type_parameter(ty)?;
        self.unwrap_type_or_default(ty, Some(formal))?
            .ok_or_else(|| FacadeError::RawType(ty.to_string()))
    }

    /// The single type argument of `ty`, or `default` if `ty` is raw.
    pub fn unwrap_type_or_default<T: TypeHandle>(
        &self,
        ty: &T,
        default: Option<T>,
    ) -> FacadeResult<Option<T>> {
        // Validate against the declaration since `ty` itself may be raw.
        self.sole_type_parameter(ty)?;

        let mut arguments = ty.type_arguments();
        match arguments.len() {
            0 => {
                trace!(ty = %ty, "Unwrapping raw type");
                Ok(default)
            }
            1 => Ok(arguments.pop()),
            _ => Err(FacadeError::NotSingleParameter {
                element: ty.to_string(),
                found: arguments.iter().map(|a| a.to_string()).collect(),
            }),
        }
    }

    fn sole_type_parameter<T: TypeHandle>(&self, ty: &T) -> FacadeResult<T> {
        if !self.is_declared(ty)? {
            return Err(FacadeError::not_declared(ty, "unwrap_type"));
        }
        let element = ty
            .type_element()
            .ok_or_else(|| FacadeError::not_declared(ty, "unwrap_type"))?;

        let mut parameters = element.declared_type().type_arguments();
        if parameters.len() != 1 {
            return Err(FacadeError::NotSingleParameter {
                element: element.qualified_name(),
                found: parameters.iter().map(|p| p.to_string()).collect(),
            });
        }
        Ok(parameters.remove(0))
    }

    /// Fails with `TypeNotPresent` if `ty` or any type it is built from is unresolved.
    pub fn check_type_present<T: TypeHandle>(&self, ty: &T) -> FacadeResult<()> {
        if let Some(component) = ty.component_type() {
            return self.check_type_present(&component);
        }
        if ty.is_error() {
            return Err(FacadeError::TypeNotPresent(ty.to_string()));
        }
        if self.is_declared(ty)? {
            for argument in ty.type_arguments() {
                self.check_type_present(&argument)?;
            }
        }
        Ok(())
    }

    /// The type enclosing a nested declared type.
    ///
    /// On the symbol-processing backend this is the enclosing declaration's own
    /// type, so `Outer<Foo>.Inner` yields `Outer<T>` rather than `Outer<Foo>`.
    pub fn enclosing_type<T: TypeHandle>(&self, ty: &T) -> FacadeResult<Option<T>> {
        if !self.is_declared(ty)? {
            return Err(FacadeError::not_declared(ty, "enclosing_type"));
        }
        match backend_of(ty) {
            Backend::Native => Ok(native_types(ty, "enclosing_type")?.enclosing_type(ty)),
            Backend::SymbolProcessing => Ok(ty
                .type_element()
                .and_then(|element| element.enclosing_type_element())
                .map(|enclosing| enclosing.declared_type())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::type_name::{PrimitiveType, TypeName};
    use crate::frontend::config::Workarounds;
    use crate::model::Universe;

    #[test]
    fn test_primitive_subtyping_on_symbol_backend() {
        let facade = TypeFacade::default();
        let u = Universe::new(Backend::SymbolProcessing);
        let int = u.primitive(PrimitiveType::Int);
        let integer = u.class_type("java.lang.Integer");

        assert!(facade.is_assignable_to(&int, &integer));
        assert!(!facade.is_subtype(&int, &integer).unwrap());
        assert!(!facade.is_subtype(&integer, &int).unwrap());
        assert!(facade.is_subtype(&int, &int).unwrap());
    }

    #[test]
    fn test_native_subtyping() {
        let facade = TypeFacade::default();
        let u = Universe::new(Backend::Native);
        let array_list = u.find("java.util.ArrayList").unwrap();
        let list = u.find("java.util.List").unwrap();
        let string = u.class_type("java.lang.String");

        let sub = u.declared(&array_list, &[string.clone()]);
        let sup = u.declared(&list, &[string]);
        assert!(facade.is_subtype(&sub, &sup).unwrap());
        assert!(!facade.is_subtype(&sup, &sub).unwrap());
        assert!(facade.is_subtype(&sub, &u.object()).unwrap());
    }

    #[test]
    fn test_raw_type_detection() {
        let facade = TypeFacade::default();
        for backend in [Backend::Native, Backend::SymbolProcessing] {
            let u = Universe::new(backend);
            let list = u.find("java.util.List").unwrap();
            let raw = u.raw(&list);
            let parameterized = u.declared(&list, &[u.class_type("java.lang.String")]);

            assert!(facade.is_raw_parameterized_type(&raw).unwrap(), "{backend}");
            assert!(!facade.is_raw_parameterized_type(&parameterized).unwrap());
            assert!(!facade.is_raw_parameterized_type(&u.class_type("java.lang.String")).unwrap());
        }
    }

    #[test]
    fn test_raw_type_needs_name_compare_on_symbol_backend() {
        let u = Universe::new(Backend::SymbolProcessing);
        let raw = u.raw(&u.find("java.util.List").unwrap());
        // The backend reports the formal parameter as an argument.
        assert_eq!(raw.type_arguments().len(), 1);

        let naive = TypeFacade::new(Workarounds {
            symbol_raw_type_name_compare: false,
            ..Workarounds::all()
        });
        assert!(!naive.is_raw_parameterized_type(&raw).unwrap());
        assert!(TypeFacade::default().is_raw_parameterized_type(&raw).unwrap());
    }

    #[test]
    fn test_unwrap_type() {
        let facade = TypeFacade::default();
        for backend in [Backend::Native, Backend::SymbolProcessing] {
            let u = Universe::new(backend);
            let list = u.find("java.util.List").unwrap();
            let string = u.class_type("java.lang.String");

            let unwrapped = facade.unwrap_type(&u.declared(&list, &[string.clone()])).unwrap();
            assert!(unwrapped.is_same_type(&string));

            let from_raw = facade.unwrap_type(&u.raw(&list)).unwrap();
            assert_eq!(from_raw.type_name().unwrap().to_string(), "E");
        }
    }

    #[test]
    fn test_unwrap_type_or_default_on_raw() {
        let facade = TypeFacade::default();
        let u = Universe::new(Backend::Native);
        let raw = u.raw(&u.find("java.util.List").unwrap());
        assert!(facade.unwrap_type_or_default(&raw, None).unwrap().is_none());
    }

    #[test]
    fn test_unwrap_type_rejects_two_parameters() {
        let facade = TypeFacade::default();
        let u = Universe::new(Backend::Native);
        let map = u.find("java.util.Map").unwrap();
        let string = u.class_type("java.lang.String");
        let err = facade
            .unwrap_type(&u.declared(&map, &[string.clone(), string]))
            .unwrap_err();
        assert!(matches!(err, FacadeError::NotSingleParameter { .. }));
        assert_eq!(err.kind(), crate::errors::ErrorKind::ContractViolation);
    }

    #[test]
    fn test_unwrap_type_rejects_non_declared() {
        let facade = TypeFacade::default();
        let u = Universe::new(Backend::SymbolProcessing);
        let err = facade.unwrap_type(&u.primitive(PrimitiveType::Int)).unwrap_err();
        assert!(matches!(err, FacadeError::NotDeclared { .. }));
    }

    #[test]
    fn test_is_type_of() {
        let facade = TypeFacade::default();
        let u = Universe::new(Backend::SymbolProcessing);
        let list = u.find("java.util.List").unwrap();
        let ty = u.declared(&list, &[u.class_type("java.lang.String")]);
        assert!(facade.is_type_of(&ty, &ClassName::parse("java.util.List")).unwrap());
        assert!(!facade.is_type_of(&ty, &ClassName::parse("java.util.Set")).unwrap());
        assert!(!facade
            .is_type_of(&u.array(&ty), &ClassName::parse("java.util.List"))
            .unwrap());
    }

    #[test]
    fn test_check_type_present() {
        let facade = TypeFacade::default();
        for backend in [Backend::Native, Backend::SymbolProcessing] {
            let u = Universe::new(backend);
            let list = u.find("java.util.List").unwrap();
            let ok = u.declared(&list, &[u.class_type("java.lang.String")]);
            assert!(facade.check_type_present(&ok).is_ok());

            let missing = u.error("com.example.Missing");
            let nested = u.array(&u.declared(&list, &[missing]));
            let err = facade.check_type_present(&nested).unwrap_err();
            assert_eq!(err, FacadeError::TypeNotPresent("com.example.Missing".into()));
        }
    }

    #[test]
    fn test_enclosing_type() {
        let facade = TypeFacade::default();
        for backend in [Backend::Native, Backend::SymbolProcessing] {
            let u = Universe::new(backend);
            let entry = u.find("java.util.Map.Entry").unwrap();
            let string = u.class_type("java.lang.String");
            let ty = u.declared(&entry, &[string.clone(), string]);

            let enclosing = facade.enclosing_type(&ty).unwrap().unwrap();
            assert_eq!(
                facade.erased_type_name(&enclosing).unwrap(),
                TypeName::class("java.util.Map")
            );
            assert!(facade.enclosing_type(&u.object()).unwrap().is_none());
        }
    }

    #[test]
    fn test_are_equivalent_types() {
        let facade = TypeFacade::default();
        let u = Universe::new(Backend::Native);
        let a = u.class_type("java.lang.String");
        let b = u.class_type("java.lang.String");
        assert!(facade.are_equivalent_types(&a, &b).unwrap());
        assert!(!facade.are_equivalent_types(&a, &u.object()).unwrap());
    }
}
