use typefacade::model::{Quirks, Universe};
use typefacade::{Backend, FacadeError, Kind, PrimitiveType, TypeFacade, TypeHandle, Workarounds};

fn universes() -> Vec<Universe> {
    vec![
        Universe::new(Backend::Native),
        Universe::new(Backend::SymbolProcessing),
        Universe::with_quirks(Backend::Native, Quirks::none()),
        Universe::with_quirks(Backend::SymbolProcessing, Quirks::none()),
    ]
}

#[test]
fn test_kind_names_agree_across_backends() {
    let facade = TypeFacade::default();
    for u in universes() {
        let string = u.class_type("java.lang.String");
        let list = u.find("java.util.List").unwrap();
        let cases = [
            (u.array(&string), "ARRAY"),
            (u.wildcard(Some(&string), None), "WILDCARD"),
            (u.type_var("T", &[]), "TYPEVAR"),
            (u.void(), "VOID"),
            (u.none(), "NONE"),
            (u.primitive(PrimitiveType::Char), "CHAR"),
            (u.primitive(PrimitiveType::Double), "DOUBLE"),
            (u.error("com.example.Missing"), "ERROR"),
            (u.declared(&list, &[string.clone()]), "DECLARED"),
            (string, "DECLARED"),
        ];
        for (ty, expected) in cases {
            assert_eq!(
                facade.kind_name(&ty).unwrap(),
                expected,
                "{} on {}",
                ty,
                u.backend()
            );
        }
    }
}

#[test]
fn test_primitive_void_is_not_primitive() {
    let facade = TypeFacade::default();
    for u in universes() {
        let void = u.primitive(PrimitiveType::Void);
        assert!(!facade.is_primitive(&void).unwrap());
        assert!(facade.is_void(&void));
        assert!(facade.is_no_type(&void));
        assert!(facade.is_no_type(&u.none()));
        assert!(!facade.is_no_type(&u.primitive(PrimitiveType::Int)));
    }
}

#[test]
fn test_arrays_and_wildcards_are_never_declared() {
    for workarounds in [Workarounds::all(), Workarounds::none()] {
        let facade = TypeFacade::new(workarounds);
        let u = Universe::with_quirks(Backend::SymbolProcessing, Quirks::none());
        let string = u.class_type("java.lang.String");
        assert!(!facade.is_declared(&u.array(&string)).unwrap());
        assert!(!facade.is_declared(&u.wildcard(None, None)).unwrap());
        assert!(facade.is_declared(&string).unwrap());
    }
}

#[test]
fn test_as_array() {
    let facade = TypeFacade::default();
    let u = Universe::new(Backend::SymbolProcessing);
    let int = u.primitive(PrimitiveType::Int);
    let component = facade.as_array(&u.array(&int)).unwrap();
    assert!(component.is_same_type(&int));
    assert!(facade.as_array(&int).is_none());
}

#[test]
fn test_wildcard_check_without_kind_tag() {
    let facade = TypeFacade::new(Workarounds {
        native_wildcard_kind_tag: false,
        ..Workarounds::all()
    });
    let u = Universe::new(Backend::Native);
    assert!(facade.is_wildcard(&u.wildcard(None, None)).unwrap());
    assert!(!facade.is_wildcard(&u.object()).unwrap());
}

#[test]
fn test_unresolved_types_surface_as_errors() {
    let facade = TypeFacade::default();
    for u in universes() {
        let gone = u.unresolved("com.example.Gone");
        let err = facade.is_primitive(&gone).unwrap_err();
        assert_eq!(err, FacadeError::TypeNotPresent("com.example.Gone".into()));
        assert!(!err.is_fatal());
        assert!(gone.is_error());
    }
}

#[test]
fn test_non_object_superclass() {
    let facade = TypeFacade::default();
    for u in universes() {
        let string = u.class_type("java.lang.String");
        let array_list = u.find("java.util.ArrayList").unwrap();
        let ty = u.declared(&array_list, &[string.clone()]);

        let superclass = facade.non_object_superclass(&ty).unwrap().unwrap();
        assert_eq!(superclass.to_string(), "java.util.AbstractList<java.lang.String>");

        assert!(facade.non_object_superclass(&string).unwrap().is_none());
        assert!(facade.non_object_superclass(&u.object()).unwrap().is_none());
        assert!(facade
            .non_object_superclass(&u.primitive(PrimitiveType::Int))
            .unwrap()
            .is_none());
    }
}

#[test]
fn test_ambiguous_superclass_is_fatal() {
    let facade = TypeFacade::default();
    let u = Universe::new(Backend::SymbolProcessing);
    let weird = u.declare_class("com.example.Weird", &[]);
    u.set_superclass(&weird, &u.class_type("java.lang.Number"));
    u.add_interface(&weird, &u.class_type("java.lang.String"));

    let err = facade.non_object_superclass(&u.raw(&weird)).unwrap_err();
    assert!(matches!(err, FacadeError::AmbiguousSuperclass { .. }));
    assert!(err.is_fatal());
}
