use typefacade::model::{Quirks, Universe};
use typefacade::{Backend, FacadeConfig, Kind, TypeElement, TypeFacade, TypeHandle, Workarounds};

fn nested_wildcard(u: &Universe) -> typefacade::model::MemType {
    let inner = u.declare_class("com.example.Outer.Inner", &[]);
    u.wildcard(Some(&u.raw(&inner)), None)
}

#[test]
fn test_kind_tag_avoids_caching_binary_names() {
    let facade = TypeFacade::default();
    let u = Universe::new(Backend::Native);
    let wildcard = nested_wildcard(&u);

    assert_eq!(facade.classify(&wildcard).unwrap(), Kind::Wildcard);
    let stats = facade.force_resolution(&wildcard).unwrap();
    assert_eq!(stats.completed, 1);
    assert_eq!(
        facade.to_stable_string(&wildcard).unwrap(),
        "? extends com.example.Outer.Inner"
    );
}

#[test]
fn test_name_based_wildcard_check_caches_binary_name() {
    let facade = TypeFacade::new(Workarounds {
        native_wildcard_kind_tag: false,
        ..Workarounds::all()
    });
    let u = Universe::new(Backend::Native);
    let wildcard = nested_wildcard(&u);

    assert_eq!(facade.classify(&wildcard).unwrap(), Kind::Wildcard);
    facade.force_resolution(&wildcard).unwrap();
    assert_eq!(
        facade.to_stable_string(&wildcard).unwrap(),
        "? extends com.example.Outer$Inner"
    );
}

#[test]
fn test_idealized_native_model_needs_no_resolution() {
    let facade = TypeFacade::new(Workarounds::none());
    let u = Universe::with_quirks(Backend::Native, Quirks::none());
    let wildcard = nested_wildcard(&u);

    assert_eq!(facade.classify(&wildcard).unwrap(), Kind::Wildcard);
    assert_eq!(
        facade.to_stable_string(&wildcard).unwrap(),
        "? extends com.example.Outer.Inner"
    );
}

#[test]
fn test_resolution_disabled_by_config() {
    let config = FacadeConfig::parse(
        r#"
[workarounds]
native_eager_resolution = false
"#,
    )
    .unwrap();
    let facade = TypeFacade::from_config(&config);
    assert!(facade.workarounds().native_wildcard_kind_tag);

    let u = Universe::new(Backend::Native);
    let entry = u.find("java.util.Map.Entry").unwrap();
    let stats = facade.force_resolution(&u.raw(&entry)).unwrap();
    assert_eq!(stats.completed, 0);
    assert!(!u.is_completed(&entry));
    assert_eq!(entry.qualified_name(), "java.util.Map$Entry");
}

#[test]
fn test_resolution_reaches_type_arguments() {
    let facade = TypeFacade::default();
    let u = Universe::new(Backend::Native);
    let list = u.find("java.util.List").unwrap();
    let entry = u.find("java.util.Map.Entry").unwrap();
    let string = u.class_type("java.lang.String");
    let ty = u.declared(&list, &[u.declared(&entry, &[string.clone(), string])]);

    facade.force_resolution(&ty).unwrap();
    assert!(u.is_completed(&entry));
    assert_eq!(
        facade.to_stable_string(&ty).unwrap(),
        "java.util.List<java.util.Map.Entry<java.lang.String,java.lang.String>>"
    );
    assert_eq!(ty.type_arguments().len(), 1);
}
