//! Tests for the pattern rules, exercised through the full pipeline.

use deadmark::{
    AnnotationTable, Analyzer, Config, Object, ObjectId, ObjectKind, Package, Position, RefSite,
    TypedProgram,
};

fn pos(line: usize) -> Position {
    Position::new("a.src", line, 1)
}

fn analyze(program: &TypedProgram, annotations: &AnnotationTable) -> deadmark::UsageReport {
    Analyzer::new(Config::command())
        .analyze(program, annotations)
        .unwrap()
}

/// Struct with two fields, ids "<pkg>.<name>.x" / "<pkg>.<name>.y"
fn struct_ty(name: &str) -> Vec<Object> {
    let ty_id = format!("pkg.{name}");
    let x_id = format!("pkg.{name}.x");
    let y_id = format!("pkg.{name}.y");
    vec![
        Object::new(ty_id.as_str(), name, ObjectKind::NamedType, pos(1)).with_fields(vec![
            ObjectId::from(x_id.as_str()),
            ObjectId::from(y_id.as_str()),
        ]),
        Object::new(x_id.as_str(), "x", ObjectKind::Field, pos(2)).with_owner(ty_id.as_str()),
        Object::new(y_id.as_str(), "y", ObjectKind::Field, pos(3)).with_owner(ty_id.as_str()),
    ]
}

#[test]
fn test_structural_conversion_spreads_field_liveness() {
    // A{x,y} and structurally identical B{x,y}; main holds both a live
    // conversion B(a) and a live positional literal A{1,2}.
    let mut package = Package::command("pkg");
    for obj in struct_ty("A") {
        package = package.with_object(obj);
    }
    for obj in struct_ty("B") {
        package = package.with_object(obj);
    }
    package = package.with_object(
        Object::new("pkg.main", "main", ObjectKind::Function, pos(10))
            .with_ref(RefSite::conversion("pkg.A", "pkg.B"))
            .with_ref(RefSite::positional_composite("pkg.A")),
    );
    let program = TypedProgram::new().with_package(package);

    let report = analyze(&program, &AnnotationTable::new());

    for id in ["pkg.A.x", "pkg.A.y", "pkg.B.x", "pkg.B.y"] {
        assert!(report.is_used(&ObjectId::from(id)), "{id} should be live");
    }
}

#[test]
fn test_interface_satisfaction_without_call_expression() {
    // interface I { Foo() }; type T with Foo; a live assignment of T{} to a
    // variable of type I makes T.Foo live with no direct call anywhere.
    let program = TypedProgram::new().with_package(
        Package::command("pkg")
            .with_object(
                Object::new("pkg.I", "I", ObjectKind::NamedType, pos(1))
                    .with_iface_methods(vec![ObjectId::from("pkg.I.Foo")])
                    .exported(),
            )
            .with_object(
                Object::new("pkg.I.Foo", "Foo", ObjectKind::Method, pos(2))
                    .with_owner("pkg.I")
                    .with_sig("func()")
                    .exported(),
            )
            .with_object(Object::new("pkg.T", "T", ObjectKind::NamedType, pos(4)).exported())
            .with_object(
                Object::new("pkg.T.Foo", "Foo", ObjectKind::Method, pos(5))
                    .with_owner("pkg.T")
                    .with_sig("func()")
                    .exported(),
            )
            .with_object(
                Object::new("pkg.T.Bar", "Bar", ObjectKind::Method, pos(6))
                    .with_owner("pkg.T")
                    .with_sig("func()")
                    .exported(),
            )
            .with_object(
                Object::new("pkg.main", "main", ObjectKind::Function, pos(8))
                    .with_ref(RefSite::interface_assign("pkg.T", "pkg.I")),
            ),
    );

    let report = analyze(&program, &AnnotationTable::new());

    assert!(report.is_used(&ObjectId::from("pkg.T.Foo")));
    // A method the interface never asks for stays dead.
    assert!(!report.is_used(&ObjectId::from("pkg.T.Bar")));
}

#[test]
fn test_linkname_with_unresolved_counterpart() {
    // Local symbol foo paired with external name other1; zero local refs.
    let program = TypedProgram::new().with_package(Package::new("pkg").with_object(Object::new(
        "pkg.foo",
        "foo",
        ObjectKind::Function,
        pos(1),
    )));

    let mut annotations = AnnotationTable::new();
    annotations.add_linkname("pkg.foo", "runtime.other1");

    let report = analyze(&program, &annotations);
    assert!(report.is_used(&ObjectId::from("pkg.foo")));
    assert_eq!(report.findings().count(), 0);
}

#[test]
fn test_suppression_forces_type_and_owned_members() {
    let mut package = Package::new("pkg");
    for obj in struct_ty("T") {
        package = package.with_object(obj);
    }
    package = package.with_object(
        Object::new("pkg.T.reset", "reset", ObjectKind::Method, pos(4)).with_owner("pkg.T"),
    );
    let program = TypedProgram::new().with_package(package);

    let mut annotations = AnnotationTable::new();
    annotations.suppress("a.src", 1, 1, "kept for reflection");

    let report = analyze(&program, &annotations);

    assert!(report.is_used(&ObjectId::from("pkg.T")));
    assert!(report.is_used(&ObjectId::from("pkg.T.x")));
    assert!(report.is_used(&ObjectId::from("pkg.T.y")));
    assert!(report.is_used(&ObjectId::from("pkg.T.reset")));
}

#[test]
fn test_suppression_propagates_one_level_only() {
    // outer embeds inner; suppressing outer must not force inner's members.
    let program = TypedProgram::new().with_package(
        Package::new("pkg")
            .with_object(
                Object::new("pkg.outer", "outer", ObjectKind::NamedType, pos(1))
                    .with_embedded(vec![ObjectId::from("pkg.inner")]),
            )
            .with_object(Object::new(
                "pkg.inner",
                "inner",
                ObjectKind::NamedType,
                pos(5),
            ))
            .with_object(
                Object::new("pkg.inner.m", "m", ObjectKind::Method, pos(6)).with_owner("pkg.inner"),
            ),
    );

    let mut annotations = AnnotationTable::new();
    annotations.suppress("a.src", 1, 1, "layout type");

    let report = analyze(&program, &annotations);

    assert!(report.is_used(&ObjectId::from("pkg.outer")));
    // Embeds edge keeps the inner type itself reachable from outer...
    assert!(report.is_used(&ObjectId::from("pkg.inner")));
    // ...but suppression never propagates through it to inner's members.
    assert!(!report.is_used(&ObjectId::from("pkg.inner.m")));
}

#[test]
fn test_promoted_selector_marks_embedded_member() {
    // main writes `o.m` where m lives on the embedded type, never naming
    // the full selector path.
    let program = TypedProgram::new().with_package(
        Package::command("pkg")
            .with_object(
                Object::new("pkg.outer", "outer", ObjectKind::NamedType, pos(1))
                    .with_embedded(vec![ObjectId::from("pkg.inner")]),
            )
            .with_object(Object::new(
                "pkg.inner",
                "inner",
                ObjectKind::NamedType,
                pos(3),
            ))
            .with_object(
                Object::new("pkg.inner.m", "m", ObjectKind::Method, pos(4)).with_owner("pkg.inner"),
            )
            .with_object(
                Object::new("pkg.inner.other", "other", ObjectKind::Method, pos(5))
                    .with_owner("pkg.inner"),
            )
            .with_object(
                Object::new("pkg.main", "main", ObjectKind::Function, pos(7))
                    .with_ref(RefSite::select("pkg.outer", "m")),
            ),
    );

    let report = analyze(&program, &AnnotationTable::new());

    assert!(report.is_used(&ObjectId::from("pkg.inner.m")));
    assert!(report.is_used(&ObjectId::from("pkg.inner")));
    assert!(!report.is_used(&ObjectId::from("pkg.inner.other")));
}

#[test]
fn test_nocopy_sentinel_is_never_reported() {
    let program = TypedProgram::new().with_package(
        Package::new("pkg")
            .with_object(
                Object::new("pkg.noCopy", "noCopy", ObjectKind::NamedType, pos(1)).zero_sized(),
            )
            .with_object(
                Object::new("pkg.noCopy.Lock", "Lock", ObjectKind::Method, pos(2))
                    .with_owner("pkg.noCopy")
                    .exported(),
            )
            .with_object(
                Object::new("pkg.noCopy.Unlock", "Unlock", ObjectKind::Method, pos(3))
                    .with_owner("pkg.noCopy")
                    .exported(),
            ),
    );

    let report = analyze(&program, &AnnotationTable::new());

    assert!(report.is_used(&ObjectId::from("pkg.noCopy")));
    assert!(report.is_used(&ObjectId::from("pkg.noCopy.Lock")));
    assert!(report.is_used(&ObjectId::from("pkg.noCopy.Unlock")));
    assert_eq!(report.findings().count(), 0);
}

#[test]
fn test_alias_keeps_target_live() {
    let program = TypedProgram::new().with_package(
        Package::command("pkg")
            .with_object(
                Object::new("pkg.Alias", "Alias", ObjectKind::NamedType, pos(1))
                    .with_alias_of("pkg.impl"),
            )
            .with_object(Object::new("pkg.impl", "impl", ObjectKind::NamedType, pos(2)))
            .with_object(
                Object::new("pkg.main", "main", ObjectKind::Function, pos(4))
                    .with_ref(RefSite::type_ref("pkg.Alias")),
            ),
    );

    let report = analyze(&program, &AnnotationTable::new());
    assert!(report.is_used(&ObjectId::from("pkg.Alias")));
    assert!(report.is_used(&ObjectId::from("pkg.impl")));
}

#[test]
fn test_used_instantiation_keeps_type_argument_live() {
    let generic = |line| {
        vec![
            Object::new("pkg.List", "List", ObjectKind::NamedType, pos(line))
                .with_type_params(vec![ObjectId::from("pkg.List.E")]),
            Object::new("pkg.List.E", "E", ObjectKind::TypeParam, pos(line)).with_owner("pkg.List"),
            Object::new("pkg.Item", "Item", ObjectKind::NamedType, pos(line + 1)),
        ]
    };

    // Instantiation inside a dead function keeps nothing alive.
    let mut dead_pkg = Package::command("pkg").with_object(Object::new(
        "pkg.main",
        "main",
        ObjectKind::Function,
        pos(10),
    ));
    for obj in generic(1) {
        dead_pkg = dead_pkg.with_object(obj);
    }
    dead_pkg = dead_pkg.with_object(
        Object::new("pkg.dead", "dead", ObjectKind::Function, pos(12)).with_ref(
            RefSite::instantiate("pkg.List", vec![ObjectId::from("pkg.Item")]),
        ),
    );
    let report = analyze(
        &TypedProgram::new().with_package(dead_pkg),
        &AnnotationTable::new(),
    );
    assert!(!report.is_used(&ObjectId::from("pkg.List")));
    assert!(!report.is_used(&ObjectId::from("pkg.Item")));

    // The same instantiation from main keeps generic, argument, and the
    // generic's own type parameter alive.
    let mut live_pkg = Package::command("pkg").with_object(
        Object::new("pkg.main", "main", ObjectKind::Function, pos(10)).with_ref(
            RefSite::instantiate("pkg.List", vec![ObjectId::from("pkg.Item")]),
        ),
    );
    for obj in generic(1) {
        live_pkg = live_pkg.with_object(obj);
    }
    let report = analyze(
        &TypedProgram::new().with_package(live_pkg),
        &AnnotationTable::new(),
    );
    assert!(report.is_used(&ObjectId::from("pkg.List")));
    assert!(report.is_used(&ObjectId::from("pkg.List.E")));
    assert!(report.is_used(&ObjectId::from("pkg.Item")));
}

#[test]
fn test_unsafe_conversion_floods_both_types() {
    let mut package = Package::new("pkg");
    for obj in struct_ty("A") {
        package = package.with_object(obj);
    }
    for obj in struct_ty("B") {
        package = package.with_object(obj);
    }
    package = package.with_object(
        Object::new("pkg.reinterpret", "reinterpret", ObjectKind::Function, pos(10)).with_ref(
            RefSite::UnsafeConversion {
                source: ObjectId::from("pkg.A"),
                dest: ObjectId::from("pkg.B"),
            },
        ),
    );
    let program = TypedProgram::new().with_package(package);

    let report = analyze(&program, &AnnotationTable::new());

    // The flood is unconditional: the fields stay live even though the
    // converting function itself is dead.
    assert!(!report.is_used(&ObjectId::from("pkg.reinterpret")));
    for id in ["pkg.A.x", "pkg.A.y", "pkg.B.x", "pkg.B.y"] {
        assert!(report.is_used(&ObjectId::from(id)), "{id} should be live");
    }
}
