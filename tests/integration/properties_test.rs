//! Properties the sweep must hold regardless of program shape:
//! determinism across runs and monotonicity under added edges or roots.

use deadmark::{
    AnnotationTable, Analyzer, CancelToken, Config, Object, ObjectId, ObjectKind, Package,
    Position, RefSite, TypedProgram,
};

fn pos(line: usize) -> Position {
    Position::new("a.src", line, 1)
}

/// A mixed program: call chain, a cycle, a struct with fields, dead leaves
fn program() -> TypedProgram {
    TypedProgram::new().with_package(
        Package::command("app")
            .with_object(
                Object::new("app.main", "main", ObjectKind::Function, pos(1))
                    .with_ref(RefSite::call("app.serve"))
                    .with_ref(RefSite::positional_composite("app.state")),
            )
            .with_object(
                Object::new("app.serve", "serve", ObjectKind::Function, pos(2))
                    .with_ref(RefSite::call("app.route")),
            )
            .with_object(
                Object::new("app.route", "route", ObjectKind::Function, pos(3))
                    .with_ref(RefSite::call("app.serve")),
            )
            .with_object(
                Object::new("app.state", "state", ObjectKind::NamedType, pos(5))
                    .with_fields(vec![ObjectId::from("app.state.count")]),
            )
            .with_object(
                Object::new("app.state.count", "count", ObjectKind::Field, pos(6))
                    .with_owner("app.state"),
            )
            .with_object(Object::new("app.orphan", "orphan", ObjectKind::Function, pos(8)))
            .with_object(Object::new("app.leaf", "leaf", ObjectKind::Function, pos(9))),
    )
}

fn all_ids(program: &TypedProgram) -> Vec<ObjectId> {
    program
        .packages
        .iter()
        .flat_map(|p| p.objects.iter().map(|o| o.id.clone()))
        .collect()
}

#[test]
fn test_sweep_is_deterministic() {
    let program = program();
    let annotations = AnnotationTable::new();
    let graph = Analyzer::build_graph(&program, &annotations);
    let analyzer = Analyzer::new(Config::command());

    let first = analyzer.sweep_graph(&graph, &CancelToken::new()).unwrap();
    let second = analyzer.sweep_graph(&graph, &CancelToken::new()).unwrap();

    for id in all_ids(&program) {
        assert_eq!(first.is_used(&id), second.is_used(&id), "{id} diverged");
    }

    let first_order: Vec<_> = first.findings().map(|f| f.qualified_name.clone()).collect();
    let second_order: Vec<_> = second.findings().map(|f| f.qualified_name.clone()).collect();
    assert_eq!(first_order, second_order);
}

#[test]
fn test_adding_an_edge_is_monotonic() {
    let base = program();
    let annotations = AnnotationTable::new();
    let analyzer = Analyzer::new(Config::command());
    let before = analyzer.analyze(&base, &annotations).unwrap();

    // A new reference from a live declaration can only grow the live set.
    let mut extended = program();
    extended.packages[0]
        .objects
        .iter_mut()
        .find(|o| o.name == "route")
        .unwrap()
        .refs
        .push(RefSite::call("app.leaf"));
    let after = analyzer.analyze(&extended, &annotations).unwrap();

    for id in all_ids(&base) {
        if before.is_used(&id) {
            assert!(after.is_used(&id), "{id} moved from live to dead");
        }
    }
    assert!(after.is_used(&ObjectId::from("app.leaf")));
}

#[test]
fn test_adding_a_root_is_monotonic() {
    let program = program();
    let annotations = AnnotationTable::new();

    let before = Analyzer::new(Config::command())
        .analyze(&program, &annotations)
        .unwrap();

    let mut config = Config::command();
    config.roots.push("app.orphan".to_string());
    let after = Analyzer::new(config).analyze(&program, &annotations).unwrap();

    for id in all_ids(&program) {
        if before.is_used(&id) {
            assert!(after.is_used(&id), "{id} moved from live to dead");
        }
    }
    assert!(after.is_used(&ObjectId::from("app.orphan")));
}

#[test]
fn test_parallel_mode_sweeps_match_sequential() {
    let program = program();
    let annotations = AnnotationTable::new();
    let configs = vec![
        Config::command(),
        Config::command().with_tests(),
        Config::library(),
    ];

    let parallel = Analyzer::analyze_modes(&program, &annotations, &configs, &CancelToken::new());
    assert_eq!(parallel.len(), configs.len());

    for (config, result) in configs.iter().zip(parallel) {
        let report = result.unwrap();
        let sequential = Analyzer::new(config.clone())
            .analyze(&program, &annotations)
            .unwrap();

        for id in all_ids(&program) {
            assert_eq!(report.is_used(&id), sequential.is_used(&id));
        }
    }
}

#[test]
fn test_live_and_dead_partition_the_program() {
    let program = program();
    let report = Analyzer::new(Config::command())
        .analyze(&program, &AnnotationTable::new())
        .unwrap();

    for id in all_ids(&program) {
        let dead = report.all_dead().iter().any(|f| f.id == id);
        assert_ne!(report.is_used(&id), dead, "{id} is neither live nor dead");
    }
}
