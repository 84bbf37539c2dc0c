use super::{resolve_alias, MemberMap};
use crate::graph::{EdgeKind, Graph};
use crate::program::{Object, ObjectId, ProgramIndex, RefSite};
use std::collections::{HashSet, VecDeque};
use tracing::debug;

/// Interface satisfaction: every recorded concrete-to-interface assignment
/// pre-compiles dynamic dispatch into `Implements` edges from each interface
/// requirement to the matching concrete methods. A live interface type keeps
/// its requirements reachable, so a live assignment alone makes the
/// satisfying methods live, with no call expression in sight.
pub(crate) fn apply(index: &ProgramIndex<'_>, members: &MemberMap<'_>, graph: &mut Graph) {
    for obj_ref in index.objects() {
        let obj = obj_ref.object;
        for req in &obj.iface_methods {
            graph.add_edge(&obj.id, req, EdgeKind::Uses);
        }
    }

    for obj_ref in index.objects() {
        for site in &obj_ref.object.refs {
            if let RefSite::InterfaceAssign { concrete, iface } = site {
                satisfy(index, members, graph, concrete, iface);
            }
        }
    }
}

fn satisfy(
    index: &ProgramIndex<'_>,
    members: &MemberMap<'_>,
    graph: &mut Graph,
    concrete: &ObjectId,
    iface: &ObjectId,
) {
    let iface_id = resolve_alias(index, iface);
    let Some(iface_ref) = index.get(&iface_id) else {
        return;
    };

    let concrete_id = resolve_alias(index, concrete);
    let candidates = collect_methods(index, members, &concrete_id);

    for req_id in &iface_ref.object.iface_methods {
        let Some(req_ref) = index.get(req_id) else {
            continue;
        };

        for method in &candidates {
            if method.name == req_ref.object.name
                && sig_matches(&method.sig, &req_ref.object.sig)
            {
                debug!("{} satisfied by {}", req_id, method.id);
                graph.add_edge(req_id, &method.id, EdgeKind::Implements);
            }
        }
    }
}

/// The concrete method set, including methods promoted from embedded types
fn collect_methods<'a>(
    index: &ProgramIndex<'a>,
    members: &MemberMap<'a>,
    ty: &ObjectId,
) -> Vec<&'a Object> {
    let mut methods = Vec::new();
    let mut queue = VecDeque::new();
    let mut visited = HashSet::new();
    queue.push_back(ty.clone());

    while let Some(current) = queue.pop_front() {
        if !visited.insert(current.clone()) {
            continue;
        }

        methods.extend(members.methods(&current));

        if let Some(ty_ref) = index.get(&current) {
            for embedded in &ty_ref.object.embedded {
                queue.push_back(resolve_alias(index, embedded));
            }
        }
    }

    methods
}

/// A missing signature on either side matches anything: with an ambiguous
/// match the rule keeps every plausible candidate.
fn sig_matches(a: &Option<String>, b: &Option<String>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a == b,
        _ => true,
    }
}
