use super::MemberMap;
use crate::graph::{EdgeKind, Graph};
use crate::program::{ObjectKind, ProgramIndex, RefSite};
use tracing::debug;

/// Remaining pattern rules: alias propagation, no-copy sentinels, and
/// generic instantiation.
pub(crate) fn apply(index: &ProgramIndex<'_>, members: &MemberMap<'_>, graph: &mut Graph) {
    for obj_ref in index.objects() {
        let obj = obj_ref.object;

        // Alias propagation: either name being live makes both live.
        if let Some(target) = &obj.alias_of {
            graph.add_edge(&obj.id, target, EdgeKind::Uses);
            graph.add_edge(target, &obj.id, EdgeKind::Uses);
        }

        // No-copy sentinel: a zero-size type exposing exactly-named
        // Lock/Unlock methods exists for tooling side effects and is never
        // used syntactically.
        if obj.kind == ObjectKind::NamedType && obj.zero_sized {
            let lock = members.methods(&obj.id).find(|m| m.name == "Lock");
            let unlock = members.methods(&obj.id).find(|m| m.name == "Unlock");
            if let (Some(lock), Some(unlock)) = (lock, unlock) {
                debug!("no-copy sentinel {}", obj.id);
                graph.force_root(&obj.id);
                graph.force_root(&lock.id);
                graph.force_root(&unlock.id);
            }
        }

        // A live generic declaration keeps its own type parameters alive.
        for type_param in &obj.type_params {
            graph.add_edge(&obj.id, type_param, EdgeKind::Uses);
        }

        // Instantiation sites use the generic declaration and every concrete
        // type argument. Args hang off the instantiating declaration, so an
        // unused instantiation keeps nothing alive.
        for site in &obj.refs {
            if let RefSite::Instantiate { generic, type_args } = site {
                graph.add_edge(&obj.id, generic, EdgeKind::Uses);
                for arg in type_args {
                    graph.add_edge(&obj.id, arg, EdgeKind::Uses);
                }
            }
        }
    }
}
