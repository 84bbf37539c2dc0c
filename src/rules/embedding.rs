use super::{resolve_alias, MemberMap};
use crate::graph::{EdgeKind, Graph};
use crate::program::{ObjectId, ProgramIndex, RefSite};
use std::collections::{HashSet, VecDeque};
use tracing::debug;

/// Embedding: `Embeds` edges from outer types to embedded types, and
/// resolution of promoted selectors through the embedding chain.
pub(crate) fn apply(index: &ProgramIndex<'_>, members: &MemberMap<'_>, graph: &mut Graph) {
    for obj_ref in index.objects() {
        let obj = obj_ref.object;
        for embedded in &obj.embedded {
            graph.add_edge(&obj.id, embedded, EdgeKind::Embeds);
        }
    }

    for obj_ref in index.objects() {
        let obj = obj_ref.object;
        for site in &obj.refs {
            if let RefSite::Select { base, member } = site {
                resolve_selector(index, members, graph, &obj.id, base, member);
            }
        }
    }
}

/// Walk the embedding chain breadth-first from the selector's base type.
/// A hit adds `Uses` edges to the member and to every embedded type on the
/// path, even though the multi-level selector was never written out.
fn resolve_selector(
    index: &ProgramIndex<'_>,
    members: &MemberMap<'_>,
    graph: &mut Graph,
    from: &ObjectId,
    base: &ObjectId,
    member_name: &str,
) {
    let start = resolve_alias(index, base);
    let mut queue: VecDeque<(ObjectId, Vec<ObjectId>)> = VecDeque::new();
    let mut visited = HashSet::new();
    queue.push_back((start, Vec::new()));

    while let Some((ty, path)) = queue.pop_front() {
        if !visited.insert(ty.clone()) {
            continue;
        }

        if let Some(member) = members.members(&ty).iter().find(|m| m.name == member_name) {
            debug!("selector {}.{} resolves to {}", base, member_name, member.id);
            graph.add_edge(from, &member.id, EdgeKind::Uses);
            for hop in &path {
                graph.add_edge(from, hop, EdgeKind::Uses);
            }
            return;
        }

        if let Some(ty_ref) = index.get(&ty) {
            for embedded in &ty_ref.object.embedded {
                let next = resolve_alias(index, embedded);
                let mut next_path = path.clone();
                next_path.push(next.clone());
                queue.push_back((next, next_path));
            }
        }
    }

    // No local hit: the member is promoted from an unanalyzed type, which is
    // inherently live. Nothing to record.
}
