use crate::annotations::AnnotationTable;
use crate::graph::{EdgeKind, Graph};
use crate::program::{ObjectId, ObjectKind};
use tracing::debug;

/// Suppression and linker directives from the annotation table.
pub(crate) fn apply(annotations: &AnnotationTable, graph: &mut Graph) {
    apply_suppressions(annotations, graph);
    apply_linknames(annotations, graph);
}

/// A suppression directive forces the covered declaration live; for types,
/// one level of `Owns` members comes along. Never recursive.
fn apply_suppressions(annotations: &AnnotationTable, graph: &mut Graph) {
    let covered: Vec<(ObjectId, ObjectKind)> = graph
        .decls()
        .filter(|d| annotations.suppression_at(&d.pos).is_some())
        .map(|d| (d.id.clone(), d.kind))
        .collect();

    for (id, kind) in covered {
        debug!("suppression directive forces {} live", id);
        graph.force_root(&id);

        if kind.is_type() {
            let members: Vec<ObjectId> = graph.members(&id).to_vec();
            for member in members {
                graph.force_root(&member);
            }
        }
    }
}

/// Linker aliases are bidirectional for liveness: every side that resolves
/// to a known declaration becomes live. An unresolved name is a no-op, never
/// an error, and never creates a node.
fn apply_linknames(annotations: &AnnotationTable, graph: &mut Graph) {
    for pair in annotations.linknames() {
        let local = graph
            .find_by_qualified_name(&pair.local)
            .map(|d| d.id.clone());
        let external = graph
            .find_by_qualified_name(&pair.external)
            .map(|d| d.id.clone());

        match (local, external) {
            (Some(local), Some(external)) => {
                graph.add_edge(&local, &external, EdgeKind::Linkname);
                graph.add_edge(&external, &local, EdgeKind::Linkname);
                graph.force_root(&local);
                graph.force_root(&external);
            }
            (Some(local), None) => {
                debug!(
                    "linkname {} has unresolved counterpart {}",
                    pair.local, pair.external
                );
                graph.force_root(&local);
            }
            (None, Some(external)) => {
                debug!(
                    "linkname {} has unresolved counterpart {}",
                    pair.external, pair.local
                );
                graph.force_root(&external);
            }
            (None, None) => {
                debug!(
                    "linkname pair {} <-> {} resolves to nothing",
                    pair.local, pair.external
                );
            }
        }
    }
}
