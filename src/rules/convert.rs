use super::resolve_alias;
use crate::graph::{EdgeKind, Graph};
use crate::program::{ObjectId, ProgramIndex, RefSite};
use tracing::debug;

/// Structural conversion: a conversion between structurally identical struct
/// types links corresponding fields in both directions, so usage on either
/// side propagates to the other.
pub(crate) fn apply(index: &ProgramIndex<'_>, graph: &mut Graph) {
    for obj_ref in index.objects() {
        for site in &obj_ref.object.refs {
            if let RefSite::Conversion { source, dest } = site {
                link_fields(index, graph, source, dest);
            }
        }
    }
}

fn link_fields(
    index: &ProgramIndex<'_>,
    graph: &mut Graph,
    source: &ObjectId,
    dest: &ObjectId,
) {
    let src_id = resolve_alias(index, source);
    let dst_id = resolve_alias(index, dest);

    let (Some(src), Some(dst)) = (index.get(&src_id), index.get(&dst_id)) else {
        return;
    };

    // The conversion type-checked, so the underlying structures are
    // identical and fields correspond pairwise in declaration order.
    for (a, b) in src.object.fields.iter().zip(dst.object.fields.iter()) {
        debug!("conversion links {} <-> {}", a, b);
        graph.add_edge(a, b, EdgeKind::ConvertsField);
        graph.add_edge(b, a, EdgeKind::ConvertsField);
    }
}
