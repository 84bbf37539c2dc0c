use crate::cancel::CancelToken;
use crate::error::{Error, Result};
use crate::graph::Graph;
use crate::program::ObjectId;
use petgraph::visit::EdgeRef;
use std::collections::HashSet;
use tracing::debug;

/// The live/dead partition produced by one sweep
#[derive(Debug, Clone)]
pub struct Liveness {
    live: HashSet<ObjectId>,
}

impl Liveness {
    pub fn is_live(&self, id: &ObjectId) -> bool {
        self.live.contains(id)
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ObjectId> {
        self.live.iter()
    }
}

/// Breadth-first mark over the augmented graph from the given root set.
///
/// Explicit worklist and visited set keyed by identity, so embedding and
/// interface cycles terminate without recursion. `Owns` edges are never
/// followed. The resulting live set is a fixed point independent of
/// traversal order.
pub fn sweep(graph: &Graph, roots: &HashSet<ObjectId>, cancel: &CancelToken) -> Result<Liveness> {
    let inner = graph.inner();
    let mut live = HashSet::new();
    let mut worklist = Vec::new();

    for root in roots {
        if let Some(idx) = graph.node_index(root) {
            worklist.push(idx);
        }
    }

    while let Some(idx) = worklist.pop() {
        if cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }

        let Some(id) = inner.node_weight(idx) else {
            continue;
        };
        if !live.insert(id.clone()) {
            continue;
        }

        for edge in inner.edges(idx) {
            if !edge.weight().traversable() {
                continue;
            }
            if let Some(target) = inner.node_weight(edge.target()) {
                if !live.contains(target) {
                    worklist.push(edge.target());
                }
            }
        }
    }

    debug!(
        "sweep marked {} of {} declarations live",
        live.len(),
        graph.decl_count()
    );

    Ok(Liveness { live })
}
