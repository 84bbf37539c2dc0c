mod builder;
mod edge;
mod node;

pub use builder::GraphBuilder;
pub use edge::EdgeKind;
pub use node::Decl;

use crate::program::ObjectId;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use std::collections::{HashMap, HashSet};

/// The declaration graph for one analyzed program.
///
/// Built once by [`GraphBuilder`], only additively mutated by the rule
/// engine (edges and forced roots added, never removed), then read-only for
/// the duration of every sweep over it.
#[derive(Debug)]
pub struct Graph {
    /// The underlying directed graph; nodes carry identities, edges carry kinds
    inner: DiGraph<ObjectId, EdgeKind>,

    /// Map from identity to node index
    node_map: HashMap<ObjectId, NodeIndex>,

    /// Map from identity to declaration details
    decls: HashMap<ObjectId, Decl>,

    /// Map from qualified name to identities (for directive resolution)
    qname_index: HashMap<String, Vec<ObjectId>>,

    /// Map from owner to members (for suppression propagation)
    members_index: HashMap<ObjectId, Vec<ObjectId>>,

    /// Declarations live regardless of incoming edges
    forced_roots: HashSet<ObjectId>,
}

impl Graph {
    /// Create a new empty graph
    pub fn new() -> Self {
        Self {
            inner: DiGraph::new(),
            node_map: HashMap::new(),
            decls: HashMap::new(),
            qname_index: HashMap::new(),
            members_index: HashMap::new(),
            forced_roots: HashSet::new(),
        }
    }

    /// Add a declaration to the graph
    pub fn add_decl(&mut self, decl: Decl) -> ObjectId {
        let id = decl.id.clone();

        let node_idx = self.inner.add_node(id.clone());
        self.node_map.insert(id.clone(), node_idx);

        self.qname_index
            .entry(decl.qualified_name.clone())
            .or_default()
            .push(id.clone());

        if let Some(owner) = &decl.owner {
            self.members_index
                .entry(owner.clone())
                .or_default()
                .push(id.clone());
        }

        self.decls.insert(id.clone(), decl);

        id
    }

    /// Add a typed edge. Endpoints outside the analyzed node set are
    /// silently skipped: external objects are inherently live sentinels,
    /// never nodes.
    pub fn add_edge(&mut self, from: &ObjectId, to: &ObjectId, kind: EdgeKind) {
        if let (Some(&from_idx), Some(&to_idx)) = (self.node_map.get(from), self.node_map.get(to)) {
            self.inner.add_edge(from_idx, to_idx, kind);
        }
    }

    /// Mark a declaration live regardless of incoming edges
    pub fn force_root(&mut self, id: &ObjectId) {
        if self.node_map.contains_key(id) {
            self.forced_roots.insert(id.clone());
        }
    }

    pub fn forced_roots(&self) -> &HashSet<ObjectId> {
        &self.forced_roots
    }

    /// Get a declaration by identity
    pub fn decl(&self, id: &ObjectId) -> Option<&Decl> {
        self.decls.get(id)
    }

    /// Get all declarations
    pub fn decls(&self) -> impl Iterator<Item = &Decl> {
        self.decls.values()
    }

    /// Find a declaration by qualified name
    pub fn find_by_qualified_name(&self, qname: &str) -> Option<&Decl> {
        self.qname_index
            .get(qname)
            .and_then(|ids| ids.first())
            .and_then(|id| self.decls.get(id))
    }

    /// Members owned by a declaration (fields, methods, type parameters)
    pub fn members(&self, id: &ObjectId) -> &[ObjectId] {
        self.members_index
            .get(id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Whether an edge of the given kind exists between two declarations
    pub fn has_edge(&self, from: &ObjectId, to: &ObjectId, kind: EdgeKind) -> bool {
        let (Some(&from_idx), Some(&to_idx)) = (self.node_map.get(from), self.node_map.get(to))
        else {
            return false;
        };

        self.inner
            .edges_connecting(from_idx, to_idx)
            .any(|e| *e.weight() == kind)
    }

    /// Get the number of declarations
    pub fn decl_count(&self) -> usize {
        self.decls.len()
    }

    /// Get the number of edges
    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    /// Get the underlying petgraph for traversal
    pub fn inner(&self) -> &DiGraph<ObjectId, EdgeKind> {
        &self.inner
    }

    /// Get node index for an identity
    pub fn node_index(&self, id: &ObjectId) -> Option<NodeIndex> {
        self.node_map.get(id).copied()
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}
