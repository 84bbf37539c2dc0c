//! The edge/root rule battery.
//!
//! Each rule reads the typed program and only adds edges or forced roots to
//! the graph. Rules are independent and additive, so application order never
//! changes the swept fixed point.

mod convert;
mod directives;
mod embedding;
mod interfaces;
mod special;

use crate::annotations::AnnotationTable;
use crate::graph::Graph;
use crate::program::{Object, ObjectId, ObjectKind, ProgramIndex, TypedProgram};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Applies the full rule battery to a base graph
pub struct RuleEngine<'a> {
    program: &'a TypedProgram,
    annotations: &'a AnnotationTable,
}

impl<'a> RuleEngine<'a> {
    pub fn new(program: &'a TypedProgram, annotations: &'a AnnotationTable) -> Self {
        Self {
            program,
            annotations,
        }
    }

    /// Augment the graph with pattern-derived edges and roots
    pub fn apply(&self, graph: &mut Graph) {
        let index = self.program.index();
        let members = MemberMap::build(&index);

        embedding::apply(&index, &members, graph);
        interfaces::apply(&index, &members, graph);
        convert::apply(&index, graph);
        special::apply(&index, &members, graph);
        directives::apply(self.annotations, graph);

        debug!(
            "augmented graph: {} edges, {} forced roots",
            graph.edge_count(),
            graph.forced_roots().len()
        );
    }
}

/// Owner-to-members lookup shared by the rules
pub(crate) struct MemberMap<'a> {
    by_owner: HashMap<&'a ObjectId, Vec<&'a Object>>,
}

impl<'a> MemberMap<'a> {
    pub(crate) fn build(index: &ProgramIndex<'a>) -> Self {
        let mut by_owner: HashMap<&'a ObjectId, Vec<&'a Object>> = HashMap::new();
        for obj_ref in index.objects() {
            if let Some(owner) = &obj_ref.object.owner {
                if let Some(owner_ref) = index.get(owner) {
                    by_owner
                        .entry(&owner_ref.object.id)
                        .or_default()
                        .push(obj_ref.object);
                }
            }
        }
        Self { by_owner }
    }

    pub(crate) fn members(&self, owner: &ObjectId) -> &[&'a Object] {
        self.by_owner.get(owner).map(Vec::as_slice).unwrap_or_default()
    }

    pub(crate) fn methods<'s>(
        &'s self,
        owner: &ObjectId,
    ) -> impl Iterator<Item = &'a Object> + 's {
        self.members(owner)
            .iter()
            .copied()
            .filter(|m| m.kind == ObjectKind::Method)
    }
}

/// Follow an alias chain to the underlying type. Cycle-guarded; a broken
/// chain resolves to the last known link.
pub(crate) fn resolve_alias(index: &ProgramIndex<'_>, id: &ObjectId) -> ObjectId {
    let mut current = id.clone();
    let mut seen = HashSet::new();

    while seen.insert(current.clone()) {
        match index.get(&current).and_then(|r| r.object.alias_of.clone()) {
            Some(target) => current = target,
            None => break,
        }
    }

    current
}
