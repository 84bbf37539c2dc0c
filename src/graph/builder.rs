use super::{Decl, EdgeKind, Graph};
use crate::program::{
    Object, ObjectId, ObjectKind, Package, ProgramIndex, RefSite, TypedProgram, VarRole,
};
use tracing::{debug, warn};

/// Builder converting a typed program into the base declaration graph.
///
/// One node per named object, one `Uses` edge per syntactically discoverable
/// reference, `Owns` edges from owners to members. Synthetic edges from
/// language-level patterns are the rule engine's job, not the builder's.
pub struct GraphBuilder<'a> {
    program: &'a TypedProgram,
}

impl<'a> GraphBuilder<'a> {
    pub fn new(program: &'a TypedProgram) -> Self {
        Self { program }
    }

    /// Build the base graph
    pub fn build(self) -> Graph {
        let index = self.program.index();
        let mut graph = Graph::new();

        for package in &self.program.packages {
            for object in &package.objects {
                self.add_node(&mut graph, package, object, &index);
            }
        }

        for package in &self.program.packages {
            for object in &package.objects {
                if let Some(owner) = &object.owner {
                    graph.add_edge(owner, &object.id, EdgeKind::Owns);
                }
                self.add_ref_edges(&mut graph, object, &index);
            }
        }

        debug!(
            "built base graph: {} declarations, {} edges",
            graph.decl_count(),
            graph.edge_count()
        );

        graph
    }

    fn add_node(
        &self,
        graph: &mut Graph,
        package: &Package,
        object: &Object,
        index: &ProgramIndex<'_>,
    ) {
        let decl = Decl {
            id: object.id.clone(),
            name: object.name.clone(),
            qualified_name: qualified_name(package, object, index),
            kind: object.kind,
            pos: object.pos.clone(),
            exported: object.exported,
            package: package.name.clone(),
            owner: object.owner.clone(),
            in_command_package: package.is_command,
            quiet: is_quiet(object, index),
            blank: object.is_blank(),
            in_test_file: object.in_test_file,
            in_generated_file: object.in_generated_file,
        };

        let blank = decl.blank;
        let kind = decl.kind;
        let id = graph.add_decl(decl);

        if blank {
            graph.force_root(&id);
        }

        if kind == ObjectKind::Unknown {
            // Fail open: an unclassifiable object must never be reported dead.
            warn!("object {} has unrecognized kind, treating as root", id);
            graph.force_root(&id);
        }
    }

    fn add_ref_edges(&self, graph: &mut Graph, object: &Object, index: &ProgramIndex<'_>) {
        let from = &object.id;

        for site in &object.refs {
            match site {
                RefSite::Ident { target, kind } => {
                    debug!("{} -> {} ({})", from, target, kind.display_name());
                    graph.add_edge(from, target, EdgeKind::Uses);
                }
                RefSite::Composite {
                    ty,
                    positional,
                    fields,
                } => {
                    graph.add_edge(from, ty, EdgeKind::Uses);
                    if *positional {
                        // A positional literal touches every field of the
                        // type in order, written or not.
                        if let Some(ty_ref) = index.get(ty) {
                            for field in &ty_ref.object.fields {
                                graph.add_edge(from, field, EdgeKind::Uses);
                            }
                        }
                    } else {
                        for field in fields {
                            graph.add_edge(from, field, EdgeKind::Uses);
                        }
                    }
                }
                RefSite::Conversion { source, dest } => {
                    // Both type names are written; field correspondence is
                    // derived later by the structural-conversion rule.
                    graph.add_edge(from, source, EdgeKind::Uses);
                    graph.add_edge(from, dest, EdgeKind::Uses);
                }
                RefSite::UnsafeConversion { source, dest } => {
                    graph.add_edge(from, source, EdgeKind::Uses);
                    graph.add_edge(from, dest, EdgeKind::Uses);
                    self.flood_fields(graph, source, index);
                    self.flood_fields(graph, dest, index);
                }
                RefSite::InterfaceAssign { concrete, iface } => {
                    graph.add_edge(from, concrete, EdgeKind::Uses);
                    graph.add_edge(from, iface, EdgeKind::Uses);
                }
                RefSite::Select { base, .. } => {
                    // The member may be promoted; resolution happens in the
                    // embedding rule.
                    graph.add_edge(from, base, EdgeKind::Uses);
                }
                RefSite::Instantiate { .. } => {
                    // Handled entirely by the generic-instantiation rule.
                }
            }
        }
    }

    /// Untyped-pointer conversions abandon per-field precision: every field
    /// of the type is forced live, unconditionally.
    fn flood_fields(&self, graph: &mut Graph, ty: &ObjectId, index: &ProgramIndex<'_>) {
        let Some(ty_ref) = index.get(ty) else {
            return;
        };

        for field in &ty_ref.object.fields {
            debug!("unsafe conversion floods field {}", field);
            graph.force_root(field);
        }
    }
}

fn qualified_name(package: &Package, object: &Object, index: &ProgramIndex<'_>) -> String {
    match &object.owner {
        Some(owner) => match index.get(owner) {
            Some(owner_ref) => format!("{}.{}.{}", package.name, owner_ref.object.name, object.name),
            None => format!("{}.{}", package.name, object.name),
        },
        None => format!("{}.{}", package.name, object.name),
    }
}

/// Quiet categories: dead state is tracked but never reported. Unexported
/// fields, parameters, named results, and unexported interface requirements
/// are expected noise.
fn is_quiet(object: &Object, index: &ProgramIndex<'_>) -> bool {
    match object.kind {
        ObjectKind::Field => !object.exported,
        ObjectKind::Variable => matches!(object.role, VarRole::Param | VarRole::Result),
        ObjectKind::Method => {
            if object.exported {
                return false;
            }
            object
                .owner
                .as_ref()
                .and_then(|owner| index.get(owner))
                .map(|owner_ref| owner_ref.object.iface_methods.contains(&object.id))
                .unwrap_or(false)
        }
        _ => false,
    }
}
