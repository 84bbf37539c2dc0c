use crate::config::{AnalysisMode, Config};
use crate::graph::{Decl, Graph};
use crate::program::{ObjectId, ObjectKind};
use std::collections::HashSet;
use tracing::{debug, info};

/// Computes the initial root set for one sweep.
///
/// The graph's forced roots (blank declarations, directives, sentinels,
/// fail-open nodes) are mode-independent; on top of them the detector adds
/// the roots the configuration asks for. One base graph, many root sets.
pub struct RootDetector<'a> {
    config: &'a Config,
}

impl<'a> RootDetector<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Detect all roots for the configured mode
    pub fn detect(&self, graph: &Graph) -> HashSet<ObjectId> {
        let mut roots = graph.forced_roots().clone();

        for decl in graph.decls() {
            if self.is_root(decl) {
                debug!("root: {}", decl.display());
                roots.insert(decl.id.clone());
            }
        }

        self.add_configured_roots(graph, &mut roots);

        info!("detected {} roots", roots.len());

        roots
    }

    fn is_root(&self, decl: &Decl) -> bool {
        if self.is_entry_point(decl) {
            return true;
        }

        // In library mode the exported API surface is the observable root set.
        if self.config.mode == AnalysisMode::Library && decl.exported {
            return true;
        }

        if self.config.include_tests && is_test_function(decl) {
            return true;
        }

        self.config
            .retain
            .iter()
            .any(|pattern| decl.matches_pattern(pattern))
    }

    fn is_entry_point(&self, decl: &Decl) -> bool {
        if decl.kind != ObjectKind::Function {
            return false;
        }

        // Initializers run on import in every mode.
        if decl.name == "init" {
            return true;
        }

        decl.name == "main" && decl.in_command_package
    }

    /// Explicitly configured roots, resolved by qualified name
    fn add_configured_roots(&self, graph: &Graph, roots: &mut HashSet<ObjectId>) {
        for name in &self.config.roots {
            match graph.find_by_qualified_name(name) {
                Some(decl) => {
                    debug!("configured root: {}", decl.display());
                    roots.insert(decl.id.clone());
                }
                None => debug!("configured root {} not found", name),
            }
        }
    }
}

fn is_test_function(decl: &Decl) -> bool {
    if decl.kind != ObjectKind::Function || !decl.in_test_file {
        return false;
    }

    let name = &decl.name;
    name.starts_with("Test")
        || name.starts_with("Benchmark")
        || name.starts_with("Example")
        || name.starts_with("Fuzz")
}
