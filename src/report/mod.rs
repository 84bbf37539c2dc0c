use crate::analysis::Liveness;
use crate::config::Config;
use crate::graph::Graph;
use crate::program::{ObjectId, ObjectKind, Position};
use serde::Serialize;

/// A dead declaration record
#[derive(Debug, Clone, Serialize)]
pub struct Finding {
    /// Identity of the dead declaration
    pub id: ObjectId,

    /// Simple name
    pub name: String,

    /// Package-qualified name
    pub qualified_name: String,

    /// Kind of declaration
    pub kind: ObjectKind,

    /// Declared position
    pub pos: Position,

    /// Tracked but filtered from default emission
    pub quiet: bool,

    /// Human-readable summary
    pub message: String,
}

/// The classification produced by one sweep.
///
/// Live declarations are never reported. Dead ones are reported unless
/// quiet; quiet records stay queryable so other passes can still read their
/// liveness state. The backing graph can be discarded once this exists.
#[derive(Debug)]
pub struct UsageReport {
    liveness: Liveness,
    dead: Vec<Finding>,
}

impl UsageReport {
    pub(crate) fn new(graph: &Graph, liveness: Liveness, config: &Config) -> Self {
        let mut dead: Vec<Finding> = graph
            .decls()
            .filter(|d| !liveness.is_live(&d.id))
            .map(|d| Finding {
                id: d.id.clone(),
                name: d.name.clone(),
                qualified_name: d.qualified_name.clone(),
                kind: d.kind,
                pos: d.pos.clone(),
                quiet: d.quiet || (d.in_generated_file && !config.report_generated),
                message: format!("{} '{}' is never used", d.kind.display_name(), d.name),
            })
            .collect();

        // Emission order is declared position, not traversal order, so
        // output stays stable across runs and parallel sweeps.
        dead.sort_by(|a, b| {
            a.pos
                .cmp(&b.pos)
                .then_with(|| a.qualified_name.cmp(&b.qualified_name))
        });

        Self { liveness, dead }
    }

    /// Liveness query, usable by unrelated passes without re-running the sweep
    pub fn is_used(&self, id: &ObjectId) -> bool {
        self.liveness.is_live(id)
    }

    /// Dead, non-quiet declarations in position order
    pub fn findings(&self) -> impl Iterator<Item = &Finding> {
        self.dead.iter().filter(|f| !f.quiet)
    }

    /// Every dead declaration, quiet ones flagged
    pub fn all_dead(&self) -> &[Finding] {
        &self.dead
    }

    pub fn dead_count(&self) -> usize {
        self.dead.len()
    }

    pub fn live_count(&self) -> usize {
        self.liveness.live_count()
    }
}
