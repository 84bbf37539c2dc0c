mod roots;
mod sweep;

pub use roots::RootDetector;
pub use sweep::{sweep, Liveness};

use crate::annotations::AnnotationTable;
use crate::cancel::CancelToken;
use crate::config::Config;
use crate::error::Result;
use crate::graph::{Graph, GraphBuilder};
use crate::program::TypedProgram;
use crate::report::UsageReport;
use crate::rules::RuleEngine;
use rayon::prelude::*;
use tracing::info;

/// Facade over the whole pipeline: build the graph once, augment it once,
/// then sweep it under one or many root configurations.
pub struct Analyzer {
    config: Config,
}

impl Analyzer {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Build the augmented declaration graph for a program
    pub fn build_graph(program: &TypedProgram, annotations: &AnnotationTable) -> Graph {
        let mut graph = GraphBuilder::new(program).build();
        RuleEngine::new(program, annotations).apply(&mut graph);
        graph
    }

    /// Run the full pipeline under this analyzer's configuration
    pub fn analyze(
        &self,
        program: &TypedProgram,
        annotations: &AnnotationTable,
    ) -> Result<UsageReport> {
        self.analyze_with_cancel(program, annotations, &CancelToken::new())
    }

    pub fn analyze_with_cancel(
        &self,
        program: &TypedProgram,
        annotations: &AnnotationTable,
        cancel: &CancelToken,
    ) -> Result<UsageReport> {
        let graph = Self::build_graph(program, annotations);
        self.sweep_graph(&graph, cancel)
    }

    /// One sweep over an already-built graph
    pub fn sweep_graph(&self, graph: &Graph, cancel: &CancelToken) -> Result<UsageReport> {
        let roots = RootDetector::new(&self.config).detect(graph);
        let liveness = sweep(graph, &roots, cancel)?;
        Ok(UsageReport::new(graph, liveness, &self.config))
    }

    /// Sweep one base graph under several configurations in parallel.
    ///
    /// The graph stays read-only; every run owns its root set and liveness,
    /// so no synchronization is needed beyond the shared cancel signal.
    pub fn analyze_modes(
        program: &TypedProgram,
        annotations: &AnnotationTable,
        configs: &[Config],
        cancel: &CancelToken,
    ) -> Vec<Result<UsageReport>> {
        let graph = Self::build_graph(program, annotations);
        info!("sweeping {} configurations", configs.len());

        configs
            .par_iter()
            .map(|config| Analyzer::new(config.clone()).sweep_graph(&graph, cancel))
            .collect()
    }
}
