//! deadmark - whole-program dead declaration detection
//!
//! This library is the reachability core of a static-analysis suite: given a
//! fully type-checked program, it decides for every named declaration
//! whether it is reachable from the program's observable roots, and reports
//! the rest as unused.
//!
//! # Architecture
//!
//! The analysis pipeline consists of:
//! 1. **Graph Building** - Convert the typed program into a declaration graph
//! 2. **Rule Augmentation** - Derive edges/roots from language-level patterns
//! 3. **Root Detection** - Compute the root set for the configured mode
//! 4. **Reachability Sweep** - Mark the live set from the roots
//! 5. **Reporting** - Expose dead, non-quiet declarations and a liveness query
//!
//! Parsing, type checking, directive comment scanning, and output formatting
//! live in external collaborators; this crate consumes their materialized
//! results ([`TypedProgram`], [`AnnotationTable`]) and produces a
//! [`UsageReport`].

pub mod analysis;
pub mod annotations;
pub mod cancel;
pub mod config;
pub mod error;
pub mod graph;
pub mod program;
pub mod report;
pub mod rules;

pub use analysis::{sweep, Analyzer, Liveness, RootDetector};
pub use annotations::{AnnotationTable, LinknamePair, Suppression};
pub use cancel::CancelToken;
pub use config::{AnalysisMode, Config};
pub use error::{Error, Result};
pub use graph::{Decl, EdgeKind, Graph, GraphBuilder};
pub use program::{
    Object, ObjectId, ObjectKind, Package, Position, RefKind, RefSite, TypedProgram, VarRole,
};
pub use report::{Finding, UsageReport};
pub use rules::RuleEngine;
