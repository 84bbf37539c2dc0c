use crate::program::{ObjectId, ObjectKind, Position};
use serde::{Deserialize, Serialize};

/// A declaration node in the graph.
///
/// Carries only what classification needs; type-structure facts stay on the
/// program objects and are read by the rule engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Decl {
    /// Stable identity, shared with the front-end object
    pub id: ObjectId,

    /// Simple name
    pub name: String,

    /// Package-qualified name (e.g. "store.Cache.evict")
    pub qualified_name: String,

    /// Kind of declaration
    pub kind: ObjectKind,

    /// Declared position
    pub pos: Position,

    /// Whether the name is exported
    pub exported: bool,

    /// Owning package
    pub package: String,

    /// Owner declaration, for members
    pub owner: Option<ObjectId>,

    /// Whether the package builds a command
    pub in_command_package: bool,

    /// Tracked but never reported when dead
    pub quiet: bool,

    /// Blank (`_`) declarations are always live
    pub blank: bool,

    /// Declared in a test file
    pub in_test_file: bool,

    /// Declared in a generated file
    pub in_generated_file: bool,
}

impl Decl {
    /// Simple wildcard match against the name or qualified name.
    /// A leading or trailing `*` matches a suffix or prefix respectively.
    pub fn matches_pattern(&self, pattern: &str) -> bool {
        if let Some(suffix) = pattern.strip_prefix('*') {
            self.name.ends_with(suffix)
        } else if let Some(prefix) = pattern.strip_suffix('*') {
            self.name.starts_with(prefix)
        } else {
            self.name == pattern || self.qualified_name == pattern
        }
    }

    /// Display string for diagnostics
    pub fn display(&self) -> String {
        format!(
            "{} {} ({})",
            self.kind.display_name(),
            self.qualified_name,
            self.pos
        )
    }
}
