use serde::{Deserialize, Serialize};

/// Kind of a directed edge between declarations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EdgeKind {
    /// The body or initializer of the source references the target
    Uses,

    /// The source struct type embeds the target type
    Embeds,

    /// The source interface requirement is satisfied by the target method
    Implements,

    /// Field correspondence induced by a structural conversion
    ConvertsField,

    /// Symbolic alias pair from a linker directive
    Linkname,

    /// Owner type/function to member. Suppression propagation only; the
    /// sweep never follows these.
    Owns,
}

impl EdgeKind {
    /// Whether the reachability sweep follows this edge
    pub fn traversable(&self) -> bool {
        !matches!(self, EdgeKind::Owns)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            EdgeKind::Uses => "uses",
            EdgeKind::Embeds => "embeds",
            EdgeKind::Implements => "implements",
            EdgeKind::ConvertsField => "converts-field",
            EdgeKind::Linkname => "linkname",
            EdgeKind::Owns => "owns",
        }
    }
}
