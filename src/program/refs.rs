use super::ObjectId;
use serde::{Deserialize, Serialize};

/// Kind of a plain identifier reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RefKind {
    /// Calling a function or method
    Call,

    /// Reading a variable, constant, or field
    Read,

    /// Writing to a variable or field
    Write,

    /// Type reference in a signature, declaration, or expression
    Type,

    /// Taking the address of a declaration
    AddressOf,

    /// Deferred call target
    Defer,

    /// Spawned call target
    Spawn,

    /// Jump to a label
    Goto,
}

impl RefKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            RefKind::Call => "call",
            RefKind::Read => "read",
            RefKind::Write => "write",
            RefKind::Type => "type ref",
            RefKind::AddressOf => "address-of",
            RefKind::Defer => "defer",
            RefKind::Spawn => "spawn",
            RefKind::Goto => "goto",
        }
    }
}

/// A syntactically discoverable reference inside a declaration's body or
/// initializer, as reported by the front end.
///
/// Targets that do not belong to the analyzed program never appear here as
/// graph nodes; a site naming an external object simply produces no edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RefSite {
    /// Plain reference to a named object
    Ident { target: ObjectId, kind: RefKind },

    /// Composite literal of a struct type. Positional literals touch every
    /// field of the type in order; named literals touch only the listed ones.
    Composite {
        ty: ObjectId,
        positional: bool,
        fields: Vec<ObjectId>,
    },

    /// Conversion between two structurally identical struct types
    Conversion { source: ObjectId, dest: ObjectId },

    /// Conversion through an untyped pointer. Treated as opaque memory
    /// reinterpretation: every field of both types is forced live.
    UnsafeConversion { source: ObjectId, dest: ObjectId },

    /// A value of a concrete type assigned, converted, or bound to a
    /// variable of an interface type
    InterfaceAssign { concrete: ObjectId, iface: ObjectId },

    /// Selector on a value whose member may be promoted from an embedded type
    Select { base: ObjectId, member: String },

    /// Instantiation of a generic declaration with concrete type arguments
    Instantiate {
        generic: ObjectId,
        type_args: Vec<ObjectId>,
    },
}

impl RefSite {
    pub fn call(target: impl Into<ObjectId>) -> Self {
        RefSite::Ident {
            target: target.into(),
            kind: RefKind::Call,
        }
    }

    pub fn read(target: impl Into<ObjectId>) -> Self {
        RefSite::Ident {
            target: target.into(),
            kind: RefKind::Read,
        }
    }

    pub fn write(target: impl Into<ObjectId>) -> Self {
        RefSite::Ident {
            target: target.into(),
            kind: RefKind::Write,
        }
    }

    pub fn type_ref(target: impl Into<ObjectId>) -> Self {
        RefSite::Ident {
            target: target.into(),
            kind: RefKind::Type,
        }
    }

    pub fn composite(ty: impl Into<ObjectId>, fields: Vec<ObjectId>) -> Self {
        RefSite::Composite {
            ty: ty.into(),
            positional: false,
            fields,
        }
    }

    pub fn positional_composite(ty: impl Into<ObjectId>) -> Self {
        RefSite::Composite {
            ty: ty.into(),
            positional: true,
            fields: Vec::new(),
        }
    }

    pub fn conversion(source: impl Into<ObjectId>, dest: impl Into<ObjectId>) -> Self {
        RefSite::Conversion {
            source: source.into(),
            dest: dest.into(),
        }
    }

    pub fn interface_assign(concrete: impl Into<ObjectId>, iface: impl Into<ObjectId>) -> Self {
        RefSite::InterfaceAssign {
            concrete: concrete.into(),
            iface: iface.into(),
        }
    }

    pub fn select(base: impl Into<ObjectId>, member: impl Into<String>) -> Self {
        RefSite::Select {
            base: base.into(),
            member: member.into(),
        }
    }

    pub fn instantiate(generic: impl Into<ObjectId>, type_args: Vec<ObjectId>) -> Self {
        RefSite::Instantiate {
            generic: generic.into(),
            type_args,
        }
    }
}
