//! The typed-program object model consumed by the analysis core.
//!
//! Parsing and type checking happen in an external front end; what arrives
//! here is a fully materialized set of packages, named objects, and the
//! per-declaration reference facts discovered in their bodies.

mod refs;

pub use refs::{RefKind, RefSite};

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Stable identity of a named object, assigned by the front end.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectId(String);

impl ObjectId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ObjectId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ObjectId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Syntactic kind of a named object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectKind {
    Function,
    Method,
    NamedType,
    Field,
    Variable,
    Constant,
    Label,
    TypeParam,

    /// Kind the front end could not classify. Handled fail-open: the object
    /// still gets a node and is treated as an implicit root.
    Unknown,
}

impl ObjectKind {
    pub fn is_type(&self) -> bool {
        matches!(self, ObjectKind::NamedType)
    }

    pub fn is_callable(&self) -> bool {
        matches!(self, ObjectKind::Function | ObjectKind::Method)
    }

    pub fn is_member(&self) -> bool {
        matches!(
            self,
            ObjectKind::Method | ObjectKind::Field | ObjectKind::TypeParam
        )
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ObjectKind::Function => "function",
            ObjectKind::Method => "method",
            ObjectKind::NamedType => "type",
            ObjectKind::Field => "field",
            ObjectKind::Variable => "variable",
            ObjectKind::Constant => "constant",
            ObjectKind::Label => "label",
            ObjectKind::TypeParam => "type parameter",
            ObjectKind::Unknown => "declaration",
        }
    }
}

/// Role of a variable object inside its enclosing declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum VarRole {
    #[default]
    Plain,
    Param,
    Result,
}

/// Location in source code
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    /// File path
    pub file: PathBuf,
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed)
    pub column: usize,
}

impl Position {
    pub fn new(file: impl Into<PathBuf>, line: usize, column: usize) -> Self {
        Self {
            file: file.into(),
            line,
            column,
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.file.display(), self.line, self.column)
    }
}

/// A named object reported by the front end.
///
/// The record is flat: type-structure facts (`fields`, `embedded`,
/// `iface_methods`, ...) are only populated for the kinds they apply to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Object {
    /// Stable identity
    pub id: ObjectId,

    /// Simple name (e.g. "Handler"); `_` for blank declarations
    pub name: String,

    /// Kind of object
    pub kind: ObjectKind,

    /// Declared position
    pub pos: Position,

    /// Whether the name is exported
    pub exported: bool,

    /// Owning declaration: the type of a field/method/type parameter,
    /// or the function of a parameter/result
    pub owner: Option<ObjectId>,

    /// Role, for variables
    pub role: VarRole,

    /// Signature identity for functions and methods, used for interface
    /// satisfaction matching; `None` matches any signature (fail open)
    pub sig: Option<String>,

    /// Struct types: field objects in declaration order
    pub fields: Vec<ObjectId>,

    /// Struct types: embedded types
    pub embedded: Vec<ObjectId>,

    /// Interface types: method requirement objects
    pub iface_methods: Vec<ObjectId>,

    /// Alias declarations: the aliased type
    pub alias_of: Option<ObjectId>,

    /// Generic declarations: type parameter objects
    pub type_params: Vec<ObjectId>,

    /// Whether the type has zero size
    pub zero_sized: bool,

    /// Whether the declaring file is a test file
    pub in_test_file: bool,

    /// Whether the declaring file is generated
    pub in_generated_file: bool,

    /// Reference facts discovered in the body/initializer
    pub refs: Vec<RefSite>,
}

impl Object {
    pub fn new(
        id: impl Into<ObjectId>,
        name: impl Into<String>,
        kind: ObjectKind,
        pos: Position,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            pos,
            exported: false,
            owner: None,
            role: VarRole::default(),
            sig: None,
            fields: Vec::new(),
            embedded: Vec::new(),
            iface_methods: Vec::new(),
            alias_of: None,
            type_params: Vec::new(),
            zero_sized: false,
            in_test_file: false,
            in_generated_file: false,
            refs: Vec::new(),
        }
    }

    pub fn exported(mut self) -> Self {
        self.exported = true;
        self
    }

    pub fn with_owner(mut self, owner: impl Into<ObjectId>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    pub fn with_role(mut self, role: VarRole) -> Self {
        self.role = role;
        self
    }

    pub fn with_sig(mut self, sig: impl Into<String>) -> Self {
        self.sig = Some(sig.into());
        self
    }

    pub fn with_fields(mut self, fields: Vec<ObjectId>) -> Self {
        self.fields = fields;
        self
    }

    pub fn with_embedded(mut self, embedded: Vec<ObjectId>) -> Self {
        self.embedded = embedded;
        self
    }

    pub fn with_iface_methods(mut self, methods: Vec<ObjectId>) -> Self {
        self.iface_methods = methods;
        self
    }

    pub fn with_alias_of(mut self, target: impl Into<ObjectId>) -> Self {
        self.alias_of = Some(target.into());
        self
    }

    pub fn with_type_params(mut self, params: Vec<ObjectId>) -> Self {
        self.type_params = params;
        self
    }

    pub fn zero_sized(mut self) -> Self {
        self.zero_sized = true;
        self
    }

    pub fn in_test_file(mut self) -> Self {
        self.in_test_file = true;
        self
    }

    pub fn in_generated_file(mut self) -> Self {
        self.in_generated_file = true;
        self
    }

    pub fn with_ref(mut self, site: RefSite) -> Self {
        self.refs.push(site);
        self
    }

    /// Blank declarations use the placeholder identifier
    pub fn is_blank(&self) -> bool {
        self.name == "_"
    }
}

/// One analyzed package
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Package {
    /// Import path / package name
    pub name: String,

    /// Whether this package builds a command (owns an entry point)
    pub is_command: bool,

    /// Objects declared in the package
    pub objects: Vec<Object>,
}

impl Package {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_command: false,
            objects: Vec::new(),
        }
    }

    pub fn command(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_command: true,
            objects: Vec::new(),
        }
    }

    pub fn with_object(mut self, object: Object) -> Self {
        self.objects.push(object);
        self
    }
}

/// A fully type-checked program, the immutable input of one analysis run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TypedProgram {
    pub packages: Vec<Package>,
}

impl TypedProgram {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_package(mut self, package: Package) -> Self {
        self.packages.push(package);
        self
    }

    /// Build the by-identity lookup used by the builder and the rule engine
    pub fn index(&self) -> ProgramIndex<'_> {
        let mut by_id = HashMap::new();
        for package in &self.packages {
            for object in &package.objects {
                by_id.insert(&object.id, ObjectRef { package, object });
            }
        }
        ProgramIndex { by_id }
    }
}

/// An object together with its owning package
#[derive(Debug, Clone, Copy)]
pub struct ObjectRef<'a> {
    pub package: &'a Package,
    pub object: &'a Object,
}

/// By-identity lookup over a typed program
#[derive(Debug)]
pub struct ProgramIndex<'a> {
    by_id: HashMap<&'a ObjectId, ObjectRef<'a>>,
}

impl<'a> ProgramIndex<'a> {
    pub fn get(&self, id: &ObjectId) -> Option<ObjectRef<'a>> {
        self.by_id.get(id).copied()
    }

    pub fn objects(&self) -> impl Iterator<Item = ObjectRef<'a>> + '_ {
        self.by_id.values().copied()
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}
