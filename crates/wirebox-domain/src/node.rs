//! Declaration node model
//!
//! The typed hierarchy the engine is built around: packages contain
//! classes and named parameters, classes carry constructor signatures and
//! known-implementation sets. Nodes refer to each other by fully-qualified
//! dotted name rather than by pointer, which keeps the model a plain value
//! type; the engine's hierarchy owns the name -> node map.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::value::ValueType;

/// Fully-qualified name of the hierarchy root (the empty namespace)
pub const ROOT_NAME: &str = "";

/// Return the final segment of a dotted fully-qualified name
pub fn short_name_of(full_name: &str) -> &str {
    full_name.rsplit('.').next().unwrap_or(full_name)
}

/// Return the namespace prefix of a dotted fully-qualified name, or the
/// root name when the name has no prefix
pub fn parent_name_of(full_name: &str) -> &str {
    match full_name.rfind('.') {
        Some(idx) => &full_name[..idx],
        None => ROOT_NAME,
    }
}

/// Discriminant for the node variants, used in collision reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Namespace container
    Package,
    /// Class or interface
    Class,
    /// Named parameter
    NamedParameter,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Package => "package",
            Self::Class => "class",
            Self::NamedParameter => "named parameter",
        };
        write!(f, "{name}")
    }
}

/// A declaration node: package, class, or named parameter
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Namespace container
    Package(PackageNode),
    /// Class or interface
    Class(ClassNode),
    /// Named parameter
    NamedParameter(NamedParameterNode),
}

impl Node {
    /// The node's unique fully-qualified name
    pub fn full_name(&self) -> &str {
        match self {
            Self::Package(n) => &n.full_name,
            Self::Class(n) => &n.full_name,
            Self::NamedParameter(n) => &n.full_name,
        }
    }

    /// The node's human-readable short name (final name segment)
    pub fn short_name(&self) -> &str {
        match self {
            Self::Package(n) => &n.short_name,
            Self::Class(n) => &n.short_name,
            Self::NamedParameter(n) => &n.short_name,
        }
    }

    /// The variant discriminant
    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Package(_) => NodeKind::Package,
            Self::Class(_) => NodeKind::Class,
            Self::NamedParameter(_) => NodeKind::NamedParameter,
        }
    }
}

/// Namespace container node
///
/// Pure containment: children are the fully-qualified names of the
/// packages, classes, and named parameters directly below this package,
/// kept sorted so traversal order is deterministic.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PackageNode {
    /// Fully-qualified dotted path (empty for the hierarchy root)
    pub full_name: String,
    /// Final name segment
    pub short_name: String,
    /// Sorted fully-qualified names of direct children
    pub children: Vec<String>,
}

impl PackageNode {
    /// Create a package node with no children
    pub fn new(full_name: impl Into<String>) -> Self {
        let full_name = full_name.into();
        let short_name = short_name_of(&full_name).to_string();
        Self {
            full_name,
            short_name,
            children: Vec::new(),
        }
    }

    /// True for the hierarchy root (the empty namespace)
    pub fn is_root(&self) -> bool {
        self.full_name.is_empty()
    }
}

/// Kind of a constructor dependency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArgKind {
    /// Sub-object dependency, resolved to another class
    Class,
    /// Named-parameter dependency, resolved to a bound or default value
    Parameter,
}

/// One entry of a class's ordered constructor parameter list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstructorArg {
    /// Whether the dependency is a sub-object or a named parameter
    pub kind: ArgKind,
    /// Fully-qualified name of the target node
    pub target: String,
}

impl ConstructorArg {
    /// Create a sub-object dependency
    pub fn class(target: impl Into<String>) -> Self {
        Self {
            kind: ArgKind::Class,
            target: target.into(),
        }
    }

    /// Create a named-parameter dependency
    pub fn parameter(target: impl Into<String>) -> Self {
        Self {
            kind: ArgKind::Parameter,
            target: target.into(),
        }
    }
}

/// Class or interface node
#[derive(Debug, Clone, PartialEq)]
pub struct ClassNode {
    /// Fully-qualified dotted name
    pub full_name: String,
    /// Final name segment
    pub short_name: String,
    /// True for interfaces and abstract classes (not directly constructible)
    pub is_abstract: bool,
    /// True when instances come from a registered external factory rather
    /// than direct construction
    pub external_constructor: bool,
    /// True when the class was declared singleton-eligible in its descriptor
    pub singleton_eligible: bool,
    /// Fully-qualified names of the interfaces this class directly declares
    pub implements: Vec<String>,
    /// Sorted fully-qualified names of every class that satisfies this
    /// node's type, including the node itself when concrete
    pub known_implementations: Vec<String>,
    /// Ordered constructor parameter list
    pub constructor: Vec<ConstructorArg>,
}

impl ClassNode {
    /// True when the class can be constructed directly
    pub fn is_concrete(&self) -> bool {
        !self.is_abstract
    }
}

/// Named parameter node
#[derive(Debug, Clone, PartialEq)]
pub struct NamedParameterNode {
    /// Fully-qualified dotted name
    pub full_name: String,
    /// Final name segment
    pub short_name: String,
    /// Declared value type
    pub value_type: ValueType,
    /// Default literal text, if declared
    pub default: Option<String>,
    /// Short documentation string
    pub doc: String,
}
