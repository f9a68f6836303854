//! Type descriptors
//!
//! The explicit registration step that replaces reflection-based type
//! discovery: plain serde-friendly records describing classes and named
//! parameters, consumed by hierarchy construction. Descriptors can be
//! built programmatically with the `with_*` helpers or deserialized from
//! a project file.

use serde::{Deserialize, Serialize};

use crate::node::ConstructorArg;
use crate::value::ValueType;

/// Registration record for one class or named parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeDescriptor {
    /// A class or interface
    Class(ClassDescriptor),
    /// A named parameter
    Parameter(ParameterDescriptor),
}

impl TypeDescriptor {
    /// Fully-qualified name of the described node
    pub fn name(&self) -> &str {
        match self {
            Self::Class(d) => &d.name,
            Self::Parameter(d) => &d.name,
        }
    }
}

/// Registration record for a class or interface
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ClassDescriptor {
    /// Fully-qualified dotted name (e.g. `demo.shapes.Circle`)
    pub name: String,

    /// Fully-qualified names of interfaces this class implements
    #[serde(default)]
    pub implements: Vec<String>,

    /// True for interfaces and abstract classes
    #[serde(default)]
    pub is_abstract: bool,

    /// True when instances come from a registered external factory
    #[serde(default)]
    pub external_constructor: bool,

    /// True when the class should be singleton-scoped by default
    #[serde(default)]
    pub singleton_eligible: bool,

    /// Ordered constructor parameter list
    #[serde(default)]
    pub constructor: Vec<ConstructorArg>,
}

impl ClassDescriptor {
    /// Create a concrete class descriptor with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Mark the class as an interface / abstract class
    pub fn abstract_class(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    /// Mark the class as externally constructed
    pub fn external(mut self) -> Self {
        self.external_constructor = true;
        self
    }

    /// Mark the class as singleton-eligible
    pub fn singleton(mut self) -> Self {
        self.singleton_eligible = true;
        self
    }

    /// Add an implemented interface
    pub fn with_implements(mut self, interface: impl Into<String>) -> Self {
        self.implements.push(interface.into());
        self
    }

    /// Append a constructor argument
    pub fn with_arg(mut self, arg: ConstructorArg) -> Self {
        self.constructor.push(arg);
        self
    }
}

impl From<ClassDescriptor> for TypeDescriptor {
    fn from(descriptor: ClassDescriptor) -> Self {
        Self::Class(descriptor)
    }
}

/// Registration record for a named parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterDescriptor {
    /// Fully-qualified dotted name (e.g. `demo.shapes.Radius`)
    pub name: String,

    /// Declared value type
    pub value_type: ValueType,

    /// Default literal text, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,

    /// Short documentation string
    #[serde(default)]
    pub doc: String,
}

impl ParameterDescriptor {
    /// Create a parameter descriptor with no default
    pub fn new(name: impl Into<String>, value_type: ValueType) -> Self {
        Self {
            name: name.into(),
            value_type,
            default: None,
            doc: String::new(),
        }
    }

    /// Set the default literal text
    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Set the documentation string
    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = doc.into();
        self
    }
}

impl From<ParameterDescriptor> for TypeDescriptor {
    fn from(descriptor: ParameterDescriptor) -> Self {
        Self::Parameter(descriptor)
    }
}
