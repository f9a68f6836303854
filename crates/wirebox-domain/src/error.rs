//! Error handling types
//!
//! One error enum covers the whole subsystem: hierarchy construction,
//! configuration building, and resolution. Resolution failures carry the
//! chain of nodes that was being satisfied when the failure occurred, so
//! callers never have to re-derive it.

use std::fmt;

use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// The ordered sequence of dependency lookups performed while satisfying
/// one resolution request, innermost node last.
///
/// Displays as `A requires B requires C`, matching the error reports the
/// resolver produces.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResolutionChain(Vec<String>);

impl ResolutionChain {
    /// Create an empty chain
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Append a node to the end of the chain
    pub fn push(&mut self, name: impl Into<String>) {
        self.0.push(name.into());
    }

    /// The node names in resolution order, outermost first
    pub fn nodes(&self) -> &[String] {
        &self.0
    }

    /// True when no lookup has been recorded yet
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ResolutionChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(" requires "))
    }
}

impl From<Vec<String>> for ResolutionChain {
    fn from(nodes: Vec<String>) -> Self {
        Self(nodes)
    }
}

/// Main error type for the wirebox configuration engine
#[derive(Error, Debug)]
pub enum Error {
    /// Hierarchy construction failure: descriptor collisions or malformed
    /// type metadata
    #[error("hierarchy error: {message}")]
    Hierarchy {
        /// Description of the offending descriptor
        message: String,
    },

    /// A node name was not present in the hierarchy
    #[error("not found: {name}")]
    NotFound {
        /// The fully-qualified name that was looked up
        name: String,
    },

    /// An implementation binding could not be accepted
    #[error("binding conflict for {node}: {message}")]
    Conflict {
        /// The interface node the bind call targeted
        node: String,
        /// What made the bind unacceptable
        message: String,
    },

    /// A parameter value was not lexically convertible to the declared type
    #[error("invalid value for {parameter}: {value:?} is not a valid {declared_type}")]
    InvalidValue {
        /// The named parameter being bound
        parameter: String,
        /// The parameter's declared value type
        declared_type: String,
        /// The rejected literal text
        value: String,
    },

    /// No concrete implementation is known for the requested node
    #[error("{chain}: no implementation bound for {node}")]
    NoImplementation {
        /// The node that could not be satisfied
        node: String,
        /// The resolution chain leading to the failure
        chain: ResolutionChain,
    },

    /// Multiple concrete implementations are known and none was chosen
    #[error("{chain}: ambiguous binding for {node}, candidates: {candidates:?}")]
    AmbiguousBinding {
        /// The node that could not be satisfied
        node: String,
        /// The competing concrete implementations
        candidates: Vec<String>,
        /// The resolution chain leading to the failure
        chain: ResolutionChain,
    },

    /// A named parameter has neither a bound value nor a declared default
    #[error("{chain}: no value bound for parameter {parameter} and no default declared")]
    MissingParameter {
        /// The unsatisfied named parameter
        parameter: String,
        /// The resolution chain leading to the failure
        chain: ResolutionChain,
    },

    /// A node reappeared on the active resolution path
    #[error("{chain}: cyclic dependency detected at {node}")]
    CyclicDependency {
        /// The node that closed the cycle
        node: String,
        /// The resolution chain leading back to the node
        chain: ResolutionChain,
    },

    /// An externally-constructed class has no registered factory
    #[error("{chain}: no external factory registered for {node}")]
    MissingFactory {
        /// The externally-constructed node
        node: String,
        /// The resolution chain leading to the failure
        chain: ResolutionChain,
    },

    /// Configuration loading or validation failure at the facade edge
    #[error("configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

// Build-time error creation methods
impl Error {
    /// Create a hierarchy error
    pub fn hierarchy<S: Into<String>>(message: S) -> Self {
        Self::Hierarchy {
            message: message.into(),
        }
    }

    /// Create a not found error
    pub fn not_found<S: Into<String>>(name: S) -> Self {
        Self::NotFound { name: name.into() }
    }

    /// Create a binding conflict error
    pub fn conflict<S: Into<String>, M: Into<String>>(node: S, message: M) -> Self {
        Self::Conflict {
            node: node.into(),
            message: message.into(),
        }
    }

    /// Create an invalid value error
    pub fn invalid_value<S: Into<String>, T: Into<String>, V: Into<String>>(
        parameter: S,
        declared_type: T,
        value: V,
    ) -> Self {
        Self::InvalidValue {
            parameter: parameter.into(),
            declared_type: declared_type.into(),
            value: value.into(),
        }
    }
}

// Resolution error creation methods
impl Error {
    /// Create a no implementation error
    pub fn no_implementation<S: Into<String>>(node: S, chain: ResolutionChain) -> Self {
        Self::NoImplementation {
            node: node.into(),
            chain,
        }
    }

    /// Create an ambiguous binding error
    pub fn ambiguous_binding<S: Into<String>>(
        node: S,
        candidates: Vec<String>,
        chain: ResolutionChain,
    ) -> Self {
        Self::AmbiguousBinding {
            node: node.into(),
            candidates,
            chain,
        }
    }

    /// Create a missing parameter error
    pub fn missing_parameter<S: Into<String>>(parameter: S, chain: ResolutionChain) -> Self {
        Self::MissingParameter {
            parameter: parameter.into(),
            chain,
        }
    }

    /// Create a cyclic dependency error
    pub fn cyclic_dependency<S: Into<String>>(node: S, chain: ResolutionChain) -> Self {
        Self::CyclicDependency {
            node: node.into(),
            chain,
        }
    }

    /// Create a missing factory error
    pub fn missing_factory<S: Into<String>>(node: S, chain: ResolutionChain) -> Self {
        Self::MissingFactory {
            node: node.into(),
            chain,
        }
    }
}

// Configuration error creation methods
impl Error {
    /// Create a configuration error (no source)
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn configuration_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}
