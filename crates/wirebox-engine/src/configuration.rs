//! Configuration store and builder
//!
//! A configuration is an immutable set of bindings layered over a class
//! hierarchy: implementation choices for interfaces, literal values for
//! named parameters, and the singleton set. All validation happens at bind
//! time; `build()` only freezes the maps.
//!
//! The builder is intentionally asymmetric: implementation bindings are
//! bind-once (a differing rebind is a conflict), while parameter bindings
//! overwrite (last explicit bind wins). Both behaviors are contractual.
//!
//! The builder is not thread-safe; construct it on one thread, call
//! `build()` once, then share the frozen configuration freely.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use tracing::{debug, info};
use wirebox_domain::error::{Error, Result};
use wirebox_domain::node::{ClassNode, NamedParameterNode, Node};
use wirebox_domain::value::Literal;

use crate::hierarchy::ClassHierarchy;

/// Mutable accumulator for bindings; frozen into a [`Configuration`]
#[derive(Debug)]
pub struct ConfigurationBuilder {
    hierarchy: Arc<ClassHierarchy>,
    implementations: BTreeMap<String, String>,
    parameters: BTreeMap<String, String>,
    singletons: BTreeSet<String>,
}

impl ConfigurationBuilder {
    /// Create a builder over a hierarchy
    ///
    /// Classes declared singleton-eligible in their descriptors are seeded
    /// into the singleton set; `mark_singleton` adds to it.
    pub fn new(hierarchy: Arc<ClassHierarchy>) -> Self {
        let singletons = hierarchy
            .iter()
            .filter_map(|node| match node {
                Node::Class(class) if class.singleton_eligible => {
                    Some(class.full_name.clone())
                }
                _ => None,
            })
            .collect();
        Self {
            hierarchy,
            implementations: BTreeMap::new(),
            parameters: BTreeMap::new(),
            singletons,
        }
    }

    /// Bind an interface to a chosen concrete implementation
    ///
    /// Fails with [`Error::Conflict`] when the interface already has a
    /// different bound implementation, or when the implementation is not in
    /// the interface's known-implementations set. Re-binding the same
    /// implementation is a no-op.
    pub fn bind_implementation(&mut self, interface: &str, implementation: &str) -> Result<()> {
        let interface_node = self.hierarchy.class(interface)?;
        let implementation_node = self.hierarchy.class(implementation)?;

        let known = interface_node.full_name == implementation_node.full_name
            || interface_node
                .known_implementations
                .iter()
                .any(|name| name == &implementation_node.full_name);
        if !known {
            return Err(Error::conflict(
                interface,
                format!("{implementation} is not a known implementation"),
            ));
        }

        if let Some(existing) = self.implementations.get(interface) {
            if existing != implementation {
                return Err(Error::conflict(
                    interface,
                    format!("already bound to {existing}, cannot rebind to {implementation}"),
                ));
            }
            return Ok(());
        }

        debug!(interface, implementation, "bound implementation");
        self.implementations
            .insert(interface.to_string(), implementation.to_string());
        Ok(())
    }

    /// Bind a named parameter to a literal value
    ///
    /// Fails with [`Error::InvalidValue`] when the text does not parse as
    /// the parameter's declared type. A later call for the same parameter
    /// overwrites the earlier value.
    pub fn bind_parameter(&mut self, parameter: &str, value: &str) -> Result<()> {
        let node = self.hierarchy.parameter(parameter)?;
        if Literal::parse(node.value_type, value).is_none() {
            return Err(Error::invalid_value(
                parameter,
                node.value_type.to_string(),
                value,
            ));
        }
        debug!(parameter, value, "bound parameter");
        self.parameters
            .insert(parameter.to_string(), value.to_string());
        Ok(())
    }

    /// Mark a class singleton for the resolution scope; idempotent
    pub fn mark_singleton(&mut self, class: &str) -> Result<()> {
        let node = self.hierarchy.class(class)?;
        self.singletons.insert(node.full_name.clone());
        Ok(())
    }

    /// Freeze the accumulated bindings into an immutable configuration
    ///
    /// Performs no further validation; every invariant was enforced at
    /// bind time.
    pub fn build(self) -> Configuration {
        info!(
            implementations = self.implementations.len(),
            parameters = self.parameters.len(),
            singletons = self.singletons.len(),
            "configuration built"
        );
        Configuration {
            hierarchy: self.hierarchy,
            implementations: self.implementations,
            parameters: self.parameters,
            singletons: self.singletons,
        }
    }
}

/// Immutable set of bindings over a class hierarchy
///
/// Safe to share read-only across threads; the injector and the exporter
/// are independent consumers.
#[derive(Debug, Clone)]
pub struct Configuration {
    hierarchy: Arc<ClassHierarchy>,
    implementations: BTreeMap<String, String>,
    parameters: BTreeMap<String, String>,
    singletons: BTreeSet<String>,
}

impl Configuration {
    /// The hierarchy this configuration is layered over
    pub fn hierarchy(&self) -> &Arc<ClassHierarchy> {
        &self.hierarchy
    }

    /// True when the class is in the singleton set
    pub fn is_singleton(&self, class: &ClassNode) -> bool {
        self.singletons.contains(&class.full_name)
    }

    /// The explicitly bound implementation for an interface, if any
    pub fn bound_implementation(&self, class: &ClassNode) -> Option<&ClassNode> {
        let name = self.implementations.get(&class.full_name)?;
        self.hierarchy.class(name).ok()
    }

    /// The explicitly bound literal text for a named parameter, if any
    ///
    /// Absent means the resolver falls back to the declared default.
    pub fn bound_parameter_value(&self, parameter: &NamedParameterNode) -> Option<&str> {
        self.parameters
            .get(&parameter.full_name)
            .map(String::as_str)
    }
}
