//! Class hierarchy construction and queries
//!
//! Builds the declaration node tree from a set of type descriptors:
//! package nodes are created for every namespace segment, classes and named
//! parameters become leaves, and known-implementation sets are computed
//! transitively. The hierarchy is immutable once built and safe to share
//! across threads behind an `Arc`.
//!
//! Storage is an ordered map keyed by fully-qualified name, so every
//! iteration order exposed to callers is lexicographic and export output
//! stays deterministic.

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, info};
use wirebox_domain::error::{Error, Result};
use wirebox_domain::node::{
    ArgKind, ClassNode, NamedParameterNode, Node, NodeKind, PackageNode, ROOT_NAME, parent_name_of,
    short_name_of,
};
use wirebox_domain::value::Literal;
use wirebox_domain::{ClassDescriptor, ParameterDescriptor, TypeDescriptor};

/// Immutable tree of declaration nodes built from type descriptors
#[derive(Debug, Clone)]
pub struct ClassHierarchy {
    nodes: BTreeMap<String, Node>,
}

impl ClassHierarchy {
    /// Build a hierarchy from a set of type descriptors
    ///
    /// Fails with [`Error::Hierarchy`] on fully-qualified name collisions,
    /// dangling `implements` or constructor-argument references, mismatched
    /// reference kinds, and unparsable parameter defaults.
    pub fn build(descriptors: &[TypeDescriptor]) -> Result<Self> {
        let mut nodes = BTreeMap::new();
        nodes.insert(ROOT_NAME.to_string(), Node::Package(PackageNode::new(ROOT_NAME)));

        for descriptor in descriptors {
            insert_descriptor(&mut nodes, descriptor)?;
        }

        validate_references(&nodes)?;
        compute_known_implementations(&mut nodes);
        sort_children(&mut nodes);

        let hierarchy = Self { nodes };
        info!(
            classes = hierarchy.count(NodeKind::Class),
            parameters = hierarchy.count(NodeKind::NamedParameter),
            packages = hierarchy.count(NodeKind::Package),
            "class hierarchy built"
        );
        Ok(hierarchy)
    }

    /// Look up a node by fully-qualified name
    pub fn node(&self, name: &str) -> Result<&Node> {
        self.nodes.get(name).ok_or_else(|| Error::not_found(name))
    }

    /// Look up a class node by fully-qualified name
    ///
    /// Fails with [`Error::NotFound`] when absent and [`Error::Hierarchy`]
    /// when the name belongs to a different node kind.
    pub fn class(&self, name: &str) -> Result<&ClassNode> {
        match self.node(name)? {
            Node::Class(node) => Ok(node),
            other => Err(Error::hierarchy(format!(
                "{name} is a {}, expected a class",
                other.kind()
            ))),
        }
    }

    /// Look up a named parameter node by fully-qualified name
    pub fn parameter(&self, name: &str) -> Result<&NamedParameterNode> {
        match self.node(name)? {
            Node::NamedParameter(node) => Ok(node),
            other => Err(Error::hierarchy(format!(
                "{name} is a {}, expected a named parameter",
                other.kind()
            ))),
        }
    }

    /// The shared namespace root (the empty-named package)
    pub fn namespace(&self) -> &PackageNode {
        match self.nodes.get(ROOT_NAME) {
            Some(Node::Package(root)) => root,
            // The root is inserted unconditionally in build()
            _ => unreachable!("hierarchy root missing"),
        }
    }

    /// Direct children of a package, in lexicographic order
    pub fn children<'a>(&'a self, package: &'a PackageNode) -> impl Iterator<Item = &'a Node> {
        package
            .children
            .iter()
            .filter_map(|name| self.nodes.get(name))
    }

    /// Every class known to satisfy the given node's type, in lexicographic
    /// order by fully-qualified name
    ///
    /// Includes the node itself when concrete, plus every class whose
    /// `implements` relationship reaches it transitively.
    pub fn known_implementations<'a>(&'a self, class: &ClassNode) -> Vec<&'a ClassNode> {
        class
            .known_implementations
            .iter()
            .filter_map(|name| match self.nodes.get(name) {
                Some(Node::Class(node)) => Some(node),
                _ => None,
            })
            .collect()
    }

    /// True when a node with the given fully-qualified name exists
    pub fn contains(&self, name: &str) -> bool {
        self.nodes.contains_key(name)
    }

    /// All nodes in lexicographic order by fully-qualified name
    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    fn count(&self, kind: NodeKind) -> usize {
        self.nodes.values().filter(|n| n.kind() == kind).count()
    }
}

fn insert_descriptor(nodes: &mut BTreeMap<String, Node>, descriptor: &TypeDescriptor) -> Result<()> {
    let name = descriptor.name();
    validate_name(name)?;

    let node = match descriptor {
        TypeDescriptor::Class(d) => Node::Class(class_node(d)),
        TypeDescriptor::Parameter(d) => Node::NamedParameter(parameter_node(d)?),
    };

    if let Some(existing) = nodes.get(name) {
        return Err(Error::hierarchy(format!(
            "name collision for {name}: already declared as a {}, redeclared as a {}",
            existing.kind(),
            node.kind()
        )));
    }

    ensure_packages(nodes, parent_name_of(name))?;
    attach_child(nodes, parent_name_of(name), name);
    debug!(name, kind = %node.kind(), "registered declaration node");
    nodes.insert(name.to_string(), node);
    Ok(())
}

fn class_node(descriptor: &ClassDescriptor) -> ClassNode {
    ClassNode {
        full_name: descriptor.name.clone(),
        short_name: short_name_of(&descriptor.name).to_string(),
        is_abstract: descriptor.is_abstract,
        external_constructor: descriptor.external_constructor,
        singleton_eligible: descriptor.singleton_eligible,
        implements: descriptor.implements.clone(),
        known_implementations: Vec::new(),
        constructor: descriptor.constructor.clone(),
    }
}

fn parameter_node(descriptor: &ParameterDescriptor) -> Result<NamedParameterNode> {
    // Defaults are type metadata: an unparsable default fails the build
    // rather than surfacing later during resolution.
    if let Some(default) = &descriptor.default {
        if Literal::parse(descriptor.value_type, default).is_none() {
            return Err(Error::hierarchy(format!(
                "malformed default for {}: {default:?} is not a valid {}",
                descriptor.name, descriptor.value_type
            )));
        }
    }
    Ok(NamedParameterNode {
        full_name: descriptor.name.clone(),
        short_name: short_name_of(&descriptor.name).to_string(),
        value_type: descriptor.value_type,
        default: descriptor.default.clone(),
        doc: descriptor.doc.clone(),
    })
}

fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::hierarchy("descriptor name must not be empty"));
    }
    if name.split('.').any(|segment| segment.is_empty()) {
        return Err(Error::hierarchy(format!(
            "malformed name {name:?}: empty namespace segment"
        )));
    }
    Ok(())
}

/// Create package nodes for every prefix of the given namespace path
fn ensure_packages(nodes: &mut BTreeMap<String, Node>, namespace: &str) -> Result<()> {
    if namespace == ROOT_NAME {
        return Ok(());
    }
    let mut path = String::new();
    for segment in namespace.split('.') {
        let parent = path.clone();
        if !path.is_empty() {
            path.push('.');
        }
        path.push_str(segment);
        match nodes.get(&path) {
            Some(Node::Package(_)) => {}
            Some(existing) => {
                return Err(Error::hierarchy(format!(
                    "name collision for {path}: already declared as a {}, needed as a package",
                    existing.kind()
                )));
            }
            None => {
                nodes.insert(path.clone(), Node::Package(PackageNode::new(path.clone())));
                attach_child(nodes, &parent, &path);
            }
        }
    }
    Ok(())
}

fn attach_child(nodes: &mut BTreeMap<String, Node>, parent: &str, child: &str) {
    if let Some(Node::Package(package)) = nodes.get_mut(parent) {
        if !package.children.iter().any(|c| c == child) {
            package.children.push(child.to_string());
        }
    }
}

/// Verify that every implements target and constructor-argument target
/// names an existing node of the right kind
fn validate_references(nodes: &BTreeMap<String, Node>) -> Result<()> {
    for node in nodes.values() {
        let Node::Class(class) = node else { continue };
        for interface in &class.implements {
            match nodes.get(interface.as_str()) {
                Some(Node::Class(_)) => {}
                Some(other) => {
                    return Err(Error::hierarchy(format!(
                        "{}: implements target {interface} is a {}, expected a class",
                        class.full_name,
                        other.kind()
                    )));
                }
                None => {
                    return Err(Error::hierarchy(format!(
                        "{}: implements target {interface} is not declared",
                        class.full_name
                    )));
                }
            }
        }
        for arg in &class.constructor {
            let expected = match arg.kind {
                ArgKind::Class => NodeKind::Class,
                ArgKind::Parameter => NodeKind::NamedParameter,
            };
            match nodes.get(&arg.target) {
                Some(target) if target.kind() == expected => {}
                Some(target) => {
                    return Err(Error::hierarchy(format!(
                        "{}: constructor argument {} is a {}, expected a {expected}",
                        class.full_name,
                        arg.target,
                        target.kind()
                    )));
                }
                None => {
                    return Err(Error::hierarchy(format!(
                        "{}: constructor argument {} is not declared",
                        class.full_name, arg.target
                    )));
                }
            }
        }
    }
    Ok(())
}

/// Populate each class's known-implementations set: the class itself when
/// concrete, plus every class reaching it transitively via `implements`
fn compute_known_implementations(nodes: &mut BTreeMap<String, Node>) {
    let direct: BTreeMap<String, Vec<String>> = nodes
        .values()
        .filter_map(|node| match node {
            Node::Class(class) => Some((class.full_name.clone(), class.implements.clone())),
            _ => None,
        })
        .collect();

    let mut implementations: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    for (class, _) in &direct {
        let mut stack: Vec<&String> = direct[class].iter().collect();
        let mut seen = BTreeSet::new();
        while let Some(supertype) = stack.pop() {
            if !seen.insert(supertype.clone()) {
                continue;
            }
            implementations
                .entry(supertype.clone())
                .or_default()
                .insert(class.clone());
            if let Some(parents) = direct.get(supertype) {
                stack.extend(parents.iter());
            }
        }
    }

    for node in nodes.values_mut() {
        let Node::Class(class) = node else { continue };
        let mut known: BTreeSet<String> = implementations
            .remove(&class.full_name)
            .unwrap_or_default();
        if class.is_concrete() {
            known.insert(class.full_name.clone());
        }
        class.known_implementations = known.into_iter().collect();
    }
}

fn sort_children(nodes: &mut BTreeMap<String, Node>) {
    for node in nodes.values_mut() {
        if let Node::Package(package) = node {
            package.children.sort();
        }
    }
}
