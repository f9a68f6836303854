//! Pre-order traversal over the declaration node tree
//!
//! A generic walk starting at the hierarchy's namespace root. The visitor
//! has one method per node variant plus one for containment edges; each
//! returns a "keep going" signal: a false node visit skips that node's
//! children, a false edge visit skips that child subtree. Children are
//! visited in lexicographic order, so visitors observe a deterministic
//! sequence.

pub mod graphviz;

use wirebox_domain::node::{ClassNode, NamedParameterNode, Node, PackageNode, ROOT_NAME};

use crate::hierarchy::ClassHierarchy;

/// Per-variant callbacks for the pre-order walk
pub trait ConfigVisitor {
    /// Visit a package node; return false to skip its children
    fn visit_package(&mut self, node: &PackageNode) -> bool;

    /// Visit a class node; return false to stop descending
    fn visit_class(&mut self, node: &ClassNode) -> bool;

    /// Visit a named parameter node; return false to stop descending
    fn visit_named_parameter(&mut self, node: &NamedParameterNode) -> bool;

    /// Visit a containment edge; return false to skip the child subtree
    fn visit_edge(&mut self, from: &Node, to: &Node) -> bool {
        let _ = (from, to);
        true
    }
}

/// Walk the hierarchy pre-order from the namespace root
pub fn walk_preorder<V: ConfigVisitor>(hierarchy: &ClassHierarchy, visitor: &mut V) {
    let Ok(root) = hierarchy.node(ROOT_NAME) else {
        return;
    };
    walk_node(hierarchy, root, visitor);
}

fn walk_node<V: ConfigVisitor>(hierarchy: &ClassHierarchy, node: &Node, visitor: &mut V) {
    let descend = match node {
        Node::Package(package) => visitor.visit_package(package),
        Node::Class(class) => visitor.visit_class(class),
        Node::NamedParameter(parameter) => visitor.visit_named_parameter(parameter),
    };
    if !descend {
        return;
    }
    if let Node::Package(package) = node {
        for child in hierarchy.children(package) {
            if visitor.visit_edge(node, child) {
                walk_node(hierarchy, child, visitor);
            }
        }
    }
}
