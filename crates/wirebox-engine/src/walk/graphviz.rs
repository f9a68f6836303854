//! Graphviz DOT export of a configuration
//!
//! A concrete walk visitor that renders the declaration tree plus the
//! binding layer as a DOT digraph: packages as folders, classes as boxes
//! (filled when singleton), named parameters as ovals; containment edges
//! with a diamond arrowtail, `implements` edges dashed (bold for external
//! constructors), `binds` edges solid. Output order follows the walk, which
//! is lexicographic by fully-qualified name, so exporting the same
//! configuration twice produces byte-identical text.

use std::fmt::Write as _;

use wirebox_domain::node::{ClassNode, NamedParameterNode, Node, PackageNode};

use crate::configuration::Configuration;
use crate::walk::{ConfigVisitor, walk_preorder};

/// Legend cluster describing the edge and node conventions
const LEGEND: &str = concat!(
    "  subgraph cluster_legend {\n",
    "    label=\"Legend\";\n",
    "    shape=box;\n",
    "    subgraph cluster_legend_edges {\n",
    "      style=invis; label=\"\";\n",
    "      ex1l [shape=point, label=\"\"]; ex1r [shape=point, label=\"\"];\n",
    "      ex2l [shape=point, label=\"\"]; ex2r [shape=point, label=\"\"];\n",
    "      ex3l [shape=point, label=\"\"]; ex3r [shape=point, label=\"\"];\n",
    "      ex4l [shape=point, label=\"\"]; ex4r [shape=point, label=\"\"];\n",
    "      ex1l -> ex1r [style=solid, dir=back, arrowtail=diamond, label=\"contains\"];\n",
    "      ex2l -> ex2r [style=dashed, dir=back, arrowtail=empty, label=\"implements\"];\n",
    "      ex3l -> ex3r [style=\"dashed,bold\", dir=back, arrowtail=empty, label=\"external\"];\n",
    "      ex4l -> ex4r [style=solid, dir=back, arrowtail=normal, label=\"binds\"];\n",
    "    }\n",
    "    subgraph cluster_legend_shapes {\n",
    "      style=invis; label=\"\";\n",
    "      PackageNode [shape=folder];\n",
    "      ClassNode [shape=box];\n",
    "      Singleton [shape=box, style=filled];\n",
    "      NamedParameterNode [shape=oval];\n",
    "    }\n",
    "  }\n",
);

/// Walk visitor accumulating a DOT representation of the configuration
///
/// Read-only over the configuration; may be run any number of times,
/// concurrently with resolution, against the same frozen configuration.
pub struct GraphvizVisitor<'a> {
    configuration: &'a Configuration,
    show_impls: bool,
    out: String,
}

impl<'a> GraphvizVisitor<'a> {
    /// Create a visitor
    ///
    /// `show_impls` adds `implements` edges for every known implementation;
    /// without it only external-constructor implementations are drawn.
    /// `show_legend` prepends the legend cluster.
    pub fn new(configuration: &'a Configuration, show_impls: bool, show_legend: bool) -> Self {
        let mut out = String::from("digraph Configuration {\n  rankdir=LR;\n");
        if show_legend {
            out.push_str(LEGEND);
        }
        Self {
            configuration,
            show_impls,
            out,
        }
    }

    /// Close the digraph and return the DOT text
    pub fn finish(mut self) -> String {
        self.out.push_str("}\n");
        self.out
    }
}

impl ConfigVisitor for GraphvizVisitor<'_> {
    fn visit_package(&mut self, node: &PackageNode) -> bool {
        // The root is the empty namespace and gets no node of its own.
        if !node.is_root() {
            let _ = writeln!(
                self.out,
                "  \"{}\" [label=\"{}\", shape=folder];",
                node.full_name, node.full_name
            );
        }
        true
    }

    fn visit_class(&mut self, node: &ClassNode) -> bool {
        let style = if self.configuration.is_singleton(node) {
            ", style=filled"
        } else {
            ""
        };
        let _ = writeln!(
            self.out,
            "  \"{}\" [label=\"{}\", shape=box{}];",
            node.full_name, node.short_name, style
        );

        let bound = self.configuration.bound_implementation(node);
        if let Some(bound) = bound {
            if bound.full_name != node.full_name {
                let _ = writeln!(
                    self.out,
                    "  \"{}\" -> \"{}\" [style=solid, dir=back, arrowtail=normal];",
                    node.full_name, bound.full_name
                );
            }
        }

        let bound_name = bound.map(|b| b.full_name.as_str());
        for implementation in self
            .configuration
            .hierarchy()
            .known_implementations(node)
        {
            if implementation.full_name == node.full_name
                || Some(implementation.full_name.as_str()) == bound_name
            {
                continue;
            }
            if implementation.external_constructor || self.show_impls {
                let style = if implementation.external_constructor {
                    "dashed,bold"
                } else {
                    "dashed"
                };
                let _ = writeln!(
                    self.out,
                    "  \"{}\" -> \"{}\" [style=\"{}\", dir=back, arrowtail=empty];",
                    node.full_name, implementation.full_name, style
                );
            }
        }
        true
    }

    fn visit_named_parameter(&mut self, node: &NamedParameterNode) -> bool {
        let bound = self.configuration.bound_parameter_value(node);
        let default = node.default.as_deref();
        let value = bound.or(default).unwrap_or("<unset>");

        let mut label = format!("{}\\n{} = {}", node.value_type, node.short_name, value);
        if let Some(default) = default {
            if bound != Some(default) {
                let _ = write!(label, "\\n(default = {default})");
            }
        }
        let _ = writeln!(
            self.out,
            "  \"{}\" [label=\"{}\", shape=oval];",
            node.full_name, label
        );
        true
    }

    fn visit_edge(&mut self, from: &Node, to: &Node) -> bool {
        if !from.full_name().is_empty() {
            let _ = writeln!(
                self.out,
                "  \"{}\" -> \"{}\" [style=solid, dir=back, arrowtail=diamond];",
                from.full_name(),
                to.full_name()
            );
        }
        true
    }
}

/// Render a configuration as a Graphviz DOT string
pub fn to_graphviz(configuration: &Configuration, show_impls: bool, show_legend: bool) -> String {
    let mut visitor = GraphvizVisitor::new(configuration, show_impls, show_legend);
    walk_preorder(configuration.hierarchy(), &mut visitor);
    visitor.finish()
}
