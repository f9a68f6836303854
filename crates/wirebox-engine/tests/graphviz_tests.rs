//! Tests for the Graphviz DOT export

mod common;

use std::sync::Arc;

use common::{CIRCLE, RADIUS, SHAPE, shapes_hierarchy};
use wirebox_domain::node::ConstructorArg;
use wirebox_domain::ClassDescriptor;
use wirebox_engine::{ClassHierarchy, Configuration, ConfigurationBuilder, to_graphviz};

fn shapes_configuration() -> Configuration {
    let mut builder = ConfigurationBuilder::new(shapes_hierarchy());
    builder
        .bind_implementation(SHAPE, CIRCLE)
        .expect("bind should succeed");
    builder.bind_parameter(RADIUS, "5").expect("bind should succeed");
    builder.mark_singleton(CIRCLE).expect("mark should succeed");
    builder.build()
}

#[test]
fn test_export_is_deterministic() {
    let configuration = shapes_configuration();
    let first = to_graphviz(&configuration, true, true);
    let second = to_graphviz(&configuration, true, true);
    assert_eq!(first, second);
}

#[test]
fn test_digraph_frame() {
    let dot = to_graphviz(&shapes_configuration(), false, false);
    assert!(dot.starts_with("digraph Configuration {\n  rankdir=LR;\n"));
    assert!(dot.ends_with("}\n"));
}

#[test]
fn test_legend_is_optional() {
    let configuration = shapes_configuration();
    let with_legend = to_graphviz(&configuration, false, true);
    let without_legend = to_graphviz(&configuration, false, false);
    assert!(with_legend.contains("subgraph cluster_legend {"));
    assert!(with_legend.contains("label=\"binds\""));
    assert!(!without_legend.contains("cluster_legend"));
}

#[test]
fn test_package_nodes_use_full_names() {
    let dot = to_graphviz(&shapes_configuration(), false, false);
    assert!(dot.contains("  \"demo.shapes\" [label=\"demo.shapes\", shape=folder];\n"));
    assert!(dot.contains("  \"demo.app\" [label=\"demo.app\", shape=folder];\n"));
}

#[test]
fn test_singleton_classes_are_filled() {
    let dot = to_graphviz(&shapes_configuration(), false, false);
    assert!(dot.contains("  \"demo.shapes.Circle\" [label=\"Circle\", shape=box, style=filled];\n"));
    assert!(dot.contains("  \"demo.shapes.Square\" [label=\"Square\", shape=box];\n"));
}

#[test]
fn test_binds_edge_for_explicit_binding() {
    let dot = to_graphviz(&shapes_configuration(), false, false);
    assert!(dot.contains(
        "  \"demo.shapes.Shape\" -> \"demo.shapes.Circle\" [style=solid, dir=back, arrowtail=normal];\n"
    ));
}

#[test]
fn test_parameter_labels() {
    let dot = to_graphviz(&shapes_configuration(), false, false);
    // Bound away from the default: both the value and the default show.
    assert!(dot.contains(
        "  \"demo.shapes.Radius\" [label=\"Integer\\nRadius = 5\\n(default = 1)\", shape=oval];\n"
    ));
    // Unbound: the default is the effective value and still annotated.
    assert!(dot.contains(
        "  \"demo.shapes.Side\" [label=\"Integer\\nSide = 1\\n(default = 1)\", shape=oval];\n"
    ));
}

#[test]
fn test_parameter_bound_to_its_default_has_no_annotation() {
    let mut builder = ConfigurationBuilder::new(shapes_hierarchy());
    builder.bind_parameter(RADIUS, "1").expect("bind should succeed");
    let dot = to_graphviz(&builder.build(), false, false);
    assert!(dot.contains("  \"demo.shapes.Radius\" [label=\"Integer\\nRadius = 1\", shape=oval];\n"));
}

#[test]
fn test_implements_edges_are_gated_by_show_impls() {
    let configuration = shapes_configuration();
    let square_edge =
        "  \"demo.shapes.Shape\" -> \"demo.shapes.Square\" [style=\"dashed\", dir=back, arrowtail=empty];\n";

    let plain = to_graphviz(&configuration, false, false);
    assert!(!plain.contains(square_edge));

    let with_impls = to_graphviz(&configuration, true, false);
    assert!(with_impls.contains(square_edge));
    // The bound implementation is already drawn as a binds edge.
    assert!(!with_impls.contains(
        "  \"demo.shapes.Shape\" -> \"demo.shapes.Circle\" [style=\"dashed\", dir=back, arrowtail=empty];\n"
    ));
}

#[test]
fn test_external_implementations_are_always_drawn_bold() {
    let descriptors = vec![
        ClassDescriptor::new("a.Store").abstract_class().into(),
        ClassDescriptor::new("a.RemoteStore")
            .external()
            .with_implements("a.Store")
            .into(),
    ];
    let hierarchy =
        Arc::new(ClassHierarchy::build(&descriptors).expect("hierarchy should build"));
    let configuration = ConfigurationBuilder::new(hierarchy).build();

    let dot = to_graphviz(&configuration, false, false);
    assert!(dot.contains(
        "  \"a.Store\" -> \"a.RemoteStore\" [style=\"dashed,bold\", dir=back, arrowtail=empty];\n"
    ));
}

#[test]
fn test_containment_edges() {
    let dot = to_graphviz(&shapes_configuration(), false, false);
    assert!(dot.contains(
        "  \"demo.shapes\" -> \"demo.shapes.Circle\" [style=solid, dir=back, arrowtail=diamond];\n"
    ));
    assert!(dot.contains(
        "  \"demo\" -> \"demo.shapes\" [style=solid, dir=back, arrowtail=diamond];\n"
    ));
    // The root namespace draws no edges of its own.
    assert!(!dot.contains("\"\" ->"));
}

#[test]
fn test_walk_order_is_lexicographic() {
    let dot = to_graphviz(&shapes_configuration(), false, false);
    let app = dot.find("\"demo.app\" [label").expect("demo.app should be present");
    let shapes = dot
        .find("\"demo.shapes\" [label")
        .expect("demo.shapes should be present");
    assert!(app < shapes);
}

#[test]
fn test_constructor_arguments_do_not_add_edges() {
    let descriptors = vec![
        ClassDescriptor::new("a.Service")
            .with_arg(ConstructorArg::class("a.Worker"))
            .into(),
        ClassDescriptor::new("a.Worker").into(),
    ];
    let hierarchy =
        Arc::new(ClassHierarchy::build(&descriptors).expect("hierarchy should build"));
    let configuration = ConfigurationBuilder::new(hierarchy).build();

    let dot = to_graphviz(&configuration, true, false);
    assert!(!dot.contains("\"a.Service\" -> \"a.Worker\""));
}
