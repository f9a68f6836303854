//! Shared fixtures for engine tests
//!
//! The shapes project: an abstract `Shape` with two concrete
//! implementations, integer parameters with defaults, and a `Renderer`
//! depending on `Shape` by interface.

use std::sync::Arc;

use wirebox_domain::TypeDescriptor;
use wirebox_domain::node::ConstructorArg;
use wirebox_domain::value::ValueType;
use wirebox_domain::{ClassDescriptor, ParameterDescriptor};
use wirebox_engine::ClassHierarchy;

pub const SHAPE: &str = "demo.shapes.Shape";
pub const CIRCLE: &str = "demo.shapes.Circle";
pub const SQUARE: &str = "demo.shapes.Square";
pub const RADIUS: &str = "demo.shapes.Radius";
pub const SIDE: &str = "demo.shapes.Side";
pub const RENDERER: &str = "demo.app.Renderer";

pub fn shapes_descriptors() -> Vec<TypeDescriptor> {
    vec![
        ClassDescriptor::new(SHAPE).abstract_class().into(),
        ClassDescriptor::new(CIRCLE)
            .with_implements(SHAPE)
            .with_arg(ConstructorArg::parameter(RADIUS))
            .into(),
        ClassDescriptor::new(SQUARE)
            .with_implements(SHAPE)
            .with_arg(ConstructorArg::parameter(SIDE))
            .into(),
        ClassDescriptor::new(RENDERER)
            .with_arg(ConstructorArg::class(SHAPE))
            .into(),
        ParameterDescriptor::new(RADIUS, ValueType::Integer)
            .with_default("1")
            .with_doc("Radius of a circle")
            .into(),
        ParameterDescriptor::new(SIDE, ValueType::Integer)
            .with_default("1")
            .with_doc("Side length of a square")
            .into(),
    ]
}

pub fn shapes_hierarchy() -> Arc<ClassHierarchy> {
    Arc::new(ClassHierarchy::build(&shapes_descriptors()).expect("hierarchy should build"))
}
