//! Unit tests for type descriptors and their serialized form

use wirebox_domain::node::{ArgKind, ConstructorArg};
use wirebox_domain::value::ValueType;
use wirebox_domain::{ClassDescriptor, ParameterDescriptor, TypeDescriptor};

#[test]
fn test_class_descriptor_builder() {
    let descriptor = ClassDescriptor::new("demo.shapes.Circle")
        .with_implements("demo.shapes.Shape")
        .with_arg(ConstructorArg::parameter("demo.shapes.Radius"))
        .singleton();

    assert_eq!(descriptor.name, "demo.shapes.Circle");
    assert_eq!(descriptor.implements, ["demo.shapes.Shape".to_string()]);
    assert!(!descriptor.is_abstract);
    assert!(descriptor.singleton_eligible);
    assert_eq!(descriptor.constructor.len(), 1);
    assert_eq!(descriptor.constructor[0].kind, ArgKind::Parameter);
}

#[test]
fn test_parameter_descriptor_builder() {
    let descriptor = ParameterDescriptor::new("demo.shapes.Radius", ValueType::Integer)
        .with_default("1")
        .with_doc("Radius of a circle");

    assert_eq!(descriptor.name, "demo.shapes.Radius");
    assert_eq!(descriptor.value_type, ValueType::Integer);
    assert_eq!(descriptor.default.as_deref(), Some("1"));
    assert_eq!(descriptor.doc, "Radius of a circle");
}

#[test]
fn test_type_descriptor_name() {
    let class: TypeDescriptor = ClassDescriptor::new("demo.A").into();
    let parameter: TypeDescriptor =
        ParameterDescriptor::new("demo.P", ValueType::Text).into();
    assert_eq!(class.name(), "demo.A");
    assert_eq!(parameter.name(), "demo.P");
}

#[test]
fn test_type_descriptor_serialization() {
    let descriptor: TypeDescriptor = ClassDescriptor::new("demo.shapes.Circle")
        .with_implements("demo.shapes.Shape")
        .with_arg(ConstructorArg::class("demo.app.Pen"))
        .into();

    let json = serde_json::to_value(&descriptor).expect("serialization should succeed");
    assert_eq!(json["kind"], "class");
    assert_eq!(json["name"], "demo.shapes.Circle");
    assert_eq!(json["constructor"][0]["kind"], "class");

    let back: TypeDescriptor =
        serde_json::from_value(json).expect("deserialization should succeed");
    assert_eq!(back, descriptor);
}

#[test]
fn test_value_type_alias_deserialization() {
    let json = serde_json::json!({
        "kind": "parameter",
        "name": "demo.Threshold",
        "value_type": "Double",
    });
    let descriptor: TypeDescriptor =
        serde_json::from_value(json).expect("deserialization should succeed");
    let TypeDescriptor::Parameter(parameter) = descriptor else {
        panic!("expected a parameter descriptor");
    };
    assert_eq!(parameter.value_type, ValueType::Float);
    assert_eq!(parameter.default, None);
}
