//! Unit tests for value types and literal parsing

use wirebox_domain::value::{Literal, ValueType};

#[test]
fn test_value_type_from_str() {
    assert_eq!("Integer".parse::<ValueType>(), Ok(ValueType::Integer));
    assert_eq!("Float".parse::<ValueType>(), Ok(ValueType::Float));
    assert_eq!("Boolean".parse::<ValueType>(), Ok(ValueType::Boolean));
    assert_eq!("Text".parse::<ValueType>(), Ok(ValueType::Text));
}

#[test]
fn test_value_type_aliases() {
    assert_eq!("Double".parse::<ValueType>(), Ok(ValueType::Float));
    assert_eq!("String".parse::<ValueType>(), Ok(ValueType::Text));
}

#[test]
fn test_value_type_unknown() {
    let err = "Complex".parse::<ValueType>().expect_err("should reject");
    assert!(err.contains("Complex"));
}

#[test]
fn test_value_type_display() {
    assert_eq!(ValueType::Integer.to_string(), "Integer");
    assert_eq!(ValueType::Float.to_string(), "Float");
    assert_eq!(ValueType::Boolean.to_string(), "Boolean");
    assert_eq!(ValueType::Text.to_string(), "Text");
}

#[test]
fn test_literal_parse_integer() {
    assert_eq!(
        Literal::parse(ValueType::Integer, "42"),
        Some(Literal::Int(42))
    );
    assert_eq!(
        Literal::parse(ValueType::Integer, " -7 "),
        Some(Literal::Int(-7))
    );
    assert_eq!(Literal::parse(ValueType::Integer, "4.2"), None);
    assert_eq!(Literal::parse(ValueType::Integer, "abc"), None);
}

#[test]
fn test_literal_parse_float() {
    assert_eq!(
        Literal::parse(ValueType::Float, "2.5"),
        Some(Literal::Float(2.5))
    );
    assert_eq!(
        Literal::parse(ValueType::Float, "3"),
        Some(Literal::Float(3.0))
    );
    assert_eq!(Literal::parse(ValueType::Float, "nope"), None);
}

#[test]
fn test_literal_parse_boolean() {
    assert_eq!(
        Literal::parse(ValueType::Boolean, "true"),
        Some(Literal::Bool(true))
    );
    assert_eq!(
        Literal::parse(ValueType::Boolean, "false"),
        Some(Literal::Bool(false))
    );
    // Only the lowercase spellings are lexically valid.
    assert_eq!(Literal::parse(ValueType::Boolean, "True"), None);
    assert_eq!(Literal::parse(ValueType::Boolean, "1"), None);
}

#[test]
fn test_literal_parse_text_never_fails() {
    assert_eq!(
        Literal::parse(ValueType::Text, "anything at all"),
        Some(Literal::Text("anything at all".to_string()))
    );
}

#[test]
fn test_literal_value_type() {
    assert_eq!(Literal::Int(1).value_type(), ValueType::Integer);
    assert_eq!(Literal::Float(1.0).value_type(), ValueType::Float);
    assert_eq!(Literal::Bool(true).value_type(), ValueType::Boolean);
    assert_eq!(
        Literal::Text(String::new()).value_type(),
        ValueType::Text
    );
}

#[test]
fn test_literal_display() {
    assert_eq!(Literal::Int(5).to_string(), "5");
    assert_eq!(Literal::Bool(false).to_string(), "false");
    assert_eq!(Literal::Text("hi".to_string()).to_string(), "hi");
}
