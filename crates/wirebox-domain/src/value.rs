//! Typed literal values for named parameters
//!
//! Named parameters declare a value type as descriptive text ("Integer",
//! "Boolean", ...). [`Literal::parse`] is the single lexical-conversion
//! point: configuration binding, hierarchy default validation, and the
//! resolver all go through it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Declared value type of a named parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueType {
    /// 64-bit signed integer
    Integer,
    /// 64-bit floating point ("Double" is accepted as an alias)
    #[serde(alias = "Double")]
    Float,
    /// Boolean, spelled `true` / `false`
    Boolean,
    /// Free-form text ("String" is accepted as an alias)
    #[serde(alias = "String")]
    Text,
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Integer => "Integer",
            Self::Float => "Float",
            Self::Boolean => "Boolean",
            Self::Text => "Text",
        };
        write!(f, "{name}")
    }
}

impl FromStr for ValueType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Integer" => Ok(Self::Integer),
            "Float" | "Double" => Ok(Self::Float),
            "Boolean" => Ok(Self::Boolean),
            "Text" | "String" => Ok(Self::Text),
            other => Err(format!(
                "unknown value type {other:?}, expected Integer, Float, Boolean, or Text"
            )),
        }
    }
}

/// A typed scalar value, the result of parsing literal text against a
/// declared [`ValueType`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Literal {
    /// Integer value
    Int(i64),
    /// Floating point value
    Float(f64),
    /// Boolean value
    Bool(bool),
    /// Text value
    Text(String),
}

impl Literal {
    /// Parse literal text against a declared value type
    ///
    /// Returns `None` when the text is not lexically convertible; callers
    /// attach the parameter context to the resulting error themselves.
    pub fn parse(value_type: ValueType, text: &str) -> Option<Self> {
        match value_type {
            ValueType::Integer => text.trim().parse::<i64>().ok().map(Self::Int),
            ValueType::Float => text.trim().parse::<f64>().ok().map(Self::Float),
            ValueType::Boolean => match text.trim() {
                "true" => Some(Self::Bool(true)),
                "false" => Some(Self::Bool(false)),
                _ => None,
            },
            ValueType::Text => Some(Self::Text(text.to_string())),
        }
    }

    /// The value type this literal belongs to
    pub fn value_type(&self) -> ValueType {
        match self {
            Self::Int(_) => ValueType::Integer,
            Self::Float(_) => ValueType::Float,
            Self::Bool(_) => ValueType::Boolean,
            Self::Text(_) => ValueType::Text,
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Text(v) => write!(f, "{v}"),
        }
    }
}
