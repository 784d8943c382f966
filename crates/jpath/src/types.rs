//! Type definitions for path tokens and tree node kinds.

use serde_json::Value;
use std::fmt;

/// A classified path segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Bare identifier selecting a mapping entry: `name`
    Key(String),
    /// Zero-based sequence position: `[2]`
    Index(usize),
    /// First mapping in a sequence whose `key` entry equals `value`: `[@id=42]`
    Predicate { key: String, value: String },
}

impl Token {
    /// The container kind this token has to be applied to.
    pub fn expects(&self) -> NodeKind {
        match self {
            Token::Key(_) => NodeKind::Object,
            Token::Index(_) | Token::Predicate { .. } => NodeKind::Array,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Key(key) => f.write_str(key),
            Token::Index(index) => write!(f, "[{index}]"),
            Token::Predicate { key, value } => write!(f, "[@{key}={value}]"),
        }
    }
}

/// The variant of a tree node, used in type mismatch diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
}

impl NodeKind {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => NodeKind::Null,
            Value::Bool(_) => NodeKind::Bool,
            Value::Number(_) => NodeKind::Number,
            Value::String(_) => NodeKind::String,
            Value::Array(_) => NodeKind::Array,
            Value::Object(_) => NodeKind::Object,
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            NodeKind::Null => "null",
            NodeKind::Bool => "boolean",
            NodeKind::Number => "number",
            NodeKind::String => "string",
            NodeKind::Array => "sequence",
            NodeKind::Object => "mapping",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_token_display() {
        assert_eq!(Token::Key("foo".to_string()).to_string(), "foo");
        assert_eq!(Token::Index(3).to_string(), "[3]");
        let predicate = Token::Predicate {
            key: "id".to_string(),
            value: "42".to_string(),
        };
        assert_eq!(predicate.to_string(), "[@id=42]");
    }

    #[test]
    fn test_token_expects() {
        assert_eq!(Token::Key("a".to_string()).expects(), NodeKind::Object);
        assert_eq!(Token::Index(0).expects(), NodeKind::Array);
    }

    #[test]
    fn test_node_kind_of() {
        assert_eq!(NodeKind::of(&json!(null)), NodeKind::Null);
        assert_eq!(NodeKind::of(&json!(true)), NodeKind::Bool);
        assert_eq!(NodeKind::of(&json!(1.5)), NodeKind::Number);
        assert_eq!(NodeKind::of(&json!("x")), NodeKind::String);
        assert_eq!(NodeKind::of(&json!([])), NodeKind::Array);
        assert_eq!(NodeKind::of(&json!({})), NodeKind::Object);
        assert_eq!(NodeKind::Array.to_string(), "sequence");
    }
}
