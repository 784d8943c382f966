//! XPath-like queries over JSON documents.
//!
//! Paths are `/`-delimited. Each segment is one of:
//!
//! - a key, `name`, selecting a mapping entry
//! - an index, `[2]`, selecting a sequence element (0-based)
//! - a predicate, `[@id=42]`, selecting the first mapping in a sequence whose
//!   `id` entry equals `42`
//! - the iterator token `[*]`, understood only by [`JPath::iter_items`]
//!
//! Writes through [`JPath::set`] must be absolute: predicates are rejected.
//!
//! # Example
//!
//! ```
//! use jpath::{JPath, JPathError};
//! use serde_json::json;
//!
//! let mut doc = JPath::from_json(r#"{"a": [{"id": "1", "name": "x"}, {"id": "42", "name": "y"}]}"#).unwrap();
//!
//! assert_eq!(doc.get("a/[@id=42]/name").unwrap(), &json!("y"));
//! assert_eq!(doc.get("/a/[0]/id/").unwrap(), &json!("1"));
//!
//! doc.set("a/[1]/name", json!("z")).unwrap();
//! assert_eq!(doc.get("a/[1]/name").unwrap(), &json!("z"));
//!
//! let err = doc.set("a/[@id=42]/name", json!("w")).unwrap_err();
//! assert!(matches!(err, JPathError::SpeculativeQuery { .. }));
//! ```

use thiserror::Error;

pub mod cli;
pub mod eval;
pub mod options;
pub mod path;
pub mod render;
pub mod types;

pub use eval::{resolve, IterItems, JPath};
pub use options::JPathOptions;
pub use path::{classify, classify_absolute, Path, ITERATOR_TOKEN};
pub use render::to_debug_string;
pub use types::{NodeKind, Token};

#[derive(Debug, Error)]
pub enum JPathError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("malformed JSON document: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("no path provided")]
    EmptyPath,
    #[error("path has {len} tokens, at most {max} allowed")]
    PathTooLong { len: usize, max: usize },
    #[error("malformed token {token:?} in path {path:?}")]
    MalformedToken { token: String, path: String },
    #[error("token {token:?} in path {path:?} expects a {expected}, found a {found}")]
    TypeMismatch {
        token: String,
        path: String,
        expected: NodeKind,
        found: NodeKind,
    },
    #[error("key {key:?} not found (path {path:?})")]
    KeyNotFound { key: String, path: String },
    #[error("index {index} out of range for sequence of length {len} (path {path:?})")]
    IndexOutOfRange {
        index: usize,
        len: usize,
        path: String,
    },
    #[error("no element with {key}={value} (path {path:?})")]
    NoMatch {
        key: String,
        value: String,
        path: String,
    },
    #[error("only absolute paths can be written, got speculative token {token:?} in {path:?}")]
    SpeculativeQuery { token: String, path: String },
    #[error("expected iterator token [*] in path {path:?}")]
    MissingIteratorToken { path: String },
}
