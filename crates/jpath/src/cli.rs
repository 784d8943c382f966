//! Document glue for the `jpath` binary.
//!
//! Each helper takes the document as JSON text and returns JSON text:
//! - `get`: the value at a path
//! - `set`: the whole document after an assignment
//! - `iter`: one compact value per line

use serde_json::Value;

use crate::{JPath, JPathError};

// ── Errors ────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub enum CliError {
    Json(serde_json::Error),
    Query(JPathError),
    Usage(String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Json(e)  => write!(f, "{e}"),
            CliError::Query(e) => write!(f, "{e}"),
            CliError::Usage(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for CliError {}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self { CliError::Json(e) }
}

impl From<JPathError> for CliError {
    fn from(e: JPathError) -> Self { CliError::Query(e) }
}

pub const USAGE: &str = "\
Usage:
  jpath get <path>
  jpath set <path> <json-value>
  jpath iter <path>

The document is read from stdin.";

// ── commands ──────────────────────────────────────────────────────────────

/// Look up `path` in a document.
///
/// Returns the value as pretty-printed JSON.
pub fn lookup(doc_json: &str, path: &str) -> Result<String, CliError> {
    let doc = JPath::from_json(doc_json)?;
    Ok(serde_json::to_string_pretty(doc.get(path)?)?)
}

/// Assign `value_json` at `path`.
///
/// Returns the updated document as pretty-printed JSON.
pub fn assign(doc_json: &str, path: &str, value_json: &str) -> Result<String, CliError> {
    let mut doc = JPath::from_json(doc_json)?;
    let value: Value = serde_json::from_str(value_json)?;
    doc.set(path, value)?;
    Ok(serde_json::to_string_pretty(doc.value())?)
}

/// Iterate over `path`, which must contain `[*]`.
///
/// Returns one compact JSON value per line. The first element that fails to
/// resolve aborts the whole listing.
pub fn iterate(doc_json: &str, path: &str) -> Result<String, CliError> {
    let doc = JPath::from_json(doc_json)?;
    let mut out = String::new();
    for item in doc.iter_items(path)? {
        out.push_str(&serde_json::to_string(item?)?);
        out.push('\n');
    }
    Ok(out)
}

/// Dispatch a command line (without the program name).
pub fn run(args: &[String], doc_json: &str) -> Result<String, CliError> {
    match args {
        [cmd, path] if cmd == "get" => lookup(doc_json, path),
        [cmd, path, value] if cmd == "set" => assign(doc_json, path, value),
        [cmd, path] if cmd == "iter" => iterate(doc_json, path),
        _ => Err(CliError::Usage(USAGE.to_string())),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"{"items":[{"id":"a","value":1},{"id":"b","value":2}]}"#;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn lookup_scalar() {
        let out = lookup(DOC, "items/[@id=b]/value").unwrap();
        assert_eq!(out.trim(), "2");
    }

    #[test]
    fn lookup_missing_key() {
        let err = lookup(DOC, "nope").unwrap_err();
        assert!(matches!(err, CliError::Query(JPathError::KeyNotFound { .. })));
    }

    #[test]
    fn lookup_bad_document() {
        let err = lookup("{", "a").unwrap_err();
        assert!(matches!(err, CliError::Query(JPathError::Parse(_))));
    }

    #[test]
    fn assign_returns_document() {
        let out = assign(DOC, "items/[0]/value", "10").unwrap();
        let v: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(v["items"][0]["value"], 10);
        assert_eq!(v["items"][1]["value"], 2);
    }

    #[test]
    fn assign_bad_value() {
        let err = assign(DOC, "items/[0]/value", "{oops").unwrap_err();
        assert!(matches!(err, CliError::Json(_)));
    }

    #[test]
    fn iterate_lines() {
        let out = iterate(DOC, "items/[*]/id").unwrap();
        assert_eq!(out, "\"a\"\n\"b\"\n");
    }

    #[test]
    fn iterate_element_error() {
        let err = iterate(DOC, "items/[*]/missing").unwrap_err();
        assert!(matches!(err, CliError::Query(JPathError::KeyNotFound { .. })));
    }

    #[test]
    fn run_dispatch() {
        assert_eq!(run(&args(&["get", "items/[1]/id"]), DOC).unwrap().trim(), "\"b\"");
        assert_eq!(run(&args(&["iter", "items/[*]/value"]), DOC).unwrap(), "1\n2\n");
        assert!(run(&args(&["set", "items/[1]/id", "\"c\""]), DOC).is_ok());
    }

    #[test]
    fn run_usage() {
        let err = run(&args(&["frobnicate"]), DOC).unwrap_err();
        assert!(matches!(err, CliError::Usage(_)));
        assert!(err.to_string().starts_with("Usage:"));
    }
}
