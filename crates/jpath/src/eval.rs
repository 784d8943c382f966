//! Path evaluation over a JSON tree.

use log::{debug, trace};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::options::JPathOptions;
use crate::path::{Path, ITERATOR_TOKEN};
use crate::render::to_debug_string;
use crate::types::{NodeKind, Token};
use crate::JPathError;

/// Path evaluator owning a JSON document.
///
/// # Example
///
/// ```
/// use jpath::JPath;
/// use serde_json::json;
///
/// let mut doc = JPath::new(json!({"a": [{"id": "1", "name": "x"}, {"id": "42", "name": "y"}]})).unwrap();
/// assert_eq!(doc.get("a/[@id=42]/name").unwrap(), &json!("y"));
///
/// doc.set("a/[0]/name", json!("z")).unwrap();
/// let names: Vec<_> = doc.iter_items("a/[*]/name").unwrap().collect::<Result<_, _>>().unwrap();
/// assert_eq!(names, vec![&json!("z"), &json!("y")]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct JPath {
    root: Value,
    options: JPathOptions,
}

impl JPath {
    /// Wrap an already parsed document using default options.
    pub fn new(root: Value) -> Result<Self, JPathError> {
        Self::with_options(root, JPathOptions::default())
    }

    pub fn with_options(root: Value, options: JPathOptions) -> Result<Self, JPathError> {
        if root.is_null() {
            return Err(JPathError::InvalidInput("document is null".to_string()));
        }
        Ok(Self { root, options })
    }

    /// Parse a JSON document from text.
    pub fn from_json(text: &str) -> Result<Self, JPathError> {
        if text.trim().is_empty() {
            return Err(JPathError::InvalidInput("document is empty".to_string()));
        }
        Self::new(serde_json::from_str(text)?)
    }

    /// Parse a JSON document from raw bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, JPathError> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Err(JPathError::InvalidInput("document is empty".to_string()));
        }
        Self::new(serde_json::from_slice(bytes)?)
    }

    pub fn options(&self) -> &JPathOptions {
        &self.options
    }

    pub fn value(&self) -> &Value {
        &self.root
    }

    pub fn value_mut(&mut self) -> &mut Value {
        &mut self.root
    }

    pub fn into_value(self) -> Value {
        self.root
    }

    /// Resolve `path` from the document root.
    ///
    /// # Errors
    ///
    /// - `EmptyPath` / `MalformedToken` / `PathTooLong` if the path does not tokenize
    /// - `TypeMismatch` if a token meets the wrong container kind
    /// - `KeyNotFound`, `IndexOutOfRange` or `NoMatch` if a step finds nothing
    pub fn get(&self, path: &str) -> Result<&Value, JPathError> {
        debug!("get {path:?}");
        let parsed = Path::parse_with(path, &self.options)?;
        resolve(&self.root, &parsed)
    }

    /// Replace the value at an absolute `path`.
    ///
    /// The final key is inserted when missing; the final index must already
    /// exist. Nothing is modified unless the whole path resolves.
    ///
    /// # Errors
    ///
    /// - `SpeculativeQuery` if any token is a predicate
    /// - `MalformedToken` for tokens that are neither an alphanumeric key nor an index
    /// - the lookup errors of [`JPath::get`] for the parent steps
    pub fn set(&mut self, path: &str, value: Value) -> Result<(), JPathError> {
        debug!("set {path:?}");
        let parsed = Path::parse_absolute(path, &self.options)?;
        let (last, parents) = parsed
            .tokens()
            .split_last()
            .ok_or(JPathError::EmptyPath)?;

        let mut node = &mut self.root;
        for token in parents {
            trace!("descend {token} into {}", NodeKind::of(node));
            node = step_mut(node, token, parsed.as_str())?;
        }
        assign(node, last, value, parsed.as_str())
    }

    /// Iterate over the sequence at the base of `path`.
    ///
    /// `path` is split around the `[*]` token. The part before it is required
    /// and must resolve to a sequence; the part after it, if any, is resolved
    /// against each element as the iterator advances. Errors name all of `path`.
    ///
    /// # Example
    ///
    /// ```
    /// use jpath::JPath;
    /// use serde_json::json;
    ///
    /// let doc = JPath::new(json!({"items": [{"value": 1}, {"value": 2}]})).unwrap();
    /// let values: Vec<_> = doc
    ///     .iter_items("items/[*]/value")
    ///     .unwrap()
    ///     .map(|item| item.unwrap().clone())
    ///     .collect();
    /// assert_eq!(values, vec![json!(1), json!(2)]);
    /// ```
    pub fn iter_items(&self, path: &str) -> Result<IterItems<'_>, JPathError> {
        debug!("iter_items {path:?}");
        let (base, trailing) =
            path.split_once(ITERATOR_TOKEN)
                .ok_or_else(|| JPathError::MissingIteratorToken {
                    path: path.to_string(),
                })?;
        if trailing.contains(ITERATOR_TOKEN) {
            return Err(JPathError::MalformedToken {
                token: ITERATOR_TOKEN.to_string(),
                path: path.to_string(),
            });
        }

        let base_node = resolve(
            &self.root,
            &Path::parse_fragment(base, path, &self.options)?,
        )?;
        let elements = match base_node {
            Value::Array(items) => items.iter(),
            other => {
                return Err(JPathError::TypeMismatch {
                    token: ITERATOR_TOKEN.to_string(),
                    path: path.to_string(),
                    expected: NodeKind::Array,
                    found: NodeKind::of(other),
                })
            }
        };
        let trailing = if is_blank(trailing, &self.options) {
            None
        } else {
            Some(Path::parse_fragment(trailing, path, &self.options)?)
        };
        Ok(IterItems { elements, trailing })
    }
}

impl FromStr for JPath {
    type Err = JPathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_json(s)
    }
}

impl TryFrom<Value> for JPath {
    type Error = JPathError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for JPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = to_debug_string(&self.root).map_err(|_| fmt::Error)?;
        f.write_str(&rendered)
    }
}

/// Lazy iterator returned by [`JPath::iter_items`].
///
/// Yields one item per element of the base sequence. A trailing path that
/// fails to resolve against an element yields that error in its place.
#[derive(Debug, Clone)]
pub struct IterItems<'a> {
    elements: std::slice::Iter<'a, Value>,
    trailing: Option<Path>,
}

impl<'a> Iterator for IterItems<'a> {
    type Item = Result<&'a Value, JPathError>;

    fn next(&mut self) -> Option<Self::Item> {
        let element = self.elements.next()?;
        Some(match &self.trailing {
            Some(path) => resolve(element, path),
            None => Ok(element),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.elements.size_hint()
    }
}

impl ExactSizeIterator for IterItems<'_> {}

/// Resolve a parsed path against `node`, which may be any subtree.
pub fn resolve<'v>(node: &'v Value, path: &Path) -> Result<&'v Value, JPathError> {
    let mut current = node;
    for token in path.tokens() {
        trace!("step {token} into {}", NodeKind::of(current));
        current = step(current, token, path.as_str())?;
    }
    Ok(current)
}

fn step<'v>(node: &'v Value, token: &Token, path: &str) -> Result<&'v Value, JPathError> {
    match (token, node) {
        (Token::Key(key), Value::Object(map)) => {
            map.get(key).ok_or_else(|| JPathError::KeyNotFound {
                key: key.clone(),
                path: path.to_string(),
            })
        }
        (Token::Index(index), Value::Array(items)) => {
            items.get(*index).ok_or_else(|| JPathError::IndexOutOfRange {
                index: *index,
                len: items.len(),
                path: path.to_string(),
            })
        }
        (Token::Predicate { key, value }, Value::Array(items)) => items
            .iter()
            .find(|item| attribute_equals(item, key, value))
            .ok_or_else(|| JPathError::NoMatch {
                key: key.clone(),
                value: value.clone(),
                path: path.to_string(),
            }),
        (token, node) => Err(type_mismatch(token, node, path)),
    }
}

// `step_mut` and `assign` see tokens from `Path::parse_absolute`: keys and
// indices only.
fn step_mut<'v>(
    node: &'v mut Value,
    token: &Token,
    path: &str,
) -> Result<&'v mut Value, JPathError> {
    match (token, node) {
        (Token::Key(key), Value::Object(map)) => {
            map.get_mut(key).ok_or_else(|| JPathError::KeyNotFound {
                key: key.clone(),
                path: path.to_string(),
            })
        }
        (Token::Index(index), Value::Array(items)) => {
            let len = items.len();
            items
                .get_mut(*index)
                .ok_or_else(|| JPathError::IndexOutOfRange {
                    index: *index,
                    len,
                    path: path.to_string(),
                })
        }
        (token, node) => Err(type_mismatch(token, node, path)),
    }
}

fn assign(node: &mut Value, token: &Token, value: Value, path: &str) -> Result<(), JPathError> {
    match (token, node) {
        (Token::Key(key), Value::Object(map)) => {
            trace!("assign {key:?}");
            map.insert(key.clone(), value);
            Ok(())
        }
        (Token::Index(index), Value::Array(items)) => {
            let len = items.len();
            let slot = items
                .get_mut(*index)
                .ok_or_else(|| JPathError::IndexOutOfRange {
                    index: *index,
                    len,
                    path: path.to_string(),
                })?;
            trace!("assign [{index}]");
            *slot = value;
            Ok(())
        }
        (token, node) => Err(type_mismatch(token, node, path)),
    }
}

/// Predicate equality: strings compare by content, other scalars by their
/// JSON text. Containers never match.
fn attribute_equals(item: &Value, key: &str, expected: &str) -> bool {
    match item.get(key) {
        Some(Value::String(s)) => s == expected,
        Some(Value::Array(_)) | Some(Value::Object(_)) | None => false,
        Some(scalar) => scalar.to_string() == expected,
    }
}

fn is_blank(path: &str, options: &JPathOptions) -> bool {
    path.chars().all(|c| c == options.delimiter)
}

fn type_mismatch(token: &Token, node: &Value, path: &str) -> JPathError {
    JPathError::TypeMismatch {
        token: token.to_string(),
        path: path.to_string(),
        expected: token.expects(),
        found: NodeKind::of(node),
    }
}
