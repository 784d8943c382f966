//! Path tokenizing and token classification.
//!
//! A path is split once into segments; each segment is classified as a
//! [`Token`]. Reads accept the full grammar, writes accept only tokens that
//! address a single absolute location.

use regex::Regex;
use std::sync::OnceLock;

use crate::options::JPathOptions;
use crate::types::Token;
use crate::JPathError;

/// Segment marking the iteration boundary.
pub const ITERATOR_TOKEN: &str = "[*]";

fn index_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\[([0-9]+)\]$").expect("index pattern compiles"))
}

fn predicate_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\[@([A-Za-z0-9_]+)=(.+)\]$").expect("predicate pattern compiles")
    })
}

fn absolute_key_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z0-9]+$").expect("key pattern compiles"))
}

/// A tokenized path expression.
///
/// Holds the original text for diagnostics alongside the classified tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    raw: String,
    tokens: Vec<Token>,
}

impl Path {
    /// Parse a read path with default options.
    ///
    /// # Example
    ///
    /// ```
    /// use jpath::{Path, Token};
    ///
    /// let path = Path::parse("/a/[1]/b/").unwrap();
    /// assert_eq!(
    ///     path.tokens(),
    ///     &[Token::Key("a".into()), Token::Index(1), Token::Key("b".into())]
    /// );
    /// ```
    pub fn parse(path: &str) -> Result<Self, JPathError> {
        Self::parse_with(path, &JPathOptions::default())
    }

    /// Parse a read path. Keys, indices and predicates are accepted.
    pub fn parse_with(path: &str, options: &JPathOptions) -> Result<Self, JPathError> {
        Self::parse_fragment(path, path, options)
    }

    /// Parse `fragment`, a piece of the larger expression `full`.
    ///
    /// Errors and [`Path::as_str`] report `full`, so a failure inside one
    /// side of an iteration path still names the whole query.
    pub fn parse_fragment(
        fragment: &str,
        full: &str,
        options: &JPathOptions,
    ) -> Result<Self, JPathError> {
        let tokens = split(fragment, options)?
            .into_iter()
            .map(|segment| classify(segment, full))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            raw: full.to_string(),
            tokens,
        })
    }

    /// Parse a write path. Only alphanumeric keys and indices are accepted;
    /// a predicate anywhere fails with `SpeculativeQuery`, even when an
    /// earlier segment is malformed.
    pub fn parse_absolute(path: &str, options: &JPathOptions) -> Result<Self, JPathError> {
        let segments = split(path, options)?;
        if let Some(segment) = segments.iter().find(|s| s.starts_with("[@")) {
            return Err(JPathError::SpeculativeQuery {
                token: segment.to_string(),
                path: path.to_string(),
            });
        }
        let tokens = segments
            .into_iter()
            .map(|segment| classify_absolute(segment, path))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            raw: path.to_string(),
            tokens,
        })
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// The path text as given by the caller.
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

/// Strip surrounding delimiters and split into non-empty segments.
fn split<'a>(path: &'a str, options: &JPathOptions) -> Result<Vec<&'a str>, JPathError> {
    let trimmed = path.trim_matches(options.delimiter);
    if trimmed.is_empty() {
        return Err(JPathError::EmptyPath);
    }
    let segments: Vec<&str> = trimmed
        .split(options.delimiter)
        .filter(|segment| !segment.is_empty())
        .collect();
    if segments.len() > options.max_tokens {
        return Err(JPathError::PathTooLong {
            len: segments.len(),
            max: options.max_tokens,
        });
    }
    Ok(segments)
}

fn parse_index(digits: &str, segment: &str, path: &str) -> Result<usize, JPathError> {
    digits.parse().map_err(|_| malformed(segment, path))
}

fn malformed(segment: &str, path: &str) -> JPathError {
    JPathError::MalformedToken {
        token: segment.to_string(),
        path: path.to_string(),
    }
}

/// Classify a segment using the read grammar.
///
/// # Example
///
/// ```
/// use jpath::{classify, Token};
///
/// assert_eq!(classify("[3]", "a/[3]").unwrap(), Token::Index(3));
/// assert!(classify("[@bad", "a/[@bad/c").is_err());
/// ```
pub fn classify(segment: &str, path: &str) -> Result<Token, JPathError> {
    if let Some(caps) = index_regex().captures(segment) {
        return Ok(Token::Index(parse_index(&caps[1], segment, path)?));
    }
    if let Some(caps) = predicate_regex().captures(segment) {
        return Ok(Token::Predicate {
            key: caps[1].to_string(),
            value: caps[2].to_string(),
        });
    }
    if segment.contains(['[', ']']) {
        return Err(malformed(segment, path));
    }
    Ok(Token::Key(segment.to_string()))
}

/// Classify a segment using the write grammar.
pub fn classify_absolute(segment: &str, path: &str) -> Result<Token, JPathError> {
    if segment.starts_with("[@") {
        return Err(JPathError::SpeculativeQuery {
            token: segment.to_string(),
            path: path.to_string(),
        });
    }
    if let Some(caps) = index_regex().captures(segment) {
        return Ok(Token::Index(parse_index(&caps[1], segment, path)?));
    }
    if absolute_key_regex().is_match(segment) {
        return Ok(Token::Key(segment.to_string()));
    }
    Err(malformed(segment, path))
}
