//! Evaluator configuration.

/// Default path delimiter.
pub const DEFAULT_DELIMITER: char = '/';

/// Maximum number of tokens in one path, same cap as a JSON Pointer path.
pub const MAX_PATH_TOKENS: usize = 256;

/// Options controlling how path strings are tokenized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JPathOptions {
    /// Character separating path segments.
    pub delimiter: char,
    /// Paths with more tokens than this are rejected with `PathTooLong`.
    pub max_tokens: usize,
}

impl Default for JPathOptions {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
            max_tokens: MAX_PATH_TOKENS,
        }
    }
}
