//! Error type for the Monkey front end and host tooling.
//!
//! Lexing and parsing failures are ordinary Rust errors carrying an optional
//! source location. Evaluation failures are *not* represented here: the
//! evaluator reports those as `Error` runtime values so a host can inspect
//! them like any other result.
//!
//! # Examples
//!
//! ```rust
//! use monkey_syntax::error::{Error, Result, error_at};
//!
//! let plain = Error::new("Something went wrong");
//! assert_eq!(plain.to_string(), "Something went wrong");
//!
//! let located = Error::with_span("Unexpected character '@'", 3, 7);
//! assert_eq!(located.to_string(), "Unexpected character '@' at 3:7");
//!
//! fn might_fail(flag: bool) -> Result<i64> {
//!     if flag { error_at(1, 1, "bad token") } else { Ok(7) }
//! }
//! assert!(might_fail(true).is_err());
//! ```

use thiserror::Error;

/// An error raised while turning source text into a syntax tree.
///
/// `line` and `col` are 1-based and are present whenever the error can be
/// pinned to a token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{msg}{}", location_suffix(.line, .col))]
pub struct Error {
    /// Human-readable error message
    pub msg: String,

    /// Optional line number in source file (1-based)
    pub line: Option<usize>,

    /// Optional column number in source file (1-based)
    pub col: Option<usize>,
}

fn location_suffix(line: &Option<usize>, col: &Option<usize>) -> String {
    match (line, col) {
        (Some(l), Some(c)) => format!(" at {}:{}", l, c),
        _ => String::new(),
    }
}

impl Error {
    /// Creates an error without source location.
    pub fn new(msg: impl Into<String>) -> Self {
        Self {
            msg: msg.into(),
            line: None,
            col: None,
        }
    }

    /// Creates an error pinned to a 1-based line and column.
    pub fn with_span(msg: impl Into<String>, line: usize, col: usize) -> Self {
        Self {
            line: Some(line),
            col: Some(col),
            ..Self::new(msg)
        }
    }
}

/// A specialized `Result` type for front-end operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Shorthand for `Err(Error::with_span(msg, line, col))`.
pub fn error_at<T>(line: usize, col: usize, msg: impl Into<String>) -> Result<T> {
    Err(Error::with_span(msg, line, col))
}
