//! Source-location and error types shared by the stack machine and the
//! grammars built on top of it.
//!
//! Positions are 0-based `(line, column)` pairs counted in characters. A
//! [`Span`] covers the half-open range `[start, end)`; the machine reports
//! the span of its current lookahead whenever a reduction fails.
//!
//! # Examples
//!
//! ```rust
//! # use stackparse::{ParseError, Position, Span, span};
//! let sp = Span::new(Position::new(0, 3), Position::new(0, 4));
//! assert!(!sp.is_empty());
//!
//! let err = ParseError::new("stack underflow", Some(sp));
//! assert!(err.to_string().contains("stack underflow"));
//!
//! assert_eq!(span!(0, 3, 0, 4), Some(sp));
//! ```

use smartstring::alias::String;
use std::fmt;
use thiserror::Error;

/// A 0-based line/column position in source text.
#[derive(Debug, Clone, Default, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Position {
    /// 0-based line number.
    pub line: usize,
    /// 0-based column number (character position in the line).
    pub column: usize,
}

impl Position {
    /// Creates a new `Position`.
    #[inline]
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// A half-open source range: `[start, end)`.
///
/// Invariants are not enforced here, but it is conventional for `start <= end`
/// in lexicographic `(line, column)` ordering.
#[derive(Debug, Clone, Default, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    /// Creates a new `Span`.
    #[inline]
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Is this span empty (start == end)?
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{} to {}:{}",
            self.start.line, self.start.column, self.end.line, self.end.column
        )
    }
}

/// An internal failure of the stack machine or of a grammar's reduction.
///
/// Malformed input is *not* reported through this type: a parse that cannot
/// be reduced further simply returns the stack it ended with. `ParseError`
/// is reserved for broken invariants, such as a reduction that finds
/// fewer entries than its production needs, and for exceeded limits.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}{}", at_span(.span))]
pub struct ParseError {
    /// Human-readable message.
    pub message: String,
    /// Source span of the lookahead when the failure happened, if known.
    pub span: Option<Span>,
}

impl ParseError {
    pub fn new(message: impl AsRef<str>, span: Option<Span>) -> Self {
        Self {
            message: String::from(message.as_ref()),
            span,
        }
    }

    /// Convert any displayable error into a `ParseError`, preserving an
    /// existing `ParseError` and overriding its span when one is given.
    pub fn from_err<E>(err: E, span: Option<Span>) -> Self
    where
        E: fmt::Display + 'static,
    {
        if let Some(pe) = (&err as &dyn std::any::Any).downcast_ref::<ParseError>() {
            let mut out = pe.clone();
            if span.is_some() {
                out.span = span;
            }
            out
        } else {
            ParseError::new(err.to_string(), span)
        }
    }
}

fn at_span(span: &Option<Span>) -> std::string::String {
    match span {
        Some(span) => format!(" at {span}"),
        None => std::string::String::new(),
    }
}

/// Build an `Option<Span>` inline from 0-based line/column coordinates.
///
/// ```rust
/// # use stackparse::span;
/// let s = span!(0, 0, 1, 4);
/// assert_eq!(s.unwrap().end.column, 4);
/// ```
#[macro_export]
macro_rules! span {
    ($line_start:expr, $col_start:expr, $line_end:expr, $col_end:expr) => {
        Some($crate::Span {
            start: $crate::Position {
                line: $line_start,
                column: $col_start,
            },
            end: $crate::Position {
                line: $line_end,
                column: $col_end,
            },
        })
    };
}
