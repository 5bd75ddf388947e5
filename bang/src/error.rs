//! # Bang Error Type
//!
//! [`BangError`] is the single error surface of the bang front end. It wraps
//! failures from:
//!
//! - **Parsing** ([`ParseError`]): internal stack-machine failures and
//!   exceeded limits,
//! - **Scopes** ([`ScopeError`]): lookups of unbound names,
//! - **Evaluation** ([`EvalError`]): nodes the evaluator cannot handle,
//! - **I/O**: reading input or writing to the terminal.
//!
//! Each variant converts with `#[from]`, so `?` works in any function that
//! returns `Result<T, BangError>`.
use crate::{EvalError, ScopeError};
use stackparse::ParseError;
use thiserror::Error;

/// All errors the bang front end can report.
///
/// # Examples
/// ```rust
/// # use bang::{BangError, ScopeError};
/// let err: BangError = ScopeError::Undefined { name: "x".into() }.into();
/// assert!(matches!(err, BangError::Scope(_)));
/// assert_eq!(err.to_string(), "scope error: x does not exist in this scope");
/// ```
#[derive(Debug, Error)]
pub enum BangError {
    /// The parser hit an internal failure or a limit.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("scope error: {0}")]
    Scope(#[from] ScopeError),

    #[error("eval error: {0}")]
    Eval(#[from] EvalError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use stackparse::span;

    fn _assert_error_trait_obj(e: &dyn std::error::Error) -> &dyn std::error::Error {
        e
    }

    #[test]
    fn parse_error_maps_to_bang_error() {
        let err: BangError = ParseError::new("stack underflow", span!(0, 1, 0, 2)).into();
        assert!(matches!(err, BangError::Parse(_)));
        assert_eq!(err.to_string(), "parse error: stack underflow at 0:1 to 0:2");
        let _ = _assert_error_trait_obj(&err);
    }

    #[test]
    fn eval_error_maps_to_bang_error() {
        let err: BangError = EvalError::Unsupported { label: "Block" }.into();
        assert!(matches!(err, BangError::Eval(_)));
    }

    #[test]
    fn io_error_maps_to_bang_error() {
        let io = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "eof");
        let err: BangError = io.into();
        assert!(matches!(err, BangError::Io(_)));
        assert_eq!(err.to_string(), "io error: eof");
    }
}
