//! Evaluation of parsed nodes.
//!
//! Only numeric literals evaluate so far; every other node is reported as
//! [`EvalError::Unsupported`] with its label.

use crate::ast::Node;
use crate::scope::Scope;
use num_bigint::BigInt;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("cannot evaluate {label} yet")]
    Unsupported { label: &'static str },
}

/// Evaluates `node` in `scope`.
///
/// ```rust
/// # use bang::{eval, BigInt, EvalError, Node, Scope};
/// let scope = Scope::new();
/// assert_eq!(eval(&Node::number(7), &scope), Ok(BigInt::from(7)));
/// assert!(matches!(
///     eval(&Node::ident("x"), &scope),
///     Err(EvalError::Unsupported { label: "Identifier" })
/// ));
/// ```
pub fn eval(node: &Node, _scope: &Scope) -> Result<BigInt, EvalError> {
    match node {
        Node::Number(n) => Ok(n.clone()),
        other => Err(EvalError::Unsupported {
            label: other.label(),
        }),
    }
}
