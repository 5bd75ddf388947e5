//! Copyright (c) 2005–2025 IKH Software, Inc.
//!
//! Released under the terms of the GNU Lesser General Public License, version 3.0
//! or (at your option) any later version (LGPL-3.0-or-later).
//!
//! # bang
//!
//! Parser and interactive front end for bang, a small expression and
//! declaration language, built on the **stackparse** shift-reduce runtime.
//!
//! Source text goes straight onto the parser stack one character at a time;
//! the same ordered rule table builds identifiers and numbers and then
//! expressions, declarations, function literals and applications from them.
//! One line of input is one parse unit.
//!
//! ## Overview
//!
//! - [`ast`]: the [`Node`] tree, plus [`BinOp`] and [`Keyword`].
//! - [`grammar`]: the prioritized productions ([`ProdID`], [`RULES`]).
//! - [`parser`]: [`BangParserDriver`] (reductions and lookahead decisions)
//!   and the [`BangParser`] facade.
//! - [`display`]: indented tree rendering, see [`StackDisplay`].
//! - [`scope`], [`eval`](mod@eval): the evaluation contract ([`Scope`],
//!   [`eval()`]), which so far handles numeric literals only.
//! - [`terminal`], [`repl`]: colored output and the interactive loop.
//!
//! ## Example
//!
//! ```rust
//! use bang::{BangParser, BigInt, Node};
//!
//! let mut parser = BangParser::new();
//! let root = parser.parse_root("f(1)(2)").unwrap().unwrap();
//! let Node::Application { callee, args } = root else {
//!     panic!("expected an application");
//! };
//! assert_eq!(args, vec![Node::Number(BigInt::from(2))]);
//! assert!(matches!(*callee, Node::Application { .. }));
//! ```
pub mod ast;
pub mod display;
pub mod error;
pub mod eval;
pub mod grammar;
pub mod parser;
pub mod repl;
pub mod scope;
pub mod terminal;

pub use ast::{BinOp, Keyword, Node};
pub use num_bigint::BigInt;
pub use display::StackDisplay;
pub use error::BangError;
pub use eval::{EvalError, eval};
pub use grammar::{ProdID, RULES};
pub use parser::{BangParser, BangParserDriver};
pub use scope::{Scope, ScopeError};
