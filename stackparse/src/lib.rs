//! Copyright (c) 2005–2025 IKH Software, Inc.
//!
//! Released under the terms of the GNU Lesser General Public License, version 3.0
//! or (at your option) any later version (LGPL-3.0-or-later).
//!
//! # stackparse
//!
//! A character-level shift-reduce runtime for hand-written grammars.
//!
//! There is no separate lexer: raw input characters are shifted onto the same
//! stack the grammar reduces, so letters and digits are assembled into
//! identifiers and numbers by ordinary productions. A grammar plugs in through
//! [`ParserDriver`], which owns a priority-ordered rule table matched against
//! the top of the stack and settles lookahead-dependent choices in
//! [`ParserDriver::resolve_ambiguity`].
//!
//! ## Components
//!
//! - [`StackMachine`]: output stack, remaining input and a single lookahead
//!   character, with the `shift`/`reduce`/`elide` primitives.
//! - [`Parser`]: the driver loop: look up, resolve, shift or reduce, accept.
//! - [`Cursor`], [`Span`], [`Position`]: source positions of the lookahead.
//! - [`ParseError`]: internal failures and exceeded [`ParserLimits`].
//! - [`pattern`]: a small structural pattern matcher with named captures.
//!
//! ## Example
//!
//! ```rust
//! use stackparse::{
//!     ParseError, Parser, ParserAction, ParserDriver, ParserLimits, ParserProdID,
//!     StackMachine,
//! };
//!
//! // Collapses runs of `1` into their count.
//! #[derive(Debug, PartialEq)]
//! enum Sym {
//!     Char(char),
//!     Count(u32),
//! }
//!
//! impl From<char> for Sym {
//!     fn from(c: char) -> Self {
//!         Sym::Char(c)
//!     }
//! }
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! enum Prod {
//!     One,
//!     More,
//! }
//!
//! impl ParserProdID for Prod {
//!     fn label(&self) -> &'static str {
//!         match self {
//!             Prod::One => "one",
//!             Prod::More => "more",
//!         }
//!     }
//!     fn size(&self) -> usize {
//!         match self {
//!             Prod::One => 1,
//!             Prod::More => 2,
//!         }
//!     }
//! }
//!
//! struct Counter;
//!
//! impl ParserDriver for Counter {
//!     type Symbol = Sym;
//!     type ProdID = Prod;
//!
//!     fn lookup(&self, stack: &[Sym]) -> Option<ParserAction<Prod>> {
//!         match stack {
//!             [.., Sym::Count(_), Sym::Count(_)] => Some(ParserAction::Reduce(Prod::More)),
//!             [.., Sym::Char('1')] => Some(ParserAction::Reduce(Prod::One)),
//!             _ => None,
//!         }
//!     }
//!
//!     fn resolve_ambiguity(
//!         &mut self,
//!         _machine: &StackMachine<Sym>,
//!         prod_id: Prod,
//!     ) -> Result<ParserAction<Prod>, ParseError> {
//!         Ok(ParserAction::Reduce(prod_id))
//!     }
//!
//!     fn reduce(&mut self, machine: &mut StackMachine<Sym>, prod_id: Prod) -> Result<(), ParseError> {
//!         match prod_id {
//!             Prod::One => machine.reduce(1, Sym::Count(1)),
//!             Prod::More => match machine.tokens_pop_n::<2>()? {
//!                 [Sym::Count(a), Sym::Count(b)] => machine.tokens_push(Sym::Count(a + b)),
//!                 _ => Err(ParseError::new("expected two counts", Some(machine.span()))),
//!             },
//!         }
//!     }
//! }
//!
//! let mut parser = Parser::new(Counter, ParserLimits::default());
//! assert_eq!(parser.parse("111x1").unwrap(), vec![Sym::Count(3), Sym::Char('x'), Sym::Count(1)]);
//! ```
mod cursor;
mod error;
mod machine;
mod parser;
pub mod pattern;

pub use cursor::Cursor;
pub use error::{ParseError, Position, Span};
pub use machine::{
    DEFAULT_MAX_DEPTH, DEFAULT_MAX_INPUT, DEFAULT_MAX_STACK, ParserLimits, ParserStats,
    StackMachine, is_blank,
};
pub use parser::{Parser, ParserAction, ParserDriver, ParserProdID};
