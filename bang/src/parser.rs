//! # Bang Parser
//!
//! Couples the [`grammar`](crate::grammar) rule table with the node-building
//! reductions and lookahead decisions of the bang language.
//!
//! - [`BangParserDriver`]: the [`ParserDriver`] implementation. Its
//!   `resolve_ambiguity` realizes maximal munch for identifiers and numbers,
//!   precedence climbing for binary operators, and the "keep going while the
//!   expression can still grow" rule for lists, blocks and declarations.
//! - [`BangParser`]: a reusable parser over single lines of text.
//!
//! ## Lookahead
//!
//! Lexical decisions use the raw lookahead character, so whitespace ends an
//! identifier or a number. Every other decision uses the *significant*
//! lookahead (the next non-whitespace character), so incidental whitespace
//! around operators and punctuation never changes the tree.

use crate::ast::{BinOp, Keyword, Node};
use crate::grammar::{self, ProdID};
use num_bigint::BigInt;
use smartstring::alias::String;
use stackparse::{
    ParseError, Parser, ParserAction, ParserDriver, ParserLimits, ParserProdID, ParserStats,
    StackMachine,
};

/// Semantic actions of the bang grammar.
///
/// Reductions pop the matched entries by value and push the node they build.
/// A popped suffix that does not have the shape its production promised is
/// an internal error and is reported with the span of the lookahead.
#[derive(Debug, Default)]
pub struct BangParserDriver;

fn mismatch(machine: &StackMachine<Node>, prod_id: ProdID) -> ParseError {
    ParseError::new(
        format!("stack does not match production {}", prod_id.label()),
        Some(machine.span()),
    )
}

fn text(c: char) -> String {
    let mut s = String::new();
    s.push(c);
    s
}

impl ParserDriver for BangParserDriver {
    type Symbol = Node;
    type ProdID = ProdID;

    fn lookup(&self, stack: &[Node]) -> Option<ParserAction<ProdID>> {
        grammar::lookup(stack)
    }

    /// Chooses between shifting and reducing `prod_id`.
    ///
    /// At the end of input every ambiguity reduces.
    fn resolve_ambiguity(
        &mut self,
        machine: &StackMachine<Node>,
        prod_id: ProdID,
    ) -> Result<ParserAction<ProdID>, ParseError> {
        let next = machine.significant_lookahead();
        let top = machine
            .tokens_peek(0)
            .ok_or_else(|| mismatch(machine, prod_id))?;

        let shift = match prod_id {
            ProdID::FinishIdentifier => machine
                .lookahead()
                .is_some_and(|c| c.is_ascii_alphabetic()),
            ProdID::FinishNumber => machine.lookahead().is_some_and(|c| c.is_ascii_digit()),
            ProdID::BinaryPow | ProdID::BinaryMul | ProdID::BinaryAdd => {
                let Some(Node::Char(c)) = machine.tokens_peek(1) else {
                    return Err(mismatch(machine, prod_id));
                };
                let op = BinOp::from_char(*c).ok_or_else(|| mismatch(machine, prod_id))?;
                let captured = next
                    .and_then(BinOp::from_char)
                    .is_some_and(|next| next.captures_operand_of(op));
                captured || (next == Some('(') && top.is_callee())
            }
            ProdID::FunParametersStart
            | ProdID::FunParametersAppend
            | ProdID::ParametersStart
            | ProdID::ParametersAppend => next == Some(':'),
            ProdID::BlockStart | ProdID::BlockAppend => {
                matches!(next, Some('(' | ')' | '+' | '-' | '*' | '/' | '^' | '='))
            }
            ProdID::ArgumentsStart
            | ProdID::ArgumentsAppend
            | ProdID::Variable
            | ProdID::Value => grammar::extends(top, next),
            _ => {
                return Err(ParseError::new(
                    format!("production {} is not ambiguous", prod_id.label()),
                    Some(machine.span()),
                ));
            }
        };

        Ok(if shift {
            ParserAction::Shift
        } else {
            ParserAction::Reduce(prod_id)
        })
    }

    fn reduce(
        &mut self,
        machine: &mut StackMachine<Node>,
        prod_id: ProdID,
    ) -> Result<(), ParseError> {
        let node = match prod_id {
            ProdID::Elide => {
                machine.elide()?;
                return Ok(());
            }
            ProdID::ClassifyLetter => {
                let Node::Char(c) = machine.tokens_pop()? else {
                    return Err(mismatch(machine, prod_id));
                };
                Node::Letter(c)
            }
            ProdID::ClassifyDigit => {
                let Node::Char(c) = machine.tokens_pop()? else {
                    return Err(mismatch(machine, prod_id));
                };
                Node::Digit(text(c))
            }
            ProdID::PrependLetter => {
                let [Node::Letter(l), Node::Identifier(rest)] = machine.tokens_pop_n::<2>()? else {
                    return Err(mismatch(machine, prod_id));
                };
                let mut name = text(l);
                name.push_str(&rest);
                Node::Identifier(name)
            }
            ProdID::FinishIdentifier => {
                let Node::Letter(l) = machine.tokens_pop()? else {
                    return Err(mismatch(machine, prod_id));
                };
                Node::Identifier(text(l))
            }
            ProdID::MergeDigits => {
                let [Node::Digit(mut digits), Node::Digit(more)] = machine.tokens_pop_n::<2>()?
                else {
                    return Err(mismatch(machine, prod_id));
                };
                digits.push_str(&more);
                Node::Digit(digits)
            }
            ProdID::FinishNumber => {
                let Node::Digit(digits) = machine.tokens_pop()? else {
                    return Err(mismatch(machine, prod_id));
                };
                let n = digits
                    .parse::<BigInt>()
                    .map_err(|e| ParseError::from_err(e, Some(machine.span())))?;
                Node::number(n)
            }
            ProdID::Keyword => {
                let Node::Identifier(ident) = machine.tokens_pop()? else {
                    return Err(mismatch(machine, prod_id));
                };
                let keyword = Keyword::from_ident(&ident)
                    .ok_or_else(|| mismatch(machine, prod_id))?;
                Node::Keyword(keyword)
            }
            ProdID::TypedIdentifier => {
                let [Node::Identifier(name), _, Node::Identifier(type_name)] =
                    machine.tokens_pop_n::<3>()?
                else {
                    return Err(mismatch(machine, prod_id));
                };
                Node::TypedIdentifier { name, type_name }
            }
            ProdID::BinaryPow | ProdID::BinaryMul | ProdID::BinaryAdd => {
                let [left, Node::Char(c), right] = machine.tokens_pop_n::<3>()? else {
                    return Err(mismatch(machine, prod_id));
                };
                let op = BinOp::from_char(c).ok_or_else(|| mismatch(machine, prod_id))?;
                Node::binary(left, op, right)
            }
            ProdID::FunParametersStart | ProdID::ParametersStart => {
                let [first, _, second] = machine.tokens_pop_n::<3>()?;
                Node::Parameters(vec![first, second])
            }
            ProdID::FunParametersAppend | ProdID::ParametersAppend => {
                let [Node::Parameters(mut params), _, param] = machine.tokens_pop_n::<3>()? else {
                    return Err(mismatch(machine, prod_id));
                };
                params.push(param);
                Node::Parameters(params)
            }
            ProdID::BlockStart => {
                let [first, second] = machine.tokens_pop_n::<2>()?;
                Node::Block(vec![first, second])
            }
            ProdID::BlockAppend => {
                let [Node::Block(mut stmts), stmt] = machine.tokens_pop_n::<2>()? else {
                    return Err(mismatch(machine, prod_id));
                };
                stmts.push(stmt);
                Node::Block(stmts)
            }
            ProdID::ArgumentsStart => {
                let [first, _, second] = machine.tokens_pop_n::<3>()?;
                Node::Arguments(vec![first, second])
            }
            ProdID::ArgumentsAppend => {
                let [Node::Arguments(mut args), _, arg] = machine.tokens_pop_n::<3>()? else {
                    return Err(mismatch(machine, prod_id));
                };
                args.push(arg);
                Node::Arguments(args)
            }
            ProdID::Variable => {
                let [_, Node::Identifier(name), _, value] = machine.tokens_pop_n::<4>()? else {
                    return Err(mismatch(machine, prod_id));
                };
                Node::Variable {
                    name,
                    initial_value: Box::new(value),
                }
            }
            ProdID::Value => {
                let [_, Node::Identifier(name), _, value] = machine.tokens_pop_n::<4>()? else {
                    return Err(mismatch(machine, prod_id));
                };
                Node::Value {
                    name,
                    value: Box::new(value),
                }
            }
            ProdID::FunParamsBlock => {
                let [_, _, Node::Parameters(params), _, _, Node::Block(body), _] =
                    machine.tokens_pop_n::<7>()?
                else {
                    return Err(mismatch(machine, prod_id));
                };
                Node::AnonymousFunction { params, body }
            }
            ProdID::FunParamBlock => {
                let [_, _, param, _, _, Node::Block(body), _] = machine.tokens_pop_n::<7>()? else {
                    return Err(mismatch(machine, prod_id));
                };
                Node::AnonymousFunction {
                    params: vec![param],
                    body,
                }
            }
            ProdID::FunBlock => {
                let [_, _, _, _, Node::Block(body), _] = machine.tokens_pop_n::<6>()? else {
                    return Err(mismatch(machine, prod_id));
                };
                Node::AnonymousFunction {
                    params: Vec::new(),
                    body,
                }
            }
            ProdID::FunParamsStmt => {
                let [_, _, Node::Parameters(params), _, _, stmt, _] = machine.tokens_pop_n::<7>()?
                else {
                    return Err(mismatch(machine, prod_id));
                };
                Node::AnonymousFunction {
                    params,
                    body: vec![stmt],
                }
            }
            ProdID::FunParamStmt => {
                let [_, _, param, _, _, stmt, _] = machine.tokens_pop_n::<7>()?;
                Node::AnonymousFunction {
                    params: vec![param],
                    body: vec![stmt],
                }
            }
            ProdID::FunStmt => {
                let [_, _, _, _, stmt, _] = machine.tokens_pop_n::<6>()?;
                Node::AnonymousFunction {
                    params: Vec::new(),
                    body: vec![stmt],
                }
            }
            ProdID::FunParamsEmpty => {
                let [_, _, Node::Parameters(params), _, _, _] = machine.tokens_pop_n::<6>()? else {
                    return Err(mismatch(machine, prod_id));
                };
                Node::AnonymousFunction {
                    params,
                    body: Vec::new(),
                }
            }
            ProdID::FunParamEmpty => {
                let [_, _, param, _, _, _] = machine.tokens_pop_n::<6>()?;
                Node::AnonymousFunction {
                    params: vec![param],
                    body: Vec::new(),
                }
            }
            ProdID::FunEmpty => {
                machine.tokens_pop_n::<5>()?;
                Node::AnonymousFunction {
                    params: Vec::new(),
                    body: Vec::new(),
                }
            }
            ProdID::ApplyArguments => {
                let [callee, _, Node::Arguments(args), _] = machine.tokens_pop_n::<4>()? else {
                    return Err(mismatch(machine, prod_id));
                };
                Node::application(callee, args)
            }
            ProdID::ApplyOne => {
                let [callee, _, arg, _] = machine.tokens_pop_n::<4>()?;
                Node::application(callee, vec![arg])
            }
            ProdID::ApplyEmpty => {
                let [callee, _, _] = machine.tokens_pop_n::<3>()?;
                Node::application(callee, Vec::new())
            }
            ProdID::Group => {
                let [_, expr, _] = machine.tokens_pop_n::<3>()?;
                expr
            }
        };
        let depth = nesting(prod_id, machine.popped_depths());
        machine.tokens_push_at(node, depth)
    }
}

/// Nesting depth of the node `prod_id` builds from entries of the given
/// depths. Lexical nodes are leaves and lists grow sideways.
fn nesting(prod_id: ProdID, popped: &[usize]) -> usize {
    let below = |depths: &[usize]| depths.iter().max().map_or(0, |d| d + 1);
    match prod_id {
        ProdID::ClassifyLetter
        | ProdID::ClassifyDigit
        | ProdID::PrependLetter
        | ProdID::FinishIdentifier
        | ProdID::MergeDigits
        | ProdID::FinishNumber
        | ProdID::Keyword
        | ProdID::TypedIdentifier => 0,
        ProdID::BlockAppend
        | ProdID::ArgumentsAppend
        | ProdID::ParametersAppend
        | ProdID::FunParametersAppend => match popped {
            [list, items @ ..] => (*list).max(below(items)),
            [] => 0,
        },
        ProdID::Group => popped.get(1).copied().unwrap_or(0),
        _ => below(popped),
    }
}

/// A reusable parser for single lines of bang source.
///
/// # Example
///
/// ```rust
/// # use bang::{BangParser, BinOp, Node};
/// let mut parser = BangParser::new();
/// let root = parser.parse_root("2 + 3 * 4").unwrap();
/// assert_eq!(
///     root,
///     Some(Node::binary(
///         Node::number(2),
///         BinOp::Add,
///         Node::binary(Node::number(3), BinOp::Mul, Node::number(4)),
///     ))
/// );
///
/// // malformed input is returned as the stack it left behind
/// let stack = parser.parse("1 +").unwrap();
/// assert_eq!(stack, vec![Node::number(1), Node::Char('+')]);
/// ```
pub struct BangParser {
    parser: Parser<BangParserDriver>,
}

impl BangParser {
    pub fn new() -> Self {
        Self::with_limits(ParserLimits::default())
    }

    pub fn with_limits(limits: ParserLimits) -> Self {
        Self {
            parser: Parser::new(BangParserDriver, limits),
        }
    }

    /// Parses `line` and returns the final stack, bottom first.
    ///
    /// Well-formed input leaves exactly one node. Malformed input is not an
    /// error; only internal failures such as an exceeded limit are.
    pub fn parse(&mut self, line: &str) -> Result<Vec<Node>, ParseError> {
        self.parser.parse(line)
    }

    /// Parses `line` and returns its root node, or `None` when the stack did
    /// not reduce to a single block, declaration or expression.
    pub fn parse_root(&mut self, line: &str) -> Result<Option<Node>, ParseError> {
        let mut stack = self.parse(line)?;
        if stack.len() == 1 && stack[0].is_root() {
            Ok(stack.pop())
        } else {
            log::debug!("no single root: {} entries left on the stack", stack.len());
            Ok(None)
        }
    }

    pub fn limits(&self) -> ParserLimits {
        self.parser.machine().limits()
    }

    pub fn stats(&self) -> ParserStats {
        self.parser.stats()
    }
}

impl Default for BangParser {
    fn default() -> Self {
        Self::new()
    }
}
