//! # Syntax Tree
//!
//! [`Node`] is both the parser's stack entry and the tree it builds. Raw
//! characters enter the stack as [`Node::Char`], are classified into
//! [`Node::Letter`] and [`Node::Digit`], accumulated into identifiers and
//! numbers, and finally absorbed into syntactic nodes such as
//! [`Node::Binary`] or [`Node::Application`].
//!
//! Token-level variants (`Char`, `Letter`, `Digit`, `Keyword`) are transient:
//! a well-formed parse never leaves one inside a syntactic node. Every node
//! owns its children; nodes are never mutated after construction.
//!
//! ## Example
//! ```rust
//! # use bang::{BinOp, Node};
//! let sum = Node::binary(Node::number(2), BinOp::Add, Node::ident("x"));
//! assert!(sum.is_expression());
//! assert!(!Node::Char('+').is_expression());
//! ```

use num_bigint::BigInt;
use smartstring::alias::String;

/// Reserved words, recognized only on a finished identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    Var,
    Val,
    Fun,
}

impl Keyword {
    pub fn from_ident(ident: &str) -> Option<Self> {
        match ident {
            "var" => Some(Keyword::Var),
            "val" => Some(Keyword::Val),
            "fun" => Some(Keyword::Fun),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Keyword::Var => "var",
            Keyword::Val => "val",
            Keyword::Fun => "fun",
        }
    }
}

/// Binary arithmetic operators.
///
/// Binding strength, tightest first: `^`, then `*` and `/`, then `+` and `-`.
/// Operators of equal strength associate to the left, except `^`, which
/// associates to the right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl BinOp {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(BinOp::Add),
            '-' => Some(BinOp::Sub),
            '*' => Some(BinOp::Mul),
            '/' => Some(BinOp::Div),
            '^' => Some(BinOp::Pow),
            _ => None,
        }
    }

    pub fn as_char(&self) -> char {
        match self {
            BinOp::Add => '+',
            BinOp::Sub => '-',
            BinOp::Mul => '*',
            BinOp::Div => '/',
            BinOp::Pow => '^',
        }
    }

    pub fn precedence(&self) -> u8 {
        match self {
            BinOp::Add | BinOp::Sub => 1,
            BinOp::Mul | BinOp::Div => 2,
            BinOp::Pow => 3,
        }
    }

    /// Returns `true` if `self` must capture an operand before `other` does.
    pub fn binds_tighter(&self, other: BinOp) -> bool {
        self.precedence() > other.precedence()
    }

    pub fn is_right_associative(&self) -> bool {
        matches!(self, BinOp::Pow)
    }

    /// Whether `self`, following a complete `left op right`, takes `right`
    /// as its own left operand.
    pub fn captures_operand_of(&self, op: BinOp) -> bool {
        self.binds_tighter(op) || (*self == op && op.is_right_associative())
    }
}

/// A parser stack entry and syntax-tree node.
///
/// # Classification
///
/// - *Expression*: [`Number`](Node::Number), [`Identifier`](Node::Identifier),
///   [`Binary`](Node::Binary), [`AnonymousFunction`](Node::AnonymousFunction),
///   [`Application`](Node::Application).
/// - *Declaration*: [`Variable`](Node::Variable), [`Value`](Node::Value).
/// - *Parameter*: [`Identifier`](Node::Identifier),
///   [`TypedIdentifier`](Node::TypedIdentifier).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A shifted input character no rule has classified yet.
    Char(char),
    Letter(char),
    /// A run of digits, kept as text until the run ends.
    Digit(String),
    Identifier(String),
    Keyword(Keyword),
    /// A finished digit run. Any length is accepted.
    Number(BigInt),

    /// `name : type_name`
    TypedIdentifier { name: String, type_name: String },
    /// Identifiers and typed identifiers, in source order.
    Parameters(Vec<Node>),
    /// Expressions, in source order.
    Arguments(Vec<Node>),
    Binary {
        left: Box<Node>,
        op: BinOp,
        right: Box<Node>,
    },
    /// Expressions and declarations, in source order.
    Block(Vec<Node>),
    AnonymousFunction { params: Vec<Node>, body: Vec<Node> },
    /// `callee` is an identifier or another application.
    Application { callee: Box<Node>, args: Vec<Node> },
    /// `var name = initial_value`
    Variable {
        name: String,
        initial_value: Box<Node>,
    },
    /// `val name = value`
    Value { name: String, value: Box<Node> },
}

impl From<char> for Node {
    fn from(c: char) -> Self {
        Node::Char(c)
    }
}

impl Node {
    pub fn number(n: impl Into<BigInt>) -> Self {
        Node::Number(n.into())
    }

    pub fn ident(name: &str) -> Self {
        Node::Identifier(String::from(name))
    }

    pub fn typed(name: &str, type_name: &str) -> Self {
        Node::TypedIdentifier {
            name: String::from(name),
            type_name: String::from(type_name),
        }
    }

    pub fn binary(left: Node, op: BinOp, right: Node) -> Self {
        Node::Binary {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    pub fn application(callee: Node, args: Vec<Node>) -> Self {
        Node::Application {
            callee: Box::new(callee),
            args,
        }
    }

    pub fn is_expression(&self) -> bool {
        matches!(
            self,
            Node::Number(_)
                | Node::Identifier(_)
                | Node::Binary { .. }
                | Node::AnonymousFunction { .. }
                | Node::Application { .. }
        )
    }

    pub fn is_declaration(&self) -> bool {
        matches!(self, Node::Variable { .. } | Node::Value { .. })
    }

    /// An expression or a declaration: anything a block may hold.
    pub fn is_statement(&self) -> bool {
        self.is_expression() || self.is_declaration()
    }

    pub fn is_parameter(&self) -> bool {
        matches!(self, Node::Identifier(_) | Node::TypedIdentifier { .. })
    }

    /// Nodes that can be applied to an argument list.
    pub fn is_callee(&self) -> bool {
        matches!(self, Node::Identifier(_) | Node::Application { .. })
    }

    /// Nodes a complete line may reduce to.
    pub fn is_root(&self) -> bool {
        self.is_statement() || matches!(self, Node::Block(_))
    }

    pub fn is_char(&self, c: char) -> bool {
        matches!(self, Node::Char(x) if *x == c)
    }

    pub fn is_keyword(&self, keyword: Keyword) -> bool {
        matches!(self, Node::Keyword(k) if *k == keyword)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Node::Char(_) => "Char",
            Node::Letter(_) => "Letter",
            Node::Digit(_) => "Digit",
            Node::Identifier(_) => "Identifier",
            Node::Keyword(_) => "Keyword",
            Node::Number(_) => "Number",
            Node::TypedIdentifier { .. } => "TypedIdentifier",
            Node::Parameters(_) => "Parameters",
            Node::Arguments(_) => "Arguments",
            Node::Binary { .. } => "Binary",
            Node::Block(_) => "Block",
            Node::AnonymousFunction { .. } => "AnonymousFunction",
            Node::Application { .. } => "Application",
            Node::Variable { .. } => "Variable",
            Node::Value { .. } => "Value",
        }
    }
}
