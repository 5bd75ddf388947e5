//! # Grammar Rules
//!
//! The bang grammar as an ordered table of productions. Each [`ProdID`] knows
//! the stack shape it recognizes; [`lookup`] walks [`RULES`] from the top and
//! reports the first production whose shape matches the end of the stack.
//!
//! Character-level productions (classifying letters and digits, accumulating
//! identifiers and numbers) and syntactic productions share one table, so the
//! lexical rules must come first: a keyword or operand is only recognized once
//! its run of characters has been finished.
//!
//! Productions whose outcome depends on what follows are *ambiguous*; for those
//! [`lookup`] returns [`ParserAction::Ambig`] and the driver decides between
//! shifting and reducing from the lookahead.

use crate::ast::{BinOp, Keyword, Node};
use stackparse::{ParserAction, ParserProdID, is_blank};

/// Grammar productions, named after the node they build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProdID {
    /// `ws` → (nothing)
    Elide,
    /// `a-z A-Z` → `Letter`
    ClassifyLetter,
    /// `0-9` → `Digit`
    ClassifyDigit,
    /// `Letter Identifier` → `Identifier`
    PrependLetter,
    /// `Letter` → `Identifier`, unless another letter follows
    FinishIdentifier,
    /// `Digit Digit` → `Digit`
    MergeDigits,
    /// `Digit` → `Number`, unless another digit follows
    FinishNumber,
    /// `Identifier(var|val|fun)` → `Keyword`
    Keyword,
    /// `Identifier : Identifier` → `TypedIdentifier`
    TypedIdentifier,
    /// `Expr ^ Expr` → `Binary`
    BinaryPow,
    /// `Expr (*|/) Expr` → `Binary`
    BinaryMul,
    /// `Expr (+|-) Expr` → `Binary`
    BinaryAdd,
    /// `fun ( Param , Param` → `fun ( Parameters`
    FunParametersStart,
    /// `fun ( Parameters , Param` → `fun ( Parameters`
    FunParametersAppend,
    /// `Stmt Stmt` → `Block`
    BlockStart,
    /// `Block Stmt` → `Block`
    BlockAppend,
    /// `Expr , Expr` → `Arguments`
    ArgumentsStart,
    /// `Arguments , Expr` → `Arguments`
    ArgumentsAppend,
    /// `Param , Param` → `Parameters`
    ParametersStart,
    /// `Parameters , Param` → `Parameters`
    ParametersAppend,
    /// `var Identifier = Expr` → `Variable`
    Variable,
    /// `val Identifier = Expr` → `Value`
    Value,
    /// `fun ( Parameters ) { Block }`
    FunParamsBlock,
    /// `fun ( Param ) { Block }`
    FunParamBlock,
    /// `fun ( ) { Block }`
    FunBlock,
    /// `fun ( Parameters ) { Stmt }`
    FunParamsStmt,
    /// `fun ( Param ) { Stmt }`
    FunParamStmt,
    /// `fun ( ) { Stmt }`
    FunStmt,
    /// `fun ( Parameters ) { }`
    FunParamsEmpty,
    /// `fun ( Param ) { }`
    FunParamEmpty,
    /// `fun ( ) { }`
    FunEmpty,
    /// `Callee ( Arguments )` → `Application`
    ApplyArguments,
    /// `Callee ( Expr )` → `Application`
    ApplyOne,
    /// `Callee ( )` → `Application`
    ApplyEmpty,
    /// `( Expr )` → `Expr`
    Group,
}

/// Productions in priority order. The first one that matches fires.
pub const RULES: [ProdID; 35] = [
    ProdID::Elide,
    ProdID::ClassifyLetter,
    ProdID::ClassifyDigit,
    ProdID::PrependLetter,
    ProdID::FinishIdentifier,
    ProdID::MergeDigits,
    ProdID::FinishNumber,
    ProdID::Keyword,
    ProdID::TypedIdentifier,
    ProdID::BinaryPow,
    ProdID::BinaryMul,
    ProdID::BinaryAdd,
    ProdID::FunParametersStart,
    ProdID::FunParametersAppend,
    ProdID::BlockStart,
    ProdID::BlockAppend,
    ProdID::ArgumentsStart,
    ProdID::ArgumentsAppend,
    ProdID::ParametersStart,
    ProdID::ParametersAppend,
    ProdID::Variable,
    ProdID::Value,
    ProdID::FunParamsBlock,
    ProdID::FunParamBlock,
    ProdID::FunBlock,
    ProdID::FunParamsStmt,
    ProdID::FunParamStmt,
    ProdID::FunStmt,
    ProdID::FunParamsEmpty,
    ProdID::FunParamEmpty,
    ProdID::FunEmpty,
    ProdID::ApplyArguments,
    ProdID::ApplyOne,
    ProdID::ApplyEmpty,
    ProdID::Group,
];

impl ParserProdID for ProdID {
    fn label(&self) -> &'static str {
        match self {
            ProdID::Elide => "Elide",
            ProdID::ClassifyLetter => "ClassifyLetter",
            ProdID::ClassifyDigit => "ClassifyDigit",
            ProdID::PrependLetter => "PrependLetter",
            ProdID::FinishIdentifier => "FinishIdentifier",
            ProdID::MergeDigits => "MergeDigits",
            ProdID::FinishNumber => "FinishNumber",
            ProdID::Keyword => "Keyword",
            ProdID::TypedIdentifier => "TypedIdentifier",
            ProdID::BinaryPow => "BinaryPow",
            ProdID::BinaryMul => "BinaryMul",
            ProdID::BinaryAdd => "BinaryAdd",
            ProdID::FunParametersStart => "FunParametersStart",
            ProdID::FunParametersAppend => "FunParametersAppend",
            ProdID::BlockStart => "BlockStart",
            ProdID::BlockAppend => "BlockAppend",
            ProdID::ArgumentsStart => "ArgumentsStart",
            ProdID::ArgumentsAppend => "ArgumentsAppend",
            ProdID::ParametersStart => "ParametersStart",
            ProdID::ParametersAppend => "ParametersAppend",
            ProdID::Variable => "Variable",
            ProdID::Value => "Value",
            ProdID::FunParamsBlock => "FunParamsBlock",
            ProdID::FunParamBlock => "FunParamBlock",
            ProdID::FunBlock => "FunBlock",
            ProdID::FunParamsStmt => "FunParamsStmt",
            ProdID::FunParamStmt => "FunParamStmt",
            ProdID::FunStmt => "FunStmt",
            ProdID::FunParamsEmpty => "FunParamsEmpty",
            ProdID::FunParamEmpty => "FunParamEmpty",
            ProdID::FunEmpty => "FunEmpty",
            ProdID::ApplyArguments => "ApplyArguments",
            ProdID::ApplyOne => "ApplyOne",
            ProdID::ApplyEmpty => "ApplyEmpty",
            ProdID::Group => "Group",
        }
    }

    fn size(&self) -> usize {
        match self {
            ProdID::Elide
            | ProdID::ClassifyLetter
            | ProdID::ClassifyDigit
            | ProdID::FinishIdentifier
            | ProdID::FinishNumber
            | ProdID::Keyword => 1,
            ProdID::PrependLetter
            | ProdID::MergeDigits
            | ProdID::BlockStart
            | ProdID::BlockAppend => 2,
            ProdID::TypedIdentifier
            | ProdID::BinaryPow
            | ProdID::BinaryMul
            | ProdID::BinaryAdd
            | ProdID::FunParametersStart
            | ProdID::FunParametersAppend
            | ProdID::ArgumentsStart
            | ProdID::ArgumentsAppend
            | ProdID::ParametersStart
            | ProdID::ParametersAppend
            | ProdID::ApplyEmpty
            | ProdID::Group => 3,
            ProdID::Variable
            | ProdID::Value
            | ProdID::ApplyArguments
            | ProdID::ApplyOne => 4,
            ProdID::FunEmpty => 5,
            ProdID::FunBlock
            | ProdID::FunStmt
            | ProdID::FunParamsEmpty
            | ProdID::FunParamEmpty => 6,
            ProdID::FunParamsBlock
            | ProdID::FunParamBlock
            | ProdID::FunParamsStmt
            | ProdID::FunParamStmt => 7,
        }
    }
}

impl ProdID {
    /// Whether the production must consult the lookahead before reducing.
    pub fn is_ambiguous(&self) -> bool {
        matches!(
            self,
            ProdID::FinishIdentifier
                | ProdID::FinishNumber
                | ProdID::BinaryPow
                | ProdID::BinaryMul
                | ProdID::BinaryAdd
                | ProdID::FunParametersStart
                | ProdID::FunParametersAppend
                | ProdID::BlockStart
                | ProdID::BlockAppend
                | ProdID::ArgumentsStart
                | ProdID::ArgumentsAppend
                | ProdID::ParametersStart
                | ProdID::ParametersAppend
                | ProdID::Variable
                | ProdID::Value
        )
    }

    /// Returns `true` if the end of `stack` has this production's shape.
    pub fn matches(&self, stack: &[Node]) -> bool {
        use Keyword::{Fun, Val, Var};
        use Node::{Arguments, Block, Char, Digit, Identifier, Letter, Parameters};

        match self {
            ProdID::Elide => matches!(stack, [.., Char(c)] if is_blank(*c)),
            ProdID::ClassifyLetter => {
                matches!(stack, [.., Char(c)] if c.is_ascii_alphabetic())
            }
            ProdID::ClassifyDigit => matches!(stack, [.., Char(c)] if c.is_ascii_digit()),
            ProdID::PrependLetter => matches!(stack, [.., Letter(_), Identifier(_)]),
            ProdID::FinishIdentifier => matches!(stack, [.., Letter(_)]),
            ProdID::MergeDigits => matches!(stack, [.., Digit(_), Digit(_)]),
            ProdID::FinishNumber => matches!(stack, [.., Digit(_)]),
            ProdID::Keyword => {
                matches!(stack, [.., Identifier(i)] if Keyword::from_ident(i).is_some())
            }
            ProdID::TypedIdentifier => {
                matches!(stack, [.., Identifier(_), Char(':'), Identifier(_)])
            }
            ProdID::BinaryPow => binary_at(stack, &[BinOp::Pow]),
            ProdID::BinaryMul => binary_at(stack, &[BinOp::Mul, BinOp::Div]),
            ProdID::BinaryAdd => binary_at(stack, &[BinOp::Add, BinOp::Sub]),
            ProdID::FunParametersStart => matches!(
                stack,
                [.., Node::Keyword(Fun), Char('('), a, Char(','), b]
                    if a.is_parameter() && b.is_parameter()
            ),
            ProdID::FunParametersAppend => matches!(
                stack,
                [.., Node::Keyword(Fun), Char('('), Parameters(_), Char(','), p] if p.is_parameter()
            ),
            ProdID::BlockStart => {
                matches!(stack, [.., a, b] if a.is_statement() && b.is_statement())
            }
            ProdID::BlockAppend => matches!(stack, [.., Block(_), s] if s.is_statement()),
            ProdID::ArgumentsStart => matches!(
                stack,
                [.., a, Char(','), b] if a.is_expression() && b.is_expression()
            ),
            ProdID::ArgumentsAppend => {
                matches!(stack, [.., Arguments(_), Char(','), e] if e.is_expression())
            }
            ProdID::ParametersStart => matches!(
                stack,
                [.., a, Char(','), b] if a.is_parameter() && b.is_parameter()
            ),
            ProdID::ParametersAppend => {
                matches!(stack, [.., Parameters(_), Char(','), p] if p.is_parameter())
            }
            ProdID::Variable => matches!(
                stack,
                [.., Node::Keyword(Var), Identifier(_), Char('='), e] if e.is_expression()
            ),
            ProdID::Value => matches!(
                stack,
                [.., Node::Keyword(Val), Identifier(_), Char('='), e] if e.is_expression()
            ),
            ProdID::FunParamsBlock => matches!(
                stack,
                [.., Node::Keyword(Fun), Char('('), Parameters(_), Char(')'), Char('{'), Block(_), Char('}')]
            ),
            ProdID::FunParamBlock => matches!(
                stack,
                [.., Node::Keyword(Fun), Char('('), p, Char(')'), Char('{'), Block(_), Char('}')]
                    if p.is_parameter()
            ),
            ProdID::FunBlock => matches!(
                stack,
                [.., Node::Keyword(Fun), Char('('), Char(')'), Char('{'), Block(_), Char('}')]
            ),
            ProdID::FunParamsStmt => matches!(
                stack,
                [.., Node::Keyword(Fun), Char('('), Parameters(_), Char(')'), Char('{'), s, Char('}')]
                    if s.is_statement()
            ),
            ProdID::FunParamStmt => matches!(
                stack,
                [.., Node::Keyword(Fun), Char('('), p, Char(')'), Char('{'), s, Char('}')]
                    if p.is_parameter() && s.is_statement()
            ),
            ProdID::FunStmt => matches!(
                stack,
                [.., Node::Keyword(Fun), Char('('), Char(')'), Char('{'), s, Char('}')]
                    if s.is_statement()
            ),
            ProdID::FunParamsEmpty => matches!(
                stack,
                [.., Node::Keyword(Fun), Char('('), Parameters(_), Char(')'), Char('{'), Char('}')]
            ),
            ProdID::FunParamEmpty => matches!(
                stack,
                [.., Node::Keyword(Fun), Char('('), p, Char(')'), Char('{'), Char('}')]
                    if p.is_parameter()
            ),
            ProdID::FunEmpty => matches!(
                stack,
                [.., Node::Keyword(Fun), Char('('), Char(')'), Char('{'), Char('}')]
            ),
            ProdID::ApplyArguments => matches!(
                stack,
                [.., f, Char('('), Arguments(_), Char(')')] if f.is_callee()
            ),
            ProdID::ApplyOne => matches!(
                stack,
                [.., f, Char('('), e, Char(')')] if f.is_callee() && e.is_expression()
            ),
            ProdID::ApplyEmpty => matches!(stack, [.., f, Char('('), Char(')')] if f.is_callee()),
            ProdID::Group => match stack {
                [.., before, Char('('), e, Char(')')] => {
                    e.is_expression() && !before.is_callee() && !before.is_keyword(Fun)
                }
                [Char('('), e, Char(')')] => e.is_expression(),
                _ => false,
            },
        }
    }
}

fn binary_at(stack: &[Node], ops: &[BinOp]) -> bool {
    match stack {
        [.., left, Node::Char(c), right] => {
            left.is_expression()
                && right.is_expression()
                && BinOp::from_char(*c).is_some_and(|op| ops.contains(&op))
        }
        _ => false,
    }
}

/// Returns `true` if `next` continues the expression ending in `top`: a
/// binary operator always does, and `(` does after a callee.
pub fn extends(top: &Node, next: Option<char>) -> bool {
    match next {
        Some('(') => top.is_callee(),
        Some(c) => BinOp::from_char(c).is_some(),
        None => false,
    }
}

/// Finds the highest-priority production matching the end of `stack`.
pub fn lookup(stack: &[Node]) -> Option<ParserAction<ProdID>> {
    RULES.iter().find(|rule| rule.matches(stack)).map(|&rule| {
        if rule.is_ambiguous() {
            ParserAction::Ambig(rule)
        } else {
            ParserAction::Reduce(rule)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<Node> {
        s.chars().map(Node::from).collect()
    }

    #[test]
    fn rules_cover_every_production_once() {
        for (i, a) in RULES.iter().enumerate() {
            for b in &RULES[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn raw_characters_are_classified_first() {
        assert_eq!(lookup(&chars(" ")), Some(ParserAction::Reduce(ProdID::Elide)));
        assert_eq!(lookup(&chars("\u{a0}")), None);
        assert_eq!(
            lookup(&chars("x")),
            Some(ParserAction::Reduce(ProdID::ClassifyLetter))
        );
        assert_eq!(
            lookup(&chars("7")),
            Some(ParserAction::Reduce(ProdID::ClassifyDigit))
        );
        assert_eq!(lookup(&chars("+")), None);
        assert_eq!(lookup(&chars("é")), None);
        assert_eq!(lookup(&[]), None);
    }

    #[test]
    fn accumulation_precedes_keywords() {
        // the `var` suffix of `xvar` is not a keyword while `x` is pending
        let stack = vec![Node::Letter('x'), Node::ident("var")];
        assert_eq!(lookup(&stack), Some(ParserAction::Reduce(ProdID::PrependLetter)));
        assert_eq!(
            lookup(&[Node::ident("var")]),
            Some(ParserAction::Reduce(ProdID::Keyword))
        );
        assert_eq!(
            lookup(&[Node::Letter('v')]),
            Some(ParserAction::Ambig(ProdID::FinishIdentifier))
        );
    }

    #[test]
    fn tighter_operators_are_checked_first() {
        let stack = vec![
            Node::number(2),
            Node::Char('+'),
            Node::number(3),
            Node::Char('^'),
            Node::number(4),
        ];
        assert_eq!(lookup(&stack), Some(ParserAction::Ambig(ProdID::BinaryPow)));
        assert_eq!(
            lookup(&stack[..3]),
            Some(ParserAction::Ambig(ProdID::BinaryAdd))
        );
        let stack = vec![Node::number(2), Node::Char('/'), Node::ident("y")];
        assert_eq!(lookup(&stack), Some(ParserAction::Ambig(ProdID::BinaryMul)));
    }

    #[test]
    fn fun_anchored_lists_are_parameters() {
        let mut stack = vec![Node::Keyword(Keyword::Fun), Node::Char('(')];
        stack.extend([Node::ident("x"), Node::Char(','), Node::ident("y")]);
        assert_eq!(
            lookup(&stack),
            Some(ParserAction::Ambig(ProdID::FunParametersStart))
        );
        // without `fun (` the same shape is an argument list
        assert_eq!(
            lookup(&stack[2..]),
            Some(ParserAction::Ambig(ProdID::ArgumentsStart))
        );
        let typed = vec![Node::typed("x", "Int"), Node::Char(','), Node::ident("y")];
        assert_eq!(
            lookup(&typed),
            Some(ParserAction::Ambig(ProdID::ParametersStart))
        );
    }

    #[test]
    fn function_literal_shapes() {
        let fun = |inner: Vec<Node>| {
            let mut stack = vec![Node::Keyword(Keyword::Fun), Node::Char('(')];
            stack.extend(inner);
            stack
        };
        let cases = [
            (fun(chars("){}")), ProdID::FunEmpty),
            (
                fun(vec![Node::ident("x"), ')'.into(), '{'.into(), '}'.into()]),
                ProdID::FunParamEmpty,
            ),
            (
                fun(vec![')'.into(), '{'.into(), Node::number(1), '}'.into()]),
                ProdID::FunStmt,
            ),
            (
                fun(vec![
                    Node::Parameters(vec![]),
                    ')'.into(),
                    '{'.into(),
                    Node::Block(vec![]),
                    '}'.into(),
                ]),
                ProdID::FunParamsBlock,
            ),
        ];
        for (stack, prod) in cases {
            assert_eq!(lookup(&stack), Some(ParserAction::Reduce(prod)));
        }
    }

    #[test]
    fn group_is_not_an_application_or_parameter_list() {
        let mut stack = chars("(");
        stack.extend([Node::number(1), Node::Char(')')]);
        assert_eq!(lookup(&stack), Some(ParserAction::Reduce(ProdID::Group)));

        let mut app = vec![Node::ident("f")];
        app.extend(stack.iter().cloned());
        assert_eq!(lookup(&app), Some(ParserAction::Reduce(ProdID::ApplyOne)));

        let mut params = vec![Node::Keyword(Keyword::Fun), Node::Char('(')];
        params.extend([Node::ident("x"), Node::Char(')')]);
        assert_eq!(lookup(&params), None);
    }

    #[test]
    fn extends_recognizes_operators_and_calls() {
        assert!(extends(&Node::number(1), Some('*')));
        assert!(extends(&Node::ident("f"), Some('(')));
        assert!(!extends(&Node::number(1), Some('(')));
        assert!(!extends(&Node::number(1), Some(',')));
        assert!(!extends(&Node::number(1), None));
    }
}
