//! Tree rendering of syntax nodes.
//!
//! A node renders as a label line followed by its children, each child line
//! prefixed with `"| "` per level of nesting. Leaves render inline:
//!
//! ```text
//! Value x
//! | +
//! | | 1
//! | | *
//! | | | 2
//! | | | y
//! ```

use crate::ast::Node;
use std::fmt;

const INDENT: &str = "| ";

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_tree(f, self, 0)
    }
}

/// Renders a whole parse stack, bottom first, one tree after another.
///
/// ```rust
/// # use bang::{BangParser, StackDisplay};
/// let stack = BangParser::new().parse("1 +").unwrap();
/// assert_eq!(StackDisplay(&stack).to_string(), "1\n+");
/// ```
pub struct StackDisplay<'a>(pub &'a [Node]);

impl fmt::Display for StackDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, node) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write_tree(f, node, 0)?;
        }
        Ok(())
    }
}

fn write_line(f: &mut fmt::Formatter<'_>, depth: usize, args: fmt::Arguments<'_>) -> fmt::Result {
    for _ in 0..depth {
        f.write_str(INDENT)?;
    }
    f.write_fmt(args)
}

fn write_children(f: &mut fmt::Formatter<'_>, children: &[Node], depth: usize) -> fmt::Result {
    for child in children {
        writeln!(f)?;
        write_tree(f, child, depth)?;
    }
    Ok(())
}

fn write_list(
    f: &mut fmt::Formatter<'_>,
    label: &str,
    children: &[Node],
    depth: usize,
) -> fmt::Result {
    write_line(f, depth, format_args!("{label}"))?;
    write_children(f, children, depth + 1)
}

fn write_tree(f: &mut fmt::Formatter<'_>, node: &Node, depth: usize) -> fmt::Result {
    match node {
        Node::Char(c) | Node::Letter(c) => write_line(f, depth, format_args!("{c}")),
        Node::Digit(digits) => write_line(f, depth, format_args!("{digits}")),
        Node::Identifier(name) => write_line(f, depth, format_args!("{name}")),
        Node::Keyword(keyword) => write_line(f, depth, format_args!("{}", keyword.as_str())),
        Node::Number(n) => write_line(f, depth, format_args!("{n}")),
        Node::TypedIdentifier { name, type_name } => {
            write_line(f, depth, format_args!("{name}: {type_name}"))
        }
        Node::Parameters(params) => write_list(f, "Parameters", params, depth),
        Node::Arguments(args) => write_list(f, "Arguments", args, depth),
        Node::Block(stmts) => write_list(f, "Block", stmts, depth),
        Node::Binary { left, op, right } => {
            write_line(f, depth, format_args!("{}", op.as_char()))?;
            writeln!(f)?;
            write_tree(f, left, depth + 1)?;
            writeln!(f)?;
            write_tree(f, right, depth + 1)
        }
        Node::AnonymousFunction { params, body } => {
            write_line(f, depth, format_args!("AnonymousFunction"))?;
            writeln!(f)?;
            write_list(f, "Parameters", params, depth + 1)?;
            writeln!(f)?;
            write_list(f, "Block", body, depth + 1)
        }
        Node::Application { callee, args } => {
            write_line(f, depth, format_args!("Application"))?;
            writeln!(f)?;
            write_tree(f, callee, depth + 1)?;
            writeln!(f)?;
            write_list(f, "Arguments", args, depth + 1)
        }
        Node::Variable {
            name,
            initial_value,
        } => {
            write_line(f, depth, format_args!("Variable {name}"))?;
            writeln!(f)?;
            write_tree(f, initial_value, depth + 1)
        }
        Node::Value { name, value } => {
            write_line(f, depth, format_args!("Value {name}"))?;
            writeln!(f)?;
            write_tree(f, value, depth + 1)
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::BangParser;

    fn render(line: &str) -> String {
        let stack = BangParser::new().parse(line).unwrap();
        crate::StackDisplay(&stack).to_string()
    }

    #[test]
    fn leaves_render_inline() {
        assert_eq!(render("42"), "42");
        assert_eq!(render("abc"), "abc");
        assert_eq!(render("fun"), "fun");
    }

    #[test]
    fn binary_children_are_indented() {
        assert_eq!(render("val x = 1+2*y"), "Value x\n| +\n| | 1\n| | *\n| | | 2\n| | | y");
    }

    #[test]
    fn function_renders_parameters_and_body() {
        assert_eq!(
            render("fun(x: Int, y){ f(x) }"),
            "AnonymousFunction\n\
             | Parameters\n\
             | | x: Int\n\
             | | y\n\
             | Block\n\
             | | Application\n\
             | | | f\n\
             | | | Arguments\n\
             | | | | x"
        );
    }

    #[test]
    fn empty_lists_render_their_label() {
        assert_eq!(render("fun(){}"), "AnonymousFunction\n| Parameters\n| Block");
    }

    #[test]
    fn leftover_stack_renders_entry_per_line() {
        assert_eq!(render("a, b"), "Arguments\n| a\n| b");
        assert_eq!(render("1 + #"), "1\n+\n#");
    }
}
