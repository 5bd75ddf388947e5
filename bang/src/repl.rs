//! The interactive read-parse-print loop.
//!
//! Each input line is parsed on its own. A line that reduces to a single root
//! is printed as a success, followed by its value when the evaluator can
//! compute one; anything else is printed as a failure together with the stack
//! the parser was left with.

use crate::terminal::{Palette, write_arrowed, write_colored};
use crate::{BangError, BangParser, Scope, StackDisplay, eval};
use std::io::BufRead;
use termcolor::{Color, WriteColor};

pub const BANNER: &str = "welcome to bang! enter · to exit.";
pub const PROMPT: &str = "?";
pub const EXIT: &str = "·";
pub const FAREWELL: &str = "Goodbye!";

/// Runs the loop until `input` is exhausted or the exit line is entered.
pub fn run<R, W>(
    input: R,
    out: &mut W,
    parser: &mut BangParser,
    palette: &Palette,
) -> Result<(), BangError>
where
    R: BufRead,
    W: WriteColor,
{
    write_arrowed(out, BANNER, palette.bang)?;
    writeln!(out)?;

    let scope = Scope::new();
    let mut lines = input.lines();
    loop {
        write_arrowed(out, PROMPT, palette.bang)?;
        write!(out, " ")?;
        out.flush()?;

        let Some(line) = lines.next() else {
            writeln!(out)?;
            break;
        };
        let line = line?;
        let line = line.trim_end_matches('\r');
        if line.trim() == EXIT {
            break;
        }
        print_line(out, parser, &scope, palette, line)?;
    }

    write_arrowed(out, FAREWELL, palette.bang)?;
    writeln!(out)?;
    Ok(())
}

/// Parses one line and prints it as a success or a failure.
pub fn print_line<W: WriteColor>(
    out: &mut W,
    parser: &mut BangParser,
    scope: &Scope,
    palette: &Palette,
    line: &str,
) -> Result<(), BangError> {
    let stack = match parser.parse(line) {
        Ok(stack) => stack,
        Err(err) => {
            log::warn!("parse of {line:?} failed: {err}");
            return report(out, palette.error, &err.to_string());
        }
    };

    match stack.as_slice() {
        [root] if root.is_root() => {
            report(out, palette.success, &root.to_string())?;
            match eval(root, scope) {
                Ok(value) => {
                    write_colored(out, &format!("= {value}"), palette.success)?;
                    writeln!(out)?;
                }
                Err(err) => log::debug!("{err}"),
            }
            Ok(())
        }
        _ => report(out, palette.error, &StackDisplay(&stack).to_string()),
    }
}

fn report<W: WriteColor>(out: &mut W, color: Color, text: &str) -> Result<(), BangError> {
    write_arrowed(out, "!", color)?;
    write!(out, " ")?;
    write_colored(out, text, color)?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use stackparse::ParserLimits;
    use termcolor::Buffer;

    fn session(input: &str, parser: &mut BangParser) -> String {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut out = Buffer::no_color();
        run(input.as_bytes(), &mut out, parser, &Palette::default()).unwrap();
        String::from_utf8(out.into_inner()).unwrap()
    }

    #[test]
    fn prints_results_until_exit() {
        let mut parser = BangParser::new();
        let out = session("42\nval x = 5\n1 +\n·\nignored\n", &mut parser);
        assert_eq!(
            out,
            "welcome to bang! enter · to exit.\n\
             ? ! 42\n\
             = 42\n\
             ? ! Value x\n\
             | 5\n\
             ? ! 1\n\
             +\n\
             ? Goodbye!\n"
        );
    }

    #[test]
    fn end_of_input_also_exits() {
        let mut parser = BangParser::new();
        let out = session("f(1)\r\n", &mut parser);
        assert_eq!(
            out,
            "welcome to bang! enter · to exit.\n\
             ? ! Application\n\
             | f\n\
             | Arguments\n\
             | | 1\n\
             ? \n\
             Goodbye!\n"
        );
    }

    #[test]
    fn internal_errors_are_reported_and_the_loop_continues() {
        let mut parser = BangParser::with_limits(ParserLimits {
            max_input: 3,
            ..ParserLimits::default()
        });
        let out = session("12345\n7\n", &mut parser);
        assert!(out.contains("? ! input of 5 characters exceeds the limit of 3\n"));
        assert!(out.contains("? ! 7\n= 7\n"));
        assert!(out.ends_with("Goodbye!\n"));
    }
}
