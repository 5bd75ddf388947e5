//! Command-line interface for bang.
//!
//! Without a subcommand the binary starts the interactive loop. `parse` and
//! `file` parse a single line or every line of a file and print the results
//! the same way the loop does.

use anyhow::{Context, Result};
use bang::repl::{self, print_line};
use bang::terminal::Palette;
use bang::{BangParser, Scope};
use clap::{Parser as ClapParser, Subcommand};
use stackparse::{DEFAULT_MAX_DEPTH, DEFAULT_MAX_INPUT, DEFAULT_MAX_STACK, ParserLimits};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use termcolor::{ColorChoice, StandardStream};

#[derive(ClapParser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Disable colored output
    #[arg(long)]
    no_color: bool,
    /// Maximum number of characters per line
    #[arg(long, default_value_t = DEFAULT_MAX_INPUT)]
    max_input: usize,
    /// Maximum depth of the parser stack
    #[arg(long, default_value_t = DEFAULT_MAX_STACK)]
    max_stack: usize,
    /// Maximum nesting depth of the parsed tree
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,
    /// Command
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Starts the interactive loop (default)
    Repl,
    /// Parses one line
    Parse {
        /// Source line
        line: String,
    },
    /// Parses every line of a file
    File {
        /// Input file with one bang unit per line
        #[arg(short, long)]
        input: String,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let choice = if args.no_color {
        ColorChoice::Never
    } else {
        ColorChoice::Auto
    };
    let mut out = StandardStream::stdout(choice);
    let palette = Palette::default();
    let mut parser = BangParser::with_limits(ParserLimits {
        max_input: args.max_input,
        max_stack: args.max_stack,
        max_depth: args.max_depth,
    });
    let scope = Scope::new();

    match args.command.unwrap_or(Commands::Repl) {
        Commands::Repl => {
            repl::run(io::stdin().lock(), &mut out, &mut parser, &palette)?;
        }
        Commands::Parse { line } => {
            print_line(&mut out, &mut parser, &scope, &palette, &line)?;
            log::info!("Stats: {:?}", parser.stats());
        }
        Commands::File { input: path } => {
            let file = File::open(&path).with_context(|| format!("can't open {path:?}"))?;
            for line in BufReader::new(file).lines() {
                let line = line?;
                if line.trim().is_empty() {
                    continue;
                }
                print_line(&mut out, &mut parser, &scope, &palette, &line)?;
                log::info!("Stats: {:?}", parser.stats());
            }
        }
    }

    Ok(())
}
