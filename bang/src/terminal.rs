//! Colored terminal output.
//!
//! Everything is written through [`termcolor::WriteColor`], so the same code
//! drives a real terminal, a plain pipe, or an in-memory [`termcolor::Buffer`]
//! in tests. Sinks that do not support color get the bare text with no
//! decoration.

use std::io;
use termcolor::{Color, ColorSpec, WriteColor};

/// Powerline separator drawn after an arrowed label.
pub const ARROW_GLYPH: char = '\u{e0b0}';

/// 24-bit colors for the three kinds of output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub error: Color,
    pub success: Color,
    pub bang: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            error: Color::Rgb(190, 20, 30),
            success: Color::Rgb(10, 160, 30),
            bang: Color::Rgb(140, 20, 190),
        }
    }
}

/// Writes `text` in the foreground color `fg`.
pub fn write_colored<W: WriteColor>(out: &mut W, text: &str, fg: Color) -> io::Result<()> {
    out.set_color(ColorSpec::new().set_fg(Some(fg)))?;
    write!(out, "{text}")?;
    out.reset()
}

/// Writes `text` as a label on a `color` background, closed by an arrow.
pub fn write_arrowed<W: WriteColor>(out: &mut W, text: &str, color: Color) -> io::Result<()> {
    if !out.supports_color() {
        return write!(out, "{text}");
    }
    out.set_color(
        ColorSpec::new()
            .set_fg(Some(Color::White))
            .set_bg(Some(color))
            .set_bold(true),
    )?;
    write!(out, " {text} ")?;
    out.set_color(ColorSpec::new().set_fg(Some(color)))?;
    write!(out, "{ARROW_GLYPH}")?;
    out.reset()
}
