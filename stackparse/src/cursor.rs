use crate::{Position, Span};

/// Tracks the source position of the machine's lookahead character.
///
/// The cursor advances one character at a time as the machine shifts. Its
/// `span` always covers the character currently held as lookahead, or is
/// empty once the input is exhausted.
#[derive(Debug, Clone, Default)]
pub struct Cursor {
    pub span: Span,
}

impl Cursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Positions the cursor on the first character, or leaves it empty for
    /// empty input.
    pub fn start(&mut self, first: Option<char>) {
        self.span = Span::default();
        if first.is_some() {
            self.span.end.column = 1;
        }
    }

    /// Moves past `consumed` and onto `next`.
    pub fn advance(&mut self, consumed: char, next: Option<char>) {
        self.span.start = if consumed == '\n' {
            Position::new(self.span.start.line + 1, 0)
        } else {
            Position::new(self.span.start.line, self.span.start.column + 1)
        };
        self.span.end = match next {
            Some(_) => Position::new(self.span.start.line, self.span.start.column + 1),
            None => self.span.start,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::span;

    #[test]
    fn start_covers_first_character() {
        let mut cursor = Cursor::new();
        cursor.start(Some('a'));
        assert_eq!(Some(cursor.span), span!(0, 0, 0, 1));

        cursor.start(None);
        assert!(cursor.span.is_empty());
    }

    #[test]
    fn advance_moves_along_the_line() {
        let mut cursor = Cursor::new();
        cursor.start(Some('a'));
        cursor.advance('a', Some('b'));
        cursor.advance('b', Some('c'));
        assert_eq!(Some(cursor.span), span!(0, 2, 0, 3));
    }

    #[test]
    fn newline_starts_a_new_line() {
        let mut cursor = Cursor::new();
        cursor.start(Some('x'));
        cursor.advance('x', Some('\n'));
        cursor.advance('\n', Some('y'));
        assert_eq!(Some(cursor.span), span!(1, 0, 1, 1));
    }

    #[test]
    fn end_of_input_is_an_empty_span() {
        let mut cursor = Cursor::new();
        cursor.start(Some('x'));
        cursor.advance('x', None);
        assert_eq!(Some(cursor.span), span!(0, 1, 0, 1));
        assert!(cursor.span.is_empty());
    }
}
