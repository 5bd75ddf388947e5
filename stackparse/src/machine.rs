use crate::{Cursor, ParseError, Span};
use smartstring::alias::String;
use std::fmt::Debug;
use std::mem;

/// Default upper bound on the number of input characters per parse.
pub const DEFAULT_MAX_INPUT: usize = 64 * 1024;

/// Default upper bound on the number of entries on the output stack.
pub const DEFAULT_MAX_STACK: usize = 4096;

/// Default upper bound on the nesting depth of a reduced entry.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Resource bounds for a single parse.
///
/// `max_input` and `max_stack` bound the work and memory of a parse.
/// `max_depth` bounds how deeply reductions may nest entries inside each
/// other, and with it the recursion of any later walk over the result
/// (display, evaluation, drop). A long left-associative chain such as
/// `1+1+...+1` stays within the stack limit but nests one level per operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserLimits {
    pub max_input: usize,
    pub max_stack: usize,
    pub max_depth: usize,
}

impl Default for ParserLimits {
    fn default() -> Self {
        Self {
            max_input: DEFAULT_MAX_INPUT,
            max_stack: DEFAULT_MAX_STACK,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Counters for a single parse. `reductions` counts every production the
/// driver applied, elisions included.
#[derive(Debug, Clone, Default)]
pub struct ParserStats {
    pub chars: usize,
    pub steps: usize,
    pub shifts: usize,
    pub reductions: usize,
    pub elisions: usize,
    pub ambigs: usize,
}

/// The shift/reduce primitive.
///
/// Holds the output stack (everything parsed so far), the remaining input in
/// reverse order so the next character is popped off the end, and a single
/// lookahead character (`None` once the input is exhausted). Raw characters
/// enter the stack through `S: From<char>` when shifted.
///
/// Every entry carries a nesting depth next to it. Shifted characters have
/// depth 0; an entry pushed by a reduction gets the depth its driver assigns,
/// by default one more than the deepest entry popped since the last push.
pub struct StackMachine<S> {
    tokens: Vec<S>,
    depths: Vec<usize>,
    popped: Vec<usize>,
    remaining: Vec<char>,
    lookahead: Option<char>,
    cursor: Cursor,
    limits: ParserLimits,
    pub stats: ParserStats,
}

impl<S> StackMachine<S>
where
    S: Debug + From<char>,
{
    pub fn new(limits: ParserLimits) -> Self {
        Self {
            tokens: Vec::new(),
            depths: Vec::new(),
            popped: Vec::new(),
            remaining: Vec::new(),
            lookahead: None,
            cursor: Cursor::new(),
            limits,
            stats: ParserStats::default(),
        }
    }

    pub fn limits(&self) -> ParserLimits {
        self.limits
    }

    /// Discards all state and primes the lookahead with the first character
    /// of `text`.
    pub fn reset(&mut self, text: &str) -> Result<(), ParseError> {
        self.tokens.clear();
        self.depths.clear();
        self.popped.clear();
        self.stats = ParserStats::default();
        self.remaining = text.chars().rev().collect();
        let len = self.remaining.len();
        if len > self.limits.max_input {
            self.remaining.clear();
            self.lookahead = None;
            return Err(ParseError::new(
                format!(
                    "input of {} characters exceeds the limit of {}",
                    len, self.limits.max_input
                ),
                None,
            ));
        }
        self.stats.chars = len;
        self.lookahead = self.remaining.pop();
        self.cursor.start(self.lookahead);
        Ok(())
    }

    /// The stack, bottom first.
    pub fn tokens(&self) -> &[S] {
        &self.tokens
    }

    pub fn lookahead(&self) -> Option<char> {
        self.lookahead
    }

    /// Nesting depths of the stack entries, bottom first.
    pub fn depths(&self) -> &[usize] {
        &self.depths
    }

    /// Depths of the entries popped since the last push, bottom first.
    pub fn popped_depths(&self) -> &[usize] {
        &self.popped
    }

    /// The next character that is not blank, starting at the lookahead.
    pub fn significant_lookahead(&self) -> Option<char> {
        match self.lookahead {
            Some(c) if is_blank(c) => self
                .remaining
                .iter()
                .rev()
                .copied()
                .find(|&c| !is_blank(c)),
            lookahead => lookahead,
        }
    }

    /// Span of the current lookahead character.
    pub fn span(&self) -> Span {
        self.cursor.span
    }

    /// Moves the lookahead onto the stack and advances to the next character.
    pub fn shift(&mut self) -> Result<(), ParseError> {
        let Some(c) = self.lookahead else {
            return Err(ParseError::new(
                "cannot shift past the end of input",
                Some(self.span()),
            ));
        };
        self.tokens_push_at(S::from(c), 0)?;
        self.lookahead = self.remaining.pop();
        self.cursor.advance(c, self.lookahead);
        self.stats.shifts += 1;
        Ok(())
    }

    /// Replaces the top `len` entries with `node`.
    ///
    /// Equivalent to keeping the unmatched prefix of the stack and appending
    /// the synthesized node.
    pub fn reduce(&mut self, len: usize, node: S) -> Result<(), ParseError> {
        let n = self.tokens.len();
        if len > n {
            return Err(self.underflow(len));
        }
        self.popped.extend(self.depths.drain(n - len..));
        self.tokens.truncate(n - len);
        self.tokens_push(node)
    }

    /// Drops the top entry without replacing it.
    pub fn elide(&mut self) -> Result<S, ParseError> {
        let token = self.tokens_pop()?;
        self.popped.clear();
        self.stats.elisions += 1;
        Ok(token)
    }

    /// Pushes `token` one level deeper than the deepest entry popped since
    /// the last push, or at depth 0 if nothing was popped.
    pub fn tokens_push(&mut self, token: S) -> Result<(), ParseError> {
        let depth = self.popped.iter().max().map_or(0, |d| d + 1);
        self.tokens_push_at(token, depth)
    }

    /// Pushes `token` at an explicit nesting depth.
    pub fn tokens_push_at(&mut self, token: S, depth: usize) -> Result<(), ParseError> {
        if self.tokens.len() >= self.limits.max_stack {
            return Err(ParseError::new(
                format!("output stack exceeds {} entries", self.limits.max_stack),
                Some(self.span()),
            ));
        }
        if depth > self.limits.max_depth {
            return Err(ParseError::new(
                format!("nesting exceeds {} levels", self.limits.max_depth),
                Some(self.span()),
            ));
        }
        self.tokens.push(token);
        self.depths.push(depth);
        self.popped.clear();
        Ok(())
    }

    pub fn tokens_pop(&mut self) -> Result<S, ParseError> {
        let token = self.tokens.pop().ok_or_else(|| self.underflow(1))?;
        if let Some(depth) = self.depths.pop() {
            self.popped.push(depth);
        }
        Ok(token)
    }

    /// Pops the top `N` entries, bottom first, so they can be destructured by
    /// value in a reduction.
    pub fn tokens_pop_n<const N: usize>(&mut self) -> Result<[S; N], ParseError> {
        let n = self.tokens.len();
        if N > n {
            return Err(self.underflow(N));
        }
        let top = self.tokens.split_off(n - N);
        self.popped.extend(self.depths.drain(n - N..));
        let len = top.len();
        top.try_into()
            .map_err(|_| ParseError::new(format!("expected {N} entries, got {len}"), None))
    }

    /// Returns a reference to the token counted from the end:
    /// 0 = last, 1 = second last, etc.
    pub fn tokens_peek(&self, index: usize) -> Option<&S> {
        let n = self.tokens.len();
        if index < n {
            self.tokens.get(n - 1 - index)
        } else {
            None
        }
    }

    /// Hands the finished stack to the caller, leaving the machine empty.
    pub fn take_tokens(&mut self) -> Vec<S> {
        self.depths.clear();
        self.popped.clear();
        mem::take(&mut self.tokens)
    }

    fn underflow(&self, wanted: usize) -> ParseError {
        ParseError::new(
            format!(
                "stack underflow: wanted {} entries, have {}",
                wanted,
                self.tokens.len()
            ),
            Some(self.span()),
        )
    }

    pub fn dump_state(&self) {
        let mut output = String::new();
        for token in self.tokens.iter() {
            output.push_str(&format!("{:?}  ", token));
        }
        log::trace!("[{}] <- {:?}", output.trim_end(), self.lookahead);
    }
}

/// Characters the machine looks past when finding the significant
/// lookahead. Grammars should elide exactly this set.
pub fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::span;

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn machine(text: &str) -> StackMachine<char> {
        let mut m = StackMachine::new(ParserLimits::default());
        m.reset(text).unwrap();
        m
    }

    #[test]
    fn reset_primes_the_lookahead() {
        init_logger();
        let m = machine("ab");
        assert_eq!(m.lookahead(), Some('a'));
        assert!(m.tokens().is_empty());
        assert_eq!(m.stats.chars, 2);
    }

    #[test]
    fn shift_moves_lookahead_onto_the_stack() {
        let mut m = machine("ab");
        m.shift().unwrap();
        assert_eq!(m.tokens(), &['a']);
        assert_eq!(m.lookahead(), Some('b'));
        m.shift().unwrap();
        assert_eq!(m.tokens(), &['a', 'b']);
        assert_eq!(m.lookahead(), None);
        assert_eq!(m.stats.shifts, 2);
    }

    #[test]
    fn shift_at_end_of_input_is_an_error() {
        let mut m = machine("");
        assert_eq!(m.lookahead(), None);
        assert!(m.shift().is_err());
    }

    #[test]
    fn reduce_replaces_the_matched_suffix() {
        let mut m = machine("abc");
        for _ in 0..3 {
            m.shift().unwrap();
        }
        m.reduce(2, 'x').unwrap();
        assert_eq!(m.tokens(), &['a', 'x']);
    }

    #[test]
    fn reduce_past_the_bottom_underflows() {
        let mut m = machine("a");
        m.shift().unwrap();
        let err = m.reduce(2, 'x').unwrap_err();
        assert!(err.message.contains("underflow"));
        assert_eq!(m.tokens(), &['a']);
    }

    #[test]
    fn elide_drops_the_top() {
        let mut m = machine("a ");
        m.shift().unwrap();
        m.shift().unwrap();
        assert_eq!(m.elide().unwrap(), ' ');
        assert_eq!(m.tokens(), &['a']);
        assert_eq!(m.stats.elisions, 1);
    }

    #[test]
    fn pop_n_returns_entries_bottom_first() {
        let mut m = machine("abc");
        for _ in 0..3 {
            m.shift().unwrap();
        }
        let [b, c] = m.tokens_pop_n::<2>().unwrap();
        assert_eq!((b, c), ('b', 'c'));
        assert_eq!(m.tokens(), &['a']);
        assert!(m.tokens_pop_n::<2>().is_err());
    }

    #[test]
    fn peek_counts_from_the_top() {
        let mut m = machine("ab");
        m.shift().unwrap();
        m.shift().unwrap();
        assert_eq!(m.tokens_peek(0), Some(&'b'));
        assert_eq!(m.tokens_peek(1), Some(&'a'));
        assert_eq!(m.tokens_peek(2), None);
    }

    #[test]
    fn significant_lookahead_skips_whitespace() {
        let mut m = machine("a \t *");
        assert_eq!(m.significant_lookahead(), Some('a'));
        m.shift().unwrap();
        assert_eq!(m.lookahead(), Some(' '));
        assert_eq!(m.significant_lookahead(), Some('*'));

        let mut m = machine("a  ");
        m.shift().unwrap();
        assert_eq!(m.significant_lookahead(), None);
    }

    #[test]
    fn span_follows_the_lookahead() {
        let mut m = machine("ab");
        assert_eq!(Some(m.span()), span!(0, 0, 0, 1));
        m.shift().unwrap();
        assert_eq!(Some(m.span()), span!(0, 1, 0, 2));
    }

    #[test]
    fn input_limit_is_enforced() {
        let mut m: StackMachine<char> = StackMachine::new(ParserLimits {
            max_input: 3,
            ..ParserLimits::default()
        });
        assert!(m.reset("abc").is_ok());
        let err = m.reset("abcd").unwrap_err();
        assert!(err.message.contains("exceeds the limit of 3"));
        assert_eq!(m.lookahead(), None);
    }

    #[test]
    fn stack_limit_is_enforced() {
        let mut m: StackMachine<char> = StackMachine::new(ParserLimits {
            max_stack: 2,
            ..ParserLimits::default()
        });
        m.reset("abc").unwrap();
        m.shift().unwrap();
        m.shift().unwrap();
        assert!(m.shift().is_err());
    }

    #[test]
    fn take_tokens_empties_the_stack() {
        let mut m = machine("ab");
        m.shift().unwrap();
        assert_eq!(m.take_tokens(), vec!['a']);
        assert!(m.tokens().is_empty());
    }

    #[test]
    fn non_breaking_space_is_significant() {
        let mut m = machine("1 \u{a0}+");
        m.shift().unwrap();
        assert_eq!(m.significant_lookahead(), Some('\u{a0}'));
        assert!(!is_blank('\u{a0}'));
    }

    #[test]
    fn reductions_nest_one_level_deeper() {
        let mut m = machine("abcd");
        for _ in 0..4 {
            m.shift().unwrap();
        }
        assert_eq!(m.depths(), &[0, 0, 0, 0]);
        m.reduce(2, 'x').unwrap();
        assert_eq!(m.depths(), &[0, 0, 1]);
        m.reduce(2, 'y').unwrap();
        assert_eq!(m.depths(), &[0, 2]);

        let [_, _] = m.tokens_pop_n::<2>().unwrap();
        assert_eq!(m.popped_depths(), &[0, 2]);
        m.tokens_push_at('z', 1).unwrap();
        assert_eq!(m.depths(), &[1]);
        assert!(m.popped_depths().is_empty());
    }

    #[test]
    fn elided_entries_do_not_deepen_the_next_push() {
        let mut m = machine("a ");
        m.shift().unwrap();
        m.shift().unwrap();
        m.elide().unwrap();
        m.tokens_push('b').unwrap();
        assert_eq!(m.depths(), &[0, 0]);
    }

    #[test]
    fn depth_limit_is_enforced() {
        let mut m: StackMachine<char> = StackMachine::new(ParserLimits {
            max_depth: 2,
            ..ParserLimits::default()
        });
        m.reset("ab").unwrap();
        m.shift().unwrap();
        m.reduce(1, 'x').unwrap();
        m.reduce(1, 'y').unwrap();
        let err = m.reduce(1, 'z').unwrap_err();
        assert!(err.message.contains("nesting exceeds 2 levels"));
    }
}
