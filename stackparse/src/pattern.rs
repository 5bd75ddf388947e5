//! First-class patterns with named captures.
//!
//! A [`Pattern`] is applied to a [`Value`] tree and either yields the values
//! it captured or a [`MatchError`] describing why it did not match. Patterns
//! over lists are sized by their [`Width`]: every pattern consumes exactly one
//! list element except [`Pattern::Repeated`], which consumes any number.
//!
//! A list pattern may contain at most one variable-width sub-pattern. With a
//! single one, the split of the list is forced (fixed prefix, repeated middle,
//! fixed suffix); with several, the split is ambiguous and matching stops with
//! [`MatchError::AmbiguousWidth`].
//!
//! # Example
//!
//! ```rust
//! # use stackparse::pattern::{Capture, Pattern, Value};
//! let pattern = Pattern::List(vec![
//!     Pattern::Literal('f'),
//!     Pattern::Capture("first".into()),
//!     Pattern::Wildcard,
//! ]);
//! let value = Value::List(vec![Value::Atom('f'), Value::Atom('x'), Value::Atom('y')]);
//!
//! let captures = pattern.apply(&value).unwrap();
//! assert_eq!(captures.len(), 1);
//! assert_eq!(captures[0].0.as_str(), "first");
//! assert!(matches!(captures[0].1, Capture::One(Value::Atom('x'))));
//! ```

use smartstring::alias::String;
use std::ops::Add;
use thiserror::Error;

/// A value patterns are matched against: an atom or a list of values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value<V> {
    Atom(V),
    List(Vec<Value<V>>),
}

/// How many list elements a pattern consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Width {
    /// Minimum number of elements.
    pub value: usize,
    /// Whether the pattern may consume more than `value` elements.
    pub variable: bool,
}

impl Width {
    pub const fn fixed(value: usize) -> Self {
        Self {
            value,
            variable: false,
        }
    }

    pub const fn variable(value: usize) -> Self {
        Self {
            value,
            variable: true,
        }
    }
}

impl Add for Width {
    type Output = Width;

    fn add(self, other: Width) -> Width {
        Width {
            value: self.value + other.value,
            variable: self.variable || other.variable,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pattern<V> {
    /// Matches an atom equal to the literal.
    Literal(V),
    /// Matches anything and binds it to the name.
    Capture(String),
    /// Matches anything without binding.
    Wildcard,
    /// Matches a list whose every element matches the inner pattern, binding
    /// the per-element captures under the name.
    Repeated { name: String, pattern: Box<Pattern<V>> },
    /// Matches the left pattern, or the right one if the left fails.
    Alternative(Box<Pattern<V>>, Box<Pattern<V>>),
    /// Matches a list element by element.
    List(Vec<Pattern<V>>),
}

/// A value bound by a capture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Capture<'a, V> {
    One(&'a Value<V>),
    Many(Vec<Captures<'a, V>>),
}

/// Captures in pattern order.
pub type Captures<'a, V> = Vec<(String, Capture<'a, V>)>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    #[error("value did not match the literal")]
    LiteralMismatch,
    #[error("value is not a list")]
    NotAList,
    #[error("pattern expected at least {expected} values, found {found}")]
    TooFewValues { expected: usize, found: usize },
    #[error("pattern expected {expected} values, found {found}")]
    TooManyValues { expected: usize, found: usize },
    #[error("list pattern has {variable} variable-width sub-patterns; the split is ambiguous")]
    AmbiguousWidth { variable: usize },
}

impl<V> Pattern<V>
where
    V: PartialEq,
{
    pub fn width(&self) -> Width {
        match self {
            Pattern::Repeated { .. } => Width::variable(0),
            Pattern::Literal(_)
            | Pattern::Capture(_)
            | Pattern::Wildcard
            | Pattern::Alternative(..)
            | Pattern::List(_) => Width::fixed(1),
        }
    }

    pub fn apply<'a>(&self, value: &'a Value<V>) -> Result<Captures<'a, V>, MatchError> {
        match self {
            Pattern::Literal(lit) => match value {
                Value::Atom(v) if v == lit => Ok(Vec::new()),
                _ => Err(MatchError::LiteralMismatch),
            },
            Pattern::Capture(name) => Ok(vec![(name.clone(), Capture::One(value))]),
            Pattern::Wildcard => Ok(Vec::new()),
            Pattern::Repeated { name, pattern } => match value {
                Value::List(vs) => apply_repeated(name, pattern, vs),
                Value::Atom(_) => Err(MatchError::NotAList),
            },
            Pattern::Alternative(left, right) => {
                left.apply(value).or_else(|_| right.apply(value))
            }
            Pattern::List(patterns) => match value {
                Value::List(vs) => apply_list(patterns, vs),
                Value::Atom(_) => Err(MatchError::NotAList),
            },
        }
    }
}

fn apply_repeated<'a, V: PartialEq>(
    name: &String,
    pattern: &Pattern<V>,
    values: &'a [Value<V>],
) -> Result<Captures<'a, V>, MatchError> {
    let matches = values
        .iter()
        .map(|v| pattern.apply(v))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(vec![(name.clone(), Capture::Many(matches))])
}

fn apply_fixed<'a, V: PartialEq>(
    patterns: &[Pattern<V>],
    values: &'a [Value<V>],
    captures: &mut Captures<'a, V>,
) -> Result<(), MatchError> {
    for (pattern, value) in patterns.iter().zip(values) {
        captures.extend(pattern.apply(value)?);
    }
    Ok(())
}

fn apply_list<'a, V: PartialEq>(
    patterns: &[Pattern<V>],
    values: &'a [Value<V>],
) -> Result<Captures<'a, V>, MatchError> {
    let width = patterns
        .iter()
        .fold(Width::fixed(0), |acc, p| acc + p.width());
    let found = values.len();
    if found < width.value {
        return Err(MatchError::TooFewValues {
            expected: width.value,
            found,
        });
    }
    if found > width.value && !width.variable {
        return Err(MatchError::TooManyValues {
            expected: width.value,
            found,
        });
    }

    let mut captures = Vec::new();
    if !width.variable {
        apply_fixed(patterns, values, &mut captures)?;
        return Ok(captures);
    }

    let variable: Vec<usize> = patterns
        .iter()
        .enumerate()
        .filter(|(_, p)| p.width().variable)
        .map(|(i, _)| i)
        .collect();
    let [at] = variable[..] else {
        return Err(MatchError::AmbiguousWidth {
            variable: variable.len(),
        });
    };

    let (prefix, rest) = patterns.split_at(at);
    let suffix = &rest[1..];
    let middle_end = found - suffix.len();
    apply_fixed(prefix, &values[..prefix.len()], &mut captures)?;
    captures.extend(rest[0].apply_segment(&values[prefix.len()..middle_end])?);
    apply_fixed(suffix, &values[middle_end..], &mut captures)?;
    Ok(captures)
}

impl<V> Pattern<V>
where
    V: PartialEq,
{
    /// Applies a variable-width pattern to a run of list elements.
    fn apply_segment<'a>(&self, values: &'a [Value<V>]) -> Result<Captures<'a, V>, MatchError> {
        match self {
            Pattern::Repeated { name, pattern } => apply_repeated(name, pattern, values),
            _ => Err(MatchError::AmbiguousWidth { variable: 0 }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn atoms(cs: &str) -> Value<char> {
        Value::List(cs.chars().map(Value::Atom).collect())
    }

    fn capture(name: &str) -> Pattern<char> {
        Pattern::Capture(name.into())
    }

    fn repeated(name: &str, pattern: Pattern<char>) -> Pattern<char> {
        Pattern::Repeated {
            name: name.into(),
            pattern: Box::new(pattern),
        }
    }

    #[test]
    fn literal_matches_equal_atom_only() {
        let p = Pattern::Literal('a');
        assert!(p.apply(&Value::Atom('a')).unwrap().is_empty());
        assert_eq!(p.apply(&Value::Atom('b')), Err(MatchError::LiteralMismatch));
        assert_eq!(p.apply(&atoms("a")), Err(MatchError::LiteralMismatch));
    }

    #[test]
    fn capture_binds_whole_value() {
        let v = atoms("xy");
        let captures = capture("all").apply(&v).unwrap();
        assert_eq!(captures, vec![(String::from("all"), Capture::One(&v))]);
    }

    #[test]
    fn fixed_list_matches_pairwise() {
        let p = Pattern::List(vec![Pattern::Literal('('), capture("x"), Pattern::Literal(')')]);
        let v = atoms("(a)");
        let captures = p.apply(&v).unwrap();
        assert_eq!(captures.len(), 1);
        assert_eq!(captures[0].1, Capture::One(&Value::Atom('a')));

        assert_eq!(
            p.apply(&atoms("(a")),
            Err(MatchError::TooFewValues {
                expected: 3,
                found: 2
            })
        );
        assert_eq!(
            p.apply(&atoms("(ab)")),
            Err(MatchError::TooManyValues {
                expected: 3,
                found: 4
            })
        );
        assert_eq!(p.apply(&Value::Atom('(')), Err(MatchError::NotAList));
    }

    #[test]
    fn repeated_collects_every_element() {
        let p = repeated("xs", capture("x"));
        let v = atoms("abc");
        let captures = p.apply(&v).unwrap();
        let Capture::Many(ref runs) = captures[0].1 else {
            panic!("expected repeated captures");
        };
        assert_eq!(runs.len(), 3);
        assert_eq!(runs[2][0].1, Capture::One(&Value::Atom('c')));
    }

    #[test]
    fn repeated_fails_on_first_mismatch() {
        let p = repeated("zeros", Pattern::Literal('0'));
        assert!(p.apply(&atoms("000")).is_ok());
        assert_eq!(p.apply(&atoms("010")), Err(MatchError::LiteralMismatch));
        assert_eq!(p.apply(&Value::Atom('0')), Err(MatchError::NotAList));
    }

    #[test]
    fn single_repeated_segment_is_forced() {
        // wildcard, any number of zeros, wildcard
        let p = Pattern::List(vec![
            Pattern::Wildcard,
            repeated("zeros", Pattern::Literal('0')),
            capture("last"),
        ]);
        assert!(p.apply(&atoms("100001")).is_ok());
        assert!(p.apply(&atoms("40004")).is_ok());
        assert!(p.apply(&atoms("11")).is_ok());
        assert_eq!(p.apply(&atoms("44004")), Err(MatchError::LiteralMismatch));
        assert_eq!(
            p.apply(&atoms("1")),
            Err(MatchError::TooFewValues {
                expected: 2,
                found: 1
            })
        );

        let v = atoms("1007");
        let captures = p.apply(&v).unwrap();
        assert_eq!(captures[1].0.as_str(), "last");
        assert_eq!(captures[1].1, Capture::One(&Value::Atom('7')));
    }

    #[test]
    fn two_repeated_segments_are_ambiguous() {
        let p = Pattern::List(vec![
            repeated("a", Pattern::Wildcard),
            repeated("b", Pattern::Wildcard),
        ]);
        assert_eq!(
            p.apply(&atoms("xyz")),
            Err(MatchError::AmbiguousWidth { variable: 2 })
        );
    }

    #[test]
    fn alternative_tries_left_then_right() {
        let p = Pattern::Alternative(
            Box::new(Pattern::Literal('a')),
            Box::new(capture("other")),
        );
        assert!(p.apply(&Value::Atom('a')).unwrap().is_empty());
        assert_eq!(p.apply(&Value::Atom('b')).unwrap().len(), 1);
    }

    #[test]
    fn nested_lists_have_width_one() {
        let p = Pattern::List(vec![Pattern::List(vec![capture("inner")]), Pattern::Wildcard]);
        assert_eq!(p.width(), Width::fixed(1));
        let v = Value::List(vec![atoms("a"), Value::Atom('b')]);
        assert_eq!(p.apply(&v).unwrap()[0].1, Capture::One(&Value::Atom('a')));
    }

    #[test]
    fn widths_add_up() {
        assert_eq!(Width::fixed(1) + Width::fixed(2), Width::fixed(3));
        assert_eq!(Width::fixed(1) + Width::variable(0), Width::variable(1));
    }
}
