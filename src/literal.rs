//! Range literal parsing.
//!
//! Accepts the usual textual range syntax:
//!
//! ```text
//! empty
//! [lower,upper)      (lower,upper]      [lower,upper]      (lower,upper)
//! [,upper)           (lower,)           (,)
//! ["2024-01-01 00:00","2024-02-01 00:00")
//! ```
//!
//! An omitted bound is infinite. Bound values may be double-quoted. Inside
//! quotes, `""` stands for one quote character. A backslash escapes the next
//! character anywhere. Whitespace around the literal and around unquoted
//! values is ignored.

use std::fmt;

use crate::bound::{Bound, Role};
use crate::domain::DomainDescriptor;
use crate::error::CoverageError;
use crate::interval::Interval;

/// A parsed range literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RangeLiteral<T> {
    /// The `empty` keyword, or an interval that contains no point.
    Empty,
    Interval(Interval<T>),
}

impl<T> RangeLiteral<T> {
    pub fn is_empty(&self) -> bool {
        matches!(self, RangeLiteral::Empty)
    }

    pub fn as_interval(&self) -> Option<&Interval<T>> {
        match self {
            RangeLiteral::Empty => None,
            RangeLiteral::Interval(i) => Some(i),
        }
    }

    pub fn into_interval(self) -> Option<Interval<T>> {
        match self {
            RangeLiteral::Empty => None,
            RangeLiteral::Interval(i) => Some(i),
        }
    }
}

impl<T: fmt::Display> fmt::Display for RangeLiteral<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeLiteral::Empty => write!(f, "empty"),
            RangeLiteral::Interval(i) => write!(f, "{}", i),
        }
    }
}

/// Parses a range literal, converting bound values with `parse_value`.
///
/// The result is not validated against any domain; see [`parse_range_in`].
pub fn parse_range<T, F>(input: &str, mut parse_value: F) -> Result<RangeLiteral<T>, CoverageError>
where
    F: FnMut(&str) -> Result<T, CoverageError>,
{
    let text = input.trim();
    if text.eq_ignore_ascii_case("empty") {
        return Ok(RangeLiteral::Empty);
    }

    let lower_inclusive = match text.chars().next() {
        Some('[') => true,
        Some('(') => false,
        _ => return Err(CoverageError::invalid_literal(input, "missing left parenthesis or bracket")),
    };

    let (lower, rest) = scan_bound(input, &text[1..], &[','])?;
    let (upper, rest) = scan_bound(input, &rest[1..], &[')', ']'])?;
    let upper_inclusive = rest.starts_with(']');
    if !rest[1..].trim().is_empty() {
        return Err(CoverageError::invalid_literal(
            input,
            "junk after right parenthesis or bracket",
        ));
    }

    let lower = match lower {
        Some(v) => Bound::lower(parse_value(&v)?, lower_inclusive),
        None => Bound::unbounded(Role::Lower),
    };
    let upper = match upper {
        Some(v) => Bound::upper(parse_value(&v)?, upper_inclusive),
        None => Bound::unbounded(Role::Upper),
    };

    Ok(RangeLiteral::Interval(Interval::new(lower, upper)))
}

/// Parses a range literal and checks it against `domain`.
///
/// The interval is validated and brought into canonical form. An interval that
/// turns out to contain no point is reported as [`RangeLiteral::Empty`].
pub fn parse_range_in<T, F>(
    domain: &DomainDescriptor<T>,
    input: &str,
    parse_value: F,
) -> Result<RangeLiteral<T>, CoverageError>
where
    T: fmt::Debug,
    F: FnMut(&str) -> Result<T, CoverageError>,
{
    let interval = match parse_range(input, parse_value)? {
        RangeLiteral::Empty => return Ok(RangeLiteral::Empty),
        RangeLiteral::Interval(i) => i,
    };
    let (lower, upper) = interval.into_bounds();
    let interval = domain.interval(lower, upper)?;
    if domain.is_empty(&interval) {
        Ok(RangeLiteral::Empty)
    } else {
        Ok(RangeLiteral::Interval(interval))
    }
}

/// Reads one bound value up to an unquoted `stop` character.
///
/// Returns the value (`None` if omitted) and the rest of `text`, starting at
/// the stop character.
fn scan_bound<'a>(input: &str, text: &'a str, stop: &[char]) -> Result<(Option<String>, &'a str), CoverageError> {
    let mut value = String::new();
    let mut in_quotes = false;
    let mut was_quoted = false;
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some((_, escaped)) => value.push(escaped),
                None => break,
            },
            '"' if in_quotes && matches!(chars.peek(), Some((_, '"'))) => {
                chars.next();
                value.push('"');
            }
            '"' => {
                in_quotes = !in_quotes;
                was_quoted = true;
            }
            c if !in_quotes && stop.contains(&c) => {
                let value = if was_quoted {
                    Some(value)
                } else {
                    let trimmed = value.trim();
                    (!trimmed.is_empty()).then(|| trimmed.to_string())
                };
                return Ok((value, &text[i..]));
            }
            c => value.push(c),
        }
    }

    Err(CoverageError::invalid_literal(input, "unexpected end of input"))
}
