//! Element values of the built-in range types.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::numeric::Numeric;

/// A single element of one of the [`RangeType`][crate::range_type::RangeType]s.
///
/// Values of different variants are ordered by variant. A well-formed interval
/// never mixes them. `Debug` prints the same literal text as `Display`, so that
/// bounds in error messages read like range input.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Value {
    Int4(i32),
    Int8(i64),
    Date(NaiveDate),
    Numeric(Numeric),
    Timestamp(NaiveDateTime),
    TimestampTz(DateTime<Utc>),
}

impl Value {
    /// The next value for the discrete variants, `None` otherwise or on overflow.
    pub fn successor(&self) -> Option<Value> {
        match self {
            Value::Int4(v) => v.checked_add(1).map(Value::Int4),
            Value::Int8(v) => v.checked_add(1).map(Value::Int8),
            Value::Date(d) => d.succ_opt().map(Value::Date),
            Value::Numeric(_) | Value::Timestamp(_) | Value::TimestampTz(_) => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int4(v) => write!(f, "{}", v),
            Value::Int8(v) => write!(f, "{}", v),
            Value::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Value::Numeric(n) => write!(f, "{}", n),
            Value::Timestamp(ts) => write!(f, "\"{}\"", ts.format("%Y-%m-%d %H:%M:%S%.f")),
            Value::TimestampTz(ts) => write!(f, "\"{}\"", ts.format("%Y-%m-%d %H:%M:%S%.f%:z")),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
