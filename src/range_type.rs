//! Built-in range types.
//!
//! Each [`RangeType`] names an element type and knows how to parse its values
//! and how to build the matching [`DomainDescriptor`]. Looking up an unknown
//! name fails with [`CoverageError::UnsupportedDomain`] before any coverage
//! work starts.
//!
//! | Range type  | Element         | Domain     |
//! |-------------|-----------------|------------|
//! | `int4range` | `i32`           | discrete   |
//! | `int8range` | `i64`           | discrete   |
//! | `daterange` | calendar date   | discrete   |
//! | `numrange`  | [`Numeric`]     | continuous |
//! | `tsrange`   | timestamp       | continuous |
//! | `tstzrange` | timestamp (UTC) | continuous |
//!
//! # Examples
//!
//! ```
//! use coverage_rs::range_type::RangeType;
//!
//! let ty: RangeType = "daterange".parse().unwrap();
//! let r = ty.parse("[2024-01-01,2024-01-31]").unwrap();
//! assert_eq!(r.to_string(), "[2024-01-01,2024-02-01)");
//!
//! assert!("pointrange".parse::<RangeType>().is_err());
//! ```

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::domain::DomainDescriptor;
use crate::error::CoverageError;
use crate::literal::{parse_range_in, RangeLiteral};
use crate::numeric::Numeric;
use crate::value::Value;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum RangeType {
    Int4,
    Int8,
    Date,
    Numeric,
    Timestamp,
    TimestampTz,
}

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];
const TIMESTAMPTZ_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f%#z", "%Y-%m-%dT%H:%M:%S%.f%#z"];

impl RangeType {
    pub const ALL: [RangeType; 6] = [
        RangeType::Int4,
        RangeType::Int8,
        RangeType::Date,
        RangeType::Numeric,
        RangeType::Timestamp,
        RangeType::TimestampTz,
    ];

    pub fn name(self) -> &'static str {
        match self {
            RangeType::Int4 => "int4range",
            RangeType::Int8 => "int8range",
            RangeType::Date => "daterange",
            RangeType::Numeric => "numrange",
            RangeType::Timestamp => "tsrange",
            RangeType::TimestampTz => "tstzrange",
        }
    }

    /// Name of the element type.
    pub fn element_name(self) -> &'static str {
        match self {
            RangeType::Int4 => "int4",
            RangeType::Int8 => "int8",
            RangeType::Date => "date",
            RangeType::Numeric => "numeric",
            RangeType::Timestamp => "timestamp",
            RangeType::TimestampTz => "timestamptz",
        }
    }

    pub fn is_discrete(self) -> bool {
        matches!(self, RangeType::Int4 | RangeType::Int8 | RangeType::Date)
    }

    pub fn domain(self) -> DomainDescriptor<Value> {
        if self.is_discrete() {
            DomainDescriptor::discrete(<Value as Ord>::cmp, Value::successor)
        } else {
            DomainDescriptor::continuous(<Value as Ord>::cmp)
        }
    }

    /// Parses one element value of this type.
    pub fn parse_value(self, text: &str) -> Result<Value, CoverageError> {
        let invalid = || CoverageError::invalid_literal(text, format!("invalid {} value", self.element_name()));
        let text = text.trim();

        match self {
            RangeType::Int4 => text.parse().map(Value::Int4).map_err(|_| invalid()),
            RangeType::Int8 => text.parse().map(Value::Int8).map_err(|_| invalid()),
            RangeType::Date => NaiveDate::parse_from_str(text, DATE_FORMAT)
                .map(Value::Date)
                .map_err(|_| invalid()),
            RangeType::Numeric => text.parse::<Numeric>().map(Value::Numeric),
            RangeType::Timestamp => parse_timestamp(text).map(Value::Timestamp).ok_or_else(invalid),
            RangeType::TimestampTz => parse_timestamptz(text).map(Value::TimestampTz).ok_or_else(invalid),
        }
    }

    /// Parses a range literal of this type, validated and in canonical form.
    pub fn parse(self, text: &str) -> Result<RangeLiteral<Value>, CoverageError> {
        parse_range_in(&self.domain(), text, |v| self.parse_value(v))
    }
}

fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    if let Some(ts) = TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
    {
        return Some(ts);
    }
    // A bare date means midnight.
    NaiveDate::parse_from_str(text, DATE_FORMAT)
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Parses a timestamp with an offset, or a UTC one without.
fn parse_timestamptz(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(text) {
        return Some(ts.with_timezone(&Utc));
    }
    if let Some(ts) = TIMESTAMPTZ_FORMATS
        .iter()
        .find_map(|format| DateTime::parse_from_str(text, format).ok())
    {
        return Some(ts.with_timezone(&Utc));
    }
    parse_timestamp(text).map(|ts| ts.and_utc())
}

impl FromStr for RangeType {
    type Err = CoverageError;

    /// Accepts either the range type name or the element type name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        RangeType::ALL
            .into_iter()
            .find(|ty| ty.name() == name || ty.element_name() == name)
            .ok_or(CoverageError::UnsupportedDomain { name })
    }
}

impl fmt::Display for RangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
