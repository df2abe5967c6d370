//! Arbitrary-precision decimals.
//!
//! A [`Numeric`] is `digits * 10^-scale` with an integer mantissa. Values with
//! different scales compare by value, so `1.5 == 1.50`.
//!
//! Parsed values are limited to [`MAX_INTEGER_DIGITS`] digits before the
//! decimal point and [`MAX_SCALE`] after it, the limits of the `numeric` type.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use num_bigint::{BigInt, Sign};

use crate::error::CoverageError;

/// Most significant digits allowed before the decimal point.
pub const MAX_INTEGER_DIGITS: i64 = 131_072;

/// Most digits allowed after the decimal point.
pub const MAX_SCALE: i64 = 16_383;

#[derive(Debug, Clone)]
pub struct Numeric {
    digits: BigInt,
    scale: u32,
}

impl Numeric {
    fn new(digits: impl Into<BigInt>, scale: u32) -> Self {
        Self {
            digits: digits.into(),
            scale,
        }
    }

    pub fn scale(&self) -> u32 {
        self.scale
    }

    /// Mantissa expressed at a larger `scale`.
    fn digits_at(&self, scale: u32) -> BigInt {
        debug_assert!(scale >= self.scale);
        &self.digits * BigInt::from(10u32).pow(scale - self.scale)
    }
}

impl From<i64> for Numeric {
    fn from(value: i64) -> Self {
        Self::new(value, 0)
    }
}

impl Ord for Numeric {
    fn cmp(&self, other: &Self) -> Ordering {
        if self.scale == other.scale {
            return self.digits.cmp(&other.digits);
        }
        let scale = self.scale.max(other.scale);
        self.digits_at(scale).cmp(&other.digits_at(scale))
    }
}

impl PartialOrd for Numeric {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Numeric {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Numeric {}

impl FromStr for Numeric {
    type Err = CoverageError;

    /// Parses `[+-]digits[.digits][e[+-]digits]`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| CoverageError::invalid_literal(s, reason);

        let text = s.trim();
        let (mantissa, exponent) = match text.find(&['e', 'E'][..]) {
            Some(i) => (&text[..i], Some(&text[i + 1..])),
            None => (text, None),
        };
        let (int_part, frac_part) = match mantissa.split_once('.') {
            Some((int, frac)) => (int, frac),
            None => (mantissa, ""),
        };

        let (negative, int_part) = match int_part.as_bytes().first() {
            Some(b'-') => (true, &int_part[1..]),
            Some(b'+') => (false, &int_part[1..]),
            _ => (false, int_part),
        };
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(invalid("no digits"));
        }
        if !int_part.bytes().chain(frac_part.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(invalid("invalid digit"));
        }

        let all_digits = format!("{}{}", int_part, frac_part);
        let significant = all_digits.trim_start_matches('0').len() as i64;
        let mut digits = BigInt::parse_bytes(all_digits.as_bytes(), 10).ok_or_else(|| invalid("invalid digit"))?;
        if negative {
            digits = -digits;
        }
        let mut scale = frac_part.len() as i64;

        if let Some(exponent) = exponent {
            let exponent: i64 = exponent.parse().map_err(|_| invalid("invalid exponent"))?;
            scale = scale
                .checked_sub(exponent)
                .ok_or_else(|| invalid("value overflows numeric format"))?;
        }
        if scale > MAX_SCALE || (significant > 0 && significant - scale > MAX_INTEGER_DIGITS) {
            return Err(invalid("value overflows numeric format"));
        }
        if scale < 0 {
            // Bounded by MAX_INTEGER_DIGITS for non-zero values.
            if significant > 0 {
                let shift = u32::try_from(-scale).map_err(|_| invalid("value overflows numeric format"))?;
                digits *= BigInt::from(10u32).pow(shift);
            }
            scale = 0;
        }
        let scale = u32::try_from(scale).map_err(|_| invalid("value overflows numeric format"))?;

        Ok(Self::new(digits, scale))
    }
}

impl fmt::Display for Numeric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.digits.sign() == Sign::Minus {
            write!(f, "-")?;
        }
        let magnitude = self.digits.magnitude().to_string();
        let scale = self.scale as usize;
        if scale == 0 {
            return write!(f, "{}", magnitude);
        }
        let padded = format!("{:0>width$}", magnitude, width = scale + 1);
        let (int, frac) = padded.split_at(padded.len() - scale);
        write!(f, "{}.{}", int, frac)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    fn num(s: &str) -> Numeric {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!(num("12.50").to_string(), "12.50");
        assert_eq!(num("-0.05").to_string(), "-0.05");
        assert_eq!(num("+7").to_string(), "7");
        assert_eq!(num(".5").to_string(), "0.5");
        assert_eq!(num("1.5e2").to_string(), "150");
        assert_eq!(num("15e-3").to_string(), "0.015");
    }

    #[test]
    fn test_parse_errors() {
        for bad in ["", "-", "1.2.3", "abc", "1e", "1ex"] {
            assert!(bad.parse::<Numeric>().is_err(), "{:?} should not parse", bad);
        }
    }

    #[test]
    fn test_parse_limits() {
        let huge_exponent = format!("1e{}", MAX_INTEGER_DIGITS - 1);
        assert_eq!(num(&huge_exponent).to_string().len() as i64, MAX_INTEGER_DIGITS);
        assert_eq!(num(&format!("1e-{}", MAX_SCALE)).scale() as i64, MAX_SCALE);
        assert_eq!(num("0e9999999999").to_string(), "0");

        let too_long = format!("1e{}", MAX_INTEGER_DIGITS);
        let long_fraction = format!("0.{}", "1".repeat(MAX_SCALE as usize + 1));
        for bad in [
            "1e-2000000",
            "1e200000",
            "-5e-9223372036854775808",
            too_long.as_str(),
            long_fraction.as_str(),
        ] {
            let err = bad.parse::<Numeric>().unwrap_err();
            assert_eq!(err, CoverageError::invalid_literal(bad, "value overflows numeric format"), "{:.20}", bad);
        }
    }

    #[test]
    fn test_compare_across_scales() {
        assert_eq!(num("1.5"), num("1.50"));
        assert!(num("1.49") < num("1.5"));
        assert!(num("-2") < num("-1.999"));
        assert!(num("100000000000000000000000000001") > num("100000000000000000000000000000.5"));
        assert_eq!(num("3").cmp(&Numeric::from(3)), Ordering::Equal);
    }
}
