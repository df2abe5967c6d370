//! Interval endpoints.
//!
//! A [`Bound`] is one end of an interval: a finite point of some ordered domain
//! or one of the two infinities, together with its polarity (inclusive or
//! exclusive) and its [`Role`] (lower or upper end).
//!
//! Bounds are ordered with [`Bound::cmp_by`], which takes the domain comparator
//! as a parameter. This keeps the bound type independent from the value type's
//! own notion of order (if any).
//!
//! # Ordering of bounds
//!
//! - `NegativeInfinity` is below every finite bound, `PositiveInfinity` is above.
//!   Infinities of the same sign compare equal.
//! - Finite bounds compare by value first. On equal values, each bound is
//!   placed relative to the point itself:
//!   an inclusive bound sits *at* the point, an exclusive lower bound sits
//!   *just after* it, and an exclusive upper bound sits *just before* it.
//!
//! So for the point `5`: `5)` < `[5` == `5]` < `(5`.

use std::cmp::Ordering;
use std::fmt;

/// The position of a bound on the extended value line.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BoundKind<T> {
    NegativeInfinity,
    Finite(T),
    PositiveInfinity,
}

impl<T> BoundKind<T> {
    fn rank(&self) -> u8 {
        match self {
            BoundKind::NegativeInfinity => 0,
            BoundKind::Finite(_) => 1,
            BoundKind::PositiveInfinity => 2,
        }
    }
}

/// Which end of an interval a bound belongs to.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Role {
    Lower,
    Upper,
}

/// One endpoint of an interval.
///
/// # Invariants
///
/// - Infinite bounds are never inclusive: a point can not equal infinity.
///
/// Both `Display` and `Debug` use range-literal notation (`[1`, `5)`); they
/// differ only in how the value itself is formatted.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Bound<T> {
    kind: BoundKind<T>,
    inclusive: bool,
    role: Role,
}

// Constructors
impl<T> Bound<T> {
    /// Creates a finite bound.
    pub fn finite(value: T, inclusive: bool, role: Role) -> Self {
        Self {
            kind: BoundKind::Finite(value),
            inclusive,
            role,
        }
    }

    /// Creates a finite lower bound: `[value` or `(value`.
    pub fn lower(value: T, inclusive: bool) -> Self {
        Self::finite(value, inclusive, Role::Lower)
    }

    /// Creates a finite upper bound: `value]` or `value)`.
    pub fn upper(value: T, inclusive: bool) -> Self {
        Self::finite(value, inclusive, Role::Upper)
    }

    pub fn negative_infinity(role: Role) -> Self {
        Self {
            kind: BoundKind::NegativeInfinity,
            inclusive: false,
            role,
        }
    }

    pub fn positive_infinity(role: Role) -> Self {
        Self {
            kind: BoundKind::PositiveInfinity,
            inclusive: false,
            role,
        }
    }

    /// Creates the infinite bound matching the role:
    /// negative infinity for a lower bound, positive infinity for an upper one.
    pub fn unbounded(role: Role) -> Self {
        match role {
            Role::Lower => Self::negative_infinity(role),
            Role::Upper => Self::positive_infinity(role),
        }
    }
}

// Getters
impl<T> Bound<T> {
    pub fn kind(&self) -> &BoundKind<T> {
        &self.kind
    }

    /// Returns the finite value, or `None` for an infinite bound.
    pub fn value(&self) -> Option<&T> {
        match &self.kind {
            BoundKind::Finite(v) => Some(v),
            _ => None,
        }
    }

    pub fn is_inclusive(&self) -> bool {
        self.inclusive
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn is_finite(&self) -> bool {
        matches!(self.kind, BoundKind::Finite(_))
    }

    pub fn is_infinite(&self) -> bool {
        !self.is_finite()
    }
}

// Modifiers
impl<T> Bound<T> {
    /// Returns the same bound with the given polarity.
    ///
    /// Infinite bounds stay exclusive.
    pub fn with_inclusive(mut self, inclusive: bool) -> Self {
        self.inclusive = inclusive && self.is_finite();
        self
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }
}

impl<T> Bound<T> {
    /// Offset of a finite bound relative to its point:
    /// `-1` just before, `0` at, `+1` just after.
    fn offset(&self) -> i8 {
        match (self.inclusive, self.role) {
            (true, _) => 0,
            (false, Role::Lower) => 1,
            (false, Role::Upper) => -1,
        }
    }

    /// Compares two bounds, using `compare` for finite values.
    ///
    /// See the [module documentation](self) for the tie-breaking rules.
    pub fn cmp_by<F>(&self, other: &Self, compare: F) -> Ordering
    where
        F: FnOnce(&T, &T) -> Ordering,
    {
        match (&self.kind, &other.kind) {
            (BoundKind::Finite(a), BoundKind::Finite(b)) => {
                compare(a, b).then_with(|| self.offset().cmp(&other.offset()))
            }
            (a, b) => a.rank().cmp(&b.rank()),
        }
    }
}

impl<T> Bound<T> {
    fn write_with<F>(&self, f: &mut fmt::Formatter<'_>, value: F) -> fmt::Result
    where
        F: FnOnce(&T, &mut fmt::Formatter<'_>) -> fmt::Result,
    {
        let write_value = |f: &mut fmt::Formatter<'_>| match &self.kind {
            BoundKind::NegativeInfinity => write!(f, "-infinity"),
            BoundKind::Finite(v) => value(v, f),
            BoundKind::PositiveInfinity => write!(f, "infinity"),
        };
        match self.role {
            Role::Lower => {
                write!(f, "{}", if self.inclusive { "[" } else { "(" })?;
                write_value(f)
            }
            Role::Upper => {
                write_value(f)?;
                write!(f, "{}", if self.inclusive { "]" } else { ")" })
            }
        }
    }
}

impl<T: fmt::Display> fmt::Display for Bound<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_with(f, |v, f| write!(f, "{}", v))
    }
}

impl<T: fmt::Debug> fmt::Debug for Bound<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_with(f, |v, f| write!(f, "{:?}", v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    fn cmp(a: &Bound<i32>, b: &Bound<i32>) -> Ordering {
        a.cmp_by(b, i32::cmp)
    }

    #[test]
    fn test_infinite_bounds_are_exclusive() {
        let b = Bound::<i32>::unbounded(Role::Lower).with_inclusive(true);
        assert!(!b.is_inclusive());
        assert!(b.is_infinite());
        assert_eq!(b.value(), None);
    }

    #[test]
    fn test_order_at_same_point() {
        let before = Bound::upper(5, false);
        let at_lower = Bound::lower(5, true);
        let at_upper = Bound::upper(5, true);
        let after = Bound::lower(5, false);

        assert_eq!(cmp(&before, &at_lower), Ordering::Less);
        assert_eq!(cmp(&at_lower, &at_upper), Ordering::Equal);
        assert_eq!(cmp(&at_upper, &after), Ordering::Less);
        assert_eq!(cmp(&after, &before), Ordering::Greater);
    }

    #[test]
    fn test_exclusive_same_role_equal() {
        assert_eq!(cmp(&Bound::lower(3, false), &Bound::lower(3, false)), Ordering::Equal);
        assert_eq!(cmp(&Bound::upper(3, false), &Bound::upper(3, false)), Ordering::Equal);
    }

    #[test]
    fn test_value_dominates_polarity() {
        assert_eq!(cmp(&Bound::lower(4, false), &Bound::upper(5, false)), Ordering::Less);
        assert_eq!(cmp(&Bound::upper(6, false), &Bound::lower(5, false)), Ordering::Greater);
    }

    #[test]
    fn test_infinities() {
        let neg = Bound::negative_infinity(Role::Upper);
        let pos = Bound::positive_infinity(Role::Lower);
        let mid = Bound::lower(i32::MIN, true);

        assert_eq!(cmp(&neg, &mid), Ordering::Less);
        assert_eq!(cmp(&pos, &mid), Ordering::Greater);
        assert_eq!(cmp(&neg, &Bound::unbounded(Role::Lower)), Ordering::Equal);
        assert_eq!(cmp(&pos, &Bound::unbounded(Role::Upper)), Ordering::Equal);
    }

    #[test]
    fn test_display() {
        assert_eq!(Bound::lower(1, true).to_string(), "[1");
        assert_eq!(Bound::upper(2, false).to_string(), "2)");
        assert_eq!(Bound::<i32>::unbounded(Role::Lower).to_string(), "(-infinity");
        assert_eq!(Bound::<i32>::unbounded(Role::Upper).to_string(), "infinity)");
    }

    #[test]
    fn test_debug_uses_literal_notation() {
        assert_eq!(format!("{:?}", Bound::lower(1, false)), "(1");
        assert_eq!(format!("{:?}", Bound::upper("a", true)), "\"a\"]");
        assert_eq!(format!("{:?}", Bound::<i32>::unbounded(Role::Lower)), "(-infinity");
    }
}
