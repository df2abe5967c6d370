use std::cmp::Ordering;
use std::fmt;

use crate::bound::{Bound, BoundKind, Role};

/// A pair of bounds `(lower, upper)`.
///
/// An `Interval` does not validate its bounds on its own, since that needs a
/// comparator. Use [`DomainDescriptor::interval`][crate::domain::DomainDescriptor::interval]
/// to build a checked one.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Interval<T> {
    lower: Bound<T>,
    upper: Bound<T>,
}

impl<T> Interval<T> {
    /// Creates an interval, fixing the roles of the two bounds.
    pub fn new(lower: Bound<T>, upper: Bound<T>) -> Self {
        Self {
            lower: lower.with_role(Role::Lower),
            upper: upper.with_role(Role::Upper),
        }
    }

    /// Half-open interval `[lower, upper)`.
    pub fn closed_open(lower: T, upper: T) -> Self {
        Self::new(Bound::lower(lower, true), Bound::upper(upper, false))
    }

    /// Closed interval `[lower, upper]`.
    pub fn closed(lower: T, upper: T) -> Self {
        Self::new(Bound::lower(lower, true), Bound::upper(upper, true))
    }

    /// Open interval `(lower, upper)`.
    pub fn open(lower: T, upper: T) -> Self {
        Self::new(Bound::lower(lower, false), Bound::upper(upper, false))
    }

    /// The whole domain `(-infinity, infinity)`.
    pub fn unbounded() -> Self {
        Self::new(Bound::unbounded(Role::Lower), Bound::unbounded(Role::Upper))
    }

    pub fn lower(&self) -> &Bound<T> {
        &self.lower
    }

    pub fn upper(&self) -> &Bound<T> {
        &self.upper
    }

    pub fn into_bounds(self) -> (Bound<T>, Bound<T>) {
        (self.lower, self.upper)
    }

    /// Checks whether the interval contains no point.
    ///
    /// This is the case when both bounds are finite and either meet without
    /// both being inclusive, or are inverted. Inverted intervals only come out
    /// of canonicalizing something like `(3,3)` over the integers.
    pub fn is_empty_by<F>(&self, compare: F) -> bool
    where
        F: FnOnce(&T, &T) -> Ordering,
    {
        match (self.lower.value(), self.upper.value()) {
            (Some(lo), Some(hi)) => match compare(lo, hi) {
                Ordering::Less => false,
                Ordering::Equal => !(self.lower.is_inclusive() && self.upper.is_inclusive()),
                Ordering::Greater => true,
            },
            _ => false,
        }
    }
}

impl<T> Interval<T> {
    /// Writes range-literal text. Infinite bounds are left empty.
    fn write_with<F>(&self, f: &mut fmt::Formatter<'_>, value: F) -> fmt::Result
    where
        F: Fn(&T, &mut fmt::Formatter<'_>) -> fmt::Result,
    {
        write!(f, "{}", if self.lower.is_inclusive() { "[" } else { "(" })?;
        if let BoundKind::Finite(v) = self.lower.kind() {
            value(v, f)?;
        }
        write!(f, ",")?;
        if let BoundKind::Finite(v) = self.upper.kind() {
            value(v, f)?;
        }
        write!(f, "{}", if self.upper.is_inclusive() { "]" } else { ")" })
    }
}

impl<T: fmt::Display> fmt::Display for Interval<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_with(f, |v, f| write!(f, "{}", v))
    }
}

impl<T: fmt::Debug> fmt::Debug for Interval<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_with(f, |v, f| write!(f, "{:?}", v))
    }
}
