//! Domain descriptors.
//!
//! A [`DomainDescriptor`] is the capability bundle the accumulator needs from the
//! value type: a total order and, for discrete domains, a successor function.
//! It is built once per aggregation and copied freely (it holds only function
//! pointers).
//!
//! # Discrete vs continuous
//!
//! In a discrete domain (integers, dates) every value has a next value, so
//! `[1,5]` and `[1,6)` denote the same set of points. Such domains have a
//! canonical form, which [`DomainDescriptor::canonicalize`] produces:
//! exclusive lower bounds and inclusive upper bounds are shifted to the
//! successor. A bound that would need the successor of the domain maximum is
//! out of range. In a continuous domain (reals, timestamps, decimals) bounds are
//! kept exactly as given.
//!
//! # Examples
//!
//! ```
//! use coverage_rs::domain::DomainDescriptor;
//! use coverage_rs::interval::Interval;
//!
//! let ints = DomainDescriptor::<i32>::integer();
//! assert!(ints.has_discrete_successor());
//! assert_eq!(ints.canonicalize(Interval::closed(1, 5)).unwrap(), Interval::closed_open(1, 6));
//! assert!(ints.canonicalize(Interval::closed(1, i32::MAX)).is_err());
//!
//! let reals = DomainDescriptor::<f64>::real();
//! assert!(!reals.has_discrete_successor());
//! ```

use std::cmp::Ordering;
use std::fmt;

use crate::bound::{Bound, BoundKind, Role};
use crate::error::CoverageError;
use crate::interval::Interval;

/// Three-way comparator over domain values.
pub type Comparator<T> = fn(&T, &T) -> Ordering;

/// Returns the next value of a discrete domain, or `None` at the domain maximum.
pub type Successor<T> = fn(&T) -> Option<T>;

pub struct DomainDescriptor<T> {
    compare: Comparator<T>,
    successor: Option<Successor<T>>,
}

impl<T> Clone for DomainDescriptor<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for DomainDescriptor<T> {}

impl<T> fmt::Debug for DomainDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DomainDescriptor")
            .field("has_discrete_successor", &self.has_discrete_successor())
            .finish()
    }
}

// Constructors
impl<T> DomainDescriptor<T> {
    pub fn new(compare: Comparator<T>, successor: Option<Successor<T>>) -> Self {
        Self { compare, successor }
    }

    /// A continuous domain: no successor, bounds kept verbatim.
    pub fn continuous(compare: Comparator<T>) -> Self {
        Self::new(compare, None)
    }

    /// A discrete domain with the given successor function.
    pub fn discrete(compare: Comparator<T>, successor: Successor<T>) -> Self {
        Self::new(compare, Some(successor))
    }
}

impl<T: Ord> DomainDescriptor<T> {
    /// A continuous domain ordered by `T`'s own `Ord`.
    pub fn ordered() -> Self {
        Self::continuous(<T as Ord>::cmp)
    }
}

macro_rules! impl_integer_domain {
    ($($t:ty),*) => {
        $(
            impl DomainDescriptor<$t> {
                /// The discrete domain of machine integers.
                pub fn integer() -> Self {
                    Self::discrete(<$t as Ord>::cmp, |v| v.checked_add(1))
                }
            }
        )*
    };
}

impl_integer_domain!(i16, i32, i64, u32, u64);

impl DomainDescriptor<f64> {
    /// The continuous domain of floats, ordered by [`f64::total_cmp`].
    pub fn real() -> Self {
        Self::continuous(f64::total_cmp)
    }
}

// Queries
impl<T> DomainDescriptor<T> {
    pub fn compare(&self, a: &T, b: &T) -> Ordering {
        (self.compare)(a, b)
    }

    pub fn has_discrete_successor(&self) -> bool {
        self.successor.is_some()
    }

    pub fn successor(&self, value: &T) -> Option<T> {
        self.successor.and_then(|succ| succ(value))
    }

    /// Compares two bounds with this domain's comparator.
    pub fn cmp_bounds(&self, a: &Bound<T>, b: &Bound<T>) -> Ordering {
        a.cmp_by(b, self.compare)
    }

    pub fn is_empty(&self, interval: &Interval<T>) -> bool {
        interval.is_empty_by(self.compare)
    }

    /// Checks whether two intervals denote the same set of points.
    ///
    /// Both intervals are expected to be canonical already.
    pub fn same_interval(&self, a: &Interval<T>, b: &Interval<T>) -> bool {
        match (self.is_empty(a), self.is_empty(b)) {
            (true, true) => true,
            (false, false) => {
                self.cmp_bounds(a.lower(), b.lower()) == Ordering::Equal
                    && self.cmp_bounds(a.upper(), b.upper()) == Ordering::Equal
            }
            _ => false,
        }
    }
}

impl<T: fmt::Debug> DomainDescriptor<T> {
    /// Brings an interval into the canonical form of a discrete domain.
    ///
    /// `(v` becomes `[succ(v)` and `v]` becomes `succ(v))`. Continuous domains
    /// return the interval unchanged.
    ///
    /// Fails with [`CoverageError::OutOfRange`] if `v` is the domain maximum,
    /// so that a discrete interval held anywhere in the crate is always
    /// canonical.
    pub fn canonicalize(&self, interval: Interval<T>) -> Result<Interval<T>, CoverageError> {
        if self.successor.is_none() {
            return Ok(interval);
        }
        let (lower, upper) = interval.into_bounds();

        let lower = match lower.value() {
            Some(v) if !lower.is_inclusive() => match self.successor(v) {
                Some(next) => Bound::lower(next, true),
                None => return Err(Self::out_of_range(&lower)),
            },
            _ => lower,
        };
        let upper = match upper.value() {
            Some(v) if upper.is_inclusive() => match self.successor(v) {
                Some(next) => Bound::upper(next, false),
                None => return Err(Self::out_of_range(&upper)),
            },
            _ => upper,
        };

        Ok(Interval::new(lower, upper))
    }

    fn out_of_range(bound: &Bound<T>) -> CoverageError {
        CoverageError::OutOfRange {
            bound: format!("{:?}", bound),
        }
    }

    /// Builds a checked, canonical interval.
    ///
    /// Fails with [`CoverageError::InvertedBounds`] if the lower bound lies above
    /// the upper one, or if a bound sits at the wrong infinity, and with
    /// [`CoverageError::OutOfRange`] as described in [`canonicalize`][Self::canonicalize].
    pub fn interval(&self, lower: Bound<T>, upper: Bound<T>) -> Result<Interval<T>, CoverageError> {
        let lower = lower.with_role(Role::Lower);
        let upper = upper.with_role(Role::Upper);

        let inverted = match (lower.kind(), upper.kind()) {
            (BoundKind::PositiveInfinity, _) | (_, BoundKind::NegativeInfinity) => true,
            (BoundKind::Finite(lo), BoundKind::Finite(hi)) => self.compare(lo, hi) == Ordering::Greater,
            _ => false,
        };
        if inverted {
            return Err(CoverageError::InvertedBounds {
                lower: format!("{:?}", lower),
                upper: format!("{:?}", upper),
            });
        }

        self.canonicalize(Interval::new(lower, upper))
    }
}
