//! The coverage accumulator.
//!
//! [`CoverageAccumulator`] answers one question: do the candidate intervals,
//! fed in ascending order of their lower bounds, cover a fixed target interval
//! without any gap? It works as a streaming fold with O(1) state:
//!
//! - `covered_to`: the upper end of the contiguous coverage built so far,
//!   starting at the target's lower bound;
//! - `previous_lower`: the lower bound of the last accepted candidate, used to
//!   reject out-of-order input;
//! - a handful of flags recording whether the answer is already known.
//!
//! The result is three-valued: `None` when the target itself is null, otherwise
//! `Some(covered)`.
//!
//! # Transition rule
//!
//! For each candidate (skipped entirely once the answer is known):
//!
//! 1. A candidate ending before the target's start is ignored. Ending exactly
//!    at it counts only if both bounds include that point.
//! 2. The first relevant candidate must start at or before the target's start.
//!    Every later one must start at or before `covered_to`. Starting past it
//!    is a gap. Starting exactly at it with both bounds exclusive is a gap in a
//!    continuous domain only.
//! 3. A candidate starting before the previous one is an
//!    [`UnsortedInput`][CoverageError::UnsortedInput] error.
//! 4. `covered_to` is pushed to the candidate's upper bound if that lies further.
//! 5. Once `covered_to` reaches a finite target end, the target is covered.
//!
//! # Examples
//!
//! ```
//! use coverage_rs::coverage::CoverageAccumulator;
//! use coverage_rs::domain::DomainDescriptor;
//! use coverage_rs::interval::Interval;
//!
//! let target = Interval::closed_open(10, 20);
//! let mut acc = CoverageAccumulator::new(Some(target), DomainDescriptor::<i32>::integer()).unwrap();
//! acc.accumulate(&Interval::closed_open(8, 12)).unwrap();
//! acc.accumulate(&Interval::closed_open(12, 18)).unwrap();
//! assert_eq!(acc.finalize(), Some(false)); // nothing covers [18,20)
//! ```

use std::borrow::{Borrow, Cow};
use std::cmp::Ordering;
use std::fmt;

use log::{debug, trace};

use crate::bound::{Bound, BoundKind, Role};
use crate::domain::DomainDescriptor;
use crate::error::CoverageError;
use crate::interval::Interval;

/// Observable state of a [`CoverageAccumulator`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum CoverageState {
    /// The target is null. Terminal, the result is null.
    Null,
    /// The target is empty. Terminal, the result is `true`.
    Empty,
    /// Still consuming candidates.
    ///
    /// [`CoverageAccumulator::state`] keeps reporting this after `finalize`,
    /// which does not change the accumulator. Use
    /// [`CoverageAccumulator::outcome`] for the resolved state.
    Gathering,
    /// A gap was found. Terminal, the result is `false`.
    Gap,
    /// The target is covered. Terminal, the result is `true`.
    FullyCovered,
}

impl CoverageState {
    pub fn is_terminal(self) -> bool {
        !matches!(self, CoverageState::Gathering)
    }
}

#[derive(Debug, Clone)]
pub struct CoverageAccumulator<T> {
    domain: DomainDescriptor<T>,
    target: Option<Interval<T>>,
    target_empty: bool,
    covered_to: Bound<T>,
    previous_lower: Bound<T>,
    started: bool,
    finished: bool,
    result: bool,
    result_is_null: bool,
}

impl<T: fmt::Debug> CoverageAccumulator<T> {
    /// Creates an accumulator for one aggregation group.
    ///
    /// A `None` target makes the result null. An empty target is covered
    /// vacuously. Either way, every candidate is then ignored.
    ///
    /// # Errors
    ///
    /// [`CoverageError::OutOfRange`] if the target has no canonical form in a
    /// discrete domain, see [`DomainDescriptor::canonicalize`].
    pub fn new(target: Option<Interval<T>>, domain: DomainDescriptor<T>) -> Result<Self, CoverageError> {
        let target = target.map(|t| domain.canonicalize(t)).transpose()?;
        let result_is_null = target.is_none();
        let target_empty = target.as_ref().is_some_and(|t| domain.is_empty(t));

        Ok(Self {
            domain,
            target,
            target_empty,
            covered_to: Bound::negative_infinity(Role::Upper),
            previous_lower: Bound::negative_infinity(Role::Lower),
            started: false,
            finished: result_is_null || target_empty,
            result: target_empty,
            result_is_null,
        })
    }
}

impl<T> CoverageAccumulator<T> {
    pub fn domain(&self) -> &DomainDescriptor<T> {
        &self.domain
    }

    /// The target, in canonical form.
    pub fn target(&self) -> Option<&Interval<T>> {
        self.target.as_ref()
    }

    /// Upper end of the contiguous coverage reached so far.
    pub fn covered_to(&self) -> &Bound<T> {
        &self.covered_to
    }

    /// Whether at least one relevant candidate has been accepted.
    pub fn has_started(&self) -> bool {
        self.started
    }

    /// Whether the answer is known. Further candidates are no-ops, so the
    /// caller may stop feeding them.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Current state. Stays [`Gathering`][CoverageState::Gathering] until a
    /// candidate decides the answer.
    pub fn state(&self) -> CoverageState {
        if self.result_is_null {
            CoverageState::Null
        } else if self.target_empty {
            CoverageState::Empty
        } else if !self.finished {
            CoverageState::Gathering
        } else if self.result {
            CoverageState::FullyCovered
        } else {
            CoverageState::Gap
        }
    }

    /// Produces the three-valued result.
    ///
    /// If the stream ran out before a decision, the target counts as covered
    /// only if `covered_to` reaches its upper bound. For an unbounded target
    /// end, that means a candidate reached positive infinity.
    pub fn finalize(&self) -> Option<bool> {
        if self.result_is_null {
            return None;
        }
        if self.target_empty {
            return Some(true);
        }
        if self.finished {
            return Some(self.result);
        }
        let Some(target) = &self.target else {
            return None;
        };
        Some(self.started && self.domain.cmp_bounds(&self.covered_to, target.upper()) != Ordering::Less)
    }

    /// The state `finalize` settles on: like [`state`][Self::state], except
    /// that `Gathering` resolves to `FullyCovered` or `Gap`.
    pub fn outcome(&self) -> CoverageState {
        match (self.state(), self.finalize()) {
            (CoverageState::Gathering, Some(true)) => CoverageState::FullyCovered,
            (CoverageState::Gathering, _) => CoverageState::Gap,
            (state, _) => state,
        }
    }

    /// Checks whether `lower` starts past the coverage reached so far.
    fn leaves_gap(&self, lower: &Bound<T>) -> bool {
        let covered = &self.covered_to;
        match (covered.value(), lower.value()) {
            (Some(c), Some(l)) => match self.domain.compare(l, c) {
                Ordering::Greater => true,
                Ordering::Equal => {
                    !lower.is_inclusive() && !covered.is_inclusive() && !self.domain.has_discrete_successor()
                }
                Ordering::Less => false,
            },
            (None, _) => {
                matches!(covered.kind(), BoundKind::NegativeInfinity)
                    && !matches!(lower.kind(), BoundKind::NegativeInfinity)
            }
            (Some(_), None) => matches!(lower.kind(), BoundKind::PositiveInfinity),
        }
    }
}

impl<T: Clone + fmt::Debug> CoverageAccumulator<T> {
    /// Folds one candidate into the state.
    ///
    /// Candidates must arrive in non-decreasing order of their lower bounds.
    /// Null candidates are simply not passed in. Empty candidates are skipped.
    ///
    /// # Errors
    ///
    /// [`CoverageError::UnsortedInput`] if the candidate starts before the
    /// previously accepted one. The group's evaluation must then be abandoned.
    ///
    /// [`CoverageError::OutOfRange`] if the candidate has no canonical form in a
    /// discrete domain.
    pub fn accumulate(&mut self, candidate: &Interval<T>) -> Result<(), CoverageError> {
        if self.finished {
            return Ok(());
        }
        let Some(target) = &self.target else {
            return Ok(());
        };
        let domain = self.domain;

        let candidate = if domain.has_discrete_successor() {
            Cow::Owned(domain.canonicalize(candidate.clone())?)
        } else {
            Cow::Borrowed(candidate)
        };
        trace!("accumulate(candidate = {:?}, covered_to = {:?})", candidate, self.covered_to);

        if domain.is_empty(&candidate) {
            debug!("accumulate: skipping empty candidate {:?}", candidate);
            return Ok(());
        }

        // Candidates ending before the target starts cannot contribute.
        if !Self::reaches(&domain, candidate.upper(), target.lower()) {
            if self.started {
                self.check_sorted(candidate.lower())?;
            }
            debug!("accumulate: ignoring {:?} before target start {:?}", candidate, target.lower());
            return Ok(());
        }

        let gap = if self.started {
            self.leaves_gap(candidate.lower())
        } else {
            domain.cmp_bounds(candidate.lower(), target.lower()) == Ordering::Greater
        };
        if gap {
            debug!("accumulate: gap between {:?} and {:?}", self.covered_to, candidate.lower());
            self.finished = true;
            self.result = false;
            return Ok(());
        }

        if self.started {
            self.check_sorted(candidate.lower())?;
        }

        if domain.cmp_bounds(candidate.upper(), &self.covered_to) == Ordering::Greater {
            // Discrete domains store the edge as inclusive, so that a canonical
            // `5)` meets the next `[5`.
            let inclusive = domain.has_discrete_successor() || candidate.upper().is_inclusive();
            self.covered_to = candidate.upper().clone().with_inclusive(inclusive);
            debug!("accumulate: extended coverage to {:?}", self.covered_to);
        }
        self.previous_lower = candidate.lower().clone();
        self.started = true;

        if target.upper().is_finite() && domain.cmp_bounds(&self.covered_to, target.upper()) != Ordering::Less {
            debug!("accumulate: target {:?} is covered", target);
            self.result = true;
            self.finished = true;
        }

        Ok(())
    }

    /// Whether an interval ending at `upper` covers anything from `lower` on.
    ///
    /// Unlike plain bound ordering, an inclusive upper bound meets an inclusive
    /// lower bound at the same point: both contain it.
    fn reaches(domain: &DomainDescriptor<T>, upper: &Bound<T>, lower: &Bound<T>) -> bool {
        match domain.cmp_bounds(upper, lower) {
            Ordering::Greater => true,
            Ordering::Equal => upper.is_finite() && upper.is_inclusive() && lower.is_inclusive(),
            Ordering::Less => false,
        }
    }

    fn check_sorted(&self, lower: &Bound<T>) -> Result<(), CoverageError> {
        if self.domain.cmp_bounds(lower, &self.previous_lower) == Ordering::Less {
            return Err(CoverageError::UnsortedInput {
                previous: format!("{:?}", self.previous_lower),
                current: format!("{:?}", lower),
            });
        }
        Ok(())
    }
}

/// Runs a whole group through a fresh accumulator.
///
/// Stops consuming `candidates` as soon as the answer is known.
///
/// # Examples
///
/// ```
/// use coverage_rs::coverage::covers_without_gaps;
/// use coverage_rs::domain::DomainDescriptor;
/// use coverage_rs::interval::Interval;
///
/// let reals = DomainDescriptor::<f64>::real();
/// let parts = [Interval::closed_open(0.0, 5.0), Interval::closed_open(5.0, 10.0)];
/// let covered = covers_without_gaps(reals, Some(Interval::closed_open(0.0, 10.0)), &parts).unwrap();
/// assert_eq!(covered, Some(true));
/// ```
pub fn covers_without_gaps<T, I>(
    domain: DomainDescriptor<T>,
    target: Option<Interval<T>>,
    candidates: I,
) -> Result<Option<bool>, CoverageError>
where
    T: Clone + fmt::Debug,
    I: IntoIterator,
    I::Item: Borrow<Interval<T>>,
{
    let mut acc = CoverageAccumulator::new(target, domain)?;
    for candidate in candidates {
        if acc.is_finished() {
            break;
        }
        acc.accumulate(candidate.borrow())?;
    }
    Ok(acc.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    fn ints(target: Interval<i32>) -> CoverageAccumulator<i32> {
        CoverageAccumulator::new(Some(target), DomainDescriptor::<i32>::integer()).unwrap()
    }

    fn reals(target: Interval<f64>) -> CoverageAccumulator<f64> {
        CoverageAccumulator::new(Some(target), DomainDescriptor::<f64>::real()).unwrap()
    }

    #[test]
    fn test_initial_state() {
        let acc = ints(Interval::closed_open(1, 5));
        assert_eq!(acc.state(), CoverageState::Gathering);
        assert!(!acc.has_started());
        assert!(acc.covered_to().is_infinite());
        assert_eq!(acc.finalize(), Some(false));
    }

    #[test]
    fn test_null_and_empty_targets() {
        let acc = CoverageAccumulator::new(None, DomainDescriptor::<i32>::integer()).unwrap();
        assert_eq!(acc.state(), CoverageState::Null);
        assert!(acc.is_finished());

        let acc = ints(Interval::closed_open(3, 3));
        assert_eq!(acc.state(), CoverageState::Empty);
        assert_eq!(acc.finalize(), Some(true));
    }

    #[test]
    fn test_early_completion() {
        let mut acc = ints(Interval::closed_open(0, 10));
        acc.accumulate(&Interval::closed_open(-5, 4)).unwrap();
        assert_eq!(acc.state(), CoverageState::Gathering);
        acc.accumulate(&Interval::closed_open(2, 12)).unwrap();
        assert_eq!(acc.state(), CoverageState::FullyCovered);
        assert!(acc.is_finished());
    }

    #[test]
    fn test_gap_at_start() {
        let mut acc = ints(Interval::closed_open(0, 10));
        acc.accumulate(&Interval::closed_open(1, 10)).unwrap();
        assert_eq!(acc.state(), CoverageState::Gap);
        assert_eq!(acc.finalize(), Some(false));
    }

    #[test]
    fn test_irrelevant_candidates_are_ignored() {
        let mut acc = ints(Interval::closed_open(10, 20));
        acc.accumulate(&Interval::closed_open(0, 5)).unwrap();
        acc.accumulate(&Interval::closed_open(5, 10)).unwrap();
        assert!(!acc.has_started());
        acc.accumulate(&Interval::closed_open(10, 20)).unwrap();
        assert_eq!(acc.finalize(), Some(true));
    }

    #[test]
    fn test_inclusive_touch_at_target_start() {
        let mut acc = reals(Interval::closed_open(10.0, 20.0));
        acc.accumulate(&Interval::closed(0.0, 10.0)).unwrap();
        assert!(acc.has_started());
        acc.accumulate(&Interval::open(10.0, 20.0)).unwrap();
        assert_eq!(acc.finalize(), Some(true));

        let mut acc = reals(Interval::open(10.0, 20.0));
        acc.accumulate(&Interval::closed(0.0, 10.0)).unwrap();
        assert!(!acc.has_started());
    }

    #[test]
    fn test_overlapping_candidates() {
        let mut acc = ints(Interval::closed_open(0, 10));
        acc.accumulate(&Interval::closed_open(0, 8)).unwrap();
        acc.accumulate(&Interval::closed_open(1, 3)).unwrap();
        assert_eq!(acc.covered_to(), &Bound::upper(8, true));
        acc.accumulate(&Interval::closed_open(7, 10)).unwrap();
        assert_eq!(acc.finalize(), Some(true));
    }

    #[test]
    fn test_continuous_keeps_edge_polarity() {
        let mut acc = reals(Interval::closed_open(0.0, 10.0));
        acc.accumulate(&Interval::open(-1.0, 5.0)).unwrap();
        assert_eq!(acc.covered_to(), &Bound::upper(5.0, false));
        acc.accumulate(&Interval::closed(5.0, 6.0)).unwrap();
        assert_eq!(acc.covered_to(), &Bound::upper(6.0, true));
        acc.accumulate(&Interval::open(6.0, 10.0)).unwrap();
        assert_eq!(acc.state(), CoverageState::FullyCovered);
    }

    #[test]
    fn test_continuous_point_gap() {
        let mut acc = reals(Interval::closed_open(0.0, 10.0));
        acc.accumulate(&Interval::open(-1.0, 5.0)).unwrap();
        acc.accumulate(&Interval::open(5.0, 10.0)).unwrap();
        assert_eq!(acc.state(), CoverageState::Gap);
    }

    #[test]
    fn test_discrete_exclusive_edges_meet() {
        let mut acc = ints(Interval::closed(0, 10));
        acc.accumulate(&Interval::closed_open(0, 5)).unwrap();
        acc.accumulate(&Interval::open(4, 11)).unwrap();
        assert_eq!(acc.finalize(), Some(true));
    }

    #[test]
    fn test_empty_candidate_skipped() {
        let mut acc = ints(Interval::closed_open(0, 10));
        acc.accumulate(&Interval::closed_open(0, 6)).unwrap();
        acc.accumulate(&Interval::closed_open(50, 50)).unwrap();
        acc.accumulate(&Interval::closed_open(6, 10)).unwrap();
        assert_eq!(acc.finalize(), Some(true));
    }

    #[test]
    fn test_unbounded_target() {
        let mut acc = ints(Interval::<i32>::unbounded());
        acc.accumulate(&Interval::new(Bound::unbounded(Role::Lower), Bound::upper(0, false)))
            .unwrap();
        acc.accumulate(&Interval::new(Bound::lower(0, true), Bound::unbounded(Role::Upper)))
            .unwrap();
        assert!(!acc.is_finished());
        assert_eq!(acc.finalize(), Some(true));
    }

    #[test]
    fn test_unbounded_target_start_needs_unbounded_candidate() {
        let target = Interval::new(Bound::unbounded(Role::Lower), Bound::upper(10, false));
        let mut acc = ints(target);
        acc.accumulate(&Interval::closed_open(i32::MIN, 10)).unwrap();
        assert_eq!(acc.state(), CoverageState::Gap);
    }

    #[test]
    fn test_unbounded_target_end_not_reached() {
        let target = Interval::new(Bound::lower(0, true), Bound::unbounded(Role::Upper));
        let mut acc = ints(target);
        acc.accumulate(&Interval::closed_open(0, 100)).unwrap();
        assert_eq!(acc.finalize(), Some(false));
    }

    #[test]
    fn test_unsorted_irrelevant_candidate() {
        let mut acc = ints(Interval::closed_open(10, 20));
        acc.accumulate(&Interval::closed_open(5, 12)).unwrap();
        let err = acc.accumulate(&Interval::closed_open(0, 3)).unwrap_err();
        assert!(err.is_unsorted());
    }

    #[test]
    fn test_unsorted_error_message() {
        let mut acc = ints(Interval::closed_open(0, 20));
        acc.accumulate(&Interval::closed_open(0, 12)).unwrap();
        let err = acc.accumulate(&Interval::closed_open(-3, 14)).unwrap_err();
        assert_eq!(
            err,
            CoverageError::UnsortedInput {
                previous: "[0".to_string(),
                current: "[-3".to_string(),
            }
        );
    }

    #[test]
    fn test_fold_stops_early() {
        let candidates = vec![
            Interval::closed_open(0, 10),
            // Out of order, but never looked at.
            Interval::closed_open(-10, 0),
        ];
        let res = covers_without_gaps(DomainDescriptor::<i32>::integer(), Some(Interval::closed_open(0, 10)), &candidates);
        assert_eq!(res, Ok(Some(true)));
    }

    #[test]
    fn test_outcome_resolves_after_stream_ends() {
        let mut acc = ints(Interval::closed_open(0, 10));
        assert_eq!(acc.outcome(), CoverageState::Gap);
        acc.accumulate(&Interval::closed_open(0, 10)).unwrap();
        assert_eq!(acc.outcome(), CoverageState::FullyCovered);

        let mut acc = ints(Interval::new(Bound::lower(0, true), Bound::unbounded(Role::Upper)));
        acc.accumulate(&Interval::new(Bound::lower(-1, true), Bound::unbounded(Role::Upper)))
            .unwrap();
        assert_eq!(acc.finalize(), Some(true));
        assert_eq!(acc.state(), CoverageState::Gathering);
        assert_eq!(acc.outcome(), CoverageState::FullyCovered);

        let acc = CoverageAccumulator::new(None, DomainDescriptor::<i32>::integer()).unwrap();
        assert_eq!(acc.outcome(), CoverageState::Null);
    }

    #[test]
    fn test_target_at_domain_maximum() {
        let err = CoverageAccumulator::new(Some(Interval::closed(0, i32::MAX)), DomainDescriptor::<i32>::integer())
            .unwrap_err();
        assert!(matches!(err, CoverageError::OutOfRange { .. }));

        // `[0,MAX)` leaves MAX itself uncovered.
        let mut acc = ints(Interval::closed_open(0, i32::MAX));
        acc.accumulate(&Interval::closed_open(0, i32::MAX)).unwrap();
        assert_eq!(acc.finalize(), Some(true));
    }

    #[test]
    fn test_candidate_at_domain_maximum() {
        let mut acc = ints(Interval::closed_open(0, 10));
        let err = acc.accumulate(&Interval::closed(0, i32::MAX)).unwrap_err();
        assert_eq!(
            err,
            CoverageError::OutOfRange {
                bound: "2147483647]".to_string()
            }
        );
    }

    #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
    struct Day(u32);

    #[test]
    fn test_values_without_display() {
        let days = DomainDescriptor::discrete(<Day as Ord>::cmp, |d: &Day| d.0.checked_add(1).map(Day));
        let target = Interval::closed(Day(1), Day(10));
        let parts = [Interval::closed(Day(1), Day(5)), Interval::closed(Day(6), Day(10))];
        assert_eq!(covers_without_gaps(days, Some(target.clone()), &parts), Ok(Some(true)));

        let mut acc = CoverageAccumulator::new(Some(target), days).unwrap();
        acc.accumulate(&Interval::closed(Day(1), Day(4))).unwrap();
        let err = acc.accumulate(&Interval::closed(Day(0), Day(4))).unwrap_err();
        assert!(err.is_unsorted());
    }
}
