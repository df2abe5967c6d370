//! Row-at-a-time aggregate driver.
//!
//! Query engines call an aggregate once per row, passing every argument anew.
//! For coverage checks, each row carries `(candidate, target)`, where both may
//! be null and the target is meant to be the same on every row of the group.
//! [`CoversWithoutGaps`] adapts [`CoverageAccumulator`] to that convention:
//! the state is created lazily from the first row's target, later rows are
//! checked against it, and null candidates are skipped.

use std::fmt;

use log::debug;

use crate::coverage::CoverageAccumulator;
use crate::domain::DomainDescriptor;
use crate::error::CoverageError;
use crate::interval::Interval;

pub struct CoversWithoutGaps<T> {
    domain: DomainDescriptor<T>,
    state: Option<CoverageAccumulator<T>>,
    rows: usize,
}

impl<T> CoversWithoutGaps<T> {
    pub fn new(domain: DomainDescriptor<T>) -> Self {
        Self {
            domain,
            state: None,
            rows: 0,
        }
    }

    /// Number of rows passed to [`transition`][Self::transition] so far.
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn accumulator(&self) -> Option<&CoverageAccumulator<T>> {
        self.state.as_ref()
    }

    /// Returns the group result.
    ///
    /// A group that saw no rows at all has no target to measure against, so
    /// its result is null.
    pub fn finish(&self) -> Option<bool> {
        self.state.as_ref().and_then(|acc| acc.finalize())
    }
}

impl<T: Clone + fmt::Debug> CoversWithoutGaps<T> {
    /// Processes one row of the group.
    ///
    /// # Errors
    ///
    /// - [`CoverageError::TargetNotConstant`] if `target` differs from the one
    ///   seen on the first row. Once the answer is known, rows are no longer
    ///   inspected at all.
    /// - [`CoverageError::UnsortedInput`] and [`CoverageError::OutOfRange`]
    ///   from the accumulator.
    pub fn transition(&mut self, candidate: Option<&Interval<T>>, target: Option<&Interval<T>>) -> Result<(), CoverageError> {
        self.rows += 1;

        if self.state.is_none() {
            debug!("transition: first row, target = {}", DisplayTarget(target));
            self.state = Some(CoverageAccumulator::new(target.cloned(), self.domain)?);
        } else if let Some(acc) = &self.state {
            if acc.is_finished() {
                return Ok(());
            }
            if !self.same_target(acc, target) {
                return Err(CoverageError::TargetNotConstant);
            }
        }

        let (Some(candidate), Some(acc)) = (candidate, self.state.as_mut()) else {
            return Ok(());
        };
        acc.accumulate(candidate)
    }

    fn same_target(&self, acc: &CoverageAccumulator<T>, target: Option<&Interval<T>>) -> bool {
        match (acc.target(), target) {
            (None, None) => true,
            // A target without canonical form can never equal the held one.
            (Some(held), Some(given)) => match self.domain.canonicalize(given.clone()) {
                Ok(given) => self.domain.same_interval(held, &given),
                Err(_) => false,
            },
            _ => false,
        }
    }
}

struct DisplayTarget<'a, T>(Option<&'a Interval<T>>);

impl<T: fmt::Debug> fmt::Display for DisplayTarget<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(interval) => write!(f, "{:?}", interval),
            None => write!(f, "null"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    fn driver() -> CoversWithoutGaps<i32> {
        CoversWithoutGaps::new(DomainDescriptor::<i32>::integer())
    }

    #[test]
    fn test_no_rows_is_null() {
        let agg = driver();
        assert_eq!(agg.rows(), 0);
        assert!(agg.accumulator().is_none());
        assert_eq!(agg.finish(), None);
    }

    #[test]
    fn test_rows() {
        let target = Interval::closed_open(10, 20);
        let mut agg = driver();
        agg.transition(Some(&Interval::closed_open(8, 12)), Some(&target)).unwrap();
        agg.transition(None, Some(&target)).unwrap();
        agg.transition(Some(&Interval::closed_open(12, 20)), Some(&target)).unwrap();
        assert_eq!(agg.rows(), 3);
        assert_eq!(agg.finish(), Some(true));
    }

    #[test]
    fn test_equivalent_target_spelling_is_accepted() {
        let mut agg = driver();
        agg.transition(Some(&Interval::closed_open(1, 3)), Some(&Interval::closed(1, 9))).unwrap();
        agg.transition(Some(&Interval::closed_open(3, 10)), Some(&Interval::closed_open(1, 10)))
            .unwrap();
        assert_eq!(agg.finish(), Some(true));
    }

    #[test]
    fn test_target_change_rejected() {
        let mut agg = driver();
        agg.transition(Some(&Interval::closed_open(1, 3)), Some(&Interval::closed_open(1, 9)))
            .unwrap();
        let err = agg
            .transition(Some(&Interval::closed_open(3, 9)), Some(&Interval::closed_open(1, 8)))
            .unwrap_err();
        assert_eq!(err, CoverageError::TargetNotConstant);

        let err = agg.transition(Some(&Interval::closed_open(3, 9)), None).unwrap_err();
        assert_eq!(err, CoverageError::TargetNotConstant);
    }

    #[test]
    fn test_finished_group_skips_target_check() {
        let mut agg = driver();
        agg.transition(Some(&Interval::closed_open(5, 9)), Some(&Interval::closed_open(1, 9)))
            .unwrap();
        assert!(agg.accumulator().unwrap().is_finished());
        agg.transition(None, Some(&Interval::closed_open(100, 200))).unwrap();
        assert_eq!(agg.finish(), Some(false));
    }

    #[test]
    fn test_null_target() {
        let mut agg = driver();
        agg.transition(Some(&Interval::closed_open(1, 3)), None).unwrap();
        agg.transition(Some(&Interval::closed_open(0, 3)), Some(&Interval::closed_open(1, 3)))
            .unwrap();
        assert_eq!(agg.finish(), None);
    }

    #[test]
    fn test_target_out_of_range() {
        let mut agg = driver();
        let err = agg
            .transition(Some(&Interval::closed_open(0, 5)), Some(&Interval::closed(0, i32::MAX)))
            .unwrap_err();
        assert!(matches!(err, CoverageError::OutOfRange { .. }));
        assert!(agg.accumulator().is_none());

        let mut agg = driver();
        agg.transition(Some(&Interval::closed_open(0, 5)), Some(&Interval::closed_open(0, 10)))
            .unwrap();
        let err = agg
            .transition(Some(&Interval::closed_open(5, 10)), Some(&Interval::closed(0, i32::MAX)))
            .unwrap_err();
        assert_eq!(err, CoverageError::TargetNotConstant);
    }
}
