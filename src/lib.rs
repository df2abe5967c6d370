//! # coverage-rs: gap-free interval coverage in Rust
//!
//! **`coverage-rs`** implements the aggregate at the heart of temporal integrity checks:
//! given a *target* interval and a stream of *candidate* intervals sorted by their lower bounds,
//! decide whether the candidates cover every point of the target.
//!
//! Temporal foreign keys are the typical use. A referencing row valid over `[2024-01-01, 2024-06-01)`
//! is only allowed if the referenced rows, taken together, are valid over that whole period.
//! Overlaps between the referenced rows do not matter. A single missing day does.
//!
//! ## Key Features
//!
//! - **Streaming**: The [`CoverageAccumulator`][crate::coverage::CoverageAccumulator] is a fold with O(1) state.
//!   It stops looking at input as soon as the answer is known.
//! - **Three-valued**: A null target yields a null result; an empty target is covered vacuously.
//! - **Exact bounds**: Inclusive/exclusive bounds and infinities are handled precisely.
//!   Both discrete domains (integers, dates) and continuous ones (decimals, timestamps) are supported.
//! - **Order checking**: Out-of-order input is reported as an error instead of silently yielding a wrong answer.
//!
//! ## Basic Usage
//!
//! ```rust
//! use coverage_rs::coverage::CoverageAccumulator;
//! use coverage_rs::domain::DomainDescriptor;
//! use coverage_rs::interval::Interval;
//!
//! // 1. Describe the domain: integers are discrete.
//! let domain = DomainDescriptor::<i32>::integer();
//!
//! // 2. Start a group with the target interval.
//! let mut acc = CoverageAccumulator::new(Some(Interval::closed(1, 10)), domain).unwrap();
//!
//! // 3. Feed candidates in ascending order of their lower bounds.
//! for candidate in [Interval::closed(1, 5), Interval::closed(6, 10)] {
//!     if acc.is_finished() {
//!         break;
//!     }
//!     acc.accumulate(&candidate).unwrap();
//! }
//!
//! // 4. Read the result.
//! assert_eq!(acc.finalize(), Some(true));
//! ```
//!
//! ## Core Components
//!
//! - **[`bound`]** and **[`interval`]**: Value types for endpoints and intervals.
//! - **[`domain`]**: The [`DomainDescriptor`][crate::domain::DomainDescriptor] (comparator plus discreteness).
//! - **[`coverage`]**: The accumulator itself and a one-call [`covers_without_gaps`][crate::coverage::covers_without_gaps] fold.
//! - **[`aggregate`]**: A row-at-a-time driver following the usual aggregate calling convention.
//! - **[`range_type`]**, **[`literal`]**: Built-in range types and range literal parsing.

pub mod aggregate;
pub mod bound;
pub mod coverage;
pub mod domain;
pub mod error;
pub mod interval;
pub mod literal;
pub mod numeric;
pub mod range_type;
pub mod value;
