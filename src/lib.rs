//! Sparse sets of integers ([`integer_set::IntegerSet`]) stored as sorted, disjoint
//! inclusive intervals, together with the orientation-preserving interval type they
//! are built from ([`interval::Interval`]).
//!
//! A set never materializes its elements: union, intersection, difference and
//! symmetric difference are computed interval by interval, so a set spanning
//! billions of integers costs no more than one holding a handful. Each operation
//! comes in a copying form (`union`, `|`) and an in-place form (`union_in_place`,
//! `|=`).
//!
//! Intervals keep the direction they were built with: `Interval::new(10, 0)` is a
//! decreasing interval distinct from `Interval::new(0, 10)`, and intervals derived
//! from it stay decreasing. Sets ignore orientation and store every member
//! increasing.
//!
//! ```
//! use sparse_integer_set::{IntegerSet, Interval};
//!
//! let mut free = IntegerSet::from([(0, 4_000_000_000i64)]);
//! free -= IntegerSet::from([(1_000, 1_999), (5_000, 5_999)]);
//! assert_eq!(free.len(), 4_000_000_001 - 2_000);
//! assert!(free.contains(999) && !free.contains(1_500));
//!
//! let first = free.pop().unwrap();
//! assert_eq!(first, 0);
//!
//! let remainder = Interval::new(10, 0) - Interval::new(20, 5);
//! assert_eq!(remainder.as_slice(), &[Interval::new(4, 0)]);
//! ```
//!
//! Any primitive integer type satisfying [`num_traits::PrimInt`] can be used as
//! endpoint type.

mod error;
/// Orientation-preserving inclusive intervals.
pub mod interval;
/// Sparse integer sets built from disjoint intervals.
pub mod integer_set;

pub use self::error::Error;
pub use self::integer_set::IntegerSet;
pub use self::interval::{Interval, Pieces, SymmetricPieces};
