use thiserror::Error;

use crate::interval::Interval;

/// Errors surfaced by [`Interval`] and [`crate::IntegerSet`] operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error<T> {
    /// Union or intersection was requested between two intervals that do
    /// not share any integer, so the result is not a single interval.
    #[error("intervals {0} and {1} don't overlap")]
    Unrelated(Interval<T>, Interval<T>),

    /// The element asked to be removed is not in the set.
    #[error("element {0} not found in set")]
    NotFound(T),

    /// An element was requested from a set with no elements.
    #[error("set is empty")]
    Empty,
}
