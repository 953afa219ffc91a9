use std::cmp::{max, min};
use std::fmt;
use std::iter::FusedIterator;
use std::ops::{BitAnd, BitOr, BitXor, RangeInclusive, Sub};

use num_traits::{one, PrimInt};
use smallvec::{smallvec, SmallVec};

use crate::error::Error;

/// The zero, one or two intervals left over by [`Interval::difference`].
pub type Pieces<T> = SmallVec<[Interval<T>; 2]>;

/// The intervals produced by [`Interval::symmetric_difference`]: the pieces of
/// `self - other` followed by the pieces of `other - self`.
pub type SymmetricPieces<T> = SmallVec<[Interval<T>; 4]>;

/// An inclusive, contiguous range of integers that remembers its orientation.
///
/// `Interval::new(0, 10)` and `Interval::new(10, 0)` denote the same integers
/// but are different values: the first is increasing, the second decreasing.
/// Every interval derived from a binary operation takes the orientation of the
/// receiver (the left operand).
///
/// ```
/// use sparse_integer_set::Interval;
///
/// let forward = Interval::new(0, 10);
/// let backward = Interval::new(10, 0);
/// assert_ne!(forward, backward);
/// assert_eq!(forward.len(), backward.len());
///
/// assert_eq!(forward.union(&Interval::new(5, 20)), Ok(Interval::new(0, 20)));
/// assert_eq!(backward.union(&Interval::new(20, 5)), Ok(Interval::new(20, 0)));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Interval<T> {
    start: T,
    end: T,
}

impl<T> fmt::Display for Interval<T>
where
    T: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.start, self.end)
    }
}

impl<T> From<(T, T)> for Interval<T> {
    fn from((start, end): (T, T)) -> Self {
        Interval { start, end }
    }
}

impl<T> From<RangeInclusive<T>> for Interval<T> {
    fn from(range: RangeInclusive<T>) -> Self {
        let (start, end) = range.into_inner();
        Interval { start, end }
    }
}

impl<T> From<Interval<T>> for (T, T) {
    fn from(interval: Interval<T>) -> Self {
        (interval.start, interval.end)
    }
}

impl<T> Interval<T>
where
    T: PrimInt,
{
    /// Creates an interval from its two endpoints. Both are inclusive and any
    /// order is accepted.
    pub fn new(start: T, end: T) -> Self {
        Interval { start, end }
    }

    pub fn start(&self) -> T {
        self.start
    }

    pub fn end(&self) -> T {
        self.end
    }

    /// Smallest integer of the interval, regardless of orientation.
    pub fn lower(&self) -> T {
        min(self.start, self.end)
    }

    /// Largest integer of the interval, regardless of orientation.
    pub fn upper(&self) -> T {
        max(self.start, self.end)
    }

    /// A single-element interval counts as increasing, so `(5, 5) | (0, 10)`
    /// is `(0, 10)`.
    pub fn is_increasing(&self) -> bool {
        self.start <= self.end
    }

    pub fn is_decreasing(&self) -> bool {
        !self.is_increasing()
    }

    /// The same integers with the opposite orientation.
    pub fn reversed(&self) -> Self {
        Interval::new(self.end, self.start)
    }

    /// The same integers, increasing.
    pub fn normalized(&self) -> Self {
        Interval::new(self.lower(), self.upper())
    }

    pub fn contains(&self, value: T) -> bool {
        self.lower() <= value && value <= self.upper()
    }

    /// Returns `true` if both intervals share at least one integer.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.lower() <= other.upper() && other.lower() <= self.upper()
    }

    pub fn is_disjoint(&self, other: &Self) -> bool {
        !self.overlaps(other)
    }

    /// Number of integers in the interval.
    ///
    /// The count is computed in `u128` so that intervals covering the whole
    /// range of a 64-bit type are measured exactly. It saturates at
    /// `u128::MAX` for the one interval that does not fit, `0..=u128::MAX`.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> u128 {
        span_len(self.lower(), self.upper())
    }

    /// Smallest interval covering both operands, oriented like `self`.
    ///
    /// Fails with [`Error::Unrelated`] when the intervals do not overlap, since
    /// their union would not be contiguous. Adjacent intervals such as
    /// `(0, 10)` and `(11, 20)` are not considered overlapping.
    ///
    /// ```
    /// use sparse_integer_set::{Error, Interval};
    ///
    /// let joined = Interval::new(10, 0).union(&Interval::new(0, -10));
    /// assert_eq!(joined, Ok(Interval::new(10, -10)));
    ///
    /// let apart = Interval::new(0, 10).union(&Interval::new(20, 30));
    /// assert!(matches!(apart, Err(Error::Unrelated(..))));
    /// ```
    pub fn union(&self, other: &Self) -> Result<Self, Error<T>> {
        self.validate_overlap(other)?;
        Ok(self.hull(other))
    }

    /// Integers common to both operands, oriented like `self`.
    ///
    /// Fails with [`Error::Unrelated`] when the intervals do not overlap.
    pub fn intersection(&self, other: &Self) -> Result<Self, Error<T>> {
        self.validate_overlap(other)?;
        Ok(self.clip(other))
    }

    /// Integers of `self` that are not in `other`.
    ///
    /// The result holds at most two pieces: the part of `self` below `other`
    /// followed by the part above it. Both pieces keep the orientation of
    /// `self`, and empty pieces are left out. A disjoint `other` leaves `self`
    /// untouched.
    ///
    /// ```
    /// use sparse_integer_set::Interval;
    ///
    /// let pieces = Interval::new(0, 10).difference(&Interval::new(1, 9));
    /// assert_eq!(pieces.as_slice(), &[Interval::new(0, 0), Interval::new(10, 10)]);
    ///
    /// let pieces = Interval::new(10, 0).difference(&Interval::new(20, 5));
    /// assert_eq!(pieces.as_slice(), &[Interval::new(4, 0)]);
    /// ```
    pub fn difference(&self, other: &Self) -> Pieces<T> {
        if !self.overlaps(other) {
            return smallvec![*self];
        }

        let mut pieces = Pieces::new();
        // Nothing lies below T::MIN or above T::MAX, so a failed step means
        // the corresponding remainder is empty.
        if let Some(below) = other.lower().checked_sub(&one()) {
            if self.lower() <= below {
                pieces.push(self.oriented(self.lower(), below));
            }
        }
        if let Some(above) = other.upper().checked_add(&one()) {
            if above <= self.upper() {
                pieces.push(self.oriented(above, self.upper()));
            }
        }
        pieces
    }

    /// Integers in exactly one of the operands: the pieces of `self - other`
    /// followed by the pieces of `other - self`. The second half keeps the
    /// orientation of `other`.
    pub fn symmetric_difference(&self, other: &Self) -> SymmetricPieces<T> {
        let mut pieces: SymmetricPieces<T> = self.difference(other).into_iter().collect();
        pieces.extend(other.difference(self));
        pieces
    }

    /// Returns `true` if every integer of `self` is in `other`.
    ///
    /// Orientation is ignored, so `(0, 10)` is a subset of `(10, 0)`.
    pub fn is_subset(&self, other: &Self) -> bool {
        self.overlaps(other) && self.clip(other).normalized() == self.normalized()
    }

    /// Returns `true` if `self` is a subset of `other` and `other` holds more
    /// integers. Orientation is ignored here too: `(0, 10)` is not a proper
    /// subset of `(10, 0)`.
    pub fn is_proper_subset(&self, other: &Self) -> bool {
        self.is_subset(other) && self.normalized() != other.normalized()
    }

    pub fn is_superset(&self, other: &Self) -> bool {
        other.is_subset(self)
    }

    pub fn is_proper_superset(&self, other: &Self) -> bool {
        other.is_proper_subset(self)
    }

    /// Folds [`Interval::union`] over `others`, stopping at the first operand
    /// that does not overlap the accumulated interval.
    pub fn union_all<'a, I>(&self, others: I) -> Result<Self, Error<T>>
    where
        I: IntoIterator<Item = &'a Self>,
        T: 'a,
    {
        others
            .into_iter()
            .try_fold(*self, |acc, other| acc.union(other))
    }

    /// Folds [`Interval::intersection`] over `others`, stopping at the first
    /// operand that does not overlap the accumulated interval.
    pub fn intersection_all<'a, I>(&self, others: I) -> Result<Self, Error<T>>
    where
        I: IntoIterator<Item = &'a Self>,
        T: 'a,
    {
        others
            .into_iter()
            .try_fold(*self, |acc, other| acc.intersection(other))
    }

    /// Removes every operand of `others` from `self`, in turn, from every piece
    /// left over so far.
    ///
    /// ```
    /// use sparse_integer_set::Interval;
    ///
    /// let holes = [Interval::new(1, 2), Interval::new(8, 9)];
    /// assert_eq!(
    ///     Interval::new(0, 10).difference_all(&holes),
    ///     vec![Interval::new(0, 0), Interval::new(3, 7), Interval::new(10, 10)],
    /// );
    /// ```
    pub fn difference_all<'a, I>(&self, others: I) -> Vec<Self>
    where
        I: IntoIterator<Item = &'a Self>,
        T: 'a,
    {
        others.into_iter().fold(vec![*self], |remaining, other| {
            remaining
                .iter()
                .flat_map(|piece| piece.difference(other))
                .collect()
        })
    }

    /// Iterates over the integers of the interval, from `start` towards `end`.
    pub fn iter(&self) -> Iter<T> {
        Iter {
            lower: self.lower(),
            upper: self.upper(),
            increasing: self.is_increasing(),
            exhausted: false,
        }
    }

    /// Union of two intervals already known to overlap or touch.
    pub(crate) fn hull(&self, other: &Self) -> Self {
        self.oriented(
            min(self.lower(), other.lower()),
            max(self.upper(), other.upper()),
        )
    }

    /// Intersection of two intervals already known to overlap.
    pub(crate) fn clip(&self, other: &Self) -> Self {
        self.oriented(
            max(self.lower(), other.lower()),
            min(self.upper(), other.upper()),
        )
    }

    fn oriented(&self, lower: T, upper: T) -> Self {
        if self.is_increasing() {
            Interval::new(lower, upper)
        } else {
            Interval::new(upper, lower)
        }
    }

    fn validate_overlap(&self, other: &Self) -> Result<(), Error<T>> {
        if self.overlaps(other) {
            Ok(())
        } else {
            Err(Error::Unrelated(*self, *other))
        }
    }
}

impl<T> BitOr for Interval<T>
where
    T: PrimInt,
{
    type Output = Result<Interval<T>, Error<T>>;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(&rhs)
    }
}

impl<T> BitAnd for Interval<T>
where
    T: PrimInt,
{
    type Output = Result<Interval<T>, Error<T>>;

    fn bitand(self, rhs: Self) -> Self::Output {
        self.intersection(&rhs)
    }
}

impl<T> Sub for Interval<T>
where
    T: PrimInt,
{
    type Output = Pieces<T>;

    fn sub(self, rhs: Self) -> Self::Output {
        self.difference(&rhs)
    }
}

impl<T> BitXor for Interval<T>
where
    T: PrimInt,
{
    type Output = SymmetricPieces<T>;

    fn bitxor(self, rhs: Self) -> Self::Output {
        self.symmetric_difference(&rhs)
    }
}

impl<T> IntoIterator for Interval<T>
where
    T: PrimInt,
{
    type Item = T;
    type IntoIter = Iter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the integers of an [`Interval`], in orientation order.
#[derive(Clone, Debug)]
pub struct Iter<T> {
    lower: T,
    upper: T,
    increasing: bool,
    exhausted: bool,
}

impl<T> Iter<T>
where
    T: PrimInt,
{
    fn take_lower(&mut self) -> Option<T> {
        if self.exhausted {
            return None;
        }
        let value = self.lower;
        if self.lower == self.upper {
            self.exhausted = true;
        } else {
            self.lower = self.lower + T::one();
        }
        Some(value)
    }

    fn take_upper(&mut self) -> Option<T> {
        if self.exhausted {
            return None;
        }
        let value = self.upper;
        if self.lower == self.upper {
            self.exhausted = true;
        } else {
            self.upper = self.upper - T::one();
        }
        Some(value)
    }
}

impl<T> Iterator for Iter<T>
where
    T: PrimInt,
{
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.increasing {
            self.take_lower()
        } else {
            self.take_upper()
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.exhausted {
            return (0, Some(0));
        }
        let remaining = span_len(self.lower, self.upper);
        match usize::try_from(remaining) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }
}

impl<T> DoubleEndedIterator for Iter<T>
where
    T: PrimInt,
{
    fn next_back(&mut self) -> Option<T> {
        if self.increasing {
            self.take_upper()
        } else {
            self.take_lower()
        }
    }
}

impl<T> FusedIterator for Iter<T> where T: PrimInt {}

/// Number of integers in `lower..=upper`, saturating at `u128::MAX`.
///
/// Differences are taken on the 128-bit two's complement images of the
/// endpoints, which is exact for every primitive integer type.
pub(crate) fn span_len<T>(lower: T, upper: T) -> u128
where
    T: PrimInt,
{
    let distance = match (lower.to_i128(), upper.to_i128()) {
        (Some(lower), Some(upper)) => (upper as u128).wrapping_sub(lower as u128),
        _ => match (lower.to_u128(), upper.to_u128()) {
            (Some(lower), Some(upper)) => upper - lower,
            _ => u128::MAX,
        },
    };
    distance.saturating_add(1)
}
