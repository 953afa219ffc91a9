use std::cmp::Ordering;
use std::fmt;
use std::iter::{once, FusedIterator};
use std::ops::{
    BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Range, Sub, SubAssign,
};
use std::slice;

use num_traits::{one, PrimInt};
use tracing::{debug, trace};

use crate::error::Error;
use crate::interval::{self, Interval};

/// A set of integers stored as sorted, disjoint, non-adjacent intervals.
///
/// Every operation works on whole intervals, so the cost depends on how many
/// intervals are touched and not on how many integers they span. A set holding
/// `0..=10^12` is as cheap as one holding `0..=1`.
///
/// The following holds after every public method returns:
///
/// 1. no two stored intervals overlap,
/// 2. no two stored intervals are adjacent: `a.end() + 1 < b.start()`,
/// 3. every stored interval is increasing,
/// 4. intervals are sorted by `start()`.
///
/// ```
/// use sparse_integer_set::IntegerSet;
///
/// let set = IntegerSet::from([(0, 10), (20, 30), (40, 50)]);
/// let other = IntegerSet::from([(-10, 2), (8, 42)]);
///
/// assert_eq!(&set & &other, IntegerSet::from([(0, 2), (8, 10), (20, 30), (40, 42)]));
/// assert_eq!(IntegerSet::from([(0, 1_000_000_000_000i64)]).len(), 1_000_000_000_001);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct IntegerSet<T> {
    intervals: Vec<Interval<T>>,
}

impl<T> Default for IntegerSet<T> {
    fn default() -> Self {
        IntegerSet {
            intervals: Vec::new(),
        }
    }
}

impl<T> fmt::Display for IntegerSet<T>
where
    T: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "IntegerSet(")?;
        for (i, interval) in self.intervals.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", interval)?;
        }
        write!(f, ")")
    }
}

impl<T> IntegerSet<T>
where
    T: PrimInt,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from `(start, end)` pairs. Pairs may come in any order,
    /// with any orientation, and may overlap each other.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (T, T)>,
    {
        pairs.into_iter().map(Interval::from).collect()
    }

    fn single(value: T) -> Self {
        IntegerSet {
            intervals: vec![Interval::new(value, value)],
        }
    }

    /// The stored intervals, increasing and sorted.
    pub fn intervals(&self) -> &[Interval<T>] {
        &self.intervals
    }

    pub fn interval_count(&self) -> usize {
        self.intervals.len()
    }

    /// Number of integers in the set, saturating at `u128::MAX`.
    pub fn len(&self) -> u128 {
        self.intervals
            .iter()
            .fold(0u128, |total, interval| total.saturating_add(interval.len()))
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Smallest element of the set.
    pub fn min(&self) -> Option<T> {
        self.intervals.first().map(Interval::start)
    }

    /// Largest element of the set.
    pub fn max(&self) -> Option<T> {
        self.intervals.last().map(Interval::end)
    }

    /// Returns `true` if `value` is in the set.
    ///
    /// Only the stored interval found at the insertion point of `value` and its
    /// predecessor can hold it, so this is a binary search plus two checks.
    pub fn contains(&self, value: T) -> bool {
        let insertion = self
            .intervals
            .partition_point(|member| member.start() < value);
        let at = self.intervals.get(insertion);
        let before = insertion
            .checked_sub(1)
            .and_then(|index| self.intervals.get(index));
        at.into_iter()
            .chain(before)
            .any(|member| member.contains(value))
    }

    /// The stored intervals overlapping `query`, whatever its orientation.
    ///
    /// ```
    /// use sparse_integer_set::{IntegerSet, Interval};
    ///
    /// let set = IntegerSet::from([(0, 10), (20, 30), (40, 50)]);
    /// assert_eq!(
    ///     set.overlapping(&Interval::new(25, 5)),
    ///     &[Interval::new(0, 10), Interval::new(20, 30)],
    /// );
    /// assert!(set.overlapping(&Interval::new(11, 19)).is_empty());
    /// ```
    pub fn overlapping(&self, query: &Interval<T>) -> &[Interval<T>] {
        &self.intervals[self.overlapping_range(query)]
    }

    /// Index range of the stored intervals overlapping `query`.
    ///
    /// Starting from the insertion point of `query.lower()`, scans forward and
    /// then backward, each time stopping at the first stored interval that
    /// does not overlap. Both scans are needed: the insertion point may fall
    /// between two members that `query` straddles, or `query` may only reach
    /// into a member that starts below it. When nothing overlaps, the empty
    /// range sits at the insertion point.
    fn overlapping_range(&self, query: &Interval<T>) -> Range<usize> {
        let insertion = self
            .intervals
            .partition_point(|member| member.start() < query.lower());

        let mut end = insertion;
        while end < self.intervals.len() && self.intervals[end].overlaps(query) {
            end += 1;
        }

        let mut start = insertion;
        while start > 0 && self.intervals[start - 1].overlaps(query) {
            start -= 1;
        }

        start..end
    }

    /// Merges every pair of consecutive intervals that overlap or touch.
    ///
    /// Expects the intervals to be increasing and sorted by start. Running it
    /// on an already consolidated set changes nothing.
    pub fn consolidate(&mut self) {
        let before = self.intervals.len();
        let mut merged: Vec<Interval<T>> = Vec::with_capacity(before);

        for interval in self.intervals.drain(..) {
            match merged.last_mut() {
                Some(last) if touches(last, &interval) => *last = last.hull(&interval),
                _ => merged.push(interval),
            }
        }

        if merged.len() < before {
            trace!(before, after = merged.len(), "consolidated intervals");
        }
        self.intervals = merged;
    }

    /// Adds every integer of `other` to `self`.
    pub fn union_in_place(&mut self, other: &Self) {
        for incoming in &other.intervals {
            let range = self.overlapping_range(incoming);
            let merged = self.intervals[range.clone()]
                .iter()
                .fold(*incoming, |acc, member| acc.hull(member));
            if range.len() > 1 {
                trace!(absorbed = range.len(), "merged overlapping intervals");
            }
            self.intervals.splice(range, once(merged));
        }
        self.consolidate();
    }

    /// Keeps only the integers of `self` that are also in `other`.
    pub fn intersection_in_place(&mut self, other: &Self) {
        let mut common = Vec::with_capacity(self.intervals.len());
        for incoming in &other.intervals {
            common.extend(
                self.overlapping(incoming)
                    .iter()
                    .map(|member| incoming.clip(member)),
            );
        }
        self.intervals = common;
        self.consolidate();
    }

    /// Removes every integer of `other` from `self`.
    pub fn difference_in_place(&mut self, other: &Self) {
        for removed in &other.intervals {
            let range = self.overlapping_range(removed);
            if range.is_empty() {
                continue;
            }
            let pieces: Vec<Interval<T>> = self.intervals[range.clone()]
                .iter()
                .flat_map(|member| member.difference(removed))
                .collect();
            trace!(
                touched = range.len(),
                remaining = pieces.len(),
                "split intervals"
            );
            self.intervals.splice(range, pieces);
        }
        self.consolidate();
    }

    /// Keeps the integers that are in exactly one of `self` and `other`.
    pub fn symmetric_difference_in_place(&mut self, other: &Self) {
        let only_other = other.difference(self);
        self.difference_in_place(other);
        self.union_in_place(&only_other);
    }

    pub fn union(&self, other: &Self) -> Self {
        let mut copy = self.clone();
        copy.union_in_place(other);
        copy
    }

    pub fn intersection(&self, other: &Self) -> Self {
        let mut copy = self.clone();
        copy.intersection_in_place(other);
        copy
    }

    pub fn difference(&self, other: &Self) -> Self {
        let mut copy = self.clone();
        copy.difference_in_place(other);
        copy
    }

    pub fn symmetric_difference(&self, other: &Self) -> Self {
        let mut copy = self.clone();
        copy.symmetric_difference_in_place(other);
        copy
    }

    /// Returns `true` if every element of `self` is in `other`.
    pub fn is_subset(&self, other: &Self) -> bool {
        self.intersection(other) == *self
    }

    pub fn is_proper_subset(&self, other: &Self) -> bool {
        self != other && self.is_subset(other)
    }

    /// Returns `true` if every element of `other` is in `self`.
    pub fn is_superset(&self, other: &Self) -> bool {
        other.is_subset(self)
    }

    pub fn is_proper_superset(&self, other: &Self) -> bool {
        self != other && self.is_superset(other)
    }

    /// Returns `true` if the sets have no element in common.
    pub fn is_disjoint(&self, other: &Self) -> bool {
        self.intersection(other).is_empty()
    }

    pub fn add(&mut self, value: T) {
        self.union_in_place(&Self::single(value));
    }

    /// Removes `value`, failing with [`Error::NotFound`] if it is absent.
    pub fn remove(&mut self, value: T) -> Result<(), Error<T>> {
        if !self.contains(value) {
            debug!("remove called with an element missing from the set");
            return Err(Error::NotFound(value));
        }
        self.difference_in_place(&Self::single(value));
        Ok(())
    }

    /// Removes `value` if present. Returns whether it was present.
    pub fn discard(&mut self, value: T) -> bool {
        let present = self.contains(value);
        if present {
            self.difference_in_place(&Self::single(value));
        }
        present
    }

    /// Removes and returns the smallest element, failing with [`Error::Empty`]
    /// on an empty set.
    pub fn pop(&mut self) -> Result<T, Error<T>> {
        let Some(value) = self.min() else {
            debug!("pop called on an empty set");
            return Err(Error::Empty);
        };
        self.difference_in_place(&Self::single(value));
        Ok(value)
    }

    pub fn clear(&mut self) {
        self.intervals.clear();
    }

    /// Iterates over the elements of the set in ascending order.
    ///
    /// Elements are produced lazily from the stored intervals; prefer the
    /// interval-level API for sets spanning large ranges.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            intervals: self.intervals.iter(),
            current: None,
        }
    }
}

/// `b` starts at or after `a`; both are increasing.
fn touches<T>(a: &Interval<T>, b: &Interval<T>) -> bool
where
    T: PrimInt,
{
    match a.upper().checked_add(&one()) {
        Some(next) => b.lower() <= next,
        // `a` runs up to T::MAX, so anything starting after it overlaps it.
        None => true,
    }
}

/// Subset order: `a <= b` holds when `a` is a subset of `b`. Sets where
/// neither contains the other are incomparable.
impl<T> PartialOrd for IntegerSet<T>
where
    T: PrimInt,
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self == other {
            Some(Ordering::Equal)
        } else if self.is_subset(other) {
            Some(Ordering::Less)
        } else if self.is_superset(other) {
            Some(Ordering::Greater)
        } else {
            None
        }
    }
}

impl<T> FromIterator<Interval<T>> for IntegerSet<T>
where
    T: PrimInt,
{
    fn from_iter<I: IntoIterator<Item = Interval<T>>>(iter: I) -> Self {
        let mut intervals: Vec<Interval<T>> =
            iter.into_iter().map(|interval| interval.normalized()).collect();
        intervals.sort_unstable_by_key(Interval::start);
        let mut set = IntegerSet { intervals };
        set.consolidate();
        set
    }
}

impl<T> FromIterator<(T, T)> for IntegerSet<T>
where
    T: PrimInt,
{
    fn from_iter<I: IntoIterator<Item = (T, T)>>(iter: I) -> Self {
        iter.into_iter().map(Interval::from).collect()
    }
}

impl<T, const N: usize> From<[(T, T); N]> for IntegerSet<T>
where
    T: PrimInt,
{
    fn from(pairs: [(T, T); N]) -> Self {
        Self::from_pairs(pairs)
    }
}

impl<T> From<Interval<T>> for IntegerSet<T>
where
    T: PrimInt,
{
    fn from(interval: Interval<T>) -> Self {
        IntegerSet {
            intervals: vec![interval.normalized()],
        }
    }
}

impl<T> Extend<Interval<T>> for IntegerSet<T>
where
    T: PrimInt,
{
    fn extend<I: IntoIterator<Item = Interval<T>>>(&mut self, iter: I) {
        let other: IntegerSet<T> = iter.into_iter().collect();
        self.union_in_place(&other);
    }
}

impl<T> Extend<(T, T)> for IntegerSet<T>
where
    T: PrimInt,
{
    fn extend<I: IntoIterator<Item = (T, T)>>(&mut self, iter: I) {
        self.extend(iter.into_iter().map(Interval::from));
    }
}

macro_rules! set_operator {
    ($op:ident, $method:ident, $assign_op:ident, $assign_method:ident, $in_place:ident) => {
        impl<T> $assign_op<&IntegerSet<T>> for IntegerSet<T>
        where
            T: PrimInt,
        {
            fn $assign_method(&mut self, rhs: &IntegerSet<T>) {
                self.$in_place(rhs);
            }
        }

        impl<T> $assign_op for IntegerSet<T>
        where
            T: PrimInt,
        {
            fn $assign_method(&mut self, rhs: IntegerSet<T>) {
                self.$in_place(&rhs);
            }
        }

        impl<T> $op<&IntegerSet<T>> for &IntegerSet<T>
        where
            T: PrimInt,
        {
            type Output = IntegerSet<T>;

            fn $method(self, rhs: &IntegerSet<T>) -> IntegerSet<T> {
                let mut copy = self.clone();
                copy.$in_place(rhs);
                copy
            }
        }

        impl<T> $op<&IntegerSet<T>> for IntegerSet<T>
        where
            T: PrimInt,
        {
            type Output = IntegerSet<T>;

            fn $method(mut self, rhs: &IntegerSet<T>) -> IntegerSet<T> {
                self.$in_place(rhs);
                self
            }
        }

        impl<T> $op for IntegerSet<T>
        where
            T: PrimInt,
        {
            type Output = IntegerSet<T>;

            fn $method(mut self, rhs: IntegerSet<T>) -> IntegerSet<T> {
                self.$in_place(&rhs);
                self
            }
        }
    };
}

set_operator!(BitOr, bitor, BitOrAssign, bitor_assign, union_in_place);
set_operator!(BitAnd, bitand, BitAndAssign, bitand_assign, intersection_in_place);
set_operator!(Sub, sub, SubAssign, sub_assign, difference_in_place);
set_operator!(BitXor, bitxor, BitXorAssign, bitxor_assign, symmetric_difference_in_place);

/// Ascending iterator over the elements of an [`IntegerSet`].
#[derive(Clone, Debug)]
pub struct Iter<'a, T> {
    intervals: slice::Iter<'a, Interval<T>>,
    current: Option<interval::Iter<T>>,
}

impl<T> Iterator for Iter<'_, T>
where
    T: PrimInt,
{
    type Item = T;

    fn next(&mut self) -> Option<T> {
        loop {
            if let Some(value) = self.current.as_mut().and_then(Iterator::next) {
                return Some(value);
            }
            self.current = Some(self.intervals.next()?.iter());
        }
    }
}

impl<T> FusedIterator for Iter<'_, T> where T: PrimInt {}

impl<'a, T> IntoIterator for &'a IntegerSet<T>
where
    T: PrimInt,
{
    type Item = T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::{assert_eq, assert_ne};
    use rstest::{fixture, rstest};

    fn set<const N: usize>(pairs: [(i64, i64); N]) -> IntegerSet<i64> {
        IntegerSet::from(pairs)
    }

    #[fixture]
    fn two_blocks() -> IntegerSet<i64> {
        set([(0, 10), (20, 30)])
    }

    #[rstest]
    fn test_construction_consolidates() {
        let built = set([(20, 30), (11, 19), (10, 0)]);
        assert_eq!(built.intervals(), &[Interval::new(0, 30)]);

        let built = set([(5, 7), (0, 10), (12, 12)]);
        assert_eq!(built.intervals(), &[Interval::new(0, 10), Interval::new(12, 12)]);

        assert!(IntegerSet::<i64>::new().is_empty());
        assert_eq!(IntegerSet::<i64>::default(), set([]));
    }

    #[rstest]
    fn test_stored_intervals_are_increasing() {
        let built = set([(30, 20), (5, -5)]);
        assert_eq!(built.intervals(), &[Interval::new(-5, 5), Interval::new(20, 30)]);
        assert!(built.intervals().iter().all(Interval::is_increasing));
    }

    #[rstest]
    #[case(set([(0, 10)]), set([(20, 30)]), set([(0, 10), (20, 30)]))]
    #[case(set([(0, 10), (20, 30), (40, 50)]), set([(10, 20), (30, 40)]), set([(0, 50)]))]
    #[case(set([(0, 10)]), set([(11, 20)]), set([(0, 20)]))]
    #[case(set([(0, 10)]), set([(12, 20)]), set([(0, 10), (12, 20)]))]
    #[case(set([(0, 10), (20, 30)]), set([(5, 25)]), set([(0, 30)]))]
    #[case(set([]), set([(1, 2)]), set([(1, 2)]))]
    fn test_union(
        #[case] left: IntegerSet<i64>,
        #[case] right: IntegerSet<i64>,
        #[case] expected: IntegerSet<i64>,
    ) {
        assert_eq!(left.union(&right), expected);
        assert_eq!(&left | &right, expected);
    }

    #[rstest]
    #[case(set([(0, 10)]), set([(20, 30)]), set([]))]
    #[case(set([(0, 10)]), set([(5, 30)]), set([(5, 10)]))]
    #[case(
        set([(0, 10), (20, 30), (40, 50)]),
        set([(-10, 2), (8, 42)]),
        set([(0, 2), (8, 10), (20, 30), (40, 42)])
    )]
    fn test_intersection(
        #[case] left: IntegerSet<i64>,
        #[case] right: IntegerSet<i64>,
        #[case] expected: IntegerSet<i64>,
    ) {
        assert_eq!(left.intersection(&right), expected);
        assert_eq!(&left & &right, expected);
    }

    #[rstest]
    #[case(set([(0, 10)]), set([(-5, 2), (4, 6), (8, 15)]), set([(3, 3), (7, 7)]))]
    #[case(set([(0, 10)]), set([(-10, -1), (11, 20)]), set([(0, 10)]))]
    #[case(set([(0, 10)]), set([(1, 2), (8, 9)]), set([(0, 0), (3, 7), (10, 10)]))]
    #[case(set([(0, 10), (20, 30)]), set([(5, 25)]), set([(0, 4), (26, 30)]))]
    fn test_difference(
        #[case] left: IntegerSet<i64>,
        #[case] right: IntegerSet<i64>,
        #[case] expected: IntegerSet<i64>,
    ) {
        assert_eq!(left.difference(&right), expected);
        assert_eq!(&left - &right, expected);
    }

    #[rstest]
    #[case(
        set([(0, 10)]),
        set([(-5, 2), (4, 6), (8, 15)]),
        set([(-5, -1), (3, 3), (7, 7), (11, 15)])
    )]
    #[case(
        set([(0, 10), (20, 30), (40, 50)]),
        set([(4, 6), (25, 45)]),
        set([(0, 3), (7, 10), (20, 24), (31, 39), (46, 50)])
    )]
    #[case(set([(0, 10), (20, 30)]), set([(-10, -1), (11, 19)]), set([(-10, 30)]))]
    #[case(set([(0, 20)]), set([(10, 30)]), set([(0, 9), (21, 30)]))]
    fn test_symmetric_difference(
        #[case] left: IntegerSet<i64>,
        #[case] right: IntegerSet<i64>,
        #[case] expected: IntegerSet<i64>,
    ) {
        assert_eq!(left.symmetric_difference(&right), expected);
        assert_eq!(&left ^ &right, expected);
    }

    #[rstest]
    fn test_copying_operators_leave_operands_alone(two_blocks: IntegerSet<i64>) {
        let other = set([(5, 25)]);
        let _ = &two_blocks | &other;
        let _ = &two_blocks & &other;
        let _ = &two_blocks - &other;
        let _ = &two_blocks ^ &other;
        assert_eq!(two_blocks, set([(0, 10), (20, 30)]));
        assert_eq!(other, set([(5, 25)]));
    }

    #[rstest]
    fn test_in_place_operators(two_blocks: IntegerSet<i64>) {
        let mut target = two_blocks.clone();
        target |= set([(11, 19)]);
        assert_eq!(target, set([(0, 30)]));

        let mut target = two_blocks.clone();
        target &= &set([(5, 25)]);
        assert_eq!(target, set([(5, 10), (20, 25)]));

        let mut target = two_blocks.clone();
        target -= &set([(5, 25)]);
        assert_eq!(target, set([(0, 4), (26, 30)]));

        let mut target = two_blocks;
        target ^= set([(5, 25)]);
        assert_eq!(target, set([(0, 4), (11, 19), (26, 30)]));
    }

    #[rstest]
    fn test_chained_updates() {
        let mut target = set([(0, 10)]);
        target |= set([(20, 30)]);
        target |= set([(30, 40)]);
        assert_eq!(target, set([(0, 10), (20, 40)]));

        let mut target = set([(0, 10)]);
        target &= set([(-10, 8)]);
        target &= set([(2, 20)]);
        assert_eq!(target, set([(2, 8)]));

        let mut target = set([(0, 10)]);
        target -= set([(-10, 1)]);
        target -= set([(9, 20)]);
        assert_eq!(target, set([(2, 8)]));

        assert_eq!(
            set([(0, 10)]) | set([(20, 30)]) | set([(40, 50)]),
            set([(0, 10), (20, 30), (40, 50)])
        );
    }

    #[rstest]
    #[case(0, true)]
    #[case(10, true)]
    #[case(20, true)]
    #[case(30, true)]
    #[case(-1, false)]
    #[case(11, false)]
    #[case(19, false)]
    #[case(31, false)]
    fn test_contains(two_blocks: IntegerSet<i64>, #[case] value: i64, #[case] expected: bool) {
        assert_eq!(two_blocks.contains(value), expected);
    }

    #[rstest]
    fn test_contains_on_empty_set() {
        let empty = IntegerSet::<i64>::new();
        for value in [-1, 11, 19, 31] {
            assert!(!empty.contains(value));
        }
    }

    #[rstest]
    fn test_overlapping_scans_both_directions(two_blocks: IntegerSet<i64>) {
        let straddling = Interval::new(5, 25);
        assert_eq!(
            two_blocks.overlapping(&straddling),
            &[Interval::new(0, 10), Interval::new(20, 30)]
        );
        // starts after the member it reaches into
        assert_eq!(two_blocks.overlapping(&Interval::new(8, 9)), &[Interval::new(0, 10)]);
        assert!(two_blocks.overlapping(&Interval::new(35, 40)).is_empty());
    }

    #[rstest]
    fn test_len() {
        for n in [0i64, 1, 9, 1_000, 10_000_000_000] {
            assert_eq!(set([(0, n)]).len(), n as u128 + 1);
        }
        assert_eq!(set([(0, 10), (20, 30)]).len(), 22);
        assert_eq!(IntegerSet::<i64>::new().len(), 0);
        let huge = IntegerSet::from([(i64::MIN, -1), (1, i64::MAX)]);
        assert_eq!(huge.len(), (1u128 << 64) - 1);
    }

    #[rstest]
    fn test_relations() {
        let base = set([(0, 10)]);

        assert!(base.is_subset(&base));
        assert!(set([(0, 1), (9, 10)]).is_subset(&base));
        assert!(!set([(-1, -1), (9, 10)]).is_subset(&base));
        assert!(!set([(0, 1), (11, 11)]).is_subset(&base));

        assert!(!base.is_proper_subset(&base));
        assert!(set([(0, 1), (9, 10)]).is_proper_subset(&base));

        assert!(base.is_superset(&base));
        assert!(set([(-1, 1), (2, 11)]).is_superset(&base));
        assert!(!set([(-1, 9)]).is_superset(&base));
        assert!(!set([(1, 11)]).is_superset(&base));

        assert!(!base.is_proper_superset(&base));
        assert!(set([(-1, 11)]).is_proper_superset(&base));

        assert!(!base.is_disjoint(&set([(0, 0)])));
        assert!(base.is_disjoint(&set([(-1, -1)])));
        assert!(base.is_disjoint(&set([(11, 11)])));
    }

    #[rstest]
    fn test_relations_at_type_limits() {
        let full = IntegerSet::from([(i128::MIN, i128::MAX)]);
        let missing_one = IntegerSet::from([(i128::MIN, i128::MAX - 1)]);
        assert_eq!(full.len(), missing_one.len());
        assert!(!full.is_subset(&missing_one));
        assert!(missing_one.is_subset(&full));
        assert!(missing_one.is_proper_subset(&full));
        assert!(full.is_superset(&missing_one));
        assert!(full.is_proper_superset(&missing_one));
        assert!(!missing_one.is_superset(&full));
        assert_eq!(full.partial_cmp(&missing_one), Some(Ordering::Greater));
        assert_eq!(missing_one.partial_cmp(&full), Some(Ordering::Less));
        assert!(missing_one < full && full > missing_one);
        assert!(!full.is_disjoint(&missing_one));
        assert!(IntegerSet::from([(i128::MAX, i128::MAX)]).is_disjoint(&missing_one));

        let everything = IntegerSet::from([(0u128, u128::MAX)]);
        let no_zero = IntegerSet::from([(1u128, u128::MAX)]);
        assert!(!everything.is_subset(&no_zero));
        assert!(no_zero < everything);
        assert_eq!(everything.partial_cmp(&no_zero), Some(Ordering::Greater));

        let bytes = IntegerSet::from([(u8::MIN, u8::MAX)]);
        let ends = IntegerSet::from([(u8::MIN, u8::MIN), (u8::MAX, u8::MAX)]);
        assert!(ends.is_proper_subset(&bytes));
        assert!(bytes.is_proper_superset(&ends));
        assert!(ends.is_disjoint(&IntegerSet::from([(1u8, 254)])));

        let low = IntegerSet::from([(i8::MIN, -1)]);
        let high = IntegerSet::from([(0i8, i8::MAX)]);
        assert!(low.is_disjoint(&high));
        assert_eq!(low.partial_cmp(&high), None);
        assert!(&low | &high >= IntegerSet::from([(i8::MIN, i8::MAX)]));
    }

    #[rstest]
    fn test_subset_order() {
        let base = set([(0, 10)]);

        assert!(base <= set([(0, 10)]));
        assert!(set([(0, 1), (9, 10)]) <= base);
        assert!(!(set([(-1, -1), (9, 10)]) <= base));
        assert!(!(base < set([(0, 10)])));
        assert!(set([(0, 1), (9, 10)]) < base);

        assert!(set([(-1, 1), (2, 11)]) >= base);
        assert!(set([(-1, 1), (2, 11)]) > base);
        assert!(!(set([(-1, 9)]) >= base));
        assert!(!(base > set([(0, 10)])));

        assert_eq!(set([(-1, 9)]).partial_cmp(&base), None);
    }

    #[rstest]
    fn test_add() {
        let mut target = set([(0, 10)]);
        target.add(12);
        assert_eq!(target, set([(0, 10), (12, 12)]));
        target.add(11);
        assert_eq!(target, set([(0, 12)]));
        target.add(5);
        assert_eq!(target, set([(0, 12)]));
    }

    #[rstest]
    fn test_remove() {
        let mut target = set([(0, 10)]);
        assert_eq!(target.remove(5), Ok(()));
        assert_eq!(target, set([(0, 4), (6, 10)]));
        assert_eq!(target.remove(11), Err(Error::NotFound(11)));
        assert_eq!(target.remove(5), Err(Error::NotFound(5)));
        assert_eq!(target, set([(0, 4), (6, 10)]));
    }

    #[rstest]
    fn test_discard() {
        let mut target = set([(0, 10)]);
        assert!(target.discard(5));
        assert_eq!(target, set([(0, 4), (6, 10)]));
        assert!(!target.discard(11));
        assert_eq!(target, set([(0, 4), (6, 10)]));
    }

    #[rstest]
    fn test_pop() {
        let mut target = set([(0, 1), (5, 5)]);
        assert_eq!(target.pop(), Ok(0));
        assert_eq!(target.pop(), Ok(1));
        assert_eq!(target.pop(), Ok(5));
        assert_eq!(target.pop(), Err(Error::Empty));
        assert!(target.is_empty());
    }

    #[rstest]
    fn test_clear(two_blocks: IntegerSet<i64>) {
        let mut target = two_blocks;
        target.clear();
        assert_eq!(target, IntegerSet::new());
        assert_eq!(target.len(), 0);
    }

    #[rstest]
    fn test_min_and_max(two_blocks: IntegerSet<i64>) {
        assert_eq!(two_blocks.min(), Some(0));
        assert_eq!(two_blocks.max(), Some(30));
        assert_eq!(IntegerSet::<i64>::new().min(), None);
    }

    #[rstest]
    fn test_iter() {
        let source = set([(0, 2), (10, 12)]);
        let elements: Vec<i64> = source.iter().collect();
        assert_eq!(elements, vec![0, 1, 2, 10, 11, 12]);
        // restartable
        assert_eq!(source.iter().count(), 6);
        assert_eq!((&source).into_iter().next(), Some(0));
        assert_eq!(IntegerSet::<i64>::new().iter().next(), None);

        let huge = IntegerSet::from([(0u64, u64::MAX)]);
        let prefix: Vec<u64> = huge.iter().take(3).collect();
        assert_eq!(prefix, vec![0, 1, 2]);
    }

    #[rstest]
    fn test_consolidate_is_idempotent() {
        let mut once_merged = set([(0, 10), (11, 20), (25, 30), (31, 31), (40, 45)]);
        let snapshot = once_merged.clone();
        once_merged.consolidate();
        assert_eq!(once_merged, snapshot);
        assert_eq!(once_merged, set([(0, 20), (25, 31), (40, 45)]));
    }

    #[rstest]
    fn test_type_limits() {
        let mut bytes = IntegerSet::from([(0u8, 100), (101, 255)]);
        assert_eq!(bytes.intervals(), &[Interval::new(0, 255)]);
        assert_eq!(bytes.len(), 256);
        bytes -= IntegerSet::from([(0u8, 0), (255, 255)]);
        assert_eq!(bytes, IntegerSet::from([(1u8, 254)]));
        bytes.add(255);
        assert_eq!(bytes.max(), Some(255));
        assert!(bytes.contains(255));
    }

    #[rstest]
    fn test_extend_and_collect() {
        let mut target: IntegerSet<i64> = vec![(0, 3), (10, 12)].into_iter().collect();
        target.extend([(4, 5)]);
        target.extend([Interval::new(9, 6)]);
        assert_eq!(target, set([(0, 12)]));
        assert_eq!(IntegerSet::from(Interval::new(5, 1)), set([(1, 5)]));
    }

    #[rstest]
    fn test_display(two_blocks: IntegerSet<i64>) {
        assert_eq!(two_blocks.to_string(), "IntegerSet((0, 10), (20, 30))");
        assert_eq!(IntegerSet::<i64>::new().to_string(), "IntegerSet()");
        assert_ne!(two_blocks, set([(0, 10)]));
    }
}
