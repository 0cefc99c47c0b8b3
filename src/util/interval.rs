//! Compact sets of integer symbols.
//!
//! An [`IntervalSet`](struct.IntervalSet.html) stores its members as sorted,
//! disjoint, non-adjacent inclusive [`Interval`](struct.Interval.html)s, which
//! keeps token sets like "any user token except `;`" down to a couple of
//! entries.

use std::fmt::{self, Debug, Display};
use std::iter::FromIterator;

use itertools::Itertools;

use crate::token;
use super::set::{self, Difference};

// ----------------------------------------------------------------
// Interval

/// An inclusive range of symbols, `start..=stop`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Interval {
    /// First symbol in the range.
    pub start: i32,
    /// Last symbol in the range (inclusive).
    pub stop: i32
}

impl Interval {
    /// Create an interval covering `start..=stop`.
    #[inline]
    pub fn new(start: i32, stop: i32) -> Self {
        Interval{start: start, stop: stop}
    }

    /// Number of symbols covered by the interval.
    pub fn len(&self) -> usize {
        if self.stop < self.start { 0 }
        else { (self.stop as i64 - self.start as i64 + 1) as usize }
    }

    /// Check whether the interval covers no symbols at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.stop < self.start
    }

    /// Check whether `v` lies within the interval.
    #[inline]
    pub fn contains(&self, v: i32) -> bool {
        self.start <= v && v <= self.stop
    }

    /// Check whether two intervals touch without overlapping.
    pub fn adjacent(&self, other: &Interval) -> bool {
        self.start as i64 == other.stop as i64 + 1 || self.stop as i64 + 1 == other.start as i64
    }

    /// Check whether two intervals share no symbols.
    pub fn disjoint(&self, other: &Interval) -> bool {
        self.start > other.stop || other.start > self.stop
    }

    /// Smallest interval covering both `self` and `other`.
    pub fn union(&self, other: &Interval) -> Interval {
        Interval::new(self.start.min(other.start), self.stop.max(other.stop))
    }
}

impl From<i32> for Interval {
    fn from(v: i32) -> Self { Interval::new(v, v) }
}

impl Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.start == self.stop { fmt_element(self.start, f) }
        else {
            fmt_element(self.start, f)?;
            f.write_str("..")?;
            fmt_element(self.stop, f)
        }
    }
}

fn fmt_element(v: i32, f: &mut fmt::Formatter) -> fmt::Result {
    match v {
        token::EOF => f.write_str("<EOF>"),
        token::EPSILON => f.write_str("<EPSILON>"),
        _ => write!(f, "{}", v)
    }
}

// ----------------------------------------------------------------
// IntervalSet

/// A set of symbols stored as sorted, disjoint inclusive intervals.
///
/// A set may be *frozen* (see [`freeze`](#method.freeze)); any later attempt
/// to mutate it panics.  Frozen sets are what the lookahead cache hands out,
/// so a panic here means some caller tried to edit a shared result.
#[derive(Clone, Default)]
pub struct IntervalSet {
    intervals: Vec<Interval>,
    read_only: bool
}

impl IntervalSet {
    /// Create an empty, writable set.
    pub fn new() -> Self {
        IntervalSet{intervals: Vec::new(), read_only: false}
    }

    /// Create a set containing exactly the symbols `start..=stop`.
    pub fn of(start: i32, stop: i32) -> Self {
        let mut s = IntervalSet::new();
        s.add_range(start, stop);
        s
    }

    /// Create a set containing the single symbol `v`.
    pub fn of_one(v: i32) -> Self {
        IntervalSet::of(v, v)
    }

    /// Check whether the set has been frozen.
    #[inline]
    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Permanently forbid further mutation of this set.
    #[inline]
    pub fn freeze(&mut self) {
        self.read_only = true;
    }

    #[inline]
    fn check_writable(&self) {
        panic_unless!(!self.read_only, "can't alter a read-only IntervalSet");
    }

    /// Fetch the set's intervals in ascending order.
    #[inline]
    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    /// Add a single symbol.
    #[inline]
    pub fn add_one(&mut self, v: i32) {
        self.add_range(v, v);
    }

    /// Add every symbol in `start..=stop`, merging with any intervals the new
    /// range overlaps or touches.
    pub fn add_range(&mut self, start: i32, stop: i32) {
        self.check_writable();
        if stop < start {
            return;
        }
        let mut merged = Interval::new(start, stop);

        // Intervals strictly below `lo` neither overlap nor touch the new one.
        let lo = self.intervals.partition_point(|iv| (iv.stop as i64) + 1 < merged.start as i64);
        let mut hi = lo;
        while hi < self.intervals.len() && (self.intervals[hi].start as i64) <= merged.stop as i64 + 1 {
            merged = merged.union(&self.intervals[hi]);
            hi += 1;
        }
        self.intervals.drain(lo..hi);
        self.intervals.insert(lo, merged);
    }

    /// Add every symbol of `other` to this set.
    pub fn add_set(&mut self, other: &IntervalSet) {
        self.check_writable();
        for iv in other.intervals.iter() {
            self.add_range(iv.start, iv.stop);
        }
    }

    /// Remove a single symbol.
    #[inline]
    pub fn remove_one(&mut self, v: i32) {
        self.remove_range(v, v);
    }

    /// Remove every symbol in `start..=stop`, splitting intervals as needed.
    pub fn remove_range(&mut self, start: i32, stop: i32) {
        self.check_writable();
        if stop < start {
            return;
        }
        let cut = Interval::new(start, stop);
        if self.intervals.iter().all(|iv| iv.disjoint(&cut)) {
            return;
        }

        let mut out = Vec::with_capacity(self.intervals.len() + 1);
        for iv in self.intervals.drain(..) {
            if iv.disjoint(&cut) {
                out.push(iv);
                continue;
            }
            if iv.start < cut.start {
                out.push(Interval::new(iv.start, cut.start - 1));
            }
            if iv.stop > cut.stop {
                out.push(Interval::new(cut.stop + 1, iv.stop));
            }
        }
        self.intervals = out;
    }

    /// Check whether `v` is a member of the set.
    pub fn contains(&self, v: i32) -> bool {
        let i = self.intervals.partition_point(|iv| iv.stop < v);
        self.intervals.get(i).map_or(false, |iv| iv.start <= v)
    }

    /// Check whether the set has no members.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Number of symbols in the set.
    pub fn len(&self) -> usize {
        self.intervals.iter().map(|iv| iv.len()).sum()
    }

    /// Smallest member, if any.
    pub fn min_element(&self) -> Option<i32> {
        self.intervals.first().map(|iv| iv.start)
    }

    /// Largest member, if any.
    pub fn max_element(&self) -> Option<i32> {
        self.intervals.last().map(|iv| iv.stop)
    }

    /// Iterate over every member in ascending order.
    pub fn iter<'a>(&'a self) -> impl Iterator<Item=i32> + 'a {
        self.intervals.iter().flat_map(|iv| iv.start..=iv.stop)
    }

    /// Collect the members into a vector, in ascending order.
    pub fn to_vec(&self) -> Vec<i32> {
        self.iter().collect()
    }

    /// Symbols in `min..=max` that are *not* members of this set.
    pub fn complement(&self, min: i32, max: i32) -> IntervalSet {
        IntervalSet::of(min, max).difference(self)
    }

    /// Render the set using display names for token types.
    ///
    /// `names[t]` is used for token type `t` when present; `EOF` and
    /// `EPSILON` always render as `<EOF>` and `<EPSILON>`.
    pub fn to_string_with_names(&self, names: &[&str]) -> String {
        let items = self.iter().map(|t| match t {
            token::EOF => "<EOF>".to_owned(),
            token::EPSILON => "<EPSILON>".to_owned(),
            _ => usize::try_from(t).ok()
                .and_then(|i| names.get(i))
                .map_or_else(|| t.to_string(), |n| (*n).to_owned())
        }).collect::<Vec<_>>();

        if items.len() == 1 { items.join("") }
        else { format!("{{{}}}", items.join(", ")) }
    }
}

impl PartialEq for IntervalSet {
    /// Sets compare by membership only; the read-only flag is ignored.
    fn eq(&self, other: &Self) -> bool {
        self.intervals == other.intervals
    }
}
impl Eq for IntervalSet {}

impl Debug for IntervalSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[{}]", self.intervals.iter().map(|iv| format!("{}", iv)).join(","))?;
        if self.read_only { f.write_str("(ro)") } else { Ok(()) }
    }
}

impl Display for IntervalSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("{}");
        }
        let body = self.intervals.iter().map(|iv| format!("{}", iv)).join(", ");
        if self.len() > 1 { write!(f, "{{{}}}", body) }
        else { f.write_str(&body) }
    }
}

impl From<Interval> for IntervalSet {
    fn from(iv: Interval) -> Self {
        IntervalSet::of(iv.start, iv.stop)
    }
}

impl FromIterator<i32> for IntervalSet {
    fn from_iter<I>(iter: I) -> Self
        where I: IntoIterator<Item=i32> {
        let mut s = IntervalSet::new();
        for v in iter {
            s.add_one(v);
        }
        s
    }
}

impl set::Contains<i32> for IntervalSet {
    #[inline]
    fn contains(&self, v: &i32) -> bool {
        IntervalSet::contains(self, *v)
    }
}

impl set::IsEmpty for IntervalSet {
    #[inline]
    fn is_empty(&self) -> bool {
        IntervalSet::is_empty(self)
    }
}

impl set::IsSubsetOf<IntervalSet> for IntervalSet {
    /// Every interval of `self` must lie inside a single interval of `other`,
    /// since `other`'s intervals never touch.
    fn is_subset_of(&self, other: &IntervalSet) -> bool {
        self.intervals.iter().all(|iv| {
            let i = other.intervals.partition_point(|o| o.stop < iv.start);
            other.intervals.get(i).map_or(false, |o| o.start <= iv.start && iv.stop <= o.stop)
        })
    }
}

impl set::Difference<IntervalSet> for IntervalSet {
    type Output = IntervalSet;

    /// The result is always writable, even if `self` is frozen.
    fn difference(&self, other: &IntervalSet) -> IntervalSet {
        let mut out = IntervalSet{intervals: self.intervals.clone(), read_only: false};
        for iv in other.intervals.iter() {
            out.remove_range(iv.start, iv.stop);
        }
        out
    }
}

impl set::Subtract<IntervalSet> for IntervalSet {
    fn subtract(&mut self, other: &IntervalSet) -> &Self {
        for iv in other.intervals.iter() {
            self.remove_range(iv.start, iv.stop);
        }
        self
    }
}

impl set::UnionWith<IntervalSet> for IntervalSet {
    fn union_with(&mut self, other: &IntervalSet) -> &Self {
        self.add_set(other);
        self
    }
}


#[cfg(test)]
mod tests {
    use super::{Interval, IntervalSet};

    #[test]
    fn test_add_range_merges_neighbours() {
        let mut s = IntervalSet::new();
        s.add_range(10, 12);
        s.add_range(1, 3);
        s.add_range(6, 6);
        assert_eq!(&[Interval::new(1, 3), Interval::new(6, 6), Interval::new(10, 12)], s.intervals());

        // Bridges 3..6 and touches 10: everything collapses to one interval.
        s.add_range(4, 9);
        assert_eq!(&[Interval::new(1, 12)], s.intervals());
    }

    #[test]
    fn test_add_adjacent_single_values() {
        let s: IntervalSet = vec![5, 3, 4, 7].into_iter().collect();
        assert_eq!(&[Interval::new(3, 5), Interval::new(7, 7)], s.intervals());
        assert_eq!(4, s.len());
    }

    #[test]
    fn test_interval_relations() {
        let a = Interval::new(1, 3);
        assert!(a.adjacent(&Interval::new(4, 6)));
        assert!(Interval::new(4, 6).adjacent(&a));
        assert!(!a.adjacent(&Interval::new(3, 6)));
        assert!(!a.adjacent(&Interval::new(5, 6)));
        assert!(Interval::new(i32::MAX, i32::MAX).adjacent(&Interval::new(0, i32::MAX - 1)));

        assert!(a.disjoint(&Interval::new(4, 6)));
        assert!(!a.disjoint(&Interval::new(3, 6)));
        assert_eq!(Interval::new(1, 6), a.union(&Interval::new(5, 6)));
    }

    #[test]
    fn test_remove_splits() {
        let mut s = IntervalSet::of(1, 10);
        s.remove_one(5);
        assert_eq!(&[Interval::new(1, 4), Interval::new(6, 10)], s.intervals());
        s.remove_range(0, 1);
        s.remove_range(9, 20);
        assert_eq!(&[Interval::new(2, 4), Interval::new(6, 8)], s.intervals());
    }

    #[test]
    fn test_extreme_values() {
        let mut s = IntervalSet::of(i32::MAX - 1, i32::MAX);
        s.add_one(i32::MIN);
        assert!(s.contains(i32::MAX));
        assert!(s.contains(i32::MIN));
        assert!(!s.contains(0));
        assert_eq!(3, s.len());
    }
}
