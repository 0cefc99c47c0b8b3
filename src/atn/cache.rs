//! Write-once storage for a state's rule-local lookahead set.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use once_cell::sync::OnceCell;

use crate::util::interval::IntervalSet;

/// Observable status of a [`LookaheadCache`](struct.LookaheadCache.html).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CacheState<'a> {
    /// Nobody has asked for the value yet.
    Unset,

    /// At least one thread is computing the value, and none has published it.
    Computing,

    /// The value has been published and is frozen.
    Set(&'a IntervalSet)
}

/// Tri-state cell holding a state's "next tokens within rule" set.
///
/// The cell is either empty or holds a complete, frozen `IntervalSet`; it is
/// never observed half-filled.  Two threads may race to fill it: both compute
/// (the computation is a pure function of the sealed automaton), the first
/// publish wins, and the loser's copy is dropped.
pub struct LookaheadCache {
    computing: AtomicBool,
    value: OnceCell<IntervalSet>
}

impl LookaheadCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        LookaheadCache{computing: AtomicBool::new(false), value: OnceCell::new()}
    }

    /// Fetch the cache's current status.
    pub fn state(&self) -> CacheState {
        match self.value.get() {
            Some(v) => CacheState::Set(v),
            None if self.computing.load(Ordering::Acquire) => CacheState::Computing,
            None => CacheState::Unset
        }
    }

    /// Fetch the published value, if any.
    #[inline]
    pub fn get(&self) -> Option<&IntervalSet> {
        self.value.get()
    }

    /// Check whether a value has been published.
    #[inline]
    pub fn is_set(&self) -> bool {
        self.value.get().is_some()
    }

    /// Return the published value, computing and publishing it first if the
    /// cache is empty.
    ///
    /// `compute` runs without any lock held, so it may itself fill the caches
    /// of other states.  If it panics the cache goes back to `Unset`.
    pub fn get_or_compute<F>(&self, compute: F) -> &IntervalSet
        where F: FnOnce() -> IntervalSet
    {
        if let Some(v) = self.value.get() {
            return v;
        }

        self.computing.store(true, Ordering::Release);
        let guard = ComputeGuard(&self.computing);
        let mut set = compute();
        set.freeze();
        drop(guard);

        match self.value.try_insert(set) {
            Ok(published) => published,
            Err((published, _discarded)) => published
        }
    }
}

/// Clears the computing flag when a computation unwinds.
struct ComputeGuard<'a>(&'a AtomicBool);

impl<'a> Drop for ComputeGuard<'a> {
    fn drop(&mut self) {
        if thread::panicking() {
            self.0.store(false, Ordering::Release);
        }
    }
}

impl Default for LookaheadCache {
    #[inline(always)]
    fn default() -> Self {
        LookaheadCache::new()
    }
}

impl fmt::Debug for LookaheadCache {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.state() {
            CacheState::Unset => f.write_str("LookaheadCache(unset)"),
            CacheState::Computing => f.write_str("LookaheadCache(computing)"),
            CacheState::Set(v) => write!(f, "LookaheadCache({})", v)
        }
    }
}


#[cfg(test)]
mod tests {
    use std::panic::{self, AssertUnwindSafe};

    use super::{CacheState, LookaheadCache};
    use crate::util::interval::IntervalSet;

    #[test]
    fn test_state_transitions() {
        let cache = LookaheadCache::new();
        assert_eq!(CacheState::Unset, cache.state());

        let v = cache.get_or_compute(|| {
            assert_eq!(CacheState::Computing, cache.state());
            IntervalSet::of(1, 3)
        });
        assert!(v.is_read_only());
        assert_eq!(CacheState::Set(&IntervalSet::of(1, 3)), cache.state());
    }

    #[test]
    fn test_second_fill_is_ignored() {
        let cache = LookaheadCache::new();
        let first = cache.get_or_compute(|| IntervalSet::of_one(7)) as *const IntervalSet;
        let second = cache.get_or_compute(|| panic!("cache recomputed a published value"));
        assert!(std::ptr::eq(first, second));
    }

    #[test]
    fn test_panicking_computation_resets() {
        let cache = LookaheadCache::new();
        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            cache.get_or_compute(|| panic!("lookahead computation failed"));
        }));
        assert!(result.is_err());
        assert_eq!(CacheState::Unset, cache.state());

        assert_eq!(&IntervalSet::of_one(4), cache.get_or_compute(|| IntervalSet::of_one(4)));
        assert!(cache.is_set());
    }

    #[test]
    fn test_losing_racer_sees_winner() {
        let cache = LookaheadCache::new();
        // Simulate a concurrent publish landing while this caller computes.
        let v = cache.get_or_compute(|| {
            cache.get_or_compute(|| IntervalSet::of_one(1));
            IntervalSet::of_one(2)
        });
        assert_eq!(&IntervalSet::of_one(1), v);
    }
}
