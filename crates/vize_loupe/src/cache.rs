//! Bounded fingerprint-keyed caches.
//!
//! Each tier is an LRU map behind a single mutex. The lock is held only for
//! the lookup and for the insert, never while a value is being computed: a
//! computation may recurse into the same cache (mixins of mixins).

use std::num::NonZeroUsize;

use lru::LruCache;
use parking_lot::Mutex;
use vize_carton::Fingerprint;

/// Hit/miss counters and occupancy of one cache tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub len: usize,
    pub capacity: usize,
}

impl CacheStats {
    /// Fraction of lookups served from the cache.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

struct Inner<V> {
    entries: LruCache<Fingerprint, V>,
    hits: u64,
    misses: u64,
}

/// Least-recently-used cache keyed by [`Fingerprint`].
///
/// Values are cloned out; store `Arc`s to share results.
pub struct FingerprintCache<V> {
    name: &'static str,
    inner: Mutex<Inner<V>>,
}

impl<V: Clone> FingerprintCache<V> {
    /// Create a cache holding at most `capacity` entries (at least one).
    pub fn new(name: &'static str, capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            name,
            inner: Mutex::new(Inner {
                entries: LruCache::new(capacity),
                hits: 0,
                misses: 0,
            }),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Look up `key`, marking it most recently used.
    pub fn get(&self, key: Fingerprint) -> Option<V> {
        let mut inner = self.inner.lock();
        let found = inner.entries.get(&key).cloned();
        match found {
            Some(value) => {
                inner.hits += 1;
                Some(value)
            }
            None => {
                inner.misses += 1;
                None
            }
        }
    }

    /// Insert `value`, returning the key evicted to make room, if any.
    pub fn insert(&self, key: Fingerprint, value: V) -> Option<Fingerprint> {
        let mut inner = self.inner.lock();
        match inner.entries.push(key, value) {
            Some((evicted, _)) if evicted != key => {
                tracing::trace!("{} cache evicted {}", self.name, evicted);
                Some(evicted)
            }
            _ => None,
        }
    }

    /// Return the cached value for `key`, computing and storing it on a miss.
    ///
    /// When two callers race on the same key, the first stored value is kept
    /// and returned to both.
    pub fn get_or_insert_with(&self, key: Fingerprint, compute: impl FnOnce() -> V) -> V {
        self.get_or_refresh(key, |_| true, || (compute(), true))
    }

    /// Like [`get_or_insert_with`](Self::get_or_insert_with), with two
    /// refinements: a cached value rejected by `is_current` counts as a miss
    /// and is replaced, and `compute` says whether its value may be stored.
    /// Values it marks as not storable are returned without touching the cache.
    ///
    /// `is_current` may run while the cache is locked and must not use it.
    pub fn get_or_refresh(
        &self,
        key: Fingerprint,
        is_current: impl Fn(&V) -> bool,
        compute: impl FnOnce() -> (V, bool),
    ) -> V {
        let cached = self.inner.lock().entries.get(&key).cloned();
        match cached {
            Some(value) if is_current(&value) => {
                self.inner.lock().hits += 1;
                tracing::trace!("{} cache hit {}", self.name, key);
                return value;
            }
            Some(_) => tracing::trace!("{} cache stale {}", self.name, key),
            None => {}
        }
        self.inner.lock().misses += 1;

        let (value, store) = compute();
        if !store {
            return value;
        }

        let mut inner = self.inner.lock();
        if let Some(existing) = inner.entries.get(&key) {
            if is_current(existing) {
                return existing.clone();
            }
        }
        if let Some((evicted, _)) = inner.entries.push(key, value.clone()) {
            if evicted != key {
                tracing::trace!("{} cache evicted {}", self.name, evicted);
            }
        }
        value
    }

    /// Whether `key` is cached, without touching recency.
    pub fn contains(&self, key: Fingerprint) -> bool {
        self.inner.lock().entries.contains(&key)
    }

    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.inner.lock().entries.clear();
    }

    pub fn stats(&self) -> CacheStats {
        let inner = self.inner.lock();
        CacheStats {
            hits: inner.hits,
            misses: inner.misses,
            len: inner.entries.len(),
            capacity: inner.entries.cap().get(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn key(n: u32) -> Fingerprint {
        Fingerprint::builder().u128(n as u128).finish()
    }

    #[test]
    fn test_eviction_is_least_recently_used() {
        let cache = FingerprintCache::new("file", 100);
        for n in 0..100 {
            assert_eq!(cache.insert(key(n), n), None);
        }
        // Touch the oldest entry so that 1 becomes the least recently used.
        assert_eq!(cache.get(key(0)), Some(0));

        assert_eq!(cache.insert(key(100), 100), Some(key(1)));
        assert_eq!(cache.len(), 100);
        assert!(cache.contains(key(0)));
        assert!(!cache.contains(key(1)));
        assert!(cache.contains(key(100)));
    }

    #[test]
    fn test_reinsert_same_key_evicts_nothing() {
        let cache = FingerprintCache::new("buffer", 2);
        cache.insert(key(1), "a");
        cache.insert(key(2), "b");
        assert_eq!(cache.insert(key(1), "c"), None);
        assert_eq!(cache.get(key(1)), Some("c"));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_get_or_insert_with_shares_value() {
        let cache = FingerprintCache::new("file", 4);
        let first = cache.get_or_insert_with(key(7), || Arc::new(String::from("meta")));
        let second = cache.get_or_insert_with(key(7), || unreachable!("cached"));
        assert!(Arc::ptr_eq(&first, &second));

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.len, 1);
        assert_eq!(stats.capacity, 4);
        assert!((stats.hit_rate() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_recursive_compute_does_not_deadlock() {
        let cache = FingerprintCache::new("file", 4);
        let outer = cache.get_or_insert_with(key(1), || {
            let inner = cache.get_or_insert_with(key(2), || 2);
            inner + 1
        });
        assert_eq!(outer, 3);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_racing_callers_share_first_value() {
        let cache = FingerprintCache::new("file", 4);
        let results: Vec<Arc<usize>> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|n| {
                    let cache = &cache;
                    scope.spawn(move || cache.get_or_insert_with(key(1), || Arc::new(n)))
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(cache.len(), 1);
        let stored = cache.get(key(1)).unwrap();
        for result in &results {
            assert!(Arc::ptr_eq(result, &stored));
        }
    }

    #[test]
    fn test_get_or_refresh_replaces_stale_value() {
        let cache = FingerprintCache::new("file", 4);
        cache.insert(key(1), 1);

        let fresh = cache.get_or_refresh(key(1), |v| *v > 1, || (2, true));
        assert_eq!(fresh, 2);
        assert_eq!(cache.get(key(1)), Some(2));

        let kept = cache.get_or_refresh(key(1), |v| *v > 1, || unreachable!("current"));
        assert_eq!(kept, 2);
    }

    #[test]
    fn test_get_or_refresh_skips_unstorable_value() {
        let cache = FingerprintCache::new("file", 4);
        assert_eq!(cache.get_or_refresh(key(1), |_| true, || (1, false)), 1);
        assert!(cache.is_empty());
        assert_eq!(cache.stats().misses, 1);
    }

    #[test]
    fn test_zero_capacity_holds_one_entry() {
        let cache = FingerprintCache::new("tiny", 0);
        cache.insert(key(1), 1);
        cache.insert(key(2), 2);
        assert_eq!(cache.stats().capacity, 1);
        assert_eq!(cache.get(key(2)), Some(2));
        cache.clear();
        assert!(cache.is_empty());
    }
}
