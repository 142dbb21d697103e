//! Bounded TTL cache for search responses
//!
//! Insertion-order eviction, not LRU: when the bound is exceeded the
//! oldest-inserted entry goes, even if it is requested constantly. Stale
//! entries are skipped on lookup rather than purged eagerly; a `put` with
//! the same key refreshes the value in place without moving the key's
//! eviction position. The clock is injected so TTL behavior is
//! deterministic under test.

use crate::core::clock::Clock;
use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

struct Entry<V> {
    value: V,
    inserted_at: DateTime<Utc>,
}

struct Inner<V> {
    entries: HashMap<String, Entry<V>>,
    insertion_order: VecDeque<String>,
}

/// Bounded map with per-entry TTL and insertion-order eviction
pub struct TimedCache<V> {
    inner: Mutex<Inner<V>>,
    capacity: usize,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl<V: Clone> TimedCache<V> {
    pub fn new(capacity: usize, ttl_secs: u64, clock: Arc<dyn Clock>) -> Self {
        Self {
            inner: Mutex::new(Inner {
                entries: HashMap::new(),
                insertion_order: VecDeque::new(),
            }),
            capacity,
            ttl: Duration::seconds(ttl_secs as i64),
            clock,
        }
    }

    /// Fresh value for `key`, or `None` when absent or expired
    pub fn get(&self, key: &str) -> Option<V> {
        let now = self.clock.now();
        let inner = self.inner.lock();
        let entry = inner.entries.get(key)?;
        if now - entry.inserted_at < self.ttl {
            Some(entry.value.clone())
        } else {
            None
        }
    }

    /// Insert or refresh a value, evicting oldest-inserted past capacity
    pub fn put(&self, key: impl Into<String>, value: V) {
        let key = key.into();
        let now = self.clock.now();
        let mut inner = self.inner.lock();

        let replaced = inner
            .entries
            .insert(
                key.clone(),
                Entry {
                    value,
                    inserted_at: now,
                },
            )
            .is_some();

        if !replaced {
            inner.insertion_order.push_back(key);
        }

        while inner.entries.len() > self.capacity {
            match inner.insertion_order.pop_front() {
                Some(oldest) => {
                    inner.entries.remove(&oldest);
                }
                None => break,
            }
        }
    }

    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    /// Clock whose time is advanced by hand
    struct ManualClock(Mutex<DateTime<Utc>>);

    impl ManualClock {
        fn starting_at(time: DateTime<Utc>) -> Arc<Self> {
            Arc::new(Self(Mutex::new(time)))
        }

        fn advance_secs(&self, secs: i64) {
            let mut now = self.0.lock();
            *now = *now + Duration::seconds(secs);
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> DateTime<Utc> {
            *self.0.lock()
        }
    }

    fn base_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 18, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_round_trip() {
        let clock = ManualClock::starting_at(base_time());
        let cache: TimedCache<String> = TimedCache::new(100, 600, clock);

        cache.put("지갑_신촌", "response".to_string());
        assert_eq!(cache.get("지갑_신촌"), Some("response".to_string()));
        assert_eq!(cache.get("다른키"), None);
    }

    #[test]
    fn test_entries_expire_after_ttl() {
        let clock = ManualClock::starting_at(base_time());
        let cache: TimedCache<u32> = TimedCache::new(100, 600, clock.clone());

        cache.put("k", 1);
        clock.advance_secs(599);
        assert_eq!(cache.get("k"), Some(1));

        clock.advance_secs(1);
        // now - inserted_at == TTL: stale
        assert_eq!(cache.get("k"), None);
        // Skipped, not purged
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_capacity_evicts_oldest_inserted() {
        let clock = ManualClock::starting_at(base_time());
        let cache: TimedCache<usize> = TimedCache::new(100, 600, clock);

        for i in 0..101 {
            cache.put(format!("key-{}", i), i);
        }

        assert_eq!(cache.len(), 100);
        assert_eq!(cache.get("key-0"), None);
        assert_eq!(cache.get("key-1"), Some(1));
        assert_eq!(cache.get("key-100"), Some(100));
    }

    #[test]
    fn test_eviction_ignores_access_recency() {
        let clock = ManualClock::starting_at(base_time());
        let cache: TimedCache<usize> = TimedCache::new(3, 600, clock);

        cache.put("a", 0);
        cache.put("b", 1);
        cache.put("c", 2);
        // Heavy access does not protect the oldest entry
        for _ in 0..10 {
            cache.get("a");
        }
        cache.put("d", 3);

        assert_eq!(cache.get("a"), None);
        assert_eq!(cache.get("b"), Some(1));
    }

    #[test]
    fn test_put_same_key_refreshes_without_duplicating() {
        let clock = ManualClock::starting_at(base_time());
        let cache: TimedCache<u32> = TimedCache::new(2, 600, clock.clone());

        cache.put("a", 1);
        clock.advance_secs(550);
        cache.put("a", 2);
        assert_eq!(cache.len(), 1);

        // Refreshed timestamp: still fresh well past the original TTL
        clock.advance_secs(100);
        assert_eq!(cache.get("a"), Some(2));

        // The key still occupies a single eviction slot
        cache.put("b", 3);
        cache.put("c", 4);
        assert_eq!(cache.get("a"), None);
        assert_eq!(cache.get("b"), Some(3));
        assert_eq!(cache.get("c"), Some(4));
    }
}
