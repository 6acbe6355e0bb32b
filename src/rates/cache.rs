//! A generic size- and TTL-bounded cache.
//!
//! The only caching concern in the engine: the service-code lookup keeps
//! up to a fixed number of entries, each valid for a fixed time-to-live.
//! Expired entries count as misses; inserting at capacity evicts expired
//! entries first, then the oldest live entry.

use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

struct Entry<V> {
    value: V,
    inserted_at: Instant,
}

/// A bounded map with per-entry expiry.
///
/// # Example
///
/// ```
/// use billing_engine::rates::TtlCache;
/// use std::time::Duration;
///
/// let mut cache: TtlCache<String, i64> = TtlCache::new(2, Duration::from_secs(60));
/// cache.insert("a".to_string(), 1);
/// assert_eq!(cache.get(&"a".to_string()), Some(1));
/// assert_eq!(cache.get(&"b".to_string()), None);
/// ```
pub struct TtlCache<K, V> {
    entries: HashMap<K, Entry<V>>,
    max_entries: usize,
    ttl: Duration,
}

impl<K: Eq + Hash + Clone, V: Clone> TtlCache<K, V> {
    /// Creates a cache holding at most `max_entries` values for `ttl` each.
    pub fn new(max_entries: usize, ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            max_entries,
            ttl,
        }
    }

    /// Returns the cached value for `key`, treating expired entries as
    /// misses and dropping them.
    pub fn get(&mut self, key: &K) -> Option<V> {
        let expired = match self.entries.get(key) {
            Some(entry) => entry.inserted_at.elapsed() >= self.ttl,
            None => return None,
        };
        if expired {
            self.entries.remove(key);
            return None;
        }
        self.entries.get(key).map(|entry| entry.value.clone())
    }

    /// Inserts a value, evicting as needed to stay within capacity.
    pub fn insert(&mut self, key: K, value: V) {
        if !self.entries.contains_key(&key) && self.entries.len() >= self.max_entries {
            self.evict_one();
        }
        self.entries.insert(
            key,
            Entry {
                value,
                inserted_at: Instant::now(),
            },
        );
    }

    /// Number of entries currently held, expired or not.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn evict_one(&mut self) {
        let ttl = self.ttl;
        self.entries.retain(|_, entry| entry.inserted_at.elapsed() < ttl);
        if self.entries.len() < self.max_entries {
            return;
        }
        // Still full: drop the oldest live entry.
        if let Some(oldest) = self
            .entries
            .iter()
            .min_by_key(|(_, entry)| entry.inserted_at)
            .map(|(key, _)| key.clone())
        {
            self.entries.remove(&oldest);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_miss_then_hit() {
        let mut cache: TtlCache<&str, i64> = TtlCache::new(10, Duration::from_secs(60));
        assert_eq!(cache.get(&"k"), None);
        cache.insert("k", 42);
        assert_eq!(cache.get(&"k"), Some(42));
    }

    #[test]
    fn test_zero_ttl_expires_immediately() {
        let mut cache: TtlCache<&str, i64> = TtlCache::new(10, Duration::ZERO);
        cache.insert("k", 42);
        assert_eq!(cache.get(&"k"), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_capacity_bound_evicts_oldest() {
        let mut cache: TtlCache<String, i64> = TtlCache::new(3, Duration::from_secs(60));
        cache.insert("a".to_string(), 1);
        cache.insert("b".to_string(), 2);
        cache.insert("c".to_string(), 3);
        cache.insert("d".to_string(), 4);

        assert_eq!(cache.len(), 3);
        assert_eq!(cache.get(&"a".to_string()), None);
        assert_eq!(cache.get(&"d".to_string()), Some(4));
    }

    #[test]
    fn test_reinsert_existing_key_does_not_evict() {
        let mut cache: TtlCache<String, i64> = TtlCache::new(2, Duration::from_secs(60));
        cache.insert("a".to_string(), 1);
        cache.insert("b".to_string(), 2);
        cache.insert("a".to_string(), 10);

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get(&"a".to_string()), Some(10));
        assert_eq!(cache.get(&"b".to_string()), Some(2));
    }
}
