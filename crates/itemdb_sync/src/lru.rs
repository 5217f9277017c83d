//! Fixed-capacity cache with true least-recently-used eviction.

use std::collections::HashMap;
use std::hash::Hash;

/// A fixed-capacity map that evicts its least-recently-used entry on
/// overflow.
///
/// [`get`](Self::get) and [`insert`](Self::insert) promote the touched key
/// to most-recently-used; [`contains_key`](Self::contains_key) does not.
/// Capacity is clamped to a floor of 1.
#[derive(Debug)]
pub struct LruCache<K, V> {
    entries: HashMap<K, V>,
    // Keys ordered least-recently-used first.
    order: Vec<K>,
    max_size: usize,
}

impl<K: Eq + Hash + Clone, V> LruCache<K, V> {
    /// Creates a cache holding at most `max_size` entries (minimum 1).
    #[must_use]
    pub fn new(max_size: usize) -> Self {
        Self {
            entries: HashMap::new(),
            order: Vec::new(),
            max_size: max_size.max(1),
        }
    }

    /// Current entry count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the cache holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The configured capacity.
    #[must_use]
    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Returns the value for `key`, promoting it to most-recently-used.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        if self.entries.contains_key(key) {
            self.promote(key);
        }
        self.entries.get(key)
    }

    /// True when `key` is cached. Does not affect recency.
    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    /// Inserts or replaces `key`, promoting it to most-recently-used, and
    /// evicts the least-recently-used entry on overflow. Returns the
    /// previous value when the key was already cached.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let previous = self.entries.insert(key.clone(), value);
        if previous.is_some() {
            self.promote(&key);
        } else {
            self.order.push(key);
            self.evict_to_capacity();
        }
        previous
    }

    /// Removes `key` from the cache.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let removed = self.entries.remove(key);
        if removed.is_some() {
            self.order.retain(|k| k != key);
        }
        removed
    }

    /// Reconfigures the capacity (minimum 1), evicting from the
    /// least-recently-used end until the cache fits.
    pub fn set_max_size(&mut self, max_size: usize) {
        self.max_size = max_size.max(1);
        self.evict_to_capacity();
    }

    /// Drops all entries, keeping the capacity.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    fn promote(&mut self, key: &K) {
        if let Some(position) = self.order.iter().position(|k| k == key) {
            let k = self.order.remove(position);
            self.order.push(k);
        }
    }

    fn evict_to_capacity(&mut self) {
        while self.entries.len() > self.max_size {
            let oldest = self.order.remove(0);
            self.entries.remove(&oldest);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overflow_evicts_oldest() {
        let mut cache = LruCache::new(2);
        cache.insert(1, "a");
        cache.insert(2, "b");
        cache.insert(3, "c");
        assert!(!cache.contains_key(&1));
        assert!(cache.contains_key(&2));
        assert!(cache.contains_key(&3));
    }

    #[test]
    fn get_promotes_against_eviction() {
        let mut cache = LruCache::new(2);
        cache.insert(1, "a");
        cache.insert(2, "b");
        assert_eq!(cache.get(&1), Some(&"a"));
        cache.insert(3, "c");
        assert!(cache.contains_key(&1));
        assert!(!cache.contains_key(&2));
    }

    #[test]
    fn contains_key_does_not_promote() {
        let mut cache = LruCache::new(2);
        cache.insert(1, "a");
        cache.insert(2, "b");
        assert!(cache.contains_key(&1));
        cache.insert(3, "c");
        // 1 was only peeked, so it is still the eviction victim.
        assert!(!cache.contains_key(&1));
    }

    #[test]
    fn reinsert_promotes_and_replaces() {
        let mut cache = LruCache::new(2);
        cache.insert(1, "a");
        cache.insert(2, "b");
        assert_eq!(cache.insert(1, "a2"), Some("a"));
        cache.insert(3, "c");
        assert_eq!(cache.get(&1), Some(&"a2"));
        assert!(!cache.contains_key(&2));
    }

    #[test]
    fn shrinking_evicts_from_lru_end() {
        let mut cache = LruCache::new(4);
        for key in 1..=4 {
            cache.insert(key, key * 10);
        }
        cache.get(&1);
        cache.set_max_size(2);
        assert_eq!(cache.len(), 2);
        assert!(cache.contains_key(&4));
        assert!(cache.contains_key(&1));
    }

    #[test]
    fn capacity_floor_is_one() {
        let mut cache = LruCache::new(0);
        assert_eq!(cache.max_size(), 1);
        cache.insert(1, "a");
        cache.insert(2, "b");
        assert_eq!(cache.len(), 1);
        assert!(cache.contains_key(&2));

        cache.set_max_size(0);
        assert_eq!(cache.max_size(), 1);
    }

    #[test]
    fn remove_frees_a_slot() {
        let mut cache = LruCache::new(2);
        cache.insert(1, "a");
        cache.insert(2, "b");
        assert_eq!(cache.remove(&1), Some("a"));
        cache.insert(3, "c");
        assert!(cache.contains_key(&2));
        assert!(cache.contains_key(&3));
    }
}
