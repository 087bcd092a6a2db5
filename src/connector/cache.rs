//! Bounded cache of group-picker results, keyed by normalized query.

use std::collections::{HashMap, VecDeque};

use super::GroupEntry;

/// Caches the pre-fetched result list for each group search query so that
/// later pages of the same query are served without another upstream call.
///
/// Capacity is a number of distinct queries. Inserting past capacity evicts
/// the oldest inserted key. Entries are never refreshed; a key stays until
/// it is evicted.
#[derive(Debug, Default)]
pub struct PageCache {
    entries: HashMap<String, Vec<GroupEntry>>,
    order: VecDeque<String>,
    capacity: usize,
}

impl PageCache {
    /// Creates a cache that holds at most `capacity` distinct queries.
    /// A capacity of zero disables caching entirely.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self { entries: HashMap::new(), order: VecDeque::new(), capacity }
    }

    /// Returns the cached rows for `key`, if present.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&[GroupEntry]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    /// Stores `rows` under `key`, evicting the oldest key when full.
    ///
    /// Re-inserting an existing key replaces its rows without changing its
    /// position in the eviction order.
    pub fn insert(&mut self, key: String, rows: Vec<GroupEntry>) {
        if self.capacity == 0 {
            return;
        }
        if self.entries.insert(key.clone(), rows).is_none() {
            self.order.push_back(key);
            while self.order.len() > self.capacity {
                if let Some(oldest) = self.order.pop_front() {
                    self.entries.remove(&oldest);
                }
            }
        }
    }

    /// Number of cached queries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::PageCache;
    use crate::connector::GroupEntry;

    fn rows(tag: &str) -> Vec<GroupEntry> {
        vec![GroupEntry { name: tag.to_string(), html: format!("<b>{tag}</b>") }]
    }

    #[test]
    fn insert_past_capacity_evicts_oldest_key() {
        let mut cache = PageCache::new(2);
        cache.insert("g_a".to_string(), rows("a"));
        cache.insert("g_b".to_string(), rows("b"));
        cache.insert("g_c".to_string(), rows("c"));

        assert_eq!(cache.len(), 2);
        assert!(cache.get("g_a").is_none());
        assert!(cache.get("g_b").is_some());
        assert!(cache.get("g_c").is_some());
    }

    #[test]
    fn reinsert_replaces_rows_without_eviction() {
        let mut cache = PageCache::new(2);
        cache.insert("g_a".to_string(), rows("a"));
        cache.insert("g_b".to_string(), rows("b"));
        cache.insert("g_a".to_string(), rows("a2"));

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get("g_a").and_then(|r| r.first()).map(|e| e.name.as_str()), Some("a2"));
    }

    #[test]
    fn zero_capacity_caches_nothing() {
        let mut cache = PageCache::new(0);
        cache.insert("g_a".to_string(), rows("a"));
        assert!(cache.is_empty());
        assert!(cache.get("g_a").is_none());
    }
}
