//! Keyed snapshot store for fetched row collections.
//!
//! A host fetches a collection, stores the snapshot under a key and keeps
//! showing it until a refetch succeeds. A failed refetch never evicts the
//! snapshot it was meant to replace.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::hash::Hash;
use tracing::debug;

/// Snapshots keyed by `K`, replaced only by a successful refetch.
#[derive(Debug, Clone)]
pub struct SnapshotCache<K, V> {
    entries: HashMap<K, V>,
}

impl<K, V> Default for SnapshotCache<K, V> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash, V> SnapshotCache<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.get(key)
    }

    /// Store a snapshot, replacing any previous one.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.entries.insert(key, value)
    }

    /// Drop the snapshot for `key`, returning it.
    pub fn invalidate<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.remove(key)
    }

    /// Return the stored snapshot, fetching and storing it on a miss.
    ///
    /// # Errors
    ///
    /// Propagates the fetch error; nothing is stored in that case.
    pub fn get_or_fetch<E>(&mut self, key: K, fetch: impl FnOnce() -> Result<V, E>) -> Result<&V, E> {
        match self.entries.entry(key) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => Ok(entry.insert(fetch()?)),
        }
    }

    /// Refetch and replace the snapshot for `key`.
    ///
    /// The previous snapshot is invalidated only once `fetch` succeeds.
    ///
    /// # Errors
    ///
    /// Propagates the fetch error and leaves the stored snapshot untouched.
    pub fn refresh<E>(&mut self, key: K, fetch: impl FnOnce() -> Result<V, E>) -> Result<&V, E> {
        let fresh = fetch()?;
        match self.entries.entry(key) {
            Entry::Occupied(mut entry) => {
                debug!("replacing cached snapshot");
                entry.insert(fresh);
                Ok(entry.into_mut())
            }
            Entry::Vacant(entry) => Ok(entry.insert(fresh)),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_or_fetch_fetches_once() {
        let mut cache: SnapshotCache<&str, Vec<u32>> = SnapshotCache::new();
        let mut calls = 0;

        for _ in 0..3 {
            let rows = cache
                .get_or_fetch("people", || {
                    calls += 1;
                    Ok::<_, String>(vec![1, 2, 3])
                })
                .unwrap();
            assert_eq!(rows, &vec![1, 2, 3]);
        }

        assert_eq!(calls, 1);
    }

    #[test]
    fn failed_fetch_stores_nothing() {
        let mut cache: SnapshotCache<&str, Vec<u32>> = SnapshotCache::new();

        let result = cache.get_or_fetch("people", || Err("offline"));

        assert_eq!(result, Err("offline"));
        assert!(cache.is_empty());
    }

    #[test]
    fn refresh_replaces_on_success() {
        let mut cache = SnapshotCache::new();
        cache.insert("people", vec![1]);

        let rows = cache.refresh("people", || Ok::<_, String>(vec![1, 2])).unwrap();

        assert_eq!(rows, &vec![1, 2]);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn refresh_failure_keeps_previous_snapshot() {
        let mut cache = SnapshotCache::new();
        cache.insert("people", vec![1]);

        let result = cache.refresh("people", || Err::<Vec<u32>, _>("timeout"));

        assert_eq!(result, Err("timeout"));
        assert_eq!(cache.get(&"people"), Some(&vec![1]));
    }

    #[test]
    fn invalidate_removes_snapshot() {
        let mut cache = SnapshotCache::new();
        cache.insert("contracts", vec!["a"]);

        assert_eq!(cache.invalidate(&"contracts"), Some(vec!["a"]));
        assert_eq!(cache.get(&"contracts"), None);
    }
}
