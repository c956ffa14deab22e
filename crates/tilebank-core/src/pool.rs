//! Ordered, deduplicated asset pools.
//!
//! A pool assigns every distinct key an index in first-insertion order.
//! Indices are never reassigned: inserting an existing key returns the
//! index it already has and leaves the stored value untouched.

use std::borrow::Borrow;
use std::hash::Hash;

use indexmap::IndexMap;

/// Deduplicated sequence of assets keyed by identity (flag name, string
/// text, asset id, tile content).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetPool<K: Hash + Eq, V = ()> {
    entries: IndexMap<K, V>,
}

impl<K: Hash + Eq, V> AssetPool<K, V> {
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Insert `key` with `value` unless the key is already pooled.
    ///
    /// Returns the index of the key and whether it was newly added.
    pub fn insert(&mut self, key: K, value: V) -> (usize, bool) {
        if let Some(index) = self.entries.get_index_of(&key) {
            return (index, false);
        }
        let (index, _) = self.entries.insert_full(key, value);
        (index, true)
    }

    /// Index of a pooled key.
    pub fn index_of<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.get_index_of(key)
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.contains_key(key)
    }

    /// Value stored for a pooled key.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.get(key)
    }

    /// Key and value at `index`.
    pub fn get_index(&self, index: usize) -> Option<(&K, &V)> {
        self.entries.get_index(index)
    }

    pub fn key(&self, index: usize) -> Option<&K> {
        self.entries.get_index(index).map(|(k, _)| k)
    }

    pub fn value(&self, index: usize) -> Option<&V> {
        self.entries.get_index(index).map(|(_, v)| v)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in index order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.entries.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.keys()
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.values()
    }
}

impl<K: Hash + Eq> AssetPool<K, ()> {
    /// Pool a bare key, returning its index.
    pub fn intern(&mut self, key: K) -> usize {
        self.insert(key, ()).0
    }
}

impl<K: Hash + Eq, V> Default for AssetPool<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Hash + Eq> FromIterator<K> for AssetPool<K, ()> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut pool = Self::new();
        for key in iter {
            pool.intern(key);
        }
        pool
    }
}
