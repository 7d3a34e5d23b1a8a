//! HashtableMap: separately chained hash map with load-factor driven rehashing.

use crate::config::{MapConfig, MAX_LOAD_FACTOR};
use crate::error::MapError;
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use std::collections::hash_map::RandomState;
use tracing::debug;

#[derive(Debug, Clone)]
struct Entry<K, V> {
    key: K,
    value: V,
    hash: u64,
}

type Chain<K, V> = Vec<Entry<K, V>>;

/// Generic key/value map built on an array of collision chains.
///
/// A key lives in bucket `hash(key) % capacity`. Every entry caches its hash,
/// so growing the table recomputes bucket positions without calling back into
/// `K: Hash`.
#[derive(Clone)]
pub struct HashtableMap<K, V, S = RandomState> {
    hasher: S,
    buckets: Vec<Chain<K, V>>,
    len: usize,
}

impl<K, V> HashtableMap<K, V>
where
    K: Eq + Hash,
{
    /// Empty map with the default bucket count (64).
    pub fn new() -> Self {
        Self::from_config(MapConfig::default())
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self::from_config(MapConfig::default().initial_capacity(capacity))
    }
}

impl<K, V> Default for HashtableMap<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over entries in bucket order.
pub struct Iter<'a, K, V> {
    it: core::iter::Flatten<core::slice::Iter<'a, Chain<K, V>>>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.it.next().map(|e| (&e.key, &e.value))
    }
}

/// Iterator over entries in bucket order with mutable values.
pub struct IterMut<'a, K, V> {
    it: core::iter::Flatten<core::slice::IterMut<'a, Chain<K, V>>>,
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.it.next().map(|e| (&e.key, &mut e.value))
    }
}

fn empty_buckets<K, V>(capacity: usize) -> Vec<Chain<K, V>> {
    (0..capacity).map(|_| Vec::new()).collect()
}

#[inline]
fn bucket_for(hash: u64, capacity: usize) -> usize {
    (hash % capacity as u64) as usize
}

impl<K, V, S> HashtableMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    pub fn with_hasher(hasher: S) -> Self {
        Self::with_config_and_hasher(MapConfig::default(), hasher)
    }

    pub fn with_capacity_and_hasher(capacity: usize, hasher: S) -> Self {
        Self::with_config_and_hasher(MapConfig::default().initial_capacity(capacity), hasher)
    }

    pub fn with_config_and_hasher(config: MapConfig, hasher: S) -> Self {
        Self {
            hasher,
            buckets: empty_buckets(config.bucket_count()),
            len: 0,
        }
    }

    pub fn from_config(config: MapConfig) -> Self
    where
        S: Default,
    {
        Self::with_config_and_hasher(config, S::default())
    }

    fn make_hash<Q>(&self, q: &Q) -> u64
    where
        Q: ?Sized + Hash,
    {
        self.hasher.hash_one(q)
    }

    /// Bucket and chain position of `q`, if present.
    fn locate<Q>(&self, q: &Q) -> Option<(usize, usize)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let hash = self.make_hash(q);
        let bucket = bucket_for(hash, self.buckets.len());
        self.buckets[bucket]
            .iter()
            .position(|e| e.hash == hash && e.key.borrow() == q)
            .map(|pos| (bucket, pos))
    }

    pub fn len(&self) -> usize {
        self.len
    }
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of buckets.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    pub fn load_factor(&self) -> f64 {
        self.len as f64 / self.buckets.len() as f64
    }

    /// Insert a new mapping. Fails with `DuplicateKey` and leaves the map
    /// untouched when `key` is already present.
    pub fn put(&mut self, key: K, value: V) -> Result<(), MapError> {
        let hash = self.make_hash(&key);
        let bucket = bucket_for(hash, self.buckets.len());
        if self.buckets[bucket]
            .iter()
            .any(|e| e.hash == hash && e.key == key)
        {
            return Err(MapError::DuplicateKey);
        }
        self.push_entry(bucket, Entry { key, value, hash });
        Ok(())
    }

    /// Insert or overwrite, returning the value previously mapped to `key`.
    pub fn upsert(&mut self, key: K, value: V) -> Option<V> {
        let hash = self.make_hash(&key);
        let bucket = bucket_for(hash, self.buckets.len());
        if let Some(e) = self.buckets[bucket]
            .iter_mut()
            .find(|e| e.hash == hash && e.key == key)
        {
            return Some(core::mem::replace(&mut e.value, value));
        }
        self.push_entry(bucket, Entry { key, value, hash });
        None
    }

    fn push_entry(&mut self, bucket: usize, entry: Entry<K, V>) {
        self.buckets[bucket].push(entry);
        self.len += 1;
        if self.load_factor() >= MAX_LOAD_FACTOR {
            self.rehash(self.buckets.len() * 2);
        }
    }

    /// Rebuild the table with `new_capacity` buckets, placing every entry by
    /// its cached hash under the new capacity.
    fn rehash(&mut self, new_capacity: usize) {
        debug!(
            old_capacity = self.buckets.len(),
            new_capacity,
            len = self.len,
            "rehashing chained map"
        );
        let old = core::mem::replace(&mut self.buckets, empty_buckets(new_capacity));
        for entry in old.into_iter().flatten() {
            let bucket = bucket_for(entry.hash, new_capacity);
            self.buckets[bucket].push(entry);
        }
    }

    pub fn contains_key<Q>(&self, q: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.locate(q).is_some()
    }

    pub fn get<Q>(&self, q: &Q) -> Result<&V, MapError>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let (bucket, pos) = self.locate(q).ok_or(MapError::KeyNotFound)?;
        Ok(&self.buckets[bucket][pos].value)
    }

    pub fn get_mut<Q>(&mut self, q: &Q) -> Result<&mut V, MapError>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let (bucket, pos) = self.locate(q).ok_or(MapError::KeyNotFound)?;
        Ok(&mut self.buckets[bucket][pos].value)
    }

    /// Remove the mapping for `q` and return its value.
    pub fn remove<Q>(&mut self, q: &Q) -> Result<V, MapError>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let (bucket, pos) = self.locate(q).ok_or(MapError::KeyNotFound)?;
        // Shift rather than swap so the remaining chain keeps its order.
        let entry = self.buckets[bucket].remove(pos);
        self.len -= 1;
        Ok(entry.value)
    }

    /// Drop every entry. The bucket count is kept.
    pub fn clear(&mut self) {
        for chain in &mut self.buckets {
            chain.clear();
        }
        self.len = 0;
    }

    /// Snapshot of all keys in bucket traversal order.
    pub fn keys(&self) -> Vec<K>
    where
        K: Clone,
    {
        self.iter().map(|(k, _)| k.clone()).collect()
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.iter().map(|(_, v)| v)
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            it: self.buckets.iter().flatten(),
        }
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut {
            it: self.buckets.iter_mut().flatten(),
        }
    }
}

impl<K, V, S> fmt::Debug for HashtableMap<K, V, S>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.buckets.iter().flatten().map(|e| (&e.key, &e.value)))
            .finish()
    }
}
