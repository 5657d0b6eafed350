//! ChainedHashTable: separate-chaining hash set with prime bucket counts.

use crate::primes::next_prime;
use crate::reentrancy::ScanGuard;
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use std::collections::hash_map::RandomState;
use tracing::debug;

/// Bucket count requested by [`ChainedHashTable::new`]. Already prime.
pub const DEFAULT_CAPACITY: usize = 101;

#[derive(Clone, Debug)]
struct Slot<K> {
    key: K,
    hash: u64, // computed once at insert, reused by rehash
}

type Bucket<K> = Vec<Slot<K>>;

/// Bucket storage and occupancy. Kept apart from the hasher and the guard
/// so a held `ScanToken` does not lock out mutation of the chains.
#[derive(Clone)]
struct Chains<K> {
    buckets: Vec<Bucket<K>>,
    size: usize,
}

impl<K: Eq> Chains<K> {
    fn with_len(len: usize) -> Self {
        let mut buckets = Vec::with_capacity(len);
        buckets.resize_with(len, Vec::new);
        Self { buckets, size: 0 }
    }

    fn bucket_of(&self, hash: u64) -> usize {
        // Hashes are unsigned, so the remainder is already in range.
        (hash % self.buckets.len() as u64) as usize
    }

    fn find<Q>(&self, hash: u64, q: &Q) -> (usize, Option<usize>)
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        let idx = self.bucket_of(hash);
        let pos = self.buckets[idx]
            .iter()
            .position(|s| s.hash == hash && s.key.borrow() == q);
        (idx, pos)
    }

    // Shared by insert and rehash; never calls `K: Hash`.
    fn insert(&mut self, slot: Slot<K>) -> bool {
        let idx = self.bucket_of(slot.hash);
        let bucket = &mut self.buckets[idx];
        if bucket
            .iter()
            .any(|s| s.hash == slot.hash && s.key == slot.key)
        {
            return false;
        }
        bucket.push(slot);
        self.size += 1;
        if self.size > self.buckets.len() {
            self.rehash();
        }
        true
    }

    fn rehash(&mut self) {
        let old_len = self.buckets.len();
        let new_len = next_prime(old_len.saturating_mul(2));
        let old = core::mem::replace(self, Self::with_len(new_len));
        let moved = old.size;
        for slot in old.buckets.into_iter().flatten() {
            self.insert(slot);
        }
        debug_assert_eq!(self.size, moved);
        debug!(old_len, new_len, size = self.size, "rehashed chained table");
    }
}

/// A set of unique keys stored in prime-many chains.
///
/// The table grows to the next prime at or above twice its bucket count as
/// soon as it holds more keys than buckets, so the load factor stays at or
/// below 1.0 between calls. It never shrinks.
///
/// Keys must uphold the usual `Hash`/`Eq` contract: equal keys hash
/// identically. A key type that breaks it gets unspecified membership
/// answers, not memory unsafety.
#[derive(Clone)]
pub struct ChainedHashTable<K, S = RandomState> {
    hasher: S,
    chains: Chains<K>,
    guard: ScanGuard,
}

impl<K> ChainedHashTable<K>
where
    K: Eq + Hash,
{
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates a table with `next_prime(capacity)` buckets. A zero hint is
    /// treated as 1.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, RandomState::new())
    }
}

impl<K> Default for ChainedHashTable<K>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over the keys of a [`ChainedHashTable`], bucket by bucket.
pub struct Iter<'a, K> {
    buckets: core::slice::Iter<'a, Bucket<K>>,
    chain: core::slice::Iter<'a, Slot<K>>,
    remaining: usize,
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(slot) = self.chain.next() {
                self.remaining -= 1;
                return Some(&slot.key);
            }
            self.chain = self.buckets.next()?.iter();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K> ExactSizeIterator for Iter<'_, K> {}

impl<K, S> ChainedHashTable<K, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    pub fn with_hasher(hasher: S) -> Self {
        Self::with_capacity_and_hasher(DEFAULT_CAPACITY, hasher)
    }

    pub fn with_capacity_and_hasher(capacity: usize, hasher: S) -> Self {
        Self {
            hasher,
            chains: Chains::with_len(next_prime(capacity.max(1))),
            guard: ScanGuard::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.chains.size
    }

    pub fn is_empty(&self) -> bool {
        self.chains.size == 0
    }

    /// Number of buckets (the table length). Always prime.
    pub fn bucket_count(&self) -> usize {
        self.chains.buckets.len()
    }

    pub fn load_factor(&self) -> f64 {
        self.len() as f64 / self.bucket_count() as f64
    }

    /// Length of the longest chain; 0 for an empty table.
    pub fn longest_chain(&self) -> usize {
        self.chains.buckets.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Adds `key` unless an equal key is already present.
    ///
    /// Returns `true` if the key was added. May trigger a rehash.
    pub fn insert(&mut self, key: K) -> bool {
        let _g = self.guard.enter();
        let hash = self.hasher.hash_one(&key);
        self.chains.insert(Slot { key, hash })
    }

    pub fn contains<Q>(&self, q: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let _g = self.guard.enter();
        let hash = self.hasher.hash_one(q);
        self.chains.find(hash, q).1.is_some()
    }

    /// Removes the key equal to `q`, if any. Returns whether one was removed.
    pub fn remove<Q>(&mut self, q: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let _g = self.guard.enter();
        let hash = self.hasher.hash_one(q);
        match self.chains.find(hash, q) {
            (idx, Some(pos)) => {
                self.chains.buckets[idx].remove(pos);
                self.chains.size -= 1;
                true
            }
            (_, None) => false,
        }
    }

    /// Empties every bucket. The bucket count is left as is.
    pub fn clear(&mut self) {
        let _g = self.guard.enter();
        for bucket in &mut self.chains.buckets {
            bucket.clear();
        }
        self.chains.size = 0;
    }

    pub fn iter(&self) -> Iter<'_, K> {
        Iter {
            buckets: self.chains.buckets.iter(),
            chain: <&[Slot<K>]>::default().iter(),
            remaining: self.chains.size,
        }
    }
}

impl<'a, K, S> IntoIterator for &'a ChainedHashTable<K, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    type Item = &'a K;
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, S> Extend<K> for ChainedHashTable<K, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<K, S> FromIterator<K> for ChainedHashTable<K, S>
where
    K: Eq + Hash,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut table = Self::with_hasher(S::default());
        table.extend(iter);
        table
    }
}

impl<K, S> fmt::Debug for ChainedHashTable<K, S>
where
    K: Eq + Hash + fmt::Debug,
    S: BuildHasher,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
