//! StripedHashMap: fixed array of independently locked buckets.

use crate::bernstein::BuildBernstein;
use crate::bucket::Bucket;
use core::fmt;
use core::hash::{BuildHasher, Hasher};

/// Bucket count used by [`StripedHashMap::default`].
pub const DEFAULT_CAPACITY: usize = 4096;

/// Rejected construction parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CapacityError {
    #[error("bucket capacity must be at least 1")]
    Zero,
}

/// Concurrent map from byte-string keys to `u32` values with a bucket
/// count fixed at construction.
///
/// Every operation hashes the key, locks the single bucket at
/// `hash(key) % capacity`, scans that bucket's chain, and unlocks before
/// returning. Operations routed to different buckets never wait on each
/// other; operations on the same bucket, reads included, are serialized.
///
/// Keys are compared byte for byte and copied into the map on first
/// insert.
///
/// ```
/// use striped_hashmap::StripedHashMap;
///
/// let m = StripedHashMap::new(4);
/// m.put("a", 1);
/// m.put("b", 2);
/// m.put("a", 3);
/// assert!(m.contains("a"));
/// assert_eq!(m.get("a"), 3);
/// assert_eq!(m.get("b"), 2);
/// assert_eq!(m.try_get("c"), None);
/// ```
pub struct StripedHashMap<S = BuildBernstein> {
    hasher: S,
    buckets: Box<[Bucket]>,
}

impl StripedHashMap {
    /// Create a map with `capacity` empty buckets and the Bernstein hasher.
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        Self::with_hasher(capacity, BuildBernstein)
    }

    /// Like [`new`](Self::new), but reports a zero capacity as an error.
    pub fn try_new(capacity: usize) -> Result<Self, CapacityError> {
        Self::try_with_hasher(capacity, BuildBernstein)
    }
}

impl Default for StripedHashMap {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl<S> StripedHashMap<S>
where
    S: BuildHasher,
{
    /// Panics if `capacity` is zero.
    pub fn with_hasher(capacity: usize, hasher: S) -> Self {
        assert!(capacity > 0, "StripedHashMap needs at least one bucket");
        Self::build(capacity, hasher)
    }

    /// Like [`with_hasher`](Self::with_hasher), but reports a zero capacity
    /// as an error.
    pub fn try_with_hasher(capacity: usize, hasher: S) -> Result<Self, CapacityError> {
        if capacity == 0 {
            return Err(CapacityError::Zero);
        }
        Ok(Self::build(capacity, hasher))
    }

    fn build(capacity: usize, hasher: S) -> Self {
        let buckets = (0..capacity).map(|_| Bucket::new()).collect();
        Self { hasher, buckets }
    }

    /// Number of buckets; fixed for the map's lifetime.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// The build hasher used to route keys to buckets.
    pub fn hasher(&self) -> &S {
        &self.hasher
    }

    /// Index of the bucket that owns `key`. Keys with equal indices contend
    /// for the same lock.
    pub fn bucket_index<K>(&self, key: &K) -> usize
    where
        K: AsRef<[u8]> + ?Sized,
    {
        let mut h = self.hasher.build_hasher();
        h.write(key.as_ref());
        // capacity >= 1, so the remainder fits in usize.
        (h.finish() % self.buckets.len() as u64) as usize
    }

    #[inline]
    fn bucket<K>(&self, key: &K) -> &Bucket
    where
        K: AsRef<[u8]> + ?Sized,
    {
        &self.buckets[self.bucket_index(key)]
    }

    /// Whether `key` has been inserted.
    pub fn contains<K>(&self, key: &K) -> bool
    where
        K: AsRef<[u8]> + ?Sized,
    {
        let key = key.as_ref();
        self.bucket(key).lock().find(key).is_some()
    }

    /// Insert `key` with `value`, or overwrite the value if `key` is
    /// already present. The key bytes are copied on first insert.
    pub fn put<K>(&self, key: &K, value: u32)
    where
        K: AsRef<[u8]> + ?Sized,
    {
        let key = key.as_ref();
        self.bucket(key).lock().upsert(key, value);
    }

    /// Value stored for `key`, or `None` if it was never inserted.
    pub fn try_get<K>(&self, key: &K) -> Option<u32>
    where
        K: AsRef<[u8]> + ?Sized,
    {
        let key = key.as_ref();
        self.bucket(key).lock().find(key).map(|e| e.value())
    }

    /// Value stored for `key`.
    ///
    /// Panics if `key` is absent; use [`contains`](Self::contains) or
    /// [`try_get`](Self::try_get) when presence is not already known. The
    /// bucket lock is released before the panic.
    pub fn get<K>(&self, key: &K) -> u32
    where
        K: AsRef<[u8]> + ?Sized,
    {
        match self.try_get(key) {
            Some(v) => v,
            None => panic!(
                "StripedHashMap::get on absent key {:?}",
                String::from_utf8_lossy(key.as_ref())
            ),
        }
    }

    /// Release every entry and bucket lock. Taking `self` by value means no
    /// other operation can be in flight; a map shared through `Arc` must be
    /// reclaimed with `Arc::try_unwrap` first.
    pub fn destroy(self) {
        drop(self);
    }

    /// Total lock acquisitions, across all buckets, that found the lock
    /// held by another thread and had to block.
    #[cfg(feature = "contention_stats")]
    pub fn contended_acquisitions(&self) -> u64 {
        self.buckets.iter().map(Bucket::contended).sum()
    }
}

// Whole-table inspection for tests. Locks one bucket at a time.
#[cfg(test)]
impl<S: BuildHasher> StripedHashMap<S> {
    pub(crate) fn entry_count(&self) -> usize {
        self.buckets.iter().map(|b| b.lock().len()).sum()
    }

    pub(crate) fn copies_of(&self, key: &[u8]) -> usize {
        self.buckets
            .iter()
            .map(|b| b.lock().iter().filter(|e| e.key() == key).count())
            .sum()
    }

    /// Entries whose key routes to a bucket other than the one holding them.
    pub(crate) fn misrouted_entries(&self) -> usize {
        let mut n = 0;
        for (i, b) in self.buckets.iter().enumerate() {
            n += b
                .lock()
                .iter()
                .filter(|e| self.bucket_index(e.key()) != i)
                .count();
        }
        n
    }
}

impl<S> fmt::Debug for StripedHashMap<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StripedHashMap")
            .field("capacity", &self.buckets.len())
            .finish_non_exhaustive()
    }
}
