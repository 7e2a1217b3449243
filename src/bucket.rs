//! Bucket: one lock stripe guarding a chain of entries.
//!
//! The chain is only reachable through the bucket's mutex guard, so "read
//! or mutated only while the lock is held" is enforced by the types rather
//! than by convention.

use parking_lot::{Mutex, MutexGuard};

#[cfg(feature = "contention_stats")]
use core::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug)]
pub(crate) struct Entry {
    key: Box<[u8]>,
    value: u32,
}

impl Entry {
    #[cfg(test)]
    pub(crate) fn key(&self) -> &[u8] {
        &self.key
    }

    pub(crate) fn value(&self) -> u32 {
        self.value
    }
}

/// Entries colliding on one bucket index. Order is unspecified; new
/// entries are appended.
#[derive(Debug, Default)]
pub(crate) struct Chain {
    entries: Vec<Entry>,
}

impl Chain {
    fn position(&self, key: &[u8]) -> Option<usize> {
        self.entries.iter().position(|e| &*e.key == key)
    }

    pub(crate) fn find(&self, key: &[u8]) -> Option<&Entry> {
        self.position(key).map(|i| &self.entries[i])
    }

    /// Overwrite the value for `key` in place, or append a new entry owning
    /// a copy of the key bytes.
    pub(crate) fn upsert(&mut self, key: &[u8], value: u32) {
        match self.position(key) {
            Some(i) => self.entries[i].value = value,
            None => self.entries.push(Entry {
                key: key.into(),
                value,
            }),
        }
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub(crate) fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }
}

#[derive(Debug, Default)]
pub(crate) struct Bucket {
    chain: Mutex<Chain>,
    #[cfg(feature = "contention_stats")]
    contended: AtomicU64,
}

impl Bucket {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Block until this bucket's lock is held.
    #[inline]
    pub(crate) fn lock(&self) -> MutexGuard<'_, Chain> {
        #[cfg(feature = "contention_stats")]
        {
            if let Some(g) = self.chain.try_lock() {
                return g;
            }
            self.contended.fetch_add(1, Ordering::Relaxed);
        }
        self.chain.lock()
    }

    #[cfg(feature = "contention_stats")]
    pub(crate) fn contended(&self) -> u64 {
        self.contended.load(Ordering::Relaxed)
    }
}
