//! striped-hashmap: a fixed-capacity, thread-safe map from byte-string
//! keys to `u32` values, built on lock striping.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: a concurrency building block where operations on unrelated
//!   keys do not contend, not a general-purpose dictionary.
//! - Layers:
//!   - Hasher: any `BuildHasher`; the default `BuildBernstein` (djb2)
//!     is deterministic, so bucket placement is reproducible.
//!   - Bucket: one `parking_lot::Mutex` around a chain of entries that
//!     share a bucket index. The chain is only reachable through the
//!     guard.
//!   - StripedHashMap<S>: a boxed slice of buckets fixed at construction.
//!     Routes each operation to bucket `hash(key) % capacity`.
//!
//! Constraints
//! - Capacity never changes: no resize, no rehash.
//! - No removal of individual entries and no iteration.
//! - Every operation takes exactly one bucket lock, exclusively, even for
//!   reads. No operation holds two locks, so there is no lock order and
//!   no deadlock.
//! - Hashing runs before the lock is taken; only byte comparisons run
//!   under it.
//!
//! Ownership
//! - Entries own a copy of their key bytes. Callers may drop or reuse
//!   their key buffers immediately after `put` returns.
//! - `destroy(self)` and `Drop` need sole ownership, so tearing down a map
//!   while another thread uses it does not compile.
//!
//! Failure model
//! - Allocation failure aborts.
//! - `get` on an absent key and a zero capacity are caller bugs and
//!   panic. `try_get` and `try_new` are the non-panicking forms.
//! - `parking_lot` locks do not poison; a panic in one thread leaves the
//!   map usable by others.
//!
//! Features
//! - `contention_stats`: counts lock acquisitions that had to block.

mod bernstein;
mod bucket;
mod striped_hash_map;
mod striped_hash_map_proptest;

// Public surface
pub use bernstein::{BernsteinHasher, BuildBernstein};
pub use striped_hash_map::{CapacityError, StripedHashMap, DEFAULT_CAPACITY};

/// hashbrown's seeded build hasher, for maps whose keys come from untrusted
/// callers. Unlike `BuildBernstein`, bucket placement is not reproducible.
pub type RandomState = hashbrown::hash_map::DefaultHashBuilder;
