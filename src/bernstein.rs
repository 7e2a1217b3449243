//! Bernstein (djb2) string hash, the default bucket router.
//!
//! `h = h * 33 + byte`, seeded with 5381 and computed in 32-bit wrapping
//! arithmetic over the raw key bytes. Deterministic across runs and
//! processes, which keeps bucket placement reproducible in tests.

use core::hash::{BuildHasher, Hasher};

const SEED: u32 = 5381;

/// Streaming djb2 hasher. `write` may be called several times; the result
/// equals hashing the concatenated bytes once.
#[derive(Copy, Clone, Debug)]
pub struct BernsteinHasher {
    state: u32,
}

impl BernsteinHasher {
    pub const fn new() -> Self {
        Self { state: SEED }
    }
}

impl Default for BernsteinHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl Hasher for BernsteinHasher {
    #[inline]
    fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.state = (self.state << 5)
                .wrapping_add(self.state)
                .wrapping_add(u32::from(b));
        }
    }

    #[inline]
    fn finish(&self) -> u64 {
        u64::from(self.state)
    }
}

/// `BuildHasher` producing fresh [`BernsteinHasher`]s.
#[derive(Copy, Clone, Debug, Default)]
pub struct BuildBernstein;

impl BuildHasher for BuildBernstein {
    type Hasher = BernsteinHasher;

    fn build_hasher(&self) -> BernsteinHasher {
        BernsteinHasher::new()
    }
}
