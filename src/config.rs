//! Dictionary configuration, fixed at construction.

use crate::hash::HashPrecision;

/// Bytes of source text per expected distinct word, used to size the
/// first table allocation.
pub const BYTES_PER_SLOT: u64 = 120;

/// Policy chosen once when a `Dictionary` is built.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct DictionaryConfig {
    /// Float representation for word hashes.
    pub hash_precision: HashPrecision,
    /// Break hash ties by exact string comparison. With this off, words
    /// that collide in the hash are counted as one word.
    pub refinement: bool,
}

impl DictionaryConfig {
    pub const fn new(hash_precision: HashPrecision, refinement: bool) -> Self {
        Self {
            hash_precision,
            refinement,
        }
    }

    pub fn with_precision(mut self, hash_precision: HashPrecision) -> Self {
        self.hash_precision = hash_precision;
        self
    }

    pub fn with_refinement(mut self, refinement: bool) -> Self {
        self.refinement = refinement;
        self
    }
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        Self::new(HashPrecision::Double, true)
    }
}

/// Initial capacity for a source of `bytes` bytes.
pub fn capacity_hint(bytes: u64) -> usize {
    usize::try_from(bytes / BYTES_PER_SLOT).unwrap_or(usize::MAX)
}
