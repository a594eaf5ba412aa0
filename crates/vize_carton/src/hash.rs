//! Fast hashing utilities using xxHash3.
//!
//! Provides the content and identity fingerprints used as cache keys by the
//! metadata resolver.

use std::fmt;

use xxhash_rust::xxh3::{xxh3_64, Xxh3};

/// Compute a 64-bit hash of the given bytes using xxHash3.
#[inline]
pub fn hash_bytes(data: &[u8]) -> u64 {
    xxh3_64(data)
}

/// Compute a 64-bit hash of the given string using xxHash3.
#[inline]
pub fn hash_str(data: &str) -> u64 {
    xxh3_64(data.as_bytes())
}

/// A short digest identifying one state of a file or buffer.
///
/// Two fingerprints compare equal only when every part fed into them was
/// byte-identical, in the same order.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fingerprint(u64);

impl Fingerprint {
    /// Fingerprint of a single string.
    #[inline]
    pub fn of_str(data: &str) -> Self {
        Self(hash_str(data))
    }

    /// Start a fingerprint built from several parts.
    pub fn builder() -> FingerprintBuilder {
        FingerprintBuilder {
            hasher: Xxh3::new(),
        }
    }

    /// Raw 64-bit value.
    #[inline]
    pub fn as_u64(self) -> u64 {
        self.0
    }

    /// Hex representation (16 characters).
    pub fn to_hex(self) -> String {
        format!("{:016x}", self.0)
    }
}

impl fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fingerprint({:016x})", self.0)
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

/// Incremental fingerprint over multiple parts.
///
/// Every part is length-prefixed, so `("ab", "c")` and `("a", "bc")` differ.
pub struct FingerprintBuilder {
    hasher: Xxh3,
}

impl FingerprintBuilder {
    /// Feed a byte slice.
    pub fn bytes(mut self, data: &[u8]) -> Self {
        self.hasher.update(&(data.len() as u64).to_le_bytes());
        self.hasher.update(data);
        self
    }

    /// Feed a string.
    pub fn str(self, data: &str) -> Self {
        self.bytes(data.as_bytes())
    }

    /// Feed an integer.
    pub fn u128(mut self, value: u128) -> Self {
        self.hasher.update(&value.to_le_bytes());
        self
    }

    /// Finish and produce the fingerprint.
    pub fn finish(self) -> Fingerprint {
        Fingerprint(self.hasher.digest())
    }
}
