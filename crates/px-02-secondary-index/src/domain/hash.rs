//! # Index Name Hash
//!
//! Index names are never stored. Each name is hashed once with FNV-1a
//! (64-bit) and the big-endian digest is hex-encoded to a fixed 16 characters,
//! which keeps every index partition prefix the same width.
//!
//! The hash is not collision-free: two names with the same digest share a
//! keyspace. It is kept because the encoded width is part of the on-disk
//! key format.

use std::fmt;

/// Length of an encoded [`IndexHash`].
pub const INDEX_HASH_LEN: usize = 16;

/// FNV-1a 64-bit hash.
#[must_use]
#[allow(clippy::unreadable_literal)]
pub const fn fnv1a_64(bytes: &[u8]) -> u64 {
    let mut hash = 0xcbf29ce484222325u64;
    let mut i = 0;

    while i < bytes.len() {
        hash ^= bytes[i] as u64;
        hash = hash.wrapping_mul(0x100000001b3);
        i += 1;
    }

    hash
}

/// Lowercase hex FNV-1a digest of an index name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IndexHash(String);

impl IndexHash {
    pub fn of(name: &str) -> Self {
        Self(hex::encode(fnv1a_64(name.as_bytes()).to_be_bytes()))
    }

    /// Parse an encoded hash read back from a stored key.
    pub fn from_encoded(bytes: &[u8]) -> Option<Self> {
        if bytes.len() != INDEX_HASH_LEN {
            return None;
        }
        if !bytes
            .iter()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(b))
        {
            return None;
        }
        std::str::from_utf8(bytes).ok().map(|s| Self(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Display for IndexHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
