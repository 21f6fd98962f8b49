//! # Index Key Codec
//!
//! Every index-generated key starts with [`INDEX_SPACE`] and lives in one of
//! two partitions per index:
//!
//! | Partition | Key | Value |
//! |-----------|-----|-------|
//! | Forward | `^<hash>>^<primary key>^<derived>` | the reverse key |
//! | Reverse | `^<hash><^<derived>^<primary key>` | payload |
//!
//! The forward partition answers "what did this document derive" so stale
//! entries can be removed. The reverse partition is what queries scan.
//! Segments are positional, so neither a primary key nor a derived value may
//! contain `^`.
//!
//! ## Ordering
//!
//! Reverse keys sort by derived value, then primary key, only when neither
//! derived value is a prefix of the other. When one extends the other, the
//! byte after the shorter value is compared with `^`: `go-lang` and `go1`
//! sort before `go`, `golang` sorts after it. Query end bounds compare the
//! decoded segment for this reason.

use super::errors::IndexError;
use super::hash::{IndexHash, INDEX_HASH_LEN};

/// Namespace/field delimiter.
pub const INDEX_SPACE: u8 = b'^';
/// Forward partition tag (primary key → derived value).
pub const FORWARD_TAG: u8 = b'>';
/// Reverse partition tag (derived value → primary key).
pub const REVERSE_TAG: u8 = b'<';

/// One of the two key families of an index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Partition {
    Forward,
    Reverse,
}

impl Partition {
    pub const fn tag(self) -> u8 {
        match self {
            Partition::Forward => FORWARD_TAG,
            Partition::Reverse => REVERSE_TAG,
        }
    }

    fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            FORWARD_TAG => Some(Partition::Forward),
            REVERSE_TAG => Some(Partition::Reverse),
            _ => None,
        }
    }

    /// `^<hash><tag>`: the prefix shared by every key of this partition.
    pub fn prefix(self, hash: &IndexHash) -> Vec<u8> {
        let mut key = Vec::with_capacity(INDEX_HASH_LEN + 2);
        key.push(INDEX_SPACE);
        key.extend_from_slice(hash.as_bytes());
        key.push(self.tag());
        key
    }
}

/// A decoded index key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexKey {
    pub partition: Partition,
    pub hash: IndexHash,
    pub primary_key: Vec<u8>,
    pub derived: Vec<u8>,
}

impl IndexKey {
    pub fn forward(hash: &IndexHash, primary_key: &[u8], derived: &[u8]) -> Self {
        Self::new(Partition::Forward, hash, primary_key, derived)
    }

    pub fn reverse(hash: &IndexHash, primary_key: &[u8], derived: &[u8]) -> Self {
        Self::new(Partition::Reverse, hash, primary_key, derived)
    }

    fn new(partition: Partition, hash: &IndexHash, primary_key: &[u8], derived: &[u8]) -> Self {
        Self {
            partition,
            hash: hash.clone(),
            primary_key: primary_key.to_vec(),
            derived: derived.to_vec(),
        }
    }

    /// The same entry in the other partition.
    pub fn mirror(&self) -> Self {
        let partition = match self.partition {
            Partition::Forward => Partition::Reverse,
            Partition::Reverse => Partition::Forward,
        };
        Self {
            partition,
            ..self.clone()
        }
    }

    pub fn encode(&self) -> Vec<u8> {
        let (first, second) = match self.partition {
            Partition::Forward => (&self.primary_key, &self.derived),
            Partition::Reverse => (&self.derived, &self.primary_key),
        };
        let mut key = self.partition.prefix(&self.hash);
        key.reserve(first.len() + second.len() + 2);
        key.push(INDEX_SPACE);
        key.extend_from_slice(first);
        key.push(INDEX_SPACE);
        key.extend_from_slice(second);
        key
    }

    /// Split on `^` and read the hash, partition tag and the two positional
    /// segments.
    pub fn decode(bytes: &[u8]) -> Result<Self, IndexError> {
        let mut parts = bytes.split(|b| *b == INDEX_SPACE);

        if !matches!(parts.next(), Some(lead) if lead.is_empty()) {
            return Err(IndexError::malformed(bytes, "missing index space marker"));
        }
        let head = parts
            .next()
            .ok_or_else(|| IndexError::malformed(bytes, "missing index hash"))?;
        let (first, second) = match (parts.next(), parts.next(), parts.next()) {
            (Some(first), Some(second), None) => (first, second),
            _ => return Err(IndexError::malformed(bytes, "expected two key segments")),
        };

        let (hash, tag) = match head.split_last() {
            Some((tag, hash)) => (hash, *tag),
            None => return Err(IndexError::malformed(bytes, "missing index hash")),
        };
        let partition = Partition::from_tag(tag)
            .ok_or_else(|| IndexError::malformed(bytes, "unknown partition tag"))?;
        let hash = IndexHash::from_encoded(hash)
            .ok_or_else(|| IndexError::malformed(bytes, "invalid index hash"))?;

        let (primary_key, derived) = match partition {
            Partition::Forward => (first, second),
            Partition::Reverse => (second, first),
        };
        Ok(Self {
            partition,
            hash,
            primary_key: primary_key.to_vec(),
            derived: derived.to_vec(),
        })
    }
}

/// `^<hash>>^<primary key>^`: all forward entries of one document.
///
/// The trailing delimiter keeps `D:1` from matching the entries of `D:10`.
pub fn forward_scan_prefix(hash: &IndexHash, primary_key: &[u8]) -> Vec<u8> {
    let mut key = Partition::Forward.prefix(hash);
    key.push(INDEX_SPACE);
    key.extend_from_slice(primary_key);
    key.push(INDEX_SPACE);
    key
}

/// Primary keys must be non-empty and free of `^`.
pub fn validate_primary_key(primary_key: &[u8]) -> Result<(), IndexError> {
    if primary_key.is_empty() {
        return Err(IndexError::InvalidKeySegment {
            field: "primary key",
            reason: "must not be empty",
        });
    }
    if primary_key.contains(&INDEX_SPACE) {
        return Err(IndexError::InvalidKeySegment {
            field: "primary key",
            reason: "must not contain '^'",
        });
    }
    Ok(())
}

/// Derived values may be empty but must be free of `^`.
pub fn validate_derived(derived: &[u8]) -> Result<(), IndexError> {
    if derived.contains(&INDEX_SPACE) {
        return Err(IndexError::InvalidKeySegment {
            field: "derived value",
            reason: "must not contain '^'",
        });
    }
    Ok(())
}
