//! # Version Stamps
//!
//! The version-stamp index derives exactly one entry per document:
//! `hex(big-endian version) ":" primary key`. The fixed 16-character header
//! keeps stamps of different versions in disjoint, ordered ranges.

use px_02_secondary_index::{BoxError, Index, IndexEntry};

const STAMP_SEPARATOR: char = ':';

/// 16 lowercase hex characters of the big-endian version.
pub fn version_header(version: u64) -> String {
    hex::encode(version.to_be_bytes())
}

/// Derived value stamping `key` with `header`.
pub fn stamp(header: &str, key: &[u8]) -> Vec<u8> {
    let mut derived = Vec::with_capacity(header.len() + 1 + key.len());
    derived.extend_from_slice(header.as_bytes());
    derived.push(STAMP_SEPARATOR as u8);
    derived.extend_from_slice(key);
    derived
}

/// Query end bound covering every stamp at or below `header`.
pub fn stamp_upper_bound(header: &str) -> Vec<u8> {
    format!("{header}{STAMP_SEPARATOR}\u{ffff}").into_bytes()
}

/// Split a stamp into `(version, primary key)`.
pub fn parse_stamp(derived: &[u8]) -> Option<(u64, &[u8])> {
    let (header, rest) = derived.split_at_checked(16)?;
    let key = rest.strip_prefix(&[STAMP_SEPARATOR as u8])?;
    let mut bytes = [0u8; 8];
    hex::decode_to_slice(header, &mut bytes).ok()?;
    Some((u64::from_be_bytes(bytes), key))
}

/// The version-stamp index for `version`.
pub fn version_index(name: &str, version: u64) -> Index {
    let header = version_header(version);
    Index::new(
        name,
        move |key: &[u8], _value: &[u8]| -> Result<Vec<IndexEntry>, BoxError> {
            Ok(vec![IndexEntry::new(stamp(&header, key))])
        },
    )
}
