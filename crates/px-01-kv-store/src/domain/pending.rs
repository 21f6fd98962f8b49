//! # Pending Writes
//!
//! Net document mutations recorded by a [`TrackedTxn`](crate::TrackedTxn)
//! before commit. Each key holds exactly one entry: the last write made to it
//! inside the transaction. `None` marks a deletion.

use std::collections::btree_map;
use std::collections::BTreeMap;

/// Transaction-scoped map of primary key to final value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingWrites {
    entries: BTreeMap<Vec<u8>, Option<Vec<u8>>>,
}

impl PendingWrites {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a set. Replaces any earlier write to the same key.
    pub fn record_set(&mut self, key: &[u8], value: &[u8]) {
        self.entries.insert(key.to_vec(), Some(value.to_vec()));
    }

    /// Record a deletion. Replaces any earlier write to the same key.
    pub fn record_delete(&mut self, key: &[u8]) {
        self.entries.insert(key.to_vec(), None);
    }

    /// Final value for `key`: `Some(None)` if the key was deleted,
    /// `None` if the transaction never wrote it.
    pub fn get(&self, key: &[u8]) -> Option<Option<&[u8]>> {
        self.entries.get(key).map(|v| v.as_deref())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(key, final value)` pairs in key order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.entries.iter(),
        }
    }
}

/// Iterator over pending writes.
pub struct Iter<'a> {
    inner: btree_map::Iter<'a, Vec<u8>, Option<Vec<u8>>>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a [u8], Option<&'a [u8]>);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|(k, v)| (k.as_slice(), v.as_deref()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a> IntoIterator for &'a PendingWrites {
    type Item = (&'a [u8], Option<&'a [u8]>);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
