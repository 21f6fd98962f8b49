//! # Index Definitions

use super::errors::BoxError;
use super::hash::IndexHash;
use super::keys::Partition;
use crate::ports::outbound::IndexFn;
use std::fmt;
use std::sync::Arc;

/// One entry derived by an index function.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexEntry {
    /// Derived value; the part queries range over.
    pub index: Vec<u8>,
    /// Payload stored with the reverse entry (may be empty).
    pub value: Vec<u8>,
}

impl IndexEntry {
    pub fn new(index: impl Into<Vec<u8>>) -> Self {
        Self {
            index: index.into(),
            value: Vec::new(),
        }
    }

    pub fn with_value(index: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) -> Self {
        Self {
            index: index.into(),
            value: value.into(),
        }
    }
}

/// A named index function. Cheap to clone.
///
/// Two indexes are the same index iff their names are equal.
#[derive(Clone)]
pub struct Index {
    inner: Arc<IndexInner>,
}

struct IndexInner {
    name: String,
    hash: IndexHash,
    function: Box<dyn IndexFn>,
}

impl Index {
    /// # Panics
    ///
    /// Panics if `name` is empty.
    pub fn new<F>(name: impl Into<String>, function: F) -> Self
    where
        F: IndexFn + 'static,
    {
        let name = name.into();
        assert!(!name.is_empty(), "index name must be provided");
        let hash = IndexHash::of(&name);
        Self {
            inner: Arc::new(IndexInner {
                name,
                hash,
                function: Box::new(function),
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    pub fn hash(&self) -> &IndexHash {
        &self.inner.hash
    }

    pub fn partition_prefix(&self, partition: Partition) -> Vec<u8> {
        partition.prefix(&self.inner.hash)
    }

    pub fn derive_entries(&self, key: &[u8], value: &[u8]) -> Result<Vec<IndexEntry>, BoxError> {
        self.inner.function.derive_entries(key, value)
    }
}

impl PartialEq for Index {
    fn eq(&self, other: &Self) -> bool {
        self.inner.name == other.inner.name
    }
}

impl Eq for Index {}

impl fmt::Debug for Index {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Index")
            .field("name", &self.inner.name)
            .field("hash", &self.inner.hash)
            .finish()
    }
}
