//! # Index Registry
//!
//! Name-keyed lookup table of the indexes maintained on commit. The registry
//! is the before-commit builder handed to `Database::update_with`; see
//! `service::builder` for the hook itself.

use super::errors::IndexError;
use super::index::Index;
use std::collections::BTreeMap;

/// Registered indexes, iterated in name order.
#[derive(Debug, Clone, Default)]
pub struct IndexRegistry {
    indexes: BTreeMap<String, Index>,
}

impl IndexRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `index`. Names must be unique.
    pub fn register(&mut self, index: Index) -> Result<(), IndexError> {
        if self.indexes.contains_key(index.name()) {
            return Err(IndexError::DuplicateIndex {
                name: index.name().to_string(),
            });
        }
        self.indexes.insert(index.name().to_string(), index);
        Ok(())
    }

    /// Builder-style [`register`](Self::register).
    pub fn with_index(mut self, index: Index) -> Result<Self, IndexError> {
        self.register(index)?;
        Ok(self)
    }

    pub fn get(&self, name: &str) -> Option<&Index> {
        self.indexes.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.indexes.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Index> {
        self.indexes.values()
    }

    pub fn len(&self) -> usize {
        self.indexes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indexes.is_empty()
    }
}
