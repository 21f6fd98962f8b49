//! # In-Memory Storage Adapter
//!
//! Ordered in-memory implementation of the [`KeyValueStore`] port.
//!
//! ## Transaction Model
//!
//! - Each transaction reads from a copy-on-write snapshot taken at `begin`
//! - Uncommitted writes live in an overlay, visible to the transaction's own
//!   reads and scans
//! - Commit is optimistic: if any key this transaction read via `get` or
//!   wrote was committed by another transaction after the snapshot was taken,
//!   the commit fails with [`KVStoreError::Conflict`]
//!
//! Scans are not tracked for conflicts.
//!
//! Per-key commit history is kept only while an open writable transaction
//! began before that commit; older history is pruned as transactions finish.

use crate::domain::errors::KVStoreError;
use crate::ports::outbound::{KeyValueStore, KvEntry, KvIter, ScanOptions, Transaction};
use parking_lot::RwLock;
use std::cell::RefCell;
use std::cmp::Ordering;
use std::collections::{btree_map, BTreeMap, HashMap, HashSet};
use std::iter::Peekable;
use std::ops::Bound;
use std::sync::Arc;

type Snapshot = Arc<BTreeMap<Vec<u8>, Vec<u8>>>;

#[derive(Default)]
struct MemState {
    data: Snapshot,
    /// Commit timestamp of the last write (set or delete) to each key.
    last_commit: HashMap<Vec<u8>, u64>,
    commit_ts: u64,
    /// Read timestamps of open writable transactions, with multiplicity.
    open_writers: BTreeMap<u64, usize>,
}

impl MemState {
    fn open_writer(&mut self, read_ts: u64) {
        *self.open_writers.entry(read_ts).or_default() += 1;
    }

    fn close_writer(&mut self, read_ts: u64) {
        if let btree_map::Entry::Occupied(mut entry) = self.open_writers.entry(read_ts) {
            *entry.get_mut() -= 1;
            if *entry.get() == 0 {
                entry.remove();
            }
        }
    }

    /// Drop history that no open writer can conflict with. A writer only
    /// conflicts on commits newer than its read timestamp.
    fn prune_history(&mut self) {
        match self.open_writers.keys().next().copied() {
            Some(horizon) => self.last_commit.retain(|_, ts| *ts > horizon),
            None => self.last_commit.clear(),
        }
    }
}

/// In-memory key-value store.
#[derive(Default)]
pub struct InMemoryKVStore {
    state: RwLock<MemState>,
}

impl InMemoryKVStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of committed keys.
    pub fn len(&self) -> usize {
        self.state.read().data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[cfg(test)]
    fn history_len(&self) -> usize {
        self.state.read().last_commit.len()
    }
}

impl KeyValueStore for InMemoryKVStore {
    type Txn<'a> = InMemoryTxn<'a>;

    fn begin(&self, writable: bool) -> Result<InMemoryTxn<'_>, KVStoreError> {
        let (snapshot, read_ts) = if writable {
            let mut state = self.state.write();
            let read_ts = state.commit_ts;
            state.open_writer(read_ts);
            (Arc::clone(&state.data), read_ts)
        } else {
            let state = self.state.read();
            (Arc::clone(&state.data), state.commit_ts)
        };
        Ok(InMemoryTxn {
            store: self,
            snapshot,
            read_ts,
            writes: BTreeMap::new(),
            reads: RefCell::new(HashSet::new()),
            writable,
            open: writable,
        })
    }
}

/// Transaction over an [`InMemoryKVStore`].
pub struct InMemoryTxn<'a> {
    store: &'a InMemoryKVStore,
    snapshot: Snapshot,
    read_ts: u64,
    /// Overlay of uncommitted writes; `None` is a tombstone.
    writes: BTreeMap<Vec<u8>, Option<Vec<u8>>>,
    reads: RefCell<HashSet<Vec<u8>>>,
    writable: bool,
    /// Registered in `MemState::open_writers` until commit or drop.
    open: bool,
}

impl InMemoryTxn<'_> {
    fn check_write(&self, key: &[u8]) -> Result<(), KVStoreError> {
        if !self.writable {
            return Err(KVStoreError::ReadOnlyTransaction);
        }
        if key.is_empty() {
            return Err(KVStoreError::EmptyKey);
        }
        Ok(())
    }
}

impl Transaction for InMemoryTxn<'_> {
    fn is_writable(&self) -> bool {
        self.writable
    }

    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError> {
        if key.is_empty() {
            return Err(KVStoreError::EmptyKey);
        }
        if let Some(pending) = self.writes.get(key) {
            return Ok(pending.clone());
        }
        if self.writable {
            self.reads.borrow_mut().insert(key.to_vec());
        }
        Ok(self.snapshot.get(key).cloned())
    }

    fn set(&mut self, key: &[u8], value: &[u8]) -> Result<(), KVStoreError> {
        self.check_write(key)?;
        self.writes.insert(key.to_vec(), Some(value.to_vec()));
        Ok(())
    }

    fn delete(&mut self, key: &[u8]) -> Result<(), KVStoreError> {
        self.check_write(key)?;
        self.writes.insert(key.to_vec(), None);
        Ok(())
    }

    fn scan(&self, seek: &[u8], opts: ScanOptions) -> Result<KvIter<'_>, KVStoreError> {
        let bounds = (Bound::Included(seek), Bound::Unbounded);
        Ok(Box::new(MergeIter {
            base: self.snapshot.range::<[u8], _>(bounds).peekable(),
            overlay: self.writes.range::<[u8], _>(bounds).peekable(),
            prefetch_values: opts.prefetch_values,
        }))
    }

    fn commit(mut self) -> Result<(), KVStoreError> {
        if !self.writable || self.writes.is_empty() {
            return Ok(());
        }
        // Release our snapshot so make_mut below can avoid a copy.
        drop(std::mem::take(&mut self.snapshot));
        let writes = std::mem::take(&mut self.writes);
        let reads = std::mem::take(self.reads.get_mut());
        let read_ts = self.read_ts;
        let store = self.store;

        let mut guard = store.state.write();
        let state = &mut *guard;
        state.close_writer(read_ts);
        self.open = false;

        let conflicted = writes
            .keys()
            .chain(reads.iter())
            .any(|key| state.last_commit.get(key).is_some_and(|ts| *ts > read_ts));
        if conflicted {
            tracing::debug!(read_ts, "in-memory commit rejected: conflict");
            state.prune_history();
            return Err(KVStoreError::Conflict);
        }

        state.commit_ts += 1;
        let commit_ts = state.commit_ts;
        let data = Arc::make_mut(&mut state.data);
        for (key, value) in writes {
            match value {
                Some(value) => {
                    data.insert(key.clone(), value);
                }
                None => {
                    data.remove(&key);
                }
            }
            state.last_commit.insert(key, commit_ts);
        }
        state.prune_history();
        Ok(())
    }

    fn discard(self) {}
}

impl Drop for InMemoryTxn<'_> {
    fn drop(&mut self) {
        if self.open {
            self.store.state.write().close_writer(self.read_ts);
        }
    }
}

/// Merges the snapshot with the write overlay. Overlay entries shadow
/// snapshot entries with the same key; tombstones hide them.
struct MergeIter<'t> {
    base: Peekable<btree_map::Range<'t, Vec<u8>, Vec<u8>>>,
    overlay: Peekable<btree_map::Range<'t, Vec<u8>, Option<Vec<u8>>>>,
    prefetch_values: bool,
}

enum Side {
    Base,
    Overlay,
    Both,
}

impl MergeIter<'_> {
    fn entry(&self, key: &[u8], value: &[u8]) -> KvEntry {
        if self.prefetch_values {
            KvEntry::new(key, value)
        } else {
            KvEntry::new(key, Vec::new())
        }
    }
}

impl Iterator for MergeIter<'_> {
    type Item = Result<KvEntry, KVStoreError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let side = match (self.base.peek(), self.overlay.peek()) {
                (None, None) => return None,
                (Some(_), None) => Side::Base,
                (None, Some(_)) => Side::Overlay,
                (Some((base_key, _)), Some((overlay_key, _))) => match base_key.cmp(overlay_key) {
                    Ordering::Less => Side::Base,
                    Ordering::Equal => Side::Both,
                    Ordering::Greater => Side::Overlay,
                },
            };

            if let Side::Base = side {
                let (key, value) = self.base.next()?;
                return Some(Ok(self.entry(key, value)));
            }
            if let Side::Both = side {
                self.base.next();
            }
            let (key, value) = self.overlay.next()?;
            if let Some(value) = value {
                return Some(Ok(self.entry(key, value)));
            }
            // Tombstone: keep walking.
        }
    }
}
