//! # Query Types
//!
//! A query walks one partition of one index in encoded-key order and applies
//! three independent stages:
//!
//! 1. Range: keys from `max(start, prefix)` while they match `prefix`, whose
//!    leading segment is at most `end`
//! 2. Skip: drop the first `skip` matches
//! 3. Limit: keep at most `limit` (default [`DEFAULT_QUERY_LIMIT`])
//!
//! In count mode only counters advance and no default limit applies.

use super::hash::IndexHash;
use super::keys::{Partition, INDEX_SPACE};

/// Limit used when a non-count query leaves `limit` at zero.
pub const DEFAULT_QUERY_LIMIT: usize = 100;

/// Parameters of an index query. Byte fields are derived values, not keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexQuery {
    pub index: String,
    pub start: Vec<u8>,
    /// Inclusive upper bound on the derived value (empty = unbounded).
    pub end: Vec<u8>,
    pub prefix: Vec<u8>,
    pub skip: usize,
    /// Zero means [`DEFAULT_QUERY_LIMIT`], or unlimited in count mode.
    pub limit: usize,
    /// Return only the number of matches.
    pub count: bool,
}

impl IndexQuery {
    pub fn new(index: impl Into<String>) -> Self {
        Self {
            index: index.into(),
            ..Default::default()
        }
    }

    pub fn with_start(mut self, start: impl Into<Vec<u8>>) -> Self {
        self.start = start.into();
        self
    }

    pub fn with_end(mut self, end: impl Into<Vec<u8>>) -> Self {
        self.end = end.into();
        self
    }

    pub fn with_prefix(mut self, prefix: impl Into<Vec<u8>>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn with_skip(mut self, skip: usize) -> Self {
        self.skip = skip;
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn count_only(mut self) -> Self {
        self.count = true;
        self
    }

    /// Maximum number of matches to keep after skipping.
    pub fn effective_limit(&self) -> Option<usize> {
        match (self.limit, self.count) {
            (0, true) => None,
            (0, false) => Some(DEFAULT_QUERY_LIMIT),
            (limit, _) => Some(limit),
        }
    }
}

/// One query hit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryResult {
    /// Primary key of the document.
    pub key: Vec<u8>,
    /// Stored value: the payload for reverse queries, the back-pointer for
    /// forward queries.
    pub value: Vec<u8>,
    /// Derived value.
    pub index: Vec<u8>,
}

/// Query output. `count` is the match count in count mode, otherwise
/// `results.len()`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryOutcome {
    pub results: Vec<QueryResult>,
    pub count: usize,
}

/// Encoded scan bounds for a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanBounds {
    /// First key to seek to.
    pub seek: Vec<u8>,
    /// Keys must start with this.
    pub prefix: Vec<u8>,
    /// `P^end^`: keys past this that do not extend it end the walk.
    pub end: Option<Vec<u8>>,
    /// Inclusive upper bound on the leading segment.
    end_value: Option<Vec<u8>>,
    /// Offset of the leading segment, just past `P^`.
    lead_offset: usize,
}

impl ScanBounds {
    pub fn new(hash: &IndexHash, partition: Partition, query: &IndexQuery) -> Self {
        let partition_prefix = partition.prefix(hash);
        let segment = |value: &[u8]| {
            let mut key = partition_prefix.clone();
            key.push(INDEX_SPACE);
            key.extend_from_slice(value);
            key
        };

        let start = segment(&query.start);
        let prefix = if query.prefix.is_empty() {
            partition_prefix.clone()
        } else {
            segment(&query.prefix)
        };
        let end = (!query.end.is_empty()).then(|| {
            let mut key = segment(&query.end);
            key.push(INDEX_SPACE);
            key
        });

        Self {
            seek: start.max(prefix.clone()),
            prefix,
            end,
            end_value: (!query.end.is_empty()).then(|| query.end.clone()),
            lead_offset: partition_prefix.len() + 1,
        }
    }

    /// Whether `key` and every key after it lead with a segment above `end`.
    ///
    /// A segment that extends `end` with a byte below `^` sorts before
    /// `P^end^`, so the walk cannot stop there; see [`within_end`](Self::within_end).
    pub fn past_end(&self, key: &[u8]) -> bool {
        match &self.end {
            Some(end) => key > end.as_slice() && !key.starts_with(end),
            None => false,
        }
    }

    /// Whether the leading segment of `key` is at most `end`.
    pub fn within_end(&self, key: &[u8]) -> bool {
        match &self.end_value {
            Some(end) => lead_segment(key, self.lead_offset) <= end.as_slice(),
            None => true,
        }
    }
}

fn lead_segment(key: &[u8], offset: usize) -> &[u8] {
    let rest = key.get(offset..).unwrap_or_default();
    rest.split(|byte| *byte == INDEX_SPACE)
        .next()
        .unwrap_or_default()
}
