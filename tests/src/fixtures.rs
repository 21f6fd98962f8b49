//! # Test Fixtures
//!
//! JSON documents, the index functions built over them, and store helpers
//! shared by the integration scenarios and benchmarks.

use px_01_kv_store::{Database, KVStoreError, KeyValueStore, KvEntry, ScanOptions, Transaction};
use px_02_secondary_index::{
    query_index, BoxError, Index, IndexEntry, IndexError, IndexQuery, IndexRegistry,
};
use serde::{Deserialize, Serialize};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// =============================================================================
// DOCUMENTS
// =============================================================================

/// A comment with an author and tags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    #[serde(default)]
    pub rev: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub by: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl Comment {
    pub fn new(id: &str, by: &str, tags: &[&str]) -> Self {
        Self {
            id: id.to_string(),
            by: by.to_string(),
            text: "Hi!".to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            ..Default::default()
        }
    }
}

/// A plain record used by the rebuild scenario.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub at: Option<String>,
}

impl Record {
    pub fn numbered(i: u32) -> Self {
        Self {
            id: format!("D:{i:010}"),
            text: i.to_string(),
            at: Some(format!("2024-01-{:02}T00:00:00Z", i % 28 + 1)),
        }
    }
}

// =============================================================================
// INDEXES
// =============================================================================

/// One entry per comment tag.
pub fn tags_index() -> Index {
    Index::new(
        "tags",
        |_key: &[u8], value: &[u8]| -> Result<Vec<IndexEntry>, BoxError> {
            let comment: Comment = serde_json::from_slice(value)?;
            Ok(comment.tags.into_iter().map(IndexEntry::new).collect())
        },
    )
}

/// One entry per comment author, none for anonymous comments.
pub fn by_index() -> Index {
    Index::new(
        "by",
        |_key: &[u8], value: &[u8]| -> Result<Vec<IndexEntry>, BoxError> {
            let comment: Comment = serde_json::from_slice(value)?;
            if comment.by.is_empty() {
                return Ok(Vec::new());
            }
            Ok(vec![IndexEntry::new(comment.by)])
        },
    )
}

/// Record timestamp.
pub fn item_at_index() -> Index {
    Index::new(
        "itemat",
        |_key: &[u8], value: &[u8]| -> Result<Vec<IndexEntry>, BoxError> {
            let record: Record = serde_json::from_slice(value)?;
            let at = record
                .at
                .unwrap_or_else(|| "1970-01-01T00:00:00Z".to_string());
            Ok(vec![IndexEntry::new(at)])
        },
    )
}

pub fn comment_registry() -> Result<IndexRegistry, IndexError> {
    IndexRegistry::new()
        .with_index(tags_index())?
        .with_index(by_index())
}

// =============================================================================
// STORE HELPERS
// =============================================================================

pub fn save_comment<S: KeyValueStore>(
    db: &Database<S>,
    registry: &IndexRegistry,
    comment: &Comment,
) -> anyhow::Result<()> {
    let json = serde_json::to_vec(comment)?;
    db.update_with(|txn| Ok(txn.set(comment.id.as_bytes(), &json)?), registry)?;
    Ok(())
}

pub fn delete_document<S: KeyValueStore>(
    db: &Database<S>,
    registry: &IndexRegistry,
    key: &str,
) -> anyhow::Result<()> {
    db.update_with(|txn| Ok(txn.delete(key.as_bytes())?), registry)?;
    Ok(())
}

/// `(primary key, derived value)` of every hit, in scan order.
pub fn query_hits<S: KeyValueStore>(
    db: &Database<S>,
    query: &IndexQuery,
) -> anyhow::Result<Vec<(String, String)>> {
    let outcome = db.view(|txn| query_index(query, txn))?;
    Ok(outcome
        .results
        .into_iter()
        .map(|hit| {
            (
                String::from_utf8_lossy(&hit.key).into_owned(),
                String::from_utf8_lossy(&hit.index).into_owned(),
            )
        })
        .collect())
}

/// Every committed key/value pair in key order.
pub fn dump<S: KeyValueStore>(db: &Database<S>) -> Result<Vec<KvEntry>, KVStoreError> {
    db.view(|txn| {
        txn.scan(b"", ScanOptions::with_values())?
            .collect::<Result<Vec<_>, _>>()
    })
}

/// Number of committed keys.
pub fn count_keys<S: KeyValueStore>(db: &Database<S>) -> Result<usize, KVStoreError> {
    db.view(|txn| {
        txn.scan(b"", ScanOptions::keys_only())?
            .try_fold(0, |count, item| item.map(|_| count + 1))
    })
}

// =============================================================================
// LOGGING
// =============================================================================

/// Install a fmt subscriber filtered by `RUST_LOG` (default `warn`).
///
/// Safe to call from every test; only the first call installs.
pub fn init_test_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_test_writer())
        .try_init();
}
