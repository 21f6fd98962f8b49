//! The batched rebuild driver.

use crate::domain::config::RebuilderConfig;
use crate::domain::errors::RebuildError;
use crate::domain::report::RebuildReport;
use crate::domain::version::{stamp_upper_bound, version_header, version_index};
use px_01_kv_store::{BeforeCommit, Database, KeyValueStore, Transaction};
use px_02_secondary_index::{query_index, Index, IndexError, IndexQuery};
use std::sync::Arc;
use std::time::Instant;

/// Stamps documents with the current database version and rebuilds the
/// documents of older versions.
///
/// [`index`](Self::index) must be registered in the builder used for every
/// commit, including the one passed to [`rebuild`](Self::rebuild).
pub struct Rebuilder<S> {
    db: Arc<Database<S>>,
    config: RebuilderConfig,
    header: String,
    index: Index,
}

/// Outcome of one committed batch.
#[derive(Debug, Default)]
struct Batch {
    first: Option<Vec<u8>>,
    touched: u64,
    removed: u64,
}

impl Batch {
    fn is_empty(&self) -> bool {
        self.first.is_none()
    }
}

impl<S: KeyValueStore> Rebuilder<S> {
    pub fn new(db: Arc<Database<S>>, config: RebuilderConfig) -> Self {
        let config = config.normalized();
        let header = version_header(config.db_version);
        let index = version_index(&config.index_name, config.db_version);
        Self {
            db,
            config,
            header,
            index,
        }
    }

    /// The version-stamp index for the current version.
    pub fn index(&self) -> &Index {
        &self.index
    }

    /// Hex header of the current version.
    pub fn header(&self) -> &str {
        &self.header
    }

    pub fn config(&self) -> &RebuilderConfig {
        &self.config
    }

    /// Re-set every document stamped with a version below the current one,
    /// committing each batch through `builder`.
    pub fn rebuild<B>(&self, builder: &B) -> Result<RebuildReport, RebuildError>
    where
        B: BeforeCommit<Error = IndexError>,
    {
        let started = Instant::now();
        let mut report = RebuildReport::new();
        let end = stamp_upper_bound(&self.header);

        tracing::info!(
            index = self.index.name(),
            db_version = self.config.db_version,
            batch_size = self.config.batch_size,
            "Starting index rebuild"
        );

        for version in 0..self.config.db_version {
            report.versions_scanned += 1;
            let prefix = version_header(version);
            let query = IndexQuery::new(self.index.name())
                .with_start(prefix.as_str())
                .with_prefix(prefix.as_str())
                .with_end(end.clone())
                .with_limit(self.config.batch_size);

            let mut previous_first: Option<Vec<u8>> = None;
            loop {
                let batch = self
                    .db
                    .update_with(|txn| restamp_batch(txn, &query), builder)?;
                if batch.is_empty() {
                    break;
                }
                report.add_batch(batch.touched, batch.removed);
                tracing::debug!(
                    version,
                    touched = batch.touched,
                    removed = batch.removed,
                    "Rebuild batch committed"
                );

                if batch.first.is_some() && batch.first == previous_first {
                    tracing::warn!(version, "Rebuild stalled: documents were not restamped");
                    return Err(RebuildError::Stalled { version });
                }
                previous_first = batch.first;
            }
        }

        report.duration_ms = started.elapsed().as_millis() as u64;
        tracing::info!(
            versions = report.versions_scanned,
            batches = report.batches,
            touched = report.documents_touched,
            removed = report.documents_removed,
            duration_ms = report.duration_ms,
            "Index rebuild complete"
        );
        Ok(report)
    }
}

/// Re-set one batch of stale documents. A stamp whose document is gone is
/// resolved by deleting the key, which makes Emit drop the stamp.
fn restamp_batch<T>(txn: &mut T, query: &IndexQuery) -> Result<Batch, IndexError>
where
    T: Transaction,
{
    let hits = query_index(query, &*txn)?;
    let mut batch = Batch::default();

    for hit in hits.results {
        match txn.get(&hit.key)? {
            Some(value) => {
                txn.set(&hit.key, &value)?;
                batch.touched += 1;
            }
            None => {
                tracing::warn!(
                    key = %String::from_utf8_lossy(&hit.key),
                    "Version stamp without document, removing"
                );
                txn.delete(&hit.key)?;
                batch.removed += 1;
            }
        }
        if batch.first.is_none() {
            batch.first = Some(hit.key);
        }
    }
    Ok(batch)
}
