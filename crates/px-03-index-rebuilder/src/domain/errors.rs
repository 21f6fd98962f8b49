//! # Domain Errors

use px_02_secondary_index::IndexError;
use thiserror::Error;

/// Errors that abort a rebuild. Batches committed before the error persist.
#[derive(Debug, Error)]
pub enum RebuildError {
    /// Query, Emit or store failure inside a batch.
    #[error(transparent)]
    Index(#[from] IndexError),

    /// A batch returned the same first document as the previous batch of
    /// the same version: the builder does not emit the version-stamp index.
    #[error("rebuild stalled at version {version}: documents are not being restamped")]
    Stalled { version: u64 },
}
