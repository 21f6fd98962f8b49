//! # Index Rebuilder (px-03)
//!
//! Re-derives index entries after an index function changes, without a
//! full-table scan.
//!
//! ## How It Works
//!
//! Every commit through the index builder also emits a version stamp for each
//! written document, under a reserved index (default `DATABASE_VERSION`):
//!
//! ```text
//! derived value = hex(big-endian db_version) ":" primary key
//! ```
//!
//! Bumping `db_version` and calling [`Rebuilder::rebuild`] walks the stamps of
//! every older version in batches and re-sets each document to its current
//! value. The re-set runs Emit again, which rewrites the entries of every
//! registered index and moves the stamp to the current version.
//!
//! ```text
//! for v in 0..db_version:
//!     loop:
//!         update_with(builder):
//!             hits = query(version index, prefix = hex(v), limit = batch_size)
//!             for pk in hits: set(pk, get(pk))   // delete(pk) if missing
//!         break when hits is empty
//! ```
//!
//! Committed batches persist, so an interrupted rebuild can simply be rerun.

pub mod domain;
pub mod service;

pub use domain::config::{RebuilderConfig, DEFAULT_BATCH_SIZE, DEFAULT_VERSION_INDEX};
pub use domain::errors::RebuildError;
pub use domain::report::RebuildReport;
pub use domain::version::{parse_stamp, version_header, version_index};
pub use service::Rebuilder;
