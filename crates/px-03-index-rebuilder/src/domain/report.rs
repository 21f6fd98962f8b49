//! # Rebuild Report

/// Result of a rebuild run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RebuildReport {
    /// Versions below the current one that were walked
    pub versions_scanned: u64,
    /// Non-empty batches committed
    pub batches: u64,
    /// Documents re-set to their current value
    pub documents_touched: u64,
    /// Stamps whose document no longer existed
    pub documents_removed: u64,
    /// Duration of the rebuild in milliseconds
    pub duration_ms: u64,
}

impl RebuildReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one committed batch.
    pub fn add_batch(&mut self, touched: u64, removed: u64) {
        self.batches += 1;
        self.documents_touched += touched;
        self.documents_removed += removed;
    }

    /// True when every document already carried the current version.
    pub fn is_noop(&self) -> bool {
        self.batches == 0
    }
}
