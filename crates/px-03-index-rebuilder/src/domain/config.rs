//! # Rebuilder Configuration

/// Reserved name of the version-stamp index.
pub const DEFAULT_VERSION_INDEX: &str = "DATABASE_VERSION";

/// Documents re-set per transaction.
pub const DEFAULT_BATCH_SIZE: usize = 300;

/// Rebuilder configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RebuilderConfig {
    /// Current database version. Stamps of every lower version are rebuilt.
    pub db_version: u64,
    /// Documents per batch (zero falls back to [`DEFAULT_BATCH_SIZE`]).
    pub batch_size: usize,
    /// Name of the version-stamp index (empty falls back to
    /// [`DEFAULT_VERSION_INDEX`]).
    pub index_name: String,
}

impl Default for RebuilderConfig {
    fn default() -> Self {
        Self {
            db_version: 0,
            batch_size: DEFAULT_BATCH_SIZE,
            index_name: DEFAULT_VERSION_INDEX.to_string(),
        }
    }
}

impl RebuilderConfig {
    pub fn new(db_version: u64) -> Self {
        Self {
            db_version,
            ..Default::default()
        }
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn with_index_name(mut self, name: impl Into<String>) -> Self {
        self.index_name = name.into();
        self
    }

    /// Replace unset fields with their defaults.
    pub fn normalized(mut self) -> Self {
        if self.batch_size == 0 {
            self.batch_size = DEFAULT_BATCH_SIZE;
        }
        if self.index_name.is_empty() {
            self.index_name = DEFAULT_VERSION_INDEX.to_string();
        }
        self
    }
}
