//! Engine types
//!
//! Configuration and statistics for the sync engine.

use std::collections::BTreeMap;

/// Configuration for sync operation
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Maximum records emitted per pagination chain (0 = unlimited)
    pub max_records_per_chain: usize,
    /// Whether to validate records against their stream schema
    pub validate_records: bool,
    /// Whether an invalid record aborts the sync
    pub fail_fast: bool,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            max_records_per_chain: 0,
            validate_records: true,
            fail_fast: true,
        }
    }
}

impl SyncConfig {
    /// Create a new sync config
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set max records per chain
    #[must_use]
    pub fn with_max_records_per_chain(mut self, max: usize) -> Self {
        self.max_records_per_chain = max;
        self
    }

    /// Enable or disable record validation
    #[must_use]
    pub fn with_validation(mut self, validate: bool) -> Self {
        self.validate_records = validate;
        self
    }

    /// Set fail fast mode
    #[must_use]
    pub fn with_fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }
}

/// Statistics from a sync operation
#[derive(Debug, Clone, Default)]
pub struct SyncStats {
    /// Total records emitted
    pub records_synced: usize,
    /// Records emitted per stream
    pub records_by_stream: BTreeMap<String, usize>,
    /// Total pages fetched
    pub pages_fetched: usize,
    /// Total pagination chains completed
    pub chains_synced: usize,
    /// Total root streams walked
    pub streams_synced: usize,
    /// Records skipped as invalid
    pub errors: usize,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

impl SyncStats {
    /// Create new stats
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one emitted record
    pub fn add_record(&mut self, stream: &str) {
        self.records_synced += 1;
        *self.records_by_stream.entry(stream.to_string()).or_default() += 1;
    }

    /// Records emitted for a stream
    pub fn records_for(&self, stream: &str) -> usize {
        self.records_by_stream.get(stream).copied().unwrap_or(0)
    }

    /// Add a page
    pub fn add_page(&mut self) {
        self.pages_fetched += 1;
    }

    /// Add a chain
    pub fn add_chain(&mut self) {
        self.chains_synced += 1;
    }

    /// Add a stream
    pub fn add_stream(&mut self) {
        self.streams_synced += 1;
    }

    /// Add an error
    pub fn add_error(&mut self) {
        self.errors += 1;
    }

    /// Set duration
    pub fn set_duration(&mut self, ms: u64) {
        self.duration_ms = ms;
    }
}
