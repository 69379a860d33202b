//! Storage-layer data types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::daily::DateKey;

/// Metadata for a store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreMetadata {
    /// Format version (e.g., "0.1")
    pub format_version: String,

    /// When this store was created
    pub created_at: DateTime<Utc>,

    /// Last modification timestamp (informational)
    pub last_modified: DateTime<Utc>,
}

/// Filter for querying daily records.
#[derive(Debug, Clone, Default)]
pub struct RecordFilter {
    /// Start date (inclusive)
    pub since: Option<DateKey>,

    /// End date (inclusive)
    pub until: Option<DateKey>,

    /// Maximum number of records
    pub limit: Option<usize>,
}

impl RecordFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn since(mut self, date: DateKey) -> Self {
        self.since = Some(date);
        self
    }

    pub fn until(mut self, date: DateKey) -> Self {
        self.until = Some(date);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}
