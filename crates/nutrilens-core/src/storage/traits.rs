//! Storage engine trait definition.
//!
//! `NutritionStore` is the persistence boundary for the profile document and
//! the per-day food logs. The calculator and aggregator never touch it; the
//! [`Session`](crate::session::Session) is the only caller in this crate.

use std::path::Path;

use super::types::{RecordFilter, StoreMetadata};
use crate::daily::{DailyRecord, DateKey};
use crate::error::Result;
use crate::profile::UserProfile;

/// Storage interface for profile and daily-record persistence.
///
/// All implementations must ensure:
/// - A daily record and its entries are written atomically
/// - Entry insertion order is preserved per day
/// - Past days are kept when a new day starts
pub trait NutritionStore: Send + Sync {
    /// Create a new, empty store at `path`.
    ///
    /// # Errors
    ///
    /// Returns `NutriError::Storage` if the file already exists or cannot be written.
    fn create(path: &Path) -> Result<Self>
    where
        Self: Sized;

    /// Open an existing store.
    ///
    /// # Errors
    ///
    /// Returns `NutriError::StoreNotFound` if the file does not exist, or
    /// `NutriError::Storage` if it is not a NutriLens store.
    fn open(path: &Path) -> Result<Self>
    where
        Self: Sized;

    /// Get store metadata.
    fn metadata(&self) -> Result<StoreMetadata>;

    // --- Profile ---

    /// Load the saved profile, or `None` if none has been saved yet.
    fn load_profile(&self) -> Result<Option<UserProfile>>;

    /// Replace the saved profile.
    fn save_profile(&mut self, profile: &UserProfile) -> Result<()>;

    // --- Daily records ---

    /// Load the record for `date`, entries in insertion order.
    fn load_record(&self, date: DateKey) -> Result<Option<DailyRecord>>;

    /// Load the record with the most recent date.
    fn latest_record(&self) -> Result<Option<DailyRecord>>;

    /// Insert or replace the record for `record.date`, including its entries.
    fn save_record(&mut self, record: &DailyRecord) -> Result<()>;

    /// List records matching the filter, newest date first.
    fn list_records(&self, filter: &RecordFilter) -> Result<Vec<DailyRecord>>;

    // --- Maintenance ---

    /// Delete the profile and every daily record.
    fn reset(&mut self) -> Result<()>;

    /// Verify referential integrity, metadata and cached calorie totals.
    fn check_integrity(&self) -> Result<()>;
}
