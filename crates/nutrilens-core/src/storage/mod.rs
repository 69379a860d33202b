//! Storage abstractions and backends.

pub mod sqlite;
pub mod traits;
pub mod types;

pub use sqlite::SqliteStore;
pub use traits::NutritionStore;
pub use types::{RecordFilter, StoreMetadata};
