//! File-backed SQLite storage backend.
//!
//! One row per calendar day in `days`, one row per logged item in
//! `food_entries` (ordered by `position`), and the profile as a single JSON
//! document. Every write goes through a transaction so a day and its
//! entries never diverge on disk.

mod row;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OpenFlags, OptionalExtension};

use crate::daily::{DailyRecord, DateKey, FoodEntry};
use crate::error::{NutriError, Result};
use crate::profile::UserProfile;
use crate::storage::traits::NutritionStore;
use crate::storage::types::{RecordFilter, StoreMetadata};

use row::FoodEntryRow;

const FORMAT_VERSION: &str = "0.1";

const ENTRY_COLUMNS: &str =
    "id, name, calories, protein, carbs, fat, ingredients_json, logged_at, image";

const SCHEMA: &str = r#"
    CREATE TABLE meta (
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );

    -- Single-row profile document
    CREATE TABLE profile (
        id INTEGER PRIMARY KEY CHECK (id = 1),
        profile_json TEXT NOT NULL,
        updated_at TEXT NOT NULL
    );

    CREATE TABLE days (
        date TEXT PRIMARY KEY,
        calories REAL NOT NULL CHECK (calories >= 0),
        water INTEGER NOT NULL CHECK (water >= 0),
        updated_at TEXT NOT NULL
    );

    CREATE TABLE food_entries (
        id TEXT PRIMARY KEY,
        date TEXT NOT NULL,
        position INTEGER NOT NULL,
        name TEXT NOT NULL,
        calories REAL NOT NULL CHECK (calories >= 0),
        protein REAL NOT NULL CHECK (protein >= 0),
        carbs REAL NOT NULL CHECK (carbs >= 0),
        fat REAL NOT NULL CHECK (fat >= 0),
        ingredients_json TEXT NOT NULL,
        logged_at TEXT NOT NULL,
        image TEXT,

        UNIQUE(date, position),
        FOREIGN KEY(date) REFERENCES days(date)
    );
"#;

/// SQLite storage engine.
pub struct SqliteStore {
    path: PathBuf,
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Path of the backing database file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Lock the database connection, returning an error if the mutex is poisoned.
    fn lock_conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| NutriError::Storage("SQLite connection poisoned".to_string()))
    }

    fn touch(conn: &Connection) -> Result<()> {
        conn.execute(
            "INSERT INTO meta (key, value) VALUES ('last_modified', ?1)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            [Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    fn meta_value(conn: &Connection, key: &str) -> Result<String> {
        conn.query_row("SELECT value FROM meta WHERE key = ?1", [key], |row| {
            row.get(0)
        })
        .optional()?
        .ok_or_else(|| NutriError::Storage(format!("Metadata key missing: {}", key)))
    }

    fn parse_timestamp(value: &str, label: &str) -> Result<DateTime<Utc>> {
        Ok(DateTime::parse_from_rfc3339(value)
            .map_err(|e| NutriError::Storage(format!("Invalid {} timestamp: {}", label, e)))?
            .with_timezone(&Utc))
    }

    fn read_entries(conn: &Connection, date: &str) -> Result<Vec<FoodEntry>> {
        let query = format!(
            "SELECT {} FROM food_entries WHERE date = ?1 ORDER BY position ASC",
            ENTRY_COLUMNS
        );
        let mut stmt = conn.prepare(&query)?;
        let rows = stmt.query_map([date], FoodEntryRow::from_row)?;

        let mut entries = Vec::new();
        for row in rows {
            entries.push(row?.try_into()?);
        }
        Ok(entries)
    }

    fn read_record(conn: &Connection, date: DateKey) -> Result<Option<DailyRecord>> {
        let key = date.to_string();
        let day = conn
            .query_row(
                "SELECT calories, water FROM days WHERE date = ?1",
                [&key],
                |row| Ok((row.get::<_, f64>(0)?, row.get::<_, u32>(1)?)),
            )
            .optional()?;

        let Some((calories, water)) = day else {
            return Ok(None);
        };

        Ok(Some(DailyRecord {
            date,
            calories,
            water,
            entries: Self::read_entries(conn, &key)?,
        }))
    }

    fn parse_date(value: &str) -> Result<DateKey> {
        value
            .parse()
            .map_err(|e| NutriError::Storage(format!("Invalid day key in store: {}", e)))
    }
}

impl NutritionStore for SqliteStore {
    fn create(path: &Path) -> Result<Self> {
        if path.exists() {
            return Err(NutriError::Storage("Store file already exists".to_string()));
        }
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        conn.execute_batch(SCHEMA)?;

        let now = Utc::now().to_rfc3339();
        conn.execute(
            "INSERT INTO meta (key, value) VALUES (?1, ?2)",
            params!["format_version", FORMAT_VERSION],
        )?;
        conn.execute(
            "INSERT INTO meta (key, value) VALUES (?1, ?2)",
            params!["created_at", now],
        )?;
        conn.execute(
            "INSERT INTO meta (key, value) VALUES (?1, ?2)",
            params!["last_modified", now],
        )?;

        tracing::debug!(path = %path.display(), "created store");

        Ok(Self {
            path: path.to_path_buf(),
            conn: Mutex::new(conn),
        })
    }

    fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(NutriError::StoreNotFound);
        }

        let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_WRITE)?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;

        let version: String = conn
            .query_row(
                "SELECT value FROM meta WHERE key = 'format_version'",
                [],
                |row| row.get(0),
            )
            .map_err(|e| NutriError::Storage(format!("Not a NutriLens store: {}", e)))?;
        if version != FORMAT_VERSION {
            return Err(NutriError::Storage(format!(
                "Unsupported store format version: {}",
                version
            )));
        }

        tracing::debug!(path = %path.display(), "opened store");

        Ok(Self {
            path: path.to_path_buf(),
            conn: Mutex::new(conn),
        })
    }

    fn metadata(&self) -> Result<StoreMetadata> {
        let conn = self.lock_conn()?;

        let format_version = Self::meta_value(&conn, "format_version")?;
        let created_at = Self::parse_timestamp(&Self::meta_value(&conn, "created_at")?, "created_at")?;
        let last_modified =
            Self::parse_timestamp(&Self::meta_value(&conn, "last_modified")?, "last_modified")?;

        Ok(StoreMetadata {
            format_version,
            created_at,
            last_modified,
        })
    }

    fn load_profile(&self) -> Result<Option<UserProfile>> {
        let conn = self.lock_conn()?;
        let doc: Option<String> = conn
            .query_row("SELECT profile_json FROM profile WHERE id = 1", [], |row| {
                row.get(0)
            })
            .optional()?;

        match doc {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    fn save_profile(&mut self, profile: &UserProfile) -> Result<()> {
        let doc = serde_json::to_string(profile)?;
        let mut conn = self.lock_conn()?;
        let tx = conn.transaction()?;
        tx.execute(
            "INSERT INTO profile (id, profile_json, updated_at) VALUES (1, ?1, ?2)
             ON CONFLICT(id) DO UPDATE SET
                profile_json = excluded.profile_json,
                updated_at = excluded.updated_at",
            params![doc, Utc::now().to_rfc3339()],
        )?;
        Self::touch(&tx)?;
        tx.commit()?;

        tracing::debug!("saved profile");
        Ok(())
    }

    fn load_record(&self, date: DateKey) -> Result<Option<DailyRecord>> {
        let conn = self.lock_conn()?;
        Self::read_record(&conn, date)
    }

    fn latest_record(&self) -> Result<Option<DailyRecord>> {
        let conn = self.lock_conn()?;
        let latest: Option<String> = conn
            .query_row(
                "SELECT date FROM days ORDER BY date DESC LIMIT 1",
                [],
                |row| row.get(0),
            )
            .optional()?;

        match latest {
            Some(value) => Self::read_record(&conn, Self::parse_date(&value)?),
            None => Ok(None),
        }
    }

    fn save_record(&mut self, record: &DailyRecord) -> Result<()> {
        let date = record.date.to_string();
        let now = Utc::now().to_rfc3339();

        let mut conn = self.lock_conn()?;
        let tx = conn.transaction()?;

        tx.execute(
            "INSERT INTO days (date, calories, water, updated_at) VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(date) DO UPDATE SET
                calories = excluded.calories,
                water = excluded.water,
                updated_at = excluded.updated_at",
            params![date, record.calories, record.water, now],
        )?;

        tx.execute("DELETE FROM food_entries WHERE date = ?1", [&date])?;
        {
            let mut stmt = tx.prepare(&format!(
                "INSERT INTO food_entries (date, position, {}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
                ENTRY_COLUMNS
            ))?;
            for (position, entry) in record.entries.iter().enumerate() {
                let ingredients_json = serde_json::to_string(&entry.ingredients)?;
                stmt.execute(params![
                    date,
                    position as i64,
                    entry.id.to_string(),
                    entry.name,
                    entry.calories,
                    entry.protein,
                    entry.carbs,
                    entry.fat,
                    ingredients_json,
                    entry.timestamp.to_rfc3339(),
                    entry.image,
                ])?;
            }
        }

        Self::touch(&tx)?;
        tx.commit()?;

        tracing::debug!(
            date = %record.date,
            entries = record.entries.len(),
            water = record.water,
            "saved daily record"
        );
        Ok(())
    }

    fn list_records(&self, filter: &RecordFilter) -> Result<Vec<DailyRecord>> {
        let conn = self.lock_conn()?;

        let mut conditions: Vec<&str> = Vec::new();
        let mut params: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(since) = filter.since {
            conditions.push("date >= ?");
            params.push(Box::new(since.to_string()));
        }
        if let Some(until) = filter.until {
            conditions.push("date <= ?");
            params.push(Box::new(until.to_string()));
        }

        let mut query = String::from("SELECT date FROM days");
        if !conditions.is_empty() {
            query.push_str(" WHERE ");
            query.push_str(&conditions.join(" AND "));
        }
        query.push_str(" ORDER BY date DESC");

        if let Some(limit) = filter.limit {
            query.push_str(" LIMIT ?");
            params.push(Box::new(limit as i64));
        }

        let dates: Vec<String> = {
            let mut stmt = conn.prepare(&query)?;
            let rows = stmt.query_map(rusqlite::params_from_iter(params.iter()), |row| {
                row.get::<_, String>(0)
            })?;
            rows.collect::<rusqlite::Result<_>>()?
        };

        let mut records = Vec::with_capacity(dates.len());
        for value in dates {
            if let Some(record) = Self::read_record(&conn, Self::parse_date(&value)?)? {
                records.push(record);
            }
        }
        Ok(records)
    }

    fn reset(&mut self) -> Result<()> {
        let mut conn = self.lock_conn()?;
        let tx = conn.transaction()?;
        tx.execute_batch(
            "DELETE FROM food_entries;
             DELETE FROM days;
             DELETE FROM profile;",
        )?;
        Self::touch(&tx)?;
        tx.commit()?;

        tracing::info!(path = %self.path.display(), "store reset");
        Ok(())
    }

    fn check_integrity(&self) -> Result<()> {
        let conn = self.lock_conn()?;

        let mut stmt = conn.prepare("PRAGMA foreign_key_check")?;
        let mut rows = stmt.query([])?;
        if rows.next()?.is_some() {
            return Err(NutriError::Storage(
                "Foreign key integrity check failed".to_string(),
            ));
        }

        let metadata_count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM meta WHERE key IN ('format_version', 'created_at', 'last_modified')",
            [],
            |row| row.get(0),
        )?;
        if metadata_count < 3 {
            return Err(NutriError::Storage(
                "Metadata table missing required keys".to_string(),
            ));
        }

        let stale_totals: i64 = conn.query_row(
            "SELECT COUNT(*) FROM days d
             WHERE ABS(d.calories - COALESCE(
                (SELECT SUM(f.calories) FROM food_entries f WHERE f.date = d.date), 0
             )) > 0.000001",
            [],
            |row| row.get(0),
        )?;
        if stale_totals > 0 {
            return Err(NutriError::Storage(format!(
                "{} day(s) have cached calories that disagree with their entries",
                stale_totals
            )));
        }

        let profile_doc: Option<String> = conn
            .query_row("SELECT profile_json FROM profile WHERE id = 1", [], |row| {
                row.get(0)
            })
            .optional()?;
        if let Some(doc) = profile_doc {
            serde_json::from_str::<UserProfile>(&doc)
                .map_err(|e| NutriError::Storage(format!("Profile document is unreadable: {}", e)))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::daily::NewFoodEntry;
    use tempfile::tempdir;

    fn key(s: &str) -> DateKey {
        s.parse().unwrap()
    }

    fn record_with(date: &str, items: &[(&str, f64)]) -> DailyRecord {
        let mut record = DailyRecord::new(key(date));
        for (name, calories) in items {
            record.log_food(NewFoodEntry::new(*name, *calories).into_entry().unwrap());
        }
        record
    }

    #[test]
    fn test_create_then_open() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("store.db");

        let store = SqliteStore::create(&path).unwrap();
        let meta = store.metadata().unwrap();
        assert_eq!(meta.format_version, FORMAT_VERSION);
        drop(store);

        let reopened = SqliteStore::open(&path).unwrap();
        assert_eq!(reopened.path(), path.as_path());
        assert!(reopened.load_profile().unwrap().is_none());
        assert!(reopened.latest_record().unwrap().is_none());
    }

    #[test]
    fn test_create_refuses_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("store.db");
        SqliteStore::create(&path).unwrap();
        assert!(matches!(
            SqliteStore::create(&path),
            Err(NutriError::Storage(_))
        ));
    }

    #[test]
    fn test_open_missing_store() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            SqliteStore::open(&dir.path().join("missing.db")),
            Err(NutriError::StoreNotFound)
        ));
    }

    #[test]
    fn test_open_rejects_foreign_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        fs::write(&path, "just some text, not a database at all").unwrap();
        assert!(SqliteStore::open(&path).is_err());
    }

    #[test]
    fn test_profile_round_trip() {
        let dir = tempdir().unwrap();
        let mut store = SqliteStore::create(&dir.path().join("store.db")).unwrap();

        let mut profile = UserProfile::default();
        profile.name = "Robin".to_string();
        profile.add_allergy("peanuts");
        store.save_profile(&profile).unwrap();

        profile.biometrics.weight_kg = 68.5;
        store.save_profile(&profile).unwrap();

        assert_eq!(store.load_profile().unwrap(), Some(profile));
    }

    #[test]
    fn test_record_keeps_entry_order() {
        let dir = tempdir().unwrap();
        let mut store = SqliteStore::create(&dir.path().join("store.db")).unwrap();

        let mut record = record_with(
            "2026-02-01",
            &[("Eggs", 180.0), ("Toast", 120.0), ("Coffee", 5.0)],
        );
        record.add_water();
        store.save_record(&record).unwrap();

        let loaded = store.load_record(key("2026-02-01")).unwrap().unwrap();
        assert_eq!(loaded, record);
        let names: Vec<&str> = loaded.entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Eggs", "Toast", "Coffee"]);
    }

    #[test]
    fn test_save_record_replaces_day() {
        let dir = tempdir().unwrap();
        let mut store = SqliteStore::create(&dir.path().join("store.db")).unwrap();

        let mut record = record_with("2026-02-01", &[("Eggs", 180.0)]);
        store.save_record(&record).unwrap();
        record.log_food(NewFoodEntry::new("Salad", 250.0).into_entry().unwrap());
        record.add_water();
        store.save_record(&record).unwrap();

        let loaded = store.load_record(key("2026-02-01")).unwrap().unwrap();
        assert_eq!(loaded.entries.len(), 2);
        assert_eq!(loaded.calories, 430.0);
        assert_eq!(loaded.water, 1);
        store.check_integrity().unwrap();
    }

    #[test]
    fn test_latest_and_list_records() {
        let dir = tempdir().unwrap();
        let mut store = SqliteStore::create(&dir.path().join("store.db")).unwrap();
        for date in ["2026-02-01", "2026-02-03", "2026-02-02"] {
            store.save_record(&record_with(date, &[("Meal", 500.0)])).unwrap();
        }

        let latest = store.latest_record().unwrap().unwrap();
        assert_eq!(latest.date, key("2026-02-03"));

        let all = store.list_records(&RecordFilter::new()).unwrap();
        let dates: Vec<String> = all.iter().map(|r| r.date.to_string()).collect();
        assert_eq!(dates, vec!["2026-02-03", "2026-02-02", "2026-02-01"]);

        let window = store
            .list_records(&RecordFilter::new().since(key("2026-02-02")).limit(1))
            .unwrap();
        assert_eq!(window.len(), 1);
        assert_eq!(window[0].date, key("2026-02-03"));

        let until = store
            .list_records(&RecordFilter::new().until(key("2026-02-01")))
            .unwrap();
        assert_eq!(until.len(), 1);
    }

    #[test]
    fn test_reset_clears_everything() {
        let dir = tempdir().unwrap();
        let mut store = SqliteStore::create(&dir.path().join("store.db")).unwrap();
        store.save_profile(&UserProfile::default()).unwrap();
        store
            .save_record(&record_with("2026-02-01", &[("Meal", 500.0)]))
            .unwrap();

        store.reset().unwrap();

        assert!(store.load_profile().unwrap().is_none());
        assert!(store.latest_record().unwrap().is_none());
        store.check_integrity().unwrap();
    }

    #[test]
    fn test_integrity_detects_stale_calorie_cache() {
        let dir = tempdir().unwrap();
        let mut store = SqliteStore::create(&dir.path().join("store.db")).unwrap();
        let mut record = record_with("2026-02-01", &[("Meal", 500.0)]);
        record.calories = 900.0;
        store.save_record(&record).unwrap();

        assert!(store.check_integrity().is_err());
    }
}
