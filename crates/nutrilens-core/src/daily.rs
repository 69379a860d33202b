//! Food entries, daily records, and the day roll-over rule.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::aggregator::accumulate;
use crate::error::{NutriError, Result};

/// Calendar-date key for a daily record (`YYYY-MM-DD`, no time component).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DateKey(NaiveDate);

impl DateKey {
    pub const FORMAT: &'static str = "%Y-%m-%d";

    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// The calendar date of `instant` as observed in `tz`.
    pub fn from_instant(instant: DateTime<Utc>, tz: Tz) -> Self {
        Self(instant.with_timezone(&tz).date_naive())
    }

    /// Today's key in `tz`.
    pub fn today_in(tz: Tz) -> Self {
        Self::from_instant(Utc::now(), tz)
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(Self::FORMAT))
    }
}

impl FromStr for DateKey {
    type Err = NutriError;

    fn from_str(s: &str) -> Result<Self> {
        NaiveDate::parse_from_str(s.trim(), Self::FORMAT)
            .map(Self)
            .map_err(|_| NutriError::InvalidInput(format!("Invalid date (expected YYYY-MM-DD): {}", s)))
    }
}

/// One logged food item. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodEntry {
    pub id: Uuid,
    pub name: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub ingredients: Vec<String>,
    pub timestamp: DateTime<Utc>,
    pub image: Option<String>,
}

/// Builder for creating new food entries.
#[derive(Debug, Clone)]
pub struct NewFoodEntry {
    pub name: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub ingredients: Vec<String>,
    pub timestamp: Option<DateTime<Utc>>,
    pub image: Option<String>,
}

impl NewFoodEntry {
    pub fn new(name: impl Into<String>, calories: f64) -> Self {
        Self {
            name: name.into(),
            calories,
            protein: 0.0,
            carbs: 0.0,
            fat: 0.0,
            ingredients: Vec::new(),
            timestamp: None,
            image: None,
        }
    }

    pub fn with_macros(mut self, protein: f64, carbs: f64, fat: f64) -> Self {
        self.protein = protein;
        self.carbs = carbs;
        self.fat = fat;
        self
    }

    pub fn with_ingredients(mut self, ingredients: Vec<String>) -> Self {
        self.ingredients = ingredients;
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(NutriError::Validation(
                "food name must not be empty".to_string(),
            ));
        }
        for (label, value) in [
            ("calories", self.calories),
            ("protein", self.protein),
            ("carbs", self.carbs),
            ("fat", self.fat),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(NutriError::Validation(format!(
                    "{} must be a non-negative number (got {})",
                    label, value
                )));
            }
        }
        Ok(())
    }

    /// Validate and stamp the entry with an id (and `now` if no timestamp was set).
    pub fn into_entry(self) -> Result<FoodEntry> {
        self.validate()?;
        let ingredients = self
            .ingredients
            .into_iter()
            .map(|i| i.trim().to_string())
            .filter(|i| !i.is_empty())
            .collect();
        Ok(FoodEntry {
            id: Uuid::now_v7(),
            name: self.name.trim().to_string(),
            calories: self.calories,
            protein: self.protein,
            carbs: self.carbs,
            fat: self.fat,
            ingredients,
            timestamp: self.timestamp.unwrap_or_else(Utc::now),
            image: self.image,
        })
    }
}

/// One calendar day of logged food and water.
///
/// `calories` caches the sum over `entries` and is maintained by [`DailyRecord::log_food`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyRecord {
    pub date: DateKey,
    pub calories: f64,
    /// Glasses of water
    pub water: u32,
    pub entries: Vec<FoodEntry>,
}

impl DailyRecord {
    pub fn new(date: DateKey) -> Self {
        Self {
            date,
            calories: 0.0,
            water: 0,
            entries: Vec::new(),
        }
    }

    /// Append an entry and update the cached calorie total.
    pub fn log_food(&mut self, entry: FoodEntry) {
        self.calories += entry.calories;
        self.entries.push(entry);
    }

    pub fn add_water(&mut self) {
        self.water = self.water.saturating_add(1);
    }

    /// Remove one glass; never goes below zero.
    pub fn remove_water(&mut self) {
        self.water = self.water.saturating_sub(1);
    }

    pub fn is_consistent(&self) -> bool {
        (accumulate(&self.entries).calories - self.calories).abs() < 1e-6
    }

    /// Entries newest-first, for display.
    pub fn recent_first(&self) -> impl Iterator<Item = &FoodEntry> {
        self.entries.iter().rev()
    }
}

pub fn is_same_day(record: &DailyRecord, reference: DateKey) -> bool {
    record.date == reference
}

/// Whether the record carried into a session is still today's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayState {
    /// The stored record is for today and was kept
    Active,
    /// A new empty record was started for today
    Reset,
}

/// Keep `stored` if it belongs to `today`, otherwise start an empty record for `today`.
///
/// The previous record is not modified; archiving it is up to the caller.
pub fn roll_over(stored: Option<DailyRecord>, today: DateKey) -> (DailyRecord, DayState) {
    match stored {
        Some(record) if is_same_day(&record, today) => (record, DayState::Active),
        _ => (DailyRecord::new(today), DayState::Reset),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn key(s: &str) -> DateKey {
        s.parse().unwrap()
    }

    fn entry(name: &str, calories: f64) -> FoodEntry {
        NewFoodEntry::new(name, calories).into_entry().unwrap()
    }

    #[test]
    fn test_date_key_round_trip() {
        let k = key("2026-03-09");
        assert_eq!(k.to_string(), "2026-03-09");
        assert_eq!(serde_json::to_string(&k).unwrap(), "\"2026-03-09\"");
        assert!("2026-3-9T10:00".parse::<DateKey>().is_err());
    }

    #[test]
    fn test_date_key_respects_timezone() {
        let instant = Utc.with_ymd_and_hms(2026, 1, 1, 3, 30, 0).unwrap();
        assert_eq!(DateKey::from_instant(instant, Tz::UTC), key("2026-01-01"));
        assert_eq!(
            DateKey::from_instant(instant, chrono_tz::America::New_York),
            key("2025-12-31")
        );
    }

    #[test]
    fn test_new_entry_builder() {
        let ts = Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap();
        let e = NewFoodEntry::new(" Oatmeal ", 310.0)
            .with_macros(11.0, 54.0, 6.0)
            .with_ingredients(vec!["oats".into(), " ".into(), "milk".into()])
            .with_image("photo-1.jpg")
            .at(ts)
            .into_entry()
            .unwrap();

        assert_eq!(e.name, "Oatmeal");
        assert_eq!(e.ingredients, vec!["oats", "milk"]);
        assert_eq!(e.timestamp, ts);
        assert_eq!(e.image.as_deref(), Some("photo-1.jpg"));
        assert!(!e.id.is_nil());
    }

    #[test]
    fn test_entry_validation() {
        assert!(NewFoodEntry::new("", 10.0).validate().is_err());
        assert!(NewFoodEntry::new("Soup", -1.0).validate().is_err());
        assert!(NewFoodEntry::new("Soup", 100.0)
            .with_macros(1.0, f64::INFINITY, 0.0)
            .validate()
            .is_err());
        assert!(NewFoodEntry::new("Soup", 0.0).validate().is_ok());
    }

    #[test]
    fn test_log_food_keeps_cache_consistent() {
        let mut record = DailyRecord::new(key("2026-01-01"));
        assert!(record.is_consistent());
        record.log_food(entry("Apple", 95.0));
        record.log_food(entry("Bagel", 245.5));
        assert_eq!(record.calories, 340.5);
        assert!(record.is_consistent());

        record.calories += 1.0;
        assert!(!record.is_consistent());
    }

    #[test]
    fn test_water_never_negative() {
        let mut record = DailyRecord::new(key("2026-01-01"));
        record.remove_water();
        assert_eq!(record.water, 0);
        record.add_water();
        record.add_water();
        record.remove_water();
        assert_eq!(record.water, 1);
    }

    #[test]
    fn test_recent_first_reverses_insertion_order() {
        let mut record = DailyRecord::new(key("2026-01-01"));
        record.log_food(entry("Breakfast", 400.0));
        record.log_food(entry("Lunch", 600.0));
        record.log_food(entry("Dinner", 700.0));
        let names: Vec<&str> = record.recent_first().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Dinner", "Lunch", "Breakfast"]);
        assert_eq!(record.entries[0].name, "Breakfast");
    }

    #[test]
    fn test_roll_over_keeps_todays_record() {
        let mut stored = DailyRecord::new(key("2026-01-01"));
        stored.add_water();
        let (record, state) = roll_over(Some(stored.clone()), key("2026-01-01"));
        assert_eq!(state, DayState::Active);
        assert_eq!(record, stored);
    }

    #[test]
    fn test_roll_over_resets_stale_record() {
        let mut stored = DailyRecord::new(key("2025-12-31"));
        stored.log_food(entry("Late snack", 200.0));
        let (record, state) = roll_over(Some(stored), key("2026-01-01"));
        assert_eq!(state, DayState::Reset);
        assert_eq!(record, DailyRecord::new(key("2026-01-01")));
    }

    #[test]
    fn test_roll_over_without_stored_record() {
        let (record, state) = roll_over(None, key("2026-01-01"));
        assert_eq!(state, DayState::Reset);
        assert!(record.entries.is_empty());
        assert!(is_same_day(&record, key("2026-01-01")));
        assert!(!is_same_day(&record, key("2026-01-02")));
    }
}
