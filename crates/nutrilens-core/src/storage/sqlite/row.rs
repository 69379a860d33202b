//! Food entry row type for database queries.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::daily::FoodEntry;
use crate::error::{NutriError, Result};

/// Raw row data from the food_entries table, before parsing into domain types.
#[derive(Debug)]
pub struct FoodEntryRow {
    pub id: String,
    pub name: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub ingredients_json: String,
    pub logged_at: String,
    pub image: Option<String>,
}

impl FoodEntryRow {
    /// Column order matches [`ENTRY_COLUMNS`](super::ENTRY_COLUMNS).
    pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            calories: row.get(2)?,
            protein: row.get(3)?,
            carbs: row.get(4)?,
            fat: row.get(5)?,
            ingredients_json: row.get(6)?,
            logged_at: row.get(7)?,
            image: row.get(8)?,
        })
    }
}

impl TryFrom<FoodEntryRow> for FoodEntry {
    type Error = NutriError;

    fn try_from(row: FoodEntryRow) -> Result<Self> {
        let id = Uuid::parse_str(&row.id)
            .map_err(|e| NutriError::Storage(format!("Invalid entry UUID: {}", e)))?;
        let timestamp = DateTime::parse_from_rfc3339(&row.logged_at)
            .map_err(|e| NutriError::Storage(format!("Invalid timestamp: {}", e)))?
            .with_timezone(&Utc);
        let ingredients: Vec<String> = serde_json::from_str(&row.ingredients_json)
            .map_err(|e| NutriError::Storage(format!("Invalid ingredients JSON: {}", e)))?;

        Ok(FoodEntry {
            id,
            name: row.name,
            calories: row.calories,
            protein: row.protein,
            carbs: row.carbs,
            fat: row.fat,
            ingredients,
            timestamp,
            image: row.image,
        })
    }
}
