//! Output formatting helpers for the CLI.

mod text;

use nutrilens_core::{accumulate, DailyRecord, FoodEntry, MacroGoals, TargetBreakdown};
use serde::Serialize;

pub use text::{
    entry_rows, print_profile, print_summary, print_target, ENTRY_COLUMNS, HISTORY_COLUMNS,
};

/// Print any serializable value as pretty JSON on stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Convert an entry to JSON for output.
pub fn entry_json(entry: &FoodEntry) -> serde_json::Value {
    serde_json::json!({
        "id": entry.id,
        "name": entry.name,
        "calories": entry.calories,
        "protein": entry.protein,
        "carbs": entry.carbs,
        "fat": entry.fat,
        "ingredients": entry.ingredients,
        "timestamp": entry.timestamp,
        "image": entry.image,
    })
}

/// A day's log, entries most recent first.
pub fn record_json(record: &DailyRecord) -> serde_json::Value {
    serde_json::json!({
        "date": record.date,
        "calories": record.calories,
        "water": record.water,
        "entries": record.recent_first().map(entry_json).collect::<Vec<_>>(),
    })
}

/// Per-day totals for history listings.
pub fn day_totals_json(record: &DailyRecord, goals: &MacroGoals) -> serde_json::Value {
    let totals = accumulate(&record.entries);
    serde_json::json!({
        "date": record.date,
        "calories": record.calories,
        "protein": totals.protein,
        "carbs": totals.carbs,
        "fat": totals.fat,
        "water": record.water,
        "entry_count": record.entries.len(),
        "calories_remaining": nutrilens_core::remaining(goals.daily_calories, record.calories),
        "calories_over": nutrilens_core::overage(goals.daily_calories, record.calories),
    })
}

pub fn target_json(breakdown: &TargetBreakdown, applied: bool) -> serde_json::Value {
    serde_json::json!({
        "bmr": breakdown.bmr,
        "activity_multiplier": breakdown.multiplier,
        "maintenance": breakdown.maintenance,
        "adjustment": breakdown.adjustment,
        "daily_calories": breakdown.target,
        "protein_g": breakdown.macros.protein_g,
        "carbs_g": breakdown.macros.carbs_g,
        "fat_g": breakdown.macros.fat_g,
        "applied": applied,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use nutrilens_core::{DateKey, NewFoodEntry};
    use std::str::FromStr;

    fn record() -> DailyRecord {
        let mut record = DailyRecord::new(DateKey::from_str("2024-03-10").expect("date"));
        for (name, kcal) in [("Oatmeal", 300.0), ("Salad", 2300.0)] {
            let entry = NewFoodEntry::new(name, kcal)
                .with_macros(10.0, 20.0, 5.0)
                .into_entry()
                .expect("entry");
            record.log_food(entry);
        }
        record
    }

    #[test]
    fn test_record_json_lists_newest_first() {
        let value = record_json(&record());
        assert_eq!(value["date"], "2024-03-10");
        assert_eq!(value["entries"][0]["name"], "Salad");
        assert_eq!(value["entries"][1]["name"], "Oatmeal");
    }

    #[test]
    fn test_day_totals_json_reports_overage() {
        let value = day_totals_json(&record(), &MacroGoals::default());
        assert_eq!(value["calories"], 2600.0);
        assert_eq!(value["protein"], 20.0);
        assert_eq!(value["calories_remaining"], 0.0);
        assert_eq!(value["calories_over"], 400.0);
        assert_eq!(value["entry_count"], 2);
    }
}
