//! Daily intake aggregation: totals, progress percentages and remaining budget.

use std::iter::Sum;
use std::ops::Add;

use serde::{Deserialize, Serialize};

use crate::daily::{DailyRecord, DateKey, FoodEntry};
use crate::error::{NutriError, Result};
use crate::profile::MacroGoals;

/// Summed calories and macro grams.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MacroTotals {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

impl Add for MacroTotals {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            calories: self.calories + rhs.calories,
            protein: self.protein + rhs.protein,
            carbs: self.carbs + rhs.carbs,
            fat: self.fat + rhs.fat,
        }
    }
}

impl Sum for MacroTotals {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

impl From<&FoodEntry> for MacroTotals {
    fn from(entry: &FoodEntry) -> Self {
        Self {
            calories: entry.calories,
            protein: entry.protein,
            carbs: entry.carbs,
            fat: entry.fat,
        }
    }
}

/// Sum every field across `entries`. Zero for an empty slice.
pub fn accumulate(entries: &[FoodEntry]) -> MacroTotals {
    entries.iter().map(MacroTotals::from).sum()
}

/// Percentage of `goal` reached by `value`, clamped to `0..=100`.
///
/// # Errors
///
/// Returns `NutriError::InvalidGoal` if `goal` is zero, negative or not finite.
pub fn progress(value: f64, goal: f64) -> Result<f64> {
    if !goal.is_finite() || goal <= 0.0 {
        return Err(NutriError::InvalidGoal { goal });
    }
    Ok((value / goal * 100.0).clamp(0.0, 100.0))
}

/// Budget left for the day; reports zero rather than a negative overage.
pub fn remaining(daily_goal: f64, consumed: f64) -> f64 {
    (daily_goal - consumed).max(0.0)
}

/// Amount consumed beyond the goal; zero while under budget.
pub fn overage(daily_goal: f64, consumed: f64) -> f64 {
    (consumed - daily_goal).max(0.0)
}

/// Everything the daily dashboard shows, computed from a record and the goals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySummary {
    pub date: DateKey,
    pub totals: MacroTotals,
    pub goals: MacroGoals,
    pub calorie_progress: f64,
    pub protein_progress: f64,
    pub carbs_progress: f64,
    pub fat_progress: f64,
    pub calories_remaining: f64,
    pub calories_over: f64,
    pub water: u32,
    pub entry_count: usize,
}

impl DailySummary {
    /// Calories come from the record's cached total; macros from its entries.
    pub fn compute(record: &DailyRecord, goals: &MacroGoals) -> Result<Self> {
        if !record.is_consistent() {
            tracing::warn!(
                date = %record.date,
                cached = record.calories,
                "cached calories disagree with logged entries"
            );
        }
        let mut totals = accumulate(&record.entries);
        totals.calories = record.calories;

        Ok(Self {
            date: record.date,
            totals,
            goals: *goals,
            calorie_progress: progress(totals.calories, goals.daily_calories)?,
            protein_progress: progress(totals.protein, goals.protein_g)?,
            carbs_progress: progress(totals.carbs, goals.carbs_g)?,
            fat_progress: progress(totals.fat, goals.fat_g)?,
            calories_remaining: remaining(goals.daily_calories, totals.calories),
            calories_over: overage(goals.daily_calories, totals.calories),
            water: record.water,
            entry_count: record.entries.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::daily::NewFoodEntry;

    fn entry(calories: f64, protein: f64, carbs: f64, fat: f64) -> FoodEntry {
        NewFoodEntry::new("item", calories)
            .with_macros(protein, carbs, fat)
            .into_entry()
            .unwrap()
    }

    #[test]
    fn test_accumulate_empty_is_zero() {
        assert_eq!(accumulate(&[]), MacroTotals::default());
    }

    #[test]
    fn test_accumulate_sums_each_field() {
        let entries = vec![entry(300.0, 20.0, 30.0, 10.0), entry(450.0, 25.0, 40.0, 18.0)];
        let totals = accumulate(&entries);
        assert_eq!(totals.calories, 750.0);
        assert_eq!(totals.protein, 45.0);
        assert_eq!(totals.carbs, 70.0);
        assert_eq!(totals.fat, 28.0);
    }

    #[test]
    fn test_accumulate_is_order_independent() {
        let mut entries = vec![
            entry(120.0, 3.0, 20.0, 2.0),
            entry(640.0, 41.0, 55.0, 22.0),
            entry(80.0, 1.0, 19.0, 0.0),
        ];
        let forward = accumulate(&entries);
        entries.reverse();
        assert_eq!(accumulate(&entries), forward);
        entries.swap(0, 1);
        assert_eq!(accumulate(&entries), forward);
    }

    #[test]
    fn test_progress_clamps() {
        assert_eq!(progress(0.0, 2000.0).unwrap(), 0.0);
        assert_eq!(progress(1000.0, 2000.0).unwrap(), 50.0);
        assert_eq!(progress(2000.0, 2000.0).unwrap(), 100.0);
        assert_eq!(progress(4000.0, 2000.0).unwrap(), 100.0);
        assert_eq!(progress(-50.0, 2000.0).unwrap(), 0.0);
    }

    #[test]
    fn test_progress_is_monotonic() {
        let mut last = 0.0;
        for v in 0..300 {
            let p = progress(v as f64 * 10.0, 1500.0).unwrap();
            assert!(p >= last);
            last = p;
        }
    }

    #[test]
    fn test_progress_rejects_non_positive_goal() {
        assert!(matches!(progress(10.0, 0.0), Err(NutriError::InvalidGoal { .. })));
        assert!(matches!(progress(10.0, -5.0), Err(NutriError::InvalidGoal { .. })));
        assert!(progress(10.0, f64::NAN).is_err());
    }

    #[test]
    fn test_remaining_and_overage() {
        assert_eq!(remaining(2200.0, 1800.0), 400.0);
        assert_eq!(remaining(2200.0, 2500.0), 0.0);
        assert_eq!(overage(2200.0, 2500.0), 300.0);
        assert_eq!(overage(2200.0, 1800.0), 0.0);
        for consumed in [0.0, 1.0, 2199.0, 2200.0, 9000.0] {
            assert!(remaining(2200.0, consumed) >= 0.0);
        }
    }

    #[test]
    fn test_summary_from_record() {
        let mut record = DailyRecord::new("2026-01-01".parse().unwrap());
        record.log_food(entry(1100.0, 75.0, 125.0, 35.0));
        record.add_water();
        let goals = MacroGoals::default();

        let summary = DailySummary::compute(&record, &goals).unwrap();
        assert_eq!(summary.calorie_progress, 50.0);
        assert_eq!(summary.protein_progress, 50.0);
        assert_eq!(summary.carbs_progress, 50.0);
        assert_eq!(summary.fat_progress, 50.0);
        assert_eq!(summary.calories_remaining, 1100.0);
        assert_eq!(summary.calories_over, 0.0);
        assert_eq!(summary.water, 1);
        assert_eq!(summary.entry_count, 1);
    }

    #[test]
    fn test_summary_with_zero_goal_fails() {
        let record = DailyRecord::new("2026-01-01".parse().unwrap());
        let goals = MacroGoals {
            protein_g: 0.0,
            ..MacroGoals::default()
        };
        assert!(DailySummary::compute(&record, &goals).is_err());
    }
}
