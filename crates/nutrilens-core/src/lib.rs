//! # NutriLens Core
//!
//! Core library for NutriLens - a personal nutrition tracker.
//!
//! This crate provides the calorie-target calculator, the daily intake
//! aggregator, and the storage abstractions, independent of any host
//! application.
//!
//! ## Architecture
//!
//! - **profile**: Biometrics, goal settings and the user profile document
//! - **calculator**: BMR/TDEE estimation and macro target derivation
//! - **daily**: Food entries, daily records and day roll-over
//! - **aggregator**: Totals, progress percentages and remaining budget
//! - **session**: Caller-owned context that threads profile and day state
//! - **storage**: Storage trait and the SQLite implementation
//!
//! The calculator and aggregator are pure functions over plain values.
//! All state ownership lives in [`Session`] and the store behind it.

pub mod aggregator;
pub mod calculator;
pub mod daily;
pub mod error;
pub mod fs;
pub mod profile;
pub mod session;
pub mod storage;

pub use aggregator::{accumulate, overage, progress, remaining, DailySummary, MacroTotals};
pub use calculator::{
    calculate_daily_calorie_target, checked_daily_calorie_target, derive_macro_targets,
    explain_target, suggest_goals, MacroTargets, TargetBreakdown,
};
pub use daily::{is_same_day, roll_over, DailyRecord, DateKey, DayState, FoodEntry, NewFoodEntry};
pub use error::{NutriError, Result};
pub use profile::{
    ActivityLevel, Biometrics, Gender, HealthGoal, MacroGoals, Theme, UserProfile, WaterReminder,
};
pub use session::Session;
pub use storage::NutritionStore;

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
