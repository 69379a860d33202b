//! Daily calorie target and macronutrient target calculator.
//!
//! BMR uses the revised Harris-Benedict equation. The female coefficients are
//! applied to both `Female` and `Other`. The target is maintenance (BMR times
//! the activity multiplier) plus the goal adjustment, rounded to whole kcal.
//!
//! No lower bound is applied: extreme inputs combined with a weight-loss goal
//! can produce a zero or negative target.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::profile::{Biometrics, Gender, MacroGoals};

/// Share of daily calories allotted to protein.
pub const PROTEIN_SHARE: f64 = 0.30;
/// Share of daily calories allotted to carbohydrates.
pub const CARBS_SHARE: f64 = 0.40;
/// Share of daily calories allotted to fat.
pub const FAT_SHARE: f64 = 0.30;

/// kcal per gram of protein.
pub const PROTEIN_KCAL_PER_G: f64 = 4.0;
/// kcal per gram of carbohydrate.
pub const CARBS_KCAL_PER_G: f64 = 4.0;
/// kcal per gram of fat.
pub const FAT_KCAL_PER_G: f64 = 9.0;

/// Suggested macro grams for a calorie target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroTargets {
    pub protein_g: i64,
    pub carbs_g: i64,
    pub fat_g: i64,
}

/// Intermediate values of a target calculation, for display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetBreakdown {
    pub bmr: f64,
    pub multiplier: f64,
    pub maintenance: f64,
    pub adjustment: f64,
    pub target: i64,
    pub macros: MacroTargets,
}

/// Round to the nearest integer, with halves rounding towards positive infinity.
fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// Basal metabolic rate in kcal/day.
pub fn basal_metabolic_rate(bio: &Biometrics) -> f64 {
    let age = f64::from(bio.age_years);
    match bio.gender {
        Gender::Male => 88.362 + 13.397 * bio.weight_kg + 4.799 * bio.height_cm - 5.677 * age,
        Gender::Female | Gender::Other => {
            447.593 + 9.247 * bio.weight_kg + 3.098 * bio.height_cm - 4.330 * age
        }
    }
}

/// Total daily energy expenditure: BMR scaled by activity.
pub fn maintenance_calories(bio: &Biometrics) -> f64 {
    basal_metabolic_rate(bio) * bio.activity_level.multiplier()
}

/// Recommended daily calorie budget in whole kcal.
///
/// Total for any numeric input; see [`checked_daily_calorie_target`] for the
/// validating variant.
pub fn calculate_daily_calorie_target(bio: &Biometrics) -> i64 {
    round_half_up(maintenance_calories(bio) + bio.goal.calorie_adjustment())
}

/// Like [`calculate_daily_calorie_target`], but rejects non-positive weight,
/// height or age with `InvalidProfile`.
pub fn checked_daily_calorie_target(bio: &Biometrics) -> Result<i64> {
    bio.validate()?;
    Ok(calculate_daily_calorie_target(bio))
}

/// Split a calorie target 30/40/30 into protein, carb and fat grams.
pub fn derive_macro_targets(daily_calorie_target: i64) -> MacroTargets {
    let kcal = daily_calorie_target as f64;
    MacroTargets {
        protein_g: round_half_up(kcal * PROTEIN_SHARE / PROTEIN_KCAL_PER_G),
        carbs_g: round_half_up(kcal * CARBS_SHARE / CARBS_KCAL_PER_G),
        fat_g: round_half_up(kcal * FAT_SHARE / FAT_KCAL_PER_G),
    }
}

/// The full goal set suggested for these biometrics.
pub fn suggest_goals(bio: &Biometrics) -> MacroGoals {
    let target = calculate_daily_calorie_target(bio);
    let macros = derive_macro_targets(target);
    MacroGoals {
        daily_calories: target as f64,
        protein_g: macros.protein_g as f64,
        carbs_g: macros.carbs_g as f64,
        fat_g: macros.fat_g as f64,
    }
}

/// The target together with the intermediate values it was derived from.
pub fn explain_target(bio: &Biometrics) -> TargetBreakdown {
    let bmr = basal_metabolic_rate(bio);
    let multiplier = bio.activity_level.multiplier();
    let maintenance = bmr * multiplier;
    let adjustment = bio.goal.calorie_adjustment();
    let target = round_half_up(maintenance + adjustment);
    TargetBreakdown {
        bmr,
        multiplier,
        maintenance,
        adjustment,
        target,
        macros: derive_macro_targets(target),
    }
}
