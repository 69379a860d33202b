//! Profile data types: biometrics, goal settings and the user profile document.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{NutriError, Result};

/// Biological formula selector for the BMR estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    Other,
}

/// Activity level used to scale BMR into daily expenditure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Sedentary,
    LightlyActive,
    ModeratelyActive,
    VeryActive,
}

impl ActivityLevel {
    /// Multiplier applied to BMR to estimate TDEE.
    pub fn multiplier(self) -> f64 {
        match self {
            Self::Sedentary => 1.2,
            Self::LightlyActive => 1.375,
            Self::ModeratelyActive => 1.55,
            Self::VeryActive => 1.725,
        }
    }
}

/// The user's health goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthGoal {
    WeightLoss,
    Maintain,
    MuscleGain,
}

impl HealthGoal {
    /// Calories added to (or removed from) maintenance for this goal.
    pub fn calorie_adjustment(self) -> f64 {
        match self {
            Self::WeightLoss => -500.0,
            Self::Maintain => 0.0,
            Self::MuscleGain => 300.0,
        }
    }
}

/// UI theme preference carried in the profile document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// Lowercase, trim, and fold `-`/`_` separators so labels like
/// "Lightly Active", "lightly-active" and "lightly_active" compare equal.
fn normalize_label(value: &str) -> String {
    value
        .trim()
        .to_lowercase()
        .replace(['-', '_'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

impl FromStr for Gender {
    type Err = NutriError;

    fn from_str(s: &str) -> Result<Self> {
        match normalize_label(s).as_str() {
            "male" | "m" => Ok(Self::Male),
            "female" | "f" => Ok(Self::Female),
            "other" => Ok(Self::Other),
            _ => Err(NutriError::InvalidInput(format!(
                "Unknown gender: {} (use male, female or other)",
                s
            ))),
        }
    }
}

impl FromStr for ActivityLevel {
    type Err = NutriError;

    fn from_str(s: &str) -> Result<Self> {
        match normalize_label(s).as_str() {
            "sedentary" => Ok(Self::Sedentary),
            "lightly active" | "light" => Ok(Self::LightlyActive),
            "moderately active" | "moderate" => Ok(Self::ModeratelyActive),
            "very active" | "very" => Ok(Self::VeryActive),
            _ => Err(NutriError::InvalidInput(format!(
                "Unknown activity level: {} (use sedentary, lightly-active, moderately-active or very-active)",
                s
            ))),
        }
    }
}

impl FromStr for HealthGoal {
    type Err = NutriError;

    fn from_str(s: &str) -> Result<Self> {
        match normalize_label(s).as_str() {
            "weight loss" | "lose" => Ok(Self::WeightLoss),
            "maintain" | "maintenance" => Ok(Self::Maintain),
            "muscle gain" | "gain" => Ok(Self::MuscleGain),
            _ => Err(NutriError::InvalidInput(format!(
                "Unknown goal: {} (use weight-loss, maintain or muscle-gain)",
                s
            ))),
        }
    }
}

impl FromStr for Theme {
    type Err = NutriError;

    fn from_str(s: &str) -> Result<Self> {
        match normalize_label(s).as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            _ => Err(NutriError::InvalidInput(format!(
                "Unknown theme: {} (use light or dark)",
                s
            ))),
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Male => "Male",
            Self::Female => "Female",
            Self::Other => "Other",
        })
    }
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Sedentary => "Sedentary",
            Self::LightlyActive => "Lightly Active",
            Self::ModeratelyActive => "Moderately Active",
            Self::VeryActive => "Very Active",
        })
    }
}

impl fmt::Display for HealthGoal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::WeightLoss => "Weight Loss",
            Self::Maintain => "Maintain",
            Self::MuscleGain => "Muscle Gain",
        })
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Light => "light",
            Self::Dark => "dark",
        })
    }
}

/// Calculator inputs.
///
/// The calculator itself does not validate these; call [`Biometrics::validate`]
/// (or use the `checked_*` calculator functions) before trusting the result.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Biometrics {
    pub gender: Gender,

    /// Body weight in kilograms
    pub weight_kg: f64,

    /// Height in centimeters
    pub height_cm: f64,

    /// Age in whole years
    pub age_years: u32,

    pub activity_level: ActivityLevel,

    pub goal: HealthGoal,
}

impl Default for Biometrics {
    fn default() -> Self {
        Self {
            gender: Gender::Male,
            weight_kg: 75.0,
            height_cm: 180.0,
            age_years: 28,
            activity_level: ActivityLevel::ModeratelyActive,
            goal: HealthGoal::Maintain,
        }
    }
}

impl Biometrics {
    /// Reject weight, height or age values that would make the BMR meaningless.
    pub fn validate(&self) -> Result<()> {
        if !self.weight_kg.is_finite() || self.weight_kg <= 0.0 {
            return Err(NutriError::InvalidProfile(format!(
                "weight must be greater than zero (got {})",
                self.weight_kg
            )));
        }
        if !self.height_cm.is_finite() || self.height_cm <= 0.0 {
            return Err(NutriError::InvalidProfile(format!(
                "height must be greater than zero (got {})",
                self.height_cm
            )));
        }
        if self.age_years == 0 {
            return Err(NutriError::InvalidProfile(
                "age must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Stored daily targets. Independently settable; they only need to be positive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacroGoals {
    pub daily_calories: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
}

impl Default for MacroGoals {
    fn default() -> Self {
        Self {
            daily_calories: 2200.0,
            protein_g: 150.0,
            carbs_g: 250.0,
            fat_g: 70.0,
        }
    }
}

impl MacroGoals {
    pub fn validate(&self) -> Result<()> {
        for goal in [self.daily_calories, self.protein_g, self.carbs_g, self.fat_g] {
            if !goal.is_finite() || goal <= 0.0 {
                return Err(NutriError::InvalidGoal { goal });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaterReminder {
    pub enabled: bool,
    pub interval_minutes: u32,
}

impl Default for WaterReminder {
    fn default() -> Self {
        Self {
            enabled: false,
            interval_minutes: 60,
        }
    }
}

/// The persisted profile document.
///
/// Missing fields in a stored document fall back to their defaults, so older
/// documents keep loading as new settings are added.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProfile {
    pub name: String,
    pub biometrics: Biometrics,
    pub goals: MacroGoals,
    pub allergies: Vec<String>,
    pub preferences: Vec<String>,
    pub water_reminder: WaterReminder,
    pub theme: Theme,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            name: "Alex".to_string(),
            biometrics: Biometrics::default(),
            goals: MacroGoals::default(),
            allergies: Vec::new(),
            preferences: Vec::new(),
            water_reminder: WaterReminder::default(),
            theme: Theme::default(),
        }
    }
}

impl UserProfile {
    /// Validate every numeric setting in the profile.
    pub fn validate(&self) -> Result<()> {
        self.biometrics.validate()?;
        self.goals.validate()?;
        if self.water_reminder.interval_minutes == 0 {
            return Err(NutriError::Validation(
                "water reminder interval must be at least one minute".to_string(),
            ));
        }
        Ok(())
    }

    /// Overwrite all four goal fields at once.
    pub fn apply_goals(&mut self, goals: MacroGoals) {
        self.goals = goals;
    }

    pub fn add_allergy(&mut self, item: &str) -> bool {
        add_unique(&mut self.allergies, item)
    }

    pub fn remove_allergy(&mut self, item: &str) -> bool {
        remove_item(&mut self.allergies, item)
    }

    pub fn add_preference(&mut self, item: &str) -> bool {
        add_unique(&mut self.preferences, item)
    }

    pub fn remove_preference(&mut self, item: &str) -> bool {
        remove_item(&mut self.preferences, item)
    }
}

fn add_unique(list: &mut Vec<String>, item: &str) -> bool {
    let trimmed = item.trim();
    if trimmed.is_empty() || list.iter().any(|e| e.eq_ignore_ascii_case(trimmed)) {
        return false;
    }
    list.push(trimmed.to_string());
    true
}

fn remove_item(list: &mut Vec<String>, item: &str) -> bool {
    let trimmed = item.trim();
    let before = list.len();
    list.retain(|e| !e.eq_ignore_ascii_case(trimmed));
    list.len() != before
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activity_multipliers() {
        assert_eq!(ActivityLevel::Sedentary.multiplier(), 1.2);
        assert_eq!(ActivityLevel::LightlyActive.multiplier(), 1.375);
        assert_eq!(ActivityLevel::ModeratelyActive.multiplier(), 1.55);
        assert_eq!(ActivityLevel::VeryActive.multiplier(), 1.725);
    }

    #[test]
    fn test_goal_adjustments() {
        assert_eq!(HealthGoal::WeightLoss.calorie_adjustment(), -500.0);
        assert_eq!(HealthGoal::Maintain.calorie_adjustment(), 0.0);
        assert_eq!(HealthGoal::MuscleGain.calorie_adjustment(), 300.0);
    }

    #[test]
    fn test_parse_labels_in_several_spellings() {
        assert_eq!(
            "Lightly Active".parse::<ActivityLevel>().unwrap(),
            ActivityLevel::LightlyActive
        );
        assert_eq!(
            "very-active".parse::<ActivityLevel>().unwrap(),
            ActivityLevel::VeryActive
        );
        assert_eq!(
            "weight_loss".parse::<HealthGoal>().unwrap(),
            HealthGoal::WeightLoss
        );
        assert_eq!("OTHER".parse::<Gender>().unwrap(), Gender::Other);
        assert!("athletic".parse::<ActivityLevel>().is_err());
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for level in [
            ActivityLevel::Sedentary,
            ActivityLevel::LightlyActive,
            ActivityLevel::ModeratelyActive,
            ActivityLevel::VeryActive,
        ] {
            assert_eq!(level.to_string().parse::<ActivityLevel>().unwrap(), level);
        }
    }

    #[test]
    fn test_biometrics_validation() {
        let mut bio = Biometrics::default();
        assert!(bio.validate().is_ok());

        bio.weight_kg = 0.0;
        assert!(matches!(bio.validate(), Err(NutriError::InvalidProfile(_))));

        bio = Biometrics {
            height_cm: f64::NAN,
            ..Biometrics::default()
        };
        assert!(bio.validate().is_err());

        bio = Biometrics {
            age_years: 0,
            ..Biometrics::default()
        };
        assert!(bio.validate().is_err());
    }

    #[test]
    fn test_goals_must_be_positive() {
        let goals = MacroGoals {
            fat_g: 0.0,
            ..MacroGoals::default()
        };
        match goals.validate() {
            Err(NutriError::InvalidGoal { goal }) => assert_eq!(goal, 0.0),
            other => panic!("expected InvalidGoal, got {:?}", other),
        }
    }

    #[test]
    fn test_apply_goals_overwrites_all_fields() {
        let mut profile = UserProfile::default();
        let goals = MacroGoals {
            daily_calories: 2787.0,
            protein_g: 209.0,
            carbs_g: 279.0,
            fat_g: 93.0,
        };
        profile.apply_goals(goals);
        assert_eq!(profile.goals, goals);
    }

    #[test]
    fn test_allergy_list_dedupes_and_trims() {
        let mut profile = UserProfile::default();
        assert!(profile.add_allergy("  Peanuts "));
        assert!(!profile.add_allergy("peanuts"));
        assert!(!profile.add_allergy("   "));
        assert!(profile.add_allergy("Shellfish"));
        assert_eq!(profile.allergies, vec!["Peanuts", "Shellfish"]);

        assert!(profile.remove_allergy("PEANUTS"));
        assert!(!profile.remove_allergy("gluten"));
        assert_eq!(profile.allergies, vec!["Shellfish"]);
    }

    #[test]
    fn test_legacy_document_fills_defaults() {
        let doc = serde_json::json!({ "name": "Sam" });
        let profile: UserProfile = serde_json::from_value(doc).unwrap();
        assert_eq!(profile.name, "Sam");
        assert_eq!(profile.biometrics.gender, Gender::Male);
        assert_eq!(
            profile.biometrics.activity_level,
            ActivityLevel::ModeratelyActive
        );
        assert_eq!(profile.theme, Theme::Light);
    }

    #[test]
    fn test_zero_reminder_interval_rejected() {
        let mut profile = UserProfile::default();
        profile.water_reminder.interval_minutes = 0;
        assert!(matches!(profile.validate(), Err(NutriError::Validation(_))));
    }
}
