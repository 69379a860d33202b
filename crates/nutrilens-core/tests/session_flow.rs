use nutrilens_core::storage::{RecordFilter, SqliteStore};
use nutrilens_core::{
    ActivityLevel, DateKey, DayState, Gender, HealthGoal, NewFoodEntry, NutriError,
    NutritionStore, Session,
};
use tempfile::{tempdir, TempDir};

fn key(s: &str) -> DateKey {
    s.parse().expect("valid date key")
}

fn new_store() -> (TempDir, std::path::PathBuf) {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("nutrilens.db");
    SqliteStore::create(&path).expect("create should succeed");
    (dir, path)
}

fn open_session(path: &std::path::Path, today: &str) -> Session<SqliteStore> {
    let store = SqliteStore::open(path).expect("open should succeed");
    Session::open(store, key(today)).expect("session should open")
}

#[test]
fn test_first_open_saves_default_profile_and_empty_day() {
    let (_dir, path) = new_store();
    let session = open_session(&path, "2026-04-01");

    assert_eq!(session.day_state(), DayState::Reset);
    assert_eq!(session.profile().name, "Alex");
    assert!(session.record().entries.is_empty());

    let store = session.into_store();
    assert!(store.load_profile().unwrap().is_some());
    assert!(store.load_record(key("2026-04-01")).unwrap().is_some());
}

#[test]
fn test_same_day_reopen_keeps_log() {
    let (_dir, path) = new_store();
    {
        let mut session = open_session(&path, "2026-04-01");
        session
            .log_food(NewFoodEntry::new("Porridge", 350.0).with_macros(12.0, 60.0, 7.0))
            .unwrap();
        session.add_water().unwrap();
        session.add_water().unwrap();
    }

    let session = open_session(&path, "2026-04-01");
    assert_eq!(session.day_state(), DayState::Active);
    assert_eq!(session.record().calories, 350.0);
    assert_eq!(session.record().water, 2);
    assert_eq!(session.record().entries[0].name, "Porridge");
}

#[test]
fn test_new_day_resets_and_keeps_history() {
    let (_dir, path) = new_store();
    {
        let mut session = open_session(&path, "2026-04-01");
        session.log_food(NewFoodEntry::new("Pizza", 900.0)).unwrap();
    }

    let session = open_session(&path, "2026-04-02");
    assert_eq!(session.day_state(), DayState::Reset);
    assert_eq!(session.record().date, key("2026-04-02"));
    assert_eq!(session.record().calories, 0.0);

    let history = session.store().list_records(&RecordFilter::new()).unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[1].calories, 900.0);
}

#[test]
fn test_recheck_day_rolls_over_mid_session() {
    let (_dir, path) = new_store();
    let mut session = open_session(&path, "2026-04-01");
    session.log_food(NewFoodEntry::new("Soup", 200.0)).unwrap();

    assert_eq!(session.recheck_day(key("2026-04-01")).unwrap(), DayState::Active);
    assert_eq!(session.record().calories, 200.0);

    assert_eq!(session.recheck_day(key("2026-04-02")).unwrap(), DayState::Reset);
    assert!(session.record().entries.is_empty());
}

#[test]
fn test_remove_water_saturates_at_zero() {
    let (_dir, path) = new_store();
    let mut session = open_session(&path, "2026-04-01");
    assert_eq!(session.remove_water().unwrap(), 0);
    assert_eq!(session.add_water().unwrap(), 1);
    assert_eq!(session.remove_water().unwrap(), 0);
}

#[test]
fn test_apply_suggested_goals_overwrites_all_goals() {
    let (_dir, path) = new_store();
    let mut session = open_session(&path, "2026-04-01");

    let goals = session.apply_suggested_goals().unwrap();
    assert_eq!(goals.daily_calories, 2787.0);
    assert_eq!(session.profile().goals, goals);

    drop(session);
    let reopened = open_session(&path, "2026-04-01");
    assert_eq!(reopened.profile().goals.protein_g, 209.0);
    assert_eq!(reopened.profile().goals.carbs_g, 279.0);
    assert_eq!(reopened.profile().goals.fat_g, 93.0);
}

#[test]
fn test_non_positive_suggestion_leaves_goals_unchanged() {
    let (_dir, path) = new_store();
    let mut session = open_session(&path, "2026-04-01");
    session
        .update_profile(|p| {
            p.biometrics.gender = Gender::Female;
            p.biometrics.weight_kg = 1.0;
            p.biometrics.height_cm = 1.0;
            p.biometrics.age_years = 120;
            p.biometrics.activity_level = ActivityLevel::Sedentary;
            p.biometrics.goal = HealthGoal::WeightLoss;
        })
        .unwrap();
    let before = session.profile().goals;

    let result = session.apply_suggested_goals();
    assert!(matches!(result, Err(NutriError::InvalidGoal { .. })));
    assert_eq!(session.profile().goals, before);
}

#[test]
fn test_invalid_profile_edit_is_rejected() {
    let (_dir, path) = new_store();
    let mut session = open_session(&path, "2026-04-01");
    let result = session.update_profile(|p| p.biometrics.weight_kg = 0.0);
    assert!(matches!(result, Err(NutriError::InvalidProfile(_))));
    assert_eq!(session.profile().biometrics.weight_kg, 75.0);

    drop(session);
    let reopened = open_session(&path, "2026-04-01");
    assert_eq!(reopened.profile().biometrics.weight_kg, 75.0);
}

#[test]
fn test_invalid_food_entry_is_not_logged() {
    let (_dir, path) = new_store();
    let mut session = open_session(&path, "2026-04-01");
    assert!(session.log_food(NewFoodEntry::new("  ", 100.0)).is_err());
    assert!(session.record().entries.is_empty());
}

#[test]
fn test_summary_reflects_logged_food() {
    let (_dir, path) = new_store();
    let mut session = open_session(&path, "2026-04-01");
    session
        .log_food(NewFoodEntry::new("Steak", 2600.0).with_macros(160.0, 0.0, 90.0))
        .unwrap();

    let summary = session.summary().unwrap();
    assert_eq!(summary.calorie_progress, 100.0);
    assert_eq!(summary.calories_remaining, 0.0);
    assert_eq!(summary.calories_over, 400.0);
    assert_eq!(summary.protein_progress, 100.0);
    assert_eq!(summary.carbs_progress, 0.0);
}
