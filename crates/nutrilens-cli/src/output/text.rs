use chrono_tz::Tz;
use nutrilens_core::{DailySummary, FoodEntry, MacroGoals, TargetBreakdown, UserProfile};

use crate::ui::format::{
    format_amount, format_grams, format_kcal, format_time, short_id, single_line, truncate,
};
use crate::ui::theme::{styled, styles, GLASS};
use crate::ui::{
    badge, blank_line, divider, kv, print, progress_line, Badge, Column, Nutrient, UiContext,
};

pub const ENTRY_COLUMNS: [Column; 7] = [
    Column::new("ID"),
    Column::new("Time"),
    Column::new("Food"),
    Column::new("kcal"),
    Column::new("Protein"),
    Column::new("Carbs"),
    Column::new("Fat"),
];

pub const HISTORY_COLUMNS: [Column; 5] = [
    Column::new("Date"),
    Column::new("kcal"),
    Column::new("Goal %"),
    Column::new("Entries"),
    Column::new("Water"),
];

pub fn entry_rows<'a>(
    entries: impl Iterator<Item = &'a FoodEntry>,
    tz: Tz,
    pretty: bool,
) -> Vec<Vec<String>> {
    entries
        .map(|entry| {
            let name = single_line(&entry.name);
            vec![
                short_id(&entry.id),
                format_time(&entry.timestamp, tz, pretty),
                if pretty { truncate(&name, 32) } else { name.replace(' ', "_") },
                format_amount(entry.calories),
                format_amount(entry.protein),
                format_amount(entry.carbs),
                format_amount(entry.fat),
            ]
        })
        .collect()
}

pub fn print_profile(ui: &UiContext, profile: &UserProfile) {
    let bio = &profile.biometrics;
    print(ui, &kv(ui, "Name", &profile.name));
    print(ui, &kv(ui, "Gender", &bio.gender.to_string()));
    print(ui, &kv(ui, "Weight", &format!("{} kg", format_amount(bio.weight_kg))));
    print(ui, &kv(ui, "Height", &format!("{} cm", format_amount(bio.height_cm))));
    print(ui, &kv(ui, "Age", &bio.age_years.to_string()));
    print(ui, &kv(ui, "Activity", &bio.activity_level.to_string()));
    print(ui, &kv(ui, "Goal", &bio.goal.to_string()));
    blank_line(ui);
    print_goals(ui, &profile.goals);
    blank_line(ui);
    print(ui, &kv(ui, "Allergies", &list_or_none(&profile.allergies)));
    print(ui, &kv(ui, "Preferences", &list_or_none(&profile.preferences)));
    let reminder = if profile.water_reminder.enabled {
        format!("every {} min", profile.water_reminder.interval_minutes)
    } else {
        "off".to_string()
    };
    print(ui, &kv(ui, "Water Reminder", &reminder));
    print(ui, &kv(ui, "Theme", &profile.theme.to_string()));
}

fn print_goals(ui: &UiContext, goals: &MacroGoals) {
    print(ui, &kv(ui, "Daily Calories", &format_kcal(goals.daily_calories)));
    print(ui, &kv(ui, "Protein Goal", &format_grams(goals.protein_g)));
    print(ui, &kv(ui, "Carbs Goal", &format_grams(goals.carbs_g)));
    print(ui, &kv(ui, "Fat Goal", &format_grams(goals.fat_g)));
}

fn list_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "none".to_string()
    } else {
        items.join(", ")
    }
}

/// The daily dashboard.
pub fn print_summary(ui: &UiContext, summary: &DailySummary) {
    let totals = &summary.totals;
    let goals = &summary.goals;

    if ui.mode.is_pretty() {
        let consumed = styled(&format_amount(totals.calories), styles::bold(), ui.color);
        print(
            ui,
            &format!(
                "{} of {} kcal eaten",
                consumed,
                format_amount(goals.daily_calories)
            ),
        );
        if summary.calories_over > 0.0 {
            print(
                ui,
                &badge(
                    ui,
                    Badge::Warn,
                    &format!("{} over budget", format_kcal(summary.calories_over)),
                ),
            );
        } else {
            print(ui, &kv(ui, "Remaining", &format_kcal(summary.calories_remaining)));
        }
        blank_line(ui);
    } else {
        print(ui, &kv(ui, "date", &summary.date.to_string()));
        print(ui, &kv(ui, "calories_remaining", &format_amount(summary.calories_remaining)));
        print(ui, &kv(ui, "calories_over", &format_amount(summary.calories_over)));
    }

    let rows = [
        (Nutrient::Calories, totals.calories, goals.daily_calories, summary.calorie_progress),
        (Nutrient::Protein, totals.protein, goals.protein_g, summary.protein_progress),
        (Nutrient::Carbs, totals.carbs, goals.carbs_g, summary.carbs_progress),
        (Nutrient::Fat, totals.fat, goals.fat_g, summary.fat_progress),
    ];
    for (nutrient, value, goal, percent) in rows {
        print(ui, &progress_line(ui, nutrient, value, goal, percent));
    }

    if ui.mode.is_pretty() {
        blank_line(ui);
        let glasses = GLASS.get(ui.unicode).repeat(summary.water.min(12) as usize);
        let glasses = styled(&glasses, Nutrient::Water.style(), ui.color);
        let water = format!("{} {}", summary.water, glasses);
        print(ui, &kv(ui, "Water", water.trim_end()));
        print(ui, &kv(ui, "Entries", &summary.entry_count.to_string()));
    } else {
        print(ui, &kv(ui, "water", &summary.water.to_string()));
        print(ui, &kv(ui, "entries", &summary.entry_count.to_string()));
    }
}

pub fn print_target(ui: &UiContext, breakdown: &TargetBreakdown, current: &MacroGoals) {
    print(ui, &kv(ui, "BMR", &format_kcal(breakdown.bmr)));
    print(ui, &kv(ui, "Activity Multiplier", &format!("{}", breakdown.multiplier)));
    print(ui, &kv(ui, "Maintenance", &format_kcal(breakdown.maintenance)));
    print(ui, &kv(ui, "Adjustment", &format!("{:+} kcal", breakdown.adjustment)));
    if ui.mode.is_pretty() {
        print(ui, &divider(ui));
    }
    print(ui, &kv(ui, "Suggested Calories", &format!("{} kcal", breakdown.target)));
    print(ui, &kv(ui, "Suggested Protein", &format!("{} g", breakdown.macros.protein_g)));
    print(ui, &kv(ui, "Suggested Carbs", &format!("{} g", breakdown.macros.carbs_g)));
    print(ui, &kv(ui, "Suggested Fat", &format!("{} g", breakdown.macros.fat_g)));
    if ui.mode.is_pretty() {
        blank_line(ui);
        print(ui, &styled("Current goals", styles::dim(), ui.color));
        print_goals(ui, current);
    }
}
