use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use nutrilens_core::{DateKey, NewFoodEntry};

use crate::app::AppContext;
use crate::cli::LogArgs;
use crate::helpers::parse_datetime;
use crate::output::{entry_json, print_json};
use crate::ui::format::{format_amount, format_kcal, short_id};
use crate::ui::{print, receipt};

fn build_entry(args: &LogArgs, at: Option<DateTime<Utc>>) -> NewFoodEntry {
    let mut entry = NewFoodEntry::new(args.name.clone(), args.calories)
        .with_macros(args.protein, args.carbs, args.fat)
        .with_ingredients(args.ingredient.clone());
    if let Some(image) = &args.image {
        entry = entry.with_image(image.clone());
    }
    if let Some(at) = at {
        entry = entry.at(at);
    }
    entry
}

/// Only today's record is open for logging, so `at` must fall on `today` in `tz`.
fn ensure_logged_today(at: DateTime<Utc>, tz: Tz, today: DateKey) -> anyhow::Result<()> {
    let day = DateKey::from_instant(at, tz);
    if day != today {
        return Err(anyhow::anyhow!(
            "Entry time {} falls on {}, not today ({})\nHint: Omit --at to log it now, or pick a time within today.",
            at.to_rfc3339(),
            day,
            today
        ));
    }
    Ok(())
}

pub fn handle_log(ctx: &AppContext, args: &LogArgs) -> anyhow::Result<()> {
    let at = args.at.as_deref().map(parse_datetime).transpose()?;
    if let Some(at) = at {
        ensure_logged_today(at, ctx.timezone()?, ctx.today()?)?;
    }
    let entry = build_entry(args, at);
    entry.validate()?;

    let mut session = ctx.open_session()?;
    let logged = session.log_food(entry)?;
    let summary = session.summary()?;

    let ui = ctx.ui_context(args.json, None);
    if ui.mode.is_json() {
        return print_json(&serde_json::json!({
            "entry": entry_json(&logged),
            "date": summary.date,
            "calories_today": summary.totals.calories,
            "calories_remaining": summary.calories_remaining,
            "calories_over": summary.calories_over,
        }));
    }
    if ctx.quiet() {
        return Ok(());
    }

    let mut items = vec![
        ("ID", short_id(&logged.id)),
        ("Food", logged.name.clone()),
        ("Calories", format_kcal(logged.calories)),
        (
            "Macros",
            format!(
                "P {} / C {} / F {} g",
                format_amount(logged.protein),
                format_amount(logged.carbs),
                format_amount(logged.fat)
            ),
        ),
        ("Today", format_kcal(summary.totals.calories)),
    ];
    if summary.calories_over > 0.0 {
        items.push(("Over", format_kcal(summary.calories_over)));
    } else {
        items.push(("Remaining", format_kcal(summary.calories_remaining)));
    }
    print(&ui, &receipt(&ui, "Logged food", &items));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helpers::parse_date_key;

    fn args(name: &str, calories: f64) -> LogArgs {
        LogArgs {
            name: name.to_string(),
            calories,
            protein: 0.0,
            carbs: 0.0,
            fat: 0.0,
            ingredient: Vec::new(),
            image: None,
            at: None,
            json: false,
        }
    }

    #[test]
    fn test_build_entry_carries_all_fields() {
        let mut log = args("Burrito", 650.0);
        log.protein = 30.0;
        log.ingredient = vec!["rice".into(), "beans".into()];
        log.image = Some("photos/burrito.jpg".into());
        let at = parse_datetime("2024-03-10T12:15:00Z").expect("timestamp");

        let entry = build_entry(&log, Some(at)).into_entry().expect("entry");
        assert_eq!(entry.name, "Burrito");
        assert_eq!(entry.protein, 30.0);
        assert_eq!(entry.ingredients, vec!["rice", "beans"]);
        assert_eq!(entry.image.as_deref(), Some("photos/burrito.jpg"));
        assert_eq!(entry.timestamp.to_rfc3339(), "2024-03-10T12:15:00+00:00");
    }

    #[test]
    fn test_negative_calories_fail_validation() {
        let entry = build_entry(&args("Mystery", -10.0), None);
        assert!(entry.validate().is_err());
    }

    #[test]
    fn test_entry_time_must_fall_on_today() {
        let today = parse_date_key("2024-03-11").expect("date");
        let morning = parse_datetime("2024-03-11T07:45:00Z").expect("timestamp");
        assert!(ensure_logged_today(morning, Tz::UTC, today).is_ok());

        let last_night = parse_datetime("2024-03-10T19:00:00Z").expect("timestamp");
        let err = ensure_logged_today(last_night, Tz::UTC, today).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("falls on 2024-03-10, not today (2024-03-11)"));
        assert!(message.contains("\nHint:"));
    }

    #[test]
    fn test_entry_day_uses_local_calendar() {
        // 23:30 UTC on the 10th is already the 11th in Berlin.
        let today = parse_date_key("2024-03-11").expect("date");
        let late = parse_datetime("2024-03-10T23:30:00Z").expect("timestamp");
        assert!(ensure_logged_today(late, chrono_tz::Europe::Berlin, today).is_ok());
        assert!(ensure_logged_today(late, Tz::UTC, today).is_err());
    }
}
