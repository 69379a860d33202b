use nutrilens_core::{ActivityLevel, Gender, HealthGoal, Theme, UserProfile};

use crate::app::AppContext;
use crate::cli::{ListAction, ListEditArgs, ProfileArgs, ProfileCommand, ProfileSetArgs};
use crate::helpers::parse_label;
use crate::output::{print_json, print_profile};
use crate::ui::{badge, blank_line, header, hint, print, receipt, Badge};

pub fn handle_profile(ctx: &AppContext, args: &ProfileArgs) -> anyhow::Result<()> {
    match &args.command {
        None => handle_show(ctx, false),
        Some(ProfileCommand::Show(show)) => handle_show(ctx, show.json),
        Some(ProfileCommand::Set(set)) => handle_set(ctx, set),
        Some(ProfileCommand::Allergy(edit)) => handle_list_edit(ctx, ListKind::Allergy, edit),
        Some(ProfileCommand::Preference(edit)) => {
            handle_list_edit(ctx, ListKind::Preference, edit)
        }
    }
}

fn handle_show(ctx: &AppContext, json: bool) -> anyhow::Result<()> {
    let session = ctx.open_session()?;
    let ui = ctx.ui_context(json, None);
    if ui.mode.is_json() {
        return print_json(session.profile());
    }
    if ctx.quiet() {
        return Ok(());
    }
    print(&ui, &header(&ui, "profile", None));
    blank_line(&ui);
    print_profile(&ui, session.profile());
    Ok(())
}

/// Parsed `profile set` input; labels are validated before anything is written.
struct ProfileEdit {
    gender: Option<Gender>,
    activity: Option<ActivityLevel>,
    goal: Option<HealthGoal>,
    theme: Option<Theme>,
}

impl ProfileEdit {
    fn parse(args: &ProfileSetArgs) -> anyhow::Result<Self> {
        Ok(Self {
            gender: args
                .gender
                .as_deref()
                .map(|v| parse_label("gender", v))
                .transpose()?,
            activity: args
                .activity
                .as_deref()
                .map(|v| parse_label("activity level", v))
                .transpose()?,
            goal: args
                .goal
                .as_deref()
                .map(|v| parse_label("goal", v))
                .transpose()?,
            theme: args
                .theme
                .as_deref()
                .map(|v| parse_label("theme", v))
                .transpose()?,
        })
    }
}

/// Apply every provided field; returns the labels of the fields touched.
fn apply_edit(
    profile: &mut UserProfile,
    args: &ProfileSetArgs,
    edit: &ProfileEdit,
) -> Vec<&'static str> {
    let mut changed = Vec::new();
    if let Some(name) = &args.name {
        profile.name = name.trim().to_string();
        changed.push("name");
    }
    let bio = &mut profile.biometrics;
    if let Some(gender) = edit.gender {
        bio.gender = gender;
        changed.push("gender");
    }
    if let Some(weight) = args.weight {
        bio.weight_kg = weight;
        changed.push("weight");
    }
    if let Some(height) = args.height {
        bio.height_cm = height;
        changed.push("height");
    }
    if let Some(age) = args.age {
        bio.age_years = age;
        changed.push("age");
    }
    if let Some(activity) = edit.activity {
        bio.activity_level = activity;
        changed.push("activity");
    }
    if let Some(goal) = edit.goal {
        bio.goal = goal;
        changed.push("goal");
    }

    let goals = &mut profile.goals;
    if let Some(calories) = args.calories {
        goals.daily_calories = calories;
        changed.push("calories");
    }
    if let Some(protein) = args.protein {
        goals.protein_g = protein;
        changed.push("protein");
    }
    if let Some(carbs) = args.carbs {
        goals.carbs_g = carbs;
        changed.push("carbs");
    }
    if let Some(fat) = args.fat {
        goals.fat_g = fat;
        changed.push("fat");
    }

    if let Some(reminder) = args.reminder {
        profile.water_reminder.enabled = reminder.is_on();
        changed.push("reminder");
    }
    if let Some(interval) = args.reminder_interval {
        profile.water_reminder.interval_minutes = interval;
        changed.push("reminder interval");
    }
    if let Some(theme) = edit.theme {
        profile.theme = theme;
        changed.push("theme");
    }
    changed
}

fn handle_set(ctx: &AppContext, args: &ProfileSetArgs) -> anyhow::Result<()> {
    let edit = ProfileEdit::parse(args)?;
    if let Some(name) = &args.name {
        if name.trim().is_empty() {
            return Err(anyhow::anyhow!("Name must not be empty"));
        }
    }
    if args.reminder_interval == Some(0) {
        return Err(anyhow::anyhow!("Reminder interval must be at least one minute"));
    }

    if apply_edit(&mut UserProfile::default(), args, &edit).is_empty() {
        return Err(anyhow::anyhow!(
            "Nothing to update\nHint: Pass at least one field, e.g. `nutrilens profile set --weight 70`."
        ));
    }

    let mut session = ctx.open_session()?;
    let mut changed = Vec::new();
    session.update_profile(|profile| changed = apply_edit(profile, args, &edit))?;
    tracing::debug!(fields = ?changed, "profile updated");

    if ctx.quiet() {
        return Ok(());
    }
    let ui = ctx.ui_context(false, None);
    print(&ui, &receipt(&ui, "Profile updated", &[("Fields", changed.join(", "))]));
    let biometrics_changed = changed.iter().any(|f| {
        matches!(
            *f,
            "gender" | "weight" | "height" | "age" | "activity" | "goal"
        )
    });
    if biometrics_changed {
        blank_line(&ui);
        print(
            &ui,
            &hint(&ui, "Run `nutrilens target` to see the suggested budget for these values."),
        );
    }
    Ok(())
}

#[derive(Clone, Copy)]
enum ListKind {
    Allergy,
    Preference,
}

impl ListKind {
    fn label(self) -> &'static str {
        match self {
            Self::Allergy => "allergy",
            Self::Preference => "preference",
        }
    }

    fn items(self, profile: &UserProfile) -> &[String] {
        match self {
            Self::Allergy => &profile.allergies,
            Self::Preference => &profile.preferences,
        }
    }
}

fn handle_list_edit(ctx: &AppContext, kind: ListKind, args: &ListEditArgs) -> anyhow::Result<()> {
    let mut session = ctx.open_session()?;
    let ui = ctx.ui_context(false, None);

    let (item, adding) = match &args.action {
        ListAction::List => {
            for item in kind.items(session.profile()) {
                println!("{}", item);
            }
            return Ok(());
        }
        ListAction::Add { item } => (item, true),
        ListAction::Remove { item } => (item, false),
    };
    if item.trim().is_empty() {
        return Err(anyhow::anyhow!("The {} must not be empty", kind.label()));
    }

    let mut changed = false;
    session.update_profile(|profile| {
        changed = match (kind, adding) {
            (ListKind::Allergy, true) => profile.add_allergy(item),
            (ListKind::Allergy, false) => profile.remove_allergy(item),
            (ListKind::Preference, true) => profile.add_preference(item),
            (ListKind::Preference, false) => profile.remove_preference(item),
        };
    })?;

    if ctx.quiet() {
        return Ok(());
    }
    let message = match (changed, adding) {
        (true, true) => format!("Added {} \"{}\"", kind.label(), item.trim()),
        (true, false) => format!("Removed {} \"{}\"", kind.label(), item.trim()),
        (false, true) => format!("\"{}\" is already listed", item.trim()),
        (false, false) => format!("\"{}\" is not listed", item.trim()),
    };
    let kind_badge = if changed { Badge::Ok } else { Badge::Info };
    print(&ui, &badge(&ui, kind_badge, &message));
    Ok(())
}
