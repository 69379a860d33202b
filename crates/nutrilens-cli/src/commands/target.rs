use nutrilens_core::{checked_daily_calorie_target, explain_target};

use crate::app::AppContext;
use crate::cli::TargetArgs;
use crate::output::{print_json, print_target, target_json};
use crate::ui::format::{format_grams, format_kcal};
use crate::ui::{badge, blank_line, header, hint, print, receipt, Badge};

/// Show the suggested calorie budget; `--apply` writes all four goals at once.
pub fn handle_target(ctx: &AppContext, args: &TargetArgs) -> anyhow::Result<()> {
    let mut session = ctx.open_session()?;
    let biometrics = session.profile().biometrics;
    let target = checked_daily_calorie_target(&biometrics)?;
    let breakdown = explain_target(&biometrics);
    let previous = session.profile().goals;

    if args.apply {
        session.apply_suggested_goals().map_err(|e| {
            anyhow::anyhow!(
                "Cannot apply the suggested budget: {}\nHint: Check weight, height, age and goal with `nutrilens profile show`.",
                e
            )
        })?;
        tracing::info!(daily_calories = target, "applied suggested goals");
    }

    let ui = ctx.ui_context(args.json, None);
    if ui.mode.is_json() {
        return print_json(&target_json(&breakdown, args.apply));
    }
    if ctx.quiet() {
        return Ok(());
    }

    let context = format!("{}, {}", biometrics.activity_level, biometrics.goal);
    print(&ui, &header(&ui, "target", Some(&context)));
    blank_line(&ui);
    print_target(&ui, &breakdown, &previous);
    blank_line(&ui);

    if args.apply {
        let goals = session.profile().goals;
        let items = [
            ("Daily Calories", format_kcal(goals.daily_calories)),
            ("Protein", format_grams(goals.protein_g)),
            ("Carbs", format_grams(goals.carbs_g)),
            ("Fat", format_grams(goals.fat_g)),
        ];
        print(&ui, &receipt(&ui, "Goals updated", &items));
    } else if target <= 0 {
        print(
            &ui,
            &badge(
                &ui,
                Badge::Warn,
                "The suggested budget is not positive and cannot be applied",
            ),
        );
    } else {
        print(&ui, &hint(&ui, "nutrilens target --apply"));
    }
    Ok(())
}
