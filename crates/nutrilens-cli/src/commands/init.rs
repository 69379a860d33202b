use std::path::PathBuf;

use nutrilens_core::storage::SqliteStore;
use nutrilens_core::{NutritionStore, Session};

use crate::app::{resolve_config_path, AppContext};
use crate::cli::InitArgs;
use crate::config::{default_store_path, write_config, NutrilensConfig};
use crate::helpers::parse_timezone;
use crate::ui::format::format_kcal;
use crate::ui::{blank_line, hint, print, receipt};

pub fn handle_init(ctx: &AppContext, args: &InitArgs) -> anyhow::Result<()> {
    let store_path = match args.path.as_deref().or(ctx.cli().db.as_deref()) {
        Some(path) if !path.trim().is_empty() => PathBuf::from(path),
        _ => default_store_path()?,
    };
    if store_path.exists() {
        return Err(anyhow::anyhow!(
            "Store already exists at {}\nHint: Run `nutrilens reset` to start over, or pass a different path.",
            store_path.display()
        ));
    }

    let timezone = match args.timezone.as_deref() {
        Some(name) => {
            parse_timezone(name)?;
            Some(name.trim().to_string())
        }
        None => None,
    };

    let store = SqliteStore::create(&store_path).map_err(|e| {
        anyhow::anyhow!("Failed to create store {}: {}", store_path.display(), e)
    })?;

    let config_path = resolve_config_path()?;
    write_config(&config_path, &NutrilensConfig::new(&store_path, timezone.clone()))?;

    // Saves the default profile and opens the first day.
    let session = Session::open(store, ctx.today()?)?;
    tracing::info!(store = %store_path.display(), "initialized store");

    if ctx.quiet() {
        return Ok(());
    }

    let ui = ctx.ui_context(false, None);
    let items = [
        ("Store", store_path.display().to_string()),
        ("Config", config_path.display().to_string()),
        ("Timezone", timezone.unwrap_or_else(|| "UTC".to_string())),
        (
            "Daily Calories",
            format_kcal(session.profile().goals.daily_calories),
        ),
    ];
    print(&ui, &receipt(&ui, "Created NutriLens store", &items));
    blank_line(&ui);
    print(
        &ui,
        &hint(
            &ui,
            "nutrilens profile set --weight 70 --height 175 --age 30 && nutrilens target --apply",
        ),
    );
    Ok(())
}
