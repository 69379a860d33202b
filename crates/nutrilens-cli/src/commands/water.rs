use crate::app::AppContext;
use crate::cli::{WaterAction, WaterArgs};
use crate::output::print_json;
use crate::ui::{print, receipt};

pub fn handle_water(ctx: &AppContext, args: &WaterArgs) -> anyhow::Result<()> {
    let mut session = ctx.open_session()?;
    let glasses = match args.action {
        WaterAction::Add => session.add_water()?,
        WaterAction::Remove => session.remove_water()?,
    };
    let date = session.record().date;

    let ui = ctx.ui_context(args.json, None);
    if ui.mode.is_json() {
        return print_json(&serde_json::json!({ "date": date, "water": glasses }));
    }
    if ctx.quiet() {
        return Ok(());
    }
    let title = match args.action {
        WaterAction::Add => "Added a glass of water",
        WaterAction::Remove => "Removed a glass of water",
    };
    print(&ui, &receipt(&ui, title, &[("Water", glasses.to_string())]));
    Ok(())
}
