use nutrilens_core::DayState;

use crate::app::AppContext;
use crate::cli::StatusArgs;
use crate::output::{print_json, print_summary};
use crate::ui::{badge, blank_line, header, hint, print, Badge};

pub fn handle_status(ctx: &AppContext, args: &StatusArgs) -> anyhow::Result<()> {
    let session = ctx.open_session()?;
    let summary = session.summary()?;

    let ui = ctx.ui_context(args.json, args.format.as_deref());
    if ui.mode.is_json() {
        return print_json(&summary);
    }
    if ctx.quiet() {
        return Ok(());
    }

    let date = summary.date.to_string();
    print(&ui, &header(&ui, "status", Some(&date)));
    if ui.mode.is_pretty() && session.day_state() == DayState::Reset {
        print(&ui, &badge(&ui, Badge::Info, "New day started"));
    }
    blank_line(&ui);
    print_summary(&ui, &summary);

    if summary.entry_count == 0 && ui.mode.is_pretty() {
        blank_line(&ui);
        print(&ui, &hint(&ui, "nutrilens log \"Oatmeal\" --calories 300 --protein 10"));
    }
    Ok(())
}
