use nutrilens_core::storage::RecordFilter;
use nutrilens_core::{progress, DailyRecord, NutritionStore};

use crate::app::AppContext;
use crate::cli::{EntriesArgs, ExportArgs, HistoryArgs};
use crate::helpers::parse_date_key;
use crate::output::{
    day_totals_json, entry_rows, print_json, record_json, ENTRY_COLUMNS, HISTORY_COLUMNS,
};
use crate::ui::format::{format_amount, format_kcal, format_percent};
use crate::ui::{blank_line, header, hint, kv, print, simple_table, table};

pub fn handle_entries(ctx: &AppContext, args: &EntriesArgs) -> anyhow::Result<()> {
    let session = ctx.open_session()?;
    let today = session.record().date;
    let date = match args.date.as_deref() {
        Some(value) => parse_date_key(value)?,
        None => today,
    };
    let record = if date == today {
        session.record().clone()
    } else {
        session
            .store()
            .load_record(date)?
            .unwrap_or_else(|| DailyRecord::new(date))
    };

    let ui = ctx.ui_context(args.json, args.format.as_deref());
    if ui.mode.is_json() {
        return print_json(&record_json(&record));
    }

    if record.entries.is_empty() {
        if !ctx.quiet() {
            print(&ui, &format!("No food logged for {}.", date));
            if date == today {
                print(&ui, &hint(&ui, "nutrilens log \"Apple\" --calories 95"));
            }
        }
        return Ok(());
    }

    let date_label = date.to_string();
    if !ctx.quiet() {
        print(&ui, &header(&ui, "entries", Some(&date_label)));
        blank_line(&ui);
    }
    let tz = ctx.timezone()?;
    let rows = entry_rows(record.recent_first(), tz, ui.mode.is_pretty());
    print(&ui, &simple_table(&ui, &ENTRY_COLUMNS, &rows));
    if ui.mode.is_pretty() && !ctx.quiet() {
        blank_line(&ui);
        print(&ui, &kv(&ui, "Total", &format_kcal(record.calories)));
    }
    Ok(())
}

pub fn handle_history(ctx: &AppContext, args: &HistoryArgs) -> anyhow::Result<()> {
    if args.last == 0 {
        return Err(anyhow::anyhow!("--last must be at least 1"));
    }
    let session = ctx.open_session()?;
    let goals = session.profile().goals;
    let records = session
        .store()
        .list_records(&RecordFilter::new().limit(args.last))?;

    let ui = ctx.ui_context(args.json, args.format.as_deref());
    if ui.mode.is_json() {
        let days: Vec<_> = records
            .iter()
            .map(|record| day_totals_json(record, &goals))
            .collect();
        return print_json(&days);
    }

    if !ctx.quiet() {
        let context = format!("last {} days", args.last);
        print(&ui, &header(&ui, "history", Some(&context)));
        blank_line(&ui);
    }
    let mut rows = Vec::with_capacity(records.len());
    for record in &records {
        let percent = progress(record.calories, goals.daily_calories)?;
        rows.push(vec![
            record.date.to_string(),
            format_amount(record.calories),
            format_percent(percent),
            record.entries.len().to_string(),
            record.water.to_string(),
        ]);
    }
    print(&ui, &table(&ui, &HISTORY_COLUMNS, &rows));
    Ok(())
}

/// Portable export of the profile and every stored day, oldest first.
pub fn handle_export(ctx: &AppContext, args: &ExportArgs) -> anyhow::Result<()> {
    let store = ctx.open_store()?;
    let mut filter = RecordFilter::new();
    if let Some(since) = args.since.as_deref() {
        filter = filter.since(parse_date_key(since)?);
    }
    let mut records = store.list_records(&filter)?;
    records.reverse();
    let profile = store.load_profile()?.unwrap_or_default();

    match args.format.as_str() {
        "json" => print_json(&serde_json::json!({
            "profile": profile,
            "days": records.iter().map(record_json).collect::<Vec<_>>(),
        })),
        "jsonl" => {
            for record in &records {
                println!("{}", serde_json::to_string(&record_json(record))?);
            }
            Ok(())
        }
        other => Err(anyhow::anyhow!(
            "Unsupported export format: {} (use json or jsonl for portable exports)",
            other
        )),
    }
}
