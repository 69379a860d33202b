//! NutriLens CLI - a personal calorie, macro and water tracker
//!
//! This is the command-line host for the NutriLens core library. It owns
//! configuration, decides what "today" is, and renders the core's numbers.

mod app;
mod cli;
mod commands;
mod config;
mod helpers;
mod logging;
mod output;
mod ui;

use clap::Parser;
use nutrilens_core::VERSION;

use crate::app::AppContext;
use crate::cli::{Cli, Commands};
use crate::commands::{entries, food, init, maintenance, misc, profile, status, target, water};
use crate::ui::print_error;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    let ctx = AppContext::new(&cli);

    if let Err(e) = run(&ctx, &cli) {
        let ui_ctx = ctx.ui_context(false, None);
        let error_msg = format!("{}", e);
        let (message, hint) = split_error_hint(&error_msg);
        print_error(&ui_ctx, message, hint.as_deref());
        std::process::exit(1);
    }
}

/// Split an explicit "\nHint:" suffix off the message, or supply a hint for
/// common failures.
fn split_error_hint(error: &str) -> (&str, Option<String>) {
    if let Some(idx) = error.find("\nHint:") {
        let hint = error[idx + 1..].trim_start_matches("Hint:").trim();
        return (error[..idx].trim_end(), Some(hint.to_string()));
    }

    let error_lower = error.to_lowercase();

    if error_lower.contains("invalid goal") {
        return (
            error,
            Some("Goals must be positive; check `nutrilens profile show`.".to_string()),
        );
    }
    if error_lower.contains("invalid profile") {
        return (
            error,
            Some("Weight, height and age must all be greater than zero.".to_string()),
        );
    }
    if error_lower.contains("not a nutrilens store") || error_lower.contains("format version") {
        return (
            error,
            Some("Point --db at a store created by `nutrilens init`.".to_string()),
        );
    }

    (error, None)
}

fn run(ctx: &AppContext, cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Some(Commands::Init(args)) => init::handle_init(ctx, args)?,
        Some(Commands::Profile(args)) => profile::handle_profile(ctx, args)?,
        Some(Commands::Target(args)) => target::handle_target(ctx, args)?,
        Some(Commands::Log(args)) => food::handle_log(ctx, args)?,
        Some(Commands::Water(args)) => water::handle_water(ctx, args)?,
        Some(Commands::Status(args)) => status::handle_status(ctx, args)?,
        Some(Commands::Entries(args)) => entries::handle_entries(ctx, args)?,
        Some(Commands::History(args)) => entries::handle_history(ctx, args)?,
        Some(Commands::Export(args)) => entries::handle_export(ctx, args)?,
        Some(Commands::Check) => maintenance::handle_check(ctx)?,
        Some(Commands::Backup(args)) => maintenance::handle_backup(ctx, args)?,
        Some(Commands::Reset(args)) => maintenance::handle_reset(ctx, args)?,
        Some(Commands::Completions(args)) => misc::handle_completions(args)?,
        None => {
            println!("NutriLens v{}", VERSION);
            println!("\nQuickstart:");
            println!("  nutrilens init");
            println!("  nutrilens profile set --weight 70 --height 175 --age 30");
            println!("  nutrilens target --apply");
            println!("  nutrilens log \"Oatmeal\" --calories 300 --protein 10 --carbs 54 --fat 5");
            println!("  nutrilens status");
            println!("\nRun `nutrilens --help` for full usage.");
        }
    }

    Ok(())
}
