use std::path::Path;

use nutrilens_core::fs::copy_atomic;
use nutrilens_core::NutritionStore;

use crate::app::{missing_store_message, AppContext};
use crate::cli::{BackupArgs, ResetArgs};
use crate::ui::{badge, header_with_context, print, receipt, Badge};

pub fn handle_check(ctx: &AppContext) -> anyhow::Result<()> {
    let store = ctx.open_store()?;
    let ui = ctx.ui_context(false, None);
    match store.check_integrity() {
        Ok(()) => {
            if !ctx.quiet() {
                let metadata = store.metadata()?;
                let path = store.path().display().to_string();
                if ui.mode.is_pretty() {
                    print(&ui, &header_with_context(&ui, "check", None, Some(&path)));
                }
                print(&ui, &badge(&ui, Badge::Ok, "Integrity check: OK"));
                println!("- foreign keys: OK");
                println!("- metadata keys: OK");
                println!("- cached day totals: OK");
                println!("- profile document: OK");
                println!("- format version: {}", metadata.format_version);
                println!("- last modified: {}", metadata.last_modified.to_rfc3339());
            }
            Ok(())
        }
        Err(err) => {
            eprintln!("Integrity check: FAILED");
            eprintln!("- error: {}", err);
            Err(anyhow::anyhow!(
                "Integrity check failed\nHint: Restore a copy made with `nutrilens backup`, or export your data first."
            ))
        }
    }
}

pub fn handle_backup(ctx: &AppContext, args: &BackupArgs) -> anyhow::Result<()> {
    let source = ctx.store_path()?;
    if !source.exists() {
        return Err(anyhow::anyhow!(missing_store_message(&source)));
    }
    let ui = ctx.ui_context(false, None);
    if ui.is_interactive() && !ctx.quiet() {
        let proceed = dialoguer::Confirm::new()
            .with_prompt(format!("Back up store to {}?", args.destination))
            .default(true)
            .interact()?;
        if !proceed {
            return Err(anyhow::anyhow!("Backup cancelled"));
        }
    }

    let destination = Path::new(&args.destination);
    let bytes = copy_atomic(&source, destination).map_err(|e| {
        anyhow::anyhow!(
            "Failed to back up store from {} to {}: {}\nHint: Ensure the backup destination is writable.",
            source.display(),
            destination.display(),
            e
        )
    })?;
    if bytes == 0 {
        return Err(anyhow::anyhow!("Backup failed: zero bytes written"));
    }
    tracing::info!(destination = %destination.display(), bytes, "backup written");

    if !ctx.quiet() {
        println!("Backed up store to {}", args.destination);
    }
    Ok(())
}

/// Delete the profile and every logged day. The next command starts from defaults.
pub fn handle_reset(ctx: &AppContext, args: &ResetArgs) -> anyhow::Result<()> {
    let mut store = ctx.open_store()?;
    let ui = ctx.ui_context(false, None);

    if !args.yes {
        if !ui.is_interactive() {
            return Err(anyhow::anyhow!(
                "Refusing to reset without confirmation\nHint: Pass --yes to delete all data non-interactively."
            ));
        }
        let proceed = dialoguer::Confirm::new()
            .with_prompt("Delete the profile and all logged days? This cannot be undone")
            .default(false)
            .interact()?;
        if !proceed {
            return Err(anyhow::anyhow!("Reset cancelled"));
        }
    }

    store.reset()?;
    if !ctx.quiet() {
        let path = store.path().display().to_string();
        print(&ui, &receipt(&ui, "All data deleted", &[("Store", path)]));
    }
    Ok(())
}
