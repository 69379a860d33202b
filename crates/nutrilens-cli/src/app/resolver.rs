//! Path resolution for config and store files.

use std::path::{Path, PathBuf};

use crate::cli::Cli;
use crate::config::{default_config_path, default_store_path, NutrilensConfig};

/// Resolve the config file path, checking NUTRILENS_CONFIG env var first.
pub fn resolve_config_path() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("NUTRILENS_CONFIG") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value));
        }
    }
    default_config_path()
}

/// Resolve the store path: `--db` / `NUTRILENS_DB`, then the config file,
/// then the XDG data default.
pub fn resolve_store_path(cli: &Cli, config: Option<&NutrilensConfig>) -> anyhow::Result<PathBuf> {
    if let Some(path) = cli.db.as_deref() {
        if !path.trim().is_empty() {
            return Ok(PathBuf::from(path));
        }
    }
    if let Some(config) = config {
        return Ok(PathBuf::from(&config.store.path));
    }
    default_store_path()
}

/// Error message when the store file is missing.
pub fn missing_store_message(path: &Path) -> String {
    format!(
        "No store found at {}\n\nRun:\n  nutrilens init\n\nOr specify a store path:\n  NUTRILENS_DB=/path/to/nutrilens.db nutrilens init",
        path.display()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_store_message_mentions_init() {
        let msg = missing_store_message(Path::new("/nowhere/n.db"));
        assert!(msg.contains("/nowhere/n.db"));
        assert!(msg.contains("nutrilens init"));
    }
}
