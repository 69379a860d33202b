//! Application context for the NutriLens CLI.
//!
//! Bundles CLI arguments with the lazily-loaded config file and resolves the
//! store path, the timezone and the reference date from them.

use std::path::PathBuf;
use std::str::FromStr;

use chrono_tz::Tz;
use once_cell::unsync::OnceCell;

use nutrilens_core::storage::SqliteStore;
use nutrilens_core::{DateKey, NutritionStore, Session};

use crate::cli::Cli;
use crate::config::{read_config, NutrilensConfig};
use crate::helpers::parse_timezone;
use crate::ui::UiContext;

use super::resolver::{missing_store_message, resolve_config_path, resolve_store_path};

pub struct AppContext<'a> {
    cli: &'a Cli,
    config: OnceCell<Option<NutrilensConfig>>,
}

impl<'a> AppContext<'a> {
    pub fn new(cli: &'a Cli) -> Self {
        Self {
            cli,
            config: OnceCell::new(),
        }
    }

    pub fn cli(&self) -> &Cli {
        self.cli
    }

    pub fn quiet(&self) -> bool {
        self.cli.quiet
    }

    /// The config file, if one exists. Loaded once per invocation.
    pub fn config(&self) -> anyhow::Result<Option<&NutrilensConfig>> {
        let config = self.config.get_or_try_init(|| {
            let path = resolve_config_path()?;
            if !path.exists() {
                tracing::debug!(path = %path.display(), "no config file");
                return Ok::<_, anyhow::Error>(None);
            }
            read_config(&path).map(Some)
        })?;
        Ok(config.as_ref())
    }

    pub fn store_path(&self) -> anyhow::Result<PathBuf> {
        resolve_store_path(self.cli, self.config()?)
    }

    /// Timezone for day boundaries: `NUTRILENS_TIMEZONE`, then config, then UTC.
    pub fn timezone(&self) -> anyhow::Result<Tz> {
        if let Ok(value) = std::env::var("NUTRILENS_TIMEZONE") {
            if !value.trim().is_empty() {
                return parse_timezone(&value);
            }
        }
        match self.config()?.and_then(|c| c.ui.timezone.as_deref()) {
            Some(name) => parse_timezone(name),
            None => Ok(Tz::UTC),
        }
    }

    /// The date key that counts as "today" for this invocation.
    pub fn today(&self) -> anyhow::Result<DateKey> {
        if let Some(value) = self.cli.today.as_deref() {
            return DateKey::from_str(value)
                .map_err(|e| anyhow::anyhow!("Invalid --today value: {}", e));
        }
        Ok(DateKey::today_in(self.timezone()?))
    }

    pub fn open_store(&self) -> anyhow::Result<SqliteStore> {
        let path = self.store_path()?;
        if !path.exists() {
            return Err(anyhow::anyhow!(missing_store_message(&path)));
        }
        tracing::debug!(path = %path.display(), "opening store");
        SqliteStore::open(&path)
            .map_err(|e| anyhow::anyhow!("Failed to open store {}: {}", path.display(), e))
    }

    /// Open the store and run the day roll-over check against today.
    pub fn open_session(&self) -> anyhow::Result<Session<SqliteStore>> {
        let store = self.open_store()?;
        let today = self.today()?;
        Ok(Session::open(store, today)?)
    }

    pub fn ui_context(&self, json: bool, format: Option<&str>) -> UiContext {
        UiContext::from_env(json, format, self.cli.no_color, self.cli.ascii)
    }
}
