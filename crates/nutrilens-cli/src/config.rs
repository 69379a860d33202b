use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct NutrilensConfig {
    pub store: StoreSection,
    #[serde(default)]
    pub ui: UiSection,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StoreSection {
    pub path: String,
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct UiSection {
    /// IANA timezone name used to decide when a new day starts
    pub timezone: Option<String>,
}

impl NutrilensConfig {
    pub fn new(store_path: &Path, timezone: Option<String>) -> Self {
        Self {
            store: StoreSection {
                path: store_path.to_string_lossy().to_string(),
            },
            ui: UiSection { timezone },
        }
    }
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_config_dir()?.join("config.toml"))
}

pub fn default_store_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_data_dir()?.join("nutrilens.db"))
}

pub fn read_config(path: &Path) -> anyhow::Result<NutrilensConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path.display(), e))?;
    toml::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("Failed to parse config {}: {}", path.display(), e))
}

pub fn write_config(path: &Path, config: &NutrilensConfig) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            anyhow::anyhow!(
                "Failed to create config directory {}: {}",
                parent.display(),
                e
            )
        })?;
    }
    let contents =
        toml::to_string_pretty(config).map_err(|e| anyhow::anyhow!("TOML error: {}", e))?;
    std::fs::write(path, contents)
        .map_err(|e| anyhow::anyhow!("Failed to write config {}: {}", path.display(), e))?;
    tracing::debug!(path = %path.display(), "wrote config");
    Ok(())
}

pub fn xdg_config_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_CONFIG_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("nutrilens"));
        }
    }
    Ok(home_dir()?.join(".config").join("nutrilens"))
}

pub fn xdg_data_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_DATA_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("nutrilens"));
        }
    }
    Ok(home_dir()?.join(".local").join("share").join("nutrilens"))
}

fn home_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .map_err(|_| anyhow::anyhow!("HOME is not set; cannot resolve default paths"))?;
    Ok(PathBuf::from(home))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_toml_round_trip_keeps_timezone() {
        let config = NutrilensConfig::new(Path::new("/tmp/n.db"), Some("Europe/Paris".into()));
        let text = toml::to_string_pretty(&config).expect("serialize");
        assert!(text.contains("[store]"));
        assert!(text.contains("timezone = \"Europe/Paris\""));

        let parsed: NutrilensConfig = toml::from_str(&text).expect("parse");
        assert_eq!(parsed.store.path, "/tmp/n.db");
        assert_eq!(parsed.ui.timezone.as_deref(), Some("Europe/Paris"));
    }

    #[test]
    fn test_missing_ui_section_defaults() {
        let parsed: NutrilensConfig =
            toml::from_str("[store]\npath = \"/data/n.db\"\n").expect("parse");
        assert!(parsed.ui.timezone.is_none());
    }
}
