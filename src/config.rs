//! User configuration management

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub ui: UiConfig,

    #[serde(default)]
    pub theme: ThemeConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_title")]
    pub title: String,

    #[serde(default = "default_placeholder")]
    pub placeholder: String,

    /// Show the "Created" / "Completed" counters above the list.
    #[serde(default = "default_true")]
    pub show_counters: bool,

    #[serde(default = "default_status_timeout")]
    pub status_timeout_secs: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            placeholder: default_placeholder(),
            show_counters: true,
            status_timeout_secs: default_status_timeout(),
        }
    }
}

fn default_title() -> String {
    "ToDo".to_string()
}

fn default_placeholder() -> String {
    "Add a new task".to_string()
}

fn default_true() -> bool {
    true
}

fn default_status_timeout() -> u64 {
    3
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeConfig {
    #[serde(default = "default_theme_name")]
    pub name: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            name: default_theme_name(),
        }
    }
}

fn default_theme_name() -> String {
    "default".to_string()
}

pub fn get_app_dir() -> Result<PathBuf> {
    let base = dirs::config_dir().context("Could not determine config directory")?;
    Ok(base.join("taskpad"))
}

pub fn default_config_path() -> Result<PathBuf> {
    Ok(get_app_dir()?.join("config.toml"))
}

impl Config {
    /// Load from the default location, falling back to defaults when absent.
    pub fn load() -> Result<Self> {
        Self::load_from(&default_config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("no config at {}, using defaults", path.display());
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Invalid config in {}", path.display()))?;
        Ok(config)
    }
}

pub fn save_config(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_deserialize_empty_toml() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.ui.title, "ToDo");
        assert!(config.ui.show_counters);
        assert_eq!(config.ui.status_timeout_secs, 3);
        assert_eq!(config.theme.name, "default");
    }

    #[test]
    fn test_config_deserialize_partial_toml() {
        let toml = r#"
            [ui]
            show_counters = false
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert!(!config.ui.show_counters);
        // Other fields should have defaults
        assert_eq!(config.ui.placeholder, "Add a new task");
        assert_eq!(config.theme.name, "default");
    }

    #[test]
    fn test_theme_config_deserialize() {
        let theme: ThemeConfig = toml::from_str(r#"name = "mono""#).unwrap();
        assert_eq!(theme.name, "mono");
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let temp = TempDir::new().unwrap();
        let config = Config::load_from(&temp.path().join("nope.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_and_load() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.ui.title = "Errands".to_string();
        config.ui.status_timeout_secs = 10;
        save_config(&config, &path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_invalid_toml_errors() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "[ui\nshow_counters = ").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Invalid config"));
    }
}
