//! Application configuration.
//!
//! [`AppConfig`] holds the tool's own settings, not the per-project
//! `viper.yml` document (that one is read by the adapters and resolved by
//! the core).  It is loaded once at startup and passed down by value.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. `VIPERGEN_*` environment variables, `__` separating nested keys
//!    (`VIPERGEN_OUTPUT__NO_COLOR=true`)
//! 3. `config.toml` in the platform config directory, if present
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use vipergen_adapters::DEFAULT_CONFIG_FILE;

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Project configuration document used when `--config` is not given.
    pub config_file: PathBuf,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config_file: PathBuf::from(DEFAULT_CONFIG_FILE),
            output: OutputConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default settings file and environment.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration layered over `settings_file`, which may be absent.
    pub fn load_from(settings_file: &Path) -> anyhow::Result<Self> {
        let defaults = Config::try_from(&Self::default())
            .context("Failed to serialise built-in defaults")?;

        let settings = Config::builder()
            .add_source(defaults)
            .add_source(File::from(settings_file).required(false))
            .add_source(
                Environment::with_prefix("VIPERGEN")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .with_context(|| format!("Failed to read settings from {}", settings_file.display()))?;

        settings
            .try_deserialize()
            .context("Invalid vipergen settings")
    }

    /// Path to the tool settings file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.vipergen.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "vipergen", "vipergen")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".vipergen.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn default_config_file_is_viper_yml() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.config_file, PathBuf::from("viper.yml"));
    }

    #[test]
    fn default_no_color_is_false() {
        assert!(!AppConfig::default().output.no_color);
    }

    #[test]
    fn missing_settings_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = AppConfig::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(cfg.output, OutputConfig::default());
    }

    #[test]
    fn settings_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "config_file = \"ci/viper.yml\"\n\n[output]\nno_color = true\n").unwrap();

        let cfg = AppConfig::load_from(&path).unwrap();
        assert_eq!(cfg.config_file, PathBuf::from("ci/viper.yml"));
        assert!(cfg.output.no_color);
    }

    #[test]
    fn config_path_is_not_empty() {
        let p = AppConfig::config_path();
        assert!(!p.as_os_str().is_empty());
    }
}
