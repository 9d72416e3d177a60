//! YAML project configuration (`viper.yml`).

use std::fs;
use std::path::Path;

use tracing::{info, instrument, warn};

use vipergen_core::{
    application::ApplicationError,
    domain::PersistedConfig,
    error::ViperResult,
};

use crate::filesystem::map_io_error;

/// Default name of the project configuration document.
pub const DEFAULT_CONFIG_FILE: &str = "viper.yml";

/// Reads and writes the YAML configuration document.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlConfigStore;

impl YamlConfigStore {
    pub fn new() -> Self {
        Self
    }

    /// Load the document at `path`. Unknown keys are ignored.
    ///
    /// # Errors
    ///
    /// `ConfigMissing` if the file cannot be read or is not valid YAML.
    #[instrument(skip(self), fields(path = %path.display()))]
    pub fn load(&self, path: &Path) -> ViperResult<PersistedConfig> {
        let contents = fs::read_to_string(path).map_err(|e| ApplicationError::ConfigMissing {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        if contents.trim().is_empty() {
            warn!("configuration file is empty, using defaults");
            return Ok(PersistedConfig::default());
        }

        let config: PersistedConfig =
            serde_yaml_ng::from_str(&contents).map_err(|e| ApplicationError::ConfigMissing {
                path: path.to_path_buf(),
                reason: format!("invalid YAML: {e}"),
            })?;

        info!("Loaded configuration");
        Ok(config)
    }

    /// Write the default document for `project_name` to `path`.
    ///
    /// Returns `false` (and leaves the file alone) when `path` already exists
    /// and `force` is not set.
    #[instrument(skip(self), fields(path = %path.display()))]
    pub fn write_default(&self, path: &Path, project_name: &str, force: bool) -> ViperResult<bool> {
        if path.exists() && !force {
            warn!("configuration file already exists, keeping it");
            return Ok(false);
        }

        let document = PersistedConfig::default_document(project_name);
        let yaml = serde_yaml_ng::to_string(&document).map_err(|e| {
            ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: format!("Failed to serialize configuration: {e}"),
            }
        })?;
        fs::write(path, yaml).map_err(|e| map_io_error(path, e, "write configuration"))?;

        info!("Wrote default configuration");
        Ok(true)
    }
}
