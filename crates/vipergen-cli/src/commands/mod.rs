//! Command handlers, one module per subcommand.
//!
//! Handlers wire the adapters into the core services, run them and hand the
//! report to the [`OutputManager`](crate::output::OutputManager).  The
//! helpers below are shared by `init` and `add`.

pub mod add;
pub mod completions;
pub mod init;

use std::path::{Path, PathBuf};

use tracing::debug;
use vipergen_adapters::{PBXPROJ_FILE, YamlConfigStore};
use vipergen_core::domain::project_name;
use vipergen_core::prelude::{ConfigDefaults, EffectiveConfig, ViperError, resolve};

use crate::error::{CliError, CliResult, IntoCli};

/// The `.xcodeproj` bundle for `project`, made absolute.
///
/// A path to the `project.pbxproj` inside the bundle is accepted as well.
fn project_bundle(project: &Path) -> CliResult<PathBuf> {
    let project = if project.is_absolute() {
        project.to_path_buf()
    } else {
        std::env::current_dir()
            .with_cli_context(|| "Failed to read the working directory")?
            .join(project)
    };

    if project.file_name().is_some_and(|name| name == PBXPROJ_FILE) {
        if let Some(bundle) = project.parent() {
            return Ok(bundle.to_path_buf());
        }
    }
    Ok(project)
}

/// `App` for `/work/App.xcodeproj`.
fn bundle_name(project: &Path) -> CliResult<String> {
    project_name(project).ok_or_else(|| CliError::InvalidProject {
        path: project.to_path_buf(),
    })
}

/// Read the YAML document at `path` and resolve it for `project_name`.
fn load_effective_config(
    path: &Path,
    project_name: &str,
    targets_override: &[String],
) -> CliResult<EffectiveConfig> {
    debug!(config = %path.display(), "Loading project configuration");
    let persisted = YamlConfigStore::new().load(path)?;
    let config = resolve(
        &ConfigDefaults::for_project(project_name),
        &persisted,
        targets_override,
    )
    .map_err(ViperError::from)?;
    debug!(?config, "Resolved configuration");
    Ok(config)
}
