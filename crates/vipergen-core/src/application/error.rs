//! Application layer errors.
//!
//! These errors represent failures in orchestration and in the external
//! collaborators behind the ports. Validation errors are `DomainError`
//! from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during orchestration.
///
/// Every variant is fatal for the current run; none is retried.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApplicationError {
    /// The configuration document is absent or unreadable.
    #[error("Configuration file {path} could not be loaded: {reason}")]
    ConfigMissing { path: PathBuf, reason: String },

    /// No template with this id in the selected template set.
    #[error("Cannot find template '{id}'")]
    TemplateNotFound { id: String },

    /// Template exists but failed to render.
    #[error("Template '{id}' failed to render: {reason}")]
    RenderingFailed { id: String, reason: String },

    /// A part file's directory does not exist.
    #[error("Destination directory {path} does not exist")]
    DestinationMissing { path: PathBuf },

    /// The project manifest file is absent.
    #[error("Project manifest not found at {path}")]
    ManifestNotFound { path: PathBuf },

    /// The project manifest could not be parsed or is structurally broken.
    #[error("Project manifest {path} is corrupt: {reason}")]
    ManifestCorrupt { path: PathBuf, reason: String },

    /// A named build target does not exist in the manifest.
    #[error("Build target '{name}' not found in project")]
    TargetNotFound { name: String, available: Vec<String> },

    /// The file is already registered under another group.
    #[error("{path} is already registered under group '{existing_group}'")]
    RegistrationConflict {
        path: PathBuf,
        existing_group: String,
    },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::ConfigMissing { path, .. } => vec![
                format!("Expected a YAML configuration at {}", path.display()),
                "Create one with: vipergen init --initfile <project>".into(),
                "Or point to an existing file with --config <FILE>".into(),
            ],
            Self::TemplateNotFound { id } => vec![
                format!("Add a template named '{}' to your template directory", id),
                "Module templates are named <Part>.tpl.swift (e.g. Presenter.tpl.swift)".into(),
                "Set templates_dir to $TEMPLATES to use the bundled templates".into(),
            ],
            Self::RenderingFailed { id, .. } => vec![
                format!("Check the syntax of template '{}'", id),
                "Placeholders look like {{module_name}}".into(),
            ],
            Self::DestinationMissing { path } => vec![
                format!("Missing directory: {}", path.display()),
                "Try to use `vipergen init <project>` first".into(),
                "Check project_dir in your viper.yml".into(),
            ],
            Self::ManifestNotFound { path } => vec![
                format!("No project.pbxproj at {}", path.display()),
                "Pass the path to your .xcodeproj bundle".into(),
            ],
            Self::ManifestCorrupt { .. } => vec![
                "Open the project in Xcode to check it still loads".into(),
                "Restore project.pbxproj from version control if needed".into(),
            ],
            Self::TargetNotFound { available, .. } => {
                let mut out = vec!["Available targets:".to_string()];
                out.extend(available.iter().map(|t| format!("  • {t}")));
                out.push("Fix the targets list in viper.yml or pass --targets".into());
                out
            }
            Self::RegistrationConflict { existing_group, .. } => vec![
                format!("Move or remove the existing reference in '{}'", existing_group),
                "Or choose a different module name".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ConfigMissing { .. } => ErrorCategory::Configuration,
            Self::TemplateNotFound { .. }
            | Self::DestinationMissing { .. }
            | Self::ManifestNotFound { .. }
            | Self::TargetNotFound { .. } => ErrorCategory::NotFound,
            Self::RegistrationConflict { .. } => ErrorCategory::Conflict,
            Self::RenderingFailed { .. } | Self::ManifestCorrupt { .. } => {
                ErrorCategory::Validation
            }
            Self::FilesystemError { .. } => ErrorCategory::Internal,
        }
    }
}
