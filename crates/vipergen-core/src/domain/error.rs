// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (reports and tests compare them)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("Invalid module name '{name}': {reason}")]
    InvalidModuleName { name: String, reason: String },

    #[error("Invalid template id '{id}': {reason}")]
    InvalidTemplateId { id: String, reason: String },

    #[error("Invalid configuration value for '{key}': {reason}")]
    InvalidConfigValue { key: &'static str, reason: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidModuleName { name, reason } => vec![
                format!("'{}' cannot be used as a module name: {}", name, reason),
                "Module names become Swift type names (e.g. LoginView)".into(),
                "Use letters, digits and underscores, starting with a letter".into(),
                "Examples: Login, UserProfile, Settings_v2".into(),
            ],
            Self::InvalidConfigValue { key, .. } => vec![
                format!("Check the '{}' entry of your viper.yml", key),
                "Run `vipergen init --initfile <project>` to regenerate a default file".into(),
            ],
            Self::InvalidTemplateId { .. } => {
                vec!["Template ids are file names relative to the template directory".into()]
            }
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidModuleName { .. } | Self::InvalidTemplateId { .. } => {
                ErrorCategory::Validation
            }
            Self::InvalidConfigValue { .. } => ErrorCategory::Configuration,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Configuration,
}
