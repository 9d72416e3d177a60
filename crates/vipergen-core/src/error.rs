//! Unified error handling for vipergen core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for vipergen core operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ViperError {
    /// Errors from the domain layer (invalid names and values).
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Errors from the application layer (orchestration failures).
    #[error(transparent)]
    Application(#[from] ApplicationError),
}

impl ViperError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::Configuration => ErrorCategory::Configuration,
            },
            Self::Application(e) => e.category(),
        }
    }

    /// The application error, if this is one.
    pub fn as_application(&self) -> Option<&ApplicationError> {
        match self {
            Self::Application(e) => Some(e),
            Self::Domain(_) => None,
        }
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Conflict,
    Configuration,
    Internal,
}

/// Convenient result type alias.
pub type ViperResult<T> = Result<T, ViperError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_pass_through() {
        let err: ViperError = DomainError::InvalidModuleName {
            name: "".into(),
            reason: "empty".into(),
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::Validation);

        let err: ViperError = ApplicationError::ConfigMissing {
            path: "viper.yml".into(),
            reason: "not found".into(),
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert!(err.as_application().is_some());
    }

    #[test]
    fn display_is_transparent() {
        let err: ViperError = ApplicationError::TemplateNotFound { id: "View".into() }.into();
        assert_eq!(err.to_string(), "Cannot find template 'View'");
    }
}
