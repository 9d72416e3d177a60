//! Errors surfaced by the `vipergen` binary and their exit codes.
//!
//! Scaffolding failures come from `vipergen-core` as [`ViperError`] and keep
//! their own suggestions. The CLI adds the few failures that happen before a
//! service runs: a bad project argument, unreadable tool settings, and I/O on
//! the working directory.

use std::error::Error;
use std::io;
use std::path::PathBuf;

use owo_colors::OwoColorize;
use thiserror::Error;

use vipergen_core::error::ViperError;

pub use vipergen_core::error::ErrorCategory as CoreCategory;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    /// The project argument has no `.xcodeproj` bundle name.
    #[error("'{}' does not name an Xcode project", path.display())]
    InvalidProject { path: PathBuf },

    /// `config.toml`, `VIPERGEN_*` or `.env` could not be turned into settings.
    #[error("Could not load vipergen settings: {message}")]
    Settings {
        message: String,
        #[source]
        source: Option<Box<dyn Error + Send + Sync>>,
    },

    #[error(transparent)]
    Core(#[from] ViperError),

    #[error("{context}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },
}

impl From<io::Error> for CliError {
    fn from(err: io::Error) -> Self {
        CliError::Io {
            context: err.to_string(),
            source: err,
        }
    }
}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::Settings {
            message: format!("{err:#}"),
            source: None,
        }
    }
}

impl CliError {
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidProject { .. } => vec![
                "Pass the .xcodeproj bundle, e.g. `vipergen add App.xcodeproj Login`".into(),
                "A path ending in project.pbxproj is accepted too".into(),
            ],
            Self::Settings { .. } => vec![
                format!(
                    "Check {}",
                    crate::config::AppConfig::config_path().display()
                ),
                "Check VIPERGEN_* variables in the environment and in .env".into(),
            ],
            Self::Core(core) => core.suggestions(),
            Self::Io { .. } => vec!["Check that the project directory is readable".into()],
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidProject { .. } => ErrorCategory::UserError,
            Self::Settings { .. } => ErrorCategory::Configuration,
            Self::Core(core) => match core.category() {
                CoreCategory::Validation | CoreCategory::Conflict => ErrorCategory::UserError,
                CoreCategory::NotFound => ErrorCategory::NotFound,
                CoreCategory::Configuration => ErrorCategory::Configuration,
                CoreCategory::Internal => ErrorCategory::Internal,
            },
            Self::Io { .. } => ErrorCategory::Internal,
        }
    }

    /// | Category      | Code |
    /// |---------------|------|
    /// | User error    |  2   |
    /// | Not found     |  3   |
    /// | Configuration |  4   |
    /// | Internal      |  1   |
    pub fn exit_code(&self) -> u8 {
        match self.category() {
            ErrorCategory::UserError => 2,
            ErrorCategory::NotFound => 3,
            ErrorCategory::Configuration => 4,
            ErrorCategory::Internal => 1,
        }
    }

    /// Text for stderr: the message, its causes when `verbose`, then what to
    /// try next. ANSI colours only when `color`.
    pub fn report(&self, verbose: bool, color: bool) -> String {
        let paint = |text: &str, style: fn(&str) -> String| {
            if color { style(text) } else { text.to_owned() }
        };

        let mut out = format!(
            "\n{} {}\n",
            paint("vipergen:", |t| t.red().bold().to_string()),
            paint(&self.to_string(), |t| t.red().to_string()),
        );

        if verbose {
            let mut cause = self.source();
            while let Some(err) = cause {
                out.push_str(&format!(
                    "  {}\n",
                    paint(&format!("caused by: {err}"), |t| t.dimmed().to_string())
                ));
                cause = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            out.push_str(&format!(
                "\n{}\n",
                paint("Try:", |t| t.yellow().bold().to_string())
            ));
            for suggestion in suggestions {
                out.push_str(&format!("  - {suggestion}\n"));
            }
        }

        if !verbose {
            out.push_str(&format!(
                "\n{}\n",
                paint("Re-run with -v to see each step.", |t| t
                    .dimmed()
                    .to_string())
            ));
        }

        out
    }

    pub fn log(&self) {
        match self.category() {
            ErrorCategory::UserError | ErrorCategory::NotFound => {
                tracing::warn!(exit_code = self.exit_code(), "{self}")
            }
            ErrorCategory::Configuration | ErrorCategory::Internal => {
                tracing::error!(exit_code = self.exit_code(), "{self}")
            }
        }
        if let Some(source) = self.source() {
            tracing::debug!(%source, "cause");
        }
    }
}

/// Exit-code classes of [`CliError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Bad module name, bad project path, or a registration conflict.
    UserError,
    /// Missing project, template, destination directory or target.
    NotFound,
    Configuration,
    Internal,
}

/// Attach a message to an `io::Error` at the call site.
pub trait IntoCli<T> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T> IntoCli<T> for Result<T, io::Error> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| CliError::Io {
            context: f().into(),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use vipergen_core::prelude::{ApplicationError, DomainError};

    fn core(err: impl Into<ViperError>) -> CliError {
        CliError::Core(err.into())
    }

    #[test]
    fn destination_missing_suggests_init() {
        let err = core(ApplicationError::DestinationMissing {
            path: PathBuf::from("/work/App/Views"),
        });
        assert!(err.suggestions().iter().any(|s| s.contains("vipergen init")));
    }

    #[test]
    fn invalid_project_shows_an_example() {
        let err = CliError::InvalidProject {
            path: PathBuf::from("/"),
        };
        assert_eq!(err.to_string(), "'/' does not name an Xcode project");
        assert!(err.suggestions().iter().any(|s| s.contains("App.xcodeproj")));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn exit_codes_follow_core_categories() {
        let validation = core(DomainError::InvalidModuleName {
            name: "1Login".into(),
            reason: "must start with a letter or '_'".into(),
        });
        let conflict = core(ApplicationError::RegistrationConflict {
            path: PathBuf::from("App/Views/LoginView.swift"),
            existing_group: "Screens".into(),
        });
        let not_found = core(ApplicationError::TargetNotFound {
            name: "Widget".into(),
            available: vec!["App".into()],
        });
        let config = core(ApplicationError::ConfigMissing {
            path: PathBuf::from("viper.yml"),
            reason: "not found".into(),
        });
        let filesystem = core(ApplicationError::FilesystemError {
            path: PathBuf::from("/work/App"),
            reason: "denied".into(),
        });

        assert_eq!(validation.exit_code(), 2);
        assert_eq!(conflict.exit_code(), 2);
        assert_eq!(not_found.exit_code(), 3);
        assert_eq!(config.exit_code(), 4);
        assert_eq!(filesystem.exit_code(), 1);
    }

    #[test]
    fn settings_and_io_codes() {
        let settings = CliError::from(anyhow::anyhow!("bad toml"));
        assert_eq!(settings.exit_code(), 4);
        assert!(settings.to_string().contains("bad toml"));

        let io = CliError::from(io::Error::other("e"));
        assert_eq!(io.exit_code(), 1);
    }

    #[test]
    fn plain_report_lists_suggestions_and_verbose_hint() {
        let err = core(ApplicationError::TemplateNotFound { id: "View".into() });
        let text = err.report(false, false);
        assert!(text.contains("vipergen: Cannot find template 'View'"));
        assert!(text.contains("Try:"));
        assert!(text.contains("-v"));
        assert!(!text.contains('\u{1b}'));
    }

    #[test]
    fn verbose_report_shows_causes() {
        let err = CliError::Io {
            context: "Failed to read the working directory".into(),
            source: io::Error::other("gone"),
        };
        let text = err.report(true, false);
        assert!(text.contains("caused by: gone"));
        assert!(!text.contains("Re-run with -v"));
    }

    #[test]
    fn coloured_report_has_ansi_codes() {
        let err = core(ApplicationError::TemplateNotFound { id: "View".into() });
        assert!(err.report(false, true).contains('\u{1b}'));
    }

    #[test]
    fn with_cli_context_keeps_the_message() {
        let result: Result<(), io::Error> = Err(io::Error::new(io::ErrorKind::NotFound, "missing"));
        let cli = result.with_cli_context(|| "reading the working directory");
        assert!(matches!(
            cli,
            Err(CliError::Io { context, .. }) if context == "reading the working directory"
        ));
    }
}
