//! Run reports returned by the services.

use std::path::PathBuf;

use serde::Serialize;

use crate::domain::{PartKind, Registration};

/// One rendered, written and registered file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedFile {
    pub path: PathBuf,
    /// `None` for common support files.
    pub part: Option<PartKind>,
    pub group: String,
    pub registration: Registration,
}

/// Outcome of `InitService::init`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InitReport {
    /// Only directories that did not exist before the run.
    pub directories_created: Vec<PathBuf>,
    pub files: Vec<GeneratedFile>,
}

/// Outcome of `AddModuleService::add_module`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleReport {
    pub module_name: String,
    pub storyboard_name: String,
    pub files: Vec<GeneratedFile>,
}

impl ModuleReport {
    /// Files whose registration changed nothing.
    pub fn unchanged_count(&self) -> usize {
        self.files.iter().filter(|f| f.registration.is_noop()).count()
    }
}
