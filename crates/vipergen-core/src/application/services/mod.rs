//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish the two
//! use cases: "initialise a project" and "add a module".

pub mod add_module_service;
pub mod init_service;
pub mod report;

pub use add_module_service::AddModuleService;
pub use init_service::InitService;
pub use report::{GeneratedFile, InitReport, ModuleReport};

use crate::{
    application::{ApplicationError, ports::ProjectManifest},
    domain::TargetSelection,
    error::ViperResult,
};

/// Fail with `TargetNotFound` for the first named target the manifest lacks.
///
/// Runs right after the manifest loads, so an unknown target stops the
/// run before any directory or file is written.
pub(crate) fn ensure_targets_exist(
    manifest: &dyn ProjectManifest,
    selection: &TargetSelection,
) -> ViperResult<()> {
    let TargetSelection::Named(names) = selection else {
        return Ok(());
    };
    let available = manifest.target_names()?;
    match names.iter().find(|name| !available.contains(name)) {
        Some(name) => Err(ApplicationError::TargetNotFound {
            name: name.clone(),
            available,
        }
        .into()),
        None => Ok(()),
    }
}
