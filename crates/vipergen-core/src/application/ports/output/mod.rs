//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `vipergen-adapters` crate provides implementations.

use std::path::Path;

use crate::domain::{GroupId, Registration, RenderContext, TargetSelection, TemplateId};
use crate::error::ViperResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `vipergen_adapters::filesystem::LocalFilesystem` (production)
/// - `vipergen_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> ViperResult<()>;

    /// Write content to a file, replacing it. The parent must exist.
    fn write_file(&self, path: &Path, content: &str) -> ViperResult<()>;

    /// Check if path is an existing directory.
    fn is_dir(&self, path: &Path) -> bool;
}

/// Port for one template set.
///
/// Implemented by:
/// - `vipergen_adapters::renderer::HandlebarsRenderer`
///
/// Rendering must not touch the destination filesystem.
#[cfg_attr(test, mockall::automock)]
pub trait TemplateRenderer: Send + Sync {
    /// Render the template `id` with `context`.
    ///
    /// # Errors
    ///
    /// `ApplicationError::TemplateNotFound` when the set has no such template.
    fn render(&self, id: &TemplateId, context: &RenderContext) -> ViperResult<String>;

    /// Every template in the set, sorted.
    fn template_ids(&self) -> Vec<TemplateId>;
}

/// Port for one loaded project manifest.
///
/// The handle owns all group and registration state for the run and is the
/// only writer of the manifest file. Mutations stay in memory until `save`.
#[cfg_attr(test, mockall::automock)]
pub trait ProjectManifest: Send {
    /// Find a group by name or create it.
    ///
    /// Repeated calls with the same name on one handle return equal ids and
    /// never create a second group.
    fn get_or_create_group(&mut self, name: &str) -> ViperResult<GroupId>;

    /// Attach `path` to `group` and add it to the selected targets.
    ///
    /// Idempotent: a file already present under the same group and target
    /// gets no second entry.
    fn register_file(
        &mut self,
        path: &Path,
        group: &GroupId,
        targets: &TargetSelection,
    ) -> ViperResult<Registration>;

    /// Names of every build target, in manifest order.
    fn target_names(&self) -> ViperResult<Vec<String>>;

    /// Write the in-memory manifest back over the original file.
    fn save(&mut self) -> ViperResult<()>;
}

/// Port for opening a project manifest.
#[cfg_attr(test, mockall::automock)]
pub trait ManifestLoader: Send + Sync {
    /// Load the manifest of the project at `project`.
    ///
    /// # Errors
    ///
    /// `ManifestNotFound` if absent, `ManifestCorrupt` if unparsable.
    fn load(&self, project: &Path) -> ViperResult<Box<dyn ProjectManifest>>;
}
