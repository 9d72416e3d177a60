//! Add-Module Service - generates and registers the five parts of a module.
//!
//! Every selected target must exist in the manifest before anything is
//! written. Then, for each part, in [`PartKind::ALL`] order:
//! 1. Render its template
//! 2. Write `<code dir>/<part dir>/<Module><Part>.swift`
//! 3. Find or create the part's group and register the file
//!
//! The manifest is saved once, after the last part. A failure on any part
//! leaves earlier files on disk and the manifest file untouched.

use std::path::Path;

use chrono::NaiveDate;
use tracing::{debug, info, instrument};

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, ManifestLoader, TemplateRenderer},
        services::{
            ensure_targets_exist,
            report::{GeneratedFile, ModuleReport},
        },
    },
    domain::{EffectiveConfig, ModuleName, ModulePlan, ProjectLayout},
    error::ViperResult,
};

/// Module generation orchestrator.
pub struct AddModuleService {
    filesystem: Box<dyn Filesystem>,
    templates: Box<dyn TemplateRenderer>,
    manifests: Box<dyn ManifestLoader>,
}

impl AddModuleService {
    /// `templates` must be the module template set.
    pub fn new(
        filesystem: Box<dyn Filesystem>,
        templates: Box<dyn TemplateRenderer>,
        manifests: Box<dyn ManifestLoader>,
    ) -> Self {
        Self {
            filesystem,
            templates,
            manifests,
        }
    }

    /// Generate `module_name` in the project at `project`, dated today.
    pub fn add_module(
        &self,
        config: &EffectiveConfig,
        project: &Path,
        module_name: &ModuleName,
        storyboard: Option<&str>,
    ) -> ViperResult<ModuleReport> {
        let today = chrono::Local::now().date_naive();
        self.add_module_dated(config, project, module_name, storyboard, today)
    }

    /// Same as [`add_module`](Self::add_module) with an explicit creation date.
    #[instrument(skip_all, fields(module = %module_name, project = %project.display()))]
    pub fn add_module_dated(
        &self,
        config: &EffectiveConfig,
        project: &Path,
        module_name: &ModuleName,
        storyboard: Option<&str>,
        today: NaiveDate,
    ) -> ViperResult<ModuleReport> {
        info!("Adding VIPER module");

        let plan = ModulePlan::new(module_name.clone(), storyboard, today);
        let layout = ProjectLayout::new(project, config);
        let targets = config.target_selection();
        let mut manifest = self.manifests.load(project)?;
        ensure_targets_exist(manifest.as_ref(), &targets)?;

        let mut files = Vec::with_capacity(plan.parts().len());
        for part in plan.parts() {
            let context = plan.render_context(part, config.author());
            let content = self.templates.render(&part.template_id, &context)?;
            debug!(part = %part.kind, bytes = content.len(), "Rendered template");

            let dir = layout.part_dir(part.kind);
            if !self.filesystem.is_dir(&dir) {
                return Err(ApplicationError::DestinationMissing { path: dir }.into());
            }
            let path = dir.join(&part.file_name);
            self.filesystem.write_file(&path, &content)?;

            let group_name = part.kind.group_name(config.controllers_group());
            let group = manifest.get_or_create_group(&group_name)?;
            info!(file = %path.display(), group = %group_name, %targets, "Adding file");
            let registration = manifest.register_file(&path, &group, &targets)?;

            files.push(GeneratedFile {
                path,
                part: Some(part.kind),
                group: group_name,
                registration,
            });
        }

        manifest.save()?;
        info!(files = files.len(), "Module added");

        Ok(ModuleReport {
            module_name: module_name.to_string(),
            storyboard_name: plan.storyboard_name().to_string(),
            files,
        })
    }
}
