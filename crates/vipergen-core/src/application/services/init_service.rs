//! Init Service - prepares a project for VIPER modules.
//!
//! 1. Check every selected target exists in the manifest
//! 2. Create the common-support dir and the five part dirs
//! 3. Render every common template into the common-support dir
//! 4. Register each file under the `ViperCommon` group
//! 5. Save the manifest once

use std::path::Path;

use tracing::{debug, info, instrument};

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, ManifestLoader, TemplateRenderer},
        services::{
            ensure_targets_exist,
            report::{GeneratedFile, InitReport},
        },
    },
    domain::{COMMON_GROUP, EffectiveConfig, ProjectLayout, RenderContext},
    error::ViperResult,
};

/// Init orchestrator.
pub struct InitService {
    filesystem: Box<dyn Filesystem>,
    templates: Box<dyn TemplateRenderer>,
    manifests: Box<dyn ManifestLoader>,
}

impl InitService {
    /// `templates` must be the common-support template set.
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

    /// Initialise the project at `project` (the `.xcodeproj` path).
    ///
    /// Safe to repeat: existing directories are left alone, files are
    /// rewritten and the manifest gains no duplicate group or membership.
    #[instrument(skip_all, fields(project = %project.display()))]
    pub fn init(&self, config: &EffectiveConfig, project: &Path) -> ViperResult<InitReport> {
        info!("Initialising VIPER support files");

        let mut manifest = self.manifests.load(project)?;
        let targets = config.target_selection();
        ensure_targets_exist(manifest.as_ref(), &targets)?;
        let layout = ProjectLayout::new(project, config);

        let mut report = InitReport::default();
        for dir in layout.skeleton_dirs() {
            if self.filesystem.is_dir(&dir) {
                debug!(dir = %dir.display(), "Directory already exists");
                continue;
            }
            self.filesystem.create_dir_all(&dir)?;
            info!(dir = %dir.display(), "Created directory");
            report.directories_created.push(dir);
        }

        let context = RenderContext::new()
            .with_variable("base_viewcontroller", config.base_view_controller());
        let group = manifest.get_or_create_group(COMMON_GROUP)?;
        let common_dir = layout.common_dir();

        for id in self.templates.template_ids() {
            let content = self.templates.render(&id, &context)?;
            let path = common_dir.join(id.as_str());

            // Nested template ids keep their subdirectory.
            if let Some(parent) = path.parent() {
                if !self.filesystem.is_dir(parent) {
                    self.filesystem.create_dir_all(parent)?;
                }
            }
            self.filesystem.write_file(&path, &content)?;

            info!(file = %path.display(), %targets, "Adding common file");
            let registration = manifest.register_file(&path, &group, &targets)?;
            report.files.push(GeneratedFile {
                path,
                part: None,
                group: group.name().to_string(),
                registration,
            });
        }

        if report.files.is_empty() {
            return Err(ApplicationError::TemplateNotFound {
                id: format!("{COMMON_GROUP}/*"),
            }
            .into());
        }

        manifest.save()?;
        info!(
            files = report.files.len(),
            directories = report.directories_created.len(),
            "Init completed"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::application::ports::output::{
        MockFilesystem, MockManifestLoader, MockProjectManifest, MockTemplateRenderer,
    };
    use crate::application::ports::ProjectManifest;
    use crate::domain::{
        ConfigDefaults, GroupId, PersistedConfig, Registration, TargetSelection, TemplateId,
        resolve,
    };

    fn config() -> EffectiveConfig {
        resolve(
            &ConfigDefaults::for_project("App"),
            &PersistedConfig::default(),
            &[],
        )
        .unwrap()
    }

    fn templates(ids: &'static [&'static str]) -> MockTemplateRenderer {
        let mut templates = MockTemplateRenderer::new();
        templates
            .expect_template_ids()
            .returning(move || ids.iter().map(|id| TemplateId::parse(*id).unwrap()).collect());
        templates
            .expect_render()
            .returning(|id: &TemplateId, ctx: &RenderContext| {
                Ok(format!(
                    "// {id} : {}",
                    ctx.get("base_viewcontroller").unwrap_or_default()
                ))
            });
        templates
    }

    fn manifest_with_app() -> MockProjectManifest {
        let mut manifest = MockProjectManifest::new();
        manifest
            .expect_target_names()
            .returning(|| Ok(vec!["App".into()]));
        manifest
    }

    fn loader(manifest: MockProjectManifest) -> MockManifestLoader {
        let mut loader = MockManifestLoader::new();
        loader
            .expect_load()
            .return_once(move |_| Ok(Box::new(manifest) as Box<dyn ProjectManifest>));
        loader
    }

    #[test]
    fn creates_skeleton_writes_and_registers_common_files() {
        let mut fs = MockFilesystem::new();
        fs.expect_is_dir().returning(|_| false);
        fs.expect_create_dir_all().times(6).returning(|_| Ok(()));
        let written = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&written);
        fs.expect_write_file().returning(move |path: &Path, content: &str| {
            sink.lock().unwrap().push((path.to_path_buf(), content.to_string()));
            Ok(())
        });

        let mut manifest = manifest_with_app();
        manifest
            .expect_get_or_create_group()
            .withf(|name: &str| name == "ViperCommon")
            .times(1)
            .returning(|name: &str| Ok(GroupId::new("G1", name)));
        manifest
            .expect_register_file()
            .times(2)
            .returning(|_, group: &GroupId, targets: &TargetSelection| {
                assert_eq!(group.name(), "ViperCommon");
                assert_eq!(targets, &TargetSelection::Named(vec!["App".into()]));
                Ok(Registration {
                    reference_added: true,
                    targets_added: vec!["App".into()],
                    targets_unchanged: vec![],
                })
            });
        manifest.expect_save().times(1).returning(|| Ok(()));

        let service = InitService::new(
            Box::new(fs),
            Box::new(templates(&["ViperView.swift", "ViperRouter.swift"])),
            Box::new(loader(manifest)),
        );

        let report = service
            .init(&config(), Path::new("/work/App.xcodeproj"))
            .unwrap();

        assert_eq!(report.directories_created.len(), 6);
        assert_eq!(report.files.len(), 2);
        let written = written.lock().unwrap();
        assert_eq!(
            written[0].0,
            PathBuf::from("/work/App/ViperCommon/ViperView.swift")
        );
        assert!(written[0].1.contains("UIViewController"));
    }

    #[test]
    fn existing_directories_are_left_alone() {
        let mut fs = MockFilesystem::new();
        fs.expect_is_dir().returning(|_| true);
        fs.expect_create_dir_all().never();
        fs.expect_write_file().returning(|_, _| Ok(()));

        let mut manifest = manifest_with_app();
        manifest
            .expect_get_or_create_group()
            .returning(|name: &str| Ok(GroupId::new("G1", name)));
        manifest
            .expect_register_file()
            .returning(|_, _, _| Ok(Registration::default()));
        manifest.expect_save().times(1).returning(|| Ok(()));

        let service = InitService::new(
            Box::new(fs),
            Box::new(templates(&["ViperView.swift"])),
            Box::new(loader(manifest)),
        );

        let report = service
            .init(&config(), Path::new("/work/App.xcodeproj"))
            .unwrap();
        assert!(report.directories_created.is_empty());
        assert!(report.files[0].registration.is_noop());
    }

    #[test]
    fn missing_manifest_stops_before_touching_disk() {
        let mut fs = MockFilesystem::new();
        fs.expect_create_dir_all().never();
        fs.expect_write_file().never();

        let mut loader = MockManifestLoader::new();
        loader.expect_load().returning(|project: &Path| {
            Err(ApplicationError::ManifestNotFound {
                path: project.join("project.pbxproj"),
            }
            .into())
        });

        let service = InitService::new(
            Box::new(fs),
            Box::new(MockTemplateRenderer::new()),
            Box::new(loader),
        );

        let err = service
            .init(&config(), Path::new("/work/App.xcodeproj"))
            .unwrap_err();
        assert!(matches!(
            err.as_application(),
            Some(ApplicationError::ManifestNotFound { .. })
        ));
    }

    #[test]
    fn unknown_target_stops_before_touching_disk() {
        let mut fs = MockFilesystem::new();
        fs.expect_is_dir().never();
        fs.expect_create_dir_all().never();
        fs.expect_write_file().never();

        let mut manifest = manifest_with_app();
        manifest.expect_get_or_create_group().never();
        manifest.expect_save().never();

        let service = InitService::new(
            Box::new(fs),
            Box::new(MockTemplateRenderer::new()),
            Box::new(loader(manifest)),
        );
        let config = resolve(
            &ConfigDefaults::for_project("App"),
            &PersistedConfig::default(),
            &["Widget".to_string()],
        )
        .unwrap();

        let err = service
            .init(&config, Path::new("/work/App.xcodeproj"))
            .unwrap_err();
        assert!(matches!(
            err.as_application(),
            Some(ApplicationError::TargetNotFound { name, .. }) if name == "Widget"
        ));
    }
}
