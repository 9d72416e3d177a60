//! End-to-end runs of the core services against the real adapters.

use std::fs;
use std::path::PathBuf;

use chrono::NaiveDate;
use tempfile::TempDir;
use vipergen_adapters::{
    LocalFilesystem, MemoryFilesystem, PbxprojLoader, YamlConfigStore, common_templates,
    module_templates,
};
use vipergen_core::prelude::*;

const FIXTURE: &str = include_str!("fixtures/minimal.pbxproj");

struct Workspace {
    _temp: TempDir,
    root: PathBuf,
    project: PathBuf,
}

fn workspace() -> Workspace {
    let temp = TempDir::new().unwrap();
    let root = temp.path().to_path_buf();
    let project = root.join("App.xcodeproj");
    fs::create_dir(&project).unwrap();
    fs::write(project.join("project.pbxproj"), FIXTURE).unwrap();
    Workspace {
        _temp: temp,
        root,
        project,
    }
}

fn config(ws: &Workspace) -> EffectiveConfig {
    let store = YamlConfigStore::new();
    let path = ws.root.join("viper.yml");
    store.write_default(&path, "App", false).unwrap();
    let persisted = store.load(&path).unwrap();
    resolve(&ConfigDefaults::for_project("App"), &persisted, &[]).unwrap()
}

fn manifest_text(ws: &Workspace) -> String {
    fs::read_to_string(ws.project.join("project.pbxproj")).unwrap()
}

fn count(haystack: &str, needle: &str) -> usize {
    haystack.matches(needle).count()
}

#[test]
fn init_and_add_twice_on_disk() {
    let ws = workspace();
    let config = config(&ws);

    let init = InitService::new(
        Box::new(LocalFilesystem::new()),
        Box::new(common_templates().unwrap()),
        Box::new(PbxprojLoader::new()),
    );
    let report = init.init(&config, &ws.project).unwrap();
    assert_eq!(report.directories_created.len(), 6);
    assert!(ws.root.join("App/ViperCommon/ViperViewController.swift").is_file());

    let add = AddModuleService::new(
        Box::new(LocalFilesystem::new()),
        Box::new(module_templates(config.templates_dir()).unwrap()),
        Box::new(PbxprojLoader::new()),
    );
    let login = ModuleName::parse("Login").unwrap();
    let date = NaiveDate::from_ymd_opt(2026, 3, 7).unwrap();

    let first = add
        .add_module_dated(&config, &ws.project, &login, Some("Auth"), date)
        .unwrap();
    assert_eq!(first.unchanged_count(), 0);
    let after_first = manifest_text(&ws);

    let second = add
        .add_module_dated(&config, &ws.project, &login, Some("Auth"), date)
        .unwrap();
    assert_eq!(second.unchanged_count(), 5);

    let text = manifest_text(&ws);
    assert_eq!(count(&text, "isa = PBXBuildFile"), 11);
    assert_eq!(count(&text, "path = App/Views/LoginView.swift;"), 1);
    assert_eq!(count(&text, "name = VIPER_CONTROLLERS;"), 1);
    assert_eq!(count(&text, "name = ViperCommon;"), 1);
    assert_eq!(
        count(&text, "isa = PBXGroup"),
        count(&after_first, "isa = PBXGroup")
    );

    let router = fs::read_to_string(ws.root.join("App/Routers/LoginRouter.swift")).unwrap();
    assert!(router.contains("UIStoryboard(name: \"Auth\""));
    assert!(router.contains("Created by MyCompany on 07.03.26."));
}

#[test]
fn init_twice_changes_nothing() {
    let ws = workspace();
    let config = config(&ws);
    let init = InitService::new(
        Box::new(LocalFilesystem::new()),
        Box::new(common_templates().unwrap()),
        Box::new(PbxprojLoader::new()),
    );

    let first = init.init(&config, &ws.project).unwrap();
    assert!(!first.files.is_empty());
    let after_first = manifest_text(&ws);

    let second = init.init(&config, &ws.project).unwrap();
    assert!(second.directories_created.is_empty());
    assert_eq!(second.files.len(), first.files.len());
    assert!(second.files.iter().all(|file| file.registration.is_noop()));

    let text = manifest_text(&ws);
    assert_eq!(count(&text, "name = ViperCommon;"), 1);
    assert_eq!(text, after_first);
}

#[test]
fn custom_template_dir_missing_a_part_stops_the_run() {
    let ws = workspace();
    let templates = ws.root.join("my-templates");
    fs::create_dir(&templates).unwrap();
    for part in ["View", "Interactor"] {
        fs::write(
            templates.join(format!("{part}.tpl.swift")),
            "// {{module_name}}",
        )
        .unwrap();
    }

    let persisted = PersistedConfig {
        templates_dir: Some(templates.display().to_string()),
        ..Default::default()
    };
    let config = resolve(&ConfigDefaults::for_project("App"), &persisted, &[]).unwrap();

    let fs_double = MemoryFilesystem::new();
    let layout = ProjectLayout::new(&ws.project, &config);
    for dir in layout.skeleton_dirs() {
        fs_double.create_dir_all(&dir).unwrap();
    }

    let add = AddModuleService::new(
        Box::new(fs_double.clone()),
        Box::new(module_templates(config.templates_dir()).unwrap()),
        Box::new(PbxprojLoader::new()),
    );
    let err = add
        .add_module(
            &config,
            &ws.project,
            &ModuleName::parse("Login").unwrap(),
            None,
        )
        .unwrap_err();

    assert_eq!(err.to_string(), "Cannot find template 'Presenter'");
    assert_eq!(fs_double.list_files().len(), 2);
    let view = layout.part_dir(PartKind::View).join("LoginView.swift");
    assert_eq!(fs_double.read_file(&view).as_deref(), Some("// Login"));
    assert_eq!(manifest_text(&ws), FIXTURE);
}

#[test]
fn unknown_configured_target_is_reported() {
    let ws = workspace();
    let config = resolve(
        &ConfigDefaults::for_project("App"),
        &PersistedConfig::default(),
        &["Widget".to_string()],
    )
    .unwrap();

    let init = InitService::new(
        Box::new(LocalFilesystem::new()),
        Box::new(common_templates().unwrap()),
        Box::new(PbxprojLoader::new()),
    );
    let err = init.init(&config, &ws.project).unwrap_err();

    assert!(matches!(
        err.as_application(),
        Some(ApplicationError::TargetNotFound { .. })
    ));
    assert!(!ws.root.join("App").exists());
    assert_eq!(manifest_text(&ws), FIXTURE);
}
