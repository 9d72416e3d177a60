//! Configuration resolution.
//!
//! Three immutable inputs, one immutable output:
//!
//! ```text
//! ConfigDefaults ──┐
//! PersistedConfig ─┼── resolve() ──> EffectiveConfig
//! --targets ───────┘
//! ```
//!
//! Precedence for every key is defaults < persisted document; `targets`
//! additionally yields to a non-empty command-line override.

use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, TargetSelection};

/// `templates_dir` value selecting the templates bundled with the tool.
pub const TEMPLATES_SENTINEL: &str = "$TEMPLATES";
pub const DEFAULT_CONTROLLERS_GROUP: &str = "VIPER_CONTROLLERS";
pub const DEFAULT_AUTHOR: &str = "MyCompany";
pub const DEFAULT_BASE_VIEW_CONTROLLER: &str = "UIViewController";

/// The configuration document as stored on disk (`viper.yml`).
///
/// Every key is optional; absent keys fall back to [`ConfigDefaults`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_dir: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub templates_dir: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uikit_controllers_group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub targets: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_viewcontroller: Option<String>,
}

impl PersistedConfig {
    /// The document `init --initfile` writes: every key spelled out.
    pub fn default_document(project_name: &str) -> Self {
        let defaults = ConfigDefaults::for_project(project_name);
        Self {
            project_dir: Some(defaults.project_dir),
            templates_dir: Some(TEMPLATES_SENTINEL.to_string()),
            uikit_controllers_group: Some(defaults.controllers_group),
            author: Some(defaults.author),
            targets: Some(defaults.targets),
            base_viewcontroller: Some(defaults.base_view_controller),
        }
    }
}

/// Where module-part templates come from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplatesDir {
    /// The set shipped with the tool.
    Bundled,
    Path(PathBuf),
}

impl TemplatesDir {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() || raw == TEMPLATES_SENTINEL {
            Self::Bundled
        } else {
            Self::Path(PathBuf::from(raw))
        }
    }
}

/// Hard-coded fallbacks, derived from the project name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigDefaults {
    pub project_dir: String,
    pub templates_dir: TemplatesDir,
    pub controllers_group: String,
    pub author: String,
    pub targets: Vec<String>,
    pub base_view_controller: String,
}

impl ConfigDefaults {
    pub fn for_project(project_name: &str) -> Self {
        Self {
            project_dir: project_name.to_string(),
            templates_dir: TemplatesDir::Bundled,
            controllers_group: DEFAULT_CONTROLLERS_GROUP.to_string(),
            author: DEFAULT_AUTHOR.to_string(),
            targets: vec![project_name.to_string()],
            base_view_controller: DEFAULT_BASE_VIEW_CONTROLLER.to_string(),
        }
    }
}

/// Resolved settings for one run. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EffectiveConfig {
    project_dir: String,
    templates_dir: TemplatesDir,
    controllers_group: String,
    author: String,
    targets: Vec<String>,
    base_view_controller: String,
}

impl EffectiveConfig {
    /// Path segment under the source root where generated code lives.
    pub fn project_dir(&self) -> &str {
        &self.project_dir
    }

    pub fn templates_dir(&self) -> &TemplatesDir {
        &self.templates_dir
    }

    pub fn controllers_group(&self) -> &str {
        &self.controllers_group
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    /// Ordered, duplicate-free. Empty means every target.
    pub fn targets(&self) -> &[String] {
        &self.targets
    }

    pub fn target_selection(&self) -> TargetSelection {
        TargetSelection::from_names(&self.targets)
    }

    pub fn base_view_controller(&self) -> &str {
        &self.base_view_controller
    }
}

/// Merge defaults, the persisted document and the `--targets` override.
///
/// Pure and deterministic. Fails only when a resolved value is unusable.
pub fn resolve(
    defaults: &ConfigDefaults,
    persisted: &PersistedConfig,
    targets_override: &[String],
) -> Result<EffectiveConfig, DomainError> {
    let project_dir = persisted
        .project_dir
        .clone()
        .unwrap_or_else(|| defaults.project_dir.clone());
    validate_project_dir(&project_dir)?;

    let templates_dir = persisted
        .templates_dir
        .as_deref()
        .map(TemplatesDir::parse)
        .unwrap_or_else(|| defaults.templates_dir.clone());

    let controllers_group = persisted
        .uikit_controllers_group
        .clone()
        .unwrap_or_else(|| defaults.controllers_group.clone());
    if controllers_group.trim().is_empty() {
        return Err(DomainError::InvalidConfigValue {
            key: "uikit_controllers_group",
            reason: "group name cannot be empty".into(),
        });
    }

    let targets = if !targets_override.is_empty() {
        targets_override.to_vec()
    } else {
        persisted
            .targets
            .clone()
            .unwrap_or_else(|| defaults.targets.clone())
    };

    Ok(EffectiveConfig {
        project_dir,
        templates_dir,
        controllers_group,
        author: persisted
            .author
            .clone()
            .unwrap_or_else(|| defaults.author.clone()),
        targets: dedup_preserving_order(targets),
        base_view_controller: persisted
            .base_viewcontroller
            .clone()
            .unwrap_or_else(|| defaults.base_view_controller.clone()),
    })
}

fn validate_project_dir(dir: &str) -> Result<(), DomainError> {
    let path = Path::new(dir);
    if path.is_absolute() || path.has_root() {
        return Err(DomainError::InvalidConfigValue {
            key: "project_dir",
            reason: format!("'{dir}' must be relative to the project's parent directory"),
        });
    }
    if path.components().any(|c| matches!(c, Component::ParentDir)) {
        return Err(DomainError::InvalidConfigValue {
            key: "project_dir",
            reason: format!("'{dir}' cannot contain '..'"),
        });
    }
    Ok(())
}

fn dedup_preserving_order(names: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(names.len());
    for name in names {
        if !out.contains(&name) {
            out.push(name);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> ConfigDefaults {
        ConfigDefaults::for_project("App")
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn cli_override_wins() {
        let persisted = PersistedConfig {
            targets: Some(strings(&["FromFile"])),
            ..Default::default()
        };
        let cfg = resolve(&defaults(), &persisted, &strings(&["FromCli", "Tests"])).unwrap();
        assert_eq!(cfg.targets(), strings(&["FromCli", "Tests"]).as_slice());
    }

    #[test]
    fn persisted_targets_used_without_override() {
        let persisted = PersistedConfig {
            targets: Some(strings(&["AppTarget"])),
            ..Default::default()
        };
        let cfg = resolve(&defaults(), &persisted, &[]).unwrap();
        assert_eq!(cfg.targets(), strings(&["AppTarget"]).as_slice());
    }

    #[test]
    fn targets_default_to_project_name() {
        let cfg = resolve(&defaults(), &PersistedConfig::default(), &[]).unwrap();
        assert_eq!(cfg.targets(), strings(&["App"]).as_slice());
    }

    #[test]
    fn explicit_empty_targets_select_all() {
        let persisted = PersistedConfig {
            targets: Some(vec![]),
            ..Default::default()
        };
        let cfg = resolve(&defaults(), &persisted, &[]).unwrap();
        assert_eq!(cfg.target_selection(), TargetSelection::All);
    }

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let cfg = resolve(&defaults(), &PersistedConfig::default(), &[]).unwrap();
        assert_eq!(cfg.project_dir(), "App");
        assert_eq!(cfg.templates_dir(), &TemplatesDir::Bundled);
        assert_eq!(cfg.controllers_group(), "VIPER_CONTROLLERS");
        assert_eq!(cfg.author(), "MyCompany");
        assert_eq!(cfg.base_view_controller(), "UIViewController");
    }

    #[test]
    fn persisted_values_override_defaults() {
        let persisted = PersistedConfig {
            project_dir: Some("Sources".into()),
            templates_dir: Some("./my-templates".into()),
            uikit_controllers_group: Some("Controllers".into()),
            author: Some("Acme".into()),
            targets: None,
            base_viewcontroller: Some("BaseViewController".into()),
        };
        let cfg = resolve(&defaults(), &persisted, &[]).unwrap();
        assert_eq!(cfg.project_dir(), "Sources");
        assert_eq!(
            cfg.templates_dir(),
            &TemplatesDir::Path(PathBuf::from("./my-templates"))
        );
        assert_eq!(cfg.controllers_group(), "Controllers");
        assert_eq!(cfg.author(), "Acme");
        assert_eq!(cfg.base_view_controller(), "BaseViewController");
    }

    #[test]
    fn sentinel_means_bundled() {
        assert_eq!(TemplatesDir::parse("$TEMPLATES"), TemplatesDir::Bundled);
        assert_eq!(TemplatesDir::parse(" $TEMPLATES "), TemplatesDir::Bundled);
    }

    #[test]
    fn duplicate_targets_collapse() {
        let cfg = resolve(&defaults(), &PersistedConfig::default(), &strings(&["A", "B", "A"]))
            .unwrap();
        assert_eq!(cfg.targets(), strings(&["A", "B"]).as_slice());
    }

    #[test]
    fn escaping_project_dir_is_rejected() {
        for dir in ["/abs/path", "../outside", "a/../../b"] {
            let persisted = PersistedConfig {
                project_dir: Some(dir.into()),
                ..Default::default()
            };
            assert!(
                matches!(
                    resolve(&defaults(), &persisted, &[]),
                    Err(DomainError::InvalidConfigValue { key: "project_dir", .. })
                ),
                "accepted {dir}"
            );
        }
    }

    #[test]
    fn default_document_spells_out_every_key() {
        let doc = PersistedConfig::default_document("App");
        assert_eq!(doc.project_dir.as_deref(), Some("App"));
        assert_eq!(doc.templates_dir.as_deref(), Some("$TEMPLATES"));
        assert_eq!(doc.uikit_controllers_group.as_deref(), Some("VIPER_CONTROLLERS"));
        assert_eq!(doc.targets, Some(strings(&["App"])));
    }
}
