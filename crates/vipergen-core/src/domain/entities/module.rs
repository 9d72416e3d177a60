use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::{
    DomainError, PartKind, RenderContext, TemplateId, entities::template::to_lower_camel_case,
};

/// Storyboard assumed when none is given.
pub const DEFAULT_STORYBOARD: &str = "Main";

/// A validated module name.
///
/// Invariant: a valid Swift type identifier. It is glued in front of every
/// part kind to form type and file names, so it can never contain a path
/// separator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ModuleName(String);

impl ModuleName {
    pub fn parse(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        let invalid = |reason: &str| DomainError::InvalidModuleName {
            name: name.clone(),
            reason: reason.into(),
        };

        let mut chars = name.chars();
        match chars.next() {
            None => return Err(invalid("name cannot be empty")),
            Some(c) if !(c.is_alphabetic() || c == '_') => {
                return Err(invalid("name must start with a letter or '_'"));
            }
            Some(_) => {}
        }
        if chars.any(|c| !(c.is_alphanumeric() || c == '_')) {
            return Err(invalid(
                "name may only contain letters, digits and underscores",
            ));
        }

        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One file the add step will produce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedPart {
    pub kind: PartKind,
    /// Subdirectory under the project code directory.
    pub directory: &'static str,
    pub template_id: TemplateId,
    pub file_name: String,
}

/// Computes the part files of a module.
///
/// Pure: no filesystem or manifest access.
pub struct ScaffoldPlanner;

impl ScaffoldPlanner {
    /// One entry per [`PartKind`], in declaration order.
    pub fn plan(module: &ModuleName) -> Vec<PlannedPart> {
        PartKind::ALL
            .into_iter()
            .map(|kind| PlannedPart {
                kind,
                directory: kind.directory(),
                template_id: TemplateId::from(kind),
                file_name: kind.file_name(module.as_str()),
            })
            .collect()
    }
}

/// Everything needed to generate one module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModulePlan {
    module_name: ModuleName,
    storyboard_name: String,
    creation_date: NaiveDate,
    parts: Vec<PlannedPart>,
}

impl ModulePlan {
    /// Build a plan for `module_name`, stamped with `today`.
    ///
    /// `storyboard` falls back to [`DEFAULT_STORYBOARD`] when absent or blank.
    pub fn new(module_name: ModuleName, storyboard: Option<&str>, today: NaiveDate) -> Self {
        let storyboard_name = storyboard
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_STORYBOARD)
            .to_string();
        let parts = ScaffoldPlanner::plan(&module_name);

        Self {
            module_name,
            storyboard_name,
            creation_date: today,
            parts,
        }
    }

    pub fn module_name(&self) -> &ModuleName {
        &self.module_name
    }

    pub fn storyboard_name(&self) -> &str {
        &self.storyboard_name
    }

    /// In [`PartKind::ALL`] order.
    pub fn parts(&self) -> &[PlannedPart] {
        &self.parts
    }

    /// `dd.mm.yy`, the header date format of Xcode file templates.
    pub fn creation_date(&self) -> String {
        self.creation_date.format("%d.%m.%y").to_string()
    }

    pub fn creation_year(&self) -> String {
        self.creation_date.format("%Y").to_string()
    }

    /// Variables for rendering `part`.
    pub fn render_context(&self, part: &PlannedPart, author: &str) -> RenderContext {
        RenderContext::new()
            .with_variable("module_name", self.module_name.as_str())
            .with_variable(
                "module_name_camel",
                to_lower_camel_case(self.module_name.as_str()),
            )
            .with_variable("file_type", part.kind.as_str())
            .with_variable("creation_date", self.creation_date())
            .with_variable("creation_year", self.creation_year())
            .with_variable("storyboard_name", self.storyboard_name.as_str())
            .with_variable("project_author", author)
    }
}
