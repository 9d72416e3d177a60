//! Template identity and render context.
//!
//! ## Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  TemplateId (Value Object)                                  │
//! │  └── Stable lookup name: "Presenter", "ViperPresenter.swift" │
//! ├─────────────────────────────────────────────────────────────┤
//! │  RenderContext (Value Object)                               │
//! │  └── Variables: {{module_name}} -> "Login"                  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Rendering itself happens behind the `TemplateRenderer` port; the domain
//! only decides *which* template and *which* variables.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::domain::{DomainError, PartKind};

/// Identifier of a template within one template set.
///
/// Module-part templates are addressed by the part kind name (`"View"`),
/// common templates by their file name relative to the set root.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TemplateId(String);

impl TemplateId {
    /// Fallible constructor.
    ///
    /// Rejects empty ids, absolute paths and parent-directory segments, since
    /// common template ids double as output file names.
    pub fn parse(id: impl Into<String>) -> Result<Self, DomainError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(DomainError::InvalidTemplateId {
                id,
                reason: "id cannot be empty".into(),
            });
        }
        if id.starts_with('/') || id.split(['/', '\\']).any(|segment| segment == "..") {
            return Err(DomainError::InvalidTemplateId {
                id,
                reason: "id must stay inside the template directory".into(),
            });
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<PartKind> for TemplateId {
    fn from(kind: PartKind) -> Self {
        Self(kind.as_str().to_string())
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Context for template rendering.
///
/// A **Value Object** containing the variables a template may reference.
/// Immutable after creation - transformations create new instances (see
/// `with_variable`).
///
/// ## Variables
///
/// | Variable | Example | Set by |
/// |----------|---------|--------|
/// | `module_name` | "Login" | add |
/// | `module_name_camel` | "login" | add |
/// | `file_type` | "Presenter" | add |
/// | `creation_date` | "19.10.26" | add |
/// | `creation_year` | "2026" | add |
/// | `storyboard_name` | "Main" | add |
/// | `project_author` | "MyCompany" | add |
/// | `base_viewcontroller` | "UIViewController" | init |
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RenderContext {
    // BTreeMap keeps debug output and serialized data deterministic.
    variables: BTreeMap<String, String>,
}

impl RenderContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a variable, consuming self and returning a new context.
    ///
    /// ```rust
    /// use vipergen_core::domain::RenderContext;
    ///
    /// let ctx = RenderContext::new()
    ///     .with_variable("module_name", "Login")
    ///     .with_variable("file_type", "View");
    /// assert_eq!(ctx.get("module_name"), Some("Login"));
    /// ```
    pub fn with_variable(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(key.into(), value.into());
        self
    }

    /// Get a variable value if it exists.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(String::as_str)
    }

    pub fn variables(&self) -> &BTreeMap<String, String> {
        &self.variables
    }
}

/// `UserProfile` -> `userProfile`
pub(crate) fn to_lower_camel_case(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_id_from_part_kind() {
        assert_eq!(TemplateId::from(PartKind::Presenter).as_str(), "Presenter");
    }

    #[test]
    fn template_id_rejects_escapes() {
        assert!(TemplateId::parse("").is_err());
        assert!(TemplateId::parse("/etc/passwd").is_err());
        assert!(TemplateId::parse("../secret.swift").is_err());
        assert!(TemplateId::parse("nested/ViperView.swift").is_ok());
    }

    #[test]
    fn later_variables_override_earlier() {
        let ctx = RenderContext::new()
            .with_variable("author", "A")
            .with_variable("author", "B");
        assert_eq!(ctx.get("author"), Some("B"));
        assert_eq!(ctx.variables().len(), 1);
    }

    #[test]
    fn lower_camel_case() {
        assert_eq!(to_lower_camel_case("UserProfile"), "userProfile");
        assert_eq!(to_lower_camel_case("X"), "x");
        assert_eq!(to_lower_camel_case(""), "");
    }
}
