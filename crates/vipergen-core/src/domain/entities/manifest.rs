use std::fmt;

use serde::Serialize;

/// Opaque handle to a group node inside a loaded manifest.
///
/// Two handles compare equal iff they denote the same node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct GroupId {
    id: String,
    name: String,
}

impl GroupId {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// Manifest-internal identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display name the group was looked up by.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

/// Which build targets a file joins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetSelection {
    /// Every target defined in the manifest.
    All,
    Named(Vec<String>),
}

impl TargetSelection {
    /// Empty list selects every target.
    pub fn from_names(names: &[String]) -> Self {
        if names.is_empty() {
            Self::All
        } else {
            Self::Named(names.to_vec())
        }
    }
}

impl fmt::Display for TargetSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all targets"),
            Self::Named(names) => write!(f, "target(s) {}", names.join(", ")),
        }
    }
}

/// What a `register_file` call changed.
///
/// A call that changed nothing is the idempotent re-registration case.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Registration {
    /// A new file reference was attached to the group.
    pub reference_added: bool,
    /// Targets that gained a membership entry in this call.
    pub targets_added: Vec<String>,
    /// Targets that already had the file.
    pub targets_unchanged: Vec<String>,
}

impl Registration {
    pub fn is_noop(&self) -> bool {
        !self.reference_added && self.targets_added.is_empty()
    }
}
