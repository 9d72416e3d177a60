use std::path::{Path, PathBuf};

use crate::domain::{EffectiveConfig, PartKind};

/// Group (and directory) holding the shared support files.
pub const COMMON_GROUP: &str = "ViperCommon";

/// Filesystem locations of one project integration.
///
/// ```text
/// <source root>/               parent of App.xcodeproj
/// ├── App.xcodeproj/
/// └── <project_dir>/           code dir
///     ├── ViperCommon/
///     ├── Views/
///     ├── Interactors/
///     ├── Presenters/
///     ├── Routers/
///     └── ViewControllers/
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    code_dir: PathBuf,
}

impl ProjectLayout {
    /// `project` is the `.xcodeproj` bundle path, ideally absolute.
    pub fn new(project: impl Into<PathBuf>, config: &EffectiveConfig) -> Self {
        let project = project.into();
        let code_dir = source_root_of(&project).join(config.project_dir());
        Self { code_dir }
    }

    pub fn common_dir(&self) -> PathBuf {
        self.code_dir.join(COMMON_GROUP)
    }

    pub fn part_dir(&self, kind: PartKind) -> PathBuf {
        self.code_dir.join(kind.directory())
    }

    /// Common dir first, then the part dirs in declaration order.
    pub fn skeleton_dirs(&self) -> Vec<PathBuf> {
        std::iter::once(self.common_dir())
            .chain(PartKind::ALL.into_iter().map(|kind| self.part_dir(kind)))
            .collect()
    }
}

fn source_root_of(project: &Path) -> PathBuf {
    match project.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// `App.xcodeproj` -> `App`
pub fn project_name(project: &Path) -> Option<String> {
    let file_name = project.file_name()?.to_str()?;
    let name = file_name.strip_suffix(".xcodeproj").unwrap_or(file_name);
    (!name.is_empty()).then(|| name.to_string())
}
