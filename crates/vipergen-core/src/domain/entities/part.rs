use std::fmt;

use serde::Serialize;

/// Extension of every generated module part.
pub const SOURCE_EXTENSION: &str = "swift";

/// One of the five architectural roles generated for every module.
///
/// Declaration order is the generation order: rendering, writing, group
/// creation and registration all walk [`PartKind::ALL`] front to back, so a
/// run over identical inputs touches the manifest in the same sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum PartKind {
    View,
    Interactor,
    Presenter,
    Router,
    Controller,
}

impl PartKind {
    pub const ALL: [PartKind; 5] = [
        PartKind::View,
        PartKind::Interactor,
        PartKind::Presenter,
        PartKind::Router,
        PartKind::Controller,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::View => "View",
            Self::Interactor => "Interactor",
            Self::Presenter => "Presenter",
            Self::Router => "Router",
            Self::Controller => "Controller",
        }
    }

    /// Subdirectory (under the project code directory) holding this part.
    pub const fn directory(self) -> &'static str {
        match self {
            Self::View => "Views",
            Self::Interactor => "Interactors",
            Self::Presenter => "Presenters",
            Self::Router => "Routers",
            Self::Controller => "ViewControllers",
        }
    }

    /// Manifest group for this part.
    ///
    /// Controllers go to the configured group; everything else to the
    /// pluralized kind name.
    pub fn group_name(self, controllers_group: &str) -> String {
        match self {
            Self::Controller => controllers_group.to_string(),
            other => format!("{}s", other.as_str()),
        }
    }

    /// `<Module><Kind>.swift`
    pub fn file_name(self, module_name: &str) -> String {
        format!("{}{}.{}", module_name, self.as_str(), SOURCE_EXTENSION)
    }
}

impl fmt::Display for PartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declaration_order_is_stable() {
        let names: Vec<_> = PartKind::ALL.iter().map(|k| k.as_str()).collect();
        assert_eq!(
            names,
            ["View", "Interactor", "Presenter", "Router", "Controller"]
        );
    }

    #[test]
    fn directories_follow_kinds() {
        let dirs: Vec<_> = PartKind::ALL.into_iter().map(PartKind::directory).collect();
        assert_eq!(
            dirs,
            ["Views", "Interactors", "Presenters", "Routers", "ViewControllers"]
        );
    }

    #[test]
    fn controller_uses_configured_group() {
        assert_eq!(PartKind::Controller.group_name("VIPER_CONTROLLERS"), "VIPER_CONTROLLERS");
        assert_eq!(PartKind::Presenter.group_name("VIPER_CONTROLLERS"), "Presenters");
        assert_eq!(PartKind::View.group_name("ignored"), "Views");
    }
}
