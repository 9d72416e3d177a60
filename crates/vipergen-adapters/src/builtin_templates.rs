//! Built-in template discovery.
//!
//! Two template sets ship with vipergen: the common support files written by
//! `init` and the five module parts written by `add`. Each is resolved in
//! this order, stopping at the first that applies:
//!
//! 1. **`<executable-dir>/templates/<set>`** if that directory exists. Lets a
//!    packaged install carry its own editable copy.
//! 2. The copy compiled into the binary from `templates/` in this crate.
//!
//! A user-configured `templates_dir` (anything but `$TEMPLATES`) replaces the
//! module set outright; it is never merged with the built-in one.

use std::path::PathBuf;

use tracing::{debug, info, instrument};

use vipergen_core::{domain::TemplatesDir, error::ViperResult};

use crate::renderer::HandlebarsRenderer;

/// File suffix of module-part templates (`Presenter.tpl.swift`).
pub const MODULE_TEMPLATE_SUFFIX: &str = ".tpl.swift";

const COMMON_SET: &str = "common";
const MODULE_SET: &str = "module";

/// Common support files, keyed by output file name.
pub const COMMON_TEMPLATES: &[(&str, &str)] = &[
    (
        "ViperInteractor.swift",
        include_str!("../templates/common/ViperInteractor.swift"),
    ),
    (
        "ViperPresenter.swift",
        include_str!("../templates/common/ViperPresenter.swift"),
    ),
    (
        "ViperRouter.swift",
        include_str!("../templates/common/ViperRouter.swift"),
    ),
    (
        "ViperView.swift",
        include_str!("../templates/common/ViperView.swift"),
    ),
    (
        "ViperViewController.swift",
        include_str!("../templates/common/ViperViewController.swift"),
    ),
];

/// Module-part templates, keyed by part name.
pub const MODULE_TEMPLATES: &[(&str, &str)] = &[
    ("View", include_str!("../templates/module/View.tpl.swift")),
    (
        "Interactor",
        include_str!("../templates/module/Interactor.tpl.swift"),
    ),
    (
        "Presenter",
        include_str!("../templates/module/Presenter.tpl.swift"),
    ),
    ("Router", include_str!("../templates/module/Router.tpl.swift")),
    (
        "Controller",
        include_str!("../templates/module/Controller.tpl.swift"),
    ),
];

/// The template set `init` renders into the common-support directory.
#[instrument]
pub fn common_templates() -> ViperResult<HandlebarsRenderer> {
    if let Some(dir) = exe_sibling_templates(COMMON_SET) {
        info!(path = %dir.display(), "using common templates next to executable");
        return HandlebarsRenderer::from_dir(&dir, None);
    }
    embedded(COMMON_TEMPLATES)
}

/// The template set `add` renders module parts from.
///
/// Relative paths resolve against the current working directory.
#[instrument]
pub fn module_templates(templates_dir: &TemplatesDir) -> ViperResult<HandlebarsRenderer> {
    match templates_dir {
        TemplatesDir::Path(dir) => {
            info!(path = %dir.display(), "using configured module templates");
            HandlebarsRenderer::from_dir(dir, Some(MODULE_TEMPLATE_SUFFIX))
        }
        TemplatesDir::Bundled => match exe_sibling_templates(MODULE_SET) {
            Some(dir) => {
                info!(path = %dir.display(), "using module templates next to executable");
                HandlebarsRenderer::from_dir(&dir, Some(MODULE_TEMPLATE_SUFFIX))
            }
            None => embedded(MODULE_TEMPLATES),
        },
    }
}

fn embedded(set: &[(&str, &str)]) -> ViperResult<HandlebarsRenderer> {
    debug!(count = set.len(), "using compiled-in templates");
    set.iter()
        .try_fold(HandlebarsRenderer::new(), |renderer, (id, source)| {
            renderer.with_template(id, source)
        })
}

/// `<directory of current executable>/templates/<set>`, if it is a directory.
fn exe_sibling_templates(set: &str) -> Option<PathBuf> {
    let dir = std::env::current_exe()
        .ok()?
        .parent()?
        .join("templates")
        .join(set);
    debug!(path = %dir.display(), "checking candidate templates path");
    dir.is_dir().then_some(dir)
}
