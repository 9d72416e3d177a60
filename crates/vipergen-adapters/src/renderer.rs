//! Handlebars-backed template sets.
//!
//! A [`HandlebarsRenderer`] holds one template set (module parts or common
//! support files), keyed by [`TemplateId`]. Placeholders use `{{name}}`;
//! unknown variables render as empty strings. Values are HTML-escaped.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use handlebars::Handlebars;
use tracing::{debug, instrument, warn};
use walkdir::WalkDir;

use vipergen_core::{
    application::{ApplicationError, ports::TemplateRenderer},
    domain::{RenderContext, TemplateId},
    error::ViperResult,
};

use crate::filesystem::map_io_error;

/// One template set rendered with Handlebars.
pub struct HandlebarsRenderer {
    registry: Handlebars<'static>,
    ids: BTreeSet<TemplateId>,
}

impl HandlebarsRenderer {
    /// Create an empty set.
    pub fn new() -> Self {
        Self {
            registry: Handlebars::new(),
            ids: BTreeSet::new(),
        }
    }

    /// Register `source` under `id`, replacing any template with that id.
    ///
    /// # Errors
    ///
    /// `RenderingFailed` if the source is not a valid template.
    pub fn register(&mut self, id: TemplateId, source: &str) -> ViperResult<()> {
        self.registry
            .register_template_string(id.as_str(), source)
            .map_err(|e| ApplicationError::RenderingFailed {
                id: id.to_string(),
                reason: e.to_string(),
            })?;
        debug!(template = %id, "registered template");
        self.ids.insert(id);
        Ok(())
    }

    /// Builder-style [`register`](Self::register).
    pub fn with_template(mut self, id: &str, source: &str) -> ViperResult<Self> {
        let id = TemplateId::parse(id)?;
        self.register(id, source)?;
        Ok(self)
    }

    /// Load every file under `root` as a template.
    ///
    /// With `suffix = Some(".tpl.swift")` only matching files are loaded and
    /// the id is the file path minus the suffix (`View.tpl.swift` -> `View`).
    /// With `None` every file is loaded and the id is its relative path.
    ///
    /// A missing `root` yields an empty set and a warning; lookups then fail
    /// with `TemplateNotFound`.
    #[instrument(skip_all, fields(root = %root.display()))]
    pub fn from_dir(root: &Path, suffix: Option<&str>) -> ViperResult<Self> {
        let mut renderer = Self::new();
        if !root.is_dir() {
            warn!("template directory does not exist");
            return Ok(renderer);
        }

        for entry in WalkDir::new(root).min_depth(1).sort_by_file_name() {
            let entry = entry.map_err(|e| ApplicationError::FilesystemError {
                path: root.to_path_buf(),
                reason: e.to_string(),
            })?;
            if !entry.file_type().is_file() {
                continue;
            }

            let Some(id) = template_id_for(root, entry.path(), suffix) else {
                debug!(file = %entry.path().display(), "skipping non-template file");
                continue;
            };
            let source = fs::read_to_string(entry.path())
                .map_err(|e| map_io_error(entry.path(), e, "read template"))?;
            renderer.register(id, &source)?;
        }

        debug!(count = renderer.len(), "loaded template set");
        Ok(renderer)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl Default for HandlebarsRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn template_id_for(root: &Path, file: &Path, suffix: Option<&str>) -> Option<TemplateId> {
    let relative = file.strip_prefix(root).ok()?;
    let relative = relative
        .components()
        .map(|c| c.as_os_str().to_str())
        .collect::<Option<Vec<_>>>()?
        .join("/");
    let id = match suffix {
        Some(suffix) => relative.strip_suffix(suffix)?.to_string(),
        None => relative,
    };
    TemplateId::parse(id).ok()
}

impl TemplateRenderer for HandlebarsRenderer {
    fn render(&self, id: &TemplateId, context: &RenderContext) -> ViperResult<String> {
        if !self.registry.has_template(id.as_str()) {
            return Err(ApplicationError::TemplateNotFound { id: id.to_string() }.into());
        }
        self.registry
            .render(id.as_str(), context.variables())
            .map_err(|e| {
                ApplicationError::RenderingFailed {
                    id: id.to_string(),
                    reason: e.to_string(),
                }
                .into()
            })
    }

    fn template_ids(&self) -> Vec<TemplateId> {
        self.ids.iter().cloned().collect()
    }
}
