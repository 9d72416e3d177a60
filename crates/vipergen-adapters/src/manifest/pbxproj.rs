//! Xcode `project.pbxproj` manifest adapter.
//!
//! The whole object graph is held in memory as a [`Dict`]; nothing touches
//! disk until [`ProjectManifest::save`].
//!
//! ```text
//! PBXProject ── mainGroup ──> PBXGroup ── children ──> PBXGroup / PBXFileReference
//!            └─ targets ───> PBXNativeTarget ── buildPhases ──> PBX*BuildPhase
//!                                                                └─ files ──> PBXBuildFile ── fileRef
//! ```

use std::collections::{HashSet, VecDeque};
use std::ffi::OsStr;
use std::fs;
use std::path::{Component, Path, PathBuf};

use tracing::{debug, info, instrument};
use uuid::Uuid;

use vipergen_core::{
    application::{
        ApplicationError,
        ports::{ManifestLoader, ProjectManifest},
    },
    domain::{GroupId, Registration, TargetSelection},
    error::{ViperError, ViperResult},
};

use super::plist::{self, Dict, Value};
use crate::filesystem::map_io_error;

/// File name of the manifest inside an `.xcodeproj` bundle.
pub const PBXPROJ_FILE: &str = "project.pbxproj";

const SOURCES_PHASE: &str = "PBXSourcesBuildPhase";
const RESOURCES_PHASE: &str = "PBXResourcesBuildPhase";
const SOURCE_EXTENSIONS: [&str; 5] = ["swift", "m", "mm", "c", "cpp"];

/// A loaded `project.pbxproj`.
#[derive(Debug, Clone)]
pub struct PbxprojManifest {
    path: PathBuf,
    source_root: PathBuf,
    root: Dict,
}

impl PbxprojManifest {
    /// Load the manifest of `project`, either an `.xcodeproj` bundle or the
    /// `project.pbxproj` inside it.
    ///
    /// # Errors
    ///
    /// `ManifestNotFound` if the file is absent, `ManifestCorrupt` if it does
    /// not parse or lacks the project object.
    #[instrument(fields(project = %project.display()))]
    pub fn open(project: &Path) -> ViperResult<Self> {
        let (bundle, file) = if project.file_name() == Some(OsStr::new(PBXPROJ_FILE)) {
            (project.parent().unwrap_or(Path::new("")), project.to_path_buf())
        } else {
            (project, project.join(PBXPROJ_FILE))
        };

        if !file.is_file() {
            return Err(ApplicationError::ManifestNotFound { path: file }.into());
        }
        let text = fs::read_to_string(&file).map_err(|e| map_io_error(&file, e, "read"))?;

        let source_root = match bundle.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let manifest = Self::parse(file, source_root, &text)?;
        info!(path = %manifest.path.display(), "Using Xcode project");
        Ok(manifest)
    }

    /// Build a manifest from `text` without touching disk. `path` is where
    /// `save` will write.
    pub fn parse(path: PathBuf, source_root: PathBuf, text: &str) -> ViperResult<Self> {
        let root = plist::parse(text).map_err(|e| corrupt(&path, e.to_string()))?;
        let manifest = Self {
            path,
            source_root,
            root,
        };
        manifest.main_group_id()?;
        Ok(manifest)
    }

    fn objects(&self) -> ViperResult<&Dict> {
        self.root
            .get("objects")
            .and_then(Value::as_dict)
            .ok_or_else(|| corrupt(&self.path, "missing objects dictionary"))
    }

    fn object(&self, id: &str) -> Option<&Dict> {
        self.objects().ok()?.get(id)?.as_dict()
    }

    fn project(&self) -> ViperResult<&Dict> {
        self.root
            .get("rootObject")
            .and_then(Value::as_str)
            .and_then(|id| self.object(id))
            .ok_or_else(|| corrupt(&self.path, "missing root project object"))
    }

    fn main_group_id(&self) -> ViperResult<String> {
        self.project()?
            .get("mainGroup")
            .and_then(Value::as_str)
            .filter(|id| self.object(id).is_some())
            .map(str::to_owned)
            .ok_or_else(|| corrupt(&self.path, "project has no main group"))
    }

    /// Fresh 24-hex-digit object id not used in this manifest.
    fn new_object_id(&self) -> String {
        loop {
            let mut id = Uuid::new_v4().simple().to_string().to_uppercase();
            id.truncate(24);
            if self.object(&id).is_none() {
                return id;
            }
        }
    }

    fn insert_object(&mut self, id: &str, object: Dict) -> ViperResult<()> {
        match self.root.get_mut("objects").and_then(Value::as_dict_mut) {
            Some(objects) => {
                objects.insert(id.to_string(), Value::Dict(object));
                Ok(())
            }
            None => Err(corrupt(&self.path, "missing objects dictionary")),
        }
    }

    /// Append `child` to the list `key` of object `parent`.
    fn push_child(&mut self, parent: &str, key: &str, child: &str) -> ViperResult<()> {
        let list = self
            .root
            .get_mut("objects")
            .and_then(Value::as_dict_mut)
            .and_then(|objects| objects.get_mut(parent))
            .and_then(Value::as_dict_mut)
            .and_then(|object| {
                object
                    .entry(key.to_string())
                    .or_insert_with(|| Value::Array(Vec::new()))
                    .as_array_mut()
            });
        match list {
            Some(list) => {
                list.push(Value::from(child));
                Ok(())
            }
            None => Err(corrupt(
                &self.path,
                format!("object {parent} has no list '{key}'"),
            )),
        }
    }

    /// Every `PBXGroup` reachable from the main group, breadth first.
    fn reachable_groups(&self) -> ViperResult<Vec<(String, &Dict)>> {
        let main = self.main_group_id()?;
        let mut seen = HashSet::from([main.clone()]);
        let mut queue: VecDeque<String> = ids(self.object(&main), "children").collect();
        let mut groups = Vec::new();

        while let Some(id) = queue.pop_front() {
            if !seen.insert(id.clone()) {
                continue;
            }
            let Some(object) = self.object(&id) else {
                continue;
            };
            if isa(object) != Some("PBXGroup") {
                continue;
            }
            queue.extend(ids(Some(object), "children"));
            groups.push((id, object));
        }
        Ok(groups)
    }

    /// `(id, name)` of every native target, in project order.
    fn native_targets(&self) -> ViperResult<Vec<(String, String)>> {
        let project = self.project()?;
        Ok(ids(Some(project), "targets")
            .filter_map(|id| {
                let target = self.object(&id)?;
                if isa(target) != Some("PBXNativeTarget") {
                    return None;
                }
                let name = target.get("name")?.as_str()?.to_string();
                Some((id, name))
            })
            .collect())
    }

    fn select_targets(&self, selection: &TargetSelection) -> ViperResult<Vec<(String, String)>> {
        let all = self.native_targets()?;
        match selection {
            TargetSelection::All => Ok(all),
            TargetSelection::Named(names) => names
                .iter()
                .map(|name| {
                    all.iter()
                        .find(|(_, target)| target == name)
                        .cloned()
                        .ok_or_else(|| {
                            ViperError::from(ApplicationError::TargetNotFound {
                                name: name.clone(),
                                available: all.iter().map(|(_, t)| t.clone()).collect(),
                            })
                        })
                })
                .collect(),
        }
    }

    /// Path as stored in the file reference, with its `sourceTree`.
    fn reference_path(&self, path: &Path) -> (String, &'static str) {
        match path.strip_prefix(&self.source_root) {
            Ok(relative) => (to_slash(relative), "SOURCE_ROOT"),
            Err(_) => (to_slash(path), "<absolute>"),
        }
    }

    fn find_file_reference(&self, reference_path: &str) -> ViperResult<Option<String>> {
        Ok(self
            .objects()?
            .iter()
            .find(|(_, object)| {
                object.as_dict().is_some_and(|o| {
                    isa(o) == Some("PBXFileReference")
                        && o.get("path").and_then(Value::as_str) == Some(reference_path)
                })
            })
            .map(|(id, _)| id.clone()))
    }

    /// Group currently holding `child`, as `(id, display name)`.
    fn parent_group(&self, child: &str) -> ViperResult<Option<(String, String)>> {
        Ok(self.objects()?.iter().find_map(|(id, object)| {
            let group = object.as_dict()?;
            if !matches!(isa(group), Some("PBXGroup" | "PBXVariantGroup")) {
                return None;
            }
            ids(Some(group), "children")
                .any(|c| c == child)
                .then(|| (id.clone(), group_name(group).unwrap_or(id).to_string()))
        }))
    }

    /// The target's phase of kind `phase_isa`, created if missing.
    fn build_phase(&mut self, target: &str, phase_isa: &str) -> ViperResult<String> {
        let existing = ids(self.object(target), "buildPhases")
            .find(|id| self.object(id).and_then(isa) == Some(phase_isa));
        if let Some(id) = existing {
            return Ok(id);
        }

        let id = self.new_object_id();
        let mut phase = Dict::new();
        phase.insert("isa".into(), Value::from(phase_isa));
        phase.insert("buildActionMask".into(), Value::from("2147483647"));
        phase.insert("files".into(), Value::Array(Vec::new()));
        phase.insert(
            "runOnlyForDeploymentPostprocessing".into(),
            Value::from("0"),
        );
        self.insert_object(&id, phase)?;
        self.push_child(target, "buildPhases", &id)?;
        debug!(target_id = target, phase = phase_isa, "created build phase");
        Ok(id)
    }

    fn phase_references(&self, phase: &str, file_reference: &str) -> bool {
        ids(self.object(phase), "files").any(|build_file| {
            self.object(&build_file)
                .and_then(|o| o.get("fileRef"))
                .and_then(Value::as_str)
                == Some(file_reference)
        })
    }
}

impl ProjectManifest for PbxprojManifest {
    fn get_or_create_group(&mut self, name: &str) -> ViperResult<GroupId> {
        let found = self
            .reachable_groups()?
            .into_iter()
            .find(|(_, group)| group_name(group) == Some(name))
            .map(|(id, _)| id);
        if let Some(id) = found {
            return Ok(GroupId::new(id, name));
        }

        let main = self.main_group_id()?;
        let id = self.new_object_id();
        let mut group = Dict::new();
        group.insert("isa".into(), Value::from("PBXGroup"));
        group.insert("children".into(), Value::Array(Vec::new()));
        group.insert("name".into(), Value::from(name));
        group.insert("sourceTree".into(), Value::from("<group>"));
        self.insert_object(&id, group)?;
        self.push_child(&main, "children", &id)?;

        info!(group = name, id = %id, "Created group");
        Ok(GroupId::new(id, name))
    }

    #[instrument(skip(self), fields(path = %path.display(), group = %group.name()))]
    fn register_file(
        &mut self,
        path: &Path,
        group: &GroupId,
        targets: &TargetSelection,
    ) -> ViperResult<Registration> {
        if self.object(group.id()).is_none() {
            return Err(corrupt(
                &self.path,
                format!("group {} does not exist", group.id()),
            ));
        }
        let targets = self.select_targets(targets)?;
        let (reference_path, source_tree) = self.reference_path(path);
        let mut registration = Registration::default();

        let file_reference = match self.find_file_reference(&reference_path)? {
            Some(id) => {
                match self.parent_group(&id)? {
                    Some((parent, _)) if parent == group.id() => {}
                    Some((_, existing_group)) => {
                        return Err(ApplicationError::RegistrationConflict {
                            path: path.to_path_buf(),
                            existing_group,
                        }
                        .into());
                    }
                    None => {
                        self.push_child(group.id(), "children", &id)?;
                        registration.reference_added = true;
                    }
                }
                id
            }
            None => {
                let id = self.new_object_id();
                self.insert_object(&id, file_reference(path, &reference_path, source_tree))?;
                self.push_child(group.id(), "children", &id)?;
                registration.reference_added = true;
                id
            }
        };

        let phase_isa = if is_source_file(path) {
            SOURCES_PHASE
        } else {
            RESOURCES_PHASE
        };
        for (target, target_name) in targets {
            let phase = self.build_phase(&target, phase_isa)?;
            if self.phase_references(&phase, &file_reference) {
                registration.targets_unchanged.push(target_name);
                continue;
            }

            let build_file_id = self.new_object_id();
            let mut build_file = Dict::new();
            build_file.insert("isa".into(), Value::from("PBXBuildFile"));
            build_file.insert("fileRef".into(), Value::from(file_reference.as_str()));
            self.insert_object(&build_file_id, build_file)?;
            self.push_child(&phase, "files", &build_file_id)?;
            registration.targets_added.push(target_name);
        }

        debug!(?registration, "registered file");
        Ok(registration)
    }

    fn target_names(&self) -> ViperResult<Vec<String>> {
        Ok(self
            .native_targets()?
            .into_iter()
            .map(|(_, name)| name)
            .collect())
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn save(&mut self) -> ViperResult<()> {
        fs::write(&self.path, plist::to_string(&self.root))
            .map_err(|e| map_io_error(&self.path, e, "write project"))?;
        info!("Saved Xcode project");
        Ok(())
    }
}

/// Opens `project.pbxproj` manifests from disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct PbxprojLoader;

impl PbxprojLoader {
    pub fn new() -> Self {
        Self
    }
}

impl ManifestLoader for PbxprojLoader {
    fn load(&self, project: &Path) -> ViperResult<Box<dyn ProjectManifest>> {
        Ok(Box::new(PbxprojManifest::open(project)?))
    }
}

fn corrupt(path: &Path, reason: impl Into<String>) -> ViperError {
    ApplicationError::ManifestCorrupt {
        path: path.to_path_buf(),
        reason: reason.into(),
    }
    .into()
}

fn isa(object: &Dict) -> Option<&str> {
    object.get("isa").and_then(Value::as_str)
}

/// `name`, or `path` for unnamed groups.
fn group_name(group: &Dict) -> Option<&str> {
    group
        .get("name")
        .or_else(|| group.get("path"))
        .and_then(Value::as_str)
}

/// The string entries of list `key` on `object`.
fn ids(object: Option<&Dict>, key: &str) -> std::vec::IntoIter<String> {
    object
        .and_then(|o| o.get(key))
        .and_then(Value::as_array)
        .unwrap_or_default()
        .iter()
        .filter_map(Value::as_str)
        .map(str::to_owned)
        .collect::<Vec<_>>()
        .into_iter()
}

fn to_slash(path: &Path) -> String {
    let mut out = String::new();
    for component in path.components() {
        match component {
            Component::RootDir => out.push('/'),
            Component::CurDir => {}
            other => {
                if !out.is_empty() && !out.ends_with('/') {
                    out.push('/');
                }
                out.push_str(&other.as_os_str().to_string_lossy());
            }
        }
    }
    out
}

fn is_source_file(path: &Path) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext))
}

fn last_known_file_type(path: &Path) -> &'static str {
    match path.extension().and_then(OsStr::to_str) {
        Some("swift") => "sourcecode.swift",
        Some("m") => "sourcecode.c.objc",
        Some("mm") => "sourcecode.cpp.objcpp",
        Some("c") => "sourcecode.c.c",
        Some("cpp") => "sourcecode.cpp.cpp",
        Some("h") => "sourcecode.c.h",
        Some("storyboard") => "file.storyboard",
        Some("xib") => "file.xib",
        Some("plist") => "text.plist.xml",
        Some("json") => "text.json",
        Some("png") => "image.png",
        _ => "text",
    }
}

fn file_reference(path: &Path, reference_path: &str, source_tree: &str) -> Dict {
    let mut reference = Dict::new();
    reference.insert("isa".into(), Value::from("PBXFileReference"));
    reference.insert("fileEncoding".into(), Value::from("4"));
    reference.insert(
        "lastKnownFileType".into(),
        Value::from(last_known_file_type(path)),
    );
    if let Some(name) = path.file_name().and_then(OsStr::to_str) {
        reference.insert("name".into(), Value::from(name));
    }
    reference.insert("path".into(), Value::from(reference_path));
    reference.insert("sourceTree".into(), Value::from(source_tree));
    reference
}
