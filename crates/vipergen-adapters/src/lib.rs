//! Infrastructure adapters for vipergen.
//!
//! This crate implements the ports defined in `vipergen-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod builtin_templates;
pub mod config_store;
pub mod filesystem;
pub mod manifest;
pub mod renderer;

// Re-export commonly used adapters
pub use builtin_templates::{common_templates, module_templates};
pub use config_store::{DEFAULT_CONFIG_FILE, YamlConfigStore};
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use manifest::{PBXPROJ_FILE, PbxprojLoader, PbxprojManifest};
pub use renderer::HandlebarsRenderer;
