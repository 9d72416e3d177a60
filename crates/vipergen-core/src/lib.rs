//! vipergen Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the vipergen
//! VIPER module generator, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           vipergen-cli (CLI)            │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │    (InitService, AddModuleService)      │
//! │         Orchestrates Use Cases          │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (Filesystem, TemplateRenderer, Manifest)│
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    vipergen-adapters (Infrastructure)   │
//! │ (LocalFilesystem, Handlebars, pbxproj)  │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (ModulePlan, EffectiveConfig, Layout)   │
//! │         No External Dependencies        │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use vipergen_core::prelude::*;
//!
//! let config = resolve(&ConfigDefaults::for_project("App"), &persisted, &[])?;
//! let service = AddModuleService::new(filesystem, module_templates, manifests);
//! let module = ModuleName::parse("Login")?;
//! service.add_module(&config, "App.xcodeproj".as_ref(), &module, None)?;
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        AddModuleService, ApplicationError, GeneratedFile, InitReport, InitService, ModuleReport,
        ports::{Filesystem, ManifestLoader, ProjectManifest, TemplateRenderer},
    };
    pub use crate::domain::{
        ConfigDefaults, DomainError, EffectiveConfig, GroupId, ModuleName, ModulePlan, PartKind,
        PersistedConfig, ProjectLayout, Registration, RenderContext, TargetSelection, TemplateId,
        TemplatesDir, resolve,
    };
    pub use crate::error::{ErrorCategory, ViperError, ViperResult};
}
