// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for vipergen.
//!
//! This module contains pure logic with no I/O. Filesystem, templates and
//! the project manifest are reached through ports defined in the
//! application layer.
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: Paths are computed, never touched
//! - **Immutable values**: Configs, plans and contexts are built once
//!
// Public API - what the world sees
pub mod entities;
pub mod error;

// Re-exports for convenience
pub use entities::{
    config::{
        ConfigDefaults, DEFAULT_AUTHOR, DEFAULT_BASE_VIEW_CONTROLLER, DEFAULT_CONTROLLERS_GROUP,
        EffectiveConfig, PersistedConfig, TEMPLATES_SENTINEL, TemplatesDir, resolve,
    },
    layout::{COMMON_GROUP, ProjectLayout, project_name},
    manifest::{GroupId, Registration, TargetSelection},
    module::{DEFAULT_STORYBOARD, ModuleName, ModulePlan, PlannedPart, ScaffoldPlanner},
    part::{PartKind, SOURCE_EXTENSION},
    template::{RenderContext, TemplateId},
};

pub use error::{DomainError, ErrorCategory};
