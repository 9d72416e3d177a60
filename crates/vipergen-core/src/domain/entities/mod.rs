pub mod config;
pub mod layout;
pub mod manifest;
pub mod module;
pub mod part;
pub mod template;

pub use crate::domain::DomainError;
pub use config::EffectiveConfig;
pub use module::ModulePlan;
pub use part::PartKind;
