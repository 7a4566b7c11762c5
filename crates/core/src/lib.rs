//! firelancer-codegen-core - project-aware code generation for Firelancer
//! host projects
//!
//! This crate provides functionality to:
//! - Parse a host project's TypeScript sources and locate declarations by shape
//! - Execute the project's configuration module to obtain live values
//! - Generate migrations and schema type declarations, and edit config files
//!   without disturbing the rest of their text
pub mod bridge;
pub mod command;
pub mod config;
pub mod edit;
pub mod error;
pub mod locator;
pub mod migration;
pub mod parser;
pub mod project;
pub mod schema;
pub mod types;
pub mod utils;
pub mod writer;

// Re-export commonly used types and traits
pub use error::{Error, Result};
pub use types::*;

pub use bridge::{ExecutionContext, HostModuleExecutor, NodeHostExecutor, RuntimeConfigBridge};
pub use command::{CommandOptions, CommandOutcome, CommandRegistry, CommandResult, Decisions};
pub use config::{SettingsLoader, ToolSettings};
pub use locator::DeclarationLocator;
pub use migration::{HostMigrationEngine, MigrationEngine};
pub use project::{Project, ProjectLoader};
pub use writer::SourceWriter;
