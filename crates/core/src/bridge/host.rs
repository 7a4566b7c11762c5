//! Execution of host project modules

use crate::error::Result;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// What to do with the loaded configuration module
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum HostAction {
    /// Return the exported configuration value
    Export,
    /// Introspect the schema sets of one API surface
    #[serde(rename_all = "camelCase")]
    Schemas { api_type: String },
    /// Compute the pending schema changes
    MigrationDiff { name: String },
    MigrationRun,
    MigrationRevert,
}

impl HostAction {
    pub fn label(&self) -> &'static str {
        match self {
            HostAction::Export => "export",
            HostAction::Schemas { .. } => "schemas",
            HostAction::MigrationDiff { .. } => "migration-diff",
            HostAction::MigrationRun => "migration-run",
            HostAction::MigrationRevert => "migration-revert",
        }
    }
}

/// Everything needed to execute one host module in a child process
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HostModuleRequest {
    /// Compiler configuration of the host project, when known
    pub tsconfig: Option<PathBuf>,
    /// Directory module resolution starts from
    pub project_dir: PathBuf,
    pub module_path: PathBuf,
    pub export_name: String,
    pub action: HostAction,
    /// Extra child environment
    #[serde(skip)]
    pub env: BTreeMap<String, String>,
    /// Whether the module has to be transpiled on the fly
    pub transpile: bool,
    /// Compiler options used for transpilation
    pub compiler_options: Option<Value>,
    /// Path alias base directory and mappings
    pub base_url: Option<PathBuf>,
    pub paths: BTreeMap<String, Vec<String>>,
    /// Package providing schema and migration entry points
    pub framework_package: String,
}

/// Runs a host module and returns the plain data it produced.
///
/// Implementations may execute arbitrary host code.
pub trait HostModuleExecutor {
    fn execute(&self, request: &HostModuleRequest) -> Result<Value>;
}

impl<T: HostModuleExecutor + ?Sized> HostModuleExecutor for &T {
    fn execute(&self, request: &HostModuleRequest) -> Result<Value> {
        (**self).execute(request)
    }
}

/// TypeScript sources need on-the-fly compilation, JavaScript does not
pub fn needs_transpile(module_path: &Path) -> bool {
    !matches!(
        module_path.extension().and_then(|e| e.to_str()),
        Some("js" | "cjs" | "mjs")
    )
}
