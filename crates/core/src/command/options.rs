use super::decisions::Decisions;
use crate::{
    bridge::{ExecutionContext, HostModuleExecutor, RuntimeConfigBridge},
    config::ToolSettings,
    migration::MigrationEngine,
};
use std::path::PathBuf;

/// Arguments only some commands use
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandArgs {
    /// Description used to name a new migration
    pub migration_name: Option<String>,
    /// Where generated schema types are written, relative to the project root
    pub output_dir: Option<PathBuf>,
    /// Class name of the plugin to register
    pub plugin_name: Option<String>,
}

/// Everything a command run needs from its caller
pub struct CommandOptions<'a> {
    /// Directory the host project lives in
    pub project_root: PathBuf,
    /// Compiler configuration to use instead of discovering one
    pub tsconfig: Option<PathBuf>,
    pub settings: &'a ToolSettings,
    pub context: ExecutionContext,
    pub executor: &'a dyn HostModuleExecutor,
    pub engine: &'a dyn MigrationEngine,
    pub decisions: &'a dyn Decisions,
    pub args: CommandArgs,
}

impl<'a> CommandOptions<'a> {
    pub fn bridge(&self) -> RuntimeConfigBridge<'a> {
        RuntimeConfigBridge::new(self.executor, self.context, self.settings)
    }
}
