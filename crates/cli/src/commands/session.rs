use anyhow::{Context, Result};
use firelancer_codegen_core::{
    CommandOutcome, CommandRegistry, ExecutionContext, HostMigrationEngine, NodeHostExecutor,
    RuntimeConfigBridge, SettingsLoader, ToolSettings,
    command::{AcceptDefaults, CommandArgs, CommandOptions, Decisions},
};
use std::path::PathBuf;
use tracing::debug;

use crate::cli::GlobalArgs;
use crate::prompt::TerminalDecisions;

/// One invocation of the tool against one host project
pub struct Session {
    pub project_root: PathBuf,
    pub tsconfig: Option<PathBuf>,
    pub settings: ToolSettings,
    decisions: Box<dyn Decisions>,
}

impl Session {
    pub fn from_args(global: &GlobalArgs) -> Result<Self> {
        let project_root = match &global.project {
            Some(dir) => dir.clone(),
            None => std::env::current_dir().context("Failed to get current directory")?,
        };
        let project_root = project_root
            .canonicalize()
            .with_context(|| format!("Project directory {} not found", project_root.display()))?;

        let settings = SettingsLoader::load_from_path(&project_root)
            .with_context(|| format!("Failed to load settings for {}", project_root.display()))?;
        debug!("Settings: {:?}", settings);

        let decisions: Box<dyn Decisions> = if global.yes {
            Box::new(AcceptDefaults)
        } else {
            Box::new(TerminalDecisions::stdio())
        };

        Ok(Self {
            project_root,
            tsconfig: global.tsconfig.clone(),
            settings,
            decisions,
        })
    }

    pub fn decisions(&self) -> &dyn Decisions {
        self.decisions.as_ref()
    }

    /// Run a registered command with the Node.js host executor
    pub fn run(&self, id: &str, args: CommandArgs) -> Result<CommandOutcome> {
        let context = ExecutionContext::cli();
        let executor = NodeHostExecutor::new(self.settings.node_binary.clone());
        let engine = HostMigrationEngine::new(RuntimeConfigBridge::new(
            &executor,
            context,
            &self.settings,
        ));
        let options = CommandOptions {
            project_root: self.project_root.clone(),
            tsconfig: self.tsconfig.clone(),
            settings: &self.settings,
            context,
            executor: &executor,
            engine: &engine,
            decisions: self.decisions(),
            args,
        };

        CommandRegistry::builtin()
            .run(id, &options)
            .with_context(|| format!("Command {id} failed"))
    }
}
