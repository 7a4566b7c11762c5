use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "firelancer")]
#[command(version, about = "Project-aware code generation for Firelancer applications", long_about = None)]
#[command(propagate_version = true, arg_required_else_help = true)]
#[command(after_help = "ENVIRONMENT:\n    RUST_LOG=debug       Enable debug logging\n    FIRELANCER_NODE      Node.js binary used to execute project code")]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Host project directory (defaults to the current directory)
    #[arg(long, global = true, value_name = "DIR")]
    pub project: Option<PathBuf>,

    /// Compiler configuration to use instead of discovering one
    #[arg(long, global = true, value_name = "FILE")]
    pub tsconfig: Option<PathBuf>,

    /// Answer every question with its default (first candidate, default names)
    #[arg(short, long, global = true)]
    pub yes: bool,

    /// Show the cause chain of errors
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate, run or revert database migrations
    #[command(visible_alias = "m")]
    Migrate {
        #[command(subcommand)]
        action: Option<MigrateAction>,
    },
    /// Generate TypeScript types for the admin and shop API schemas
    GenerateSchemaTypes {
        /// Output directory, relative to the project root
        #[arg(short, long, value_name = "DIR")]
        output_dir: Option<PathBuf>,
    },
    /// Import a plugin class and add it to the config's plugins array
    AddPlugin {
        /// Class name of the plugin (asked for when omitted)
        plugin: Option<String>,
    },
    /// Report the config, plugins, entities, services and migrations
    #[command(visible_alias = "a")]
    Analyze {
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the available commands
    Commands,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum MigrateAction {
    /// Generate a new migration from the pending schema changes
    Generate {
        /// Migration name (asked for when omitted)
        #[arg(short, long)]
        name: Option<String>,
    },
    /// Run all pending migrations
    Run,
    /// Revert the last applied migration
    Revert,
}

impl MigrateAction {
    pub fn command_id(&self) -> &'static str {
        match self {
            MigrateAction::Generate { .. } => "migrate:generate",
            MigrateAction::Run => "migrate:run",
            MigrateAction::Revert => "migrate:revert",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "firelancer",
            "migrate",
            "generate",
            "--name",
            "add reviews",
            "--project",
            "/app",
            "--yes",
        ])
        .unwrap();
        assert_eq!(cli.global.project, Some(PathBuf::from("/app")));
        assert!(cli.global.yes);
        match cli.command {
            Commands::Migrate {
                action: Some(MigrateAction::Generate { name }),
            } => assert_eq!(name.as_deref(), Some("add reviews")),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_migrate_without_action() {
        let cli = Cli::try_parse_from(["firelancer", "migrate"]).unwrap();
        assert!(matches!(cli.command, Commands::Migrate { action: None }));
    }
}
