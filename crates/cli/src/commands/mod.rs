pub mod add_plugin;
pub mod analyze;
pub mod list;
pub mod migrate;
pub mod schema_types;
pub mod session;

pub use add_plugin::add_plugin_command;
pub use analyze::analyze_command;
pub use list::list_commands;
pub use migrate::migrate_command;
pub use schema_types::generate_schema_types_command;
pub use session::Session;

use anyhow::Result;

use crate::cli::{Cli, Commands};

pub fn execute(cli: Cli) -> Result<()> {
    if let Commands::Commands = cli.command {
        list_commands();
        return Ok(());
    }

    let session = Session::from_args(&cli.global)?;
    match cli.command {
        Commands::Migrate { action } => migrate_command(&session, action),
        Commands::GenerateSchemaTypes { output_dir } => {
            generate_schema_types_command(&session, output_dir)
        }
        Commands::AddPlugin { plugin } => add_plugin_command(&session, plugin),
        Commands::Analyze { json } => analyze_command(&session, json),
        Commands::Commands => Ok(()),
    }
}
