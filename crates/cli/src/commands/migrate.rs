use anyhow::Result;
use firelancer_codegen_core::command::{Choice, CommandArgs};

use super::session::Session;
use crate::cli::MigrateAction;
use crate::display::formatter::{print_cancelled, print_outcome};

pub fn migrate_command(session: &Session, action: Option<MigrateAction>) -> Result<()> {
    let action = match action {
        Some(action) => action,
        None => {
            let options = vec![
                "Generate a new migration".to_string(),
                "Run pending migrations".to_string(),
                "Revert the last migration".to_string(),
            ];
            match session
                .decisions()
                .choose("What would you like to do?", &options, false)?
            {
                Choice::Selected(0) => MigrateAction::Generate { name: None },
                Choice::Selected(1) => MigrateAction::Run,
                Choice::Selected(_) => MigrateAction::Revert,
                Choice::Other(_) | Choice::Cancelled => {
                    print_cancelled("no migration action selected");
                    return Ok(());
                }
            }
        }
    };

    let args = CommandArgs {
        migration_name: match &action {
            MigrateAction::Generate { name } => name.clone(),
            _ => None,
        },
        ..CommandArgs::default()
    };
    let outcome = session.run(action.command_id(), args)?;
    print_outcome(&outcome);
    Ok(())
}
