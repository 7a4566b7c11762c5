use anyhow::Result;
use firelancer_codegen_core::command::CommandArgs;

use super::session::Session;
use crate::display::formatter::print_outcome;

pub fn add_plugin_command(session: &Session, plugin: Option<String>) -> Result<()> {
    let outcome = session.run(
        "plugin:add-to-config",
        CommandArgs {
            plugin_name: plugin,
            ..CommandArgs::default()
        },
    )?;
    print_outcome(&outcome);
    Ok(())
}
