use anyhow::Result;
use firelancer_codegen_core::command::CommandArgs;
use std::path::PathBuf;

use super::session::Session;
use crate::display::formatter::print_outcome;

pub fn generate_schema_types_command(session: &Session, output_dir: Option<PathBuf>) -> Result<()> {
    let outcome = session.run(
        "codegen:schema-types",
        CommandArgs {
            output_dir,
            ..CommandArgs::default()
        },
    )?;
    print_outcome(&outcome);
    Ok(())
}
