use anyhow::Result;
use firelancer_codegen_core::{CommandOutcome, command::CommandArgs};

use super::session::Session;
use crate::display::formatter::{print_analysis, print_cancelled};

pub fn analyze_command(session: &Session, json: bool) -> Result<()> {
    let outcome = session.run("project:analyze", CommandArgs::default())?;
    match &outcome {
        CommandOutcome::Completed(result) if json => {
            println!("{}", serde_json::to_string_pretty(result)?);
        }
        CommandOutcome::Completed(result) => print_analysis(result),
        CommandOutcome::Cancelled { reason } => print_cancelled(reason),
    }
    Ok(())
}
