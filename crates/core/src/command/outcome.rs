use crate::project::ProjectHandle;
use serde::Serialize;
use serde_json::Value;
use std::path::PathBuf;

/// Side effects of a completed command
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandResult {
    pub project: ProjectHandle,
    /// Every file created or modified, in write order
    pub modified_source_files: Vec<PathBuf>,
    /// Command-specific data
    pub payload: Value,
}

impl CommandResult {
    pub fn new(project: ProjectHandle, modified_source_files: Vec<PathBuf>, payload: Value) -> Self {
        Self {
            project,
            modified_source_files,
            payload,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum CommandOutcome {
    Completed(CommandResult),
    /// The operator cancelled a decision. Nothing was written.
    Cancelled { reason: String },
}

impl CommandOutcome {
    pub fn cancelled(reason: impl Into<String>) -> Self {
        CommandOutcome::Cancelled {
            reason: reason.into(),
        }
    }

    pub fn result(&self) -> Option<&CommandResult> {
        match self {
            CommandOutcome::Completed(result) => Some(result),
            CommandOutcome::Cancelled { .. } => None,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, CommandOutcome::Cancelled { .. })
    }
}
