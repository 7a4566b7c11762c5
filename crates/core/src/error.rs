use std::io;
use std::path::PathBuf;

/// Errors that can occur while analyzing or generating code for a host project
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to load project: {0}")]
    ProjectLoad(String),

    #[error("Could not find the {type_name} declaration: {reason}")]
    ConfigNotFound { type_name: String, reason: String },

    #[error("Export `{export_name}` was not found in {}", module_path.display())]
    ConfigExportNotFound {
        export_name: String,
        module_path: PathBuf,
    },

    #[error("Schema generation error in `{schema}`: {message}")]
    SchemaGeneration { schema: String, message: String },

    #[error("Failed to write {}: {source}", path.display())]
    FileWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Host module execution failed: {0}")]
    HostExecution(String),

    #[error("Cannot apply edit to {}: {message}", path.display())]
    Edit { path: PathBuf, message: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Tree-sitter error: {0}")]
    TreeSitter(String),

    #[error("No {kind} named `{name}` was found")]
    DeclarationNotFound { kind: &'static str, name: String },

    #[error("Invalid name `{0}`")]
    InvalidName(String),

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Command `{0}` is already registered")]
    DuplicateCommand(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn config_not_found(type_name: &str, reason: impl Into<String>) -> Self {
        Error::ConfigNotFound {
            type_name: type_name.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn schema(schema: &str, message: impl Into<String>) -> Self {
        Error::SchemaGeneration {
            schema: schema.to_string(),
            message: message.into(),
        }
    }
}

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, Error>;
