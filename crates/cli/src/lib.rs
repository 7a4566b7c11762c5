pub mod cli;
pub mod commands;
pub mod display;
pub mod prompt;

// Re-export commonly used items
pub use cli::{Cli, Commands, GlobalArgs, MigrateAction};
