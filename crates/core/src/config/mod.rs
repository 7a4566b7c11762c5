//! Settings of the tool itself

pub mod loader;
pub mod settings;

pub use loader::{NODE_BINARY_ENV, SETTINGS_FILE_NAME, SettingsLoader};
pub use settings::ToolSettings;
