//! Commands shipped with the tool

mod add_plugin;
mod analyze;
mod migrate;
mod schema_types;

pub use add_plugin::ADD_PLUGIN;
pub use analyze::ANALYZE;
pub use migrate::{GENERATE, REVERT, RUN};
pub use schema_types::SCHEMA_TYPES;

use super::registry::Command;

pub(crate) fn all() -> Vec<Command> {
    vec![GENERATE, RUN, REVERT, SCHEMA_TYPES, ADD_PLUGIN, ANALYZE]
}
