//! Commands: named units of work with a uniform result contract

pub mod builtin;
pub mod decisions;
pub mod options;
pub mod outcome;
pub mod registry;
pub mod support;

pub use decisions::{AcceptDefaults, Choice, Decisions};
pub use options::{CommandArgs, CommandOptions};
pub use outcome::{CommandOutcome, CommandResult};
pub use registry::{Command, CommandRegistry, RunFn};
