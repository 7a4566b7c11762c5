//! Bridge from static analysis to live values computed by host code

pub mod context;
pub mod dotenv;
pub mod host;
pub mod node;
pub mod runtime_config;

pub use context::{ExecutionContext, RUNNING_IN_CLI_ENV};
pub use dotenv::{load_dotenv, parse_dotenv, retain_unset};
pub use host::{HostAction, HostModuleExecutor, HostModuleRequest, needs_transpile};
pub use node::NodeHostExecutor;
pub use runtime_config::{ConfigModule, RuntimeConfig, RuntimeConfigBridge};
