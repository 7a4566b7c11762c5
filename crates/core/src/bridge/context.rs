/// Environment variable telling host code it is being executed by the tool
pub const RUNNING_IN_CLI_ENV: &str = "FIRELANCER_RUNNING_IN_CLI";

/// How host modules are being executed.
///
/// Passed explicitly to the bridge and turned into child process
/// environment. The tool's own environment is never modified.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExecutionContext {
    pub running_in_cli: bool,
}

impl ExecutionContext {
    pub fn cli() -> Self {
        Self {
            running_in_cli: true,
        }
    }

    /// Variables added to the child environment
    pub fn child_env(&self) -> Vec<(String, String)> {
        if self.running_in_cli {
            vec![(RUNNING_IN_CLI_ENV.to_string(), "true".to_string())]
        } else {
            Vec::new()
        }
    }
}
