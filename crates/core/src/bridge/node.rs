use super::host::{HostModuleExecutor, HostModuleRequest};
use crate::error::{Error, Result};
use serde::Deserialize;
use serde_json::Value;
use std::process::{Command, Stdio};
use tracing::{debug, info};

const HARNESS: &str = include_str!("harness.js");
const REQUEST_ENV: &str = "FIRELANCER_HOST_REQUEST";
const RESULT_MARKER: &str = "__FIRELANCER_RESULT__";
const ERROR_MARKER: &str = "__FIRELANCER_ERROR__";

#[derive(Debug, Deserialize)]
struct HostError {
    code: String,
    message: String,
}

/// Executes host modules with Node.js and an embedded harness script
#[derive(Debug, Clone)]
pub struct NodeHostExecutor {
    node_binary: String,
}

impl NodeHostExecutor {
    pub fn new(node_binary: impl Into<String>) -> Self {
        Self {
            node_binary: node_binary.into(),
        }
    }

    pub fn node_binary(&self) -> &str {
        &self.node_binary
    }
}

impl HostModuleExecutor for NodeHostExecutor {
    fn execute(&self, request: &HostModuleRequest) -> Result<Value> {
        info!(
            "Executing {} ({}) with {}",
            request.module_path.display(),
            request.action.label(),
            self.node_binary
        );

        let mut command = Command::new(&self.node_binary);
        command
            .arg("-e")
            .arg(HARNESS)
            .current_dir(&request.project_dir)
            .env(REQUEST_ENV, serde_json::to_string(request)?)
            .stdin(Stdio::null());
        for (key, value) in &request.env {
            command.env(key, value);
        }

        let output = command.output().map_err(|e| {
            Error::HostExecution(format!("failed to start `{}`: {e}", self.node_binary))
        })?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        debug!("Host process exited with {}", output.status);
        if !stderr.trim().is_empty() {
            debug!("Host stderr:\n{}", stderr);
        }

        match parse_output(&stdout, request)? {
            Some(value) => Ok(value),
            None => Err(Error::HostExecution(format!(
                "no result from host process ({}){}",
                output.status,
                stderr_tail(&stderr)
            ))),
        }
    }
}

/// Find the marked result or error line, forwarding other output to the log
fn parse_output(stdout: &str, request: &HostModuleRequest) -> Result<Option<Value>> {
    for line in stdout.lines() {
        if let Some(payload) = line.strip_prefix(RESULT_MARKER) {
            return Ok(Some(serde_json::from_str(payload.trim())?));
        }
        if let Some(payload) = line.strip_prefix(ERROR_MARKER) {
            let error: HostError = serde_json::from_str(payload.trim())?;
            return Err(match error.code.as_str() {
                "EXPORT_NOT_FOUND" => Error::ConfigExportNotFound {
                    export_name: request.export_name.clone(),
                    module_path: request.module_path.clone(),
                },
                _ => Error::HostExecution(error.message),
            });
        }
        debug!("host: {}", line);
    }
    Ok(None)
}

fn stderr_tail(stderr: &str) -> String {
    let lines: Vec<&str> = stderr.lines().filter(|l| !l.trim().is_empty()).collect();
    if lines.is_empty() {
        return String::new();
    }
    let start = lines.len().saturating_sub(5);
    format!(": {}", lines[start..].join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::HostAction;
    use serde_json::json;
    use std::collections::BTreeMap;
    use std::path::PathBuf;

    fn request() -> HostModuleRequest {
        HostModuleRequest {
            tsconfig: Some(PathBuf::from("/app/tsconfig.json")),
            project_dir: PathBuf::from("/app"),
            module_path: PathBuf::from("/app/src/firelancer-config.ts"),
            export_name: "config".to_string(),
            action: HostAction::Export,
            env: BTreeMap::new(),
            transpile: true,
            compiler_options: None,
            base_url: None,
            paths: BTreeMap::new(),
            framework_package: "@firelancer/core".to_string(),
        }
    }

    #[test]
    fn test_result_line_after_host_output() {
        let stdout = "Connecting...\n__FIRELANCER_RESULT__ {\"apiOptions\":{\"port\":3000}}\n";
        let value = parse_output(stdout, &request()).unwrap();
        assert_eq!(value, Some(json!({ "apiOptions": { "port": 3000 } })));
    }

    #[test]
    fn test_export_not_found_line() {
        let stdout = "__FIRELANCER_ERROR__ {\"code\":\"EXPORT_NOT_FOUND\",\"message\":\"missing\"}\n";
        match parse_output(stdout, &request()) {
            Err(Error::ConfigExportNotFound {
                export_name,
                module_path,
            }) => {
                assert_eq!(export_name, "config");
                assert_eq!(module_path, PathBuf::from("/app/src/firelancer-config.ts"));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_host_error_line() {
        let stdout = "__FIRELANCER_ERROR__ {\"code\":\"HOST_ERROR\",\"message\":\"boom\"}\n";
        assert!(matches!(
            parse_output(stdout, &request()),
            Err(Error::HostExecution(message)) if message == "boom"
        ));
    }

    #[test]
    fn test_no_marker() {
        assert_eq!(parse_output("just logs\n", &request()).unwrap(), None);
    }

    #[test]
    fn test_request_env_is_not_serialized() {
        let mut request = request();
        request
            .env
            .insert("DB_PASSWORD".to_string(), "secret".to_string());
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("env").is_none());
        assert_eq!(json["exportName"], "config");
        assert_eq!(json["action"], json!({ "kind": "export" }));
    }

    #[test]
    fn test_stderr_tail() {
        assert_eq!(stderr_tail("\n\n"), "");
        assert_eq!(stderr_tail("a\nb\n"), ": a\nb");
    }
}
