use super::{
    context::ExecutionContext,
    dotenv::{load_dotenv, retain_unset},
    host::{HostAction, HostModuleExecutor, HostModuleRequest, needs_transpile},
};
use crate::{
    config::ToolSettings,
    error::Result,
    locator::ConfigRef,
    project::CompilerConfig,
};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// The live configuration value produced by executing the host
/// configuration module.
///
/// Fetched fresh for every command that needs it. Nothing guarantees it
/// matches what static analysis saw in the source.
#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeConfig(Value);

impl RuntimeConfig {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    /// First entry of `dbConnectionOptions.migrations`, when it is a string
    pub fn migrations_hint(&self) -> Option<&str> {
        self.0
            .pointer("/dbConnectionOptions/migrations")?
            .as_array()?
            .first()?
            .as_str()
    }
}

/// A located configuration module, detached from the project it was found in
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigModule {
    pub module_path: PathBuf,
    pub export_name: String,
    /// Root used for module resolution and the env file
    pub project_dir: PathBuf,
    pub tsconfig: Option<PathBuf>,
    pub compiler_options: Option<Value>,
    pub base_url: Option<PathBuf>,
    pub paths: BTreeMap<String, Vec<String>>,
}

impl ConfigModule {
    pub fn from_ref(config: &ConfigRef<'_>, compiler_config: Option<&CompilerConfig>) -> Self {
        let project_dir = compiler_config
            .map(|c| c.base_dir.clone())
            .unwrap_or_else(|| config.directory().to_path_buf());
        Self {
            module_path: config.module_path().to_path_buf(),
            export_name: config.variable_name().to_string(),
            tsconfig: compiler_config.map(|c| c.path.clone()),
            compiler_options: compiler_config
                .map(|c| Value::Object(c.compiler_options.for_transpilation())),
            base_url: compiler_config.map(|c| c.base_url().unwrap_or_else(|| c.base_dir.clone())),
            paths: compiler_config
                .map(|c| c.compiler_options.paths())
                .unwrap_or_default(),
            project_dir,
        }
    }

    pub fn directory(&self) -> &Path {
        self.module_path.parent().unwrap_or_else(|| Path::new(""))
    }
}

/// Executes configuration modules through a [`HostModuleExecutor`]
pub struct RuntimeConfigBridge<'a> {
    executor: &'a dyn HostModuleExecutor,
    context: ExecutionContext,
    env_file: String,
    framework_package: String,
}

impl<'a> RuntimeConfigBridge<'a> {
    pub fn new(
        executor: &'a dyn HostModuleExecutor,
        context: ExecutionContext,
        settings: &ToolSettings,
    ) -> Self {
        Self {
            executor,
            context,
            env_file: settings.env_file.clone(),
            framework_package: settings.framework_package.clone(),
        }
    }

    /// Obtain the live configuration value
    pub fn load(&self, module: &ConfigModule) -> Result<RuntimeConfig> {
        self.execute(module, HostAction::Export).map(RuntimeConfig)
    }

    pub fn execute(&self, module: &ConfigModule, action: HostAction) -> Result<Value> {
        let request = self.request(module, action)?;
        self.executor.execute(&request)
    }

    pub fn request(&self, module: &ConfigModule, action: HostAction) -> Result<HostModuleRequest> {
        let loaded = load_dotenv(&module.project_dir.join(&self.env_file))?;
        let mut env = retain_unset(loaded, |key| std::env::var_os(key).is_some());
        env.extend(self.context.child_env());

        let transpile = needs_transpile(&module.module_path);
        debug!(
            "Prepared {} request for {} (transpile: {})",
            action.label(),
            module.module_path.display(),
            transpile
        );

        Ok(HostModuleRequest {
            tsconfig: module.tsconfig.clone(),
            project_dir: module.project_dir.clone(),
            module_path: module.module_path.clone(),
            export_name: module.export_name.clone(),
            action,
            env,
            transpile,
            compiler_options: module.compiler_options.clone(),
            base_url: module.base_url.clone(),
            paths: module.paths.clone(),
            framework_package: self.framework_package.clone(),
        })
    }
}
