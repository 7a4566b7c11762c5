use crate::{
    bridge::{ConfigModule, HostAction, RuntimeConfigBridge},
    error::{Error, Result},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

/// Statements bringing the database schema in line with the entities
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaDiff {
    #[serde(default)]
    pub up: Vec<String>,
    #[serde(default)]
    pub down: Vec<String>,
}

impl SchemaDiff {
    pub fn is_empty(&self) -> bool {
        self.up.is_empty()
    }
}

/// The external migration engine: diffing, running and reverting
/// migrations for the project configured by a [`ConfigModule`]
pub trait MigrationEngine {
    /// `None` when the schema is already up to date
    fn generate_diff(&self, module: &ConfigModule, name: &str) -> Result<Option<SchemaDiff>>;

    /// Names of the migrations that were executed
    fn run_pending(&self, module: &ConfigModule) -> Result<Vec<String>>;

    /// Name of the reverted migration, if any was applied
    fn revert_last(&self, module: &ConfigModule) -> Result<Option<String>>;
}

/// [`MigrationEngine`] backed by the framework's migration entry points,
/// executed in the host project
pub struct HostMigrationEngine<'a> {
    bridge: RuntimeConfigBridge<'a>,
}

impl<'a> HostMigrationEngine<'a> {
    pub fn new(bridge: RuntimeConfigBridge<'a>) -> Self {
        Self { bridge }
    }
}

impl MigrationEngine for HostMigrationEngine<'_> {
    fn generate_diff(&self, module: &ConfigModule, name: &str) -> Result<Option<SchemaDiff>> {
        let value = self.bridge.execute(
            module,
            HostAction::MigrationDiff {
                name: name.to_string(),
            },
        )?;
        let diff = parse_diff(value)?;
        info!(
            "Schema diff: {} statements",
            diff.as_ref().map(|d| d.up.len()).unwrap_or(0)
        );
        Ok(diff)
    }

    fn run_pending(&self, module: &ConfigModule) -> Result<Vec<String>> {
        let value = self.bridge.execute(module, HostAction::MigrationRun)?;
        parse_names(value)
    }

    fn revert_last(&self, module: &ConfigModule) -> Result<Option<String>> {
        let value = self.bridge.execute(module, HostAction::MigrationRevert)?;
        match value {
            Value::Null => Ok(None),
            Value::String(name) => Ok(Some(name)),
            Value::Object(ref map) => Ok(map.get("name").and_then(Value::as_str).map(str::to_string)),
            other => Err(unexpected("revert", &other)),
        }
    }
}

fn parse_diff(value: Value) -> Result<Option<SchemaDiff>> {
    if value.is_null() {
        return Ok(None);
    }
    let diff: SchemaDiff = serde_json::from_value(value)?;
    Ok((!diff.is_empty()).then_some(diff))
}

fn parse_names(value: Value) -> Result<Vec<String>> {
    match value {
        Value::Null => Ok(Vec::new()),
        Value::Array(items) => Ok(items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(name) => Some(name),
                Value::Object(map) => map.get("name").and_then(Value::as_str).map(str::to_string),
                _ => None,
            })
            .collect()),
        other => Err(unexpected("run", &other)),
    }
}

fn unexpected(operation: &str, value: &Value) -> Error {
    Error::HostExecution(format!("unexpected {operation} result from host: {value}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_diff() {
        assert_eq!(parse_diff(Value::Null).unwrap(), None);
        assert_eq!(parse_diff(json!({ "up": [], "down": [] })).unwrap(), None);
        assert_eq!(
            parse_diff(json!({ "up": ["CREATE TABLE a"], "down": ["DROP TABLE a"] })).unwrap(),
            Some(SchemaDiff {
                up: vec!["CREATE TABLE a".to_string()],
                down: vec!["DROP TABLE a".to_string()],
            })
        );
    }

    #[test]
    fn test_parse_names() {
        assert_eq!(
            parse_names(json!(["Init1", { "name": "More2" }, 3])).unwrap(),
            vec!["Init1", "More2"]
        );
        assert!(parse_names(Value::Null).unwrap().is_empty());
        assert!(matches!(
            parse_names(json!("oops")),
            Err(Error::HostExecution(_))
        ));
    }
}
