use crate::{
    error::{Error, Result},
    locator::ConfigSearchOptions,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings of the tool itself, read from `.firelancer-cli.json`.
///
/// Every field has a default so a partial file only overrides what it names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ToolSettings {
    /// Type the canonical configuration variable is declared as
    pub config_type_name: String,
    /// File name suffix of the canonical configuration file
    pub config_file_suffix: String,
    /// Directories searched when no canonical file declares the config
    pub config_fallback_dirs: Vec<String>,
    pub plugin_decorator: String,
    pub entity_decorator: String,
    pub service_decorator: String,
    pub service_directory_suffix: String,
    pub translatable_interface: String,
    pub migration_interface: String,
    /// Node.js binary used to execute host modules
    pub node_binary: String,
    /// Package exposing the framework's schema and migration entry points
    pub framework_package: String,
    /// Name of the environment file loaded before executing host modules
    pub env_file: String,
    pub admin_types_file: String,
    pub shop_types_file: String,
}

impl Default for ToolSettings {
    fn default() -> Self {
        let search = ConfigSearchOptions::default();
        Self {
            config_type_name: search.config_type_name,
            config_file_suffix: search.file_suffix,
            config_fallback_dirs: search.fallback_dirs,
            plugin_decorator: "FirelancerPlugin".to_string(),
            entity_decorator: "Entity".to_string(),
            service_decorator: "Injectable".to_string(),
            service_directory_suffix: "services".to_string(),
            translatable_interface: "Translatable".to_string(),
            migration_interface: "MigrationInterface".to_string(),
            node_binary: "node".to_string(),
            framework_package: "@firelancer/core".to_string(),
            env_file: ".env".to_string(),
            admin_types_file: "generated-admin-types.ts".to_string(),
            shop_types_file: "generated-shop-types.ts".to_string(),
        }
    }
}

impl ToolSettings {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        serde_json::from_str(&contents).map_err(|e| {
            Error::Parse(format!("Failed to parse {}: {e}", path.display()))
        })
    }

    pub fn config_search_options(&self) -> ConfigSearchOptions {
        ConfigSearchOptions {
            config_type_name: self.config_type_name.clone(),
            file_suffix: self.config_file_suffix.clone(),
            check_file_name: true,
            fallback_dirs: self.config_fallback_dirs.clone(),
        }
    }

    /// Overlay the fields present in `layer` (a partial settings object)
    pub fn merge_json(&mut self, layer: &serde_json::Value) -> Result<()> {
        let mut current = serde_json::to_value(&*self)?;
        if let (Some(target), Some(source)) = (current.as_object_mut(), layer.as_object()) {
            for (key, value) in source {
                target.insert(key.clone(), value.clone());
            }
        }
        *self = serde_json::from_value(current)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let settings: ToolSettings =
            serde_json::from_str(r#"{ "pluginDecorator": "AppPlugin" }"#).unwrap();
        assert_eq!(settings.plugin_decorator, "AppPlugin");
        assert_eq!(settings.entity_decorator, "Entity");
        assert_eq!(settings.config_file_suffix, "firelancer-config.ts");
    }

    #[test]
    fn test_merge_json_overrides_named_fields() {
        let mut settings = ToolSettings::default();
        settings
            .merge_json(&json!({ "nodeBinary": "/usr/local/bin/node", "envFile": ".env.local" }))
            .unwrap();
        assert_eq!(settings.node_binary, "/usr/local/bin/node");
        assert_eq!(settings.env_file, ".env.local");
        assert_eq!(settings.migration_interface, "MigrationInterface");
    }

    #[test]
    fn test_search_options_follow_settings() {
        let settings = ToolSettings {
            config_type_name: "AppConfig".to_string(),
            ..ToolSettings::default()
        };
        let options = settings.config_search_options();
        assert_eq!(options.config_type_name, "AppConfig");
        assert_eq!(options.fallback_dirs, vec!["src", "src/config"]);
    }
}
