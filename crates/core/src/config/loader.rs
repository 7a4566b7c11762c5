//! Layered loading of `.firelancer-cli.json` settings files

use super::settings::ToolSettings;
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

pub const SETTINGS_FILE_NAME: &str = ".firelancer-cli.json";

/// Environment variable overriding the Node.js binary
pub const NODE_BINARY_ENV: &str = "FIRELANCER_NODE";

pub struct SettingsLoader;

impl SettingsLoader {
    /// Load settings for a project rooted at `path`.
    ///
    /// Settings files are collected walking up to the filesystem root and
    /// applied outermost first, so the file closest to the project wins.
    /// Environment overrides are applied last.
    pub fn load_from_path(path: &Path) -> Result<ToolSettings> {
        let mut settings = ToolSettings::default();

        let files = Self::find_settings_files(path);
        tracing::debug!("Found {} settings files", files.len());

        for file in files.iter().rev() {
            tracing::debug!("Applying settings from {:?}", file);
            let contents = std::fs::read_to_string(file)?;
            let layer: serde_json::Value = serde_json::from_str(&contents)
                .map_err(|e| Error::Parse(format!("Failed to parse {}: {e}", file.display())))?;
            settings.merge_json(&layer)?;
        }

        Self::apply_env_overrides(&mut settings, |key| std::env::var(key).ok());
        Ok(settings)
    }

    /// Settings files from `start` upwards, innermost first
    pub fn find_settings_files(start: &Path) -> Vec<PathBuf> {
        let mut found = Vec::new();
        let mut current = Some(start);
        while let Some(dir) = current {
            let candidate = dir.join(SETTINGS_FILE_NAME);
            if candidate.is_file() {
                found.push(candidate);
            }
            current = dir.parent();
        }
        found
    }

    pub fn apply_env_overrides(
        settings: &mut ToolSettings,
        lookup: impl Fn(&str) -> Option<String>,
    ) {
        if let Some(node) = lookup(NODE_BINARY_ENV).filter(|v| !v.trim().is_empty()) {
            tracing::debug!("Using node binary from {}: {}", NODE_BINARY_ENV, node);
            settings.node_binary = node;
        }
    }
}
