//! `tsconfig.json` loading, including `extends` chains

use super::jsonc::strip_jsonc;
use crate::error::{Error, Result};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Compiler options that hold paths relative to the file that declares them
const PATH_OPTIONS: &[&str] = &["baseUrl", "outDir", "rootDir"];

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCompilerConfig {
    extends: Option<Value>,
    #[serde(default)]
    compiler_options: Map<String, Value>,
    files: Option<Vec<String>>,
    include: Option<Vec<String>>,
    exclude: Option<Vec<String>>,
}

/// The `compilerOptions` object, kept as raw JSON so it can be forwarded to
/// the host compiler unchanged
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompilerOptions {
    raw: Map<String, Value>,
}

impl CompilerOptions {
    pub fn from_json(raw: Map<String, Value>) -> Self {
        Self { raw }
    }

    pub fn as_json(&self) -> &Map<String, Value> {
        &self.raw
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.raw.get(key).and_then(Value::as_str)
    }

    pub fn base_url(&self) -> Option<&str> {
        self.get_str("baseUrl")
    }

    pub fn out_dir(&self) -> Option<&str> {
        self.get_str("outDir")
    }

    /// Path alias mappings (`compilerOptions.paths`)
    pub fn paths(&self) -> BTreeMap<String, Vec<String>> {
        let Some(Value::Object(paths)) = self.raw.get("paths") else {
            return BTreeMap::new();
        };
        paths
            .iter()
            .map(|(alias, targets)| {
                let targets = targets
                    .as_array()
                    .map(|items| {
                        items
                            .iter()
                            .filter_map(Value::as_str)
                            .map(str::to_string)
                            .collect()
                    })
                    .unwrap_or_default();
                (alias.clone(), targets)
            })
            .collect()
    }

    /// Options used when the host configuration module is transpiled on the
    /// fly: module and resolution forced to `nodenext`, everything else as
    /// the project declares it
    pub fn for_transpilation(&self) -> Map<String, Value> {
        let mut options = self.raw.clone();
        options.insert("module".into(), Value::String("nodenext".into()));
        options.insert("moduleResolution".into(), Value::String("nodenext".into()));
        options.remove("noEmit");
        options.remove("emitDeclarationOnly");
        options
    }

    fn merge_over(&mut self, parent: &CompilerOptions) {
        for (key, value) in &parent.raw {
            self.raw.entry(key.clone()).or_insert_with(|| value.clone());
        }
    }
}

/// A resolved compiler configuration
#[derive(Debug, Clone)]
pub struct CompilerConfig {
    pub path: PathBuf,
    pub base_dir: PathBuf,
    pub compiler_options: CompilerOptions,
    pub files: Option<Vec<String>>,
    pub include: Option<Vec<String>>,
    pub exclude: Option<Vec<String>>,
}

impl CompilerConfig {
    /// A configuration with no options, as if `path` contained `{}`
    pub fn with_defaults(path: &Path) -> Self {
        let base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        Self {
            path: path.to_path_buf(),
            base_dir,
            compiler_options: CompilerOptions::default(),
            files: None,
            include: None,
            exclude: None,
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let mut chain = Vec::new();
        Self::load_chain(path, &mut chain)
    }

    fn load_chain(path: &Path, chain: &mut Vec<PathBuf>) -> Result<Self> {
        if !path.is_file() {
            return Err(Error::ProjectLoad(format!(
                "compiler configuration {} does not exist",
                path.display()
            )));
        }
        let path = path.canonicalize().map_err(|e| {
            Error::ProjectLoad(format!("cannot resolve {}: {e}", path.display()))
        })?;
        if chain.contains(&path) {
            return Err(Error::ProjectLoad(format!(
                "circular `extends` chain through {}",
                path.display()
            )));
        }
        chain.push(path.clone());

        let contents = fs::read_to_string(&path)
            .map_err(|e| Error::ProjectLoad(format!("cannot read {}: {e}", path.display())))?;
        let raw: RawCompilerConfig = serde_json::from_str(&strip_jsonc(&contents))
            .map_err(|e| Error::ProjectLoad(format!("invalid JSON in {}: {e}", path.display())))?;

        let base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        let mut config = CompilerConfig {
            path: path.clone(),
            base_dir: base_dir.clone(),
            compiler_options: CompilerOptions::from_json(raw.compiler_options),
            files: raw.files,
            include: raw.include,
            exclude: raw.exclude,
        };

        for parent_spec in extends_specs(raw.extends.as_ref()) {
            let Some(parent_path) = resolve_extends(&base_dir, &parent_spec) else {
                warn!(
                    "Could not resolve `extends: {}` from {}",
                    parent_spec,
                    path.display()
                );
                continue;
            };
            debug!("Following extends {} -> {}", path.display(), parent_path.display());
            let parent = Self::load_chain(&parent_path, chain)?;
            config.inherit(parent);
        }

        chain.pop();
        Ok(config)
    }

    fn inherit(&mut self, parent: CompilerConfig) {
        let mut parent_options = parent.compiler_options;
        // Relative paths in the parent stay relative to the parent's directory
        for key in PATH_OPTIONS {
            if let Some(Value::String(value)) = parent_options.raw.get(*key) {
                let absolute = parent.base_dir.join(value);
                parent_options.raw.insert(
                    (*key).to_string(),
                    Value::String(absolute.to_string_lossy().into_owned()),
                );
            }
        }
        self.compiler_options.merge_over(&parent_options);

        let rebase = |patterns: Vec<String>| -> Vec<String> {
            patterns
                .into_iter()
                .map(|p| parent.base_dir.join(p).to_string_lossy().into_owned())
                .collect()
        };
        if self.files.is_none() {
            self.files = parent.files.map(rebase);
        }
        if self.include.is_none() {
            self.include = parent.include.map(rebase);
        }
        if self.exclude.is_none() {
            self.exclude = parent.exclude.map(rebase);
        }
    }

    pub fn out_dir(&self) -> Option<PathBuf> {
        self.compiler_options
            .out_dir()
            .map(|dir| self.base_dir.join(dir))
    }

    pub fn base_url(&self) -> Option<PathBuf> {
        self.compiler_options
            .base_url()
            .map(|dir| self.base_dir.join(dir))
    }
}

fn extends_specs(extends: Option<&Value>) -> Vec<String> {
    match extends {
        Some(Value::String(spec)) => vec![spec.clone()],
        Some(Value::Array(specs)) => specs
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

fn resolve_extends(base_dir: &Path, spec: &str) -> Option<PathBuf> {
    let candidate = if spec.starts_with('.') || Path::new(spec).is_absolute() {
        base_dir.join(spec)
    } else {
        base_dir.join("node_modules").join(spec)
    };

    if candidate.is_file() {
        return Some(candidate);
    }
    let with_extension = PathBuf::from(format!("{}.json", candidate.display()));
    if with_extension.is_file() {
        return Some(with_extension);
    }
    let in_package = candidate.join("tsconfig.json");
    in_package.is_file().then_some(in_package)
}
