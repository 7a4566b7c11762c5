use super::{compiler_config::CompilerConfig, source_file::SourceFile};
use crate::{
    error::{Error, Result},
    parser::TypeScriptParser,
    utils::path::{normalize, to_slash},
};
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use serde::Serialize;
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

const SOURCE_EXTENSIONS: &[&str] = &["ts", "tsx", "mts", "cts"];
const DEFAULT_EXCLUDES: &[&str] = &["node_modules", "bower_components", "jspm_packages"];

/// In-memory structural representation of a host project
#[derive(Debug)]
pub struct Project {
    compiler_config: CompilerConfig,
    files: Vec<SourceFile>,
}

/// What a command reports about the project it ran against
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectHandle {
    pub root: PathBuf,
    pub tsconfig: PathBuf,
}

impl Project {
    /// Build a project from already-read sources. Files are kept sorted by
    /// path so every query sees them in the same order.
    pub fn from_sources(
        compiler_config: CompilerConfig,
        sources: impl IntoIterator<Item = (PathBuf, String)>,
    ) -> Result<Self> {
        let mut parser = TypeScriptParser::new()?;
        let mut files = Vec::new();
        for (path, text) in sources {
            let file = SourceFile::parse(path, text, &mut parser)?;
            if file.has_syntax_errors() {
                warn!("Syntax errors in {}", file.path().display());
            }
            files.push(file);
        }
        files.sort_by(|a, b| a.path().cmp(b.path()));

        if files.is_empty() {
            return Err(Error::ProjectLoad(format!(
                "no source files found for {}",
                compiler_config.path.display()
            )));
        }

        Ok(Self {
            compiler_config,
            files,
        })
    }

    /// Directory containing the compiler configuration
    pub fn root(&self) -> &Path {
        &self.compiler_config.base_dir
    }

    pub fn tsconfig_path(&self) -> &Path {
        &self.compiler_config.path
    }

    pub fn compiler_config(&self) -> &CompilerConfig {
        &self.compiler_config
    }

    pub fn source_files(&self) -> &[SourceFile] {
        &self.files
    }

    pub fn source_file(&self, path: &Path) -> Option<&SourceFile> {
        self.files.iter().find(|f| f.path() == path)
    }

    pub fn handle(&self) -> ProjectHandle {
        ProjectHandle {
            root: self.root().to_path_buf(),
            tsconfig: self.tsconfig_path().to_path_buf(),
        }
    }
}

pub struct ProjectLoader;

impl ProjectLoader {
    /// Compiler configurations sitting directly in `root`
    /// (`tsconfig.json`, `tsconfig.*.json`), sorted by name
    pub fn find_tsconfig_candidates(root: &Path) -> Result<Vec<PathBuf>> {
        let entries = fs::read_dir(root).map_err(|e| {
            Error::ProjectLoad(format!("cannot read directory {}: {e}", root.display()))
        })?;

        let mut candidates: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_file())
            .filter(|path| {
                let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
                name == "tsconfig.json"
                    || (name.starts_with("tsconfig.") && name.ends_with(".json"))
            })
            .collect();
        candidates.sort();
        debug!("Found {} tsconfig candidates in {}", candidates.len(), root.display());
        Ok(candidates)
    }

    pub fn load(tsconfig: &Path) -> Result<Project> {
        let compiler_config = CompilerConfig::load(tsconfig)?;
        let paths = Self::collect_source_paths(&compiler_config)?;
        info!(
            "Loading {} source files from {}",
            paths.len(),
            compiler_config.path.display()
        );

        let mut sources = Vec::with_capacity(paths.len());
        for path in paths {
            let text = fs::read_to_string(&path).map_err(|e| {
                Error::ProjectLoad(format!("cannot read {}: {e}", path.display()))
            })?;
            sources.push((path, text));
        }

        Project::from_sources(compiler_config, sources)
    }

    /// Files reachable from the configuration's `files`/`include`/`exclude`
    fn collect_source_paths(config: &CompilerConfig) -> Result<Vec<PathBuf>> {
        let base = &config.base_dir;
        let mut paths = Vec::new();

        for file in config.files.iter().flatten() {
            let path = normalize(&base.join(file));
            if path.is_file() {
                paths.push(path);
            } else {
                warn!("File listed in `files` does not exist: {}", path.display());
            }
        }

        // An explicit `files` list without `include` means nothing else is included
        let default_include = vec!["**/*".to_string()];
        let include_patterns = match (&config.include, &config.files) {
            (Some(include), _) => include.clone(),
            (None, Some(_)) => Vec::new(),
            (None, None) => default_include,
        };

        let mut exclude_patterns: Vec<String> = config.exclude.clone().unwrap_or_else(|| {
            DEFAULT_EXCLUDES.iter().map(|s| s.to_string()).collect()
        });
        if config.exclude.is_none() {
            if let Some(out_dir) = config.out_dir() {
                exclude_patterns.push(out_dir.to_string_lossy().into_owned());
            }
        }

        if !include_patterns.is_empty() {
            let include = build_globset(base, &include_patterns, false)?;
            let exclude = build_globset(base, &exclude_patterns, true)?;

            let walker = WalkDir::new(base)
                .follow_links(false)
                .into_iter()
                .filter_entry(|entry| {
                    let name = entry.file_name().to_string_lossy();
                    entry.depth() == 0 || !(name == "node_modules" || name.starts_with('.'))
                });

            for entry in walker.filter_map(|e| e.ok()) {
                let path = entry.path();
                if !entry.file_type().is_file() || !is_source_file(path) {
                    continue;
                }
                let Ok(relative) = path.strip_prefix(base) else {
                    continue;
                };
                let relative = to_slash(relative);
                if include.is_match(&relative) && !exclude.is_match(&relative) {
                    paths.push(path.to_path_buf());
                }
            }
        }

        paths.sort();
        paths.dedup();
        Ok(paths)
    }
}

fn is_source_file(path: &Path) -> bool {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
    if name.ends_with(".d.ts") || name.ends_with(".d.mts") || name.ends_with(".d.cts") {
        return false;
    }
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext))
}

/// Compile tsconfig-style patterns into a glob set matched against paths
/// relative to `base`. A pattern without wildcards or extension names a
/// directory and matches everything below it.
fn build_globset(base: &Path, patterns: &[String], excluding: bool) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let Some(relative) = relative_pattern(base, pattern) else {
            warn!("Ignoring pattern outside the project: {}", pattern);
            continue;
        };
        let last_segment = relative.rsplit('/').next().unwrap_or(&relative);
        let names_directory = !last_segment.contains('*') && !last_segment.contains('.');

        let mut expanded = vec![relative.clone()];
        if names_directory || (excluding && !relative.contains('*')) {
            expanded.push(format!("{relative}/**/*"));
        }

        for glob in expanded {
            let glob = GlobBuilder::new(&glob)
                .literal_separator(true)
                .build()
                .map_err(|e| Error::ProjectLoad(format!("invalid pattern `{pattern}`: {e}")))?;
            builder.add(glob);
        }
    }
    builder
        .build()
        .map_err(|e| Error::ProjectLoad(format!("invalid patterns: {e}")))
}

/// `pattern` relative to `base`, or `None` when it points outside of it.
/// Files are only collected by walking down from `base`.
fn relative_pattern(base: &Path, pattern: &str) -> Option<String> {
    let path = Path::new(pattern);
    let normalized = if path.is_absolute() {
        normalize(path).strip_prefix(base).ok()?.to_path_buf()
    } else {
        normalize(path)
    };
    match normalized.components().next() {
        Some(Component::ParentDir) => None,
        None => Some("**/*".to_string()),
        Some(_) => Some(to_slash(&normalized)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(root: &Path, relative: &str, contents: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    fn relative_paths(project: &Project) -> Vec<String> {
        project
            .source_files()
            .iter()
            .map(|f| to_slash(f.path().strip_prefix(project.root()).unwrap()))
            .collect()
    }

    #[test]
    fn test_default_include_skips_node_modules_and_declarations() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().canonicalize().unwrap();
        write(&root, "tsconfig.json", "{}");
        write(&root, "src/index.ts", "export const a = 1;");
        write(&root, "src/view.tsx", "export const b = 2;");
        write(&root, "src/types.d.ts", "declare const c: number;");
        write(&root, "src/readme.md", "# docs");
        write(&root, "node_modules/pkg/index.ts", "export const d = 4;");

        let project = ProjectLoader::load(&root.join("tsconfig.json")).unwrap();
        assert_eq!(relative_paths(&project), vec!["src/index.ts", "src/view.tsx"]);
    }

    #[test]
    fn test_include_and_exclude_patterns() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().canonicalize().unwrap();
        write(
            &root,
            "tsconfig.json",
            r#"{ "include": ["./src"], "exclude": ["src/**/*.spec.ts", "src/generated"] }"#,
        );
        write(&root, "src/app.ts", "export const a = 1;");
        write(&root, "src/app.spec.ts", "export const b = 1;");
        write(&root, "src/generated/types.ts", "export type T = {};");
        write(&root, "scripts/build.ts", "export const c = 1;");

        let project = ProjectLoader::load(&root.join("tsconfig.json")).unwrap();
        assert_eq!(relative_paths(&project), vec!["src/app.ts"]);
    }

    #[test]
    fn test_out_dir_is_excluded_by_default() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().canonicalize().unwrap();
        write(
            &root,
            "tsconfig.json",
            r#"{ "compilerOptions": { "outDir": "./build" } }"#,
        );
        write(&root, "src/app.ts", "export const a = 1;");
        write(&root, "build/app.ts", "export const a = 1;");

        let project = ProjectLoader::load(&root.join("tsconfig.json")).unwrap();
        assert_eq!(relative_paths(&project), vec!["src/app.ts"]);
    }

    #[test]
    fn test_zero_source_files_is_an_error() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        write(root, "tsconfig.json", r#"{ "include": ["src"] }"#);

        let result = ProjectLoader::load(&root.join("tsconfig.json"));
        assert!(matches!(result, Err(Error::ProjectLoad(msg)) if msg.contains("no source files")));
    }

    #[test]
    fn test_missing_tsconfig_is_an_error() {
        let temp = TempDir::new().unwrap();
        let result = ProjectLoader::load(&temp.path().join("tsconfig.json"));
        assert!(matches!(result, Err(Error::ProjectLoad(_))));
    }

    #[test]
    fn test_find_tsconfig_candidates() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        write(root, "tsconfig.json", "{}");
        write(root, "tsconfig.build.json", "{}");
        write(root, "package.json", "{}");
        write(root, "packages/a/tsconfig.json", "{}");

        let candidates = ProjectLoader::find_tsconfig_candidates(root).unwrap();
        let names: Vec<_> = candidates
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, vec!["tsconfig.build.json", "tsconfig.json"]);
    }

    #[test]
    fn test_files_list_without_include() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().canonicalize().unwrap();
        write(&root, "tsconfig.json", r#"{ "files": ["src/main.ts"] }"#);
        write(&root, "src/main.ts", "export const a = 1;");
        write(&root, "src/other.ts", "export const b = 1;");

        let project = ProjectLoader::load(&root.join("tsconfig.json")).unwrap();
        assert_eq!(relative_paths(&project), vec!["src/main.ts"]);
    }

    #[test]
    fn test_patterns_outside_the_project_are_skipped() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().canonicalize().unwrap();
        let app = root.join("apps/server");
        write(&app, "tsconfig.json", r#"{ "include": ["src/", "../libs/**/*"] }"#);
        write(&app, "src/main.ts", "export const a = 1;");
        write(&root, "apps/libs/shared/index.ts", "export const b = 1;");

        let project = ProjectLoader::load(&app.join("tsconfig.json")).unwrap();
        assert_eq!(relative_paths(&project), vec!["src/main.ts"]);

        assert_eq!(relative_pattern(&app, "../libs/**/*"), None);
        assert_eq!(relative_pattern(&app, "./src/../lib/*.ts").as_deref(), Some("lib/*.ts"));
        assert_eq!(relative_pattern(&app, ".").as_deref(), Some("**/*"));
        let inside = format!("{}/src/**/*", app.display());
        assert_eq!(relative_pattern(&app, &inside).as_deref(), Some("src/**/*"));
    }
}
