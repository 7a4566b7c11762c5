use super::refs::ConfigRef;
use crate::{
    error::{Error, Result},
    project::{Project, SourceFile},
    utils::path::{normalize, to_slash},
};
use std::path::PathBuf;
use tracing::debug;

/// How the canonical configuration declaration is searched for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigSearchOptions {
    /// Type the variable must be statically declared as
    pub config_type_name: String,
    /// File name suffix used by the first pass
    pub file_suffix: String,
    /// When false, the first pass considers every file
    pub check_file_name: bool,
    /// Directories (relative to the project root) searched, regardless of
    /// file name, when the first pass finds nothing
    pub fallback_dirs: Vec<String>,
}

impl Default for ConfigSearchOptions {
    fn default() -> Self {
        Self {
            config_type_name: "FirelancerConfig".to_string(),
            file_suffix: "firelancer-config.ts".to_string(),
            check_file_name: true,
            fallback_dirs: vec!["src".to_string(), "src/config".to_string()],
        }
    }
}

/// Find the single variable declared with the configuration type.
///
/// Zero or several matches in the filename-filtered pass never resolve to a
/// guess. Zero matches trigger one retry over the fallback directories;
/// several matches fail immediately.
pub fn find_config_declaration<'p>(
    project: &'p Project,
    options: &ConfigSearchOptions,
) -> Result<ConfigRef<'p>> {
    let type_name = options.config_type_name.as_str();

    let primary = candidates(project, type_name, |file| {
        !options.check_file_name || file.file_name().ends_with(&options.file_suffix)
    });
    debug!(
        "Config search pass 1 ({}): {} candidates",
        options.file_suffix,
        primary.len()
    );

    match primary.len() {
        1 => return Ok(primary[0]),
        0 if options.check_file_name => {}
        0 => {
            return Err(Error::config_not_found(
                type_name,
                format!("no variable is declared as {type_name}"),
            ));
        }
        _ => return Err(ambiguous(type_name, &primary)),
    }

    let fallback_dirs: Vec<PathBuf> = options
        .fallback_dirs
        .iter()
        .map(|dir| normalize(&project.root().join(dir)))
        .collect();
    let fallback = candidates(project, type_name, |file| {
        fallback_dirs.iter().any(|dir| file.directory() == dir)
    });
    debug!(
        "Config search pass 2 ({:?}): {} candidates",
        options.fallback_dirs,
        fallback.len()
    );

    match fallback.len() {
        1 => Ok(fallback[0]),
        0 => Err(Error::config_not_found(
            type_name,
            format!(
                "no file ending in `{}` or inside {} declares a {type_name}",
                options.file_suffix,
                options.fallback_dirs.join(", ")
            ),
        )),
        _ => Err(ambiguous(type_name, &fallback)),
    }
}

fn candidates<'p>(
    project: &'p Project,
    type_name: &str,
    file_filter: impl Fn(&SourceFile) -> bool,
) -> Vec<ConfigRef<'p>> {
    project
        .source_files()
        .iter()
        .filter(|file| file_filter(file))
        .flat_map(|file| {
            file.variables()
                .filter(|variable| variable.has_static_type(type_name))
                .map(move |variable| ConfigRef::new(file, variable))
        })
        .collect()
}

fn ambiguous(type_name: &str, matches: &[ConfigRef<'_>]) -> Error {
    let locations: Vec<String> = matches
        .iter()
        .map(|m| {
            format!(
                "`{}` in {}",
                m.variable_name(),
                to_slash(m.module_path())
            )
        })
        .collect();
    Error::config_not_found(
        type_name,
        format!("found {} candidates: {}", matches.len(), locations.join(", ")),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::CompilerConfig;
    use std::path::Path;

    fn project(files: &[(&str, &str)]) -> Project {
        let root = Path::new("/app");
        Project::from_sources(
            CompilerConfig::with_defaults(&root.join("tsconfig.json")),
            files
                .iter()
                .map(|(path, text)| (root.join(path), text.to_string())),
        )
        .unwrap()
    }

    const CONFIG: &str = "export const config: FirelancerConfig = {};\n";

    #[test]
    fn test_single_declaration_in_canonical_file() {
        let project = project(&[
            ("src/firelancer-config.ts", CONFIG),
            ("src/index.ts", "export const x = 1;\n"),
        ]);
        let found = find_config_declaration(&project, &ConfigSearchOptions::default()).unwrap();
        assert_eq!(found.variable_name(), "config");
        assert_eq!(found.module_path(), Path::new("/app/src/firelancer-config.ts"));
    }

    #[test]
    fn test_two_declarations_in_canonical_files_fail() {
        let project = project(&[
            ("src/firelancer-config.ts", CONFIG),
            ("src/dev-firelancer-config.ts", CONFIG),
        ]);
        let result = find_config_declaration(&project, &ConfigSearchOptions::default());
        assert!(matches!(
            result,
            Err(Error::ConfigNotFound { reason, .. }) if reason.contains("2 candidates")
        ));
    }

    #[test]
    fn test_two_declarations_in_one_file_fail() {
        let project = project(&[(
            "firelancer-config.ts",
            "export const a: FirelancerConfig = {};\nexport const b: FirelancerConfig = {};\n",
        )]);
        let result = find_config_declaration(&project, &ConfigSearchOptions::default());
        assert!(matches!(result, Err(Error::ConfigNotFound { .. })));
    }

    #[test]
    fn test_canonical_file_without_typed_declaration_uses_fallback() {
        let project = project(&[
            ("firelancer-config.ts", "export const config = {};\n"),
            ("src/app-config.ts", CONFIG),
        ]);
        let found = find_config_declaration(&project, &ConfigSearchOptions::default()).unwrap();
        assert_eq!(found.module_path(), Path::new("/app/src/app-config.ts"));
    }

    #[test]
    fn test_fallback_ignores_deeper_directories() {
        let project = project(&[("src/plugins/reviews/config.ts", CONFIG)]);
        let result = find_config_declaration(&project, &ConfigSearchOptions::default());
        assert!(matches!(result, Err(Error::ConfigNotFound { .. })));
    }

    #[test]
    fn test_fallback_ambiguity_fails() {
        let project = project(&[("src/a.ts", CONFIG), ("src/config/b.ts", CONFIG)]);
        let result = find_config_declaration(&project, &ConfigSearchOptions::default());
        assert!(matches!(
            result,
            Err(Error::ConfigNotFound { reason, .. }) if reason.contains("2 candidates")
        ));
    }

    #[test]
    fn test_without_file_name_check() {
        let project = project(&[("lib/settings.ts", CONFIG)]);
        let options = ConfigSearchOptions {
            check_file_name: false,
            ..ConfigSearchOptions::default()
        };
        let found = find_config_declaration(&project, &options).unwrap();
        assert_eq!(found.module_path(), Path::new("/app/lib/settings.ts"));
    }

    #[test]
    fn test_custom_type_name() {
        let project = project(&[(
            "src/firelancer-config.ts",
            "export const config = { port: 1 } satisfies AppConfig;\n",
        )]);
        let options = ConfigSearchOptions {
            config_type_name: "AppConfig".to_string(),
            ..ConfigSearchOptions::default()
        };
        assert!(find_config_declaration(&project, &options).is_ok());
    }
}
