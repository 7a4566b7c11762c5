use crate::{
    bridge::RuntimeConfig,
    locator::{ConfigRef, find_classes_implementing},
    project::Project,
    utils::path::{absolutize, dedupe_preserving_order},
};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Candidate directories for new migration files, most specific first:
/// the runtime `migrations` hint, directories already holding migration
/// classes, then `../migrations` next to the configuration file
pub fn migration_directory_candidates(
    project: &Project,
    config: &ConfigRef<'_>,
    runtime: &RuntimeConfig,
    migration_interface: &str,
) -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    if let Some(hint) = runtime.migrations_hint() {
        if let Some(dir) = Path::new(hint).parent() {
            debug!("Migration hint from runtime config: {}", hint);
            candidates.push(absolutize(project.root(), dir));
        }
    }

    for class in find_classes_implementing(project, migration_interface) {
        candidates.push(class.directory().to_path_buf());
    }

    candidates.push(absolutize(config.directory(), Path::new("../migrations")));

    let candidates = dedupe_preserving_order(candidates);
    debug!("Migration directory candidates: {:?}", candidates);
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locator::{ConfigSearchOptions, find_config_declaration};
    use crate::project::CompilerConfig;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    const MIGRATION: &str = "export class Init1 implements MigrationInterface {}\n";

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

    fn candidates(project: &Project, runtime: serde_json::Value) -> Vec<PathBuf> {
        let config = find_config_declaration(project, &ConfigSearchOptions::default()).unwrap();
        migration_directory_candidates(
            project,
            &config,
            &RuntimeConfig::new(runtime),
            "MigrationInterface",
        )
    }

    #[test]
    fn test_hint_precedes_class_directories() {
        let project = project(&[
            ("src/firelancer-config.ts", "export const config: FirelancerConfig = {};\n"),
            ("db/1-init.ts", MIGRATION),
        ]);
        let found = candidates(
            &project,
            json!({ "dbConnectionOptions": { "migrations": ["src/db-migrations/*.ts"] } }),
        );
        assert_eq!(
            found,
            vec![
                PathBuf::from("/app/src/db-migrations"),
                PathBuf::from("/app/db"),
                PathBuf::from("/app/migrations"),
            ]
        );
    }

    #[test]
    fn test_normalized_duplicates_collapse() {
        let project = project(&[
            ("src/firelancer-config.ts", "export const config: FirelancerConfig = {};\n"),
            ("migrations/1-init.ts", MIGRATION),
            ("migrations/2-more.ts", MIGRATION),
        ]);
        let found = candidates(
            &project,
            json!({ "dbConnectionOptions": { "migrations": ["./src/../migrations/*.ts"] } }),
        );
        assert_eq!(found, vec![PathBuf::from("/app/migrations")]);
    }

    #[test]
    fn test_without_hint_or_classes() {
        let project = project(&[(
            "src/config/firelancer-config.ts",
            "export const config: FirelancerConfig = {};\n",
        )]);
        let found = candidates(&project, json!({ "dbConnectionOptions": {} }));
        assert_eq!(found, vec![PathBuf::from("/app/src/migrations")]);
    }

    #[test]
    fn test_absolute_hint() {
        let project = project(&[("src/firelancer-config.ts", "export const config: FirelancerConfig = {};\n")]);
        let found = candidates(
            &project,
            json!({ "dbConnectionOptions": { "migrations": ["/srv/migrations/*.js"] } }),
        );
        assert_eq!(
            found,
            vec![PathBuf::from("/srv/migrations"), PathBuf::from("/app/migrations")]
        );
    }
}
