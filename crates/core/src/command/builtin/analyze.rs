use crate::{
    command::{
        options::CommandOptions,
        outcome::{CommandOutcome, CommandResult},
        registry::Command,
        support::load_project,
    },
    error::Result,
    locator::DeclarationLocator,
};
use serde_json::json;

pub const ANALYZE: Command = Command::new(
    "project:analyze",
    "project",
    "Report the config declaration, plugins, entities, services and migrations",
    analyze,
);

fn analyze(options: &CommandOptions<'_>) -> Result<CommandOutcome> {
    let Some(project) = load_project(options)? else {
        return Ok(CommandOutcome::cancelled("no tsconfig selected"));
    };
    let locator = DeclarationLocator::new(&project, options.settings);

    // A missing or ambiguous config is part of the report, not a failure
    let (config, config_error) = match locator.config() {
        Ok(config) => (
            Some(json!({
                "name": config.variable_name(),
                "file": config.module_path(),
                "line": config.declaration().span.start.line + 1,
                "exported": config.is_exported(),
            })),
            None,
        ),
        Err(e) => (None, Some(e.to_string())),
    };

    let plugins: Vec<_> = locator
        .plugins()
        .iter()
        .map(|p| p.as_class_ref().summary("plugin"))
        .collect();
    let entities: Vec<_> = locator
        .entities()
        .iter()
        .map(|e| {
            let mut summary = serde_json::to_value(e.as_class_ref().summary("entity"))
                .unwrap_or_default();
            summary["translatable"] = json!(e.is_translatable());
            summary
        })
        .collect();
    let services: Vec<_> = locator
        .services()
        .iter()
        .map(|s| s.as_class_ref().summary("service"))
        .collect();
    let migrations: Vec<_> = locator
        .migration_classes()
        .iter()
        .map(|m| m.as_class_ref().summary("migration"))
        .collect();

    Ok(CommandOutcome::Completed(CommandResult::new(
        project.handle(),
        Vec::new(),
        json!({
            "sourceFiles": project.source_files().len(),
            "config": config,
            "configError": config_error,
            "plugins": plugins,
            "entities": entities,
            "services": services,
            "migrations": migrations,
        }),
    )))
}
