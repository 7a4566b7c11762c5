use crate::{
    command::{
        decisions::Choice,
        options::CommandOptions,
        outcome::{CommandOutcome, CommandResult},
        registry::Command,
        support::{load_project, pick},
    },
    edit::{EditPlan, add_array_element, add_named_import},
    error::{Error, Result},
    locator::DeclarationLocator,
    utils::path::import_specifier,
    writer::SourceWriter,
};
use serde_json::json;
use tracing::info;

pub const ADD_PLUGIN: Command = Command::new(
    "plugin:add-to-config",
    "plugins",
    "Import a plugin class and add it to the config's plugins array",
    add_plugin,
);

fn add_plugin(options: &CommandOptions<'_>) -> Result<CommandOutcome> {
    let Some(project) = load_project(options)? else {
        return Ok(CommandOutcome::cancelled("no tsconfig selected"));
    };
    let locator = DeclarationLocator::new(&project, options.settings);
    let config = locator.config()?;

    let plugin_name = match &options.args.plugin_name {
        Some(name) => name.clone(),
        None => {
            let plugins: Vec<String> = locator
                .plugins()
                .iter()
                .map(|plugin| plugin.name().to_string())
                .collect();
            if plugins.is_empty() {
                return Err(Error::DeclarationNotFound {
                    kind: "plugin",
                    name: "*".to_string(),
                });
            }
            match options
                .decisions
                .choose("Which plugin should be added?", &plugins, false)?
            {
                Choice::Selected(index) => pick(&plugins, index)?.clone(),
                Choice::Other(name) => name,
                Choice::Cancelled => return Ok(CommandOutcome::cancelled("no plugin selected")),
            }
        }
    };
    let plugin = locator
        .plugin(&plugin_name)
        .ok_or_else(|| Error::DeclarationNotFound {
            kind: "plugin",
            name: plugin_name.clone(),
        })?;

    let file = config.file();
    let mut plan = EditPlan::new(file.path());
    let element = add_array_element(file, config.declaration(), "plugins", plugin.name())?;
    let already_present = element.is_none();
    if let Some(edit) = element {
        if plugin.file_path() != file.path() {
            let specifier = import_specifier(file.directory(), plugin.file_path());
            plan.extend(add_named_import(file, plugin.name(), &specifier));
        }
        plan.push(edit);
    }

    let mut writer = SourceWriter::new();
    writer.apply_edit_plan(&plan, file.text())?;
    info!(
        "Plugin {} {} in {}",
        plugin.name(),
        if already_present { "already registered" } else { "added" },
        file.path().display()
    );

    Ok(CommandOutcome::Completed(CommandResult::new(
        project.handle(),
        writer.into_modified_files(),
        json!({
            "plugin": plugin.name(),
            "config": file.path(),
            "status": if already_present { "already-present" } else { "added" },
            "edits": plan.edits(),
        }),
    )))
}
