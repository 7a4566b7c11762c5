use crate::{
    bridge::{ConfigModule, HostAction},
    command::{
        options::CommandOptions,
        outcome::{CommandOutcome, CommandResult},
        registry::Command,
        support::load_project,
    },
    error::Result,
    locator::DeclarationLocator,
    schema::{SchemaSet, TypeScriptGenerator},
    utils::path::absolutize,
    writer::SourceWriter,
};
use serde_json::json;
use tracing::info;

pub const SCHEMA_TYPES: Command = Command::new(
    "codegen:schema-types",
    "codegen",
    "Generate TypeScript types for the admin and shop API schemas",
    schema_types,
);

fn schema_types(options: &CommandOptions<'_>) -> Result<CommandOutcome> {
    let Some(project) = load_project(options)? else {
        return Ok(CommandOutcome::cancelled("no tsconfig selected"));
    };
    let config = DeclarationLocator::new(&project, options.settings).config()?;
    let module = ConfigModule::from_ref(&config, Some(project.compiler_config()));
    let bridge = options.bridge();
    let generator = TypeScriptGenerator::new()?;

    let output_dir = match &options.args.output_dir {
        Some(dir) => absolutize(project.root(), dir),
        None => project.root().to_path_buf(),
    };
    let targets = [
        ("admin", &options.settings.admin_types_file),
        ("shop", &options.settings.shop_types_file),
    ];

    // Everything is generated before the first write
    let mut outputs = Vec::with_capacity(targets.len());
    for (api_type, file_name) in targets {
        let value = bridge.execute(
            &module,
            HostAction::Schemas {
                api_type: api_type.to_string(),
            },
        )?;
        let set = SchemaSet::from_value(value)?;
        info!("Generating {} types for {} schemas", api_type, set.schemas.len());
        outputs.push((output_dir.join(file_name), generator.generate(&set)?));
    }

    let mut writer = SourceWriter::new();
    writer.ensure_directory(&output_dir)?;
    for (path, content) in &outputs {
        writer.write_generated_file(path, content)?;
    }

    let files = writer.modified_files().to_vec();
    Ok(CommandOutcome::Completed(CommandResult::new(
        project.handle(),
        writer.into_modified_files(),
        json!({ "outputDir": output_dir, "files": files }),
    )))
}
