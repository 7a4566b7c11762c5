use crate::{
    bridge::ConfigModule,
    command::{
        decisions::Choice,
        options::CommandOptions,
        outcome::{CommandOutcome, CommandResult},
        registry::Command,
        support::{choose_directory, load_project},
    },
    error::Result,
    locator::DeclarationLocator,
    migration::{MigrationFile, MigrationName, migration_directory_candidates},
    writer::SourceWriter,
};
use serde_json::json;
use tracing::info;

const CATEGORY: &str = "migrations";
const DEFAULT_NAME: &str = "migration";

pub const GENERATE: Command = Command::new(
    "migrate:generate",
    CATEGORY,
    "Generate a migration from the difference between entities and the database schema",
    generate,
);

pub const RUN: Command = Command::new(
    "migrate:run",
    CATEGORY,
    "Run all pending migrations",
    run,
);

pub const REVERT: Command = Command::new(
    "migrate:revert",
    CATEGORY,
    "Revert the last applied migration",
    revert,
);

fn generate(options: &CommandOptions<'_>) -> Result<CommandOutcome> {
    let Some(project) = load_project(options)? else {
        return Ok(CommandOutcome::cancelled("no tsconfig selected"));
    };
    let locator = DeclarationLocator::new(&project, options.settings);
    let config = locator.config()?;
    let module = ConfigModule::from_ref(&config, Some(project.compiler_config()));
    let runtime = options.bridge().load(&module)?;

    let candidates = migration_directory_candidates(
        &project,
        &config,
        &runtime,
        &options.settings.migration_interface,
    );
    let Some(directory) = choose_directory(
        options,
        "Where should the new migration be created?",
        project.root(),
        &candidates,
    )?
    else {
        return Ok(CommandOutcome::cancelled("no migration directory selected"));
    };

    let name = match &options.args.migration_name {
        Some(name) => name.clone(),
        None => match options
            .decisions
            .input("Migration name", Some(DEFAULT_NAME))?
        {
            Choice::Selected(name) | Choice::Other(name) => name,
            Choice::Cancelled => return Ok(CommandOutcome::cancelled("no migration name given")),
        },
    };
    let name = MigrationName::parse(&name)?;

    let Some(diff) = options.engine.generate_diff(&module, &name.kebab())? else {
        info!("No changes in database schema were found");
        return Ok(CommandOutcome::Completed(CommandResult::new(
            project.handle(),
            Vec::new(),
            json!({ "status": "no-changes" }),
        )));
    };

    let file = MigrationFile::now(&name, &diff);
    let path = directory.join(&file.file_name);
    let mut writer = SourceWriter::new();
    writer.write_generated_file(&path, &file.content)?;
    info!("Generated migration {} at {}", file.class_name, path.display());

    Ok(CommandOutcome::Completed(CommandResult::new(
        project.handle(),
        writer.into_modified_files(),
        json!({
            "status": "generated",
            "file": path,
            "className": file.class_name,
            "statements": diff.up.len(),
        }),
    )))
}

fn run(options: &CommandOptions<'_>) -> Result<CommandOutcome> {
    let Some(project) = load_project(options)? else {
        return Ok(CommandOutcome::cancelled("no tsconfig selected"));
    };
    let config = DeclarationLocator::new(&project, options.settings).config()?;
    let module = ConfigModule::from_ref(&config, Some(project.compiler_config()));

    let executed = options.engine.run_pending(&module)?;
    info!("Executed {} migrations", executed.len());

    Ok(CommandOutcome::Completed(CommandResult::new(
        project.handle(),
        Vec::new(),
        json!({ "executed": executed }),
    )))
}

fn revert(options: &CommandOptions<'_>) -> Result<CommandOutcome> {
    let Some(project) = load_project(options)? else {
        return Ok(CommandOutcome::cancelled("no tsconfig selected"));
    };
    let config = DeclarationLocator::new(&project, options.settings).config()?;
    let module = ConfigModule::from_ref(&config, Some(project.compiler_config()));

    let reverted = options.engine.revert_last(&module)?;
    info!("Reverted migration: {:?}", reverted);

    Ok(CommandOutcome::Completed(CommandResult::new(
        project.handle(),
        Vec::new(),
        json!({ "reverted": reverted }),
    )))
}
