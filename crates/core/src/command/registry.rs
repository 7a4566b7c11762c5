use super::{options::CommandOptions, outcome::CommandOutcome};
use crate::error::{Error, Result};
use tracing::debug;

pub type RunFn = fn(&CommandOptions<'_>) -> Result<CommandOutcome>;

/// A named, independently invokable unit of work
#[derive(Debug, Clone, Copy)]
pub struct Command {
    id: &'static str,
    category: &'static str,
    description: &'static str,
    run: RunFn,
}

impl Command {
    pub const fn new(
        id: &'static str,
        category: &'static str,
        description: &'static str,
        run: RunFn,
    ) -> Self {
        Self {
            id,
            category,
            description,
            run,
        }
    }

    pub fn id(&self) -> &'static str {
        self.id
    }

    /// Display grouping only
    pub fn category(&self) -> &'static str {
        self.category
    }

    pub fn description(&self) -> &'static str {
        self.description
    }

    pub fn run(&self, options: &CommandOptions<'_>) -> Result<CommandOutcome> {
        debug!("Running command {}", self.id);
        (self.run)(options)
    }
}

/// Commands by id, in registration order
#[derive(Debug, Clone, Default)]
pub struct CommandRegistry {
    commands: Vec<Command>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The commands shipped with the tool
    pub fn builtin() -> Self {
        Self {
            commands: super::builtin::all(),
        }
    }

    pub fn register(&mut self, command: Command) -> Result<()> {
        if self.get(command.id()).is_some() {
            return Err(Error::DuplicateCommand(command.id().to_string()));
        }
        self.commands.push(command);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&Command> {
        self.commands.iter().find(|command| command.id() == id)
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn run(&self, id: &str, options: &CommandOptions<'_>) -> Result<CommandOutcome> {
        self.get(id)
            .ok_or_else(|| Error::UnknownCommand(id.to_string()))?
            .run(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop(_: &CommandOptions<'_>) -> Result<CommandOutcome> {
        Ok(CommandOutcome::cancelled("noop"))
    }

    #[test]
    fn test_builtin_ids_are_unique() {
        let registry = CommandRegistry::builtin();
        let mut ids: Vec<_> = registry.commands().iter().map(|c| c.id()).collect();
        assert_eq!(
            ids,
            vec![
                "migrate:generate",
                "migrate:run",
                "migrate:revert",
                "codegen:schema-types",
                "plugin:add-to-config",
                "project:analyze",
            ]
        );
        ids.dedup();
        assert_eq!(ids.len(), registry.commands().len());
        assert_eq!(registry.get("migrate:run").unwrap().category(), "migrations");
    }

    #[test]
    fn test_duplicate_registration_fails() {
        let mut registry = CommandRegistry::new();
        registry
            .register(Command::new("x:y", "test", "first", noop))
            .unwrap();
        assert!(matches!(
            registry.register(Command::new("x:y", "test", "second", noop)),
            Err(Error::DuplicateCommand(id)) if id == "x:y"
        ));
        assert_eq!(registry.get("x:y").unwrap().description(), "first");
    }
}
