//! Structural queries over a loaded project
//!
//! Declarations are identified by their shape (declared type, decorators,
//! `implements` clauses), never by file naming alone.

pub mod config;
pub mod pattern;
pub mod refs;

pub use config::{ConfigSearchOptions, find_config_declaration};
pub use pattern::{DeclarationPattern, DecoratorPattern, ImplementsPattern, find_matching};
pub use refs::{
    ClassRef, ConfigRef, DeclarationSummary, EntityRef, MigrationClassRef, PluginRef, ServiceRef,
};

use crate::{config::ToolSettings, error::Result, project::Project};

/// Every class whose `implements` clause names `interface_name`
pub fn find_classes_implementing<'p>(
    project: &'p Project,
    interface_name: &str,
) -> Vec<ClassRef<'p>> {
    find_matching(project, &ImplementsPattern { interface_name })
}

/// Every class carrying `decorator_name`, optionally restricted to files in
/// directories ending with `directory_suffix`
pub fn find_classes_with_decorator<'p>(
    project: &'p Project,
    decorator_name: &str,
    directory_suffix: Option<&str>,
) -> Vec<ClassRef<'p>> {
    find_matching(
        project,
        &DecoratorPattern {
            decorator_name,
            directory_suffix,
        },
    )
}

/// Typed discovery of the framework's declaration kinds, using the names
/// configured in [`ToolSettings`]
pub struct DeclarationLocator<'p> {
    project: &'p Project,
    settings: &'p ToolSettings,
}

impl<'p> DeclarationLocator<'p> {
    pub fn new(project: &'p Project, settings: &'p ToolSettings) -> Self {
        Self { project, settings }
    }

    pub fn project(&self) -> &'p Project {
        self.project
    }

    pub fn config(&self) -> Result<ConfigRef<'p>> {
        find_config_declaration(self.project, &self.settings.config_search_options())
    }

    pub fn plugins(&self) -> Vec<PluginRef<'p>> {
        find_classes_with_decorator(self.project, &self.settings.plugin_decorator, None)
            .into_iter()
            .map(PluginRef::new)
            .collect()
    }

    pub fn plugin(&self, name: &str) -> Option<PluginRef<'p>> {
        self.plugins().into_iter().find(|plugin| plugin.name() == name)
    }

    pub fn entities(&self) -> Vec<EntityRef<'p>> {
        let translatable = self.settings.translatable_interface.as_str();
        find_classes_with_decorator(self.project, &self.settings.entity_decorator, None)
            .into_iter()
            .map(|class| EntityRef::new(class, translatable))
            .collect()
    }

    pub fn services(&self) -> Vec<ServiceRef<'p>> {
        find_classes_with_decorator(
            self.project,
            &self.settings.service_decorator,
            Some(&self.settings.service_directory_suffix),
        )
        .into_iter()
        .map(ServiceRef::new)
        .collect()
    }

    pub fn migration_classes(&self) -> Vec<MigrationClassRef<'p>> {
        find_classes_implementing(self.project, &self.settings.migration_interface)
            .into_iter()
            .map(MigrationClassRef::new)
            .collect()
    }
}
