use crate::{
    project::{Project, SourceFile},
    types::ClassDeclaration,
    utils::path::to_slash,
};

use super::refs::ClassRef;

/// Structural predicate over class declarations
pub trait DeclarationPattern {
    fn matches(&self, file: &SourceFile, class: &ClassDeclaration) -> bool;
}

/// Classes whose `implements` clause names an interface
pub struct ImplementsPattern<'a> {
    pub interface_name: &'a str,
}

impl DeclarationPattern for ImplementsPattern<'_> {
    fn matches(&self, _file: &SourceFile, class: &ClassDeclaration) -> bool {
        class.implements_interface(self.interface_name)
    }
}

/// Classes carrying a decorator, optionally only in directories whose path
/// ends with `directory_suffix`
pub struct DecoratorPattern<'a> {
    pub decorator_name: &'a str,
    pub directory_suffix: Option<&'a str>,
}

impl DeclarationPattern for DecoratorPattern<'_> {
    fn matches(&self, file: &SourceFile, class: &ClassDeclaration) -> bool {
        if let Some(suffix) = self.directory_suffix {
            let directory = to_slash(file.directory());
            if !directory.ends_with(suffix.trim_end_matches('/')) {
                return false;
            }
        }
        class.has_decorator(self.decorator_name)
    }
}

/// Every class in the project matching `pattern`, in project file order
pub fn find_matching<'p>(
    project: &'p Project,
    pattern: &dyn DeclarationPattern,
) -> Vec<ClassRef<'p>> {
    project
        .source_files()
        .iter()
        .flat_map(|file| {
            file.classes()
                .filter(move |class| pattern.matches(file, class))
                .map(move |class| ClassRef::new(file, class))
        })
        .collect()
}
