//! Steps shared by the built-in commands

use super::{
    decisions::Choice,
    options::CommandOptions,
};
use crate::{
    error::{Error, Result},
    project::{Project, ProjectLoader},
    utils::path::{absolutize, to_slash},
};
use std::path::{Path, PathBuf};
use tracing::info;

/// The compiler configuration to load: the explicit one, the only
/// candidate in the project root, or the one the operator picks.
/// `None` when the choice was cancelled.
pub fn resolve_tsconfig(options: &CommandOptions<'_>) -> Result<Option<PathBuf>> {
    if let Some(tsconfig) = &options.tsconfig {
        return Ok(Some(absolutize(&options.project_root, tsconfig)));
    }

    let candidates = ProjectLoader::find_tsconfig_candidates(&options.project_root)?;
    match candidates.len() {
        0 => Err(Error::ProjectLoad(format!(
            "no tsconfig.json found in {}",
            options.project_root.display()
        ))),
        1 => Ok(candidates.into_iter().next()),
        _ => {
            let names: Vec<String> = candidates
                .iter()
                .map(|path| display_relative(&options.project_root, path))
                .collect();
            match options
                .decisions
                .choose("Select a tsconfig file", &names, false)?
            {
                Choice::Selected(index) => Ok(Some(pick(&candidates, index)?.clone())),
                Choice::Other(path) => Ok(Some(absolutize(&options.project_root, Path::new(&path)))),
                Choice::Cancelled => Ok(None),
            }
        }
    }
}

/// Load the project, `None` when the tsconfig choice was cancelled
pub fn load_project(options: &CommandOptions<'_>) -> Result<Option<Project>> {
    let Some(tsconfig) = resolve_tsconfig(options)? else {
        return Ok(None);
    };
    info!("Using {}", tsconfig.display());
    ProjectLoader::load(&tsconfig).map(Some)
}

/// A single candidate is taken as is. Several are offered together with a
/// custom path option.
pub fn choose_directory(
    options: &CommandOptions<'_>,
    prompt: &str,
    root: &Path,
    candidates: &[PathBuf],
) -> Result<Option<PathBuf>> {
    if let [only] = candidates {
        return Ok(Some(only.clone()));
    }
    let names: Vec<String> = candidates
        .iter()
        .map(|path| display_relative(root, path))
        .collect();
    Ok(match options.decisions.choose(prompt, &names, true)? {
        Choice::Selected(index) => Some(pick(candidates, index)?.clone()),
        Choice::Other(path) => Some(absolutize(root, Path::new(path.trim()))),
        Choice::Cancelled => None,
    })
}

pub(crate) fn pick<T>(items: &[T], index: usize) -> Result<&T> {
    items.get(index).ok_or_else(|| {
        Error::Parse(format!(
            "selection {index} is out of range ({} options)",
            items.len()
        ))
    })
}

/// Path relative to `root` when inside it, for prompts and reports
pub fn display_relative(root: &Path, path: &Path) -> String {
    match path.strip_prefix(root) {
        Ok(relative) if relative.as_os_str().is_empty() => ".".to_string(),
        Ok(relative) => to_slash(relative),
        Err(_) => path.display().to_string(),
    }
}
