//! Lexical path helpers
//!
//! None of these touch the file system: migration directories and import
//! paths are computed for locations that may not exist yet.

use std::path::{Component, Path, PathBuf};

/// Normalize a path lexically (remove `.` and resolve `..` against earlier
/// components)
pub fn normalize(path: &Path) -> PathBuf {
    let mut components: Vec<Component> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match components.last() {
                Some(Component::Normal(_)) => {
                    components.pop();
                }
                // `..` at the root stays at the root
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => components.push(component),
            },
            c => components.push(c),
        }
    }
    components.iter().collect()
}

/// Resolve `path` against `base` when relative, then normalize
pub fn absolutize(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        normalize(path)
    } else {
        normalize(&base.join(path))
    }
}

/// Render a path with forward slashes
pub fn to_slash(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            Component::ParentDir => Some("..".to_string()),
            Component::CurDir => Some(".".to_string()),
            Component::RootDir | Component::Prefix(_) => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Relative path from directory `from` to `to`, both absolute and normalized
pub fn relative_to(from: &Path, to: &Path) -> PathBuf {
    let from: Vec<Component> = from.components().collect();
    let to: Vec<Component> = to.components().collect();
    let common = from
        .iter()
        .zip(to.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut relative = PathBuf::new();
    for _ in common..from.len() {
        relative.push("..");
    }
    for component in &to[common..] {
        relative.push(component.as_os_str());
    }
    relative
}

/// Module specifier for importing `target` from a file in `from_dir`:
/// `./plugins/reviews/reviews.plugin` style, extension dropped
pub fn import_specifier(from_dir: &Path, target: &Path) -> String {
    let without_extension = target.with_extension("");
    let relative = to_slash(&relative_to(from_dir, &without_extension));
    if relative.starts_with("../") {
        relative
    } else {
        format!("./{relative}")
    }
}

/// Keep the first occurrence of each path, comparing normalized forms
pub fn dedupe_preserving_order(paths: impl IntoIterator<Item = PathBuf>) -> Vec<PathBuf> {
    let mut seen: Vec<PathBuf> = Vec::new();
    for path in paths {
        let normalized = normalize(&path);
        if !seen.contains(&normalized) {
            seen.push(normalized);
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(
            normalize(Path::new("/app/src/../migrations/./x")),
            PathBuf::from("/app/migrations/x")
        );
        assert_eq!(normalize(Path::new("/../a")), PathBuf::from("/a"));
        assert_eq!(normalize(Path::new("../a/b/..")), PathBuf::from("../a"));
    }

    #[test]
    fn test_absolutize() {
        assert_eq!(
            absolutize(Path::new("/app/src"), Path::new("../migrations")),
            PathBuf::from("/app/migrations")
        );
        assert_eq!(
            absolutize(Path::new("/app/src"), Path::new("/other/./dir")),
            PathBuf::from("/other/dir")
        );
    }

    #[test]
    fn test_import_specifier() {
        assert_eq!(
            import_specifier(
                Path::new("/app/src"),
                Path::new("/app/src/plugins/reviews/reviews.plugin.ts")
            ),
            "./plugins/reviews/reviews.plugin"
        );
        assert_eq!(
            import_specifier(Path::new("/app/src/config"), Path::new("/app/src/plugin.ts")),
            "../plugin"
        );
    }

    #[test]
    fn test_dedupe_preserving_order() {
        let deduped = dedupe_preserving_order(vec![
            PathBuf::from("/app/migrations"),
            PathBuf::from("/app/src/../migrations"),
            PathBuf::from("/app/db"),
            PathBuf::from("/app/migrations/"),
        ]);
        assert_eq!(
            deduped,
            vec![PathBuf::from("/app/migrations"), PathBuf::from("/app/db")]
        );
    }
}
