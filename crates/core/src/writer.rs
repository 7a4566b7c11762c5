//! File mutation layer: every write into the host project goes through here

use crate::{
    edit::EditPlan,
    error::{Error, Result},
};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::info;

/// Writes files and remembers which ones it touched.
///
/// Each write lands in a sibling temporary file first and is renamed over
/// the target, so a failed write never leaves a truncated file. Several
/// writes are not transactional: earlier ones stay when a later one fails.
#[derive(Debug, Default)]
pub struct SourceWriter {
    modified: Vec<PathBuf>,
}

impl SourceWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create `path` and its parents. Succeeds if it already exists.
    pub fn ensure_directory(&self, path: &Path) -> Result<()> {
        fs::create_dir_all(path).map_err(|source| Error::FileWrite {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Write `content` to `path`, creating parent directories and replacing
    /// any existing file
    pub fn write_generated_file(&mut self, path: &Path, content: &str) -> Result<()> {
        let parent = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        self.ensure_directory(parent)?;

        let file_error = |source| Error::FileWrite {
            path: path.to_path_buf(),
            source,
        };
        let mut temp = NamedTempFile::new_in(parent).map_err(file_error)?;
        temp.write_all(content.as_bytes()).map_err(file_error)?;
        temp.flush().map_err(file_error)?;
        if let Some(permissions) = target_permissions(path) {
            temp.as_file().set_permissions(permissions).map_err(file_error)?;
        }
        temp.persist(path).map_err(|e| file_error(e.error))?;

        info!("Wrote {}", path.display());
        self.record(path);
        Ok(())
    }

    /// Apply `plan` to `original` and write the result to the plan's path.
    /// An empty plan writes nothing.
    pub fn apply_edit_plan(&mut self, plan: &EditPlan, original: &str) -> Result<bool> {
        if plan.is_empty() {
            return Ok(false);
        }
        let edited = plan.apply(original)?;
        self.write_generated_file(plan.path(), &edited)?;
        Ok(true)
    }

    pub fn modified_files(&self) -> &[PathBuf] {
        &self.modified
    }

    pub fn into_modified_files(self) -> Vec<PathBuf> {
        self.modified
    }

    fn record(&mut self, path: &Path) {
        if !self.modified.iter().any(|p| p == path) {
            self.modified.push(path.to_path_buf());
        }
    }
}

/// Mode the written file should carry: the existing target's, or 0644 for a
/// new file on unix. Temporary files are created owner-only.
fn target_permissions(path: &Path) -> Option<fs::Permissions> {
    if let Ok(metadata) = fs::metadata(path) {
        return Some(metadata.permissions());
    }
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        Some(fs::Permissions::from_mode(0o644))
    }
    #[cfg(not(unix))]
    {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edit::SourceEdit;
    use tempfile::TempDir;

    #[test]
    fn test_write_creates_parents_and_overwrites() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("generated/types/admin.ts");
        let mut writer = SourceWriter::new();

        writer.write_generated_file(&target, "first").unwrap();
        writer.write_generated_file(&target, "second").unwrap();

        assert_eq!(fs::read_to_string(&target).unwrap(), "second");
        assert_eq!(writer.modified_files(), &[target.clone()]);
        let leftovers: Vec<_> = fs::read_dir(target.parent().unwrap())
            .unwrap()
            .filter_map(|e| e.ok())
            .collect();
        assert_eq!(leftovers.len(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_write_keeps_file_mode() {
        use std::os::unix::fs::PermissionsExt;
        let temp = TempDir::new().unwrap();
        let mode = |path: &Path| fs::metadata(path).unwrap().permissions().mode() & 0o777;
        let mut writer = SourceWriter::new();

        let config = temp.path().join("firelancer-config.ts");
        fs::write(&config, "export const config = {};\n").unwrap();
        fs::set_permissions(&config, fs::Permissions::from_mode(0o664)).unwrap();
        writer.write_generated_file(&config, "export const config = { a: 1 };\n").unwrap();
        assert_eq!(mode(&config), 0o664);

        let migration = temp.path().join("migrations/1-initial.ts");
        writer.write_generated_file(&migration, "export class Initial {}\n").unwrap();
        assert_eq!(mode(&migration), 0o644);
    }

    #[test]
    fn test_ensure_directory_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("a/b");
        let writer = SourceWriter::new();
        writer.ensure_directory(&dir).unwrap();
        writer.ensure_directory(&dir).unwrap();
        assert!(dir.is_dir());
        assert!(writer.modified_files().is_empty());
    }

    #[test]
    fn test_write_failure_is_reported_with_path() {
        let temp = TempDir::new().unwrap();
        let blocker = temp.path().join("blocker");
        fs::write(&blocker, "file, not a directory").unwrap();
        let target = blocker.join("out.ts");

        let mut writer = SourceWriter::new();
        match writer.write_generated_file(&target, "x") {
            Err(Error::FileWrite { path, .. }) => assert_eq!(path, blocker),
            other => panic!("unexpected: {other:?}"),
        }
        assert!(writer.modified_files().is_empty());
    }

    #[test]
    fn test_apply_edit_plan() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("config.ts");
        fs::write(&target, "const a = 1;\n").unwrap();

        let mut writer = SourceWriter::new();
        assert!(!writer.apply_edit_plan(&EditPlan::new(&target), "const a = 1;\n").unwrap());
        assert!(writer.modified_files().is_empty());

        let mut plan = EditPlan::new(&target);
        plan.push(SourceEdit::insert(0, "// edited\n"));
        assert!(writer.apply_edit_plan(&plan, "const a = 1;\n").unwrap());
        assert_eq!(fs::read_to_string(&target).unwrap(), "// edited\nconst a = 1;\n");
        assert_eq!(writer.modified_files(), &[target]);
    }
}
