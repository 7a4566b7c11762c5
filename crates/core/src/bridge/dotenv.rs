//! `.env` reading
//!
//! Values are only ever handed to child processes. The tool's own
//! environment is left alone, and variables it already has take precedence
//! over the file.

use crate::error::{Error, Result};
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Parse `.env` text. Later assignments of the same key win.
pub fn parse_dotenv(text: &str) -> Result<BTreeMap<String, String>> {
    collect(dotenvy::from_read_iter(text.as_bytes()), Path::new("<input>"))
}

/// Read `path` if it exists. A missing file yields no variables.
pub fn load_dotenv(path: &Path) -> Result<BTreeMap<String, String>> {
    if !path.is_file() {
        debug!("No env file at {}", path.display());
        return Ok(BTreeMap::new());
    }
    let iter = dotenvy::from_path_iter(path)
        .map_err(|e| Error::Parse(format!("cannot read {}: {e}", path.display())))?;
    let vars = collect(iter, path)?;
    debug!("Loaded {} variables from {}", vars.len(), path.display());
    Ok(vars)
}

/// Drop the variables `is_set` reports as already present in the environment
pub fn retain_unset(
    mut vars: BTreeMap<String, String>,
    is_set: impl Fn(&str) -> bool,
) -> BTreeMap<String, String> {
    vars.retain(|key, _| {
        let keep = !is_set(key);
        if !keep {
            debug!("Keeping {} from the environment over the env file", key);
        }
        keep
    });
    vars
}

fn collect<R: Read>(iter: dotenvy::Iter<R>, origin: &Path) -> Result<BTreeMap<String, String>> {
    let mut vars = BTreeMap::new();
    for item in iter {
        let (key, value) =
            item.map_err(|e| Error::Parse(format!("invalid env file {}: {e}", origin.display())))?;
        vars.insert(key, value);
    }
    Ok(vars)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;

    #[test]
    fn test_parse_dotenv() {
        let vars = parse_dotenv(
            r#"
# database
DB_HOST=localhost
export DB_PORT=5432
DB_NAME="shop db"
GREETING="line one\nline two"
RAW='no \n escapes'
TOKEN=abc # trailing comment
DB_HOST=override
"#,
        )
        .unwrap();
        assert_eq!(vars["DB_HOST"], "override");
        assert_eq!(vars["DB_PORT"], "5432");
        assert_eq!(vars["DB_NAME"], "shop db");
        assert_eq!(vars["GREETING"], "line one\nline two");
        assert_eq!(vars["RAW"], "no \\n escapes");
        assert_eq!(vars["TOKEN"], "abc");
        assert_eq!(vars.len(), 6);
    }

    #[test]
    fn test_malformed_line_is_a_parse_error() {
        assert!(matches!(parse_dotenv("not a line\n"), Err(Error::Parse(_))));
    }

    #[test]
    fn test_load_from_file() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join(".env");
        fs::write(&path, "APP_ENV=test\n").unwrap();
        let vars = load_dotenv(&path).unwrap();
        assert_eq!(vars.get("APP_ENV").map(String::as_str), Some("test"));
    }

    #[test]
    fn test_environment_takes_precedence() {
        let vars = parse_dotenv("DB_HOST=localhost\nDB_PORT=5432\n").unwrap();
        let vars = retain_unset(vars, |key| key == "DB_HOST");
        assert_eq!(vars.get("DB_HOST"), None);
        assert_eq!(vars["DB_PORT"], "5432");
    }

    #[test]
    fn test_missing_file_is_empty() {
        let temp = tempfile::TempDir::new().unwrap();
        assert!(load_dotenv(&temp.path().join(".env")).unwrap().is_empty());
    }
}
