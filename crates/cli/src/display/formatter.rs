use firelancer_codegen_core::{CommandOutcome, CommandResult};
use serde_json::Value;
use std::path::Path;

pub fn print_outcome(outcome: &CommandOutcome) {
    match outcome {
        CommandOutcome::Completed(result) => print_result(result),
        CommandOutcome::Cancelled { reason } => print_cancelled(reason),
    }
}

pub fn print_cancelled(reason: &str) {
    println!("🚫 Cancelled: {reason}");
}

pub fn print_result(result: &CommandResult) {
    let payload = &result.payload;
    match payload["status"].as_str() {
        Some("no-changes") => println!("✨ No changes in database schema were found"),
        Some("already-present") => println!(
            "✨ {} is already in the plugins array",
            payload["plugin"].as_str().unwrap_or("Plugin")
        ),
        _ => {}
    }
    if let Some(executed) = payload["executed"].as_array() {
        if executed.is_empty() {
            println!("✨ No pending migrations");
        }
        for name in executed.iter().filter_map(Value::as_str) {
            println!("✅ Ran migration {name}");
        }
    }
    if payload.get("reverted").is_some() {
        match payload["reverted"].as_str() {
            Some(name) => println!("✅ Reverted migration {name}"),
            None => println!("✨ No migration to revert"),
        }
    }

    for file in &result.modified_source_files {
        println!("✅ Wrote {}", display_path(&result.project.root, file));
    }
}

/// Human-readable form of the `project:analyze` report
pub fn print_analysis(result: &CommandResult) {
    let payload = &result.payload;
    let root = &result.project.root;

    println!("🔍 Analyzing: {}", result.project.tsconfig.display());
    println!("{}", "=".repeat(80));
    println!(
        "📄 Source files: {}",
        payload["sourceFiles"].as_u64().unwrap_or(0)
    );

    match (&payload["config"], payload["configError"].as_str()) {
        (Value::Object(config), _) => println!(
            "⚙️  Config: `{}` in {}:{}",
            config["name"].as_str().unwrap_or_default(),
            display_path(root, Path::new(config["file"].as_str().unwrap_or_default())),
            config["line"]
        ),
        (_, Some(error)) => println!("⚠️  Config: {error}"),
        _ => println!("⚠️  Config: not found"),
    }

    for (title, key) in [
        ("🧩 Plugins", "plugins"),
        ("🗃️  Entities", "entities"),
        ("🛠️  Services", "services"),
        ("📦 Migrations", "migrations"),
    ] {
        let items = payload[key].as_array().cloned().unwrap_or_default();
        println!("\n{title} ({}):", items.len());
        for item in &items {
            let translatable = if item["translatable"].as_bool() == Some(true) {
                " [translatable]"
            } else {
                ""
            };
            println!(
                "  - {}{translatable} ({}:{})",
                item["name"].as_str().unwrap_or_default(),
                display_path(root, Path::new(item["file"].as_str().unwrap_or_default())),
                item["line"]
            );
        }
    }
}

/// Path relative to the project root when inside it
pub fn display_path(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .map(|relative| relative.display().to_string())
        .unwrap_or_else(|_| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_path() {
        let root = Path::new("/app");
        assert_eq!(display_path(root, Path::new("/app/src/a.ts")), "src/a.ts");
        assert_eq!(display_path(root, Path::new("/srv/b.ts")), "/srv/b.ts");
    }
}
