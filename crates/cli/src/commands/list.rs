use firelancer_codegen_core::CommandRegistry;
use std::collections::BTreeMap;

pub fn list_commands() {
    let registry = CommandRegistry::builtin();
    let mut by_category: BTreeMap<&str, Vec<_>> = BTreeMap::new();
    for command in registry.commands() {
        by_category.entry(command.category()).or_default().push(command);
    }

    println!("📋 Available commands:");
    for (category, commands) in by_category {
        println!("\n{category}:");
        for command in commands {
            println!("  {:<24} {}", command.id(), command.description());
        }
    }
}
