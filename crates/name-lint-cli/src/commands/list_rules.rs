//! List rules command implementation.

use name_lint_rules::default_catalog;

/// Runs the list-rules command.
pub fn run() {
    println!("Available rules:\n");
    println!("{:<20} {:<24} Description", "Name", "Aliases");
    println!("{}", "-".repeat(90));

    for rule in default_catalog().iter() {
        println!(
            "{:<20} {:<24} {}",
            rule.name(),
            rule.aliases().join(", "),
            rule.description()
        );
    }

    println!("\nRule names ignore case and the characters `_`, `-` and `.`.");
    println!("Combine rules with `|`; a name passes if any of them accepts it:");
    println!("  .js: camelCase | PascalCase");
    println!("  .png: snake_case | exists:1-3");
}
