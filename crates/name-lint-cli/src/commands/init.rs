//! Init command implementation.

use anyhow::{bail, Result};
use std::path::Path;

const DEFAULT_CONFIG: &str = r"# name-lint configuration
#
# `ls` maps directories to extension patterns and their rules.
# `.dir` applies to directory names, `.*` to any extension.
# Rules separated by `|` pass if any of them accepts the name.

ls:
  .dir: kebab-case
  .md: SCREAMING_SNAKE_CASE | kebab-case
  .rs: snake_case
  .*: kebab-case | snake_case

  # src:
  #   .ts: camelCase | PascalCase
  #   .test.ts: camelCase
  #   '**/components':
  #     .tsx: PascalCase

ignore:
  - .git
  - target
  - node_modules
";

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    write_config(Path::new(".name-lint.yml"), force)?;

    println!("Created .name-lint.yml");
    println!("\nNext steps:");
    println!("  1. Edit .name-lint.yml to describe your naming conventions");
    println!("  2. Run: name-lint check");

    Ok(())
}

fn write_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }

    std::fs::write(path, DEFAULT_CONFIG)?;
    Ok(())
}
