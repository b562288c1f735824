//! Internal runner for `check!()` macro integration.
//!
//! This module is `#[doc(hidden)]` and not part of the public API.
//! It is called by the generated test function from `name_lint::check!()`.

use name_lint_core::{Config, Linter};
use name_lint_rules::default_catalog;
use std::path::{Path, PathBuf};

/// Config file names to search for, in priority order.
const CONFIG_CANDIDATES: &[&str] = &[".name-lint.yml", ".name-lint.yaml", "name-lint.toml"];

/// Runs name-lint as part of `cargo test`.
///
/// Called by the `check!()` macro-generated test function.
///
/// # Panics
///
/// Panics with a formatted report if violations are found, or if the
/// configuration cannot be loaded or the linter fails.
pub fn run_check(config_path: Option<&str>) {
    let root = find_project_root();
    let config = load_config(&root, config_path);

    let linter = Linter::builder()
        .root(&root)
        .catalog(default_catalog())
        .config(config)
        .build()
        .unwrap_or_else(|e| panic!("name-lint: failed to build linter: {e}"));

    let result = linter
        .run()
        .unwrap_or_else(|e| panic!("name-lint: lint failed: {e}"));

    if result.has_violations() {
        panic!("{}", result.format_test_report());
    }
}

/// Loads the explicit config (relative to `root` unless absolute) or the
/// first candidate present in `root`.
///
/// Returns the default (empty) configuration if no config file is found.
fn load_config(root: &Path, explicit_path: Option<&str>) -> Config {
    let path = match explicit_path {
        Some(path) if Path::new(path).is_absolute() => Some(PathBuf::from(path)),
        Some(path) => Some(root.join(path)),
        None => CONFIG_CANDIDATES
            .iter()
            .map(|candidate| root.join(candidate))
            .find(|path| path.exists()),
    };

    let Some(path) = path else {
        return Config::default();
    };
    Config::from_file(&path).unwrap_or_else(|e| {
        panic!("name-lint: failed to load config from {}: {e}", path.display());
    })
}

/// Checks whether a `Cargo.toml` file defines a `[workspace]` section
/// by parsing as TOML, avoiding false positives from comments or strings.
fn has_workspace_section(cargo_toml: &Path) -> bool {
    let Ok(content) = std::fs::read_to_string(cargo_toml) else {
        return false;
    };
    let Ok(table) = content.parse::<toml::Table>() else {
        return false;
    };
    table.contains_key("workspace")
}

/// Finds the workspace root by walking up from `CARGO_MANIFEST_DIR`.
fn find_project_root() -> PathBuf {
    if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
        return find_workspace_root(Path::new(&manifest_dir));
    }
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

/// Returns the nearest ancestor of `start` (itself included) whose
/// `Cargo.toml` has a `[workspace]` table, or `start` if there is none.
fn find_workspace_root(start: &Path) -> PathBuf {
    start
        .ancestors()
        .find(|dir| has_workspace_section(&dir.join("Cargo.toml")))
        .unwrap_or(start)
        .to_path_buf()
}
