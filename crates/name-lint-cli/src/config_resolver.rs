//! Configuration file resolution with global fallback.
//!
//! Resolves the configuration files using a deterministic priority order:
//!
//! 1. `--config` flags (explicit paths, merged in order)
//! 2. `{workdir}/.name-lint.yml`, `.name-lint.yaml` or `name-lint.toml`
//! 3. `~/.name-lint/config.yml` (global fallback)
//! 4. No config found → the check command refuses to run

use std::path::{Path, PathBuf};

/// Where the configuration was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Explicitly specified via one or more `--config` flags.
    Explicit(Vec<PathBuf>),
    /// Found in the work directory.
    Project(PathBuf),
    /// Loaded from the global config directory (`~/.name-lint/`).
    Global(PathBuf),
    /// No config found.
    NotFound,
}

impl ConfigSource {
    /// Returns the resolved paths in merge order.
    #[must_use]
    pub fn paths(&self) -> &[PathBuf] {
        match self {
            Self::Explicit(paths) => paths,
            Self::Project(p) | Self::Global(p) => std::slice::from_ref(p),
            Self::NotFound => &[],
        }
    }

    /// Returns `true` if the config was loaded from the global directory.
    #[must_use]
    pub fn is_global(&self) -> bool {
        matches!(self, Self::Global(_))
    }
}

/// Project-level config file names, checked in order.
pub const PROJECT_CONFIG_NAMES: &[&str] = &[".name-lint.yml", ".name-lint.yaml", "name-lint.toml"];

/// Config file name within the global config directory.
const GLOBAL_CONFIG_NAME: &str = "config.yml";

/// Resolves the configuration files.
///
/// See module-level docs for resolution order.
#[must_use]
pub fn resolve(workdir: &Path, explicit: &[PathBuf]) -> ConfigSource {
    resolve_inner(workdir, explicit, global_config_dir())
}

/// Testable core: accepts `global_dir` as parameter to avoid env var races.
fn resolve_inner(workdir: &Path, explicit: &[PathBuf], global_dir: Option<PathBuf>) -> ConfigSource {
    if !explicit.is_empty() {
        return ConfigSource::Explicit(explicit.to_vec());
    }

    for name in PROJECT_CONFIG_NAMES {
        let candidate = workdir.join(name);
        if candidate.exists() {
            tracing::debug!("Found project config: {}", candidate.display());
            return ConfigSource::Project(candidate);
        }
    }

    if let Some(dir) = global_dir {
        let candidate = dir.join(GLOBAL_CONFIG_NAME);
        if candidate.exists() {
            tracing::debug!("Found global config: {}", candidate.display());
            return ConfigSource::Global(candidate);
        }
    }

    ConfigSource::NotFound
}

/// Returns the global config directory path.
///
/// Resolution: `$NAME_LINT_CONFIG_DIR` > `~/.name-lint/`
#[must_use]
pub fn global_config_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var("NAME_LINT_CONFIG_DIR") {
        return Some(PathBuf::from(dir));
    }
    home::home_dir().map(|h| h.join(".name-lint"))
}
