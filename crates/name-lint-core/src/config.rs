//! Configuration types for name-lint.
//!
//! A configuration has two parts: `ls`, a tree of path segments whose leaves
//! map extension patterns to rule specifications, and `ignore`, a list of
//! paths (or globs) excluded from the walk.
//!
//! ```yaml
//! ls:
//!   .rs: snake_case
//!   src:
//!     .dir: snake_case
//!     .md: SCREAMING_SNAKE_CASE | exists:0-1
//! ignore:
//!   - target
//!   - .git
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error reading the config file.
    #[error("failed to read config at {path}: {source}")]
    Io {
        /// Path to the config file.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// YAML parse error.
    #[error("failed to parse YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// TOML parse error.
    #[error("failed to parse TOML config: {0}")]
    Toml(#[from] toml::de::Error),
}

/// One node of the `ls` tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RuleDeclaration {
    /// Pipe-separated rule specifications, e.g. `snake_case | exists:1`.
    Rules(String),
    /// A nested path segment.
    Nested(BTreeMap<String, RuleDeclaration>),
    /// An explicit `null`; skipped.
    Empty,
}

/// The `ls` tree: keys are extension patterns (`.png`, `.dir`) or path
/// segments (`src`, `src/**/components`).
pub type Ls = BTreeMap<String, RuleDeclaration>;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Naming rules keyed by path and extension pattern.
    #[serde(default)]
    pub ls: Ls,

    /// Paths to skip. Directories are not descended into.
    #[serde(default)]
    pub ignore: Vec<String>,
}

impl Config {
    /// Creates a configuration from an `ls` tree and ignore list.
    #[must_use]
    pub fn new(ls: Ls, ignore: Vec<String>) -> Self {
        Self { ls, ignore }
    }

    /// Loads configuration from a file. `.toml` files are parsed as TOML,
    /// everything else as YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let is_toml = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
        if is_toml {
            Self::parse_toml(&content)
        } else {
            Self::parse_yaml(&content)
        }
    }

    /// Loads and merges several configuration files in order.
    ///
    /// # Errors
    ///
    /// Returns the first load error.
    pub fn from_files<P: AsRef<Path>>(paths: &[P]) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        for path in paths {
            config.merge(Self::from_file(path.as_ref())?);
        }
        Ok(config)
    }

    /// Parses configuration from a YAML string. An empty document yields the
    /// default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is invalid.
    pub fn parse_yaml(content: &str) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Merges `other` into `self`.
    ///
    /// Top-level `ls` keys of `other` replace those of `self`; ignore lists
    /// are concatenated, sorted and deduplicated.
    pub fn merge(&mut self, other: Self) {
        self.ls.extend(other.ls);
        self.ignore.extend(other.ignore);
        self.ignore.sort();
        self.ignore.dedup();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn parse_yaml_nested_tree() {
        let config = Config::parse_yaml(
            r"
ls:
  .png: snake_case
  src:
    .dir: kebab-case
    components:
      .tsx: PascalCase | exists:1
    legacy: ~
ignore:
  - node_modules
",
        )
        .unwrap();

        assert_eq!(
            config.ls.get(".png"),
            Some(&RuleDeclaration::Rules("snake_case".into()))
        );
        let Some(RuleDeclaration::Nested(src)) = config.ls.get("src") else {
            panic!("src should be nested");
        };
        assert_eq!(src.get("legacy"), Some(&RuleDeclaration::Empty));
        assert!(matches!(
            src.get("components"),
            Some(RuleDeclaration::Nested(_))
        ));
        assert_eq!(config.ignore, vec!["node_modules".to_string()]);
    }

    #[test]
    fn parse_yaml_empty_document() {
        assert_eq!(Config::parse_yaml("").unwrap(), Config::default());
        assert_eq!(Config::parse_yaml("  \n").unwrap(), Config::default());
    }

    #[test]
    fn parse_yaml_rejects_garbage() {
        assert!(matches!(
            Config::parse_yaml("ls: [1, 2"),
            Err(ConfigError::Yaml(_))
        ));
    }

    #[test]
    fn parse_toml_nested_tree() {
        let config = Config::parse_toml(
            r#"
ignore = ["target"]

[ls]
".rs" = "snake_case"

[ls.src]
".dir" = "snake_case"
"#,
        )
        .unwrap();

        assert_eq!(
            config.ls.get(".rs"),
            Some(&RuleDeclaration::Rules("snake_case".into()))
        );
        assert!(matches!(config.ls.get("src"), Some(RuleDeclaration::Nested(_))));
        assert_eq!(config.ignore, vec!["target".to_string()]);
    }

    #[test]
    fn from_file_picks_format_by_extension() {
        let tmp = TempDir::new().unwrap();
        let yaml = tmp.path().join(".name-lint.yml");
        let toml = tmp.path().join("name-lint.toml");
        fs::write(&yaml, "ls:\n  .png: snake_case\n").unwrap();
        fs::write(&toml, "[ls]\n\".jpg\" = \"kebab-case\"\n").unwrap();

        assert!(Config::from_file(&yaml).unwrap().ls.contains_key(".png"));
        assert!(Config::from_file(&toml).unwrap().ls.contains_key(".jpg"));
    }

    #[test]
    fn from_file_missing_is_io_error() {
        let tmp = TempDir::new().unwrap();
        let err = Config::from_file(&tmp.path().join("missing.yml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn merge_overrides_ls_and_dedups_ignore() {
        let mut base = Config::parse_yaml(
            "ls:\n  .png: snake_case\n  .jpg: snake_case\nignore: [node_modules, .git]\n",
        )
        .unwrap();
        let overlay =
            Config::parse_yaml("ls:\n  .png: kebab-case\nignore: [.git, target]\n").unwrap();

        base.merge(overlay);

        assert_eq!(
            base.ls.get(".png"),
            Some(&RuleDeclaration::Rules("kebab-case".into()))
        );
        assert_eq!(
            base.ls.get(".jpg"),
            Some(&RuleDeclaration::Rules("snake_case".into()))
        );
        assert_eq!(base.ignore, vec![".git", "node_modules", "target"]);
    }

    #[test]
    fn from_files_merges_in_order() {
        let tmp = TempDir::new().unwrap();
        let first = tmp.path().join("a.yml");
        let second = tmp.path().join("b.yml");
        fs::write(&first, "ls:\n  .png: snake_case\n").unwrap();
        fs::write(&second, "ls:\n  .png: PascalCase\n").unwrap();

        let config = Config::from_files(&[first, second]).unwrap();
        assert_eq!(
            config.ls.get(".png"),
            Some(&RuleDeclaration::Rules("PascalCase".into()))
        );
    }
}
