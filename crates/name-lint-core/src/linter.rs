//! The linter: walks the tree and validates every entry against the index.

use crate::catalog::RuleCatalog;
use crate::config::Config;
use crate::fs::{self, EntryKind, FileSystem, FsError, OsFileSystem};
use crate::glob::IgnoreIndex;
use crate::index::{IndexError, RuleIndex};
use crate::rule::{RuleBox, RuleError};
use crate::statistic::Statistic;
use crate::types::{FailedRule, LintResult, Violation, DIR_EXT};

use miette::Diagnostic;
use rayon::prelude::*;
use std::collections::{BTreeSet, HashSet};
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info};

/// Errors that abort a lint run.
#[derive(Debug, Error, Diagnostic)]
pub enum LintError {
    /// Configuration could not be compiled into an index.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Index(#[from] IndexError),

    /// Filesystem failure or malformed glob.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Fs(#[from] FsError),

    /// A rule failed to validate an entry.
    #[error("validation of {path} failed: {source}")]
    #[diagnostic(code(name_lint::rule))]
    Rule {
        /// Path of the entry being validated.
        path: String,
        /// What the rule reported.
        source: RuleError,
    },

    /// The builder was not given a rule catalog.
    #[error("no rule catalog configured")]
    #[diagnostic(
        code(name_lint::builder::catalog),
        help("pass one with `Linter::builder().catalog(...)`")
    )]
    MissingCatalog,
}

/// Builder for configuring a [`Linter`].
#[derive(Default)]
pub struct LinterBuilder {
    catalog: Option<RuleCatalog>,
    config: Option<Config>,
    filesystem: Option<Box<dyn FileSystem>>,
    root: Option<PathBuf>,
    paths: Option<BTreeSet<String>>,
}

impl LinterBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the rule catalog used to resolve rule names.
    #[must_use]
    pub fn catalog(mut self, catalog: RuleCatalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Lints the real filesystem below `root`.
    #[must_use]
    pub fn root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = Some(root.into());
        self
    }

    /// Lints an arbitrary filesystem (takes precedence over [`Self::root`]).
    #[must_use]
    pub fn filesystem<F: FileSystem + 'static>(mut self, filesystem: F) -> Self {
        self.filesystem = Some(Box::new(filesystem));
        self
    }

    /// Restricts validation to these paths and everything below them.
    ///
    /// The whole tree is still walked and counted; only naming rules of
    /// entries outside the selection are not evaluated, and `exists` checks
    /// are limited to groups that saw a selected entry.
    #[must_use]
    pub fn paths<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.paths
            .get_or_insert_with(BTreeSet::new)
            .extend(paths.into_iter().map(|p| fs::normalize(p.as_ref())));
        self
    }

    /// Builds the linter.
    ///
    /// # Errors
    ///
    /// Returns an error if no catalog was supplied.
    pub fn build(self) -> Result<Linter, LintError> {
        let catalog = self.catalog.ok_or(LintError::MissingCatalog)?;
        let filesystem = self.filesystem.unwrap_or_else(|| {
            Box::new(OsFileSystem::new(
                self.root.unwrap_or_else(|| PathBuf::from(".")),
            ))
        });

        Ok(Linter {
            catalog,
            config: self.config.unwrap_or_default(),
            filesystem,
            paths: self.paths,
        })
    }
}

/// Validates a tree against a naming configuration.
///
/// Use [`Linter::builder()`] to construct an instance. Every call to
/// [`Linter::run`] compiles a fresh index, so runs never share state.
pub struct Linter {
    catalog: RuleCatalog,
    config: Config,
    filesystem: Box<dyn FileSystem>,
    paths: Option<BTreeSet<String>>,
}

impl Linter {
    /// Creates a new builder for configuring a linter.
    #[must_use]
    pub fn builder() -> LinterBuilder {
        LinterBuilder::new()
    }

    /// Returns the configuration in use.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the rule catalog in use.
    #[must_use]
    pub fn catalog(&self) -> &RuleCatalog {
        &self.catalog
    }

    /// Walks the tree and returns all violations.
    ///
    /// # Errors
    ///
    /// Returns an error for configuration problems (unknown rules, bad
    /// parameters, malformed globs), filesystem failures, and rules that
    /// cannot validate a value. No partial result is returned.
    pub fn run(&self) -> Result<LintResult, LintError> {
        let fs = self.filesystem.as_ref();

        let mut index = RuleIndex::build(&self.config.ls, &self.catalog)?;
        index.expand(fs)?;
        let mut ignore = IgnoreIndex::new(&self.config.ignore);
        ignore.expand(fs)?;

        info!("Linting with {} indexed path(s)", index.len());

        let mut walk = Walk {
            index: &index,
            ignore: &ignore,
            fs,
            paths: self.paths.as_ref(),
            statistic: Statistic::new(),
            visited: HashSet::new(),
            violations: Vec::new(),
        };
        walk.run()?;
        walk.check_exists()?;

        let result = LintResult {
            violations: walk.violations,
            statistics: walk.statistic.snapshot(),
        };

        info!(
            "Lint complete: {} violation(s), {}",
            result.violations.len(),
            result.statistics
        );

        Ok(result)
    }
}

/// State of one traversal.
struct Walk<'a> {
    index: &'a RuleIndex,
    ignore: &'a IgnoreIndex,
    fs: &'a dyn FileSystem,
    paths: Option<&'a BTreeSet<String>>,
    statistic: Statistic,
    visited: HashSet<(String, String)>,
    violations: Vec<Violation>,
}

/// A matched rule group for one entry.
struct Target<'a> {
    path: &'a str,
    dir: bool,
    owning: &'a str,
    ext: &'a str,
    value: &'a str,
    rules: &'a [RuleBox],
    counts: bool,
}

impl Walk<'_> {
    fn run(&mut self) -> Result<(), LintError> {
        let mut stack = vec![(String::new(), EntryKind::Dir)];

        while let Some((path, kind)) = stack.pop() {
            if self.ignore.is_ignored(&path) {
                if kind.is_dir() {
                    debug!("skip dir: {path}");
                    self.statistic.add_dir_skip();
                } else {
                    debug!("skip file: {path}");
                    self.statistic.add_file_skip();
                }
                continue;
            }

            match kind {
                EntryKind::Dir => {
                    debug!("lint dir: {}", display(&path));
                    self.statistic.add_dir();
                    self.validate_dir(&path)?;

                    let children = self.fs.read_dir(&path)?;
                    stack.extend(
                        children
                            .into_iter()
                            .rev()
                            .map(|entry| (fs::join(&path, &entry.name), entry.kind)),
                    );
                }
                EntryKind::File => {
                    debug!("lint file: {path}");
                    self.statistic.add_file();
                    self.validate_file(&path)?;
                }
            }
        }

        Ok(())
    }

    fn validate_dir(&mut self, path: &str) -> Result<(), LintError> {
        if path.is_empty() {
            return Ok(());
        }
        let index = self.index;
        let Some((owning, group)) = index.resolve(path) else {
            return Ok(());
        };
        let Some(rules) = group.get(DIR_EXT) else {
            return Ok(());
        };

        self.evaluate(&Target {
            path,
            dir: true,
            owning,
            ext: DIR_EXT,
            value: fs::basename(path),
            rules,
            counts: path == owning,
        })
    }

    fn validate_file(&mut self, path: &str) -> Result<(), LintError> {
        let index = self.index;
        let Some((owning, group)) = index.resolve(path) else {
            return Ok(());
        };
        let basename = fs::basename(path);

        let Some((ext, value)) = match_extension(basename, group.keys().map(String::as_str))
        else {
            return Ok(());
        };
        let Some(rules) = group.get(ext) else {
            return Ok(());
        };

        self.evaluate(&Target {
            path,
            dir: false,
            owning,
            ext,
            value,
            rules,
            counts: fs::parent(path) == owning,
        })
    }

    fn is_selected(&self, path: &str) -> bool {
        let Some(paths) = self.paths else {
            return true;
        };
        if paths.contains("") || paths.contains(path) {
            return true;
        }
        path.match_indices('/')
            .any(|(i, _)| paths.contains(&path[..i]))
    }

    /// Runs every rule of the group concurrently and records a violation
    /// when all non-exclusive rules reject the value.
    fn evaluate(&mut self, target: &Target<'_>) -> Result<(), LintError> {
        let selected = self.is_selected(target.path);
        if selected {
            self.visited
                .insert((target.owning.to_string(), target.ext.to_string()));
        }

        let outcomes = target
            .rules
            .par_iter()
            .map(|rule| -> Result<Option<bool>, RuleError> {
                if rule.is_exclusive() {
                    if target.counts {
                        rule.validate(target.value, target.owning, false)?;
                    }
                    Ok(None)
                } else if selected {
                    rule.validate(target.value, target.owning, true).map(Some)
                } else {
                    Ok(None)
                }
            })
            .collect::<Result<Vec<Option<bool>>, RuleError>>()
            .map_err(|source| LintError::Rule {
                path: target.path.to_string(),
                source,
            })?;

        let evaluated = outcomes.iter().flatten().count();
        let failed = outcomes.iter().flatten().filter(|valid| !**valid).count();
        if evaluated == 0 || failed != evaluated {
            return Ok(());
        }

        self.violations.push(Violation {
            path: target.path.to_string(),
            dir: target.dir,
            ext: target.ext.to_string(),
            rules: target
                .rules
                .iter()
                .filter(|rule| !rule.is_exclusive())
                .map(|rule| FailedRule::capture(rule.as_ref()))
                .collect(),
        });
        Ok(())
    }

    /// Final pass: every exclusive rule is checked once at its owning path.
    fn check_exists(&mut self) -> Result<(), LintError> {
        let index = self.index;
        for (owning, group) in index.iter() {
            for (ext, rules) in group {
                if self.paths.is_some()
                    && !self.visited.contains(&(owning.to_string(), ext.clone()))
                {
                    debug!("skip exists check: {}{ext}", display(owning));
                    continue;
                }

                let mut failed = Vec::new();
                for rule in rules.iter().filter(|rule| rule.is_exclusive()) {
                    let valid = rule.validate("", owning, true).map_err(|source| {
                        LintError::Rule {
                            path: owning.to_string(),
                            source,
                        }
                    })?;
                    if !valid {
                        failed.push(FailedRule::capture(rule.as_ref()));
                    }
                }

                if !failed.is_empty() {
                    self.violations.push(Violation {
                        path: owning.to_string(),
                        dir: ext == DIR_EXT,
                        ext: ext.clone(),
                        rules: failed,
                    });
                }
            }
        }
        Ok(())
    }
}

fn display(path: &str) -> &str {
    if path.is_empty() {
        "."
    } else {
        path
    }
}

/// Finds the declared extension pattern matching `basename`.
///
/// The basename is split on `.` into a value and N extension segments.
/// Only keys with exactly N segments can match; each of their segments
/// is either equal to the name's segment or `*`. When several keys
/// match, the one whose wildcards sit furthest right wins, so
/// `a.service.gif` prefers `.service.gif`, then `.service.*`, then
/// `.*.gif`, then `.*.*`. A name without a dot tries `name.`, `.` and
/// `.*`.
///
/// Returns the matched key and the value to validate.
pub(crate) fn match_extension<'k, 'v>(
    basename: &'v str,
    keys: impl IntoIterator<Item = &'k str>,
) -> Option<(&'k str, &'v str)> {
    let mut parts = basename.split('.');
    let value = parts.next().unwrap_or_default();
    let segments: Vec<&str> = parts.collect();
    let keys: Vec<&'k str> = keys.into_iter().collect();

    if segments.is_empty() {
        let bare = format!("{basename}.");
        return [bare.as_str(), ".", ".*"]
            .into_iter()
            .find_map(|candidate| keys.iter().copied().find(|key| *key == candidate))
            .map(|key| (key, value));
    }

    keys.into_iter()
        .filter_map(|key| wildcards(key, &segments).map(|mask| (mask, key)))
        .min()
        .map(|(_, key)| (key, value))
}

/// Marks which segments of `key` are wildcards, or `None` if `key` does
/// not cover exactly `segments`.
fn wildcards(key: &str, segments: &[&str]) -> Option<Vec<bool>> {
    let mut parts = key.strip_prefix('.')?.split('.');
    let mut mask = Vec::with_capacity(segments.len());
    for segment in segments {
        match parts.next()? {
            "*" => mask.push(true),
            part if part == *segment => mask.push(false),
            _ => return None,
        }
    }
    parts.next().is_none().then_some(mask)
}
