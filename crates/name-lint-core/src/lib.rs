//! # name-lint-core
//!
//! Core engine for linting file and directory names.
//!
//! This crate provides the foundational traits and types for building
//! a naming linter. It includes:
//!
//! - [`Rule`] trait for naming rules and [`RuleCatalog`] to look them up
//! - [`RuleIndex`] compiling a nested configuration into path-keyed rule
//!   groups, with glob expansion and longest-prefix resolution
//! - [`FileSystem`] abstraction with real and in-memory implementations
//! - [`Linter`] walking a tree and reporting [`Violation`]s
//!
//! ## Example
//!
//! ```ignore
//! use name_lint_core::{Config, Linter};
//!
//! let linter = Linter::builder()
//!     .root(".")
//!     .catalog(name_lint_rules::default_catalog())
//!     .config(Config::from_file(".name-lint.yml".as_ref())?)
//!     .build()?;
//!
//! let result = linter.run()?;
//! result.print_report();
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod catalog;
mod config;
mod glob;
mod index;
mod linter;
mod rule;
mod statistic;
mod types;

/// Filesystem abstraction and path helpers.
pub mod fs;

pub use catalog::{normalize_rule_name, RuleCatalog};
pub use config::{Config, ConfigError, Ls, RuleDeclaration};
pub use fs::{EntryKind, FileSystem, FsError, MemoryFileSystem, OsFileSystem};
pub use glob::{is_glob, IgnoreIndex};
pub use index::{copy_group, split_rule_specs, IndexError, RuleGroup, RuleIndex};
pub use linter::{LintError, Linter, LinterBuilder};
pub use rule::{Rule, RuleBox, RuleError};
pub use statistic::Statistics;
pub use types::{FailedRule, LintResult, Violation, DIR_EXT};
