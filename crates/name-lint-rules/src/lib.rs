//! # name-lint-rules
//!
//! Built-in naming rules for name-lint.
//!
//! ## Available Rules
//!
//! | Name | Parameters | Description |
//! |------|------------|-------------|
//! | `camelcase` | | `camelCase` |
//! | `pascalcase` | | `PascalCase` |
//! | `pascalcaseacronym` | | `PascalCase` with acronyms up to five capitals |
//! | `snakecase` | | `snake_case` |
//! | `screamingsnakecase` | | `SCREAMING_SNAKE_CASE` |
//! | `kebabcase` | | `kebab-case` |
//! | `flatcase` | | lowercase letters and digits |
//! | `lowercase` | | no uppercase letters |
//! | `pointcase` | | `point.case` |
//! | `uppercasedigit` | | uppercase letters and digits |
//! | `regex` | `[!]pattern` | whole-name match, `${N}` inserts a path segment |
//! | `not_regex` | `pattern` | whole-name mismatch |
//! | `disallow` | `[message]` | always fails |
//! | `exists` | `[N \| N-M]` | entry count in the declaring directory |
//!
//! Names are matched case-insensitively and ignore `_`, `-` and `.`, so
//! `snake_case` and `SnakeCase` both select `snakecase`.
//!
//! ## Usage
//!
//! ```ignore
//! use name_lint_core::Linter;
//!
//! let linter = Linter::builder()
//!     .root(".")
//!     .catalog(name_lint_rules::default_catalog())
//!     .config(config)
//!     .build()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod case;
mod catalog;
mod disallow;
mod exists;
mod pattern;

pub use case::{CaseRule, CaseStyle};
pub use catalog::{all_rules, default_catalog};
pub use disallow::DisallowRule;
pub use exists::{ExistsRule, MAX_OCCURRENCES};
pub use pattern::{NotRegexRule, RegexRule};

/// Re-export core types for convenience.
pub use name_lint_core::{Rule, RuleBox, RuleCatalog, RuleError};
