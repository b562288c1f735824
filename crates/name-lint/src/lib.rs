//! # name-lint
//!
//! Linter for file and directory naming conventions.
//!
//! This is the main facade crate that re-exports the core engine and the
//! built-in rules.
//!
//! ## Quick Start: `cargo test` Integration
//!
//! ```toml
//! [dev-dependencies]
//! name-lint = "0.4"
//! ```
//!
//! ```rust,ignore
//! // tests/naming.rs
//! name_lint::check!();
//! ```
//!
//! This lints the workspace as part of `cargo test`. Configure via
//! `.name-lint.yml` at the workspace root, or point at another file:
//!
//! ```rust,ignore
//! name_lint::check!(config = "config/naming.yml");
//! ```
//!
//! ## Configuration
//!
//! ```yaml
//! ls:
//!   .dir: kebab-case
//!   .js: camelCase | PascalCase
//!   src:
//!     .test.js: camelCase
//!     '**/components':
//!       .tsx: PascalCase
//!       .dir: kebab-case | exists:1
//!
//! ignore:
//!   - node_modules
//! ```
//!
//! ## Programmatic Usage
//!
//! ```rust,ignore
//! use name_lint::{Config, Linter};
//!
//! let linter = Linter::builder()
//!     .root(".")
//!     .catalog(name_lint::rules::default_catalog())
//!     .config(Config::from_file(".name-lint.yml".as_ref())?)
//!     .build()?;
//!
//! let result = linter.run()?;
//! ```

#![forbid(unsafe_code)]

// Re-export core types and traits
pub use name_lint_core::*;

/// Built-in rules and the default catalog.
pub mod rules {
    pub use name_lint_rules::*;
}

mod runner;

#[doc(hidden)]
pub mod __internal {
    pub use crate::runner::run_check;
}

/// Generates a `#[test]` that lints the workspace.
///
/// The test walks up from `CARGO_MANIFEST_DIR` to the workspace root, loads
/// `.name-lint.yml` (or the given `config`, relative to the root) and panics
/// with a report when names violate the configuration.
///
/// ```rust,ignore
/// name_lint::check!();
/// name_lint::check!(config = "crates/app/naming.yml");
/// ```
#[macro_export]
macro_rules! check {
    () => {
        #[test]
        fn name_lint_check() {
            $crate::__internal::run_check(::core::option::Option::None);
        }
    };
    (config = $config:expr $(,)?) => {
        #[test]
        fn name_lint_check() {
            $crate::__internal::run_check(::core::option::Option::Some($config));
        }
    };
}
