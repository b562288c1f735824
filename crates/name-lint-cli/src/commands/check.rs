//! Check command implementation.

use anyhow::{bail, Context, Result};
use name_lint_core::{Config, Linter};
use name_lint_rules::default_catalog;
use std::io::Write;
use std::path::Path;

use crate::config_resolver::ConfigSource;
use crate::OutputFormat;

/// Runs the check command.
pub fn run(
    workdir: &Path,
    paths: &[String],
    format: OutputFormat,
    warn: bool,
    source: &ConfigSource,
) -> Result<()> {
    if source.paths().is_empty() {
        bail!(
            "No configuration found in {}. Run `name-lint init` to create .name-lint.yml",
            workdir.display()
        );
    }
    if source.is_global() {
        tracing::info!("Using global config: {}", source.paths()[0].display());
    }
    let config = Config::from_files(source.paths()).with_context(|| {
        format!(
            "Failed to load config: {}",
            source
                .paths()
                .iter()
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
                .join(", ")
        )
    })?;

    let mut builder = Linter::builder()
        .root(workdir)
        .catalog(default_catalog())
        .config(config);
    if !paths.is_empty() {
        builder = builder.paths(paths);
    }
    let linter = builder.build().context("Failed to build linter")?;

    tracing::info!("Linting {}", workdir.display());

    let result = match linter.run() {
        Ok(result) => result,
        Err(err) => {
            eprintln!("{:?}", miette::Report::new(err));
            std::process::exit(2);
        }
    };

    tracing::info!("{}", result.statistics);

    if !result.has_violations() || warn {
        let mut stdout = std::io::stdout().lock();
        super::output::write(&mut stdout, &result, format)?;
        stdout.flush()?;
        return Ok(());
    }

    let mut stderr = std::io::stderr().lock();
    super::output::write(&mut stderr, &result, format)?;
    stderr.flush()?;
    std::process::exit(1);
}
