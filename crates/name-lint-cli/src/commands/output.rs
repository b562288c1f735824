//! Shared output formatting for lint results.

use anyhow::Result;
use name_lint_core::LintResult;
use std::io::Write;

use crate::OutputFormat;

/// Writes lint results in the specified format.
pub fn write(out: &mut dyn Write, result: &LintResult, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => write_text(out, result)?,
        OutputFormat::Json => write_json(out, result)?,
        OutputFormat::Compact => write_compact(out, result)?,
    }
    Ok(())
}

fn write_text(out: &mut dyn Write, result: &LintResult) -> std::io::Result<()> {
    if !result.has_violations() {
        return Ok(());
    }

    for violation in &result.violations {
        writeln!(out, "{violation}")?;
    }
    writeln!(
        out,
        "\nFound {} violation(s) in {} file(s) and {} dir(s)",
        result.violations.len(),
        result.statistics.files,
        result.statistics.dirs
    )
}

fn write_json(out: &mut dyn Write, result: &LintResult) -> Result<()> {
    let json = serde_json::to_string_pretty(&result.messages_by_path())?;
    writeln!(out, "{json}")?;
    Ok(())
}

fn write_compact(out: &mut dyn Write, result: &LintResult) -> std::io::Result<()> {
    for violation in &result.violations {
        for rule in &violation.rules {
            writeln!(
                out,
                "{}: {} [{}] {}",
                violation.display_path(),
                if violation.dir { "dir" } else { "file" },
                violation.ext,
                rule.message
            )?;
        }
    }
    Ok(())
}
