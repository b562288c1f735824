//! Core types for lint violations and results.

use crate::rule::Rule;
use crate::statistic::Statistics;
use serde::Serialize;
use std::collections::BTreeMap;

/// Extension pattern used for directory rules.
pub const DIR_EXT: &str = ".dir";

/// A rule that took part in a failing group, captured at the time of the
/// failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedRule {
    /// Canonical rule name (e.g., "snakecase").
    pub name: String,
    /// Rule parameters as written in configuration.
    pub parameters: Vec<String>,
    /// Human-readable failure text (e.g., "exists:1-2 (found 0)").
    pub message: String,
}

impl FailedRule {
    /// Captures the current state of a rule.
    #[must_use]
    pub fn capture(rule: &dyn Rule) -> Self {
        Self {
            name: rule.name().to_string(),
            parameters: rule.parameters(),
            message: rule.error_message(),
        }
    }
}

/// A naming violation: one (path, extension pattern) pair whose rule group
/// rejected the entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Root-relative path of the entry (or of the owning directory for
    /// `exists` failures). The root is `""`.
    pub path: String,
    /// Whether the entry is a directory.
    pub dir: bool,
    /// The extension pattern whose rules failed (e.g., `.png`, `.dir`).
    pub ext: String,
    /// The failing rules in declaration order.
    pub rules: Vec<FailedRule>,
}

impl Violation {
    /// Returns the path for display; the root is shown as `.`.
    #[must_use]
    pub fn display_path(&self) -> &str {
        if self.path.is_empty() {
            "."
        } else {
            &self.path
        }
    }

    /// Returns the failure message of every rule.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.rules.iter().map(|r| r.message.clone()).collect()
    }

    /// Formats the violation for terminal output.
    #[must_use]
    pub fn format(&self) -> String {
        use std::fmt::Write;
        let mut output = format!("{}\n", self.display_path());
        let kind = if self.dir { "directory" } else { "file" };
        let _ = writeln!(output, "  {kind} pattern `{}` failed", self.ext);
        for rule in &self.rules {
            let _ = writeln!(output, "  = rule: {}", rule.message);
        }
        output
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} failed for rules: {}",
            self.display_path(),
            self.messages().join("|")
        )
    }
}

/// Result of one lint run.
#[derive(Debug, Default, Clone, Serialize)]
pub struct LintResult {
    /// All violations, walk order first, then `exists` failures.
    pub violations: Vec<Violation>,
    /// Visited and skipped entry counts.
    pub statistics: Statistics,
}

impl LintResult {
    /// Creates a new empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if there are any violations.
    #[must_use]
    pub fn has_violations(&self) -> bool {
        !self.violations.is_empty()
    }

    /// Groups failure messages by display path.
    ///
    /// A path failing several extension patterns gets all of their messages.
    #[must_use]
    pub fn messages_by_path(&self) -> BTreeMap<String, Vec<String>> {
        let mut map: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for violation in &self.violations {
            map.entry(violation.display_path().to_string())
                .or_default()
                .extend(violation.messages());
        }
        map
    }

    /// Prints a summary report to stdout.
    pub fn print_report(&self) {
        for violation in &self.violations {
            println!("{violation}");
        }

        println!(
            "\nFound {} violation(s) in {} file(s) and {} dir(s)",
            self.violations.len(),
            self.statistics.files,
            self.statistics.dirs
        );
    }

    /// Formats violations as a test failure report.
    ///
    /// Produces a human-readable multi-line report suitable for `panic!()` messages
    /// in `cargo test` integration.
    #[must_use]
    pub fn format_test_report(&self) -> String {
        use std::fmt::Write;

        let mut report = String::new();
        let _ = writeln!(
            report,
            "\n=== name-lint: {} violation(s) ===\n",
            self.violations.len()
        );

        for v in &self.violations {
            let _ = writeln!(report, "{}", v.format());
        }

        let _ = writeln!(
            report,
            "Total: {} violation(s) in {} file(s) and {} dir(s)",
            self.violations.len(),
            self.statistics.files,
            self.statistics.dirs
        );

        report
    }
}
