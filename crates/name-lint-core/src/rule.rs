//! Rule trait for defining naming rules.

use thiserror::Error;

/// Errors raised by a rule, either while applying its parameters or while
/// validating a value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    /// The rule requires a parameter but none (or an empty one) was given.
    #[error("rule `{rule}` requires a parameter")]
    MissingParameter {
        /// Name of the rule.
        rule: &'static str,
    },

    /// The parameter could not be parsed.
    #[error("rule `{rule}` got invalid parameter `{parameter}`: {message}")]
    InvalidParameter {
        /// Name of the rule.
        rule: &'static str,
        /// The raw parameter text.
        parameter: String,
        /// What was wrong with it.
        message: String,
    },

    /// Validation could not be carried out (e.g. a pattern built from path
    /// segments does not compile).
    #[error("rule `{rule}` failed to validate `{value}`: {message}")]
    Validation {
        /// Name of the rule.
        rule: &'static str,
        /// The value that was being validated.
        value: String,
        /// Underlying failure.
        message: String,
    },
}

/// A naming rule applied to file and directory names.
///
/// Rules are created from a prototype in the [`RuleCatalog`](crate::RuleCatalog),
/// receive their parameters once via [`Rule::set_parameters`], and are then
/// only accessed through `&self`. Rules that accumulate state (such as an
/// occurrence counter) must use interior mutability that is safe under
/// concurrent calls.
///
/// # Example
///
/// ```ignore
/// use name_lint_core::{Rule, RuleBox, RuleError};
///
/// #[derive(Debug, Clone)]
/// pub struct NoSpaces;
///
/// impl Rule for NoSpaces {
///     fn name(&self) -> &'static str { "nospaces" }
///
///     fn validate(&self, value: &str, _path: &str, _strict: bool) -> Result<bool, RuleError> {
///         Ok(!value.contains(' '))
///     }
///
///     fn copy(&self) -> RuleBox { Box::new(self.clone()) }
/// }
/// ```
pub trait Rule: Send + Sync + std::fmt::Debug {
    /// Returns the canonical name of this rule (e.g., "snakecase").
    fn name(&self) -> &'static str;

    /// Returns alternative spellings accepted in configuration files.
    ///
    /// Lookup in the catalog is already case-insensitive and ignores `_`,
    /// `-` and `.`, so these are only used for display.
    fn aliases(&self) -> &'static [&'static str] {
        &[]
    }

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Applies the raw parameter text following `name:` in a rule
    /// specification. `None` means no `:` was present.
    ///
    /// # Errors
    ///
    /// Returns an error if the rule cannot accept the parameter.
    fn set_parameters(&mut self, _params: Option<&str>) -> Result<(), RuleError> {
        Ok(())
    }

    /// Returns the parameters in the form accepted by [`Rule::set_parameters`].
    fn parameters(&self) -> Vec<String> {
        Vec::new()
    }

    /// Whether a failure of this rule is reported on its own instead of
    /// taking part in the group's "any rule passes" tally.
    fn is_exclusive(&self) -> bool {
        false
    }

    /// Validates a value.
    ///
    /// # Arguments
    ///
    /// * `value` - Basename without the matched extension (files) or the
    ///   basename (directories)
    /// * `path` - The index path owning the matched rule group
    /// * `strict` - `false` for the count-only pass during the walk, `true`
    ///   for a final verdict
    ///
    /// # Errors
    ///
    /// Returns an error if validation itself cannot be performed. A value
    /// that simply does not conform yields `Ok(false)`.
    fn validate(&self, value: &str, path: &str, strict: bool) -> Result<bool, RuleError>;

    /// Returns the text used when reporting a failure of this rule.
    fn error_message(&self) -> String {
        self.name().to_string()
    }

    /// Creates an independent instance with the same parameters and fresh
    /// state.
    fn copy(&self) -> RuleBox;
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;
