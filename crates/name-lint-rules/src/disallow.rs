//! `disallow` rule.

use name_lint_core::{Rule, RuleBox, RuleError};

/// Rejects every name it is applied to.
///
/// An optional message (`disallow:use src/ instead`) is appended to the
/// reported rule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisallowRule {
    message: Option<String>,
}

impl DisallowRule {
    /// Creates a rule without a message.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Rule for DisallowRule {
    fn name(&self) -> &'static str {
        "disallow"
    }

    fn description(&self) -> &'static str {
        "Always fails, with an optional message"
    }

    fn set_parameters(&mut self, params: Option<&str>) -> Result<(), RuleError> {
        self.message = params
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map(str::to_string);
        Ok(())
    }

    fn parameters(&self) -> Vec<String> {
        self.message.iter().cloned().collect()
    }

    fn validate(&self, _value: &str, _path: &str, _strict: bool) -> Result<bool, RuleError> {
        Ok(false)
    }

    fn error_message(&self) -> String {
        match &self.message {
            Some(message) => format!("{} ({message})", self.name()),
            None => self.name().to_string(),
        }
    }

    fn copy(&self) -> RuleBox {
        Box::new(self.clone())
    }
}
