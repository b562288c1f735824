//! The built-in rule set.

use crate::{CaseRule, CaseStyle, DisallowRule, ExistsRule, NotRegexRule, RegexRule};
use name_lint_core::{RuleBox, RuleCatalog};

/// Returns one unconfigured prototype of every built-in rule.
#[must_use]
pub fn all_rules() -> Vec<RuleBox> {
    let mut rules: Vec<RuleBox> = CaseStyle::ALL
        .into_iter()
        .map(|style| Box::new(CaseRule::new(style)) as RuleBox)
        .collect();
    rules.push(Box::new(RegexRule::new()));
    rules.push(Box::new(NotRegexRule::new()));
    rules.push(Box::new(DisallowRule::new()));
    rules.push(Box::new(ExistsRule::new()));
    rules
}

/// Returns a catalog holding [`all_rules`].
#[must_use]
pub fn default_catalog() -> RuleCatalog {
    RuleCatalog::new(all_rules())
}
