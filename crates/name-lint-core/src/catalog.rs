//! Immutable registry of rule prototypes.

use crate::rule::{Rule, RuleBox};
use std::collections::BTreeMap;

/// Normalizes a rule name for catalog lookup.
///
/// Lowercases and drops `_`, `-` and `.`, so `snake_case`, `SnakeCase` and
/// `snakecase` all refer to the same rule.
#[must_use]
pub fn normalize_rule_name(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, '_' | '-' | '.'))
        .flat_map(char::to_lowercase)
        .collect()
}

/// A fixed set of rule prototypes, keyed by normalized name.
///
/// Built once and only read afterwards. New rule instances are created by
/// copying a prototype, so configuring one instance never affects another.
#[derive(Debug, Default)]
pub struct RuleCatalog {
    prototypes: BTreeMap<String, RuleBox>,
}

impl RuleCatalog {
    /// Creates a catalog from prototype instances.
    ///
    /// A later prototype with the same normalized name replaces an earlier one.
    #[must_use]
    pub fn new(rules: impl IntoIterator<Item = RuleBox>) -> Self {
        let prototypes = rules
            .into_iter()
            .map(|rule| (normalize_rule_name(rule.name()), rule))
            .collect();
        Self { prototypes }
    }

    /// Returns the prototype registered under `name`, if any.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&dyn Rule> {
        self.prototypes
            .get(&normalize_rule_name(name))
            .map(AsRef::as_ref)
    }

    /// Returns `true` if a rule named `name` exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Creates a fresh, unconfigured instance of the rule named `name`.
    #[must_use]
    pub fn create(&self, name: &str) -> Option<RuleBox> {
        self.get(name).map(Rule::copy)
    }

    /// Iterates prototypes in name order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Rule> {
        self.prototypes.values().map(AsRef::as_ref)
    }

    /// Number of registered rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.prototypes.len()
    }

    /// Returns `true` if no rules are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.prototypes.is_empty()
    }
}
