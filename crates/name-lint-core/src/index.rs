//! Rule index: the `ls` tree flattened into path → extension → rules.

use crate::catalog::{normalize_rule_name, RuleCatalog};
use crate::config::{Ls, RuleDeclaration};
use crate::fs::normalize;
use crate::rule::{RuleBox, RuleError};
use miette::Diagnostic;
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::{debug, warn};

/// Rules declared for one directory, keyed by extension pattern.
pub type RuleGroup = BTreeMap<String, Vec<RuleBox>>;

/// Errors raised while compiling configuration into an index.
#[derive(Debug, Error, Diagnostic)]
pub enum IndexError {
    /// A rule name is not in the catalog.
    #[error("rule `{name}` does not exist (declared for `{ext}` at `{path}`)")]
    #[diagnostic(
        code(name_lint::config::unknown_rule),
        help("run `name-lint list-rules` to see the available rules")
    )]
    UnknownRule {
        /// The rule name as written.
        name: String,
        /// Owning index path.
        path: String,
        /// Extension pattern.
        ext: String,
    },

    /// A rule rejected its parameter.
    #[error("rule `{name}` failed for `{ext}` at `{path}`: {source}")]
    #[diagnostic(code(name_lint::config::invalid_parameter))]
    InvalidParameter {
        /// The rule name as written.
        name: String,
        /// Owning index path.
        path: String,
        /// Extension pattern.
        ext: String,
        /// What the rule reported.
        source: RuleError,
    },

    /// A leaf declares no rules at all.
    #[error("no rules declared for `{ext}` at `{path}`")]
    #[diagnostic(
        code(name_lint::config::empty_rules),
        help("remove the entry or give it at least one rule, e.g. `snake_case`")
    )]
    EmptyRules {
        /// Owning index path.
        path: String,
        /// Extension pattern.
        ext: String,
    },
}

/// Flattened rule configuration.
///
/// Keys are root-relative directory paths (`""` is the root) or, until
/// [`RuleIndex::expand`](crate::RuleIndex::expand) runs, glob patterns.
#[derive(Debug, Default)]
pub struct RuleIndex {
    pub(crate) entries: BTreeMap<String, RuleGroup>,
    pub(crate) unmatched: BTreeMap<String, RuleGroup>,
}

impl RuleIndex {
    /// Compiles an `ls` tree.
    ///
    /// Every mapping node gets an entry (possibly without rules), so a
    /// deeper key always shadows its ancestors during resolution.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown rule names, rejected parameters, and
    /// leaves without rules.
    pub fn build(ls: &Ls, catalog: &RuleCatalog) -> Result<Self, IndexError> {
        let mut index = Self::default();
        index.entries.insert(String::new(), RuleGroup::new());
        index.walk("", ls, catalog)?;
        debug!("Built rule index with {} path(s)", index.entries.len());
        Ok(index)
    }

    fn walk(&mut self, path: &str, ls: &Ls, catalog: &RuleCatalog) -> Result<(), IndexError> {
        for (key, declaration) in ls {
            match declaration {
                RuleDeclaration::Empty => {}
                RuleDeclaration::Rules(spec) => {
                    if !key.starts_with('.') {
                        warn!(
                            "Extension pattern `{key}` at `{path}` does not start with `.` and will never match"
                        );
                    }
                    let rules = parse_rules(spec, path, key, catalog)?;
                    self.entries
                        .entry(path.to_string())
                        .or_default()
                        .entry(key.clone())
                        .or_default()
                        .extend(rules);
                }
                RuleDeclaration::Nested(children) => {
                    let key = normalize(key);
                    let child = if path.is_empty() {
                        key
                    } else if key.is_empty() {
                        path.to_string()
                    } else {
                        format!("{path}/{key}")
                    };
                    self.entries.entry(child.clone()).or_default();
                    self.walk(&child, children, catalog)?;
                }
            }
        }
        Ok(())
    }

    /// Finds the rule group of the deepest ancestor of `path` (the path
    /// itself included) present in the index.
    ///
    /// Returns the matched key together with its group.
    #[must_use]
    pub fn resolve(&self, path: &str) -> Option<(&str, &RuleGroup)> {
        let segments: Vec<&str> = if path.is_empty() {
            Vec::new()
        } else {
            path.split('/').collect()
        };

        (0..=segments.len()).rev().find_map(|i| {
            self.entries
                .get_key_value(segments[..i].join("/").as_str())
                .map(|(key, group)| (key.as_str(), group))
        })
    }

    /// Returns the group stored at exactly `path`.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&RuleGroup> {
        self.entries.get(path)
    }

    /// Iterates resolvable entries in path order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RuleGroup)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterates glob keys that matched no directory on the last expansion.
    pub fn unmatched(&self) -> impl Iterator<Item = &str> {
        self.unmatched.keys().map(String::as_str)
    }

    /// Number of resolvable entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the index has no resolvable entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Deep-copies a rule group so stateful rules start from scratch.
#[must_use]
pub fn copy_group(group: &RuleGroup) -> RuleGroup {
    group
        .iter()
        .map(|(ext, rules)| (ext.clone(), rules.iter().map(|r| r.copy()).collect()))
        .collect()
}

fn parse_rules(
    spec: &str,
    path: &str,
    ext: &str,
    catalog: &RuleCatalog,
) -> Result<Vec<RuleBox>, IndexError> {
    let mut rules = Vec::new();

    for item in split_rule_specs(spec) {
        let (name, params) = match item.split_once(':') {
            Some((name, params)) => (name.trim(), Some(params)),
            None => (item.as_str(), None),
        };

        let mut rule = catalog
            .create(name)
            .ok_or_else(|| IndexError::UnknownRule {
                name: name.to_string(),
                path: path.to_string(),
                ext: ext.to_string(),
            })?;
        rule.set_parameters(params)
            .map_err(|source| IndexError::InvalidParameter {
                name: name.to_string(),
                path: path.to_string(),
                ext: ext.to_string(),
                source,
            })?;
        rules.push(rule);
    }

    if rules.is_empty() {
        return Err(IndexError::EmptyRules {
            path: path.to_string(),
            ext: ext.to_string(),
        });
    }
    Ok(rules)
}

fn is_pattern_rule(spec: &str) -> bool {
    spec.split_once(':').is_some_and(|(name, _)| {
        matches!(normalize_rule_name(name.trim()).as_str(), "regex" | "notregex")
    })
}

/// Splits a rule string on `|` into trimmed specifications.
///
/// Inside the parameter of a `regex` or `not_regex` rule, a `|` with no
/// whitespace on either side is regex alternation and stays in the
/// parameter; `regex:(foo|bar) | snake_case` yields two rules.
#[must_use]
pub fn split_rule_specs(spec: &str) -> Vec<String> {
    let mut specs: Vec<String> = Vec::new();
    let mut current = String::new();

    for (i, piece) in spec.split('|').enumerate() {
        let alternation = i > 0
            && is_pattern_rule(current.trim_start())
            && !current.ends_with(char::is_whitespace)
            && !piece.starts_with(char::is_whitespace)
            && !piece.is_empty();

        if alternation {
            current.push('|');
            current.push_str(piece);
        } else {
            if i > 0 {
                specs.push(std::mem::take(&mut current));
            }
            current.push_str(piece);
        }
    }
    specs.push(current);

    specs
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Default)]
    struct Param {
        name: &'static str,
        value: Option<String>,
    }

    impl crate::rule::Rule for Param {
        fn name(&self) -> &'static str {
            self.name
        }

        fn set_parameters(&mut self, params: Option<&str>) -> Result<(), RuleError> {
            if params == Some("bad") {
                return Err(RuleError::InvalidParameter {
                    rule: self.name,
                    parameter: "bad".into(),
                    message: "rejected".into(),
                });
            }
            self.value = params.map(str::to_string);
            Ok(())
        }

        fn parameters(&self) -> Vec<String> {
            self.value.iter().cloned().collect()
        }

        fn validate(&self, _value: &str, _path: &str, _strict: bool) -> Result<bool, RuleError> {
            Ok(true)
        }

        fn copy(&self) -> RuleBox {
            Box::new(Self {
                name: self.name,
                value: None,
            })
        }
    }

    fn catalog() -> RuleCatalog {
        RuleCatalog::new(["snakecase", "kebabcase", "regex", "exists"].map(|name| {
            Box::new(Param { name, value: None }) as RuleBox
        }))
    }

    fn ls(yaml: &str) -> Ls {
        serde_yaml::from_str(yaml).unwrap()
    }

    fn names(index: &RuleIndex, path: &str, ext: &str) -> Vec<String> {
        index.get(path).unwrap()[ext]
            .iter()
            .map(|r| {
                let params = r.parameters();
                if params.is_empty() {
                    r.name().to_string()
                } else {
                    format!("{}:{}", r.name(), params.join(","))
                }
            })
            .collect()
    }

    // ── split_rule_specs ──

    #[test]
    fn split_on_pipes_and_trim() {
        assert_eq!(
            split_rule_specs("snake_case | exists:1"),
            vec!["snake_case", "exists:1"]
        );
        assert_eq!(split_rule_specs(" kebab-case "), vec!["kebab-case"]);
        assert_eq!(split_rule_specs("a|b"), vec!["a", "b"]);
        assert!(split_rule_specs("").is_empty());
    }

    #[test]
    fn bare_pipe_inside_regex_is_alternation() {
        assert_eq!(
            split_rule_specs("regex:(foo|bar)[0-9]+ | snake_case"),
            vec!["regex:(foo|bar)[0-9]+", "snake_case"]
        );
        assert_eq!(
            split_rule_specs("not_regex:a|b|c"),
            vec!["not_regex:a|b|c"]
        );
        assert_eq!(
            split_rule_specs("regex:a | regex:b"),
            vec!["regex:a", "regex:b"]
        );
    }

    // ── build ──

    #[test]
    fn build_flattens_nested_keys() {
        let index = RuleIndex::build(
            &ls(r"
.png: snake_case
src:
  .dir: kebab-case
  components:
    .tsx: snake_case | exists:1-2
"),
            &catalog(),
        )
        .unwrap();

        assert_eq!(names(&index, "", ".png"), vec!["snakecase"]);
        assert_eq!(names(&index, "src", ".dir"), vec!["kebabcase"]);
        assert_eq!(
            names(&index, "src/components", ".tsx"),
            vec!["snakecase", "exists:1-2"]
        );
    }

    #[test]
    fn build_creates_groups_for_rule_less_nodes() {
        let index = RuleIndex::build(
            &ls(r"
packages:
  core:
    .rs: snake_case
"),
            &catalog(),
        )
        .unwrap();

        assert!(index.get("").is_some_and(BTreeMap::is_empty));
        assert!(index.get("packages").is_some_and(BTreeMap::is_empty));
        assert!(index.get("packages/core").is_some());
    }

    #[test]
    fn build_normalizes_keys() {
        let index = RuleIndex::build(&ls("./src/:\n  .rs: snake_case\n"), &catalog()).unwrap();
        assert!(index.get("src").is_some());
    }

    #[test]
    fn build_skips_null_values() {
        let index = RuleIndex::build(&ls(".png: ~\n.jpg: snake_case\n"), &catalog()).unwrap();
        let root = index.get("").unwrap();
        assert!(!root.contains_key(".png"));
        assert!(root.contains_key(".jpg"));
    }

    #[test]
    fn build_rejects_unknown_rule() {
        let err = RuleIndex::build(&ls("src:\n  .png: nope_case\n"), &catalog()).unwrap_err();
        assert!(matches!(
            &err,
            IndexError::UnknownRule { name, path, ext }
                if name == "nope_case" && path == "src" && ext == ".png"
        ));
        assert_eq!(
            err.to_string(),
            "rule `nope_case` does not exist (declared for `.png` at `src`)"
        );
    }

    #[test]
    fn build_rejects_bad_parameter() {
        let err = RuleIndex::build(&ls(".png: exists:bad\n"), &catalog()).unwrap_err();
        assert!(matches!(err, IndexError::InvalidParameter { .. }));
    }

    #[test]
    fn build_rejects_empty_leaf() {
        let err = RuleIndex::build(&ls(".png: ' | '\n"), &catalog()).unwrap_err();
        assert!(matches!(err, IndexError::EmptyRules { .. }));
    }

    // ── resolve ──

    #[test]
    fn resolve_picks_deepest_ancestor() {
        let index = RuleIndex::build(
            &ls(r"
.png: snake_case
src:
  .png: kebab-case
  deep:
    nested:
      .png: snake_case
"),
            &catalog(),
        )
        .unwrap();

        assert_eq!(index.resolve("logo.png").map(|(k, _)| k), Some(""));
        assert_eq!(index.resolve("src/logo.png").map(|(k, _)| k), Some("src"));
        assert_eq!(index.resolve("src/other/x.png").map(|(k, _)| k), Some("src"));
        assert_eq!(
            index.resolve("src/deep/x.png").map(|(k, _)| k),
            Some("src/deep")
        );
        assert_eq!(
            index.resolve("src/deep/nested/a/b.png").map(|(k, _)| k),
            Some("src/deep/nested")
        );
        assert_eq!(index.resolve("src").map(|(k, _)| k), Some("src"));
        assert_eq!(index.resolve("").map(|(k, _)| k), Some(""));
    }

    #[test]
    fn resolve_on_empty_index_is_none() {
        assert!(RuleIndex::default().resolve("a/b").is_none());
    }

    #[test]
    fn copy_group_creates_fresh_instances() {
        let index = RuleIndex::build(&ls(".png: exists:3\n"), &catalog()).unwrap();
        let copy = copy_group(index.get("").unwrap());
        assert_eq!(copy[".png"].len(), 1);
        assert!(copy[".png"][0].parameters().is_empty());
    }
}
