//! Built-in rules wired through the core index and linter.

use name_lint_core::{Config, IndexError, Linter, MemoryFileSystem, RuleIndex};
use name_lint_rules::default_catalog;

fn index(yaml: &str) -> Result<RuleIndex, IndexError> {
    let config = Config::parse_yaml(yaml).unwrap();
    RuleIndex::build(&config.ls, &default_catalog())
}

fn lint(yaml: &str, fs: MemoryFileSystem) -> name_lint_core::LintResult {
    Linter::builder()
        .catalog(default_catalog())
        .config(Config::parse_yaml(yaml).unwrap())
        .filesystem(fs)
        .build()
        .unwrap()
        .run()
        .unwrap()
}

// ── index building ──

#[test]
fn rule_names_are_spelling_insensitive() {
    let index = index(
        r"
ls:
  .js: camelCase | PascalCase
  .ts: camelcase | pascal_case
  .dir: kebab-case
",
    )
    .unwrap();

    let root = index.get("").unwrap();
    let names: Vec<&str> = root[".js"].iter().map(|r| r.name()).collect();
    assert_eq!(names, vec!["camelcase", "pascalcase"]);
    let names: Vec<&str> = root[".ts"].iter().map(|r| r.name()).collect();
    assert_eq!(names, vec!["camelcase", "pascalcase"]);
}

#[test]
fn regex_alternation_stays_in_parameter() {
    let index = index("ls:\n  .md: regex:(README|CHANGELOG) | snake_case\n").unwrap();
    let rules = &index.get("").unwrap()[".md"];

    assert_eq!(rules.len(), 2);
    assert_eq!(rules[0].error_message(), "regex:(README|CHANGELOG)");
    assert!(rules[0].validate("README", "", true).unwrap());
    assert!(!rules[0].validate("README|CHANGELOG", "", true).unwrap());
}

#[test]
fn unknown_rule_is_a_build_error() {
    let err = index("ls:\n  src:\n    .rs: snake_case | titlecase\n").unwrap_err();
    assert!(matches!(
        &err,
        IndexError::UnknownRule { name, path, ext } if name == "titlecase" && path == "src" && ext == ".rs"
    ));
}

#[test]
fn bad_parameters_are_build_errors() {
    for spec in ["exists:", "exists:1-", "exists:abc", "regex:", "regex:[a-", "not_regex"] {
        let err = index(&format!("ls:\n  .png: '{spec}'\n")).unwrap_err();
        assert!(
            matches!(err, IndexError::InvalidParameter { .. }),
            "{spec} should be rejected, got {err}"
        );
    }
}

// ── linting ──

#[test]
fn exists_without_matches_fails_at_root() {
    let result = lint(
        "ls:\n  .png: snake_case | exists:1\n",
        MemoryFileSystem::new().with_file("readme.md"),
    );

    assert_eq!(result.violations.len(), 1);
    let violation = &result.violations[0];
    assert_eq!(violation.path, "");
    assert_eq!(violation.ext, ".png");
    assert_eq!(violation.messages(), vec!["exists:1 (found 0)"]);
}

#[test]
fn any_passing_case_rule_accepts_the_file() {
    let result = lint(
        "ls:\n  .ts: camelCase | PascalCase\n",
        MemoryFileSystem::new()
            .with_file("myComponent.ts")
            .with_file("MyComponent.ts")
            .with_file("my_component.ts"),
    );

    let paths: Vec<&str> = result.violations.iter().map(|v| v.path.as_str()).collect();
    assert_eq!(paths, vec!["my_component.ts"]);
    assert_eq!(
        result.violations[0].messages(),
        vec!["camelcase", "pascalcase"]
    );
}

#[test]
fn regex_placeholder_uses_owning_directory() {
    let result = lint(
        r"
ls:
  components:
    .tsx: regex:${0}_[a-z]+
",
        MemoryFileSystem::new()
            .with_file("components/components_button.tsx")
            .with_file("components/nested/components_card.tsx")
            .with_file("components/button.tsx"),
    );

    let paths: Vec<&str> = result.violations.iter().map(|v| v.path.as_str()).collect();
    assert_eq!(paths, vec!["components/button.tsx"]);
}

#[test]
fn disallow_reports_custom_message() {
    let result = lint(
        "ls:\n  .jpeg: disallow:use .jpg\n",
        MemoryFileSystem::new().with_file("photo.jpeg"),
    );

    assert_eq!(result.violations.len(), 1);
    assert_eq!(result.violations[0].messages(), vec!["disallow (use .jpg)"]);
}
