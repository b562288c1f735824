//! Glob expansion of index and ignore keys against the filesystem.

use crate::fs::{normalize, FileSystem, FsError};
use crate::index::{copy_group, RuleIndex};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Returns `true` if `key` contains glob metacharacters (`*`, `{` or `}`).
///
/// Brackets and `?` are ordinary characters in directory names.
#[must_use]
pub fn is_glob(key: &str) -> bool {
    key.contains(['*', '{', '}'])
}

impl RuleIndex {
    /// Replaces every glob key with the directories it matches.
    ///
    /// Each match receives its own deep copy of the group. Concrete keys
    /// win over glob matches landing on the same path; between two globs
    /// the lexicographically first pattern wins. Globs matching no
    /// directory are kept aside and retried by the next call. Expanding an
    /// index without globs is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error for malformed patterns or filesystem failures.
    pub fn expand(&mut self, fs: &dyn FileSystem) -> Result<(), FsError> {
        let mut pending = std::mem::take(&mut self.unmatched);
        let mut expanded = BTreeMap::new();

        for (key, group) in std::mem::take(&mut self.entries) {
            if is_glob(&key) {
                pending.insert(key, group);
            } else {
                expanded.insert(key, group);
            }
        }

        let mut unmatched = BTreeMap::new();
        for (pattern, group) in pending {
            let matches = matching_dirs(fs, &pattern)?;
            debug!("Glob `{pattern}` matched {} dir(s)", matches.len());

            if matches.is_empty() {
                unmatched.insert(pattern, group);
                continue;
            }
            for path in matches {
                expanded
                    .entry(path)
                    .or_insert_with(|| copy_group(&group));
            }
        }

        self.entries = expanded;
        self.unmatched = unmatched;
        Ok(())
    }
}

fn matching_dirs(fs: &dyn FileSystem, pattern: &str) -> Result<Vec<String>, FsError> {
    let mut dirs = Vec::new();
    for path in fs.glob(pattern)? {
        if fs.kind(&path)?.is_dir() {
            dirs.push(path);
        }
    }
    Ok(dirs)
}

/// Paths excluded from the walk.
#[derive(Debug, Clone, Default)]
pub struct IgnoreIndex {
    paths: BTreeSet<String>,
    unmatched: BTreeSet<String>,
}

impl IgnoreIndex {
    /// Creates an ignore index from configured entries.
    #[must_use]
    pub fn new<S: AsRef<str>>(entries: &[S]) -> Self {
        Self {
            paths: entries
                .iter()
                .map(|e| normalize(e.as_ref()))
                .filter(|e| !e.is_empty())
                .collect(),
            unmatched: BTreeSet::new(),
        }
    }

    /// Replaces glob entries with the files and directories they match.
    ///
    /// # Errors
    ///
    /// Returns an error for malformed patterns or filesystem failures.
    pub fn expand(&mut self, fs: &dyn FileSystem) -> Result<(), FsError> {
        let mut pending = std::mem::take(&mut self.unmatched);
        let mut expanded = BTreeSet::new();

        for entry in std::mem::take(&mut self.paths) {
            if is_glob(&entry) {
                pending.insert(entry);
            } else {
                expanded.insert(entry);
            }
        }

        let mut unmatched = BTreeSet::new();
        for pattern in pending {
            let matches = fs.glob(&pattern)?;
            debug!("Ignore glob `{pattern}` matched {} path(s)", matches.len());
            if matches.is_empty() {
                unmatched.insert(pattern);
            }
            expanded.extend(matches);
        }

        self.paths = expanded;
        self.unmatched = unmatched;
        Ok(())
    }

    /// Returns `true` if `path` or any of its ancestors is ignored.
    #[must_use]
    pub fn is_ignored(&self, path: &str) -> bool {
        if path.is_empty() || self.paths.is_empty() {
            return false;
        }
        if self.paths.contains(path) {
            return true;
        }
        path.match_indices('/')
            .any(|(i, _)| self.paths.contains(&path[..i]))
    }

    /// Iterates the concrete ignored paths.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.paths.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::RuleCatalog;
    use crate::config::Ls;
    use crate::fs::MemoryFileSystem;
    use crate::rule::{Rule, RuleBox, RuleError};
    use std::sync::atomic::{AtomicU32, Ordering};

    #[derive(Debug, Default)]
    struct Counter {
        count: AtomicU32,
    }

    impl Rule for Counter {
        fn name(&self) -> &'static str {
            "exists"
        }

        fn is_exclusive(&self) -> bool {
            true
        }

        fn validate(&self, _value: &str, _path: &str, strict: bool) -> Result<bool, RuleError> {
            if !strict {
                self.count.fetch_add(1, Ordering::SeqCst);
            }
            Ok(true)
        }

        fn error_message(&self) -> String {
            self.count.load(Ordering::SeqCst).to_string()
        }

        fn copy(&self) -> RuleBox {
            Box::new(Self::default())
        }
    }

    fn index(yaml: &str) -> RuleIndex {
        let ls: Ls = serde_yaml::from_str(yaml).unwrap();
        let catalog = RuleCatalog::new([Box::new(Counter::default()) as RuleBox]);
        RuleIndex::build(&ls, &catalog).unwrap()
    }

    fn tree() -> MemoryFileSystem {
        MemoryFileSystem::new()
            .with_file("snake_case.png")
            .with_file("src/a/a/kebab-case.png")
            .with_file("src/b/b/kebab-case.png")
            .with_file("src/c/c/PascalCase.png")
            .with_file("src/c/c/packages/snake_case.png")
    }

    fn keys(index: &RuleIndex) -> Vec<&str> {
        index.iter().map(|(k, _)| k).collect()
    }

    #[test]
    fn is_glob_detects_metacharacters() {
        assert!(is_glob("src/**/c"));
        assert!(is_glob("src/{a,b}"));
        assert!(!is_glob("file?.txt"));
        assert!(!is_glob("app/[id]"));
        assert!(!is_glob("src/components"));
        assert!(!is_glob(""));
    }

    #[test]
    fn expand_replaces_globs_with_matching_dirs() {
        let mut index = index(
            r"
.png: exists
src/**/c:
  .png: exists
  packages:
    .png: exists
src/{a,b}/*:
  .png: exists
",
        );
        index.expand(&tree()).unwrap();

        assert_eq!(
            keys(&index),
            vec![
                "",
                "src/a/a",
                "src/b/b",
                "src/c",
                "src/c/c",
                "src/c/c/packages",
            ]
        );
        assert_eq!(index.unmatched().count(), 0);
    }

    #[test]
    fn expand_ignores_file_matches() {
        let mut index = index("src/*/*/*:\n  .png: exists\n");
        index.expand(&tree()).unwrap();

        assert_eq!(keys(&index), vec!["", "src/c/c/packages"]);
    }

    #[test]
    fn expand_retains_zero_match_globs_as_unmatched() {
        let mut index = index("lib/**/x:\n  .png: exists\n");
        index.expand(&tree()).unwrap();

        assert_eq!(keys(&index), vec![""]);
        assert_eq!(index.unmatched().collect::<Vec<_>>(), vec!["lib/**/x"]);
        assert_eq!(index.resolve("lib/**/x").map(|(k, _)| k), Some(""));

        let grown = tree().with_dir("lib/y/x");
        index.expand(&grown).unwrap();
        assert_eq!(keys(&index), vec!["", "lib/y/x"]);
        assert_eq!(index.unmatched().count(), 0);
    }

    #[test]
    fn expand_keeps_concrete_key_over_glob_match() {
        let mut index = index(
            r"
src/a/a:
  .png: exists:concrete
src/*/a:
  .jpg: exists
",
        );
        index.expand(&tree()).unwrap();

        let group = index.get("src/a/a").unwrap();
        assert!(group.contains_key(".png"));
        assert!(!group.contains_key(".jpg"));
    }

    #[test]
    fn expand_copies_rules_per_match() {
        let mut index = index("src/{a,b}/*:\n  .png: exists\n");
        index.expand(&tree()).unwrap();

        let a = &index.get("src/a/a").unwrap()[".png"][0];
        let b = &index.get("src/b/b").unwrap()[".png"][0];
        a.validate("x", "src/a/a", false).unwrap();
        a.validate("y", "src/a/a", false).unwrap();
        b.validate("z", "src/b/b", false).unwrap();

        assert_eq!(a.error_message(), "2");
        assert_eq!(b.error_message(), "1");
    }

    #[test]
    fn expand_is_idempotent_for_concrete_index() {
        let mut index = index("src:\n  .png: exists\n");
        index.expand(&tree()).unwrap();
        let first = keys(&index).into_iter().map(String::from).collect::<Vec<_>>();
        index.expand(&tree()).unwrap();
        assert_eq!(keys(&index), first);
    }

    #[test]
    fn expand_reports_invalid_glob() {
        let mut index = index("'src/{a':\n  .png: exists\n");
        assert!(matches!(
            index.expand(&tree()),
            Err(FsError::Pattern { .. })
        ));
    }

    // ── ignore ──

    #[test]
    fn ignore_matches_exact_and_ancestors() {
        let ignore = IgnoreIndex::new(&["node_modules", "./dist/", "src/c/c/ignore.png"]);
        assert!(ignore.is_ignored("node_modules"));
        assert!(ignore.is_ignored("node_modules/a/b.png"));
        assert!(ignore.is_ignored("dist"));
        assert!(ignore.is_ignored("src/c/c/ignore.png"));
        assert!(!ignore.is_ignored("node_modules_x"));
        assert!(!ignore.is_ignored("src/c/c"));
        assert!(!ignore.is_ignored(""));
    }

    #[test]
    fn ignore_expand_matches_files_and_dirs() {
        let fs = tree().with_file("src/c/c/a.jpg").with_file("src/c/d/x.png");
        let mut ignore = IgnoreIndex::new(&["src/c/*/*.jpg", "src/c/d/*", "nothing/*"]);
        ignore.expand(&fs).unwrap();

        assert_eq!(
            ignore.iter().collect::<Vec<_>>(),
            vec!["src/c/c/a.jpg", "src/c/d/x.png"]
        );
        assert!(ignore.is_ignored("src/c/d/x.png"));
        assert!(!ignore.is_ignored("src/c/d"));
        assert!(!ignore.is_ignored("src/c/c/PascalCase.png"));
    }
}
