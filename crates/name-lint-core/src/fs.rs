//! Filesystem abstraction used by the linter.
//!
//! Paths handed to and returned from a [`FileSystem`] are relative to the
//! lint root, use `/` as separator and never carry a trailing separator.
//! The root itself is the empty string.

use globset::{GlobBuilder, GlobMatcher};
use miette::Diagnostic;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

/// Errors raised by filesystem access.
#[derive(Debug, Error, Diagnostic)]
pub enum FsError {
    /// The path does not exist.
    #[error("{path} not found")]
    #[diagnostic(code(name_lint::fs::not_found))]
    NotFound {
        /// Root-relative path.
        path: String,
    },

    /// IO error while listing or inspecting a path.
    #[error("IO error at {path}: {source}")]
    #[diagnostic(code(name_lint::fs::io))]
    Io {
        /// Root-relative path.
        path: String,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Directory traversal error while expanding a glob.
    #[error("failed to walk {path}: {source}")]
    #[diagnostic(code(name_lint::fs::walk))]
    Walk {
        /// Root-relative path.
        path: String,
        /// Underlying walk error.
        source: walkdir::Error,
    },

    /// The glob pattern is malformed.
    #[error("invalid glob pattern `{pattern}`: {source}")]
    #[diagnostic(
        code(name_lint::glob::invalid),
        help("globs support `*`, `**`, `?`, `[...]` and `{{a,b}}`")
    )]
    Pattern {
        /// The offending pattern.
        pattern: String,
        /// Underlying glob error.
        source: globset::Error,
    },
}

/// Kind of a filesystem entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    /// A regular file (or anything that is not a directory).
    File,
    /// A directory.
    Dir,
}

impl EntryKind {
    /// Returns `true` for directories.
    #[must_use]
    pub fn is_dir(self) -> bool {
        self == Self::Dir
    }
}

/// One entry of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    /// Basename of the entry.
    pub name: String,
    /// Whether it is a file or a directory.
    pub kind: EntryKind,
}

/// Directory listing, stat and glob matching over a rooted tree.
pub trait FileSystem: Send + Sync {
    /// Lists the direct children of `path`, sorted by name.
    ///
    /// # Errors
    ///
    /// Returns an error if `path` does not exist or cannot be read.
    fn read_dir(&self, path: &str) -> Result<Vec<DirEntry>, FsError>;

    /// Returns the kind of the entry at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`FsError::NotFound`] if nothing exists at `path`.
    fn kind(&self, path: &str) -> Result<EntryKind, FsError>;

    /// Returns every path (files and directories) matching `pattern`,
    /// sorted.
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern is malformed or the tree cannot be
    /// traversed.
    fn glob(&self, pattern: &str) -> Result<Vec<String>, FsError>;
}

/// Compiles a root-relative glob. `*` never crosses a `/`; `**` spans any
/// number of segments and `{a,b}` alternates.
///
/// `?`, `[` and `]` match themselves, so directory names such as `[id]`
/// can be used inside patterns.
///
/// # Errors
///
/// Returns [`FsError::Pattern`] if the pattern is malformed.
pub fn compile_glob(pattern: &str) -> Result<GlobMatcher, FsError> {
    GlobBuilder::new(&escape_literals(pattern))
        .literal_separator(true)
        .backslash_escape(true)
        .build()
        .map(|glob| glob.compile_matcher())
        .map_err(|source| FsError::Pattern {
            pattern: pattern.to_string(),
            source,
        })
}

fn escape_literals(pattern: &str) -> String {
    let mut escaped = String::with_capacity(pattern.len());
    for c in pattern.chars() {
        if matches!(c, '?' | '[' | ']') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Joins a child name onto a root-relative directory path.
#[must_use]
pub fn join(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{parent}/{name}")
    }
}

/// Returns the parent of a root-relative path (`""` for top-level entries).
#[must_use]
pub fn parent(path: &str) -> &str {
    path.rsplit_once('/').map_or("", |(parent, _)| parent)
}

/// Returns the last segment of a root-relative path.
#[must_use]
pub fn basename(path: &str) -> &str {
    path.rsplit_once('/').map_or(path, |(_, name)| name)
}

/// Normalizes a user-supplied path: strips `./` prefixes and trailing
/// separators, converts `\` to `/`, and maps `.` to the root (`""`).
#[must_use]
pub fn normalize(path: &str) -> String {
    let path = path.replace('\\', "/");
    let mut path = path.as_str();
    while let Some(rest) = path.strip_prefix("./") {
        path = rest;
    }
    let path = path.trim_end_matches('/');
    if path == "." {
        String::new()
    } else {
        path.to_string()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// OS filesystem
// ────────────────────────────────────────────────────────────────────────────

/// The real filesystem below a root directory.
#[derive(Debug, Clone)]
pub struct OsFileSystem {
    root: PathBuf,
}

impl OsFileSystem {
    /// Creates a filesystem rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn absolute(&self, path: &str) -> PathBuf {
        if path.is_empty() {
            self.root.clone()
        } else {
            self.root.join(path)
        }
    }

    fn relative(&self, path: &Path) -> Option<String> {
        let rel = path.strip_prefix(&self.root).ok()?;
        let parts: Vec<_> = rel
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        Some(parts.join("/"))
    }
}

fn io_error(path: &str, source: std::io::Error) -> FsError {
    if source.kind() == std::io::ErrorKind::NotFound {
        FsError::NotFound {
            path: path.to_string(),
        }
    } else {
        FsError::Io {
            path: path.to_string(),
            source,
        }
    }
}

impl FileSystem for OsFileSystem {
    fn read_dir(&self, path: &str) -> Result<Vec<DirEntry>, FsError> {
        let mut entries = Vec::new();
        for entry in std::fs::read_dir(self.absolute(path)).map_err(|e| io_error(path, e))? {
            let entry = entry.map_err(|e| io_error(path, e))?;
            let file_type = entry.file_type().map_err(|e| io_error(path, e))?;
            entries.push(DirEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                kind: if file_type.is_dir() {
                    EntryKind::Dir
                } else {
                    EntryKind::File
                },
            });
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    fn kind(&self, path: &str) -> Result<EntryKind, FsError> {
        let metadata =
            std::fs::symlink_metadata(self.absolute(path)).map_err(|e| io_error(path, e))?;
        Ok(if metadata.is_dir() {
            EntryKind::Dir
        } else {
            EntryKind::File
        })
    }

    fn glob(&self, pattern: &str) -> Result<Vec<String>, FsError> {
        let matcher = compile_glob(pattern)?;
        let mut matches = Vec::new();

        for entry in WalkDir::new(&self.root).min_depth(1) {
            let entry = entry.map_err(|source| FsError::Walk {
                path: pattern.to_string(),
                source,
            })?;
            let Some(rel) = self.relative(entry.path()) else {
                continue;
            };
            if matcher.is_match(&rel) {
                matches.push(rel);
            }
        }

        matches.sort();
        Ok(matches)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// In-memory filesystem
// ────────────────────────────────────────────────────────────────────────────

/// An in-memory tree. Adding a path implicitly creates its parent
/// directories.
///
/// ```ignore
/// let fs = MemoryFileSystem::new()
///     .with_file("src/main.rs")
///     .with_dir("docs");
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryFileSystem {
    entries: BTreeMap<String, EntryKind>,
}

impl MemoryFileSystem {
    /// Creates an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a file.
    #[must_use]
    pub fn with_file(mut self, path: &str) -> Self {
        self.add(path, EntryKind::File);
        self
    }

    /// Adds a directory.
    #[must_use]
    pub fn with_dir(mut self, path: &str) -> Self {
        self.add(path, EntryKind::Dir);
        self
    }

    /// Adds an entry of the given kind.
    pub fn add(&mut self, path: &str, kind: EntryKind) {
        let path = normalize(path);
        if path.is_empty() {
            return;
        }
        let mut current = parent(&path);
        while !current.is_empty() {
            self.entries.insert(current.to_string(), EntryKind::Dir);
            current = parent(current);
        }
        self.entries.insert(path, kind);
    }
}

impl FileSystem for MemoryFileSystem {
    fn read_dir(&self, path: &str) -> Result<Vec<DirEntry>, FsError> {
        if self.kind(path)? != EntryKind::Dir {
            return Err(FsError::Io {
                path: path.to_string(),
                source: std::io::Error::new(std::io::ErrorKind::Other, "not a directory"),
            });
        }

        Ok(self
            .entries
            .iter()
            .filter(|(entry, _)| parent(entry) == path)
            .map(|(entry, kind)| DirEntry {
                name: basename(entry).to_string(),
                kind: *kind,
            })
            .collect())
    }

    fn kind(&self, path: &str) -> Result<EntryKind, FsError> {
        if path.is_empty() {
            return Ok(EntryKind::Dir);
        }
        self.entries
            .get(path)
            .copied()
            .ok_or_else(|| FsError::NotFound {
                path: path.to_string(),
            })
    }

    fn glob(&self, pattern: &str) -> Result<Vec<String>, FsError> {
        let matcher = compile_glob(pattern)?;
        Ok(self
            .entries
            .keys()
            .filter(|path| matcher.is_match(path.as_str()))
            .cloned()
            .collect())
    }
}
