//! Run statistics.

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Live counters updated while walking.
#[derive(Debug)]
pub(crate) struct Statistic {
    start: Instant,
    files: AtomicU64,
    file_skips: AtomicU64,
    dirs: AtomicU64,
    dir_skips: AtomicU64,
}

impl Statistic {
    pub(crate) fn new() -> Self {
        Self {
            start: Instant::now(),
            files: AtomicU64::new(0),
            file_skips: AtomicU64::new(0),
            dirs: AtomicU64::new(0),
            dir_skips: AtomicU64::new(0),
        }
    }

    pub(crate) fn add_file(&self) {
        self.files.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn add_file_skip(&self) {
        self.file_skips.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn add_dir(&self) {
        self.dirs.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn add_dir_skip(&self) {
        self.dir_skips.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self) -> Statistics {
        Statistics {
            files: self.files.load(Ordering::Relaxed),
            file_skips: self.file_skips.load(Ordering::Relaxed),
            dirs: self.dirs.load(Ordering::Relaxed),
            dir_skips: self.dir_skips.load(Ordering::Relaxed),
            elapsed: self.start.elapsed(),
        }
    }
}

/// Counts of visited and skipped entries for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Statistics {
    /// Files linted.
    pub files: u64,
    /// Files skipped by the ignore list.
    pub file_skips: u64,
    /// Directories linted, including the root.
    pub dirs: u64,
    /// Directories skipped by the ignore list (not descended into).
    pub dir_skips: u64,
    /// Wall time of the run.
    #[serde(skip)]
    pub elapsed: Duration,
}

impl std::fmt::Display for Statistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} file(s), {} skipped file(s), {} dir(s), {} skipped dir(s) in {:.2?}",
            self.files, self.file_skips, self.dirs, self.dir_skips, self.elapsed
        )
    }
}
