/// Per-file results, progress snapshots, and the final scan report.
use chrono::{DateTime, Local};
use compact_str::CompactString;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// A file that contained at least one forbidden word.
///
/// Files with no matches never produce a `FileResult`, so the staged copy
/// path is always present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileResult {
    /// Path of the scanned file.
    pub source_path: PathBuf,
    /// Sum of all per-word occurrence counts.
    pub match_count: u64,
    /// Location of the redacted copy in the staging area.
    pub staged_copy_path: PathBuf,
    /// Occurrences of each word, indexed like the `ForbiddenWordList`.
    #[serde(skip)]
    pub word_counts: Vec<u64>,
}

impl FileResult {
    pub fn new(source_path: PathBuf, word_counts: Vec<u64>, staged_copy_path: PathBuf) -> Self {
        Self {
            source_path,
            match_count: word_counts.iter().sum(),
            staged_copy_path,
            word_counts,
        }
    }

    /// The bare file name, as shown in result tables.
    pub fn file_name(&self) -> String {
        file_name_of(&self.source_path)
    }
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

/// One row of the top-words ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopWordEntry {
    pub word: CompactString,
    pub count: u64,
}

/// Point-in-time view of scan progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ProgressSnapshot {
    pub processed: usize,
    pub total: usize,
}

impl ProgressSnapshot {
    /// `processed / total * 100`, or `None` while the total is still zero.
    pub fn percentage(&self) -> Option<f64> {
        if self.total == 0 {
            None
        } else {
            Some(self.processed as f64 / self.total as f64 * 100.0)
        }
    }

    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.processed == self.total
    }
}

/// Everything a finished scan produced.
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    pub root: PathBuf,
    pub started_at: DateTime<Local>,
    pub duration: Duration,
    pub progress: ProgressSnapshot,
    /// Files with at least one match, in completion order.
    pub results: Vec<FileResult>,
    pub top_words: Vec<TopWordEntry>,
    /// Recovered per-file and per-directory failures.
    pub warning_count: usize,
}

impl ScanReport {
    pub fn total_matches(&self) -> u64 {
        self.results.iter().map(|r| r.match_count).sum()
    }
}
