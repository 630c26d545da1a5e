/// Error taxonomy.
///
/// Only [`ScanError`] ever stops a scan from starting. Every per-file error
/// ([`FileReadError`], [`WriteError`]) is recovered by the worker that hit it
/// and the scan moves on to the next file.
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Pre-flight input validation failures.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("no root directory was given")]
    EmptyRootPath,

    #[error("the forbidden word list is empty")]
    EmptyWordList,
}

/// Failures to enumerate the scan root.
///
/// Unreadable subdirectories are not errors; they become warnings.
#[derive(Debug, Error)]
pub enum EnumerationError {
    #[error("root directory does not exist: {}", .0.display())]
    NotFound(PathBuf),

    #[error("root path is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("cannot read root directory {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Failure to read a file's content.
#[derive(Debug, Error)]
pub enum FileReadError {
    /// Permission denied. Callers skip the file without reporting it.
    #[error("access denied: {}", .0.display())]
    AccessDenied(PathBuf),

    #[error("failed to read {}: {source}", path.display())]
    Other {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl FileReadError {
    /// Classify an I/O error raised while reading `path`.
    pub fn from_io(path: PathBuf, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::PermissionDenied {
            Self::AccessDenied(path)
        } else {
            Self::Other { path, source }
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            Self::AccessDenied(path) => path.as_path(),
            Self::Other { path, .. } => path.as_path(),
        }
    }
}

/// Failure to write a redacted copy into the staging area.
#[derive(Debug, Error)]
#[error("failed to write redacted copy {}: {source}", path.display())]
pub struct WriteError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

/// Errors raised while processing a single file. Never fatal to the scan.
#[derive(Debug, Error)]
pub enum FileError {
    #[error(transparent)]
    Read(#[from] FileReadError),

    #[error(transparent)]
    Write(#[from] WriteError),
}

impl FileError {
    /// The file (or staged copy) the failure concerns.
    pub fn path(&self) -> &Path {
        match self {
            Self::Read(err) => err.path(),
            Self::Write(err) => err.path.as_path(),
        }
    }
}

/// Errors that prevent a scan from starting.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Enumeration(#[from] EnumerationError),

    #[error("cannot create staging directory {}: {source}", path.display())]
    Staging {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid forbidden word: {0}")]
    Pattern(#[from] regex::Error),

    #[error("failed to build worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),

    #[error("failed to spawn scanner thread: {0}")]
    Spawn(#[source] io::Error),
}
