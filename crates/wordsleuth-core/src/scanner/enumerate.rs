/// File enumeration using `jwalk`'s parallel directory walker.
///
/// Collects every regular file under the root, hidden files included.
/// Symlinks are neither followed nor returned. A directory that cannot be
/// read becomes a warning; only a bad root fails the whole walk.
use super::control::PauseController;
use crate::error::EnumerationError;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, warn};

/// How many walk entries pass between stop checks.
const STOP_CHECK_INTERVAL: u64 = 1_000;

/// A directory the walker could not read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkWarning {
    pub path: PathBuf,
    pub message: String,
}

/// Output of a walk.
#[derive(Debug, Default)]
pub struct Enumeration {
    pub files: Vec<PathBuf>,
    pub warnings: Vec<WalkWarning>,
    /// The walk ended early because the scan was stopped.
    pub interrupted: bool,
}

/// Check that `root` exists and is a directory.
pub fn check_root(root: &Path) -> Result<(), EnumerationError> {
    match std::fs::metadata(root) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(EnumerationError::NotADirectory(root.to_path_buf())),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            Err(EnumerationError::NotFound(root.to_path_buf()))
        }
        Err(source) => Err(EnumerationError::Io {
            path: root.to_path_buf(),
            source,
        }),
    }
}

/// Walk `root` and return every regular file beneath it.
///
/// `control` is polled every [`STOP_CHECK_INTERVAL`] entries; a stop request
/// ends the walk with `interrupted = true`. Pausing does not hold up the walk.
pub fn enumerate_files(
    root: &Path,
    parallelism: usize,
    control: &PauseController,
) -> Result<Enumeration, EnumerationError> {
    check_root(root)?;

    let start = Instant::now();
    let mut out = Enumeration::default();
    let mut seen: u64 = 0;

    let walker = jwalk::WalkDir::new(root)
        .skip_hidden(false)
        .follow_links(false)
        .parallelism(jwalk::Parallelism::RayonNewPool(parallelism.max(1)));

    for entry_result in walker {
        seen += 1;
        if seen.is_multiple_of(STOP_CHECK_INTERVAL) && control.is_stopped() {
            out.interrupted = true;
            break;
        }

        let entry = match entry_result {
            Ok(e) => e,
            Err(err) => {
                // jwalk errors are typically access-denied on directories.
                let path = err.path().map(Path::to_path_buf).unwrap_or_default();
                let message = err.to_string();
                warn!("Skipping unreadable directory {}: {message}", path.display());
                out.warnings.push(WalkWarning { path, message });
                continue;
            }
        };

        if entry.file_type().is_file() {
            out.files.push(entry.path());
        }
    }

    debug!(
        "Enumerated {} files under {} in {:?} ({} warnings)",
        out.files.len(),
        root.display(),
        start.elapsed(),
        out.warnings.len()
    );
    Ok(out)
}
