/// Staging area — the directory that receives redacted copies.
///
/// Copies are named `Copy_<original file name>`. Under
/// [`CollisionPolicy::Overwrite`] two scanned files with the same base name
/// map to the same copy and the later write wins. Under
/// [`CollisionPolicy::Uniquify`] each name is reserved for the lifetime of
/// the staging area and later files get `_1`, `_2`, ... before the extension.
use crate::config::{CollisionPolicy, STAGED_COPY_PREFIX};
use crate::error::{ScanError, WriteError};
use parking_lot::Mutex;
use std::collections::HashSet;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug)]
pub struct StagingArea {
    dir: PathBuf,
    policy: CollisionPolicy,
    /// Copy names handed out so far (only tracked under `Uniquify`).
    reserved: Mutex<HashSet<OsString>>,
}

impl StagingArea {
    /// Create (if needed) and open the staging directory.
    pub fn create(dir: impl Into<PathBuf>, policy: CollisionPolicy) -> Result<Self, ScanError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|source| ScanError::Staging {
            path: dir.clone(),
            source,
        })?;
        debug!("Staging area ready at {}", dir.display());
        Ok(Self {
            dir,
            policy,
            reserved: Mutex::new(HashSet::new()),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Pick the destination path for a redacted copy of `source`.
    pub fn copy_path_for(&self, source: &Path) -> PathBuf {
        let base = copy_name(source);
        match self.policy {
            CollisionPolicy::Overwrite => self.dir.join(base),
            CollisionPolicy::Uniquify => {
                let mut reserved = self.reserved.lock();
                let mut candidate = base.clone();
                let mut n = 1u32;
                while reserved.contains(&candidate) {
                    candidate = suffixed(&base, n);
                    n += 1;
                }
                reserved.insert(candidate.clone());
                self.dir.join(candidate)
            }
        }
    }

    /// Write `content` as the redacted copy of `source`, returning its path.
    pub fn write_copy(&self, source: &Path, content: &str) -> Result<PathBuf, WriteError> {
        let path = self.copy_path_for(source);
        match std::fs::write(&path, content) {
            Ok(()) => Ok(path),
            Err(source) => Err(WriteError { path, source }),
        }
    }
}

/// `Copy_<file name>`.
fn copy_name(source: &Path) -> OsString {
    let mut name = OsString::from(STAGED_COPY_PREFIX);
    match source.file_name() {
        Some(file_name) => name.push(file_name),
        None => name.push("unnamed"),
    }
    name
}

/// `Copy_report.txt` + 2 → `Copy_report_2.txt`.
fn suffixed(base: &OsString, n: u32) -> OsString {
    let path = Path::new(base);
    let stem = path.file_stem().unwrap_or(base.as_os_str());
    let mut name = stem.to_os_string();
    name.push(format!("_{n}"));
    if let Some(ext) = path.extension() {
        name.push(".");
        name.push(ext);
    }
    name
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn create_makes_missing_directories() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("nested").join("staging");
        let area = StagingArea::create(&dir, CollisionPolicy::Overwrite).unwrap();
        assert!(dir.is_dir());
        assert_eq!(area.dir(), dir.as_path());
    }

    #[test]
    fn copies_are_prefixed() {
        let tmp = TempDir::new().unwrap();
        let area = StagingArea::create(tmp.path(), CollisionPolicy::Overwrite).unwrap();
        let path = area.copy_path_for(Path::new("/data/report.txt"));
        assert_eq!(path, tmp.path().join("Copy_report.txt"));
    }

    #[test]
    fn overwrite_reuses_the_same_name() {
        let tmp = TempDir::new().unwrap();
        let area = StagingArea::create(tmp.path(), CollisionPolicy::Overwrite).unwrap();
        let first = area.write_copy(Path::new("/x/a.txt"), "one").unwrap();
        let second = area.write_copy(Path::new("/y/a.txt"), "two").unwrap();
        assert_eq!(first, second);
        assert_eq!(std::fs::read_to_string(second).unwrap(), "two");
    }

    #[test]
    fn uniquify_appends_counter_before_extension() {
        let tmp = TempDir::new().unwrap();
        let area = StagingArea::create(tmp.path(), CollisionPolicy::Uniquify).unwrap();
        let a = area.copy_path_for(Path::new("/x/a.txt"));
        let b = area.copy_path_for(Path::new("/y/a.txt"));
        let c = area.copy_path_for(Path::new("/z/a.txt"));
        assert_eq!(a, tmp.path().join("Copy_a.txt"));
        assert_eq!(b, tmp.path().join("Copy_a_1.txt"));
        assert_eq!(c, tmp.path().join("Copy_a_2.txt"));
    }

    #[test]
    fn uniquify_handles_names_without_extension() {
        let tmp = TempDir::new().unwrap();
        let area = StagingArea::create(tmp.path(), CollisionPolicy::Uniquify).unwrap();
        area.copy_path_for(Path::new("/x/Makefile"));
        let second = area.copy_path_for(Path::new("/y/Makefile"));
        assert_eq!(second, tmp.path().join("Copy_Makefile_1"));
    }

    #[test]
    fn write_into_missing_directory_is_a_write_error() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("staging");
        let area = StagingArea::create(&dir, CollisionPolicy::Overwrite).unwrap();
        std::fs::remove_dir(&dir).unwrap();
        let err = area.write_copy(Path::new("a.txt"), "x").unwrap_err();
        assert_eq!(err.path, dir.join("Copy_a.txt"));
    }
}
