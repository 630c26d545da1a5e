/// Scan configuration and the fixed values every scan shares.
use std::path::PathBuf;

/// Replacement written over every forbidden-word occurrence.
pub const MASK_TOKEN: &str = "***";

/// Name of the staging subfolder created under the platform temp directory.
pub const STAGING_DIR_NAME: &str = "ForbiddenWordsSearch";

/// Prefix prepended to the original file name of every redacted copy.
pub const STAGED_COPY_PREFIX: &str = "Copy_";

/// Number of entries in the top-words ranking.
pub const DEFAULT_TOP_K: usize = 10;

/// What to do when two matching files share a base name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CollisionPolicy {
    /// Later copies replace earlier ones (`Copy_a.txt` is written twice).
    #[default]
    Overwrite,
    /// Later copies get a numeric suffix (`Copy_a_1.txt`, `Copy_a_2.txt`, ...).
    Uniquify,
}

/// Tunables for a single scan.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Directory receiving redacted copies. Created if absent.
    pub staging_dir: PathBuf,
    /// Worker threads for matching and redaction. `None` = one per CPU.
    /// Always capped by the number of files to scan.
    pub workers: Option<usize>,
    /// Threads used by the directory walker.
    pub walk_parallelism: usize,
    /// Length of the top-words ranking.
    pub top_k: usize,
    pub collision_policy: CollisionPolicy,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            staging_dir: default_staging_dir(),
            workers: None,
            walk_parallelism: num_cpus::get(),
            top_k: DEFAULT_TOP_K,
            collision_policy: CollisionPolicy::Overwrite,
        }
    }
}

impl ScanConfig {
    /// Resolve the worker count for a job of `file_count` files.
    ///
    /// Never zero and never more than the number of files, so a tiny tree
    /// does not spin up a full pool.
    pub fn worker_count(&self, file_count: usize) -> usize {
        self.workers
            .unwrap_or_else(num_cpus::get)
            .min(file_count)
            .max(1)
    }
}

/// `<temp>/ForbiddenWordsSearch`.
pub fn default_staging_dir() -> PathBuf {
    std::env::temp_dir().join(STAGING_DIR_NAME)
}
