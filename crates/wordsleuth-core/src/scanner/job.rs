/// A single scan job: enumerate, match and redact, then aggregate.
///
/// Each scan builds a fresh `ScanJob`; no state carries over between scans.
/// Files are fanned out over a dedicated rayon pool bounded by
/// [`ScanConfig::worker_count`]. `pool.install` returns only once every
/// worker has finished, which is the barrier before aggregation.
use super::control::PauseController;
use super::enumerate::enumerate_files;
use super::progress::{ProgressTracker, ScanEvent, ScanReporter};
use crate::analysis::top_words;
use crate::config::ScanConfig;
use crate::error::{FileError, FileReadError, ScanError, ValidationError};
use crate::model::{FileResult, ForbiddenWordList, ProgressSnapshot, ScanReport};
use crate::staging::StagingArea;
use crate::text::{redact, WordMatcher};
use chrono::Local;
use parking_lot::Mutex;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// How a scan ended.
#[derive(Debug, Clone)]
pub enum ScanOutcome {
    Completed(ScanReport),
    Stopped(ProgressSnapshot),
}

#[derive(Debug)]
pub struct ScanJob {
    root: PathBuf,
    words: Arc<ForbiddenWordList>,
    config: ScanConfig,
    control: Arc<PauseController>,
}

impl ScanJob {
    /// Validate inputs and build a job. Nothing touches the filesystem yet.
    pub fn new(
        root: impl Into<PathBuf>,
        words: ForbiddenWordList,
        config: ScanConfig,
    ) -> Result<Self, ValidationError> {
        let root = root.into();
        if root.as_os_str().is_empty() {
            return Err(ValidationError::EmptyRootPath);
        }
        if words.is_empty() {
            return Err(ValidationError::EmptyWordList);
        }
        Ok(Self {
            root,
            words: Arc::new(words),
            config,
            control: Arc::new(PauseController::new()),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The pause/resume/stop control observed by this job's workers.
    pub fn control(&self) -> &Arc<PauseController> {
        &self.control
    }

    /// Run the scan to completion (or until stopped) on the calling thread.
    ///
    /// Errors are returned only for failures before any file is processed;
    /// per-file failures are reported as [`ScanEvent::Warning`].
    pub fn run(&self, reporter: &dyn ScanReporter) -> Result<ScanOutcome, ScanError> {
        let started_at = Local::now();
        let start = Instant::now();
        info!(
            "Starting scan of {} for {} forbidden words",
            self.root.display(),
            self.words.len()
        );

        let matcher = WordMatcher::new(&self.words)?;
        let staging = StagingArea::create(&self.config.staging_dir, self.config.collision_policy)?;
        let enumeration = enumerate_files(&self.root, self.config.walk_parallelism, &self.control)?;

        let warnings = AtomicUsize::new(enumeration.warnings.len());
        for w in enumeration.warnings {
            reporter.report(ScanEvent::Warning {
                path: w.path,
                message: w.message,
            });
        }

        let mut files = enumeration.files;
        // Never rescan copies left by an earlier run when staging sits inside the root.
        if let Some(excluded) = staging_under_root(&self.root, staging.dir()) {
            debug!("Excluding staging directory {}", excluded.display());
            files.retain(|f| !f.starts_with(&excluded));
        }

        let tracker = ProgressTracker::new(files.len());
        if enumeration.interrupted || self.control.is_stopped() {
            return Ok(self.finish_stopped(&tracker, reporter));
        }
        reporter.report(ScanEvent::Started {
            total_files: files.len(),
        });

        let results = Mutex::new(Vec::new());
        let completed = AtomicBool::new(files.is_empty());

        if !files.is_empty() {
            let workers = self.config.worker_count(files.len());
            debug!("Processing {} files on {workers} workers", files.len());
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(workers)
                .thread_name(|i| format!("wordsleuth-worker-{i}"))
                .build()?;

            let worker = Worker {
                matcher: &matcher,
                staging: &staging,
                tracker: &tracker,
                control: &self.control,
                results: &results,
                warnings: &warnings,
                completed: &completed,
                reporter,
            };
            pool.install(|| files.par_iter().for_each(|path| worker.process(path)));
        }

        if self.control.is_stopped() || !completed.load(Ordering::Acquire) {
            return Ok(self.finish_stopped(&tracker, reporter));
        }

        let results = results.into_inner();
        let top_words = top_words(&results, &self.words, self.config.top_k);
        let report = ScanReport {
            root: self.root.clone(),
            started_at,
            duration: start.elapsed(),
            progress: tracker.snapshot(),
            results,
            top_words,
            warning_count: warnings.load(Ordering::Relaxed),
        };

        info!(
            "Scan complete: {} of {} files matched ({} occurrences) in {:?}",
            report.results.len(),
            report.progress.total,
            report.total_matches(),
            report.duration
        );
        reporter.report(ScanEvent::Complete(report.clone()));
        Ok(ScanOutcome::Completed(report))
    }

    fn finish_stopped(
        &self,
        tracker: &ProgressTracker,
        reporter: &dyn ScanReporter,
    ) -> ScanOutcome {
        let snapshot = tracker.snapshot();
        info!(
            "Scan of {} stopped after {} of {} files",
            self.root.display(),
            snapshot.processed,
            snapshot.total
        );
        reporter.report(ScanEvent::Stopped {
            processed: snapshot.processed,
            total: snapshot.total,
        });
        ScanOutcome::Stopped(snapshot)
    }
}

/// The staging directory spelled the way the walk of `root` spells paths,
/// or `None` when it lies outside the root.
///
/// Walked paths are `root` joined with relative components, so a relative
/// root (`.`) never textually prefixes an absolute staging path. Both sides
/// are canonicalized to find the relative part, which is then re-joined
/// onto `root` as given.
fn staging_under_root(root: &Path, staging: &Path) -> Option<PathBuf> {
    let root_abs = fs::canonicalize(root).ok()?;
    let staging_abs = fs::canonicalize(staging).ok()?;
    let relative = staging_abs.strip_prefix(&root_abs).ok()?;
    Some(root.join(relative))
}

/// Per-scan state shared by every worker thread.
struct Worker<'a> {
    matcher: &'a WordMatcher,
    staging: &'a StagingArea,
    tracker: &'a ProgressTracker,
    control: &'a PauseController,
    results: &'a Mutex<Vec<FileResult>>,
    warnings: &'a AtomicUsize,
    completed: &'a AtomicBool,
    reporter: &'a dyn ScanReporter,
}

impl Worker<'_> {
    fn process(&self, path: &Path) {
        if !self.control.wait_until_runnable() {
            return;
        }

        let outcome = self.scan_file(path);

        // Work that was in flight when the scan stopped is dropped unreported.
        if self.control.is_stopped() {
            return;
        }

        match outcome {
            Ok(Some(result)) => {
                self.results.lock().push(result.clone());
                self.report(ScanEvent::FileMatched(result));
            }
            Ok(None) => {}
            Err(FileError::Read(FileReadError::AccessDenied(p))) => {
                debug!("Access denied, skipping {}", p.display());
            }
            Err(err) => {
                warn!("{err}");
                self.warnings.fetch_add(1, Ordering::Relaxed);
                self.report(ScanEvent::Warning {
                    path: err.path().to_path_buf(),
                    message: err.to_string(),
                });
            }
        }

        let recorded = self.tracker.record_processed();
        if recorded.completed {
            self.completed.store(true, Ordering::Release);
        }
        self.report(ScanEvent::Progress(recorded.snapshot));
    }

    /// Forward `event` unless the scan has been stopped in the meantime.
    ///
    /// `stop()` may land while a file's events are being sent; everything
    /// after that point is dropped so nothing but `Stopped` follows.
    fn report(&self, event: ScanEvent) {
        if self.control.is_stopped() {
            return;
        }
        self.reporter.report(event);
    }

    /// Match one file and, if anything matched, stage its redacted copy.
    fn scan_file(&self, path: &Path) -> Result<Option<FileResult>, FileError> {
        let (content, matches) = self.matcher.count_file(path)?;
        if matches.is_empty() {
            return Ok(None);
        }
        let redacted = redact(&content, self.matcher);
        let staged = self.staging.write_copy(path, &redacted)?;
        Ok(Some(FileResult::new(path.to_path_buf(), matches.per_word, staged)))
    }
}
