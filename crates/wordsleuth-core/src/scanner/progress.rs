/// Scan progress reporting — the event stream a scan emits, the reporter
/// seam that delivers it, and the shared processed/total counter.
use crate::model::{FileResult, ProgressSnapshot, ScanReport};
use crossbeam_channel::Sender;
use parking_lot::Mutex;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Commands a frontend sends to control a running scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanCommand {
    Pause,
    Resume,
    Stop,
}

/// Events emitted while a scan runs.
#[derive(Debug, Clone)]
pub enum ScanEvent {
    /// Enumeration finished; `total_files` is now fixed.
    Started { total_files: usize },
    /// Sent after every processed file.
    Progress(ProgressSnapshot),
    /// A file matched and its redacted copy was written.
    FileMatched(FileResult),
    /// A recovered failure (unreadable directory, read or write error).
    Warning { path: PathBuf, message: String },
    /// Every file was processed. Sent exactly once per completed scan.
    Complete(ScanReport),
    /// The scan was stopped before finishing; nothing follows.
    Stopped { processed: usize, total: usize },
    /// The scan could not start (bad root, staging directory, pool).
    Failed { error: String },
}

impl ScanEvent {
    /// `Complete`, `Stopped`, and `Failed` end a scan's event stream.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Complete(_) | Self::Stopped { .. } | Self::Failed { .. }
        )
    }
}

/// Receives scan events. Called synchronously from worker threads, so
/// implementations hand events off quickly and decide themselves how to
/// marshal them to a presentation layer.
pub trait ScanReporter: Send + Sync {
    fn report(&self, event: ScanEvent);
}

/// Forward events into a channel. A disconnected receiver drops them.
impl ScanReporter for Sender<ScanEvent> {
    fn report(&self, event: ScanEvent) {
        let _ = self.send(event);
    }
}

/// Collect events in memory, for synchronous runs and tests.
#[derive(Debug, Default)]
pub struct CollectingReporter {
    events: Mutex<Vec<ScanEvent>>,
}

impl CollectingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&self) -> Vec<ScanEvent> {
        std::mem::take(&mut *self.events.lock())
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of collected events accepted by `pred`.
    pub fn count(&self, pred: impl Fn(&ScanEvent) -> bool) -> usize {
        self.events.lock().iter().filter(|e| pred(e)).count()
    }
}

impl ScanReporter for CollectingReporter {
    fn report(&self, event: ScanEvent) {
        self.events.lock().push(event);
    }
}

/// Result of one [`ProgressTracker::record_processed`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Recorded {
    pub snapshot: ProgressSnapshot,
    /// True for exactly one call: the one that made `processed == total`.
    pub completed: bool,
}

/// Lock-free processed/total counter.
#[derive(Debug)]
pub struct ProgressTracker {
    processed: AtomicUsize,
    total: usize,
}

impl ProgressTracker {
    pub fn new(total: usize) -> Self {
        Self {
            processed: AtomicUsize::new(0),
            total,
        }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Count one more processed file.
    ///
    /// Completion is decided from the value returned by the increment
    /// itself, so two workers finishing the last files together can never
    /// both see it.
    pub fn record_processed(&self) -> Recorded {
        let previous = self.processed.fetch_add(1, Ordering::AcqRel);
        debug_assert!(previous < self.total, "processed more files than enumerated");
        let processed = previous + 1;
        Recorded {
            snapshot: ProgressSnapshot {
                processed,
                total: self.total,
            },
            completed: processed == self.total,
        }
    }

    pub fn snapshot(&self) -> ProgressSnapshot {
        ProgressSnapshot {
            processed: self.processed.load(Ordering::Acquire),
            total: self.total,
        }
    }
}
