/// Scanner module — orchestrates forbidden-word scans.
///
/// A scan runs in three phases on a background thread:
/// - **Enumerate:** `jwalk`-based parallel walk collecting every regular file.
/// - **Process:** a bounded rayon pool matches, redacts, and stages each file,
///   checking the [`PauseController`] before starting every file.
/// - **Aggregate:** after all workers join, the top-words ranking is built.
///
/// Progress, per-file results, and the final report arrive as [`ScanEvent`]s
/// on the handle's channel.
pub mod control;
pub mod enumerate;
pub mod job;
pub mod progress;

pub use control::{ControlState, PauseController};
pub use job::{ScanJob, ScanOutcome};
pub use progress::{ProgressTracker, ScanCommand, ScanEvent, ScanReporter};

use crate::config::ScanConfig;
use crate::error::ScanError;
use crate::model::ForbiddenWordList;
use crossbeam_channel::Receiver;
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use tracing::{error, info};

/// Maximum number of events that may queue up in the channel.
///
/// Every processed file sends at least one event. If the frontend falls
/// behind, workers stall briefly on `send` rather than consuming unbounded
/// heap.
pub const EVENT_CHANNEL_CAPACITY: usize = 4_096;

/// Handle to a running or completed scan. Allows pause/resume/stop and
/// receiving events.
pub struct ScanHandle {
    /// Receiver for events from the scan thread.
    pub events_rx: Receiver<ScanEvent>,
    control: Arc<PauseController>,
    thread: thread::JoinHandle<()>,
}

impl ScanHandle {
    pub fn pause(&self) -> bool {
        self.control.pause()
    }

    pub fn resume(&self) -> bool {
        self.control.resume()
    }

    /// Request the scan to stop. Workers finish the file they are on and
    /// start no new ones.
    pub fn stop(&self) {
        self.control.stop();
    }

    pub fn state(&self) -> ControlState {
        self.control.state()
    }

    /// Stop the scan and wait for its thread to exit.
    ///
    /// The receiver is dropped first so a worker blocked on a full channel
    /// fails its send instead of waiting for a reader. Once this returns no
    /// worker of this scan can touch the staging directory again.
    pub fn stop_and_join(self) {
        let Self {
            events_rx,
            control,
            thread,
        } = self;
        control.stop();
        drop(events_rx);
        join_scan_thread(thread);
    }
}

fn join_scan_thread(thread: thread::JoinHandle<()>) {
    if thread.join().is_err() {
        error!("Scan thread panicked");
    }
}

/// Validate inputs and start a new scan on a background thread.
///
/// Validation and the root check happen before this returns, so a missing
/// root or empty word list is an `Err` here and no thread is spawned.
/// Later pre-flight failures (staging directory, worker pool) arrive as
/// [`ScanEvent::Failed`].
pub fn start_scan(
    root: PathBuf,
    words: ForbiddenWordList,
    config: ScanConfig,
) -> Result<ScanHandle, ScanError> {
    let job = ScanJob::new(root, words, config)?;
    enumerate::check_root(job.root())?;

    let (events_tx, events_rx) = crossbeam_channel::bounded::<ScanEvent>(EVENT_CHANNEL_CAPACITY);
    let control = job.control().clone();

    let thread = thread::Builder::new()
        .name("wordsleuth-scanner".into())
        .spawn(move || {
            if let Err(err) = job.run(&events_tx) {
                error!("Scan of {} failed: {err}", job.root().display());
                events_tx.report(ScanEvent::Failed {
                    error: err.to_string(),
                });
            }
        })
        .map_err(ScanError::Spawn)?;

    Ok(ScanHandle {
        events_rx,
        control,
        thread,
    })
}

/// Owns at most one scan at a time.
///
/// Starting a scan stops the previous one. Stopping waits for the old scan
/// thread and drops its channel, so events still queued from the old job are
/// discarded and no straggling copy from it lands in the staging directory
/// after the next scan has started.
#[derive(Default)]
pub struct Scanner {
    handle: Option<ScanHandle>,
}

impl Scanner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(
        &mut self,
        root: PathBuf,
        words: ForbiddenWordList,
        config: ScanConfig,
    ) -> Result<(), ScanError> {
        self.stop();
        let handle = start_scan(root, words, config)?;
        info!("Scan started");
        self.handle = Some(handle);
        Ok(())
    }

    pub fn is_active(&self) -> bool {
        self.handle.is_some()
    }

    pub fn state(&self) -> Option<ControlState> {
        self.handle.as_ref().map(ScanHandle::state)
    }

    pub fn pause(&self) -> bool {
        self.handle.as_ref().is_some_and(ScanHandle::pause)
    }

    pub fn resume(&self) -> bool {
        self.handle.as_ref().is_some_and(ScanHandle::resume)
    }

    /// Stop the current scan, wait for it to wind down, and forget it.
    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.stop_and_join();
            info!("Scan stopped");
        }
    }

    /// Drain up to `max` pending events without blocking.
    ///
    /// After a terminal event (`Complete`, `Stopped`, `Failed`) the handle is
    /// released and later calls return nothing until the next `start`.
    pub fn poll_events(&mut self, max: usize) -> Vec<ScanEvent> {
        let mut events = Vec::with_capacity(max.min(64));
        let Some(handle) = &self.handle else {
            return events;
        };
        let mut finished = false;
        while events.len() < max {
            match handle.events_rx.try_recv() {
                Ok(event) => {
                    finished = event.is_terminal();
                    events.push(event);
                    if finished {
                        break;
                    }
                }
                Err(_) => break,
            }
        }
        if finished {
            if let Some(handle) = self.handle.take() {
                join_scan_thread(handle.thread);
            }
        }
        events
    }
}
