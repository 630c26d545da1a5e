/// Console state management.
///
/// Centralises all mutable state the terminal frontend reads and writes.
/// The scan thread communicates through the core `Scanner`; state updates
/// happen in `process_events()`, which runs once per event-loop tick and
/// renders whatever changed as plain text lines.
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use wordsleuth_core::model::format::{format_count, format_progress};
use wordsleuth_core::model::ProgressSnapshot;
use wordsleuth_core::scanner::{ControlState, ScanCommand, ScanEvent, Scanner};
use wordsleuth_core::{FileResult, ForbiddenWordList, ScanConfig, ScanError, ScanReport};

/// Lifecycle phase of the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsolePhase {
    /// No scan started yet.
    Idle,
    /// A scan is running (possibly paused).
    Scanning,
    /// Scan complete; the report is available.
    Results,
    /// The user stopped the scan; partial results were discarded.
    Stopped,
    /// The scan failed to start on its background thread.
    Failed,
}

/// Maximum events drained per tick, so a large backlog cannot starve
/// command handling.
const MAX_EVENTS_PER_TICK: usize = 500;

/// Maximum warnings retained for the summary. Further warnings are counted
/// but not stored.
const MAX_STORED_WARNINGS: usize = 1_000;

/// Percentage step between progress lines.
const PROGRESS_STEP_PERCENT: u32 = 10;

pub struct ConsoleState {
    pub phase: ConsolePhase,
    scanner: Scanner,
    /// Suppress progress and warning lines.
    quiet: bool,

    pub progress: ProgressSnapshot,
    /// Files matched so far, in arrival order.
    pub results: Vec<FileResult>,
    pub warnings: Vec<(PathBuf, String)>,
    pub warning_count: usize,
    pub report: Option<ScanReport>,
    pub failure: Option<String>,
    /// Last progress step printed, in percent.
    last_step: Option<u32>,
}

impl ConsoleState {
    pub fn new(quiet: bool) -> Self {
        Self {
            phase: ConsolePhase::Idle,
            scanner: Scanner::new(),
            quiet,
            progress: ProgressSnapshot::default(),
            results: Vec::new(),
            warnings: Vec::new(),
            warning_count: 0,
            report: None,
            failure: None,
            last_step: None,
        }
    }

    /// Start a new scan, discarding anything from the previous one.
    pub fn start(
        &mut self,
        root: PathBuf,
        words: ForbiddenWordList,
        config: ScanConfig,
    ) -> Result<(), ScanError> {
        self.reset();
        self.scanner.start(root, words, config)?;
        self.phase = ConsolePhase::Scanning;
        Ok(())
    }

    pub fn is_running(&self) -> bool {
        self.phase == ConsolePhase::Scanning
    }

    pub fn is_paused(&self) -> bool {
        self.scanner.state() == Some(ControlState::Paused)
    }

    pub fn report(&self) -> Option<&ScanReport> {
        self.report.as_ref()
    }

    pub fn exit_code(&self) -> ExitCode {
        match self.phase {
            ConsolePhase::Results | ConsolePhase::Idle => ExitCode::SUCCESS,
            ConsolePhase::Stopped | ConsolePhase::Scanning => ExitCode::from(1),
            ConsolePhase::Failed => ExitCode::from(2),
        }
    }

    /// Apply a user command and echo the resulting state.
    pub fn apply(&mut self, command: ScanCommand, out: &mut impl Write) -> io::Result<()> {
        if !self.is_running() {
            return Ok(());
        }
        match command {
            ScanCommand::Pause => {
                if self.scanner.pause() {
                    writeln!(out, "Paused. Files in progress will finish; enter r to resume.")?;
                }
            }
            ScanCommand::Resume => {
                if self.scanner.resume() {
                    writeln!(out, "Resumed.")?;
                }
            }
            ScanCommand::Stop => {
                self.scanner.stop();
                self.results.clear();
                self.warnings.clear();
                self.phase = ConsolePhase::Stopped;
                writeln!(
                    out,
                    "Stopped. {}; results discarded.",
                    format_progress(&self.progress)
                )?;
            }
        }
        Ok(())
    }

    /// Drain pending scan events and render them. Returns `true` if
    /// anything arrived.
    pub fn process_events(&mut self, out: &mut impl Write) -> io::Result<bool> {
        if !self.is_running() {
            return Ok(false);
        }
        let events = self.scanner.poll_events(MAX_EVENTS_PER_TICK);
        let any = !events.is_empty();
        for event in events {
            self.handle_event(event, out)?;
        }
        Ok(any)
    }

    fn handle_event(&mut self, event: ScanEvent, out: &mut impl Write) -> io::Result<()> {
        match event {
            ScanEvent::Started { total_files } => {
                self.progress = ProgressSnapshot {
                    processed: 0,
                    total: total_files,
                };
                writeln!(out, "Found {} files to scan.", format_count(total_files as u64))?;
            }
            ScanEvent::Progress(snapshot) => {
                // Workers race to send, so an older snapshot can arrive late.
                if snapshot.processed > self.progress.processed {
                    self.progress = snapshot;
                    self.render_progress_step(out)?;
                }
            }
            ScanEvent::FileMatched(result) => {
                writeln!(
                    out,
                    "MATCH {:>6}  {}  ->  {}",
                    result.match_count,
                    result.source_path.display(),
                    result.staged_copy_path.display()
                )?;
                self.results.push(result);
            }
            ScanEvent::Warning { path, message } => {
                self.warning_count += 1;
                if !self.quiet {
                    writeln!(out, "WARN  {message}")?;
                }
                if self.warnings.len() < MAX_STORED_WARNINGS {
                    self.warnings.push((path, message));
                }
            }
            ScanEvent::Complete(report) => {
                self.progress = report.progress;
                self.phase = ConsolePhase::Results;
                render_report(&report, out)?;
                self.report = Some(report);
            }
            ScanEvent::Stopped { processed, total } => {
                self.progress = ProgressSnapshot { processed, total };
                self.results.clear();
                self.phase = ConsolePhase::Stopped;
                writeln!(out, "Scan stopped. {}.", format_progress(&self.progress))?;
            }
            ScanEvent::Failed { error } => {
                writeln!(out, "Scan failed: {error}")?;
                self.failure = Some(error);
                self.phase = ConsolePhase::Failed;
            }
        }
        Ok(())
    }

    /// Print a progress line each time another step is crossed.
    fn render_progress_step(&mut self, out: &mut impl Write) -> io::Result<()> {
        let Some(pct) = self.progress.percentage() else {
            return Ok(());
        };
        let step = (pct as u32 / PROGRESS_STEP_PERCENT) * PROGRESS_STEP_PERCENT;
        if self.last_step.is_some_and(|last| step <= last) {
            return Ok(());
        }
        self.last_step = Some(step);
        if !self.quiet {
            writeln!(out, "{}", format_progress(&self.progress))?;
        }
        Ok(())
    }

    fn reset(&mut self) {
        self.scanner.stop();
        self.phase = ConsolePhase::Idle;
        self.progress = ProgressSnapshot::default();
        self.results.clear();
        self.warnings.clear();
        self.warning_count = 0;
        self.report = None;
        self.failure = None;
        self.last_step = None;
    }
}

/// Render the final results table and top-words ranking.
pub fn render_report(report: &ScanReport, out: &mut impl Write) -> io::Result<()> {
    writeln!(out)?;
    writeln!(
        out,
        "Scan of {} complete in {:.2?}. {}.",
        report.root.display(),
        report.duration,
        format_progress(&report.progress)
    )?;

    if report.results.is_empty() {
        writeln!(out, "No forbidden words found.")?;
    } else {
        let name_width = report
            .results
            .iter()
            .map(|r| r.file_name().chars().count())
            .max()
            .unwrap_or(0)
            .max("File".len());
        writeln!(out)?;
        writeln!(out, "{:<name_width$}  {:>7}  Redacted copy", "File", "Matches")?;
        for r in &report.results {
            writeln!(
                out,
                "{:<name_width$}  {:>7}  {}",
                r.file_name(),
                r.match_count,
                r.staged_copy_path.display()
            )?;
        }
    }

    if !report.top_words.is_empty() {
        writeln!(out)?;
        writeln!(out, "Top {} forbidden words:", report.top_words.len())?;
        for (rank, entry) in report.top_words.iter().enumerate() {
            writeln!(out, "{:>3}. {}  {}", rank + 1, entry.word, format_count(entry.count))?;
        }
    }

    if report.warning_count > 0 {
        writeln!(out)?;
        writeln!(
            out,
            "{} files or directories could not be processed.",
            format_count(report.warning_count as u64)
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_console_is_idle() {
        let console = ConsoleState::new(false);
        assert_eq!(console.phase, ConsolePhase::Idle);
        assert!(!console.is_running());
        assert!(console.report().is_none());
    }

    #[test]
    fn events_are_ignored_when_idle() {
        let mut console = ConsoleState::new(false);
        let mut out = Vec::new();
        assert!(!console.process_events(&mut out).unwrap());
        assert!(out.is_empty());
    }

    #[test]
    fn progress_lines_are_throttled_to_steps() {
        let mut console = ConsoleState::new(false);
        let mut out = Vec::new();
        for processed in 1..=100 {
            console
                .handle_event(
                    ScanEvent::Progress(ProgressSnapshot {
                        processed,
                        total: 100,
                    }),
                    &mut out,
                )
                .unwrap();
        }
        let text = String::from_utf8(out).unwrap();
        // 0% (first event at 1%), then every 10% up to 100%.
        assert_eq!(text.lines().count(), 11);
        assert!(text.ends_with("Processed 100 of 100 files (100%)\n"));
    }

    #[test]
    fn late_progress_snapshot_never_moves_backwards() {
        let mut console = ConsoleState::new(false);
        let mut out = Vec::new();
        for processed in [1, 3, 2] {
            console
                .handle_event(
                    ScanEvent::Progress(ProgressSnapshot {
                        processed,
                        total: 4,
                    }),
                    &mut out,
                )
                .unwrap();
        }
        assert_eq!(console.progress.processed, 3);
        assert_eq!(console.progress.total, 4);
    }

    #[test]
    fn quiet_suppresses_progress_and_warnings() {
        let mut console = ConsoleState::new(true);
        let mut out = Vec::new();
        console
            .handle_event(
                ScanEvent::Warning {
                    path: PathBuf::from("x"),
                    message: "boom".into(),
                },
                &mut out,
            )
            .unwrap();
        console
            .handle_event(
                ScanEvent::Progress(ProgressSnapshot {
                    processed: 1,
                    total: 1,
                }),
                &mut out,
            )
            .unwrap();
        assert!(out.is_empty());
        assert_eq!(console.warning_count, 1);
        assert_eq!(console.warnings.len(), 1);
    }
}
