/// WordSleuth Core — scanning, matching, redaction, and aggregation.
///
/// This crate contains all business logic with zero frontend dependencies.
/// It is designed to be reusable across different frontends (CLI, GUI, TUI).
///
/// # Modules
///
/// - [`model`] — Forbidden-word list, per-file results, and report types.
/// - [`scanner`] — Background scan orchestration with pause/resume/stop.
/// - [`text`] — Case-insensitive word matching and redaction.
/// - [`analysis`] — Post-scan aggregation (top forbidden words).
/// - [`staging`] — Staging directory for redacted copies.
/// - [`config`] — Scan configuration and fixed constants.
/// - [`error`] — Error taxonomy for pre-flight and per-file failures.
pub mod analysis;
pub mod config;
pub mod error;
pub mod model;
pub mod scanner;
pub mod staging;
pub mod text;

pub use config::{CollisionPolicy, ScanConfig};
pub use error::{EnumerationError, FileReadError, ScanError, ValidationError, WriteError};
pub use model::{FileResult, ForbiddenWordList, ScanReport, TopWordEntry};
