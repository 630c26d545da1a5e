/// Data model for WordSleuth scans.
///
/// Re-exports the word list, per-file results, and report types.
pub mod format;
pub mod result;
pub mod word_list;

pub use result::{FileResult, ProgressSnapshot, ScanReport, TopWordEntry};
pub use word_list::ForbiddenWordList;
