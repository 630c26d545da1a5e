/// Text processing — forbidden-word matching and redaction.
///
/// Both operate on whole-file content decoded as (lossy) UTF-8. Matching is
/// literal and case-insensitive; no word-boundary or normalisation rules.
pub mod matcher;
pub mod redact;

pub use matcher::{read_text, WordMatcher, WordMatches};
pub use redact::redact;
