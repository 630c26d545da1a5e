/// Case-insensitive, non-overlapping literal word counting.
///
/// Each forbidden word is compiled once per scan into an escaped regex with
/// case-insensitive matching, so the per-file cost is one linear pass per
/// word. Words are counted in parallel (rayon) and collected as independent
/// partial counts, so the total does not depend on evaluation order.
use crate::error::FileReadError;
use crate::model::ForbiddenWordList;
use rayon::prelude::*;
use regex::{Regex, RegexBuilder};
use std::path::Path;

/// Upper bound on one compiled word pattern (64 MiB).
const COMPILED_SIZE_LIMIT: usize = 64 * 1024 * 1024;

/// Read a whole file as text.
///
/// Invalid UTF-8 is replaced rather than rejected so that mixed-encoding
/// trees can still be scanned.
pub fn read_text(path: &Path) -> Result<String, FileReadError> {
    let bytes = std::fs::read(path).map_err(|e| FileReadError::from_io(path.to_path_buf(), e))?;
    Ok(match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
    })
}

/// Occurrence counts for one piece of content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordMatches {
    /// Count per word, indexed like the `ForbiddenWordList`.
    pub per_word: Vec<u64>,
}

impl WordMatches {
    pub fn total(&self) -> u64 {
        self.per_word.iter().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// Pre-compiled matcher for a whole word list.
#[derive(Debug, Clone)]
pub struct WordMatcher {
    patterns: Vec<Regex>,
}

impl WordMatcher {
    pub fn new(words: &ForbiddenWordList) -> Result<Self, regex::Error> {
        let patterns = words.iter().map(compile_literal).collect::<Result<_, _>>()?;
        Ok(Self { patterns })
    }

    /// Count every word in `content`.
    pub fn count(&self, content: &str) -> WordMatches {
        let per_word = self
            .patterns
            .par_iter()
            .map(|re| re.find_iter(content).count() as u64)
            .collect();
        WordMatches { per_word }
    }

    /// Sum of all word counts in `content`.
    pub fn count_total(&self, content: &str) -> u64 {
        self.count(content).total()
    }

    /// Read `path` and count every word in it.
    pub fn count_file(&self, path: &Path) -> Result<(String, WordMatches), FileReadError> {
        let content = read_text(path)?;
        let matches = self.count(&content);
        Ok((content, matches))
    }

    pub(crate) fn patterns(&self) -> &[Regex] {
        &self.patterns
    }
}

/// Compile `word` as an escaped, case-insensitive literal.
///
/// Regex metacharacters in a word (`c++`, `a.b`) match themselves. The
/// compiled-size limit is raised for very long words.
fn compile_literal(word: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(&regex::escape(word))
        .case_insensitive(true)
        .size_limit(COMPILED_SIZE_LIMIT)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher(words: &[&str]) -> WordMatcher {
        WordMatcher::new(&ForbiddenWordList::new(words.iter().copied())).unwrap()
    }

    #[test]
    fn counts_case_insensitively_across_words() {
        let m = matcher(&["foo", "bar"]);
        assert_eq!(m.count_total("Foo bar FOO"), 3);
        assert_eq!(m.count("Foo bar FOO").per_word, vec![2, 1]);
    }

    /// "aaaa" contains two non-overlapping "aa", not three.
    #[test]
    fn occurrences_do_not_overlap() {
        assert_eq!(matcher(&["aa"]).count_total("aaaa"), 2);
    }

    #[test]
    fn substrings_inside_words_count() {
        assert_eq!(matcher(&["cat"]).count_total("concatenate CATalog"), 2);
    }

    #[test]
    fn metacharacters_are_literal() {
        let m = matcher(&["c++", "a.b"]);
        assert_eq!(m.count("c++ cxx aXb a.b").per_word, vec![1, 1]);
    }

    /// Duplicate words are counted once per listing.
    #[test]
    fn duplicate_words_each_contribute() {
        assert_eq!(matcher(&["spam", "SPAM"]).count_total("spam"), 2);
    }

    #[test]
    fn no_matches_is_empty() {
        let counts = matcher(&["spam"]).count("clean text");
        assert!(counts.is_empty());
        assert_eq!(counts.per_word, vec![0]);
    }

    #[test]
    fn non_ascii_case_folding() {
        assert_eq!(matcher(&["привет"]).count_total("Привет, ПРИВЕТ"), 2);
    }

    #[test]
    fn read_text_reports_missing_file_as_other() {
        let tmp = tempfile::TempDir::new().unwrap();
        let err = read_text(&tmp.path().join("missing.txt")).unwrap_err();
        assert!(matches!(err, FileReadError::Other { .. }));
    }

    #[test]
    fn read_text_tolerates_invalid_utf8() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("bin.dat");
        std::fs::write(&path, b"spam\xff\xfespam").unwrap();
        let (content, counts) = matcher(&["spam"]).count_file(&path).unwrap();
        assert!(content.contains('\u{FFFD}'));
        assert_eq!(counts.total(), 2);
    }
}
