/// The ordered list of forbidden words.
///
/// Order is significant: redaction applies words in list order and the
/// top-words ranking breaks ties by list position. Duplicates are kept.
use compact_str::CompactString;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ForbiddenWordList {
    words: Vec<CompactString>,
}

impl ForbiddenWordList {
    /// Build a list from any sequence of words. Empty entries are dropped.
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .filter(|w| !w.as_ref().is_empty())
            .map(|w| CompactString::new(w.as_ref()))
            .collect();
        Self { words }
    }

    /// Parse newline-delimited text, one word per line.
    ///
    /// A trailing `\r` is stripped so CRLF files load the same as LF files.
    /// Lines are otherwise taken verbatim, so surrounding spaces are part of
    /// the word.
    pub fn from_text(text: &str) -> Self {
        Self::new(text.split('\n').map(|line| line.strip_suffix('\r').unwrap_or(line)))
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.words.get(index).map(CompactString::as_str)
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.words.iter().map(CompactString::as_str)
    }

    pub fn as_slice(&self) -> &[CompactString] {
        &self.words
    }
}
