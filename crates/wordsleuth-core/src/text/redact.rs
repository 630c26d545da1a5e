/// Redaction — replace every forbidden-word occurrence with [`MASK_TOKEN`].
///
/// Words are applied one after another in list order, each pass running
/// over the output of the previous one. A later word can only hit text an
/// earlier pass inserted if that word itself occurs inside the mask token.
use super::matcher::WordMatcher;
use crate::config::MASK_TOKEN;
use regex::NoExpand;
use std::borrow::Cow;

/// Return `content` with every match of every word masked.
pub fn redact(content: &str, matcher: &WordMatcher) -> String {
    let mut redacted = content.to_owned();
    for re in matcher.patterns() {
        let replaced = match re.replace_all(&redacted, NoExpand(MASK_TOKEN)) {
            Cow::Borrowed(_) => continue,
            Cow::Owned(s) => s,
        };
        redacted = replaced;
    }
    redacted
}
