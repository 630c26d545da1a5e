/// Top-K forbidden words by total occurrence count.
///
/// Totals come from the per-word counts recorded while matching, so no file
/// is read again. A word listed more than once is ranked once, at its first
/// position, with the count of a single listing.
use crate::model::{FileResult, ForbiddenWordList, TopWordEntry};
use std::collections::HashSet;

/// Rank the words of `words` across `results`.
///
/// Returns at most `k` entries, count descending, ties in word-list order.
/// Words that never matched are left out.
pub fn top_words(
    results: &[FileResult],
    words: &ForbiddenWordList,
    k: usize,
) -> Vec<TopWordEntry> {
    let mut totals = vec![0u64; words.len()];
    for result in results {
        for (total, count) in totals.iter_mut().zip(&result.word_counts) {
            *total += count;
        }
    }

    let mut seen = HashSet::with_capacity(words.len());
    let mut ranked: Vec<TopWordEntry> = words
        .as_slice()
        .iter()
        .zip(totals)
        .filter(|(word, _)| seen.insert(word.to_lowercase()))
        .filter(|&(_, count)| count > 0)
        .map(|(word, count)| TopWordEntry {
            word: word.clone(),
            count,
        })
        .collect();

    // `sort_by` is stable, so equal counts keep list order.
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked.truncate(k);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn result(name: &str, word_counts: Vec<u64>) -> FileResult {
        FileResult::new(
            PathBuf::from(name),
            word_counts,
            PathBuf::from(format!("Copy_{name}")),
        )
    }

    #[test]
    fn sums_counts_across_files() {
        let words = ForbiddenWordList::new(["spam", "eggs"]);
        let results = vec![result("a", vec![2, 1]), result("b", vec![3, 0])];
        let top = top_words(&results, &words, 10);
        assert_eq!(top.len(), 2);
        assert_eq!((top[0].word.as_str(), top[0].count), ("spam", 5));
        assert_eq!((top[1].word.as_str(), top[1].count), ("eggs", 1));
    }

    #[test]
    fn ties_keep_word_list_order() {
        let words = ForbiddenWordList::new(["c", "a", "b"]);
        let results = vec![result("x", vec![1, 1, 1])];
        let top = top_words(&results, &words, 10);
        let order: Vec<_> = top.iter().map(|e| e.word.as_str()).collect();
        assert_eq!(order, vec!["c", "a", "b"]);
    }

    /// Twelve words with nonzero counts are cut to ten, highest first.
    #[test]
    fn never_more_than_k_entries() {
        let names: Vec<String> = (0..12).map(|i| format!("w{i}")).collect();
        let words = ForbiddenWordList::new(&names);
        let counts: Vec<u64> = (1..=12).collect();
        let top = top_words(&[result("x", counts)], &words, 10);
        assert_eq!(top.len(), 10);
        assert_eq!(top[0].count, 12);
        assert!(top.windows(2).all(|w| w[0].count >= w[1].count));
    }

    #[test]
    fn zero_count_words_are_omitted() {
        let words = ForbiddenWordList::new(["a", "b", "c"]);
        let top = top_words(&[result("x", vec![0, 4, 0])], &words, 10);
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].word.as_str(), "b");
    }

    #[test]
    fn duplicate_listings_rank_once() {
        let words = ForbiddenWordList::new(["spam", "SPAM", "ham"]);
        let top = top_words(&[result("x", vec![2, 2, 1])], &words, 10);
        let pairs: Vec<_> = top.iter().map(|e| (e.word.as_str(), e.count)).collect();
        assert_eq!(pairs, vec![("spam", 2), ("ham", 1)]);
    }

    #[test]
    fn no_results_gives_empty_ranking() {
        let words = ForbiddenWordList::new(["spam"]);
        assert!(top_words(&[], &words, 10).is_empty());
    }
}
