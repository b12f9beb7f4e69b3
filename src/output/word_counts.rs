//! Result aggregation: the most frequent words of a run

use std::cmp::Reverse;
use std::collections::HashMap;

/// Returns the `top_n` entries of `counts` with the highest counts
///
/// Entries are ordered by count, highest first; equal counts are ordered by
/// word so the selection is deterministic. Fewer than `top_n` entries are
/// returned when `counts` is smaller.
pub fn popular_words(counts: &HashMap<String, u64>, top_n: usize) -> Vec<(String, u64)> {
    let mut entries: Vec<(String, u64)> = counts
        .iter()
        .map(|(word, count)| (word.clone(), *count))
        .collect();

    entries.sort_unstable_by(|(word_a, count_a), (word_b, count_b)| {
        (Reverse(count_a), word_a).cmp(&(Reverse(count_b), word_b))
    });
    entries.truncate(top_n);
    entries
}
