use dashmap::{DashMap, DashSet};
use std::collections::HashMap;
use std::time::Duration;
use tokio::time::Instant;

/// Mutable state shared by every task of one crawl run
///
/// Only two compound operations mutate it, and each runs inside a single
/// shard lock: [`RunState::claim`] (check-and-insert on the visited set) and
/// [`RunState::merge_counts`] (read-and-accumulate per word).
#[derive(Debug)]
pub struct RunState {
    deadline: Instant,
    visited_urls: DashSet<String>,
    word_counts: DashMap<String, u64>,
}

impl RunState {
    /// Creates an empty run state expiring `timeout` from now
    pub fn new(timeout: Duration) -> Self {
        Self::with_deadline(Instant::now() + timeout)
    }

    pub fn with_deadline(deadline: Instant) -> Self {
        Self {
            deadline,
            visited_urls: DashSet::new(),
            word_counts: DashMap::new(),
        }
    }

    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    /// True once no new page fetch may begin
    ///
    /// The deadline instant itself is already expired, so a zero timeout
    /// never fetches anything.
    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.deadline
    }

    /// Atomically marks `url` as visited
    ///
    /// Returns `true` for exactly one caller per URL, no matter how many
    /// tasks race on it.
    pub fn claim(&self, url: &str) -> bool {
        self.visited_urls.insert(url.to_string())
    }

    /// Adds a page's word counts to the run totals
    pub fn merge_counts<'a, I>(&self, counts: I)
    where
        I: IntoIterator<Item = (&'a String, &'a u64)>,
    {
        for (word, count) in counts {
            *self.word_counts.entry(word.clone()).or_insert(0) += *count;
        }
    }

    /// Number of URLs claimed so far
    pub fn urls_visited(&self) -> usize {
        self.visited_urls.len()
    }

    pub fn is_visited(&self, url: &str) -> bool {
        self.visited_urls.contains(url)
    }

    /// Snapshot of the accumulated word counts
    pub fn word_counts(&self) -> HashMap<String, u64> {
        self.word_counts
            .iter()
            .map(|entry| (entry.key().clone(), *entry.value()))
            .collect()
    }
}
