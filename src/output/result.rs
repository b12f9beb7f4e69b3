//! The crawl result and its JSON rendering

use crate::output::word_counts::popular_words;
use crate::output::OutputResult;
use crate::state::RunState;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

/// Outcome of one crawl
///
/// Serializes as `{"wordCounts": {"word": n, ...}, "urlsVisited": n}` with
/// the words in popularity order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlResult {
    /// Most frequent words, highest count first
    #[serde(serialize_with = "serialize_ordered")]
    pub word_counts: Vec<(String, u64)>,

    /// Distinct URLs claimed during the run, including failed fetches
    pub urls_visited: usize,
}

impl CrawlResult {
    /// Aggregates the final state of a run, keeping `top_n` words
    pub fn from_run_state(state: &RunState, top_n: usize) -> Self {
        Self {
            word_counts: popular_words(&state.word_counts(), top_n),
            urls_visited: state.urls_visited(),
        }
    }

    /// Count of `word` in the result, if it made the cut
    pub fn count_of(&self, word: &str) -> Option<u64> {
        self.word_counts
            .iter()
            .find(|(w, _)| w == word)
            .map(|(_, count)| *count)
    }

    pub fn to_json(&self) -> OutputResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

fn serialize_ordered<S: Serializer>(
    entries: &[(String, u64)],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(entries.len()))?;
    for (word, count) in entries {
        map.serialize_entry(word, count)?;
    }
    map.end()
}

/// Writes the result as one line of JSON
///
/// Appends to the file at `path` (creating it if needed), or prints to
/// stdout when no path is given.
pub fn write_result(result: &CrawlResult, path: Option<&Path>) -> OutputResult<()> {
    let json = result.to_json()?;

    match path {
        Some(path) => {
            let mut file = OpenOptions::new().create(true).append(true).open(path)?;
            writeln!(file, "{}", json)?;
            tracing::info!("Result appended to {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{}", json)?;
            stdout.flush()?;
        }
    }
    Ok(())
}
