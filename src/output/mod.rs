//! Output module for crawl results
//!
//! This module handles:
//! - Selecting the most popular words of a run
//! - Rendering the crawl result as JSON
//! - Appending results to a file or printing them

mod result;
mod word_counts;

pub use result::{write_result, CrawlResult};
pub use word_counts::popular_words;

use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize result: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;
