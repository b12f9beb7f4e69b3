//! Configuration module for the crawler
//!
//! This module handles loading, parsing, and validating TOML configuration files,
//! and turning them into the runtime settings a crawl strategy is built from.
//!
//! # Example
//!
//! ```no_run
//! use web_word_crawler::config::{load_config, CrawlerSettings};
//! use std::path::Path;
//!
//! let config = load_config(Path::new("crawl.toml")).unwrap();
//! let settings = CrawlerSettings::from_config(&config.crawler).unwrap();
//! println!("Crawler will use max depth: {}", settings.max_depth);
//! ```

mod parser;
mod patterns;
mod settings;
mod types;
mod validation;

// Re-export types
pub use patterns::PatternList;
pub use settings::{resolve_parallelism, CrawlerSettings};
pub use types::{Config, CrawlerConfig, OutputConfig, UserAgentConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
