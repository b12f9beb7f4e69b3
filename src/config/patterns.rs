//! Full-string regex matching for ignored URLs and words

use crate::ConfigError;
use regex::Regex;

/// A compiled list of patterns that must match an entire candidate string
///
/// Each source pattern is anchored as `^(?:pattern)$`, so `example` does not
/// match `https://example.com/` while `.*example.*` does.
#[derive(Debug, Clone, Default)]
pub struct PatternList {
    patterns: Vec<Regex>,
}

impl PatternList {
    /// Compiles every pattern, failing on the first invalid one
    pub fn compile<S: AsRef<str>>(sources: &[S]) -> Result<Self, ConfigError> {
        let patterns = sources
            .iter()
            .map(|source| {
                let source = source.as_ref();
                Regex::new(&format!("^(?:{})$", source)).map_err(|e| {
                    ConfigError::InvalidPattern {
                        pattern: source.to_string(),
                        source: e,
                    }
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { patterns })
    }

    /// Returns true if any pattern matches the whole candidate
    pub fn matches(&self, candidate: &str) -> bool {
        self.patterns.iter().any(|p| p.is_match(candidate))
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }
}
