use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

/// Key of one profiling record: (implementation type, operation name)
pub type RecordKey = (&'static str, &'static str);

/// Accumulates elapsed time per profiled operation
///
/// Safe to share across threads; every [`record`](Self::record) is one
/// locked read-and-add.
#[derive(Debug, Default)]
pub struct ProfilingState {
    records: Mutex<BTreeMap<RecordKey, Duration>>,
}

impl ProfilingState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `elapsed` to the total for `(type_name, operation)`
    pub fn record(&self, type_name: &'static str, operation: &'static str, elapsed: Duration) {
        let mut records = self.records.lock().unwrap_or_else(PoisonError::into_inner);
        *records.entry((type_name, operation)).or_default() += elapsed;
    }

    /// Total recorded for one key, if any call was recorded
    pub fn total(&self, type_name: &str, operation: &str) -> Option<Duration> {
        let records = self.records.lock().unwrap_or_else(PoisonError::into_inner);
        records
            .iter()
            .find(|((t, o), _)| *t == type_name && *o == operation)
            .map(|(_, d)| *d)
    }

    /// Copy of all records, ordered by type name then operation name
    pub fn snapshot(&self) -> Vec<(RecordKey, Duration)> {
        let records = self.records.lock().unwrap_or_else(PoisonError::into_inner);
        records.iter().map(|(k, d)| (*k, *d)).collect()
    }

    pub fn len(&self) -> usize {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Renders one `type#operation took Xm Ys Zms` line per record
    pub fn render(&self) -> String {
        let mut out = String::new();
        for ((type_name, operation), elapsed) in self.snapshot() {
            let _ = writeln!(
                out,
                "{}#{} took {}",
                type_name,
                operation,
                format_duration(elapsed)
            );
        }
        out
    }
}

/// Formats a duration as `<minutes>m <seconds>s <millis>ms`
pub fn format_duration(duration: Duration) -> String {
    let total_secs = duration.as_secs();
    format!(
        "{}m {}s {}ms",
        total_secs / 60,
        total_secs % 60,
        duration.subsec_millis()
    )
}
