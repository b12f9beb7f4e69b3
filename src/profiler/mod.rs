//! Call profiler
//!
//! Wraps an implementation of a [`Capability`] in a [`Profiled`] decorator
//! that times the capability's profiled operations and accumulates the
//! elapsed time per (implementation type, operation). One `Profiler` is
//! shared by every wrapped object of a run; its report is written once the
//! run is over.
//!
//! # Example
//!
//! ```no_run
//! use web_word_crawler::crawler::{HttpPageFetcher, PageFetcher};
//! use web_word_crawler::Profiler;
//!
//! # fn example(fetcher: HttpPageFetcher) -> Result<(), Box<dyn std::error::Error>> {
//! let profiler = Profiler::new();
//! let fetcher = profiler.wrap::<dyn PageFetcher, _>(fetcher)?;
//! // ... use `fetcher` ...
//! print!("{}", profiler.report());
//! # Ok(())
//! # }
//! ```

mod state;
mod wrapper;

pub use state::{format_duration, ProfilingState, RecordKey};
pub use wrapper::{Capability, Operation, Profiled};

use crate::ProfilerError;
use chrono::{DateTime, Utc};
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;

/// Creates profiled wrappers and renders the collected timings
#[derive(Debug, Clone)]
pub struct Profiler {
    state: Arc<ProfilingState>,
    started_at: DateTime<Utc>,
}

impl Profiler {
    pub fn new() -> Self {
        Self::starting_at(Utc::now())
    }

    /// Profiler whose report header shows `started_at`
    pub fn starting_at(started_at: DateTime<Utc>) -> Self {
        Self {
            state: Arc::new(ProfilingState::new()),
            started_at,
        }
    }

    /// Wraps `delegate` so the profiled operations of `C` are timed
    ///
    /// Fails with [`ProfilerError::NoProfiledOperations`] when `C` has
    /// nothing to measure.
    pub fn wrap<C, T>(&self, delegate: T) -> Result<Profiled<T>, ProfilerError>
    where
        C: Capability + ?Sized,
    {
        if !C::has_profiled_operation() {
            return Err(ProfilerError::NoProfiledOperations { capability: C::NAME });
        }

        tracing::debug!(
            "Profiling {} as {}",
            std::any::type_name::<T>(),
            C::NAME
        );

        Ok(Profiled::new(
            delegate,
            std::any::type_name::<T>(),
            C::OPERATIONS,
            Arc::clone(&self.state),
        ))
    }

    /// The shared accumulator behind every wrapper this profiler created
    pub fn state(&self) -> &ProfilingState {
        &self.state
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Renders the report: a `Run at` header, one line per record, a blank line
    pub fn report(&self) -> String {
        format!(
            "Run at {}\n{}\n",
            self.started_at.format("%a, %d %b %Y %H:%M:%S GMT"),
            self.state.render()
        )
    }

    /// Writes the report to `writer`
    pub fn write_data<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_all(self.report().as_bytes())?;
        writer.flush()
    }

    /// Appends the report to the file at `path`, creating it if needed
    pub fn append_to_file(&self, path: &Path) -> io::Result<()> {
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        self.write_data(&mut file)
    }
}

impl Default for Profiler {
    fn default() -> Self {
        Self::new()
    }
}
