use crate::profiler::state::ProfilingState;
use std::future::Future;
use std::sync::Arc;
use tokio::time::Instant;

/// One operation of a capability, and whether calls to it are timed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operation {
    pub name: &'static str,
    pub profiled: bool,
}

impl Operation {
    pub const fn profiled(name: &'static str) -> Self {
        Self {
            name,
            profiled: true,
        }
    }

    pub const fn unprofiled(name: &'static str) -> Self {
        Self {
            name,
            profiled: false,
        }
    }
}

/// Static description of an interface the profiler can wrap
///
/// Implemented on the trait object type of the interface, e.g.
/// `impl Capability for dyn PageFetcher`, and paired with an
/// `impl<T: PageFetcher> PageFetcher for Profiled<T>` whose methods forward
/// through [`Profiled::invoke`] or [`Profiled::invoke_async`].
pub trait Capability {
    /// Interface name used in error messages
    const NAME: &'static str;

    /// Every operation of the interface
    const OPERATIONS: &'static [Operation];

    fn has_profiled_operation() -> bool {
        Self::OPERATIONS.iter().any(|op| op.profiled)
    }
}

/// An implementation wrapped by the profiler
///
/// Calls to profiled operations are timed and recorded under
/// `(type name of T, operation name)`, including calls that fail, panic, or
/// are dropped before completing. Other operations are forwarded untimed.
pub struct Profiled<T> {
    inner: T,
    type_name: &'static str,
    operations: &'static [Operation],
    state: Arc<ProfilingState>,
}

impl<T> Profiled<T> {
    pub(crate) fn new(
        inner: T,
        type_name: &'static str,
        operations: &'static [Operation],
        state: Arc<ProfilingState>,
    ) -> Self {
        Self {
            inner,
            type_name,
            operations,
            state,
        }
    }

    /// The wrapped implementation
    pub fn inner(&self) -> &T {
        &self.inner
    }

    pub fn into_inner(self) -> T {
        self.inner
    }

    /// Type name recorded for this implementation
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    fn is_profiled(&self, operation: &str) -> bool {
        self.operations
            .iter()
            .any(|op| op.name == operation && op.profiled)
    }

    fn start(&self, operation: &'static str) -> Option<CallTimer<'_>> {
        self.is_profiled(operation).then(|| CallTimer {
            state: &self.state,
            type_name: self.type_name,
            operation,
            started: Instant::now(),
        })
    }

    /// Runs a synchronous operation of the wrapped implementation
    pub fn invoke<R>(&self, operation: &'static str, call: impl FnOnce(&T) -> R) -> R {
        let _timer = self.start(operation);
        call(&self.inner)
    }

    /// Awaits an asynchronous operation of the wrapped implementation
    pub async fn invoke_async<F>(&self, operation: &'static str, call: F) -> F::Output
    where
        F: Future,
    {
        let _timer = self.start(operation);
        call.await
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Profiled<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Profiled")
            .field("inner", &self.inner)
            .field("type_name", &self.type_name)
            .finish()
    }
}

/// Records the elapsed time of one call when dropped
struct CallTimer<'a> {
    state: &'a ProfilingState,
    type_name: &'static str,
    operation: &'static str,
    started: Instant,
}

impl Drop for CallTimer<'_> {
    fn drop(&mut self) {
        self.state
            .record(self.type_name, self.operation, self.started.elapsed());
    }
}
