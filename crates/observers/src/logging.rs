use solvebench_core::Observer;

use crate::traits::{HasElapsed, HasStrategy};

/// Emits a `tracing` event for everything the harness reports.
///
/// Timed calls are logged at `TRACE`, everything else at `DEBUG`, under the
/// `solvebench::run` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct Tracing;

impl Tracing {
    /// Creates a logging observer.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl<E, A> Observer<E, A> for Tracing
where
    E: HasStrategy + HasElapsed,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        let strategy = event.strategy();
        let n = event.n();
        match event.elapsed() {
            Some(elapsed) => {
                tracing::trace!(target: "solvebench::run", strategy, n, ?elapsed, "call");
            }
            None => tracing::debug!(target: "solvebench::run", strategy, n, "progress"),
        }
        None
    }
}
