use std::time::Duration;

use solvebench_core::Observer;

use crate::traits::{HasElapsed, HasStrategy};

/// One timed call seen by a [`History`].
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub strategy: String,
    pub n: usize,
    pub elapsed: Duration,
}

/// Records the time of every call in a run.
///
/// Pass `&mut history` as the observer to inspect the calls afterwards.
#[derive(Debug, Clone, Default)]
pub struct History {
    calls: Vec<Call>,
}

impl History {
    /// Creates an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every recorded call, in the order observed.
    #[must_use]
    pub fn calls(&self) -> &[Call] {
        &self.calls
    }

    /// Returns the calls made by one strategy.
    pub fn for_strategy<'a>(&'a self, label: &'a str) -> impl Iterator<Item = &'a Call> + 'a {
        self.calls.iter().filter(move |call| call.strategy == label)
    }

    /// Returns the mean seconds per call for one strategy.
    #[must_use]
    pub fn mean(&self, label: &str) -> Option<f64> {
        let (count, total) = self
            .for_strategy(label)
            .fold((0_u32, Duration::ZERO), |(count, total), call| {
                (count + 1, total + call.elapsed)
            });
        (count > 0).then(|| total.as_secs_f64() / f64::from(count))
    }

    /// Discards everything recorded so far.
    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl<E, A> Observer<E, A> for History
where
    E: HasStrategy + HasElapsed,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        if let Some(elapsed) = event.elapsed() {
            self.calls.push(Call {
                strategy: event.strategy().to_string(),
                n: event.n(),
                elapsed,
            });
        }
        None
    }
}

/// Allows `&mut History` to be passed to a harness that takes an observer by
/// value, so the calls can be read after the run completes.
impl<E, A> Observer<E, A> for &mut History
where
    E: HasStrategy + HasElapsed,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        Observer::<E, A>::observe(&mut **self, event)
    }
}
