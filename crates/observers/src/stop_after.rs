use solvebench_core::Observer;

use crate::traits::{CanStopEarly, HasElapsed};

/// Stops the run after a fixed number of timed calls.
///
/// Useful for smoke-testing a strategy set without paying for every
/// repetition. The harness reports a stopped run as an error, never as a
/// partial result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StopAfter {
    limit: usize,
    seen: usize,
}

impl StopAfter {
    /// Stops once `limit` calls have completed.
    #[must_use]
    pub fn calls(limit: usize) -> Self {
        Self { limit, seen: 0 }
    }

    /// Returns the number of calls seen so far.
    #[must_use]
    pub fn seen(&self) -> usize {
        self.seen
    }
}

impl<E, A> Observer<E, A> for StopAfter
where
    E: HasElapsed,
    A: CanStopEarly,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        if event.elapsed().is_none() {
            return None;
        }

        self.seen += 1;
        (self.seen >= self.limit).then(A::stop_early)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::time::Duration;

    use solvebench_harness::{Action, Event};

    #[test]
    fn stops_on_the_limiting_call() {
        let mut stop = StopAfter::calls(2);
        let started = Event::Started {
            n: 3,
            strategy: "a",
            index: 0,
        };
        let solved = Event::Solved {
            n: 3,
            strategy: "a",
            repetition: 0,
            elapsed: Duration::from_micros(7),
            solution: &[1.0, 2.0, 3.0],
        };

        assert_eq!(Observer::<_, Action>::observe(&mut stop, &started), None);
        assert_eq!(Observer::<_, Action>::observe(&mut stop, &solved), None);
        assert_eq!(
            Observer::<_, Action>::observe(&mut stop, &solved),
            Some(Action::StopEarly)
        );
        assert_eq!(stop.seen(), 2);
    }
}
