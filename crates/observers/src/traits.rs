//! Capability traits for reusable observers.
//!
//! These traits abstract over the harness's event and action types, so an
//! observer can be written once against what an event carries rather than
//! against a concrete enum.
//!
//! # Event traits
//!
//! - [`HasStrategy`] — events that concern one strategy at one size
//! - [`HasElapsed`] — events that may carry the time charged to a call
//!
//! # Action traits
//!
//! - [`CanStopEarly`] — actions that can signal early termination
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//!
//! use solvebench_core::Observer;
//! use solvebench_observers::traits::{CanStopEarly, HasElapsed};
//!
//! /// Stops the run once any single call takes longer than a limit.
//! struct TooSlow(Duration);
//!
//! impl<E: HasElapsed, A: CanStopEarly> Observer<E, A> for TooSlow {
//!     fn observe(&mut self, event: &E) -> Option<A> {
//!         match event.elapsed() {
//!             Some(elapsed) if elapsed > self.0 => Some(A::stop_early()),
//!             _ => None,
//!         }
//!     }
//! }
//! ```

use std::time::Duration;

use solvebench_harness::{Action, Event};

/// An event that concerns one strategy at one problem size.
pub trait HasStrategy {
    /// Returns the label of the strategy.
    fn strategy(&self) -> &str;

    /// Returns the problem dimension.
    fn n(&self) -> usize;
}

/// An event that may carry the time charged to a single call.
pub trait HasElapsed {
    /// Returns the elapsed time, or `None` if the event is not a timed call.
    fn elapsed(&self) -> Option<Duration>;
}

/// An action type that can signal early termination.
pub trait CanStopEarly {
    /// Returns the action that stops the run early.
    fn stop_early() -> Self;
}

impl HasStrategy for Event<'_> {
    fn strategy(&self) -> &str {
        Event::strategy(self)
    }

    fn n(&self) -> usize {
        Event::n(self)
    }
}

impl HasElapsed for Event<'_> {
    fn elapsed(&self) -> Option<Duration> {
        match self {
            Event::Solved { elapsed, .. } => Some(*elapsed),
            Event::Started { .. } | Event::Timed { .. } => None,
        }
    }
}

impl CanStopEarly for Action {
    fn stop_early() -> Self {
        Self::StopEarly
    }
}
