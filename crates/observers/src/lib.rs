//! Reusable observers for solvebench.
//!
//! This crate provides [`Observer`] implementations and capability traits that
//! work with any event type exposing what they need.
//!
//! - [`History`] — records the time of every call
//! - [`StopAfter`] — stops a run after a number of calls
//! - [`Tracing`] — logs every event through `tracing`
//! - [`Verbose`] — prints progress and solutions to stdout or any writer
//!
//! # Modules
//!
//! - [`traits`] — Capability traits for reusable observers
//!   ([`HasStrategy`], [`HasElapsed`], [`CanStopEarly`])
//!
//! Observers combine as a pair, `(first, second)`, which sees every event
//! and prefers the first's action.
//!
//! [`Observer`]: solvebench_core::Observer
//! [`HasStrategy`]: traits::HasStrategy
//! [`HasElapsed`]: traits::HasElapsed
//! [`CanStopEarly`]: traits::CanStopEarly

pub mod traits;

mod history;
mod logging;
mod stop_after;

pub use history::{Call, History};
pub use logging::Tracing;
pub use solvebench_harness::Verbose;
pub use stop_after::StopAfter;
