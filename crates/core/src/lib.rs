//! Core traits and types for solvebench.
//!
//! This crate defines the shared abstractions that backends, the harness, and
//! observers build on:
//!
//! - [`ProblemInstance`] — a seeded, immutable dense system `A·x = b`
//! - [`LinearSystem`] — an owned copy of an instance that a strategy may consume
//! - [`DenseMatrix`] and [`Layout`] — square matrix storage in either order
//! - [`Strategy`] and [`Session`] — one calling convention into a backend
//! - [`Observer`] — receives harness events and optionally returns control actions

mod error;
mod layout;
mod matrix;
mod observer;
mod problem;
mod strategy;

pub use error::BackendError;
pub use layout::Layout;
pub use matrix::DenseMatrix;
pub use observer::Observer;
pub use problem::{DEFAULT_SEED, LinearSystem, ProblemInstance};
pub use strategy::{Session, Strategy};
