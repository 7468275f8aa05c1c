use crate::{BackendError, LinearSystem};

/// One calling convention into a backend that solves `A·x = b`.
///
/// A strategy is a factory for [`Session`]s. Opening a session acquires
/// whatever the backend needs for a run of fixed dimension (handles, work
/// buffers); dropping it releases them. This keeps backend state out of
/// globals and scopes it to a single benchmark run.
pub trait Strategy {
    /// Label identifying this strategy in results and events.
    fn label(&self) -> &str;

    /// Acquires a session for systems of dimension `n`.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::Unavailable`] if the backend cannot be invoked.
    fn open(&self, n: usize) -> Result<Box<dyn Session + '_>, BackendError>;
}

/// A scoped backend context for solving systems of one dimension.
pub trait Session {
    /// Solves the system, which the session may overwrite, and returns `x`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails or the system is singular.
    fn solve(&mut self, system: LinearSystem) -> Result<Vec<f64>, BackendError>;
}

impl<S: Strategy + ?Sized> Strategy for Box<S> {
    fn label(&self) -> &str {
        (**self).label()
    }

    fn open(&self, n: usize) -> Result<Box<dyn Session + '_>, BackendError> {
        (**self).open(n)
    }
}
