use std::error::Error as StdError;

use thiserror::Error;

/// Errors a strategy's backend can report.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The backend cannot be invoked at all.
    #[error("backend unavailable: {reason}")]
    Unavailable {
        reason: String,

        #[source]
        source: Option<Box<dyn StdError + Send + Sync>>,
    },

    /// The factorization hit an exactly zero pivot.
    #[error("matrix is singular: U({pivot}, {pivot}) is exactly zero")]
    Singular { pivot: usize },

    /// The backend reported a numerical failure other than a zero pivot.
    #[error("numerical failure: {0}")]
    Numeric(String),

    /// The system handed to the backend does not fit its contract.
    #[error("argument {position} is invalid: {reason}")]
    InvalidArgument { position: usize, reason: String },
}

impl BackendError {
    /// Creates an [`BackendError::Unavailable`] with no underlying source.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable {
            reason: reason.into(),
            source: None,
        }
    }
}
