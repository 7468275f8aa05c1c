use solvebench_core::BackendError;
use thiserror::Error;

use crate::ConfigError;

/// Errors that can occur during a comparison run.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid dimension {n}: must be at least 1 with n² addressable")]
    InvalidDimension { n: i64 },

    #[error("invalid config: {0}")]
    InvalidConfig(#[from] ConfigError),

    #[error("strategy `{strategy}` could not run for n = {n}")]
    BackendUnavailable {
        strategy: String,
        n: usize,

        #[source]
        source: BackendError,
    },

    #[error("strategy `{strategy}` failed numerically for n = {n}")]
    NumericFailure {
        strategy: String,
        n: usize,

        #[source]
        source: BackendError,
    },

    #[error("stopped by observer during `{strategy}` for n = {n}")]
    Stopped { strategy: String, n: usize },
}

impl Error {
    /// Classifies a backend error raised by `strategy` for dimension `n`.
    pub(crate) fn backend(strategy: &str, n: usize, source: BackendError) -> Self {
        let strategy = strategy.to_string();
        match source {
            BackendError::Singular { .. } | BackendError::Numeric(_) => Self::NumericFailure {
                strategy,
                n,
                source,
            },
            BackendError::Unavailable { .. } | BackendError::InvalidArgument { .. } => {
                Self::BackendUnavailable {
                    strategy,
                    n,
                    source,
                }
            }
        }
    }

    /// Returns the label of the strategy that failed, if the error concerns one.
    #[must_use]
    pub fn strategy(&self) -> Option<&str> {
        match self {
            Self::BackendUnavailable { strategy, .. }
            | Self::NumericFailure { strategy, .. }
            | Self::Stopped { strategy, .. } => Some(strategy.as_str()),
            Self::InvalidDimension { .. } | Self::InvalidConfig(_) => None,
        }
    }
}
