use std::time::Duration;

/// Events emitted by the harness.
///
/// Events are emitted outside timed regions, so observers may print or log
/// without affecting the measurements.
#[derive(Debug, Clone, Copy)]
pub enum Event<'a> {
    /// A strategy's session is about to open.
    Started {
        /// Problem dimension.
        n: usize,

        /// Label of the strategy.
        strategy: &'a str,

        /// Position of the strategy in the declared order.
        index: usize,
    },

    /// One timed call completed.
    Solved {
        /// Problem dimension.
        n: usize,

        /// Label of the strategy.
        strategy: &'a str,

        /// Zero-based repetition number.
        repetition: usize,

        /// Time charged to this call.
        elapsed: Duration,

        /// The solution the strategy returned.
        solution: &'a [f64],
    },

    /// All repetitions of a strategy completed.
    Timed {
        /// Problem dimension.
        n: usize,

        /// Label of the strategy.
        strategy: &'a str,

        /// Mean seconds per call.
        mean: f64,
    },
}

impl Event<'_> {
    /// Returns the problem dimension.
    #[must_use]
    pub fn n(&self) -> usize {
        match self {
            Self::Started { n, .. } | Self::Solved { n, .. } | Self::Timed { n, .. } => *n,
        }
    }

    /// Returns the label of the strategy the event concerns.
    #[must_use]
    pub fn strategy(&self) -> &str {
        match self {
            Self::Started { strategy, .. }
            | Self::Solved { strategy, .. }
            | Self::Timed { strategy, .. } => *strategy,
        }
    }
}
