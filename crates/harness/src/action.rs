/// Actions an observer can take during a comparison run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Abort the run.
    ///
    /// The harness returns [`Error::Stopped`](crate::Error::Stopped) rather
    /// than a partial result, since a shortened timing vector would no longer
    /// line up with the declared strategy order.
    StopEarly,
}
