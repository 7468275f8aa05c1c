/// Receives harness events and decides how the run should proceed.
///
/// Observers let callers monitor or steer a benchmark without changing its
/// API, enabling progress printing, logging, or early termination.
///
/// The `observe` method returns `Option<A>`, where `Some(action)` requests a
/// harness-specific action and `None` lets the run continue unchanged.
///
/// Closures automatically implement `Observer`, and a built-in impl for `()`
/// provides a no-op observer that always returns `None`.
pub trait Observer<E, A> {
    /// Observes an event and optionally returns a control action.
    fn observe(&mut self, event: &E) -> Option<A>;
}

/// Blanket implementation for observer closures.
impl<E, A, F> Observer<E, A> for F
where
    F: FnMut(&E) -> Option<A>,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        self(event)
    }
}

/// A no-op observer that always returns `None`.
impl<E, A> Observer<E, A> for () {
    fn observe(&mut self, _event: &E) -> Option<A> {
        None
    }
}

/// Forwards each event to both observers.
///
/// The first observer's action wins when both return one.
impl<E, A, O1, O2> Observer<E, A> for (O1, O2)
where
    O1: Observer<E, A>,
    O2: Observer<E, A>,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        let first = self.0.observe(event);
        let second = self.1.observe(event);
        first.or(second)
    }
}

/// An optional observer; `None` behaves like `()`.
impl<E, A, O> Observer<E, A> for Option<O>
where
    O: Observer<E, A>,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        self.as_mut().and_then(|obs| obs.observe(event))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    enum Action {
        Stop,
        Skip,
    }

    #[test]
    fn pair_forwards_to_both_and_prefers_first() {
        let mut first_seen = 0;
        let mut second_seen = 0;

        {
            let first = |_: &u32| {
                first_seen += 1;
                Some(Action::Stop)
            };
            let second = |_: &u32| {
                second_seen += 1;
                Some(Action::Skip)
            };
            let mut pair = (first, second);
            assert_eq!(pair.observe(&7_u32), Some(Action::Stop));
        }

        assert_eq!(first_seen, 1);
        assert_eq!(second_seen, 1);
    }

    #[test]
    fn none_is_a_no_op() {
        let mut obs: Option<fn(&u32) -> Option<Action>> = None;
        assert_eq!(Observer::<u32, Action>::observe(&mut obs, &1), None);

        let mut obs = Some(|_: &u32| Some(Action::Skip));
        assert_eq!(Observer::<u32, Action>::observe(&mut obs, &1), Some(Action::Skip));
    }
}
