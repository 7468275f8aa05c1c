//! Timed comparison of interchangeable dense linear solve strategies.
//!
//! The harness generates one reproducible system `A·x = b`, hands an
//! undisturbed copy of it to each strategy a fixed number of times, and
//! reports the mean wall-clock time per call in the declared strategy order:
//!
//! ```text
//! [n, time_1, time_2, ..., time_k]
//! ```
//!
//! In the scaled form every time is divided by the first strategy's, so the
//! baseline always reports `1.0`.
//!
//! # Example
//!
//! ```no_run
//! use solvebench_harness::{Options, ResultForm, compare_solvers};
//! use solvebench_core::Layout;
//!
//! let options = Options::new(5, ResultForm::Scaled, false, Layout::RowMajor)?;
//! let result = compare_solvers(200, &options)?;
//!
//! for entry in &result.entries {
//!     println!("{}: {}", entry.label, entry.value);
//! }
//! # Ok::<(), solvebench_harness::Error>(())
//! ```

mod action;
mod clock;
mod error;
mod event;
mod options;
mod result;
mod sweep;
mod verbose;

pub use action::Action;
pub use clock::{Clock, ManualClock, MonotonicClock};
pub use error::Error;
pub use event::Event;
pub use options::{ConfigError, Options, ResultForm};
pub use result::{StrategyTiming, TimingResult};
pub use sweep::{Sweep, sweep};
pub use verbose::Verbose;

use std::time::Duration;

use solvebench_backends::build_all;
use solvebench_core::{Observer, ProblemInstance, Strategy};

/// Times the configured strategies on a system of dimension `n`.
///
/// Uses the strategies named by [`Options::strategies`], wall-clock time, and
/// prints progress to stdout when [`Options::verbose`] is set.
///
/// # Errors
///
/// Returns [`Error::InvalidDimension`] if `n < 1` or `n²` overflows `usize`,
/// and otherwise the first error any strategy raises, naming that strategy.
pub fn compare_solvers(n: i64, options: &Options) -> Result<TimingResult, Error> {
    let strategies = build_all(options.strategies());
    compare(n, &strategies, options, &MonotonicClock::new(), ())
}

/// Times `strategies` on a system of dimension `n` without an observer.
///
/// # Errors
///
/// See [`compare`].
pub fn compare_unobserved<S, C>(
    n: i64,
    strategies: &[S],
    options: &Options,
    clock: &C,
) -> Result<TimingResult, Error>
where
    S: Strategy,
    C: Clock + ?Sized,
{
    compare(n, strategies, options, clock, ())
}

/// Times `strategies` on a system of dimension `n`.
///
/// # Algorithm
///
/// 1. Generate the problem once from [`Options::seed`] in [`Options::layout`].
/// 2. For each strategy, in order:
///    - Emit [`Event::Started`] and open a session.
///    - For each repetition, copy the system, read the clock, solve, read the
///      clock again, and emit [`Event::Solved`].
///    - Emit [`Event::Timed`] with the mean seconds per call and release the
///      session.
/// 3. Scale the means by the first one if [`Options::result_form`] asks for it.
///
/// Copying the system and notifying the observer both happen outside the
/// timed region. The options' own strategy list is ignored in favor of
/// `strategies`.
///
/// # Observer
///
/// The observer receives every [`Event`] and may return
/// [`Action::StopEarly`] to abort the run. When [`Options::verbose`] is set a
/// [`Verbose`] printer sees each event first.
///
/// # Errors
///
/// - [`Error::InvalidDimension`] if `n < 1` or `n²` overflows `usize`.
/// - [`Error::InvalidConfig`] if `strategies` is empty.
/// - [`Error::BackendUnavailable`] if a strategy cannot be opened or rejects
///   the system.
/// - [`Error::NumericFailure`] if a strategy hits a singular or otherwise
///   unsolvable system.
/// - [`Error::Stopped`] if the observer stops the run.
pub fn compare<S, C, Obs>(
    n: i64,
    strategies: &[S],
    options: &Options,
    clock: &C,
    observer: Obs,
) -> Result<TimingResult, Error>
where
    S: Strategy,
    C: Clock + ?Sized,
    Obs: for<'a> Observer<Event<'a>, Action>,
{
    let dim = usize::try_from(n)
        .ok()
        .filter(|&dim| dim >= 1 && dim.checked_mul(dim).is_some())
        .ok_or(Error::InvalidDimension { n })?;

    if strategies.is_empty() {
        return Err(ConfigError::NoStrategies.into());
    }

    let problem = ProblemInstance::generate(dim, options.seed(), options.layout());
    tracing::debug!(
        n = dim,
        seed = options.seed(),
        layout = ?options.layout(),
        strategies = strategies.len(),
        "generated problem"
    );

    let mut observer = (options.verbose().then(Verbose::new), observer);
    let mut entries = Vec::with_capacity(strategies.len());

    for (index, strategy) in strategies.iter().enumerate() {
        let mean = time_strategy(
            &problem,
            strategy,
            index,
            options.repetitions(),
            clock,
            &mut observer,
        )?;
        entries.push(StrategyTiming {
            label: strategy.label().to_string(),
            value: mean,
        });
    }

    Ok(TimingResult::new(dim, options.result_form(), entries))
}

/// Runs every repetition of one strategy and returns its mean seconds per call.
fn time_strategy<S, C, Obs>(
    problem: &ProblemInstance,
    strategy: &S,
    index: usize,
    repetitions: usize,
    clock: &C,
    observer: &mut Obs,
) -> Result<f64, Error>
where
    S: Strategy,
    C: Clock + ?Sized,
    Obs: for<'a> Observer<Event<'a>, Action>,
{
    let n = problem.n();
    let label = strategy.label();

    let event = Event::Started {
        n,
        strategy: label,
        index,
    };
    if let Some(Action::StopEarly) = observer.observe(&event) {
        return Err(stopped(label, n));
    }

    let mut session = strategy
        .open(n)
        .map_err(|source| Error::backend(label, n, source))?;

    let mut total = Duration::ZERO;
    for repetition in 0..repetitions {
        let system = problem.system();

        let start = clock.now();
        let solved = session.solve(system);
        let elapsed = clock.now().saturating_sub(start);

        let solution = solved.map_err(|source| Error::backend(label, n, source))?;
        total += elapsed;
        tracing::trace!(strategy = label, n, repetition, ?elapsed, "solved");

        let event = Event::Solved {
            n,
            strategy: label,
            repetition,
            elapsed,
            solution: &solution,
        };
        if let Some(Action::StopEarly) = observer.observe(&event) {
            return Err(stopped(label, n));
        }
    }
    drop(session);

    let mean = total.as_secs_f64() / repetitions as f64;
    tracing::debug!(strategy = label, n, mean, "timed");

    let event = Event::Timed {
        n,
        strategy: label,
        mean,
    };
    if let Some(Action::StopEarly) = observer.observe(&event) {
        return Err(stopped(label, n));
    }

    Ok(mean)
}

fn stopped(strategy: &str, n: usize) -> Error {
    tracing::debug!(strategy, n, "stopped by observer");
    Error::Stopped {
        strategy: strategy.to_string(),
        n,
    }
}
