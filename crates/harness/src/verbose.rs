use std::io::{self, Stdout, Write};

use solvebench_core::Observer;

use crate::{Action, Event};

/// Prints run progress to a writer, stdout by default.
///
/// Prints the dimension when the first strategy starts, each strategy's label
/// as it starts, and every solution it returns. Attached automatically when
/// [`Options::verbose`](crate::Options::verbose) is set.
///
/// Write errors are ignored; progress output never fails a run.
#[derive(Debug)]
pub struct Verbose<W = Stdout> {
    out: W,
}

impl Verbose {
    /// Creates a printer writing to stdout.
    #[must_use]
    pub fn new() -> Self {
        Self { out: io::stdout() }
    }
}

impl Default for Verbose {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> Verbose<W> {
    /// Creates a printer writing to `out`.
    pub fn to_writer(out: W) -> Self {
        Self { out }
    }

    /// Returns the writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Observer<Event<'_>, Action> for Verbose<W> {
    fn observe(&mut self, event: &Event<'_>) -> Option<Action> {
        let _ = match event {
            Event::Started { n, strategy, index } => {
                if *index == 0 {
                    let _ = writeln!(self.out, "n = {n}");
                }
                writeln!(self.out, "{strategy}")
            }
            Event::Solved { solution, .. } => writeln!(self.out, "{solution:?}"),
            Event::Timed { .. } => Ok(()),
        };
        None
    }
}
