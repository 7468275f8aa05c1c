//! Dense linear solve strategies for solvebench.
//!
//! Every strategy solves the same `A·x = b` but through a different calling
//! convention, so a harness can compare what each convention costs:
//!
//! - [`Reference`] — `nalgebra` LU, the high-level convenience path
//! - [`Gesv`] — allocates and returns factors, pivots, and solution
//! - [`GesvWorkspace`] — in place, with a pivot buffer owned by the session
//! - [`GesvRaw`] — [`solvebench_dgesv`], a native-ABI entry point taking raw
//!   pointers; reads the matrix as column-major regardless of its layout
//! - [`SgesvMixed`] and [`SgesvMixedWorkspace`] — single-precision factors
//!   with double-precision iterative refinement
//!
//! [`StrategyKind`] names each of them for configuration.

pub mod lu;

mod gesv;
mod kind;
mod mixed;
mod raw;
mod reference;

pub use gesv::{Factored, Gesv, GesvWorkspace, gesv};
pub use kind::{StrategyKind, UnknownStrategy, build_all, default_strategies};
pub use mixed::{
    FallbackReason, Factors, MAX_REFINEMENTS, MixedSolution, MixedWorkspace, Refinement,
    SgesvMixed, SgesvMixedWorkspace, sgesv, solve_mixed,
};
pub use raw::{GesvRaw, solvebench_dgesv};
pub use reference::Reference;

#[cfg(test)]
mod tests {
    use super::*;

    use solvebench_core::{DEFAULT_SEED, Layout, ProblemInstance};

    #[test]
    fn layout_aware_strategies_agree_in_both_layouts() {
        let n = 16;
        let layout_aware = [
            StrategyKind::Reference,
            StrategyKind::Gesv,
            StrategyKind::GesvWorkspace,
            StrategyKind::SgesvMixed,
            StrategyKind::SgesvMixedWorkspace,
        ];

        for layout in [Layout::RowMajor, Layout::ColumnMajor] {
            let problem = ProblemInstance::generate(n, DEFAULT_SEED, layout);
            for kind in layout_aware {
                let strategy = kind.build();
                let mut session = strategy.open(n).unwrap();
                let x = session.solve(problem.system()).unwrap();
                assert!(
                    problem.residual(&x) < 1e-9,
                    "{kind} in {layout:?} left residual {}",
                    problem.residual(&x)
                );
            }
        }
    }
}
