//! Double-precision `gesv` in two calling conventions.
//!
//! - [`gesv`] is the convenience call: it leaves its inputs untouched,
//!   allocates everything it needs, and returns the factors, the pivots, and
//!   the solution together.
//! - [`GesvWorkspace`] is the lower-level call: its session owns the pivot
//!   buffer and factors the consumed system in place.

use solvebench_core::{BackendError, DenseMatrix, Layout, LinearSystem, Session, Strategy};

use crate::lu::{Transpose, getrf, getrs};

/// The full output of [`gesv`].
#[derive(Debug, Clone)]
pub struct Factored {
    /// `L` and `U` factors, column-major.
    pub lu: DenseMatrix,

    /// Zero-based row interchanges.
    pub pivots: Vec<usize>,

    /// Solution of `A·x = b`.
    pub x: Vec<f64>,
}

/// Solves `A·x = b`, returning factors, pivots, and solution.
///
/// The matrix may be stored in either layout; it is copied to column-major
/// before factoring.
///
/// # Errors
///
/// Returns an error if the dimensions disagree or `A` is singular.
pub fn gesv(matrix: &DenseMatrix, rhs: &[f64]) -> Result<Factored, BackendError> {
    let n = matrix.n();
    if rhs.len() != n {
        return Err(BackendError::InvalidArgument {
            position: 2,
            reason: format!("right-hand side has length {}, expected {n}", rhs.len()),
        });
    }

    let mut lu = matrix.to_layout(Layout::ColumnMajor);
    let mut pivots = vec![0; n];
    let mut x = rhs.to_vec();

    getrf(n, lu.as_mut_slice(), n.max(1), &mut pivots)?;
    getrs(Transpose::No, n, lu.as_slice(), n.max(1), &pivots, &mut x)?;

    Ok(Factored { lu, pivots, x })
}

/// Strategy calling [`gesv`] once per solve.
#[derive(Debug, Clone, Copy, Default)]
pub struct Gesv;

impl Strategy for Gesv {
    fn label(&self) -> &str {
        "gesv"
    }

    fn open(&self, _n: usize) -> Result<Box<dyn Session + '_>, BackendError> {
        Ok(Box::new(GesvSession))
    }
}

struct GesvSession;

impl Session for GesvSession {
    fn solve(&mut self, system: LinearSystem) -> Result<Vec<f64>, BackendError> {
        let Factored { x, .. } = gesv(&system.matrix, &system.rhs)?;
        Ok(x)
    }
}

/// Strategy factoring the consumed system in place with a preallocated pivot buffer.
///
/// Both layouts are supported: a row-major buffer is factored as `Aᵀ` and
/// solved with the transposed triangular solves.
#[derive(Debug, Clone, Copy, Default)]
pub struct GesvWorkspace;

impl Strategy for GesvWorkspace {
    fn label(&self) -> &str {
        "gesv_workspace"
    }

    fn open(&self, n: usize) -> Result<Box<dyn Session + '_>, BackendError> {
        Ok(Box::new(WorkspaceSession {
            n,
            pivots: vec![0; n],
        }))
    }
}

struct WorkspaceSession {
    n: usize,
    pivots: Vec<usize>,
}

impl Session for WorkspaceSession {
    fn solve(&mut self, mut system: LinearSystem) -> Result<Vec<f64>, BackendError> {
        let n = self.n;
        if system.n() != n || system.rhs.len() != n {
            return Err(BackendError::InvalidArgument {
                position: 1,
                reason: format!("session opened for n = {n}, got n = {}", system.n()),
            });
        }

        let trans = Transpose::for_layout(system.layout());
        let lda = n.max(1);
        getrf(n, system.matrix.as_mut_slice(), lda, &mut self.pivots)?;
        getrs(trans, n, system.matrix.as_slice(), lda, &self.pivots, &mut system.rhs)?;

        Ok(system.rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use solvebench_core::{DEFAULT_SEED, ProblemInstance};

    fn known() -> (DenseMatrix, Vec<f64>) {
        let a = DenseMatrix::from_rows(&[&[4.0, -2.0, 1.0], &[-2.0, 4.0, -2.0], &[1.0, -2.0, 4.0]])
            .unwrap();
        // x = [1, -1, 2]
        (a, vec![8.0, -10.0, 11.0])
    }

    #[test]
    fn convenience_call_returns_factors_and_solution() {
        let (a, b) = known();
        let out = gesv(&a, &b).unwrap();

        assert_eq!(out.lu.layout(), Layout::ColumnMajor);
        assert_eq!(out.pivots.len(), 3);
        assert_relative_eq!(out.x[..], [1.0, -1.0, 2.0][..], epsilon = 1e-12);
    }

    #[test]
    fn convenience_call_rejects_mismatched_rhs() {
        let (a, _) = known();
        assert!(matches!(
            gesv(&a, &[1.0, 2.0]),
            Err(BackendError::InvalidArgument { position: 2, .. })
        ));
    }

    #[test]
    fn workspace_session_handles_both_layouts() {
        for layout in [Layout::RowMajor, Layout::ColumnMajor] {
            let problem = ProblemInstance::generate(12, DEFAULT_SEED, layout);
            let strategy = GesvWorkspace;
            let mut session = strategy.open(12).unwrap();

            let x = session.solve(problem.system()).unwrap();
            assert!(problem.residual(&x) < 1e-10, "{layout:?}");

            // The session is reusable across calls.
            let again = session.solve(problem.system()).unwrap();
            assert_eq!(x, again);
        }
    }

    #[test]
    fn workspace_session_rejects_wrong_dimension() {
        let problem = ProblemInstance::generate(4, DEFAULT_SEED, Layout::RowMajor);
        let strategy = GesvWorkspace;
        let mut session = strategy.open(5).unwrap();

        assert!(matches!(
            session.solve(problem.system()),
            Err(BackendError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn singular_system_is_reported() {
        let a = DenseMatrix::from_rows(&[&[1.0, 2.0], &[2.0, 4.0]]).unwrap();
        let strategy = Gesv;
        let mut session = strategy.open(2).unwrap();

        let err = session
            .solve(LinearSystem {
                matrix: a,
                rhs: vec![1.0, 1.0],
            })
            .unwrap_err();
        assert!(matches!(err, BackendError::Singular { .. }));
    }
}
