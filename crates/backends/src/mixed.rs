//! Mixed-precision `sgesv`: single-precision factorization, double-precision refinement.
//!
//! # Algorithm
//!
//! 1. Round `A` and `b` to `f32`, factor `A` and solve for an initial `x`.
//! 2. Compute the residual `r = b - A·x` in `f64`.
//! 3. Stop once `‖r‖∞ ≤ ‖x‖∞ · ‖A‖∞ · ε · √n`, where `ε` is the unit roundoff
//!    of `f64`. Otherwise solve `A·d = r` with the single-precision factors,
//!    update `x += d`, and repeat.
//! 4. If `A` does not fit in `f32`, the single-precision factorization hits a
//!    zero pivot, or refinement does not converge within
//!    [`MAX_REFINEMENTS`] steps, fall back to a full double-precision solve.
//!
//! The outcome is reported as a [`Refinement`].

use solvebench_core::{BackendError, DenseMatrix, LinearSystem, Session, Strategy};

use crate::lu::{Transpose, getrf, getrs, max_abs, norm_inf, residual};

/// Maximum number of refinement steps before falling back to double precision.
pub const MAX_REFINEMENTS: usize = 30;

/// How a mixed-precision solve reached its answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refinement {
    /// Converged after the given number of refinement steps.
    Converged(usize),

    /// Solved in full double precision after the mixed path gave up.
    FellBack(FallbackReason),
}

/// Why the mixed path was abandoned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    /// An entry of `A` or `b` overflows `f32`.
    Overflow,

    /// The single-precision factorization hit a zero pivot.
    SingularInSingle,

    /// Refinement did not converge within [`MAX_REFINEMENTS`] steps.
    NotConverged,
}

/// LU factors kept by [`sgesv`], in the precision that produced `x`.
#[derive(Debug, Clone)]
pub enum Factors {
    Single(Vec<f32>),
    Double(Vec<f64>),
}

/// The full output of [`sgesv`].
#[derive(Debug, Clone)]
pub struct MixedSolution {
    /// Column-major factors of `A` (or of `Aᵀ` for a row-major input).
    pub lu: Factors,

    /// Zero-based row interchanges of the factors in `lu`.
    pub pivots: Vec<usize>,

    /// Solution of `A·x = b`.
    pub x: Vec<f64>,

    /// How the solve converged.
    pub refinement: Refinement,
}

/// Buffers for one mixed-precision solve of dimension `n`.
#[derive(Debug, Clone)]
pub struct MixedWorkspace {
    n: usize,
    single: Vec<f32>,
    single_rhs: Vec<f32>,
    residual: Vec<f64>,
    double: Vec<f64>,
    pivots: Vec<usize>,
}

impl MixedWorkspace {
    /// Allocates buffers for systems of dimension `n`.
    #[must_use]
    pub fn new(n: usize) -> Self {
        Self {
            n,
            single: vec![0.0; n * n],
            single_rhs: vec![0.0; n],
            residual: vec![0.0; n],
            double: vec![0.0; n * n],
            pivots: vec![0; n],
        }
    }

    /// Returns the dimension the buffers were sized for.
    #[must_use]
    pub fn n(&self) -> usize {
        self.n
    }
}

/// Solves `A·x = b` in mixed precision, allocating a fresh workspace.
///
/// # Errors
///
/// Returns an error if the dimensions disagree or `A` is singular in double
/// precision.
pub fn sgesv(matrix: &DenseMatrix, rhs: &[f64]) -> Result<MixedSolution, BackendError> {
    let n = matrix.n();
    let mut ws = MixedWorkspace::new(n);
    let mut x = vec![0.0; n];

    let refinement = solve_mixed(
        Transpose::for_layout(matrix.layout()),
        matrix.as_slice(),
        rhs,
        &mut x,
        &mut ws,
    )?;

    let lu = match refinement {
        Refinement::Converged(_) => Factors::Single(ws.single),
        Refinement::FellBack(_) => Factors::Double(ws.double),
    };

    Ok(MixedSolution {
        lu,
        pivots: ws.pivots,
        x,
        refinement,
    })
}

/// Solves `op(A)·x = b` for a column-major buffer `a` using `ws` for scratch.
///
/// `trans` selects `op`; pass [`Transpose::for_layout`] of the buffer's layout
/// to solve the logical system.
///
/// # Errors
///
/// Returns an error if a buffer does not match `ws.n()` or `A` is singular in
/// double precision.
pub fn solve_mixed(
    trans: Transpose,
    a: &[f64],
    b: &[f64],
    x: &mut [f64],
    ws: &mut MixedWorkspace,
) -> Result<Refinement, BackendError> {
    let n = ws.n;
    if a.len() != n * n {
        return Err(invalid(2, format!("matrix has {} values, expected {}", a.len(), n * n)));
    }
    if b.len() != n || x.len() != n {
        return Err(invalid(3, format!("vectors must have length {n}")));
    }
    if n == 0 {
        return Ok(Refinement::Converged(0));
    }

    let reason = match refine(trans, a, b, x, ws)? {
        Ok(steps) => return Ok(Refinement::Converged(steps)),
        Err(reason) => reason,
    };

    ws.double.copy_from_slice(a);
    x.copy_from_slice(b);
    getrf(n, &mut ws.double, n, &mut ws.pivots)?;
    getrs(trans, n, &ws.double, n, &ws.pivots, x)?;

    Ok(Refinement::FellBack(reason))
}

/// Runs the single-precision path, returning the step count or why it gave up.
fn refine(
    trans: Transpose,
    a: &[f64],
    b: &[f64],
    x: &mut [f64],
    ws: &mut MixedWorkspace,
) -> Result<Result<usize, FallbackReason>, BackendError> {
    let n = ws.n;

    let limit = f64::from(f32::MAX);
    if a.iter().chain(b).any(|v| v.abs() > limit) {
        return Ok(Err(FallbackReason::Overflow));
    }

    for (s, &d) in ws.single.iter_mut().zip(a) {
        *s = d as f32;
    }
    match getrf(n, &mut ws.single, n, &mut ws.pivots) {
        Ok(()) => {}
        Err(BackendError::Singular { .. }) => return Ok(Err(FallbackReason::SingularInSingle)),
        Err(e) => return Err(e),
    }

    for (s, &d) in ws.single_rhs.iter_mut().zip(b) {
        *s = d as f32;
    }
    getrs(trans, n, &ws.single, n, &ws.pivots, &mut ws.single_rhs)?;
    for (xi, &s) in x.iter_mut().zip(&ws.single_rhs) {
        *xi = f64::from(s);
    }

    let tolerance = norm_inf(trans, n, a, n) * (f64::EPSILON * 0.5) * (n as f64).sqrt();

    for step in 0..=MAX_REFINEMENTS {
        residual(trans, n, a, n, x, b, &mut ws.residual);
        if max_abs(&ws.residual) <= max_abs(x) * tolerance {
            return Ok(Ok(step));
        }
        if step == MAX_REFINEMENTS {
            break;
        }

        for (s, &r) in ws.single_rhs.iter_mut().zip(&ws.residual) {
            *s = r as f32;
        }
        getrs(trans, n, &ws.single, n, &ws.pivots, &mut ws.single_rhs)?;
        for (xi, &d) in x.iter_mut().zip(&ws.single_rhs) {
            *xi += f64::from(d);
        }
    }

    Ok(Err(FallbackReason::NotConverged))
}

fn invalid(position: usize, reason: String) -> BackendError {
    BackendError::InvalidArgument { position, reason }
}

/// Strategy calling [`sgesv`] once per solve.
#[derive(Debug, Clone, Copy, Default)]
pub struct SgesvMixed;

impl Strategy for SgesvMixed {
    fn label(&self) -> &str {
        "sgesv_mixed"
    }

    fn open(&self, _n: usize) -> Result<Box<dyn Session + '_>, BackendError> {
        Ok(Box::new(SgesvSession))
    }
}

struct SgesvSession;

impl Session for SgesvSession {
    fn solve(&mut self, system: LinearSystem) -> Result<Vec<f64>, BackendError> {
        let MixedSolution { x, .. } = sgesv(&system.matrix, &system.rhs)?;
        Ok(x)
    }
}

/// Strategy solving in mixed precision with a workspace allocated once per session.
#[derive(Debug, Clone, Copy, Default)]
pub struct SgesvMixedWorkspace;

impl Strategy for SgesvMixedWorkspace {
    fn label(&self) -> &str {
        "sgesv_mixed_workspace"
    }

    fn open(&self, n: usize) -> Result<Box<dyn Session + '_>, BackendError> {
        Ok(Box::new(MixedWorkspaceSession {
            workspace: MixedWorkspace::new(n),
            x: vec![0.0; n],
        }))
    }
}

struct MixedWorkspaceSession {
    workspace: MixedWorkspace,
    x: Vec<f64>,
}

impl Session for MixedWorkspaceSession {
    fn solve(&mut self, system: LinearSystem) -> Result<Vec<f64>, BackendError> {
        solve_mixed(
            Transpose::for_layout(system.layout()),
            system.matrix.as_slice(),
            &system.rhs,
            &mut self.x,
            &mut self.workspace,
        )?;
        Ok(self.x.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use solvebench_core::{DEFAULT_SEED, Layout, ProblemInstance};

    /// Diagonally dominant, so single-precision factors refine quickly.
    fn dominant(n: usize, layout: Layout) -> ProblemInstance {
        let base = ProblemInstance::generate(n, DEFAULT_SEED, layout);
        let matrix = DenseMatrix::from_fn(n, layout, |i, j| {
            let v = base.matrix().get(i, j);
            if i == j { v + n as f64 } else { v }
        });
        ProblemInstance::from_system(LinearSystem {
            matrix,
            rhs: base.rhs().to_vec(),
        })
    }

    #[test]
    fn converges_with_refinement() {
        for layout in [Layout::RowMajor, Layout::ColumnMajor] {
            let problem = dominant(20, layout);
            let out = sgesv(problem.matrix(), problem.rhs()).unwrap();

            assert!(
                matches!(out.refinement, Refinement::Converged(steps) if steps >= 1),
                "{layout:?}: {:?}",
                out.refinement
            );
            assert!(matches!(out.lu, Factors::Single(_)));
            assert!(problem.residual(&out.x) < 1e-12);
        }
    }

    #[test]
    fn overflow_falls_back_to_double() {
        let a = DenseMatrix::from_rows(&[&[1e300, 0.0], &[0.0, 1.0]]).unwrap();
        let out = sgesv(&a, &[2e300, 3.0]).unwrap();

        assert_eq!(out.refinement, Refinement::FellBack(FallbackReason::Overflow));
        assert!(matches!(out.lu, Factors::Double(_)));
        assert_relative_eq!(out.x[..], [2.0, 3.0][..], epsilon = 1e-12);
    }

    #[test]
    fn single_precision_singularity_falls_back() {
        // The off-diagonal perturbation vanishes when rounded to f32.
        let eps = 1e-12;
        let a = DenseMatrix::from_rows(&[&[1.0, 1.0], &[1.0, 1.0 + eps]]).unwrap();
        let out = sgesv(&a, &[2.0, 2.0 + eps]).unwrap();

        assert_eq!(
            out.refinement,
            Refinement::FellBack(FallbackReason::SingularInSingle)
        );
        assert_relative_eq!(out.x[..], [1.0, 1.0][..], epsilon = 1e-3);
    }

    #[test]
    fn singular_in_double_is_an_error() {
        let a = DenseMatrix::from_rows(&[&[1.0, 2.0], &[2.0, 4.0]]).unwrap();
        assert!(matches!(
            sgesv(&a, &[1.0, 1.0]),
            Err(BackendError::Singular { .. })
        ));
    }

    #[test]
    fn workspace_session_matches_convenience_call() {
        let problem = dominant(8, Layout::ColumnMajor);
        let expected = sgesv(problem.matrix(), problem.rhs()).unwrap().x;

        let strategy = SgesvMixedWorkspace;
        let mut session = strategy.open(8).unwrap();
        let x = session.solve(problem.system()).unwrap();

        assert_eq!(x, expected);
    }

    #[test]
    fn rejects_mismatched_buffers() {
        let mut ws = MixedWorkspace::new(3);
        let mut x = [0.0; 3];
        assert!(matches!(
            solve_mixed(Transpose::No, &[1.0; 4], &[1.0; 3], &mut x, &mut ws),
            Err(BackendError::InvalidArgument { position: 2, .. })
        ));
    }
}
