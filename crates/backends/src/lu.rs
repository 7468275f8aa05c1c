//! Unblocked LU kernels over column-major buffers.
//!
//! These follow the LAPACK conventions: `a` holds an `n × n` matrix in
//! column-major order with leading dimension `lda`, and `getrf` overwrites it
//! with `L` (unit lower, below the diagonal) and `U` (upper, including the
//! diagonal) of `P·A = L·U`. Pivot indices are zero-based: row `i` was
//! interchanged with row `pivots[i]`.
//!
//! A row-major buffer is a column-major buffer of `Aᵀ`. Factoring it as is and
//! solving with [`Transpose::Yes`] therefore solves `A·x = b` without a copy.

use num_traits::Float;
use solvebench_core::{BackendError, Layout};

/// Whether `getrs` solves with `A` or `Aᵀ`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transpose {
    /// Solve `A·x = b`.
    No,

    /// Solve `Aᵀ·x = b`.
    Yes,
}

impl Transpose {
    /// Returns the flag that solves the logical system for a buffer stored in `layout`.
    #[must_use]
    pub fn for_layout(layout: Layout) -> Self {
        match layout {
            Layout::ColumnMajor => Self::No,
            Layout::RowMajor => Self::Yes,
        }
    }
}

/// Computes the LU factorization of `a` with partial pivoting, in place.
///
/// # Errors
///
/// Returns [`BackendError::InvalidArgument`] if a buffer is too small or `lda < n`,
/// and [`BackendError::Singular`] at the first exactly zero pivot.
pub fn getrf<T: Float>(
    n: usize,
    a: &mut [T],
    lda: usize,
    pivots: &mut [usize],
) -> Result<(), BackendError> {
    check_matrix(n, a.len(), lda)?;
    if pivots.len() < n {
        return Err(invalid(4, "pivot buffer shorter than n"));
    }

    for j in 0..n {
        let col = j * lda;

        let mut p = j;
        let mut max = a[col + j].abs();
        for i in j + 1..n {
            let v = a[col + i].abs();
            if v > max {
                max = v;
                p = i;
            }
        }
        pivots[j] = p;

        if a[col + p] == T::zero() {
            return Err(BackendError::Singular { pivot: j });
        }

        if p != j {
            for k in 0..n {
                a.swap(k * lda + j, k * lda + p);
            }
        }

        let pivot = a[col + j];
        for i in j + 1..n {
            a[col + i] = a[col + i] / pivot;
        }

        for k in j + 1..n {
            let ajk = a[k * lda + j];
            if ajk == T::zero() {
                continue;
            }
            for i in j + 1..n {
                a[k * lda + i] = a[k * lda + i] - a[col + i] * ajk;
            }
        }
    }

    Ok(())
}

/// Solves with the factors produced by [`getrf`], overwriting `b` with `x`.
///
/// # Errors
///
/// Returns [`BackendError::InvalidArgument`] if a buffer is too small or `lda < n`.
pub fn getrs<T: Float>(
    trans: Transpose,
    n: usize,
    a: &[T],
    lda: usize,
    pivots: &[usize],
    b: &mut [T],
) -> Result<(), BackendError> {
    check_matrix(n, a.len(), lda)?;
    if pivots.len() < n {
        return Err(invalid(5, "pivot buffer shorter than n"));
    }
    if b.len() < n {
        return Err(invalid(6, "right-hand side shorter than n"));
    }

    match trans {
        Transpose::No => {
            for (i, &p) in pivots.iter().enumerate().take(n) {
                b.swap(i, p);
            }
            for j in 0..n {
                let bj = b[j];
                for i in j + 1..n {
                    b[i] = b[i] - a[j * lda + i] * bj;
                }
            }
            for j in (0..n).rev() {
                b[j] = b[j] / a[j * lda + j];
                let bj = b[j];
                for i in 0..j {
                    b[i] = b[i] - a[j * lda + i] * bj;
                }
            }
        }
        Transpose::Yes => {
            for j in 0..n {
                let mut sum = b[j];
                for i in 0..j {
                    sum = sum - a[j * lda + i] * b[i];
                }
                b[j] = sum / a[j * lda + j];
            }
            for j in (0..n).rev() {
                let mut sum = b[j];
                for i in j + 1..n {
                    sum = sum - a[j * lda + i] * b[i];
                }
                b[j] = sum;
            }
            for i in (0..n).rev() {
                b.swap(i, pivots[i]);
            }
        }
    }

    Ok(())
}

/// Returns the infinity norm (maximum absolute row sum) of the logical matrix.
pub(crate) fn norm_inf(trans: Transpose, n: usize, a: &[f64], lda: usize) -> f64 {
    (0..n)
        .map(|i| (0..n).map(|j| element(trans, a, lda, i, j).abs()).sum::<f64>())
        .fold(0.0, f64::max)
}

/// Computes `r = b - op(A)·x` where `op` is selected by `trans`.
pub(crate) fn residual(
    trans: Transpose,
    n: usize,
    a: &[f64],
    lda: usize,
    x: &[f64],
    b: &[f64],
    r: &mut [f64],
) {
    for i in 0..n {
        let ax: f64 = (0..n).map(|j| element(trans, a, lda, i, j) * x[j]).sum();
        r[i] = b[i] - ax;
    }
}

/// Returns the largest absolute entry of `v`.
pub(crate) fn max_abs(v: &[f64]) -> f64 {
    v.iter().fold(0.0, |m, x| m.max(x.abs()))
}

fn element(trans: Transpose, a: &[f64], lda: usize, i: usize, j: usize) -> f64 {
    match trans {
        Transpose::No => a[j * lda + i],
        Transpose::Yes => a[i * lda + j],
    }
}

fn check_matrix(n: usize, len: usize, lda: usize) -> Result<(), BackendError> {
    if lda < n.max(1) {
        return Err(invalid(3, "leading dimension smaller than n"));
    }
    if n > 0 && len < lda * (n - 1) + n {
        return Err(invalid(2, "matrix buffer shorter than lda * (n - 1) + n"));
    }
    Ok(())
}

fn invalid(position: usize, reason: &str) -> BackendError {
    BackendError::InvalidArgument {
        position,
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    // A = [[2, 1, 1], [4, -6, 0], [-2, 7, 2]] with x = [1, 2, 3].
    const A_COL: [f64; 9] = [2.0, 4.0, -2.0, 1.0, -6.0, 7.0, 1.0, 0.0, 2.0];
    const B: [f64; 3] = [7.0, -8.0, 18.0];

    #[test]
    fn solves_column_major_system() {
        let mut a = A_COL;
        let mut b = B;
        let mut pivots = [0; 3];

        getrf(3, &mut a, 3, &mut pivots).unwrap();
        getrs(Transpose::No, 3, &a, 3, &pivots, &mut b).unwrap();

        assert_eq!(pivots[0], 1, "largest entry of column 0 is in row 1");
        assert_relative_eq!(b[..], [1.0, 2.0, 3.0][..], epsilon = 1e-12);
    }

    #[test]
    fn transpose_solves_row_major_buffer() {
        // The row-major buffer of A is the column-major buffer of Aᵀ.
        let mut a = [2.0, 1.0, 1.0, 4.0, -6.0, 0.0, -2.0, 7.0, 2.0];
        let mut b = B;
        let mut pivots = [0; 3];

        getrf(3, &mut a, 3, &mut pivots).unwrap();
        getrs(Transpose::for_layout(Layout::RowMajor), 3, &a, 3, &pivots, &mut b).unwrap();

        assert_relative_eq!(b[..], [1.0, 2.0, 3.0][..], epsilon = 1e-12);
    }

    #[test]
    fn single_precision_kernels() {
        let mut a: Vec<f32> = A_COL.iter().map(|&v| v as f32).collect();
        let mut b: Vec<f32> = B.iter().map(|&v| v as f32).collect();
        let mut pivots = [0; 3];

        getrf(3, &mut a, 3, &mut pivots).unwrap();
        getrs(Transpose::No, 3, &a, 3, &pivots, &mut b).unwrap();

        assert_relative_eq!(b[..], [1.0_f32, 2.0, 3.0][..], epsilon = 1e-5);
    }

    #[test]
    fn reports_zero_pivot() {
        // Second column is twice the first.
        let mut a = [1.0, 2.0, 2.0, 4.0];
        let mut pivots = [0; 2];

        let err = getrf(2, &mut a, 2, &mut pivots).unwrap_err();
        assert!(matches!(err, BackendError::Singular { pivot: 1 }));
    }

    #[test]
    fn rejects_short_buffers() {
        let mut a = [1.0; 3];
        let mut pivots = [0; 2];
        assert!(matches!(
            getrf(2, &mut a, 2, &mut pivots),
            Err(BackendError::InvalidArgument { position: 2, .. })
        ));

        let mut a = [1.0; 4];
        assert!(matches!(
            getrf(2, &mut a, 1, &mut pivots),
            Err(BackendError::InvalidArgument { position: 3, .. })
        ));
    }

    #[test]
    fn norms_and_residuals_follow_transpose() {
        assert_relative_eq!(norm_inf(Transpose::No, 3, &A_COL, 3), 11.0);
        assert_relative_eq!(norm_inf(Transpose::Yes, 3, &A_COL, 3), 14.0);

        let mut r = [0.0; 3];
        residual(Transpose::No, 3, &A_COL, 3, &[1.0, 2.0, 3.0], &B, &mut r);
        assert_relative_eq!(max_abs(&r), 0.0);
    }
}
