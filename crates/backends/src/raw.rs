//! A native-ABI `dgesv` entry point and the strategy that calls it.
//!
//! [`solvebench_dgesv`] takes bare pointers and dimensions the way a foreign
//! LAPACK routine does and reports status through `info`. It has no notion of
//! layout: `a` is always read as column-major, so handing it a row-major buffer
//! silently solves `Aᵀ·x = b`.

use std::slice;

use solvebench_core::{BackendError, LinearSystem, Session, Strategy};

use crate::lu::{Transpose, getrf, getrs};

/// Solves `A·X = B` for a column-major `A` and `nrhs` right-hand sides.
///
/// On exit `a` holds the LU factors, `ipiv` the zero-based pivots, and `b`
/// the solutions. `info` is set to:
///
/// - `0` on success,
/// - `-i` if argument `i` is invalid,
/// - `i` if `U(i, i)` (one-based) is exactly zero.
///
/// # Safety
///
/// `a` must be valid for reads and writes of `lda * n` elements, `ipiv` for
/// `n` elements, `b` for `ldb * nrhs` elements, and `info` for one element.
/// The buffers must not overlap.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn solvebench_dgesv(
    n: i64,
    nrhs: i64,
    a: *mut f64,
    lda: i64,
    ipiv: *mut usize,
    b: *mut f64,
    ldb: i64,
    info: *mut i64,
) {
    let status = match check_args(n, nrhs, lda, ldb, a, ipiv, b) {
        Err(position) => -position,
        Ok(()) if n == 0 || nrhs == 0 => 0,
        Ok(()) => {
            // Arguments were validated above: all dimensions are positive.
            let (n, nrhs, lda, ldb) = (n as usize, nrhs as usize, lda as usize, ldb as usize);

            // SAFETY: the caller guarantees the extents documented above.
            let a = unsafe { slice::from_raw_parts_mut(a, lda * n) };
            let ipiv = unsafe { slice::from_raw_parts_mut(ipiv, n) };
            let b = unsafe { slice::from_raw_parts_mut(b, ldb * nrhs) };

            match getrf(n, a, lda, ipiv) {
                Err(BackendError::Singular { pivot }) => pivot as i64 + 1,
                Err(_) => -4,
                Ok(()) => {
                    for column in b.chunks_mut(ldb) {
                        // Buffers were sized from the validated dimensions.
                        let _ = getrs(Transpose::No, n, a, lda, ipiv, &mut column[..n]);
                    }
                    0
                }
            }
        }
    };

    if !info.is_null() {
        // SAFETY: checked for null; the caller guarantees validity.
        unsafe { *info = status };
    }
}

fn check_args(
    n: i64,
    nrhs: i64,
    lda: i64,
    ldb: i64,
    a: *mut f64,
    ipiv: *mut usize,
    b: *mut f64,
) -> Result<(), i64> {
    if n < 0 {
        return Err(1);
    }
    if nrhs < 0 {
        return Err(2);
    }
    if a.is_null() {
        return Err(3);
    }
    if lda < n.max(1) {
        return Err(4);
    }
    if ipiv.is_null() {
        return Err(5);
    }
    if b.is_null() {
        return Err(6);
    }
    if ldb < n.max(1) {
        return Err(7);
    }
    Ok(())
}

/// Strategy calling [`solvebench_dgesv`] through raw pointers.
///
/// The session owns the pivot buffer and the status word. The matrix buffer is
/// passed in storage order without consulting its layout.
#[derive(Debug, Clone, Copy, Default)]
pub struct GesvRaw;

impl Strategy for GesvRaw {
    fn label(&self) -> &str {
        "gesv_raw"
    }

    fn open(&self, n: usize) -> Result<Box<dyn Session + '_>, BackendError> {
        let dim = i64::try_from(n).map_err(|_| BackendError::InvalidArgument {
            position: 1,
            reason: format!("dimension {n} does not fit the native integer type"),
        })?;

        Ok(Box::new(RawSession {
            n,
            dim,
            pivots: vec![0; n],
            info: 0,
        }))
    }
}

struct RawSession {
    n: usize,
    dim: i64,
    pivots: Vec<usize>,
    info: i64,
}

impl Session for RawSession {
    fn solve(&mut self, mut system: LinearSystem) -> Result<Vec<f64>, BackendError> {
        if system.n() != self.n || system.rhs.len() != self.n {
            return Err(BackendError::InvalidArgument {
                position: 1,
                reason: format!("session opened for n = {}, got n = {}", self.n, system.n()),
            });
        }

        let ld = self.dim.max(1);

        // SAFETY: the matrix buffer holds n * n values, the pivot buffer and the
        // right-hand side hold n, and all three are distinct allocations.
        unsafe {
            solvebench_dgesv(
                self.dim,
                1,
                system.matrix.as_mut_slice().as_mut_ptr(),
                ld,
                self.pivots.as_mut_ptr(),
                system.rhs.as_mut_ptr(),
                ld,
                &mut self.info,
            );
        }

        match self.info {
            0 => Ok(system.rhs),
            info if info > 0 => Err(BackendError::Singular {
                pivot: (info - 1) as usize,
            }),
            info => Err(BackendError::InvalidArgument {
                position: info.unsigned_abs() as usize,
                reason: "rejected by solvebench_dgesv".to_string(),
            }),
        }
    }
}
