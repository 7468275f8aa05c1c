use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{DenseMatrix, Layout};

/// Seed used when none is configured.
pub const DEFAULT_SEED: u64 = 2;

/// An owned dense system `A·x = b`.
///
/// Strategies receive a fresh `LinearSystem` for every call and may overwrite
/// it (LU factors in `matrix`, the solution in `rhs`), so no call observes the
/// output of a previous one.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearSystem {
    pub matrix: DenseMatrix,
    pub rhs: Vec<f64>,
}

impl LinearSystem {
    /// Returns the dimension `n`.
    #[must_use]
    pub fn n(&self) -> usize {
        self.matrix.n()
    }

    /// Returns the storage layout of the matrix.
    #[must_use]
    pub fn layout(&self) -> Layout {
        self.matrix.layout()
    }
}

/// The shared, immutable input of one benchmark run.
///
/// Values are drawn uniformly from `[0, 1)`, the matrix first in logical
/// row-major order and then the right-hand side. The draw order does not
/// depend on the layout, so the same seed gives the same logical values in
/// either layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ProblemInstance {
    system: LinearSystem,
}

impl ProblemInstance {
    /// Generates an `n × n` instance from `seed`.
    #[must_use]
    pub fn generate(n: usize, seed: u64, layout: Layout) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let matrix = DenseMatrix::from_fn(n, layout, |_, _| rng.gen_range(0.0..1.0));
        let rhs = (0..n).map(|_| rng.gen_range(0.0..1.0)).collect();

        Self {
            system: LinearSystem { matrix, rhs },
        }
    }

    /// Wraps an explicit system, for callers supplying their own data.
    #[must_use]
    pub fn from_system(system: LinearSystem) -> Self {
        Self { system }
    }

    /// Returns the dimension `n`.
    #[must_use]
    pub fn n(&self) -> usize {
        self.system.n()
    }

    /// Returns the storage layout of the matrix.
    #[must_use]
    pub fn layout(&self) -> Layout {
        self.system.layout()
    }

    /// Returns the coefficient matrix.
    #[must_use]
    pub fn matrix(&self) -> &DenseMatrix {
        &self.system.matrix
    }

    /// Returns the right-hand side.
    #[must_use]
    pub fn rhs(&self) -> &[f64] {
        &self.system.rhs
    }

    /// Returns an undisturbed copy for a single strategy call.
    #[must_use]
    pub fn system(&self) -> LinearSystem {
        self.system.clone()
    }

    /// Returns the largest absolute residual `max |A·x - b|`.
    #[must_use]
    pub fn residual(&self, x: &[f64]) -> f64 {
        self.system
            .matrix
            .mul_vec(x)
            .iter()
            .zip(&self.system.rhs)
            .map(|(ax, b)| (ax - b).abs())
            .fold(0.0, f64::max)
    }
}
