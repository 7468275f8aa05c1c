use nalgebra::{DMatrix, DVector};
use solvebench_core::{BackendError, Layout, LinearSystem, Session, Strategy};

/// Strategy solving through `nalgebra`'s LU decomposition.
///
/// This is the high-level convenience path every other strategy is compared
/// against: it builds owned `nalgebra` containers from the system, factors,
/// and returns a freshly allocated solution.
#[derive(Debug, Clone, Copy, Default)]
pub struct Reference;

impl Strategy for Reference {
    fn label(&self) -> &str {
        "reference"
    }

    fn open(&self, _n: usize) -> Result<Box<dyn Session + '_>, BackendError> {
        Ok(Box::new(ReferenceSession))
    }
}

struct ReferenceSession;

impl Session for ReferenceSession {
    fn solve(&mut self, system: LinearSystem) -> Result<Vec<f64>, BackendError> {
        let n = system.n();
        let data = system.matrix.as_slice();
        let a = match system.layout() {
            Layout::RowMajor => DMatrix::from_row_slice(n, n, data),
            Layout::ColumnMajor => DMatrix::from_column_slice(n, n, data),
        };
        let b = DVector::from_vec(system.rhs);

        a.lu()
            .solve(&b)
            .map(|x| x.iter().copied().collect())
            .ok_or_else(|| BackendError::Numeric("LU factors are not invertible".to_string()))
    }
}
