use crate::Layout;

/// A square dense matrix stored in a single buffer.
///
/// Elements are addressed by logical `(row, column)` through [`get`](Self::get)
/// regardless of the storage [`Layout`]. Backends that work on raw buffers use
/// [`as_slice`](Self::as_slice) and must honor [`layout`](Self::layout) themselves.
#[derive(Debug, Clone, PartialEq)]
pub struct DenseMatrix {
    n: usize,
    layout: Layout,
    data: Vec<f64>,
}

impl DenseMatrix {
    /// Builds an `n × n` matrix by evaluating `f(i, j)` for every element.
    ///
    /// Elements are visited in logical row-major order, whatever the layout,
    /// so a stateful `f` (such as a seeded generator) produces the same logical
    /// values for either layout.
    pub fn from_fn<F>(n: usize, layout: Layout, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> f64,
    {
        let mut data = vec![0.0; n * n];
        for i in 0..n {
            for j in 0..n {
                data[layout.offset(n, i, j)] = f(i, j);
            }
        }
        Self { n, layout, data }
    }

    /// Wraps an existing buffer.
    ///
    /// Returns `None` if `data.len() != n * n`.
    #[must_use]
    pub fn from_vec(n: usize, layout: Layout, data: Vec<f64>) -> Option<Self> {
        (data.len() == n * n).then_some(Self { n, layout, data })
    }

    /// Builds a row-major matrix from nested rows.
    ///
    /// Returns `None` unless every row has `rows.len()` elements.
    #[must_use]
    pub fn from_rows(rows: &[&[f64]]) -> Option<Self> {
        let n = rows.len();
        if rows.iter().any(|row| row.len() != n) {
            return None;
        }
        let data = rows.iter().flat_map(|row| row.iter().copied()).collect();
        Some(Self {
            n,
            layout: Layout::RowMajor,
            data,
        })
    }

    /// Returns the dimension `n`.
    #[must_use]
    pub fn n(&self) -> usize {
        self.n
    }

    /// Returns the storage layout.
    #[must_use]
    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Returns the logical element at row `i`, column `j`.
    ///
    /// # Panics
    ///
    /// Panics if `i` or `j` is out of bounds.
    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        assert!(i < self.n && j < self.n, "index ({i}, {j}) out of bounds");
        self.data[self.layout.offset(self.n, i, j)]
    }

    /// Returns a copy stored in `layout`, preserving logical values.
    #[must_use]
    pub fn to_layout(&self, layout: Layout) -> Self {
        if layout == self.layout {
            return self.clone();
        }
        Self::from_fn(self.n, layout, |i, j| self.get(i, j))
    }

    /// Returns the raw buffer in storage order.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Returns the raw buffer in storage order, mutably.
    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Computes `A·x`.
    ///
    /// # Panics
    ///
    /// Panics if `x.len() != n`.
    #[must_use]
    pub fn mul_vec(&self, x: &[f64]) -> Vec<f64> {
        assert_eq!(x.len(), self.n, "vector length must match matrix dimension");
        (0..self.n)
            .map(|i| (0..self.n).map(|j| self.get(i, j) * x[j]).sum())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_fn_places_values_by_layout() {
        let row = DenseMatrix::from_fn(2, Layout::RowMajor, |i, j| (10 * i + j) as f64);
        let col = DenseMatrix::from_fn(2, Layout::ColumnMajor, |i, j| (10 * i + j) as f64);

        assert_eq!(row.as_slice(), &[0.0, 1.0, 10.0, 11.0]);
        assert_eq!(col.as_slice(), &[0.0, 10.0, 1.0, 11.0]);

        for i in 0..2 {
            for j in 0..2 {
                assert_eq!(row.get(i, j), col.get(i, j));
            }
        }
    }

    #[test]
    fn to_layout_round_trips_logical_values() {
        let a = DenseMatrix::from_rows(&[&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0], &[7.0, 8.0, 9.0]])
            .unwrap();
        let b = a.to_layout(Layout::ColumnMajor);

        assert_eq!(b.layout(), Layout::ColumnMajor);
        assert_eq!(b.as_slice(), &[1.0, 4.0, 7.0, 2.0, 5.0, 8.0, 3.0, 6.0, 9.0]);
        assert_eq!(b.to_layout(Layout::RowMajor), a);
    }

    #[test]
    fn rejects_ragged_or_mis_sized_input() {
        assert!(DenseMatrix::from_rows(&[&[1.0, 2.0], &[3.0]]).is_none());
        assert!(DenseMatrix::from_vec(2, Layout::RowMajor, vec![1.0; 3]).is_none());
    }

    #[test]
    fn mul_vec_uses_logical_indexing() {
        let a = DenseMatrix::from_rows(&[&[2.0, 1.0], &[0.0, 3.0]]).unwrap();
        let x = [1.0, 2.0];

        assert_eq!(a.mul_vec(&x), vec![4.0, 6.0]);
        assert_eq!(a.to_layout(Layout::ColumnMajor).mul_vec(&x), vec![4.0, 6.0]);
    }
}
