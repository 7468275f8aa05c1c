/// Storage order of a dense matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Layout {
    /// Consecutive elements of a row are adjacent in memory.
    #[default]
    RowMajor,

    /// Consecutive elements of a column are adjacent in memory.
    ColumnMajor,
}

impl Layout {
    /// Returns the layout for a column-major flag.
    #[must_use]
    pub fn from_column_major(column_major: bool) -> Self {
        if column_major {
            Self::ColumnMajor
        } else {
            Self::RowMajor
        }
    }

    /// Returns the flat offset of logical element `(i, j)` in an `n × n` buffer.
    #[must_use]
    pub fn offset(self, n: usize, i: usize, j: usize) -> usize {
        match self {
            Self::RowMajor => i * n + j,
            Self::ColumnMajor => j * n + i,
        }
    }
}
